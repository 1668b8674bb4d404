use cucumber::then;

use role_lib::entities::ProjectPermission;
use role_lib::errors_service::RoleServiceError;

use crate::support::world::TestWorld;

#[then(expr = "the role {string} belongs to project {int}")]
async fn role_belongs_to_project(world: &mut TestWorld, name: String, project_id: i64) {
    assert!(world.error.is_none(), "unexpected error: {:?}", world.error);
    let role = world.role.as_ref().expect("role should exist");
    assert_eq!(role.name, name);
    assert_eq!(role.project_id, project_id);
}

#[then(expr = "the role is named {string}")]
async fn role_is_named(world: &mut TestWorld, name: String) {
    let stored = world.service().get_role(world.role_id(), world.role.as_ref().unwrap().create_by).await.unwrap();
    assert_eq!(stored.name, name);
}

#[then("the role still exists")]
async fn role_still_exists(world: &mut TestWorld) {
    assert_eq!(world.store.role_count(), 1);
}

#[then("the role no longer exists")]
async fn role_gone(world: &mut TestWorld) {
    assert!(world.error.is_none(), "unexpected error: {:?}", world.error);
    assert_eq!(world.store.role_count(), 0);
}

#[then("no member or project relation of the role remains")]
async fn no_relations_remain(world: &mut TestWorld) {
    let role_id = world.role_id();
    assert_eq!(world.store.member_count(role_id), 0);
    assert_eq!(world.store.project_relation_count(role_id), 0);
}

#[then(expr = "the role has {int} member(s)")]
async fn role_member_count(world: &mut TestWorld, count: usize) {
    assert_eq!(world.store.member_count(world.role_id()), count);
}

#[then(expr = "user {int} is a member of the role")]
async fn user_is_member(world: &mut TestWorld, user_id: i64) {
    assert!(world.members.iter().any(|m| m.user.id == user_id));
}

#[then(expr = "the role is related to {int} project(s)")]
async fn role_project_count(world: &mut TestWorld, count: usize) {
    assert_eq!(world.store.project_relation_count(world.role_id()), count);
}

#[then(expr = "the role is related to project {int}")]
async fn role_related_to(world: &mut TestWorld, project_id: i64) {
    assert!(world.projects.iter().any(|p| p.project_id == project_id));
}

#[then("the relation grants viz level 1 and nothing else")]
async fn default_permission(world: &mut TestWorld) {
    let relation = world.relation.as_ref().expect("relation should exist");
    assert_eq!(relation.permission, ProjectPermission::default());
    assert_eq!(relation.permission.viz_permission, 1);
    assert_eq!(relation.permission.view_permission, 0);
    assert!(!relation.permission.share_permission);
}

#[then(expr = "the relation grants view level {int} with download enabled")]
async fn view_permission(world: &mut TestWorld, level: u8) {
    assert!(world.error.is_none(), "unexpected error: {:?}", world.error);
    let relation = world.relation.as_ref().expect("relation should exist");
    assert_eq!(relation.permission.view_permission, level);
    assert!(relation.permission.download_permission);
    assert_eq!(relation.permission.viz_permission, 1);
}

#[then(expr = "the relation still links the role to project {int}")]
async fn relation_links(world: &mut TestWorld, project_id: i64) {
    let relation = world.relation.as_ref().expect("relation should exist");
    assert_eq!(relation.role_id, world.role_id());
    assert_eq!(relation.project_id, project_id);
}

#[then("the request is rejected as unauthorized")]
async fn unauthorized(world: &mut TestWorld) {
    assert!(matches!(world.error, Some(RoleServiceError::Unauthorized(_))), "got {:?}", world.error);
}

#[then("the request fails because the role name already exists")]
async fn duplicate_name(world: &mut TestWorld) {
    assert!(matches!(world.error, Some(RoleServiceError::RoleNameAlreadyExists)));
}

#[then("the request fails because the member already exists")]
async fn duplicate_member(world: &mut TestWorld) {
    assert!(matches!(world.error, Some(RoleServiceError::MemberAlreadyExists)));
}

#[then("the request fails because the project is already related")]
async fn duplicate_project(world: &mut TestWorld) {
    assert!(matches!(world.error, Some(RoleServiceError::ProjectAlreadyLinked)));
}

#[then(expr = "the request fails because {word} {int} is not found")]
async fn not_found(world: &mut TestWorld, entity: String, id: i64) {
    match &world.error {
        Some(RoleServiceError::NotFound { entity: e, id: i }) => {
            assert_eq!(*e, entity);
            assert_eq!(*i, id);
        }
        other => panic!("expected not found, got {other:?}"),
    }
}

#[then("the request fails validation")]
async fn validation(world: &mut TestWorld) {
    assert!(matches!(world.error, Some(RoleServiceError::Validation(_))), "got {:?}", world.error);
}
