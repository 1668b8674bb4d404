use cucumber::when;

use role_lib::entities::ProjectPermission;

use crate::support::world::TestWorld;

#[when(expr = "user {int} relates the role to project {int}")]
pub async fn relate_project(world: &mut TestWorld, actor: i64, project_id: i64) {
    let result = world.service().add_project(world.role_id(), project_id, actor).await;
    if let Some(relation) = world.record(result) {
        world.relation = Some(relation);
    }
}

#[when(expr = "user {int} sets view level {int} with download enabled")]
pub async fn set_view_level(world: &mut TestWorld, actor: i64, level: u8) {
    let relation_id = world.relation.as_ref().expect("no project relation").id;
    let permission = ProjectPermission {
        view_permission: level,
        download_permission: true,
        ..ProjectPermission::default()
    };
    let result = world
        .service()
        .update_project_permission(relation_id, permission, actor)
        .await;
    if let Some(relation) = world.record(result) {
        world.relation = Some(relation);
    }
}

#[when(expr = "user {int} removes the project relation")]
pub async fn remove_project(world: &mut TestWorld, actor: i64) {
    let relation_id = world.relation.as_ref().expect("no project relation").id;
    let result = world.service().delete_project(relation_id, actor).await;
    world.record(result);
}

#[when(expr = "user {int} lists the role projects")]
pub async fn list_projects(world: &mut TestWorld, actor: i64) {
    let result = world.service().get_projects(world.role_id(), actor).await;
    world.projects = world.record(result).unwrap_or_default();
}
