use cucumber::given;

use role_lib::entities::NewRole;

use crate::support::world::TestWorld;

#[given(expr = "project {int} is created by user {int}")]
pub async fn project_created_by(world: &mut TestWorld, project_id: i64, user_id: i64) {
    world.store = std::mem::take(&mut world.store).with_project(project_id, user_id);
}

#[given(expr = "user {int} administers project {int}")]
pub async fn user_administers_project(world: &mut TestWorld, user_id: i64, project_id: i64) {
    world.store = std::mem::take(&mut world.store).with_project_admin(project_id, user_id);
}

#[given(expr = "user {int} is registered as {string}")]
pub async fn user_registered(world: &mut TestWorld, user_id: i64, username: String) {
    world.store = std::mem::take(&mut world.store).with_user(user_id, &username);
}

#[given(expr = "user {int} created the role {string} in project {int}")]
pub async fn role_created(world: &mut TestWorld, actor: i64, name: String, project_id: i64) {
    let role = world
        .service()
        .create_role(
            NewRole {
                name,
                description: None,
                project_id,
            },
            actor,
        )
        .await
        .expect("role setup failed");
    world.role = Some(role);
}

#[given(expr = "user {int} added user {int} to the role")]
pub async fn member_added(world: &mut TestWorld, actor: i64, user_id: i64) {
    let member = world
        .service()
        .add_member(world.role_id(), user_id, actor)
        .await
        .expect("member setup failed");
    world.member = Some(member);
}

#[given(expr = "user {int} related the role to project {int}")]
pub async fn project_related(world: &mut TestWorld, actor: i64, project_id: i64) {
    let relation = world
        .service()
        .add_project(world.role_id(), project_id, actor)
        .await
        .expect("project relation setup failed");
    world.relation = Some(relation);
}
