use cucumber::when;

use role_lib::entities::{NewRole, RoleUpdate};

use crate::support::world::TestWorld;

#[when(expr = "user {int} creates the role {string} in project {int}")]
pub async fn create_role(world: &mut TestWorld, actor: i64, name: String, project_id: i64) {
    let result = world
        .service()
        .create_role(
            NewRole {
                name,
                description: None,
                project_id,
            },
            actor,
        )
        .await;
    if let Some(role) = world.record(result) {
        world.role = Some(role);
    }
}

#[when(expr = "user {int} renames the role to {string}")]
pub async fn rename_role(world: &mut TestWorld, actor: i64, name: String) {
    let update = RoleUpdate {
        name,
        description: None,
    };
    let result = world.service().update_role(world.role_id(), update, actor).await;
    if let Some(role) = world.record(result) {
        world.role = Some(role);
    }
}

#[when(expr = "user {int} deletes the role")]
pub async fn delete_role(world: &mut TestWorld, actor: i64) {
    let result = world.service().delete_role(world.role_id(), actor).await;
    world.record(result);
}
