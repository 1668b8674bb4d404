use cucumber::when;

use crate::support::world::TestWorld;

#[when(expr = "user {int} adds user {int} to the role")]
pub async fn add_member(world: &mut TestWorld, actor: i64, user_id: i64) {
    let result = world.service().add_member(world.role_id(), user_id, actor).await;
    if let Some(member) = world.record(result) {
        world.member = Some(member);
    }
}

#[when(expr = "user {int} removes the member relation")]
pub async fn remove_member(world: &mut TestWorld, actor: i64) {
    let relation_id = world.member.as_ref().expect("no member relation").id;
    let result = world.service().delete_member(relation_id, actor).await;
    world.record(result);
}

#[when(expr = "user {int} lists the role members")]
pub async fn list_members(world: &mut TestWorld, actor: i64) {
    let result = world.service().get_members(world.role_id(), actor).await;
    world.members = world.record(result).unwrap_or_default();
}
