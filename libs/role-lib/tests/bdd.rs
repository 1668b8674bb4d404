mod support;

use cucumber::World;
use support::world::TestWorld;

#[tokio::main]
async fn main() {
    TestWorld::run("tests/features").await;
}
