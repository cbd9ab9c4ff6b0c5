//! Gherkin scenarios for named tree shapes.
//!
//! ```bash
//! cargo test --test scenarios
//! ```

mod steps;

use cucumber::World;
use steps::TreeWorld;

#[tokio::main]
async fn main() {
    TreeWorld::cucumber()
        .fail_on_skipped()
        .run_and_exit("tests/scenarios/features/tree.feature")
        .await;
}
