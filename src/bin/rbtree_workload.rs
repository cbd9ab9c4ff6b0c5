//! rbtree-workload: randomized fill-and-drain run
//!
//! Inserts a shuffled key set, looks every key up, deletes in a second
//! random order, and validates the red-black invariants along the way.
//!
//! ## Configuration
//! - RBTREE_CONFIG: YAML config file (default: rbtree.yaml, optional)
//! - RBTREE_KEYS, RBTREE_SEED, RBTREE_VALIDATE_EVERY: overrides
//! - RBTREE_LOG: tracing filter (default: info)

use tracing::{error, info};

use rbtree::config::WorkloadConfig;
use rbtree::utils::bootstrap::init_tracing;
use rbtree::workload;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = WorkloadConfig::load()?;
    info!(?config, "rbtree-workload started");

    match workload::run(&config) {
        Ok(report) => {
            info!(
                keys = report.keys,
                peak_height = report.peak_height,
                final_height = report.final_height,
                black_height = report.black_height,
                validations = report.validations,
                elapsed = ?report.elapsed,
                "all invariants held"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "workload failed");
            Err(e.into())
        }
    }
}
