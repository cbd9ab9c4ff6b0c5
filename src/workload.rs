//! Randomized insert/lookup/delete workload.
//!
//! Drives a tree through a full fill-and-drain cycle and checks the
//! invariants along the way. Used by the `rbtree-workload` binary.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::config::WorkloadConfig;
use crate::error::{InvariantViolation, RbError};
use crate::node::{Linked, NodeId, RbLink};
use crate::tree::RbTree;

/// Record type the workload stores.
#[derive(Debug)]
pub struct Record {
    pub key: u64,
    link: RbLink,
}

impl Record {
    pub fn new(key: u64) -> Self {
        Self {
            key,
            link: RbLink::new(),
        }
    }
}

impl Linked for Record {
    fn link(&self) -> &RbLink {
        &self.link
    }

    fn link_mut(&mut self) -> &mut RbLink {
        &mut self.link
    }
}

fn by_key(a: &Record, b: &Record) -> bool {
    a.key < b.key
}

/// Summary of a completed workload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadReport {
    pub keys: usize,
    /// Tallest the tree got while full.
    pub peak_height: usize,
    /// Height once every key has been deleted again.
    pub final_height: usize,
    /// Black height of the full tree.
    pub black_height: usize,
    /// Number of full validations performed.
    pub validations: usize,
    pub elapsed: Duration,
}

/// Workload failures.
#[derive(Debug, thiserror::Error)]
pub enum WorkloadError {
    #[error("Tree operation failed: {0}")]
    Tree(#[from] RbError),

    #[error("Invariant violated after {ops} operations: {violation}")]
    Invariant {
        ops: usize,
        violation: InvariantViolation,
    },

    #[error("Key {0} was not found")]
    Missing(u64),

    #[error("Absent key {0} was found")]
    Phantom(u64),

    #[error("Tree still holds {0} nodes after draining")]
    NotEmpty(usize),
}

/// Run the workload described by `config`.
pub fn run(config: &WorkloadConfig) -> Result<WorkloadReport, WorkloadError> {
    let start = Instant::now();
    let mut rng = StdRng::seed_from_u64(config.seed);

    // Even keys only, so odd keys are guaranteed absent.
    let mut keys: Vec<u64> = (0..config.keys as u64).map(|k| k * 2).collect();
    keys.shuffle(&mut rng);
    let mut records: Vec<Record> = keys.into_iter().map(Record::new).collect();

    let mut tree = RbTree::new(by_key);
    let mut validations = 0;
    let mut ops = 0;

    info!(keys = config.keys, seed = config.seed, "inserting");
    for index in 0..records.len() {
        tree.insert(&mut records, NodeId::try_from(index)?)?;
        ops += 1;
        validations += checkpoint(&tree, &records, config, ops)?;
    }

    let black_height = validate(&tree, &records, ops)?;
    validations += 1;
    let peak_height = tree.height(&records);
    debug!(height = peak_height, black_height, "tree full");

    if config.lookups {
        info!("looking up every key");
        for record in &records {
            let probe = Record::new(record.key);
            if tree.find(&records, &probe).is_none() {
                return Err(WorkloadError::Missing(record.key));
            }
            let absent = Record::new(record.key + 1);
            if tree.find(&records, &absent).is_some() {
                return Err(WorkloadError::Phantom(absent.key));
            }
        }
    }

    let mut order: Vec<usize> = (0..records.len()).collect();
    order.shuffle(&mut rng);
    info!("deleting");
    for index in order {
        tree.delete(&mut records, NodeId::try_from(index)?)?;
        ops += 1;
        validations += checkpoint(&tree, &records, config, ops)?;
    }

    if !tree.is_empty() {
        return Err(WorkloadError::NotEmpty(tree.len()));
    }

    let report = WorkloadReport {
        keys: config.keys,
        peak_height,
        final_height: tree.height(&records),
        black_height,
        validations,
        elapsed: start.elapsed(),
    };
    info!(?report, "workload complete");
    Ok(report)
}

fn checkpoint<C>(
    tree: &RbTree<Record, C>,
    records: &[Record],
    config: &WorkloadConfig,
    ops: usize,
) -> Result<usize, WorkloadError>
where
    C: Fn(&Record, &Record) -> bool,
{
    if config.validate_every == 0 || ops % config.validate_every != 0 {
        return Ok(0);
    }
    validate(tree, records, ops)?;
    Ok(1)
}

fn validate<C>(
    tree: &RbTree<Record, C>,
    records: &[Record],
    ops: usize,
) -> Result<usize, WorkloadError>
where
    C: Fn(&Record, &Record) -> bool,
{
    tree.validate(records)
        .map_err(|violation| WorkloadError::Invariant { ops, violation })
}
