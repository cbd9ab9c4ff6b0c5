//! Step definitions for tree scenarios.

use cucumber::{given, then, when, World};
use rbtree::{Color, Linked, NodeId, RbLink, RbTree};

#[derive(Debug)]
pub struct Rec {
    key: u32,
    link: RbLink,
}

impl Linked for Rec {
    fn link(&self) -> &RbLink {
        &self.link
    }
    fn link_mut(&mut self) -> &mut RbLink {
        &mut self.link
    }
}

fn by_key(a: &Rec, b: &Rec) -> bool {
    a.key < b.key
}

fn keyed(key: u32) -> Rec {
    Rec {
        key,
        link: RbLink::new(),
    }
}

fn parse_keys(list: &str) -> Vec<u32> {
    list.split(',')
        .map(|k| k.trim().parse().expect("key list must hold integers"))
        .collect()
}

/// Test context for tree scenarios.
#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct TreeWorld {
    records: Vec<Rec>,
    tree: RbTree<Rec, fn(&Rec, &Rec) -> bool>,
    last_error: Option<String>,
}

impl TreeWorld {
    fn new() -> Self {
        Self {
            records: Vec::new(),
            tree: RbTree::new(by_key),
            last_error: None,
        }
    }

    fn id_of(&self, key: u32) -> NodeId {
        let index = self
            .records
            .iter()
            .position(|r| r.key == key)
            .expect("key was never inserted");
        NodeId::try_from(index).expect("index in range")
    }

    fn record(&self, id: Option<NodeId>) -> &Rec {
        let id = id.expect("expected a node");
        &self.records[id.index()]
    }

    fn insert_key(&mut self, key: u32) {
        let id = NodeId::try_from(self.records.len()).expect("index in range");
        self.records.push(keyed(key));
        let outcome = self.tree.insert(&mut self.records, id);
        self.record_outcome(outcome);
    }

    fn delete_key(&mut self, key: u32) {
        let id = self.id_of(key);
        let outcome = self.tree.delete(&mut self.records, id).map(|_| ());
        self.record_outcome(outcome);
    }

    fn record_outcome(&mut self, outcome: rbtree::Result<()>) {
        self.last_error = outcome.err().map(|e| e.to_string());
    }

    fn in_order_keys(&self) -> Vec<u32> {
        self.tree.iter(&self.records).map(|(_, r)| r.key).collect()
    }
}

// --- Given steps ---

#[given("an empty tree")]
async fn given_empty_tree(world: &mut TreeWorld) {
    *world = TreeWorld::new();
}

// --- When steps ---

#[when(expr = "I insert the keys {string}")]
async fn when_insert_keys(world: &mut TreeWorld, keys: String) {
    for key in parse_keys(&keys) {
        world.insert_key(key);
        assert_eq!(world.last_error, None, "inserting {}", key);
    }
}

#[when(expr = "I insert the key {int} again")]
async fn when_reinsert_key(world: &mut TreeWorld, key: u32) {
    let id = world.id_of(key);
    let outcome = world.tree.insert(&mut world.records, id);
    world.record_outcome(outcome);
}

#[when(expr = "I delete the key {int}")]
async fn when_delete_key(world: &mut TreeWorld, key: u32) {
    world.delete_key(key);
}

#[when(expr = "I delete the keys {string}")]
async fn when_delete_keys(world: &mut TreeWorld, keys: String) {
    for key in parse_keys(&keys) {
        world.delete_key(key);
        assert_eq!(world.last_error, None, "deleting {}", key);
    }
}

// --- Then steps ---

#[then(expr = "the root holds {int} and is black")]
async fn then_root_holds(world: &mut TreeWorld, key: u32) {
    let root = world.record(world.tree.root());
    assert_eq!(root.key, key);
    assert_eq!(root.link.color(), Color::Black);
}

#[then(expr = "the left child of the root holds {int} and is red")]
async fn then_left_child(world: &mut TreeWorld, key: u32) {
    let root = world.record(world.tree.root());
    let left = world.record(root.link.left());
    assert_eq!(left.key, key);
    assert_eq!(left.link.color(), Color::Red);
}

#[then(expr = "the right child of the root holds {int} and is red")]
async fn then_right_child(world: &mut TreeWorld, key: u32) {
    let root = world.record(world.tree.root());
    let right = world.record(root.link.right());
    assert_eq!(right.key, key);
    assert_eq!(right.link.color(), Color::Red);
}

#[then(expr = "the tree holds {int} nodes")]
async fn then_tree_holds(world: &mut TreeWorld, count: usize) {
    assert_eq!(world.tree.len(), count);
    assert_eq!(world.tree.iter(&world.records).count(), count);
}

#[then("the tree satisfies the red-black invariants")]
async fn then_invariants_hold(world: &mut TreeWorld) {
    if let Err(violation) = world.tree.validate(&world.records) {
        panic!("invariant violated: {}", violation);
    }
}

#[then(expr = "the in-order keys are {string}")]
async fn then_in_order_keys(world: &mut TreeWorld, keys: String) {
    assert_eq!(world.in_order_keys(), parse_keys(&keys));
}

#[then(expr = "looking up {int} finds nothing")]
async fn then_lookup_misses(world: &mut TreeWorld, key: u32) {
    assert_eq!(world.tree.find(&world.records, &keyed(key)), None);
}

#[then(expr = "looking up {int} finds it")]
async fn then_lookup_hits(world: &mut TreeWorld, key: u32) {
    let found = world.tree.find(&world.records, &keyed(key));
    assert_eq!(found, Some(world.id_of(key)));
}

#[then("the tree is empty")]
async fn then_tree_empty(world: &mut TreeWorld) {
    assert!(world.tree.is_empty());
    assert_eq!(world.tree.len(), 0);
    assert_eq!(world.tree.root(), None);
}

#[then("every record is detached")]
async fn then_all_detached(world: &mut TreeWorld) {
    assert!(world.records.iter().all(|r| r.link.is_detached()));
}

#[then(expr = "the last operation failed with {string}")]
async fn then_last_error(world: &mut TreeWorld, message: String) {
    assert_eq!(world.last_error.as_deref(), Some(message.as_str()));
}
