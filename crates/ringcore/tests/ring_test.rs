//! End-to-end tests for the consistent-hash ring.
//!
//! # Test Strategy
//!
//! 1. **Contracts**: empty ring, membership no-ops, total coverage
//! 2. **Scenarios**: membership churn with golden node sets, wraparound
//! 3. **Statistics**: distribution balance, bounded remapping
//! 4. **Properties**: proptest over replica counts and node sets

use std::collections::HashMap;

use proptest::prelude::*;
use ringcore::{Error, Ring, RING_SPAN};

// ============================================================================
// Contract Tests
// ============================================================================

#[test]
fn test_empty_ring_contract() {
    let ring = Ring::new(1024);
    assert_eq!(ring.get("aaa"), Err(Error::EmptyRing));
    assert!(ring.nodes().is_empty());
    assert!(ring.is_empty());
    assert_eq!(ring.point_count(), 0);
}

#[test]
fn test_add_then_del_leaves_ring_empty() {
    let mut ring = Ring::new(64);
    ring.add(["10.0.0.1"]);
    assert_eq!(ring.point_count(), 64);

    ring.del(["10.0.0.1"]);
    assert!(ring.is_empty());
    assert_eq!(ring.get("key"), Err(Error::EmptyRing));
    assert!(ring.nodes().is_empty());
}

#[test]
fn test_lookup_is_batch_insensitive() {
    // The same membership reached through different add batching must
    // produce the same key routing.
    let mut one_batch = Ring::new(128);
    one_batch.add(["a", "b", "c", "d"]);

    let mut many_batches = Ring::new(128);
    many_batches.add(["d"]);
    many_batches.add(["b", "a"]);
    many_batches.add(["c"]);

    for i in 0..1000 {
        let key = format!("key-{i}");
        assert_eq!(one_batch.get(&key), many_batches.get(&key));
    }
}

#[test]
fn test_lookup_is_stable_across_calls() {
    let mut ring = Ring::new(128);
    ring.add(["a", "b", "c"]);
    let first = ring.get("stable-key").unwrap().to_string();
    for _ in 0..10 {
        assert_eq!(ring.get("stable-key").unwrap(), first);
    }
}

// ============================================================================
// Scenario Tests
// ============================================================================

#[test]
fn test_membership_churn_scenario() {
    let mut ring = Ring::new(1024);

    // Scale up, lose two nodes, scale up again.
    ring.add(["127.0.0.1"]);
    ring.add(["0.0.0.0", "8.8.8.8"]);
    ring.del(["127.0.0.1", "8.8.8.8"]);
    ring.add([
        "114.114.114.114",
        "255.255.255.255",
        "1.1.1.1",
        "2.2.2.2",
        "3.3.3.3",
    ]);

    let expected = [
        "0.0.0.0",
        "114.114.114.114",
        "255.255.255.255",
        "1.1.1.1",
        "2.2.2.2",
        "3.3.3.3",
    ];
    let widths = ring.nodes();
    assert_eq!(widths.len(), expected.len());
    for node in expected {
        assert!(widths.contains_key(node), "missing node {node}");
    }
    assert_eq!(widths.values().sum::<u64>(), RING_SPAN);

    // Sampled lookups must hit every node, each roughly in proportion to
    // its interval width.
    let samples = 16384usize;
    let mut counts: HashMap<String, usize> = HashMap::new();
    for i in 0..samples {
        let node = ring.get(&i.to_string()).unwrap();
        *counts.entry(node.to_string()).or_insert(0) += 1;
    }
    for node in expected {
        let count = counts.get(node).copied().unwrap_or(0);
        assert!(count > 0, "node {node} never selected");

        let sampled_share = count as f64 / samples as f64;
        let width_share = widths[node] as f64 / RING_SPAN as f64;
        assert!(
            (sampled_share - width_share).abs() < 0.05,
            "node {node}: sampled {sampled_share:.3} vs width {width_share:.3}"
        );
    }
}

#[test]
fn test_single_node_owns_entire_ring() {
    let mut ring = Ring::new(1);
    ring.add(["127.0.0.1"]);

    let expected = HashMap::from([("127.0.0.1".to_string(), RING_SPAN)]);
    assert_eq!(ring.nodes(), expected);
}

// ============================================================================
// Statistical Tests
// ============================================================================

#[test]
fn test_adding_a_node_remaps_a_bounded_fraction() {
    let samples = 10_000usize;
    let mut ring = Ring::new(128);
    ring.add(["n1", "n2", "n3", "n4", "n5"]);

    let before: Vec<String> = (0..samples)
        .map(|i| ring.get(&i.to_string()).unwrap().to_string())
        .collect();

    ring.add(["n6"]);

    let mut remapped = 0usize;
    for (i, old) in before.iter().enumerate() {
        let new = ring.get(&i.to_string()).unwrap();
        if new != old {
            // Keys only ever move onto the node that joined.
            assert_eq!(new, "n6", "key {i} moved to an existing node");
            remapped += 1;
        }
    }

    // Expectation is 1/6 of the key space; leave generous slack for the
    // variance of 128 replicas.
    let fraction = remapped as f64 / samples as f64;
    assert!(fraction > 0.0, "no keys remapped at all");
    assert!(fraction < 0.40, "remapped fraction too high: {fraction:.3}");
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Interval widths partition the ring exactly, whatever the
    /// membership or replica count.
    #[test]
    fn prop_widths_sum_to_ring_span(
        nodes in proptest::collection::hash_set("[a-z0-9.]{1,12}", 1..8),
        replicas in 1usize..64,
    ) {
        let mut ring = Ring::new(replicas);
        ring.add(nodes.iter().cloned());
        prop_assert_eq!(ring.nodes().values().sum::<u64>(), RING_SPAN);
    }

    /// Two rings built from the same membership agree on every lookup.
    #[test]
    fn prop_lookup_is_deterministic(
        nodes in proptest::collection::hash_set("[a-z0-9.]{1,12}", 1..8),
        keys in proptest::collection::vec("[a-z0-9:-]{1,16}", 1..32),
        replicas in 1usize..64,
    ) {
        let mut left = Ring::new(replicas);
        left.add(nodes.iter().cloned());
        let mut right = Ring::new(replicas);
        right.add(nodes.iter().cloned());

        for key in &keys {
            prop_assert_eq!(left.get(key), right.get(key));
        }
    }

    /// Removing every node returns the ring to its empty state.
    #[test]
    fn prop_full_removal_empties_ring(
        nodes in proptest::collection::hash_set("[a-z0-9.]{1,12}", 1..8),
        replicas in 1usize..64,
    ) {
        let mut ring = Ring::new(replicas);
        ring.add(nodes.iter().cloned());
        ring.del(nodes.iter());
        prop_assert!(ring.is_empty());
        prop_assert_eq!(ring.get("key"), Err(Error::EmptyRing));
    }
}
