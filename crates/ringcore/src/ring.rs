//! The consistent-hash ring.
//!
//! The ring keeps two views of the same membership: a point-to-node map
//! and a sorted vec of every point in that map. Lookup is a lower-bound
//! binary search over the vec with wraparound to the first point; the map
//! resolves the selected point to its owning node.

use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};
use crate::hasher::{Crc32, Hasher};
use crate::point::Point;

/// A consistent-hash ring mapping string keys to named nodes.
///
/// Each real node is expanded into `replicas` virtual points on the 2^32
/// ring; more replicas smooth out the interval sizes between nodes.
/// Membership changes remap only the keys adjacent to the changed points,
/// roughly `1/(n+1)` of the key space when growing an `n`-node ring.
///
/// Mutations take `&mut self` and readers take `&self`; the ring itself
/// performs no locking. Callers needing concurrent mutation serialize
/// writes externally or swap in a freshly built ring.
pub struct Ring {
    /// Point on the ring to owning node name. Keys are unique; several
    /// points map to the same node (one per replica). On a collision
    /// between two virtual keys the later write wins, which shaves one
    /// replica off the earlier node -- accepted at 32-bit collision odds.
    point_to_node: HashMap<Point, String>,
    /// Every key of `point_to_node`, sorted ascending. May briefly hold
    /// duplicates when a present node is re-added; duplicates contribute
    /// zero-width intervals and are purged by the next `del`.
    points: Vec<Point>,
    /// Virtual points generated per node on `add`.
    replicas: usize,
    hasher: Box<dyn Hasher>,
}

impl Ring {
    /// Creates an empty ring with the default CRC-32 hasher.
    ///
    /// `replicas` is the number of virtual points placed per node; it
    /// should be at least 1. A ring built with `replicas == 0` is inert:
    /// `add` places nothing and `get` always fails with [`Error::EmptyRing`].
    pub fn new(replicas: usize) -> Self {
        Self::builder(replicas).build()
    }

    /// Starts building a ring with a non-default hasher.
    pub fn builder(replicas: usize) -> RingBuilder {
        RingBuilder::new(replicas)
    }

    /// Adds nodes to the ring.
    ///
    /// Every node is placed at `replicas` points, each the hash of the
    /// node name concatenated with a decimal replica index. The point
    /// sequence is re-sorted once after the whole batch. Re-adding a
    /// present node regenerates the same points and is a no-op in effect.
    pub fn add<I>(&mut self, nodes: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        for node in nodes {
            let node = node.into();
            for index in 0..self.replicas {
                let point = self.hasher.hash(virtual_key(&node, index).as_bytes());
                self.point_to_node.insert(point, node.clone());
                self.points.push(point);
            }
            tracing::debug!(node = %node, replicas = self.replicas, "node added");
        }
        self.points.sort_unstable();
    }

    /// Removes nodes from the ring.
    ///
    /// Recomputes each node's virtual-key points and deletes them from
    /// the map (absent points are no-ops), then rebuilds the sorted point
    /// sequence from the map's keys. The rebuild keeps the sequence and
    /// the map from ever diverging, at the cost of an O(n log n) resort.
    pub fn del<I>(&mut self, nodes: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for node in nodes {
            let node = node.as_ref();
            for index in 0..self.replicas {
                let point = self.hasher.hash(virtual_key(node, index).as_bytes());
                self.point_to_node.remove(&point);
            }
            tracing::debug!(node = %node, "node removed");
        }
        self.points = self.point_to_node.keys().copied().collect();
        self.points.sort_unstable();
    }

    /// Returns the node owning `key`.
    ///
    /// Hashes the raw key (no replica suffix) and selects the first point
    /// at or after it, wrapping to the ring's first point when the hash
    /// lands past the last one.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyRing`] when no node is present.
    pub fn get(&self, key: &str) -> Result<&str> {
        if self.points.is_empty() {
            return Err(Error::EmptyRing);
        }
        let point = self.hasher.hash(key.as_bytes());
        // Lower bound: first index whose point is >= the key's point.
        let mut index = self.points.partition_point(|&p| p < point);
        if index == self.points.len() {
            index = 0;
        }
        Ok(self.point_to_node[&self.points[index]].as_str())
    }

    /// Returns each node's share of the ring as an interval width.
    ///
    /// Walks the sorted point sequence crediting every point with the arc
    /// back to its predecessor (the first point's predecessor is zero),
    /// then credits the final wraparound arc to the node owning the last
    /// point. For a non-empty ring the widths sum to exactly 2^32; an
    /// empty ring yields an empty map. Diagnostics only -- routing goes
    /// through [`Ring::get`].
    pub fn nodes(&self) -> HashMap<String, u64> {
        let mut widths = HashMap::new();
        let mut prev = Point(0);
        for &point in &self.points {
            let node = &self.point_to_node[&point];
            let width = point.interval_from(prev);
            match widths.get_mut(node.as_str()) {
                Some(total) => *total += width,
                None => {
                    widths.insert(node.clone(), width);
                }
            }
            prev = point;
        }
        if let Some(&last) = self.points.last() {
            let node = &self.point_to_node[&last];
            // `node` was credited during the walk, so the entry exists.
            if let Some(total) = widths.get_mut(node.as_str()) {
                *total += last.wraparound_interval();
            }
        }
        widths
    }

    /// True when the ring holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of virtual points currently on the ring.
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Virtual points generated per node.
    pub fn replicas(&self) -> usize {
        self.replicas
    }

    /// Name of the configured hasher.
    pub fn hasher_name(&self) -> &'static str {
        self.hasher.name()
    }
}

impl fmt::Debug for Ring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ring")
            .field("points", &self.points.len())
            .field("replicas", &self.replicas)
            .field("hasher", &self.hasher.name())
            .finish()
    }
}

/// Builder for rings that need a non-default hasher.
pub struct RingBuilder {
    replicas: usize,
    hasher: Box<dyn Hasher>,
}

impl RingBuilder {
    /// Starts a builder with `replicas` virtual points per node and the
    /// default CRC-32 hasher.
    pub fn new(replicas: usize) -> Self {
        Self {
            replicas,
            hasher: Box::new(Crc32),
        }
    }

    /// Overrides the hash function. Accepts any [`Hasher`], including a
    /// plain `Fn(&[u8]) -> u32` closure.
    pub fn hasher(mut self, hasher: impl Hasher) -> Self {
        self.hasher = Box::new(hasher);
        self
    }

    /// Builds the empty ring.
    pub fn build(self) -> Ring {
        Ring {
            point_to_node: HashMap::new(),
            points: Vec::new(),
            replicas: self.replicas,
            hasher: self.hasher,
        }
    }
}

/// Virtual key for one replica of a node: the node name with the decimal
/// replica index appended. Deterministic, so `del` can re-derive exactly
/// the points `add` placed.
fn virtual_key(node: &str, index: usize) -> String {
    format!("{node}{index}")
}
