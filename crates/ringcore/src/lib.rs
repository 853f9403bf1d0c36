//! Consistent-hash ring library.
//!
//! Maps arbitrary string keys onto a dynamic set of named nodes so that
//! adding or removing a node remaps only a small, bounded fraction of
//! keys. Each node is placed on a logical 2^32 ring at `replicas` virtual
//! points; lookup is a lower-bound binary search with wraparound.
//!
//! # Example
//!
//! ```
//! use ringcore::Ring;
//!
//! let mut ring = Ring::new(256);
//! ring.add(["10.0.0.1:6379", "10.0.0.2:6379"]);
//! let owner = ring.get("user:42")?;
//! assert!(owner.ends_with(":6379"));
//! # Ok::<(), ringcore::Error>(())
//! ```
//!
//! The ring performs no internal locking; mutations take `&mut self` and
//! callers requiring concurrent access serialize writes themselves (or
//! swap immutable snapshots).

pub mod error;
pub mod hasher;
pub mod point;
pub mod ring;

pub use error::{Error, Result};
pub use hasher::{Crc32, Hasher};
pub use point::{Point, RING_SPAN};
pub use ring::{Ring, RingBuilder};
