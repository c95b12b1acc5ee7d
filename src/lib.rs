//! Binomial Heap Priority Queue
//!
//! This crate provides a mergeable, addressable minimum-priority queue
//! implemented as a binomial heap: a forest of binomial trees where every
//! mutation is expressed as a merge of two root lists.
//!
//! # Features
//!
//! - **Insert / minimum / extract_min**: O(log n)
//! - **change_priority**: O(log n) in either direction (bubble up or sink down)
//! - **remove**: O(log n) removal of an arbitrary element by handle
//! - **merge**: combine two heaps into one
//!
//! Priorities only need [`PartialOrd`], and only `<` is ever evaluated.
//! Elements are addressed through copyable handles; a handle that was
//! extracted, removed, or issued by another heap is simply not contained.
//!
//! # Example
//!
//! ```rust
//! use binomial_queue::binomial::BinomialHeap;
//!
//! let mut heap = BinomialHeap::new();
//! let handle1 = heap.insert(5, "item1");
//! let _handle2 = heap.insert(3, "item2");
//! heap.change_priority(&handle1, 1);
//! assert_eq!(heap.minimum(), Some((&1, &"item1")));
//!
//! let entry = heap.remove(&handle1).unwrap();
//! assert_eq!(entry.into_parts(), (1, "item1"));
//! assert_eq!(heap.size(), 1);
//! ```

pub mod binomial;
pub mod invariants;
pub mod script;
pub(crate) mod storage;
pub mod traits;

// Re-export the main traits for convenience
pub use traits::{AddressableHeap, Heap, HeapError};
