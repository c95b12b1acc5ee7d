//! Common traits for heap data structures
//!
//! This module provides a two-tier trait hierarchy:
//!
//! - [`Heap`]: Base trait for a mergeable min-heap of `(priority, item)` pairs
//! - [`AddressableHeap`]: Extended trait adding handle-based operations
//!   (`contains`, `change_priority`, `remove`)
//!
//! Priorities only need [`PartialOrd`], and implementations only ever use the
//! strict `<` comparison. Two priorities where neither is less than the other
//! are treated as ties and may appear in either order.

use std::fmt;
use std::hash::Hash;

/// Error type for handle-based heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// The handle does not refer to an entry currently stored in this heap
    /// (it was extracted, removed, or issued by another heap)
    InvalidHandle,
    /// Neither `old < new` nor `new < old` holds for the requested priority
    PriorityUnchanged,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::InvalidHandle => {
                write!(f, "handle does not refer to an entry of this heap")
            }
            HeapError::PriorityUnchanged => {
                write!(f, "new priority compares equal to the current priority")
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// A handle to an element in the heap
///
/// This is an opaque token identifying a specific inserted element. Handles
/// are cheap to copy and compare; holding one never keeps an element alive.
pub trait Handle: Copy + Eq + Hash + fmt::Debug {}

/// Base trait for heap/priority queue data structures
///
/// Similar to `BinaryHeap`, but a min-heap storing (priority, item) pairs so
/// the ordering key is separate from the data.
///
/// # Example
///
/// ```rust
/// use binomial_queue::Heap;
/// use binomial_queue::binomial::BinomialHeap;
///
/// let mut heap = BinomialHeap::new();
/// heap.push(3, "three");
/// heap.push(1, "one");
/// heap.push(2, "two");
///
/// assert_eq!(heap.peek(), Some((&1, &"one")));
/// assert_eq!(heap.pop(), Some((1, "one")));
/// ```
pub trait Heap<T, P: PartialOrd> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts an element with the given priority
    fn push(&mut self, priority: P, item: T);

    /// Returns the minimum priority and associated item without removing it
    fn peek(&self) -> Option<(&P, &T)>;

    /// Removes and returns the minimum priority and associated item
    fn pop(&mut self) -> Option<(P, T)>;

    /// Merges another heap into this one, consuming the other heap
    fn merge(&mut self, other: Self);
}

/// Extended heap trait with handle-based operations
///
/// `push_with_handle` returns a handle that can later be used to query,
/// re-prioritize, or remove that specific element.
///
/// # Example
///
/// ```rust
/// use binomial_queue::{AddressableHeap, Heap};
/// use binomial_queue::binomial::BinomialHeap;
///
/// let mut heap: BinomialHeap<&'static str, i32> = BinomialHeap::new();
/// fn promote<H: AddressableHeap<&'static str, i32>>(heap: &mut H) {
///     let handle = heap.push_with_handle(10, "item");
///     heap.push(7, "other");
///     heap.change_priority(&handle, 5).unwrap();
///     assert_eq!(heap.peek(), Some((&5, &"item")));
/// }
///
/// promote(&mut BinomialHeap::new());
/// ```
pub trait AddressableHeap<T, P: PartialOrd>: Heap<T, P> {
    /// The handle type for this heap
    type Handle: Handle;

    /// Inserts an element with the given priority, returning a handle
    fn push_with_handle(&mut self, priority: P, item: T) -> Self::Handle;

    /// Returns true if the handle refers to an element stored in this heap
    fn contains(&self, handle: &Self::Handle) -> bool;

    /// Returns the priority and item of the element behind `handle`
    fn get(&self, handle: &Self::Handle) -> Option<(&P, &T)>;

    /// Changes the priority of an element, moving it up or down as needed
    ///
    /// # Errors
    /// - `HeapError::InvalidHandle` if the handle is not contained in this heap
    /// - `HeapError::PriorityUnchanged` if the new priority ties the old one
    fn change_priority(&mut self, handle: &Self::Handle, new_priority: P) -> Result<(), HeapError>;

    /// Removes the element behind `handle`, returning its priority and item
    fn remove(&mut self, handle: &Self::Handle) -> Option<(P, T)>;
}
