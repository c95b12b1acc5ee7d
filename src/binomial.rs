//! Binomial Heap implementation
//!
//! A binomial heap is a forest of binomial trees with:
//! - O(log n) insert, minimum, and extract_min
//! - O(log n) change_priority (both directions) and arbitrary removal
//! - O(log n) merge of two root lists
//!
//! # Algorithm Overview
//!
//! **Binomial Tree Bₖ**: Recursively defined:
//! - B₀ is a single node
//! - Bₖ is formed by linking two B_{k-1} trees
//! - Bₖ has exactly 2ᵏ nodes; its root has children B_{k-1}, ..., B₀
//!
//! The forest holds at most one tree of each degree, so its shape mirrors the
//! binary representation of the element count: bit i is set exactly when a
//! root of degree i exists.
//!
//! **Every mutation is a merge.** Insert merges a one-node forest in; extraction
//! and removal cut the children of a root loose and merge them back in. The
//! merge walks both root lists in increasing degree like binary addition with
//! a carry.
//!
//! **Priority changes swap contents, not structure.** A decreased entry
//! bubbles up by exchanging entries with its parent; an increased entry sinks
//! by exchanging with its smallest child. Tree shapes never change, and each
//! swap rewrites the back-references of both entries involved.
//!
//! # Storage
//!
//! Nodes and entries live in slotmap arenas (the `storage` module). Handles
//! carry the id of the heap that issued them plus a generational entry key, so
//! handles that are stale (extracted/removed) or foreign (issued by another
//! heap) are simply not contained.

use crate::invariants::{self, InvariantViolation};
use crate::storage::{Arena, EntryKey, NodeKey};
use crate::traits::{AddressableHeap, Handle, Heap, HeapError};
use smallvec::SmallVec;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_HEAP_ID: AtomicU64 = AtomicU64::new(0);

fn next_heap_id() -> u64 {
    NEXT_HEAP_ID.fetch_add(1, Ordering::Relaxed)
}

/// Handle to an element in a [`BinomialHeap`]
///
/// Returned by [`BinomialHeap::insert`]. The handle does not own the element;
/// once the element is extracted or removed the handle goes stale and every
/// operation given it becomes a no-op.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BinomialHandle {
    heap: u64,
    entry: EntryKey,
}

impl fmt::Debug for BinomialHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinomialHandle")
            .field("heap", &self.heap)
            .field("entry", &self.entry)
            .finish()
    }
}

impl Handle for BinomialHandle {}

/// An entry detached from the heap
///
/// Returned by value from [`BinomialHeap::extract_min`] and
/// [`BinomialHeap::remove`]; the caller owns it from then on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<T, P> {
    priority: P,
    payload: T,
}

impl<T, P> Entry<T, P> {
    pub fn priority(&self) -> &P {
        &self.priority
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    /// Splits the entry into its priority and payload
    pub fn into_parts(self) -> (P, T) {
        (self.priority, self.payload)
    }
}

/// Binomial Heap
///
/// A min-priority queue over priorities that only need `<`. Elements that
/// compare as neither-less are ties and may surface in either order.
///
/// # Example
///
/// ```rust
/// use binomial_queue::binomial::BinomialHeap;
///
/// let mut heap = BinomialHeap::new();
/// let b = heap.insert("b", 0);
/// heap.insert("a", 1);
/// heap.insert("c", 2);
///
/// assert_eq!(heap.minimum(), Some((&"a", &1)));
/// assert!(heap.change_priority(&b, "0"));
///
/// let entry = heap.extract_min().unwrap();
/// assert_eq!(entry.into_parts(), ("0", 0));
/// assert!(!heap.contains(&b));
/// ```
pub struct BinomialHeap<T, P> {
    arena: Arena<T, P>,
    /// Lowest-degree root (None when empty)
    head: Option<NodeKey>,
    /// Number of stored entries
    len: usize,
    id: u64,
}

impl<T, P: PartialOrd> BinomialHeap<T, P> {
    /// Creates an empty heap
    pub fn new() -> Self {
        Self {
            arena: Arena::default(),
            head: None,
            len: 0,
            id: next_heap_id(),
        }
    }

    /// Number of stored entries
    ///
    /// **Time Complexity**: O(1)
    pub fn size(&self) -> usize {
        self.len
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts a new entry and returns its handle
    ///
    /// **Time Complexity**: O(log n) worst-case
    ///
    /// **Algorithm**: build a single-node B₀ tree and merge it into the root
    /// list. This is incrementing a binary counter: the carry propagates
    /// through every occupied low degree.
    pub fn insert(&mut self, priority: P, payload: T) -> BinomialHandle {
        let (node, entry) = self.arena.alloc(priority, payload);
        self.head = self.merge_roots(self.head, Some(node));
        self.len += 1;
        self.handle(entry)
    }

    /// Returns the minimum priority and its payload without removing it
    ///
    /// **Time Complexity**: O(log n) - scans at most ⌊log₂ n⌋+1 roots
    pub fn minimum(&self) -> Option<(&P, &T)> {
        let (_, root) = self.find_min_root()?;
        let slot = self.arena.slot(root);
        Some((&slot.priority, &slot.payload))
    }

    /// Returns the handle of the current minimum entry
    pub fn minimum_handle(&self) -> Option<BinomialHandle> {
        let (_, root) = self.find_min_root()?;
        Some(self.handle(self.arena.node(root).entry))
    }

    /// Removes and returns the minimum entry
    ///
    /// **Time Complexity**: O(log n) worst-case
    ///
    /// **Algorithm**:
    /// 1. Find the minimum root, remembering its predecessor in the root list
    /// 2. Unlink it from the root list
    /// 3. Cut its child ring; the children B₀..B_{k-1} become a root list
    /// 4. Merge that list back into the heap
    pub fn extract_min(&mut self) -> Option<Entry<T, P>> {
        let (prev, root) = self.find_min_root()?;
        self.detach_root(root, prev);
        self.release(root)
    }

    /// Returns true if `handle` refers to an entry stored in this heap
    ///
    /// Follows the entry's node up to its tree root and confirms that root is
    /// on this heap's root list.
    ///
    /// **Time Complexity**: O(log n)
    pub fn contains(&self, handle: &BinomialHandle) -> bool {
        self.locate(handle).is_some()
    }

    /// Returns the priority and payload behind `handle`
    pub fn get(&self, handle: &BinomialHandle) -> Option<(&P, &T)> {
        self.locate(handle)?;
        let slot = &self.arena.entries[handle.entry];
        Some((&slot.priority, &slot.payload))
    }

    /// Mutable access to the payload behind `handle`
    ///
    /// Priorities can only be changed through [`Self::change_priority`].
    pub fn payload_mut(&mut self, handle: &BinomialHandle) -> Option<&mut T> {
        self.locate(handle)?;
        Some(&mut self.arena.entries[handle.entry].payload)
    }

    /// Changes the priority of the entry behind `handle`
    ///
    /// Returns false (and changes nothing) when the handle is not contained or
    /// the new priority ties the old one.
    pub fn change_priority(&mut self, handle: &BinomialHandle, new_priority: P) -> bool {
        self.try_change_priority(handle, new_priority).is_ok()
    }

    /// Changes the priority of the entry behind `handle`
    ///
    /// **Time Complexity**: O(log n) worst-case
    ///
    /// **Algorithm**:
    /// - Smaller priority: **bubble up**, swapping contents with the parent
    ///   while the entry is strictly less than it
    /// - Larger priority: **sink down**, swapping contents with the smallest
    ///   child while that child is strictly less than the entry
    ///
    /// # Errors
    /// - `HeapError::InvalidHandle` if the handle is stale or foreign
    /// - `HeapError::PriorityUnchanged` if neither `old < new` nor `new < old`
    pub fn try_change_priority(
        &mut self,
        handle: &BinomialHandle,
        new_priority: P,
    ) -> Result<(), HeapError> {
        let node = self.locate(handle).ok_or(HeapError::InvalidHandle)?;

        let slot = &mut self.arena.entries[handle.entry];
        let decreased = new_priority < slot.priority;
        if !decreased && !(slot.priority < new_priority) {
            return Err(HeapError::PriorityUnchanged);
        }
        slot.priority = new_priority;

        if decreased {
            self.bubble_up(node, false);
        } else {
            self.sink_down(node);
        }
        Ok(())
    }

    /// Removes the entry behind `handle` and returns it
    ///
    /// Returns None (and changes nothing) when the handle is not contained.
    ///
    /// **Time Complexity**: O(log n) worst-case
    ///
    /// **Algorithm**: swap the entry all the way up to its tree root regardless
    /// of ordering, then detach that root exactly as `extract_min` does.
    pub fn remove(&mut self, handle: &BinomialHandle) -> Option<Entry<T, P>> {
        let node = self.locate(handle)?;
        let root = self.bubble_up(node, true);

        let prev = self
            .arena
            .roots(self.head)
            .find(|&r| self.arena.node(r).sibling == Some(root));
        self.detach_root(root, prev);
        self.release(root)
    }

    /// Merges another heap into this one
    ///
    /// **Time Complexity**: O(m) to move the other heap's m entries into this
    /// heap's arena, plus O(log n + log m) for the root-list merge.
    ///
    /// Handles issued by `other` are not valid for this heap afterwards.
    pub fn merge(&mut self, other: Self) {
        let BinomialHeap {
            arena,
            head: other_head,
            len: other_len,
            ..
        } = other;

        let remap = self.arena.absorb(arena);
        let other_head = other_head.and_then(|h| remap.get(h).copied());

        self.head = self.merge_roots(self.head, other_head);
        self.len += other_len;
    }

    /// Degrees of the roots, in root-list order
    pub fn root_degrees(&self) -> Vec<usize> {
        self.arena
            .roots(self.head)
            .map(|r| self.arena.node(r).degree)
            .collect()
    }

    /// Verifies every structural invariant of the forest
    ///
    /// Intended for tests and debugging; walks every node, so O(n).
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        invariants::check(&self.arena, self.head, self.len)
    }

    /// Renders the forest for manual inspection
    ///
    /// One line per entry, `"{priority} {payload}"`, indented one space per
    /// tree level.
    pub fn dump(&self) -> Dump<'_, T, P> {
        Dump { heap: self }
    }
}

impl<T, P: PartialOrd> BinomialHeap<T, P> {
    fn handle(&self, entry: EntryKey) -> BinomialHandle {
        BinomialHandle {
            heap: self.id,
            entry,
        }
    }

    /// Node holding `handle`'s entry, if that node hangs under one of our roots
    fn locate(&self, handle: &BinomialHandle) -> Option<NodeKey> {
        if handle.heap != self.id {
            return None;
        }
        let node = self.arena.entries.get(handle.entry)?.node;
        if self.arena.nodes.get(node)?.entry != handle.entry {
            return None;
        }

        let mut top = node;
        while let Some(parent) = self.arena.node(top).parent {
            top = parent;
        }
        self.arena
            .roots(self.head)
            .any(|r| r == top)
            .then_some(node)
    }

    #[inline]
    fn less(&self, a: NodeKey, b: NodeKey) -> bool {
        self.arena.priority(a) < self.arena.priority(b)
    }

    /// Minimum root and its predecessor in the root list
    ///
    /// The first root is the initial candidate; a later root replaces it only
    /// when strictly less.
    fn find_min_root(&self) -> Option<(Option<NodeKey>, NodeKey)> {
        let head = self.head?;
        let mut best = (None, head);
        let mut prev = head;

        while let Some(next) = self.arena.node(prev).sibling {
            if self.less(next, best.1) {
                best = (Some(prev), next);
            }
            prev = next;
        }
        Some(best)
    }

    /// Pops the head of `list` if it has exactly `degree`
    fn take_if_degree(&mut self, list: &mut Option<NodeKey>, degree: usize) -> Option<NodeKey> {
        let head = (*list)?;
        if self.arena.node(head).degree != degree {
            return None;
        }
        let node = self.arena.node_mut(head);
        *list = node.sibling.take();
        Some(head)
    }

    fn append(&mut self, head: &mut Option<NodeKey>, tail: &mut Option<NodeKey>, tree: NodeKey) {
        self.arena.node_mut(tree).sibling = None;
        match *tail {
            Some(last) => self.arena.node_mut(last).sibling = Some(tree),
            None => *head = Some(tree),
        }
        *tail = Some(tree);
    }

    /// Links two trees of equal degree k into one tree of degree k+1
    ///
    /// The root of `right` wins only when strictly less than the root of
    /// `left`; ties keep `left` on top. The losing root becomes the new
    /// largest child of the winner's circular child ring.
    fn link(&mut self, left: NodeKey, right: NodeKey) -> NodeKey {
        let (root, sub) = if self.less(right, left) {
            (right, left)
        } else {
            (left, right)
        };

        let lowest = match self.arena.node(root).child {
            Some(largest) => {
                let lowest = self.arena.node(largest).sibling;
                self.arena.node_mut(largest).sibling = Some(sub);
                lowest
            }
            None => Some(sub),
        };

        let child = self.arena.node_mut(sub);
        child.parent = Some(root);
        child.sibling = lowest;

        let parent = self.arena.node_mut(root);
        parent.child = Some(sub);
        parent.degree += 1;
        parent.sibling = None;

        root
    }

    /// Merges two increasing-degree root lists into one
    ///
    /// **Time Complexity**: O(log n₁ + log n₂)
    ///
    /// **Algorithm**: binary addition. At each degree d there are up to three
    /// candidate trees: the head of `a`, the head of `b`, and the carry from
    /// degree d-1.
    /// - one candidate: it goes to the output unchanged
    /// - two candidates: they are linked into the carry for degree d+1
    /// - three candidates: the carry goes to the output and the other two
    ///   are linked into the new carry
    ///
    /// When linking, `a`'s tree is the left operand, so it keeps the root on
    /// ties.
    fn merge_roots(&mut self, mut a: Option<NodeKey>, mut b: Option<NodeKey>) -> Option<NodeKey> {
        let mut head = None;
        let mut tail = None;
        let mut carry: Option<NodeKey> = None;
        let mut degree = 0;

        while a.is_some() || b.is_some() || carry.is_some() {
            let from_a = self.take_if_degree(&mut a, degree);
            let from_b = self.take_if_degree(&mut b, degree);

            carry = match (from_a, from_b, carry.take()) {
                (None, None, None) => None,
                (Some(tree), None, None) | (None, Some(tree), None) | (None, None, Some(tree)) => {
                    self.append(&mut head, &mut tail, tree);
                    None
                }
                (Some(left), Some(right), None)
                | (Some(left), None, Some(right))
                | (None, Some(left), Some(right)) => Some(self.link(left, right)),
                (Some(left), Some(right), Some(carried)) => {
                    self.append(&mut head, &mut tail, carried);
                    Some(self.link(left, right))
                }
            };

            degree += 1;
        }

        head
    }

    /// Unlinks a root from the root list and merges its children back in
    ///
    /// The child ring is cut after the largest child. Since `child.sibling` is
    /// the degree-0 child, the cut ring is already an increasing-degree list.
    fn detach_root(&mut self, root: NodeKey, prev: Option<NodeKey>) {
        let next = self.arena.node_mut(root).sibling.take();
        match prev {
            Some(p) => self.arena.node_mut(p).sibling = next,
            None => self.head = next,
        }

        let children = match self.arena.node_mut(root).child.take() {
            Some(largest) => {
                let lowest = self.arena.node_mut(largest).sibling.take();
                let mut cursor = lowest;
                while let Some(child) = cursor {
                    let node = self.arena.node_mut(child);
                    node.parent = None;
                    cursor = node.sibling;
                }
                lowest
            }
            None => None,
        };
        self.arena.node_mut(root).degree = 0;

        self.head = self.merge_roots(self.head, children);
    }

    /// Frees a detached root and hands its entry to the caller
    fn release(&mut self, root: NodeKey) -> Option<Entry<T, P>> {
        let (priority, payload) = self.arena.free(root)?;
        self.len -= 1;
        Some(Entry { priority, payload })
    }

    /// Moves the entry at `node` toward the root
    ///
    /// Stops once the entry is not strictly less than its parent, unless
    /// `to_root` forces the swap chain all the way up. Returns the node the
    /// entry ends up in.
    fn bubble_up(&mut self, mut node: NodeKey, to_root: bool) -> NodeKey {
        while let Some(parent) = self.arena.node(node).parent {
            if !to_root && !self.less(node, parent) {
                break;
            }
            self.arena.swap_entries(node, parent);
            node = parent;
        }
        node
    }

    /// Moves the entry at `node` toward the leaves
    ///
    /// Always swaps with the minimum child so that heap order holds for the
    /// sibling subtrees too.
    fn sink_down(&mut self, mut node: NodeKey) -> NodeKey {
        while let Some(smallest) = self.min_child(node) {
            if !self.less(smallest, node) {
                break;
            }
            self.arena.swap_entries(node, smallest);
            node = smallest;
        }
        node
    }

    fn min_child(&self, node: NodeKey) -> Option<NodeKey> {
        let mut children = self.arena.children(node);
        let first = children.next()?;
        Some(children.fold(first, |best, c| if self.less(c, best) { c } else { best }))
    }
}

impl<T, P: PartialOrd> Default for BinomialHeap<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P> fmt::Debug for BinomialHeap<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let degrees: SmallVec<[usize; 16]> = self
            .arena
            .roots(self.head)
            .map(|r| self.arena.node(r).degree)
            .collect();
        f.debug_struct("BinomialHeap")
            .field("len", &self.len)
            .field("root_degrees", &degrees.as_slice())
            .finish()
    }
}

/// Display adapter returned by [`BinomialHeap::dump`]
pub struct Dump<'a, T, P> {
    heap: &'a BinomialHeap<T, P>,
}

impl<T: fmt::Display, P: fmt::Display> fmt::Display for Dump<'_, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arena = &self.heap.arena;
        let mut stack: SmallVec<[(NodeKey, usize); 32]> = SmallVec::new();

        for root in arena.roots(self.heap.head) {
            stack.push((root, 0));
            while let Some((node, depth)) = stack.pop() {
                let slot = arena.slot(node);
                writeln!(f, "{:depth$}{} {}", "", slot.priority, slot.payload, depth = depth)?;

                // pushed largest-first so the lowest-degree child prints first
                let children: SmallVec<[NodeKey; 16]> = arena.children(node).collect();
                stack.extend(children.into_iter().rev().map(|c| (c, depth + 1)));
            }
        }
        Ok(())
    }
}

impl<T, P: PartialOrd> Heap<T, P> for BinomialHeap<T, P> {
    fn new() -> Self {
        BinomialHeap::new()
    }

    fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn len(&self) -> usize {
        self.len
    }

    fn push(&mut self, priority: P, item: T) {
        self.insert(priority, item);
    }

    fn peek(&self) -> Option<(&P, &T)> {
        self.minimum()
    }

    fn pop(&mut self) -> Option<(P, T)> {
        self.extract_min().map(Entry::into_parts)
    }

    fn merge(&mut self, other: Self) {
        BinomialHeap::merge(self, other)
    }
}

impl<T, P: PartialOrd> AddressableHeap<T, P> for BinomialHeap<T, P> {
    type Handle = BinomialHandle;

    fn push_with_handle(&mut self, priority: P, item: T) -> Self::Handle {
        self.insert(priority, item)
    }

    fn contains(&self, handle: &Self::Handle) -> bool {
        BinomialHeap::contains(self, handle)
    }

    fn get(&self, handle: &Self::Handle) -> Option<(&P, &T)> {
        BinomialHeap::get(self, handle)
    }

    fn change_priority(&mut self, handle: &Self::Handle, new_priority: P) -> Result<(), HeapError> {
        self.try_change_priority(handle, new_priority)
    }

    fn remove(&mut self, handle: &Self::Handle) -> Option<(P, T)> {
        BinomialHeap::remove(self, handle).map(Entry::into_parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering as CmpOrdering;

    /// Priority whose `<` only looks at the tens digit, so 90 and 95 tie
    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Coarse(i32);

    impl PartialOrd for Coarse {
        fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
            (self.0 / 10).partial_cmp(&(other.0 / 10))
        }
    }

    fn drain<T, P: PartialOrd + Clone>(heap: &mut BinomialHeap<T, P>) -> Vec<P> {
        let mut out = Vec::new();
        while let Some(entry) = heap.extract_min() {
            heap.check_invariants().unwrap();
            out.push(entry.priority().clone());
        }
        out
    }

    fn assert_sorted(values: &[i32]) {
        assert!(values.windows(2).all(|w| w[0] <= w[1]), "not sorted: {values:?}");
    }

    #[test]
    fn test_empty_heap() {
        let mut heap: BinomialHeap<i32, i32> = BinomialHeap::new();
        assert_eq!(heap.size(), 0);
        assert!(heap.is_empty());
        assert_eq!(heap.minimum(), None);
        assert_eq!(heap.minimum_handle(), None);
        assert_eq!(heap.extract_min(), None);
        assert_eq!(heap.size(), 0);
        assert!(heap.root_degrees().is_empty());
        heap.check_invariants().unwrap();
    }

    #[test]
    fn test_scenario_minimum_of_three() {
        let mut heap = BinomialHeap::new();
        heap.insert("b", 0);
        heap.insert("a", 1);
        heap.insert("c", 2);

        assert_eq!(heap.size(), 3);
        assert_eq!(heap.minimum(), Some((&"a", &1)));
        heap.check_invariants().unwrap();
    }

    #[test]
    fn test_scenario_extract_then_minimum() {
        let mut heap = BinomialHeap::new();
        heap.insert("b", 0);
        heap.insert("a", 1);
        heap.insert("c", 2);

        let entry = heap.extract_min().unwrap();
        assert_eq!(entry.priority(), &"a");
        assert_eq!(entry.payload(), &1);
        assert_eq!(heap.minimum(), Some((&"b", &0)));
        assert_eq!(heap.size(), 2);
        heap.check_invariants().unwrap();
    }

    #[test]
    fn test_scenario_power_of_two_shape() {
        let mut heap = BinomialHeap::new();
        for i in 0..8 {
            heap.insert(i, i);
        }
        assert_eq!(heap.root_degrees(), vec![3]);

        assert_eq!(heap.extract_min().map(Entry::into_parts), Some((0, 0)));
        assert_eq!(heap.size(), 7);
        assert_eq!(heap.root_degrees(), vec![0, 1, 2]);
        heap.check_invariants().unwrap();
    }

    #[test]
    fn test_scenario_equal_priorities_coexist() {
        let mut heap = BinomialHeap::new();
        let m = heap.insert(Coarse(90), "m");
        let z = heap.insert(Coarse(95), "z");
        heap.check_invariants().unwrap();

        let (_, payload) = heap.minimum().unwrap();
        assert!(*payload == "m" || *payload == "z");

        // 97 ties 95 under the coarse ordering
        assert_eq!(
            heap.try_change_priority(&z, Coarse(97)),
            Err(HeapError::PriorityUnchanged)
        );
        assert_eq!(heap.get(&z), Some((&Coarse(95), &"z")));
        assert!(heap.contains(&m));
        assert!(heap.contains(&z));
    }

    #[test]
    fn test_scenario_remove_inner_entry() {
        let mut heap = BinomialHeap::new();
        let handles: Vec<_> = [5, 3, 9, 1, 7, 2, 8, 6, 4, 0]
            .iter()
            .map(|&p| heap.insert(p, p))
            .collect();

        // 10 = 0b1010, so priority 7 ends up inside the B₃ rooted at 1
        let target = handles[4];
        assert_eq!(heap.remove(&target).map(Entry::into_parts), Some((7, 7)));
        assert_eq!(heap.size(), 9);
        assert!(!heap.contains(&target));
        heap.check_invariants().unwrap();

        let drained = drain(&mut heap);
        assert_eq!(drained, vec![0, 1, 2, 3, 4, 5, 6, 8, 9]);
    }

    #[test]
    fn test_degrees_follow_binary_representation() {
        let mut heap = BinomialHeap::new();
        for i in 0..37 {
            heap.insert(i, ());
            let expected: Vec<usize> = (0..usize::BITS as usize)
                .filter(|bit| heap.size() & (1 << bit) != 0)
                .collect();
            assert_eq!(heap.root_degrees(), expected);
        }
    }

    #[test]
    fn test_extract_order_with_duplicates() {
        let mut heap = BinomialHeap::new();
        for p in [4, 1, 4, 2, 2, 9, 0, 1, 4, 3] {
            heap.insert(p, ());
        }
        let drained = drain(&mut heap);
        assert_eq!(drained, vec![0, 1, 1, 2, 2, 3, 4, 4, 4, 9]);
    }

    #[test]
    fn test_decrease_priority_bubbles_up() {
        let mut heap = BinomialHeap::new();
        let handles: Vec<_> = (0..16).map(|i| heap.insert(10 + i, i)).collect();

        assert!(heap.change_priority(&handles[15], 1));
        assert_eq!(heap.minimum(), Some((&1, &15)));
        assert_eq!(heap.minimum_handle(), Some(handles[15]));
        heap.check_invariants().unwrap();

        // every handle still resolves to its own payload
        for (i, h) in handles.iter().enumerate() {
            assert_eq!(heap.get(h).map(|(_, t)| *t), Some(i as i32));
        }
    }

    #[test]
    fn test_increase_priority_sinks_to_smallest_child() {
        let mut heap = BinomialHeap::new();
        // ascending inserts build a single B₃ whose first structural child is
        // not its smallest
        let handles: Vec<_> = (0..8).map(|i| heap.insert(i, i)).collect();
        assert_eq!(heap.root_degrees(), vec![3]);

        assert!(heap.change_priority(&handles[0], 100));
        heap.check_invariants().unwrap();
        assert_eq!(heap.minimum(), Some((&1, &1)));
        assert_eq!(heap.get(&handles[0]), Some((&100, &0)));

        let drained = drain(&mut heap);
        assert_eq!(drained, vec![1, 2, 3, 4, 5, 6, 7, 100]);
    }

    #[test]
    fn test_back_references_survive_many_changes() {
        let mut heap = BinomialHeap::new();
        let handles: Vec<_> = (0..32).map(|i| heap.insert(i * 3, i)).collect();

        for (step, h) in handles.iter().enumerate() {
            let new = if step % 2 == 0 { -1 - step as i32 } else { 500 + step as i32 };
            assert!(heap.change_priority(h, new));
            heap.check_invariants().unwrap();
            assert!(heap.contains(h));
        }

        let drained = drain(&mut heap);
        assert_eq!(drained.len(), 32);
        assert_sorted(&drained);
    }

    #[test]
    fn test_unchanged_priority_is_noop() {
        let mut heap = BinomialHeap::new();
        let h = heap.insert(5, "five");
        assert!(!heap.change_priority(&h, 5));
        assert_eq!(heap.get(&h), Some((&5, &"five")));
    }

    #[test]
    fn test_stale_handle_is_rejected() {
        let mut heap = BinomialHeap::new();
        let h = heap.insert(1, "one");
        heap.insert(2, "two");

        assert_eq!(heap.extract_min().map(Entry::into_parts), Some((1, "one")));
        assert!(!heap.contains(&h));
        assert_eq!(heap.try_change_priority(&h, 0), Err(HeapError::InvalidHandle));
        assert_eq!(heap.remove(&h), None);
        assert_eq!(heap.get(&h), None);
        assert_eq!(heap.size(), 1);

        // a new insert reusing the freed slot does not revive the old handle
        let fresh = heap.insert(3, "three");
        assert!(heap.contains(&fresh));
        assert!(!heap.contains(&h));
    }

    #[test]
    fn test_foreign_handle_is_noop() {
        let mut first = BinomialHeap::new();
        let mut second = BinomialHeap::new();
        let foreign = first.insert(1, "first");
        second.insert(2, "second");

        assert!(!second.contains(&foreign));
        assert!(!second.change_priority(&foreign, 0));
        assert_eq!(second.remove(&foreign), None);
        assert_eq!(second.size(), 1);
        assert_eq!(second.minimum(), Some((&2, &"second")));
    }

    #[test]
    fn test_remove_root_and_only_entry() {
        let mut heap = BinomialHeap::new();
        let h = heap.insert(42, "only");
        assert_eq!(heap.remove(&h).map(Entry::into_parts), Some((42, "only")));
        assert!(heap.is_empty());
        assert_eq!(heap.minimum(), None);
        heap.check_invariants().unwrap();
    }

    #[test]
    fn test_remove_every_entry_in_insertion_order() {
        let mut heap = BinomialHeap::new();
        let handles: Vec<_> = [13, 2, 8, 21, 5, 1, 34, 3, 0, 1, 55]
            .iter()
            .map(|&p| heap.insert(p, p))
            .collect();

        for (removed, h) in handles.iter().enumerate() {
            assert!(heap.remove(h).is_some());
            assert_eq!(heap.size(), handles.len() - removed - 1);
            heap.check_invariants().unwrap();
        }
        assert!(heap.is_empty());
    }

    #[test]
    fn test_payload_mut() {
        let mut heap = BinomialHeap::new();
        let h = heap.insert(1, String::from("a"));
        heap.payload_mut(&h).unwrap().push('b');
        assert_eq!(heap.get(&h), Some((&1, &String::from("ab"))));
    }

    #[test]
    fn test_merge_heaps() {
        let mut left = BinomialHeap::new();
        let mut right = BinomialHeap::new();
        let kept = left.insert(5, "five");
        left.insert(1, "one");
        left.insert(9, "nine");
        let moved = right.insert(3, "three");
        right.insert(0, "zero");

        left.merge(right);
        assert_eq!(left.size(), 5);
        assert_eq!(left.root_degrees(), vec![0, 2]);
        left.check_invariants().unwrap();

        assert!(left.contains(&kept));
        assert!(!left.contains(&moved));

        let drained: Vec<_> = std::iter::from_fn(|| left.extract_min())
            .map(Entry::into_parts)
            .collect();
        assert_eq!(
            drained,
            vec![(0, "zero"), (1, "one"), (3, "three"), (5, "five"), (9, "nine")]
        );
    }

    #[test]
    fn test_merge_with_empty() {
        let mut heap = BinomialHeap::new();
        heap.insert(1, ());
        heap.merge(BinomialHeap::new());
        assert_eq!(heap.size(), 1);

        let mut empty = BinomialHeap::new();
        empty.merge(heap);
        assert_eq!(empty.size(), 1);
        assert_eq!(empty.minimum(), Some((&1, &())));
        empty.check_invariants().unwrap();
    }

    #[test]
    fn test_dump_indents_by_depth() {
        let mut heap = BinomialHeap::new();
        heap.insert(3, "c");
        heap.insert(1, "a");
        heap.insert(2, "b");

        // roots: B₀ holding 2, B₁ rooted at 1 with child 3
        assert_eq!(heap.dump().to_string(), "2 b\n1 a\n 3 c\n");
    }

    #[test]
    fn test_dump_orders_children_by_degree() {
        let mut heap = BinomialHeap::new();
        for i in 0..4 {
            heap.insert(i, i);
        }
        // single B₂ rooted at 0: children 1 (B₀) then 2 (B₁ over 3)
        let rendered = heap.dump().to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines, vec!["0 0", " 1 1", " 2 2", "  3 3"]);
    }

    #[test]
    fn test_debug_output() {
        let mut heap = BinomialHeap::new();
        for i in 0..5 {
            heap.insert(i, ());
        }
        assert_eq!(
            format!("{heap:?}"),
            "BinomialHeap { len: 5, root_degrees: [0, 2] }"
        );
    }
}
