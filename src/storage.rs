//! Arena storage for binomial heap nodes and entries
//!
//! The heap never hands out references into its trees. Instead, two
//! [`SlotMap`] arenas hold everything:
//!
//! - `nodes`: structural [`TreeNode`]s addressed by [`NodeKey`]
//! - `entries`: the `(priority, payload)` pairs addressed by [`EntryKey`],
//!   each with a back-reference to the node currently holding it
//!
//! Every structural edit (relinking siblings, cutting a child ring, swapping
//! contents) is a key rewrite. Keys are generational, so a key whose slot was
//! freed is never confused with a later allocation in the same slot.
//!
//! # List shapes
//!
//! - A node's child list is a **circular** ring through `sibling`. `child`
//!   points at the largest-degree child and `child.sibling` is the degree-0
//!   child, so the ring reads in increasing degree starting there.
//! - The heap's root list is a **linear** chain through `sibling`, also in
//!   increasing degree, terminated by `None`.

use slotmap::{new_key_type, SecondaryMap, SlotMap};

new_key_type! {
    /// Key of a structural node in the arena
    pub struct NodeKey;

    /// Key of a stored entry in the arena
    pub struct EntryKey;
}

/// Structural unit of a binomial tree
#[derive(Debug, Clone)]
pub(crate) struct TreeNode {
    /// Entry currently stored at this position
    pub(crate) entry: EntryKey,
    /// Number of children; a node of degree k roots a subtree of 2^k nodes
    pub(crate) degree: usize,
    /// None for roots
    pub(crate) parent: Option<NodeKey>,
    /// Largest-degree child (None for leaves)
    pub(crate) child: Option<NodeKey>,
    /// Next node in the parent's child ring, or next root in the root list
    pub(crate) sibling: Option<NodeKey>,
}

/// A stored `(priority, payload)` pair plus the node holding it
#[derive(Debug, Clone)]
pub(crate) struct EntrySlot<T, P> {
    pub(crate) priority: P,
    pub(crate) payload: T,
    pub(crate) node: NodeKey,
}

/// Owner of every node and entry of one heap
#[derive(Debug, Clone)]
pub(crate) struct Arena<T, P> {
    pub(crate) nodes: SlotMap<NodeKey, TreeNode>,
    pub(crate) entries: SlotMap<EntryKey, EntrySlot<T, P>>,
}

impl<T, P> Default for Arena<T, P> {
    fn default() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            entries: SlotMap::with_key(),
        }
    }
}

impl<T, P> Arena<T, P> {
    /// Allocates a detached degree-0 node holding a fresh entry
    pub(crate) fn alloc(&mut self, priority: P, payload: T) -> (NodeKey, EntryKey) {
        let entry = self.entries.insert(EntrySlot {
            priority,
            payload,
            node: NodeKey::default(),
        });
        let node = self.nodes.insert(TreeNode {
            entry,
            degree: 0,
            parent: None,
            child: None,
            sibling: None,
        });
        self.entries[entry].node = node;
        (node, entry)
    }

    /// Frees a node and the entry it currently holds, returning the entry's contents
    pub(crate) fn free(&mut self, node: NodeKey) -> Option<(P, T)> {
        let node = self.nodes.remove(node)?;
        let slot = self.entries.remove(node.entry)?;
        Some((slot.priority, slot.payload))
    }

    #[inline]
    pub(crate) fn node(&self, key: NodeKey) -> &TreeNode {
        &self.nodes[key]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, key: NodeKey) -> &mut TreeNode {
        &mut self.nodes[key]
    }

    /// Entry stored at `node`
    #[inline]
    pub(crate) fn slot(&self, node: NodeKey) -> &EntrySlot<T, P> {
        &self.entries[self.nodes[node].entry]
    }

    #[inline]
    pub(crate) fn priority(&self, node: NodeKey) -> &P {
        &self.slot(node).priority
    }

    /// Exchanges the entries held by two nodes, keeping both back-references exact
    pub(crate) fn swap_entries(&mut self, a: NodeKey, b: NodeKey) {
        let ea = self.nodes[a].entry;
        let eb = self.nodes[b].entry;
        self.nodes[a].entry = eb;
        self.nodes[b].entry = ea;
        self.entries[ea].node = b;
        self.entries[eb].node = a;
    }

    /// Iterates a circular child ring starting from the lowest-degree child
    pub(crate) fn children(&self, parent: NodeKey) -> Children<'_, T, P> {
        let first = self.nodes[parent]
            .child
            .and_then(|largest| self.nodes[largest].sibling);
        Children {
            arena: self,
            first,
            next: first,
        }
    }

    /// Iterates a linear root list starting at `head`
    pub(crate) fn roots(&self, head: Option<NodeKey>) -> Roots<'_, T, P> {
        Roots {
            arena: self,
            next: head,
        }
    }

    /// Moves every node and entry of `other` into this arena
    ///
    /// Structural links are rewritten to the new keys. Returns the mapping
    /// from `other`'s node keys to the keys they now have here.
    pub(crate) fn absorb(&mut self, other: Arena<T, P>) -> SecondaryMap<NodeKey, NodeKey> {
        let Arena {
            nodes: mut other_nodes,
            entries: mut other_entries,
        } = other;

        let mut remap = SecondaryMap::with_capacity(other_nodes.len());
        let mut moved = Vec::with_capacity(other_nodes.len());

        for (old, node) in other_nodes.drain() {
            if let Some(slot) = other_entries.remove(node.entry) {
                let (new, _) = self.alloc(slot.priority, slot.payload);
                remap.insert(old, new);
                moved.push((new, node));
            }
        }

        for (new, old_node) in moved {
            let relink = |key: Option<NodeKey>| key.and_then(|k| remap.get(k).copied());
            let parent = relink(old_node.parent);
            let child = relink(old_node.child);
            let sibling = relink(old_node.sibling);

            let node = &mut self.nodes[new];
            node.degree = old_node.degree;
            node.parent = parent;
            node.child = child;
            node.sibling = sibling;
        }

        remap
    }
}

/// Iterator over a node's child ring, lowest degree first
pub(crate) struct Children<'a, T, P> {
    arena: &'a Arena<T, P>,
    first: Option<NodeKey>,
    next: Option<NodeKey>,
}

impl<T, P> Iterator for Children<'_, T, P> {
    type Item = NodeKey;

    fn next(&mut self) -> Option<NodeKey> {
        let current = self.next?;
        let following = self.arena.nodes[current].sibling;
        self.next = if following == self.first {
            None
        } else {
            following
        };
        Some(current)
    }
}

/// Iterator over a linear root list
pub(crate) struct Roots<'a, T, P> {
    arena: &'a Arena<T, P>,
    next: Option<NodeKey>,
}

impl<T, P> Iterator for Roots<'_, T, P> {
    type Item = NodeKey;

    fn next(&mut self) -> Option<NodeKey> {
        let current = self.next?;
        self.next = self.arena.nodes[current].sibling;
        Some(current)
    }
}
