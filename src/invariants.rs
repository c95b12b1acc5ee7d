//! Structural invariant checks for the binomial forest
//!
//! These walk every node, so they cost O(n). They back
//! [`BinomialHeap::check_invariants`](crate::binomial::BinomialHeap::check_invariants)
//! and are meant for tests and debugging.

use crate::storage::{Arena, NodeKey};
use smallvec::SmallVec;
use std::fmt;

/// A violated forest invariant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Root degrees are not strictly increasing along the root list
    RootOrder { previous: usize, found: usize },
    /// A root has a parent link
    RootHasParent { degree: usize },
    /// A node's degree disagrees with its number of children
    DegreeMismatch { degree: usize, children: usize },
    /// The i-th child (from the lowest) of a node does not have degree i
    ChildDegree { position: usize, found: usize },
    /// A child's parent link does not point at the node owning its ring
    ParentLink { depth: usize },
    /// A child is strictly less than its parent
    HeapOrder { depth: usize },
    /// An entry's back-reference does not name the node holding it
    BackReference,
    /// `len`, reachable nodes, and stored entries disagree
    SizeMismatch {
        len: usize,
        reachable: usize,
        stored: usize,
    },
    /// The set of root degrees differs from the set bits of `len`
    ShapeMismatch { len: usize, degree_bits: usize },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantViolation::RootOrder { previous, found } => {
                write!(f, "root of degree {found} follows root of degree {previous}")
            }
            InvariantViolation::RootHasParent { degree } => {
                write!(f, "root of degree {degree} has a parent")
            }
            InvariantViolation::DegreeMismatch { degree, children } => {
                write!(f, "node of degree {degree} has {children} children")
            }
            InvariantViolation::ChildDegree { position, found } => {
                write!(f, "child at position {position} has degree {found}")
            }
            InvariantViolation::ParentLink { depth } => {
                write!(f, "broken parent link at depth {depth}")
            }
            InvariantViolation::HeapOrder { depth } => {
                write!(f, "child at depth {depth} is less than its parent")
            }
            InvariantViolation::BackReference => {
                write!(f, "entry back-reference does not match its node")
            }
            InvariantViolation::SizeMismatch {
                len,
                reachable,
                stored,
            } => write!(
                f,
                "len is {len} but {reachable} nodes are reachable and {stored} entries stored"
            ),
            InvariantViolation::ShapeMismatch { len, degree_bits } => write!(
                f,
                "root degrees {degree_bits:#b} do not match len {len:#b}"
            ),
        }
    }
}

impl std::error::Error for InvariantViolation {}

pub(crate) fn check<T, P: PartialOrd>(
    arena: &Arena<T, P>,
    head: Option<NodeKey>,
    len: usize,
) -> Result<(), InvariantViolation> {
    let mut reachable = 0;
    let mut degree_bits = 0usize;
    let mut previous: Option<usize> = None;

    for root in arena.roots(head) {
        let node = arena.node(root);
        if let Some(previous) = previous {
            if node.degree <= previous {
                return Err(InvariantViolation::RootOrder {
                    previous,
                    found: node.degree,
                });
            }
        }
        if node.parent.is_some() {
            return Err(InvariantViolation::RootHasParent {
                degree: node.degree,
            });
        }
        previous = Some(node.degree);
        degree_bits |= 1 << node.degree;
        reachable += check_tree(arena, root)?;
    }

    let stored = arena.entries.len();
    if reachable != len || stored != len || arena.nodes.len() != len {
        return Err(InvariantViolation::SizeMismatch {
            len,
            reachable,
            stored,
        });
    }
    if degree_bits != len {
        return Err(InvariantViolation::ShapeMismatch { len, degree_bits });
    }
    Ok(())
}

/// Checks one binomial tree and returns its node count
fn check_tree<T, P: PartialOrd>(
    arena: &Arena<T, P>,
    root: NodeKey,
) -> Result<usize, InvariantViolation> {
    let mut count = 0;
    let mut stack: SmallVec<[(NodeKey, usize); 32]> = SmallVec::new();
    stack.push((root, 0));

    while let Some((key, depth)) = stack.pop() {
        count += 1;
        let node = arena.node(key);
        if arena.entries.get(node.entry).map(|slot| slot.node) != Some(key) {
            return Err(InvariantViolation::BackReference);
        }

        let mut children = 0;
        for (position, child) in arena.children(key).enumerate() {
            let child_node = arena.node(child);
            if child_node.degree != position {
                return Err(InvariantViolation::ChildDegree {
                    position,
                    found: child_node.degree,
                });
            }
            if child_node.parent != Some(key) {
                return Err(InvariantViolation::ParentLink { depth: depth + 1 });
            }
            if arena.priority(child) < arena.priority(key) {
                return Err(InvariantViolation::HeapOrder { depth: depth + 1 });
            }
            children += 1;
            stack.push((child, depth + 1));
        }

        if children != node.degree {
            return Err(InvariantViolation::DegreeMismatch {
                degree: node.degree,
                children,
            });
        }
    }

    Ok(count)
}
