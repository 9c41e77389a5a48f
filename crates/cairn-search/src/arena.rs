//! Fixed-capacity node storage for searches.
//!
//! Nodes live in one slab allocated up front, so a search performs no
//! per-node heap allocation and its memory use is bounded by the configured
//! ceiling. Released slots are recycled through a free list.

use std::error::Error;
use std::fmt;
use std::ops::{Index, IndexMut};

/// Stable handle to a live node in a [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NodeId(u32);

/// One search node: a caller state plus the engine's bookkeeping.
#[derive(Debug)]
pub(crate) struct Node<S> {
    pub(crate) state: S,
    /// Cost of the cheapest known route from the start.
    pub(crate) g: f32,
    /// Estimated remaining cost to the goal.
    pub(crate) h: f32,
    /// Priority: `g + h`.
    pub(crate) f: f32,
    pub(crate) parent: Option<NodeId>,
    /// Successor on the solution chain, threaded in after success.
    pub(crate) child: Option<NodeId>,
    /// Whether the node is on the open list. Refs in the open heap that
    /// point at a node with this flag cleared are stale and get skipped.
    pub(crate) in_open: bool,
}

impl<S> Node<S> {
    pub(crate) fn new(state: S) -> Self {
        Self {
            state,
            g: 0.0,
            h: 0.0,
            f: 0.0,
            parent: None,
            child: None,
            in_open: false,
        }
    }
}

/// Returned by [`NodeArena::allocate`] when the live-node ceiling is hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ArenaFull;

impl fmt::Display for ArenaFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("node arena capacity exhausted")
    }
}

impl Error for ArenaFull {}

/// Slab of search nodes with a fixed ceiling on how many may be live at
/// once.
pub(crate) struct NodeArena<S> {
    slots: Vec<Option<Node<S>>>,
    free: Vec<u32>,
    max_nodes: usize,
    live: usize,
}

impl<S> NodeArena<S> {
    pub(crate) fn new(max_nodes: usize) -> Self {
        Self {
            slots: Vec::with_capacity(max_nodes),
            free: Vec::new(),
            max_nodes,
            live: 0,
        }
    }

    /// Number of live nodes.
    #[inline]
    pub(crate) fn live(&self) -> usize {
        self.live
    }

    /// Places `node` in a free slot and hands back its id.
    pub(crate) fn allocate(&mut self, node: Node<S>) -> Result<NodeId, ArenaFull> {
        if self.live == self.max_nodes {
            return Err(ArenaFull);
        }
        self.live += 1;
        match self.free.pop() {
            Some(i) => {
                self.slots[i as usize] = Some(node);
                Ok(NodeId(i))
            }
            None => {
                self.slots.push(Some(node));
                Ok(NodeId(self.slots.len() as u32 - 1))
            }
        }
    }

    /// Returns a node's slot to the free list, dropping its state.
    pub(crate) fn release(&mut self, id: NodeId) {
        let slot = &mut self.slots[id.0 as usize];
        debug_assert!(slot.is_some(), "released a vacant arena slot");
        *slot = None;
        self.free.push(id.0);
        self.live -= 1;
    }

    /// Releases every live node at once, keeping the slab's capacity.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.live = 0;
    }

    /// Borrow of the node behind `id`, or `None` if the slot was released.
    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> Option<&Node<S>> {
        self.slots.get(id.0 as usize)?.as_ref()
    }
}

impl<S> Index<NodeId> for NodeArena<S> {
    type Output = Node<S>;

    #[inline]
    fn index(&self, id: NodeId) -> &Node<S> {
        match self.slots[id.0 as usize].as_ref() {
            Some(node) => node,
            None => panic!("indexed a vacant arena slot"),
        }
    }
}

impl<S> IndexMut<NodeId> for NodeArena<S> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node<S> {
        match self.slots[id.0 as usize].as_mut() {
            Some(node) => node,
            None => panic!("indexed a vacant arena slot"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_until_full() {
        let mut arena: NodeArena<u32> = NodeArena::new(3);
        for v in 0..3 {
            assert!(arena.allocate(Node::new(v)).is_ok());
        }
        assert_eq!(arena.live(), 3);
        assert_eq!(arena.allocate(Node::new(9)), Err(ArenaFull));
        assert_eq!(arena.live(), 3);
    }

    #[test]
    fn release_makes_room() {
        let mut arena: NodeArena<u32> = NodeArena::new(2);
        let a = arena.allocate(Node::new(1)).unwrap();
        let _b = arena.allocate(Node::new(2)).unwrap();
        assert!(arena.allocate(Node::new(3)).is_err());
        arena.release(a);
        assert_eq!(arena.live(), 1);
        assert!(arena.allocate(Node::new(3)).is_ok());
        assert_eq!(arena.live(), 2);
    }

    #[test]
    fn released_slots_are_recycled() {
        let mut arena: NodeArena<u32> = NodeArena::new(4);
        let a = arena.allocate(Node::new(1)).unwrap();
        arena.release(a);
        let b = arena.allocate(Node::new(2)).unwrap();
        assert_eq!(a, b);
        assert_eq!(arena[b].state, 2);
    }

    #[test]
    fn get_distinguishes_vacant_slots() {
        let mut arena: NodeArena<u32> = NodeArena::new(4);
        let a = arena.allocate(Node::new(7)).unwrap();
        assert_eq!(arena.get(a).map(|n| n.state), Some(7));
        arena.release(a);
        assert!(arena.get(a).is_none());
    }

    #[test]
    fn clear_releases_everything() {
        let mut arena: NodeArena<u32> = NodeArena::new(8);
        for v in 0..5 {
            arena.allocate(Node::new(v)).unwrap();
        }
        arena.clear();
        assert_eq!(arena.live(), 0);
        assert!(arena.allocate(Node::new(0)).is_ok());
    }

    #[test]
    fn zero_capacity_rejects_all() {
        let mut arena: NodeArena<u32> = NodeArena::new(0);
        assert_eq!(arena.allocate(Node::new(0)), Err(ArenaFull));
    }
}
