//! The A* search engine.
//!
//! The engine runs one expansion at a time: callers own the loop and decide
//! after every [`AstarSearch::step`] whether to keep going, so a search can
//! be spread across frames, capped by a step budget, or abandoned through
//! [`AstarSearch::cancel`]. Node storage comes from a fixed-capacity arena,
//! which bounds memory up front and turns exhaustion into a reported search
//! outcome instead of unbounded growth.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::arena::{ArenaFull, Node, NodeArena, NodeId};
use crate::navigator::Navigator;

/// Default ceiling on live nodes for a search.
pub const DEFAULT_MAX_NODES: usize = 1000;

/// Lifecycle of a search.
///
/// The three outcome states are sticky: once reached, further stepping
/// returns the same value until a new start/goal pair is supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchState {
    /// No start/goal pair has been supplied yet.
    NotInitialized,
    /// The search is underway; keep stepping.
    Searching,
    /// A path was found and the solution chain can be read.
    Succeeded,
    /// The frontier emptied without reaching the goal, or the search was
    /// cancelled.
    Failed,
    /// The node arena could not supply another node.
    OutOfMemory,
}

impl SearchState {
    /// Whether the search has ended, successfully or not.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::OutOfMemory)
    }
}

/// Entry in the open heap. Ordering is reversed so the std max-heap pops the
/// lowest `f` first; `total_cmp` keeps the order total even for NaN costs.
struct OpenRef {
    id: NodeId,
    f: f32,
}

impl PartialEq for OpenRef {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenRef {}

impl PartialOrd for OpenRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenRef {
    fn cmp(&self, other: &Self) -> Ordering {
        other.f.total_cmp(&self.f)
    }
}

/// Resumable, memory-bounded A* search.
///
/// A search is configured with [`set_start_and_goal`] and advanced by
/// calling [`step`] until it returns a terminal [`SearchState`]. On success
/// the solution is read through [`solution_steps`] and [`solution_cost`],
/// then handed back with [`free_solution_nodes`]. The same engine can be
/// reused for any number of searches; supplying a new start/goal pair
/// discards whatever the previous search left behind.
///
/// All map knowledge comes from the [`Navigator`] passed to each call, so
/// one engine type serves every state space.
///
/// When a cheaper route to an already-expanded node is discovered, which
/// happens when the navigator's distance estimate overestimates, the node is
/// pulled back onto the frontier and its downstream costs are recomputed
/// through re-expansion. Estimates that never overestimate therefore yield
/// cost-optimal paths, and sloppier estimates still yield correct, connected
/// ones.
///
/// [`set_start_and_goal`]: AstarSearch::set_start_and_goal
/// [`step`]: AstarSearch::step
/// [`solution_steps`]: AstarSearch::solution_steps
/// [`solution_cost`]: AstarSearch::solution_cost
/// [`free_solution_nodes`]: AstarSearch::free_solution_nodes
pub struct AstarSearch<S> {
    arena: NodeArena<S>,
    open: BinaryHeap<OpenRef>,
    /// Nodes currently flagged open. The heap itself may be longer, since
    /// improving an open node queues a fresh ref instead of rebuilding.
    open_len: usize,
    closed: Vec<NodeId>,
    endpoints: Option<(NodeId, NodeId)>,
    state: SearchState,
    cancel_requested: bool,
    steps: usize,
    succ_buf: Vec<S>,
}

impl<S: Clone> AstarSearch<S> {
    /// Engine with the default node ceiling of [`DEFAULT_MAX_NODES`].
    pub fn new() -> Self {
        Self::with_max_nodes(DEFAULT_MAX_NODES)
    }

    /// Engine with an explicit ceiling on live nodes. A search that needs
    /// more than `max_nodes` nodes at once ends in
    /// [`SearchState::OutOfMemory`].
    pub fn with_max_nodes(max_nodes: usize) -> Self {
        Self {
            arena: NodeArena::new(max_nodes),
            open: BinaryHeap::new(),
            open_len: 0,
            closed: Vec::new(),
            endpoints: None,
            state: SearchState::NotInitialized,
            cancel_requested: false,
            steps: 0,
            succ_buf: Vec::new(),
        }
    }

    /// Begins a new search from `start` to `goal`, discarding any previous
    /// one. Returns the resulting state: [`SearchState::Searching`], or
    /// [`SearchState::OutOfMemory`] if the arena cannot hold even the two
    /// boundary nodes.
    pub fn set_start_and_goal<N: Navigator<S>>(
        &mut self,
        nav: &N,
        start: S,
        goal: S,
    ) -> SearchState {
        self.reset();

        let start_id = match self.arena.allocate(Node::new(start)) {
            Ok(id) => id,
            Err(ArenaFull) => {
                self.state = SearchState::OutOfMemory;
                return self.state;
            }
        };
        let goal_id = match self.arena.allocate(Node::new(goal)) {
            Ok(id) => id,
            Err(ArenaFull) => {
                self.arena.release(start_id);
                self.state = SearchState::OutOfMemory;
                return self.state;
            }
        };

        let h = nav.distance_estimate(&self.arena[start_id].state, &self.arena[goal_id].state);
        {
            let start = &mut self.arena[start_id];
            start.h = h;
            start.f = h;
            start.in_open = true;
        }
        self.open.push(OpenRef { id: start_id, f: h });
        self.open_len = 1;
        self.endpoints = Some((start_id, goal_id));
        self.state = SearchState::Searching;
        self.state
    }

    /// Runs one expansion and reports the search state afterwards.
    ///
    /// Stepping a search that is not in [`SearchState::Searching`] is a
    /// no-op that returns the current state, so outcomes are stable no
    /// matter how often the caller keeps stepping.
    pub fn step<N: Navigator<S>>(&mut self, nav: &N) -> SearchState {
        if self.state != SearchState::Searching {
            return self.state;
        }

        // A spent frontier or a cancellation request ends the search; either
        // way every node goes back to the arena.
        if self.open_len == 0 || self.cancel_requested {
            self.free_all_nodes();
            self.state = SearchState::Failed;
            return self.state;
        }

        let Some((start_id, goal_id)) = self.endpoints else {
            self.free_all_nodes();
            self.state = SearchState::Failed;
            return self.state;
        };

        // Claim the node with the lowest f, skipping refs superseded by a
        // later improvement.
        let mut claimed = None;
        while let Some(r) = self.open.pop() {
            if self.arena.get(r.id).is_some_and(|n| n.in_open) {
                claimed = Some(r.id);
                break;
            }
        }
        let Some(nid) = claimed else {
            self.free_all_nodes();
            self.state = SearchState::Failed;
            return self.state;
        };
        self.arena[nid].in_open = false;
        self.open_len -= 1;
        self.steps += 1;

        let n_state = self.arena[nid].state.clone();
        let n_g = self.arena[nid].g;

        if nav.is_goal(&n_state, &self.arena[goal_id].state) {
            // The goal node the caller supplied terminates the chain: it
            // adopts the claimed node's route, and the claimed node is
            // returned to the arena unless it is the start itself.
            let n_parent = self.arena[nid].parent;
            {
                let goal = &mut self.arena[goal_id];
                goal.parent = n_parent;
                goal.g = n_g;
            }
            if !nav.same_state(&n_state, &self.arena[start_id].state) {
                self.arena.release(nid);

                // Thread child links back from the goal so the solution
                // reads start to goal.
                let mut node_child = goal_id;
                let mut node_parent = n_parent;
                while let Some(pid) = node_parent {
                    self.arena[pid].child = Some(node_child);
                    if pid == start_id {
                        break;
                    }
                    node_child = pid;
                    node_parent = self.arena[pid].parent;
                }
            }
            self.free_unused_nodes();
            self.state = SearchState::Succeeded;
            return self.state;
        }

        // Expand. The navigator may suppress the back-step to the parent.
        let parent_state = self.arena[nid].parent.map(|pid| self.arena[pid].state.clone());
        self.succ_buf.clear();
        nav.successors(&n_state, parent_state.as_ref(), &mut self.succ_buf);

        for i in 0..self.succ_buf.len() {
            let s_state = self.succ_buf[i].clone();

            // Every candidate occupies arena capacity while it is resolved
            // against the open and closed lists.
            let cand = match self.arena.allocate(Node::new(s_state.clone())) {
                Ok(id) => id,
                Err(ArenaFull) => {
                    self.free_all_nodes();
                    self.state = SearchState::OutOfMemory;
                    return self.state;
                }
            };

            let new_g = n_g + nav.cost(&n_state, &s_state);

            let open_match = self.open.iter().find_map(|r| {
                let node = self.arena.get(r.id)?;
                (node.in_open && nav.same_state(&node.state, &s_state)).then_some(r.id)
            });
            if let Some(oid) = open_match {
                if self.arena[oid].g <= new_g {
                    self.arena.release(cand);
                    continue;
                }
            }

            let closed_match = self
                .closed
                .iter()
                .position(|&cid| nav.same_state(&self.arena[cid].state, &s_state));
            if let Some(ci) = closed_match {
                if self.arena[self.closed[ci]].g <= new_g {
                    self.arena.release(cand);
                    continue;
                }
            }

            let h = nav.distance_estimate(&s_state, &self.arena[goal_id].state);
            let f = new_g + h;

            if let Some(ci) = closed_match {
                // Cheaper route to an already-expanded state: pull the node
                // back onto the frontier with the improved costs.
                let cid = self.closed.swap_remove(ci);
                let node = &mut self.arena[cid];
                node.parent = Some(nid);
                node.g = new_g;
                node.h = h;
                node.f = f;
                node.in_open = true;
                self.arena.release(cand);
                self.open.push(OpenRef { id: cid, f });
                self.open_len += 1;
            } else if let Some(oid) = open_match {
                // Cheaper route to a frontier node: update it in place and
                // queue a fresh ref. The superseded ref is skipped on pop.
                let node = &mut self.arena[oid];
                node.parent = Some(nid);
                node.g = new_g;
                node.h = h;
                node.f = f;
                self.arena.release(cand);
                self.open.push(OpenRef { id: oid, f });
            } else {
                // First sighting of this state.
                let node = &mut self.arena[cand];
                node.parent = Some(nid);
                node.g = new_g;
                node.h = h;
                node.f = f;
                node.in_open = true;
                self.open.push(OpenRef { id: cand, f });
                self.open_len += 1;
            }
        }

        self.closed.push(nid);
        self.state
    }

    /// Requests cancellation. The next [`step`] call ends the search with
    /// [`SearchState::Failed`] and returns every node to the arena.
    ///
    /// [`step`]: AstarSearch::step
    pub fn cancel(&mut self) {
        self.cancel_requested = true;
    }

    /// Current search state.
    #[inline]
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Number of expansions performed in the current search.
    #[inline]
    pub fn step_count(&self) -> usize {
        self.steps
    }

    /// Nodes currently held by the search. Zero once a solution has been
    /// freed or a search has failed.
    #[inline]
    pub fn live_nodes(&self) -> usize {
        self.arena.live()
    }

    /// Size of the frontier.
    #[inline]
    pub fn open_len(&self) -> usize {
        self.open_len
    }

    /// Number of expanded nodes retired to the closed list.
    #[inline]
    pub fn closed_len(&self) -> usize {
        self.closed.len()
    }

    /// Total cost of the found path, if the search has succeeded.
    pub fn solution_cost(&self) -> Option<f32> {
        if self.state != SearchState::Succeeded {
            return None;
        }
        let (_, goal_id) = self.endpoints?;
        Some(self.arena[goal_id].g)
    }

    /// Iterates over the states of the found path in walking order, start
    /// excluded and goal included. Empty unless the search has succeeded,
    /// and empty again once the solution has been freed.
    pub fn solution_steps(&self) -> SolutionSteps<'_, S> {
        let first = match (self.state, self.endpoints) {
            (SearchState::Succeeded, Some((start_id, _))) => self.arena[start_id].child,
            _ => None,
        };
        SolutionSteps {
            arena: &self.arena,
            next: first,
        }
    }

    /// Returns the solution chain's nodes to the arena. After this call the
    /// search holds no nodes at all.
    pub fn free_solution_nodes(&mut self) {
        if self.state != SearchState::Succeeded {
            return;
        }
        let Some((start_id, goal_id)) = self.endpoints.take() else {
            return;
        };
        let mut cur = start_id;
        while cur != goal_id {
            let next = self.arena[cur].child;
            self.arena.release(cur);
            match next {
                Some(id) => cur = id,
                None => break,
            }
        }
        self.arena.release(goal_id);
    }

    /// After success, releases every node off the solution chain: the still
    /// open frontier and any expanded node the chain does not pass through.
    fn free_unused_nodes(&mut self) {
        while let Some(r) = self.open.pop() {
            let Some(node) = self.arena.get(r.id) else {
                continue;
            };
            if node.in_open && node.child.is_none() {
                self.arena.release(r.id);
            }
        }
        self.open_len = 0;

        let closed = std::mem::take(&mut self.closed);
        for cid in closed {
            if self.arena[cid].child.is_none() {
                self.arena.release(cid);
            }
        }
    }

    /// Abandons the search wholesale; every node goes back to the arena.
    fn free_all_nodes(&mut self) {
        self.open.clear();
        self.open_len = 0;
        self.closed.clear();
        self.endpoints = None;
        self.arena.clear();
    }

    fn reset(&mut self) {
        self.free_all_nodes();
        self.cancel_requested = false;
        self.steps = 0;
        self.state = SearchState::NotInitialized;
    }
}

impl<S: Clone> Default for AstarSearch<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the states of a found path. See
/// [`AstarSearch::solution_steps`].
pub struct SolutionSteps<'a, S> {
    arena: &'a NodeArena<S>,
    next: Option<NodeId>,
}

impl<'a, S> Iterator for SolutionSteps<'a, S> {
    type Item = &'a S;

    fn next(&mut self) -> Option<&'a S> {
        let id = self.next?;
        let node = self.arena.get(id)?;
        self.next = node.child;
        Some(&node.state)
    }
}
