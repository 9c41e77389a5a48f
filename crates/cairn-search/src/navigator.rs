//! The capability contract between a search and the map it runs on.

/// Domain knowledge a search needs, supplied by the caller.
///
/// `S` is the caller's state type. For grid maps it is a position, but any
/// value-semantic type works: a room id, a board configuration, a graph
/// vertex. The engine clones states into its own nodes and never holds
/// references into caller memory, so `S` should be cheap to clone.
///
/// Implementations must behave as pure functions of their arguments. The
/// engine may call them any number of times, in any order, and assumes two
/// calls with the same arguments agree.
pub trait Navigator<S> {
    /// Estimated remaining cost from `state` to `goal`.
    ///
    /// For the search to return cost-optimal paths this must never
    /// overestimate the true remaining cost. Overestimating trades
    /// optimality for speed; the search still terminates.
    fn distance_estimate(&self, state: &S, goal: &S) -> f32;

    /// Whether `state` satisfies `goal`.
    ///
    /// This expresses intent, not identity: an implementation may accept
    /// "adjacent to the goal" or any other close-enough criterion.
    fn is_goal(&self, state: &S, goal: &S) -> bool;

    /// Appends every state reachable from `state` in one transition to
    /// `buf`. The buffer is cleared by the engine before the call.
    ///
    /// `parent` is the state the search arrived from, if any. Skipping it
    /// avoids offering an immediate back-step, but that is an optimisation
    /// left to the implementation, not a requirement. Appending nothing
    /// marks `state` as a dead end.
    fn successors(&self, state: &S, parent: Option<&S>, buf: &mut Vec<S>);

    /// Cost of the single transition from `from` to the adjacent `to`.
    /// Must not be negative.
    fn cost(&self, from: &S, to: &S) -> f32;

    /// State-space equality. Usually plain `==`, but an implementation may
    /// canonicalize when several distinct values denote one search state.
    fn same_state(&self, a: &S, b: &S) -> bool;
}
