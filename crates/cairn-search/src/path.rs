//! One-call pathfinding over any [`Navigator`].
//!
//! [`path_find`] wraps the engine's step loop behind a single request:
//! plan a route, get back a [`Path`] whose `steps` can be consumed
//! front-first to follow it. A step budget keeps a single request from
//! stalling the caller on large or impossible searches.

use std::collections::VecDeque;

use crate::astar::{AstarSearch, SearchState};
use crate::navigator::Navigator;

/// Default step budget for [`path_find`].
pub const DEFAULT_STEP_LIMIT: usize = 100;

/// Why a pathfinding request produced no path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathFailure {
    /// The reachable state space was exhausted without satisfying the goal.
    NotFound,
    /// The engine's node arena hit its capacity ceiling.
    OutOfMemory,
    /// The step budget ran out and the search was cancelled.
    StepBudgetExceeded,
}

/// A completed pathfinding request.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path<S> {
    /// Whether a route was found.
    pub success: bool,
    /// The goal state of the request, kept for diagnostics either way.
    pub destination: S,
    /// States to visit in walking order, excluding the start and including
    /// the goal. Empty on failure, and also when the start already
    /// satisfies the goal. Pop from the front to follow the route one
    /// step at a time.
    pub steps: VecDeque<S>,
    /// What went wrong, when `success` is false.
    pub failure: Option<PathFailure>,
}

/// Plans a route from `start` to `goal` with the default step budget of
/// [`DEFAULT_STEP_LIMIT`].
pub fn path_find<S: Clone, N: Navigator<S>>(nav: &N, start: S, goal: S) -> Path<S> {
    path_find_limited(nav, start, goal, DEFAULT_STEP_LIMIT)
}

/// Plans a route from `start` to `goal`, cancelling the search once it has
/// run for more than `limit_steps` engine steps.
pub fn path_find_limited<S: Clone, N: Navigator<S>>(
    nav: &N,
    start: S,
    goal: S,
    limit_steps: usize,
) -> Path<S> {
    let mut search = AstarSearch::new();
    let mut state = search.set_start_and_goal(nav, start, goal.clone());
    let mut search_steps = 0usize;
    let mut budget_spent = false;

    while state == SearchState::Searching {
        state = search.step(nav);
        search_steps += 1;
        if search_steps > limit_steps && !budget_spent {
            budget_spent = true;
            search.cancel();
            log::debug!("pathfinding cancelled after {search_steps} steps (budget {limit_steps})");
        }
    }

    let mut path = Path {
        success: false,
        destination: goal,
        steps: VecDeque::new(),
        failure: None,
    };

    match state {
        SearchState::Succeeded => {
            path.steps.extend(search.solution_steps().cloned());
            search.free_solution_nodes();
            path.success = true;
        }
        SearchState::OutOfMemory => {
            log::warn!("pathfinding exhausted its node arena after {search_steps} steps");
            path.failure = Some(PathFailure::OutOfMemory);
        }
        _ => {
            path.failure = Some(if budget_spent {
                PathFailure::StepBudgetExceeded
            } else {
                PathFailure::NotFound
            });
        }
    }

    debug_assert_eq!(search.live_nodes(), 0, "search nodes leaked");
    path
}

#[cfg(test)]
mod tests {
    use cairn_core::{GridMap, Point};

    use super::*;
    use crate::grid::GridNavigator;

    #[test]
    fn diagonal_route_on_open_grid() {
        let map = GridMap::new(5, 5);
        let nav = GridNavigator::new(&map);

        let path = path_find(&nav, Point::new(0, 0), Point::new(4, 4));
        assert!(path.success);
        assert_eq!(path.failure, None);
        assert_eq!(path.destination, Point::new(4, 4));
        assert_eq!(path.steps.len(), 4);
        assert_eq!(path.steps.front(), Some(&Point::new(1, 1)));
        assert_eq!(path.steps.back(), Some(&Point::new(4, 4)));
    }

    #[test]
    fn start_satisfying_goal_is_an_empty_success() {
        let map = GridMap::new(5, 5);
        let nav = GridNavigator::new(&map);

        let path = path_find(&nav, Point::new(3, 3), Point::new(3, 3));
        assert!(path.success);
        assert!(path.steps.is_empty());
        assert_eq!(path.destination, Point::new(3, 3));
    }

    #[test]
    fn enclosed_goal_reports_not_found() {
        let mut map = GridMap::new(7, 7);
        let goal = Point::new(5, 5);
        for n in goal.neighbors_8() {
            map.set_walkable(n, false);
        }
        let nav = GridNavigator::new(&map);

        let path = path_find(&nav, Point::new(1, 1), goal);
        assert!(!path.success);
        assert!(path.steps.is_empty());
        assert_eq!(path.failure, Some(PathFailure::NotFound));
        assert_eq!(path.destination, goal);

        // Asking again behaves identically.
        let again = path_find(&nav, Point::new(1, 1), goal);
        assert_eq!(again, path);
    }

    #[test]
    fn tight_budget_reports_budget_exceeded() {
        let map = GridMap::new(30, 30);
        let nav = GridNavigator::new(&map);

        let path = path_find_limited(&nav, Point::new(0, 0), Point::new(29, 29), 5);
        assert!(!path.success);
        assert!(path.steps.is_empty());
        assert_eq!(path.failure, Some(PathFailure::StepBudgetExceeded));
    }

    #[test]
    fn generous_budget_finds_the_same_route() {
        let map = GridMap::new(30, 30);
        let nav = GridNavigator::new(&map);

        let path = path_find_limited(&nav, Point::new(0, 0), Point::new(29, 29), 10_000);
        assert!(path.success);
        assert_eq!(path.steps.len(), 29);
    }

    #[test]
    fn arena_exhaustion_reports_out_of_memory() {
        // An unreachable goal on a large map forces a full sweep, and the
        // reachable area holds more cells than the default node ceiling.
        let mut map = GridMap::new(40, 40);
        let goal = Point::new(20, 20);
        for n in goal.neighbors_8() {
            map.set_walkable(n, false);
        }
        let nav = GridNavigator::new(&map);

        let path = path_find_limited(&nav, Point::new(0, 0), goal, 50_000);
        assert!(!path.success);
        assert_eq!(path.failure, Some(PathFailure::OutOfMemory));
    }

    #[test]
    fn budget_of_zero_still_terminates() {
        let map = GridMap::new(5, 5);
        let nav = GridNavigator::new(&map);

        let path = path_find_limited(&nav, Point::new(0, 0), Point::new(4, 4), 0);
        assert!(!path.success);
        assert_eq!(path.failure, Some(PathFailure::StepBudgetExceeded));
    }
}
