//! **cairn-search** — resumable, memory-bounded A* pathfinding.
//!
//! The crate is built around three pieces:
//!
//! - [`Navigator`]: the contract a map implements to describe movement,
//!   costs and distance estimates. The engine knows nothing about maps
//!   beyond this trait, so it searches grids, graphs and abstract state
//!   spaces alike.
//! - [`AstarSearch`]: the engine proper. It advances one expansion per
//!   [`step`](AstarSearch::step) call, so searches can be paced, budgeted
//!   or cancelled mid-flight, and it draws nodes from a fixed-capacity
//!   arena so memory stays bounded no matter the search space.
//! - [`path_find`]: the one-call wrapper that drives the engine to
//!   completion under a step budget and returns a [`Path`] of states to
//!   walk through.
//!
//! [`GridNavigator`] adapts a [`cairn_core::GridMap`] for callers that
//! just want routes on a walkability grid.
//!
//! # Example
//!
//! ```
//! use cairn_core::{GridMap, Point};
//! use cairn_search::{GridNavigator, path_find};
//!
//! let mut map = GridMap::new(8, 5);
//! map.set_walkable(Point::new(4, 1), false);
//! map.set_walkable(Point::new(4, 2), false);
//! map.set_walkable(Point::new(4, 3), false);
//!
//! let nav = GridNavigator::new(&map);
//! let path = path_find(&nav, Point::new(1, 2), Point::new(7, 2));
//! assert!(path.success);
//! assert_eq!(path.steps.back(), Some(&Point::new(7, 2)));
//! ```

mod arena;
mod astar;
mod distance;
mod grid;
mod navigator;
mod path;

pub use astar::{AstarSearch, DEFAULT_MAX_NODES, SearchState, SolutionSteps};
pub use distance::{chebyshev, euclidean, manhattan};
pub use grid::{GridNavigator, Movement};
pub use navigator::Navigator;
pub use path::{DEFAULT_STEP_LIMIT, Path, PathFailure, path_find, path_find_limited};
