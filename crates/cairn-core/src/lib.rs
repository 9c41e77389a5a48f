//! **cairn-core** — grid primitives shared by the cairn crates.
//!
//! Provides the collaborator types pathfinding binds to: [`Point`] grid
//! coordinates, [`Range`] rectangles, and the [`GridMap`] walkability grid.
//!
//! Enable the `serde` feature to derive `Serialize`/`Deserialize` on the
//! value types.

pub mod geom;
pub mod map;

pub use geom::{Point, Range};
pub use map::GridMap;
