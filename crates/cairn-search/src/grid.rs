//! A ready-made [`Navigator`] over a [`GridMap`].

use cairn_core::{GridMap, Point};

use crate::distance::{chebyshev, manhattan};
use crate::navigator::Navigator;

/// Which moves a [`GridNavigator`] offers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    /// All eight directions at uniform cost.
    #[default]
    EightWay,
    /// Cardinal directions only.
    FourWay,
}

/// [`Navigator`] implementation backed by a [`GridMap`]'s walkability.
///
/// Every move costs 1, and the distance estimate matches the movement mode
/// so it never overestimates. The immediate back-step to the parent cell is
/// suppressed during successor generation.
pub struct GridNavigator<'a> {
    map: &'a GridMap,
    movement: Movement,
}

impl<'a> GridNavigator<'a> {
    /// Eight-way navigator over `map`.
    pub fn new(map: &'a GridMap) -> Self {
        Self {
            map,
            movement: Movement::EightWay,
        }
    }

    /// Navigator with an explicit movement mode.
    pub fn with_movement(map: &'a GridMap, movement: Movement) -> Self {
        Self { map, movement }
    }
}

impl Navigator<Point> for GridNavigator<'_> {
    fn distance_estimate(&self, state: &Point, goal: &Point) -> f32 {
        match self.movement {
            Movement::EightWay => chebyshev(*state, *goal),
            Movement::FourWay => manhattan(*state, *goal),
        }
    }

    fn is_goal(&self, state: &Point, goal: &Point) -> bool {
        state == goal
    }

    fn successors(&self, state: &Point, parent: Option<&Point>, buf: &mut Vec<Point>) {
        match self.movement {
            Movement::EightWay => {
                for n in state.neighbors_8() {
                    if parent.is_some_and(|p| *p == n) {
                        continue;
                    }
                    if self.map.walkable(n) {
                        buf.push(n);
                    }
                }
            }
            Movement::FourWay => {
                for n in state.neighbors_4() {
                    if parent.is_some_and(|p| *p == n) {
                        continue;
                    }
                    if self.map.walkable(n) {
                        buf.push(n);
                    }
                }
            }
        }
    }

    fn cost(&self, _from: &Point, _to: &Point) -> f32 {
        1.0
    }

    fn same_state(&self, a: &Point, b: &Point) -> bool {
        a == b
    }
}
