//! A rectangular grid of walkable and blocked cells.

use crate::geom::{Point, Range};

/// Per-cell walkability for a rectangular map.
///
/// This is deliberately dumb storage: it answers "can something stand here?"
/// and nothing more. Pathfinding consumes it through a navigator rather than
/// reading it directly.
#[derive(Debug, Clone)]
pub struct GridMap {
    bounds: Range,
    width: usize,
    cells: Vec<bool>,
}

impl GridMap {
    /// Creates a map of the given size with every cell walkable.
    pub fn new(width: i32, height: i32) -> Self {
        let bounds = Range::new(0, 0, width.max(0), height.max(0));
        Self {
            bounds,
            width: bounds.width() as usize,
            cells: vec![true; bounds.len()],
        }
    }

    /// The rectangle of valid cells.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Whether `p` is inside the map and walkable. Out-of-bounds positions
    /// are never walkable.
    #[inline]
    pub fn walkable(&self, p: Point) -> bool {
        match self.idx(p) {
            Some(i) => self.cells[i],
            None => false,
        }
    }

    /// Marks a cell walkable or blocked. Out-of-bounds positions are
    /// silently ignored.
    pub fn set_walkable(&mut self, p: Point, walkable: bool) {
        if let Some(i) = self.idx(p) {
            self.cells[i] = walkable;
        }
    }

    /// Blocks every cell on the perimeter of the map.
    pub fn close_border(&mut self) {
        let Range { min, max } = self.bounds;
        for x in min.x..max.x {
            self.set_walkable(Point::new(x, min.y), false);
            self.set_walkable(Point::new(x, max.y - 1), false);
        }
        for y in min.y..max.y {
            self.set_walkable(Point::new(min.x, y), false);
            self.set_walkable(Point::new(max.x - 1, y), false);
        }
    }

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        let x = (p.x - self.bounds.min.x) as usize;
        let y = (p.y - self.bounds.min.y) as usize;
        Some(y * self.width + x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_map_is_fully_walkable() {
        let map = GridMap::new(4, 3);
        assert_eq!(map.bounds(), Range::new(0, 0, 4, 3));
        for p in map.bounds().iter() {
            assert!(map.walkable(p));
        }
    }

    #[test]
    fn set_walkable_toggles_cells() {
        let mut map = GridMap::new(5, 5);
        let p = Point::new(2, 3);
        map.set_walkable(p, false);
        assert!(!map.walkable(p));
        map.set_walkable(p, true);
        assert!(map.walkable(p));
    }

    #[test]
    fn out_of_bounds_is_blocked() {
        let mut map = GridMap::new(3, 3);
        assert!(!map.walkable(Point::new(-1, 0)));
        assert!(!map.walkable(Point::new(3, 1)));
        assert!(!map.walkable(Point::new(1, 7)));
        // Ignored rather than panicking.
        map.set_walkable(Point::new(9, 9), true);
        assert!(!map.walkable(Point::new(9, 9)));
    }

    #[test]
    fn close_border_blocks_exactly_the_perimeter() {
        let mut map = GridMap::new(6, 4);
        map.close_border();
        let bounds = map.bounds();
        let blocked = bounds.iter().filter(|&p| !map.walkable(p)).count();
        assert_eq!(blocked, 16);
        for p in bounds.iter() {
            let on_edge = p.x == 0 || p.y == 0 || p.x == 5 || p.y == 3;
            assert_eq!(map.walkable(p), !on_edge);
        }
    }

    #[test]
    fn zero_sized_map_has_no_cells() {
        let map = GridMap::new(0, 8);
        assert!(map.bounds().is_empty());
        assert!(!map.walkable(Point::new(0, 0)));
    }
}
