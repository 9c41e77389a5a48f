//! Wandering pathfinder demo.
//!
//! Builds a walled map with random obstacles, then sends a walker on a
//! series of trips: pick a random reachable-looking destination, plan a
//! route with a step budget, print the map with the route overlaid, and
//! follow the breadcrumbs to the destination.
//!
//! Run: cargo run --bin wander

use std::collections::HashSet;

use cairn_core::{GridMap, Point};
use cairn_search::{GridNavigator, Path, path_find_limited};
use rand::{Rng, SeedableRng};

const WIDTH: i32 = 40;
const HEIGHT: i32 = 16;
const STEP_LIMIT: usize = 400;
const TRIPS: usize = 5;

fn random_map(rng: &mut impl Rng) -> GridMap {
    let mut map = GridMap::new(WIDTH, HEIGHT);
    map.close_border();
    // Roughly a fifth of the interior is wall.
    for p in map.bounds().iter() {
        if map.walkable(p) && rng.random_range(0..5) == 0 {
            map.set_walkable(p, false);
        }
    }
    map
}

fn pick_destination(map: &GridMap, rng: &mut impl Rng, from: Point) -> Point {
    loop {
        let p = Point::new(
            rng.random_range(1..WIDTH - 1),
            rng.random_range(1..HEIGHT - 1),
        );
        if map.walkable(p) && p != from {
            return p;
        }
    }
}

fn draw(map: &GridMap, walker: Point, target: Point, path: &Path<Point>) {
    let route: HashSet<Point> = path.steps.iter().copied().collect();
    for y in 0..HEIGHT {
        let mut line = String::with_capacity(WIDTH as usize);
        for x in 0..WIDTH {
            let p = Point::new(x, y);
            let ch = if p == walker {
                '@'
            } else if p == target {
                '>'
            } else if route.contains(&p) {
                '*'
            } else if map.walkable(p) {
                '.'
            } else {
                '#'
            };
            line.push(ch);
        }
        println!("{line}");
    }
}

fn main() {
    // A fixed seed keeps the map layout reproducible between runs; the
    // trips themselves vary.
    let mut map_rng = rand::rngs::StdRng::seed_from_u64(42);
    let map = random_map(&mut map_rng);
    let mut rng = rand::rng();

    let mut walker = pick_destination(&map, &mut rng, Point::new(-1, -1));
    for trip in 1..=TRIPS {
        let target = pick_destination(&map, &mut rng, walker);
        let nav = GridNavigator::new(&map);
        let path = path_find_limited(&nav, walker, target, STEP_LIMIT);

        if !path.success {
            println!(
                "trip {trip}: no route from {walker} to {target} ({:?})",
                path.failure
            );
            continue;
        }

        draw(&map, walker, target, &path);
        println!(
            "trip {trip}: {walker} -> {target} in {} steps\n",
            path.steps.len()
        );

        // Follow the breadcrumbs front-first, the way a game loop would
        // consume one step per turn.
        let mut steps = path.steps;
        while let Some(next) = steps.pop_front() {
            walker = next;
        }
    }
}
