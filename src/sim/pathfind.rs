//! A* pathfinding over the occupancy grid
//!
//! 4-connected, uniform step cost, Manhattan heuristic. The heuristic is
//! consistent on this grid, so the first time a cell is popped its cost is final
//! and the returned path is shortest.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use glam::IVec2;

use super::grid::SpatialGrid;
use crate::manhattan;

/// Neighbor offsets, expanded in this order
const NEIGHBORS: [IVec2; 4] = [
    IVec2::new(1, 0),
    IVec2::new(-1, 0),
    IVec2::new(0, 1),
    IVec2::new(0, -1),
];

/// Open-set entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Node {
    pos: IVec2,
    g: i32,
    f: i32,
}

impl Ord for Node {
    // BinaryHeap is a max-heap: reverse so the lowest f pops first, then lowest g.
    // Position is the last resort so equal-cost pops are deterministic.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.g.cmp(&self.g))
            .then_with(|| other.pos.y.cmp(&self.pos.y))
            .then_with(|| other.pos.x.cmp(&self.pos.x))
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find a shortest path from `start` to `goal`
///
/// Returns the cells from start to goal inclusive, or `None` when the goal is
/// blocked or unreachable. The start cell itself is never checked, so a car
/// sitting just above the grid can still path onto it.
pub fn find_path(grid: &SpatialGrid, start: IVec2, goal: IVec2) -> Option<Vec<IVec2>> {
    if grid.is_blocked(goal) {
        return None;
    }

    let mut open = BinaryHeap::new();
    let mut closed: HashSet<IVec2> = HashSet::new();
    let mut g_costs: HashMap<IVec2, i32> = HashMap::new();
    let mut came_from: HashMap<IVec2, IVec2> = HashMap::new();

    g_costs.insert(start, 0);
    open.push(Node {
        pos: start,
        g: 0,
        f: manhattan(start, goal),
    });

    while let Some(Node { pos: current, g, .. }) = open.pop() {
        if current == goal {
            return Some(reconstruct_path(&came_from, current));
        }

        // Stale duplicate of an already expanded cell
        if !closed.insert(current) {
            continue;
        }

        for offset in NEIGHBORS {
            let neighbor = current + offset;
            if grid.is_blocked(neighbor) || closed.contains(&neighbor) {
                continue;
            }

            let tentative = g + 1;
            if g_costs.get(&neighbor).is_none_or(|&known| tentative < known) {
                came_from.insert(neighbor, current);
                g_costs.insert(neighbor, tentative);
                open.push(Node {
                    pos: neighbor,
                    g: tentative,
                    f: tentative + manhattan(neighbor, goal),
                });
            }
        }
    }

    None
}

fn reconstruct_path(came_from: &HashMap<IVec2, IVec2>, mut current: IVec2) -> Vec<IVec2> {
    let mut path = vec![current];
    while let Some(&prev) = came_from.get(&current) {
        current = prev;
        path.push(current);
    }
    path.reverse();
    path
}
