use std::collections::VecDeque;

use crate::maze::{Grid, Position};

/// Breadth-first search over open walls. Returns the positions from `start` to `goal`
/// inclusive, or `None` if `goal` is unreachable. Both positions must be in bounds.
pub(super) fn solve_bfs(grid: &Grid, start: Position, goal: Position) -> Option<Vec<Position>> {
    // Parent of each discovered cell, indexed like the grid
    let mut parents: Vec<Option<Position>> = vec![None; grid.cell_count()];
    let mut visited = vec![false; grid.cell_count()];
    visited[grid.ravel_index(start)] = true;

    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        if current == goal {
            // Walk the parent links back to the start
            let mut path = vec![current];
            let mut cursor = current;
            while let Some(parent) = parents[grid.ravel_index(cursor)] {
                path.push(parent);
                cursor = parent;
            }
            path.reverse();
            return Some(path);
        }

        for neighbor in grid.open_neighbors(current) {
            let idx = grid.ravel_index(neighbor);
            if !visited[idx] {
                visited[idx] = true;
                parents[idx] = Some(current);
                queue.push_back(neighbor);
            }
        }
    }

    None
}
