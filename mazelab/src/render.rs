//! Console rendering of mazes, paths, and replay overlays.

use std::collections::HashSet;

use mazetrace_core::{Cell, Maze, Position};
use mazetrace_replay::Overlay;

fn render(maze: &Maze, mut overlay: impl FnMut(Position, char) -> char) -> String {
    let mut out = String::with_capacity((maze.rows() * (maze.cols() + 1)) as usize);
    for r in 0..maze.rows() {
        for c in 0..maze.cols() {
            let pos = Position::new(r, c);
            let ch = maze.cell(pos).map_or('.', Cell::to_char);
            out.push(overlay(pos, ch));
        }
        out.push('\n');
    }
    out
}

/// Render the maze with the final path overlaid as `P`. Walls and the
/// endpoints stay visible.
pub fn maze_with_path(maze: &Maze, path: &[Position]) -> String {
    let on_path: HashSet<Position> = path.iter().copied().collect();
    render(maze, |pos, ch| {
        if ch == '.' && on_path.contains(&pos) {
            'P'
        } else {
            ch
        }
    })
}

/// Render the maze with replay overlays: path `P`, frontier `F`, expanded
/// `T`, in that precedence. Walls and the endpoints stay visible.
pub fn maze_with_overlay(
    maze: &Maze,
    overlay: &Overlay<'_>,
    path: Option<&[Position]>,
) -> String {
    let on_path: HashSet<Position> = path.unwrap_or(&[]).iter().copied().collect();
    render(maze, |pos, ch| {
        if ch != '.' {
            ch
        } else if on_path.contains(&pos) {
            'P'
        } else if overlay.frontier.contains(&pos) {
            'F'
        } else if overlay.expanded.contains(&pos) {
            'T'
        } else {
            '.'
        }
    })
}
