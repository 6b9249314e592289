//! Random maze generation.

use rand::{Rng, RngExt};

/// Generate the text form of a `rows` x `cols` maze where each cell is a
/// wall with probability `wall_pct / 100`, then place the start and goal on
/// two distinct non-wall cells.
///
/// If the random fill leaves fewer than two open cells, the corners are
/// carved open to hold the endpoints. The caller ensures `rows * cols >= 2`.
pub fn random_maze<R: Rng>(rng: &mut R, rows: usize, cols: usize, wall_pct: u32) -> String {
    let p = f64::from(wall_pct.min(100)) / 100.0;
    let mut cells: Vec<char> = (0..rows * cols)
        .map(|_| if rng.random::<f64>() < p { 'X' } else { '.' })
        .collect();

    let mut open: Vec<usize> = cells
        .iter()
        .enumerate()
        .filter(|&(_, &c)| c == '.')
        .map(|(i, _)| i)
        .collect();
    if open.len() < 2 {
        open = vec![0, rows * cols - 1];
    }
    let a = open.swap_remove(rng.random_range(0..open.len()));
    let b = open.swap_remove(rng.random_range(0..open.len()));
    cells[a] = 'A';
    cells[b] = 'B';

    let mut out = String::with_capacity(rows * (cols + 1));
    for r in 0..rows {
        out.extend(cells[r * cols..(r + 1) * cols].iter());
        out.push('\n');
    }
    out
}
