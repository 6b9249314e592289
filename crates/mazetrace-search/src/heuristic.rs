use mazetrace_core::Position;

/// Manhattan (L1) distance between two positions.
///
/// Admissible and consistent for unit-cost 4-directional movement, so A*
/// expansions see nondecreasing `f` and the first goal expansion is optimal.
#[inline]
pub fn manhattan(a: Position, b: Position) -> i32 {
    (a.row - b.row).abs() + (a.col - b.col).abs()
}
