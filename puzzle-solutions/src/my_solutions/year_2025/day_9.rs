//! Largest rectangle with red tiles at two opposite corners.
//!
//! The red tiles, in input order, are the vertices of an axis-aligned loop;
//! the loop and everything it encloses is green. Part 2 only accepts
//! rectangles made entirely of red or green tiles.

use anyhow::anyhow;
use puzzle_solver::{AutoRegisterSolver, ParseError, PartSolver, PuzzleParser, PuzzleSolver, SolveError};
use rayon::prelude::*;

#[derive(PuzzleSolver, AutoRegisterSolver)]
#[puzzle_solver(max_parts = 2)]
#[puzzle(year = 2025, day = 9, tags = ["geometry"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub x: i64,
    pub y: i64,
}

/// Closed axis-aligned box spanned by two tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rect {
    min_x: i64,
    max_x: i64,
    min_y: i64,
    max_y: i64,
}

impl Rect {
    fn spanning(a: Tile, b: Tile) -> Self {
        Self {
            min_x: a.x.min(b.x),
            max_x: a.x.max(b.x),
            min_y: a.y.min(b.y),
            max_y: a.y.max(b.y),
        }
    }

    /// Tiles covered, borders included.
    fn area(&self) -> u64 {
        (self.max_x.abs_diff(self.min_x) + 1) * (self.max_y.abs_diff(self.min_y) + 1)
    }

    fn interior_overlaps(&self, other: &Rect) -> bool {
        other.min_x < self.max_x
            && other.max_x > self.min_x
            && other.min_y < self.max_y
            && other.max_y > self.min_y
    }
}

#[derive(Debug)]
pub struct SharedData {
    tiles: Vec<Tile>,
}

impl SharedData {
    /// Loop edges as degenerate rectangles.
    fn edges(&self) -> Result<Vec<Rect>, anyhow::Error> {
        self.tiles
            .iter()
            .zip(self.tiles.iter().cycle().skip(1))
            .enumerate()
            .map(|(index, (&a, &b))| {
                if a.x != b.x && a.y != b.y {
                    return Err(anyhow!(
                        "tiles {} and {} are not on a shared row or column",
                        index + 1,
                        (index + 1) % self.tiles.len() + 1
                    ));
                }
                Ok(Rect::spanning(a, b))
            })
            .collect()
    }

    fn candidates(&self) -> impl Iterator<Item = Rect> + '_ {
        self.tiles.iter().enumerate().flat_map(move |(i, &a)| {
            self.tiles[i + 1..].iter().map(move |&b| Rect::spanning(a, b))
        })
    }
}

/// True if no loop edge cuts into the rectangle's interior and the
/// interior lies inside the loop.
///
/// With no edge inside, the open rectangle is either wholly inside or wholly
/// outside the loop, so testing its center decides it. Coordinates are
/// doubled to keep the center on the integer grid.
fn is_enclosed(rect: &Rect, edges: &[Rect]) -> bool {
    if rect.min_x == rect.max_x || rect.min_y == rect.max_y {
        return false;
    }
    if edges.iter().any(|edge| rect.interior_overlaps(edge)) {
        return false;
    }

    let (cx, cy) = (rect.min_x + rect.max_x, rect.min_y + rect.max_y);
    let crossings = edges
        .iter()
        .filter(|edge| edge.min_x == edge.max_x && 2 * edge.min_x < cx)
        .filter(|edge| 2 * edge.min_y <= cy && cy < 2 * edge.max_y)
        .count();
    crossings % 2 == 1
}

impl PuzzleParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .map(|(line_idx, line)| (line_idx, line.trim()))
            .filter(|(_, line)| !line.is_empty())
            .map(|(line_idx, line)| -> Result<Tile, anyhow::Error> {
                let (x, y) = line
                    .split_once(',')
                    .ok_or_else(|| anyhow!("(line {}) expected 'x,y'", line_idx + 1))?;
                let parse = |coord: &str| {
                    coord
                        .trim()
                        .parse::<i64>()
                        .map_err(|e| anyhow!("(line {}) {}", line_idx + 1, e))
                };
                Ok(Tile {
                    x: parse(x)?,
                    y: parse(y)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(|tiles| SharedData { tiles })
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .candidates()
            .map(|rect| rect.area())
            .max()
            .map(|area| area.to_string())
            .ok_or_else(|| SolveError::SolveFailed(anyhow!("at least two red tiles are needed").into()))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let edges = shared
            .edges()
            .map_err(|e| SolveError::SolveFailed(e.into()))?;

        let mut candidates: Vec<Rect> = shared.candidates().collect();
        candidates.sort_unstable_by_key(|rect| std::cmp::Reverse(rect.area()));

        let largest = candidates
            .par_iter()
            .find_first(|rect| is_enclosed(rect, &edges))
            .map_or(0, Rect::area);
        Ok(largest.to_string())
    }
}

#[cfg(test)]
mod tests {
    use puzzle_solver::Solver as _;

    use super::*;

    const SAMPLE: &str = "7,1\n11,1\n11,7\n9,7\n9,5\n2,5\n2,3\n7,3\n";

    /// A U: the notch between the arms is outside the loop.
    const U_SHAPE: &str = "0,0\n6,0\n6,6\n4,6\n4,2\n2,2\n2,6\n0,6\n";

    #[test]
    fn largest_rectangle_anywhere() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "50");
    }

    #[test]
    fn largest_rectangle_inside_the_loop() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "24");
    }

    #[test]
    fn rectangles_spanning_a_notch_are_rejected() {
        let mut shared = Solver::parse(U_SHAPE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "49");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "21");
    }

    #[test]
    fn rectangle_outside_a_concave_corner_is_rejected() {
        let shared = Solver::parse(U_SHAPE).unwrap();
        let edges = shared.edges().unwrap();
        // (2, 6)-(4, 2) covers the notch and touches no edge in its interior
        let notch = Rect::spanning(Tile { x: 2, y: 6 }, Tile { x: 4, y: 2 });
        assert!(!is_enclosed(&notch, &edges));
        let arm = Rect::spanning(Tile { x: 0, y: 0 }, Tile { x: 2, y: 6 });
        assert!(is_enclosed(&arm, &edges));
    }

    #[test]
    fn diagonal_edge_fails_part_two() {
        let mut shared = Solver::parse("0,0\n3,3\n0,3\n").unwrap();
        assert!(Solver::solve_part(&mut shared, 2).is_err());
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "16");
    }

    #[test]
    fn needs_two_tiles() {
        let mut shared = Solver::parse("1,1\n").unwrap();
        assert!(Solver::solve_part(&mut shared, 1).is_err());
    }

    #[test]
    fn rejects_bad_coordinate() {
        let err = Solver::parse("1,1\n2;2\n").unwrap_err();
        assert!(err.to_string().contains("(line 2)"), "{err}");
    }
}
