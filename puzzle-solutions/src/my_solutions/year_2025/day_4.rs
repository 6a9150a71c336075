use anyhow::{anyhow, bail};
use puzzle_solver::{AutoRegisterSolver, ParseError, PartSolver, PuzzleParser, PuzzleSolver, SolveError};

#[derive(PuzzleSolver, AutoRegisterSolver)]
#[puzzle_solver(max_parts = 2)]
#[puzzle(year = 2025, day = 4, tags = ["grid", "simulation"])]
pub struct Solver;

/// A roll is reachable by forklift when fewer than this many rolls surround it.
const CROWDED: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollGrid {
    width: usize,
    height: usize,
    rolls: Vec<bool>,
}

impl RollGrid {
    fn neighbours(&self, index: usize) -> usize {
        let (row, col) = (index / self.width, index % self.width);
        (row.saturating_sub(1)..=(row + 1).min(self.height - 1))
            .flat_map(|r| (col.saturating_sub(1)..=(col + 1).min(self.width - 1)).map(move |c| (r, c)))
            .filter(|&(r, c)| (r, c) != (row, col) && self.rolls[r * self.width + c])
            .count()
    }

    fn accessible(&self) -> Vec<usize> {
        (0..self.rolls.len())
            .filter(|&index| self.rolls[index] && self.neighbours(index) < CROWDED)
            .collect()
    }

    /// Remove accessible rolls in waves until none are left to take.
    fn remove_all_accessible(&mut self) -> usize {
        let mut removed = 0;
        loop {
            let wave = self.accessible();
            if wave.is_empty() {
                return removed;
            }
            removed += wave.len();
            for index in wave {
                self.rolls[index] = false;
            }
        }
    }
}

impl PuzzleParser for Solver {
    type SharedData<'a> = RollGrid;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_grid(input).map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

fn parse_grid(input: &str) -> Result<RollGrid, anyhow::Error> {
    let mut grid = RollGrid {
        width: 0,
        height: 0,
        rolls: Vec::new(),
    };

    for (line_idx, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if grid.height > 0 && line.len() != grid.width {
            bail!(
                "(line {}) row has {} cells but the first row has {}",
                line_idx + 1,
                line.len(),
                grid.width
            );
        }
        for b in line.bytes() {
            grid.rolls.push(match b {
                b'@' => true,
                b'.' => false,
                _ => return Err(anyhow!("(line {}) unexpected cell '{}'", line_idx + 1, b as char)),
            });
        }
        grid.width = line.len();
        grid.height += 1;
    }
    Ok(grid)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.accessible().len().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // work on a copy so part 1 still sees the original layout
        Ok(shared.clone().remove_all_accessible().to_string())
    }
}

#[cfg(test)]
mod tests {
    use puzzle_solver::Solver as _;

    use super::*;

    const GRID: &str = "\
..@@.@@@@.
@@@.@.@@.@
@@@@@.@.@@
@.@@@@..@.
@@.@@@@.@@
.@@@@@@@.@
.@.@.@.@@@
@.@@@.@@@@
.@@@@@@@@.
@.@.@@@.@.
";

    #[test]
    fn counts_accessible_rolls() {
        let mut shared = Solver::parse(GRID).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "14");
    }

    #[test]
    fn removes_rolls_in_waves() {
        let mut shared = Solver::parse(GRID).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "43");
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "14");
    }

    #[test]
    fn full_block_peels_from_the_corners() {
        let mut grid = Solver::parse("@@@\n@@@\n@@@").unwrap();
        assert_eq!(grid.accessible(), vec![0, 2, 6, 8]);
        assert_eq!(grid.neighbours(4), 8);
        assert_eq!(grid.remove_all_accessible(), 9);
        assert!(grid.accessible().is_empty());
    }

    #[test]
    fn empty_input_has_no_rolls() {
        let grid = Solver::parse("").unwrap();
        assert!(grid.accessible().is_empty());
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = Solver::parse("@@\n@\n").unwrap_err();
        assert!(err.to_string().contains("(line 2)"), "{err}");
    }
}
