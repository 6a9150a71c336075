use std::sync::LazyLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{anyhow, bail};
use puzzle_solver::{
    AutoRegisterSolver, ParseError, PartSolver, PuzzleParser, PuzzleSolver, SolveError,
};
use rayon::prelude::*;
use regex::Regex;
use tracing::{Level, debug, info, trace};

use crate::utils::packing::{FitError, Packer, Region, Shape};

#[derive(PuzzleSolver, AutoRegisterSolver)]
#[puzzle_solver(max_parts = 1)]
#[puzzle(year = 2025, day = 12, tags = ["packing", "backtracking"])]
pub struct Solver;

static SHAPE_HEADER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+):$").unwrap());
static REGION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)x(\d+):((?:\s+\d+)*)\s*$").unwrap());

const PROGRESS_EVERY: usize = 100;

#[derive(Debug)]
pub struct SharedData {
    packer: Packer,
    regions: Vec<Region>,
}

impl SharedData {
    pub fn packer(&self) -> &Packer {
        &self.packer
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }
}

impl PuzzleParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut builder = InputBuilder::default();
        input
            .lines()
            .enumerate()
            .try_for_each(|(line_idx, line)| {
                builder
                    .feed(line.trim())
                    .map_err(|e| anyhow!("(line {}) {}", line_idx + 1, e))
            })
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
        builder.finish()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        count_fitting_regions(&shared.packer, &shared.regions)
            .map(|count| count.to_string())
            .map_err(|e| SolveError::SolveFailed(Box::new(e)))
    }
}

/// Line-by-line accumulator for shape blocks followed by region lines.
#[derive(Debug, Default)]
struct InputBuilder {
    shapes: Vec<Vec<Vec<bool>>>,
    regions: Vec<Region>,
    in_shape: bool,
}

impl InputBuilder {
    fn feed(&mut self, line: &str) -> Result<(), anyhow::Error> {
        if line.is_empty() {
            self.in_shape = false;
            return Ok(());
        }

        if let Some(caps) = REGION_LINE.captures(line) {
            self.in_shape = false;
            let width = caps[1].parse::<usize>()?;
            let height = caps[2].parse::<usize>()?;
            let counts = caps[3]
                .split_whitespace()
                .map(|count| {
                    count
                        .parse::<usize>()
                        .map_err(|e| anyhow!("invalid count '{}': {}", count, e))
                })
                .collect::<Result<Vec<_>, _>>()?;
            if counts.len() != self.shapes.len() {
                bail!(
                    "region lists {} counts but {} shapes are defined",
                    counts.len(),
                    self.shapes.len()
                );
            }
            self.regions.push(Region::new(width, height, counts));
            return Ok(());
        }

        if let Some(caps) = SHAPE_HEADER.captures(line) {
            if !self.regions.is_empty() {
                bail!("shape header after the first region");
            }
            let index = caps[1].parse::<usize>()?;
            if index != self.shapes.len() {
                bail!("expected shape {} but found shape {}", self.shapes.len(), index);
            }
            self.shapes.push(Vec::new());
            self.in_shape = true;
            return Ok(());
        }

        match self.shapes.last_mut() {
            Some(rows) if self.in_shape && line.bytes().all(|b| b == b'#' || b == b'.') => {
                rows.push(line.bytes().map(|b| b == b'#').collect());
                Ok(())
            }
            _ => Err(anyhow!("unrecognized line '{}'", line)),
        }
    }

    fn finish(self) -> Result<SharedData, ParseError> {
        if self.regions.is_empty() {
            return Err(ParseError::MissingData("no region lines".to_string()));
        }
        let shapes: Vec<Shape> = self
            .shapes
            .iter()
            .map(|rows| Shape::from_grid(rows.as_slice()))
            .collect();
        Ok(SharedData {
            packer: Packer::new(&shapes),
            regions: self.regions,
        })
    }
}

/// Number of regions that can hold their pieces, checked in parallel.
fn count_fitting_regions(packer: &Packer, regions: &[Region]) -> Result<usize, FitError> {
    let checked = AtomicUsize::new(0);

    let fits = regions
        .par_iter()
        .enumerate()
        .map(|(index, region)| -> Result<bool, FitError> {
            let outcome = packer.search(region)?;
            debug!(
                region = index,
                width = region.width,
                height = region.height,
                pieces = region.total_pieces(),
                fits = outcome.fits(),
                nodes = outcome.nodes,
                "checked region"
            );
            if tracing::enabled!(Level::TRACE) {
                if let Some(Ok(rendered)) = outcome.packing.as_ref().map(|p| p.render()) {
                    trace!(region = index, "packing:\n{}", rendered);
                }
            }

            let done = checked.fetch_add(1, Ordering::Relaxed) + 1;
            if done % PROGRESS_EVERY == 0 {
                info!(done, total = regions.len(), "regions checked");
            }
            Ok(outcome.fits())
        })
        .collect::<Result<Vec<bool>, FitError>>()?;

    Ok(fits.into_iter().filter(|fits| *fits).count())
}

#[cfg(test)]
mod tests {
    use puzzle_solver::Solver as _;

    use super::*;

    const SAMPLE: &str = include_str!("../../../tests/fixtures/day12_sample.txt");

    /// The sample's shapes with regions that resolve quickly.
    fn quick_input() -> String {
        let shapes = SAMPLE.split("4x4").next().unwrap();
        format!("{shapes}4x4: 0 0 0 0 2 0\n3x3: 0 0 0 0 0 1\n3x3: 1 0 0 0 0 1\n")
    }

    #[test]
    fn parses_sample() {
        let shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(shared.packer().shapes().len(), 6);
        assert!(shared.packer().shapes().iter().all(|set| set.cell_count() == 7));
        assert_eq!(
            shared.regions(),
            &[
                Region::new(4, 4, vec![0, 0, 0, 0, 2, 0]),
                Region::new(12, 5, vec![1, 0, 1, 0, 2, 2]),
                Region::new(12, 5, vec![1, 0, 1, 0, 3, 2]),
            ]
        );
    }

    #[test]
    fn counts_fitting_regions() {
        let input = quick_input();
        let mut shared = Solver::parse(&input).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "2");
    }

    #[test]
    #[ignore = "the last sample region is only rejected after an exhaustive search"]
    fn solves_full_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "2");
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        let input = "\n\n0:\n  #  \n\n 2x1: 2 \n\n";
        let shared = Solver::parse(input).unwrap();
        assert_eq!(shared.regions(), &[Region::new(2, 1, vec![2])]);
    }

    #[test]
    fn ragged_rows_are_padded_with_empty_cells() {
        let shared = Solver::parse("0:\n#\n##\n\n2x2: 1").unwrap();
        assert_eq!(shared.packer().shapes()[0].cell_count(), 3);
        assert_eq!(shared.packer().shapes()[0].len(), 4);
    }

    fn invalid_format(input: &str) -> String {
        match Solver::parse(input) {
            Err(ParseError::InvalidFormat(message)) => message,
            other => panic!("expected InvalidFormat, got {other:?}"),
        }
    }

    #[test]
    fn rejects_out_of_order_shape_index() {
        let message = invalid_format("0:\n#\n\n2:\n#\n\n1x1: 1 0");
        assert!(message.contains("(line 4)"), "{message}");
        assert!(message.contains("expected shape 1"), "{message}");
    }

    #[test]
    fn rejects_count_length_mismatch() {
        let message = invalid_format("0:\n#\n\n1:\n##\n\n3x3: 1");
        assert!(message.contains("(line 7)"), "{message}");
        assert!(message.contains("1 counts but 2 shapes"), "{message}");
    }

    #[test]
    fn rejects_negative_count() {
        let message = invalid_format("0:\n#\n\n3x3: -1");
        assert!(message.contains("(line 4)"), "{message}");
    }

    #[test]
    fn rejects_unknown_cell_character() {
        let message = invalid_format("0:\n#x#\n\n3x3: 1");
        assert!(message.contains("(line 2)"), "{message}");
    }

    #[test]
    fn rejects_shape_after_regions() {
        let message = invalid_format("0:\n#\n\n1x1: 1\n\n1:\n#");
        assert!(message.contains("(line 6)"), "{message}");
    }

    #[test]
    fn requires_regions() {
        assert!(matches!(
            Solver::parse("0:\n#\n"),
            Err(ParseError::MissingData(_))
        ));
    }

    #[test]
    fn empty_shape_with_copies_fails_the_solve() {
        let mut shared = Solver::parse("0:\n...\n\n3x3: 1").unwrap();
        let err = Solver::solve_part(&mut shared, 1).unwrap_err();
        assert!(matches!(err, SolveError::SolveFailed(_)));
        assert!(err.to_string().contains("no occupied cells"), "{err}");
    }
}
