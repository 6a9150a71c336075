use anyhow::anyhow;
use puzzle_solver::{AutoRegisterSolver, ParseError, PartSolver, PuzzleParser, PuzzleSolver, SolveError};

#[derive(PuzzleSolver, AutoRegisterSolver)]
#[puzzle_solver(max_parts = 2)]
#[puzzle(year = 2025, day = 5, tags = ["intervals"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    /// Fresh id ranges, sorted and merged so no two overlap or touch
    fresh: Vec<(u64, u64)>,
    available: Vec<u64>,
}

impl SharedData {
    fn is_fresh(&self, id: u64) -> bool {
        let after = self.fresh.partition_point(|&(start, _)| start <= id);
        after > 0 && id <= self.fresh[after - 1].1
    }
}

impl PuzzleParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut ranges = Vec::new();
        let mut available = Vec::new();
        let mut in_ranges = true;

        input
            .lines()
            .enumerate()
            .try_for_each(|(line_idx, line)| -> Result<(), anyhow::Error> {
                let line = line.trim();
                if line.is_empty() {
                    in_ranges = in_ranges && ranges.is_empty();
                    return Ok(());
                }
                let annotate = |e: anyhow::Error| anyhow!("(line {}) {}", line_idx + 1, e);
                if in_ranges {
                    let (start, end) = line
                        .split_once('-')
                        .ok_or_else(|| annotate(anyhow!("expected a range 'start-end'")))?;
                    let start = start.parse::<u64>().map_err(|e| annotate(e.into()))?;
                    let end = end.parse::<u64>().map_err(|e| annotate(e.into()))?;
                    if start <= end {
                        ranges.push((start, end));
                    }
                } else {
                    available.push(line.parse::<u64>().map_err(|e| annotate(e.into()))?);
                }
                Ok(())
            })
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;

        Ok(SharedData {
            fresh: merge(ranges),
            available,
        })
    }
}

fn merge(mut ranges: Vec<(u64, u64)>) -> Vec<(u64, u64)> {
    ranges.sort_unstable();
    let mut merged: Vec<(u64, u64)> = Vec::with_capacity(ranges.len());
    for (start, end) in ranges {
        match merged.last_mut() {
            Some(last) if start <= last.1.saturating_add(1) => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .available
            .iter()
            .filter(|&&id| shared.is_fresh(id))
            .count()
            .to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u128 = shared
            .fresh
            .iter()
            .map(|&(start, end)| u128::from(end - start) + 1)
            .sum();
        Ok(total.to_string())
    }
}
