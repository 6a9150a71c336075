use std::collections::HashSet;
use std::ops::RangeInclusive;

use anyhow::anyhow;
use puzzle_solver::{AutoRegisterSolver, ParseError, PartSolver, PuzzleParser, PuzzleSolver, SolveError};

#[derive(PuzzleSolver, AutoRegisterSolver)]
#[puzzle_solver(max_parts = 2)]
#[puzzle(year = 2025, day = 2, tags = ["number-theory", "enumeration"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    ranges: Vec<RangeInclusive<u64>>,
}

impl PuzzleParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .split(',')
            .map(str::trim)
            .filter(|range| !range.is_empty())
            .enumerate()
            .map(|(range_idx, range)| {
                parse_range(range).map_err(|e| anyhow!("(range {}) {}", range_idx + 1, e))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(|ranges| SharedData { ranges })
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

fn parse_range(range: &str) -> Result<RangeInclusive<u64>, anyhow::Error> {
    let (start, end) = range
        .split_once('-')
        .ok_or_else(|| anyhow!("expected 'start-end', found '{}'", range))?;
    Ok(start.trim().parse::<u64>()?..=end.trim().parse::<u64>()?)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(sum_repeated_ids(&shared.ranges, |repeats| repeats == 2).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(sum_repeated_ids(&shared.ranges, |repeats| repeats >= 2).to_string())
    }
}

fn sum_repeated_ids(ranges: &[RangeInclusive<u64>], accept: impl Fn(u32) -> bool) -> u64 {
    ranges
        .iter()
        .map(|range| repeated_ids(range, &accept).into_iter().sum::<u64>())
        .sum()
}

/// Ids in `range` made of one digit block written `repeats` times, for every
/// repeat count `accept` allows.
///
/// Candidates are generated from the block instead of scanning the range:
/// a block `b` of width `w` repeated `r` times is `b * (1 + 10^w + ... + 10^(w(r-1)))`.
fn repeated_ids(range: &RangeInclusive<u64>, accept: impl Fn(u32) -> bool) -> HashSet<u64> {
    let (start, end) = (*range.start(), *range.end());
    let mut ids = HashSet::new();
    if start > end {
        return ids;
    }

    for digits in digit_count(start)..=digit_count(end) {
        for width in (1..=digits / 2).filter(|width| digits % width == 0) {
            let repeats = digits / width;
            if !accept(repeats) {
                continue;
            }
            let multiplier: u64 = (0..repeats).map(|k| 10u64.pow(width * k)).sum();
            let lowest = 10u64.pow(width - 1).max(start.div_ceil(multiplier));
            let highest = (10u64.pow(width) - 1).min(end / multiplier);
            ids.extend((lowest..=highest).map(|block| block * multiplier));
        }
    }
    ids
}

fn digit_count(n: u64) -> u32 {
    n.checked_ilog10().map_or(1, |log| log + 1)
}

#[cfg(test)]
mod tests {
    use puzzle_solver::Solver as _;

    use super::*;

    const SAMPLE: &str = "11-22,95-115,998-1012,1188511880-1188511890,222220-222224,\
        1698522-1698528,446443-446449,38593856-38593862,565653-565659,\
        824824821-824824827,2121212118-2121212124";

    #[test]
    fn sums_ids_repeated_twice() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "1227775554");
    }

    #[test]
    fn sums_ids_repeated_any_number_of_times() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "4174379265");
    }

    #[test]
    fn ids_with_several_block_widths_count_once() {
        let ids = repeated_ids(&(222222..=222222), |repeats| repeats >= 2);
        assert_eq!(ids, HashSet::from([222222]));
    }

    #[test]
    fn generated_ids_match_a_scan() {
        let range = 1..=12_000;
        let scanned: HashSet<u64> = range
            .clone()
            .filter(|n| {
                let s = n.to_string();
                (1..=s.len() / 2).any(|w| s.len() % w == 0 && s[..w].repeat(s.len() / w) == s)
            })
            .collect();
        assert_eq!(repeated_ids(&range, |repeats| repeats >= 2), scanned);
    }

    #[test]
    fn reversed_range_is_empty() {
        assert!(repeated_ids(&(22..=11), |_| true).is_empty());
    }

    #[test]
    fn rejects_range_without_dash() {
        let err = Solver::parse("11-22,95").unwrap_err();
        assert!(err.to_string().contains("(range 2)"), "{err}");
    }
}
