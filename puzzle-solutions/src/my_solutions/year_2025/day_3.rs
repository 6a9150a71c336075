use anyhow::anyhow;
use puzzle_solver::{AutoRegisterSolver, ParseError, PartSolver, PuzzleParser, PuzzleSolver, SolveError};

#[derive(PuzzleSolver, AutoRegisterSolver)]
#[puzzle_solver(max_parts = 2)]
#[puzzle(year = 2025, day = 3, tags = ["greedy"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    /// Battery ratings per bank, one digit each
    banks: Vec<Vec<u8>>,
}

impl PuzzleParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .map(|(line_idx, line)| (line_idx, line.trim()))
            .filter(|(_, line)| !line.is_empty())
            .map(|(line_idx, line)| {
                line.bytes()
                    .map(|b| match b {
                        b'0'..=b'9' => Ok(b - b'0'),
                        _ => Err(anyhow!("(line {}) '{}' is not a digit", line_idx + 1, b as char)),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()
            .map(|banks| SharedData { banks })
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(total_joltage(&shared.banks, 2).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(total_joltage(&shared.banks, 12).to_string())
    }
}

/// Banks shorter than `batteries` contribute nothing.
fn total_joltage(banks: &[Vec<u8>], batteries: usize) -> u64 {
    banks
        .iter()
        .filter_map(|bank| max_joltage(bank, batteries))
        .sum()
}

/// Largest number formed by `batteries` digits of `bank`, kept in order.
///
/// Each digit is the largest one that still leaves enough digits after it;
/// ties go to the leftmost so later picks have the most room.
fn max_joltage(bank: &[u8], batteries: usize) -> Option<u64> {
    if bank.len() < batteries {
        return None;
    }

    let mut joltage = 0u64;
    let mut from = 0;
    for picked in 0..batteries {
        let window = &bank[from..bank.len() - (batteries - picked - 1)];
        let (offset, digit) = window
            .iter()
            .enumerate()
            .rev()
            .max_by_key(|(_, digit)| **digit)?;
        joltage = joltage * 10 + u64::from(*digit);
        from += offset + 1;
    }
    Some(joltage)
}

#[cfg(test)]
mod tests {
    use puzzle_solver::Solver as _;

    use super::*;

    const SAMPLE: &str = "987654321111111\n811111111111119\n234234234234278\n818181911112111\n";

    #[test]
    fn two_batteries_per_bank() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "357");
    }

    #[test]
    fn twelve_batteries_per_bank() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "3121910778619");
    }

    #[test]
    fn picks_leftmost_of_equal_digits() {
        assert_eq!(max_joltage(&[9, 1, 9, 9], 3), Some(999));
        assert_eq!(max_joltage(&[8, 1, 1, 9], 2), Some(89));
        assert_eq!(max_joltage(&[1, 2], 2), Some(12));
    }

    #[test]
    fn short_banks_are_skipped() {
        assert_eq!(max_joltage(&[5], 2), None);
        assert_eq!(total_joltage(&[vec![5], vec![4, 2]], 2), 42);
    }

    #[test]
    fn rejects_non_digit() {
        let err = Solver::parse("12\n1a\n").unwrap_err();
        assert!(err.to_string().contains("(line 2)"), "{err}");
    }
}
