use anyhow::anyhow;
use puzzle_solver::{AutoRegisterSolver, ParseError, PartSolver, PuzzleParser, PuzzleSolver, SolveError};

#[derive(PuzzleSolver, AutoRegisterSolver)]
#[puzzle_solver(max_parts = 2)]
#[puzzle(year = 2025, day = 1, tags = ["simulation", "modular"])]
pub struct Solver;

const DIAL_SIZE: u64 = 100;
const START_POSITION: u64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Left(u32),
    Right(u32),
}

impl Rotation {
    fn parse(line: &str) -> Result<Self, anyhow::Error> {
        let (direction, distance) = line
            .split_at_checked(1)
            .ok_or_else(|| anyhow!("missing rotation direction"))?;
        let distance = distance
            .parse::<u32>()
            .map_err(|e| anyhow!("invalid distance '{}': {}", distance, e))?;
        match direction {
            "L" => Ok(Self::Left(distance)),
            "R" => Ok(Self::Right(distance)),
            _ => Err(anyhow!("first character needs to be 'L' or 'R'")),
        }
    }

    fn apply(self, position: u64) -> u64 {
        match self {
            Self::Left(distance) => {
                (position + DIAL_SIZE - u64::from(distance) % DIAL_SIZE) % DIAL_SIZE
            }
            Self::Right(distance) => (position + u64::from(distance)) % DIAL_SIZE,
        }
    }

    /// Clicks of this rotation that land on zero, the last click included.
    fn zeros_passed(self, position: u64) -> u64 {
        match self {
            Self::Right(distance) => (position + u64::from(distance)) / DIAL_SIZE,
            Self::Left(distance) => {
                let distance = u64::from(distance);
                if position == 0 {
                    distance / DIAL_SIZE
                } else if position <= distance {
                    (distance - position) / DIAL_SIZE + 1
                } else {
                    0
                }
            }
        }
    }
}

#[derive(Debug)]
pub struct SharedData {
    rotations: Vec<Rotation>,
    tally: Option<Tally>,
}

#[derive(Debug, Clone, Copy)]
struct Tally {
    rests_on_zero: u64,
    clicks_on_zero: u64,
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
                Rotation::parse(line).map_err(|e| anyhow!("(line {}) {}", line_idx + 1, e))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(|rotations| SharedData {
                rotations,
                tally: None,
            })
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(tally(shared).rests_on_zero.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(tally(shared).clicks_on_zero.to_string())
    }
}

fn tally(shared: &mut SharedData) -> Tally {
    *shared.tally.get_or_insert_with(|| {
        let (_, tally) = shared.rotations.iter().fold(
            (
                START_POSITION,
                Tally {
                    rests_on_zero: 0,
                    clicks_on_zero: 0,
                },
            ),
            |(position, mut tally), rotation| {
                tally.clicks_on_zero += rotation.zeros_passed(position);
                let position = rotation.apply(position);
                if position == 0 {
                    tally.rests_on_zero += 1;
                }
                (position, tally)
            },
        );
        tally
    })
}

#[cfg(test)]
mod tests {
    use puzzle_solver::Solver as _;

    use super::*;

    const SAMPLE: &str = "L68\nL30\nR48\nL5\nR60\nL55\nL1\nL99\nR14\nL82\n";

    #[test]
    fn counts_rests_on_zero() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "3");
    }

    #[test]
    fn counts_every_click_on_zero() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "6");
    }

    #[test]
    fn long_rotation_wraps_many_times() {
        assert_eq!(Rotation::Right(1000).zeros_passed(50), 10);
        assert_eq!(Rotation::Left(1000).zeros_passed(0), 10);
        assert_eq!(Rotation::Left(250).zeros_passed(50), 3);
        assert_eq!(Rotation::Left(250).apply(50), 0);
    }

    #[test]
    fn starting_on_zero_is_not_a_click() {
        assert_eq!(Rotation::Left(5).zeros_passed(0), 0);
        assert_eq!(Rotation::Right(5).zeros_passed(0), 0);
    }

    #[test]
    fn rejects_unknown_direction() {
        let err = Solver::parse("L1\nU2\n").unwrap_err();
        assert!(err.to_string().contains("(line 2)"), "{err}");
    }

    #[test]
    fn rejects_missing_distance() {
        assert!(matches!(
            Solver::parse("R"),
            Err(ParseError::InvalidFormat(_))
        ));
    }
}
