//! Factory machines: fewest button presses to reach a light pattern, then a
//! set of joltage counters.
//!
//! Both parts enumerate every subset of buttons once per machine. A subset
//! pressed once each toggles lights by the XOR of its buttons, which is all
//! part 1 needs. For part 2, any press vector splits into the buttons pressed
//! an odd number of times plus twice some smaller vector, so
//!
//! `presses(t) = min over subsets S matching t's parity of |S| + 2 * presses((t - S) / 2)`
//!
//! which halves the targets on every step.

use std::collections::HashMap;
use std::sync::LazyLock;

use anyhow::{anyhow, bail};
use puzzle_solver::{AutoRegisterSolver, ParseError, PartSolver, PuzzleParser, PuzzleSolver, SolveError};
use rayon::prelude::*;
use regex::Regex;
use tracing::debug;

#[derive(PuzzleSolver, AutoRegisterSolver)]
#[puzzle_solver(max_parts = 2)]
#[puzzle(year = 2025, day = 10, tags = ["linear-algebra", "dynamic-programming"])]
pub struct Solver;

static MACHINE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[([.#]*)\]((?:\s*\([\d,\s]*\))*)\s*\{([\d,\s]*)\}$").unwrap()
});
static BUTTON: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(([\d,\s]*)\)").unwrap());

/// Subsets are enumerated exhaustively, so this bounds the work per machine.
const MAX_BUTTONS: usize = 16;

/// One way of pressing a subset of buttons once each.
#[derive(Debug, Clone)]
struct Combo {
    presses: u64,
    increments: Vec<u32>,
}

#[derive(Debug)]
pub struct Machine {
    /// Lights that must end up on, bit `i` for light `i`
    lights: u64,
    joltages: Vec<u32>,
    /// Every button subset, keyed by the lights it toggles
    combos: HashMap<u64, Vec<Combo>>,
}

impl Machine {
    fn new(lights: u64, buttons: &[u64], joltages: Vec<u32>) -> Self {
        let mut combos: HashMap<u64, Vec<Combo>> = HashMap::new();
        for subset in 0u32..1 << buttons.len() {
            let mut parity = 0;
            let mut increments = vec![0; joltages.len()];
            for (_, &button) in buttons.iter().enumerate().filter(|(i, _)| subset >> i & 1 == 1) {
                parity ^= button;
                for (counter, increment) in increments.iter_mut().enumerate() {
                    *increment += (button >> counter & 1) as u32;
                }
            }
            combos.entry(parity).or_default().push(Combo {
                presses: u64::from(subset.count_ones()),
                increments,
            });
        }

        Self {
            lights,
            joltages,
            combos,
        }
    }

    fn fewest_presses_for_lights(&self) -> Option<u64> {
        self.combos.get(&self.lights)?.iter().map(|combo| combo.presses).min()
    }

    fn fewest_presses_for_joltages(&self) -> Option<u64> {
        self.fewest_presses_for(&self.joltages, &mut HashMap::new())
    }

    fn fewest_presses_for(
        &self,
        target: &[u32],
        memo: &mut HashMap<Vec<u32>, Option<u64>>,
    ) -> Option<u64> {
        if target.iter().all(|&t| t == 0) {
            return Some(0);
        }
        if let Some(&known) = memo.get(target) {
            return known;
        }

        let parity = target
            .iter()
            .enumerate()
            .filter(|(_, t)| *t % 2 == 1)
            .fold(0u64, |bits, (counter, _)| bits | 1 << counter);

        let best = self
            .combos
            .get(&parity)
            .into_iter()
            .flatten()
            .filter(|combo| combo.increments.iter().zip(target).all(|(inc, t)| inc <= t))
            .filter_map(|combo| {
                let halved: Vec<u32> = combo
                    .increments
                    .iter()
                    .zip(target)
                    .map(|(inc, t)| (t - inc) / 2)
                    .collect();
                self.fewest_presses_for(&halved, memo)
                    .map(|rest| combo.presses + 2 * rest)
            })
            .min();

        memo.insert(target.to_vec(), best);
        best
    }
}

impl PuzzleParser for Solver {
    type SharedData<'a> = Vec<Machine>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .map(|(line_idx, line)| (line_idx, line.trim()))
            .filter(|(_, line)| !line.is_empty())
            .map(|(line_idx, line)| {
                parse_machine(line).map_err(|e| anyhow!("(line {}) {}", line_idx + 1, e))
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

fn parse_numbers<T: std::str::FromStr>(list: &str) -> Result<Vec<T>, anyhow::Error>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    list.split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(|n| n.parse::<T>().map_err(anyhow::Error::from))
        .collect()
}

fn parse_machine(line: &str) -> Result<Machine, anyhow::Error> {
    let caps = MACHINE_LINE
        .captures(line)
        .ok_or_else(|| anyhow!("expected '[lights] (buttons)... {{joltages}}'"))?;

    let pattern = &caps[1];
    if pattern.len() > 64 {
        bail!("{} lights is more than 64", pattern.len());
    }
    let lights = pattern
        .bytes()
        .enumerate()
        .filter(|(_, b)| *b == b'#')
        .fold(0u64, |bits, (light, _)| bits | 1 << light);

    let joltages = parse_numbers::<u32>(&caps[3])?;
    if joltages.len() != pattern.len() {
        bail!("{} joltages for {} lights", joltages.len(), pattern.len());
    }

    let buttons = BUTTON
        .captures_iter(&caps[2])
        .map(|button| {
            parse_numbers::<usize>(&button[1])?
                .into_iter()
                .try_fold(0u64, |bits, light| {
                    if light >= pattern.len() {
                        bail!("button wires light {} but there are {}", light, pattern.len());
                    }
                    Ok(bits | 1 << light)
                })
        })
        .collect::<Result<Vec<_>, anyhow::Error>>()?;
    if buttons.len() > MAX_BUTTONS {
        bail!("{} buttons is more than {}", buttons.len(), MAX_BUTTONS);
    }

    Ok(Machine::new(lights, &buttons, joltages))
}

fn total_presses(
    machines: &[Machine],
    fewest: impl Fn(&Machine) -> Option<u64> + Sync,
) -> Result<u64, SolveError> {
    machines
        .par_iter()
        .enumerate()
        .map(|(index, machine)| -> Result<u64, SolveError> {
            let presses = fewest(machine).ok_or_else(|| {
                SolveError::SolveFailed(anyhow!("machine {} cannot be configured", index + 1).into())
            })?;
            debug!(machine = index + 1, presses, "configured machine");
            Ok(presses)
        })
        .sum()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        total_presses(shared, Machine::fewest_presses_for_lights).map(|total| total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        total_presses(shared, Machine::fewest_presses_for_joltages).map(|total| total.to_string())
    }
}

#[cfg(test)]
mod tests {
    use puzzle_solver::Solver as _;

    use super::*;

    const SAMPLE: &str = "\
[.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}
[...#.] (0,2,3,4) (2,3) (0,4) (0,1,2) (1,2,3,4) {7,5,12,7,2}
[.###.#] (0,1,2,3,4) (0,3,4) (0,1,2,4,5) (1,2) {10,11,11,5,10,5}
";

    #[test]
    fn fewest_presses_for_lights() {
        let mut machines = Solver::parse(SAMPLE).unwrap();
        let per_machine: Vec<_> = machines.iter().map(Machine::fewest_presses_for_lights).collect();
        assert_eq!(per_machine, vec![Some(2), Some(3), Some(2)]);
        assert_eq!(Solver::solve_part(&mut machines, 1).unwrap(), "7");
    }

    #[test]
    fn fewest_presses_for_joltages() {
        let mut machines = Solver::parse(SAMPLE).unwrap();
        let per_machine: Vec<_> = machines
            .iter()
            .map(Machine::fewest_presses_for_joltages)
            .collect();
        assert_eq!(per_machine, vec![Some(10), Some(12), Some(11)]);
        assert_eq!(Solver::solve_part(&mut machines, 2).unwrap(), "33");
    }

    #[test]
    fn unreachable_pattern_fails_the_solve() {
        let mut machines = Solver::parse("[##] (0) {1,1}").unwrap();
        let err = Solver::solve_part(&mut machines, 1).unwrap_err();
        assert!(err.to_string().contains("machine 1"), "{err}");
        assert!(Solver::solve_part(&mut machines, 2).is_err());
    }

    #[test]
    fn all_off_needs_no_presses() {
        let mut machines = Solver::parse("[..] (0,1) {0,0}").unwrap();
        assert_eq!(Solver::solve_part(&mut machines, 1).unwrap(), "0");
        assert_eq!(Solver::solve_part(&mut machines, 2).unwrap(), "0");
    }

    #[test]
    fn rejects_button_outside_the_panel() {
        let err = Solver::parse("[#.] (0) (2) {1,0}").unwrap_err();
        assert!(err.to_string().contains("wires light 2"), "{err}");
    }

    #[test]
    fn rejects_joltage_count_mismatch() {
        let err = Solver::parse("[#.] (0) {1}").unwrap_err();
        assert!(err.to_string().contains("1 joltages for 2 lights"), "{err}");
    }

    #[test]
    fn rejects_malformed_line() {
        let err = Solver::parse("[#.] (0) {1,0}\n(0) {1}\n").unwrap_err();
        assert!(err.to_string().contains("(line 2)"), "{err}");
    }
}
