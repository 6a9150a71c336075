use std::collections::HashMap;

use anyhow::anyhow;
use puzzle_solver::{AutoRegisterSolver, ParseError, PartSolver, PuzzleParser, PuzzleSolver, SolveError};
use thiserror::Error;

#[derive(PuzzleSolver, AutoRegisterSolver)]
#[puzzle_solver(max_parts = 2)]
#[puzzle(year = 2025, day = 11, tags = ["graph", "memoization"])]
pub struct Solver;

const OUTPUT: &str = "out";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("no device named '{0}'")]
    UnknownDevice(String),

    #[error("devices loop back through '{0}'")]
    Cycle(String),
}

/// Device wiring, with names borrowed from the input.
#[derive(Debug)]
pub struct Wiring<'a> {
    names: Vec<&'a str>,
    index: HashMap<&'a str, usize>,
    outputs: Vec<Vec<usize>>,
}

impl<'a> Wiring<'a> {
    fn device(&mut self, name: &'a str) -> usize {
        *self.index.entry(name).or_insert_with(|| {
            self.names.push(name);
            self.outputs.push(Vec::new());
            self.names.len() - 1
        })
    }

    fn lookup(&self, name: &str) -> Result<usize, PathError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| PathError::UnknownDevice(name.to_string()))
    }

    /// Paths from `from` to the output that pass every device in `via`.
    pub fn count_paths(&self, from: &str, via: &[&str]) -> Result<u64, PathError> {
        let start = self.lookup(from)?;
        let target = self.lookup(OUTPUT)?;
        let via = via
            .iter()
            .map(|name| self.lookup(name))
            .collect::<Result<Vec<_>, _>>()?;

        let mut counter = PathCounter {
            wiring: self,
            target,
            via: &via,
            states: 1 << via.len(),
            memo: HashMap::new(),
        };
        counter.count(start, 0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    InProgress,
    Done(u64),
}

/// Memoized depth-first count over (device, required devices seen so far).
struct PathCounter<'w, 'a> {
    wiring: &'w Wiring<'a>,
    target: usize,
    via: &'w [usize],
    states: usize,
    memo: HashMap<usize, Visit>,
}

impl PathCounter<'_, '_> {
    fn count(&mut self, device: usize, seen: usize) -> Result<u64, PathError> {
        let seen = self
            .via
            .iter()
            .enumerate()
            .filter(|(_, required)| **required == device)
            .fold(seen, |seen, (bit, _)| seen | 1 << bit);
        if device == self.target {
            return Ok(u64::from(seen == self.states - 1));
        }

        let key = device * self.states + seen;
        match self.memo.get(&key) {
            Some(Visit::Done(paths)) => return Ok(*paths),
            Some(Visit::InProgress) => {
                return Err(PathError::Cycle(self.wiring.names[device].to_string()));
            }
            None => {}
        }

        self.memo.insert(key, Visit::InProgress);
        let mut paths = 0;
        for &next in &self.wiring.outputs[device] {
            paths += self.count(next, seen)?;
        }
        self.memo.insert(key, Visit::Done(paths));
        Ok(paths)
    }
}

impl PuzzleParser for Solver {
    type SharedData<'a> = Wiring<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut wiring = Wiring {
            names: Vec::new(),
            index: HashMap::new(),
            outputs: Vec::new(),
        };

        input
            .lines()
            .enumerate()
            .map(|(line_idx, line)| (line_idx, line.trim()))
            .filter(|(_, line)| !line.is_empty())
            .try_for_each(|(line_idx, line)| -> Result<(), anyhow::Error> {
                let (name, outputs) = line
                    .split_once(':')
                    .ok_or_else(|| anyhow!("(line {}) expected 'device: outputs...'", line_idx + 1))?;
                let name = name.trim();
                if name.is_empty() || name.contains(char::is_whitespace) {
                    return Err(anyhow!("(line {}) invalid device name '{}'", line_idx + 1, name));
                }
                let device = wiring.device(name);
                for output in outputs.split_whitespace() {
                    let output = wiring.device(output);
                    wiring.outputs[device].push(output);
                }
                Ok(())
            })
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;

        Ok(wiring)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .count_paths("you", &[])
            .map(|paths| paths.to_string())
            .map_err(|e| SolveError::SolveFailed(Box::new(e)))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .count_paths("svr", &["dac", "fft"])
            .map(|paths| paths.to_string())
            .map_err(|e| SolveError::SolveFailed(Box::new(e)))
    }
}
