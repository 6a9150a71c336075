use anyhow::{anyhow, bail};
use puzzle_solver::{AutoRegisterSolver, ParseError, PartSolver, PuzzleParser, PuzzleSolver, SolveError};

#[derive(PuzzleSolver, AutoRegisterSolver)]
#[puzzle_solver(max_parts = 2)]
#[puzzle(year = 2025, day = 7, tags = ["grid", "dynamic-programming"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    start: usize,
    /// Splitter flags per row below the start row
    rows: Vec<Vec<bool>>,
    width: usize,
    beams: Option<BeamSummary>,
}

#[derive(Debug, Clone, Copy)]
struct BeamSummary {
    splits: u64,
    timelines: u64,
}

impl PuzzleParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_manifold(input).map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

fn parse_manifold(input: &str) -> Result<SharedData, anyhow::Error> {
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(line_idx, line)| (line_idx, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (_, first) = lines.next().ok_or_else(|| anyhow!("manifold is empty"))?;
    let start = first
        .find('S')
        .ok_or_else(|| anyhow!("first row has no start 'S'"))?;
    let width = first.len();

    let rows = lines
        .map(|(line_idx, line)| {
            line.bytes()
                .map(|b| match b {
                    b'^' => Ok(true),
                    b'.' | b'S' => Ok(false),
                    _ => Err(anyhow!("(line {}) unexpected cell '{}'", line_idx + 1, b as char)),
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(row) = rows.iter().position(|row| row.len() != width) {
        bail!("row {} is not {} cells wide", row + 2, width);
    }

    Ok(SharedData {
        start,
        rows,
        width,
        beams: None,
    })
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(trace_beams(shared).splits.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(trace_beams(shared).timelines.to_string())
    }
}

/// Push the beam down row by row, tracking how many timelines reach each
/// column. Beams sharing a column merge, so a splitter counts once per row.
fn trace_beams(shared: &mut SharedData) -> BeamSummary {
    *shared.beams.get_or_insert_with(|| {
        let mut timelines = vec![0u64; shared.width];
        timelines[shared.start] = 1;
        let mut splits = 0;

        for row in &shared.rows {
            let mut next = vec![0u64; shared.width];
            for (col, &count) in timelines.iter().enumerate().filter(|(_, count)| **count > 0) {
                if row[col] {
                    splits += 1;
                    if let Some(left) = col.checked_sub(1) {
                        next[left] += count;
                    }
                    if let Some(right) = next.get_mut(col + 1) {
                        *right += count;
                    }
                } else {
                    next[col] += count;
                }
            }
            timelines = next;
        }

        BeamSummary {
            splits,
            timelines: timelines.iter().sum(),
        }
    })
}
