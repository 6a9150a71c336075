//! Cephalopod math worksheet: problems laid out side by side in columns.
//!
//! Every problem occupies a run of columns bounded by all-blank columns. The
//! last row holds each problem's operator. Part 1 reads the operands across
//! the rows; part 2 reads them down the columns, one operand per column.

use std::ops::Range;

use anyhow::{anyhow, bail};
use puzzle_solver::{AutoRegisterSolver, ParseError, PartSolver, PuzzleParser, PuzzleSolver, SolveError};

#[derive(PuzzleSolver, AutoRegisterSolver)]
#[puzzle_solver(max_parts = 2)]
#[puzzle(year = 2025, day = 6, tags = ["parsing", "columns"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Multiply,
}

impl Operator {
    fn apply(self, operands: impl Iterator<Item = u64>) -> u64 {
        match self {
            Self::Add => operands.sum(),
            Self::Multiply => operands.product(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    columns: Range<usize>,
    operator: Operator,
}

/// Operand rows borrowed from the input, plus the problems found in them.
#[derive(Debug)]
pub struct Worksheet<'a> {
    rows: Vec<&'a [u8]>,
    problems: Vec<Problem>,
}

impl Worksheet<'_> {
    /// Short rows read as blank past their end.
    fn cell(&self, row: usize, col: usize) -> u8 {
        self.rows[row].get(col).copied().unwrap_or(b' ')
    }

    fn digits_to_number(digits: impl Iterator<Item = u8>) -> Option<u64> {
        digits
            .filter(u8::is_ascii_digit)
            .fold(None, |acc, d| Some(acc.unwrap_or(0) * 10 + u64::from(d - b'0')))
    }

    fn row_operands<'s>(&'s self, problem: &'s Problem) -> impl Iterator<Item = u64> + 's {
        (0..self.rows.len()).filter_map(move |row| {
            Self::digits_to_number(problem.columns.clone().map(|col| self.cell(row, col)))
        })
    }

    fn column_operands<'s>(&'s self, problem: &'s Problem) -> impl Iterator<Item = u64> + 's {
        problem.columns.clone().filter_map(move |col| {
            Self::digits_to_number((0..self.rows.len()).map(|row| self.cell(row, col)))
        })
    }

    fn grand_total<'s, I>(&'s self, operands: impl Fn(&'s Problem) -> I) -> u64
    where
        I: Iterator<Item = u64>,
    {
        self.problems
            .iter()
            .map(|problem| problem.operator.apply(operands(problem)))
            .sum()
    }
}

impl PuzzleParser for Solver {
    type SharedData<'a> = Worksheet<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_worksheet(input).map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

fn parse_worksheet(input: &str) -> Result<Worksheet<'_>, anyhow::Error> {
    let mut lines: Vec<&[u8]> = input
        .lines()
        .map(|line| line.trim_end_matches('\r').as_bytes())
        .collect();
    while lines.last().is_some_and(|line| line.iter().all(|b| *b == b' ')) {
        lines.pop();
    }
    let Some(operator_row) = lines.pop() else {
        bail!("worksheet is empty");
    };

    for (row_idx, row) in lines.iter().enumerate() {
        if let Some(b) = row.iter().find(|b| !b.is_ascii_digit() && **b != b' ') {
            bail!("(line {}) unexpected character '{}'", row_idx + 1, *b as char);
        }
    }

    let width = lines
        .iter()
        .map(|row| row.len())
        .chain(std::iter::once(operator_row.len()))
        .max()
        .unwrap_or(0);
    let blank = |col: usize| {
        lines
            .iter()
            .chain(std::iter::once(&operator_row))
            .all(|row| row.get(col).is_none_or(|b| *b == b' '))
    };

    let mut problems = Vec::new();
    let mut col = 0;
    while col < width {
        if blank(col) {
            col += 1;
            continue;
        }
        let start = col;
        while col < width && !blank(col) {
            col += 1;
        }
        let columns = start..col;
        problems.push(Problem {
            operator: problem_operator(operator_row, columns.clone())
                .map_err(|e| anyhow!("(line {}) {}", lines.len() + 1, e))?,
            columns,
        });
    }

    Ok(Worksheet {
        rows: lines,
        problems,
    })
}

fn problem_operator(operator_row: &[u8], columns: Range<usize>) -> Result<Operator, anyhow::Error> {
    let mut operators = columns
        .clone()
        .filter_map(|col| operator_row.get(col))
        .filter(|b| **b != b' ');
    let operator = match operators.next() {
        Some(b'+') => Operator::Add,
        Some(b'*') => Operator::Multiply,
        Some(other) => bail!("unknown operator '{}'", *other as char),
        None => bail!("no operator under columns {}..{}", columns.start + 1, columns.end),
    };
    if operators.next().is_some() {
        bail!("more than one operator under columns {}..{}", columns.start + 1, columns.end);
    }
    Ok(operator)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sheet = &*shared;
        Ok(sheet.grand_total(|problem| sheet.row_operands(problem)).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sheet = &*shared;
        Ok(sheet.grand_total(|problem| sheet.column_operands(problem)).to_string())
    }
}

#[cfg(test)]
mod tests {
    use puzzle_solver::Solver as _;

    use super::*;

    const SAMPLE: &str = concat!(
        "123 328  51 64 \n",
        " 45 64  387 23 \n",
        "  6 98  215 314\n",
        "*   +   *   +  \n",
    );

    #[test]
    fn finds_problems_between_blank_columns() {
        let sheet = Solver::parse(SAMPLE).unwrap();
        assert_eq!(
            sheet.problems,
            vec![
                Problem { columns: 0..3, operator: Operator::Multiply },
                Problem { columns: 4..7, operator: Operator::Add },
                Problem { columns: 8..11, operator: Operator::Multiply },
                Problem { columns: 12..15, operator: Operator::Add },
            ]
        );
    }

    #[test]
    fn reads_operands_across_rows() {
        let mut sheet = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut sheet, 1).unwrap(), "4277556");
    }

    #[test]
    fn reads_operands_down_columns() {
        let mut sheet = Solver::parse(SAMPLE).unwrap();
        let first: Vec<u64> = sheet.column_operands(&sheet.problems[0]).collect();
        assert_eq!(first, vec![1, 24, 356]);
        assert_eq!(Solver::solve_part(&mut sheet, 2).unwrap(), "3263827");
    }

    #[test]
    fn short_rows_read_as_blank() {
        let mut sheet = Solver::parse("12\n3\n+ \n").unwrap();
        assert_eq!(Solver::solve_part(&mut sheet, 1).unwrap(), "15");
        assert_eq!(Solver::solve_part(&mut sheet, 2).unwrap(), "15");
    }

    #[test]
    fn rejects_problem_without_operator() {
        let err = Solver::parse("1 2\n+  \n").unwrap_err();
        assert!(err.to_string().contains("no operator"), "{err}");
    }

    #[test]
    fn rejects_unknown_operator() {
        let err = Solver::parse("1\n-\n").unwrap_err();
        assert!(err.to_string().contains("(line 2)"), "{err}");
    }

    #[test]
    fn rejects_empty_worksheet() {
        assert!(Solver::parse("\n  \n").is_err());
    }
}
