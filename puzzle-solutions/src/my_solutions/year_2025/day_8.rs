use anyhow::anyhow;
use puzzle_solver::{AutoRegisterSolver, ParseError, PartSolver, PuzzleParser, PuzzleSolver, SolveError};
use tracing::debug;

#[derive(PuzzleSolver, AutoRegisterSolver)]
#[puzzle_solver(max_parts = 2)]
#[puzzle(year = 2025, day = 8, tags = ["graph", "union-find"])]
pub struct Solver;

/// Closest pairs wired together before measuring circuits.
const CONNECTIONS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JunctionBox {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl JunctionBox {
    fn distance_squared(&self, other: &Self) -> u128 {
        [
            self.x.abs_diff(other.x),
            self.y.abs_diff(other.y),
            self.z.abs_diff(other.z),
        ]
        .into_iter()
        .map(|d| u128::from(d) * u128::from(d))
        .sum()
    }
}

#[derive(Debug)]
pub struct SharedData {
    boxes: Vec<JunctionBox>,
    /// All pairs `(i, j)` with `i < j`, closest first; built on first use
    pairs: Option<Vec<(usize, usize)>>,
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
                parse_box(line).map_err(|e| anyhow!("(line {}) {}", line_idx + 1, e))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(|boxes| SharedData { boxes, pairs: None })
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

fn parse_box(line: &str) -> Result<JunctionBox, anyhow::Error> {
    let coords = line
        .split(',')
        .map(|coord| coord.trim().parse::<i64>())
        .collect::<Result<Vec<_>, _>>()?;
    match coords[..] {
        [x, y, z] => Ok(JunctionBox { x, y, z }),
        _ => Err(anyhow!("expected 'x,y,z' but found {} coordinates", coords.len())),
    }
}

fn closest_pairs(shared: &mut SharedData) -> &[(usize, usize)] {
    shared.pairs.get_or_insert_with(|| {
        let boxes = &shared.boxes;
        let mut pairs: Vec<(u128, usize, usize)> = (0..boxes.len())
            .flat_map(|i| (i + 1..boxes.len()).map(move |j| (i, j)))
            .map(|(i, j)| (boxes[i].distance_squared(&boxes[j]), i, j))
            .collect();
        pairs.sort_unstable();
        debug!(boxes = boxes.len(), pairs = pairs.len(), "sorted junction box pairs");
        pairs.into_iter().map(|(_, i, j)| (i, j)).collect()
    })
}

/// Disjoint sets of junction boxes joined by cables.
#[derive(Debug)]
struct Circuits {
    parent: Vec<usize>,
    size: Vec<usize>,
    count: usize,
}

impl Circuits {
    fn new(boxes: usize) -> Self {
        Self {
            parent: (0..boxes).collect(),
            size: vec![1; boxes],
            count: boxes,
        }
    }

    fn find(&mut self, mut node: usize) -> usize {
        while self.parent[node] != node {
            self.parent[node] = self.parent[self.parent[node]];
            node = self.parent[node];
        }
        node
    }

    /// Returns false if both boxes were already on one circuit.
    fn connect(&mut self, a: usize, b: usize) -> bool {
        let (mut a, mut b) = (self.find(a), self.find(b));
        if a == b {
            return false;
        }
        if self.size[a] < self.size[b] {
            std::mem::swap(&mut a, &mut b);
        }
        self.parent[b] = a;
        self.size[a] += self.size[b];
        self.count -= 1;
        true
    }

    fn sizes(&mut self) -> Vec<usize> {
        let roots: Vec<usize> = (0..self.parent.len())
            .filter(|&node| self.find(node) == node)
            .collect();
        roots.into_iter().map(|root| self.size[root]).collect()
    }
}

/// Product of the three largest circuits after wiring the `connections`
/// closest pairs. Fewer than three circuits multiply what is there.
fn largest_circuits_product(shared: &mut SharedData, connections: usize) -> u64 {
    let mut circuits = Circuits::new(shared.boxes.len());
    for &(a, b) in closest_pairs(shared).iter().take(connections) {
        circuits.connect(a, b);
    }

    let mut sizes = circuits.sizes();
    sizes.sort_unstable_by(|a, b| b.cmp(a));
    sizes.iter().take(3).map(|&size| size as u64).product()
}

/// The pair whose cable first joins every box into a single circuit.
fn final_connection(shared: &mut SharedData) -> Option<(usize, usize)> {
    let mut circuits = Circuits::new(shared.boxes.len());
    closest_pairs(shared)
        .iter()
        .copied()
        .find(|&(a, b)| circuits.connect(a, b) && circuits.count == 1)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(largest_circuits_product(shared, CONNECTIONS).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (a, b) = final_connection(shared).ok_or_else(|| {
            SolveError::SolveFailed(anyhow!("at least two junction boxes are needed to connect").into())
        })?;
        Ok((shared.boxes[a].x * shared.boxes[b].x).to_string())
    }
}

#[cfg(test)]
mod tests {
    use puzzle_solver::Solver as _;

    use super::*;

    const SAMPLE: &str = "\
162,817,812
57,618,57
906,360,560
592,479,940
352,342,300
466,668,158
542,29,236
431,825,988
739,650,466
52,470,668
216,146,977
819,987,18
117,168,530
805,96,715
346,949,466
970,615,88
941,993,340
862,61,35
984,92,344
425,690,689
";

    #[test]
    fn multiplies_largest_circuits() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(largest_circuits_product(&mut shared, 10), 40);
    }

    #[test]
    fn wiring_every_pair_leaves_one_circuit() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "20");
    }

    #[test]
    fn multiplies_x_of_final_connection() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "25272");
    }

    #[test]
    fn pairs_are_sorted_by_distance() {
        let mut shared = Solver::parse("0,0,0\n10,0,0\n1,1,1\n").unwrap();
        assert_eq!(closest_pairs(&mut shared), &[(0, 2), (1, 2), (0, 1)]);
    }

    #[test]
    fn single_box_cannot_be_connected() {
        let mut shared = Solver::parse("1,2,3\n").unwrap();
        assert!(Solver::solve_part(&mut shared, 2).is_err());
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "1");
    }

    #[test]
    fn rejects_missing_coordinate() {
        let err = Solver::parse("1,2,3\n4,5\n").unwrap_err();
        assert!(err.to_string().contains("(line 2)"), "{err}");
    }
}
