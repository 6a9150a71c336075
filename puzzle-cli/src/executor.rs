//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use crate::inputs::InputStore;
use chrono::{TimeDelta, Utc};
use itertools::Itertools;
use puzzle_solver::{DynSolver, ParseError, SolverError, SolverRegistry};
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;
use tracing::{debug, warn};

/// Result from a single solver execution
#[derive(Debug)]
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, SolverError>,
    pub solve_duration: TimeDelta,
    /// Time spent parsing the input; None when no solver instance was created
    pub parse_duration: Option<TimeDelta>,
}

/// Work item representing a solver to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Parallel executor for running solvers
pub struct Executor {
    sync_executor_config: SyncExecutorConfig,
    thread_pool: rayon::ThreadPool,
}

/// Everything a worker thread reads while running solvers
pub struct SyncExecutorConfig {
    registry: SolverRegistry,
    inputs: InputStore,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            sync_executor_config: SyncExecutorConfig {
                registry,
                inputs: InputStore::new(config.input_dir.clone())
                    .with_explicit(config.explicit_input.clone()),
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    /// Input store used to look up puzzle inputs
    pub fn inputs(&self) -> &InputStore {
        &self.sync_executor_config.inputs
    }

    /// Collect work items by filtering from registry metadata
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let cfg = &self.sync_executor_config;
        cfg.registry
            .iter_info()
            .filter(|info| cfg.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| cfg.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: self.filter_parts(info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Filter parts based on config.part_filter and solver's max parts
    #[allow(clippy::reversed_empty_ranges)]
    fn filter_parts(&self, max_parts: u8) -> RangeInclusive<u8> {
        match self.sync_executor_config.part_filter {
            Some(p) if p <= max_parts => p..=p,
            Some(_) => 1..=0,
            None => 1..=max_parts,
        }
    }

    /// Execute all work items and send results to channel
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();

        match self.sync_executor_config.parallelize_by {
            ParallelizeBy::Sequential => {
                let mut collected_error: Option<ArcExecutorError> = None;
                for work in work_items {
                    if let Err(e) = self.run_solver(&work, &tx) {
                        collected_error = Some(ArcExecutorError::combine_opt(collected_error, e));
                    }
                }
                collected_error.map_or(Ok(()), Err)
            }
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();

                self.execute_parallel_grouped(by_year, &tx)
            }
            // Part differs from Day only inside run_solver_parallel
            ParallelizeBy::Day | ParallelizeBy::Part => self.execute_parallel(work_items, &tx),
        }
    }

    /// Execute work items in parallel, collecting errors
    fn execute_parallel(
        &self,
        work_items: Vec<WorkItem>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let sync_executor_config = &self.sync_executor_config;

        self.thread_pool.install(|| {
            work_items
                .into_par_iter()
                .map(|work| run_solver_parallel(&work, tx, sync_executor_config).err())
                .reduce_with(merge_errors)
                .flatten()
                .map_or(Ok(()), Err)
        })
    }

    /// Execute grouped work items in parallel (for year-level parallelism)
    fn execute_parallel_grouped(
        &self,
        groups: Vec<Vec<WorkItem>>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let sync_executor_config = &self.sync_executor_config;

        self.thread_pool.install(|| {
            groups
                .into_par_iter()
                .map(|items| {
                    let mut err = None;
                    for work in items {
                        if let Err(e) = run_solver_parallel(&work, tx, sync_executor_config) {
                            err = Some(ArcExecutorError::combine_opt(err, e))
                        }
                    }
                    err
                })
                .reduce_with(merge_errors)
                .flatten()
                .map_or(Ok(()), Err)
        })
    }

    /// Run a single solver for specified parts (used for sequential mode)
    fn run_solver(
        &self,
        work: &WorkItem,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        run_solver_parallel(work, tx, &self.sync_executor_config)
    }
}

fn merge_errors(
    first: Option<ArcExecutorError>,
    second: Option<ArcExecutorError>,
) -> Option<ArcExecutorError> {
    match (first, second) {
        (Some(first), Some(second)) => Some(ArcExecutorError::combine(first, second)),
        (first, second) => first.or(second),
    }
}

/// Result for a part that never reached its solver
fn failed_result(year: u16, day: u8, part: u8, error: SolverError) -> SolverResult {
    SolverResult {
        year,
        day,
        part,
        answer: Err(error),
        solve_duration: TimeDelta::zero(),
        parse_duration: None,
    }
}

/// Rebuild a solver creation error so every affected part can report it
fn creation_error(error: &SolverError) -> SolverError {
    match error {
        SolverError::NotFound(year, day) => SolverError::NotFound(*year, *day),
        SolverError::InvalidYearDay(year, day) => SolverError::InvalidYearDay(*year, *day),
        SolverError::ParseError(e) => SolverError::ParseError(e.clone()),
        SolverError::SolveError(e) => SolverError::ParseError(ParseError::Other(e.to_string())),
    }
}

fn send_result(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ExecutorError::ChannelSend.into())
}

/// Free function for parallel solver execution
fn run_solver_parallel(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    sync_executor_config: &SyncExecutorConfig,
) -> Result<(), ArcExecutorError> {
    let input = match get_input(work, &sync_executor_config.inputs) {
        Ok(input) => input,
        Err(e) => {
            warn!(year = work.year, day = work.day, "{}", e);
            let error_msg = e.to_string();
            for part in work.parts.clone() {
                let error = SolverError::ParseError(ParseError::MissingData(error_msg.clone()));
                send_result(tx, failed_result(work.year, work.day, part, error))?;
            }
            return Ok(());
        }
    };

    if matches!(sync_executor_config.parallelize_by, ParallelizeBy::Part) {
        run_solver_parts_parallel(work, &input, tx, &sync_executor_config.registry)
    } else {
        run_solver_sequential(work, &input, tx, &sync_executor_config.registry)
    }
}

/// Run solver with part-level parallelism, buffering results to emit in order
///
/// Each part gets its own solver instance, so parts never share parsed state.
fn run_solver_parts_parallel(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let (result_tx, result_rx) = std::sync::mpsc::channel();
    let (year, day) = (work.year, work.day);

    work.parts
        .clone()
        .into_par_iter()
        .for_each_with(result_tx, |rtx, part| {
            let result = match registry.create_solver(year, day, input) {
                Ok(mut solver) => solve_part_internal(year, day, part, &mut *solver),
                Err(e) => failed_result(year, day, part, e),
            };
            rtx.send(result).ok();
        });

    // Buffer and emit results in part order
    let mut buffer: [Option<SolverResult>; 2] = [None, None];
    let start_part = *work.parts.start();
    let mut next_part = start_part;

    for result in result_rx {
        let idx = (result.part - start_part) as usize;
        if idx < buffer.len() {
            buffer[idx] = Some(result);
        }
        while let Some(result) = buffer
            .get_mut((next_part - start_part) as usize)
            .and_then(Option::take)
        {
            send_result(tx, result)?;
            next_part += 1;
        }
    }
    Ok(())
}

/// Run all parts of one solver on a single parsed instance
fn run_solver_sequential(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);
    match registry.create_solver(year, day, input) {
        Ok(mut solver) => {
            debug!(year, day, parse = ?solver.parse_duration(), "input parsed");
            for part in work.parts.clone() {
                send_result(tx, solve_part_internal(year, day, part, &mut *solver))?;
            }
        }
        Err(e) => {
            warn!(year, day, "{}", e);
            for part in work.parts.clone() {
                send_result(tx, failed_result(year, day, part, creation_error(&e)))?;
            }
        }
    }
    Ok(())
}

/// Read the input for a work item from the store
fn get_input(work: &WorkItem, inputs: &InputStore) -> Result<String, ExecutorError> {
    let (year, day) = (work.year, work.day);
    let path = inputs.input_path(year, day);
    debug!(year, day, path = %path.display(), "reading input");

    inputs
        .get(year, day)
        .map_err(|source| ExecutorError::InputRead { year, day, source })?
        .ok_or(ExecutorError::InputMissing { year, day, path })
}

/// Solve a single part (free function)
fn solve_part_internal(year: u16, day: u8, part: u8, solver: &mut dyn DynSolver) -> SolverResult {
    let start = Utc::now();
    let parse_duration = Some(solver.parse_duration());

    match solver.solve(part) {
        Ok(result) => SolverResult {
            year,
            day,
            part,
            solve_duration: result.duration(),
            answer: Ok(result.answer),
            parse_duration,
        },
        Err(e) => SolverResult {
            year,
            day,
            part,
            answer: Err(e.into()),
            solve_duration: Utc::now() - start,
            parse_duration,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use puzzle_solver::{PartSolver, PuzzleParser, PuzzleSolver, SolveError, SolverRegistryBuilder};
    use std::fs;
    use tempfile::TempDir;

    #[derive(PuzzleSolver)]
    #[puzzle_solver(max_parts = 2)]
    struct SumProduct;

    impl PuzzleParser for SumProduct {
        type SharedData<'a> = Vec<u64>;

        fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
            input
                .split_whitespace()
                .map(|n| n.parse::<u64>().map_err(|_| ParseError::InvalidFormat(n.to_string())))
                .collect()
        }
    }

    impl PartSolver<1> for SumProduct {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            Ok(shared.iter().sum::<u64>().to_string())
        }
    }

    impl PartSolver<2> for SumProduct {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            Ok(shared.iter().product::<u64>().to_string())
        }
    }

    struct Fixture {
        _dir: TempDir,
        config: Config,
    }

    /// 2020 days 1-3 registered; day 1 and 2 have inputs, day 2's is malformed.
    fn fixture(parallelize_by: ParallelizeBy) -> Fixture {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("2020")).unwrap();
        fs::write(dir.path().join("2020").join("day01.txt"), "2 3 4").unwrap();
        fs::write(dir.path().join("2020").join("day02.txt"), "2 x").unwrap();

        let config = Config {
            year_filter: None,
            day_filter: None,
            part_filter: None,
            tags: Vec::new(),
            input_dir: dir.path().to_path_buf(),
            explicit_input: None,
            thread_count: 2,
            parallelize_by,
            quiet: true,
        };
        Fixture { _dir: dir, config }
    }

    fn registry() -> SolverRegistry {
        (1..=3)
            .try_fold(SolverRegistryBuilder::new(), |builder, day| {
                builder.register_solver::<SumProduct>(2020, day)
            })
            .unwrap()
            .build()
    }

    fn run(config: &Config) -> Vec<SolverResult> {
        let executor = Executor::new(registry(), config).unwrap();
        let (tx, rx) = std::sync::mpsc::channel();
        executor.execute(tx).unwrap();
        let mut results: Vec<_> = rx.into_iter().collect();
        results.sort_by_key(|r| (r.year, r.day, r.part));
        results
    }

    #[test]
    fn test_every_mode_produces_the_same_results() {
        for mode in [
            ParallelizeBy::Sequential,
            ParallelizeBy::Year,
            ParallelizeBy::Day,
            ParallelizeBy::Part,
        ] {
            let fixture = fixture(mode);
            let results = run(&fixture.config);
            assert_eq!(results.len(), 6, "{mode:?}");

            assert_eq!(results[0].answer.as_deref().unwrap(), "9", "{mode:?}");
            assert_eq!(results[1].answer.as_deref().unwrap(), "24", "{mode:?}");
            assert!(results[0].parse_duration.is_some());

            for result in &results[2..4] {
                assert!(
                    matches!(
                        result.answer,
                        Err(SolverError::ParseError(ParseError::InvalidFormat(_)))
                    ),
                    "{mode:?}"
                );
            }
            for result in &results[4..6] {
                assert!(
                    matches!(
                        result.answer,
                        Err(SolverError::ParseError(ParseError::MissingData(_)))
                    ),
                    "{mode:?}"
                );
                assert!(result.parse_duration.is_none());
            }
        }
    }

    #[test]
    fn test_filters_select_work_items() {
        let mut fixture = fixture(ParallelizeBy::Day);
        fixture.config.day_filter = Some(2);
        fixture.config.part_filter = Some(2);

        let executor = Executor::new(registry(), &fixture.config).unwrap();
        assert_eq!(
            executor.collect_work_items(),
            vec![WorkItem {
                year: 2020,
                day: 2,
                parts: 2..=2,
            }]
        );

        fixture.config.year_filter = Some(2021);
        let executor = Executor::new(registry(), &fixture.config).unwrap();
        assert!(executor.collect_work_items().is_empty());
    }

    #[test]
    fn test_part_parallel_keeps_part_order() {
        let fixture = fixture(ParallelizeBy::Part);
        let executor = Executor::new(registry(), &fixture.config).unwrap();
        let (tx, rx) = std::sync::mpsc::channel();
        executor.execute(tx).unwrap();

        let day_one: Vec<u8> = rx
            .into_iter()
            .filter(|r| r.day == 1)
            .map(|r| r.part)
            .collect();
        assert_eq!(day_one, vec![1, 2]);
    }

    #[test]
    fn test_merge_errors_keeps_both_sides() {
        let a: ArcExecutorError = ExecutorError::ChannelSend.into();
        let b: ArcExecutorError = ExecutorError::ThreadPool("b".to_string()).into();

        assert!(merge_errors(None, None).is_none());
        assert!(merge_errors(None, Some(b.clone())).is_some());
        assert!(merge_errors(Some(a.clone()), None).is_some());
        let both = merge_errors(Some(a), Some(b)).unwrap();
        assert!(matches!(both.inner(), ExecutorError::Multiple(v) if v.len() == 2));
    }
}
