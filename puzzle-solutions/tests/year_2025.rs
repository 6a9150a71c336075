// Link the crate so its inventory-registered solvers are present.
extern crate puzzle_solutions;

use puzzle_solver::{SolverRegistry, SolverRegistryBuilder};

fn full_registry() -> SolverRegistry {
    SolverRegistryBuilder::new()
        .register_all_plugins()
        .unwrap()
        .build()
}

#[test]
fn every_day_of_2025_is_registered() {
    let registry = full_registry();
    let parts: Vec<(u8, u8)> = registry
        .iter_info()
        .filter(|info| info.year == 2025)
        .map(|info| (info.day, info.parts))
        .collect();

    let expected: Vec<(u8, u8)> = (1..=12).map(|day| (day, if day == 12 { 1 } else { 2 })).collect();
    assert_eq!(parts, expected);
}

#[test]
fn both_parts_share_one_parse() {
    let registry = full_registry();
    let input = "L68\nL30\nR48\nL5\nR60\nL55\nL1\nL99\nR14\nL82\n";

    let mut solver = registry.create_solver(2025, 1, input).unwrap();
    assert_eq!(solver.parts(), 2);
    assert_eq!(solver.solve(2).unwrap().answer, "6");
    assert_eq!(solver.solve(1).unwrap().answer, "3");
}

#[test]
fn input_can_be_borrowed_by_shared_data() {
    let registry = full_registry();
    let input = String::from("you: a out\na: out\n");

    let mut solver = registry.create_solver(2025, 11, &input).unwrap();
    assert_eq!(solver.solve(1).unwrap().answer, "2");
    assert!(solver.solve(2).is_err(), "no 'svr' device");
}

#[test]
fn tags_select_days() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"graph"))
        .unwrap()
        .build();
    let days: Vec<u8> = registry.iter_info().map(|info| info.day).collect();
    assert_eq!(days, vec![8, 11]);
}
