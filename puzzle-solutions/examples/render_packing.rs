//! Example: search a region and print the packing that was found
//!
//! Shapes are given the same way as in puzzle input, as rows of `#` and `.`.
//!
//! Run with: cargo run --example render_packing

use puzzle_solutions::utils::packing::{OrientationSet, Packer, Region, SearchLimits, Shape};

fn shape(rows: &[&str]) -> Shape {
    let grid: Vec<Vec<bool>> = rows
        .iter()
        .map(|row| row.bytes().map(|b| b == b'#').collect())
        .collect();
    Shape::from_grid(grid.as_slice())
}

fn main() {
    let shapes = [
        shape(&["###", "#..", "###"]),
        shape(&["###", ".#.", "###"]),
        shape(&["##", "#."]),
    ];

    for (index, shape) in shapes.iter().enumerate() {
        let orientations = OrientationSet::generate(shape);
        println!(
            "shape {}: {} cells, {} orientations",
            index,
            shape.cell_count(),
            orientations.len()
        );
    }

    let packer = Packer::new(&shapes).with_limits(SearchLimits::with_max_nodes(1_000_000));

    for region in [
        Region::new(4, 4, vec![2, 0, 0]),
        Region::new(6, 3, vec![1, 1, 1]),
        Region::new(3, 3, vec![1, 1, 0]),
    ] {
        println!();
        println!(
            "{}x{} with counts {:?}",
            region.width, region.height, region.counts
        );
        match packer.search(&region) {
            Ok(outcome) => match outcome.packing {
                Some(packing) => match packing.render() {
                    Ok(rendered) => print!("fits after {} placements:\n{}", outcome.nodes, rendered),
                    Err(e) => println!("invalid packing: {}", e),
                },
                None => println!("does not fit ({} placements tried)", outcome.nodes),
            },
            Err(e) => println!("query failed: {}", e),
        }
    }
}
