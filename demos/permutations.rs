//! Builds a few trees from shuffled permutations of `0..count` and dumps
//! their shape as Graphviz DOT.
//!
//! ```text
//! cargo run --example permutations -- 12
//! ```
//!
//! Run with `RUST_LOG=trace` to watch structural events.

use bentwood::Bentwood;
use rand::prelude::*;
use std::env;
use std::process;

const ROUNDS: usize = 3;

fn main() {
    tracing_subscriber::fmt::init();

    let count: u32 = match env::args().nth(1).map(|arg| arg.parse()) {
        Some(Ok(count)) => count,
        _ => {
            eprintln!("usage: permutations <count>");
            process::exit(1);
        }
    };

    let mut rng = rand::thread_rng();

    for round in 1..=ROUNDS {
        let mut order: Vec<u32> = (0..count).collect();
        order.shuffle(&mut rng);

        let mut tree = Bentwood::new();
        tree.reserve(order.len());
        for &elem in &order {
            tree.insert(elem);
        }

        println!("round {round}: inserted {order:?}");
        println!("  sorted:   {:?}", tree.iter().collect::<Vec<_>>());
        println!("  height:   {}", tree.height());
        match (tree.find_min().copied(), tree.find_max().copied()) {
            (Ok(min), Ok(max)) => println!("  extremes: {min}..={max}"),
            (Err(err), _) | (_, Err(err)) => println!("  extremes: {err}"),
        }
        println!("{}", tree.dot().pretty());

        for elem in (0..count).step_by(2) {
            tree.remove(&elem);
        }

        println!("round {round}: removed the evens");
        println!("  sorted:   {:?}", tree.iter().collect::<Vec<_>>());
        println!("  height:   {}", tree.height());
        println!("{}", tree.dot().pretty());
    }
}
