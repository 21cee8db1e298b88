//! Example demonstrating layout generation on the classic template.
//!
//! This example shows how to:
//! - Create a `LayoutGenerator` with a `GreedySolver`
//! - Generate a layout from a random, explicit or daily seed
//! - Sample many seeds in parallel to measure how often generation falls back
//!
//! # Usage
//!
//! ```sh
//! cargo run --example generate_layout
//! ```
//!
//! Reproduce a layout from its seed, or build the layout of a given day:
//!
//! ```sh
//! cargo run --example generate_layout -- --seed 1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef
//! cargo run --example generate_layout -- --daily 2024-03-15
//! ```
//!
//! Sample random seeds and report the attempt distribution (default cap: 20):
//!
//! ```sh
//! cargo run --release --example generate_layout -- --samples 1000 --max-attempts 5
//! ```

use std::{num::NonZero, process};

use clap::Parser;
use mahjongg_core::{BoardTemplate, GridIndex};
use mahjongg_generator::{GeneratedLayout, LayoutGenerator, LayoutSeed, PuzzleDate};
use mahjongg_solver::{GreedySolver, count_available_moves};
use rayon::prelude::*;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Seed to reproduce (64 hex digits).
    #[arg(long, value_name = "HEX", conflicts_with = "daily")]
    seed: Option<LayoutSeed>,

    /// Generate the daily layout of this date (YYYY-MM-DD).
    #[arg(long, value_name = "DATE")]
    daily: Option<PuzzleDate>,

    /// Number of random seeds to sample instead of printing one layout.
    #[arg(long, value_name = "COUNT", conflicts_with_all = ["seed", "daily"])]
    samples: Option<usize>,

    /// Attempts before falling back to an unverified layout.
    #[arg(long, value_name = "COUNT", default_value_t = LayoutGenerator::DEFAULT_MAX_ATTEMPTS)]
    max_attempts: NonZero<usize>,
}

fn main() {
    let args = Args::parse();
    let template = BoardTemplate::classic();
    let solver = GreedySolver::new();
    let generator = LayoutGenerator::new(&template, &solver).with_max_attempts(args.max_attempts);

    if let Some(samples) = args.samples {
        if samples == 0 {
            eprintln!("--samples must be at least 1.");
            process::exit(1);
        }
        let attempts = (0..samples)
            .into_par_iter()
            .map(|_| generator.generate())
            .map(|layout| (layout.attempts, layout.outcome.is_fallback()))
            .collect::<Vec<_>>();
        print_samples(&attempts, args.max_attempts.get());
        return;
    }

    let seed = match (args.seed, args.daily) {
        (Some(seed), _) => seed,
        (None, Some(date)) => {
            println!("Daily puzzle #{} ({date})", date.puzzle_number());
            println!();
            date.seed()
        }
        (None, None) => LayoutSeed::random(),
    };
    let layout = generator.generate_with_seed(seed);
    print_layout(&template, &layout);
}

fn print_layout(template: &BoardTemplate, layout: &GeneratedLayout) {
    println!("Seed:");
    println!("  {}", layout.seed);
    println!();

    println!("Generation:");
    println!("  Outcome: {}", layout.outcome);
    println!("  Attempts: {}", layout.attempts);
    println!();

    println!("Layers:");
    for (layer, count) in template.layer_slot_counts().iter().enumerate() {
        println!("  {layer}: {count} tiles");
    }
    println!();

    let grid = GridIndex::new(&layout.tiles);
    println!("Opening moves: {}", count_available_moves(&layout.tiles, &grid));
}

#[expect(clippy::cast_precision_loss)]
fn print_samples(samples: &[(usize, bool)], max_attempts: usize) {
    let mut histogram = vec![0_usize; max_attempts];
    let mut fallbacks = 0;
    for &(attempts, fallback) in samples {
        if fallback {
            fallbacks += 1;
        } else {
            histogram[attempts - 1] += 1;
        }
    }

    println!("Samples: {}", samples.len());
    println!(
        "Fallback rate: {:.2}% ({fallbacks})",
        fallbacks as f64 * 100.0 / samples.len() as f64
    );
    println!();
    println!("Attempts until solvable:");
    for (i, count) in histogram.iter().enumerate().filter(|(_, count)| **count > 0) {
        println!("  {}: {count}", i + 1);
    }
}
