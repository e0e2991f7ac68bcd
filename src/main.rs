use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sevens::explore::{ExploreConfig, ExploreStats, Explorer, ExplorerParallel};
use sevens::game::GameState;
use sevens::serialize;
use sevens::tree::Tree;

#[derive(Debug, Parser)]
#[command(name = "sevens", about = "Pairwise-reduction game tree builder")]
struct Args {
    /// Comma-separated initial tokens (positive integers). Random when omitted.
    #[arg(long, value_delimiter = ',')]
    sequence: Option<Vec<u32>>,

    /// Length of the randomly generated initial sequence.
    #[arg(long, default_value_t = 14)]
    length: usize,

    /// Seed for the random sequence (thread RNG when omitted).
    #[arg(long)]
    seed: Option<u64>,

    /// Depth bound: nodes at this depth are never expanded. The bound also
    /// adds the per-node depth field to the output document.
    #[arg(long)]
    depth: Option<u32>,

    /// Use the single-threaded recursive builder.
    #[arg(long)]
    sequential: bool,

    /// Worker thread count (defaults to available parallelism).
    #[arg(long)]
    threads: Option<usize>,

    /// Output path for the JSON tree document.
    #[arg(long, default_value = "game_tree.json")]
    out: PathBuf,

    /// Suppress the spinner and the performance report.
    #[arg(long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let total_start = Instant::now();

    let gen_start = Instant::now();
    let sequence = initial_sequence(&args)?;
    let gen_elapsed = gen_start.elapsed();

    if !args.quiet {
        println!(
            "Initial sequence ({} numbers): {}",
            sequence.len(),
            tokens_line(&sequence)
        );
    }

    let spinner = if args.quiet {
        None
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner} {elapsed_precise} | building game tree")?
                .tick_chars("⠁⠃⠇⠧⠷⠿⠻⠟⠯⠷⠧⠇⠃"),
        );
        pb.enable_steady_tick(Duration::from_millis(120));
        Some(pb)
    };

    let cfg = ExploreConfig {
        threads: args.threads,
        max_depth: args.depth,
    };
    let build_start = Instant::now();
    let (tree, stats) = build_tree(args.sequential, cfg, GameState::new(sequence));
    let build_elapsed = build_start.elapsed();
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    log::info!(
        "tree complete: {} nodes, {} unique states",
        stats.nodes_created,
        stats.unique_states
    );

    let save_start = Instant::now();
    serialize::write_json_to_path(&args.out, &tree, args.depth.is_some())
        .with_context(|| format!("failed to write {}", args.out.display()))?;
    let save_elapsed = save_start.elapsed();
    let total_elapsed = total_start.elapsed();

    if !args.quiet {
        println!();
        println!("Performance Metrics:");
        println!("--------------------------------");
        println!("Sequence generation time: {} ms", gen_elapsed.as_millis());
        println!("Tree construction time:   {} ms", build_elapsed.as_millis());
        println!("JSON saving time:         {} ms", save_elapsed.as_millis());
        println!("--------------------------------");
        println!("Total execution time:     {} ms", total_elapsed.as_millis());
        println!("--------------------------------");
        println!("Done! Tree saved to {}", args.out.display());
        println!("Total nodes created: {}", stats.nodes_created);
        println!("Unique states: {}", stats.unique_states);
    }
    Ok(())
}

fn initial_sequence(args: &Args) -> anyhow::Result<Vec<u32>> {
    if let Some(sequence) = &args.sequence {
        if sequence.is_empty() {
            bail!("the initial sequence must contain at least one token");
        }
        if sequence.iter().any(|&token| token == 0) {
            bail!("tokens must be positive integers");
        }
        return Ok(sequence.clone());
    }
    if args.length == 0 {
        bail!("--length must be at least 1");
    }
    Ok(match args.seed {
        Some(seed) => random_sequence(&mut StdRng::seed_from_u64(seed), args.length),
        None => random_sequence(&mut rand::thread_rng(), args.length),
    })
}

fn random_sequence<R: Rng + ?Sized>(rng: &mut R, length: usize) -> Vec<u32> {
    (0..length).map(|_| rng.gen_range(1..=9)).collect()
}

fn build_tree(sequential: bool, cfg: ExploreConfig, initial: GameState) -> (Tree, ExploreStats) {
    if sequential {
        let mut explorer = Explorer::with_config(cfg);
        let tree = explorer.build(initial);
        (tree, explorer.last_stats())
    } else {
        let mut explorer = ExplorerParallel::with_config(cfg);
        let tree = explorer.build(initial);
        (tree, explorer.last_stats())
    }
}

fn tokens_line(sequence: &[u32]) -> String {
    sequence
        .iter()
        .map(|token| token.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
