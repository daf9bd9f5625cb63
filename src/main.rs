use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use evocube::{Cube, Solver, SolverConfig, SCRAMBLE_LENGTH};

/// scramble a cube, search for a solution, replay it
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// number of random moves in the scramble
    #[arg(long, default_value_t = SCRAMBLE_LENGTH)]
    scramble: usize,

    /// seed for the scramble and the search (omit for a random run)
    #[arg(long)]
    seed: Option<u64>,

    /// individuals per generation
    #[arg(long)]
    population: Option<usize>,

    /// generation budget
    #[arg(long)]
    generations: Option<u32>,

    /// JSON file with a full solver configuration
    #[arg(long)]
    config: Option<PathBuf>,
}

fn run(args: &Args) -> Result<bool, Box<dyn std::error::Error>> {
    let mut cfg: SolverConfig = match &args.config {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => SolverConfig::default(),
    };
    if let Some(population) = args.population {
        cfg.population_size = population;
    }
    if let Some(generations) = args.generations {
        cfg.max_generations = generations;
    }
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }

    let mut rng = match cfg.seed {
        Some(seed) => Pcg32::seed_from_u64(seed),
        None => Pcg32::from_rng(&mut rand::rng()),
    };
    let mut cube = Cube::default();
    cube.scramble_with(&mut rng, args.scramble);
    println!("scrambled with {} moves:\n{cube}", args.scramble);

    let mut solver = Solver::new(cfg)?;
    let solution = solver.solve(&cube);
    let notation: Vec<String> = solution.iter().map(ToString::to_string).collect();
    println!("solution ({} moves): {}", solution.len(), notation.join(" "));

    for &mv in &solution {
        cube.apply(mv);
    }
    println!("after replay:\n{cube}");
    Ok(cube.is_solved())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(true) => {
            println!("solved");
            ExitCode::SUCCESS
        }
        Ok(false) => {
            println!("not solved within the generation budget");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
