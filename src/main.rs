use std::error::Error;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use crossterm::style::Stylize;
use rand::{rngs::StdRng, SeedableRng};

use npuzzle::{load_board, parse_board, LoadError, PuzzleState, Solver};

#[derive(Parser)]
#[command(name = "npuzzle")]
#[command(about = "Finds a shortest solution to an n-by-n sliding tile puzzle")]
#[command(version)]
struct Cli {
    /// Puzzle file: the dimension followed by the tiles, 0 for the blank.
    /// Reads stdin when absent or `-`
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Solve a random board of this dimension instead of reading one
    #[arg(long, value_name = "N", conflicts_with = "file")]
    random: Option<usize>,

    /// Reshuffle the random board until it is solvable
    #[arg(long, requires = "random")]
    solvable: bool,

    /// Build the random board from this many blank moves away from the goal
    #[arg(long, value_name = "K", requires = "random", conflicts_with = "solvable")]
    scramble: Option<usize>,

    /// Seed for random boards
    #[arg(long)]
    seed: Option<u64>,

    /// Give up after this many search iterations
    #[arg(long, value_name = "LIMIT")]
    max_iterations: Option<usize>,

    /// Only print the number of moves
    #[arg(long)]
    moves_only: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let initial = read_initial(cli)?;

    if !cli.moves_only {
        println!("Initial board:");
        print_board(&initial);
        println!();
    }

    let solver = match cli.max_iterations {
        Some(limit) => Solver::with_iteration_limit(initial, limit)?,
        None => Solver::new(initial),
    };

    let Some(solution) = solver.solution() else {
        println!("No solution possible");
        return Ok(());
    };

    println!("Minimum number of moves = {}", solution.len() - 1);
    if cli.moves_only {
        return Ok(());
    }

    for (step, pair) in solution.windows(2).enumerate() {
        if let Some(dir) = pair[0].move_between(&pair[1]) {
            println!("\n{}. {}", step + 1, dir);
        }
        print_board(&pair[1]);
    }

    Ok(())
}

fn read_initial(cli: &Cli) -> Result<PuzzleState, LoadError> {
    if let Some(size) = cli.random {
        if size < 2 {
            return Err(LoadError::InvalidDimension(size));
        }
        let mut rng = match cli.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        if let Some(steps) = cli.scramble {
            return Ok(PuzzleState::scrambled(size, steps, &mut rng));
        }
        loop {
            let state = PuzzleState::shuffled(size, &mut rng);
            if !cli.solvable || state.has_solvable_parity() {
                return Ok(state);
            }
        }
    }

    match &cli.file {
        Some(path) if path.as_os_str() != "-" => load_board(path),
        _ => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            parse_board(&text)
        }
    }
}

fn print_board(state: &PuzzleState) {
    for row in state.rows() {
        let cells: Vec<String> = row
            .iter()
            .map(|&val| {
                let cell = format!("{:2}", val);
                if val == 0 {
                    cell.dark_grey().to_string()
                } else {
                    cell
                }
            })
            .collect();
        println!("{}", cells.join(" "));
    }
}
