use std::{error::Error, io::Write, path::PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand};
use log::{info, warn, LevelFilter};
use rand::{rngs::StdRng, SeedableRng};
use strum::{Display, IntoEnumIterator};

use rubiksearch::prelude::*;

#[derive(PartialEq, Eq, Default, Debug, Display, Copy, Clone, strum::EnumString, strum::EnumIter)]
#[strum(serialize_all = "lowercase")]
enum SolveAlgorithm {
	Dfs,
	Bfs,
	Iddfs,
	#[default]
	IdaStar,
}

/// Scramble a Rubik's Cube and search for a way back
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
	/// Print debug output (-vv for even more)
	#[arg(short, long, action = ArgAction::Count, global = true)]
	verbose: u8,

	#[command(subcommand)]
	command: Option<Commands>,

	#[command(flatten)]
	solve: SolveArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
	/// Scramble a cube and solve it (the default)
	Solve(SolveArgs),
	/// Build a pattern database and save it
	Generate {
		/// Where to store the database
		#[arg(short, long)]
		output: PathBuf,

		/// Which part of the cube the database describes
		#[arg(short, long, default_value_t = ProjectionKind::Corners)]
		projection: ProjectionKind,

		/// Stop the search at this depth, the rest gets depth + 1
		#[arg(short, long)]
		depth_limit: Option<u8>,
	},
}

#[derive(Args, Debug)]
struct SolveArgs {
	/// Apply a sequence to the solved cube instead of scrambling it
	#[arg(short, long, conflicts_with = "scramble")]
	sequence: Option<String>,

	/// Number of random turns to scramble with
	#[arg(short = 'r', long, default_value_t = 8)]
	scramble: usize,

	/// Seed for the scramble, random if not given
	#[arg(long)]
	seed: Option<u64>,

	/// Specify the algorithm used for solving
	#[arg(short, long, default_value_t = SolveAlgorithm::default())]
	algorithm: SolveAlgorithm,

	/// Print all possible algorithms and quit
	#[arg(long, default_value_t = false)]
	list_algorithm: bool,

	/// Give up beyond this many turns
	#[arg(short, long, default_value_t = 20)]
	max_depth: u8,

	/// Corner pattern database for IDA*, see the generate command
	#[arg(short, long)]
	database: Option<PathBuf>,

	/// Print the output to a file rather to the stdout
	#[arg(short, long)]
	output: Option<PathBuf>,
}

fn solve(args: SolveArgs) -> Result<(), Box<dyn Error>> {
	// Whether to redirect it to the stdout or a file
	let mut out: Box<dyn Write> = match &args.output {
		Some(path) => Box::new(std::fs::File::create(path)?),
		None => Box::new(std::io::stdout()),
	};

	// List the algorithm and exit
	if args.list_algorithm {
		for algo in SolveAlgorithm::iter() {
			writeln!(out, "{}", algo)?;
		}
		return Ok(());
	}

	let mut cube = BitCube::new();
	match &args.sequence {
		Some(seq) => cube.apply_turns(parse_turns(seq)?),
		None => {
			let mut rng = match args.seed {
				Some(seed) => StdRng::seed_from_u64(seed),
				None => StdRng::from_entropy(),
			};
			let turns = cube.random_shuffle_with(&mut rng, args.scramble);
			writeln!(out, "Scramble: {}", format_turns(&turns))?;
		}
	}

	// Choose algorithm to use
	let mut solver: Box<dyn Solver> = match args.algorithm {
		SolveAlgorithm::Dfs => Box::new(DfsSolver::new(cube, args.max_depth)),
		SolveAlgorithm::Bfs => Box::new(BfsSolver::new(cube)),
		SolveAlgorithm::Iddfs => Box::new(IddfsSolver::new(cube, args.max_depth)),
		SolveAlgorithm::IdaStar => match &args.database {
			Some(path) => Box::new(IdaStarSolver::from_file(cube, path)?.with_max_threshold(args.max_depth)),
			None => {
				warn!("No pattern database given, falling back to the orientation databases");
				let heuristic = (
					PatternDatabase::<CornerOrientationProjection>::generate(),
					PatternDatabase::<EdgeOrientationProjection>::generate(),
				);
				Box::new(IdaStarSolver::new(cube, heuristic).with_max_threshold(args.max_depth))
			}
		},
	};

	let turns = solver.solve()?;
	info!("{} visited {} nodes", args.algorithm, solver.nodes_visited());

	cube.apply_turns(turns.iter().copied());
	if !cube.is_solved() {
		return Err("The solution does not solve the cube!".into());
	}

	writeln!(out, "{} (len={})", format_turns(&turns), turns.len())?;
	Ok(())
}

fn generate<P: Projection>(output: PathBuf, depth_limit: Option<u8>) -> Result<(), Box<dyn Error>> {
	let db = PatternDatabase::<P>::generate_with_limit(depth_limit);
	db.save(&output)?;
	println!(
		"Saved {} entries (max distance {}) to {}",
		db.len(),
		db.max_distance(),
		output.display()
	);
	Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
	let cli = Cli::parse();

	env_logger::Builder::new()
		.filter_level(match cli.verbose {
			0 => LevelFilter::Warn,
			1 => LevelFilter::Debug,
			_ => LevelFilter::Trace,
		})
		.parse_default_env()
		.init();

	match cli.command {
		Some(Commands::Solve(args)) => solve(args),
		Some(Commands::Generate {
			output,
			projection,
			depth_limit,
		}) => match projection {
			ProjectionKind::Corners => generate::<CornerProjection>(output, depth_limit),
			ProjectionKind::CornerOrientation => generate::<CornerOrientationProjection>(output, depth_limit),
			ProjectionKind::EdgeOrientation => generate::<EdgeOrientationProjection>(output, depth_limit),
		},
		None => solve(cli.solve),
	}
}
