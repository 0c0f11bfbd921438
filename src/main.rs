#[macro_use]
extern crate lazy_static;

mod build;
mod build_config;
mod commands {
	pub mod build;
	pub mod clean;
	pub mod compile_commands;
	pub mod run;
	pub mod status;
	pub mod watch;
}
mod compile_commands;
mod compiler;
mod configuration;
mod dependency_file;
mod errors;
mod linker;
mod paths;
mod project_data;
mod provisioning;
mod run;
mod settings;
mod sources;
mod staleness;
mod toolchain;
mod types;

pub use crate::errors::{Error, Result};
use std::error::Error as StdError;
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use structopt::StructOpt;
use tracing::{debug, error, Level};
use tracing_subscriber::EnvFilter;

#[derive(Debug, StructOpt)]
enum Command {
	/// Compiles stale sources and relinks if needed (default).
	Build {
		#[structopt(short, long)]
		force: bool,
	},
	/// Removes the object and binary directories.
	Clean,
	/// Writes compile_commands.json into the project directory.
	CompileCommands,
	/// Builds, then executes the binary.
	Run {
		#[structopt(short, long)]
		force: bool,
	},
	/// Shows what a build would compile and whether it would relink.
	Status {
		#[structopt(short, long)]
		force: bool,
	},
	/// Rebuilds whenever a source changes.
	Watch {
		#[structopt(short, long, default_value = "0.3")]
		debounce_delay: f32,
	},
}

impl Default for Command {
	fn default() -> Self {
		Command::Build { force: false }
	}
}

#[derive(Debug, StructOpt)]
#[structopt(about, author)]
struct Args {
	#[structopt(subcommand)]
	command: Option<Command>,

	#[structopt(short, long, default_value = ".")]
	project_directory: PathBuf,

	/// Only reports errors.
	#[structopt(short, long)]
	quiet: bool,

	/// Logs every staleness decision and tool command line.
	#[structopt(short, long)]
	verbose: bool,
}

fn init_logging(args: &Args) {
	let level = if args.verbose {
		Level::DEBUG
	} else if args.quiet {
		Level::ERROR
	} else {
		Level::INFO
	};

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		EnvFilter::new(format!(
			"{}={}",
			env!("CARGO_PKG_NAME"),
			level.to_string().to_lowercase()
		))
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_target(false)
		.with_writer(std::io::stderr)
		.init();
}

fn execute(args: Args) -> Result<()> {
	let command = args.command.unwrap_or_else(Command::default);
	let project_directory = &args.project_directory;

	match command {
		Command::Build { force } => commands::build::execute(&commands::build::Options {
			force,
			project_directory,
		})
		.map(|_| ()),

		Command::Clean => commands::clean::execute(&commands::clean::Options { project_directory }),

		Command::CompileCommands => {
			commands::compile_commands::execute(&commands::compile_commands::Options {
				project_directory,
			})
		}

		Command::Run { force } => commands::run::execute(&commands::run::Options {
			force,
			project_directory,
		}),

		Command::Status { force } => commands::status::execute(&commands::status::Options {
			force,
			project_directory,
		}),

		Command::Watch { debounce_delay } => commands::watch::execute(&commands::watch::Options {
			debounce_delay: Duration::from_secs_f32(debounce_delay),
			project_directory,
		}),
	}
}

fn main() {
	let args = Args::from_args();
	init_logging(&args);
	debug!("{:?}", args);

	if let Err(err) = execute(args) {
		error!("{}", err);
		let mut source = err.source();
		while let Some(cause) = source {
			error!("  caused by: {}", cause);
			source = cause.source();
		}
		process::exit(1);
	}
}
