#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "structmap", about = "Tag-driven record conversion tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// List the declared fields of a record.
	Fields(cmd::fields::Args),
	/// Flatten a record instance into a nested map.
	Flatten(cmd::flatten::Args),
	/// Copy one record instance into another record type.
	Convert(cmd::convert::Args),
	/// Coerce a literal to a primitive kind.
	Coerce(cmd::coerce::Args),
}

fn main() {
	tracing_subscriber::fmt()
		.with_writer(std::io::stderr)
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
		.init();

	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> structmap::mapping::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Fields(args) => cmd::fields::run(args),
		Commands::Flatten(args) => cmd::flatten::run(args),
		Commands::Convert(args) => cmd::convert::run(args),
		Commands::Coerce(args) => cmd::coerce::run(args),
	}
}
