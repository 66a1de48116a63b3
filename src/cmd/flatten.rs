use std::path::PathBuf;

use structmap::mapping::{Result, Value, try_struct_to_map};

use crate::cmd::util::{emit_json, load_schema, read_json};

#[derive(clap::Args)]
pub struct Args {
	pub schema: PathBuf,
	pub input: PathBuf,
	#[arg(long)]
	pub record: String,
}

/// Decode an input document as `--record` and print its flattened map.
pub fn run(args: Args) -> Result<()> {
	let schema = load_schema(&args.schema)?;
	let input = read_json(&args.input)?;
	let record = Value::Record(schema.record_from_json(&args.record, &input)?);

	let map = try_struct_to_map(&schema, &record)?;
	emit_json(&schema.value_to_json(&Value::Map(map)))
}
