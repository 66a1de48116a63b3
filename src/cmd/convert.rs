use std::path::PathBuf;

use structmap::mapping::{ConvertOptions, CopyReport, DEFAULT_TAG_KEY, Result, Value, struct_to_struct_with};
use tracing::warn;

use crate::cmd::util::{emit_json, load_schema, read_json, print_value};

#[derive(clap::Args)]
pub struct Args {
	pub schema: PathBuf,
	pub input: PathBuf,
	#[arg(long)]
	pub from: String,
	#[arg(long)]
	pub to: String,
	#[arg(long = "tag-key", default_value = DEFAULT_TAG_KEY)]
	pub tag_key: String,
	#[arg(long = "max-depth", default_value_t = 16)]
	pub max_depth: u32,
	#[arg(long)]
	pub json: bool,
}

/// Decode the input as `--from`, convert it into a zero `--to` record, and print the result.
pub fn run(args: Args) -> Result<()> {
	let schema = load_schema(&args.schema)?;
	let input = read_json(&args.input)?;
	let source = Value::Record(schema.record_from_json(&args.from, &input)?);
	let mut dest = Value::Record(schema.zero_record(&args.to)?);

	let options = ConvertOptions {
		tag_key: args.tag_key,
		max_depth: args.max_depth,
	};
	let report = struct_to_struct_with(&schema, &source, &mut dest, &options)?;
	for entry in &report.skipped {
		warn!(field = %entry.path, error = %entry.error, "field not converted");
	}

	if args.json {
		return emit_json(&JsonConvertOutput {
			from: &args.from,
			to: &args.to,
			value: schema.value_to_json(&dest),
			skipped: skipped_rows(&report),
		});
	}

	println!("from: {}", args.from);
	println!("to: {}", args.to);
	print_value(&schema, &dest, 0);
	println!("skipped: {}", report.skipped.len());
	for entry in &report.skipped {
		println!("  {}: {}", entry.path, entry.error);
	}
	Ok(())
}

fn skipped_rows(report: &CopyReport) -> Vec<JsonSkipped> {
	report
		.skipped
		.iter()
		.map(|entry| JsonSkipped {
			field: entry.path.clone(),
			reason: entry.error.to_string(),
		})
		.collect()
}

#[derive(serde::Serialize)]
struct JsonConvertOutput<'a> {
	from: &'a str,
	to: &'a str,
	value: serde_json::Value,
	skipped: Vec<JsonSkipped>,
}

#[derive(serde::Serialize)]
struct JsonSkipped {
	field: String,
	reason: String,
}
