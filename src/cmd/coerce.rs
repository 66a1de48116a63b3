use structmap::mapping::{Kind, Result, Value, to_kind};

use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	pub literal: String,
	#[arg(long)]
	pub kind: Kind,
	#[arg(long)]
	pub json: bool,
}

/// Coerce a literal to `--kind`; JSON literals keep their type, anything else is text.
pub fn run(args: Args) -> Result<()> {
	let input = match serde_json::from_str::<serde_json::Value>(&args.literal) {
		Ok(json) => Value::from_json(&json),
		Err(_) => Value::from(args.literal.as_str()),
	};
	let output = to_kind(&input, args.kind)?;

	if args.json {
		return emit_json(&JsonCoerceOutput {
			kind: args.kind.as_str(),
			input: input.kind_name(),
			value: output.to_json(),
		});
	}

	println!("{output}");
	Ok(())
}

#[derive(serde::Serialize)]
struct JsonCoerceOutput {
	kind: &'static str,
	input: &'static str,
	value: serde_json::Value,
}
