use std::collections::BTreeMap;
use std::path::PathBuf;

use structmap::mapping::Result;

use crate::cmd::util::{emit_json, load_schema};

#[derive(clap::Args)]
pub struct Args {
	pub schema: PathBuf,
	#[arg(long)]
	pub record: String,
	#[arg(long)]
	pub json: bool,
}

/// List a record's declared fields with their types, visibility, and tags.
pub fn run(args: Args) -> Result<()> {
	let schema = load_schema(&args.schema)?;
	let def = schema.require_record(&args.record)?;

	if args.json {
		let payload = JsonFieldsOutput {
			record: &def.name,
			exported: def.is_exported(),
			fields: def
				.fields
				.iter()
				.map(|field| JsonField {
					name: &field.name,
					ty: field.ty.to_string(),
					exported: field.exported,
					tags: &field.tags,
				})
				.collect(),
		};
		return emit_json(&payload);
	}

	println!("record: {}", def.name);
	println!("field_count: {}", def.fields.len());
	for field in &def.fields {
		let visibility = if field.exported { "exported" } else { "private" };
		let tags: Vec<String> = field.tags.iter().map(|(key, value)| format!("{key}={value:?}")).collect();
		if tags.is_empty() {
			println!("  {} {} {visibility}", field.name, field.ty);
		} else {
			println!("  {} {} {visibility} {}", field.name, field.ty, tags.join(" "));
		}
	}
	Ok(())
}

#[derive(serde::Serialize)]
struct JsonFieldsOutput<'a> {
	record: &'a str,
	exported: bool,
	fields: Vec<JsonField<'a>>,
}

#[derive(serde::Serialize)]
struct JsonField<'a> {
	name: &'a str,
	#[serde(rename = "type")]
	ty: String,
	exported: bool,
	tags: &'a BTreeMap<String, String>,
}
