#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use structmap::mapping::{Schema, Value};

pub fn fixture_path(name: &str) -> PathBuf {
	Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}

pub fn fixture_arg(name: &str) -> String {
	fixture_path(name).display().to_string()
}

/// Load the fixture schema and decode `x.json` as an `X` record.
pub fn load_fixture_source() -> (Schema, Value) {
	let schema = Schema::from_path(fixture_path("schema.json")).expect("schema fixture loads");
	let bytes = std::fs::read(fixture_path("x.json")).expect("input fixture reads");
	let json: serde_json::Value = serde_json::from_slice(&bytes).expect("input fixture parses");
	let source = Value::Record(schema.record_from_json("X", &json).expect("input matches X"));
	(schema, source)
}

/// Run `structmap convert` on the fixture schema and `x.json`, appending `extra` arguments.
pub fn convert_fixture(from: &str, to: &str, extra: &[&str]) -> Output {
	let schema = fixture_arg("schema.json");
	let input = fixture_arg("x.json");
	let mut args = vec!["convert", &schema, &input, "--from", from, "--to", to];
	args.extend_from_slice(extra);
	run_structmap(&args)
}

pub fn run_structmap(args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_structmap"))
		.args(args)
		.env_remove("RUST_LOG")
		.output()
		.expect("structmap command executes")
}

pub fn run_structmap_json(args: &[&str]) -> serde_json::Value {
	stdout_json(run_structmap(args))
}

/// Assert success and parse stdout as JSON.
pub fn stdout_json(output: Output) -> serde_json::Value {
	assert!(
		output.status.success(),
		"structmap failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}
