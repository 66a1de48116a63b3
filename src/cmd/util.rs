use std::path::Path;

use structmap::mapping::{Result, Schema, Value};

/// Load a schema declaration file.
pub(crate) fn load_schema(path: &Path) -> Result<Schema> {
	Schema::from_path(path)
}

/// Read and parse a JSON document from disk.
pub(crate) fn read_json(path: &Path) -> Result<serde_json::Value> {
	let bytes = std::fs::read(path)?;
	Ok(serde_json::from_slice(&bytes)?)
}

/// Pretty-print a serializable payload on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(payload)?);
	Ok(())
}

/// Print a value as an indented tree, one leaf per line, skipping private record fields.
pub(crate) fn print_value(schema: &Schema, value: &Value, indent: usize) {
	let pad = "  ".repeat(indent);
	match value {
		Value::Record(record) => {
			let def = schema.record(&record.type_name);
			for field in &record.fields {
				if def.is_some_and(|def| def.field(&field.name).is_none_or(|item| !item.exported)) {
					continue;
				}
				print_entry(schema, &pad, &field.name, &field.value, indent);
			}
		}
		Value::Map(map) => {
			for (key, item) in map {
				print_entry(schema, &pad, key, item, indent);
			}
		}
		Value::Seq(items) => {
			for (idx, item) in items.iter().enumerate() {
				print_entry(schema, &pad, &format!("[{idx}]"), item, indent);
			}
		}
		Value::Ref(inner) => print_value(schema, inner, indent),
		other => println!("{pad}{other}"),
	}
}

fn print_entry(schema: &Schema, pad: &str, label: &str, value: &Value, indent: usize) {
	if is_container(value) {
		println!("{pad}{label}:");
		print_value(schema, value, indent + 1);
	} else {
		println!("{pad}{label}: {value}");
	}
}

fn is_container(value: &Value) -> bool {
	match value {
		Value::Record(_) | Value::Map(_) => true,
		Value::Seq(items) => items.iter().any(is_container),
		Value::Ref(inner) => is_container(inner),
		_ => false,
	}
}
