use crate::mapping::{FlatMap, MapError, Result, Schema, Value, value_of};

/// Flatten a record into a nested map, returning an empty map on structural errors.
pub fn struct_to_map(schema: &Schema, value: &Value) -> FlatMap {
	try_struct_to_map(schema, value).unwrap_or_default()
}

/// Flatten a record into a nested map.
///
/// Only exported fields are copied. Nested records become nested maps,
/// sequences are flattened element by element, and `Ref` indirection is
/// removed. Nested records that cannot be flattened (for example, records
/// with no exported fields) are copied as-is.
pub fn try_struct_to_map(schema: &Schema, value: &Value) -> Result<FlatMap> {
	let Value::Record(record) = value_of(value) else {
		return Err(MapError::NotAStruct {
			got: value_of(value).kind_name(),
		});
	};
	let def = schema.require_record(&record.type_name)?;
	if !def.is_exported() {
		return Err(MapError::Unexported {
			type_name: def.name.to_string(),
		});
	}

	let mut out = FlatMap::new();
	for field in def.fields.iter().filter(|field| field.exported) {
		let Some(current) = record.get(&field.name) else {
			continue;
		};
		out.insert(field.name.to_string(), flatten_value(schema, value_of(current)));
	}
	Ok(out)
}

fn flatten_value(schema: &Schema, value: &Value) -> Value {
	match value {
		Value::Seq(items) => Value::Seq(items.iter().map(|item| flatten_element(schema, item)).collect()),
		Value::Record(_) => flatten_element(schema, value),
		other => other.clone(),
	}
}

fn flatten_element(schema: &Schema, item: &Value) -> Value {
	match try_struct_to_map(schema, item) {
		Ok(map) => Value::Map(map),
		Err(_) => value_of(item).clone(),
	}
}

#[cfg(test)]
mod tests {
	use super::{struct_to_map, try_struct_to_map};
	use crate::mapping::{FieldDef, FieldType, FieldValue, FlatMap, MapError, RecordDef, RecordValue, Schema, Value};

	fn schema() -> Schema {
		Schema::new(vec![
			RecordDef::new("Time").with_field(FieldDef::new("wall", FieldType::Int).private()),
			RecordDef::new("Args")
				.with_field(FieldDef::new("ID", FieldType::Int))
				.with_field(FieldDef::new("IDs", FieldType::parse("[int]").expect("seq")))
				.with_field(FieldDef::new("Time", FieldType::Record("Time".into())))
				.with_field(FieldDef::new("secret", FieldType::String).private()),
			RecordDef::new("Outer")
				.with_field(FieldDef::new("Inner", FieldType::parse("*Args").expect("ref")))
				.with_field(FieldDef::new("List", FieldType::parse("[Args]").expect("seq"))),
		])
		.expect("schema")
	}

	fn args(id: i64) -> Value {
		Value::Record(RecordValue {
			type_name: "Args".into(),
			fields: vec![
				FieldValue {
					name: "ID".into(),
					value: Value::Int(id),
				},
				FieldValue {
					name: "IDs".into(),
					value: Value::from(vec![1_i64, 2, 3]),
				},
				FieldValue {
					name: "Time".into(),
					value: Value::Record(RecordValue {
						type_name: "Time".into(),
						fields: vec![FieldValue {
							name: "wall".into(),
							value: Value::Int(42),
						}],
					}),
				},
				FieldValue {
					name: "secret".into(),
					value: Value::from("hunter2"),
				},
			],
		})
	}

	#[test]
	fn exported_primitives_and_sequences_are_copied() {
		let schema = schema();
		let map = struct_to_map(&schema, &args(0));

		assert_eq!(map.get("ID"), Some(&Value::Int(0)));
		assert_eq!(map.get("IDs"), Some(&Value::from(vec![1_i64, 2, 3])));
		assert!(!map.contains_key("secret"));
	}

	#[test]
	fn unflattenable_nested_record_is_copied_as_is() {
		let schema = schema();
		let map = struct_to_map(&schema, &args(0));
		let Some(Value::Record(time)) = map.get("Time") else {
			panic!("Time should stay a record");
		};
		assert_eq!(time.get("wall"), Some(&Value::Int(42)));
	}

	#[test]
	fn refs_and_nested_records_become_maps() {
		let schema = schema();
		let outer = Value::Record(RecordValue {
			type_name: "Outer".into(),
			fields: vec![
				FieldValue {
					name: "Inner".into(),
					value: Value::Ref(Box::new(args(5))),
				},
				FieldValue {
					name: "List".into(),
					value: Value::Seq(vec![args(6), args(7)]),
				},
			],
		});
		let map = struct_to_map(&schema, &outer);

		let inner = map.get("Inner").and_then(Value::as_map).expect("inner map");
		assert_eq!(inner.get("ID"), Some(&Value::Int(5)));

		let Some(Value::Seq(list)) = map.get("List") else {
			panic!("List should be a sequence");
		};
		let ids: Vec<Option<&Value>> = list.iter().map(|item| item.as_map().and_then(|map| map.get("ID"))).collect();
		assert_eq!(ids, vec![Some(&Value::Int(6)), Some(&Value::Int(7))]);
	}

	#[test]
	fn structural_errors_are_strict_but_best_effort_is_empty() {
		let schema = schema();
		assert!(matches!(try_struct_to_map(&schema, &Value::Int(1)), Err(MapError::NotAStruct { .. })));
		assert_eq!(struct_to_map(&schema, &Value::Int(1)), FlatMap::new());

		let hidden = Value::Record(schema.zero_record("Time").expect("zero"));
		assert!(matches!(try_struct_to_map(&schema, &hidden), Err(MapError::Unexported { .. })));
	}
}
