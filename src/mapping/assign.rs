use crate::mapping::{FieldType, FieldValue, Kind, MapError, RecordValue, Result, Schema, Value, to_kind, value_of, value_of_mut};

/// Assign `new` to `field` on the record behind `dest`.
///
/// When the runtime shape of `new` differs from the declared field type, a
/// primitive coercion is attempted before failing with `TypeMismatch`.
pub fn set_field_value(schema: &Schema, dest: &mut Value, field: &str, new: Value) -> Result<()> {
	let got = value_of(dest).kind_name();
	let Value::Record(record) = value_of_mut(dest) else {
		return Err(MapError::NotAStruct { got });
	};
	set_record_field(schema, record, field, new)
}

pub(crate) fn set_record_field(schema: &Schema, record: &mut RecordValue, field: &str, new: Value) -> Result<()> {
	let def = schema.require_record(&record.type_name)?;
	let Some(field_def) = def.field(field) else {
		return Err(MapError::InvalidField {
			type_name: def.name.to_string(),
			field: field.to_owned(),
		});
	};
	if !field_def.exported {
		return Err(MapError::Unsettable {
			type_name: def.name.to_string(),
			field: field.to_owned(),
		});
	}

	let stored = fit(&field_def.ty, new).map_err(|got| MapError::TypeMismatch {
		type_name: def.name.to_string(),
		field: field.to_owned(),
		expected: field_def.ty.to_string(),
		got,
	})?;

	match record.get_mut(field) {
		Some(slot) => *slot = stored,
		None => record.fields.push(FieldValue {
			name: field_def.name.clone(),
			value: stored,
		}),
	}
	Ok(())
}

/// Whether `value` already has the exact shape of `ty`.
pub fn accepts(ty: &FieldType, value: &Value) -> bool {
	match (ty, value) {
		(FieldType::Any, _) => true,
		(FieldType::Bool, Value::Bool(_)) | (FieldType::Int, Value::Int(_)) | (FieldType::Float, Value::Float(_)) | (FieldType::String, Value::String(_)) => true,
		(FieldType::Record(name), Value::Record(record)) => record.type_name == *name,
		(FieldType::Seq(elem), Value::Seq(items)) => items.iter().all(|item| accepts(elem, item)),
		(FieldType::Ref(_), Value::Null) => true,
		(FieldType::Ref(inner), Value::Ref(target)) => accepts(inner, target),
		_ => false,
	}
}

/// Reshape `value` to fit `ty`, returning the rejected kind on failure.
pub(crate) fn fit(ty: &FieldType, value: Value) -> std::result::Result<Value, &'static str> {
	if accepts(ty, &value) {
		return Ok(value);
	}

	match (ty, value) {
		(FieldType::Ref(inner), value) => fit(inner, value).map(|item| Value::Ref(Box::new(item))),
		(_, Value::Ref(target)) => fit(ty, *target),
		(_, Value::Null) => Err("null"),
		(FieldType::Seq(elem), Value::Seq(items)) => items
			.into_iter()
			.map(|item| fit(elem, item))
			.collect::<std::result::Result<Vec<_>, _>>()
			.map(Value::Seq),
		(ty, value) => {
			let got = value.kind_name();
			let kind = Kind::try_from(ty).map_err(|_| got)?;
			to_kind(&value, kind).map_err(|_| got)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::{accepts, set_field_value};
	use crate::mapping::{FieldDef, FieldType, MapError, RecordDef, Schema, Value};

	fn schema() -> Schema {
		Schema::new(vec![
			RecordDef::new("Args")
				.with_field(FieldDef::new("ID", FieldType::Int))
				.with_field(FieldDef::new("Label", FieldType::String))
				.with_field(FieldDef::new("IDs", FieldType::parse("[int]").expect("seq")))
				.with_field(FieldDef::new("Parent", FieldType::parse("*int").expect("ref")))
				.with_field(FieldDef::new("hidden", FieldType::Int).private()),
		])
		.expect("schema")
	}

	fn args(schema: &Schema) -> Value {
		Value::Record(schema.zero_record("Args").expect("zero"))
	}

	fn id_of(value: &Value) -> Option<&Value> {
		value.as_record().and_then(|record| record.get("ID"))
	}

	#[test]
	fn every_primitive_converges_on_int_field() {
		let schema = schema();
		for input in [Value::Int(1), Value::from("1"), Value::Float(1.1), Value::Bool(true)] {
			let mut dest = args(&schema);
			set_field_value(&schema, &mut dest, "ID", input.clone()).unwrap_or_else(|err| panic!("{input:?}: {err}"));
			assert_eq!(id_of(&dest), Some(&Value::Int(1)), "input {input:?}");
		}
	}

	#[test]
	fn int_renders_into_string_field() {
		let schema = schema();
		let mut dest = args(&schema);
		set_field_value(&schema, &mut dest, "Label", Value::Int(9)).expect("coerces");
		assert_eq!(dest.as_record().and_then(|record| record.get("Label")), Some(&Value::from("9")));
	}

	#[test]
	fn unparseable_text_is_a_type_mismatch() {
		let schema = schema();
		let mut dest = args(&schema);
		let err = set_field_value(&schema, &mut dest, "ID", Value::from("abc")).expect_err("abc is not an int");
		assert!(matches!(err, MapError::TypeMismatch { ref expected, got: "string", .. } if expected == "int"));
		assert_eq!(id_of(&dest), Some(&Value::Int(0)));
	}

	#[test]
	fn missing_and_private_fields_are_rejected() {
		let schema = schema();
		let mut dest = args(&schema);
		assert!(matches!(
			set_field_value(&schema, &mut dest, "Nope", Value::Int(1)),
			Err(MapError::InvalidField { .. })
		));
		assert!(matches!(
			set_field_value(&schema, &mut dest, "hidden", Value::Int(1)),
			Err(MapError::Unsettable { .. })
		));
	}

	#[test]
	fn non_record_destination_is_not_a_struct() {
		let schema = schema();
		let mut dest = Value::Int(3);
		let err = set_field_value(&schema, &mut dest, "ID", Value::Int(1)).expect_err("int has no fields");
		assert!(matches!(err, MapError::NotAStruct { got: "int" }));
		assert_eq!(dest, Value::Int(3));
	}

	#[test]
	fn destination_behind_ref_is_written_in_place() {
		let schema = schema();
		let mut dest = Value::Ref(Box::new(args(&schema)));
		set_field_value(&schema, &mut dest, "ID", Value::Int(5)).expect("assigns through ref");
		let Value::Ref(inner) = &dest else {
			panic!("ref should be preserved");
		};
		assert_eq!(id_of(inner), Some(&Value::Int(5)));
	}

	#[test]
	fn sequences_coerce_element_wise() {
		let schema = schema();
		let mut dest = args(&schema);
		set_field_value(&schema, &mut dest, "IDs", Value::from(vec!["1", "2", "3"])).expect("elements coerce");
		assert_eq!(
			dest.as_record().and_then(|record| record.get("IDs")),
			Some(&Value::from(vec![1_i64, 2, 3]))
		);

		let err = set_field_value(&schema, &mut dest, "IDs", Value::from(vec!["1", "x"])).expect_err("x is not an int");
		assert!(matches!(err, MapError::TypeMismatch { .. }));
	}

	#[test]
	fn ref_fields_wrap_plain_values() {
		let schema = schema();
		let mut dest = args(&schema);
		set_field_value(&schema, &mut dest, "Parent", Value::from("4")).expect("wraps");
		assert_eq!(
			dest.as_record().and_then(|record| record.get("Parent")),
			Some(&Value::Ref(Box::new(Value::Int(4))))
		);
		assert!(accepts(&FieldType::parse("*int").expect("ref"), &Value::Null));
	}
}
