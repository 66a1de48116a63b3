use crate::mapping::{RecordDef, Schema, Value};

/// Follow any number of `Ref` levels to the underlying value.
pub fn value_of(value: &Value) -> &Value {
	match value {
		Value::Ref(inner) => value_of(inner),
		other => other,
	}
}

/// Mutable variant of [`value_of`].
pub fn value_of_mut(value: &mut Value) -> &mut Value {
	match value {
		Value::Ref(inner) => value_of_mut(inner),
		other => other,
	}
}

/// Record declaration behind `value`, looking through `Ref` indirection.
pub fn type_of<'s>(schema: &'s Schema, value: &Value) -> Option<&'s RecordDef> {
	match value_of(value) {
		Value::Record(record) => schema.record(&record.type_name),
		_ => None,
	}
}

/// Whether `value` resolves to a record instance.
pub fn is_struct(value: &Value) -> bool {
	matches!(value_of(value), Value::Record(_))
}

/// Whether `value` is a declared record with at least one exported field.
pub fn is_exported(schema: &Schema, value: &Value) -> bool {
	type_of(schema, value).is_some_and(RecordDef::is_exported)
}

/// Declared record name, or the logical kind name for non-record values.
pub fn type_name(value: &Value) -> &str {
	match value_of(value) {
		Value::Record(record) => record.type_name.as_ref(),
		other => other.kind_name(),
	}
}

/// Declared field names in order; empty for non-record or undeclared values.
pub fn field_names<'s>(schema: &'s Schema, value: &Value) -> Vec<&'s str> {
	type_of(schema, value)
		.map(|def| def.fields.iter().map(|field| field.name.as_ref()).collect())
		.unwrap_or_default()
}

/// First field whose `tag_key` annotation lists `tag_value`.
pub fn search_field_name<'s>(schema: &'s Schema, value: &Value, tag_key: &str, tag_value: &str) -> Option<&'s str> {
	let def = type_of(schema, value)?;
	def.fields
		.iter()
		.find(|field| field.tag_values(tag_key).any(|item| item == tag_value))
		.map(|field| field.name.as_ref())
}

/// Every field whose `tag_key` annotation lists `tag_value`, in declaration order.
pub fn search_field_names<'s>(schema: &'s Schema, value: &Value, tag_key: &str, tag_value: &str) -> Vec<&'s str> {
	let Some(def) = type_of(schema, value) else {
		return Vec::new();
	};
	def.fields
		.iter()
		.filter(|field| field.tag_values(tag_key).any(|item| item == tag_value))
		.map(|field| field.name.as_ref())
		.collect()
}

#[cfg(test)]
mod tests {
	use super::{field_names, is_exported, is_struct, search_field_name, search_field_names, type_name, type_of, value_of};
	use crate::mapping::{FieldDef, FieldType, RecordDef, Schema, Value};

	fn schema() -> Schema {
		Schema::new(vec![
			RecordDef::new("A")
				.with_field(FieldDef::new("ID", FieldType::String).with_tag("struct", "ID"))
				.with_field(FieldDef::new("YID", FieldType::String).with_tag("struct", "Y.ID,ID"))
				.with_field(FieldDef::new("Name", FieldType::String)),
			RecordDef::new("Hidden").with_field(FieldDef::new("wall", FieldType::Int).private()),
		])
		.expect("schema")
	}

	#[test]
	fn refs_are_followed_to_the_record() {
		let schema = schema();
		let record = Value::Record(schema.zero_record("A").expect("zero"));
		let wrapped = Value::Ref(Box::new(Value::Ref(Box::new(record.clone()))));

		assert_eq!(value_of(&wrapped), &record);
		assert!(is_struct(&wrapped));
		assert_eq!(type_of(&schema, &wrapped).map(|def| def.name.as_ref()), Some("A"));
		assert_eq!(type_name(&wrapped), "A");
	}

	#[test]
	fn primitives_are_not_structs() {
		let schema = schema();
		assert!(!is_struct(&Value::Int(0)));
		assert_eq!(type_name(&Value::Int(0)), "int");
		assert!(type_of(&schema, &Value::from("A")).is_none());
		assert!(field_names(&schema, &Value::Int(1)).is_empty());
	}

	#[test]
	fn field_names_follow_declaration_order() {
		let schema = schema();
		let record = Value::Record(schema.zero_record("A").expect("zero"));
		assert_eq!(field_names(&schema, &record), vec!["ID", "YID", "Name"]);
	}

	#[test]
	fn exported_check_needs_one_visible_field() {
		let schema = schema();
		assert!(is_exported(&schema, &Value::Record(schema.zero_record("A").expect("zero"))));
		assert!(!is_exported(&schema, &Value::Record(schema.zero_record("Hidden").expect("zero"))));
	}

	#[test]
	fn tag_search_matches_any_listed_alternative() {
		let schema = schema();
		let record = Value::Record(schema.zero_record("A").expect("zero"));

		assert_eq!(search_field_name(&schema, &record, "struct", "ID"), Some("ID"));
		assert_eq!(search_field_names(&schema, &record, "struct", "ID"), vec!["ID", "YID"]);
		assert_eq!(search_field_names(&schema, &record, "struct", "Y.ID"), vec!["YID"]);
		assert_eq!(search_field_name(&schema, &record, "struct", "Name"), None);
		assert!(search_field_names(&schema, &record, "json", "ID").is_empty());
	}
}
