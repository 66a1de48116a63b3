use serde_json::{Map, Value as JsonValue};

use crate::mapping::{FieldType, FieldValue, FlatMap, MapError, RecordValue, Result, Schema, Value};

impl Value {
	/// Untyped conversion from a JSON document.
	///
	/// Objects become maps and arrays become sequences. Numbers that fit an
	/// `i64` become `Int`, every other number becomes `Float`.
	pub fn from_json(json: &JsonValue) -> Value {
		match json {
			JsonValue::Null => Value::Null,
			JsonValue::Bool(v) => Value::Bool(*v),
			JsonValue::Number(v) => match v.as_i64() {
				Some(int) => Value::Int(int),
				None => Value::Float(v.as_f64().unwrap_or(f64::NAN)),
			},
			JsonValue::String(v) => Value::String(v.as_str().into()),
			JsonValue::Array(items) => Value::Seq(items.iter().map(Value::from_json).collect()),
			JsonValue::Object(map) => Value::Map(map.iter().map(|(key, item)| (key.clone(), Value::from_json(item))).collect()),
		}
	}

	/// Render as JSON; records and maps become objects and refs are transparent.
	///
	/// Every record field is written, private ones included. Use
	/// [`Schema::value_to_json`] for output that honours field visibility.
	pub fn to_json(&self) -> JsonValue {
		match self {
			Value::Null => JsonValue::Null,
			Value::Bool(v) => serde_json::json!(v),
			Value::Int(v) => serde_json::json!(v),
			Value::Float(v) => serde_json::Number::from_f64(*v).map_or(JsonValue::Null, JsonValue::Number),
			Value::String(v) => serde_json::json!(v.as_ref()),
			Value::Seq(items) => JsonValue::Array(items.iter().map(Value::to_json).collect()),
			Value::Map(map) => JsonValue::Object(map.iter().map(|(key, item)| (key.clone(), item.to_json())).collect()),
			Value::Record(record) => {
				let out: Map<String, JsonValue> = record.fields.iter().map(|field| (field.name.to_string(), field.value.to_json())).collect();
				JsonValue::Object(out)
			}
			Value::Ref(inner) => inner.to_json(),
		}
	}
}

impl Schema {
	/// Render `value` as JSON, leaving out record fields that are not exported.
	///
	/// Records of undeclared types render every field.
	pub fn value_to_json(&self, value: &Value) -> JsonValue {
		match value {
			Value::Record(record) => {
				let def = self.record(&record.type_name);
				let out: Map<String, JsonValue> = record
					.fields
					.iter()
					.filter(|field| def.is_none_or(|def| def.field(&field.name).is_some_and(|item| item.exported)))
					.map(|field| (field.name.to_string(), self.value_to_json(&field.value)))
					.collect();
				JsonValue::Object(out)
			}
			Value::Seq(items) => JsonValue::Array(items.iter().map(|item| self.value_to_json(item)).collect()),
			Value::Map(map) => JsonValue::Object(map.iter().map(|(key, item)| (key.clone(), self.value_to_json(item))).collect()),
			Value::Ref(inner) => self.value_to_json(inner),
			other => other.to_json(),
		}
	}

	/// Decode `json` as a value of declared type `ty`.
	pub fn value_from_json(&self, ty: &FieldType, json: &JsonValue) -> Result<Value> {
		let mismatch = || MapError::JsonShape {
			expected: ty.to_string(),
			got: json_kind(json),
		};

		match (ty, json) {
			(FieldType::Any, _) => Ok(Value::from_json(json)),
			(FieldType::Ref(_), JsonValue::Null) => Ok(Value::Null),
			(FieldType::Ref(inner), _) => Ok(Value::Ref(Box::new(self.value_from_json(inner, json)?))),
			(FieldType::Bool, JsonValue::Bool(v)) => Ok(Value::Bool(*v)),
			(FieldType::Int, JsonValue::Number(v)) => v.as_i64().map(Value::Int).ok_or_else(mismatch),
			(FieldType::Float, JsonValue::Number(v)) => v.as_f64().map(Value::Float).ok_or_else(mismatch),
			(FieldType::String, JsonValue::String(v)) => Ok(Value::String(v.as_str().into())),
			(FieldType::Seq(elem), JsonValue::Array(items)) => items
				.iter()
				.map(|item| self.value_from_json(elem, item))
				.collect::<Result<Vec<_>>>()
				.map(Value::Seq),
			(FieldType::Record(name), JsonValue::Object(_)) => self.record_from_json(name, json).map(Value::Record),
			_ => Err(mismatch()),
		}
	}

	/// Decode a JSON object as an instance of record `name`.
	///
	/// Missing keys take the field's zero value and unknown keys are ignored.
	pub fn record_from_json(&self, name: &str, json: &JsonValue) -> Result<RecordValue> {
		let def = self.require_record(name)?;
		let JsonValue::Object(object) = json else {
			return Err(MapError::JsonShape {
				expected: def.name.to_string(),
				got: json_kind(json),
			});
		};

		let mut fields = Vec::with_capacity(def.fields.len());
		for field in &def.fields {
			let value = match object.get(field.name.as_ref()) {
				Some(item) => self.value_from_json(&field.ty, item)?,
				None => self.zero_value(&field.ty)?,
			};
			fields.push(FieldValue {
				name: field.name.clone(),
				value,
			});
		}
		Ok(RecordValue {
			type_name: def.name.clone(),
			fields,
		})
	}
}

/// Untyped conversion of a JSON object into a flattened map.
pub fn flat_map_from_json(json: &JsonValue) -> Result<FlatMap> {
	match Value::from_json(json) {
		Value::Map(map) => Ok(map),
		_ => Err(MapError::JsonShape {
			expected: "map".to_owned(),
			got: json_kind(json),
		}),
	}
}

fn json_kind(json: &JsonValue) -> &'static str {
	match json {
		JsonValue::Null => "null",
		JsonValue::Bool(_) => "bool",
		JsonValue::Number(_) => "number",
		JsonValue::String(_) => "string",
		JsonValue::Array(_) => "array",
		JsonValue::Object(_) => "object",
	}
}
