use std::fmt;
use std::str::FromStr;

use crate::mapping::{FieldType, MapError, Result, Value, value_of};

/// Primitive representation a value can be coerced into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
	/// Text.
	String,
	/// Signed integer.
	Int,
	/// Double-precision float.
	Float,
	/// Boolean.
	Bool,
}

impl Kind {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Kind::String => "string",
			Kind::Int => "int",
			Kind::Float => "float",
			Kind::Bool => "bool",
		}
	}
}

impl fmt::Display for Kind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Kind {
	type Err = MapError;

	fn from_str(text: &str) -> Result<Self> {
		match text {
			"string" => Ok(Kind::String),
			"int" => Ok(Kind::Int),
			"float" | "float64" => Ok(Kind::Float),
			"bool" => Ok(Kind::Bool),
			_ => Err(MapError::UnsupportedTargetKind { target: text.to_owned() }),
		}
	}
}

impl TryFrom<&FieldType> for Kind {
	type Error = MapError;

	fn try_from(ty: &FieldType) -> Result<Self> {
		match ty {
			FieldType::String => Ok(Kind::String),
			FieldType::Int => Ok(Kind::Int),
			FieldType::Float => Ok(Kind::Float),
			FieldType::Bool => Ok(Kind::Bool),
			other => Err(MapError::UnsupportedTargetKind { target: other.to_string() }),
		}
	}
}

/// Coerce `value` into `kind`, returning the converted value.
pub fn to_kind(value: &Value, kind: Kind) -> Result<Value> {
	match kind {
		Kind::String => Ok(Value::String(to_string(value).into_boxed_str())),
		Kind::Int => to_int(value).map(Value::Int),
		Kind::Float => to_float(value).map(Value::Float),
		Kind::Bool => to_bool(value).map(Value::Bool),
	}
}

/// Render any value through its default textual form.
pub fn to_string(value: &Value) -> String {
	value_of(value).to_string()
}

/// Coerce into an integer: text is parsed base-10, floats truncate toward zero.
pub fn to_int(value: &Value) -> Result<i64> {
	match value_of(value) {
		Value::Int(v) => Ok(*v),
		Value::String(text) => text.parse::<i64>().map_err(|_| MapError::Parse {
			target: Kind::Int,
			text: text.to_string(),
		}),
		Value::Float(v) => Ok(v.trunc() as i64),
		Value::Bool(v) => Ok(i64::from(*v)),
		other => Err(unsupported(Kind::Int, other)),
	}
}

/// Coerce into a float: integers widen, text is parsed as decimal.
pub fn to_float(value: &Value) -> Result<f64> {
	match value_of(value) {
		Value::Float(v) => Ok(*v),
		Value::Int(v) => Ok(*v as f64),
		Value::String(text) => text.parse::<f64>().map_err(|_| MapError::Parse {
			target: Kind::Float,
			text: text.to_string(),
		}),
		Value::Bool(v) => Ok(if *v { 1.0 } else { 0.0 }),
		other => Err(unsupported(Kind::Float, other)),
	}
}

/// Coerce into a boolean.
///
/// Numbers are `true` only when strictly positive. Text must be one of the
/// literals accepted by [`parse_bool_literal`].
pub fn to_bool(value: &Value) -> Result<bool> {
	match value_of(value) {
		Value::Bool(v) => Ok(*v),
		Value::Int(v) => Ok(*v > 0),
		Value::Float(v) => Ok(*v > 0.0),
		Value::String(text) => parse_bool_literal(text).ok_or_else(|| MapError::Parse {
			target: Kind::Bool,
			text: text.to_string(),
		}),
		other => Err(unsupported(Kind::Bool, other)),
	}
}

/// Parse the strict boolean literal set (`1`, `t`, `true`, `0`, `f`, `false`, ...).
pub fn parse_bool_literal(text: &str) -> Option<bool> {
	match text {
		"1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
		"0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
		_ => None,
	}
}

fn unsupported(target: Kind, value: &Value) -> MapError {
	MapError::UnsupportedKind {
		target,
		got: value.kind_name(),
	}
}
