use thiserror::Error;

use crate::mapping::Kind;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, MapError>;

/// Errors produced while coercing values, validating schemas, and converting records.
#[derive(Debug, Error)]
pub enum MapError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Schema or input document is not valid JSON.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	/// Source value shape cannot be coerced into the requested kind.
	#[error("cannot coerce {got} into {target}")]
	UnsupportedKind {
		/// Requested target kind.
		target: Kind,
		/// Logical kind of the source value.
		got: &'static str,
	},
	/// Requested coercion target is not a primitive kind.
	#[error("unsupported coercion target: {target}")]
	UnsupportedTargetKind {
		/// Textual form of the rejected target.
		target: String,
	},
	/// Text does not lex as the requested primitive.
	#[error("cannot parse {text:?} as {target}")]
	Parse {
		/// Requested target kind.
		target: Kind,
		/// Offending input text.
		text: String,
	},
	/// Operation requires a record-shaped value.
	#[error("expected a record, got {got}")]
	NotAStruct {
		/// Logical kind of the value that was supplied.
		got: &'static str,
	},
	/// Record declares no exported fields.
	#[error("record {type_name} has no exported fields")]
	Unexported {
		/// Record type name.
		type_name: String,
	},
	/// Named field is not declared on the record.
	#[error("invalid field {field} on {type_name}")]
	InvalidField {
		/// Record type name.
		type_name: String,
		/// Requested field name.
		field: String,
	},
	/// Field exists but cannot be assigned.
	#[error("cannot set field {field} on {type_name}")]
	Unsettable {
		/// Record type name.
		type_name: String,
		/// Field name.
		field: String,
	},
	/// Value does not fit the field type, even after coercion.
	#[error("field {type_name}.{field} expects {expected}, got {got}")]
	TypeMismatch {
		/// Record type name.
		type_name: String,
		/// Field name.
		field: String,
		/// Declared field type.
		expected: String,
		/// Logical kind of the rejected value.
		got: &'static str,
	},
	/// None of the alternative source paths resolved.
	#[error("no source value at {paths}")]
	UnresolvedPath {
		/// Comma-separated alternatives that were tried.
		paths: String,
	},
	/// Tag path syntax is invalid.
	#[error("invalid conversion path: {path:?}")]
	InvalidConversionPath {
		/// Original tag path text.
		path: String,
	},
	/// Nested record population exceeded the configured depth.
	#[error("conversion depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Record type is not declared in the schema.
	#[error("unknown record type: {name}")]
	UnknownRecord {
		/// Requested record name.
		name: String,
	},
	/// Record name declared more than once.
	#[error("duplicate record type: {name}")]
	DuplicateRecord {
		/// Repeated record name.
		name: String,
	},
	/// Field name declared more than once within a record.
	#[error("duplicate field {field} on {record}")]
	DuplicateField {
		/// Record type name.
		record: String,
		/// Repeated field name.
		field: String,
	},
	/// Record name collides with a primitive type name.
	#[error("record name {name} is reserved")]
	ReservedRecordName {
		/// Rejected record name.
		name: String,
	},
	/// Record contains itself by value.
	#[error("record {name} contains itself by value")]
	RecursiveRecord {
		/// Record type name on the cycle.
		name: String,
	},
	/// Field type text could not be parsed.
	#[error("invalid field type: {text:?}")]
	InvalidFieldType {
		/// Original type text.
		text: String,
	},
	/// JSON document shape does not match the declared type.
	#[error("json shape mismatch: expected {expected}, got {got}")]
	JsonShape {
		/// Declared type text.
		expected: String,
		/// JSON kind that was found.
		got: &'static str,
	},
}
