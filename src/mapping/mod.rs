mod assign;
mod convert;
mod error;
mod flatten;
mod json;
mod kind;
mod path;
mod reflect;
mod schema;
mod value;

/// Single-field assignment with coercion.
pub use assign::{accepts, set_field_value};
/// Tag-driven record conversion entry points, options, and reports.
pub use convert::{
	ConvertOptions, CopyReport, DEFAULT_TAG_KEY, SkippedField, map_to_struct, map_to_struct_with, struct_to_struct, struct_to_struct_with,
};
/// Error and result aliases.
pub use error::{MapError, Result};
/// Record-to-map flattening.
pub use flatten::{struct_to_map, try_struct_to_map};
/// Untyped JSON object decoding.
pub use json::flat_map_from_json;
/// Primitive kinds and coercion functions.
pub use kind::{Kind, parse_bool_literal, to_bool, to_float, to_int, to_kind, to_string};
/// Dotted conversion paths and tag alternatives.
pub use path::{ConversionPath, TagPaths};
/// Schema-backed introspection helpers.
pub use reflect::{field_names, is_exported, is_struct, search_field_name, search_field_names, type_name, type_of, value_of, value_of_mut};
/// Record schema declarations.
pub use schema::{FieldDef, FieldType, RecordDef, Schema};
/// Dynamic runtime value types.
pub use value::{FieldValue, FlatMap, RecordValue, Value};
