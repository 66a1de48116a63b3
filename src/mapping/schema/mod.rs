use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::mapping::{FieldValue, MapError, RecordValue, Result, Value};

const RESERVED_NAMES: &[&str] = &["bool", "int", "float", "float64", "string", "any"];

/// Declared type of a record field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FieldType {
	/// Boolean.
	Bool,
	/// Signed integer.
	Int,
	/// Double-precision float.
	Float,
	/// Text.
	String,
	/// Untyped slot accepting any value.
	Any,
	/// Named record type.
	Record(Box<str>),
	/// Homogeneous sequence.
	Seq(Box<FieldType>),
	/// Nullable by-reference indirection.
	Ref(Box<FieldType>),
}

impl FieldType {
	/// Parse the textual type form (`int`, `[Z]`, `*Y`, `Y`, ...).
	pub fn parse(text: &str) -> Result<Self> {
		let invalid = || MapError::InvalidFieldType { text: text.to_owned() };

		if let Some(inner) = text.strip_prefix('[') {
			let inner = inner.strip_suffix(']').ok_or_else(invalid)?;
			return Ok(FieldType::Seq(Box::new(FieldType::parse(inner).map_err(|_| invalid())?)));
		}
		if let Some(inner) = text.strip_prefix('*') {
			return Ok(FieldType::Ref(Box::new(FieldType::parse(inner).map_err(|_| invalid())?)));
		}

		match text {
			"bool" => Ok(FieldType::Bool),
			"int" => Ok(FieldType::Int),
			"float" | "float64" => Ok(FieldType::Float),
			"string" => Ok(FieldType::String),
			"any" => Ok(FieldType::Any),
			name if is_identifier(name) => Ok(FieldType::Record(name.into())),
			_ => Err(invalid()),
		}
	}

	/// Strip every level of `Ref` indirection.
	pub fn resolved(&self) -> &FieldType {
		match self {
			FieldType::Ref(inner) => inner.resolved(),
			other => other,
		}
	}

	/// Whether the resolved type is a record.
	pub fn is_record(&self) -> bool {
		matches!(self.resolved(), FieldType::Record(_))
	}

	/// Record name of the resolved type, if it is a record.
	pub fn record_name(&self) -> Option<&str> {
		match self.resolved() {
			FieldType::Record(name) => Some(name.as_ref()),
			_ => None,
		}
	}
}

impl fmt::Display for FieldType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			FieldType::Bool => f.write_str("bool"),
			FieldType::Int => f.write_str("int"),
			FieldType::Float => f.write_str("float"),
			FieldType::String => f.write_str("string"),
			FieldType::Any => f.write_str("any"),
			FieldType::Record(name) => f.write_str(name),
			FieldType::Seq(inner) => write!(f, "[{inner}]"),
			FieldType::Ref(inner) => write!(f, "*{inner}"),
		}
	}
}

impl TryFrom<String> for FieldType {
	type Error = MapError;

	fn try_from(text: String) -> Result<Self> {
		FieldType::parse(&text)
	}
}

impl From<FieldType> for String {
	fn from(ty: FieldType) -> Self {
		ty.to_string()
	}
}

/// One declared record field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
	/// Field name, unique within its record.
	pub name: Box<str>,
	/// Declared type.
	#[serde(rename = "type")]
	pub ty: FieldType,
	/// Whether the field takes part in conversion.
	#[serde(default = "default_exported")]
	pub exported: bool,
	/// Annotation key to raw annotation text, e.g. `struct -> "Y.ID,ID"`.
	#[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
	pub tags: BTreeMap<String, String>,
}

fn default_exported() -> bool {
	true
}

impl FieldDef {
	/// Exported, untagged field.
	pub fn new(name: &str, ty: FieldType) -> Self {
		Self {
			name: name.into(),
			ty,
			exported: true,
			tags: BTreeMap::new(),
		}
	}

	/// Attach an annotation under `key`.
	pub fn with_tag(mut self, key: &str, value: &str) -> Self {
		self.tags.insert(key.to_owned(), value.to_owned());
		self
	}

	/// Mark the field as not exported.
	pub fn private(mut self) -> Self {
		self.exported = false;
		self
	}

	/// Raw annotation text under `key`.
	pub fn tag(&self, key: &str) -> Option<&str> {
		self.tags.get(key).map(String::as_str)
	}

	/// Comma-separated annotation values under `key`; empty when the key is absent.
	pub fn tag_values<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a str> + use<'a> {
		self.tag(key).into_iter().flat_map(|text| text.split(','))
	}
}

/// One declared record type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDef {
	/// Record type name.
	pub name: Box<str>,
	/// Fields in declaration order.
	#[serde(default)]
	pub fields: Vec<FieldDef>,
}

impl RecordDef {
	/// Record with no fields.
	pub fn new(name: &str) -> Self {
		Self {
			name: name.into(),
			fields: Vec::new(),
		}
	}

	/// Append a field declaration.
	pub fn with_field(mut self, field: FieldDef) -> Self {
		self.fields.push(field);
		self
	}

	/// Look up a field declaration by name.
	pub fn field(&self, name: &str) -> Option<&FieldDef> {
		self.fields.iter().find(|field| field.name.as_ref() == name)
	}

	/// Whether at least one field is exported.
	pub fn is_exported(&self) -> bool {
		self.fields.iter().any(|field| field.exported)
	}
}

/// Validated set of record declarations.
#[derive(Debug, Clone, Default)]
pub struct Schema {
	records: Vec<RecordDef>,
	by_name: HashMap<Box<str>, usize>,
}

#[derive(Deserialize)]
struct SchemaFile {
	records: Vec<RecordDef>,
}

impl Schema {
	/// Validate and index record declarations.
	pub fn new(records: Vec<RecordDef>) -> Result<Self> {
		let mut by_name = HashMap::with_capacity(records.len());
		for (idx, record) in records.iter().enumerate() {
			if RESERVED_NAMES.contains(&record.name.as_ref()) || !is_identifier(&record.name) {
				return Err(MapError::ReservedRecordName {
					name: record.name.to_string(),
				});
			}
			if by_name.insert(record.name.clone(), idx).is_some() {
				return Err(MapError::DuplicateRecord {
					name: record.name.to_string(),
				});
			}
		}

		let schema = Self { records, by_name };
		for record in &schema.records {
			schema.check_fields(record)?;
		}
		for record in &schema.records {
			schema.check_by_value_cycle(record)?;
		}
		Ok(schema)
	}

	/// Parse and validate a JSON schema document.
	pub fn from_json_str(text: &str) -> Result<Self> {
		let file: SchemaFile = serde_json::from_str(text)?;
		Self::new(file.records)
	}

	/// Parse and validate a JSON schema document from bytes.
	pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
		let file: SchemaFile = serde_json::from_slice(bytes)?;
		Self::new(file.records)
	}

	/// Read, parse, and validate a JSON schema file.
	pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
		let bytes = std::fs::read(path)?;
		Self::from_json_slice(&bytes)
	}

	/// All records in declaration order.
	pub fn records(&self) -> &[RecordDef] {
		&self.records
	}

	/// Look up a record declaration by name.
	pub fn record(&self, name: &str) -> Option<&RecordDef> {
		self.by_name.get(name).map(|idx| &self.records[*idx])
	}

	/// Look up a record declaration by name, failing when it is unknown.
	pub fn require_record(&self, name: &str) -> Result<&RecordDef> {
		self.record(name).ok_or_else(|| MapError::UnknownRecord { name: name.to_owned() })
	}

	/// Zero value of a declared type.
	pub fn zero_value(&self, ty: &FieldType) -> Result<Value> {
		Ok(match ty {
			FieldType::Bool => Value::Bool(false),
			FieldType::Int => Value::Int(0),
			FieldType::Float => Value::Float(0.0),
			FieldType::String => Value::String("".into()),
			FieldType::Any | FieldType::Ref(_) => Value::Null,
			FieldType::Seq(_) => Value::Seq(Vec::new()),
			FieldType::Record(name) => Value::Record(self.zero_record(name)?),
		})
	}

	/// Zero-valued instance of a record with every declared field present.
	pub fn zero_record(&self, name: &str) -> Result<RecordValue> {
		let def = self.require_record(name)?;
		let mut fields = Vec::with_capacity(def.fields.len());
		for field in &def.fields {
			fields.push(FieldValue {
				name: field.name.clone(),
				value: self.zero_value(&field.ty)?,
			});
		}
		Ok(RecordValue {
			type_name: def.name.clone(),
			fields,
		})
	}

	fn check_fields(&self, record: &RecordDef) -> Result<()> {
		for (idx, field) in record.fields.iter().enumerate() {
			if record.fields[..idx].iter().any(|prev| prev.name == field.name) {
				return Err(MapError::DuplicateField {
					record: record.name.to_string(),
					field: field.name.to_string(),
				});
			}
			if let Some(name) = referenced_record(&field.ty) {
				self.require_record(name)?;
			}
		}
		Ok(())
	}

	fn check_by_value_cycle(&self, root: &RecordDef) -> Result<()> {
		let mut stack = vec![root.name.as_ref()];
		self.walk_by_value(root, &mut stack)
	}

	fn walk_by_value<'a>(&'a self, record: &'a RecordDef, stack: &mut Vec<&'a str>) -> Result<()> {
		for field in &record.fields {
			let FieldType::Record(name) = &field.ty else {
				continue;
			};
			if stack.contains(&name.as_ref()) {
				return Err(MapError::RecursiveRecord { name: name.to_string() });
			}
			let nested = self.require_record(name)?;
			stack.push(name);
			self.walk_by_value(nested, stack)?;
			stack.pop();
		}
		Ok(())
	}
}

fn referenced_record(ty: &FieldType) -> Option<&str> {
	match ty {
		FieldType::Record(name) => Some(name.as_ref()),
		FieldType::Seq(inner) | FieldType::Ref(inner) => referenced_record(inner),
		_ => None,
	}
}

fn is_identifier(text: &str) -> bool {
	let mut chars = text.chars();
	let Some(first) = chars.next() else {
		return false;
	};
	(first.is_ascii_alphabetic() || first == '_') && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
