use std::collections::BTreeMap;
use std::fmt;

/// Flattened view of a record: field name to primitive, nested map, or sequence.
pub type FlatMap = BTreeMap<String, Value>;

/// Dynamic runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Absent value, also the zero value of `Ref` and `Any` fields.
	Null,
	/// Boolean.
	Bool(bool),
	/// Signed integer.
	Int(i64),
	/// Double-precision float.
	Float(f64),
	/// UTF-8 text.
	String(Box<str>),
	/// Ordered homogeneous sequence.
	Seq(Vec<Value>),
	/// String-keyed nested map.
	Map(FlatMap),
	/// Instance of a declared record type.
	Record(RecordValue),
	/// By-reference indirection to another value.
	Ref(Box<Value>),
}

/// Instance of a declared record type.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordValue {
	/// Declared record type name.
	pub type_name: Box<str>,
	/// Field values in declaration order.
	pub fields: Vec<FieldValue>,
}

/// One named field value inside a record.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
	/// Field name.
	pub name: Box<str>,
	/// Current field value.
	pub value: Value,
}

impl Value {
	/// Logical kind label used in diagnostics.
	pub fn kind_name(&self) -> &'static str {
		match self {
			Value::Null => "null",
			Value::Bool(_) => "bool",
			Value::Int(_) => "int",
			Value::Float(_) => "float",
			Value::String(_) => "string",
			Value::Seq(_) => "seq",
			Value::Map(_) => "map",
			Value::Record(_) => "record",
			Value::Ref(_) => "ref",
		}
	}

	/// Build a string value.
	pub fn string(text: impl Into<String>) -> Self {
		Value::String(text.into().into_boxed_str())
	}

	/// Borrow the nested map, if this is one.
	pub fn as_map(&self) -> Option<&FlatMap> {
		match self {
			Value::Map(map) => Some(map),
			_ => None,
		}
	}

	/// Borrow the record, if this is one.
	pub fn as_record(&self) -> Option<&RecordValue> {
		match self {
			Value::Record(record) => Some(record),
			_ => None,
		}
	}
}

impl RecordValue {
	/// Look up a field value by name.
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.fields.iter().find(|field| field.name.as_ref() == name).map(|field| &field.value)
	}

	/// Mutable lookup of a field value by name.
	pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
		self.fields.iter_mut().find(|field| field.name.as_ref() == name).map(|field| &mut field.value)
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Value::Bool(value)
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Value::Int(value)
	}
}

impl From<i32> for Value {
	fn from(value: i32) -> Self {
		Value::Int(i64::from(value))
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Value::Float(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::string(value)
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::String(value.into_boxed_str())
	}
}

impl From<RecordValue> for Value {
	fn from(value: RecordValue) -> Self {
		Value::Record(value)
	}
}

impl From<FlatMap> for Value {
	fn from(value: FlatMap) -> Self {
		Value::Map(value)
	}
}

impl<T: Into<Value>> From<Vec<T>> for Value {
	fn from(value: Vec<T>) -> Self {
		Value::Seq(value.into_iter().map(Into::into).collect())
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Null => f.write_str("null"),
			Value::Bool(v) => write!(f, "{v}"),
			Value::Int(v) => write!(f, "{v}"),
			Value::Float(v) => write!(f, "{v}"),
			Value::String(v) => f.write_str(v),
			Value::Seq(items) => {
				f.write_str("[")?;
				for (idx, item) in items.iter().enumerate() {
					if idx > 0 {
						f.write_str(" ")?;
					}
					write!(f, "{item}")?;
				}
				f.write_str("]")
			}
			Value::Map(map) => {
				f.write_str("map[")?;
				for (idx, (key, item)) in map.iter().enumerate() {
					if idx > 0 {
						f.write_str(" ")?;
					}
					write!(f, "{key}:{item}")?;
				}
				f.write_str("]")
			}
			Value::Record(record) => write!(f, "{record}"),
			Value::Ref(inner) => write!(f, "&{inner}"),
		}
	}
}

impl fmt::Display for RecordValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("{")?;
		for (idx, field) in self.fields.iter().enumerate() {
			if idx > 0 {
				f.write_str(" ")?;
			}
			write!(f, "{}", field.value)?;
		}
		f.write_str("}")
	}
}
