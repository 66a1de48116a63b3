use tracing::{debug, trace};

use crate::mapping::assign::{fit, set_record_field};
use crate::mapping::{
	ConversionPath, FieldDef, FieldType, FlatMap, MapError, RecordValue, Result, Schema, TagPaths, Value, try_struct_to_map, value_of, value_of_mut,
};

/// Annotation key read from field tags when none is configured.
pub const DEFAULT_TAG_KEY: &str = "struct";

/// Runtime behavior switches for record conversion.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
	/// Annotation key holding source paths.
	pub tag_key: String,
	/// Maximum nesting of record population.
	pub max_depth: u32,
}

impl Default for ConvertOptions {
	fn default() -> Self {
		Self {
			tag_key: DEFAULT_TAG_KEY.to_owned(),
			max_depth: 16,
		}
	}
}

/// One destination field left untouched by a conversion.
#[derive(Debug)]
pub struct SkippedField {
	/// Dotted destination path, with `[i]` for sequence elements.
	pub path: String,
	/// Why the field was not assigned.
	pub error: MapError,
}

/// Outcome of a best-effort conversion.
#[derive(Debug, Default)]
pub struct CopyReport {
	/// Fields that kept their previous value, in walk order.
	pub skipped: Vec<SkippedField>,
}

impl CopyReport {
	/// Whether every destination field was assigned.
	pub fn is_clean(&self) -> bool {
		self.skipped.is_empty()
	}

	/// Look up the skip entry for a destination path.
	pub fn find(&self, path: &str) -> Option<&SkippedField> {
		self.skipped.iter().find(|entry| entry.path == path)
	}

	fn skip(&mut self, path: String, error: MapError) {
		self.skipped.push(SkippedField { path, error });
	}
}

/// Copy `source` into the record behind `dest` using default options.
pub fn struct_to_struct(schema: &Schema, source: &Value, dest: &mut Value) -> Result<CopyReport> {
	struct_to_struct_with(schema, source, dest, &ConvertOptions::default())
}

/// Copy `source` into the record behind `dest`.
///
/// `source` is flattened first; each destination field is then resolved by
/// name or by its tag paths. Field-level failures are collected in the
/// returned report and leave the field untouched. Only a non-record
/// destination, or one without exported fields, fails the whole call.
pub fn struct_to_struct_with(schema: &Schema, source: &Value, dest: &mut Value, options: &ConvertOptions) -> Result<CopyReport> {
	let mut report = CopyReport::default();
	let map = match try_struct_to_map(schema, source) {
		Ok(map) => map,
		Err(error) => {
			report.skip("<source>".to_owned(), error);
			FlatMap::new()
		}
	};
	populate_root(schema, &map, dest, options, report)
}

/// Populate the record behind `dest` from a flattened map using default options.
pub fn map_to_struct(schema: &Schema, map: &FlatMap, dest: &mut Value) -> Result<CopyReport> {
	map_to_struct_with(schema, map, dest, &ConvertOptions::default())
}

/// Populate the record behind `dest` from a flattened map.
pub fn map_to_struct_with(schema: &Schema, map: &FlatMap, dest: &mut Value, options: &ConvertOptions) -> Result<CopyReport> {
	populate_root(schema, map, dest, options, CopyReport::default())
}

fn populate_root(schema: &Schema, map: &FlatMap, dest: &mut Value, options: &ConvertOptions, report: CopyReport) -> Result<CopyReport> {
	let got = value_of(dest).kind_name();
	let Value::Record(record) = value_of_mut(dest) else {
		return Err(MapError::NotAStruct { got });
	};

	let mut walker = Walker {
		schema,
		options,
		report,
		filling: Vec::new(),
	};
	walker.populate(map, record, "", 0)?;

	for entry in &walker.report.skipped {
		debug!(field = %entry.path, error = %entry.error, "field skipped");
	}
	Ok(walker.report)
}

struct Walker<'a> {
	schema: &'a Schema,
	options: &'a ConvertOptions,
	report: CopyReport,
	/// Record types currently being populated, outermost first.
	filling: Vec<&'a str>,
}

impl<'a> Walker<'a> {
	fn populate(&mut self, map: &FlatMap, record: &mut RecordValue, prefix: &str, depth: u32) -> Result<()> {
		if depth > self.options.max_depth {
			return Err(MapError::DepthExceeded {
				max_depth: self.options.max_depth,
			});
		}

		let schema = self.schema;
		let def = schema.require_record(&record.type_name)?;
		if !def.is_exported() {
			return Err(MapError::Unexported {
				type_name: def.name.to_string(),
			});
		}

		trace!(record = %def.name, depth, "populating record");
		self.filling.push(&def.name);
		for field in def.fields.iter().filter(|field| field.exported) {
			let path = join_path(prefix, &field.name);
			if let Err(error) = self.populate_field(map, record, field, &path, depth) {
				self.report.skip(path, error);
			}
		}
		self.filling.pop();
		Ok(())
	}

	fn populate_field(&mut self, map: &FlatMap, record: &mut RecordValue, field: &FieldDef, path: &str, depth: u32) -> Result<()> {
		let schema = self.schema;
		let paths = self.source_paths(field)?;

		match (&field.ty, field.ty.resolved()) {
			(_, FieldType::Seq(elem)) if elem.is_record() => {
				let (source_path, source) = paths.resolve_first(map).ok_or_else(|| unresolved(&paths))?;
				let Value::Seq(items) = value_of(source) else {
					return Err(MapError::TypeMismatch {
						type_name: record.type_name.to_string(),
						field: field.name.to_string(),
						expected: field.ty.to_string(),
						got: value_of(source).kind_name(),
					});
				};

				let mut out = Vec::with_capacity(items.len());
				for (idx, item) in items.iter().enumerate() {
					out.push(self.build_element(map, elem, item, source_path, &format!("{path}[{idx}]"), depth)?);
				}
				set_record_field(schema, record, &field.name, Value::Seq(out))
			}
			(FieldType::Ref(_), FieldType::Record(_)) => {
				let (_, source) = paths.resolve_first(map).ok_or_else(|| unresolved(&paths))?;
				let value = self.convert_nested(&field.ty, source, path, depth)?;
				set_record_field(schema, record, &field.name, value)
			}
			(_, FieldType::Record(name)) => {
				let mut fresh = schema.zero_record(name)?;
				match self.populate(map, &mut fresh, path, depth + 1) {
					Ok(()) => set_record_field(schema, record, &field.name, Value::Record(fresh)),
					Err(error) => {
						trace!(field = %path, %error, "nested population failed, resolving as leaf");
						self.assign_leaf(map, record, field, &paths)
					}
				}
			}
			_ => self.assign_leaf(map, record, field, &paths),
		}
	}

	fn assign_leaf(&self, map: &FlatMap, record: &mut RecordValue, field: &FieldDef, paths: &TagPaths) -> Result<()> {
		let (_, value) = paths.resolve_first(map).ok_or_else(|| unresolved(paths))?;
		set_record_field(self.schema, record, &field.name, value.clone())
	}

	/// Build one destination sequence element.
	///
	/// The element is first populated against the whole source map, then the
	/// keys of its own source element are overlaid on top. Element types that
	/// are already being populated further up only get the overlay, otherwise
	/// `Tree { Kids: [Tree] }` re-walks the root sequence at every level.
	fn build_element(&mut self, map: &FlatMap, elem: &FieldType, item: &Value, source_path: &ConversionPath, path: &str, depth: u32) -> Result<Value> {
		let Some(name) = elem.record_name() else {
			return Ok(item.clone());
		};
		let mut fresh = self.schema.zero_record(name)?;

		let mark = self.report.skipped.len();
		if self.filling.iter().any(|filling| *filling == name) {
			trace!(field = %path, record = name, "element type already being populated, overlay only");
		} else if let Err(error) = self.populate(map, &mut fresh, path, depth + 1) {
			trace!(field = %path, %error, "element population from source root failed");
		}

		let assigned = match value_of(item) {
			Value::Map(element_map) => self.overlay(element_map, &mut fresh, &source_path.to_string(), path, depth),
			_ => Vec::new(),
		};

		let pending = self.report.skipped.split_off(mark);
		self.report
			.skipped
			.extend(pending.into_iter().filter(|entry| !assigned.iter().any(|name| covers(&entry.path, path, name))));

		fit(elem, Value::Record(fresh)).map_err(|got| MapError::TypeMismatch {
			type_name: name.to_owned(),
			field: path.to_owned(),
			expected: elem.to_string(),
			got,
		})
	}

	/// Assign each key of `element_map` to the fields whose source paths name
	/// it, either bare (`ID`) or scoped by the source sequence (`Zs.ID`).
	fn overlay(&mut self, element_map: &FlatMap, record: &mut RecordValue, source_path: &str, path: &str, depth: u32) -> Vec<String> {
		let schema = self.schema;
		let mut assigned = Vec::new();
		let Ok(def) = schema.require_record(&record.type_name) else {
			return assigned;
		};

		for (key, value) in element_map {
			let scoped = format!("{source_path}.{key}");
			for field in def.fields.iter().filter(|field| field.exported) {
				let Ok(paths) = self.source_paths(field) else {
					continue;
				};
				if !paths.contains(key) && !paths.contains(&scoped) {
					continue;
				}

				let field_path = join_path(path, &field.name);
				let result = self
					.convert_nested(&field.ty, value, &field_path, depth)
					.and_then(|converted| set_record_field(schema, record, &field.name, converted));
				match result {
					Ok(()) => assigned.push(field.name.to_string()),
					Err(error) => self.report.skip(field_path, error),
				}
			}
		}
		assigned
	}

	/// Turn nested source maps into records of the destination type; other
	/// values pass through for assignment-time coercion.
	fn convert_nested(&mut self, ty: &FieldType, value: &Value, path: &str, depth: u32) -> Result<Value> {
		match (ty.resolved(), value_of(value)) {
			(FieldType::Record(name), Value::Map(sub)) => {
				let mut fresh = self.schema.zero_record(name)?;
				self.populate(sub, &mut fresh, path, depth + 1)?;
				Ok(Value::Record(fresh))
			}
			(FieldType::Seq(elem), Value::Seq(items)) if elem.is_record() => {
				let mut out = Vec::with_capacity(items.len());
				for (idx, item) in items.iter().enumerate() {
					out.push(self.convert_nested(elem, item, &format!("{path}[{idx}]"), depth)?);
				}
				Ok(Value::Seq(out))
			}
			_ => Ok(value.clone()),
		}
	}

	fn source_paths(&self, field: &FieldDef) -> Result<TagPaths> {
		match field.tag(&self.options.tag_key) {
			Some(text) if !text.is_empty() => TagPaths::parse(text),
			_ => Ok(TagPaths::single(&field.name)),
		}
	}
}

fn unresolved(paths: &TagPaths) -> MapError {
	MapError::UnresolvedPath { paths: paths.to_string() }
}

fn join_path(prefix: &str, name: &str) -> String {
	if prefix.is_empty() { name.to_owned() } else { format!("{prefix}.{name}") }
}

/// Whether a skip entry at `entry` concerns field `name` of the element at `element`.
fn covers(entry: &str, element: &str, name: &str) -> bool {
	let Some(rest) = entry.strip_prefix(element).and_then(|rest| rest.strip_prefix('.')) else {
		return false;
	};
	match rest.strip_prefix(name) {
		Some(tail) => tail.is_empty() || tail.starts_with('.') || tail.starts_with('['),
		None => false,
	}
}
