use std::fmt;

use crate::mapping::{FlatMap, MapError, Result, Value, value_of};

/// Dotted key sequence locating a value inside a flattened map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionPath {
	/// Map keys, outermost first.
	pub segments: Vec<String>,
}

impl ConversionPath {
	/// Parse `A.B.C` into segments; empty segments are rejected.
	pub fn parse(input: &str) -> Result<Self> {
		let segments: Vec<String> = input.split('.').map(str::to_owned).collect();
		if segments.iter().any(String::is_empty) {
			return Err(MapError::InvalidConversionPath { path: input.to_owned() });
		}
		Ok(Self { segments })
	}

	/// Walk `map` segment by segment.
	///
	/// Resolution stops with `None` when a key is missing or an intermediate
	/// value is not a map (sequences are never indexed into).
	pub fn resolve<'m>(&self, map: &'m FlatMap) -> Option<&'m Value> {
		let (first, rest) = self.segments.split_first()?;
		let mut current = map.get(first)?;
		for segment in rest {
			let Value::Map(nested) = value_of(current) else {
				return None;
			};
			current = nested.get(segment)?;
		}
		Some(current)
	}
}

impl fmt::Display for ConversionPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.segments.join("."))
	}
}

/// Ordered alternative source paths taken from one field annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPaths {
	/// Alternatives in declaration order.
	pub alternatives: Vec<ConversionPath>,
}

impl TagPaths {
	/// Parse a comma-separated list of dotted paths.
	pub fn parse(input: &str) -> Result<Self> {
		let alternatives = input.split(',').map(ConversionPath::parse).collect::<Result<Vec<_>>>()?;
		Ok(Self { alternatives })
	}

	/// Single path made of one key.
	pub fn single(key: &str) -> Self {
		Self {
			alternatives: vec![ConversionPath { segments: vec![key.to_owned()] }],
		}
	}

	/// First alternative that resolves, with the path that matched.
	pub fn resolve_first<'p, 'm>(&'p self, map: &'m FlatMap) -> Option<(&'p ConversionPath, &'m Value)> {
		self.alternatives
			.iter()
			.find_map(|path| path.resolve(map).map(|value| (path, value)))
	}

	/// Whether any alternative renders exactly as `text`.
	pub fn contains(&self, text: &str) -> bool {
		self.alternatives.iter().any(|path| path.to_string() == text)
	}
}

impl fmt::Display for TagPaths {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (idx, path) in self.alternatives.iter().enumerate() {
			if idx > 0 {
				f.write_str(",")?;
			}
			write!(f, "{path}")?;
		}
		Ok(())
	}
}
