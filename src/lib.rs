//! Public library API for converting between dynamic maps and declared record types.

/// Record schemas, dynamic values, kind coercion, and tag-driven struct conversion.
pub mod mapping;
