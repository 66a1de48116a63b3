/// Literal coercion command.
pub mod coerce;
/// Record-to-record conversion command.
pub mod convert;
/// Record declaration listing command.
pub mod fields;
/// Record flattening command.
pub mod flatten;
mod util;
