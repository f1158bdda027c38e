pub mod date;
pub mod error;
pub mod field;
pub mod range;
pub mod raw;
pub mod record;
pub mod validate;

// Re-export commonly used types
pub use date::parse_iso8601;
pub use error::{ErrorKind, ValidationError};
pub use field::Field;
pub use range::DateRange;
pub use raw::{RawRow, RawValue};
pub use record::{Gender, Record};
pub use validate::validate_row;
