//! Delimited-text replay exports (comma or semicolon separated)

pub mod columns;
pub mod reader;
pub mod tokenizer;

pub use columns::{resolve_column, ColumnMap, Field, FIELD_ALIASES};
pub use reader::{build_record, read_records};
pub use tokenizer::{detect_delimiter, tokenize};
