//! Line-delimited JSON dumps
//!
//! [`parser`] turns one raw line into a JSON object and offers defensive
//! field accessors; [`reader`] streams the lines of a dump file.

pub mod parser;
pub mod reader;

pub use parser::{parse_record, Record};
pub use reader::{DumpLine, DumpReader};
