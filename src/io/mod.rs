//! I/O module
//!
//! Handles event script parsing and step report output.
//!
//! # Components
//!
//! - `script_format` - CSV format handling (record conversion, report serialization)
//! - `script_reader` - Streaming script reader with iterator interface

pub mod script_format;
pub mod script_reader;

pub use script_format::{
    convert_script_record, write_report_csv, CheckoutEvent, ReportRow, ScriptRecord, StepResult,
};
pub use script_reader::ScriptReader;
