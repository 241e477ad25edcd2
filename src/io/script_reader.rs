//! Streaming reader for event scripts
//!
//! Provides an iterator over checkout events from a CSV file. Format
//! concerns are delegated to the script_format module.
//!
//! ```no_run
//! use checkout_flow::io::ScriptReader;
//! use std::path::Path;
//!
//! let reader = ScriptReader::new(Path::new("events.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(event) => println!("Event: {}", event.action()),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual record errors are yielded as Err variants carrying the line number

use crate::io::script_format::{convert_script_record, CheckoutEvent, ScriptRecord};
use crate::types::CheckoutError;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Event script reader
///
/// Reads one record at a time; the script is never loaded whole.
#[derive(Debug)]
pub struct ScriptReader<R: Read = File> {
    reader: csv::Reader<R>,
    line_num: u64,
}

impl ScriptReader<File> {
    /// Open a script file
    ///
    /// The CSV reader is configured to:
    /// - Trim whitespace from all fields
    /// - Allow rows with fewer columns (`submit` needs no key or value)
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if the file does not exist, or `IoError` if it
    /// cannot be opened.
    pub fn new(path: &Path) -> Result<Self, CheckoutError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => CheckoutError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => CheckoutError::from(e),
        })?;

        Ok(Self::from_reader(file))
    }
}

impl<R: Read> ScriptReader<R> {
    /// Read a script from any byte source
    pub fn from_reader(source: R) -> Self {
        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);

        Self {
            reader,
            line_num: 1,
        }
    }
}

impl<R: Read> Iterator for ScriptReader<R> {
    type Item = Result<CheckoutEvent, CheckoutError>;

    /// Read and convert the next script row
    ///
    /// Conversion failures are reported as `ScriptParse` errors with the
    /// line number of the offending row (the header is line 1).
    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<ScriptRecord>();
        let result = deserializer.next()?;
        self.line_num += 1;

        let line = Some(self.line_num);
        Some(match result {
            Ok(record) => convert_script_record(record)
                .map_err(|e| CheckoutError::script_parse(line, strip_parse_prefix(e))),
            Err(e) => Err(CheckoutError::script_parse(line, e.to_string())),
        })
    }
}

/// Message of a conversion error, without a nested "Script parse error" prefix
fn strip_parse_prefix(error: CheckoutError) -> String {
    match error {
        CheckoutError::ScriptParse { message, .. } => message,
        other => other.to_string(),
    }
}
