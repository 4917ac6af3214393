//! Recipient file parsers

mod csv_files;

pub use csv_files::{parse_csv_recipients, CsvRecipientParser};
