//! CSV recipient files, parsed locally

use std::sync::Arc;

use async_trait::async_trait;
use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::domain::{
    communication::recipient_files::{RecipientFileError, RecipientFileParser},
    compose::FileBlob,
};

/// Every trimmed cell of `data` containing an `@`, in reading order
pub fn parse_csv_recipients(data: &[u8]) -> Result<Vec<String>, RecipientFileError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(data);

    let mut addresses = Vec::new();

    for record in reader.records() {
        let record = record.map_err(|err| RecipientFileError::Unreadable(err.to_string()))?;

        addresses.extend(
            record
                .iter()
                .filter(|cell| cell.contains('@'))
                .map(str::to_string),
        );
    }

    Ok(addresses)
}

/// Reads `.csv` files itself and hands spreadsheets to `spreadsheets`
#[derive(Debug, Clone)]
pub struct CsvRecipientParser<F>
where
    F: RecipientFileParser,
{
    spreadsheets: Arc<F>,
}

impl<F> CsvRecipientParser<F>
where
    F: RecipientFileParser,
{
    /// Creates a parser delegating non-CSV files to `spreadsheets`
    pub fn new(spreadsheets: Arc<F>) -> Self {
        Self { spreadsheets }
    }
}

#[async_trait]
impl<F> RecipientFileParser for CsvRecipientParser<F>
where
    F: RecipientFileParser,
{
    async fn parse_recipients(&self, file: &FileBlob) -> Result<Vec<String>, RecipientFileError> {
        match file.extension().as_deref() {
            Some("csv") => {
                debug!(file = file.name(), "parsing CSV recipients locally");

                parse_csv_recipients(file.data())
            }
            Some("xlsx" | "xls") => self.spreadsheets.parse_recipients(file).await,
            other => Err(RecipientFileError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::domain::communication::recipient_files::tests::MockRecipientFileParser;

    #[test]
    fn test_every_cell_is_scanned() -> TestResult {
        let data = b"name,email,backup\nAnn, ann@x.com ,\nBob,bob@y.org,b2@y.org\n\"Smith, J\",not an address\nextra@z.com\n";

        let addresses = parse_csv_recipients(data)?;

        assert_eq!(
            addresses,
            vec!["ann@x.com", "bob@y.org", "b2@y.org", "extra@z.com"]
        );

        Ok(())
    }

    #[test]
    fn test_empty_file() -> TestResult {
        assert!(parse_csv_recipients(b"")?.is_empty());

        Ok(())
    }

    #[test]
    fn test_invalid_utf8_is_unreadable() {
        let result = parse_csv_recipients(&[0xff, 0xfe, b'@', b'\n']);

        assert!(matches!(result, Err(RecipientFileError::Unreadable(_))));
    }

    #[tokio::test]
    async fn test_csv_is_parsed_locally() -> TestResult {
        let mut spreadsheets = MockRecipientFileParser::new();
        spreadsheets.expect_parse_recipients().times(0);

        let parser = CsvRecipientParser::new(Arc::new(spreadsheets));
        let file = FileBlob::from_name("list.CSV", b"a@x.com,b@x.com".to_vec());

        assert_eq!(parser.parse_recipients(&file).await?, vec!["a@x.com", "b@x.com"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_spreadsheets_are_delegated() -> TestResult {
        let mut spreadsheets = MockRecipientFileParser::new();
        spreadsheets
            .expect_parse_recipients()
            .times(1)
            .withf(|file| file.name() == "list.xlsx")
            .returning(|_| Ok(vec!["a@x.com".to_string()]));

        let parser = CsvRecipientParser::new(Arc::new(spreadsheets));
        let file = FileBlob::from_name("list.xlsx", vec![0x50, 0x4b]);

        assert_eq!(parser.parse_recipients(&file).await?, vec!["a@x.com"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_other_formats_are_unsupported() {
        let parser = CsvRecipientParser::new(Arc::new(MockRecipientFileParser::new()));
        let file = FileBlob::from_name("list.txt", vec![]);

        assert!(matches!(
            parser.parse_recipients(&file).await,
            Err(RecipientFileError::UnsupportedFormat(ext)) if ext == "txt"
        ));
    }
}
