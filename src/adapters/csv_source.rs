use crate::config::toml_config::EngineConfig;
use crate::core::{FeedbackEvent, FeedbackSource};
use crate::utils::error::{Result, SibylError};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Reads `user,item,action` rows from a delimited text file.
#[derive(Debug, Clone)]
pub struct CsvFeedbackSource {
    path: PathBuf,
    delimiter: u8,
    has_headers: bool,
}

impl CsvFeedbackSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            delimiter: b',',
            has_headers: true,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        let path = config.input_path().ok_or_else(|| SibylError::ConfigError {
            message: "no feedback input configured (set ingest.path or --input)".to_string(),
        })?;

        Ok(Self::new(path)
            .with_delimiter(config.delimiter()?)
            .with_headers(config.has_headers()))
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses rows from any reader using this source's dialect.
    pub fn read_from<R: Read>(&self, reader: R) -> Result<Vec<FeedbackEvent>> {
        Ok(self
            .read_rows(reader)?
            .into_iter()
            .map(|(_, event)| event)
            .collect())
    }

    /// Like [`read_from`](Self::read_from), keeping the file line of each row.
    pub fn read_rows<R: Read>(&self, mut reader: R) -> Result<Vec<(u64, FeedbackEvent)>> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(self.has_headers)
            .trim(csv::Trim::All)
            .comment(Some(COMMENT))
            .from_reader(text.as_bytes());

        let headers = if self.has_headers {
            Some(csv_reader.headers()?.clone())
        } else {
            None
        };

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let line = record
                .position()
                .map_or(0, |position| record_line(&text, position));
            let event: FeedbackEvent = record.deserialize(headers.as_ref()).map_err(|e| {
                tracing::error!("Unreadable feedback on line {}: {}", line, e);
                e
            })?;
            rows.push((line, event));
        }
        Ok(rows)
    }
}

const COMMENT: u8 = b'#';

/// Line on which a record starts. The reader reports the position where it
/// began scanning, so blank and comment lines before the record are skipped
/// here.
fn record_line(text: &str, position: &csv::Position) -> u64 {
    let mut line = position.line();
    let mut rest = usize::try_from(position.byte())
        .ok()
        .and_then(|start| text.get(start..))
        .unwrap_or("");

    while let Some(end) = rest.find('\n') {
        let skipped = rest[..end].trim_end_matches('\r');
        if !skipped.is_empty() && !skipped.starts_with(COMMENT as char) {
            break;
        }
        line += 1;
        rest = &rest[end + 1..];
    }
    line
}

impl FeedbackSource for CsvFeedbackSource {
    fn rows(&self) -> Result<Vec<(u64, FeedbackEvent)>> {
        let file = File::open(&self.path)?;
        self.read_rows(file)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
