//! Request checks and response envelopes at the edge of the pipelines

use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::domain::{DateRange, ErrorKind, parse_iso8601};
use crate::streaming::IngestFailure;

/// Malformed request rejected before any pipeline starts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("provide at least one of \"dateFrom\" and \"dateTo\"")]
    MissingDateBound,

    #[error("invalid \"{param}\"")]
    InvalidDate { param: &'static str },

    #[error("incorrect file type, expected \".csv\", actual \"{actual}\"")]
    UnexpectedExtension { actual: String },
}

impl ProtocolError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Protocol
    }
}

impl DateRange {
    /// Build an export range from optional ISO-8601 parameters
    ///
    /// Empty parameters count as absent. Each given bound must parse.
    /// Reversed bounds are swapped.
    pub fn from_params(date_from: Option<&str>, date_to: Option<&str>) -> Result<Self, ProtocolError> {
        let date_from = date_from.filter(|v| !v.is_empty());
        let date_to = date_to.filter(|v| !v.is_empty());
        if date_from.is_none() && date_to.is_none() {
            return Err(ProtocolError::MissingDateBound);
        }

        let from = parse_param(date_from, "dateFrom")?;
        let to = parse_param(date_to, "dateTo")?;

        DateRange::new(from, to).ok_or(ProtocolError::MissingDateBound)
    }
}

fn parse_param(
    value: Option<&str>,
    param: &'static str,
) -> Result<Option<chrono::DateTime<chrono::Utc>>, ProtocolError> {
    value
        .map(|v| parse_iso8601(v).ok_or(ProtocolError::InvalidDate { param }))
        .transpose()
}

/// Accept only uploads named `*.csv`
pub fn check_csv_extension(path: &Path) -> Result<(), ProtocolError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("csv") => Ok(()),
        other => Err(ProtocolError::UnexpectedExtension {
            actual: other.map(|ext| format!(".{ext}")).unwrap_or_default(),
        }),
    }
}

/// Ingestion result body: `{"count":N}` or `{"error":"#i: message"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum IngestResponse {
    Count { count: u64 },
    Error { error: String },
}

impl From<&Result<u64, IngestFailure>> for IngestResponse {
    fn from(result: &Result<u64, IngestFailure>) -> Self {
        match result {
            Ok(count) => Self::Count { count: *count },
            Err(failure) => Self::Error {
                error: failure.to_string(),
            },
        }
    }
}

impl IngestResponse {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
