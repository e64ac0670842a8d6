use crate::types::dataset_kind::DatasetKind;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Unknown dataset kind '{0}', expected 'air' or 'water'")]
    UnknownKind(String),

    #[error("Cannot export {found} records as the {expected} dataset")]
    KindMismatch {
        expected: DatasetKind,
        found: DatasetKind,
    },

    #[error("Failed to write CSV row")]
    Csv(#[from] csv::Error),

    #[error("Failed to flush CSV output")]
    Flush(#[source] std::io::Error),

    #[error("CSV output is not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("Failed to write export file '{0}'")]
    Write(PathBuf, #[source] std::io::Error),
}
