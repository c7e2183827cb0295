use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("{0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error(
        "Template not found at {}. Create a plain-text file containing the {{supplier_name}} and {{product_list}} placeholders.",
        .0.display()
    )]
    TemplateMissing(PathBuf),

    #[error("Delivery failed: {0}")]
    Delivery(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Workbook write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, QuoteError>;
