//! Bulk article import from delimited text
//!
//! Parsing and validation are pure; persisting the accepted articles is left
//! to the caller so a whole batch can be written in one call.
pub mod parser;
pub mod validator;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::internal::ImportError;
use crate::types::internal::Article;

pub use parser::parse_rows;
pub use validator::{validate_row, Header, REQUIRED_COLUMNS};

/// Example file offered for download
pub const TEMPLATE: &str = "title,excerpt,content,category,image,author,readTime,featured
\"Breaking News: Technology Advancement\",\"Short description of the news\",\"Full content of the news article goes here. This should be detailed and informative.\",\"technology_ai\",\"https://images.pexels.com/photos/8386440/pexels-photo-8386440.jpeg\",\"John Doe\",\"5 min read\",\"true\"
\"Market Update: Crypto Trends\",\"Brief overview of market changes\",\"Detailed analysis of cryptocurrency market trends and predictions for the future.\",\"finance_crypto\",\"https://images.pexels.com/photos/8369648/pexels-photo-8369648.jpeg\",\"Jane Smith\",\"7 min read\",\"false\"";

pub const TEMPLATE_FILE_NAME: &str = "news_template.csv";

/// Result of one import batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    pub accepted: Vec<Article>,
    /// One entry per rejected row (`Row N: ...`), or a single batch-level message
    pub errors: Vec<String>,
}

impl ImportReport {
    pub fn failed(err: ImportError) -> Self {
        Self {
            accepted: Vec::new(),
            errors: vec![err.to_string()],
        }
    }
}

/// Reject anything that is not a `.csv` file before reading it
pub fn check_file_name(file_name: &str) -> Result<(), ImportError> {
    let is_csv = file_name
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("csv"));

    if is_csv {
        Ok(())
    } else {
        Err(ImportError::UnsupportedFileType(file_name.to_string()))
    }
}

/// Parse and validate a batch
///
/// Rows are numbered as in the file after blank lines are dropped, with the
/// header as row 1. Invalid rows never stop the batch. Ids are the batch
/// instant in millis, the row index and a per-batch tag, so two batches
/// parsed in the same millisecond never share an id.
pub fn parse_batch(text: &str, batch_instant: DateTime<Utc>) -> Result<ImportReport, ImportError> {
    let rows = parse_rows(text);
    let Some((header_row, data_rows)) = rows.split_first() else {
        return Err(ImportError::NotEnoughRows);
    };
    if data_rows.is_empty() {
        return Err(ImportError::NotEnoughRows);
    }

    let header = Header::new(header_row);
    let batch_millis = batch_instant.timestamp_millis();
    let batch_tag = Uuid::new_v4().simple().to_string();
    let batch_tag = &batch_tag[..8];
    let published_date = batch_instant.format("%Y-%m-%d").to_string();
    let mut report = ImportReport::default();

    for (index, row) in data_rows.iter().enumerate() {
        match validate_row(&header, row) {
            Ok(draft) => report.accepted.push(Article {
                id: format!("{}-{}-{}", batch_millis, index, batch_tag),
                title: draft.title,
                excerpt: draft.excerpt,
                content: draft.content,
                category: draft.category,
                image: draft.image,
                author: draft.author,
                published_date: published_date.clone(),
                read_time: draft.read_time,
                featured: draft.featured,
            }),
            Err(errors) => report
                .errors
                .push(format!("Row {}: {}", index + 2, errors.join(", "))),
        }
    }

    tracing::debug!(
        accepted = report.accepted.len(),
        rejected = report.errors.len(),
        "Parsed import batch"
    );

    Ok(report)
}

/// Like [`parse_batch`], folding a batch-level failure into the report
pub fn import_batch(text: &str, batch_instant: DateTime<Utc>) -> ImportReport {
    parse_batch(text, batch_instant).unwrap_or_else(ImportReport::failed)
}
