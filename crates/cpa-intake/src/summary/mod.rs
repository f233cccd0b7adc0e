//! Printable summary of a completed response record.
//!
//! [`render`] is pure: the date is always supplied by the caller and the PDF
//! carries no timestamps or generated identifiers, so identical inputs give
//! byte-identical documents.

mod document;
mod encoding;
mod layout;

use chrono::NaiveDate;
use serde::Serialize;

use crate::wizard::domain::ResponseRecord;
use document::SummaryLayout;
use encoding::win_ansi_byte;

pub const DOCUMENT_TITLE: &str = "Prospective Client Interest Summary";
pub const NOT_PROVIDED: &str = "Not provided";
pub const NONE_PROVIDED: &str = "None provided";

const FILE_NAME_PREFIX: &str = "CPA_Interest_Summary_";

/// Error raised while laying out or serializing the summary document.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("the {field} field contains '{character}', which cannot be printed in the summary PDF")]
    UnsupportedCharacter {
        character: char,
        field: &'static str,
    },
    #[error("PDF serialization failed: {0}")]
    Pdf(String),
}

/// Date as printed in the document and its file name, e.g. `October 19, 2026`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

pub fn download_file_name(date: NaiveDate) -> String {
    format!("{FILE_NAME_PREFIX}{}.pdf", format_date(date))
}

/// One `Label: value` line per record field, in document order.
pub fn summary_lines(record: &ResponseRecord) -> Vec<String> {
    vec![
        format!("Reason for reaching out: {}", record.situation.label()),
        format!("Timeline: {}", record.timeline.label()),
        format!("Complexity level: {}/5", record.complexity.level()),
        format!(
            "Main concern: {}",
            record.main_concern.as_deref().unwrap_or(NONE_PROVIDED)
        ),
        format!("Preferred contact: {}", record.contact_pref.label()),
        format!("Email: {}", record.email.as_deref().unwrap_or(NOT_PROVIDED)),
        format!("Phone: {}", record.phone.as_deref().unwrap_or(NOT_PROVIDED)),
    ]
}

fn body_text(record: &ResponseRecord, date: NaiveDate) -> String {
    let summary = summary_lines(record).join("\n");
    let body = format!(
        "\nDate: {date}\n\n\
         This is a preliminary summary from the initial interest form.\n\n\
         Summary of responses:\n\
         {summary}\n\n\
         Note: This is not a formal engagement or signed document.\n\
         No sensitive or identifying information was collected.\n\n\
         Next steps will be discussed after review.\n",
        date = format_date(date),
    );
    body.replace('\t', " ").replace('\r', "")
}

fn check_printable(field: &'static str, value: Option<&str>) -> Result<(), RenderError> {
    let Some(value) = value else {
        return Ok(());
    };
    match value
        .chars()
        .filter(|ch| !matches!(ch, '\n' | '\r' | '\t'))
        .find(|ch| win_ansi_byte(*ch).is_none())
    {
        Some(character) => Err(RenderError::UnsupportedCharacter { character, field }),
        None => Ok(()),
    }
}

/// Renders the summary PDF for a completed record.
pub fn render(record: &ResponseRecord, date: NaiveDate) -> Result<Vec<u8>, RenderError> {
    check_printable("main concern", record.main_concern.as_deref())?;
    check_printable("email", record.email.as_deref())?;
    check_printable("phone", record.phone.as_deref())?;

    let body = body_text(record, date);
    SummaryLayout {
        title: DOCUMENT_TITLE,
        body: &body,
    }
    .to_pdf()
}

/// Download-ready summary handed to the user at the review step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedSummary {
    pub file_name: String,
    pub content_type: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl GeneratedSummary {
    pub fn build(record: &ResponseRecord, date: NaiveDate) -> Result<Self, RenderError> {
        let bytes = render(record, date)?;
        Ok(Self {
            file_name: download_file_name(date),
            content_type: mime::APPLICATION_PDF.to_string(),
            bytes,
        })
    }
}
