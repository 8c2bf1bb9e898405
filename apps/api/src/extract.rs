//! Text extraction for uploaded resume files.
//!
//! PDF bytes go through `pdf-extract`; plain text is decoded lossily so a
//! stray non-UTF-8 byte does not fail the whole analysis. Anything else is
//! rejected up front.

use serde::Serialize;

use crate::errors::AppError;

/// How the resume text reached the service. Drives the ATS file-format check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    Pdf,
    PlainText,
    /// Pasted into the JSON API rather than uploaded.
    RawText,
}

impl SourceFormat {
    pub fn label(&self) -> &'static str {
        match self {
            SourceFormat::Pdf => "PDF",
            SourceFormat::PlainText => "plain text",
            SourceFormat::RawText => "raw text",
        }
    }
}

fn extension(filename: &str) -> Option<String> {
    filename.rsplit_once('.').map(|(_, ext)| ext.to_lowercase())
}

/// Extracts resume text from an uploaded file, dispatching on the extension.
///
/// Returns `UnsupportedFormat` for extensions outside pdf/txt, and
/// `Extraction` when a file parses but yields no usable text.
pub fn extract_resume_text(filename: &str, bytes: &[u8]) -> Result<(String, SourceFormat), AppError> {
    let ext = extension(filename)
        .ok_or_else(|| AppError::Validation(format!("'{filename}' has no file extension")))?;

    let (text, format) = match ext.as_str() {
        "pdf" => {
            let text = pdf_extract::extract_text_from_mem(bytes)
                .map_err(|e| AppError::Extraction(format!("could not parse PDF: {e}")))?;
            (text, SourceFormat::Pdf)
        }
        "txt" => (
            String::from_utf8_lossy(bytes).into_owned(),
            SourceFormat::PlainText,
        ),
        other => {
            return Err(AppError::UnsupportedFormat(format!(
                "'.{other}' files are not supported; upload a text-based PDF or TXT file"
            )))
        }
    };

    if text.trim().is_empty() {
        return Err(AppError::Extraction(
            "no text could be extracted from the resume (is it a scanned image?)".to_string(),
        ));
    }

    Ok((text, format))
}
