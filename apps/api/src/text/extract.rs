//! Document text acquisition: turns uploaded bytes into raw text.
//!
//! Only text-layer PDFs and UTF-8 plain text are supported. Image-only PDF
//! pages come back empty; there is no OCR fallback.

use std::path::Path;

use tracing::{debug, warn};

use crate::errors::AppError;

/// Extracts raw text from an uploaded file, dispatching on its extension.
///
/// CPU-bound for PDFs: call from `tokio::task::spawn_blocking`.
pub fn extract_text(file_name: &str, bytes: &[u8]) -> Result<String, AppError> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("pdf") => extract_pdf(file_name, bytes),
        Some("txt") => String::from_utf8(bytes.to_vec()).map_err(|_| {
            AppError::UnprocessableEntity(format!("{file_name} is not valid UTF-8 text"))
        }),
        _ => Err(AppError::Validation(format!(
            "Unsupported file format for {file_name}. Please provide PDF or TXT."
        ))),
    }
}

fn extract_pdf(file_name: &str, bytes: &[u8]) -> Result<String, AppError> {
    let text = pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
        AppError::UnprocessableEntity(format!("Could not read PDF {file_name}: {e}"))
    })?;

    if text.trim().is_empty() {
        warn!("PDF {file_name} has no text layer");
        return Err(AppError::UnprocessableEntity(format!(
            "No extractable text in {file_name}; image-based PDFs are not supported"
        )));
    }

    debug!("Extracted {} chars from {file_name}", text.len());
    Ok(text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passes_through() {
        let text = extract_text("resume.txt", "Skills\nRust".as_bytes()).unwrap();
        assert_eq!(text, "Skills\nRust");
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        assert!(extract_text("RESUME.TXT", b"hello").is_ok());
    }

    #[test]
    fn test_unsupported_extension_is_validation_error() {
        let err = extract_text("resume.docx", b"PK..").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = extract_text("resume", b"hello").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_invalid_utf8_is_unprocessable() {
        let err = extract_text("resume.txt", &[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }

    #[test]
    fn test_garbage_pdf_is_unprocessable() {
        let err = extract_text("resume.pdf", b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }
}
