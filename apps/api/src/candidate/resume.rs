//! Resume upload: the file name is always recorded; PDFs also have their text
//! extracted so the evaluator sees the real resume body.

use bytes::Bytes;
use tracing::{info, warn};

pub fn is_pdf(file_name: &str, content_type: Option<&str>) -> bool {
    content_type == Some("application/pdf") || file_name.to_lowercase().ends_with(".pdf")
}

/// Returns the trimmed text of a PDF upload, or `None` when the upload is not a
/// PDF or nothing could be extracted. Parsing runs on the blocking pool.
pub async fn extract_resume_text(
    file_name: &str,
    content_type: Option<&str>,
    data: Bytes,
) -> Option<String> {
    if !is_pdf(file_name, content_type) {
        return None;
    }

    let size = data.len();
    let extracted =
        tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data)).await;

    match extracted {
        Ok(Ok(text)) if !text.trim().is_empty() => {
            info!("Extracted {} chars from resume '{file_name}' ({size} bytes)", text.len());
            Some(text.trim().to_string())
        }
        Ok(Ok(_)) => {
            warn!("Resume '{file_name}' contains no extractable text");
            None
        }
        Ok(Err(e)) => {
            warn!("Failed to parse resume '{file_name}': {e}");
            None
        }
        Err(e) => {
            warn!("Resume extraction task for '{file_name}' aborted: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pdf_by_extension_or_content_type() {
        assert!(is_pdf("CV.PDF", None));
        assert!(is_pdf("resume", Some("application/pdf")));
        assert!(!is_pdf("resume.docx", Some("application/msword")));
    }

    #[tokio::test]
    async fn test_non_pdf_is_not_parsed() {
        let text = extract_resume_text("cv.txt", Some("text/plain"), Bytes::from("hello")).await;
        assert!(text.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_pdf_yields_none() {
        let text = extract_resume_text("cv.pdf", None, Bytes::from_static(b"not a pdf")).await;
        assert!(text.is_none());
    }
}
