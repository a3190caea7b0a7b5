use crate::error::DeclaraError;
use crate::extraction::{PageContent, PdfExtractor};
use std::io::Write;
use std::process::Command;

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Uses `pdftotext -layout` so that the item table keeps its column
/// alignment and can be split back into cells.
pub struct PdftotextExtractor {
    last_page: Option<usize>,
}

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor { last_page: None }
    }

    /// Stop extraction after `page` (1-based). Orders only need page 1.
    pub fn up_to_page(page: usize) -> Self {
        PdftotextExtractor {
            last_page: Some(page.max(1)),
        }
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, DeclaraError> {
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| DeclaraError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| DeclaraError::Extraction(e.to_string()))?;

        let mut command = Command::new("pdftotext");
        command.arg("-layout").arg("-enc").arg("UTF-8");
        if let Some(last) = self.last_page {
            command.arg("-f").arg("1").arg("-l").arg(last.to_string());
        }
        let output = command
            .arg(tmpfile.path())
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    DeclaraError::PdftotextNotFound
                } else {
                    DeclaraError::Extraction(format!("pdftotext failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(DeclaraError::PdftotextFailed { code, stderr });
        }

        let text = String::from_utf8_lossy(&output.stdout);
        Ok(split_pages(&text))
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Split pdftotext output into pages (form feed `\x0c` is the page separator).
///
/// Trailing empty pages are dropped, but page 1 is always kept.
fn split_pages(text: &str) -> Vec<PageContent> {
    text.split('\x0c')
        .enumerate()
        .map(|(i, page_text)| PageContent {
            page_number: i + 1,
            lines: page_text.lines().map(|l| l.trim_end().to_string()).collect(),
        })
        .filter(|p| !p.lines.is_empty() || p.page_number == 1)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_pages_on_form_feed() {
        let pages = split_pages("Pedido N°: 123\nNome: Ana\x0cSegunda página\n\x0c");
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].page_number, 1);
        assert_eq!(pages[0].lines, vec!["Pedido N°: 123", "Nome: Ana"]);
        assert_eq!(pages[1].lines, vec!["Segunda página"]);
    }

    #[test]
    fn test_split_pages_keeps_empty_first_page() {
        let pages = split_pages("");
        assert_eq!(pages.len(), 1);
        assert!(pages[0].lines.is_empty());
    }

    #[test]
    fn test_up_to_page_clamps_to_first_page() {
        assert_eq!(PdftotextExtractor::up_to_page(0).last_page, Some(1));
        assert_eq!(PdftotextExtractor::new().backend_name(), "pdftotext");
    }

    #[test]
    fn test_extracts_first_page_only() {
        if !PdftotextExtractor::is_available() {
            return;
        }
        let pdf = crate::render::testing::blank_template(2);
        let pages = PdftotextExtractor::up_to_page(1).extract_pages(&pdf).unwrap();
        assert_eq!(pages.len(), 1);
        assert!(pages[0].text().contains("Template"));
    }
}
