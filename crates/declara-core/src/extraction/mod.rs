pub mod pdftotext;
pub mod table;

use crate::error::DeclaraError;

/// Content extracted from a single page of a PDF.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    pub page_number: usize,
    /// Layout-preserving text lines, as a PDF viewer would present them.
    pub lines: Vec<String>,
}

impl PageContent {
    /// The page text with lines joined by `\n`, each line terminated.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for line in &self.lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract text content from PDF bytes, returning one PageContent per page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, DeclaraError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_text_terminates_every_line() {
        let page = PageContent {
            page_number: 1,
            lines: vec!["Peso do pedido: 2 kg".into(), "Fim".into()],
        };
        assert_eq!(page.text(), "Peso do pedido: 2 kg\nFim\n");
    }
}
