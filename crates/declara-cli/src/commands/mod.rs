pub mod generate;
pub mod layout;
pub mod parse;

use declara_core::clock::SystemClock;
use declara_core::error::DeclaraError;
use declara_core::extraction::pdftotext::PdftotextExtractor;
use declara_core::model::OrderRecord;
use std::path::Path;

/// Read an order from a PDF, or a record previously saved as JSON.
///
/// Any failure is reported as the file being unreadable.
pub fn load_order(path: &Path) -> Result<OrderRecord, DeclaraError> {
    read_order(path).map_err(|e| DeclaraError::InputRead {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn read_order(path: &Path) -> Result<OrderRecord, DeclaraError> {
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let bytes = std::fs::read(path)?;
    if is_json {
        tracing::debug!(path = %path.display(), "loading saved order record");
        return Ok(serde_json::from_slice(&bytes)?);
    }

    let extractor = PdftotextExtractor::up_to_page(1);
    declara_core::extract_order(&bytes, &extractor, &SystemClock)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use declara_core::model::{DeclarationDate, LineItem, Party};

    pub(crate) fn record() -> OrderRecord {
        OrderRecord {
            sender: Party {
                name: "Ana Lima".into(),
                ..Party::default()
            },
            recipient: Party::default(),
            items: vec![LineItem {
                quantity: "2".into(),
                name: "Caderno".into(),
            }],
            weight: "1 kg".into(),
            order_number: Some("4521".into()),
            declaration_date: DeclarationDate {
                day: 10,
                month_name: "Julho".into(),
                year: 2025,
            },
        }
    }

    #[test]
    fn test_load_order_from_saved_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pedido.json");
        std::fs::write(&path, serde_json::to_string(&record()).unwrap()).unwrap();

        assert_eq!(load_order(&path).unwrap(), record());
    }

    #[test]
    fn test_unreadable_input_is_one_message() {
        let err = load_order(Path::new("/nonexistent/pedido.pdf")).unwrap_err();
        assert!(matches!(err, DeclaraError::InputRead { .. }));
        assert!(err
            .to_string()
            .starts_with("could not read file: /nonexistent/pedido.pdf: "));
    }

    #[test]
    fn test_malformed_json_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pedido.json");
        std::fs::write(&path, "{").unwrap();

        let err = load_order(&path).unwrap_err();
        assert!(err.to_string().starts_with("could not read file: "));
    }
}
