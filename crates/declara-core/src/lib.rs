pub mod clock;
pub mod error;
pub mod extraction;
pub mod model;
pub mod parsing;
pub mod render;

use regex::Regex;
use std::sync::LazyLock;

use clock::Clock;
use error::DeclaraError;
use extraction::PdfExtractor;
use model::OrderRecord;
use render::{DeclarationRenderer, Template};

/// Placeholder used in the download name when no order number is known.
pub const UNKNOWN_ORDER: &str = "S_NUMERO";

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("valid digit regex"));

/// Main API entry point: read an order PDF into an [`OrderRecord`].
///
/// Only the first page is used. Fields missing from the order stay empty.
pub fn extract_order(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    clock: &dyn Clock,
) -> Result<OrderRecord, DeclaraError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    let first = pages.first().ok_or(DeclaraError::EmptyDocument)?;

    let record = parsing::parse_order(first, clock);
    tracing::info!(
        backend = extractor.backend_name(),
        pages = pages.len(),
        sender = %record.sender.name,
        recipient = %record.recipient.name,
        items = record.items.len(),
        weight = %record.weight,
        "extracted order"
    );
    Ok(record)
}

/// Extract the order and render its declaration onto `template`.
///
/// Extraction errors are returned; a template that cannot be used yields
/// `Ok(None)`.
pub fn generate_declaration(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    clock: &dyn Clock,
    renderer: &DeclarationRenderer,
    template: &Template,
) -> Result<(OrderRecord, Option<Vec<u8>>), DeclaraError> {
    let record = extract_order(pdf_bytes, extractor, clock)?;
    let pdf = renderer.render(&record, template);
    Ok((record, pdf))
}

/// Download name for the declaration: `Pedido_<n>.pdf`.
///
/// `<n>` is the first run of digits in the uploaded file's name, else the
/// order number read from the document, else [`UNKNOWN_ORDER`].
pub fn suggested_filename(original_name: &str, record: &OrderRecord) -> String {
    let number = DIGIT_RUN
        .find(original_name)
        .map(|m| m.as_str().to_string())
        .or_else(|| record.order_number.clone())
        .unwrap_or_else(|| UNKNOWN_ORDER.to_string());
    format!("Pedido_{number}.pdf")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DeclarationDate, Party};

    fn record(order_number: Option<&str>) -> OrderRecord {
        OrderRecord {
            sender: Party::default(),
            recipient: Party::default(),
            items: vec![],
            weight: String::new(),
            order_number: order_number.map(str::to_string),
            declaration_date: DeclarationDate {
                day: 1,
                month_name: "Janeiro".into(),
                year: 2025,
            },
        }
    }

    #[test]
    fn test_suggested_filename_prefers_digits_in_file_name() {
        assert_eq!(
            suggested_filename("pedido-48213 (1).pdf", &record(Some("777"))),
            "Pedido_48213.pdf"
        );
    }

    #[test]
    fn test_suggested_filename_falls_back_to_order_number() {
        assert_eq!(
            suggested_filename("pedido.pdf", &record(Some("777"))),
            "Pedido_777.pdf"
        );
    }

    #[test]
    fn test_suggested_filename_placeholder() {
        assert_eq!(
            suggested_filename("pedido.pdf", &record(None)),
            "Pedido_S_NUMERO.pdf"
        );
    }
}
