pub mod items;
pub mod labels;
pub mod location;
pub mod normalize;

use regex::Regex;
use std::sync::LazyLock;

use crate::clock::{declaration_date, Clock};
use crate::extraction::table::find_tables;
use crate::extraction::PageContent;
use crate::model::{OrderRecord, Party};
use labels::{Side, ADDRESS, CITY_STATE, NAME};
use location::split_city_state;
use normalize::strip_phones;

static POSTAL_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{5}-?\d{3}").expect("valid postal code regex"));

static ORDER_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Pedido N[°º]:\s*(\d+)").expect("valid order number regex"));

static WEIGHT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Peso do pedido:\s*(.*?)\n").expect("valid weight regex"));

/// Build an [`OrderRecord`] from the first page of an order.
///
/// Never fails: every field that cannot be found keeps its empty default.
pub fn parse_order(page: &PageContent, clock: &dyn Clock) -> OrderRecord {
    let text = page.text();

    let mut sender = parse_party(&text, Side::Sender);
    let mut recipient = parse_party(&text, Side::Recipient);

    // Positional: the recipient block comes first in the source layout.
    let postal_codes = find_postal_codes(&text);
    if let Some(code) = postal_codes.first() {
        recipient.postal_code = code.clone();
    }
    if let Some(code) = postal_codes.get(1) {
        sender.postal_code = code.clone();
    }

    let items = items::parse_items(&find_tables(page));

    let record = OrderRecord {
        sender,
        recipient,
        items,
        weight: find_weight(&text),
        order_number: find_order_number(&text),
        declaration_date: declaration_date(clock),
    };

    tracing::debug!(
        sender = %record.sender.name,
        recipient = %record.recipient.name,
        items = record.items.len(),
        postal_codes = postal_codes.len(),
        "parsed order"
    );

    record
}

fn parse_party(text: &str, side: Side) -> Party {
    let (city, state) = split_city_state(&CITY_STATE.extract(text, side));
    Party {
        name: NAME.extract(text, side),
        address: ADDRESS.extract(text, side),
        city,
        state,
        postal_code: String::new(),
    }
}

/// All postal-code-shaped tokens, in document order, ignoring phone digits.
pub fn find_postal_codes(text: &str) -> Vec<String> {
    let cleaned = strip_phones(text);
    POSTAL_CODE
        .find_iter(&cleaned)
        .map(|m| m.as_str().to_string())
        .collect()
}

pub fn find_order_number(text: &str) -> Option<String> {
    ORDER_NUMBER
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Rest of the `Peso do pedido:` line, trimmed. Empty when absent.
pub fn find_weight(text: &str) -> String {
    WEIGHT
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::model::Uf;
    use chrono::{TimeZone, Utc};

    fn page(lines: &[&str]) -> PageContent {
        PageContent {
            page_number: 1,
            lines: lines.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2025, 7, 10, 12, 0, 0).unwrap())
    }

    #[test]
    fn test_postal_codes_ignore_phone_digits() {
        let codes = find_postal_codes("Fone: (11) 99999-9999\nCEP: 01310-100\n");
        assert_eq!(codes, vec!["01310-100"]);
    }

    #[test]
    fn test_postal_codes_without_hyphen() {
        let codes = find_postal_codes("CEP: 13184010 e CEP: 01310-100");
        assert_eq!(codes, vec!["13184010", "01310-100"]);
    }

    #[test]
    fn test_order_number() {
        assert_eq!(
            find_order_number("Pedido N°: 48213 Data"),
            Some("48213".to_string())
        );
        assert_eq!(find_order_number("Pedido: 48213"), None);
    }

    #[test]
    fn test_weight_is_rest_of_line() {
        assert_eq!(find_weight("Peso do pedido: 4,250 kg \nItens"), "4,250 kg");
        assert_eq!(find_weight("Peso do pedido: 3 kg"), "");
    }

    #[test]
    fn test_empty_page_yields_empty_record() {
        let record = parse_order(&page(&[]), &clock());
        assert_eq!(record.sender, Party::default());
        assert_eq!(record.recipient, Party::default());
        assert!(record.items.is_empty());
        assert_eq!(record.weight, "");
        assert_eq!(record.order_number, None);
        assert_eq!(record.declaration_date.month_name, "Julho");
    }

    #[test]
    fn test_single_block_order_fills_first_occurrences_only() {
        let record = parse_order(
            &page(&[
                "Nome: Ana Lima",
                "Endereço: Rua Um, 5 Bairro: Centro",
                "Cidade-UF: Sorocaba - SP CEP: 18010-000",
            ]),
            &clock(),
        );
        // Name occurrence 0 belongs to the sender; address and city to the recipient.
        assert_eq!(record.sender.name, "Ana Lima");
        assert_eq!(record.recipient.name, "");
        assert_eq!(record.recipient.address, "Rua Um, 5");
        assert_eq!(record.recipient.city, "Sorocaba");
        assert_eq!(record.recipient.state, Some(Uf::SP));
        assert_eq!(record.recipient.postal_code, "18010-000");
        assert_eq!(record.sender.postal_code, "");
    }
}
