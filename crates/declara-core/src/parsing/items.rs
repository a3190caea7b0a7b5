use regex::Regex;
use std::sync::LazyLock;

use super::normalize::clean_product_name;
use crate::extraction::table::Table;
use crate::model::LineItem;

/// Category column values. A cell equal to one of these ends the name.
pub const CATEGORY_LABELS: &[&str] = &[
    "ALIMENTOS",
    "HIGIENE",
    "LIMPEZA",
    "VESTUÁRIOS",
    "DIVERSOS",
    "CIGARROS",
    "PAPELARIA",
];

/// Cells after the quantity that may hold part of the product name.
const NAME_CELLS: usize = 3;

static DECIMAL_CELL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+,\d+$").expect("valid decimal regex"));

/// Collect line items from every table, in table then row order.
pub fn parse_items(tables: &[Table]) -> Vec<LineItem> {
    tables
        .iter()
        .flat_map(|table| table.rows.iter())
        .filter_map(|row| parse_item_row(row.as_slice()))
        .collect()
}

/// Parse one table row as `quantity | name fragments... | category | price`.
///
/// Returns None if the first cell is not a quantity or no name survives
/// cleanup.
pub fn parse_item_row<S: AsRef<str>>(row: &[S]) -> Option<LineItem> {
    let quantity = row.first()?.as_ref().trim();
    if !is_quantity(quantity) {
        return None;
    }

    let mut fragments = Vec::new();
    for cell in row.iter().skip(1).take(NAME_CELLS) {
        let text = cell.as_ref().trim();
        if text.is_empty() {
            continue;
        }
        if is_category(text) || DECIMAL_CELL.is_match(text) {
            break;
        }
        fragments.push(text);
    }

    let name = clean_product_name(&fragments.join(" ").replace('\n', " "));
    if name.is_empty() {
        tracing::debug!(quantity, "skipping item row without a name");
        return None;
    }

    Some(LineItem {
        quantity: quantity.to_string(),
        name,
    })
}

fn is_quantity(cell: &str) -> bool {
    let digits = cell.replace(',', "");
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

fn is_category(cell: &str) -> bool {
    let upper = cell.to_uppercase();
    CATEGORY_LABELS.contains(&upper.as_str())
}
