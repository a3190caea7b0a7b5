use regex::Regex;
use std::sync::LazyLock;

/// Fragments that leak into an address capture from neighbouring notices.
/// Removed case-insensitively, in this order (longer phrases first).
pub const ADDRESS_NOISE: &[&str] = &[
    "Somente Cx Correio",
    "Somente Cx",
    "Somente",
    "Correio",
    "620 Dia para Sedex",
    "Dia para Sedex",
    "Dia para",
    "620 Dia",
    "Peso Máximo",
    "Peso do pedido",
    "Caixa Máxima",
    "Cx=5",
    "Obs.",
    "Não",
    "620",
    "Visitante",
];

/// Labels whose text, when glued to a name capture, marks where the name ends.
pub const NAME_TERMINATORS: &[&str] = &["Fone", "Endereço", "E-mail"];

/// Unit abbreviations stripped from product names.
pub const UNIT_TOKENS: &[&str] = &["Unid.", "Unid", "Pct", "L", "Unidade", "uni", "G"];

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\d{2}\)[\s\d-]*").expect("valid phone regex"));

static TRAILING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s\d+$").expect("valid trailing number regex"));

static ADDRESS_NOISE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    ADDRESS_NOISE
        .iter()
        .map(|noise| case_insensitive_literal(noise))
        .collect()
});

static UNIT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    UNIT_TOKENS
        .iter()
        .map(|unit| {
            Regex::new(&format!(r"(?i)\b{}\b", regex::escape(unit))).expect("valid unit regex")
        })
        .collect()
});

/// Build a case-insensitive regex matching `literal` verbatim.
pub(crate) fn case_insensitive_literal(literal: &str) -> Regex {
    Regex::new(&format!("(?i){}", regex::escape(literal))).expect("escaped literal is valid")
}

/// Remove anything shaped like a phone number with a two-digit area code,
/// e.g. `(11) 99999-9999`, plus any stray parentheses.
///
/// Keeps phone digits from being picked up as postal codes.
pub fn strip_phones(text: &str) -> String {
    PHONE.replace_all(text, "").replace(['(', ')'], "")
}

/// Collapse whitespace runs to a single space and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cut a name capture at the first neighbouring label that leaked into it.
pub fn clean_name(raw: &str) -> String {
    let mut name = raw;
    for terminator in NAME_TERMINATORS {
        if let Some(idx) = name.find(terminator) {
            name = &name[..idx];
        }
    }
    collapse_whitespace(name)
}

/// Strip delivery notices and stray suffixes from an address capture.
pub fn clean_address(raw: &str) -> String {
    let mut address = raw.to_string();
    for pattern in ADDRESS_NOISE_PATTERNS.iter() {
        address = pattern.replace_all(&address, "").into_owned();
    }
    // Only a number at the very end of the capture; a street number followed
    // by the gap before the next label survives.
    address = TRAILING_NUMBER.replace(&address, "").into_owned();
    collapse_whitespace(&address.replace(':', ""))
}

/// Remove unit abbreviations from a product name.
pub fn clean_product_name(raw: &str) -> String {
    let mut name = raw.to_string();
    for pattern in UNIT_PATTERNS.iter() {
        name = pattern.replace_all(&name, "").into_owned();
    }
    collapse_whitespace(&name)
        .trim_matches(|c| c == ' ' || c == '.')
        .to_string()
}

/// Title-case every alphabetic run: first letter upper, the rest lower.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
