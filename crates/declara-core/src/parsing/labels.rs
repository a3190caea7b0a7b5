//! Label-anchored extraction.
//!
//! The order repeats the same labels for both parties, so a value is
//! addressed by label plus occurrence index. Which party owns which
//! occurrence is fixed by the source layout and captured in
//! [`OccurrenceConvention`].

use regex::Regex;
use std::sync::LazyLock;

use super::normalize::{case_insensitive_literal, clean_address, clean_name};

/// Markers that end a label-anchored capture.
pub const STOP_WORDS: &[&str] = &[
    "Endereço:",
    "Bairro:",
    "Cidade-UF:",
    "CEP:",
    "Fone:",
    "E-mail:",
    "Peso",
    "Caixa",
    "Dia para",
    "Visitante",
    "Preso",
];

static STOP_PATTERN: LazyLock<Regex> = LazyLock::new(|| stop_pattern(STOP_WORDS));

fn stop_pattern(stops: &[&str]) -> Regex {
    let alternatives: Vec<String> = stops.iter().map(|s| regex::escape(s)).collect();
    Regex::new(&format!("(?i)(?:{})", alternatives.join("|"))).expect("escaped stop words")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Sender,
    Recipient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cleaner {
    Name,
    Address,
}

/// Which party each occurrence of a repeated label belongs to.
#[derive(Debug, Clone, Copy)]
pub struct OccurrenceConvention {
    pub label: &'static str,
    pub cleaner: Cleaner,
    /// `order[i]` owns occurrence `i`.
    pub order: [Side; 2],
}

/// `Nome:` opens with the sender's name.
pub const NAME: OccurrenceConvention = OccurrenceConvention {
    label: "Nome:",
    cleaner: Cleaner::Name,
    order: [Side::Sender, Side::Recipient],
};

/// `Endereço:` opens with the recipient's address.
pub const ADDRESS: OccurrenceConvention = OccurrenceConvention {
    label: "Endereço:",
    cleaner: Cleaner::Address,
    order: [Side::Recipient, Side::Sender],
};

/// `Cidade-UF:` opens with the recipient's city.
pub const CITY_STATE: OccurrenceConvention = OccurrenceConvention {
    label: "Cidade-UF:",
    cleaner: Cleaner::Name,
    order: [Side::Recipient, Side::Sender],
};

impl OccurrenceConvention {
    pub fn occurrence_for(&self, side: Side) -> usize {
        if self.order[0] == side {
            0
        } else {
            1
        }
    }

    /// Extract and clean this label's value for `side`.
    pub fn extract(&self, text: &str, side: Side) -> String {
        let raw = extract_nth(text, self.label, self.occurrence_for(side));
        match self.cleaner {
            Cleaner::Name => clean_name(&raw),
            Cleaner::Address => clean_address(&raw),
        }
    }
}

/// Text following the `index`-th case-insensitive occurrence of `label`,
/// cut at the nearest stop word. Newlines are treated as spaces.
///
/// Returns an empty string when the label occurs fewer than `index + 1` times.
pub fn extract_nth(text: &str, label: &str, index: usize) -> String {
    let flat = text.replace('\n', " ");
    let Some(occurrence) = case_insensitive_literal(label).find_iter(&flat).nth(index) else {
        return String::new();
    };

    let tail = &flat[occurrence.end()..];
    let end = STOP_PATTERN.find(tail).map(|m| m.start()).unwrap_or(tail.len());
    tail[..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORDER: &str = "Nome: Carlos Pereira Fone: (11) 98888-7777\n\
                         Nome: José Santos\n\
                         Endereço: Rua A, 10 Bairro: Centro\n\
                         Cidade-UF: Hortolândia - SP CEP: 13184-010\n\
                         Endereço: Rua B, 20 Bairro: Vila Nova\n\
                         Cidade-UF: Campinas - SP CEP: 13010-000\n";

    #[test]
    fn test_extract_nth_stops_at_next_label() {
        assert_eq!(extract_nth(ORDER, "Nome:", 0).trim(), "Carlos Pereira");
        assert_eq!(extract_nth(ORDER, "Endereço:", 1).trim(), "Rua B, 20");
    }

    #[test]
    fn test_extract_nth_is_case_insensitive() {
        assert_eq!(extract_nth(ORDER, "nome:", 1).trim(), "José Santos");
    }

    #[test]
    fn test_extract_nth_missing_occurrence_is_empty() {
        assert_eq!(extract_nth(ORDER, "Nome:", 2), "");
        assert_eq!(extract_nth(ORDER, "Telefone:", 0), "");
    }

    #[test]
    fn test_extract_nth_runs_to_end_without_stop() {
        assert_eq!(extract_nth("Nome: Ana", "Nome:", 0), " Ana");
    }

    #[test]
    fn test_convention_directions() {
        assert_eq!(NAME.occurrence_for(Side::Sender), 0);
        assert_eq!(NAME.occurrence_for(Side::Recipient), 1);
        assert_eq!(ADDRESS.occurrence_for(Side::Recipient), 0);
        assert_eq!(ADDRESS.occurrence_for(Side::Sender), 1);
        assert_eq!(CITY_STATE.occurrence_for(Side::Recipient), 0);
        assert_eq!(CITY_STATE.occurrence_for(Side::Sender), 1);
    }

    #[test]
    fn test_convention_extract_applies_cleaner() {
        assert_eq!(NAME.extract(ORDER, Side::Sender), "Carlos Pereira");
        assert_eq!(NAME.extract(ORDER, Side::Recipient), "José Santos");
        assert_eq!(ADDRESS.extract(ORDER, Side::Recipient), "Rua A, 10");
        assert_eq!(ADDRESS.extract(ORDER, Side::Sender), "Rua B, 20");
        assert_eq!(
            CITY_STATE.extract(ORDER, Side::Recipient),
            "Hortolândia - SP"
        );
    }
}
