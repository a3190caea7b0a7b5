use regex::Regex;
use std::sync::LazyLock;

use super::normalize::title_case;
use crate::model::Uf;

struct UfPatterns {
    uf: Uf,
    /// Code as a suffix token: `- SP`, ` SP`.
    detect: Regex,
    /// Code plus any leading separators, for removal.
    strip: Regex,
}

static UF_PATTERNS: LazyLock<Vec<UfPatterns>> = LazyLock::new(|| {
    Uf::ALL
        .iter()
        .map(|&uf| UfPatterns {
            uf,
            detect: Regex::new(&format!(r"(?i)[- ]{}\b", uf.as_str())).expect("valid uf regex"),
            strip: Regex::new(&format!(r"(?i)[- ]*\b{}\b", uf.as_str()))
                .expect("valid uf regex"),
        })
        .collect()
});

/// Split a combined `"City - ST"` value into a title-cased city and a state.
///
/// Codes are tried in [`Uf::ALL`] order and the first one found wins. When
/// no known code is present the whole value is the city and the state is
/// `None`.
pub fn split_city_state(raw: &str) -> (String, Option<Uf>) {
    let Some(patterns) = UF_PATTERNS.iter().find(|p| p.detect.is_match(raw)) else {
        return (title_case(raw.trim()), None);
    };

    let city = patterns.strip.replace_all(raw, "");
    (title_case(city.trim()), Some(patterns.uf))
}
