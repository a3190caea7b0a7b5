//! Wall-clock access for the declaration date.
//!
//! The declaration is always dated at processing time, shifted three hours
//! back from UTC to Brasília time. The clock is a trait so callers and tests
//! can pin the date.

use chrono::{DateTime, Datelike, Duration, Utc};

use crate::model::DeclarationDate;

/// Offset applied to the clock reading before it is split into a date.
pub const DECLARATION_OFFSET_HOURS: i64 = 3;

const MONTHS: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system time on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Portuguese month name for a 1-based month number.
pub fn month_name(month: u32) -> &'static str {
    MONTHS[(month.clamp(1, 12) - 1) as usize]
}

/// Declaration date for "now minus three hours".
pub fn declaration_date(clock: &dyn Clock) -> DeclarationDate {
    let local = clock.now() - Duration::hours(DECLARATION_OFFSET_HOURS);
    DeclarationDate {
        day: local.day(),
        month_name: month_name(local.month()).to_string(),
        year: local.year(),
    }
}
