// WHY: Standalone pure calendar logic so validation is testable without a
// compiled grammar bank. Validation canonicalizes tokens to integers; the
// caller keeps rendering from the original tokens.

use serde::Serialize;

use super::scanner::DateTokens;

/// The fully resolved integer date. Used only for validation; accepted
/// output is rendered from the original tokens, not from these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CanonicalDate {
    pub day: u32,
    /// Always 1..=12 once validated.
    pub month: u32,
    /// Full 4-digit year after century inference.
    pub year: i32,
}

/// Why a date-shaped candidate was not accepted. Plain extraction drops
/// these silently; only the diagnostic API reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RejectReason {
    /// A required day/month/year field was absent or non-numeric where a
    /// number was required.
    MissingField,
    /// The month name is not in the English month table.
    UnknownMonthName,
    /// Month outside 1..=12.
    MonthOutOfRange,
    /// Day outside the valid range for the resolved month and year.
    DayOutOfRange,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            RejectReason::MissingField => "missing day, month, or year field",
            RejectReason::UnknownMonthName => "month name not recognized",
            RejectReason::MonthOutOfRange => "month outside 1-12",
            RejectReason::DayOutOfRange => "day outside valid range for month",
        };
        f.write_str(msg)
    }
}

/// English month names and standard 3-letter abbreviations, matched after
/// lowercasing so month tokens are case-insensitive.
fn month_from_name(name: &str) -> Option<u32> {
    let number = match name.to_ascii_lowercase().as_str() {
        "january" | "jan" => 1,
        "february" | "feb" => 2,
        "march" | "mar" => 3,
        "april" | "apr" => 4,
        "may" => 5,
        "june" | "jun" => 6,
        "july" | "jul" => 7,
        "august" | "aug" => 8,
        "september" | "sep" => 9,
        "october" | "oct" => 10,
        "november" | "nov" => 11,
        "december" | "dec" => 12,
        _ => return None,
    };
    Some(number)
}

/// Proleptic Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Days in `month` for `year`; `month` must be 1..=12.
pub fn days_in_month(month: u32, year: i32) -> u32 {
    const DAYS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS[(month - 1) as usize]
    }
}

/// Century inference for two-digit years: values above `century_split` are
/// read as 19xx, values at or below it as 20xx. Four-digit years pass
/// through unchanged.
pub fn resolve_year(year: i32, century_split: i32) -> i32 {
    if year < 100 {
        if year > century_split {
            1900 + year
        } else {
            2000 + year
        }
    } else {
        year
    }
}

/// Validate one token triple against calendar rules.
///
/// Check order is fixed: structural (missing/non-numeric fields), then
/// lexical (month-name lookup), then range (month 1-12, day against the
/// per-month table with leap-year handling).
pub fn validate(
    tokens: &DateTokens<'_>,
    century_split: i32,
) -> Result<CanonicalDate, RejectReason> {
    if tokens.day.is_empty() || tokens.month.is_empty() || tokens.year.is_empty() {
        return Err(RejectReason::MissingField);
    }

    // Day and year tokens are numeric by grammar design; a parse failure is
    // treated as a missing field.
    let day: u32 = tokens.day.parse().map_err(|_| RejectReason::MissingField)?;
    let year: i32 = tokens.year.parse().map_err(|_| RejectReason::MissingField)?;
    let year = resolve_year(year, century_split);

    let month: u32 = if tokens.month.chars().all(|c| c.is_ascii_digit()) {
        tokens
            .month
            .parse()
            .map_err(|_| RejectReason::MonthOutOfRange)?
    } else {
        month_from_name(tokens.month).ok_or(RejectReason::UnknownMonthName)?
    };

    if !(1..=12).contains(&month) {
        return Err(RejectReason::MonthOutOfRange);
    }

    if day < 1 || day > days_in_month(month, year) {
        return Err(RejectReason::DayOutOfRange);
    }

    Ok(CanonicalDate { day, month, year })
}
