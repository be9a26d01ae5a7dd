// WHY: Public extraction interface with dual API - a lazy borrowed form for
// callers that want spans and canonical values, and an owned convenience
// form returning rendered strings. Both run the same scan/validate pipeline.

use anyhow::Result;
use serde::Serialize;
use tracing::debug;

pub mod calendar;
pub mod grammar;
pub mod scanner;

// Re-export core types
pub use calendar::{CanonicalDate, RejectReason};
pub use grammar::Grammar;
pub use scanner::{DateTokens, RawMatch};

/// Byte range of a matched substring in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Policy constants for extraction. The defaults reproduce the reference
/// behavior exactly; changing either field changes observable output.
#[derive(Debug, Clone)]
pub struct ExtractionRules {
    /// Two-digit years above this value are read as 19xx, values at or
    /// below it as 20xx (22 -> 2022, 23 -> 1923).
    pub century_split: i32,
    /// Grammar precedence when more than one grammar could match at the
    /// same position: earlier entries win.
    pub grammar_order: Vec<Grammar>,
}

impl Default for ExtractionRules {
    fn default() -> Self {
        Self {
            century_split: 22,
            grammar_order: vec![
                Grammar::DayFirst,
                Grammar::MonthName,
                Grammar::OrdinalDay,
                Grammar::YearFirst,
            ],
        }
    }
}

/// An accepted date occurrence. The day/month/year tokens are the original
/// matched text (an abbreviated month stays abbreviated, a two-digit year
/// stays two-digit); the canonical integers are what validation ran against.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedDate<'a> {
    pub grammar: Grammar,
    pub span: Span,
    pub day: &'a str,
    pub month: &'a str,
    pub year: &'a str,
    pub canonical: CanonicalDate,
}

impl ExtractedDate<'_> {
    /// Render as `day-month-year` using the tokens exactly as matched.
    pub fn render(&self) -> String {
        format!("{}-{}-{}", self.day, self.month, self.year)
    }
}

/// A date-shaped candidate that failed validation, with the reason. Only
/// the diagnostic API surfaces these; plain extraction drops them silently.
#[derive(Debug, Clone, Serialize)]
pub struct RejectedCandidate<'a> {
    pub grammar: Grammar,
    pub span: Span,
    pub text: &'a str,
    pub reason: RejectReason,
}

/// Extraction outcome with rejected candidates kept alongside the accepted
/// sequence. Both lists are in document order.
#[derive(Debug, Clone, Serialize)]
pub struct Extraction<'a> {
    pub accepted: Vec<ExtractedDate<'a>>,
    pub rejected: Vec<RejectedCandidate<'a>>,
}

/// Date extractor holding a compiled grammar bank.
pub struct DateExtractor {
    bank: grammar::GrammarBank,
    rules: ExtractionRules,
}

impl DateExtractor {
    /// Compile an extractor for the given rules.
    pub fn new(rules: ExtractionRules) -> Result<Self> {
        let bank = grammar::GrammarBank::compile(&rules.grammar_order)?;
        Ok(Self { bank, rules })
    }

    /// Compile an extractor with the default rules.
    pub fn with_default_rules() -> Result<Self> {
        Self::new(ExtractionRules::default())
    }

    /// Lazy borrowed API: accepted dates in document order, borrowing the
    /// source text. Invalid candidates are dropped without notice.
    pub fn extract_borrowed<'a>(
        &'a self,
        text: &'a str,
    ) -> impl Iterator<Item = ExtractedDate<'a>> + 'a {
        let century_split = self.rules.century_split;
        scanner::raw_matches(&self.bank, text).filter_map(move |m| {
            let tokens = m.tokens()?;
            let canonical = calendar::validate(&tokens, century_split).ok()?;
            Some(ExtractedDate {
                grammar: m.grammar,
                span: m.span,
                day: tokens.day,
                month: tokens.month,
                year: tokens.year,
                canonical,
            })
        })
    }

    /// Owned convenience API: rendered `day-month-year` strings in document
    /// order, duplicates preserved. Never fails on malformed date-shaped
    /// text; invalid candidates are simply omitted.
    pub fn extract_dates(&self, text: &str) -> Vec<String> {
        let dates: Vec<String> = self.extract_borrowed(text).map(|d| d.render()).collect();
        debug!("Accepted {} date occurrences", dates.len());
        dates
    }

    /// Diagnostic API: the accepted sequence of `extract_borrowed` plus the
    /// rejected candidates with spans and reasons. Additive only - the
    /// accepted list is identical to what the plain APIs produce.
    pub fn extract_with_diagnostics<'a>(&'a self, text: &'a str) -> Extraction<'a> {
        let mut accepted = Vec::new();
        let mut rejected = Vec::new();

        for m in scanner::raw_matches(&self.bank, text) {
            let outcome = match m.tokens() {
                None => Err(RejectReason::MissingField),
                Some(tokens) => calendar::validate(&tokens, self.rules.century_split)
                    .map(|canonical| (tokens, canonical)),
            };
            match outcome {
                Ok((tokens, canonical)) => accepted.push(ExtractedDate {
                    grammar: m.grammar,
                    span: m.span,
                    day: tokens.day,
                    month: tokens.month,
                    year: tokens.year,
                    canonical,
                }),
                Err(reason) => rejected.push(RejectedCandidate {
                    grammar: m.grammar,
                    span: m.span,
                    text: m.text,
                    reason,
                }),
            }
        }

        debug!(
            accepted = accepted.len(),
            rejected = rejected.len(),
            "Diagnostic extraction complete"
        );
        Extraction { accepted, rejected }
    }
}

/// Extract all valid calendar dates from `text` with the default rules.
/// Compiles a fresh extractor; reuse [`DateExtractor`] for repeated calls.
pub fn extract_dates(text: &str) -> Result<Vec<String>> {
    Ok(DateExtractor::with_default_rules()?.extract_dates(text))
}

/// Read a file and extract dates from its contents with the default rules.
pub fn extract_dates_from_path(path: &std::path::Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)?;
    extract_dates(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_match_reference_policy() {
        let rules = ExtractionRules::default();
        assert_eq!(rules.century_split, 22);
        assert_eq!(
            rules.grammar_order,
            vec![
                Grammar::DayFirst,
                Grammar::MonthName,
                Grammar::OrdinalDay,
                Grammar::YearFirst,
            ]
        );
    }

    #[test]
    fn test_render_preserves_original_tokens() {
        let extractor = DateExtractor::with_default_rules().unwrap();

        // Abbreviated month stays abbreviated, two-digit year stays two-digit
        assert_eq!(extractor.extract_dates("Apr 17 2023"), vec!["17-Apr-2023"]);
        assert_eq!(extractor.extract_dates("March 17 23"), vec!["17-March-23"]);
        assert_eq!(extractor.extract_dates("9/01/2024"), vec!["9-01-2024"]);
    }

    #[test]
    fn test_borrowed_api_carries_canonical_values() {
        let extractor = DateExtractor::with_default_rules().unwrap();
        let text = "seen on March 17 23";

        let dates: Vec<_> = extractor.extract_borrowed(text).collect();
        assert_eq!(dates.len(), 1);
        assert_eq!(dates[0].canonical.year, 1923);
        assert_eq!(dates[0].canonical.month, 3);
        assert_eq!(&text[dates[0].span.start..dates[0].span.end], "March 17 23");
    }

    #[test]
    fn test_century_split_is_configurable() {
        let rules = ExtractionRules {
            century_split: 30,
            ..ExtractionRules::default()
        };
        let extractor = DateExtractor::new(rules).unwrap();

        let dates: Vec<_> = extractor.extract_borrowed("17/3/25").collect();
        assert_eq!(dates[0].canonical.year, 2025);

        let default_extractor = DateExtractor::with_default_rules().unwrap();
        let dates: Vec<_> = default_extractor.extract_borrowed("17/3/25").collect();
        assert_eq!(dates[0].canonical.year, 1925);
    }

    #[test]
    fn test_grammar_order_is_configurable() {
        // With only the month-name grammar active, numeric forms do not match
        let rules = ExtractionRules {
            grammar_order: vec![Grammar::MonthName],
            ..ExtractionRules::default()
        };
        let extractor = DateExtractor::new(rules).unwrap();

        assert!(extractor.extract_dates("9/01/2024").is_empty());
        assert_eq!(extractor.extract_dates("Apr 17 2023"), vec!["17-Apr-2023"]);
    }

    #[test]
    fn test_convenience_function() {
        let dates = extract_dates("admitted on 19th April 2023").unwrap();
        assert_eq!(dates, vec!["19-April-2023"]);
    }

    #[test]
    fn test_diagnostics_do_not_change_accepted_output() {
        let extractor = DateExtractor::with_default_rules().unwrap();
        let text = "valid 9/01/2024, invalid 31-04-2023, valid Apr 17 2023";

        let plain = extractor.extract_dates(text);
        let extraction = extractor.extract_with_diagnostics(text);
        let from_diag: Vec<String> =
            extraction.accepted.iter().map(|d| d.render()).collect();

        assert_eq!(plain, from_diag);
        assert_eq!(extraction.rejected.len(), 1);
        assert_eq!(extraction.rejected[0].reason, RejectReason::DayOutOfRange);
    }
}
