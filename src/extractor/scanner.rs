// WHY: One left-to-right pass with every grammar active as an alternative.
// Matches never overlap; scanning resumes immediately after each consumed
// match, so document order of the output equals document order in the text.

use regex_automata::Input;
use tracing::debug;

use super::grammar::GrammarBank;
use super::{Grammar, Span};

/// One located occurrence of a grammar firing, before field validation.
/// Transient: consumed immediately by token extraction.
#[derive(Debug, Clone)]
pub struct RawMatch<'a> {
    pub grammar: Grammar,
    /// The full matched substring, borrowed from the source text.
    pub text: &'a str,
    pub span: Span,
    pub day: Option<&'a str>,
    pub month: Option<&'a str>,
    pub year: Option<&'a str>,
}

/// The unresolved day/month/year token triple extracted from one match.
/// Month may be numeric text or an alphabetic name; year may be 2 or 4
/// digits; day is always numeric text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTokens<'a> {
    pub day: &'a str,
    pub month: &'a str,
    pub year: &'a str,
}

impl<'a> RawMatch<'a> {
    /// Collapse the slot captures into a token triple. Yields nothing when
    /// any slot is absent, silently dropping the match. The grammars always
    /// bind all three slots, so this is a defensive check.
    pub fn tokens(&self) -> Option<DateTokens<'a>> {
        Some(DateTokens {
            day: self.day?,
            month: self.month?,
            year: self.year?,
        })
    }
}

/// Scan `text` against the bank, yielding raw matches in scan order.
///
/// The returned iterator is lazy, finite and non-restartable; the scan is a
/// pure function of the input text with no side effects.
pub fn raw_matches<'a>(
    bank: &'a GrammarBank,
    text: &'a str,
) -> impl Iterator<Item = RawMatch<'a>> + 'a {
    debug!("Scanning {} bytes for date candidates", text.len());

    bank.regex()
        .captures_iter(Input::new(text))
        .filter_map(move |caps| {
            let overall = caps.get_match()?;
            let slot = |name: &str| {
                caps.get_group_by_name(name)
                    .map(|span| &text[span.start..span.end])
            };

            Some(RawMatch {
                grammar: bank.grammar_for(overall.pattern().as_usize()),
                text: &text[overall.start()..overall.end()],
                span: Span {
                    start: overall.start(),
                    end: overall.end(),
                },
                day: slot("day"),
                month: slot("month"),
                year: slot("year"),
            })
        })
}
