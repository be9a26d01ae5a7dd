// WHY: Each textual date form is a separate pattern in one multi-pattern
// scanner, so the pattern index of a match identifies which grammar fired.
// This lets every grammar bind the same slot names (day/month/year) instead
// of threading per-grammar suffixes through a merged alternation.

use anyhow::Result;
use regex_automata::meta::Regex;
use serde::Serialize;
use tracing::{debug, info};

/// One alternative textual pattern for expressing a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Grammar {
    /// Numeric day-first form: `19-04-2023`, `9/01/2024`, `17.3.23`
    DayFirst,
    /// Month-name form: `Apr 17 2023`, `March 17 23`
    MonthName,
    /// Ordinal-day form: `19th April 2023`, `4 december 2025`
    OrdinalDay,
    /// Numeric year-first (ISO-like) form: `2023-04-19`, `2024/02/29`
    YearFirst,
}

impl Grammar {
    /// Pattern text for this grammar. Every grammar binds exactly one
    /// `day`, `month` and `year` slot; names may repeat across grammars
    /// because each grammar compiles as its own pattern in the bank.
    fn pattern(self) -> String {
        // Compositional pattern components
        let day = r"(?:0?[1-9]|[12][0-9]|3[01])";
        let month_num = r"(?:0?[1-9]|1[0-2])";
        let month_name = r"[A-Za-z]+";
        let year_flex = r"(?:(?:19|20)?[0-9]{2})"; // 2 or 4 digits
        let year_full = r"(?:(?:19|20)[0-9]{2})"; // 4 digits only
        let sep = r"[-./]";
        let ordinal = r"(?:st|nd|rd|th)?";

        // WHY: \b anchoring on both ends keeps a date from being carved
        // out of a longer numeral run (e.g. "123/4/2023" must not match)
        match self {
            Grammar::DayFirst => format!(
                r"\b(?P<day>{day}){sep}(?P<month>{month_num}){sep}(?P<year>{year_flex})\b"
            ),
            Grammar::MonthName => format!(
                r"\b(?P<month>{month_name})\s+(?P<day>{day})\s+(?P<year>{year_flex})\b"
            ),
            Grammar::OrdinalDay => format!(
                r"\b(?P<day>{day}){ordinal}\s+(?P<month>{month_name})\s+(?P<year>{year_flex})\b"
            ),
            // Year slot takes 4 digits only: a leading two-digit number that
            // is not a valid day (e.g. "34/9/23") must stay unmatched rather
            // than be reread as a two-digit year.
            Grammar::YearFirst => format!(
                r"\b(?P<year>{year_full}){sep}(?P<month>{month_num}){sep}(?P<day>{day})\b"
            ),
        }
    }
}

/// The compiled bank of date grammars. Declared order is precedence order:
/// when two grammars could match at the same position, the earlier one wins
/// (leftmost-first multi-pattern semantics).
pub struct GrammarBank {
    regex: Regex,
    order: Vec<Grammar>,
}

impl GrammarBank {
    /// Compile the given grammars, in precedence order, into one scanner.
    pub fn compile(order: &[Grammar]) -> Result<Self> {
        anyhow::ensure!(!order.is_empty(), "grammar precedence order is empty");

        let patterns: Vec<String> = order.iter().map(|g| g.pattern()).collect();
        debug!("Compiling {} date grammar patterns", patterns.len());

        let regex = Regex::new_many(&patterns)?;
        info!("Compiled grammar bank with {} grammars", order.len());

        Ok(Self {
            regex,
            order: order.to_vec(),
        })
    }

    pub(crate) fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Grammar that a pattern index of the compiled scanner belongs to.
    pub(crate) fn grammar_for(&self, pattern_index: usize) -> Grammar {
        self.order[pattern_index]
    }
}
