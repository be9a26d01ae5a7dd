pub mod extractor;

// Re-export main types for convenient access
pub use extractor::{
    extract_dates, extract_dates_from_path, CanonicalDate, DateExtractor, ExtractedDate,
    Extraction, ExtractionRules, Grammar, RejectReason, RejectedCandidate, Span,
};
