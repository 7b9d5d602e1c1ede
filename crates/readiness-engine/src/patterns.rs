//! Compiled patterns shared by the detectors.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Bracketed ALL-CAPS placeholder tokens, at least two characters inside
    /// the brackets: `[PLAINTIFF]`, `[CASE NUMBER]`, `[EX. A-1]`.
    pub static ref PLACEHOLDER: Regex = Regex::new(r"\[[A-Z][A-Z0-9 _.\-]+\]").unwrap();

    /// Worded exhibit references: `Exhibit 3`, `Ex. C`, `exhibit A-1`.
    pub static ref EXHIBIT_WORD: Regex =
        Regex::new(r"(?i)\b(?:exhibit|ex\.)\s*([A-Z0-9][A-Z0-9\-]*)").unwrap();

    /// Coded exhibit references: `EX-003`, `C-003`.
    pub static ref EXHIBIT_CODE: Regex = Regex::new(r"\b(?:EX|C)-(\d{1,4})\b").unwrap();

    /// Volume-reporter-page case citations: `410 U.S. 113`, `550 F.3d 640`,
    /// `972 So.2d 1044`.
    pub static ref REPORTER_CITE: Regex = Regex::new(
        r"\b\d{1,4}\s+(?:U\.S\.|S\.\s?Ct\.|F\.\s?(?:2d|3d)|So\.\s?(?:2d|3d))\s+\d{1,5}"
    )
    .unwrap();

    /// Westlaw citations: `2026 WL 123456`.
    pub static ref WL_CITE: Regex = Regex::new(r"\b\d{4}\s+WL\s+\d{4,10}\b").unwrap();

    /// Lexis citations: `2026 U.S. Dist. LEXIS 12345`.
    pub static ref LEXIS_CITE: Regex =
        Regex::new(r"\b\d{4}\s+[A-Za-z. ]{0,20}LEXIS\s+\d{1,10}\b").unwrap();

    /// Statute references: `§ 768.28`, `§1983`.
    pub static ref STATUTE_REF: Regex = Regex::new(r"\u{00A7}\s?\d[\w.\-()]*").unwrap();

    /// Case-name shapes, with or without the period after `v`.
    pub static ref CASE_NAME: Regex =
        Regex::new(r"\b[A-Z][\w'.\-]*\s+v\.?\s+[A-Z]").unwrap();

    /// A case name using bare ` v ` instead of ` v. `.
    pub static ref CASE_NAME_BARE_V: Regex =
        Regex::new(r"\b[A-Z][\w'.\-]*\s+v\s+[A-Z]").unwrap();

    /// A `(Court Year)` style parenthetical anywhere in the candidate.
    pub static ref COURT_YEAR_PAREN: Regex = Regex::new(r"\([^)]*\d{4}\)").unwrap();

    /// Pincite after a reporter cite: `, 460`.
    pub static ref PINCITE: Regex = Regex::new(r"^\s*,\s*\d{1,5}").unwrap();
}
