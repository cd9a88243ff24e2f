//! Submission tracking codes
//!
//! A code is a prefix followed by a zero-padded ordinal (`ENG0001`). The
//! ordinal is padded to at least [`CODE_ORDINAL_WIDTH`] digits and is never
//! truncated, so `ENG12345` follows `ENG9999`.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::constants::{CODE_ORDINAL_WIDTH, DEFAULT_CODE_PREFIX};

/// An issued submission code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, example = "ENG0042")]
pub struct SubmissionCode(String);

impl SubmissionCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for SubmissionCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SubmissionCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Formatting rules for submission codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeFormat {
    prefix: String,
    width: usize,
}

impl CodeFormat {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            width: CODE_ORDINAL_WIDTH,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Render the code for `ordinal`.
    pub fn format(&self, ordinal: u64) -> SubmissionCode {
        SubmissionCode(format!(
            "{}{:0width$}",
            self.prefix,
            ordinal,
            width = self.width
        ))
    }

    /// Parse a code issued under this format, returning it with its ordinal.
    ///
    /// Accepts exactly the prefix followed by at least `width` ASCII digits.
    pub fn parse(&self, raw: &str) -> Option<(SubmissionCode, u64)> {
        let digits = raw.strip_prefix(self.prefix.as_str())?;
        if digits.len() < self.width || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let ordinal = digits.parse::<u64>().ok()?;
        Some((SubmissionCode(raw.to_string()), ordinal))
    }
}

impl Default for CodeFormat {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pads_to_four_digits() {
        let format = CodeFormat::default();
        assert_eq!(format.format(1).as_str(), "ENG0001");
        assert_eq!(format.format(42).as_str(), "ENG0042");
        assert_eq!(format.format(9999).as_str(), "ENG9999");
    }

    #[test]
    fn test_format_widens_instead_of_truncating() {
        let format = CodeFormat::default();
        assert_eq!(format.format(10000).as_str(), "ENG10000");
        assert_eq!(format.format(12345).as_str(), "ENG12345");
    }

    #[test]
    fn test_custom_prefix() {
        let format = CodeFormat::new("PDM");
        assert_eq!(format.format(7).as_str(), "PDM0007");
        assert_eq!(format.prefix(), "PDM");
    }

    #[test]
    fn test_parse_round_trips_ordinal() {
        let format = CodeFormat::default();
        let (code, ordinal) = format.parse("ENG0042").unwrap();
        assert_eq!(code.as_str(), "ENG0042");
        assert_eq!(ordinal, 42);

        let (_, wide) = format.parse("ENG123456").unwrap();
        assert_eq!(wide, 123456);
    }

    #[test]
    fn test_parse_rejects_malformed_codes() {
        let format = CodeFormat::default();
        assert!(format.parse("ENG042").is_none());
        assert!(format.parse("XYZ0042").is_none());
        assert!(format.parse("ENG00a2").is_none());
        assert!(format.parse("eng0042").is_none());
        assert!(format.parse("").is_none());
    }

    #[test]
    fn test_code_serializes_as_plain_string() {
        let code = CodeFormat::default().format(3);
        let json = serde_json::to_value(&code).unwrap();
        assert_eq!(json, serde_json::json!("ENG0003"));
    }
}
