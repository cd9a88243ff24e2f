//! Form validation
//!
//! Validation is a pure function from a candidate form to either a typed,
//! constraint-satisfying value or a [`FieldErrors`] map. Every field is checked
//! on every call so all violations surface in one pass.

pub mod cpf;
pub mod credentials;
pub mod field;
pub mod submission;

pub use cpf::{format_cpf, normalize_cpf};
pub use credentials::{validate_credentials, Credentials};
pub use field::{Field, FieldErrors};
pub use submission::{AbstractFile, SubmissionForm, SubmissionSchema, ValidatedSubmission};

use validator::ValidateEmail;

pub(crate) fn is_valid_email(email: &str) -> bool {
    !email.is_empty() && email.validate_email()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_syntax() {
        assert!(is_valid_email("autor@ufmg.br"));
        assert!(is_valid_email("a.b+c@example.com"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("autor"));
        assert!(!is_valid_email("autor@"));
        assert!(!is_valid_email("@ufmg.br"));
    }
}
