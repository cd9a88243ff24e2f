use serde::Deserialize;
use utoipa::ToSchema;

use crate::constants::MIN_PASSWORD_LENGTH;

use super::field::{Field, FieldErrors};
use super::is_valid_email;

/// Email and password pair used by sign-up and sign-in.
#[derive(Clone, Deserialize, ToSchema)]
pub struct Credentials {
    #[schema(example = "autor@ufmg.br")]
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Validate credentials before any identity provider call.
///
/// The returned credentials carry a trimmed email; the password is untouched.
pub fn validate_credentials(credentials: &Credentials) -> Result<Credentials, FieldErrors> {
    let mut errors = FieldErrors::new();

    let email = credentials.email.trim();
    if !is_valid_email(email) {
        errors.push(Field::Email, "Email inválido");
    }
    if credentials.password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.push(Field::Password, "A senha deve ter pelo menos 6 caracteres");
    }

    errors.into_result(Credentials {
        email: email.to_string(),
        password: credentials.password.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(email: &str, password: &str) -> Credentials {
        Credentials {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_valid_credentials() {
        let validated = validate_credentials(&creds(" autor@ufmg.br ", "segredo")).unwrap();
        assert_eq!(validated.email, "autor@ufmg.br");
        assert_eq!(validated.password, "segredo");
    }

    #[test]
    fn test_invalid_credentials_report_both_fields() {
        let errors = validate_credentials(&creds("autor", "12345")).unwrap_err();
        assert_eq!(errors.first(Field::Email), Some("Email inválido"));
        assert_eq!(
            errors.first(Field::Password),
            Some("A senha deve ter pelo menos 6 caracteres")
        );
    }

    #[test]
    fn test_debug_redacts_password() {
        let rendered = format!("{:?}", creds("autor@ufmg.br", "hunter22"));
        assert!(!rendered.contains("hunter22"));
    }
}
