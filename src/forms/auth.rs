use serde::Deserialize;
use validator::Validate;

use crate::domain::types::UserEmail;
use crate::forms::FormError;

/// Sign-in form posted from the entry page.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email)]
    pub email: String,
}

pub struct LoginPayload {
    pub email: UserEmail,
}

impl TryFrom<LoginForm> for LoginPayload {
    type Error = FormError;

    fn try_from(form: LoginForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let email = UserEmail::new(form.email).map_err(|_| FormError::InvalidEmail)?;
        Ok(Self { email })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_normalized() {
        let payload = LoginPayload::try_from(LoginForm {
            email: "Ana@Example.com".to_string(),
        })
        .unwrap();
        assert_eq!(payload.email.as_str(), "ana@example.com");
    }

    #[test]
    fn garbage_is_rejected() {
        let result = LoginPayload::try_from(LoginForm {
            email: "not-an-email".to_string(),
        });
        assert!(matches!(result, Err(FormError::Validation(_))));
    }
}
