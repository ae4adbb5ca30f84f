//! Sign-in against the users supplied by the data source.

use crate::domain::types::EntityId;
use crate::domain::user::User;
use crate::forms::auth::{LoginForm, LoginPayload};
use crate::repository::UserReader;
use crate::services::{ServiceError, ServiceResult};

/// Resolves the account behind the submitted email.
pub fn sign_in<R>(repo: &R, form: LoginForm) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    let payload = LoginPayload::try_from(form)?;

    match repo.get_user_by_email(&payload.email)? {
        Some(user) => {
            log::info!("User {} signed in", user.id);
            Ok(user)
        }
        None => {
            log::warn!("Sign-in attempt for unknown account {}", payload.email.as_str());
            Err(ServiceError::Unauthorized)
        }
    }
}

/// Loads the user a session identity points at.
pub fn resolve_session_user<R>(repo: &R, id: &str) -> ServiceResult<Option<User>>
where
    R: UserReader + ?Sized,
{
    let Ok(id) = EntityId::new(id) else {
        return Ok(None);
    };
    Ok(repo.get_user_by_id(&id)?)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::user::UserRole;
    use crate::repository::mock::MockRepository;
    use crate::services::fixtures;

    #[test]
    fn known_email_signs_in() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_email()
            .withf(|email| email.as_str() == "ana@example.com")
            .times(1)
            .returning(|_| Ok(Some(fixtures::user(UserRole::Support))));

        let user = sign_in(
            &repo,
            LoginForm {
                email: "ANA@example.com".to_string(),
            },
        )
        .unwrap();
        assert_eq!(user.role, UserRole::Support);
    }

    #[test]
    fn unknown_email_is_unauthorized() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_email().returning(|_| Ok(None));

        let result = sign_in(
            &repo,
            LoginForm {
                email: "ghost@example.com".to_string(),
            },
        );
        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn malformed_email_never_reaches_the_repository() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_email().times(0);

        let result = sign_in(
            &repo,
            LoginForm {
                email: "nope".to_string(),
            },
        );
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn blank_identity_resolves_to_no_user() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_id().times(0);

        assert!(resolve_session_user(&repo, "  ").unwrap().is_none());
    }
}
