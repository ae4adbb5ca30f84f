//! Forms posted from the ticket detail dialogs.

use serde::Deserialize;
use validator::Validate;

use crate::domain::ticket::TicketStatus;
use crate::domain::types::NoteText;
use crate::forms::FormError;

/// Status dialog submission.
#[derive(Debug, Deserialize, Validate)]
pub struct StatusForm {
    pub status: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub comment: String,
}

pub struct StatusPayload {
    pub to: TicketStatus,
    pub comment: Option<NoteText>,
}

impl TryFrom<StatusForm> for StatusPayload {
    type Error = FormError;

    fn try_from(form: StatusForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let to = TicketStatus::parse(&form.status).ok_or(FormError::InvalidStatus)?;
        // A blank comment is simply absent.
        let comment = NoteText::new(form.comment).ok();
        Ok(Self { to, comment })
    }
}

/// Internal note dialog submission.
#[derive(Debug, Deserialize, Validate)]
pub struct NoteForm {
    #[validate(length(min = 1, max = 2000))]
    pub text: String,
}

pub struct NotePayload {
    pub note: NoteText,
}

impl TryFrom<NoteForm> for NotePayload {
    type Error = FormError;

    fn try_from(form: NoteForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let note = NoteText::new(form.text).map_err(|_| FormError::InvalidNote)?;
        Ok(Self { note })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_form_parses_label() {
        let payload = StatusPayload::try_from(StatusForm {
            status: "Pending Client".to_string(),
            comment: "   ".to_string(),
        })
        .unwrap();
        assert_eq!(payload.to, TicketStatus::PendingClient);
        assert!(payload.comment.is_none());
    }

    #[test]
    fn unknown_status_is_rejected() {
        let result = StatusPayload::try_from(StatusForm {
            status: "Teleported".to_string(),
            comment: String::new(),
        });
        assert!(matches!(result, Err(FormError::InvalidStatus)));
    }

    #[test]
    fn note_markup_is_sanitized() {
        let payload = NotePayload::try_from(NoteForm {
            text: "<script>alert(1)</script>Called the client".to_string(),
        })
        .unwrap();
        assert_eq!(payload.note.as_str(), "Called the client");
    }

    #[test]
    fn note_made_only_of_markup_is_rejected() {
        let result = NotePayload::try_from(NoteForm {
            text: "<script>x</script>".to_string(),
        });
        assert!(matches!(result, Err(FormError::InvalidNote)));
    }
}
