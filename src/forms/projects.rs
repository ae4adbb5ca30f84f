use serde::Deserialize;
use validator::Validate;

use crate::domain::types::Percent;
use crate::forms::FormError;

/// Progress report posted from the projects page.
#[derive(Debug, Deserialize, Validate)]
pub struct ProgressForm {
    #[validate(range(max = 100))]
    pub progress: u8,
    /// Total spent so far; left untouched when omitted.
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub spent: Option<f64>,
}

pub struct ProgressPayload {
    pub progress: Percent,
    pub spent: Option<f64>,
}

impl TryFrom<ProgressForm> for ProgressPayload {
    type Error = FormError;

    fn try_from(form: ProgressForm) -> Result<Self, Self::Error> {
        form.validate()?;
        if form.spent.is_some_and(|spent| !spent.is_finite()) {
            return Err(FormError::InvalidAmount);
        }
        Ok(Self {
            progress: Percent::new(form.progress)?,
            spent: form.spent,
        })
    }
}
