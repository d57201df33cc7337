use thiserror::Error;

use crate::models::{CelebrationInput, WishInput};

/// A celebration carries at most this many images.
pub const MAX_IMAGES: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("at most {max} images are allowed, got {0}", max = MAX_IMAGES)]
    TooManyImages(usize),
}

impl CelebrationInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("recipientName", &self.recipient_name)?;
        require("message", &self.message)?;
        if let Some(images) = &self.images {
            if images.len() > MAX_IMAGES {
                return Err(ValidationError::TooManyImages(images.len()));
            }
        }
        Ok(())
    }
}

impl WishInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("celebrationId", &self.celebration_id)?;
        require("name", &self.name)?;
        require("message", &self.message)?;
        Ok(())
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Missing(field));
    }
    Ok(())
}
