use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Failed to load model: {0}")]
    ModelLoad(String),
    #[error("Invalid image: {0}")]
    InvalidImage(String),
    #[error("Inference failed: {0}")]
    Inference(String),
    #[error("Inference did not finish within {0:?}")]
    InferenceTimeout(Duration),
    #[error("Blocking task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl From<image::ImageError> for ClassifierError {
    fn from(err: image::ImageError) -> Self {
        ClassifierError::InvalidImage(err.to_string())
    }
}

impl ClassifierError {
    /// Errors the user can fix by uploading a different file.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ClassifierError::InvalidImage(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_invalid_images_are_client_errors() {
        assert!(ClassifierError::InvalidImage("truncated".into()).is_client_error());
        assert!(!ClassifierError::Inference("bad output".into()).is_client_error());
        assert!(!ClassifierError::ModelLoad("missing".into()).is_client_error());
        assert!(!ClassifierError::InferenceTimeout(Duration::from_millis(5)).is_client_error());
    }
}
