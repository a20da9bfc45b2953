use crate::{
    error::ClassifierError,
    model_service::{ModelLoader, ModelService},
    prediction::{select_prediction, PredictionResult},
    preprocessing::preprocess,
};
use std::{sync::Arc, time::Duration};
use tokio::sync::OnceCell;
use tracing::instrument;

/// Classifies bean images with a model that is loaded once and then shared.
pub struct BeanClassifier<L: ModelLoader> {
    loader: L,
    model: OnceCell<Arc<L::Model>>,
    inference_timeout: Duration,
}

impl<L: ModelLoader> BeanClassifier<L> {
    pub fn new(loader: L, inference_timeout: Duration) -> Self {
        Self {
            loader,
            model: OnceCell::new(),
            inference_timeout,
        }
    }

    /// Loads the model now instead of on the first request.
    pub async fn warm_up(&self) -> Result<(), ClassifierError> {
        self.model().await.map(|_| ())
    }

    pub fn is_loaded(&self) -> bool {
        self.model.initialized()
    }

    // Concurrent callers during a cold start all wait on the same load.
    async fn model(&self) -> Result<Arc<L::Model>, ClassifierError> {
        let model = self
            .model
            .get_or_try_init(|| async {
                let loader = self.loader.clone();
                let model = tokio::task::spawn_blocking(move || loader.load()).await??;
                tracing::info!("Model loaded");
                Ok::<_, ClassifierError>(Arc::new(model))
            })
            .await?;

        Ok(model.clone())
    }

    #[instrument(skip(self, image_data), fields(bytes = image_data.len()))]
    pub async fn classify(&self, image_data: Vec<u8>) -> Result<PredictionResult, ClassifierError> {
        let model = self.model().await?;

        let task = tokio::task::spawn_blocking(move || {
            let input = preprocess(&image_data)?;
            let probabilities = model.infer(&input)?;
            select_prediction(probabilities)
        });

        let result = tokio::time::timeout(self.inference_timeout, task)
            .await
            .map_err(|_| ClassifierError::InferenceTimeout(self.inference_timeout))???;

        tracing::debug!(
            "Predicted {} with confidence {:.2} from {:?}",
            result.label,
            result.confidence,
            result.probabilities
        );

        Ok(result)
    }
}
