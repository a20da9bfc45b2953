use super::{log_failure, status_code};
use crate::{
    error::ClassifierError, model_service::ModelLoader, prediction::PredictionResponse,
    server::SharedState,
};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use std::time::Instant;
use thiserror::Error;
use tracing::instrument;

const ROUTE: &str = "/api/classify";

#[derive(Error, Debug)]
pub enum ClassifyImageError {
    #[error("No image provided")]
    NoInput,
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ClassifyImageError {
    fn into_response(self) -> Response {
        let status = match &self {
            ClassifyImageError::NoInput => StatusCode::BAD_REQUEST,
            ClassifyImageError::Classifier(err) => status_code(err),
        };
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[instrument(skip(state, image_data), fields(bytes = image_data.len()))]
pub async fn classify_image<L: ModelLoader>(
    State(state): State<SharedState<L>>,
    image_data: Bytes,
) -> Result<Json<PredictionResponse>, ClassifyImageError> {
    state.metrics.record_request(ROUTE);
    if image_data.is_empty() {
        return Err(ClassifyImageError::NoInput);
    }

    let start = Instant::now();
    let result = state.classifier.classify(image_data.to_vec()).await;
    state
        .metrics
        .record_classification_duration(start.elapsed().as_millis() as u64, ROUTE);

    let result = result.inspect_err(log_failure)?;
    state.metrics.record_prediction(result.label.as_str());

    Ok(Json(PredictionResponse::from(&result)))
}
