use super::{log_failure, status_code};
use crate::{
    model_service::ModelLoader,
    pages::{predict_context, Page, PageError, PredictView},
    server::SharedState,
};
use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine};
use std::{path::Path, time::Instant};
use tracing::instrument;

const ROUTE: &str = "/predict";
const FILE_FIELD: &str = "file";
const ALLOWED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

#[derive(Debug)]
enum Upload {
    Missing,
    UnsupportedType(String),
    File(Vec<u8>),
}

fn is_allowed_file_name(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            ALLOWED_EXTENSIONS
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// Inline `data:` URI so the page can show the upload next to the result.
fn image_preview(image_data: &[u8]) -> Option<String> {
    let format = image::guess_format(image_data).ok()?;
    Some(format!(
        "data:{};base64,{}",
        format.to_mime_type(),
        STANDARD.encode(image_data)
    ))
}

async fn read_upload(multipart: &mut Multipart) -> Result<Upload, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await?;
        // Browsers send an empty part when nothing was picked.
        if file_name.is_empty() && data.is_empty() {
            return Ok(Upload::Missing);
        }
        if !is_allowed_file_name(&file_name) {
            return Ok(Upload::UnsupportedType(file_name));
        }
        if data.is_empty() {
            return Ok(Upload::Missing);
        }
        return Ok(Upload::File(data.to_vec()));
    }

    Ok(Upload::Missing)
}

#[instrument(skip(state, multipart))]
pub async fn upload_image<L: ModelLoader>(
    State(state): State<SharedState<L>>,
    mut multipart: Multipart,
) -> Result<Response, PageError> {
    state.metrics.record_request(ROUTE);

    let (status, view) = match read_upload(&mut multipart).await {
        Ok(Upload::Missing) => (StatusCode::OK, PredictView::NoInput),
        Ok(Upload::UnsupportedType(file_name)) => (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            PredictView::Failed(format!(
                "Unsupported file type: {:?}. Upload a jpg, jpeg or png image.",
                file_name
            )),
        ),
        Ok(Upload::File(image_data)) => {
            let preview = image_preview(&image_data);
            let start = Instant::now();
            let result = state.classifier.classify(image_data).await;
            state
                .metrics
                .record_classification_duration(start.elapsed().as_millis() as u64, ROUTE);

            match result {
                Ok(prediction) => {
                    state.metrics.record_prediction(prediction.label.as_str());
                    (StatusCode::OK, PredictView::Predicted { prediction, preview })
                }
                Err(e) => {
                    log_failure(&e);
                    (status_code(&e), PredictView::Failed(e.to_string()))
                }
            }
        }
        Err(e) => {
            tracing::warn!("Malformed upload: {}", e);
            (e.status(), PredictView::Failed(e.body_text()))
        }
    };

    let html = state
        .templates
        .render(Page::Predict, predict_context(&view))?;

    Ok((status, html).into_response())
}
