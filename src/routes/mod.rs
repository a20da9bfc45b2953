mod classify;
mod health;
mod metrics;
mod pages;
mod predict;

use crate::{error::ClassifierError, model_service::ModelLoader, pages::Page, server::SharedState};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};

pub fn api_routes<L: ModelLoader>() -> Router<SharedState<L>> {
    let mut router = Router::new();
    for page in Page::ALL {
        let method_router = get(
            move |state: State<SharedState<L>>, query: Query<pages::PageQuery>| {
                pages::show_page(page, state, query)
            },
        );
        let method_router = match page {
            Page::Predict => method_router.post(predict::upload_image::<L>),
            Page::Home | Page::Dashboard | Page::Education | Page::About => method_router,
        };
        router = router.route(page.path(), method_router);
    }

    router
        .route("/api/classify", post(classify::classify_image::<L>))
        .route("/health", get(health::healthcheck::<L>))
        .route("/metrics", get(metrics::metrics_handler::<L>))
}

fn log_failure(err: &ClassifierError) {
    if err.is_client_error() {
        tracing::warn!("Classification failed: {}", err);
    } else {
        tracing::error!("Classification failed: {}", err);
    }
}

fn status_code(err: &ClassifierError) -> StatusCode {
    match err {
        ClassifierError::InvalidImage(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ClassifierError::InferenceTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
        ClassifierError::ModelLoad(_) => StatusCode::SERVICE_UNAVAILABLE,
        ClassifierError::Inference(_) | ClassifierError::TaskJoin(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{
        classifier::{tests::MockLoader, BeanClassifier},
        pages::Templates,
        telemetry::Metrics,
    };
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use std::{sync::Arc, time::Duration};
    use tower::ServiceExt;

    pub(crate) fn test_router(probabilities: Vec<f32>) -> (Router, MockLoader) {
        let loader = MockLoader::new(probabilities);
        let state = SharedState {
            classifier: Arc::new(BeanClassifier::new(loader.clone(), Duration::from_secs(5))),
            templates: Arc::new(Templates::new().unwrap()),
            metrics: Arc::new(Metrics::new().unwrap()),
        };
        (api_routes().with_state(state), loader)
    }

    pub(crate) async fn body_string(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_every_page_is_served() {
        let (router, loader) = test_router(vec![0.25; 4]);

        for page in Page::ALL {
            let response = router
                .clone()
                .oneshot(Request::get(page.path()).body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK, "{:?}", page);
            let html = body_string(response).await;
            assert!(html.contains(page.title()));
        }

        assert_eq!(
            loader.loads.load(std::sync::atomic::Ordering::SeqCst),
            0,
            "static pages must not load the model"
        );
    }

    #[tokio::test]
    async fn test_health_and_metrics() {
        let (router, _) = test_router(vec![0.25; 4]);

        let response = router
            .clone()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_string(response).await,
            r#"{"status":"Available","model_loaded":false}"#
        );

        let response = router
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (router, _) = test_router(vec![0.25; 4]);

        let response = router
            .oneshot(Request::get("/prediksi").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            status_code(&ClassifierError::InvalidImage("x".into())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_code(&ClassifierError::InferenceTimeout(Duration::from_secs(1))),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            status_code(&ClassifierError::Inference("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
