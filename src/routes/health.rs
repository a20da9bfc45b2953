use crate::{model_service::ModelLoader, server::SharedState};
use axum::{extract::State, response::IntoResponse, response::Json};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct Status {
    status: String,
    model_loaded: bool,
}

pub async fn healthcheck<L: ModelLoader>(State(state): State<SharedState<L>>) -> impl IntoResponse {
    Json(Status {
        status: "Available".into(),
        model_loaded: state.classifier.is_loaded(),
    })
}

#[cfg(test)]
mod tests {
    use crate::preprocessing::tests::solid_png;
    use crate::routes::tests::{body_string, test_router};
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_reports_model_after_first_classification() {
        let (router, _) = test_router(vec![0.1, 0.1, 0.7, 0.1]);

        let response = router
            .clone()
            .oneshot(
                Request::post("/api/classify")
                    .body(Body::from(solid_png(32, 32, [200, 150, 90])))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["status"], "Available");
        assert_eq!(json["model_loaded"], true);
    }
}
