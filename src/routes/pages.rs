use crate::{
    model_service::ModelLoader,
    pages::{
        about_context, dashboard_context, education_context, home_context, predict_context, Page,
        PageError, PredictView,
    },
    roast_level::RoastLevel,
    server::SharedState,
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    level: Option<String>,
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        tracing::error!("{}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Something went wrong: {}", self),
        )
            .into_response()
    }
}

#[instrument(skip(state))]
pub async fn show_page<L: ModelLoader>(
    page: Page,
    State(state): State<SharedState<L>>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, PageError> {
    state.metrics.record_request(page.path());

    let content = match page {
        Page::Home => home_context(),
        Page::Dashboard => dashboard_context(),
        Page::Predict => predict_context(&PredictView::NoInput),
        Page::Education => {
            let level = query
                .level
                .as_deref()
                .and_then(RoastLevel::parse)
                .unwrap_or(RoastLevel::Green);
            education_context(level)
        }
        Page::About => about_context(),
    };

    state.templates.render(page, content)
}
