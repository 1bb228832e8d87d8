// Generator UI
// Server-rendered form + live preview. The form submits its state as query
// parameters and every request is one render pass.

mod page;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use axum_extra::extract::Query;
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

use crate::config::FormConfig;
use crate::email::{MaintenanceForm, StatusKey};
use crate::AppState;

pub use page::{html_escape, PreviewPage};

pub fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(generator_page))
        .route("/preview", get(preview_document))
}

/// Form state as submitted by the generator page.
///
/// Missing title/description mean the page was opened fresh and the
/// configured defaults apply.
#[derive(Debug, Default, Deserialize)]
pub struct PreviewQuery {
    pub title: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    #[serde(default)]
    pub components: Vec<String>,
}

impl PreviewQuery {
    pub fn into_form(self, defaults: &FormConfig) -> MaintenanceForm {
        MaintenanceForm {
            title: self
                .title
                .unwrap_or_else(|| defaults.default_title.clone()),
            status: self
                .status
                .as_deref()
                .map(StatusKey::from_key)
                .unwrap_or_default(),
            description: self
                .description
                .unwrap_or_else(|| defaults.default_description.clone()),
            start_time: self.start_time,
            end_time: self.end_time,
            components: self.components,
        }
    }
}

// Generator page: sidebar form plus rendered preview
async fn generator_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PreviewQuery>,
) -> Response {
    let form = query.into_form(&state.config.form);

    let preview = match state.templates.assets() {
        Ok(assets) => assets.render(&form).map_err(|e| {
            warn!(error = %e, "Render pass failed");
            e.to_string()
        }),
        Err(e) => {
            warn!(error = %e, "Failed to load notice template");
            Err(e.to_string())
        }
    };

    let page = PreviewPage {
        form: &form,
        components: &state.config.form.components,
        preview: preview.as_ref().map_err(String::as_str),
    };
    Html(page.render()).into_response()
}

// Standalone rendered notice with its stylesheet
async fn preview_document(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PreviewQuery>,
) -> Response {
    let form = query.into_form(&state.config.form);

    let assets = match state.templates.assets() {
        Ok(assets) => assets,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Template error: {}", e),
            )
                .into_response()
        }
    };

    match assets.render(&form) {
        Ok(preview) => Html(preview.document()).into_response(),
        Err(e) => (StatusCode::BAD_REQUEST, format!("Render error: {}", e)).into_response(),
    }
}
