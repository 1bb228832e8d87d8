// Notice preview API
//
// JSON endpoints backing the generator: render a form, list statuses and the
// component vocabulary.

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use super::error::ApiError;
use crate::email::{MaintenanceForm, RenderedPreview, StatusKey};
use crate::AppState;

/// Status catalog entry
#[derive(Debug, Serialize)]
pub struct StatusInfo {
    pub key: StatusKey,
    pub option_label: String,
    pub icon: &'static str,
    pub label: &'static str,
    pub css_class: &'static str,
    pub end_label: &'static str,
}

impl From<StatusKey> for StatusInfo {
    fn from(key: StatusKey) -> Self {
        let meta = key.metadata();
        Self {
            key,
            option_label: key.option_label(),
            icon: meta.icon,
            label: meta.label,
            css_class: meta.css_class,
            end_label: meta.end_label,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ComponentsResponse {
    pub components: Vec<String>,
}

/// Render a notice from a JSON form
pub async fn render_preview(
    State(state): State<Arc<AppState>>,
    Json(form): Json<MaintenanceForm>,
) -> Result<Json<RenderedPreview>, ApiError> {
    let assets = state.templates.assets()?;
    let preview = assets.render(&form)?;
    Ok(Json(preview))
}

pub async fn list_statuses() -> Json<Vec<StatusInfo>> {
    Json(StatusKey::ALL.into_iter().map(StatusInfo::from).collect())
}

pub async fn list_components(State(state): State<Arc<AppState>>) -> Json<ComponentsResponse> {
    Json(ComponentsResponse {
        components: state.config.form.components.clone(),
    })
}
