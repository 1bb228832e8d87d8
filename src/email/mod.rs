//! Maintenance notice rendering.
//!
//! A render pass takes a [`MaintenanceForm`] snapshot, derives the display
//! values (status metadata, formatted timestamps, component list) and
//! substitutes them into the notice template. Nothing is kept between passes.

mod components;
mod datetime;
mod error;
mod status;
mod template;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use components::{render_components, NO_COMPONENTS};
pub use datetime::{format_datetime, parse_local, NOT_SPECIFIED};
pub use error::RenderError;
pub use status::{lookup, StatusKey, StatusMetadata};
pub use template::{render, EmailTemplate, Placeholder, TemplateFields};

/// Form state for one render pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaintenanceForm {
    pub title: String,
    pub status: StatusKey,
    pub description: String,
    /// ISO-8601 local datetime, e.g. `2024-06-01T09:00`
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    /// Affected components in selection order
    #[serde(alias = "components_affected")]
    pub components: Vec<String>,
}

/// Rendered notice markup plus the stylesheet it is displayed with
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPreview {
    pub html: String,
    pub css: String,
}

impl RenderedPreview {
    /// Stylesheet injected ahead of the notice markup
    pub fn document(&self) -> String {
        format!("<style>{}</style>\n{}", self.css, self.html)
    }
}

/// Derive the template field values for a form
pub fn build_fields(form: &MaintenanceForm) -> Result<TemplateFields, RenderError> {
    let status = form.status.metadata();
    let start_time = format_datetime("start_time", form.start_time.as_deref())?;
    let end_time = format_datetime("end_time", form.end_time.as_deref())?;

    Ok(TemplateFields::new()
        .with(Placeholder::Title, form.title.as_str())
        .with(Placeholder::StatusClass, status.css_class)
        .with(Placeholder::StatusIcon, status.icon)
        .with(Placeholder::StatusText, status.label.to_lowercase())
        .with(Placeholder::Description, form.description.as_str())
        .with(Placeholder::StartTime, start_time)
        .with(Placeholder::EndLabel, status.end_label)
        .with(Placeholder::EndTime, end_time)
        .with(
            Placeholder::ComponentsAffected,
            render_components(&form.components),
        ))
}

/// Run one render pass
pub fn render_preview(
    form: &MaintenanceForm,
    template: &EmailTemplate,
    stylesheet: &str,
) -> Result<RenderedPreview, RenderError> {
    let fields = build_fields(form)?;
    let html = template.render(&fields)?;

    debug!(
        status = %form.status,
        components = form.components.len(),
        bytes = html.len(),
        "Rendered maintenance notice"
    );

    Ok(RenderedPreview {
        html,
        css: stylesheet.to_string(),
    })
}
