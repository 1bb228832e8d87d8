/// Text shown when the notice lists no affected components
pub const NO_COMPONENTS: &str = "No components specified";

/// Render the affected-components list as HTML.
///
/// One entry per component in input order; duplicates are kept. Component
/// names are inserted verbatim.
pub fn render_components(components: &[String]) -> String {
    if components.is_empty() {
        return component_entry(NO_COMPONENTS);
    }

    components
        .iter()
        .map(|component| component_entry(component))
        .collect()
}

fn component_entry(text: &str) -> String {
    format!(
        r#"<div class="component-affected"><span class="check-icon">✓</span>{}</div>"#,
        text
    )
}
