use crate::email::{MaintenanceForm, RenderedPreview, StatusKey};

/// The generator page for one render pass
pub struct PreviewPage<'a> {
    pub form: &'a MaintenanceForm,
    /// Component vocabulary offered in the selector
    pub components: &'a [String],
    /// Rendered notice, or the reason the pass failed
    pub preview: Result<&'a RenderedPreview, &'a str>,
}

impl PreviewPage<'_> {
    pub fn render(&self) -> String {
        let preview = match self.preview {
            Ok(rendered) => format!(
                r#"<iframe class="preview-frame" title="Notice preview" srcdoc="{}"></iframe>"#,
                html_escape(&rendered.document())
            ),
            Err(message) => format!(
                r#"<div class="preview-error"><strong>Preview unavailable</strong><p>{}</p></div>"#,
                html_escape(message)
            ),
        };

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Maintenance Generator</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
            margin: 0;
            display: flex;
            min-height: 100vh;
            background-color: #f5f5f5;
        }}
        .sidebar {{
            width: 320px;
            padding: 24px;
            background-color: #1f2937;
            color: #f9fafb;
        }}
        .panel-title {{
            margin: 0 0 24px;
            font-size: 20px;
        }}
        .sidebar label {{
            display: block;
            margin: 16px 0 6px;
            font-size: 13px;
            color: #d1d5db;
        }}
        .sidebar input, .sidebar select, .sidebar textarea {{
            width: 100%;
            box-sizing: border-box;
            padding: 8px;
            border: 1px solid #374151;
            border-radius: 6px;
            background-color: #111827;
            color: #f9fafb;
            font: inherit;
        }}
        .sidebar button {{
            margin-top: 24px;
            width: 100%;
            padding: 10px;
            border: none;
            border-radius: 6px;
            background: linear-gradient(135deg, #3b82f6 0%, #2563eb 100%);
            color: white;
            font-weight: 500;
            cursor: pointer;
        }}
        .main {{
            flex: 1;
            padding: 24px 40px;
        }}
        .preview-title {{
            margin: 0 0 24px;
            font-size: 20px;
            color: #111827;
        }}
        .preview-frame {{
            width: 100%;
            height: 80vh;
            border: none;
            background-color: #ffffff;
            border-radius: 8px;
        }}
        .preview-error {{
            padding: 16px;
            border-radius: 6px;
            background-color: #fee2e2;
            color: #991b1b;
        }}
    </style>
</head>
<body>
    <aside class="sidebar">
        <h2 class="panel-title">📧 Maintenance Generator</h2>
        <form method="get" action="/" onchange="this.requestSubmit()">
            <label for="title">Maintenance Title</label>
            <input id="title" name="title" type="text" value="{title}">

            <label for="status">Status</label>
            <select id="status" name="status">{status_options}</select>

            <label for="description">Description</label>
            <textarea id="description" name="description" rows="4">{description}</textarea>

            <label for="start_time">Start Date &amp; Time (YYYY-MM-DDTHH:MM)</label>
            <input id="start_time" name="start_time" type="text" placeholder="YYYY-MM-DDTHH:MM" value="{start_time}">

            <label for="end_time">End Date &amp; Time (YYYY-MM-DDTHH:MM)</label>
            <input id="end_time" name="end_time" type="text" placeholder="YYYY-MM-DDTHH:MM" value="{end_time}">

            <label for="components">Components Affected</label>
            <select id="components" name="components" multiple size="{component_rows}">{component_options}</select>

            <button type="submit">Update preview</button>
        </form>
    </aside>
    <main class="main">
        <h2 class="preview-title">📱 Live Preview</h2>
        {preview}
    </main>
</body>
</html>"#,
            title = html_escape(&self.form.title),
            status_options = self.status_options(),
            description = html_escape(&self.form.description),
            start_time = html_escape(self.form.start_time.as_deref().unwrap_or_default()),
            end_time = html_escape(self.form.end_time.as_deref().unwrap_or_default()),
            component_rows = self.components.len().max(1),
            component_options = self.component_options(),
            preview = preview,
        )
    }

    fn status_options(&self) -> String {
        StatusKey::ALL
            .iter()
            .map(|status| {
                format!(
                    r#"<option value="{}"{}>{}</option>"#,
                    status.as_str(),
                    selected(*status == self.form.status),
                    html_escape(&status.option_label())
                )
            })
            .collect()
    }

    // Selected components outside the vocabulary are kept as extra options
    fn component_options(&self) -> String {
        let extras = self
            .form
            .components
            .iter()
            .filter(|c| !self.components.contains(*c));

        let mut seen: Vec<&String> = Vec::new();
        self.components
            .iter()
            .chain(extras)
            .filter(|c| {
                if seen.contains(c) {
                    false
                } else {
                    seen.push(*c);
                    true
                }
            })
            .map(|component| {
                let name = html_escape(component);
                format!(
                    r#"<option value="{}"{}>{}</option>"#,
                    name,
                    selected(self.form.components.contains(component)),
                    name
                )
            })
            .collect()
    }
}

fn selected(is_selected: bool) -> &'static str {
    if is_selected {
        " selected"
    } else {
        ""
    }
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocabulary() -> Vec<String> {
        vec!["API".to_string(), "Database".to_string()]
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("Tom & Jerry"), "Tom &amp; Jerry");
        assert_eq!(html_escape("\"quoted\""), "&quot;quoted&quot;");
    }

    #[test]
    fn test_form_values_are_escaped() {
        let form = MaintenanceForm {
            title: "\"><script>alert(1)</script>".to_string(),
            ..MaintenanceForm::default()
        };
        let components = vocabulary();
        let page = PreviewPage {
            form: &form,
            components: &components,
            preview: Err("nothing"),
        };
        let html = page.render();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&quot;&gt;&lt;script&gt;"));
    }

    #[test]
    fn test_selected_options() {
        let form = MaintenanceForm {
            status: StatusKey::Completed,
            components: vec!["Database".to_string(), "CDN".to_string()],
            ..MaintenanceForm::default()
        };
        let components = vocabulary();
        let page = PreviewPage {
            form: &form,
            components: &components,
            preview: Err("nothing"),
        };
        let html = page.render();

        assert!(html.contains(r#"<option value="completed" selected>✅ Completed</option>"#));
        assert!(html.contains(r#"<option value="scheduled">🟡 Scheduled</option>"#));
        assert!(html.contains(r#"<option value="API">API</option>"#));
        assert!(html.contains(r#"<option value="Database" selected>Database</option>"#));
        assert!(html.contains(r#"<option value="CDN" selected>CDN</option>"#));
    }

    #[test]
    fn test_preview_is_embedded_escaped() {
        let form = MaintenanceForm::default();
        let rendered = RenderedPreview {
            html: "<p class=\"x\">Hi</p>".to_string(),
            css: "p { color: red; }".to_string(),
        };
        let components = vocabulary();
        let page = PreviewPage {
            form: &form,
            components: &components,
            preview: Ok(&rendered),
        };
        let html = page.render();
        assert!(html.contains(
            "srcdoc=\"&lt;style&gt;p { color: red; }&lt;/style&gt;\n&lt;p class=&quot;x&quot;&gt;Hi&lt;/p&gt;\""
        ));
    }
}
