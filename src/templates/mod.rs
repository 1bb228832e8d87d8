//! Template and stylesheet loading.
//!
//! Both files can be overridden in config; otherwise the copies embedded at
//! build time from `templates/` are used.

use rust_embed::RustEmbed;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::TemplatesConfig;
use crate::email::{render_preview, EmailTemplate, MaintenanceForm, RenderError, RenderedPreview};

pub const DEFAULT_TEMPLATE: &str = "maintenance_email.html";
pub const DEFAULT_STYLESHEET: &str = "styles.css";

#[derive(RustEmbed)]
#[folder = "templates/"]
struct BuiltinAssets;

/// Errors loading template assets
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Built-in asset {0} is missing")]
    MissingBuiltin(&'static str),

    #[error("Asset {0} is not valid UTF-8")]
    InvalidUtf8(String),
}

/// A loaded template and stylesheet pair
#[derive(Debug, Clone)]
pub struct Assets {
    pub template: EmailTemplate,
    pub stylesheet: String,
}

impl Assets {
    pub fn load(config: &TemplatesConfig) -> Result<Self, AssetError> {
        let template = read_asset(config.template_path.as_deref(), DEFAULT_TEMPLATE)?;
        let stylesheet = read_asset(config.stylesheet_path.as_deref(), DEFAULT_STYLESHEET)?;
        Ok(Self {
            template: EmailTemplate::parse(&template),
            stylesheet,
        })
    }

    pub fn builtin() -> Result<Self, AssetError> {
        Self::load(&TemplatesConfig::default())
    }

    pub fn render(&self, form: &MaintenanceForm) -> Result<RenderedPreview, RenderError> {
        render_preview(form, &self.template, &self.stylesheet)
    }
}

/// Read an asset from `path`, or the embedded copy named `builtin` when unset
pub fn read_asset(path: Option<&Path>, builtin: &'static str) -> Result<String, AssetError> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "Reading template asset");
            std::fs::read_to_string(path).map_err(|source| AssetError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
        None => {
            let file = BuiltinAssets::get(builtin).ok_or(AssetError::MissingBuiltin(builtin))?;
            String::from_utf8(file.data.into_owned())
                .map_err(|_| AssetError::InvalidUtf8(builtin.to_string()))
        }
    }
}

/// Source of assets for render passes.
///
/// Holds one loaded copy unless reloading is enabled, in which case the files
/// are read again for every pass.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    config: TemplatesConfig,
    cached: Option<Arc<Assets>>,
}

impl TemplateStore {
    pub fn new(config: TemplatesConfig) -> Result<Self, AssetError> {
        let cached = if config.reload {
            info!("Template reloading enabled, assets are read on every render");
            None
        } else {
            let assets = Assets::load(&config)?;
            info!(
                template = %describe(config.template_path.as_deref(), DEFAULT_TEMPLATE),
                stylesheet = %describe(config.stylesheet_path.as_deref(), DEFAULT_STYLESHEET),
                "Loaded notice template"
            );
            Some(Arc::new(assets))
        };
        Ok(Self { config, cached })
    }

    pub fn assets(&self) -> Result<Arc<Assets>, AssetError> {
        match &self.cached {
            Some(assets) => Ok(assets.clone()),
            None => Assets::load(&self.config).map(Arc::new),
        }
    }
}

/// Human-readable origin of an asset
pub fn describe(path: Option<&Path>, builtin: &str) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => format!("built-in {}", builtin),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::email::Placeholder;
    use std::io::Write;

    #[test]
    fn test_builtin_assets_load() {
        let assets = Assets::builtin().unwrap();
        assert!(assets.template.missing_placeholders().is_empty());
        assert!(assets.stylesheet.contains(".component-affected"));
    }

    #[test]
    fn test_builtin_render_has_no_leftover_tokens() {
        let assets = Assets::builtin().unwrap();
        let form = MaintenanceForm {
            title: "DB Upgrade".to_string(),
            components: vec!["Database".to_string()],
            ..MaintenanceForm::default()
        };
        let preview = assets.render(&form).unwrap();
        assert!(preview.html.contains("DB Upgrade"));
        for p in Placeholder::ALL {
            assert!(!preview.html.contains(&p.token()));
        }
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let config = TemplatesConfig {
            template_path: Some(PathBuf::from("/nonexistent/notice.html")),
            ..TemplatesConfig::default()
        };
        let err = Assets::load(&config).unwrap_err();
        assert!(matches!(err, AssetError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/notice.html"));
    }

    #[test]
    fn test_store_reloads_when_enabled() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "<h1>{{title}}</h1>").unwrap();

        let config = TemplatesConfig {
            template_path: Some(file.path().to_path_buf()),
            stylesheet_path: None,
            reload: true,
        };
        let store = TemplateStore::new(config).unwrap();
        let form = MaintenanceForm {
            title: "First".to_string(),
            ..MaintenanceForm::default()
        };
        assert_eq!(store.assets().unwrap().render(&form).unwrap().html, "<h1>First</h1>");

        std::fs::write(file.path(), "<h2>{title}</h2>").unwrap();
        assert_eq!(store.assets().unwrap().render(&form).unwrap().html, "<h2>First</h2>");
    }

    #[test]
    fn test_store_caches_by_default() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "<h1>{{title}}</h1>").unwrap();

        let config = TemplatesConfig {
            template_path: Some(file.path().to_path_buf()),
            stylesheet_path: None,
            reload: false,
        };
        let store = TemplateStore::new(config).unwrap();
        std::fs::write(file.path(), "<h2>{title}</h2>").unwrap();

        let form = MaintenanceForm::default();
        assert_eq!(store.assets().unwrap().render(&form).unwrap().html, "<h1></h1>");
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(None, DEFAULT_TEMPLATE), "built-in maintenance_email.html");
        assert_eq!(describe(Some(Path::new("a/b.css")), DEFAULT_STYLESHEET), "a/b.css");
    }
}
