pub mod api;
pub mod cli;
pub mod config;
pub mod email;
pub mod startup;
pub mod templates;
pub mod ui;

use config::Config;

use crate::templates::{AssetError, TemplateStore};

pub struct AppState {
    pub config: Config,
    pub templates: TemplateStore,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, AssetError> {
        let templates = TemplateStore::new(config.templates.clone())?;
        Ok(Self { config, templates })
    }
}
