/// User settings kept in chrome.storage.sync

use serde::{Deserialize, Serialize};
use url::Url;

use crate::issue_data::Field;
use crate::template::DEFAULT_TEMPLATE;

pub const SETTINGS_KEY: &str = "redmine_formatter_settings";
pub const DEFAULT_SITE_URL: &str = "https://redmine.twjoin.com";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Redmine site the extension is meant for
    pub site_url: String,
    pub template: String,
    pub show_only_selected: bool,
    /// Context menu label used for batch updates
    pub batch_field: String,
}

impl Settings {
    pub fn new() -> Self {
        Settings {
            site_url: DEFAULT_SITE_URL.to_string(),
            template: DEFAULT_TEMPLATE.to_string(),
            show_only_selected: false,
            batch_field: Field::Status.label().to_string(),
        }
    }

    /// Accept an http(s) URL and keep it without a trailing slash.
    /// Returns false and leaves the setting unchanged otherwise.
    pub fn set_site_url(&mut self, input: &str) -> bool {
        match Url::parse(input.trim()) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => {
                self.site_url = url.as_str().trim_end_matches('/').to_string();
                true
            }
            _ => false,
        }
    }

    /// The template to format with; an emptied template falls back to the default
    pub fn effective_template(&self) -> &str {
        if self.template.trim().is_empty() {
            DEFAULT_TEMPLATE
        } else {
            &self.template
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}
