//! Template context handed to pages and the layout.
//!
//! Three namespaces are exposed: `site`, `page` and `data`.

use crate::config::{DynamicMap, SiteConfig};
use crate::utils::path::root_prefix;
use serde::Serialize;

/// Assets directory name, relative to the site root.
pub const ASSETS_DIR: &str = "assets";

#[derive(Debug, Clone, Serialize)]
pub struct PageContext<'a> {
    pub site: SiteContext<'a>,
    pub page: PageData<'a>,
    pub data: &'a DynamicMap,
}

#[derive(Debug, Clone, Serialize)]
pub struct SiteContext<'a> {
    pub title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<&'a str>,
    /// Site image, prefixed with the assets path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Relative path back to the site root (`./`, `../`, `../../`, ...).
    pub root: String,
    /// Relative path to the assets directory.
    pub assets: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageData<'a> {
    pub title: String,
    pub uri: &'a str,
    /// Rendered page body; only set while rendering the layout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl<'a> PageContext<'a> {
    /// Context for the page pass (`page.content` unset).
    pub fn new(config: &'a SiteConfig, title: String, uri: &'a str) -> Self {
        let root = root_prefix(uri);
        let assets = format!("{root}{ASSETS_DIR}/");

        Self {
            site: SiteContext {
                title: &config.title,
                description: config.description.as_deref(),
                keywords: config.keywords.as_deref(),
                image: config.image.as_ref().map(|image| format!("{assets}{image}")),
                root,
                assets,
            },
            page: PageData {
                title,
                uri,
                content: None,
            },
            data: &config.data,
        }
    }

    /// Same context for the layout pass, carrying the rendered page body.
    pub fn with_content(self, content: String) -> Self {
        Self {
            page: PageData {
                content: Some(content),
                ..self.page
            },
            ..self
        }
    }
}
