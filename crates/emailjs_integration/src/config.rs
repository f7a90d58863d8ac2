use std::{collections::HashMap, fs, path::Path};

use anyhow::Context;
use serde::Deserialize;

/// Identifiers the hosted email service needs on every send. The public key
/// is a client-side key, not a secret, but it still comes from configuration
/// rather than being embedded in code.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailJsSettings {
    pub api_base_url: String,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

impl Default for EmailJsSettings {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.emailjs.com".into(),
            service_id: "service_dev".into(),
            template_id: "template_dev".into(),
            public_key: "devkey".into(),
        }
    }
}

impl EmailJsSettings {
    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("failed to parse settings file '{}'", path.display()))
    }
}

/// Layered settings: defaults, then an optional `emailjs.toml` in the working
/// directory, then environment overrides.
pub fn load_settings() -> EmailJsSettings {
    let mut settings = EmailJsSettings::default();

    if let Ok(raw) = fs::read_to_string("emailjs.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("api_base_url") {
                settings.api_base_url = v.clone();
            }
            if let Some(v) = file_cfg.get("service_id") {
                settings.service_id = v.clone();
            }
            if let Some(v) = file_cfg.get("template_id") {
                settings.template_id = v.clone();
            }
            if let Some(v) = file_cfg.get("public_key") {
                settings.public_key = v.clone();
            }
        }
    }

    if let Ok(v) = std::env::var("EMAILJS_API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Ok(v) = std::env::var("APP__EMAILJS_API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Ok(v) = std::env::var("EMAILJS_SERVICE_ID") {
        settings.service_id = v;
    }
    if let Ok(v) = std::env::var("APP__EMAILJS_SERVICE_ID") {
        settings.service_id = v;
    }

    if let Ok(v) = std::env::var("EMAILJS_TEMPLATE_ID") {
        settings.template_id = v;
    }
    if let Ok(v) = std::env::var("APP__EMAILJS_TEMPLATE_ID") {
        settings.template_id = v;
    }

    if let Ok(v) = std::env::var("EMAILJS_PUBLIC_KEY") {
        settings.public_key = v;
    }
    if let Ok(v) = std::env::var("APP__EMAILJS_PUBLIC_KEY") {
        settings.public_key = v;
    }

    settings
}
