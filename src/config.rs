// Tue Jan 13 2026 - Alex

use crate::structure::{StructError, TypeRegistry};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    /// alias -> existing type name
    pub typedefs: BTreeMap<String, String>,
    pub hexdump_width: usize,
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            typedefs: BTreeMap::new(),
            hexdump_width: 16,
            color: true,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate().map_err(|e| anyhow::anyhow!(e))?;
        Ok(config)
    }

    pub fn with_log_level(mut self, level: &str) -> Self {
        self.log_level = level.to_string();
        self
    }

    pub fn with_typedef(mut self, alias: &str, existing: &str) -> Self {
        self.typedefs.insert(alias.to_string(), existing.to_string());
        self
    }

    pub fn with_hexdump_width(mut self, width: usize) -> Self {
        self.hexdump_width = width;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.hexdump_width == 0 {
            return Err("hexdump_width must be greater than 0".to_string());
        }
        if !matches!(
            self.log_level.to_lowercase().as_str(),
            "off" | "error" | "warn" | "info" | "debug" | "trace"
        ) {
            return Err(format!("unknown log_level '{}'", self.log_level));
        }
        Ok(())
    }

    /// Registers the configured typedefs. Aliases may build on each other as
    /// long as each target is defined first in alphabetical order.
    pub fn apply_typedefs(&self, registry: &TypeRegistry) -> Result<(), StructError> {
        for (alias, existing) in &self.typedefs {
            registry.typedef(existing, alias)?;
        }
        Ok(())
    }
}
