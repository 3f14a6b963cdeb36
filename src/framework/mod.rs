//! Front-end framework declaration: which modules are active and how they
//! are configured.
//!
//! The document is read once at startup and then only queried. Its JSON form
//! uses the framework's own camelCase keys:
//!
//! ```json
//! {
//!   "compatibilityDate": "2024-11-01",
//!   "devtools": { "enabled": true },
//!   "modules": ["@nuxt/fonts", "@nuxtjs/tailwindcss", "shadcn-nuxt", "@nuxt/image"],
//!   "shadcn": { "prefix": "", "componentDir": "./components/ui" },
//!   "colorMode": { "classSuffix": "" }
//! }
//! ```

use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::FrameworkError;
use crate::shared::ColorMode;

/// Module list of the application's declaration.
pub const DEFAULT_MODULES: [&str; 4] = [
    "@nuxt/fonts",
    "@nuxtjs/tailwindcss",
    "shadcn-nuxt",
    "@nuxt/image",
];

/// Class suffix the color-mode module uses when none is declared.
pub const DEFAULT_CLASS_SUFFIX: &str = "-mode";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FrameworkConfig {
    pub compatibility_date: NaiveDate,
    #[serde(default)]
    pub devtools: DevtoolsConfig,
    #[serde(default)]
    pub modules: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadcn: Option<ShadcnConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_mode: Option<ColorModeConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevtoolsConfig {
    #[serde(default)]
    pub enabled: bool,
}

/// UI component library settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadcnConfig {
    /// Prepended to every generated component name.
    #[serde(default)]
    pub prefix: String,
    /// Where component sources live, relative to the project root.
    pub component_dir: String,
}

impl ShadcnConfig {
    /// Module that owns this section.
    pub const MODULE: &'static str = "shadcn-nuxt";

    /// Registered name of a component, e.g. `Button` → `UiButton` with
    /// prefix `Ui`.
    pub fn component_name(&self, base: &str) -> String {
        format!("{}{}", self.prefix, base)
    }
}

impl Default for ShadcnConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            component_dir: "./components/ui".to_string(),
        }
    }
}

/// Color-mode class naming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorModeConfig {
    #[serde(default = "default_class_suffix")]
    pub class_suffix: String,
}

fn default_class_suffix() -> String {
    DEFAULT_CLASS_SUFFIX.to_string()
}

impl ColorModeConfig {
    /// Class put on the root element for `mode`, e.g. `dark` + `-mode`.
    pub fn class_for(&self, mode: ColorMode) -> String {
        format!("{}{}", mode.as_str(), self.class_suffix)
    }
}

impl Default for ColorModeConfig {
    fn default() -> Self {
        Self {
            class_suffix: default_class_suffix(),
        }
    }
}

impl Default for FrameworkConfig {
    fn default() -> Self {
        Self {
            compatibility_date: NaiveDate::from_ymd_opt(2024, 11, 1).unwrap_or_default(),
            devtools: DevtoolsConfig { enabled: true },
            modules: DEFAULT_MODULES.iter().map(|m| m.to_string()).collect(),
            shadcn: Some(ShadcnConfig::default()),
            color_mode: Some(ColorModeConfig {
                class_suffix: String::new(),
            }),
        }
    }
}

impl FrameworkConfig {
    pub fn from_json_str(json: &str) -> Result<Self, FrameworkError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FrameworkError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        tracing::debug!(
            path = %path.display(),
            modules = config.modules.len(),
            "Loaded framework config"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), FrameworkError> {
        let mut seen = HashSet::new();
        for module in &self.modules {
            if module.trim().is_empty() {
                return Err(FrameworkError::EmptyModuleName);
            }
            if !seen.insert(module.as_str()) {
                return Err(FrameworkError::DuplicateModule(module.clone()));
            }
        }

        if let Some(shadcn) = &self.shadcn {
            if !self.is_enabled(ShadcnConfig::MODULE) {
                return Err(FrameworkError::MissingModule {
                    section: "shadcn",
                    module: ShadcnConfig::MODULE,
                });
            }
            if shadcn.component_dir.trim().is_empty() {
                return Err(FrameworkError::EmptyComponentDir);
            }
        }

        Ok(())
    }

    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(String::as_str)
    }

    pub fn is_enabled(&self, module: &str) -> bool {
        self.modules.iter().any(|m| m == module)
    }

    /// Color-mode settings in effect, falling back to the module defaults.
    pub fn color_mode(&self) -> ColorModeConfig {
        self.color_mode.clone().unwrap_or_default()
    }
}
