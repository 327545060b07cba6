use markdown_ruler_engine::{Markdown, Options, Preset};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error(transparent)]
    Engine(#[from] markdown_ruler_engine::ConfigError),
}

impl From<markdown_ruler_engine::RulerError> for ConfigError {
    fn from(err: markdown_ruler_engine::RulerError) -> Self {
        ConfigError::Engine(err.into())
    }
}

/// Per-field overrides applied on top of the preset's options. Fields left
/// out of the file keep the preset's value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xhtml_out: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breaks: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkify: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typographer: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quotes: Option<[String; 4]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_nesting: Option<usize>,
}

impl OptionOverrides {
    pub fn apply(&self, options: &mut Options) {
        if let Some(html) = self.html {
            options.html = html;
        }
        if let Some(xhtml_out) = self.xhtml_out {
            options.xhtml_out = xhtml_out;
        }
        if let Some(breaks) = self.breaks {
            options.breaks = breaks;
        }
        if let Some(lang_prefix) = &self.lang_prefix {
            options.lang_prefix = lang_prefix.clone();
        }
        if let Some(linkify) = self.linkify {
            options.linkify = linkify;
        }
        if let Some(typographer) = self.typographer {
            options.typographer = typographer;
        }
        if let Some(quotes) = &self.quotes {
            options.quotes = quotes.clone();
        }
        if let Some(max_nesting) = self.max_nesting {
            options.max_nesting = max_nesting;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub preset: Preset,
    /// Rules to switch on after the preset is applied.
    pub enable: Vec<String>,
    /// Rules to switch off after `enable`.
    pub disable: Vec<String>,
    pub options: OptionOverrides,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        log::debug!("loaded config from {}", config_path.display());
        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/markdown-ruler");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Expands `~` and environment variables in a user-supplied path.
    pub fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }

    /// A `Markdown` engine with the preset, option overrides and rule
    /// toggles of this config applied. Unknown rule names are an error.
    pub fn build(&self) -> Result<Markdown, ConfigError> {
        let mut md = Markdown::with_preset(self.preset);

        let mut options = md.options.clone();
        self.options.apply(&mut options);
        md.set(options);

        if !self.enable.is_empty() {
            md.enable(&self.enable, false)?;
        }
        if !self.disable.is_empty() {
            md.disable(&self.disable, false)?;
        }
        Ok(md)
    }
}
