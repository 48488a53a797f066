use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

/// Character encoding of the generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum XmlEncoding {
    #[default]
    #[serde(rename = "utf-8")]
    Utf8,
    #[serde(rename = "utf-16")]
    Utf16,
    #[serde(rename = "iso-8859-1")]
    Iso8859_1,
}

impl XmlEncoding {
    /// Label written into the XML declaration.
    pub fn label(self) -> &'static str {
        match self {
            XmlEncoding::Utf8 => "utf-8",
            XmlEncoding::Utf16 => "utf-16",
            XmlEncoding::Iso8859_1 => "iso-8859-1",
        }
    }
}

impl FromStr for XmlEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(XmlEncoding::Utf8),
            "utf-16" | "utf16" => Ok(XmlEncoding::Utf16),
            "iso-8859-1" | "latin-1" | "latin1" => Ok(XmlEncoding::Iso8859_1),
            other => Err(format!(
                "unknown encoding '{other}' (expected utf-8, utf-16, or iso-8859-1)"
            )),
        }
    }
}

/// `<changefreq>` value applied uniformly to every URL in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    #[default]
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFreq::Always => "always",
            ChangeFreq::Hourly => "hourly",
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
            ChangeFreq::Yearly => "yearly",
            ChangeFreq::Never => "never",
        }
    }
}

impl FromStr for ChangeFreq {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "always" => Ok(ChangeFreq::Always),
            "hourly" => Ok(ChangeFreq::Hourly),
            "daily" => Ok(ChangeFreq::Daily),
            "weekly" => Ok(ChangeFreq::Weekly),
            "monthly" => Ok(ChangeFreq::Monthly),
            "yearly" => Ok(ChangeFreq::Yearly),
            "never" => Ok(ChangeFreq::Never),
            other => Err(format!(
                "unknown changefreq '{other}' (expected always, hourly, daily, weekly, monthly, yearly, or never)"
            )),
        }
    }
}

/// Options for one generation run, immutable for its duration.
///
/// Also the shape of the defaults file at `~/.config/smg/config.toml`;
/// CLI flags override the file per invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Encoding of the generated document.
    #[serde(default)]
    pub encoding: XmlEncoding,
    /// `<changefreq>` applied to all URLs.
    #[serde(default)]
    pub changefreq: ChangeFreq,
    /// `<priority>` applied to all URLs, in `[0.0, 1.0]`, one decimal digit.
    #[serde(default = "default_priority")]
    pub priority: f64,
    /// Strip one trailing slash from non-root URLs before comparing.
    #[serde(default)]
    pub trim_trailing_slash: bool,
    /// Lowercase URLs before comparing.
    #[serde(default)]
    pub lowercase: bool,
    /// Keep only the first occurrence of a URL repeated inside the uploaded sitemap.
    #[serde(default = "default_dedupe_existing")]
    pub dedupe_existing: bool,
}

fn default_priority() -> f64 {
    1.0
}

fn default_dedupe_existing() -> bool {
    true
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            encoding: XmlEncoding::Utf8,
            changefreq: ChangeFreq::Monthly,
            priority: 1.0,
            trim_trailing_slash: false,
            lowercase: false,
            dedupe_existing: true,
        }
    }
}

impl GenerateOptions {
    /// Rejects option values the pipeline cannot render.
    /// Checked at the edge (config load, CLI) so the core stays infallible.
    pub fn validate(&self) -> Result<()> {
        if !self.priority.is_finite() || !(0.0..=1.0).contains(&self.priority) {
            anyhow::bail!("priority must be between 0.0 and 1.0, got {}", self.priority);
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("smg")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load default options from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<GenerateOptions> {
    let path = config_path()?;
    if !path.exists() {
        let defaults = GenerateOptions::default();
        let toml = toml::to_string_pretty(&defaults)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(defaults);
    }

    let data = fs::read_to_string(&path)?;
    let opts: GenerateOptions = toml::from_str(&data)?;
    opts.validate()?;
    Ok(opts)
}
