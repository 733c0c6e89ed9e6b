//! Configuration management with TOML, environment variables, and CLI overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Search results URL scraped when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://www.amazon.in/s?k=bags&crid=2M096C61O4MLT&qid=1653308124&sprefix=ba%2Caps%2C283&ref=sr_pg_1";

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Search results URL; the page number is appended as a query parameter
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Maximum number of listing pages to fetch
    #[serde(default = "default_num_pages")]
    pub num_pages: u32,

    /// Maximum number of products to collect across all pages
    #[serde(default = "default_max_products")]
    pub max_products: usize,

    /// File the rows are written to
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Pause after each listing page in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Random jitter added to the pause (0 to this value)
    #[serde(default)]
    pub delay_jitter_ms: u64,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Output file format
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_num_pages() -> u32 {
    20
}

fn default_max_products() -> usize {
    200
}

fn default_output_path() -> PathBuf {
    PathBuf::from("scraped_data.csv")
}

fn default_delay_ms() -> u64 {
    1000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            num_pages: default_num_pages(),
            max_products: default_max_products(),
            output_path: default_output_path(),
            delay_ms: default_delay_ms(),
            delay_jitter_ms: 0,
            proxy: None,
            format: OutputFormat::Csv,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("amz-listing-scraper").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(base_url) = std::env::var("AMZ_BASE_URL") {
            if Url::parse(&base_url).is_ok() {
                self.base_url = base_url;
            }
        }

        if let Ok(proxy) = std::env::var("AMZ_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Ok(delay) = std::env::var("AMZ_DELAY") {
            if let Ok(d) = delay.parse() {
                self.delay_ms = d;
            }
        }

        if let Ok(output) = std::env::var("AMZ_OUTPUT") {
            if !output.is_empty() {
                self.output_path = PathBuf::from(output);
            }
        }

        self
    }

    /// Parses the configured search URL.
    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&self.base_url).with_context(|| format!("Invalid base URL: {}", self.base_url))
    }

    /// Fixed pause after each listing page.
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Output file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Jsonl,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(format!("Unknown format: {}. Use: csv, jsonl", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Jsonl => write!(f, "jsonl"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.num_pages, 20);
        assert_eq!(config.max_products, 200);
        assert_eq!(config.output_path, PathBuf::from("scraped_data.csv"));
        assert_eq!(config.delay_ms, 1000);
        assert_eq!(config.delay_jitter_ms, 0);
        assert_eq!(config.format, OutputFormat::Csv);
        assert!(config.proxy.is_none());
    }

    #[test]
    fn test_request_delay() {
        let config = Config::new();
        assert_eq!(config.request_delay(), Duration::from_secs(1));
    }

    #[test]
    fn test_base_url_parses() {
        let config = Config::new();
        let url = config.base_url().unwrap();
        assert_eq!(url.host_str(), Some("www.amazon.in"));
        assert_eq!(url.path(), "/s");
    }

    #[test]
    fn test_base_url_invalid() {
        let config = Config { base_url: "not a url".to_string(), ..Config::default() };
        let err = config.base_url().unwrap_err().to_string();
        assert!(err.contains("Invalid base URL"));
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("jsonl".parse::<OutputFormat>().unwrap(), OutputFormat::Jsonl);
        assert_eq!("ndjson".parse::<OutputFormat>().unwrap(), OutputFormat::Jsonl);

        let err = "table".parse::<OutputFormat>().unwrap_err();
        assert!(err.contains("Unknown format"));
        assert!(err.contains("csv, jsonl"));
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Csv.to_string(), "csv");
        assert_eq!(OutputFormat::Jsonl.to_string(), "jsonl");
    }

    #[test]
    fn test_output_format_serde() {
        let json = serde_json::to_string(&OutputFormat::Jsonl).unwrap();
        assert_eq!(json, "\"jsonl\"");

        let parsed: OutputFormat = serde_json::from_str("\"csv\"").unwrap();
        assert_eq!(parsed, OutputFormat::Csv);
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            base_url = "https://www.amazon.com/s?k=laptops"
            num_pages = 3
            max_products = 50
            output_path = "out/laptops.csv"
            delay_ms = 2500
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.base_url, "https://www.amazon.com/s?k=laptops");
        assert_eq!(config.num_pages, 3);
        assert_eq!(config.max_products, 50);
        assert_eq!(config.output_path, PathBuf::from("out/laptops.csv"));
        assert_eq!(config.delay_ms, 2500);
        assert_eq!(config.format, OutputFormat::Csv);
    }

    #[test]
    fn test_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            max_products = 10
            format = "jsonl"
            proxy = "socks5://localhost:1080"
            "#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.max_products, 10);
        assert_eq!(config.format, OutputFormat::Jsonl);
        assert_eq!(config.proxy, Some("socks5://localhost:1080".to_string()));
        assert_eq!(config.num_pages, 20);
    }

    #[test]
    fn test_config_from_file_not_found() {
        let result = Config::from_file("/nonexistent/path/config.toml");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_config_from_file_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml {{{{").unwrap();

        let err = Config::from_file(file.path()).unwrap_err().to_string();
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_config_load_explicit_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "num_pages = 7").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.num_pages, 7);
    }

    #[test]
    fn test_config_with_env() {
        let keys = ["AMZ_BASE_URL", "AMZ_PROXY", "AMZ_DELAY", "AMZ_OUTPUT"];
        let saved: Vec<_> = keys.iter().map(|k| std::env::var(k).ok()).collect();

        std::env::set_var("AMZ_BASE_URL", "https://www.amazon.co.uk/s?k=tents");
        std::env::set_var("AMZ_PROXY", "http://proxy:8080");
        std::env::set_var("AMZ_DELAY", "250");
        std::env::set_var("AMZ_OUTPUT", "tents.csv");

        let config = Config::new().with_env();
        assert_eq!(config.base_url, "https://www.amazon.co.uk/s?k=tents");
        assert_eq!(config.proxy, Some("http://proxy:8080".to_string()));
        assert_eq!(config.delay_ms, 250);
        assert_eq!(config.output_path, PathBuf::from("tents.csv"));

        std::env::set_var("AMZ_BASE_URL", "not a url");
        std::env::set_var("AMZ_DELAY", "soon");

        let config = Config::new().with_env();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.delay_ms, 1000);

        for (key, value) in keys.iter().zip(saved) {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }
}
