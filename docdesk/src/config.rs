use serde::Deserialize;
use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

fn env_opt_string(var: &str) -> Option<String> {
    env::var(var).ok().filter(|val| !val.trim().is_empty())
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub ocr: OcrConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcrConfig {
    /// Tesseract language codes, `+`-separated (e.g. `eng+deu`).
    pub languages: String,
    /// Directory holding `tessdata`; `None` lets Tesseract use its default.
    pub data_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub path: String,
    pub search_limit: usize,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            languages: "eng".to_string(),
            data_path: None,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: "docdesk-documents.jsonl".to_string(),
            search_limit: 10,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ocr: OcrConfig {
                languages: env::var("OCR_LANGUAGES").unwrap_or_else(|_| "eng".to_string()),
                data_path: env_opt_string("OCR_DATA_PATH"),
            },
            storage: StorageConfig {
                path: env::var("DOCDESK_STORE_PATH")
                    .unwrap_or_else(|_| "docdesk-documents.jsonl".to_string()),
                search_limit: parse_env_or("SEARCH_LIMIT", 10),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}
