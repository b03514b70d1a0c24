use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::env;

use crate::render::fonts::default_font_entries;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub render: RenderConfig,
    pub puzzles: PuzzleConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Front end served for any path the API does not handle
    pub static_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub font_dir: String,
    /// Display name and file name (relative to `font_dir`) of each font
    pub fonts: Vec<(String, String)>,
    pub default_font: String,
    pub font_size: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PuzzleConfig {
    pub ttl_secs: u64,
    pub max_words: usize,
    pub max_word_length: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let server = ServerConfig {
            host: env::var("HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a number")?,
            static_dir: env::var("STATIC_DIR").ok(),
        };

        let fonts = match env::var("FONTS") {
            Ok(spec) => parse_font_table(&spec).context("FONTS must look like Name=file;Name=file")?,
            Err(_) => default_font_entries(),
        };

        let render = RenderConfig {
            font_dir: env::var("FONT_DIR")
                .unwrap_or_else(|_| "./fonts".to_string()),
            fonts,
            default_font: env::var("DEFAULT_FONT")
                .unwrap_or_else(|_| "Courier New".to_string()),
            font_size: env::var("FONT_SIZE")
                .unwrap_or_else(|_| "20".to_string())
                .parse()
                .context("FONT_SIZE must be a number")?,
        };

        let puzzles = PuzzleConfig {
            ttl_secs: env::var("PUZZLE_TTL_SECS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()
                .unwrap_or(3600),
            max_words: env::var("MAX_WORDS")
                .unwrap_or_else(|_| "50".to_string())
                .parse()
                .unwrap_or(50),
            max_word_length: env::var("MAX_WORD_LENGTH")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),
        };

        Ok(Config {
            server,
            render,
            puzzles,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 3600,
            max_words: 50,
            max_word_length: 30,
        }
    }
}

/// Parse `Name=file;Name=file` into catalog entries
pub fn parse_font_table(spec: &str) -> Result<Vec<(String, String)>> {
    let mut entries = Vec::new();
    for item in spec.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        let Some((name, file)) = item.split_once('=') else {
            bail!("font entry '{}' is missing '='", item);
        };
        let (name, file) = (name.trim(), file.trim());
        if name.is_empty() || file.is_empty() {
            bail!("font entry '{}' needs both a name and a file", item);
        }
        entries.push((name.to_string(), file.to_string()));
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_font_table() {
        let entries = parse_font_table("Mono=mono.ttf; Serif = serif.ttf ;").unwrap();
        assert_eq!(
            entries,
            vec![
                ("Mono".to_string(), "mono.ttf".to_string()),
                ("Serif".to_string(), "serif.ttf".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_font_table_rejects_bad_entries() {
        assert!(parse_font_table("Mono").is_err());
        assert!(parse_font_table("=mono.ttf").is_err());
    }

    #[test]
    fn test_server_addr() {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                static_dir: None,
            },
            render: RenderConfig {
                font_dir: "./fonts".to_string(),
                fonts: default_font_entries(),
                default_font: "Courier New".to_string(),
                font_size: 20,
            },
            puzzles: PuzzleConfig::default(),
        };
        assert_eq!(config.server_addr(), "127.0.0.1:8080");
    }
}
