use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::chapters::{Seconds, DEFAULT_CHAPTER_THRESHOLD, DEFAULT_INDENT, DEFAULT_MIN_DURATION};

/// Application configuration loaded from ~/.config/chapterctl/config.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub chapters: ChaptersConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
}

/// Defaults for chapter filtering and display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChaptersConfig {
    /// Chapters shorter than this many seconds are ignored (default: "1.0")
    #[serde(default = "default_min_duration")]
    pub min_duration: Seconds,

    /// Indentation per nesting level in the chapter tree
    #[serde(default = "default_indent")]
    pub indent: String,

    /// Part counts below this are labelled "Part n" instead of "Chapter n"
    #[serde(default = "default_chapter_threshold")]
    pub chapter_threshold: usize,
}

fn default_min_duration() -> Seconds {
    DEFAULT_MIN_DURATION
}

fn default_indent() -> String {
    DEFAULT_INDENT.to_string()
}

fn default_chapter_threshold() -> usize {
    DEFAULT_CHAPTER_THRESHOLD
}

impl Default for ChaptersConfig {
    fn default() -> Self {
        Self {
            min_duration: default_min_duration(),
            indent: default_indent(),
            chapter_threshold: default_chapter_threshold(),
        }
    }
}

/// Paths to the external media tools
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    #[serde(default = "default_ffmpeg")]
    pub ffmpeg: PathBuf,
    #[serde(default = "default_ffprobe")]
    pub ffprobe: PathBuf,
}

fn default_ffmpeg() -> PathBuf {
    PathBuf::from("ffmpeg")
}

fn default_ffprobe() -> PathBuf {
    PathBuf::from("ffprobe")
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ffmpeg: default_ffmpeg(),
            ffprobe: default_ffprobe(),
        }
    }
}

impl Config {
    /// Load configuration from the default path (~/.config/chapterctl/config.toml)
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific path; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;

        toml::from_str(&content).with_context(|| format!("Failed to parse {:?}", path))
    }

    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("chapterctl").join("config.toml"))
    }

    /// Get the minimum chapter duration, with CLI override taking precedence
    pub fn min_duration(&self, cli_override: Option<Seconds>) -> Seconds {
        cli_override.unwrap_or(self.chapters.min_duration)
    }

    /// Get the Part/Chapter threshold, with CLI override taking precedence
    pub fn chapter_threshold(&self, cli_override: Option<usize>) -> usize {
        cli_override.unwrap_or(self.chapters.chapter_threshold)
    }
}
