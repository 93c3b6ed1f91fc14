//! Thin wrappers around the ffmpeg/ffprobe command-line tools.
//!
//! All audio work happens in those processes; this module only builds their
//! argument lists, runs them synchronously and decodes what they print.

mod ffmpeg;
mod probe;

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use thiserror::Error;
use tracing::debug;

use crate::config::ToolsConfig;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("{tool} was not found. Install ffmpeg and make sure {tool} is on your PATH")]
    NotFound { tool: String },

    #[error("{tool} exited with status {code}: {stderr}")]
    Failed {
        tool: String,
        code: i32,
        stderr: String,
    },

    #[error("Failed to run {tool}: {source}")]
    Io {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {tool} output: {source}")]
    Json {
        tool: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Locations of the external binaries
#[derive(Debug, Clone)]
pub struct Toolkit {
    pub ffmpeg: PathBuf,
    pub ffprobe: PathBuf,
}

impl Toolkit {
    pub fn new(config: &ToolsConfig) -> Self {
        Self {
            ffmpeg: config.ffmpeg.clone(),
            ffprobe: config.ffprobe.clone(),
        }
    }

    /// Run `<tool> -version` for each binary, returning its first output line
    pub fn versions(&self) -> Vec<(String, Result<String, ToolError>)> {
        [&self.ffmpeg, &self.ffprobe]
            .into_iter()
            .map(|program| {
                let version = run(program, &[OsString::from("-version")]).map(|output| {
                    String::from_utf8_lossy(&output.stdout)
                        .lines()
                        .next()
                        .unwrap_or_default()
                        .to_string()
                });
                (tool_name(program), version)
            })
            .collect()
    }
}

fn tool_name(program: &Path) -> String {
    program.display().to_string()
}

/// Run a tool to completion, mapping a missing binary and a non-zero exit
/// status to errors
fn run(program: &Path, args: &[OsString]) -> Result<Output, ToolError> {
    let tool = tool_name(program);
    debug!(
        "{} {}",
        tool,
        args.iter()
            .map(|a| a.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    );

    let output = Command::new(program).args(args).output().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ToolError::NotFound { tool: tool.clone() }
        } else {
            ToolError::Io {
                tool: tool.clone(),
                source: e,
            }
        }
    })?;

    if !output.status.success() {
        return Err(ToolError::Failed {
            tool,
            code: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_binary_is_not_found() {
        let err = run(
            Path::new("/nonexistent/chapterctl-ffprobe"),
            &[OsString::from("-version")],
        )
        .unwrap_err();
        assert!(matches!(err, ToolError::NotFound { .. }));
        assert!(err.to_string().contains("was not found"));
    }

    #[test]
    fn test_versions_reports_each_tool() {
        let toolkit = Toolkit {
            ffmpeg: PathBuf::from("/nonexistent/ffmpeg"),
            ffprobe: PathBuf::from("/nonexistent/ffprobe"),
        };
        let versions = toolkit.versions();
        assert_eq!(versions.len(), 2);
        assert_eq!(versions[0].0, "/nonexistent/ffmpeg");
        assert!(versions.iter().all(|(_, v)| v.is_err()));
    }
}
