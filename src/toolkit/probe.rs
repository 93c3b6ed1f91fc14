use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::Path;

use super::{run, tool_name, ToolError, Toolkit};
use crate::chapters::{Chapter, Seconds};

/// `ffprobe -show_chapters` output
#[derive(Debug, Deserialize)]
struct ChaptersProbe {
    #[serde(default)]
    chapters: Vec<ProbedChapter>,
}

#[derive(Debug, Deserialize)]
struct ProbedChapter {
    id: Option<serde_json::Value>,
    start_time: Seconds,
    end_time: Seconds,
    #[serde(default)]
    tags: BTreeMap<String, String>,
}

impl ProbedChapter {
    fn into_chapter(self) -> Chapter {
        let title = match self.tags.get("title") {
            Some(title) => title.clone(),
            None => match &self.id {
                Some(serde_json::Value::String(id)) => format!("Chapter {}", id),
                Some(serde_json::Value::Null) | None => "Chapter Unknown".to_string(),
                Some(id) => format!("Chapter {}", id),
            },
        };
        Chapter::new(title, self.start_time, self.end_time)
    }
}

/// `ffprobe -show_format` output
#[derive(Debug, Deserialize)]
struct FormatProbe {
    #[serde(default)]
    format: FormatInfo,
}

/// Container-level information for one file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormatInfo {
    #[serde(default)]
    pub duration: Option<Seconds>,
    /// Container tags in the order ffprobe printed them
    #[serde(default)]
    pub tags: IndexMap<String, String>,
}

impl FormatInfo {
    /// Book title from the container tags
    pub fn title(&self) -> Option<&str> {
        self.tags.get("title").map(String::as_str)
    }
}

/// Decode `ffprobe -print_format json -show_chapters` output
pub fn parse_chapters_json(json: &[u8]) -> Result<Vec<Chapter>, serde_json::Error> {
    let probe: ChaptersProbe = serde_json::from_slice(json)?;
    Ok(probe
        .chapters
        .into_iter()
        .map(ProbedChapter::into_chapter)
        .collect())
}

/// Decode `ffprobe -print_format json -show_format` output
pub fn parse_format_json(json: &[u8]) -> Result<FormatInfo, serde_json::Error> {
    let probe: FormatProbe = serde_json::from_slice(json)?;
    Ok(probe.format)
}

impl Toolkit {
    fn probe(&self, path: &Path, section: &str) -> Result<Vec<u8>, ToolError> {
        let args = [
            OsString::from("-v"),
            OsString::from("quiet"),
            OsString::from("-print_format"),
            OsString::from("json"),
            OsString::from(section),
            path.as_os_str().to_os_string(),
        ];
        Ok(run(&self.ffprobe, &args)?.stdout)
    }

    /// Flat chapter list of a container, in the order ffprobe reports it
    pub fn probe_chapters(&self, path: &Path) -> Result<Vec<Chapter>, ToolError> {
        let stdout = self.probe(path, "-show_chapters")?;
        parse_chapters_json(&stdout).map_err(|source| ToolError::Json {
            tool: tool_name(&self.ffprobe),
            source,
        })
    }

    /// Duration and global tags of a container
    pub fn probe_format(&self, path: &Path) -> Result<FormatInfo, ToolError> {
        let stdout = self.probe(path, "-show_format")?;
        parse_format_json(&stdout).map_err(|source| ToolError::Json {
            tool: tool_name(&self.ffprobe),
            source,
        })
    }
}
