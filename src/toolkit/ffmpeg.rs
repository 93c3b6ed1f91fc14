use std::ffi::OsString;
use std::path::Path;

use super::{run, ToolError, Toolkit};
use crate::chapters::Seconds;

/// Copy streams from `input` to `output`, taking global metadata and chapters
/// from `metadata_file`
fn apply_metadata_args(input: &Path, metadata_file: &Path, output: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["-y".into(), "-i".into(), input.into()];
    args.extend(["-i".into(), metadata_file.into()]);
    args.extend([
        "-map_metadata".into(),
        "1".into(),
        "-map_chapters".into(),
        "1".into(),
        "-codec".into(),
        "copy".into(),
    ]);
    args.push(output.into());
    args
}

/// Stream-copy `duration` seconds of `input` starting at `start`
fn extract_segment_args(
    input: &Path,
    start: Seconds,
    duration: Seconds,
    title: &str,
    output: &Path,
) -> Vec<OsString> {
    vec![
        "-y".into(),
        "-i".into(),
        input.into(),
        "-ss".into(),
        start.to_string().into(),
        "-t".into(),
        duration.to_string().into(),
        "-c".into(),
        "copy".into(),
        "-metadata".into(),
        format!("title={}", title).into(),
        output.into(),
    ]
}

impl Toolkit {
    pub fn apply_metadata(
        &self,
        input: &Path,
        metadata_file: &Path,
        output: &Path,
    ) -> Result<(), ToolError> {
        run(&self.ffmpeg, &apply_metadata_args(input, metadata_file, output))?;
        Ok(())
    }

    pub fn extract_segment(
        &self,
        input: &Path,
        start: Seconds,
        duration: Seconds,
        title: &str,
        output: &Path,
    ) -> Result<(), ToolError> {
        run(
            &self.ffmpeg,
            &extract_segment_args(input, start, duration, title, output),
        )?;
        Ok(())
    }
}
