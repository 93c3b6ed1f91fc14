use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::chapters::Seconds;

#[derive(Parser)]
#[command(name = "chapterctl")]
#[command(about = "CLI tool for inspecting, rewriting, and splitting m4b audiobook chapters")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase output verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use this config file instead of ~/.config/chapterctl/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Display the nested chapter structure of an m4b file
    Tree {
        /// Path to the m4b file
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Ignore chapters shorter than this many seconds (uses config default if not specified)
        #[arg(long)]
        min_duration: Option<Seconds>,
    },

    /// Generate chapter metadata from a chapters file
    Metadata {
        /// Text file with one "<title> <duration>" per line
        chapters: PathBuf,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace the chapters of an m4b/m4p file using a chapters file
    Overwrite {
        /// Path to the input m4b or m4p file
        input: PathBuf,

        /// Text file with one "<title> <duration>" per line
        #[arg(short, long)]
        chapters: PathBuf,

        /// Path for the output file with updated chapters
        #[arg(short, long)]
        output: PathBuf,

        /// Actually write the output file (default: dry-run)
        #[arg(long)]
        no_dry_run: bool,
    },

    /// Split an m4b file into one file per chapter
    Extract {
        /// Path to the m4b file
        input: PathBuf,

        /// Directory to save the extracted chapter files
        #[arg(short, long)]
        output: PathBuf,

        /// Tag placed in brackets in each output file name
        #[arg(long, default_value = "0")]
        prefix: String,

        /// Ignore chapters shorter than this many seconds (uses config default if not specified)
        #[arg(long)]
        min_duration: Option<Seconds>,

        /// Actually extract files (default: dry-run)
        #[arg(long)]
        no_dry_run: bool,
    },

    /// Generate chapter metadata for part files that will be joined in order
    Parts {
        /// Part files, in playback order
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// File containing chapter titles, one per line
        #[arg(long)]
        titles_file: Option<PathBuf>,

        /// Fewer parts than this are named "Part n", otherwise "Chapter n" (uses config default if not specified)
        #[arg(long)]
        chapter_threshold: Option<usize>,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check that ffmpeg and ffprobe are available
    Check,
}
