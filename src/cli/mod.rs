use clap::Parser;

use crate::core::Language;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "imajinasi",
    version,
    about = "Imajinasi AI - Turn structured ideas into images with Google Gemini",
    long_about = r#"Imajinasi AI - Turn structured ideas into images with Google Gemini

Fill in the subject, style, lighting, colors and details of the picture you
want, pick an aspect ratio, and the form turns it into a ready-to-use prompt
and renders the result right in your terminal.

SETUP:
  Set your API key via environment variable:
    export GEMINI_API_KEY=your-key-here

KEYS:
  Tab / Shift+Tab   Move between fields
  Alt+1..6          Apply a suggestion chip to the focused field
  Left / Right      Change the aspect ratio (on the ratio selector)
  Enter / Ctrl+G    Generate
  Ctrl+Y            Copy the prompt to the clipboard
  Ctrl+S            Download the image
  Esc / Ctrl+C      Quit"#,
    after_help = r#"ENVIRONMENT:
  GEMINI_API_KEY (or API_KEY)  Gemini API key
  IMAJINASI_LANG               Interface language: en or id
  RUST_LOG                     Log filter (default: info), see --log-file"#
)]
pub struct Cli {
    /// Gemini model used for generation
    #[arg(long, env = "IMAJINASI_MODEL")]
    pub model: Option<String>,

    /// Base URL of the Gemini API
    #[arg(long, env = "IMAJINASI_BASE_URL")]
    pub base_url: Option<String>,

    /// Directory downloaded images are written to
    #[arg(short, long, env = "IMAJINASI_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Interface language (prompts are always English)
    #[arg(long, value_enum, env = "IMAJINASI_LANG")]
    pub lang: Option<Language>,

    /// Write logs to this file (the terminal is owned by the UI)
    #[arg(long, env = "IMAJINASI_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}
