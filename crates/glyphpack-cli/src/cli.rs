// this_file: crates/glyphpack-cli/src/cli.rs

//! Command-line arguments

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use glyphpack_core::charset::DEFAULT_CHARSET;
use glyphpack_encode::OutputFormat;

/// Glyphpack - anti-aliased fonts for microcontroller displays
#[derive(Parser, Debug)]
#[command(name = "glyphpack")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encode a font into one blob per point size
    #[command(alias = "e")]
    Encode(EncodeArgs),

    /// Print the contents of an encoded blob
    #[command(alias = "i")]
    Inspect(InspectArgs),

    /// List installed fonts by PostScript name
    #[command(alias = "l")]
    List(ListArgs),
}

/// Arguments for the encode command
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Font file path (.ttf, .otf, .ttc, .otc)
    #[arg(short = 'f', long = "font-file", conflicts_with = "font", required_unless_present = "font")]
    pub font_file: Option<PathBuf>,

    /// Face index for TTC/OTC collections
    #[arg(short = 'y', long = "face-index", default_value_t = 0)]
    pub face_index: u32,

    /// Installed font by PostScript name
    #[arg(long = "font")]
    pub font: Option<String>,

    /// Point sizes, comma separated
    #[arg(short = 's', long = "sizes", value_delimiter = ',', required = true)]
    pub sizes: Vec<u32>,

    /// Hex code point ranges, comma separated (e.g. 20-7E,U+20AC)
    #[arg(short = 'c', long = "charset", default_value = DEFAULT_CHARSET)]
    pub charset: String,

    /// Directory receiving <name>/<size>.<ext>
    #[arg(short = 'o', long = "output-dir", default_value = ".")]
    pub output_dir: PathBuf,

    /// Font name used for the directory and C++ identifiers
    /// (defaults to the PostScript name)
    #[arg(short = 'n', long = "name")]
    pub name: Option<String>,

    /// Output format
    #[arg(long = "format", value_enum, default_value_t = FormatArg::Cpp)]
    pub format: FormatArg,

    /// Store glyph data as packed nibbles instead of runs
    #[arg(long = "no-rle")]
    pub no_rle: bool,

    #[command(flatten)]
    pub verbosity: Verbosity,
}

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Encoded blob (.bin)
    pub blob: PathBuf,

    /// Draw one glyph as text
    #[arg(short = 'g', long = "glyph")]
    pub glyph: Option<char>,

    /// List every glyph and kerning pair
    #[arg(short = 'a', long = "all")]
    pub all: bool,

    #[command(flatten)]
    pub verbosity: Verbosity,
}

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only names containing this text (case-insensitive)
    pub filter: Option<String>,

    #[command(flatten)]
    pub verbosity: Verbosity,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct Verbosity {
    /// Enable verbose logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Verbosity {
    pub fn level(self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Debug
        } else if self.quiet {
            log::LevelFilter::Error
        } else {
            log::LevelFilter::Warn
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    /// Raw blob, <size>.bin
    Bin,
    /// C++ header and PROGMEM source, <size>.h and <size>.cpp
    Cpp,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Bin => OutputFormat::Bin,
            FormatArg::Cpp => OutputFormat::Cpp,
        }
    }
}
