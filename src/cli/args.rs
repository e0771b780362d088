//! CLI argument definitions using Clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::application::ports::CaptureMode;

/// Wavecap - record microphone audio to WAV or FLAC
#[derive(Parser, Debug)]
#[command(name = "wavecap")]
#[command(version)]
#[command(about = "Record microphone audio to WAV or FLAC")]
#[command(long_about = None)]
pub struct Cli {
    /// Input device id (see `wavecap devices`); system default if omitted
    #[arg(short = 'd', long, value_name = "DEVICE")]
    pub device: Option<String>,

    /// Requested sample rate in Hz (the device's negotiated rate wins)
    #[arg(short = 'r', long, value_name = "HZ")]
    pub rate: Option<u32>,

    /// Export format
    #[arg(short = 'f', long, value_name = "FORMAT")]
    pub format: Option<FormatArg>,

    /// Stop automatically after this many seconds of recording
    #[arg(short = 't', long, value_name = "SECONDS")]
    pub duration: Option<u64>,

    /// Output file path; defaults to a timestamped name in the output
    /// directory (config `output_dir`, else the current directory)
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List available input devices
    Devices,
}

/// Export format argument
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    /// Lossless PCM WAV
    Wav,
    /// FLAC (lossless, compressed)
    Flac,
}

impl FormatArg {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Flac => "flac",
        }
    }

    pub const fn capture_mode(&self) -> CaptureMode {
        match self {
            Self::Wav => CaptureMode::Pcm,
            Self::Flac => CaptureMode::Compressed,
        }
    }
}

/// Parse a format name as it appears in the config file
pub fn format_from_name(name: &str) -> Option<FormatArg> {
    match name {
        "wav" => Some(FormatArg::Wav),
        "flac" => Some(FormatArg::Flac),
        _ => None,
    }
}
