//! Record and devices entry points

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::interval;

use crate::application::ports::{CaptureMode, ConfigStore, DeviceEnumerator};
use crate::application::StartOptions;
use crate::domain::config::AppConfig;
use crate::infrastructure::{create_session, CpalInputSource, XdgConfigStore};

use super::presenter::Presenter;

/// Exit code for runtime errors
pub const EXIT_ERROR: u8 = 1;

/// Exit code for usage errors
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Options for a recording run, after config merging
#[derive(Debug, Clone)]
pub struct RecordOptions {
    pub mode: CaptureMode,
    pub device: Option<String>,
    pub sample_rate: Option<u32>,
    /// Stop automatically once this much audio has been recorded
    pub duration: Option<Duration>,
    /// Explicit output file; `None` uses the artifact's suggested name
    pub output: Option<PathBuf>,
    /// Directory for suggested-name output
    pub output_dir: Option<PathBuf>,
}

/// Load the config file and merge CLI-provided values over it.
/// A broken config file is reported and ignored, not fatal.
pub async fn load_merged_config(cli_config: AppConfig, presenter: &Presenter) -> AppConfig {
    let store = XdgConfigStore::new();
    match store.load().await {
        Ok(file_config) => cli_config.merged_over(file_config),
        Err(e) => {
            presenter.warn(&format!("Ignoring config file ({e})"));
            cli_config
        }
    }
}

/// Record until Enter (or the duration bound), then write the artifact
pub async fn run_record(options: RecordOptions, presenter: &mut Presenter) -> ExitCode {
    let session = create_session();

    presenter.start_spinner("Opening input device...");
    if let Err(e) = session
        .start(StartOptions {
            mode: options.mode,
            device_id: options.device.clone(),
            sample_rate: options.sample_rate,
        })
        .await
    {
        presenter.spinner_fail(&format!("Could not start recording: {e}"));
        return ExitCode::from(EXIT_ERROR);
    }

    if let Some(spec) = session.stream_spec() {
        presenter.update_spinner(&format!(
            "Recording at {} Hz, {} channel(s)",
            spec.sample_rate, spec.channels
        ));
    }
    if options.duration.is_none() {
        presenter.info("Press Enter to stop, or type 'p' + Enter to pause/resume");
    }

    let mut paused = false;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = interval(Duration::from_millis(100));

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                presenter.update_recording(session.elapsed(), paused);
                if let Some(limit) = options.duration {
                    if session.elapsed() >= limit {
                        break;
                    }
                }
            }
            line = lines.next_line() => {
                match line {
                    Ok(Some(input)) if input.trim() == "p" => {
                        let toggled = if paused {
                            session.resume().await
                        } else {
                            session.pause().await
                        };
                        match toggled {
                            Ok(()) => paused = !paused,
                            Err(e) => presenter.warn(&format!("{e}")),
                        }
                    }
                    // Enter, any other input, EOF, or a read error all stop
                    _ => break,
                }
            }
        }
    }

    presenter.update_spinner("Finalizing...");
    let artifact = match session.stop().await {
        Ok(artifact) => artifact,
        Err(e) => {
            presenter.spinner_fail(&format!("Recording failed: {e}"));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let path = match &options.output {
        Some(path) => path.clone(),
        None => {
            let dir = options.output_dir.clone().unwrap_or_else(|| PathBuf::from("."));
            dir.join(artifact.filename())
        }
    };

    if let Err(e) = tokio::fs::write(&path, artifact.bytes()).await {
        presenter.spinner_fail(&format!("Could not write {}: {e}", path.display()));
        return ExitCode::from(EXIT_ERROR);
    }

    presenter.spinner_success(&format!(
        "Saved {} ({}, {})",
        path.display(),
        artifact.human_readable_size(),
        presenter.format_elapsed(session.elapsed()),
    ));
    ExitCode::SUCCESS
}

/// List available input devices
pub fn run_devices(presenter: &Presenter) -> ExitCode {
    let source = CpalInputSource::new();
    match source.list_input_devices() {
        Ok(devices) if devices.is_empty() => {
            presenter.warn("No input devices found");
            ExitCode::SUCCESS
        }
        Ok(devices) => {
            for (index, device) in devices.iter().enumerate() {
                presenter.output(&format!("{index}: {}", device.label));
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            presenter.error(&format!("Could not list input devices: {e}"));
            ExitCode::from(EXIT_ERROR)
        }
    }
}
