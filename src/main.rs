//! Wavecap CLI entry point

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use wavecap::cli::{
    app::{load_merged_config, run_devices, run_record, EXIT_USAGE_ERROR},
    args::{format_from_name, Cli, Commands},
    Presenter, RecordOptions,
};
use wavecap::domain::config::AppConfig;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut presenter = Presenter::new();

    if let Some(Commands::Devices) = cli.command {
        return run_devices(&presenter);
    }

    // Build CLI config layer from args and merge the config file under it
    let cli_config = AppConfig {
        device: cli.device,
        sample_rate: cli.rate,
        format: cli.format.map(|f| f.as_str().to_string()),
        output_dir: None,
    };
    let config = load_merged_config(cli_config, &presenter).await;

    let format_name = config.format_or_default().to_string();
    let Some(format) = format_from_name(&format_name) else {
        presenter.error(&format!(
            "Unknown format \"{format_name}\" (expected wav or flac)"
        ));
        return ExitCode::from(EXIT_USAGE_ERROR);
    };

    let options = RecordOptions {
        mode: format.capture_mode(),
        device: config.device.clone(),
        sample_rate: config.sample_rate,
        duration: cli.duration.map(Duration::from_secs),
        output: cli.output,
        output_dir: config.output_dir.as_ref().map(Into::into),
    };

    run_record(options, &mut presenter).await
}
