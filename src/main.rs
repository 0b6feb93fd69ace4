//! qrsave command line entrypoint

use clap::Parser;
use qrsave::{ErrorCorrection, QrEncoder, QrPayload, QrsaveConfig, Result, logging};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "qrsave",
    version,
    about = "Encode a payload as a QR code image and save it to disk"
)]
struct Cli {
    /// Text to encode. Defaults to the configured payload.
    payload: Option<String>,

    /// Destination file; the extension selects the format (png, jpg, bmp, svg, ...)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Optional configuration file (toml/yaml). Defaults to qrsave.{toml,yaml} in cwd/XDG config.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Error correction level (L, M, Q, H)
    #[arg(long, value_name = "LEVEL")]
    ecc: Option<ErrorCorrection>,

    /// Edge length of one module in pixels
    #[arg(long, value_name = "PIXELS")]
    module_size: Option<u32>,

    /// Omit the quiet zone around the symbol
    #[arg(long)]
    no_quiet_zone: bool,

    /// Decode the written file and fail if it does not match the payload
    #[arg(long)]
    verify: bool,

    /// Print the QR code to the terminal before saving
    #[arg(long)]
    preview: bool,

    /// Output a JSON report instead of the confirmation line
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("qrsave error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = QrsaveConfig::load(cli.config.as_deref())?;

    if let Some(payload) = cli.payload {
        config.payload = Some(payload);
    }
    if let Some(path) = cli.output {
        config.output.path = path;
    }
    if let Some(ecc) = cli.ecc {
        config.output.ecc = ecc;
    }
    if let Some(size) = cli.module_size {
        config.output.module_size = size;
    }
    if cli.no_quiet_zone {
        config.output.quiet_zone = false;
    }
    if cli.verify {
        config.output.verify = true;
    }

    let _log_guard = logging::init(&config.logging)?;

    let payload = QrPayload::from(config.payload());
    let options = config.output.render_options();
    let path = config.output.path.as_path();
    info!(?options, path = %path.display(), "Generating QR code");

    if cli.preview {
        println!("{}", QrEncoder::with_options(options).render_terminal(&payload)?);
    }

    let report = if config.output.verify {
        qrsave::generate_verified(payload, path, options)?
    } else {
        qrsave::generate(payload, path, options)?
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report.to_json())?);
    } else {
        println!("{}", report.human());
    }

    Ok(())
}
