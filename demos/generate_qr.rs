//! Generate QR codes in a few formats through the library API
//!
//! Usage: cargo run --example generate_qr

use qrsave::{ErrorCorrection, QrEncoder, QrPayload, RenderOptions};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let url = "https://example.com/file";

    let report = qrsave::generate(url, Path::new("qr_output.png"), RenderOptions::default())?;
    println!("{}", report.human());

    // High error correction survives a logo or some smudging.
    let robust = RenderOptions {
        ecc: ErrorCorrection::H,
        ..RenderOptions::default()
    };
    let report = qrsave::generate_verified(url, Path::new("qr_output_h.svg"), robust)?;
    println!("{} (version {}, verified)", report.human(), report.version);

    let preview = QrEncoder::new().render_terminal(&QrPayload::from(url))?;
    println!("{preview}");

    Ok(())
}
