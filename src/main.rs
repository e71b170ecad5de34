use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use quoteforge::{RenderConfig, Session, Viewport};

/// Render a quote document headlessly and export it as PDF and/or PNG.
#[derive(Parser)]
#[command(name = "quoteforge", version, about)]
struct Cli {
    /// Quote JSON file; the built-in sample quote is used when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory exported artifacts are written into
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Export a PDF (default when no format flag is given)
    #[arg(long)]
    pdf: bool,

    /// Export a PNG
    #[arg(long)]
    png: bool,

    /// Surface width in pixels
    #[arg(long, default_value_t = 794)]
    width: u32,

    /// Surface height in pixels
    #[arg(long, default_value_t = 1123)]
    height: u32,

    /// Capture scale factor
    #[arg(long, default_value_t = 2)]
    scale: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let quote = match &cli.input {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("cannot read quote file {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("cannot parse quote file {}", path.display()))?
        }
        None => quoteforge::Quote::default(),
    };

    let config = RenderConfig {
        viewport: Viewport {
            width: cli.width,
            height: cli.height,
        },
        scale: cli.scale,
        output_dir: cli.out_dir.clone(),
    };

    fs::create_dir_all(&cli.out_dir)?;
    let mut session = Session::with_quote(config, quote)?;
    session.mount();

    // No flags means export both, like the two buttons on the original form
    let (want_pdf, want_png) = if cli.pdf || cli.png {
        (cli.pdf, cli.png)
    } else {
        (true, true)
    };

    if want_pdf {
        #[cfg(feature = "pdf")]
        {
            if let Some(path) = quoteforge::export::pdf::export_pdf(&session)? {
                println!("wrote {}", path.display());
            }
        }
        #[cfg(not(feature = "pdf"))]
        anyhow::bail!("this build does not include PDF support (enable the `pdf` feature)");
    }
    if want_png {
        if let Some(path) = quoteforge::export::png::export_png(&session)? {
            println!("wrote {}", path.display());
        }
    }

    Ok(())
}
