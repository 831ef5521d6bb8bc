//! ibmf-diff
//!
//! Compare two UTF32 IBMF fonts face by face and glyph by glyph, printing every difference.

use std::{path::Path, process::ExitCode};

use anyhow::{Context, bail};
use clap::Parser;
use ibmf::{Font, FontFormat, diff_fonts};

#[derive(Parser, Debug)]
#[command(version, about = "Compare two IBMF fonts and list their differences")]
struct Args {
    /// The reference font, shown with `<`
    file1: std::path::PathBuf,

    /// The font compared against it, shown with `>`
    file2: std::path::PathBuf,

    /// Log more details to stderr. Repeat for more. RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn load_font(path: &Path) -> anyhow::Result<Font> {
    let data =
        std::fs::read(path).with_context(|| format!("Unable to read file {}", path.display()))?;
    let font = Font::load(&data)
        .with_context(|| format!("File {} is not of an appropriate IBMF format", path.display()))?;
    if font.format() != FontFormat::Utf32 {
        bail!(
            "File {} is not of an appropriate IBMF format: {:?} fonts are not supported",
            path.display(),
            font.format()
        );
    }
    log::info!("Loaded {} with {} faces", path.display(), font.face_count());
    Ok(font)
}

fn run(args: &Args) -> anyhow::Result<()> {
    let font1 = load_font(&args.file1)?;
    let font2 = load_font(&args.file2)?;

    println!("IBMF Differences:");
    println!("< {}", args.file1.display());
    println!("> {}", args.file2.display());
    print!("{}", diff_fonts(&font1, &font2));
    Ok(())
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            // Help and version go to stdout and are not failures
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let level = match args.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
