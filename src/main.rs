//! uetex CLI - Command-line tool for inspecting and rewriting DDS textures.
//!
//! This is the main entry point for the uetex command-line application.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::Level;

use uetex::prelude::*;

/// uetex - DDS texture tool for Unreal texture assets
#[derive(Parser)]
#[command(name = "uetex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the header and mipmap layout of a DDS file
    Info {
        /// Input DDS file
        #[arg(short, long, env = "UETEX_INPUT")]
        input: PathBuf,
    },

    /// Load a DDS file and write it back with a normalised header
    Rewrite {
        /// Input DDS file
        #[arg(short, long, env = "UETEX_INPUT")]
        input: PathBuf,

        /// Output DDS file
        #[arg(short, long, env = "UETEX_OUTPUT")]
        output: PathBuf,

        /// Four-character signature stamped into the header's reserved words
        #[arg(short, long, env = "UETEX_SIGNATURE", value_parser = parse_signature)]
        signature: Option<[u8; 4]>,
    },

    /// List supported pixel formats
    Formats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Info { input } => {
            cmd_info(&input)?;
        }
        Commands::Rewrite {
            input,
            output,
            signature,
        } => {
            cmd_rewrite(&input, &output, signature)?;
        }
        Commands::Formats => {
            cmd_formats();
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_info(input: &PathBuf) -> Result<()> {
    let dds = DdsFile::load(input)
        .with_context(|| format!("Failed to load {}", input.display()))?;

    println!("{}", input.display());
    for line in dds.header.to_string().lines() {
        println!("  {}", line);
    }

    println!("  mipmaps:");
    let layout = mipmap_layout(&dds.header).context("Failed to compute mipmap layout")?;
    for (index, level) in layout.iter().enumerate() {
        println!(
            "    {:>2}: {:>5} x {:<5} {:>10} bytes",
            index, level.width, level.height, level.byte_size
        );
    }

    let total: usize = layout.iter().map(|l| l.byte_size).sum();
    println!("  payload: {} bytes", total);

    Ok(())
}

fn cmd_rewrite(input: &PathBuf, output: &PathBuf, signature: Option<[u8; 4]>) -> Result<()> {
    println!("Rewriting: {} -> {}", input.display(), output.display());

    let dds = DdsFile::load(input)
        .with_context(|| format!("Failed to load {}", input.display()))?;

    let options = signature
        .map(EncodeOptions::with_signature)
        .unwrap_or_default();
    dds.save_with(output, &options)
        .context("Failed to write output file")?;

    println!(
        "Wrote {} ({} mipmaps, {})",
        output.display(),
        dds.header.mipmap_count,
        dds.header.format
    );

    Ok(())
}

fn cmd_formats() {
    println!("{:<16} {:>6}  identifiers", "format", "B/px");
    for format in TextureFormat::ALL {
        let ids: Vec<String> = format
            .raw_ids()
            .iter()
            .map(|id| match id {
                RawFormatId::FourCC(four_cc) => format!("'{}'", four_cc),
                RawFormatId::Dxgi(code) => code.to_string(),
            })
            .collect();
        println!(
            "{:<16} {:>6}  {}",
            format.name(),
            format.bytes_per_pixel(),
            ids.join(", ")
        );
    }
}

/// Parse a four-character ASCII signature.
fn parse_signature(value: &str) -> std::result::Result<[u8; 4], String> {
    let bytes: [u8; 4] = value
        .as_bytes()
        .try_into()
        .map_err(|_| format!("signature must be exactly 4 bytes, got {}", value.len()))?;

    if !bytes.is_ascii() {
        return Err("signature must be ASCII".to_string());
    }
    Ok(bytes)
}
