use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use png_encoder::IconStyle;
use std::path::PathBuf;
use tokio::fs;

mod commands;
mod config;
mod generator;

use commands::IconCommands;
use config::{IconSet, DEFAULT_ICON_DIR, DEFAULT_SIZES};
use generator::{GeneratedIcon, IconGenerator};

#[derive(Parser)]
#[command(name = "icon-generator")]
#[command(about = "Generates solid-colour PNG app icons")]
#[command(version = "0.1.0")]
struct Cli {
    /// Print only the completion message
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the icon set (default: 192 and 512 px into public/icons)
    Generate {
        /// Output directory
        #[arg(short, long, default_value = DEFAULT_ICON_DIR)]
        out_dir: PathBuf,
        /// Icon edge length in pixels (repeatable)
        #[arg(short, long = "size", value_parser = clap::value_parser!(u32).range(1..), default_values_t = DEFAULT_SIZES)]
        sizes: Vec<u32>,
        /// Create the output directory if it does not exist
        #[arg(long)]
        create_dirs: bool,
    },
    /// Write one icon of arbitrary dimensions
    Single {
        /// Width in pixels
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        width: u32,
        /// Height in pixels
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        height: u32,
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Decode a PNG and report its chunks and colours
    Inspect {
        /// PNG file to check
        #[arg(short, long)]
        file: PathBuf,
    },
}

fn report(icon: &GeneratedIcon) {
    println!(
        "  {} {}x{}, {} bytes, sha256 {} ({})",
        icon.path.display(),
        icon.width,
        icon.height,
        icon.bytes,
        icon.sha256,
        humantime::format_duration(icon.elapsed)
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let quiet = cli.quiet;

    let generator = IconGenerator::new(IconStyle::default());
    let icon_commands = IconCommands::new(&generator);

    let command = cli.command.unwrap_or(Commands::Generate {
        out_dir: PathBuf::from(DEFAULT_ICON_DIR),
        sizes: DEFAULT_SIZES.to_vec(),
        create_dirs: false,
    });

    match command {
        Commands::Generate { out_dir, sizes, create_dirs } => {
            if create_dirs {
                fs::create_dir_all(&out_dir)
                    .await
                    .with_context(|| format!("Failed to create directory: {:?}", out_dir))?;
            }

            let set = IconSet::in_dir(&out_dir, &sizes);

            let pb = if quiet {
                ProgressBar::hidden()
            } else {
                ProgressBar::new(set.len() as u64)
            };
            pb.set_style(ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .context("Invalid progress template")?);

            let written = icon_commands.generate_set_with_progress(&set, &pb).await?;
            pb.finish_and_clear();

            if !quiet {
                for icon in &written {
                    report(icon);
                }
            }
            println!("PNG icons created");
        }

        Commands::Single { width, height, output } => {
            let icon = icon_commands.generate_single(width, height, &output).await?;
            if !quiet {
                report(&icon);
            }
            println!("PNG icon created");
        }

        Commands::Inspect { file } => {
            let decoded = icon_commands.inspect(&file).await?;
            let header = decoded.header;

            if !quiet {
                println!("{}:", file.display());
                println!("  Size: {}x{}", header.width, header.height);
                println!("  Bit depth: {}, colour type: {}", header.bit_depth, header.color_type);
                println!("  Chunks:");
                for chunk in &decoded.chunks {
                    println!("    {} length {} crc 0x{:08X}", chunk.tag_name(), chunk.length, chunk.crc);
                }
                match decoded.pixels.uniform_color() {
                    Some(c) => println!("  Solid colour: ({}, {}, {}, {})", c.r, c.g, c.b, c.a),
                    None => println!("  Mixed colours"),
                }
            }
            println!("PNG is valid");
        }
    }

    Ok(())
}
