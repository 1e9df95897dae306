//! catalog-pack - PicoKern catalog and disk image tool
//!
//! Usage:
//!   catalog-pack list --manifest kernel/catalog/catalog.toml
//!   catalog-pack disk \
//!     --manifest kernel/catalog/catalog.toml \
//!     --bootloader path/to/bootloader.bin \
//!     --kernel path/to/kernel.bin \
//!     --out disk.img

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use catalog_pack::{assemble, Layout, Manifest};

#[derive(Parser)]
#[command(name = "catalog-pack")]
#[command(version)]
#[command(about = "Lay out the PicoKern file catalog and build disk images", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the sector layout of a catalog manifest
    List {
        /// Path to catalog.toml
        #[arg(long)]
        manifest: PathBuf,
    },

    /// Assemble a bootable disk image
    Disk {
        /// Path to catalog.toml
        #[arg(long)]
        manifest: PathBuf,

        /// Boot sector binary (512 bytes, 0x55AA signature)
        #[arg(long)]
        bootloader: PathBuf,

        /// Flat kernel binary
        #[arg(long)]
        kernel: PathBuf,

        /// Output disk image path
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List { manifest } => {
            let layout = load_layout(&manifest)?;
            print_layout(&layout);
        }

        Commands::Disk {
            manifest,
            bootloader,
            kernel,
            out,
        } => {
            let layout = load_layout(&manifest)?;
            let bootloader = fs::read(&bootloader)
                .with_context(|| format!("Failed to read bootloader {}", bootloader.display()))?;
            let kernel = fs::read(&kernel)
                .with_context(|| format!("Failed to read kernel {}", kernel.display()))?;

            let disk = assemble(&layout, &bootloader, &kernel)?;
            fs::write(&out, disk.bytes())
                .with_context(|| format!("Failed to write {}", out.display()))?;

            println!(
                "Wrote {} ({} sectors, kernel at sector {})",
                out.display(),
                disk.total_sectors(),
                disk.kernel_start_sector()
            );
        }
    }

    Ok(())
}

fn load_layout(manifest_path: &Path) -> Result<Layout> {
    let manifest = Manifest::from_path(manifest_path)
        .with_context(|| format!("Failed to load {}", manifest_path.display()))?;
    let base_dir = manifest_path.parent().unwrap_or_else(|| Path::new("."));
    let sources = manifest.read_sources(base_dir)?;
    Ok(Layout::plan(manifest.geometry(), sources)?)
}

fn print_layout(layout: &Layout) {
    let geometry = layout.geometry();
    println!(
        "Catalog image: {} sectors, data from sector {}",
        geometry.total_sectors, geometry.first_data_sector
    );
    println!("{:<11}  {:>6}  {:>7}  {:>6}", "NAME", "SECTOR", "SECTORS", "BYTES");
    for file in layout.files() {
        println!(
            "{:<11}  {:>6}  {:>7}  {:>6}",
            file.display_name(),
            file.start_sector,
            file.sector_count,
            file.contents.len()
        );
    }
    println!("Free sectors: {}", geometry.total_sectors - layout.end_sector());
}
