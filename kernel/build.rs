use anyhow::Context;
use catalog_pack::{emit, Layout, Manifest};
use std::env;
use std::fs;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);

    // Pack the compiled-in file catalog
    let catalog_dir = manifest_dir.join("catalog");
    let catalog_manifest = catalog_dir.join("catalog.toml");
    println!("cargo:rerun-if-changed={}", catalog_manifest.display());

    let manifest = Manifest::from_path(&catalog_manifest)
        .with_context(|| format!("Failed to load {}", catalog_manifest.display()))?;
    for path in manifest.source_paths(&catalog_dir) {
        println!("cargo:rerun-if-changed={}", path.display());
    }

    let sources = manifest.read_sources(&catalog_dir)?;
    let layout = Layout::plan(manifest.geometry(), sources)?;

    fs::write(out_dir.join("catalog_image.bin"), layout.image())?;
    fs::write(out_dir.join("catalog_table.rs"), emit::rust_table(&layout))?;

    // Linker script, bare-metal targets only
    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    let target_arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    if target_os == "none" {
        let script = manifest_dir.join("linker").join(format!("{target_arch}.ld"));
        println!("cargo:rerun-if-changed={}", script.display());
        println!("cargo:rustc-link-arg-bins=-T{}", script.display());
    }

    Ok(())
}
