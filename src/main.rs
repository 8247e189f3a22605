use anyhow::{bail, Context};
use lasercut::{format_currency, init_logging, quote_file, version_string, Config};
use std::path::PathBuf;

const USAGE: &str = "usage: lasercut [--version] <profile-document> [config.json|config.toml]";

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let mut args = std::env::args_os().skip(1);
    let Some(first) = args.next() else {
        bail!(USAGE);
    };
    if first == "--version" || first == "-V" {
        println!("{}", version_string());
        return Ok(());
    }
    let profile = PathBuf::from(first);

    let config = match args.next().map(PathBuf::from) {
        Some(path) => Config::load_from_file(&path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::load_or_default().context("Failed to load default config")?,
    };

    if args.next().is_some() {
        bail!(USAGE);
    }

    let breakdown = quote_file(&profile, &config)?;
    println!("{}", format_currency(breakdown.total));

    Ok(())
}
