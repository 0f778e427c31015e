//! Command-line interface
//!
//! One positional argument prints a License Server ID; four print a License
//! Key Pack ID. Anything else is a usage error.

use anyhow::Context;
use clap::Parser;

use crate::keygen::{generate_lkp, generate_spk};

#[derive(Debug, Parser)]
#[command(name = "tskeygen")]
#[command(version)]
#[command(about = "Generate Terminal Services license keys")]
#[command(after_help = "Example: tskeygen 00490-92005-99454-AT527 1234 10.3 32")]
pub struct Cli {
    /// Product ID (e.g. 00490-92005-99454-AT527)
    pub pid: String,

    /// License count for a key pack
    #[arg(requires_all = ["version", "chid"])]
    pub count: Option<u32>,

    /// Product version as <major>.<minor> (e.g. 10.3)
    #[arg(requires_all = ["count", "chid"])]
    pub version: Option<String>,

    /// Channel ID
    #[arg(requires_all = ["count", "version"])]
    pub chid: Option<u32>,
}

pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match (cli.count, cli.version.as_deref(), cli.chid) {
        (None, None, None) => {
            let spk = generate_spk(&cli.pid)?;
            println!("License Server ID: {spk}");
        }
        (Some(count), Some(version), Some(chid)) => {
            let (major_ver, minor_ver) = parse_version(version)?;
            let lkp = generate_lkp(&cli.pid, count, major_ver, minor_ver, chid)?;
            println!("License Key Pack ID: {lkp}");
        }
        _ => anyhow::bail!("count, version and chid must be provided together"),
    }

    Ok(())
}

fn parse_version(version: &str) -> anyhow::Result<(u32, u32)> {
    let (major, minor) = version
        .split_once('.')
        .with_context(|| format!("version must be <major>.<minor>, got {version:?}"))?;

    let major = major
        .parse()
        .with_context(|| format!("bad major version {major:?}"))?;
    let minor = minor
        .parse()
        .with_context(|| format!("bad minor version {minor:?}"))?;

    Ok((major, minor))
}
