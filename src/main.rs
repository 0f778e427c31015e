//! tskeygen - Terminal Services license key generator
//!
//! Derives License Server IDs (SPKs) and License Key Packs (LKPs) bound to a
//! product identifier, and validates existing keys offline.

mod cli;
mod crypto;
mod error;
mod keygen;
mod types;

fn main() {
    if let Err(e) = cli::run_cli() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
