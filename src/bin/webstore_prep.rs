//! webstore-prep — strip private fields from an extension manifest
//!
//! Usage:
//!   webstore-prep                      Sanitize ./manifest.json
//!   webstore-prep --strip-update-url   Also remove the update_url field
//!   webstore-prep --file <path>        Sanitize a specific manifest file
//!
//! Silent on success; the only effect is the rewritten manifest file.
//! Any failure aborts before the file is touched.

use tracing_subscriber::EnvFilter;
use webstore_prep::{Sanitizer, DEFAULT_MANIFEST};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut strip_update_url = false;
    let mut file: Option<String> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--strip-update-url" => strip_update_url = true,
            "--file" => {
                file = match args.get(i + 1) {
                    Some(path) => Some(path.clone()),
                    None => {
                        eprintln!("Error: --file requires a path argument");
                        std::process::exit(1);
                    }
                };
                i += 1;
            }
            "version" | "--version" | "-V" => {
                println!("webstore-prep {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "help" | "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            other => {
                eprintln!("Unknown argument: {other}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let sanitizer = Sanitizer::new()
        .with_path(file.as_deref().unwrap_or(DEFAULT_MANIFEST))
        .with_strip_update_url(strip_update_url);
    sanitizer.sanitize_file()?;
    Ok(())
}

fn print_usage() {
    println!(
        r#"webstore-prep — prepare an extension manifest for web-store submission

USAGE:
    webstore-prep [OPTIONS]

OPTIONS:
    --file <path>         Manifest to sanitize (default: ./manifest.json)
    --strip-update-url    Also remove the top-level update_url field
    --version             Show version information
    --help                Show this help message

Removes the signing key, Private-suffixed permissions, and the
input_view/indicator fields of every input component, then rewrites
the manifest in place as 4-space-indented JSON."#
    );
}
