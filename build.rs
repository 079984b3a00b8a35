//! Build script for Mood Music.
//!
//! Copies the `.env.example` configuration template into the user's local
//! data directory so a ready-to-edit example sits next to where the
//! application looks for its `.env` file:
//! - Linux: `~/.local/share/moodplay/.env.example`
//! - macOS: `~/Library/Application Support/moodplay/.env.example`
//! - Windows: `%LOCALAPPDATA%/moodplay/.env.example`
//!
//! Every failure is reported as a cargo warning; the build itself never
//! fails because of this step.

use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=.env.example");

    let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") else {
        println!("cargo:warning=CARGO_MANIFEST_DIR not set, skipping .env.example copy");
        return;
    };
    let env_example_path = PathBuf::from(manifest_dir).join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("moodplay");
    if let Err(e) = fs::create_dir_all(&out_dir) {
        println!(
            "cargo:warning=cannot create {}: {}",
            out_dir.display(),
            e
        );
        return;
    }

    if env_example_path.exists() {
        let target = out_dir.join(".env.example");
        if let Err(e) = fs::copy(&env_example_path, &target) {
            println!(
                "cargo:warning=cannot copy .env.example to {}: {}",
                target.display(),
                e
            );
        }
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
    }
}
