//! Seed script — writes the sample response catalog to disk.
//!
//! Usage: `cargo run --bin seed [path]`
//!
//! Defaults to `RESPONSES_PATH` (reads .env) or `responses.json`. An existing
//! file is left untouched.

use std::path::PathBuf;

use supportbot::services::catalog;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let path: PathBuf = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("RESPONSES_PATH").ok())
        .unwrap_or_else(|| "responses.json".to_string())
        .into();

    println!("=== SupportBot Seed Script ===");

    if path.exists() {
        println!("[skip] {} already exists", path.display());
        return Ok(());
    }

    let sample = catalog::normalize(catalog::sample_catalog())?;
    let json = serde_json::to_string_pretty(&sample)?;
    std::fs::write(&path, json + "\n")?;

    println!("[done] Wrote {} intents to {}", sample.len(), path.display());
    println!("Intents: {}", sample.names().join(", "));

    Ok(())
}
