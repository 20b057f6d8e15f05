//! Pre-flight check for the player's runtime requirements.
//!
//! Prints one `ok`/`FAIL` line per requirement, waits for Enter and exits
//! with status 1 if anything failed. Nothing is left on disk.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, bail};

use jukebox::audio::RodioOutput;
use jukebox::config::{self, Settings};

struct Check {
    name: &'static str,
    result: anyhow::Result<String>,
}

impl Check {
    fn print(&self) {
        match &self.result {
            Ok(detail) => println!("  ok    {:<16} {detail}", self.name),
            Err(e) => println!("  FAIL  {:<16} {e:#}", self.name),
        }
    }
}

/// Load the config file the way the player does. Defaults are used
/// when there is none.
fn check_config(path: &Path) -> (anyhow::Result<String>, Settings) {
    if !path.exists() {
        return (
            Ok(format!("{} not present, using defaults", path.display())),
            Settings::default(),
        );
    }
    let parsed = Settings::load_from(path)
        .with_context(|| format!("parsing {}", path.display()))
        .and_then(|s| {
            s.validate().map_err(anyhow::Error::msg)?;
            Ok(s)
        });
    match parsed {
        Ok(s) => (Ok(path.display().to_string()), s),
        Err(e) => (Err(e), Settings::default()),
    }
}

fn check_audio_device() -> anyhow::Result<String> {
    RodioOutput::open_default()?;
    Ok("default output opened".to_string())
}

/// Probe `dir` (or its closest existing ancestor, where it would be
/// created) with a throwaway file.
fn check_data_dir(dir: &Path) -> anyhow::Result<String> {
    let existing: PathBuf = dir
        .ancestors()
        .find(|p| p.as_os_str().is_empty() || p.is_dir())
        .map(|p| if p.as_os_str().is_empty() { Path::new(".") } else { p })
        .unwrap_or(Path::new("."))
        .to_path_buf();

    if existing.as_path() != dir && dir.exists() {
        bail!("{} exists but is not a directory", dir.display());
    }

    let probe = existing.join(".jukebox-check.probe");
    fs::write(&probe, b"probe").with_context(|| format!("{} is not writable", existing.display()))?;
    fs::remove_file(&probe).with_context(|| format!("removing {}", probe.display()))?;

    if existing.as_path() == dir {
        Ok(format!("{} writable", dir.display()))
    } else {
        Ok(format!("{} will be created", dir.display()))
    }
}

/// The playlist document must be readable JSON when it exists.
fn check_playlists(path: &Path) -> anyhow::Result<String> {
    if !path.exists() {
        return Ok(format!("{} not present yet", path.display()));
    }
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str::<serde_json::Value>(&text)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    Ok(path.display().to_string())
}

fn main() -> anyhow::Result<ExitCode> {
    let config_path = config::default_config_path();
    let (config_result, settings) = check_config(&config_path);

    let checks = [
        Check {
            name: "audio device",
            result: check_audio_device(),
        },
        Check {
            name: "data directory",
            result: check_data_dir(&settings.storage.data_dir),
        },
        Check {
            name: "playlist file",
            result: check_playlists(&settings.storage.playlists_path()),
        },
        Check {
            name: "config file",
            result: config_result,
        },
    ];

    println!("jukebox {} pre-flight check", env!("CARGO_PKG_VERSION"));
    for check in &checks {
        check.print();
    }
    let failed = checks.iter().filter(|c| c.result.is_err()).count();
    if failed == 0 {
        println!("all checks passed");
    } else {
        println!("{failed} check(s) failed");
    }

    print!("press Enter to exit...");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    Ok(if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
