use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, Result};

use rotalog::config::{self, LoggerConfig};
use rotalog::{Level, Logger};

fn main() -> Result<()> {
    // Diagnostics go to stderr so they never mix with the console sink
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "rotalog=warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(config::default_config_path);
    let config = LoggerConfig::load_or_default(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let logger = Logger::from_config(config).context("Failed to create logger")?;
    if let Some(path) = logger.current_log_file_path() {
        tracing::info!("Logging to: {}", path.display());
    }

    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read stdin")?;
        let (level, message) = split_level(&line);
        logger.emit(level, message);
    }

    logger.close().context("Failed to close log file")?;
    Ok(())
}

/// Split an optional `LEVEL:` tag off a line, defaulting to INFO
fn split_level(line: &str) -> (Level, &str) {
    if let Some((tag, rest)) = line.split_once(':') {
        if let Ok(level) = tag.parse::<Level>() {
            return (level, rest.trim_start());
        }
    }
    (Level::Info, line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_level() {
        assert_eq!(split_level("ERROR: disk full"), (Level::Error, "disk full"));
        assert_eq!(split_level("warn:slow"), (Level::Warning, "slow"));
        assert_eq!(split_level("plain message"), (Level::Info, "plain message"));
        assert_eq!(split_level("note: keep"), (Level::Info, "note: keep"));
    }
}
