use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::graphics::fade::{FadeTuning, DEFAULT_EXTRA_WAITS, DEFAULT_FADE_STEP, DEFAULT_STEP_COUNT};
use crate::graphics::state::FadeEndpoint;
use crate::logging::LogLevel;

/// Options that can be set via CLI or config file
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    // Fade tuning
    pub step: Option<u8>,
    pub steps: Option<u8>,
    pub extra_waits: Option<u8>,
    pub endpoint: Option<FadeEndpoint>,

    // Demo run
    pub cycles: Option<u32>,
    pub realtime: Option<bool>,
    pub preview: Option<bool>,
    pub color: Option<bool>,
    pub log_level: Option<LogLevel>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            step: None,
            steps: None,
            extra_waits: None,
            endpoint: None,
            cycles: Some(1),
            realtime: None,
            preview: None,
            color: Some(true),
            log_level: None,
        }
    }
}

impl Options {
    /// Build validated fade tuning, filling unset values with defaults
    pub fn tuning(&self) -> Result<FadeTuning> {
        FadeTuning::new(
            self.step.unwrap_or(DEFAULT_FADE_STEP),
            self.steps.unwrap_or(DEFAULT_STEP_COUNT),
            self.extra_waits.unwrap_or(DEFAULT_EXTRA_WAITS),
        )
        .context("Invalid fade tuning")
    }

    /// Apply one `key = value` setting
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "step" => self.step = Some(parse_u8(value).context("Invalid step")?),
            "steps" => self.steps = Some(parse_u8(value).context("Invalid steps")?),
            "extra_waits" => {
                self.extra_waits = Some(parse_u8(value).context("Invalid extra_waits")?)
            }
            "endpoint" => self.endpoint = Some(parse_endpoint(value)?),
            "cycles" => {
                self.cycles = Some(value.trim().parse().context("Invalid cycles value")?)
            }
            "realtime" => self.realtime = Some(parse_bool(value)?),
            "preview" => self.preview = Some(parse_bool(value)?),
            "color" => self.color = Some(parse_bool(value)?),
            "log_level" => self.log_level = Some(parse_log_level(value)?),
            other => anyhow::bail!("Unknown config key '{}'", other),
        }
        Ok(())
    }
}

/// Load configuration from a `key = value` file.
///
/// No path means defaults. Blank lines and `#` comments are skipped.
pub fn load_config(path: &Option<String>) -> Result<Options> {
    let Some(path) = path else {
        return Ok(Options::default());
    };
    let text = fs::read_to_string(Path::new(path))
        .with_context(|| format!("Failed to read config file {}", path))?;
    parse_config(&text).with_context(|| format!("Failed to parse config file {}", path))
}

/// Parse config file contents
pub fn parse_config(text: &str) -> Result<Options> {
    let mut opts = Options::default();
    for (lineno, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let (key, value) = line
            .split_once('=')
            .with_context(|| format!("Line {}: expected key = value", lineno + 1))?;
        opts.apply(key.trim(), value.trim())
            .with_context(|| format!("Line {}", lineno + 1))?;
    }
    Ok(opts)
}

/// Parse a small unsigned integer
pub fn parse_u8(s: &str) -> Result<u8> {
    s.trim()
        .parse::<u8>()
        .with_context(|| format!("'{}' is not a number in 0-255", s.trim()))
}

/// Parse a boolean flag (true/false, yes/no, on/off, 1/0)
pub fn parse_bool(s: &str) -> Result<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => anyhow::bail!("'{}' is not a boolean", other),
    }
}

pub fn parse_endpoint(s: &str) -> Result<FadeEndpoint> {
    s.parse::<FadeEndpoint>().map_err(anyhow::Error::msg)
}

pub fn parse_log_level(s: &str) -> Result<LogLevel> {
    s.parse::<LogLevel>().map_err(anyhow::Error::msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_options_default() {
        let opts = Options::default();
        assert_eq!(opts.cycles, Some(1));
        assert_eq!(opts.color, Some(true));
        assert!(opts.step.is_none());
        assert_eq!(opts.tuning().unwrap(), FadeTuning::default());
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("yes").unwrap());
        assert!(parse_bool(" ON ").unwrap());
        assert!(!parse_bool("0").unwrap());
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn test_parse_u8() {
        assert_eq!(parse_u8(" 4 ").unwrap(), 4);
        assert!(parse_u8("256").is_err());
        assert!(parse_u8("-1").is_err());
    }

    #[test]
    fn test_parse_config() {
        let opts = parse_config(
            "# fade tuning\n\
             step = 2\n\
             steps = 16   # slower\n\
             \n\
             endpoint = white\n\
             log_level = debug\n\
             realtime = no\n",
        )
        .unwrap();
        assert_eq!(opts.step, Some(2));
        assert_eq!(opts.steps, Some(16));
        assert_eq!(opts.endpoint, Some(FadeEndpoint::White));
        assert_eq!(opts.log_level, Some(LogLevel::Debug));
        assert_eq!(opts.realtime, Some(false));
        let tuning = opts.tuning().unwrap();
        assert_eq!((tuning.step(), tuning.step_count()), (2, 16));
    }

    #[test]
    fn test_parse_config_errors() {
        assert!(parse_config("step 4").is_err());
        assert!(parse_config("speed = 4").is_err());
        assert!(parse_config("endpoint = grey").is_err());
        assert!(parse_config("step = 0").unwrap().tuning().is_err());
    }

    #[test]
    fn test_load_config_none() {
        assert_eq!(load_config(&None).unwrap(), Options::default());
    }

    #[test]
    fn test_load_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "extra_waits = 0").unwrap();
        writeln!(file, "cycles = 3").unwrap();
        let path = file.path().to_string_lossy().into_owned();
        let opts = load_config(&Some(path)).unwrap();
        assert_eq!(opts.extra_waits, Some(0));
        assert_eq!(opts.cycles, Some(3));
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.cfg").to_string_lossy().into_owned();
        assert!(load_config(&Some(path)).is_err());
    }
}
