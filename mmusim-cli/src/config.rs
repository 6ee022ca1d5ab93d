use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use mmusim::error::{Error, ErrorKind, ErrorOrigin, Result};
use mmusim::types::SimConfig;

pub const DEFAULT_OUTPUT: &str = "output.csv";

/// Contents of a run configuration file.
///
/// ```toml
/// tlb_entries = 16
/// page_table_entries = 128
/// frame_budget = 256
/// output = "output.csv"
/// ```
///
/// Every key is optional.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(flatten)]
    pub sim: SimConfig,
    pub output: Option<PathBuf>,
}

/// Values given on the command line, they take precedence over the file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub tlb_entries: Option<usize>,
    pub page_table_entries: Option<usize>,
    pub frame_budget: Option<usize>,
    pub output: Option<PathBuf>,
}

impl Config {
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(entries) = overrides.tlb_entries {
            self.sim.tlb_entries = entries;
        }
        if let Some(entries) = overrides.page_table_entries {
            self.sim.page_table_entries = entries;
        }
        if let Some(frames) = overrides.frame_budget {
            self.sim.frame_budget = frames;
        }
        if overrides.output.is_some() {
            self.output = overrides.output;
        }
        self
    }

    pub fn output(&self) -> &Path {
        self.output
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_OUTPUT))
    }
}

pub fn parse(cfg: &str) -> Result<Config> {
    toml::from_str::<Config>(cfg)
        .map_err(|err| Error(ErrorOrigin::Config, ErrorKind::Encoding).log_error(err))
}

pub fn try_parse<P: AsRef<Path>>(path: P) -> Result<Config> {
    let cfg = fs::read_to_string(path.as_ref()).map_err(|err| {
        Error(ErrorOrigin::Config, ErrorKind::UnableToReadFile).log_error(format!(
            "unable to read {}: {}",
            path.as_ref().display(),
            err
        ))
    })?;
    parse(&cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let cfg = parse("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.sim, SimConfig::default());
        assert_eq!(cfg.output(), Path::new("output.csv"));
    }

    #[test]
    fn test_partial_file() {
        let cfg = parse("page_table_entries = 2\noutput = \"out/run.csv\"\n").unwrap();
        assert_eq!(cfg.sim.page_table_entries, 2);
        assert_eq!(cfg.sim.tlb_entries, 16);
        assert_eq!(cfg.sim.frame_budget, 256);
        assert_eq!(cfg.output(), Path::new("out/run.csv"));
    }

    #[test]
    fn test_overrides_win() {
        let cfg = parse("tlb_entries = 4\nframe_budget = 64\n")
            .unwrap()
            .with_overrides(Overrides {
                tlb_entries: Some(8),
                output: Some(PathBuf::from("other.csv")),
                ..Overrides::default()
            });
        assert_eq!(cfg.sim.tlb_entries, 8);
        assert_eq!(cfg.sim.frame_budget, 64);
        assert_eq!(cfg.output(), Path::new("other.csv"));
    }

    #[test]
    fn test_malformed_file() {
        assert_eq!(
            parse("tlb_entries = \"many\""),
            Err(Error(ErrorOrigin::Config, ErrorKind::Encoding))
        );
    }

    #[test]
    fn test_missing_file() {
        assert_eq!(
            try_parse("/nonexistent/mmusim.toml"),
            Err(Error(ErrorOrigin::Config, ErrorKind::UnableToReadFile))
        );
    }
}
