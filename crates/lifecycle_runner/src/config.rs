//! Runner Configuration
//!
//! # Configuration Sources (lowest to highest priority)
//!
//! 1. Built-in defaults
//! 2. Config file: `lifecycle.toml` in the working directory, or `--config <path>`
//! 3. Environment variables: `LIFECYCLE_MAX_POLLS`, `LIFECYCLE_MODE`, `LIFECYCLE_FIXTURES`
//! 4. Command line: `--mode`, `--max-polls`, `--fixtures` and positional scenario names
//!
//! # Example Config File
//!
//! ```toml
//! max_polls = 100
//! mode = "check"  # print, check, record
//! fixture_dir = "crates/lifecycle_script/tests/fixtures"
//! scenarios = ["PropsOnly", "StateOnly"]
//! ```

use std::path::{Path, PathBuf};

use lifecycle_script::{Scenario, ScriptError, DEFAULT_MAX_POLLS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "lifecycle.toml";

/// Where golden logs live, relative to the workspace root
pub const DEFAULT_FIXTURE_DIR: &str = "crates/lifecycle_script/tests/fixtures";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("missing value for {0}")]
    MissingValue(String),

    #[error("unknown flag: {0}")]
    UnknownFlag(String),

    #[error(transparent)]
    Script(#[from] ScriptError),
}

/// What to do with each scenario's log
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Print the log as JSON
    #[default]
    Print,
    /// Compare against the golden fixture
    Check,
    /// Overwrite the golden fixture
    Record,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Print => write!(f, "print"),
            Self::Check => write!(f, "check"),
            Self::Record => write!(f, "record"),
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "print" | "show" => Ok(Self::Print),
            "check" | "verify" => Ok(Self::Check),
            "record" | "bless" => Ok(Self::Record),
            _ => Err(ConfigError::InvalidValue {
                key: "mode".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Complete runner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Poll ceiling per scenario
    pub max_polls: usize,
    pub mode: Mode,
    pub fixture_dir: PathBuf,
    /// Scenarios to run; empty means the whole catalogue
    pub scenarios: Vec<Scenario>,
    /// Config file the values came from
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            max_polls: DEFAULT_MAX_POLLS,
            mode: Mode::Print,
            fixture_dir: PathBuf::from(DEFAULT_FIXTURE_DIR),
            scenarios: Vec::new(),
            config_path: None,
        }
    }
}

/// Parsed command line
#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    config: Option<PathBuf>,
    mode: Option<Mode>,
    max_polls: Option<usize>,
    fixture_dir: Option<PathBuf>,
    scenarios: Vec<Scenario>,
}

impl CliArgs {
    fn parse(args: &[String]) -> Result<Self, ConfigError> {
        let mut cli = Self::default();
        let mut args = args.iter();

        while let Some(arg) = args.next() {
            let flag = arg.as_str();
            let mut value = || {
                args.next()
                    .cloned()
                    .ok_or_else(|| ConfigError::MissingValue(flag.to_string()))
            };
            match flag {
                "--config" => cli.config = Some(PathBuf::from(value()?)),
                "--mode" => cli.mode = Some(value()?.parse()?),
                "--max-polls" => cli.max_polls = Some(parse_polls(&value()?)?),
                "--fixtures" => cli.fixture_dir = Some(PathBuf::from(value()?)),
                flag if flag.starts_with('-') => {
                    return Err(ConfigError::UnknownFlag(flag.to_string()))
                }
                name => cli.scenarios.push(name.parse()?),
            }
        }
        Ok(cli)
    }
}

fn parse_polls(value: &str) -> Result<usize, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: "max_polls".to_string(),
        value: value.to_string(),
    })
}

impl RunnerConfig {
    /// Load from every source, reading the process arguments and environment
    pub fn load() -> Result<Self, ConfigError> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self::load_with(&args, |key| std::env::var(key).ok())
    }

    /// Load from every source with explicit arguments and environment lookup
    pub fn load_with<F>(args: &[String], env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let cli = CliArgs::parse(args)?;

        let mut config = match &cli.config {
            Some(path) => Self::load_from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::load_from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        config.apply_env(env)?;
        config.apply_cli(cli);
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = toml::from_str(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        config.config_path = Some(path.to_path_buf());
        log::info!("Loaded runner config from {}", path.display());
        Ok(config)
    }

    fn apply_env<F>(&mut self, env: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(polls) = env("LIFECYCLE_MAX_POLLS") {
            self.max_polls = parse_polls(&polls)?;
        }
        if let Some(mode) = env("LIFECYCLE_MODE") {
            self.mode = mode.parse()?;
            log::debug!("Mode from env: {}", self.mode);
        }
        if let Some(dir) = env("LIFECYCLE_FIXTURES").filter(|dir| !dir.is_empty()) {
            self.fixture_dir = PathBuf::from(dir);
        }
        Ok(())
    }

    fn apply_cli(&mut self, cli: CliArgs) {
        if let Some(mode) = cli.mode {
            self.mode = mode;
        }
        if let Some(polls) = cli.max_polls {
            self.max_polls = polls;
        }
        if let Some(dir) = cli.fixture_dir {
            self.fixture_dir = dir;
        }
        if !cli.scenarios.is_empty() {
            self.scenarios = cli.scenarios;
        }
    }

    /// Scenarios to run, in order
    pub fn scenarios(&self) -> Vec<Scenario> {
        if self.scenarios.is_empty() {
            Scenario::ALL.to_vec()
        } else {
            self.scenarios.clone()
        }
    }
}
