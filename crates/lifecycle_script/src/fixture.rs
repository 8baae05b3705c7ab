//! Golden log fixtures
//!
//! One JSON file per scenario, `<dir>/<Scenario>.json`, holding the
//! running log as an array of entries.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ScriptError, ScriptResult};
use crate::record::LogEntry;
use crate::scenario::Scenario;

#[derive(Debug, Clone, PartialEq)]
pub struct Fixture {
    pub scenario: Scenario,
    pub entries: Vec<LogEntry>,
}

impl Fixture {
    pub fn new(scenario: Scenario, entries: Vec<LogEntry>) -> Self {
        Self { scenario, entries }
    }

    /// Location of the fixture for `scenario` under `dir`
    pub fn path(dir: &Path, scenario: Scenario) -> PathBuf {
        dir.join(format!("{}.json", scenario))
    }

    pub fn load(dir: &Path, scenario: Scenario) -> ScriptResult<Self> {
        let text = fs::read_to_string(Self::path(dir, scenario))?;
        Self::from_json(scenario, &text)
    }

    pub fn from_json(scenario: Scenario, text: &str) -> ScriptResult<Self> {
        let entries = serde_json::from_str(text)?;
        Ok(Self { scenario, entries })
    }

    pub fn to_json(&self) -> ScriptResult<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    /// Write the fixture under `dir`, creating it if needed
    pub fn write(&self, dir: &Path) -> ScriptResult<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = Self::path(dir, self.scenario);
        let mut text = self.to_json()?;
        text.push('\n');
        fs::write(&path, text)?;
        log::info!("wrote {}", path.display());
        Ok(path)
    }

    /// Compare a recorded log against the fixture, entry by entry
    pub fn check(&self, log: &[LogEntry]) -> ScriptResult<()> {
        for (index, (expected, actual)) in self.entries.iter().zip(log).enumerate() {
            if expected != actual {
                return Err(self.mismatch(
                    index,
                    format!("expected {}, got {}", describe(expected), describe(actual)),
                ));
            }
        }

        if self.entries.len() != log.len() {
            let index = self.entries.len().min(log.len());
            return Err(self.mismatch(
                index,
                format!("expected {} entries, got {}", self.entries.len(), log.len()),
            ));
        }
        Ok(())
    }

    fn mismatch(&self, index: usize, detail: String) -> ScriptError {
        ScriptError::FixtureMismatch {
            scenario: self.scenario,
            index,
            detail,
        }
    }
}

fn describe(entry: &LogEntry) -> String {
    serde_json::to_string(entry).unwrap_or_else(|_| entry.event_name.to_string())
}
