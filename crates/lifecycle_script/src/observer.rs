//! Scenario observers

use std::cell::{Cell, RefCell};

use crate::record::LogEntry;

/// Receives the running log of a scenario and its completion signal
pub trait ScenarioObserver {
    fn log(&self, entry: &LogEntry);

    fn completed(&self);
}

/// Observer that keeps every entry in memory
#[derive(Debug, Default)]
pub struct LogCollector {
    entries: RefCell<Vec<LogEntry>>,
    completions: Cell<usize>,
}

impl LogCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// How many times `completed` was signalled
    pub fn completions(&self) -> usize {
        self.completions.get()
    }

    pub fn is_completed(&self) -> bool {
        self.completions.get() > 0
    }
}

impl ScenarioObserver for LogCollector {
    fn log(&self, entry: &LogEntry) {
        log::debug!("{} {:?}", entry.event_name, entry.params);
        self.entries.borrow_mut().push(entry.clone());
    }

    fn completed(&self) {
        self.completions.set(self.completions.get() + 1);
    }
}
