//! EOL source test utilities

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use keepup::version::error::SourceError;
use keepup::version::source::EolSource;
use keepup::version::types::{EndOfLifeEntry, EolMarker};

/// Mock EOL source that records every fetch
pub struct MockSource {
    cycles: HashMap<String, Vec<EndOfLifeEntry>>,
    fetched: Mutex<Vec<String>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self {
            cycles: HashMap::new(),
            fetched: Mutex::new(Vec::new()),
        }
    }

    /// Serve `cycles` as (cycle, eol, latest) for `package`
    pub fn with_cycles(mut self, package: &str, cycles: Vec<(&str, &str, &str)>) -> Self {
        self.cycles
            .insert(package.to_string(), cycles.into_iter().map(entry).collect());
        self
    }

    /// Total number of fetches across all packages
    pub fn total_fetches(&self) -> usize {
        self.fetched.lock().unwrap().len()
    }

    /// Number of fetches for one package
    pub fn fetches(&self, package: &str) -> usize {
        self.fetched
            .lock()
            .unwrap()
            .iter()
            .filter(|name| *name == package)
            .count()
    }
}

#[async_trait]
impl EolSource for MockSource {
    async fn fetch_cycles(&self, package_name: &str) -> Result<Vec<EndOfLifeEntry>, SourceError> {
        self.fetched.lock().unwrap().push(package_name.to_string());
        match self.cycles.get(package_name) {
            Some(cycles) => Ok(cycles.clone()),
            None => Err(SourceError::NotFound(package_name.to_string())),
        }
    }
}

/// Build a release-cycle entry from (cycle, eol, latest)
pub fn entry((cycle, eol, latest): (&str, &str, &str)) -> EndOfLifeEntry {
    EndOfLifeEntry {
        cycle: cycle.to_string(),
        eol: EolMarker::new(eol),
        latest: latest.to_string(),
        latest_release_date: String::new(),
    }
}
