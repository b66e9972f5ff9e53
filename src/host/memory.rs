//! In-Memory Host
//!
//! A self-contained host used by the diagnostics binary and the tests.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::host::{HostLog, HostVariables, LogColor};

/// Keeps host variables in per-kind maps and collects log lines.
///
/// Setting `None` clears the variable, as the host does.
#[derive(Debug, Default)]
pub struct InMemoryHost {
    shorts: HashMap<String, i16>,
    ints: HashMap<String, i32>,
    texts: HashMap<String, String>,
    decimals: HashMap<String, Decimal>,
    booleans: HashMap<String, bool>,
    dates: HashMap<String, NaiveDateTime>,
    log: Vec<(LogColor, String)>,
}

impl InMemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log lines written so far, oldest first.
    pub fn log_lines(&self) -> &[(LogColor, String)] {
        &self.log
    }

    /// Total number of variables held across all kinds.
    pub fn variable_count(&self) -> usize {
        self.shorts.len()
            + self.ints.len()
            + self.texts.len()
            + self.decimals.len()
            + self.booleans.len()
            + self.dates.len()
    }
}

fn store<V>(map: &mut HashMap<String, V>, name: &str, value: Option<V>) {
    match value {
        Some(value) => {
            map.insert(name.to_string(), value);
        }
        None => {
            map.remove(name);
        }
    }
}

impl HostVariables for InMemoryHost {
    fn get_small_int(&self, name: &str) -> Option<i16> {
        self.shorts.get(name).copied()
    }

    fn set_small_int(&mut self, name: &str, value: Option<i16>) {
        store(&mut self.shorts, name, value);
    }

    fn get_int(&self, name: &str) -> Option<i32> {
        self.ints.get(name).copied()
    }

    fn set_int(&mut self, name: &str, value: Option<i32>) {
        store(&mut self.ints, name, value);
    }

    fn get_text(&self, name: &str) -> Option<String> {
        self.texts.get(name).cloned()
    }

    fn set_text(&mut self, name: &str, value: Option<String>) {
        store(&mut self.texts, name, value);
    }

    fn get_decimal(&self, name: &str) -> Option<Decimal> {
        self.decimals.get(name).copied()
    }

    fn set_decimal(&mut self, name: &str, value: Option<Decimal>) {
        store(&mut self.decimals, name, value);
    }

    fn get_boolean(&self, name: &str) -> Option<bool> {
        self.booleans.get(name).copied()
    }

    fn set_boolean(&mut self, name: &str, value: Option<bool>) {
        store(&mut self.booleans, name, value);
    }

    fn get_date(&self, name: &str) -> Option<NaiveDateTime> {
        self.dates.get(name).copied()
    }

    fn set_date(&mut self, name: &str, value: Option<NaiveDateTime>) {
        store(&mut self.dates, name, value);
    }
}

impl HostLog for InMemoryHost {
    fn write(&mut self, message: &str, color: LogColor) {
        self.log.push((color, message.to_string()));
    }
}
