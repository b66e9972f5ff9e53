//! Host Module
//!
//! The capability surface this crate needs from the host application.
//!
//! The host owns the authoritative variables. It exposes one getter/setter
//! pair per primitive kind and a coloured event log; nothing else is assumed.

mod memory;

use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

pub use memory::InMemoryHost;

// == Host Variables ==
/// Typed access to the host's variable storage.
///
/// `None` means "not set" in both directions.
pub trait HostVariables {
    fn get_small_int(&self, name: &str) -> Option<i16>;
    fn set_small_int(&mut self, name: &str, value: Option<i16>);

    fn get_int(&self, name: &str) -> Option<i32>;
    fn set_int(&mut self, name: &str, value: Option<i32>);

    fn get_text(&self, name: &str) -> Option<String>;
    fn set_text(&mut self, name: &str, value: Option<String>);

    fn get_decimal(&self, name: &str) -> Option<Decimal>;
    fn set_decimal(&mut self, name: &str, value: Option<Decimal>);

    fn get_boolean(&self, name: &str) -> Option<bool>;
    fn set_boolean(&mut self, name: &str, value: Option<bool>);

    fn get_date(&self, name: &str) -> Option<NaiveDateTime>;
    fn set_date(&mut self, name: &str, value: Option<NaiveDateTime>);
}

// == Log Color ==
/// Colours the host log can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogColor {
    Blue,
    Green,
    Yellow,
    Red,
    Black,
    Gray,
    Purple,
    Orange,
}

impl LogColor {
    pub fn as_str(self) -> &'static str {
        match self {
            LogColor::Blue => "blue",
            LogColor::Green => "green",
            LogColor::Yellow => "yellow",
            LogColor::Red => "red",
            LogColor::Black => "black",
            LogColor::Gray => "gray",
            LogColor::Purple => "purple",
            LogColor::Orange => "orange",
        }
    }
}

impl fmt::Display for LogColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Host Log ==
/// The host's user-visible event log.
pub trait HostLog {
    fn write(&mut self, message: &str, color: LogColor);
}
