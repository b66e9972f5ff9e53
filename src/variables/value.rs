//! Variable Value Module
//!
//! Conversions between Rust values and the host's primitive variable kinds.
//!
//! Writing goes through text: a value is rendered to its canonical string,
//! then parsed as its kind before being handed to the host. Reading takes the
//! raw [`HostValue`] and narrows it to the requested type.

use std::num::{IntErrorKind, ParseIntError};
use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{Result, VariableError};
use crate::variables::VariableKind;

/// Canonical rendering of Date values.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Accepted Date layouts besides RFC 3339, tried in order.
const DATE_INPUT_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

// == Host Value ==
/// A raw value as held by the host, tagged with its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    Short(i16),
    Int(i32),
    Decimal(Decimal),
    Text(String),
    Boolean(bool),
    Date(NaiveDateTime),
}

impl HostValue {
    pub fn kind(&self) -> VariableKind {
        match self {
            HostValue::Short(_) => VariableKind::Short,
            HostValue::Int(_) => VariableKind::Int,
            HostValue::Decimal(_) => VariableKind::Decimal,
            HostValue::Text(_) => VariableKind::Text,
            HostValue::Boolean(_) => VariableKind::Boolean,
            HostValue::Date(_) => VariableKind::Date,
        }
    }

    fn describe(&self) -> String {
        match self {
            HostValue::Short(v) => v.to_string(),
            HostValue::Int(v) => v.to_string(),
            HostValue::Decimal(v) => format_decimal(v),
            HostValue::Text(v) => format!("{v:?}"),
            HostValue::Boolean(v) => format_boolean(*v).to_string(),
            HostValue::Date(v) => format_date(v),
        }
    }
}

// == Conversion Traits ==
/// A value that can be written to a host variable.
pub trait ToVariable {
    /// Kind this type is written as, `None` if the host has no matching kind.
    const KIND: Option<VariableKind>;

    /// Canonical text form, later parsed as [`Self::KIND`].
    fn to_variable_text(&self) -> String;
}

/// A value that can be read back from a host variable.
pub trait FromVariable: Sized {
    /// Kind whose getter is used, `None` if the host has no matching kind.
    const KIND: Option<VariableKind>;

    fn from_variable(value: HostValue) -> Result<Self>;
}

impl<T: ToVariable + ?Sized> ToVariable for &T {
    const KIND: Option<VariableKind> = T::KIND;

    fn to_variable_text(&self) -> String {
        (**self).to_variable_text()
    }
}

fn unexpected<T>(value: HostValue, target: &'static str) -> Result<T> {
    Err(VariableError::conversion(value.kind(), target, value.describe()))
}

// == Boolean ==
impl ToVariable for bool {
    const KIND: Option<VariableKind> = Some(VariableKind::Boolean);

    fn to_variable_text(&self) -> String {
        format_boolean(*self).to_string()
    }
}

impl FromVariable for bool {
    const KIND: Option<VariableKind> = Some(VariableKind::Boolean);

    fn from_variable(value: HostValue) -> Result<Self> {
        match value {
            HostValue::Boolean(v) => Ok(v),
            other => unexpected(other, "bool"),
        }
    }
}

// == Date ==
impl ToVariable for NaiveDateTime {
    const KIND: Option<VariableKind> = Some(VariableKind::Date);

    fn to_variable_text(&self) -> String {
        format_date(self)
    }
}

impl FromVariable for NaiveDateTime {
    const KIND: Option<VariableKind> = Some(VariableKind::Date);

    fn from_variable(value: HostValue) -> Result<Self> {
        match value {
            HostValue::Date(v) => Ok(v),
            other => unexpected(other, "NaiveDateTime"),
        }
    }
}

impl ToVariable for NaiveDate {
    const KIND: Option<VariableKind> = Some(VariableKind::Date);

    fn to_variable_text(&self) -> String {
        format_date(&self.and_time(NaiveTime::MIN))
    }
}

impl FromVariable for NaiveDate {
    const KIND: Option<VariableKind> = Some(VariableKind::Date);

    fn from_variable(value: HostValue) -> Result<Self> {
        match value {
            HostValue::Date(v) => Ok(v.date()),
            other => unexpected(other, "NaiveDate"),
        }
    }
}

impl ToVariable for DateTime<Utc> {
    const KIND: Option<VariableKind> = Some(VariableKind::Date);

    fn to_variable_text(&self) -> String {
        format_date(&self.naive_utc())
    }
}

impl FromVariable for DateTime<Utc> {
    const KIND: Option<VariableKind> = Some(VariableKind::Date);

    fn from_variable(value: HostValue) -> Result<Self> {
        match value {
            HostValue::Date(v) => Ok(v.and_utc()),
            other => unexpected(other, "DateTime<Utc>"),
        }
    }
}

// == Decimal ==
impl ToVariable for Decimal {
    const KIND: Option<VariableKind> = Some(VariableKind::Decimal);

    fn to_variable_text(&self) -> String {
        self.to_string()
    }
}

impl FromVariable for Decimal {
    const KIND: Option<VariableKind> = Some(VariableKind::Decimal);

    fn from_variable(value: HostValue) -> Result<Self> {
        match value {
            HostValue::Decimal(v) => Ok(v),
            other => unexpected(other, "Decimal"),
        }
    }
}

macro_rules! float_variable {
    ($($ty:ty => $narrow:ident),+) => {
        $(
            impl ToVariable for $ty {
                const KIND: Option<VariableKind> = Some(VariableKind::Decimal);

                fn to_variable_text(&self) -> String {
                    self.to_string()
                }
            }

            impl FromVariable for $ty {
                const KIND: Option<VariableKind> = Some(VariableKind::Decimal);

                fn from_variable(value: HostValue) -> Result<Self> {
                    match value {
                        HostValue::Decimal(v) => v
                            .$narrow()
                            .filter(|f| f.is_finite())
                            .ok_or_else(|| {
                                VariableError::conversion(
                                    VariableKind::Decimal,
                                    stringify!($ty),
                                    format_decimal(&v),
                                )
                            }),
                        other => unexpected(other, stringify!($ty)),
                    }
                }
            }
        )+
    };
}

float_variable!(f64 => to_f64, f32 => to_f32);

// == Text ==
impl ToVariable for str {
    const KIND: Option<VariableKind> = Some(VariableKind::Text);

    fn to_variable_text(&self) -> String {
        self.to_string()
    }
}

impl ToVariable for String {
    const KIND: Option<VariableKind> = Some(VariableKind::Text);

    fn to_variable_text(&self) -> String {
        self.clone()
    }
}

impl FromVariable for String {
    const KIND: Option<VariableKind> = Some(VariableKind::Text);

    fn from_variable(value: HostValue) -> Result<Self> {
        match value {
            HostValue::Text(v) => Ok(v),
            other => unexpected(other, "String"),
        }
    }
}

impl ToVariable for char {
    const KIND: Option<VariableKind> = Some(VariableKind::Text);

    fn to_variable_text(&self) -> String {
        self.to_string()
    }
}

impl FromVariable for char {
    const KIND: Option<VariableKind> = Some(VariableKind::Text);

    fn from_variable(value: HostValue) -> Result<Self> {
        match value {
            HostValue::Text(v) => {
                let mut chars = v.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(c),
                    _ => Err(VariableError::conversion(
                        VariableKind::Text,
                        "char",
                        format!("{v:?}"),
                    )),
                }
            }
            other => unexpected(other, "char"),
        }
    }
}

// == Integers ==
macro_rules! integer_variable {
    ($write:ident, $read:ident, $variant:ident => $($ty:ty),+) => {
        $(
            impl ToVariable for $ty {
                const KIND: Option<VariableKind> = Some(VariableKind::$write);

                fn to_variable_text(&self) -> String {
                    self.to_string()
                }
            }

            impl FromVariable for $ty {
                const KIND: Option<VariableKind> = Some(VariableKind::$read);

                fn from_variable(value: HostValue) -> Result<Self> {
                    match value {
                        HostValue::$variant(v) => <$ty>::try_from(v).map_err(|_| {
                            VariableError::conversion(VariableKind::$read, stringify!($ty), v)
                        }),
                        other => unexpected(other, stringify!($ty)),
                    }
                }
            }
        )+
    };
}

integer_variable!(Short, Short, Short => u8, i8, i16, u16);
integer_variable!(Int, Int, Int => i32, u32);

// Wide integers write as Int (falling back to Decimal) but read as Decimal.
macro_rules! wide_integer_variable {
    ($($ty:ty => $narrow:ident),+) => {
        $(
            impl ToVariable for $ty {
                const KIND: Option<VariableKind> = Some(VariableKind::Int);

                fn to_variable_text(&self) -> String {
                    self.to_string()
                }
            }

            impl FromVariable for $ty {
                const KIND: Option<VariableKind> = Some(VariableKind::Decimal);

                fn from_variable(value: HostValue) -> Result<Self> {
                    match value {
                        HostValue::Decimal(v) => round_to_integer(v)
                            .$narrow()
                            .and_then(|wide| <$ty>::try_from(wide).ok())
                            .ok_or_else(|| {
                                VariableError::conversion(
                                    VariableKind::Decimal,
                                    stringify!($ty),
                                    format_decimal(&v),
                                )
                            }),
                        other => unexpected(other, stringify!($ty)),
                    }
                }
            }
        )+
    };
}

wide_integer_variable!(i64 => to_i64, u64 => to_u64, isize => to_i64, usize => to_u64);

/// Rounds half to even, as the host does when narrowing decimals.
fn round_to_integer(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
}

// == Unsupported ==
impl ToVariable for Duration {
    const KIND: Option<VariableKind> = None;

    fn to_variable_text(&self) -> String {
        format!("{self:?}")
    }
}

impl FromVariable for Duration {
    const KIND: Option<VariableKind> = None;

    fn from_variable(value: HostValue) -> Result<Self> {
        unexpected(value, "Duration")
    }
}

// == Text Parsing ==
/// Strips every leading and trailing double quote.
pub fn trim_quotes(text: &str) -> &str {
    text.trim_matches('"')
}

pub fn parse_boolean(text: &str) -> Result<bool> {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(VariableError::parse(
            VariableKind::Boolean,
            text,
            "expected True or False",
        ))
    }
}

pub fn parse_short(text: &str) -> Result<i16> {
    text.trim()
        .parse::<i16>()
        .map_err(|e| VariableError::parse(VariableKind::Short, text, e))
}

/// Parses a 32-bit integer, keeping the raw error so callers can tell overflow apart.
pub fn parse_int(text: &str) -> std::result::Result<i32, ParseIntError> {
    text.trim().parse::<i32>()
}

pub fn is_overflow(err: &ParseIntError) -> bool {
    matches!(
        err.kind(),
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow
    )
}

/// Parses a decimal and returns it alongside its canonical text.
///
/// Plain notation keeps its written scale; exponent notation is expanded.
pub fn parse_decimal(text: &str) -> Result<(Decimal, String)> {
    let trimmed = text.trim();
    let value = match normalize_decimal(trimmed) {
        Some(plain) => plain.parse::<Decimal>(),
        None => Decimal::from_scientific(trimmed),
    }
    .map_err(|e| VariableError::parse(VariableKind::Decimal, text, e))?;
    Ok((value, format_decimal(&value)))
}

/// Parses a date after trimming quotes.
///
/// RFC 3339 input with an offset is converted to UTC.
pub fn parse_date(text: &str) -> Result<NaiveDateTime> {
    let trimmed = trim_quotes(text).trim();

    for format in DATE_INPUT_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(parsed);
        }
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.naive_utc());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|e| VariableError::parse(VariableKind::Date, text, e))
}

// == Text Formatting ==
pub fn format_boolean(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

pub fn format_date(value: &NaiveDateTime) -> String {
    value.format(DATE_FORMAT).to_string()
}

pub fn format_decimal(value: &Decimal) -> String {
    if value.is_zero() {
        value.abs().to_string()
    } else {
        value.to_string()
    }
}

/// Normalizes plain decimal notation, keeping the written scale.
///
/// Returns `None` for anything other than `[+-]digits[.digits]`.
fn normalize_decimal(text: &str) -> Option<String> {
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (unsigned, ""),
    };
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) || !all_digits(fraction) || (whole.is_empty() && fraction.is_empty()) {
        return None;
    }

    let whole = whole.trim_start_matches('0');
    let whole = if whole.is_empty() { "0" } else { whole };
    let is_zero = whole == "0" && fraction.bytes().all(|b| b == b'0');

    let mut out = String::with_capacity(text.len() + 1);
    if negative && !is_zero {
        out.push('-');
    }
    out.push_str(whole);
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }
    Some(out)
}
