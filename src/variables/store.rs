//! Variable Store Module
//!
//! Typed front end over the host's variable storage, with a local record of
//! everything written through it.

use tracing::{debug, info, warn};

use crate::error::{Result, VariableError};
use crate::host::HostVariables;
use crate::models::VariableSnapshot;
use crate::variables::value::{
    format_boolean, format_date, is_overflow, parse_boolean, parse_date, parse_decimal,
    parse_int, parse_short, trim_quotes,
};
use crate::variables::{
    CacheEntry, FromVariable, HostValue, ReadCounters, RecencyList, TaggedKey, ToVariable,
    VariableKind, VariableStats,
};

// == Variable Store ==
/// Converts typed values to and from the host's six variable kinds.
///
/// Every write is mirrored into a most-recent-first [`RecencyList`] keyed by
/// `{TAG:name}`. The list is bookkeeping only: reads always ask the host.
#[derive(Debug)]
pub struct VariableStore<H> {
    /// Authoritative variable storage
    host: H,
    /// Text of the last value set per tagged key
    recent: RecencyList,
    /// Write and clear counters
    stats: VariableStats,
    /// Read counters, updated through `&self`
    read_counters: ReadCounters,
}

impl<H: HostVariables> VariableStore<H> {
    // == Constructor ==
    pub fn new(host: H) -> Self {
        Self {
            host,
            recent: RecencyList::new(),
            stats: VariableStats::new(),
            read_counters: ReadCounters::default(),
        }
    }

    // == Set ==
    /// Writes `value` to the host under `name`.
    ///
    /// The kind is inferred from `T`. 32/64-bit integers that do not fit an
    /// `i32` are written as Decimal instead. Types without a host kind are
    /// ignored.
    pub fn set<T: ToVariable>(&mut self, name: &str, value: T) -> Result<()> {
        let Some(kind) = T::KIND else {
            debug!("Ignoring set of '{}': type has no host variable kind", name);
            self.stats.record_unsupported();
            return Ok(());
        };

        let text = value.to_variable_text();
        self.set_text_as(name, kind, &text)
    }

    // == Set Text As ==
    /// Parses `text` as `kind` and writes it to the host under `name`.
    ///
    /// # Errors
    /// Returns [`VariableError::Parse`] when `text` is not a valid `kind`
    /// value. Int overflow is not an error: the value goes out as Decimal.
    pub fn set_text_as(&mut self, name: &str, kind: VariableKind, text: &str) -> Result<()> {
        match kind {
            VariableKind::Boolean => {
                let value = parse_boolean(text)?;
                self.record(kind, name, format_boolean(value).to_string());
                self.host.set_boolean(name, Some(value));
            }
            VariableKind::Date => {
                let value = parse_date(text)?;
                self.record(kind, name, format_date(&value));
                self.host.set_date(name, Some(value));
            }
            VariableKind::Decimal => self.write_decimal(name, text)?,
            VariableKind::Text => {
                let value = trim_quotes(text).to_string();
                self.record(kind, name, value.clone());
                self.host.set_text(name, Some(value));
            }
            VariableKind::Short => {
                let value = parse_short(text)?;
                self.record(kind, name, value.to_string());
                self.host.set_small_int(name, Some(value));
            }
            VariableKind::Int => match parse_int(text) {
                Ok(value) => {
                    self.record(kind, name, value.to_string());
                    self.host.set_int(name, Some(value));
                }
                Err(e) if is_overflow(&e) => {
                    warn!(
                        "Value {} for '{}' does not fit an Int, writing it as Decimal",
                        text.trim(),
                        name
                    );
                    self.stats.record_decimal_fallback();
                    self.write_decimal(name, text)?;
                }
                Err(e) => return Err(VariableError::parse(kind, text, e)),
            },
        }

        self.stats.record_write();
        Ok(())
    }

    fn write_decimal(&mut self, name: &str, text: &str) -> Result<()> {
        let (value, canonical) = parse_decimal(text)?;
        self.record(VariableKind::Decimal, name, canonical);
        self.host.set_decimal(name, Some(value));
        Ok(())
    }

    fn record(&mut self, kind: VariableKind, name: &str, value: String) {
        let key = TaggedKey::new(kind, name);
        debug!("Set {} = {}", key, value);
        self.recent.upsert(key, value);
        self.stats.set_tracked_entries(self.recent.len());
    }

    // == Get ==
    /// Reads `name` from the host as `T`.
    ///
    /// 64-bit integer types are read through the Decimal getter. Returns
    /// `Ok(None)` when the host holds no value, or when `T` has no host kind
    /// (the host is not called then).
    ///
    /// # Errors
    /// Returns [`VariableError::Conversion`] when the host value does not fit `T`.
    pub fn get<T: FromVariable>(&self, name: &str) -> Result<Option<T>> {
        let Some(kind) = T::KIND else {
            debug!("Ignoring get of '{}': type has no host variable kind", name);
            self.read_counters.record_unsupported();
            return Ok(None);
        };

        let raw = match kind {
            VariableKind::Short => self.host.get_small_int(name).map(HostValue::Short),
            VariableKind::Int => self.host.get_int(name).map(HostValue::Int),
            VariableKind::Decimal => self.host.get_decimal(name).map(HostValue::Decimal),
            VariableKind::Text => self.host.get_text(name).map(HostValue::Text),
            VariableKind::Boolean => self.host.get_boolean(name).map(HostValue::Boolean),
            VariableKind::Date => self.host.get_date(name).map(HostValue::Date),
        };

        self.read_counters.record_read(raw.is_some());
        debug!("Get {} -> {:?}", TaggedKey::new(kind, name), raw);
        raw.map(T::from_variable).transpose()
    }

    // == Clear Starting With ==
    /// Forgets every tracked entry whose logical name starts with `prefix`.
    ///
    /// Host variables are left untouched. Returns the number of entries removed.
    pub fn clear_starting_with(&mut self, prefix: &str) -> usize {
        let removed = self
            .recent
            .retain(|entry| !entry.key.name().starts_with(prefix));

        if removed > 0 {
            info!("Cleared {} tracked variables starting with '{}'", removed, prefix);
        }
        self.stats.record_cleared(removed);
        self.stats.set_tracked_entries(self.recent.len());
        removed
    }

    // == Inspection ==
    /// Tracked entries, most recently set first.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = &CacheEntry> + '_ {
        self.recent.iter()
    }

    /// The tracked entry for `name` under `kind`, if it was set.
    pub fn entry(&self, kind: VariableKind, name: &str) -> Option<&CacheEntry> {
        self.recent.get(&TaggedKey::new(kind, name))
    }

    pub fn len(&self) -> usize {
        self.recent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }

    pub fn stats(&self) -> VariableStats {
        let mut stats = self.stats.clone();
        self.read_counters.merge_into(&mut stats);
        stats.set_tracked_entries(self.recent.len());
        stats
    }

    /// Serializable view of the tracked entries and counters.
    pub fn snapshot(&self) -> VariableSnapshot {
        VariableSnapshot::new(self.entries(), self.stats())
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::InMemoryHost;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::time::Duration;

    fn store() -> VariableStore<InMemoryHost> {
        VariableStore::new(InMemoryHost::new())
    }

    fn front(store: &VariableStore<InMemoryHost>) -> (String, String) {
        let entry = store.entries().next().unwrap();
        (entry.key.to_string(), entry.value.clone())
    }

    #[test]
    fn test_store_new() {
        let store = store();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_set_int() {
        let mut store = store();

        store.set("score", 42).unwrap();

        assert_eq!(front(&store), ("{INT:score}".into(), "42".into()));
        assert_eq!(store.host().get_int("score"), Some(42));
    }

    #[test]
    fn test_set_wide_int_overflow_falls_back_to_decimal() {
        let mut store = store();

        store.set("score", 9_999_999_999i64).unwrap();

        assert_eq!(front(&store), ("{DEC:score}".into(), "9999999999".into()));
        assert_eq!(store.host().get_decimal("score"), Some(Decimal::from(9_999_999_999i64)));
        assert_eq!(store.host().get_int("score"), None);
        assert_eq!(store.stats().decimal_fallbacks, 1);
    }

    #[test]
    fn test_wide_int_set_then_get_is_exact() {
        let mut store = store();

        store.set("max_i64", i64::MAX).unwrap();
        store.set("min_i64", i64::MIN).unwrap();
        store.set("max_u64", u64::MAX).unwrap();
        store.set("past_f64", (1i64 << 53) + 1).unwrap();

        assert_eq!(store.get::<i64>("max_i64").unwrap(), Some(i64::MAX));
        assert_eq!(store.get::<i64>("min_i64").unwrap(), Some(i64::MIN));
        assert_eq!(store.get::<u64>("max_u64").unwrap(), Some(u64::MAX));
        assert_eq!(store.get::<i64>("past_f64").unwrap(), Some(9_007_199_254_740_993));
        assert_eq!(
            store.entry(VariableKind::Decimal, "past_f64").unwrap().value,
            "9007199254740993"
        );
    }

    #[test]
    fn test_get_through_shared_borrow() {
        let mut store = store();
        store.set("score", 42).unwrap();

        let shared: &VariableStore<InMemoryHost> = &store;
        assert_eq!(shared.get::<i32>("score").unwrap(), Some(42));
        assert_eq!(shared.get::<i32>("missing").unwrap(), None);
        assert_eq!(shared.stats().reads, 2);
    }

    #[test]
    fn test_set_wide_int_in_range_stays_int() {
        let mut store = store();

        store.set("lives", 3u64).unwrap();

        assert_eq!(front(&store), ("{INT:lives}".into(), "3".into()));
        assert_eq!(store.host().get_int("lives"), Some(3));
    }

    #[test]
    fn test_set_u32_above_i32_max_falls_back() {
        let mut store = store();

        store.set("big", u32::MAX).unwrap();

        assert_eq!(front(&store), ("{DEC:big}".into(), "4294967295".into()));
    }

    #[test]
    fn test_set_each_kind() {
        let mut store = store();
        let when = NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();

        store.set("armed", true).unwrap();
        store.set("launch", when).unwrap();
        store.set("ratio", 0.75f64).unwrap();
        store.set("greeting", "\"hello\"").unwrap();
        store.set("gear", 3u8).unwrap();

        let rendered: Vec<(String, String)> = store
            .entries()
            .map(|e| (e.key.to_string(), e.value.clone()))
            .collect();
        assert_eq!(
            rendered,
            vec![
                ("{SHORT:gear}".to_string(), "3".to_string()),
                ("{TXT:greeting}".to_string(), "hello".to_string()),
                ("{DEC:ratio}".to_string(), "0.75".to_string()),
                ("{DATE:launch}".to_string(), "2026-10-16 08:30:00".to_string()),
                ("{BOOL:armed}".to_string(), "True".to_string()),
            ]
        );
        assert_eq!(store.host().get_text("greeting"), Some("hello".to_string()));
        assert_eq!(store.host().get_small_int("gear"), Some(3));
        assert_eq!(store.host().get_date("launch"), Some(when));
    }

    #[test]
    fn test_overwrite_moves_to_front() {
        let mut store = store();

        store.set("a", 1).unwrap();
        store.set("b", 2).unwrap();
        store.set("a", 3).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(front(&store), ("{INT:a}".into(), "3".into()));
    }

    #[test]
    fn test_same_name_two_kinds() {
        let mut store = store();

        store.set("score", 42).unwrap();
        store.set("score", "forty-two").unwrap();

        assert_eq!(store.len(), 2);
        assert!(store.entry(VariableKind::Int, "score").is_some());
        assert!(store.entry(VariableKind::Text, "score").is_some());
    }

    #[test]
    fn test_short_overflow_is_error() {
        let mut store = store();

        let result = store.set("rpm", 40_000u16);

        assert!(matches!(
            result,
            Err(VariableError::Parse { kind: VariableKind::Short, .. })
        ));
        assert!(store.is_empty());
        assert_eq!(store.host().get_small_int("rpm"), None);
    }

    #[test]
    fn test_set_text_as_parse_errors_leave_no_trace() {
        let mut store = store();

        assert!(store.set_text_as("flag", VariableKind::Boolean, "maybe").is_err());
        assert!(store.set_text_as("when", VariableKind::Date, "someday").is_err());
        assert!(store.set_text_as("n", VariableKind::Int, "4x2").is_err());
        assert!(store.set_text_as("d", VariableKind::Decimal, "NaN").is_err());

        assert!(store.is_empty());
        assert_eq!(store.stats().writes, 0);
    }

    #[test]
    fn test_set_text_as_int_overflow_text() {
        let mut store = store();

        store
            .set_text_as("debt", VariableKind::Int, "-3000000000")
            .unwrap();

        assert_eq!(front(&store), ("{DEC:debt}".into(), "-3000000000".into()));
    }

    #[test]
    fn test_set_unsupported_type_is_ignored() {
        let mut store = store();

        store.set("elapsed", Duration::from_secs(5)).unwrap();

        assert!(store.is_empty());
        assert_eq!(store.host().variable_count(), 0);
        assert_eq!(store.stats().unsupported, 1);
    }

    #[test]
    fn test_get_routes_by_type() {
        let mut store = store();
        store.host_mut().set_int("score", Some(42));

        assert_eq!(store.get::<i32>("score").unwrap(), Some(42));
        // 64-bit reads go through the Decimal getter
        assert_eq!(store.get::<i64>("score").unwrap(), None);

        store.host_mut().set_decimal("score", Some(Decimal::from(42)));
        assert_eq!(store.get::<i64>("score").unwrap(), Some(42));
    }

    #[test]
    fn test_get_does_not_consult_cache() {
        let mut store = store();
        store.set("name", "first").unwrap();
        store.host_mut().set_text("name", Some("changed by host".into()));

        assert_eq!(
            store.get::<String>("name").unwrap(),
            Some("changed by host".to_string())
        );
        assert_eq!(store.entry(VariableKind::Text, "name").unwrap().value, "first");
    }

    #[test]
    fn test_get_unsupported_type_returns_none() {
        let store = store();

        assert_eq!(store.get::<Duration>("elapsed").unwrap(), None);
        assert_eq!(store.stats().reads, 0);
    }

    #[test]
    fn test_get_conversion_error() {
        let mut store = store();
        store.host_mut().set_decimal("huge", Some(Decimal::from(u64::MAX)));

        assert!(matches!(
            store.get::<i64>("huge"),
            Err(VariableError::Conversion { target: "i64", .. })
        ));
    }

    #[test]
    fn test_clear_starting_with() {
        let mut store = store();

        store.set("score", 9_999_999_999i64).unwrap();
        store.set("level", 2).unwrap();
        store.set("scoreboard", "top").unwrap();

        let removed = store.clear_starting_with("scor");

        assert_eq!(removed, 2);
        assert_eq!(store.len(), 1);
        assert_eq!(front(&store), ("{INT:level}".into(), "2".into()));
        // Host values are not touched
        assert_eq!(store.get::<i64>("score").unwrap(), Some(9_999_999_999));
        assert_eq!(store.stats().cleared, 2);
    }

    #[test]
    fn test_stats_track_operations() {
        let mut store = store();

        store.set("a", 1).unwrap();
        store.set("b", 1i64 << 40).unwrap();
        let _ = store.get::<i32>("a");
        let _ = store.get::<i32>("missing");

        let stats = store.stats();
        assert_eq!(stats.writes, 2);
        assert_eq!(stats.decimal_fallbacks, 1);
        assert_eq!(stats.reads, 2);
        assert_eq!(stats.empty_reads, 1);
        assert_eq!(stats.tracked_entries, 2);
    }
}
