//! Property-Based Tests for Variables Module
//!
//! Uses proptest to check the recency and kind-mapping rules of the store.

use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::host::{HostVariables, InMemoryHost};
use crate::variables::{TaggedKey, VariableKind, VariableStore};

// == Strategies ==
/// Generates logical variable names
fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,8}".prop_map(|s| s)
}

/// Generates text values without surrounding quotes
fn text_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,32}".prop_map(|s| s)
}

/// A single write through the store
#[derive(Debug, Clone)]
enum StoreOp {
    SetInt { name: String, value: i32 },
    SetText { name: String, value: String },
    SetBool { name: String, value: bool },
    Clear { prefix: String },
}

fn store_op_strategy() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        (name_strategy(), any::<i32>()).prop_map(|(name, value)| StoreOp::SetInt { name, value }),
        (name_strategy(), text_strategy())
            .prop_map(|(name, value)| StoreOp::SetText { name, value }),
        (name_strategy(), any::<bool>()).prop_map(|(name, value)| StoreOp::SetBool { name, value }),
        "[a-z]{0,2}".prop_map(|prefix| StoreOp::Clear { prefix }),
    ]
}

fn new_store() -> VariableStore<InMemoryHost> {
    VariableStore::new(InMemoryHost::new())
}

fn rendered(store: &VariableStore<InMemoryHost>) -> Vec<(String, String)> {
    store
        .entries()
        .map(|e| (e.key.to_string(), e.value.clone()))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Setting an Int records `{INT:name}` with the decimal text and forwards it.
    #[test]
    fn prop_int_set_records_front_entry(name in name_strategy(), value in any::<i32>()) {
        let mut store = new_store();

        store.set(&name, value).unwrap();

        let front = store.entries().next().unwrap();
        prop_assert_eq!(front.key.to_string(), format!("{{INT:{}}}", name));
        prop_assert_eq!(front.value.parse::<i32>().unwrap(), value);
        prop_assert_eq!(store.host().get_int(&name), Some(value));
    }

    // 64-bit values outside the i32 range become Decimal entries and never hit set_int.
    #[test]
    fn prop_wide_overflow_goes_to_decimal(
        name in name_strategy(),
        value in prop_oneof![i64::MIN..(i32::MIN as i64), (i32::MAX as i64 + 1)..=i64::MAX]
    ) {
        let mut store = new_store();

        store.set(&name, value).unwrap();

        let front = store.entries().next().unwrap();
        prop_assert_eq!(front.key.kind(), VariableKind::Decimal);
        prop_assert_eq!(&front.value, &value.to_string());
        prop_assert_eq!(store.host().get_int(&name), None);
        prop_assert_eq!(store.host().get_decimal(&name), Some(Decimal::from(value)));
    }

    // Any i64 written through the store reads back as exactly the same i64.
    #[test]
    fn prop_i64_set_then_get_is_exact(name in name_strategy(), value in any::<i64>()) {
        let mut store = new_store();

        store.set(&name, value).unwrap();

        if i32::try_from(value).is_ok() {
            // In-range values land in the Int slot, which the i64 getter skips
            prop_assert_eq!(store.get::<i32>(&name).unwrap(), Some(value as i32));
        } else {
            prop_assert_eq!(store.get::<i64>(&name).unwrap(), Some(value));
        }
    }

    // Any u64 above the i32 range reads back as exactly the same u64.
    #[test]
    fn prop_u64_set_then_get_is_exact(name in name_strategy(), value in (i32::MAX as u64 + 1)..=u64::MAX) {
        let mut store = new_store();

        store.set(&name, value).unwrap();

        prop_assert_eq!(store.get::<u64>(&name).unwrap(), Some(value));
        prop_assert_eq!(&store.entries().next().unwrap().value, &value.to_string());
    }

    // Floats are recorded as text that parses back to them, and the host holds that same number.
    #[test]
    fn prop_decimal_text_round_trips(name in name_strategy(), value in -1e12f64..1e12f64) {
        let mut store = new_store();

        store.set(&name, value).unwrap();

        let front = store.entries().next().unwrap();
        prop_assert_eq!(front.value.parse::<f64>().unwrap(), value);
        let recorded: Decimal = front.value.parse().unwrap();
        prop_assert_eq!(store.host().get_decimal(&name), Some(recorded));
    }

    // Text without surrounding quotes is stored verbatim.
    #[test]
    fn prop_text_stored_verbatim(name in name_strategy(), value in text_strategy()) {
        let mut store = new_store();

        store.set(&name, value.as_str()).unwrap();

        prop_assert_eq!(&store.entries().next().unwrap().value, &value);
        prop_assert_eq!(store.get::<String>(&name).unwrap(), Some(value));
    }

    // Setting the same name and kind twice keeps one entry with the latest value at the front.
    #[test]
    fn prop_overwrite_keeps_single_entry(
        name in name_strategy(),
        other in name_strategy(),
        first in any::<i32>(),
        second in any::<i32>()
    ) {
        prop_assume!(name != other);
        let mut store = new_store();

        store.set(&name, first).unwrap();
        store.set(&other, 0).unwrap();
        store.set(&name, second).unwrap();

        prop_assert_eq!(store.len(), 2);
        let front = store.entries().next().unwrap();
        prop_assert_eq!(front.key.name(), name.as_str());
        prop_assert_eq!(&front.value, &second.to_string());
    }

    // The same name under two kinds never collides.
    #[test]
    fn prop_kinds_do_not_collide(name in name_strategy(), number in any::<i32>(), flag in any::<bool>()) {
        let mut store = new_store();

        store.set(&name, number).unwrap();
        store.set(&name, flag).unwrap();

        prop_assert_eq!(store.len(), 2);
        prop_assert!(store.entry(VariableKind::Int, &name).is_some());
        prop_assert!(store.entry(VariableKind::Boolean, &name).is_some());
    }

    // Clearing by prefix removes exactly the matching names and keeps the rest in order.
    #[test]
    fn prop_clear_starting_with_is_exact(
        names in prop::collection::vec(name_strategy(), 1..20),
        prefix in "[a-z]{0,2}"
    ) {
        let mut store = new_store();
        for (i, name) in names.iter().enumerate() {
            store.set(name, i as i32).unwrap();
        }
        let expected: Vec<(String, String)> = rendered(&store)
            .into_iter()
            .filter(|(key, _)| {
                !TaggedKey::parse(key).unwrap().name().starts_with(prefix.as_str())
            })
            .collect();

        store.clear_starting_with(&prefix);

        prop_assert_eq!(rendered(&store), expected);
    }

    // Under any sequence of writes and clears the record matches a simple model.
    #[test]
    fn prop_recency_matches_model(ops in prop::collection::vec(store_op_strategy(), 1..50)) {
        let mut store = new_store();
        let mut model: Vec<(String, String)> = Vec::new();

        for op in ops {
            let (key, value) = match op {
                StoreOp::SetInt { name, value } => {
                    store.set(&name, value).unwrap();
                    (format!("{{INT:{}}}", name), value.to_string())
                }
                StoreOp::SetText { name, value } => {
                    store.set(&name, value.as_str()).unwrap();
                    (format!("{{TXT:{}}}", name), value)
                }
                StoreOp::SetBool { name, value } => {
                    store.set(&name, value).unwrap();
                    let text = if value { "True" } else { "False" };
                    (format!("{{BOOL:{}}}", name), text.to_string())
                }
                StoreOp::Clear { prefix } => {
                    store.clear_starting_with(&prefix);
                    model.retain(|(key, _)| {
                        !TaggedKey::parse(key).unwrap().name().starts_with(prefix.as_str())
                    });
                    continue;
                }
            };
            model.retain(|(existing, _)| existing != &key);
            model.insert(0, (key, value));
        }

        prop_assert_eq!(rendered(&store), model);
        prop_assert_eq!(store.stats().tracked_entries, store.len());
    }
}
