//! Per-event shape resolution.
//!
//! Decides for every [`EventDef`] whether it becomes a parameterless singleton
//! or a record type, picks out the screen name, deduplicates the remaining
//! parameters, and collects the category's predefined values.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::naming::{to_camel_case, to_pascal_case};
use crate::schema::{AnalyticsCategory, EventDef};

/// Reserved parameter key identifying the screen an event happened on.
pub const SCREEN_NAME_KEY: &str = "screen_name";

/// How an event is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventShape {
    /// No custom parameters: a singleton with an empty params map.
    Simple,
    /// One `String` field per custom parameter.
    Parameterized,
}

/// A non-screen-name parameter of an event, after deduplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomParam {
    /// Key as written in the schema; used as the params map key.
    pub key: String,
    /// camelCase field name in the generated record.
    pub field_name: String,
    /// Value of the first occurrence of this key in the schema.
    pub value: String,
}

/// An event ready for emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEvent {
    /// Event name as written in the schema.
    pub event_name: String,
    /// Generated type name, e.g. `ViewWelcomeEvent`.
    pub class_name: String,
    pub shape: EventShape,
    /// Value of the `screen_name` parameter, or empty when absent.
    pub screen_name: String,
    /// Custom parameters, unique by key, in schema order.
    pub custom_params: Vec<CustomParam>,
}

/// Distinct predefined values of a category in first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredefinedValues {
    ordered: Vec<String>,
    seen: BTreeSet<String>,
}

impl PredefinedValues {
    /// Add `value` unless already present. Returns `true` when it was new.
    pub fn insert(&mut self, value: &str) -> bool {
        if self.seen.contains(value) {
            return false;
        }
        self.seen.insert(value.to_string());
        self.ordered.push(value.to_string());
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

/// All events of one category plus the values they share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCategory {
    pub name: String,
    pub events: Vec<ResolvedEvent>,
    pub values: PredefinedValues,
}

/// Resolve every event of `category` in schema order.
///
/// With `strict_screen_name`, an event without a `screen_name` parameter
/// aborts resolution with [`Error::MissingScreenName`].
pub fn resolve_category(
    category: &AnalyticsCategory,
    strict_screen_name: bool,
) -> Result<ResolvedCategory> {
    let mut values = PredefinedValues::default();
    let events = category
        .events
        .iter()
        .map(|event| resolve_event(&category.name, event, &mut values, strict_screen_name))
        .collect::<Result<Vec<_>>>()?;

    debug!(
        category = %category.name,
        events = events.len(),
        values = values.len(),
        "resolved category"
    );

    Ok(ResolvedCategory {
        name: category.name.clone(),
        events,
        values,
    })
}

/// Resolve a single event, adding its predefined values to `values`.
pub fn resolve_event(
    category: &str,
    event: &EventDef,
    values: &mut PredefinedValues,
    strict_screen_name: bool,
) -> Result<ResolvedEvent> {
    let screen_param = event.parameters.iter().find(|p| p.key == SCREEN_NAME_KEY);
    let screen_name = match screen_param {
        Some(param) => param.value.clone(),
        None if strict_screen_name => {
            return Err(Error::MissingScreenName {
                category: category.to_string(),
                event: event.name.clone(),
            });
        }
        None => {
            warn!(
                category,
                event = %event.name,
                "screen_name parameter is not defined, defaulting to empty"
            );
            String::new()
        }
    };

    let mut seen_keys: BTreeSet<&str> = BTreeSet::new();
    let custom_params: Vec<CustomParam> = event
        .parameters
        .iter()
        .filter(|p| p.key != SCREEN_NAME_KEY)
        .filter(|p| seen_keys.insert(p.key.as_str()))
        .map(|p| CustomParam {
            key: p.key.clone(),
            field_name: to_camel_case(&p.key),
            value: p.value.clone(),
        })
        .collect();

    for param in &event.parameters {
        if param.has_predefined_value() && values.insert(&param.value) {
            debug!(category, value = %param.value, "new predefined value");
        }
    }

    // Decided on the deduplicated params, not the raw list: an event that only
    // repeats screen_name stays Simple, since a data class needs a field.
    let shape = if custom_params.is_empty() {
        EventShape::Simple
    } else {
        EventShape::Parameterized
    };

    Ok(ResolvedEvent {
        event_name: event.name.clone(),
        class_name: format!("{}Event", to_pascal_case(&event.name)),
        shape,
        screen_name,
        custom_params,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ParamDef;

    fn param(key: &str, value: &str) -> ParamDef {
        ParamDef {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    fn event(name: &str, parameters: Vec<ParamDef>) -> EventDef {
        EventDef {
            name: name.to_string(),
            parameters,
        }
    }

    fn resolve(ev: &EventDef) -> (ResolvedEvent, PredefinedValues) {
        let mut values = PredefinedValues::default();
        let resolved = resolve_event("onboarding", ev, &mut values, false).unwrap();
        (resolved, values)
    }

    #[test]
    fn screen_name_only_is_simple() {
        let (resolved, _) = resolve(&event(
            "view_welcome",
            vec![param("screen_name", "welcome")],
        ));
        assert_eq!(resolved.shape, EventShape::Simple);
        assert_eq!(resolved.class_name, "ViewWelcomeEvent");
        assert_eq!(resolved.screen_name, "welcome");
        assert!(resolved.custom_params.is_empty());
    }

    #[test]
    fn empty_parameters_is_simple() {
        let (resolved, values) = resolve(&event("app_open", vec![]));
        assert_eq!(resolved.shape, EventShape::Simple);
        assert_eq!(resolved.screen_name, "");
        assert!(values.is_empty());
    }

    #[test]
    fn custom_params_make_a_record() {
        let (resolved, _) = resolve(&event(
            "select_plan",
            vec![
                param("screen_name", "plans"),
                param("plan_id", ""),
                param("billing_period", "monthly"),
            ],
        ));
        assert_eq!(resolved.shape, EventShape::Parameterized);
        let fields: Vec<&str> = resolved
            .custom_params
            .iter()
            .map(|p| p.field_name.as_str())
            .collect();
        assert_eq!(fields, ["planId", "billingPeriod"]);
        assert_eq!(resolved.custom_params[1].key, "billing_period");
    }

    #[test]
    fn duplicate_keys_keep_first_occurrence() {
        let (resolved, _) = resolve(&event(
            "tap",
            vec![param("a", "1"), param("a", "2"), param("screen_name", "s")],
        ));
        assert_eq!(resolved.custom_params.len(), 1);
        assert_eq!(resolved.custom_params[0].key, "a");
        assert_eq!(resolved.custom_params[0].value, "1");
    }

    #[test]
    fn repeated_screen_name_only_is_still_simple() {
        let (resolved, _) = resolve(&event(
            "view",
            vec![param("screen_name", "first"), param("screen_name", "second")],
        ));
        assert_eq!(resolved.shape, EventShape::Simple);
        assert_eq!(resolved.screen_name, "first");
    }

    #[test]
    fn missing_screen_name_is_tolerated_by_default() {
        let (resolved, values) = resolve(&event("open_menu", vec![param("source", "menu")]));
        assert_eq!(resolved.screen_name, "");
        assert_eq!(resolved.shape, EventShape::Parameterized);
        assert_eq!(resolved.custom_params.len(), 1);
        assert_eq!(resolved.custom_params[0].field_name, "source");
        assert_eq!(values.iter().collect::<Vec<_>>(), ["menu"]);
    }

    #[test]
    fn missing_screen_name_fails_in_strict_mode() {
        let mut values = PredefinedValues::default();
        let err = resolve_event(
            "onboarding",
            &event("open_menu", vec![param("source", "menu")]),
            &mut values,
            true,
        )
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("screen_name parameter is not defined"));
        assert!(msg.contains("open_menu"));
        assert!(msg.contains("onboarding"));
    }

    #[test]
    fn predefined_values_include_screen_name_and_skip_empty_and_null() {
        let (_, values) = resolve(&event(
            "select_plan",
            vec![
                param("screen_name", "plans"),
                param("plan_id", ""),
                param("source", "null"),
                param("tier", "premium"),
            ],
        ));
        let collected: Vec<&str> = values.iter().collect();
        assert_eq!(collected, ["plans", "premium"]);
    }

    #[test]
    fn category_values_are_distinct_in_first_insertion_order() {
        let category = AnalyticsCategory {
            name: "paywall".to_string(),
            events: vec![
                event("show", vec![param("screen_name", "paywall"), param("tier", "pro")]),
                event("buy", vec![param("screen_name", "paywall"), param("tier", "basic")]),
                event("close", vec![param("screen_name", "checkout")]),
            ],
        };
        let resolved = resolve_category(&category, false).unwrap();
        assert_eq!(resolved.events.len(), 3);
        let collected: Vec<&str> = resolved.values.iter().collect();
        assert_eq!(collected, ["paywall", "pro", "basic", "checkout"]);
    }

    #[test]
    fn strict_category_aborts_on_first_missing_screen_name() {
        let category = AnalyticsCategory {
            name: "paywall".to_string(),
            events: vec![
                event("show", vec![param("screen_name", "paywall")]),
                event("buy", vec![param("tier", "pro")]),
            ],
        };
        let err = resolve_category(&category, true).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingScreenName { ref event, .. } if event == "buy"
        ));
    }
}
