//! Intermediate representation of generated Kotlin modules.
//!
//! Resolved events are first assembled into a small tree of records
//! (module → event types → fields / constants) and only then rendered to text
//! by [`crate::render`]. Tests assert on this tree rather than on strings.

use crate::naming::{module_package, to_constant_name, to_pascal_case};
use crate::resolve::{EventShape, ResolvedCategory, ResolvedEvent};

/// Name of the shared supertype of every generated event.
pub const BASE_EVENT_NAME: &str = "BaseEvent";

/// Name of the nested constants object.
pub const VALUES_OBJECT_NAME: &str = "Values";

/// Properties declared by `BaseEvent`. Record fields must not reuse them.
pub const BASE_EVENT_PROPERTIES: &[&str] =
    &["categoryName", "screenName", "eventName", "params"];

/// Appended to a field name that would hide a `BaseEvent` property.
const SHADOWED_FIELD_SUFFIX: &str = "Param";

/// One generated Kotlin file for a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryModule {
    /// Container object name, e.g. `OnboardingEvents`.
    pub module_name: String,
    /// Package of the generated file, e.g. `com.example.analytics.onboarding`.
    pub package: String,
    /// Package holding [`BASE_EVENT_NAME`].
    pub base_package: String,
    /// Event types in schema order.
    pub event_types: Vec<EventType>,
    /// `None` when the category has no predefined values.
    pub constants: Option<Vec<Constant>>,
}

/// The four arguments every event passes to `BaseEvent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuperArgs {
    pub category_name: String,
    pub screen_name: String,
    pub event_name: String,
}

/// A nested event type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventType {
    /// `object Name : BaseEvent(..., emptyMap())`
    Singleton { name: String, base: SuperArgs },
    /// `data class Name(val field: String, ...) : BaseEvent(..., mapOf(...))`
    Record {
        name: String,
        base: SuperArgs,
        fields: Vec<Field>,
    },
}

impl EventType {
    pub fn name(&self) -> &str {
        match self {
            EventType::Singleton { name, .. } | EventType::Record { name, .. } => name,
        }
    }

    pub fn fields(&self) -> &[Field] {
        match self {
            EventType::Singleton { .. } => &[],
            EventType::Record { fields, .. } => fields,
        }
    }
}

/// A `String` field of a record event, forwarded to the params map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// camelCase property name.
    pub name: String,
    /// Params map key.
    pub key: String,
    /// Name of the `Values` constant matching the schema value, if any.
    pub predefined: Option<String>,
}

/// A `const val NAME = "value"` entry of the `Values` object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constant {
    pub name: String,
    pub value: String,
}

/// The shared supertype definition, independent of the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseEventType {
    pub name: String,
    pub package: String,
}

/// Build the module tree for a resolved category.
pub fn build_category_module(category: &ResolvedCategory, base_package: &str) -> CategoryModule {
    let constants = build_constants(category);

    let event_types = category
        .events
        .iter()
        .map(|event| build_event_type(&category.name, event, constants.as_deref()))
        .collect();

    CategoryModule {
        module_name: format!("{}Events", to_pascal_case(&category.name)),
        package: module_package(base_package, &category.name),
        base_package: base_package.to_string(),
        event_types,
        constants,
    }
}

/// Build the shared `BaseEvent` definition for `base_package`.
pub fn build_base_event(base_package: &str) -> BaseEventType {
    BaseEventType {
        name: BASE_EVENT_NAME.to_string(),
        package: base_package.to_string(),
    }
}

fn build_event_type(
    category_name: &str,
    event: &ResolvedEvent,
    constants: Option<&[Constant]>,
) -> EventType {
    let base = SuperArgs {
        category_name: category_name.to_string(),
        screen_name: event.screen_name.clone(),
        event_name: event.event_name.clone(),
    };

    match event.shape {
        EventShape::Simple => EventType::Singleton {
            name: event.class_name.clone(),
            base,
        },
        EventShape::Parameterized => EventType::Record {
            name: event.class_name.clone(),
            base,
            fields: event
                .custom_params
                .iter()
                .map(|param| Field {
                    name: field_name(&param.field_name),
                    key: param.key.clone(),
                    predefined: constant_for(constants, &param.value),
                })
                .collect(),
        },
    }
}

/// One constant per distinct value; on a name collision the later value
/// replaces the earlier one in place.
fn build_constants(category: &ResolvedCategory) -> Option<Vec<Constant>> {
    if category.values.is_empty() {
        return None;
    }

    let mut constants: Vec<Constant> = Vec::with_capacity(category.values.len());
    for value in category.values.iter() {
        let name = to_constant_name(value);
        match constants.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.value = value.to_string(),
            None => constants.push(Constant {
                name,
                value: value.to_string(),
            }),
        }
    }
    Some(constants)
}

/// `eventName` → `eventNameParam`; other names pass through.
fn field_name(name: &str) -> String {
    if BASE_EVENT_PROPERTIES.contains(&name) {
        format!("{name}{SHADOWED_FIELD_SUFFIX}")
    } else {
        name.to_string()
    }
}

fn constant_for(constants: Option<&[Constant]>, value: &str) -> Option<String> {
    constants?
        .iter()
        .find(|c| c.value == value)
        .map(|c| c.name.clone())
}
