//! Kotlin source rendering for the module tree built in [`crate::ir`].
//!
//! Rendering is a single pass with no decisions of its own: everything that
//! depends on the schema has already been settled in the IR. Output is
//! deterministic, 4-space indented, and ends with a newline.

use std::fmt::Write;

use crate::ir::{
    BASE_EVENT_NAME, BaseEventType, CategoryModule, Constant, EventType, Field, SuperArgs,
    VALUES_OBJECT_NAME,
};
use crate::naming::{escape_identifier, kotlin_string_literal};

/// First line of every generated file.
pub const GENERATED_HEADER: &str = "// Code generated by analytics-events-gen. DO NOT EDIT.";

const INDENT: &str = "    ";

/// Render a category module to Kotlin source.
pub fn render_category_module(module: &CategoryModule) -> String {
    let mut out = String::new();

    writeln!(out, "{GENERATED_HEADER}").unwrap();
    writeln!(out, "package {}", module.package).unwrap();
    writeln!(out).unwrap();
    writeln!(out, "import {}.{BASE_EVENT_NAME}", module.base_package).unwrap();
    writeln!(out).unwrap();
    writeln!(out, "object {} {{", module.module_name).unwrap();

    let mut first = true;
    for event_type in &module.event_types {
        if !first {
            writeln!(out).unwrap();
        }
        first = false;
        match event_type {
            EventType::Singleton { name, base } => write_singleton(&mut out, name, base),
            EventType::Record { name, base, fields } => {
                write_record(&mut out, name, base, fields)
            }
        }
    }

    if let Some(constants) = &module.constants {
        if !first {
            writeln!(out).unwrap();
        }
        write_values(&mut out, constants);
    }

    writeln!(out, "}}").unwrap();
    out
}

/// Render the shared `BaseEvent` supertype.
pub fn render_base_event(base: &BaseEventType) -> String {
    let mut out = String::new();

    writeln!(out, "{GENERATED_HEADER}").unwrap();
    writeln!(out, "package {}", base.package).unwrap();
    writeln!(out).unwrap();
    writeln!(out, "open class {}(", base.name).unwrap();
    writeln!(out, "{INDENT}val categoryName: String,").unwrap();
    writeln!(out, "{INDENT}val screenName: String,").unwrap();
    writeln!(out, "{INDENT}val eventName: String,").unwrap();
    writeln!(out, "{INDENT}open val params: Map<String, String>,").unwrap();
    writeln!(out, ")").unwrap();
    out
}

fn write_singleton(out: &mut String, name: &str, base: &SuperArgs) {
    writeln!(
        out,
        "{INDENT}object {name} : {}",
        super_call(base, "emptyMap()")
    )
    .unwrap();
}

fn write_record(out: &mut String, name: &str, base: &SuperArgs, fields: &[Field]) {
    let documented: Vec<&Field> = fields.iter().filter(|f| f.predefined.is_some()).collect();
    if !documented.is_empty() {
        writeln!(out, "{INDENT}/**").unwrap();
        for field in documented {
            if let Some(constant) = &field.predefined {
                writeln!(
                    out,
                    "{INDENT} * @property {} schema value: [{VALUES_OBJECT_NAME}.{constant}]",
                    field.name
                )
                .unwrap();
            }
        }
        writeln!(out, "{INDENT} */").unwrap();
    }

    writeln!(out, "{INDENT}data class {name}(").unwrap();
    for field in fields {
        writeln!(
            out,
            "{INDENT}{INDENT}val {}: String,",
            escape_identifier(&field.name)
        )
        .unwrap();
    }

    let entries: Vec<String> = fields
        .iter()
        .map(|f| {
            format!(
                "{} to {}",
                kotlin_string_literal(&f.key),
                escape_identifier(&f.name)
            )
        })
        .collect();
    let params = format!("mapOf({})", entries.join(", "));
    writeln!(out, "{INDENT}) : {}", super_call(base, &params)).unwrap();
}

fn write_values(out: &mut String, constants: &[Constant]) {
    writeln!(out, "{INDENT}object {VALUES_OBJECT_NAME} {{").unwrap();
    for constant in constants {
        writeln!(
            out,
            "{INDENT}{INDENT}const val {} = {}",
            constant.name,
            kotlin_string_literal(&constant.value)
        )
        .unwrap();
    }
    writeln!(out, "{INDENT}}}").unwrap();
}

fn super_call(base: &SuperArgs, params: &str) -> String {
    format!(
        "{BASE_EVENT_NAME}({}, {}, {}, {params})",
        kotlin_string_literal(&base.category_name),
        kotlin_string_literal(&base.screen_name),
        kotlin_string_literal(&base.event_name),
    )
}
