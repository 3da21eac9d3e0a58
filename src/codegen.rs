//! Kotlin event class generation from an analytics event schema.
//!
//! Generates one `.kt` file per category plus the shared `BaseEvent` type:
//! - a container `object <Category>Events` per category
//! - one nested `object` (no custom parameters) or `data class` per event
//! - a nested `Values` object with the category's predefined values
//!
//! Every file of a run is rendered before anything is written, so a schema
//! error leaves the destination untouched. Each file is written atomically.
//! Identical input always produces byte-identical output.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::{GeneratorOptions, package_path};
use crate::error::{Error, Result};
use crate::ir::{EventType, build_base_event, build_category_module};
use crate::naming::package_segment;
use crate::render::{render_base_event, render_category_module};
use crate::resolve::resolve_category;
use crate::schema::{AnalyticsCategory, load_schema, parse_schema};

/// Extension of generated source files.
pub const SOURCE_EXTENSION: &str = "kt";

/// Statistics collected during generation for reporting.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct GenerationStats {
    pub categories_generated: usize,
    pub events_generated: usize,
    pub simple_events: usize,
    pub parameterized_events: usize,
    pub constants_generated: usize,
}

/// A rendered source file and where it belongs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub contents: String,
}

/// Render every category module and the base type without writing anything.
///
/// Files are returned in schema order with `BaseEvent` last.
pub fn render_all(
    categories: &[AnalyticsCategory],
    options: &GeneratorOptions,
) -> Result<(Vec<GeneratedFile>, GenerationStats)> {
    options.validate()?;

    let base_dir = options.package_dir();
    let mut stats = GenerationStats::default();
    let mut files = Vec::with_capacity(categories.len() + 1);

    for category in categories {
        let resolved = resolve_category(category, options.strict_screen_name)?;
        let module = build_category_module(&resolved, &options.package_name);

        for event_type in &module.event_types {
            match event_type {
                EventType::Singleton { .. } => stats.simple_events += 1,
                EventType::Record { .. } => stats.parameterized_events += 1,
            }
        }
        stats.events_generated += module.event_types.len();
        stats.constants_generated += module.constants.as_ref().map_or(0, Vec::len);
        stats.categories_generated += 1;

        let path = base_dir
            .join(package_segment(&category.name))
            .join(format!("{}.{SOURCE_EXTENSION}", module.module_name));
        debug!(
            category = %category.name,
            module = %module.module_name,
            events = module.event_types.len(),
            "rendered category module"
        );
        files.push(GeneratedFile {
            path,
            contents: render_category_module(&module),
        });
    }

    files.push(base_event_file(options));
    Ok((files, stats))
}

/// Generate and write one module per category plus `BaseEvent`.
///
/// Returns generation statistics for reporting.
pub fn generate(
    categories: &[AnalyticsCategory],
    options: &GeneratorOptions,
) -> Result<GenerationStats> {
    let (files, stats) = render_all(categories, options)?;
    for file in &files {
        write_file(&file.path, &file.contents)?;
    }
    Ok(stats)
}

/// Parse schema text and generate from it.
pub fn generate_from_str(schema_text: &str, options: &GeneratorOptions) -> Result<GenerationStats> {
    let categories = parse_schema(schema_text)?;
    generate(&categories, options)
}

/// Load a schema file and generate from it.
pub fn generate_from_file(schema_path: &Path, options: &GeneratorOptions) -> Result<GenerationStats> {
    let categories = load_schema(schema_path)?;
    info!(
        path = %schema_path.display(),
        categories = categories.len(),
        "loaded event schema"
    );
    generate(&categories, options)
}

/// Write only the shared `BaseEvent` type. Returns the written path.
pub fn generate_base_type(options: &GeneratorOptions) -> Result<PathBuf> {
    options.validate()?;
    let file = base_event_file(options);
    write_file(&file.path, &file.contents)?;
    Ok(file.path)
}

fn base_event_file(options: &GeneratorOptions) -> GeneratedFile {
    let base = build_base_event(&options.package_name);
    GeneratedFile {
        path: package_path(&options.destination, &base.package)
            .join(format!("{}.{SOURCE_EXTENSION}", base.name)),
        contents: render_base_event(&base),
    }
}

/// Write content to a file via a temp file and rename, creating parent
/// directories as needed.
fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::Write {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let tmp_path = path.with_extension("tmp");
    std::fs::write(&tmp_path, content).map_err(|e| Error::Write {
        path: tmp_path.clone(),
        source: e,
    })?;
    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(Error::Write {
            path: path.to_path_buf(),
            source: e,
        });
    }

    info!(path = %path.display(), "wrote generated source");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = r#"[
        {"name": "onboarding", "events": [
            {"name": "view_welcome", "parameters": [{"name": "screen_name", "value": "welcome"}]},
            {"name": "select_goal", "parameters": [
                {"name": "screen_name", "value": "goals"},
                {"name": "goal_id", "value": ""}
            ]}
        ]},
        {"name": "user_profile", "events": [
            {"name": "open", "parameters": [{"name": "screen_name", "value": ""}]}
        ]}
    ]"#;

    fn options() -> GeneratorOptions {
        GeneratorOptions::new("out", "com.example.analytics")
    }

    #[test]
    fn render_all_produces_one_file_per_category_plus_base() {
        let categories = parse_schema(SCHEMA).unwrap();
        let (files, stats) = render_all(&categories, &options()).unwrap();

        let paths: Vec<PathBuf> = files.iter().map(|f| f.path.clone()).collect();
        let base = Path::new("out").join("com").join("example").join("analytics");
        assert_eq!(
            paths,
            vec![
                base.join("onboarding").join("OnboardingEvents.kt"),
                base.join("userprofile").join("UserProfileEvents.kt"),
                base.join("BaseEvent.kt"),
            ]
        );

        assert_eq!(
            stats,
            GenerationStats {
                categories_generated: 2,
                events_generated: 3,
                simple_events: 2,
                parameterized_events: 1,
                constants_generated: 2,
            }
        );
    }

    #[test]
    fn render_all_rejects_invalid_package() {
        let categories = parse_schema(SCHEMA).unwrap();
        let err = render_all(&categories, &GeneratorOptions::new("out", "com.1bad")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn strict_mode_failure_renders_nothing() {
        let categories =
            parse_schema(r#"[{"name": "c", "events": [{"name": "e", "parameters": []}]}]"#)
                .unwrap();
        let err = render_all(&categories, &options().strict_screen_name(true)).unwrap_err();
        assert!(matches!(err, Error::MissingScreenName { .. }));
    }

    #[test]
    fn empty_schema_still_renders_base_event() {
        let (files, stats) = render_all(&[], &options()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].path.ends_with("BaseEvent.kt"));
        assert_eq!(stats, GenerationStats::default());
    }

    #[test]
    fn keyword_category_and_punctuation_value_render_valid_names() {
        let categories = parse_schema(
            r#"[{"name": "object", "events": [
                {"name": "tap", "parameters": [
                    {"name": "screen_name", "value": "-"},
                    {"name": "_", "value": ""}
                ]}
            ]}]"#,
        )
        .unwrap();
        let (files, _) = render_all(&categories, &options()).unwrap();

        let module = &files[0];
        assert!(module.path.ends_with(Path::new("object_").join("ObjectEvents.kt")));
        assert!(module
            .contents
            .contains("package com.example.analytics.object_\n"));
        assert!(module.contents.contains("const val _0 = \"-\""));
        assert!(module.contents.contains("val _0: String"));
        assert!(!module.contents.contains("val _:"));
    }

    #[test]
    fn failed_rename_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("Blocked.kt");
        // A non-empty directory cannot be replaced by a file.
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("keep"), "").unwrap();

        let err = write_file(&target, "content").unwrap_err();
        assert!(matches!(err, Error::Write { ref path, .. } if path == &target));
        assert!(!dir.path().join("Blocked.tmp").exists());
        assert!(target.join("keep").exists());
    }
}
