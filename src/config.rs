//! Generator options supplied by the host (the CLI or a build script).

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::naming::is_valid_identifier;

/// Where and how generated sources are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Root directory for generated sources (e.g. `app/build/generated/events`).
    pub destination: PathBuf,

    /// Base Kotlin package (e.g. `com.example.analytics`). Category modules
    /// live in sub-packages of it; `BaseEvent` lives in it directly.
    pub package_name: String,

    /// Fail when an event has no `screen_name` parameter instead of
    /// defaulting it to an empty string.
    pub strict_screen_name: bool,
}

impl GeneratorOptions {
    pub fn new(destination: impl Into<PathBuf>, package_name: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            package_name: package_name.into(),
            strict_screen_name: false,
        }
    }

    pub fn strict_screen_name(mut self, strict: bool) -> Self {
        self.strict_screen_name = strict;
        self
    }

    /// Check that the package name is a dotted sequence of Kotlin identifiers.
    pub fn validate(&self) -> Result<()> {
        if self.package_name.is_empty() {
            return Err(Error::Config("package name must not be empty".to_string()));
        }
        if let Some(bad) = self
            .package_name
            .split('.')
            .find(|segment| !is_valid_identifier(segment))
        {
            return Err(Error::Config(format!(
                "package name '{}' has invalid segment '{bad}'",
                self.package_name
            )));
        }
        Ok(())
    }

    /// Directory of the base package under the destination.
    ///
    /// `com.example.analytics` → `<destination>/com/example/analytics`.
    pub fn package_dir(&self) -> PathBuf {
        package_path(&self.destination, &self.package_name)
    }
}

/// Join each dot-separated package segment onto `root`.
pub fn package_path(root: &Path, package: &str) -> PathBuf {
    package
        .split('.')
        .fold(root.to_path_buf(), |dir, segment| dir.join(segment))
}
