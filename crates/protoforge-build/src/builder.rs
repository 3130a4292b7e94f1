// Staged construction of a `BuildConfig`.
//
// Every method consumes and returns the builder, so a finalized builder
// cannot be touched again - `build()` moves the accumulated state into the
// frozen configuration.

use std::path::PathBuf;

use prost_build::ServiceGenerator;
use tracing::warn;

use crate::config::BuildConfig;
use crate::error::ConfigError;
use crate::registry::{AttrRegistry, FieldRepr, ReprTable};

/// Fluent accumulator for a [`BuildConfig`].
#[derive(Default)]
pub struct Builder {
    files: Vec<PathBuf>,
    includes: Vec<PathBuf>,
    output: Option<PathBuf>,
    attrs: AttrRegistry,
    messages: AttrRegistry,
    enums: AttrRegistry,
    fields: AttrRegistry,
    reprs: ReprTable,
    service_generator: Option<Box<dyn ServiceGenerator>>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one proto file to compile.
    pub fn file(mut self, file: impl Into<PathBuf>) -> Self {
        self.files.push(file.into());
        self
    }

    /// Add proto files to compile, preserving order.
    pub fn files<I, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.files.extend(files.into_iter().map(Into::into));
        self
    }

    /// Add one include directory.
    pub fn include(mut self, dir: impl Into<PathBuf>) -> Self {
        self.includes.push(dir.into());
        self
    }

    /// Add include directories, preserving order.
    pub fn includes<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.includes.extend(dirs.into_iter().map(Into::into));
        self
    }

    /// Set the output directory for generated code.
    ///
    /// When unset, the orchestrator falls back to the `OUT_DIR` build
    /// variable.
    pub fn output(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output = Some(dir.into());
        self
    }

    /// Attach `attribute` at every target kind matching `pattern`.
    ///
    /// Attribute text is passed to the generator verbatim, so include the
    /// `#[...]` wrapper: `.attribute(".", "#[derive(Eq)]")`.
    pub fn attribute(mut self, pattern: impl Into<String>, attribute: impl Into<String>) -> Self {
        self.attrs.register(pattern, attribute);
        self
    }

    /// Attach `attribute` to message types matching `pattern`.
    pub fn message_attribute(
        mut self,
        pattern: impl Into<String>,
        attribute: impl Into<String>,
    ) -> Self {
        self.messages.register(pattern, attribute);
        self
    }

    /// Attach `attribute` to enum types matching `pattern`.
    pub fn enum_attribute(
        mut self,
        pattern: impl Into<String>,
        attribute: impl Into<String>,
    ) -> Self {
        self.enums.register(pattern, attribute);
        self
    }

    /// Attach `attribute` to fields matching `pattern`.
    pub fn field_attribute(
        mut self,
        pattern: impl Into<String>,
        attribute: impl Into<String>,
    ) -> Self {
        self.fields.register(pattern, attribute);
        self
    }

    /// Generate `bytes::Bytes` for bytes fields matching `pattern`.
    pub fn bytes(self, pattern: impl Into<String>) -> Self {
        self.repr(pattern.into(), FieldRepr::Bytes)
    }

    /// Generate `BTreeMap` for map fields matching `pattern`.
    pub fn btree_map(self, pattern: impl Into<String>) -> Self {
        self.repr(pattern.into(), FieldRepr::BtreeMap)
    }

    fn repr(mut self, pattern: String, repr: FieldRepr) -> Self {
        if let Some(prev) = self.reprs.register(pattern.clone(), repr) {
            if prev != repr {
                warn!(%pattern, %prev, now = %repr, "field representation re-registered; last registration wins");
            }
        }
        self
    }

    /// Install the service generator strategy. At most one per build; a
    /// later call replaces an earlier one.
    pub fn service_generator(mut self, service_generator: Box<dyn ServiceGenerator>) -> Self {
        self.service_generator = Some(service_generator);
        self
    }

    /// Freeze the accumulated state into a [`BuildConfig`].
    ///
    /// Pattern shape is validated here: every registered pattern must be
    /// non-empty and free of whitespace. Cross-field consistency (e.g. a
    /// btree_map override on a non-map field) is left to the generator.
    pub fn build(self) -> Result<BuildConfig, ConfigError> {
        for (target, registry) in [
            ("attrs", &self.attrs),
            ("messages", &self.messages),
            ("enums", &self.enums),
            ("fields", &self.fields),
        ] {
            for (pattern, _) in registry.iter() {
                check_pattern(target, pattern)?;
            }
        }
        for (pattern, _) in self.reprs.iter() {
            check_pattern("field representation", pattern)?;
        }

        Ok(BuildConfig {
            files: self.files,
            includes: self.includes,
            output: self.output,
            attrs: self.attrs,
            messages: self.messages,
            enums: self.enums,
            fields: self.fields,
            reprs: self.reprs,
            service_generator: self.service_generator,
        })
    }
}

fn check_pattern(target: &'static str, pattern: &str) -> Result<(), ConfigError> {
    if pattern.is_empty() {
        return Err(ConfigError::EmptyPattern { target });
    }
    if pattern.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidPattern {
            target,
            pattern: pattern.to_string(),
        });
    }
    Ok(())
}

impl std::fmt::Debug for Builder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builder")
            .field("files", &self.files)
            .field("includes", &self.includes)
            .field("output", &self.output)
            .field("attrs", &self.attrs.len())
            .field("messages", &self.messages.len())
            .field("enums", &self.enums.len())
            .field("fields", &self.fields.len())
            .field("reprs", &self.reprs.len())
            .field("service_generator", &self.service_generator.is_some())
            .finish()
    }
}
