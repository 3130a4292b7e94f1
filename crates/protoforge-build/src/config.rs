// The frozen build configuration value.
//
// Produced exactly once by a `Builder`, read-only afterwards, and consumed
// by value by the orchestrator (the service generator slot moves into the
// generator session).

use std::fmt;
use std::path::{Path, PathBuf};

use prost_build::ServiceGenerator;

use crate::builder::Builder;
use crate::error::Result;
use crate::registry::{AttrRegistry, ReprTable};

/// Immutable description of one protobuf compilation job.
pub struct BuildConfig {
    pub(crate) files: Vec<PathBuf>,
    pub(crate) includes: Vec<PathBuf>,
    pub(crate) output: Option<PathBuf>,
    pub(crate) attrs: AttrRegistry,
    pub(crate) messages: AttrRegistry,
    pub(crate) enums: AttrRegistry,
    pub(crate) fields: AttrRegistry,
    pub(crate) reprs: ReprTable,
    pub(crate) service_generator: Option<Box<dyn ServiceGenerator>>,
}

impl BuildConfig {
    /// Start accumulating a new configuration.
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Proto files to compile, in order.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Include directories, in order.
    pub fn includes(&self) -> &[PathBuf] {
        &self.includes
    }

    /// Explicit output directory, if one was configured.
    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    /// Attributes applied to every target kind.
    pub fn attrs(&self) -> &AttrRegistry {
        &self.attrs
    }

    /// Attributes applied to generated message types.
    pub fn messages(&self) -> &AttrRegistry {
        &self.messages
    }

    /// Attributes applied to generated enum types.
    pub fn enums(&self) -> &AttrRegistry {
        &self.enums
    }

    /// Attributes applied to generated fields.
    pub fn fields(&self) -> &AttrRegistry {
        &self.fields
    }

    /// Field representation overrides.
    pub fn reprs(&self) -> &ReprTable {
        &self.reprs
    }

    pub fn has_service_generator(&self) -> bool {
        self.service_generator.is_some()
    }

    /// Compile this configuration's own file list.
    ///
    /// Convenience over [`build_protos`](crate::build_protos) for the common
    /// case where the files and includes live in the configuration itself.
    pub fn compile(self) -> Result<()> {
        let files = self.files.clone();
        let includes = self.includes.clone();
        crate::compile::build_protos(&files, &includes, self)
    }
}

impl fmt::Debug for BuildConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildConfig")
            .field("files", &self.files)
            .field("includes", &self.includes)
            .field("output", &self.output)
            .field("attrs", &self.attrs)
            .field("messages", &self.messages)
            .field("enums", &self.enums)
            .field("fields", &self.fields)
            .field("reprs", &self.reprs)
            .field("service_generator", &self.service_generator.is_some())
            .finish()
    }
}
