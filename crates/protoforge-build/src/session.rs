// Generator session seam.
//
// Abstraction over the external code generator's configuration surface so
// the orchestration sequence can be exercised against a recording session
// in tests, the same way config loading abstracts its environment source.

use std::path::{Path, PathBuf};

use prost_build::ServiceGenerator;

use crate::error::BuildError;
use crate::registry::FieldRepr;

/// Which generator hook an attribute attaches to.
///
/// Messages and enums both configure type attributes - that is the only
/// distinction the generator makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrTarget {
    Type,
    Field,
}

/// One generator-configuration session.
///
/// Mirrors the hooks of `prost_build::Config`; a session is configured by
/// [`apply_config`](crate::apply_config) and then compiled exactly once.
pub trait GeneratorSession {
    fn set_output_dir(&mut self, dir: &Path);

    fn attach_attribute(&mut self, target: AttrTarget, pattern: &str, attribute: &str);

    fn set_field_representation(&mut self, pattern: &str, repr: FieldRepr);

    fn set_service_generator(&mut self, service_generator: Box<dyn ServiceGenerator>);

    fn compile(&mut self, files: &[PathBuf], includes: &[PathBuf]) -> Result<(), BuildError>;
}

/// The production session backed by `prost_build::Config`.
pub struct ProstSession {
    config: prost_build::Config,
}

impl ProstSession {
    pub fn new() -> Self {
        Self {
            config: prost_build::Config::new(),
        }
    }
}

impl Default for ProstSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GeneratorSession for ProstSession {
    fn set_output_dir(&mut self, dir: &Path) {
        self.config.out_dir(dir);
    }

    fn attach_attribute(&mut self, target: AttrTarget, pattern: &str, attribute: &str) {
        match target {
            AttrTarget::Type => self.config.type_attribute(pattern, attribute),
            AttrTarget::Field => self.config.field_attribute(pattern, attribute),
        };
    }

    fn set_field_representation(&mut self, pattern: &str, repr: FieldRepr) {
        match repr {
            FieldRepr::Bytes => self.config.bytes([pattern]),
            FieldRepr::BtreeMap => self.config.btree_map([pattern]),
        };
    }

    fn set_service_generator(&mut self, service_generator: Box<dyn ServiceGenerator>) {
        self.config.service_generator(service_generator);
    }

    fn compile(&mut self, files: &[PathBuf], includes: &[PathBuf]) -> Result<(), BuildError> {
        self.config
            .compile_protos(files, includes)
            .map_err(BuildError::Compile)
    }
}

impl std::fmt::Debug for ProstSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProstSession").finish_non_exhaustive()
    }
}
