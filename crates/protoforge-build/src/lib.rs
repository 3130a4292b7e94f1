//! Declarative configuration for protobuf code generation.
//!
//! `prost-build` can customize the code it emits - extra attributes on a
//! generated type, `bytes::Bytes` instead of `Vec<u8>` for a field, a
//! `BTreeMap` instead of a `HashMap` - but every project ends up re-writing
//! the same imperative `build.rs` to ask for it. This crate replaces that
//! with a value: a [`BuildConfig`] assembled through a [`Builder`] or
//! deserialized from a TOML [`BuildManifest`], handed to [`build_protos`],
//! which drives the generator one directive category at a time.
//!
//! ```ignore
//! // build.rs
//! use protoforge_build::BuildManifest;
//!
//! fn main() {
//!     let manifest = BuildManifest::from_toml(include_str!("protoforge.toml")).unwrap();
//!     manifest.into_builder().build().unwrap().compile().unwrap();
//! }
//! ```
//!
//! with a manifest like:
//!
//! ```ignore
//! files = ["proto/ping.proto"]
//! includes = ["proto"]
//! bytes = ["ping.Payload.data"]
//!
//! [[messages]]
//! description = "serde support for the request types"
//! paths = ["ping.Request", "ping.Response"]
//! attrs = ["derive(serde::Serialize, serde::Deserialize)", "serde(default)"]
//! ```
//!
//! Manifest attribute text is written without the `#[...]` wrapper and is
//! wrapped during registration; attribute text passed through the
//! [`Builder`] API goes to the generator verbatim.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

mod builder;
mod compile;
mod config;
mod error;
mod registry;
mod session;

pub use builder::Builder;
pub use compile::{apply_config, build_protos};
pub use config::BuildConfig;
pub use error::{BuildError, ConfigError, Result};
pub use registry::{AttrRegistry, FieldRepr, ReprTable};
pub use session::{AttrTarget, GeneratorSession, ProstSession};

// Re-exported so service generator implementations need no direct
// prost-build dependency.
pub use prost_build::{Service, ServiceGenerator};

/// Declarative mirror of a [`Builder`], loadable from a checked-in TOML
/// document. Every field defaults, so a partial manifest is valid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildManifest {
    /// protobuf files to compile
    pub files: Vec<String>,
    /// protobuf include dirs
    pub includes: Vec<String>,
    /// dir for generated code; defaults to the Cargo OUT_DIR
    pub output: Option<String>,
    /// attribute groups applied at every target kind
    pub attrs: Vec<BuildOption>,
    /// attribute groups for messages
    pub messages: Vec<BuildOption>,
    /// attribute groups for enums
    pub enums: Vec<BuildOption>,
    /// attribute groups for fields
    pub fields: Vec<BuildOption>,
    /// field paths generated as `bytes::Bytes`
    pub bytes: Vec<String>,
    /// map field paths generated as `BTreeMap`
    pub btree_maps: Vec<String>,
}

/// One group of attributes attached to a set of paths.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOption {
    /// paths the attributes attach to
    pub paths: Vec<String>,
    /// what this option is for; informational only
    pub description: String,
    /// attributes without the `#[...]` wrapper, e.g. `derive(Eq)`
    pub attrs: Vec<String>,
}

impl BuildManifest {
    /// Parse a manifest from TOML text.
    pub fn from_toml(content: &str) -> std::result::Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a manifest file.
    pub fn from_path(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::ManifestIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Feed the manifest into a fresh [`Builder`].
    pub fn into_builder(self) -> Builder {
        Builder::from(self)
    }
}

impl From<BuildManifest> for Builder {
    fn from(manifest: BuildManifest) -> Self {
        let mut builder = Builder::new()
            .files(manifest.files)
            .includes(manifest.includes);
        if let Some(output) = manifest.output {
            builder = builder.output(output);
        }
        for opt in manifest.attrs {
            for path in &opt.paths {
                for attr in &opt.attrs {
                    builder = builder.attribute(path.clone(), wrap_attr(attr));
                }
            }
        }
        for opt in manifest.messages {
            for path in &opt.paths {
                for attr in &opt.attrs {
                    builder = builder.message_attribute(path.clone(), wrap_attr(attr));
                }
            }
        }
        for opt in manifest.enums {
            for path in &opt.paths {
                for attr in &opt.attrs {
                    builder = builder.enum_attribute(path.clone(), wrap_attr(attr));
                }
            }
        }
        for opt in manifest.fields {
            for path in &opt.paths {
                for attr in &opt.attrs {
                    builder = builder.field_attribute(path.clone(), wrap_attr(attr));
                }
            }
        }
        for path in manifest.bytes {
            builder = builder.bytes(path);
        }
        for path in manifest.btree_maps {
            builder = builder.btree_map(path);
        }
        builder
    }
}

fn wrap_attr(attr: &str) -> String {
    format!("#[{attr}]")
}
