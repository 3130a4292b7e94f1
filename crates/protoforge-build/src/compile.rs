// The code-generation orchestrator.
//
// Applies one finalized `BuildConfig` to a fresh generator session, one
// directive category at a time, then invokes compilation. Holds no state
// across calls; a failing compile leaves whatever the generator already
// wrote in the output directory, and the caller must treat the build as
// non-authoritative.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::BuildConfig;
use crate::error::{BuildError, Result};
use crate::session::{AttrTarget, GeneratorSession, ProstSession};

/// Compile `files` against `includes` with the customizations in `config`.
///
/// The configuration is consumed: its service generator, if any, moves into
/// the generator session. Compiler failures are returned wrapped but
/// uninterpreted; nothing is retried or rolled back.
pub fn build_protos(
    files: &[impl AsRef<Path>],
    includes: &[impl AsRef<Path>],
    config: BuildConfig,
) -> Result<()> {
    let files: Vec<PathBuf> = files.iter().map(|p| p.as_ref().to_path_buf()).collect();
    let includes: Vec<PathBuf> = includes.iter().map(|p| p.as_ref().to_path_buf()).collect();

    let mut session = ProstSession::new();
    apply_config(&mut session, config)?;

    debug!(files = files.len(), includes = includes.len(), "compiling protos");
    session.compile(&files, &includes)
}

/// Apply every directive in `config` to `session` without compiling.
///
/// Directive order: output directory, `attrs`, `messages`, `enums`,
/// `fields`, field representations, service generator. Within each
/// registry, entries replay in registration order.
pub fn apply_config(session: &mut dyn GeneratorSession, config: BuildConfig) -> Result<()> {
    let out_dir = resolve_output_dir(config.output(), env::var_os("OUT_DIR").map(PathBuf::from))?;
    fs::create_dir_all(&out_dir).map_err(|source| BuildError::OutputDir {
        dir: out_dir.clone(),
        source,
    })?;
    session.set_output_dir(&out_dir);

    // The all-paths registry feeds both attachment hooks the generator has.
    for (pattern, attr) in config.attrs.iter() {
        session.attach_attribute(AttrTarget::Type, pattern, attr);
        session.attach_attribute(AttrTarget::Field, pattern, attr);
    }
    for (pattern, attr) in config.messages.iter() {
        session.attach_attribute(AttrTarget::Type, pattern, attr);
    }
    for (pattern, attr) in config.enums.iter() {
        session.attach_attribute(AttrTarget::Type, pattern, attr);
    }
    for (pattern, attr) in config.fields.iter() {
        session.attach_attribute(AttrTarget::Field, pattern, attr);
    }
    debug!(
        attrs = config.attrs.len(),
        messages = config.messages.len(),
        enums = config.enums.len(),
        fields = config.fields.len(),
        "applied attribute registries"
    );

    for (pattern, repr) in config.reprs.iter() {
        session.set_field_representation(pattern, repr);
    }
    debug!(overrides = config.reprs.len(), "applied field representation overrides");

    if let Some(service_generator) = config.service_generator {
        session.set_service_generator(service_generator);
        debug!("installed service generator");
    }

    Ok(())
}

/// Resolve the effective output directory from the configured value and the
/// build tool's `OUT_DIR` variable.
fn resolve_output_dir(configured: Option<&Path>, out_dir_env: Option<PathBuf>) -> Result<PathBuf> {
    match configured {
        Some(dir) => Ok(dir.to_path_buf()),
        None => out_dir_env.ok_or(BuildError::NoOutputDir),
    }
}
