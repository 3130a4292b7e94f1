// Integration tests for the configuration -> orchestration flow.
//
// A recording session stands in for prost-build, capturing every directive
// the orchestrator issues so the sequence can be asserted without invoking
// protoc.

use std::io;
use std::path::{Path, PathBuf};

use protoforge_build::{
    apply_config, AttrTarget, BuildConfig, BuildError, FieldRepr, GeneratorSession, Service,
    ServiceGenerator,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Directive {
    Attribute(AttrTarget, String, String),
    Representation(String, FieldRepr),
}

#[derive(Default)]
struct RecordingSession {
    output_dir: Option<PathBuf>,
    directives: Vec<Directive>,
    service_generator_installed: bool,
    compiled: Vec<(Vec<PathBuf>, Vec<PathBuf>)>,
    fail_compile: bool,
}

impl GeneratorSession for RecordingSession {
    fn set_output_dir(&mut self, dir: &Path) {
        self.output_dir = Some(dir.to_path_buf());
    }

    fn attach_attribute(&mut self, target: AttrTarget, pattern: &str, attribute: &str) {
        self.directives.push(Directive::Attribute(
            target,
            pattern.to_string(),
            attribute.to_string(),
        ));
    }

    fn set_field_representation(&mut self, pattern: &str, repr: FieldRepr) {
        self.directives
            .push(Directive::Representation(pattern.to_string(), repr));
    }

    fn set_service_generator(&mut self, _service_generator: Box<dyn ServiceGenerator>) {
        self.service_generator_installed = true;
    }

    fn compile(&mut self, files: &[PathBuf], includes: &[PathBuf]) -> Result<(), BuildError> {
        if self.fail_compile {
            return Err(BuildError::Compile(io::Error::new(
                io::ErrorKind::InvalidData,
                "a.proto:3:1: expected type name",
            )));
        }
        self.compiled.push((files.to_vec(), includes.to_vec()));
        Ok(())
    }
}

struct NullServiceGen;

impl ServiceGenerator for NullServiceGen {
    fn generate(&mut self, _service: Service, _buf: &mut String) {}
}

#[test]
fn single_attribute_build_issues_one_directive() {
    let out = tempfile::tempdir().unwrap();
    let config = BuildConfig::builder()
        .file("a.proto")
        .output(out.path())
        .message_attribute("pkg.Msg", "#[derive(Eq)]")
        .build()
        .unwrap();

    let mut session = RecordingSession::default();
    apply_config(&mut session, config).unwrap();
    session
        .compile(&[PathBuf::from("a.proto")], &[])
        .unwrap();

    assert_eq!(session.output_dir.as_deref(), Some(out.path()));
    assert_eq!(
        session.directives,
        vec![Directive::Attribute(
            AttrTarget::Type,
            "pkg.Msg".to_string(),
            "#[derive(Eq)]".to_string()
        )]
    );
    assert_eq!(
        session.compiled,
        vec![(vec![PathBuf::from("a.proto")], vec![])]
    );
    assert!(!session.service_generator_installed);
}

#[test]
fn all_paths_attributes_feed_both_hooks() {
    let out = tempfile::tempdir().unwrap();
    let config = BuildConfig::builder()
        .output(out.path())
        .attribute(".", "#[derive(Eq)]")
        .build()
        .unwrap();

    let mut session = RecordingSession::default();
    apply_config(&mut session, config).unwrap();

    assert_eq!(
        session.directives,
        vec![
            Directive::Attribute(AttrTarget::Type, ".".to_string(), "#[derive(Eq)]".to_string()),
            Directive::Attribute(AttrTarget::Field, ".".to_string(), "#[derive(Eq)]".to_string()),
        ]
    );
}

#[test]
fn directives_replay_in_registration_order() {
    let out = tempfile::tempdir().unwrap();
    let config = BuildConfig::builder()
        .output(out.path())
        .message_attribute("pkg.Msg", "#[derive(Eq)]")
        .message_attribute("pkg.Msg", "#[derive(Hash)]")
        .enum_attribute("pkg.Kind", "#[derive(Hash)]")
        .field_attribute("pkg.Msg.name", "#[serde(default)]")
        .bytes("pkg.Msg.payload")
        .btree_map("pkg.Msg.index")
        .build()
        .unwrap();

    let mut session = RecordingSession::default();
    apply_config(&mut session, config).unwrap();

    assert_eq!(
        session.directives,
        vec![
            Directive::Attribute(AttrTarget::Type, "pkg.Msg".into(), "#[derive(Eq)]".into()),
            Directive::Attribute(AttrTarget::Type, "pkg.Msg".into(), "#[derive(Hash)]".into()),
            Directive::Attribute(AttrTarget::Type, "pkg.Kind".into(), "#[derive(Hash)]".into()),
            Directive::Attribute(AttrTarget::Field, "pkg.Msg.name".into(), "#[serde(default)]".into()),
            Directive::Representation("pkg.Msg.payload".into(), FieldRepr::Bytes),
            Directive::Representation("pkg.Msg.index".into(), FieldRepr::BtreeMap),
        ]
    );
}

#[test]
fn service_generator_moves_into_session() {
    let out = tempfile::tempdir().unwrap();
    let config = BuildConfig::builder()
        .output(out.path())
        .service_generator(Box::new(NullServiceGen))
        .build()
        .unwrap();
    assert!(config.has_service_generator());

    let mut session = RecordingSession::default();
    apply_config(&mut session, config).unwrap();
    assert!(session.service_generator_installed);
}

#[test]
fn compile_failure_propagates_unchanged() {
    let out = tempfile::tempdir().unwrap();
    let config = BuildConfig::builder()
        .file("a.proto")
        .output(out.path())
        .build()
        .unwrap();

    let mut session = RecordingSession {
        fail_compile: true,
        ..Default::default()
    };
    apply_config(&mut session, config).unwrap();
    let err = session.compile(&[PathBuf::from("a.proto")], &[]).unwrap_err();

    match err {
        BuildError::Compile(source) => {
            assert!(source.to_string().contains("expected type name"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(session.compiled.is_empty());
}

#[test]
fn output_directory_is_created() {
    let out = tempfile::tempdir().unwrap();
    let nested = out.path().join("generated").join("pb");
    let config = BuildConfig::builder().output(&nested).build().unwrap();

    let mut session = RecordingSession::default();
    apply_config(&mut session, config).unwrap();

    assert!(nested.is_dir());
    assert_eq!(session.output_dir, Some(nested));
}
