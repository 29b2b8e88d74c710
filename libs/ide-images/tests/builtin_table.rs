//! Behaviour of the built-in table as seen by a provisioning consumer.

use std::io::Write;
use std::sync::Arc;

use rstest::rstest;
use wsp_ide_images::{ids, IdeImageError, IdeImageTable, TagSource};

/// Stand-in for a provisioning component that receives the table injected.
struct Provisioner {
    images: Arc<IdeImageTable>,
    registry: String,
}

impl Provisioner {
    fn image_for(&self, ide: &str) -> Result<String, IdeImageError> {
        self.images
            .image_reference(ide, &self.registry, "latest")
            .map(|reference| reference.to_string())
    }
}

#[rstest]
#[case(ids::CODE, "ide/code")]
#[case(ids::CODE_HELPER, "ide/code-codehelper")]
#[case(ids::CODE_WEB_EXTENSION, "ide/gitpod-code-web")]
#[case(ids::CODE_DESKTOP, "ide/code-desktop")]
#[case(ids::CODE_DESKTOP_INSIDERS, "ide/code-desktop-insiders")]
#[case(ids::XTERM, "ide/xterm-web")]
#[case(ids::INTELLIJ, "ide/intellij")]
#[case(ids::GOLAND, "ide/goland")]
#[case(ids::PYCHARM, "ide/pycharm")]
#[case(ids::PHPSTORM, "ide/phpstorm")]
#[case(ids::RUBYMINE, "ide/rubymine")]
#[case(ids::WEBSTORM, "ide/webstorm")]
#[case(ids::RIDER, "ide/rider")]
#[case(ids::CLION, "ide/clion")]
#[case(ids::JB_BACKEND_PLUGIN, "ide/jb-backend-plugin")]
#[case(ids::JB_LAUNCHER, "ide/jb-launcher")]
fn builtin_lookup(#[case] identifier: &str, #[case] expected: &str) {
    let table = IdeImageTable::builtin();
    assert_eq!(table.lookup(identifier).unwrap().as_str(), expected);
}

#[rstest]
#[case(ids::CODE, Some("commit-98471ed07f0fb36bce9dc78a2aea15aaeb058cdd"))]
#[case(ids::CODE_WEB_EXTENSION, Some("commit-11506211281adf4b61b4f0111e87963b202f5d80"))]
#[case(ids::CODE_DESKTOP, None)]
#[case(ids::GOLAND, None)]
#[case(ids::INTELLIJ, None)]
#[case(ids::JB_LAUNCHER, None)]
fn builtin_pinned_version(#[case] identifier: &str, #[case] expected: Option<&str>) {
    let table = IdeImageTable::builtin();
    assert_eq!(table.pinned_version(identifier), expected);
}

#[test]
fn builtin_has_sixteen_entries_with_two_pinned() {
    let table = IdeImageTable::builtin();
    assert_eq!(table.len(), 16);
    assert_eq!(table.pinned().count(), 2);
}

#[test]
fn provisioner_uses_injected_table() {
    let provisioner = Provisioner {
        images: Arc::new(IdeImageTable::builtin()),
        registry: "registry.example.com/build".to_string(),
    };

    assert_eq!(
        provisioner.image_for(ids::GOLAND).unwrap(),
        "registry.example.com/build/ide/goland:latest"
    );
    assert!(provisioner.image_for("emacs").unwrap_err().is_unknown_identifier());

    let substitute = IdeImageTable::from_toml_str(
        r#"
        [[ide]]
        identifier = "goland"
        image_repository = "ide/goland"
        pinned_version = "2024.1"
        "#,
    )
    .unwrap();
    let provisioner = Provisioner {
        images: Arc::new(substitute),
        registry: "localhost:5000".to_string(),
    };

    assert_eq!(
        provisioner.image_for(ids::GOLAND).unwrap(),
        "localhost:5000/ide/goland:2024.1"
    );
    assert!(provisioner.image_for(ids::CODE).is_err());
}

#[test]
fn reference_reports_tag_source() {
    let table = IdeImageTable::builtin();

    let reference = table
        .image_reference(ids::CODE_WEB_EXTENSION, "r.example.com", "latest")
        .unwrap();
    assert_eq!(reference.tag_source, TagSource::Pinned);
    assert_eq!(reference.tag, "commit-11506211281adf4b61b4f0111e87963b202f5d80");

    let reference = table
        .image_reference(ids::RIDER, "r.example.com", "latest")
        .unwrap();
    assert_eq!(reference.tag_source, TagSource::Default);
}

#[test]
fn load_table_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[[ide]]
identifier = "code"
image_repository = "ide/code"
pinned_version = "commit-0123abc"

[[ide]]
identifier = "xterm"
image_repository = "ide/xterm-web"
"#
    )
    .unwrap();

    let table = IdeImageTable::from_path(file.path()).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.pinned_version(ids::CODE), Some("commit-0123abc"));
    assert_eq!(table.lookup(ids::XTERM).unwrap().name(), "xterm-web");
}

#[test]
fn load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = IdeImageTable::from_path(dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, IdeImageError::Io { .. }));
}

#[test]
fn load_duplicate_repository_is_rejected() {
    let err = IdeImageTable::from_toml_str(
        r#"
        [[ide]]
        identifier = "code"
        image_repository = "ide/code"

        [[ide]]
        identifier = "code-stable"
        image_repository = "ide/code"
        "#,
    )
    .unwrap_err();
    assert!(err.is_validation_error());
}
