//! Sizing profile loading tests.
//!
//! Covers file discovery errors, TOML syntax errors and a full profile
//! round through `ConfigLoader::load`.

use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use vpmem_common::config::{ConfigError, ConfigLoader, LogLevel, SizingProfile};
use vpmem_common::partition::PartitionKind;

#[test]
fn profile_file_not_found() {
    let result = SizingProfile::load(Path::new("/nonexistent/path/lpar.toml"));
    assert!(matches!(result, Err(ConfigError::FileNotFound)));
}

#[test]
fn profile_parse_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[partition\nkind = ").unwrap();

    let result = SizingProfile::load(file.path());
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn profile_full_load() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[shared]
log_level = "debug"

[partition]
kind = "linux"
memory_gb = 1000
luns = ["6000", "3x1000"]
"#
    )
    .unwrap();
    file.flush().unwrap();

    let profile = SizingProfile::load(file.path()).unwrap();
    profile.validate().unwrap();
    assert_eq!(profile.shared.log_level, LogLevel::Debug);
    assert_eq!(profile.partition.kind, Some(PartitionKind::Linux));
    assert_eq!(profile.partition.memory_gb, Some(1000));
    assert_eq!(profile.partition.luns, vec!["6000", "3x1000"]);
}

#[test]
fn profile_partial_load_keeps_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[partition]\nkind = \"ibmi\"\n").unwrap();
    file.flush().unwrap();

    let profile = SizingProfile::load(file.path()).unwrap();
    assert_eq!(profile.shared.log_level, LogLevel::Info);
    assert_eq!(profile.partition.kind, Some(PartitionKind::Ibmi));
    assert!(profile.partition.memory_gb.is_none());
}

#[test]
fn profile_unknown_partition_kind_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[partition]\nkind = \"zos\"\n").unwrap();
    file.flush().unwrap();

    let result = SizingProfile::load(file.path());
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}
