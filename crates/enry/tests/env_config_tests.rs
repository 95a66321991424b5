//! Loader settings taken from the environment

use std::env;
use std::path::PathBuf;

use enry::{Enry, LoaderConfig};
use enry_ffi::{platform_library_name, LIBRARY_DIR_ENV, LIBRARY_PATH_ENV};
use serial_test::serial;

fn missing_dir() -> PathBuf {
    env::temp_dir().join("enry-env-config-missing")
}

#[test]
#[serial]
fn test_library_path_from_env_is_reported() {
    let path = missing_dir().join("libenry.so");
    env::set_var(LIBRARY_PATH_ENV, &path);
    let mut config = LoaderConfig::from_env();
    env::remove_var(LIBRARY_PATH_ENV);

    assert_eq!(config.library_path.as_deref(), Some(path.as_path()));

    config.library_name = "enry-env-config-missing".to_string();
    config.development_layout = false;
    let err = Enry::locate(&config).unwrap_err();
    assert_eq!(err.attempted.first(), Some(&path));
    assert!(err.to_string().contains(&path.display().to_string()));
}

#[test]
#[serial]
fn test_library_dir_from_env_is_searched_first() {
    let dir = missing_dir();
    env::set_var(LIBRARY_DIR_ENV, &dir);
    let mut config = LoaderConfig::from_env();
    env::remove_var(LIBRARY_DIR_ENV);

    config.library_name = "enry-env-config-missing".to_string();
    config.development_layout = false;
    let err = Enry::locate(&config).unwrap_err();
    assert_eq!(
        err.attempted.first(),
        Some(&dir.join(platform_library_name("enry-env-config-missing")))
    );
}
