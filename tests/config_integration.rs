use portal_shell::config::AppConfig;
use serial_test::serial;
use std::env;
use std::fs;

// Helper to clear environment variables that might interfere with tests
fn clear_env_vars() {
    unsafe {
        env::remove_var("PORTAL_ROUTING__FIRST_MATCH_ONLY");
        env::remove_var("PORTAL_ROUTING__CATCH_ALL_ENABLED");
        env::remove_var("PORTAL_UI__TITLE");
        env::remove_var("CONFIG_FILE");
        env::remove_var("FIRST_MATCH_ONLY");
        env::remove_var("CATCH_ALL_ENABLED");
    }
}

#[test]
#[serial]
fn test_default_config() {
    clear_env_vars();

    let config = AppConfig::load_from_args(["portal-shell"]).expect("defaults load");
    assert!(!config.routing.first_match_only);
    assert!(!config.routing.catch_all_enabled);
    assert_eq!(config.ui.title, "Portal");
}

#[test]
#[serial]
fn test_env_override() {
    clear_env_vars();
    unsafe {
        env::set_var("PORTAL_ROUTING__FIRST_MATCH_ONLY", "true");
        env::set_var("PORTAL_UI__TITLE", "Acme Portal");
    }

    let config = AppConfig::load_from_args(["portal-shell"]).expect("load with env");
    assert!(config.routing.first_match_only);
    assert_eq!(config.ui.title, "Acme Portal");

    clear_env_vars();
}

#[test]
#[serial]
fn test_file_load() {
    clear_env_vars();

    let dir = tempfile::tempdir().expect("tempdir");
    let file_path = dir.path().join("portal.yaml");
    fs::write(
        &file_path,
        "routing:\n  catch_all_enabled: true\nui:\n  title: File Portal\n",
    )
    .expect("write temp config");

    let config = AppConfig::load_from_args([
        "portal-shell",
        "--config",
        file_path.to_str().expect("utf8 path"),
    ])
    .expect("load from file");

    assert!(config.routing.catch_all_enabled);
    assert_eq!(config.ui.title, "File Portal");

    clear_env_vars();
}

#[test]
#[serial]
fn test_cli_beats_env() {
    clear_env_vars();
    unsafe {
        env::set_var("PORTAL_ROUTING__CATCH_ALL_ENABLED", "true");
    }

    let config =
        AppConfig::load_from_args(["portal-shell", "--catch-all-enabled", "false"])
            .expect("load");
    assert!(!config.routing.catch_all_enabled);

    clear_env_vars();
}
