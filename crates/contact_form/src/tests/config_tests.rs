use super::{load_settings_from, normalize_api_base_url, prepare_api_base_url, Settings};

use std::{
    collections::HashMap,
    env, fs,
    path::Path,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_to_no_base_url() {
    let settings = load_settings_from(Path::new("definitely/not/here.toml"), env_from(&[]));
    assert_eq!(settings, Settings::default());
    assert!(settings.api_base_url.is_none());
}

#[test]
fn reads_base_url_from_file_and_env_overrides_it() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("storefront_settings_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("storefront.toml");
    fs::write(&path, "api_base_url = \"https://file.example.com\"\n").expect("write settings");

    let settings = load_settings_from(&path, env_from(&[]));
    assert_eq!(
        settings.api_base_url.as_deref(),
        Some("https://file.example.com")
    );

    let settings = load_settings_from(
        &path,
        env_from(&[("API_BASE_URL", "https://env.example.com")]),
    );
    assert_eq!(settings.api_base_url.as_deref(), Some("https://env.example.com"));

    let settings = load_settings_from(
        &path,
        env_from(&[
            ("API_BASE_URL", "https://env.example.com"),
            ("APP__API_BASE_URL", "https://app.example.com"),
        ]),
    );
    assert_eq!(settings.api_base_url.as_deref(), Some("https://app.example.com"));

    fs::remove_dir_all(temp_root).expect("cleanup");
}

#[test]
fn unreadable_settings_file_is_ignored() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("storefront_settings_bad_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("storefront.toml");
    fs::write(&path, "this is = = not toml").expect("write settings");

    let settings = load_settings_from(&path, env_from(&[]));
    assert!(settings.api_base_url.is_none());

    fs::remove_dir_all(temp_root).expect("cleanup");
}

#[test]
fn normalizes_trailing_slashes_and_whitespace() {
    assert_eq!(
        normalize_api_base_url("  https://api.example.com/v1//  "),
        "https://api.example.com/v1"
    );
}

#[test]
fn prepares_valid_http_urls() {
    assert_eq!(
        prepare_api_base_url("https://api.example.com/").expect("prepare"),
        "https://api.example.com"
    );
    assert_eq!(
        prepare_api_base_url("http://127.0.0.1:8080").expect("prepare"),
        "http://127.0.0.1:8080"
    );
}

#[test]
fn rejects_empty_relative_and_non_http_urls() {
    assert!(prepare_api_base_url("   ").is_err());
    assert!(prepare_api_base_url("/api").is_err());
    let err = prepare_api_base_url("ftp://files.example.com").expect_err("should fail");
    assert!(err.to_string().contains("http or https"), "{err}");
}
