//! Unit tests for session configuration parsing.

use super::fingerprint::key_fingerprint;
use super::*;
use mockable::MockEnv;
use rstest::rstest;
use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;

fn key_file(len: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temporary key file");
    file.write_all(&vec![b'a'; len]).expect("write key bytes");
    file
}

fn path_of(file: &NamedTempFile) -> String {
    file.path()
        .to_str()
        .expect("temporary path should be valid UTF-8")
        .to_owned()
}

fn mock_env(vars: HashMap<String, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

fn release_defaults(key_path: &str) -> HashMap<String, String> {
    let mut vars = HashMap::new();
    vars.insert(KEY_FILE_ENV.to_string(), key_path.to_string());
    vars.insert(COOKIE_SECURE_ENV.to_string(), "1".to_string());
    vars.insert(SAMESITE_ENV.to_string(), "Strict".to_string());
    vars.insert(ALLOW_EPHEMERAL_ENV.to_string(), "0".to_string());
    vars
}

fn expect_error(
    result: Result<SessionSettings, SessionConfigError>,
    label: &str,
) -> SessionConfigError {
    match result {
        Ok(_) => panic!("{label}"),
        Err(error) => error,
    }
}

#[rstest]
fn release_missing_cookie_secure_is_rejected() {
    let env = mock_env(HashMap::new());
    let err = expect_error(
        session_settings_from_env(&env, BuildMode::Release),
        "expected missing cookie secure to fail",
    );
    assert!(matches!(
        err,
        SessionConfigError::MissingEnv {
            name: COOKIE_SECURE_ENV
        }
    ));
}

#[rstest]
#[case("maybe")]
#[case("")]
fn release_invalid_cookie_secure_is_rejected(#[case] value: &str) {
    let file = key_file(SESSION_KEY_MIN_LEN);
    let mut vars = release_defaults(&path_of(&file));
    vars.insert(COOKIE_SECURE_ENV.to_string(), value.to_string());
    let env = mock_env(vars);

    let err = expect_error(
        session_settings_from_env(&env, BuildMode::Release),
        "expected invalid cookie secure to fail",
    );
    assert!(matches!(
        err,
        SessionConfigError::InvalidEnv {
            name: COOKIE_SECURE_ENV,
            ..
        }
    ));
}

#[rstest]
fn release_ephemeral_enabled_is_rejected() {
    let file = key_file(SESSION_KEY_MIN_LEN);
    let mut vars = release_defaults(&path_of(&file));
    vars.insert(ALLOW_EPHEMERAL_ENV.to_string(), "1".to_string());
    let env = mock_env(vars);

    let err = expect_error(
        session_settings_from_env(&env, BuildMode::Release),
        "expected ephemeral to be rejected in release",
    );
    assert!(matches!(err, SessionConfigError::EphemeralNotAllowed));
}

#[rstest]
fn release_missing_key_is_rejected() {
    let mut vars = release_defaults("/nonexistent/admin-backend/session_key");
    vars.remove(SECRET_KEY_ENV);
    let env = mock_env(vars);

    let err = expect_error(
        session_settings_from_env(&env, BuildMode::Release),
        "expected missing key file to fail",
    );
    assert!(matches!(err, SessionConfigError::KeyRead { .. }));
}

#[rstest]
fn release_short_key_file_is_rejected() {
    let file = key_file(32);
    let env = mock_env(release_defaults(&path_of(&file)));

    let err = expect_error(
        session_settings_from_env(&env, BuildMode::Release),
        "expected short key to fail",
    );
    assert!(matches!(
        err,
        SessionConfigError::KeyTooShort { length: 32, .. }
    ));
}

#[rstest]
fn release_short_secret_key_is_rejected() {
    let mut vars = release_defaults("/nonexistent/admin-backend/session_key");
    vars.insert(SECRET_KEY_ENV.to_string(), "your_secret_key".to_string());
    let env = mock_env(vars);

    let err = expect_error(
        session_settings_from_env(&env, BuildMode::Release),
        "expected short secret to fail",
    );
    assert!(matches!(
        err,
        SessionConfigError::KeyTooShort { ref origin, .. } if origin == SECRET_KEY_ENV
    ));
}

#[rstest]
fn release_insecure_none_same_site_is_rejected() {
    let file = key_file(SESSION_KEY_MIN_LEN);
    let mut vars = release_defaults(&path_of(&file));
    vars.insert(COOKIE_SECURE_ENV.to_string(), "0".to_string());
    vars.insert(SAMESITE_ENV.to_string(), "None".to_string());
    let env = mock_env(vars);

    let err = expect_error(
        session_settings_from_env(&env, BuildMode::Release),
        "expected insecure SameSite=None to fail",
    );
    assert!(matches!(err, SessionConfigError::InsecureSameSiteNone));
}

#[rstest]
fn release_valid_key_file_succeeds() {
    let file = key_file(SESSION_KEY_MIN_LEN);
    let env = mock_env(release_defaults(&path_of(&file)));

    let settings =
        session_settings_from_env(&env, BuildMode::Release).expect("expected valid settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
    assert_eq!(
        key_fingerprint(&settings.key),
        key_fingerprint(&Key::derive_from(&[b'a'; SESSION_KEY_MIN_LEN]))
    );
}

#[rstest]
fn secret_key_takes_precedence_over_key_file() {
    let file = key_file(SESSION_KEY_MIN_LEN);
    let secret = "s".repeat(SESSION_KEY_MIN_LEN);
    let mut vars = release_defaults(&path_of(&file));
    vars.insert(SECRET_KEY_ENV.to_string(), secret.clone());
    let env = mock_env(vars);

    let settings =
        session_settings_from_env(&env, BuildMode::Release).expect("expected valid settings");
    assert_eq!(
        key_fingerprint(&settings.key),
        key_fingerprint(&Key::derive_from(secret.as_bytes()))
    );
}

#[rstest]
fn debug_defaults_allow_ephemeral_key() {
    let mut vars = HashMap::new();
    vars.insert(
        KEY_FILE_ENV.to_string(),
        "/nonexistent/admin-backend/session_key".to_string(),
    );
    let env = mock_env(vars);
    let settings =
        session_settings_from_env(&env, BuildMode::Debug).expect("debug defaults should succeed");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
fn debug_short_secret_falls_back_to_temporary_key() {
    let mut vars = HashMap::new();
    vars.insert(SECRET_KEY_ENV.to_string(), "short".to_string());
    let env = mock_env(vars);

    let settings = session_settings_from_env(&env, BuildMode::Debug)
        .expect("debug should fall back to a temporary key");
    assert_ne!(
        key_fingerprint(&settings.key),
        key_fingerprint(&Key::derive_from(&[b's'; SESSION_KEY_MIN_LEN]))
    );
}

#[rstest]
fn debug_invalid_same_site_falls_back_to_default() {
    let file = key_file(SESSION_KEY_MIN_LEN);
    let mut vars = release_defaults(&path_of(&file));
    vars.insert(SAMESITE_ENV.to_string(), "unexpected".to_string());
    let env = mock_env(vars);

    let settings = session_settings_from_env(&env, BuildMode::Debug)
        .expect("debug should fall back to defaults");
    assert_eq!(settings.same_site, SameSite::Lax);
}
