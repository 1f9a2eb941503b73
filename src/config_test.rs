use super::*;

// =============================================================================
// Env manipulation requires unsafe in edition 2024. These tests run serially
// (single test thread) to avoid env races.
// =============================================================================

/// # Safety
/// Tests must run with `--test-threads=1` to avoid env races.
unsafe fn clear_weiqi_env() {
    unsafe {
        std::env::remove_var("WEIQI_BASE_URL");
        std::env::remove_var("WEIQI_TIMEOUT_SECS");
    }
}

#[test]
fn default_matches_fixed_constants() {
    let config = ClientConfig::default();
    assert_eq!(config.base_url, "http://localhost:8080");
    assert_eq!(config.timeout, Duration::from_secs(10));
}

#[test]
fn new_trims_trailing_slash() {
    let config = ClientConfig::new("http://example.com:9000/");
    assert_eq!(config.base_url, "http://example.com:9000");
}

#[test]
fn from_env_unset_uses_defaults() {
    unsafe { clear_weiqi_env() };
    let config = ClientConfig::from_env();
    assert_eq!(config.base_url, "http://localhost:8080");
    assert_eq!(config.timeout, Duration::from_secs(10));
}

#[test]
fn from_env_reads_base_url_and_timeout() {
    unsafe {
        clear_weiqi_env();
        std::env::set_var("WEIQI_BASE_URL", "http://weiqi.test:8081/");
        std::env::set_var("WEIQI_TIMEOUT_SECS", "30");
    }
    let config = ClientConfig::from_env();
    assert_eq!(config.base_url, "http://weiqi.test:8081");
    assert_eq!(config.timeout, Duration::from_secs(30));
    unsafe { clear_weiqi_env() };
}

#[test]
fn from_env_malformed_timeout_falls_back() {
    unsafe {
        clear_weiqi_env();
        std::env::set_var("WEIQI_TIMEOUT_SECS", "soon");
    }
    let config = ClientConfig::from_env();
    assert_eq!(config.timeout, Duration::from_secs(10));
    unsafe { clear_weiqi_env() };
}

#[test]
fn from_env_zero_timeout_falls_back() {
    unsafe {
        clear_weiqi_env();
        std::env::set_var("WEIQI_TIMEOUT_SECS", "0");
    }
    let config = ClientConfig::from_env();
    assert_eq!(config.timeout, Duration::from_secs(10));
    unsafe { clear_weiqi_env() };
}
