//! Configuration loading and precedence.

use gql_fetch::config::{
    Config, EndpointConfig, RuntimeMode, ENV_AUTHORIZATION, ENV_ENDPOINT, ENV_HOST_URI, ENV_MODE,
};
use gql_fetch::query::resolve_url;
use tempfile::tempdir;

#[test]
fn test_load_config_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[endpoint]
host_uri = "https://publish.example.com"
endpoint = "/content/graphql/global"
"#,
    )
    .unwrap();

    let config = Config::load_from_file(&path).unwrap();

    assert_eq!(config.endpoint.mode(), RuntimeMode::Other);
    assert_eq!(
        resolve_url(&config.endpoint),
        "https://publish.example.com/content/graphql/global"
    );
    assert_eq!(config.endpoint.credential(), None);
}

#[test]
fn test_cli_style_override_of_file_values() {
    let mut from_file = EndpointConfig::new(RuntimeMode::Other, "https://a.example", "/graphql");
    let from_cli = EndpointConfig {
        mode: Some(RuntimeMode::Development),
        ..Default::default()
    };

    from_file.merge(&from_cli);

    assert_eq!(resolve_url(&from_file), "/graphql");
}

/// The only test that touches the process environment.
#[test]
fn test_env_fills_unset_values() {
    std::env::set_var(ENV_MODE, "development");
    std::env::set_var(ENV_HOST_URI, "http://localhost:4502");
    std::env::set_var(ENV_ENDPOINT, "/env/graphql");
    std::env::set_var(ENV_AUTHORIZATION, "admin:admin");

    let from_env = EndpointConfig::from_env();

    let mut explicit = EndpointConfig::new(RuntimeMode::Other, "https://x.example", "/explicit");
    explicit.apply_env_defaults();

    // File says development, command line says other.
    let cli_over_file = EndpointConfig::resolve(
        EndpointConfig::new(RuntimeMode::Development, "https://x.example", "/graphql"),
        &EndpointConfig {
            mode: Some(RuntimeMode::Other),
            ..Default::default()
        },
    );

    // File says other, command line is silent.
    let file_over_env = EndpointConfig::resolve(
        EndpointConfig::new(RuntimeMode::Other, "https://x.example", "/graphql"),
        &EndpointConfig::default(),
    );

    // Neither layer sets a mode.
    let env_only_mode = EndpointConfig::resolve(
        EndpointConfig {
            endpoint: Some("/graphql".to_string()),
            ..Default::default()
        },
        &EndpointConfig::default(),
    );

    for var in [ENV_MODE, ENV_HOST_URI, ENV_ENDPOINT, ENV_AUTHORIZATION] {
        std::env::remove_var(var);
    }

    assert_eq!(from_env.mode, Some(RuntimeMode::Development));
    assert_eq!(from_env.host_uri.as_deref(), Some("http://localhost:4502"));
    assert_eq!(from_env.endpoint.as_deref(), Some("/env/graphql"));
    assert_eq!(from_env.credential(), Some("admin:admin"));

    // Explicit values win; the missing credential is filled in.
    assert_eq!(explicit.mode(), RuntimeMode::Other);
    assert_eq!(explicit.host_uri.as_deref(), Some("https://x.example"));
    assert_eq!(explicit.endpoint.as_deref(), Some("/explicit"));
    assert_eq!(explicit.credential(), Some("admin:admin"));

    assert_eq!(cli_over_file.mode(), RuntimeMode::Other);
    assert_eq!(resolve_url(&cli_over_file), "https://x.example/graphql");

    assert_eq!(file_over_env.mode(), RuntimeMode::Other);
    assert_eq!(resolve_url(&file_over_env), "https://x.example/graphql");

    assert_eq!(env_only_mode.mode(), RuntimeMode::Development);
    assert_eq!(resolve_url(&env_only_mode), "/graphql");
}
