use anyhow::Result;
use spdg_cli::api::constants::GRAPH_HOST;
use spdg_cli::api::{AuthManager, ClientManager, CredentialSet};
use spdg_cli::auth::Credentials;
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn password_credentials() -> CredentialSet {
    CredentialSet::UsernamePassword {
        username: "admin@contoso.onmicrosoft.com".to_string(),
        password: "secret".to_string(),
        client_id: "client-id".to_string(),
        client_secret: None,
    }
}

#[tokio::test]
async fn test_password_grant_is_cached_per_resource() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=password"))
        .and(body_string_contains("resource=https%3A%2F%2Fgraph.microsoft.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token_type": "Bearer",
            "expires_in": "3599",
            "access_token": "graph-token"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut auth = AuthManager::with_token_url("contoso", format!("{}/token", server.uri()));
    let credentials = password_credentials();

    assert_eq!(auth.access_token(GRAPH_HOST, &credentials).await?, "graph-token");
    assert_eq!(auth.access_token(GRAPH_HOST, &credentials).await?, "graph-token");
    assert!(!auth.get_token(GRAPH_HOST)?.is_expired());
    Ok(())
}

#[tokio::test]
async fn test_password_grant_failure_is_reported() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "AADSTS50126: Invalid username or password."
        })))
        .mount(&server)
        .await;

    let mut auth = AuthManager::with_token_url("contoso", format!("{}/token", server.uri()));
    let err = auth
        .access_token(GRAPH_HOST, &password_credentials())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("invalid_grant"));
    assert!(auth.get_token(GRAPH_HOST).is_err());
    Ok(())
}

#[tokio::test]
async fn test_access_token_is_used_as_is() -> Result<()> {
    let mut auth = AuthManager::with_token_url("contoso", "http://127.0.0.1:9/unused");
    let credentials = CredentialSet::AccessToken {
        token: "pre-issued".to_string(),
    };

    assert_eq!(auth.access_token(GRAPH_HOST, &credentials).await?, "pre-issued");
    Ok(())
}

#[tokio::test]
#[ignore] // Requires real credentials in .env
async fn test_auth_with_real_credentials() -> Result<()> {
    let tenant = Credentials::from_env_file(".env")?;
    let mut manager = ClientManager::new(tenant);

    manager.test_authentication().await?;
    Ok(())
}
