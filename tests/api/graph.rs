use anyhow::Result;
use serde_json::{Value, json};
use spdg_cli::api::{GraphClient, NewGroup};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn group(name: &str) -> NewGroup {
    NewGroup {
        display_name: name.to_string(),
        mail_nickname: name.to_lowercase().replace(' ', ""),
        mail_enabled: false,
        security_enabled: true,
    }
}

/// Answer every sub-request of a batch, failing the ids in `failing`
fn batch_responder(failing: &'static [&'static str]) -> impl Fn(&Request) -> ResponseTemplate + Send + Sync {
    move |request: &Request| {
        let body: Value = serde_json::from_slice(&request.body).unwrap_or_default();
        let responses: Vec<Value> = body["requests"]
            .as_array()
            .map(|requests| {
                requests
                    .iter()
                    .map(|r| {
                        let id = r["id"].as_str().unwrap_or_default();
                        if failing.contains(&id) {
                            json!({
                                "id": id,
                                "status": 400,
                                "body": { "error": { "code": "Request_BadRequest", "message": "Another object with the same value for property mailNickname already exists." } }
                            })
                        } else {
                            json!({ "id": id, "status": 201, "body": { "id": format!("object-{}", id) } })
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        ResponseTemplate::new(200).set_body_json(json!({ "responses": responses }))
    }
}

#[tokio::test]
async fn test_default_domain_from_organization() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1.0/organization"))
        .and(header("authorization", "Bearer token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{
                "id": "tenant-id",
                "displayName": "Contoso",
                "verifiedDomains": [
                    { "name": "contoso.com", "isDefault": false },
                    { "name": "contoso.onmicrosoft.com", "isDefault": true }
                ]
            }]
        })))
        .mount(&server)
        .await;

    let client = GraphClient::with_base_url(server.uri(), "token".to_string());
    assert_eq!(client.default_domain().await?, "contoso.onmicrosoft.com");
    Ok(())
}

#[tokio::test]
async fn test_missing_default_domain_is_an_error() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1.0/organization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{ "verifiedDomains": [{ "name": "contoso.com", "isDefault": false }] }]
        })))
        .mount(&server)
        .await;

    let client = GraphClient::with_base_url(server.uri(), "token".to_string());
    assert!(client.default_domain().await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_users_follow_next_link() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1.0/users"))
        .and(query_param("$top", "999"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [
                { "userPrincipalName": "ada.lovelace@contoso.onmicrosoft.com" },
                { "userPrincipalName": "alan.turing@contoso.onmicrosoft.com" }
            ],
            "@odata.nextLink": format!("{}/v1.0/users?$skiptoken=page2", server.uri())
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1.0/users"))
        .and(query_param("$skiptoken", "page2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{ "userPrincipalName": "grace.hopper@contoso.onmicrosoft.com" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GraphClient::with_base_url(server.uri(), "token".to_string());
    let users = client.list_user_principal_names().await?;

    assert_eq!(
        users,
        vec![
            "ada.lovelace@contoso.onmicrosoft.com",
            "alan.turing@contoso.onmicrosoft.com",
            "grace.hopper@contoso.onmicrosoft.com"
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_groups_without_display_name_are_skipped() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1.0/groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{ "displayName": "Finance" }, { "displayName": null }, { "displayName": "Legal" }]
        })))
        .mount(&server)
        .await;

    let client = GraphClient::with_base_url(server.uri(), "token".to_string());
    assert_eq!(client.list_group_display_names().await?, vec!["Finance", "Legal"]);
    Ok(())
}

#[tokio::test]
async fn test_save_changes_chunks_batches() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1.0/$batch"))
        .respond_with(batch_responder(&[]))
        .expect(3)
        .mount(&server)
        .await;

    let mut client = GraphClient::with_base_url(server.uri(), "token".to_string());
    for i in 0..45 {
        client.add_group(group(&format!("Group {}", i)))?;
    }
    assert_eq!(client.pending_count(), 45);

    let results = client.save_changes().await?;

    assert_eq!(results.len(), 45);
    assert!(results.iter().all(|r| r.is_success()));
    assert_eq!(client.pending_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_failed_sub_request_fails_commit() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1.0/$batch"))
        .respond_with(batch_responder(&["2"]))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = GraphClient::with_base_url(server.uri(), "token".to_string());
    client.add_group(group("Finance"))?;
    client.add_group(group("Legal"))?;
    client.add_group(group("Sales"))?;

    let err = client.save_changes().await.unwrap_err();
    let message = err.to_string();

    assert!(message.contains("1 of 3 operations failed"));
    assert!(message.contains("Legal"));
    assert_eq!(client.pending_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_empty_commit_sends_nothing() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1.0/$batch"))
        .respond_with(batch_responder(&[]))
        .expect(0)
        .mount(&server)
        .await;

    let mut client = GraphClient::with_base_url(server.uri(), "token".to_string());
    assert!(client.save_changes().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_failed_batch_request_still_sends_later_chunks() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1.0/$batch"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service unavailable"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1.0/$batch"))
        .respond_with(batch_responder(&[]))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = GraphClient::with_base_url(server.uri(), "token".to_string());
    for i in 0..25 {
        client.add_group(group(&format!("Group {}", i)))?;
    }

    let err = client.save_changes().await.unwrap_err();
    let message = err.to_string();

    assert!(message.contains("20 of 25 operations were not sent"), "{}", message);
    assert!(message.contains("HTTP 503"));
    assert_eq!(client.pending_count(), 0);
    Ok(())
}
