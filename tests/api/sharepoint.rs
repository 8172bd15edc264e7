use anyhow::Result;
use serde_json::{Value, json};
use spdg_cli::api::SharePointClient;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn search_page(total_rows: u64, paths: &[&str]) -> Value {
    let rows: Vec<Value> = paths
        .iter()
        .map(|p| {
            json!({
                "Cells": [
                    { "Key": "Rank", "Value": "16.5", "ValueType": "Edm.Double" },
                    { "Key": "Path", "Value": p, "ValueType": "Edm.String" }
                ]
            })
        })
        .collect();

    json!({
        "PrimaryQueryResult": {
            "RelevantResults": {
                "RowCount": paths.len(),
                "TotalRows": total_rows,
                "Table": { "Rows": rows }
            }
        }
    })
}

#[tokio::test]
async fn test_site_search_pages_by_start_row() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/_api/search/query"))
        .and(query_param("startrow", "0"))
        .and(header("accept", "application/json;odata=nometadata"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(
            3,
            &[
                "https://contoso.sharepoint.com/sites/hr",
                "https://contoso.sharepoint.com/sites/finance",
            ],
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/_api/search/query"))
        .and(query_param("startrow", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(search_page(3, &["https://contoso.sharepoint.com/sites/legal"])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = SharePointClient::new(server.uri(), "token".to_string());
    let sites = client.get_all_site_collections().await?;

    assert_eq!(
        sites,
        vec![
            "https://contoso.sharepoint.com/sites/hr",
            "https://contoso.sharepoint.com/sites/finance",
            "https://contoso.sharepoint.com/sites/legal"
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_site_search_stops_on_empty_page() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/_api/search/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(10, &[])))
        .expect(1)
        .mount(&server)
        .await;

    let client = SharePointClient::new(server.uri(), "token".to_string());
    assert!(client.get_all_site_collections().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_create_site_collection_posts_request() -> Result<()> {
    let server = MockServer::start().await;
    let site_url = format!("{}/sites/northwind-traders-berlin", server.uri());

    Mock::given(method("POST"))
        .and(path("/_api/SPSiteManager/create"))
        .and(body_partial_json(json!({
            "request": {
                "Title": "Northwind Traders Berlin",
                "Url": site_url,
                "Lcid": 1033,
                "WebTemplate": "STS#3",
                "Owner": "admin@contoso.onmicrosoft.com"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "SiteId": "5b0d2f3e-0000-4000-8000-000000000001",
            "SiteStatus": 2,
            "SiteUrl": site_url
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = SharePointClient::new(server.uri(), "token".to_string());
    let status = client
        .create_site_collection(
            "Northwind Traders Berlin",
            "northwind-traders-berlin",
            "admin@contoso.onmicrosoft.com",
        )
        .await?;

    assert_eq!(status.site_status, 2);
    assert_eq!(status.site_url.as_deref(), Some(site_url.as_str()));
    Ok(())
}

#[tokio::test]
async fn test_create_site_collection_error_status() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/_api/SPSiteManager/create"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "SiteId": null,
            "SiteStatus": 3,
            "SiteUrl": null
        })))
        .mount(&server)
        .await;

    let client = SharePointClient::new(server.uri(), "token".to_string());
    let result = client.create_site_collection("Litware Oslo", "litware-oslo", "owner").await;

    assert!(result.is_err());
    Ok(())
}

#[tokio::test]
async fn test_create_site_collection_http_failure() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/_api/SPSiteManager/create"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Access denied"))
        .mount(&server)
        .await;

    let client = SharePointClient::new(server.uri(), "token".to_string());
    let err = client
        .create_site_collection("Litware Oslo", "litware-oslo", "owner")
        .await
        .unwrap_err();

    assert!(err.to_string().contains("403"));
    Ok(())
}
