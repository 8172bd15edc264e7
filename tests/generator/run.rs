use anyhow::Result;
use serde_json::{Value, json};
use spdg_cli::api::{AuthManager, ClientManager, DeferredSharePoint, GraphClient, SharePointClient};
use spdg_cli::cli::commands::DirectorySubcommands;
use spdg_cli::commands::directory::directory_names;
use spdg_cli::config::TenantConfig;
use spdg_cli::config::Settings;
use spdg_cli::generator::{
    ClientDataGenerator, ClientGeneratorDefinition, PhaseOutcome, SampleData, SiteCollInfo,
};
use std::collections::HashSet;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use super::fakes::{FakeDirectory, FakeSites};

fn definition(users: usize, groups: usize, site_collections: usize) -> ClientGeneratorDefinition {
    let mut def = ClientGeneratorDefinition {
        tenant_name: "contoso".to_string(),
        username: "admin@contoso.onmicrosoft.com".to_string(),
        password: "secret".to_string(),
        ..Default::default()
    };
    def.base.number_of_users_to_create = users;
    def.base.number_of_security_groups_to_create = groups;
    def.base.create_new_site_collections = site_collections;
    def.base.site_collection = "https://contoso.sharepoint.com/sites/dev".to_string();
    def
}

fn generator(
    def: ClientGeneratorDefinition,
    directory: FakeDirectory,
    sites: FakeSites,
) -> ClientDataGenerator<FakeDirectory, FakeSites> {
    ClientDataGenerator::new(def, directory, sites).with_sample_data(SampleData::seeded(42))
}

#[tokio::test]
async fn test_full_run_commits_in_batches_of_fifty() -> Result<()> {
    let mut generator = generator(
        definition(120, 7, 0),
        FakeDirectory::with_domain("contoso.onmicrosoft.com"),
        FakeSites::default(),
    );

    let summary = generator.generate().await;

    let users = summary.users.report().copied().unwrap_or_default();
    assert!(matches!(summary.users, PhaseOutcome::Completed(_)));
    assert_eq!(users.succeeded, 120);
    assert_eq!(users.commits, 3);

    let groups = summary.groups.report().copied().unwrap_or_default();
    assert_eq!(groups.succeeded, 7);
    assert_eq!(groups.commits, 1);

    assert_eq!(
        summary.working_site_collections,
        vec![SiteCollInfo::new("https://contoso.sharepoint.com/sites/dev")]
    );

    let (directory, sites) = generator.into_parts();
    assert_eq!(directory.commits, vec![50, 50, 20, 7]);
    assert_eq!(sites.enumerations, 0);
    Ok(())
}

#[tokio::test]
async fn test_generated_names_are_unique() -> Result<()> {
    let mut generator = generator(
        definition(200, 30, 0),
        FakeDirectory::with_domain("contoso.onmicrosoft.com"),
        FakeSites::default(),
    );

    generator.generate().await;
    let (directory, _) = generator.into_parts();

    let pairs: HashSet<(String, String)> = directory
        .users
        .iter()
        .map(|u| (u.given_name.clone(), u.surname.clone()))
        .collect();
    assert_eq!(pairs.len(), 200);

    let groups: HashSet<&str> = directory.groups.iter().map(|g| g.display_name.as_str()).collect();
    assert_eq!(groups.len(), 30);

    for user in &directory.users {
        assert!(user.user_principal_name.ends_with("@contoso.onmicrosoft.com"));
        assert_eq!(
            user.mail_nickname,
            format!("{}.{}", user.given_name.to_lowercase(), user.surname.to_lowercase())
        );
    }
    Ok(())
}

#[tokio::test]
async fn test_tenant_lookup_failure_skips_only_users() -> Result<()> {
    let mut generator = generator(definition(10, 3, 0), FakeDirectory::default(), FakeSites::default());

    let summary = generator.generate().await;

    match &summary.users {
        PhaseOutcome::Aborted { report, error } => {
            assert_eq!(report.attempted, 0);
            assert!(error.contains("default verified domain"));
        }
        other => panic!("expected aborted user phase, got {:?}", other),
    }
    assert_eq!(summary.groups.report().map(|r| r.succeeded), Some(3));
    assert_eq!(summary.working_site_collections.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_commit_failure_aborts_phase_but_not_run() -> Result<()> {
    let directory = FakeDirectory {
        fail_commit: Some(1),
        ..FakeDirectory::with_domain("contoso.onmicrosoft.com")
    };
    let mut generator = generator(definition(120, 4, 2), directory, FakeSites::default());

    let summary = generator.generate().await;

    assert!(summary.users.is_aborted());
    assert_eq!(summary.users.report().map(|r| r.attempted), Some(50));
    assert_eq!(summary.groups.report().map(|r| r.succeeded), Some(4));
    assert_eq!(summary.working_site_collections.len(), 2);

    let (directory, sites) = generator.into_parts();
    assert!(directory.users.is_empty());
    assert_eq!(directory.groups.len(), 4);
    assert_eq!(sites.created.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_rejected_groups_are_skipped() -> Result<()> {
    let directory = FakeDirectory {
        rejected_groups: spdg_cli::generator::sample_data::ACCOUNTS
            .iter()
            .take(10)
            .map(|s| s.to_string())
            .collect(),
        ..FakeDirectory::with_domain("contoso.onmicrosoft.com")
    };
    let accounts = spdg_cli::generator::sample_data::ACCOUNTS.len();
    let mut generator = generator(definition(0, accounts, 0), directory, FakeSites::default());

    let summary = generator.generate().await;
    let groups = summary.groups.report().copied().unwrap_or_default();

    assert_eq!(summary.users, PhaseOutcome::Skipped);
    assert_eq!(groups.attempted, accounts);
    assert_eq!(groups.failed, 10);
    assert_eq!(groups.succeeded, accounts - 10);
    assert_eq!(groups.shortfall(), 10);
    Ok(())
}

#[tokio::test]
async fn test_new_site_collections_avoid_existing_urls() -> Result<()> {
    let existing: Vec<String> = {
        let mut sample = SampleData::seeded(42);
        (0..4)
            .map(|_| {
                let title = sample.company_office_name();
                spdg_cli::api::constants::site_collection_url(
                    "contoso",
                    &spdg_cli::generator::naming::generate_slug(&title, 25),
                )
            })
            .collect()
    };
    let sites = FakeSites {
        existing: existing.clone(),
        ..Default::default()
    };

    let mut def = definition(0, 0, 3);
    def.base.site_coll_owner_login = "owner@contoso.onmicrosoft.com".to_string();
    let mut generator = generator(def, FakeDirectory::default(), sites);

    let summary = generator.generate().await;

    assert_eq!(summary.site_collections.report().map(|r| r.created), Some(3));
    for site in &summary.working_site_collections {
        assert!(!existing.contains(&site.url));
    }

    let (_, sites) = generator.into_parts();
    assert_eq!(sites.enumerations, 1);
    assert!(sites.created.iter().all(|(_, _, owner)| owner == "owner@contoso.onmicrosoft.com"));
    Ok(())
}

#[tokio::test]
async fn test_directory_listing_is_cached() -> Result<()> {
    let directory = FakeDirectory {
        existing_users: vec!["ada.lovelace@contoso.onmicrosoft.com".to_string()],
        existing_groups: vec!["Finance".to_string()],
        ..Default::default()
    };
    let mut generator = generator(definition(0, 0, 0), directory, FakeSites::default());

    assert_eq!(generator.available_users_in_directory().await?.len(), 1);
    assert_eq!(generator.available_users_in_directory().await?.len(), 1);
    assert_eq!(generator.available_groups_in_directory().await?, ["Finance".to_string()]);

    let (directory, _) = generator.into_parts();
    assert_eq!(directory.user_enumerations, 1);
    Ok(())
}

#[tokio::test]
async fn test_run_against_graph_batches() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1.0/organization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{ "verifiedDomains": [{ "name": "contoso.onmicrosoft.com", "isDefault": true }] }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1.0/$batch"))
        .respond_with(|request: &Request| {
            let body: Value = serde_json::from_slice(&request.body).unwrap_or_default();
            let responses: Vec<Value> = body["requests"]
                .as_array()
                .map(|requests| {
                    requests
                        .iter()
                        .map(|r| json!({ "id": r["id"], "status": 201, "body": {} }))
                        .collect()
                })
                .unwrap_or_default();
            ResponseTemplate::new(200).set_body_json(json!({ "responses": responses }))
        })
        .expect(1)
        .mount(&server)
        .await;

    let directory = GraphClient::with_base_url(server.uri(), "token".to_string());
    let sites = SharePointClient::new(server.uri(), "token".to_string());
    let settings = Settings {
        batch_size: 5,
        ..Settings::default()
    };

    let mut generator = ClientDataGenerator::new(definition(5, 0, 0), directory, sites)
        .with_settings(settings)
        .with_sample_data(SampleData::seeded(1));

    let summary = generator.generate().await;

    // Five users fill exactly one batch
    assert_eq!(summary.users.report().map(|r| r.commits), Some(1));
    assert_eq!(summary.groups, PhaseOutcome::Skipped);
    Ok(())
}

#[tokio::test]
async fn test_groups_beyond_name_pool_are_all_created() -> Result<()> {
    let mut generator = generator(
        definition(0, 120, 0),
        FakeDirectory::with_domain("contoso.onmicrosoft.com"),
        FakeSites::default(),
    );

    let summary = generator.generate().await;
    let groups = summary.groups.report().copied().unwrap_or_default();

    assert_eq!(groups.attempted, 120);
    assert_eq!(groups.succeeded, 120);
    assert_eq!(groups.failed, 0);

    let (directory, _) = generator.into_parts();
    assert_eq!(directory.commits, vec![50, 50, 20]);

    let names: HashSet<&str> = directory.groups.iter().map(|g| g.display_name.as_str()).collect();
    let nicknames: HashSet<&str> = directory.groups.iter().map(|g| g.mail_nickname.as_str()).collect();
    assert_eq!(names.len(), 120);
    assert_eq!(nicknames.len(), 120);
    Ok(())
}

fn tenant() -> TenantConfig {
    TenantConfig {
        tenant_name: "contoso".to_string(),
        username: "admin@contoso.onmicrosoft.com".to_string(),
        password: "secret".to_string(),
        client_id: "client".to_string(),
        client_secret: None,
    }
}

/// SharePoint host whose sign-in goes to `server`
fn deferred_sharepoint(server: &MockServer) -> DeferredSharePoint {
    let auth = AuthManager::with_token_url("contoso", format!("{}/token", server.uri()));
    DeferredSharePoint::new(ClientManager::new(tenant()).with_auth_manager(auth))
}

#[tokio::test]
async fn test_sharepoint_login_failure_aborts_only_site_phase() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("sharepoint.com"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "AADSTS50126: Invalid username or password."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut generator = ClientDataGenerator::new(
        definition(5, 2, 2),
        FakeDirectory::with_domain("contoso.onmicrosoft.com"),
        deferred_sharepoint(&server),
    )
    .with_sample_data(SampleData::seeded(42));

    let summary = generator.generate().await;

    assert_eq!(summary.users.report().map(|r| r.succeeded), Some(5));
    assert_eq!(summary.groups.report().map(|r| r.succeeded), Some(2));
    match &summary.site_collections {
        PhaseOutcome::Aborted { report, error } => {
            assert_eq!(report.created, 0);
            assert!(error.contains("SharePoint"), "{}", error);
        }
        other => panic!("expected aborted site collection phase, got {:?}", other),
    }
    assert!(summary.working_site_collections.is_empty());

    let (directory, sites) = generator.into_parts();
    assert_eq!(directory.users.len(), 5);
    assert!(!sites.is_connected());
    Ok(())
}

#[tokio::test]
async fn test_existing_site_collection_needs_no_sharepoint_login() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let mut generator = ClientDataGenerator::new(
        definition(3, 0, 0),
        FakeDirectory::with_domain("contoso.onmicrosoft.com"),
        deferred_sharepoint(&server),
    )
    .with_sample_data(SampleData::seeded(42));

    let summary = generator.generate().await;

    assert!(matches!(summary.site_collections, PhaseOutcome::Completed(_)));
    assert_eq!(
        summary.working_site_collections,
        vec![SiteCollInfo::new("https://contoso.sharepoint.com/sites/dev")]
    );
    Ok(())
}

#[tokio::test]
async fn test_directory_command_reads_through_cache() -> Result<()> {
    let directory = FakeDirectory {
        existing_users: vec![
            "ada.lovelace@contoso.onmicrosoft.com".to_string(),
            "grace.hopper@contoso.onmicrosoft.com".to_string(),
        ],
        existing_groups: vec!["Finance".to_string(), "Legal".to_string()],
        ..Default::default()
    };
    let mut generator = generator(definition(0, 0, 0), directory, FakeSites::default());

    let users = DirectorySubcommands::Users { access_token: None };
    assert_eq!(directory_names(&mut generator, &users).await?.len(), 2);
    assert_eq!(directory_names(&mut generator, &users).await?.len(), 2);

    let groups = DirectorySubcommands::Groups { access_token: None };
    assert_eq!(directory_names(&mut generator, &groups).await?, vec!["Finance", "Legal"]);

    let (directory, _) = generator.into_parts();
    assert_eq!(directory.user_enumerations, 1);
    Ok(())
}
