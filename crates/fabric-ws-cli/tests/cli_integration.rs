//! Integration tests for the fabric-ws CLI commands.
//!
//! These exercise the same code paths as the binary: arguments are parsed
//! with `Cli::try_parse_from`, and commands run against a mock identity
//! endpoint and Power BI API.

use clap::Parser;
use fabric_ws_cli::cli::{self, Cli, Commands, CreateArgs, DeleteArgs};
use fabric_ws_cli::commands;
use fabric_ws_core::models::Environment;
use fabric_ws_core::report::{CreateOutcome, DeleteOutcome};
use fabric_ws_core::{Config, WorkspaceError};
use futures_util::future::FutureExt;
use serde_json::json;
use wiremock::{
    matchers::{body_json, method, path, path_regex},
    Mock, MockServer, ResponseTemplate,
};

async fn try_start_mock() -> Option<MockServer> {
    let fut = MockServer::start();
    let fut = std::panic::AssertUnwindSafe(fut);
    fut.catch_unwind().await.ok()
}

fn parse(args: &[&str]) -> Cli {
    let mut argv = vec![
        "fabric-ws",
        "--no-dotenv",
        "--tenant-id",
        "tenant-1",
        "--client-id",
        "client-1",
        "--client-secret",
        "secret-1",
    ];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).expect("arguments parse")
}

fn config_for(server: &MockServer) -> Config {
    let uri = server.uri();
    let api = format!("{}/v1.0/myorg", uri);
    parse(&["--authority-host", uri.as_str(), "--api-base-url", api.as_str(), "list"])
        .connection
        .to_config()
        .expect("config")
}

async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/tenant-1/oauth2/v2.0/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token_type": "Bearer",
            "expires_in": 3599,
            "access_token": "tok-123"
        })))
        .mount(server)
        .await;
}

/// `create` with every env-backed selection flag given explicitly, so
/// CREATE_* / ENVIRONMENTS / WORKSPACE_NAMES in the test environment
/// cannot change the outcome.
fn parse_create(args: &[&str]) -> CreateArgs {
    let mut argv = vec!["create"];
    argv.extend_from_slice(args);
    for (flag, value) in [
        ("--workspace-names", ""),
        ("--dev", "false"),
        ("--uat", "false"),
        ("--prd", "false"),
        ("--environments", ""),
    ] {
        if !args.contains(&flag) {
            argv.extend_from_slice(&[flag, value]);
        }
    }
    create_args(parse(&argv))
}

fn create_args(cli: Cli) -> CreateArgs {
    match cli.command {
        Commands::Create(args) => args,
        other => panic!("expected create, got {:?}", other),
    }
}

#[test]
fn test_parse_create_flags() {
    let cli = parse(&["--json", "create", "--workspace-names", "x"]);
    assert!(cli.json);

    let args = parse_create(&[
        "--workspace-names",
        "Sales, Finance",
        "--prd",
        "--dev",
        "yes",
        "--uat",
        "false",
        "--admin-emails",
        "alice@contoso.com,bob@contoso.com",
    ]);
    assert_eq!(args.base_names(), vec!["Sales", "Finance"]);
    assert_eq!(
        args.selected_environments().unwrap(),
        vec![Environment::Dev, Environment::Prd]
    );
}

#[test]
fn test_parse_environment_list_merges_with_flags() {
    let args = parse_create(&[
        "--workspace-names",
        "Ops",
        "--environments",
        "prd,UAT",
        "--uat",
    ]);
    assert_eq!(
        args.selected_environments().unwrap(),
        vec![Environment::Uat, Environment::Prd]
    );

    let args = parse_create(&["--environments", "qa"]);
    assert!(matches!(
        args.selected_environments(),
        Err(WorkspaceError::Validation(_))
    ));
}

#[test]
fn test_skip_dotenv_scan() {
    assert!(cli::skip_dotenv(["fabric-ws", "--no-dotenv", "list"]));
    assert!(!cli::skip_dotenv(["fabric-ws", "list", "--no-dotenv=false"]));
}

#[cfg(unix)]
#[test]
fn test_skip_dotenv_tolerates_non_utf8_args() {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    let bad = OsString::from_vec(vec![0x66, 0x6f, 0xff, 0x6f]);
    assert!(cli::skip_dotenv([OsString::from("fabric-ws"), bad.clone(), OsString::from("--no-dotenv")]));
    assert!(!cli::skip_dotenv([OsString::from("fabric-ws"), bad]));
}

#[test]
fn test_connection_args_build_config() {
    let cli = parse(&[
        "--authority-host",
        "https://login.microsoftonline.com/",
        "--page-size",
        "50",
        "--timeout-secs",
        "5",
        "list",
    ]);
    let config = cli.connection.to_config().unwrap();
    assert_eq!(config.credentials.tenant_id, "tenant-1");
    assert_eq!(config.page_size, 50);
    assert_eq!(config.timeout.as_secs(), 5);
    assert_eq!(
        config.token_url(),
        "https://login.microsoftonline.com/tenant-1/oauth2/v2.0/token"
    );
    assert!(!format!("{:?}", config).contains("secret-1"));
}

#[tokio::test]
async fn test_create_end_to_end() {
    let server = match try_start_mock().await {
        Some(srv) => srv,
        None => {
            eprintln!("skipping test_create_end_to_end: mock server unavailable");
            return;
        }
    };
    mount_token(&server).await;
    Mock::given(method("POST"))
        .and(path("/v1.0/myorg/groups"))
        .and(body_json(json!({ "name": "Sales dev", "capacityId": "cap-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "ws-dev", "name": "Sales dev" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1.0/myorg/groups"))
        .and(body_json(json!({ "name": "Sales prd", "capacityId": "cap-1" })))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "error": { "code": "PowerBIEntityAlreadyExists", "message": "Workspace already exists" }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1.0/myorg/groups/ws-dev/users"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let args = parse_create(&[
        "--workspace-names",
        "Sales",
        "--dev",
        "--prd",
        "--capacity-id",
        "cap-1",
        "--admin-emails",
        "alice@contoso.com",
    ]);

    let report = commands::create::run(config_for(&server), &args, false)
        .await
        .expect("per-item failures are not fatal");

    assert_eq!(report.requested, vec!["Sales dev", "Sales prd"]);
    assert_eq!(
        report.items[0].outcome,
        CreateOutcome::Created { workspace_id: "ws-dev".into() }
    );
    assert!(matches!(report.items[1].outcome, CreateOutcome::Failed(_)));
    assert_eq!(report.summary().admins_assigned, 1);
}

#[tokio::test]
async fn test_create_without_environments_makes_no_requests() {
    let server = match try_start_mock().await {
        Some(srv) => srv,
        None => {
            eprintln!("skipping test_create_without_environments_makes_no_requests: mock server unavailable");
            return;
        }
    };
    mount_token(&server).await;

    let args = parse_create(&["--workspace-names", "Sales"]);
    let err = commands::create::run(config_for(&server), &args, false)
        .await
        .unwrap_err();

    assert!(matches!(err, WorkspaceError::Validation(_)));
    let received = server.received_requests().await.unwrap_or_default();
    assert!(received.is_empty());
}

#[tokio::test]
async fn test_auth_failure_is_fatal() {
    let server = match try_start_mock().await {
        Some(srv) => srv,
        None => {
            eprintln!("skipping test_auth_failure_is_fatal: mock server unavailable");
            return;
        }
    };
    Mock::given(method("POST"))
        .and(path("/tenant-1/oauth2/v2.0/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "unauthorized_client",
            "error_description": "AADSTS700016: Application not found"
        })))
        .mount(&server)
        .await;
    Mock::given(path_regex("^/v1.0/myorg/.*"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let args = DeleteArgs {
        workspaces: "sandbox dev".into(),
    };
    let err = commands::delete::run(config_for(&server), &args, true)
        .await
        .unwrap_err();
    assert!(matches!(err, WorkspaceError::Auth(_)));
    assert!(err.is_fatal());
}

#[tokio::test]
async fn test_delete_end_to_end() {
    let server = match try_start_mock().await {
        Some(srv) => srv,
        None => {
            eprintln!("skipping test_delete_end_to_end: mock server unavailable");
            return;
        }
    };
    mount_token(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1.0/myorg/groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [
                { "id": "id-dev", "name": "sandbox dev" },
                { "id": "id-uat", "name": "sandbox uat" },
                { "id": "id-other", "name": "sandbox dev archive" }
            ]
        })))
        .mount(&server)
        .await;
    for id in ["id-dev", "id-uat"] {
        Mock::given(method("DELETE"))
            .and(path(format!("/v1.0/myorg/groups/{}", id)))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
    }
    Mock::given(method("DELETE"))
        .and(path("/v1.0/myorg/groups/id-other"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let cli = parse(&[
        "delete",
        "--workspaces",
        "sandbox dev,sandbox uat,ghost workspace",
    ]);
    let args = match cli.command {
        Commands::Delete(args) => args,
        other => panic!("expected delete, got {:?}", other),
    };

    let report = commands::delete::run(config_for(&server), &args, false)
        .await
        .unwrap();

    assert_eq!(report.deleted(), vec!["sandbox dev", "sandbox uat"]);
    assert_eq!(report.items[2].name, "ghost workspace");
    assert!(matches!(
        &report.items[2].outcome,
        DeleteOutcome::NotFound(failure) if failure.reason.contains("ghost workspace")
    ));
}
