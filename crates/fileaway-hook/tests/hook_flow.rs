use std::time::Duration;

use anyhow::{Result, anyhow};
use fileaway_config::{CategoryMapping, HookConfig, parse_document};
use fileaway_hook::{
    ClientVariant, Hook, HookError, HookOutcome, OperationMode, RemoteError, ResolvedOperation,
};
use httpmock::prelude::*;
use serde_json::json;

fn torrent_args(name: &str, category: &str) -> Vec<String> {
    [
        name,
        category,
        "linux",
        "/downloads/iso/ubuntu-24.04",
        "/downloads/iso/ubuntu-24.04",
        "/downloads/iso",
        "3",
        "6114656256",
        "https://torrent.ubuntu.com/announce",
        "2aa4f5a7e209e54b32803d43670971c4c8caaa05",
        "",
        "2aa4f5a7e209e54b32803d43670971c4c8caaa05",
    ]
    .iter()
    .map(|value| (*value).to_string())
    .collect()
}

fn usenet_args(directory: &str, category: &str) -> Vec<String> {
    [
        directory,
        "BatchA.nzb",
        "BatchA",
        "98765",
        category,
        "alt.binaries.iso",
        "0",
        "https://indexer.example/details/98765",
    ]
    .iter()
    .map(|value| (*value).to_string())
    .collect()
}

fn hook_for(server: &MockServer, variant: ClientVariant) -> Result<Hook> {
    let document = json!({
        "api_url": server.base_url(),
        "api_key": "123456",
        "timeout_secs": 5,
        "categories": {
            "Unprocessed Isos": { "/downloads/iso": "/archive/iso" },
            "iso": {
                "source_root": "/share/docker_volumes/sabnzbd/downloads/iso",
                "target_root": "/share/nas/iso"
            }
        }
    });
    let config = parse_document(&document.to_string(), |_| None)?;
    Ok(Hook::new(variant, config, "integration-trace")?)
}

#[tokio::test]
async fn torrent_hook_copies_mapped_category_and_exits_zero() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/files/copy")
            .header("x-api-key", "123456")
            .json_body(json!({
                "sourcePath": "/downloads/iso/ubuntu-24.04",
                "targetPath": "/archive/iso/ubuntu-24.04"
            }));
        then.status(500).body("disk full");
    });

    let hook = hook_for(&server, ClientVariant::QBittorrent)?;
    let outcome = hook
        .invoke(torrent_args("ubuntu-24.04", "Unprocessed Isos"))
        .await?;

    mock.assert_hits(1);
    assert_eq!(outcome.exit_code(), 0);
    match outcome {
        HookOutcome::Dispatched { operation, result } => {
            assert_eq!(operation.mode, OperationMode::Copy);
            assert!(matches!(result, Err(RemoteError::Api { .. })));
        }
        other => return Err(anyhow!("expected a dispatched request, got {other:?}")),
    }
    Ok(())
}

#[tokio::test]
async fn torrent_hook_reports_success_body() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST).path("/api/files/copy");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"status":"success","message":"copied"}"#);
    });

    let hook = hook_for(&server, ClientVariant::QBittorrent)?;
    let outcome = hook
        .invoke(torrent_args("ubuntu-24.04", "Unprocessed Isos"))
        .await?;

    mock.assert();
    let HookOutcome::Dispatched { result, .. } = outcome else {
        return Err(anyhow!("expected a dispatched request"));
    };
    let body = result.map_err(|err| anyhow!("request should succeed: {err}"))?;
    assert!(String::from_utf8_lossy(&body).contains("copied"));
    Ok(())
}

#[tokio::test]
async fn usenet_hook_moves_directory_leaf() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST).path("/api/files/move").json_body(json!({
            "sourcePath": "/share/docker_volumes/sabnzbd/downloads/iso/BatchA",
            "targetPath": "/share/nas/iso/BatchA"
        }));
        then.status(200)
            .header("content-type", "application/json")
            .body("{}");
    });

    let hook = hook_for(&server, ClientVariant::Sabnzbd)?;
    let outcome = hook
        .invoke(usenet_args("/share/docker_volumes/sabnzbd/downloads/iso/BatchA/", "iso"))
        .await?;

    mock.assert();
    let HookOutcome::Dispatched { operation, result } = outcome else {
        return Err(anyhow!("expected a dispatched request"));
    };
    assert_eq!(
        operation,
        ResolvedOperation {
            mode: OperationMode::Move,
            source_path: "/share/docker_volumes/sabnzbd/downloads/iso/BatchA".to_string(),
            target_path: "/share/nas/iso/BatchA".to_string(),
        }
    );
    assert!(result.is_ok());
    Ok(())
}

#[tokio::test]
async fn unmapped_category_sends_nothing() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST);
        then.status(200);
    });

    let hook = hook_for(&server, ClientVariant::QBittorrent)?;
    let outcome = hook.invoke(torrent_args("Some.Show", "tv")).await?;

    mock.assert_hits(0);
    assert!(!outcome.dispatched());
    assert_eq!(outcome.exit_code(), 0);
    Ok(())
}

#[tokio::test]
async fn empty_torrent_name_is_still_dispatched() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST).path("/api/files/copy").json_body(json!({
            "sourcePath": "/downloads/iso/",
            "targetPath": "/archive/iso/"
        }));
        then.status(400).body("invalid source path");
    });

    let hook = hook_for(&server, ClientVariant::QBittorrent)?;
    let outcome = hook.invoke(torrent_args("", "Unprocessed Isos")).await?;

    mock.assert_hits(1);
    assert!(outcome.dispatched());
    assert_eq!(outcome.exit_code(), 0);
    Ok(())
}

#[tokio::test]
async fn wrong_arity_fails_with_exit_one_and_no_request() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST);
        then.status(200);
    });

    let hook = hook_for(&server, ClientVariant::Sabnzbd)?;
    let mut args = usenet_args("/share/downloads/iso/BatchA", "iso");
    args.pop();

    let err = hook
        .invoke(args)
        .await
        .expect_err("seven arguments must be rejected");
    assert!(matches!(
        err,
        HookError::Arity { expected: 8, actual: 7, .. }
    ));
    assert_eq!(err.exit_code(), 1);
    mock.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn unreachable_service_still_exits_zero() -> Result<()> {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        listener.local_addr()?.port()
    };
    let config = HookConfig::new(
        &format!("http://127.0.0.1:{port}"),
        "123456",
        CategoryMapping::new([("iso", "/src", "/dst")])?,
    )?
    .with_timeouts(Duration::from_secs(2), Duration::from_secs(1));
    let hook = Hook::new(ClientVariant::QBittorrent, config, "trace")?;

    let outcome = hook.invoke(torrent_args("Foo", "iso")).await?;

    assert_eq!(outcome.exit_code(), 0);
    let HookOutcome::Dispatched { operation, result } = outcome else {
        return Err(anyhow!("expected a dispatched request"));
    };
    assert_eq!(operation.source_path, "/src/Foo");
    assert_eq!(operation.target_path, "/dst/Foo");
    assert!(matches!(result, Err(RemoteError::Transport { .. })));
    Ok(())
}
