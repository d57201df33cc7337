//! Integration tests: the adapter against a live fete-api server on
//! loopback, against a closed port, and against misbehaving servers.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;

use fete_api::{AppStateInner, router};
use fete_client::{
    Adapter, BackendConfig, ClientConfig, ClientError, LocalStore, RemoteConfig, StoreError,
};
use fete_db::Database;
use fete_types::{CelebrationInput, EventType, Flavor, WishInput};

fn birthday() -> CelebrationInput {
    CelebrationInput {
        event_type: EventType::Birthday,
        recipient_name: "Sam".into(),
        message: "Hi".into(),
        flavor: Flavor::Vanilla,
        images: None,
    }
}

fn wish(celebration_id: &str, name: &str, message: &str) -> WishInput {
    WishInput {
        celebration_id: celebration_id.into(),
        name: name.into(),
        message: message.into(),
    }
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api", addr)
}

async fn spawn_fete_server() -> String {
    serve(router(AppStateInner::new(Database::open_in_memory().unwrap()))).await
}

/// A loopback URL nothing is listening on.
fn closed_port_url() -> String {
    let socket = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = socket.local_addr().unwrap();
    drop(socket); // release so connections are refused
    format!("http://{}/api", addr)
}

fn remote(url: &str) -> BackendConfig {
    BackendConfig::Remote(RemoteConfig::new(url).unwrap().with_timeout(Duration::from_secs(2)))
}

async fn remote_adapter(url: &str, local_dir: &Path) -> Adapter {
    Adapter::new(remote(url), LocalStore::open(local_dir).await.unwrap()).unwrap()
}

#[tokio::test]
async fn remote_create_then_get_returns_identical_record() {
    let url = spawn_fete_server().await;
    let tmp = tempfile::tempdir().unwrap();
    let adapter = remote_adapter(&url, tmp.path()).await;
    assert!(adapter.is_connected());
    assert_eq!(adapter.backend_label(), "remote");

    let created = adapter.create(&birthday()).await.unwrap();
    assert_eq!(created.recipient_name, "Sam");
    assert_eq!(created.flavor, Flavor::Vanilla);
    assert!(created.created_at > 0);

    let fetched = adapter.get(&created.id).await.unwrap();
    assert_eq!(fetched, Some(created.clone()));

    // Served by the remote: a second client with an empty local store sees it,
    // and nothing was written to this client's local store.
    let other = Adapter::new(remote(&url), LocalStore::in_memory()).unwrap();
    assert_eq!(other.get(&created.id).await.unwrap(), Some(created.clone()));

    let local = LocalStore::open(tmp.path()).await.unwrap();
    assert_eq!(local.get_celebration(&created.id).await.unwrap(), None);
}

#[tokio::test]
async fn images_survive_the_remote_round_trip() {
    let url = spawn_fete_server().await;
    let adapter = Adapter::new(remote(&url), LocalStore::in_memory()).unwrap();

    let mut input = birthday();
    input.event_type = EventType::BabyShower;
    input.images = Some(vec!["data:image/png;base64,AAAA".into(), "data:image/jpeg;base64,BBBB".into()]);

    let created = adapter.create(&input).await.unwrap();
    assert_eq!(created.images, input.images);
    assert_eq!(adapter.get(&created.id).await.unwrap(), Some(created));
}

#[tokio::test]
async fn remote_wishes_come_back_newest_first() {
    let url = spawn_fete_server().await;
    let adapter = Adapter::new(remote(&url), LocalStore::in_memory()).unwrap();
    let celebration = adapter.create(&birthday()).await.unwrap();

    let ana = adapter.add_wish(&wish(&celebration.id, "Ana", "Congrats!")).await.unwrap();
    let ben = adapter.add_wish(&wish(&celebration.id, "Ben", "Yay!")).await.unwrap();
    assert_ne!(ana.id, ben.id);

    let wishes = adapter.list_wishes(&celebration.id).await.unwrap();
    assert_eq!(wishes, vec![ben, ana]);

    let other = adapter.create(&birthday()).await.unwrap();
    assert!(adapter.list_wishes(&other.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_id_is_not_found_on_both_configurations() {
    let url = spawn_fete_server().await;
    let with_remote = Adapter::new(remote(&url), LocalStore::in_memory()).unwrap();
    let local_only = Adapter::new(BackendConfig::None, LocalStore::in_memory()).unwrap();

    assert_eq!(with_remote.get("never-created").await.unwrap(), None);
    assert_eq!(local_only.get("never-created").await.unwrap(), None);
}

#[tokio::test]
async fn unreachable_remote_falls_back_for_every_operation() {
    let tmp = tempfile::tempdir().unwrap();
    let adapter = remote_adapter(&closed_port_url(), tmp.path()).await;
    assert!(adapter.is_connected());

    let created = adapter.create(&birthday()).await.unwrap();
    assert_eq!(adapter.get(&created.id).await.unwrap(), Some(created.clone()));

    let ana = adapter.add_wish(&wish(&created.id, "Ana", "Congrats!")).await.unwrap();
    let ben = adapter.add_wish(&wish(&created.id, "Ben", "Yay!")).await.unwrap();
    assert_eq!(adapter.list_wishes(&created.id).await.unwrap(), vec![ben, ana]);

    // Still unreachable, fresh adapter over the same local store.
    let again = remote_adapter(&closed_port_url(), tmp.path()).await;
    assert_eq!(again.get(&created.id).await.unwrap(), Some(created));
}

#[tokio::test]
async fn records_written_during_an_outage_stay_local() {
    let url = spawn_fete_server().await;
    let tmp = tempfile::tempdir().unwrap();

    let offline = remote_adapter(&closed_port_url(), tmp.path()).await;
    let created = offline.create(&birthday()).await.unwrap();

    // Same device, remote back up: the remote 404s and the local copy answers.
    let online = remote_adapter(&url, tmp.path()).await;
    assert_eq!(online.get(&created.id).await.unwrap(), Some(created.clone()));

    // Another device never sees it.
    let elsewhere = Adapter::new(remote(&url), LocalStore::in_memory()).unwrap();
    assert_eq!(elsewhere.get(&created.id).await.unwrap(), None);
}

#[tokio::test]
async fn wish_for_locally_created_celebration_falls_back() {
    let url = spawn_fete_server().await;
    let tmp = tempfile::tempdir().unwrap();

    let offline = remote_adapter(&closed_port_url(), tmp.path()).await;
    let created = offline.create(&birthday()).await.unwrap();

    // The remote rejects the wish (unknown celebration), so it lands locally.
    let online = remote_adapter(&url, tmp.path()).await;
    let added = online.add_wish(&wish(&created.id, "Ana", "Hi")).await.unwrap();

    let local = LocalStore::open(tmp.path()).await.unwrap();
    assert_eq!(local.list_wishes(&created.id).await.unwrap(), vec![added]);
}

#[tokio::test]
async fn error_status_and_malformed_bodies_fall_back() {
    let broken = Router::new()
        .route(
            "/api/celebrations/{id}",
            get(|| async { (StatusCode::OK, "<html>definitely not json</html>") }),
        )
        .route(
            "/api/wishes/{id}",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
    let url = serve(broken).await;

    let tmp = tempfile::tempdir().unwrap();
    let offline = remote_adapter(&closed_port_url(), tmp.path()).await;
    let created = offline.create(&birthday()).await.unwrap();
    let added = offline.add_wish(&wish(&created.id, "Ana", "Hi")).await.unwrap();

    let adapter = remote_adapter(&url, tmp.path()).await;
    assert_eq!(adapter.get(&created.id).await.unwrap(), Some(created.clone()));
    assert_eq!(adapter.list_wishes(&created.id).await.unwrap(), vec![added]);

    // No POST routes on this server: the 404 falls back too.
    let again = adapter.create(&birthday()).await.unwrap();
    assert_ne!(again.id, created.id);
}

#[tokio::test]
async fn local_store_failure_is_surfaced() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("store");
    let adapter = remote_adapter(&closed_port_url(), &dir).await;
    std::fs::remove_dir_all(&dir).unwrap();

    let err = adapter.create(&birthday()).await.unwrap_err();
    assert!(matches!(err, ClientError::Store(StoreError::Io { .. })));
}

#[tokio::test]
async fn from_config_opens_the_local_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("device");
    let adapter = Adapter::from_config(ClientConfig {
        backend: BackendConfig::None,
        local_dir: dir.clone(),
    })
    .await
    .unwrap();
    assert!(!adapter.is_connected());

    let created = adapter.create(&birthday()).await.unwrap();
    assert!(dir.join("fete_celebrations.json").exists());
    assert_eq!(adapter.get(&created.id).await.unwrap(), Some(created));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_local_wishes_all_succeed() {
    let tmp = tempfile::tempdir().unwrap();
    let adapter = Arc::new(
        Adapter::new(BackendConfig::None, LocalStore::open(tmp.path()).await.unwrap()).unwrap(),
    );

    let handles: Vec<_> = (0..32)
        .map(|i| {
            let adapter = adapter.clone();
            tokio::spawn(async move {
                adapter.add_wish(&wish("c1", &format!("guest {}", i), "Yay")).await
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let wishes = adapter.list_wishes("c1").await.unwrap();
    assert_eq!(wishes.len(), 32);
    assert!(wishes.windows(2).all(|w| w[0].created_at >= w[1].created_at));
}
