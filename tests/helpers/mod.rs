#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use notebook::config::LookupConfig;
use notebook::lookup::WikipediaClient;
use notebook::rpc::client::RpcClient;
use notebook::service::NotebookService;
use notebook::store::NoteStore;
use serde_json::Value;
use tempfile::TempDir;

/// Open a fresh store in a temp directory. Keep the `TempDir` alive.
pub fn temp_store() -> (TempDir, NoteStore) {
    let tmp = TempDir::new().unwrap();
    let store = NoteStore::open(tmp.path().join("notes_database.xml")).unwrap();
    (tmp, store)
}

/// A service over a fresh temp store, with lookups sent to `lookup_endpoint`.
pub fn temp_service(lookup_endpoint: &str) -> (TempDir, Arc<NoteStore>, NotebookService) {
    let (tmp, store) = temp_store();
    let store = Arc::new(store);
    let lookup = WikipediaClient::new(&LookupConfig {
        endpoint: lookup_endpoint.to_string(),
        user_agent: "notebook-tests".into(),
    })
    .unwrap();
    let service = NotebookService::new(Arc::clone(&store), Arc::new(lookup));
    (tmp, store, service)
}

/// An in-process notebook server on an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub store: Arc<NoteStore>,
    pub client: RpcClient,
    _tmp: TempDir,
}

impl TestServer {
    pub fn rpc_url(&self) -> String {
        format!("http://{}/rpc", self.addr)
    }
}

pub async fn spawn_server(lookup_endpoint: &str) -> TestServer {
    let (tmp, store, service) = temp_service(lookup_endpoint);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = notebook::server::router(service);
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestServer {
        addr,
        store,
        client: RpcClient::new(format!("http://{addr}/rpc")),
        _tmp: tmp,
    }
}

/// A stand-in for the OpenSearch endpoint that always answers with `body`
/// and records the query string of every request.
pub struct FakeWikipedia {
    pub endpoint: String,
    pub queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

pub async fn spawn_fake_wikipedia(status: StatusCode, body: Value) -> FakeWikipedia {
    let queries: Arc<Mutex<Vec<HashMap<String, String>>>> = Arc::default();
    let recorded = Arc::clone(&queries);

    let app = Router::new().route(
        "/w/api.php",
        get(move |Query(query): Query<HashMap<String, String>>| {
            let body = body.clone();
            let recorded = Arc::clone(&recorded);
            async move {
                recorded.lock().unwrap().push(query);
                (status, Json(body))
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeWikipedia {
        endpoint: format!("http://{addr}/w/api.php"),
        queries,
    }
}

/// An endpoint on a port nothing listens on.
pub async fn unreachable_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/w/api.php")
}
