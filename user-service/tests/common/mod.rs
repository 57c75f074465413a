#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use user_service::services::{InMemoryUserStore, MongoUserStore, UserStore};
use user_service::Application;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub mongo: Option<MongoUserStore>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    server: Option<JoinHandle<std::io::Result<()>>>,
}

impl TestApp {
    /// Boot the real application over an in-memory store.
    pub async fn spawn() -> Self {
        Self::spawn_with_store(Arc::new(InMemoryUserStore::new()), None).await
    }

    /// Boot the real application over a fresh MongoDB database.
    pub async fn spawn_with_mongo() -> Self {
        let db_name = format!("user_test_{}", uuid::Uuid::new_v4().simple());
        let uri = std::env::var("TEST_MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

        let store = MongoUserStore::connect(&uri, &db_name)
            .await
            .expect("Failed to create MongoDB client");

        Self::spawn_with_store(Arc::new(store.clone()), Some(store)).await
    }

    pub async fn spawn_with_store(
        store: Arc<dyn UserStore>,
        mongo: Option<MongoUserStore>,
    ) -> Self {
        let addr = SocketAddr::from(([127, 0, 0, 1], 0));
        let app = Application::build_with_store(addr, store)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        // The listener is already bound, so requests queue until the server polls it.
        let server = tokio::spawn(app.run_until(async move {
            shutdown_rx.await.ok();
        }));

        TestApp {
            address: format!("http://127.0.0.1:{}", port),
            port,
            mongo,
            shutdown_tx: Some(shutdown_tx),
            server: Some(server),
        }
    }

    pub fn user_url(&self, id: &str) -> String {
        format!("{}/user/{}", self.address, id)
    }

    pub async fn create_user(&self, body: serde_json::Value) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{}/user", self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Stop the server gracefully and wait for it to finish.
    pub async fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            tx.send(()).ok();
        }
        if let Some(server) = self.server.take() {
            server
                .await
                .expect("Server task panicked")
                .expect("Server returned an error");
        }
    }

    /// Drop the per-test MongoDB database, if any.
    pub async fn cleanup(&self) {
        if let Some(store) = &self.mongo {
            store
                .database()
                .drop(None)
                .await
                .expect("Failed to drop test database");
        }
    }
}
