//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p vitrine-api`.

#![allow(dead_code)]

pub mod fixtures;
pub mod storage;

use std::sync::Arc;

use axum_test::TestServer;
use vitrine_api::setup::routes;
use vitrine_api::state::AppState;
use vitrine_core::{LocationConfig, RuleSet};

pub use storage::MockStorage;

/// Test application: server plus the storage it reads from.
pub struct TestApp {
    pub server: TestServer,
    pub storage: Arc<MockStorage>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn storage_calls(&self) -> Vec<storage::Call> {
        self.storage.calls()
    }
}

/// Setup a test app in development mode (error details rendered).
pub fn setup_test_app(locations: Vec<LocationConfig>, storage: MockStorage) -> TestApp {
    build_test_app(locations, storage, false)
}

pub fn setup_production_app(locations: Vec<LocationConfig>, storage: MockStorage) -> TestApp {
    build_test_app(locations, storage, true)
}

fn build_test_app(
    locations: Vec<LocationConfig>,
    storage: MockStorage,
    is_production: bool,
) -> TestApp {
    let rules = RuleSet::from_config(&locations).expect("Invalid test locations");
    let storage = Arc::new(storage);
    let state = Arc::new(AppState::new(rules, storage.clone(), is_production));

    let app = routes::setup_routes(state);
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp { server, storage }
}
