//! First-run unit roster download against a mock HTTP server.

mod common;

use std::sync::Arc;
use std::time::Duration;

use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use plant_maintenance::{
    services::units::UnitRosterClient,
    storage::{InMemoryStore, StorageKey},
    AppState, PlantState,
};

const ROSTER_PATH: &str = "/unit.json";

async fn client_for(server: &MockServer) -> UnitRosterClient {
    UnitRosterClient::new(
        format!("{}{}", server.uri(), ROSTER_PATH),
        Duration::from_secs(2),
    )
    .expect("client builds")
}

fn codes(state: &PlantState) -> Vec<String> {
    state.units.iter().map(|u| u.code.clone()).collect()
}

#[tokio::test]
async fn remote_roster_is_downloaded_and_persisted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ROSTER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"unit": "DT-10", "unit_code": "DT-10", "type": "DUMP TRUCK", "costPerOperationalHour": 120000},
            {"unitCode": "GR-02", "type": "GRADER"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(InMemoryStore::new());
    let mut state = AppState::load(store.clone());
    assert!(state.ensure_unit_roster(&client_for(&server).await).await);

    assert_eq!(codes(state.plant()), vec!["DT-10", "GR-02"]);
    assert_eq!(state.plant().units[0].cost_per_operational_hour, dec!(120000));
    assert!(store.document(StorageKey::Units).unwrap().contains("GR-02"));
}

#[tokio::test]
async fn server_error_falls_back_to_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ROSTER_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (mut state, store) = common::test_app();
    state.ensure_unit_roster(&client_for(&server).await).await;

    assert_eq!(codes(state.plant()), vec!["BSS-75", "EX7-43", "LT-01"]);
    assert_eq!(state.plant().units[1].unit_type, "A2B");
    assert_eq!(state.plant().units[1].cost_per_operational_hour, dec!(150000));
    assert!(store.document(StorageKey::Units).is_some());
}

#[tokio::test]
async fn non_list_body_falls_back_to_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ROSTER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"units": []})))
        .mount(&server)
        .await;

    let (mut state, _store) = common::test_app();
    state.ensure_unit_roster(&client_for(&server).await).await;
    assert_eq!(state.plant().units.len(), 3);
}

#[tokio::test]
async fn persisted_roster_is_never_refetched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ROSTER_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server).await;

    let store = Arc::new(InMemoryStore::new());
    let mut first_run = AppState::load(store.clone());
    assert!(first_run.ensure_unit_roster(&client).await);

    let mut second_run = AppState::load(store.clone());
    assert!(!second_run.ensure_unit_roster(&client).await);
    assert_eq!(codes(second_run.plant()), vec!["BSS-75", "EX7-43", "LT-01"]);
}
