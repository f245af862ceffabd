//! Integration tests for the species-prediction API endpoints.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use corvus_api::{AppState, build_router};
use recording_structs::{RecordingRecord, Season};
use rf_model::{ForestConfig, TrainedArtifacts, TrainingConfig, train_species_model};
use serde_json::{Value, json};
use tower::util::ServiceExt; // for `oneshot` method

/// Test helper: synthetic dataset with two cleanly separable species.
fn test_records() -> Vec<RecordingRecord> {
    let mut records = Vec::new();

    for _ in 0..20 {
        records.push(RecordingRecord {
            cnt: "Finland".to_string(),
            date: "2020-02-15".to_string(),
            en: "Hooded Crow".to_string(),
            season: Some(Season::Winter),
        });
        records.push(RecordingRecord {
            cnt: "Spain".to_string(),
            date: "2020-07-01".to_string(),
            en: "Common Raven".to_string(),
            season: Some(Season::Summer),
        });
        records.push(RecordingRecord {
            cnt: "Norway".to_string(),
            date: "2020-10-05".to_string(),
            en: "Rook".to_string(),
            season: Some(Season::Fall),
        });
    }

    records
}

/// Test helper: train a small forest on the synthetic dataset.
fn train_artifacts() -> TrainedArtifacts {
    let config = TrainingConfig {
        forest: ForestConfig {
            n_trees: 25,
            ..ForestConfig::default()
        },
        ..TrainingConfig::default()
    };

    train_species_model(&test_records(), &config).expect("training should succeed")
}

/// Test helper: full app with artifacts written to a temp directory.
fn setup_app(dir: &tempfile::TempDir, with_dataset: bool) -> axum::Router {
    let artifacts = train_artifacts();

    let metrics_path = dir.path().join("model_metrics.json");
    rf_model::save_metrics(&metrics_path, &artifacts.metadata.metrics).expect("save metrics");

    let dataset = with_dataset.then(test_records);

    let state = AppState::new(artifacts.model, artifacts.metadata, dataset, metrics_path);
    build_router(state)
}

/// Test helper: GET request.
fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Test helper: POST /predict with a JSON body.
fn predict_request(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Test helper: extract JSON body from a response.
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

#[tokio::test]
async fn test_home_liveness_string() {
    let dir = tempfile::tempdir().unwrap();
    let app = setup_app(&dir, true);

    let response = app.oneshot(get_request("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"Corvus API is up");
}

#[tokio::test]
async fn test_lookup_keys_match_model_classes() {
    let dir = tempfile::tempdir().unwrap();
    let artifacts = train_artifacts();
    let expected: Vec<String> = artifacts
        .model
        .classes()
        .iter()
        .map(ToString::to_string)
        .collect();

    let app = setup_app(&dir, true);
    let response = app.oneshot(get_request("/lookup")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let lookup = body.as_object().unwrap();

    let mut keys: Vec<String> = lookup.keys().cloned().collect();
    keys.sort_by_key(|k| k.parse::<usize>().unwrap());
    assert_eq!(keys, expected);
}

#[tokio::test]
async fn test_predict_returns_top_3_sorted() {
    let dir = tempfile::tempdir().unwrap();
    let app = setup_app(&dir, true);

    let request = predict_request(&json!({ "cnt": "Finland", "season": "Winter" }));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let predictions = body["top_3_predictions"].as_array().unwrap();

    assert_eq!(predictions.len(), 3);

    let probs: Vec<f64> = predictions
        .iter()
        .map(|p| p["probability"].as_f64().unwrap())
        .collect();

    assert!(probs.windows(2).all(|pair| pair[0] >= pair[1]));
    assert!(probs.iter().all(|&p| (0.0..=1.0).contains(&p)));
    assert!(probs.iter().sum::<f64>() <= 1.0 + 1e-9);

    // Finland in winter is the Hooded Crow stronghold in the fixture
    assert_eq!(predictions[0]["species"], "Hooded Crow");
    assert!(probs[0] > 0.5);
}

#[tokio::test]
async fn test_predict_missing_field_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();

    for body in [json!({ "season": "Winter" }), json!({ "cnt": "Finland" }), json!({})] {
        let app = setup_app(&dir, true);
        let response = app.oneshot(predict_request(&body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = extract_json(response.into_body()).await;
        assert!(body["error"].as_str().unwrap().contains("Missing"));
    }
}

#[tokio::test]
async fn test_predict_unseen_category_is_server_error() {
    let dir = tempfile::tempdir().unwrap();
    let app = setup_app(&dir, true);

    let request = predict_request(&json!({ "cnt": "Atlantis", "season": "Winter" }));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = extract_json(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("unseen"));
}

#[tokio::test]
async fn test_predict_unseen_season_is_server_error() {
    let dir = tempfile::tempdir().unwrap();
    let app = setup_app(&dir, true);

    // Spring never appears in the fixture dataset
    let request = predict_request(&json!({ "cnt": "Finland", "season": "Spring" }));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_metrics_served_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let app = setup_app(&dir, true);

    let response = app.oneshot(get_request("/metrics")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert!(body["accuracy"].is_number());
    assert!(body["kappa"].is_number());
    assert!(body["nir"].is_number());
    assert!(body["ci_lower"].is_number());
    assert!(body["ci_upper"].is_number());
    assert!(body["p_value"].is_number());
    assert!(body["confusion_matrix"].is_array());
    assert!(body["species_stats"].is_array());
}

#[tokio::test]
async fn test_metrics_missing_file_is_server_error() {
    let dir = tempfile::tempdir().unwrap();
    let app = setup_app(&dir, true);

    std::fs::remove_file(dir.path().join("model_metrics.json")).unwrap();

    let response = app.oneshot(get_request("/metrics")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = extract_json(response.into_body()).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_metadata_returns_cached_records() {
    let dir = tempfile::tempdir().unwrap();
    let app = setup_app(&dir, true);

    let response = app.oneshot(get_request("/metadata")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let data = body["data"].as_array().unwrap();

    assert_eq!(data.len(), test_records().len());
    assert!(data.iter().all(|r| r["cnt"].is_string() && r["en"].is_string()));
}

#[tokio::test]
async fn test_metadata_unavailable_without_cache() {
    let dir = tempfile::tempdir().unwrap();
    let app = setup_app(&dir, false);

    let response = app.oneshot(get_request("/metadata")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "Metadata not available");
}
