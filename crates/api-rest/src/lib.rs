//! # API REST
//!
//! REST API for HealthBro triage.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, status codes)
//!
//! All triage logic lives in `healthbro-core`; handlers only translate between JSON bodies and
//! the [`TriageService`].

#![warn(rust_2018_idioms)]

pub mod dto;

use axum::{
    extract::{Path as AxumPath, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use healthbro_core::{RawVitals, RecordId, SymptomSet, TriageError, TriageService};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use dto::{
    HealthRes, ListSymptomChecksRes, SymptomCheckRes, SymptomsReq, VerdictRes, VitalsReq,
};

/// Shared state for all handlers.
pub type AppState = Arc<TriageService>;

type ApiError = (StatusCode, &'static str);

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        assess_vitals,
        assess_symptoms,
        create_symptom_check,
        list_symptom_checks,
        get_symptom_check,
    ),
    components(schemas(
        HealthRes,
        VitalsReq,
        SymptomsReq,
        VerdictRes,
        SymptomCheckRes,
        ListSymptomChecksRes,
    ))
)]
pub struct ApiDoc;

/// Builds the REST router, including Swagger UI at `/swagger-ui`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/vitals/assess", post(assess_vitals))
        .route("/symptoms/assess", post(assess_symptoms))
        .route(
            "/symptom-checks",
            get(list_symptom_checks).post(create_symptom_check),
        )
        .route("/symptom-checks/:id", get(get_symptom_check))
        .merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn error_response(context: &str, e: TriageError) -> ApiError {
    match e {
        TriageError::InvalidInput(_) => {
            tracing::warn!("{}: {}", context, e);
            (StatusCode::BAD_REQUEST, "Invalid input")
        }
        TriageError::InvalidRecordId(_) => {
            tracing::warn!("{}: {}", context, e);
            (StatusCode::BAD_REQUEST, "Invalid symptom check id")
        }
        TriageError::HistoryFull => {
            tracing::error!("{}: {}", context, e);
            (StatusCode::INSUFFICIENT_STORAGE, "Symptom check history is full")
        }
        _ => {
            tracing::error!("{}: {:?}", context, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
        }
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for monitoring and load balancers.
#[axum::debug_handler]
async fn health() -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "HealthBro REST API is alive".into(),
    })
}

#[utoipa::path(
    post,
    path = "/vitals/assess",
    request_body = VitalsReq,
    responses(
        (status = 200, description = "Vitals verdict", body = VerdictRes)
    )
)]
/// Assess a set of vital signs.
///
/// Missing heart rate, temperature or SpO2 fall back to the normal baseline; a malformed blood
/// pressure skips the blood pressure guards. The assessment itself cannot fail.
#[axum::debug_handler]
async fn assess_vitals(
    State(state): State<AppState>,
    Json(req): Json<VitalsReq>,
) -> Json<VerdictRes> {
    let reading = RawVitals::from(req).to_reading();
    let verdict = state.assess_vitals(&reading);
    Json(VerdictRes::from(&verdict))
}

#[utoipa::path(
    post,
    path = "/symptoms/assess",
    request_body = SymptomsReq,
    responses(
        (status = 200, description = "Symptom verdict", body = VerdictRes)
    )
)]
/// Assess a set of symptoms without recording it.
#[axum::debug_handler]
async fn assess_symptoms(
    State(state): State<AppState>,
    Json(req): Json<SymptomsReq>,
) -> Json<VerdictRes> {
    let symptoms = SymptomSet::new(req.symptoms);
    let verdict = state.assess_symptoms(&symptoms);
    Json(VerdictRes::from(&verdict))
}

#[utoipa::path(
    post,
    path = "/symptom-checks",
    request_body = SymptomsReq,
    responses(
        (status = 201, description = "Symptom check recorded", body = SymptomCheckRes),
        (status = 400, description = "No symptoms given"),
        (status = 507, description = "History is full"),
        (status = 500, description = "Internal server error")
    )
)]
/// Assess a set of symptoms and add it to the session history.
///
/// # Errors
/// Returns `400 Bad Request` if no non-blank symptom is given.
#[axum::debug_handler]
async fn create_symptom_check(
    State(state): State<AppState>,
    Json(req): Json<SymptomsReq>,
) -> Result<(StatusCode, Json<SymptomCheckRes>), ApiError> {
    match state.check_symptoms(req.symptoms) {
        Ok(record) => Ok((StatusCode::CREATED, Json(SymptomCheckRes::from(&record)))),
        Err(e) => Err(error_response("Record symptom check error", e)),
    }
}

#[utoipa::path(
    get,
    path = "/symptom-checks",
    responses(
        (status = 200, description = "Recorded symptom checks, newest first", body = ListSymptomChecksRes),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
async fn list_symptom_checks(
    State(state): State<AppState>,
) -> Result<Json<ListSymptomChecksRes>, ApiError> {
    let records = state
        .history()
        .map_err(|e| error_response("List symptom checks error", e))?;
    Ok(Json(ListSymptomChecksRes {
        checks: records.iter().map(SymptomCheckRes::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/symptom-checks/{id}",
    params(
        ("id" = String, Path, description = "Symptom check id, e.g. SC-1234")
    ),
    responses(
        (status = 200, description = "Symptom check", body = SymptomCheckRes),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "No such symptom check"),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
async fn get_symptom_check(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<SymptomCheckRes>, ApiError> {
    let id: RecordId = id
        .parse()
        .map_err(|e| error_response("Get symptom check error", e))?;

    match state.find(id) {
        Ok(Some(record)) => Ok(Json(SymptomCheckRes::from(&record))),
        Ok(None) => Err((StatusCode::NOT_FOUND, "Symptom check not found")),
        Err(e) => Err(error_response("Get symptom check error", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use http_body_util::BodyExt;
    use serde::de::DeserializeOwned;
    use tower::ServiceExt;

    fn app() -> (Router, AppState) {
        let state = Arc::new(TriageService::default());
        (router(state.clone()), state)
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn read_json<T: DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (app, _) = app();
        let response = app.oneshot(get_req("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: HealthRes = read_json(response).await;
        assert!(body.ok);
    }

    #[tokio::test]
    async fn vitals_with_low_saturation_are_high() {
        let (app, _) = app();
        let response = app
            .oneshot(post_json(
                "/vitals/assess",
                serde_json::json!({ "oxygen_saturation": 85.0, "heart_rate": 130.0 }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let verdict: VerdictRes = read_json(response).await;
        assert_eq!(verdict.severity, "High");
        assert_eq!(verdict.fired_rules, vec!["severe-hypoxemia"]);
        assert!(verdict.candidate_conditions.is_empty());
    }

    #[tokio::test]
    async fn empty_vitals_body_is_baseline() {
        let (app, _) = app();
        let response = app
            .oneshot(post_json("/vitals/assess", serde_json::json!({})))
            .await
            .unwrap();
        let verdict: VerdictRes = read_json(response).await;
        assert_eq!(verdict.severity, "Low");
        assert_eq!(verdict.fired_rules, vec!["vitals-normal"]);
    }

    #[tokio::test]
    async fn malformed_blood_pressure_is_skipped() {
        let (app, _) = app();
        let response = app
            .oneshot(post_json(
                "/vitals/assess",
                serde_json::json!({ "blood_pressure": "high", "temperature": 39.0 }),
            ))
            .await
            .unwrap();
        let verdict: VerdictRes = read_json(response).await;
        assert_eq!(verdict.severity, "Medium");
        assert_eq!(verdict.fired_rules, vec!["febrile"]);
    }

    #[tokio::test]
    async fn symptom_assessment_does_not_record() {
        let (app, state) = app();
        let response = app
            .oneshot(post_json(
                "/symptoms/assess",
                serde_json::json!({ "symptoms": ["Fever", "Cough"] }),
            ))
            .await
            .unwrap();
        let verdict: VerdictRes = read_json(response).await;
        assert_eq!(verdict.severity, "Medium");
        assert_eq!(verdict.candidate_conditions[0], "Influenza");
        assert!(state.history().unwrap().is_empty());
    }

    #[tokio::test]
    async fn symptom_checks_are_created_listed_and_fetched() {
        let (app, _) = app();

        let response = app
            .clone()
            .oneshot(post_json(
                "/symptom-checks",
                serde_json::json!({ "symptoms": ["Chest pain"] }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: SymptomCheckRes = read_json(response).await;
        assert!(created.id.starts_with("SC-"));
        assert_eq!(created.id.len(), 7);
        assert_eq!(created.verdict.severity, "High");
        assert_eq!(created.symptoms, vec!["Chest pain"]);

        let response = app.clone().oneshot(get_req("/symptom-checks")).await.unwrap();
        let list: ListSymptomChecksRes = read_json(response).await;
        assert_eq!(list.checks, vec![created.clone()]);

        let response = app
            .oneshot(get_req(&format!("/symptom-checks/{}", created.id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let fetched: SymptomCheckRes = read_json(response).await;
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn empty_symptom_check_is_bad_request() {
        let (app, state) = app();
        let response = app
            .oneshot(post_json(
                "/symptom-checks",
                serde_json::json!({ "symptoms": ["", "   "] }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(state.history().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_and_malformed_ids() {
        let (app, _) = app();

        let response = app.clone().oneshot(get_req("/symptom-checks/SC-1000")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app.oneshot(get_req("/symptom-checks/nope")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/vitals/assess",
            "/symptoms/assess",
            "/symptom-checks",
            "/symptom-checks/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
