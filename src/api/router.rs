//! Dashboard API router.
//!
//! Returns a composable `Router` with every page's routes nested under
//! `/api/`. Layers (outermost first): no-store header, access log.

use std::path::PathBuf;

use axum::http::{header, HeaderValue};
use axum::routing::{get, post};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;

/// Build the dashboard router for the store at `db_path`.
pub fn dashboard_router(db_path: impl Into<PathBuf>) -> Router {
    build_router(ApiContext::new(db_path))
}

fn build_router(ctx: ApiContext) -> Router {
    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/dashboard", get(endpoints::dashboard::overview))
        .route("/assistant/ask", post(endpoints::assistant::ask))
        .route("/assistant/questions", get(endpoints::assistant::questions))
        .route(
            "/patients",
            get(endpoints::patients::list).post(endpoints::patients::create),
        )
        .route("/patients/:id", get(endpoints::patients::detail))
        .route(
            "/doctors",
            get(endpoints::doctors::list).post(endpoints::doctors::create),
        )
        .route("/departments", get(endpoints::departments::list))
        .route(
            "/appointments",
            get(endpoints::appointments::list).post(endpoints::appointments::book),
        )
        .route(
            "/records",
            get(endpoints::records::list).post(endpoints::records::create),
        )
        .route("/analytics", get(endpoints::analytics::overview))
        .with_state(ctx);

    Router::new()
        .nest("/api", api)
        .layer(axum::middleware::from_fn(middleware::access_log::log_access))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::db::bootstrap;

    /// Router over a freshly bootstrapped (seeded) store.
    /// The tempdir guard must be kept alive for the duration of the test.
    fn seeded_app() -> (Router, tempfile::TempDir) {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("hospital.db");
        bootstrap(&path).unwrap();
        (dashboard_router(path), tmp)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        let json = if body.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, json)
    }

    // -- Health / headers --------------------------------------------------

    #[tokio::test]
    async fn health_reports_version_and_sets_no_store() {
        let (app, _tmp) = seeded_app();
        let resp = app.oneshot(get_request("/api/health")).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get("Cache-Control").unwrap(), "no-store");

        let body = resp.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], crate::config::APP_VERSION);
    }

    #[tokio::test]
    async fn error_responses_also_carry_no_store() {
        let (app, _tmp) = seeded_app();
        let resp = app.oneshot(get_request("/api/patients/999")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(resp.headers().get("Cache-Control").unwrap(), "no-store");
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let (app, _tmp) = seeded_app();
        let resp = app.oneshot(get_request("/api/nonexistent")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    // -- Dashboard ---------------------------------------------------------

    #[tokio::test]
    async fn dashboard_shows_seeded_counts() {
        let (app, _tmp) = seeded_app();
        let (status, json) = send(&app, get_request("/api/dashboard")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["stats"]["patients"], 5);
        assert_eq!(json["stats"]["doctors"], 7);
        assert_eq!(json["stats"]["appointments"], 5);
        assert_eq!(json["stats"]["pending"], 3);
        assert_eq!(json["appointments_by_department"].as_array().unwrap().len(), 5);
        assert_eq!(json["recent_appointments"].as_array().unwrap().len(), 5);
        // Latest booking first
        assert_eq!(json["recent_appointments"][0]["date"], "2024-12-23");
    }

    #[tokio::test]
    async fn dashboard_recent_list_is_capped() {
        let (app, _tmp) = seeded_app();
        for day in 1..=8 {
            let (status, _) = send(
                &app,
                post_json(
                    "/api/appointments",
                    serde_json::json!({
                        "patient_id": 1,
                        "doctor_id": 2,
                        "date": format!("2025-01-{day:02}"),
                        "time": "10:00",
                    }),
                ),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (_, json) = send(&app, get_request("/api/dashboard")).await;
        assert_eq!(json["stats"]["appointments"], 13);
        assert_eq!(json["recent_appointments"].as_array().unwrap().len(), 10);
    }

    // -- Assistant ---------------------------------------------------------

    #[tokio::test]
    async fn assistant_answers_patient_count() {
        let (app, _tmp) = seeded_app();
        let (status, json) = send(
            &app,
            post_json(
                "/api/assistant/ask",
                serde_json::json!({ "question": "How many patients?" }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["answer"], "Total Patients: 5");
    }

    #[tokio::test]
    async fn assistant_unknown_question_gets_help() {
        let (app, _tmp) = seeded_app();
        let (_, json) = send(
            &app,
            post_json("/api/assistant/ask", serde_json::json!({ "question": "xyzzy" })),
        )
        .await;
        assert_eq!(json["answer"], crate::assistant::HELP_TEXT);
    }

    #[tokio::test]
    async fn assistant_rejects_empty_question() {
        let (app, _tmp) = seeded_app();
        let (status, json) = send(
            &app,
            post_json("/api/assistant/ask", serde_json::json!({ "question": "   " })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "VALIDATION_FAILED");
    }

    #[tokio::test]
    async fn assistant_lists_questions() {
        let (app, _tmp) = seeded_app();
        let (status, json) = send(&app, get_request("/api/assistant/questions")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["questions"].as_array().unwrap().len(), 5);
        assert_eq!(json["questions"][0]["topic"], "patient count");
    }

    // -- Patients ----------------------------------------------------------

    #[tokio::test]
    async fn add_patient_then_search_finds_it() {
        let (app, _tmp) = seeded_app();
        let (status, json) = send(
            &app,
            post_json(
                "/api/patients",
                serde_json::json!({
                    "name": "Zubair Hussain",
                    "age": 41,
                    "gender": "Male",
                    "blood_group": "O-",
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = json["id"].as_i64().unwrap();

        let (status, json) = send(&app, get_request("/api/patients?search=zubair")).await;
        assert_eq!(status, StatusCode::OK);
        let patients = json["patients"].as_array().unwrap();
        assert_eq!(patients.len(), 1);
        assert_eq!(patients[0]["id"], id);
        assert_eq!(patients[0]["blood_group"], "O-");
        assert!(patients[0]["registration_date"].is_string());
    }

    #[tokio::test]
    async fn patient_list_without_search_returns_all() {
        let (app, _tmp) = seeded_app();
        let (_, json) = send(&app, get_request("/api/patients")).await;
        assert_eq!(json["patients"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn add_patient_without_name_is_rejected() {
        let (app, _tmp) = seeded_app();
        let (status, json) = send(
            &app,
            post_json("/api/patients", serde_json::json!({ "age": 30 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "VALIDATION_FAILED");
        assert_eq!(json["error"]["message"], "Name is required");
    }

    #[tokio::test]
    async fn add_patient_with_unknown_gender_is_rejected() {
        let (app, _tmp) = seeded_app();
        let (status, json) = send(
            &app,
            post_json(
                "/api/patients",
                serde_json::json!({ "name": "X", "gender": "Unknown" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn patient_detail_includes_medical_history() {
        let (app, _tmp) = seeded_app();
        let (status, json) = send(&app, get_request("/api/patients/1")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["patient"]["name"], "Muhammad Asif");
        let history = json["medical_history"].as_array().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0]["diagnosis"], "Hypertension");
    }

    #[tokio::test]
    async fn missing_patient_detail_is_404() {
        let (app, _tmp) = seeded_app();
        let (status, json) = send(&app, get_request("/api/patients/999")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
        assert_eq!(json["error"]["message"], "Patient 999 not found");
    }

    #[tokio::test]
    async fn patient_detail_with_bad_id_is_400() {
        let (app, _tmp) = seeded_app();
        let (status, _) = send(&app, get_request("/api/patients/abc")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    // -- Doctors / departments ---------------------------------------------

    #[tokio::test]
    async fn doctors_list_carries_department_names() {
        let (app, _tmp) = seeded_app();
        let (status, json) = send(&app, get_request("/api/doctors")).await;
        assert_eq!(status, StatusCode::OK);
        let doctors = json["doctors"].as_array().unwrap();
        assert_eq!(doctors.len(), 7);
        assert!(doctors
            .iter()
            .any(|d| d["name"] == "Dr. Ahmed Khan" && d["department_name"] == "Cardiology"));
    }

    #[tokio::test]
    async fn add_doctor_with_unknown_department_is_constraint_error() {
        let (app, _tmp) = seeded_app();
        let (status, json) = send(
            &app,
            post_json(
                "/api/doctors",
                serde_json::json!({
                    "name": "Dr. Noor",
                    "specialization": "Dermatologist",
                    "department_id": 999,
                    "consultation_fee": 1500.0,
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "CONSTRAINT_VIOLATION");

        let (_, json) = send(&app, get_request("/api/doctors")).await;
        assert_eq!(json["doctors"].as_array().unwrap().len(), 7);
    }

    #[tokio::test]
    async fn add_doctor_succeeds() {
        let (app, _tmp) = seeded_app();
        let (status, json) = send(
            &app,
            post_json(
                "/api/doctors",
                serde_json::json!({
                    "name": "Dr. Noor",
                    "specialization": "Dermatologist",
                    "department_id": 1,
                    "experience_years": 4,
                    "consultation_fee": 1500.0,
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["id"], 8);
    }

    #[tokio::test]
    async fn departments_list_for_selector() {
        let (app, _tmp) = seeded_app();
        let (status, json) = send(&app, get_request("/api/departments")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["departments"].as_array().unwrap().len(), 5);
    }

    // -- Appointments ------------------------------------------------------

    #[tokio::test]
    async fn booking_ignores_client_status() {
        let (app, _tmp) = seeded_app();
        let (status, _) = send(
            &app,
            post_json(
                "/api/appointments",
                serde_json::json!({
                    "patient_id": 2,
                    "doctor_id": 6,
                    "date": "2025-02-01",
                    "time": "15:30",
                    "reason": "Palpitations",
                    "status": "Completed",
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, json) = send(&app, get_request("/api/appointments?status=Scheduled")).await;
        let scheduled = json["appointments"].as_array().unwrap();
        assert_eq!(scheduled.len(), 4);
        assert_eq!(scheduled[0]["date"], "2025-02-01");
        assert_eq!(scheduled[0]["time"], "03:30 PM");
        assert_eq!(scheduled[0]["status"], "Scheduled");
    }

    #[tokio::test]
    async fn appointment_status_filter() {
        let (app, _tmp) = seeded_app();

        let (_, json) = send(&app, get_request("/api/appointments")).await;
        assert_eq!(json["appointments"].as_array().unwrap().len(), 5);

        let (_, json) = send(&app, get_request("/api/appointments?status=All")).await;
        assert_eq!(json["appointments"].as_array().unwrap().len(), 5);

        let (_, json) = send(&app, get_request("/api/appointments?status=Completed")).await;
        assert_eq!(json["appointments"].as_array().unwrap().len(), 2);

        let (status, _) = send(&app, get_request("/api/appointments?status=Pending")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn booking_without_doctor_is_rejected() {
        let (app, _tmp) = seeded_app();
        let (status, json) = send(
            &app,
            post_json(
                "/api/appointments",
                serde_json::json!({ "patient_id": 1, "date": "2025-02-01" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["message"], "Doctor is required");
    }

    #[tokio::test]
    async fn booking_without_time_is_rejected() {
        let (app, _tmp) = seeded_app();
        let (status, json) = send(
            &app,
            post_json(
                "/api/appointments",
                serde_json::json!({ "patient_id": 1, "doctor_id": 1, "date": "2025-02-01" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "VALIDATION_FAILED");
        assert_eq!(json["error"]["message"], "Time is required");

        let (_, json) = send(&app, get_request("/api/dashboard")).await;
        assert_eq!(json["stats"]["appointments"], 5);
    }

    #[tokio::test]
    async fn booking_for_missing_patient_is_constraint_error() {
        let (app, _tmp) = seeded_app();
        let (status, json) = send(
            &app,
            post_json(
                "/api/appointments",
                serde_json::json!({
                    "patient_id": 404,
                    "doctor_id": 1,
                    "date": "2025-02-01",
                    "time": "09:00",
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "CONSTRAINT_VIOLATION");
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let (app, _tmp) = seeded_app();
        let req = Request::builder()
            .method("POST")
            .uri("/api/appointments")
            .header("Content-Type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, json) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    // -- Records -----------------------------------------------------------

    #[tokio::test]
    async fn add_record_and_filter_by_patient() {
        let (app, _tmp) = seeded_app();
        let (status, _) = send(
            &app,
            post_json(
                "/api/records",
                serde_json::json!({
                    "patient_id": 3,
                    "doctor_id": 3,
                    "visit_date": "2024-12-22",
                    "diagnosis": "Ligament strain",
                    "follow_up_date": "2025-01-05",
                    "cost": 4000.0,
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, json) = send(&app, get_request("/api/records?patient_id=3")).await;
        let records = json["records"].as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["diagnosis"], "Ligament strain");

        let (_, json) = send(&app, get_request("/api/records")).await;
        assert_eq!(json["records"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn record_with_negative_cost_is_rejected() {
        let (app, _tmp) = seeded_app();
        let (status, json) = send(
            &app,
            post_json(
                "/api/records",
                serde_json::json!({
                    "patient_id": 1,
                    "doctor_id": 1,
                    "visit_date": "2024-12-22",
                    "cost": -5.0,
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "VALIDATION_FAILED");
    }

    // -- Analytics ---------------------------------------------------------

    #[tokio::test]
    async fn analytics_counts_only_completed_visits() {
        let (app, _tmp) = seeded_app();
        let (status, json) = send(&app, get_request("/api/analytics")).await;
        assert_eq!(status, StatusCode::OK);

        // Completed: Dr. Sarah Ali (3500) and Dr. Omar Siddiqui (2000)
        assert_eq!(json["total_revenue"], 5500.0);
        let statuses = json["status_distribution"].as_array().unwrap();
        assert_eq!(statuses.len(), 3);
        assert_eq!(json["department_performance"].as_array().unwrap().len(), 5);
    }
}
