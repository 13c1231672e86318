//! End-to-end API tests against the in-memory store.

use auth_identity::{IdentityConfig, NewAccount, PasswordScheme, Role};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use config_engine::ServerSettings;
use hospital_server::{create_app, HospitalServer};
use serde_json::{json, Value};
use tower::ServiceExt;

const ADMIN: (&str, &str) = ("admin@hospital.dev", "admin-pass");
const DOCTOR: (&str, &str) = ("dr@x.com", "doctor-pass");
const OTHER_DOCTOR: (&str, &str) = ("other.dr@x.com", "doctor-pass");

fn identity_config() -> IdentityConfig {
    IdentityConfig {
        password_scheme: PasswordScheme::Bcrypt { cost: 4 },
        ..IdentityConfig::new("integration-test-secret")
    }
}

struct TestApp {
    app: Router,
}

impl TestApp {
    async fn with_settings(settings: ServerSettings) -> Self {
        let server = HospitalServer::in_memory(&identity_config(), settings);
        server
            .identity
            .register_user(NewAccount {
                email: ADMIN.0.to_string(),
                password: ADMIN.1.to_string(),
                role: Role::Admin,
            })
            .await
            .unwrap();
        Self {
            app: create_app(server),
        }
    }

    async fn new() -> Self {
        Self::with_settings(ServerSettings::default()).await
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    async fn login(&self, (email, password): (&str, &str)) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/login",
                None,
                Some(json!({"email": email, "password": password})),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed for {email}: {body}");
        body["token"].as_str().unwrap().to_string()
    }

    async fn register_patient(&self, name: &str, email: &str) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/patients/register",
                None,
                Some(json!({"name": name, "email": email, "password": "patient-pass"})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        assert_eq!(body["role"], "ROLE_PATIENT");
        self.login((email, "patient-pass")).await
    }

    async fn register_doctor(&self, admin: &str, (email, password): (&str, &str)) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/doctors",
                Some(admin),
                Some(json!({
                    "email": email,
                    "firstName": "Gregory",
                    "lastName": "House",
                    "specialization": "Diagnostics",
                    "password": password
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        self.login((email, password)).await
    }

    async fn book(&self, patient: &str, doctor_email: &str) -> Value {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/appointments",
                Some(patient),
                Some(json!({
                    "patientName": "Jane",
                    "doctorName": doctor_email,
                    "date": "2024-05-01",
                    "time": "10:00"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body
    }

    async fn issue(&self, doctor: &str, patient_email: &str) -> Value {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/prescriptions/issue",
                Some(doctor),
                Some(json!({
                    "patientName": "Jane",
                    "patientEmail": patient_email,
                    "medicines": ["Amoxicillin 500mg", "Paracetamol"],
                    "instructions": "After meals"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body
    }
}

#[tokio::test]
async fn booking_uses_caller_identity_and_pending_status() {
    let app = TestApp::new().await;
    let jane = app.register_patient("Jane", "jane@x.com").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/appointments",
            Some(&jane),
            Some(json!({
                "patientName": "Jane",
                "doctorName": "dr@x.com",
                "date": "2024-05-01",
                "time": "10:00",
                "patientEmail": "mallory@x.com",
                "status": "APPROVED"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["patientEmail"], "jane@x.com");
    assert_eq!(body["status"], "PENDING");
    assert_eq!(body["doctorName"], "dr@x.com");
    assert!(body["id"].is_i64());
}

#[tokio::test]
async fn booking_rejects_missing_and_malformed_fields() {
    let app = TestApp::new().await;
    let jane = app.register_patient("Jane", "jane@x.com").await;

    for payload in [
        json!({"doctorName": "dr@x.com", "date": "2024-05-01", "time": "10:00"}),
        json!({"patientName": "Jane", "doctorName": "dr@x.com", "date": "01/05/2024", "time": "10:00"}),
        json!({"patientName": "Jane", "doctorName": "dr@x.com", "date": "2024-05-01", "time": "ten"}),
    ] {
        let (status, body) = app
            .send(Method::POST, "/api/appointments", Some(&jane), Some(payload))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(body["errorType"], "validation_error");
    }
}

#[tokio::test]
async fn login_failures() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/login",
            None,
            Some(json!({"email": ADMIN.0, "password": "wrong"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.get("token").is_none());
    assert!(body["error"].is_string());

    let (status, _) = app
        .send(
            Method::POST,
            "/api/login",
            None,
            Some(json!({"email": "nobody@x.com", "password": "whatever"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send(
            Method::POST,
            "/api/login",
            None,
            Some(json!({"email": "", "password": ""})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_returns_authority_role() {
    let app = TestApp::new().await;
    let (status, body) = app
        .send(
            Method::POST,
            "/api/login",
            None,
            Some(json!({"email": ADMIN.0, "password": ADMIN.1})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], ADMIN.0);
    assert_eq!(body["role"], "ROLE_ADMIN");
    assert!(body["token"].as_str().is_some_and(|t| t.split('.').count() == 3));
    let expires_at = body["expiresAt"]
        .as_str()
        .and_then(|raw| chrono::DateTime::parse_from_rfc3339(raw).ok())
        .unwrap();
    assert!(expires_at > chrono::Utc::now());
}

#[tokio::test]
async fn malformed_requests_get_error_bodies() {
    let app = TestApp::new().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["errorType"], "validation_error");
    assert_eq!(body["errorCode"], "VALIDATION_1003");
    assert!(body["errorId"].is_string());

    let admin = app.login(ADMIN).await;
    let (status, body) = app
        .send(
            Method::PUT,
            "/api/appointments/abc/status?status=APPROVED",
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorType"], "validation_error");
}

#[tokio::test]
async fn authentication_precedes_authorization() {
    let app = TestApp::new().await;
    let jane = app.register_patient("Jane", "jane@x.com").await;

    let (status, body) = app
        .send(Method::GET, "/api/appointments/all", None, None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["errorType"], "authentication_error");
    assert!(body["errorId"].is_string());
    assert!(body["timestamp"].is_string());

    let (status, _) = app
        .send(Method::GET, "/api/appointments/all", Some("not-a-token"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .send(Method::GET, "/api/appointments/all", Some(&jane), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["errorType"], "authorization_error");
}

#[tokio::test]
async fn patients_only_see_their_own_records() {
    let app = TestApp::new().await;
    let admin = app.login(ADMIN).await;
    let doctor = app.register_doctor(&admin, DOCTOR).await;
    let jane = app.register_patient("Jane", "jane@x.com").await;
    let bob = app.register_patient("Bob", "bob@x.com").await;

    app.book(&jane, DOCTOR.0).await;
    app.book(&bob, DOCTOR.0).await;
    let bobs_script = app.issue(&doctor, "bob@x.com").await;
    app.issue(&doctor, "jane@x.com").await;

    let (status, body) = app
        .send(Method::GET, "/api/appointments/my-appointments", Some(&jane), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let mine = body.as_array().unwrap();
    assert_eq!(mine.len(), 1);
    assert!(mine.iter().all(|a| a["patientEmail"] == "jane@x.com"));

    let (_, body) = app
        .send(Method::GET, "/api/prescriptions/my-prescriptions", Some(&jane), None)
        .await;
    let scripts = body.as_array().unwrap();
    assert_eq!(scripts.len(), 1);
    assert_eq!(scripts[0]["patientEmail"], "jane@x.com");

    let uri = format!("/api/prescriptions/{}", bobs_script["id"]);
    let (status, _) = app.send(Method::GET, &uri, Some(&jane), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.send(Method::GET, &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn status_update_of_unknown_appointment_is_not_found() {
    let app = TestApp::new().await;
    let admin = app.login(ADMIN).await;

    let (status, body) = app
        .send(
            Method::PUT,
            "/api/appointments/4242/status?status=APPROVED",
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["errorType"], "not_found");

    let (_, body) = app
        .send(Method::GET, "/api/appointments/all", Some(&admin), None)
        .await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn status_lifecycle() {
    let app = TestApp::new().await;
    let admin = app.login(ADMIN).await;
    let doctor = app.register_doctor(&admin, DOCTOR).await;
    let other = app.register_doctor(&admin, OTHER_DOCTOR).await;
    let jane = app.register_patient("Jane", "jane@x.com").await;
    let id = app.book(&jane, DOCTOR.0).await["id"].clone();

    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/api/appointments/{id}/status?status=approved"),
            Some(&other),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/api/appointments/{id}/status?status=CANCELLED"),
            Some(&doctor),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/api/appointments/{id}/status"),
            Some(&doctor),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/appointments/{id}/status?status=approved"),
            Some(&doctor),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "APPROVED");

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/appointments/{id}/status?status=PENDING"),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["errorType"], "invalid_transition");

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/appointments/{id}/status?status=COMPLETED"),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "COMPLETED");

    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/api/appointments/{id}/status?status=APPROVED"),
            Some(&jane),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, body) = app
        .send(
            Method::GET,
            "/api/appointments/my-appointments?status=COMPLETED",
            Some(&jane),
            None,
        )
        .await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn admin_listing_filters() {
    let app = TestApp::new().await;
    let admin = app.login(ADMIN).await;
    let jane = app.register_patient("Jane", "jane@x.com").await;
    app.book(&jane, DOCTOR.0).await;
    let (status, _) = app
        .send(
            Method::POST,
            "/api/appointments",
            Some(&jane),
            Some(json!({
                "patientName": "Jane",
                "doctorName": DOCTOR.0,
                "date": "2024-06-01",
                "time": "09:30:00"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, all) = app
        .send(Method::GET, "/api/appointments/all", Some(&admin), None)
        .await;
    assert_eq!(all.as_array().map(Vec::len), Some(2));

    let (_, june) = app
        .send(
            Method::GET,
            "/api/appointments/all?date=2024-06-01&status=pending",
            Some(&admin),
            None,
        )
        .await;
    let june = june.as_array().unwrap();
    assert_eq!(june.len(), 1);
    assert_eq!(june[0]["time"], "09:30:00");

    let (_, approved) = app
        .send(
            Method::GET,
            "/api/appointments/all?status=APPROVED",
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(approved, json!([]));

    let (status, _) = app
        .send(
            Method::GET,
            "/api/appointments/all?date=June",
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn prescription_delete_then_fetch() {
    let app = TestApp::new().await;
    let admin = app.login(ADMIN).await;
    let doctor = app.register_doctor(&admin, DOCTOR).await;
    let other = app.register_doctor(&admin, OTHER_DOCTOR).await;

    let script = app.issue(&doctor, "jane@x.com").await;
    assert_eq!(script["doctorName"], DOCTOR.0);
    assert_eq!(script["issued"], false);
    assert_eq!(script["medicines"], json!(["Amoxicillin 500mg", "Paracetamol"]));
    let uri = format!("/api/prescriptions/{}", script["id"]);

    let (status, _) = app.send(Method::DELETE, &uri, Some(&other), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.send(Method::DELETE, &uri, Some(&doctor), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = app.send(Method::GET, &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.send(Method::DELETE, &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn prescription_input_is_validated() {
    let app = TestApp::new().await;
    let admin = app.login(ADMIN).await;
    let doctor = app.register_doctor(&admin, DOCTOR).await;

    for payload in [
        json!({"patientName": "Jane", "patientEmail": "jane@x.com", "medicines": []}),
        json!({"patientName": "Jane", "patientEmail": "jane@x.com", "medicines": ["  "]}),
        json!({"patientName": "Jane", "patientEmail": "not-an-email", "medicines": ["A"]}),
    ] {
        let (status, _) = app
            .send(Method::POST, "/api/prescriptions/issue", Some(&doctor), Some(payload))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    let (status, _) = app
        .send(
            Method::POST,
            "/api/prescriptions/issue",
            Some(&admin),
            Some(json!({"patientName": "Jane", "patientEmail": "jane@x.com", "medicines": ["A"]})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn doctor_directory_and_joined_views() {
    let app = TestApp::new().await;
    let admin = app.login(ADMIN).await;
    let doctor = app.register_doctor(&admin, DOCTOR).await;
    let jane = app.register_patient("Jane", "jane@x.com").await;

    let (status, _) = app
        .send(
            Method::POST,
            "/api/doctors",
            Some(&admin),
            Some(json!({
                "email": DOCTOR.0,
                "firstName": "Again",
                "lastName": "House",
                "specialization": "Diagnostics",
                "password": "doctor-pass"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, me) = app
        .send(Method::GET, "/api/doctors/mydetails", Some(&doctor), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], DOCTOR.0);
    assert_eq!(me["firstName"], "Gregory");

    let (status, listed) = app.send(Method::GET, "/api/doctors", Some(&jane), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(1));

    let (status, _) = app
        .send(Method::GET, &format!("/api/doctors/{}", DOCTOR.0), Some(&jane), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    app.book(&jane, DOCTOR.0).await;
    app.book(&jane, "unknown.dr@x.com").await;

    let (_, details) = app
        .send(
            Method::GET,
            "/api/appointments/my-appointments/details",
            Some(&jane),
            None,
        )
        .await;
    let details = details.as_array().unwrap();
    assert_eq!(details.len(), 1);
    assert_eq!(details[0]["doctorLastName"], "House");
    assert_eq!(details[0]["specialization"], "Diagnostics");

    let (status, dashboard) = app
        .send(Method::GET, "/api/appointments/with-doctor", Some(&doctor), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dashboard.as_array().map(Vec::len), Some(1));

    let (_, assigned) = app
        .send(
            Method::GET,
            "/api/appointments/doctor-appointments",
            Some(&doctor),
            None,
        )
        .await;
    assert_eq!(assigned.as_array().map(Vec::len), Some(1));

    let uri = format!("/api/doctors/{}", DOCTOR.0);
    let (status, _) = app.send(Method::DELETE, &uri, Some(&doctor), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.send(Method::DELETE, &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.send(Method::GET, &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleted_doctor_cannot_log_in_and_email_is_reusable() {
    let app = TestApp::new().await;
    let admin = app.login(ADMIN).await;
    app.register_doctor(&admin, DOCTOR).await;

    let uri = format!("/api/doctors/{}", DOCTOR.0);
    let (status, _) = app.send(Method::DELETE, &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app
        .send(
            Method::POST,
            "/api/login",
            None,
            Some(json!({"email": DOCTOR.0, "password": DOCTOR.1})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["errorCode"], "AUTH_2001");

    let token = app.register_doctor(&admin, DOCTOR).await;
    let (status, me) = app
        .send(Method::GET, "/api/doctors/mydetails", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], DOCTOR.0);
}

#[tokio::test]
async fn admin_updates_doctor_profile() {
    let app = TestApp::new().await;
    let admin = app.login(ADMIN).await;
    let doctor = app.register_doctor(&admin, DOCTOR).await;
    let update = json!({
        "firstName": "Lisa",
        "lastName": "Cuddy",
        "specialization": "Endocrinology"
    });

    let uri = format!("/api/doctors/{}", DOCTOR.0);
    let (status, _) = app
        .send(Method::PUT, &uri, Some(&doctor), Some(update.clone()))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .send(Method::PUT, &uri, Some(&admin), Some(update.clone()))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["email"], DOCTOR.0);
    assert_eq!(body["lastName"], "Cuddy");

    let (_, me) = app
        .send(Method::GET, "/api/doctors/mydetails", Some(&doctor), None)
        .await;
    assert_eq!(me["specialization"], "Endocrinology");

    let (status, body) = app
        .send(
            Method::PUT,
            "/api/doctors/nobody@x.com",
            Some(&admin),
            Some(update),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["errorType"], "not_found");

    let (status, _) = app
        .send(
            Method::PUT,
            &uri,
            Some(&admin),
            Some(json!({"firstName": "Lisa", "lastName": " ", "specialization": "x"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn admin_creates_staff_accounts() {
    let app = TestApp::new().await;
    let admin = app.login(ADMIN).await;
    let doctor = app.register_doctor(&admin, DOCTOR).await;
    let script = app.issue(&doctor, "jane@x.com").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/admin/users",
            Some(&admin),
            Some(json!({"email": "nurse@x.com", "password": "nurse-pass", "role": "nurse"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["role"], "ROLE_NURSE");

    let (status, _) = app
        .send(
            Method::POST,
            "/api/admin/users",
            Some(&admin),
            Some(json!({"email": "x@x.com", "password": "pass-word", "role": "janitor"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send(
            Method::POST,
            "/api/admin/users",
            Some(&admin),
            Some(json!({"email": "nurse@x.com", "password": "nurse-pass", "role": "ROLE_STAFF"})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let nurse = app.login(("nurse@x.com", "nurse-pass")).await;
    let (status, _) = app
        .send(
            Method::GET,
            &format!("/api/prescriptions/{}", script["id"]),
            Some(&nurse),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .send(Method::GET, "/api/prescriptions", Some(&nurse), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(
            Method::POST,
            "/api/admin/users",
            Some(&nurse),
            Some(json!({"email": "y@x.com", "password": "pass-word", "role": "admin"})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn duplicate_patient_registration_conflicts() {
    let app = TestApp::new().await;
    app.register_patient("Jane", "jane@x.com").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/patients/register",
            None,
            Some(json!({"name": "Jane", "email": "jane@x.com", "password": "patient-pass"})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["errorType"], "conflict");
}

#[tokio::test]
async fn health_and_docs_are_public() {
    let app = TestApp::new().await;

    let (status, body) = app.send(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["database"], "in-memory");

    let (status, body) = app
        .send(Method::GET, "/api-docs/openapi.json", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/login"].is_object());
}

#[tokio::test]
async fn routes_are_nested_under_context_path() {
    let app = TestApp::with_settings(ServerSettings {
        context_path: Some("/hospital".to_string()),
        ..ServerSettings::default()
    })
    .await;

    let (status, _) = app.send(Method::GET, "/hospital/health", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.send(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .send(
            Method::POST,
            "/hospital/api/login",
            None,
            Some(json!({"email": ADMIN.0, "password": ADMIN.1})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "ROLE_ADMIN");
}

async fn preflight(app: &TestApp, origin: &str) -> axum::http::HeaderMap {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/login")
        .header(header::ORIGIN, origin)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = app.app.clone().oneshot(request).await.unwrap();
    response.headers().clone()
}

#[tokio::test]
async fn cors_preflight_allows_only_the_configured_origin() {
    let app = TestApp::new().await;

    let headers = preflight(&app, "http://localhost:3000").await;
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:3000"
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );

    let headers = preflight(&app, "http://evil.example").await;
    assert!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    assert!(headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).is_none());
}
