pub mod paths;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::{
    handlers::{appointments, auth, doctors, health, prescriptions},
    openapi,
    server::HospitalServer,
};

/// Create health check routes
pub fn health_routes() -> Router<HospitalServer> {
    Router::new().route(paths::health::HEALTH, get(health::health_check))
}

/// Create API documentation routes
pub fn docs_routes() -> Router<HospitalServer> {
    Router::new().route(paths::docs::OPENAPI_JSON, get(openapi::openapi_json))
}

/// Create authentication routes
pub fn auth_routes() -> Router<HospitalServer> {
    Router::new()
        .route(paths::auth::LOGIN, post(auth::login))
        .route(paths::auth::REGISTER_PATIENT, post(auth::register_patient))
        .route(paths::auth::ADMIN_USERS, post(auth::create_user))
}

/// Create appointment routes
pub fn appointment_routes() -> Router<HospitalServer> {
    Router::new()
        .route(paths::appointments::BASE, post(appointments::create_appointment))
        .route(paths::appointments::ALL, get(appointments::list_all_appointments))
        .route(paths::appointments::MY_APPOINTMENTS, get(appointments::my_appointments))
        .route(
            paths::appointments::MY_APPOINTMENT_DETAILS,
            get(appointments::my_appointment_details),
        )
        .route(
            paths::appointments::DOCTOR_APPOINTMENTS,
            get(appointments::doctor_appointments),
        )
        .route(
            paths::appointments::WITH_DOCTOR,
            get(appointments::appointments_with_doctor),
        )
        .route(
            paths::appointments::STATUS,
            put(appointments::update_appointment_status),
        )
}

/// Create prescription routes
pub fn prescription_routes() -> Router<HospitalServer> {
    Router::new()
        .route(paths::prescriptions::BASE, get(prescriptions::list_prescriptions))
        .route(paths::prescriptions::ISSUE, post(prescriptions::issue_prescription))
        .route(
            paths::prescriptions::MY_PRESCRIPTIONS,
            get(prescriptions::my_prescriptions),
        )
        .route(
            paths::prescriptions::BY_ID,
            get(prescriptions::get_prescription).delete(prescriptions::delete_prescription),
        )
}

/// Create doctor directory routes
pub fn doctor_routes() -> Router<HospitalServer> {
    Router::new()
        .route(
            paths::doctors::BASE,
            get(doctors::list_doctors).post(doctors::register_doctor),
        )
        .route(paths::doctors::MY_DETAILS, get(doctors::my_doctor_details))
        .route(
            paths::doctors::BY_EMAIL,
            get(doctors::get_doctor)
                .put(doctors::update_doctor)
                .delete(doctors::delete_doctor),
        )
}

/// Create all routes
pub fn create_routes() -> Router<HospitalServer> {
    Router::new()
        .merge(health_routes())
        .merge(docs_routes())
        .merge(auth_routes())
        .merge(appointment_routes())
        .merge(prescription_routes())
        .merge(doctor_routes())
}
