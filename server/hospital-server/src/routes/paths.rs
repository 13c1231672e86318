//! Centralized API route path constants
//!
//! utoipa `#[path(...)]` attributes need string literals, so the paths in
//! handler annotations must be kept in sync with these by hand (using `{id}`
//! where the router uses `:id`).

/// Health check endpoints
pub mod health {
    pub const HEALTH: &str = "/health";
}

/// API documentation
pub mod docs {
    pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";
}

/// Authentication and account endpoints
pub mod auth {
    pub const LOGIN: &str = "/api/login";
    pub const REGISTER_PATIENT: &str = "/api/patients/register";
    pub const ADMIN_USERS: &str = "/api/admin/users";
}

/// Appointment endpoints
pub mod appointments {
    pub const BASE: &str = "/api/appointments";
    pub const ALL: &str = "/api/appointments/all";
    pub const MY_APPOINTMENTS: &str = "/api/appointments/my-appointments";
    pub const MY_APPOINTMENT_DETAILS: &str = "/api/appointments/my-appointments/details";
    pub const DOCTOR_APPOINTMENTS: &str = "/api/appointments/doctor-appointments";
    pub const WITH_DOCTOR: &str = "/api/appointments/with-doctor";
    pub const STATUS: &str = "/api/appointments/:id/status";
}

/// Prescription endpoints
pub mod prescriptions {
    pub const BASE: &str = "/api/prescriptions";
    pub const ISSUE: &str = "/api/prescriptions/issue";
    pub const MY_PRESCRIPTIONS: &str = "/api/prescriptions/my-prescriptions";
    pub const BY_ID: &str = "/api/prescriptions/:id";
}

/// Doctor directory endpoints
pub mod doctors {
    pub const BASE: &str = "/api/doctors";
    pub const MY_DETAILS: &str = "/api/doctors/mydetails";
    pub const BY_EMAIL: &str = "/api/doctors/:email";
}
