use axum::Json;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Main OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::auth::login,
        crate::handlers::auth::register_patient,
        crate::handlers::auth::create_user,
        crate::handlers::appointments::list_all_appointments,
        crate::handlers::appointments::my_appointments,
        crate::handlers::appointments::my_appointment_details,
        crate::handlers::appointments::doctor_appointments,
        crate::handlers::appointments::appointments_with_doctor,
        crate::handlers::appointments::create_appointment,
        crate::handlers::appointments::update_appointment_status,
        crate::handlers::prescriptions::issue_prescription,
        crate::handlers::prescriptions::get_prescription,
        crate::handlers::prescriptions::list_prescriptions,
        crate::handlers::prescriptions::my_prescriptions,
        crate::handlers::prescriptions::delete_prescription,
        crate::handlers::doctors::list_doctors,
        crate::handlers::doctors::get_doctor,
        crate::handlers::doctors::my_doctor_details,
        crate::handlers::doctors::register_doctor,
        crate::handlers::doctors::update_doctor,
        crate::handlers::doctors::delete_doctor,
    ),
    components(
        schemas(
            crate::error::ApiErrorResponse,
            crate::handlers::health::HealthResponse,
            crate::handlers::auth::LoginRequest,
            crate::handlers::auth::LoginResponse,
            crate::handlers::auth::RegisterPatientRequest,
            crate::handlers::auth::CreateUserRequest,
            crate::handlers::auth::AccountCreated,
            crate::handlers::appointments::CreateAppointmentRequest,
            crate::handlers::prescriptions::IssuePrescriptionRequest,
            crate::handlers::doctors::RegisterDoctorRequest,
            crate::handlers::doctors::UpdateDoctorRequest,
            auth_identity::Role,
            database_layer::Appointment,
            database_layer::AppointmentStatus,
            database_layer::AppointmentWithDoctor,
            database_layer::Prescription,
            database_layer::Doctor,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Service health"),
        (name = "authentication", description = "Login and account creation"),
        (name = "appointments", description = "Appointment booking and status management"),
        (name = "prescriptions", description = "Prescription issuance and lookup"),
        (name = "doctors", description = "Doctor directory"),
    ),
    info(
        title = "Hospital Management API",
        description = "Appointments, prescriptions and doctor directory with JWT authentication and role-based access.",
    )
)]
pub struct ApiDoc;

/// Registers the bearer JWT security scheme referenced by protected paths
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Serve the generated OpenAPI document
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
