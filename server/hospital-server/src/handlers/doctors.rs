use crate::error::{ApiError, ApiResult};
use crate::middleware::{ApiJson, ApiPath, AuthContext};
use crate::server::HospitalServer;
use crate::services::DoctorRegistration;
use crate::validation::RequestValidation;
use crate::{validate_email, validate_length, validate_required};
use auth_identity::Permission;
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use database_layer::{Doctor, DoctorUpdate};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterDoctorRequest {
    #[schema(example = "dr.house@hospital.dev")]
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[schema(example = "Diagnostics")]
    pub specialization: String,
    /// Initial password for the doctor's login
    pub password: String,
}

impl RequestValidation for RegisterDoctorRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate_required!(self.email, "email is required");
        validate_email!(self.email, "Invalid email format");
        validate_required!(self.first_name, "firstName is required");
        validate_required!(self.last_name, "lastName is required");
        validate_required!(self.specialization, "specialization is required");
        validate_length!(self.password, 6, 128, "Password must be between 6 and 128 characters");
        Ok(())
    }
}

/// Editable doctor profile fields
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateDoctorRequest {
    pub first_name: String,
    pub last_name: String,
    #[schema(example = "Nephrology")]
    pub specialization: String,
}

impl RequestValidation for UpdateDoctorRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate_required!(self.first_name, "firstName is required");
        validate_required!(self.last_name, "lastName is required");
        validate_required!(self.specialization, "specialization is required");
        Ok(())
    }
}

/// List doctors
#[utoipa::path(
    get,
    path = "/api/doctors",
    responses((status = 200, description = "All doctors", body = Vec<Doctor>)),
    security(("bearer_auth" = [])),
    tag = "doctors"
)]
pub async fn list_doctors(
    auth: AuthContext,
    State(server): State<HospitalServer>,
) -> ApiResult<Json<Vec<Doctor>>> {
    auth.require(Permission::ViewDoctors)?;
    Ok(Json(server.doctors.list().await?))
}

/// Fetch a doctor by email
#[utoipa::path(
    get,
    path = "/api/doctors/{email}",
    params(("email" = String, Path, description = "Doctor email")),
    responses(
        (status = 200, description = "Doctor", body = Doctor),
        (status = 404, description = "No such doctor", body = crate::error::ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "doctors"
)]
pub async fn get_doctor(
    auth: AuthContext,
    State(server): State<HospitalServer>,
    ApiPath(email): ApiPath<String>,
) -> ApiResult<Json<Doctor>> {
    auth.require(Permission::ViewDoctors)?;
    Ok(Json(server.doctors.get(&email).await?))
}

/// Profile of the calling doctor
#[utoipa::path(
    get,
    path = "/api/doctors/mydetails",
    responses(
        (status = 200, description = "Caller's doctor profile", body = Doctor),
        (status = 404, description = "No profile for the caller", body = crate::error::ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "doctors"
)]
pub async fn my_doctor_details(
    auth: AuthContext,
    State(server): State<HospitalServer>,
) -> ApiResult<Json<Doctor>> {
    auth.require(Permission::ViewOwnDoctorProfile)?;
    Ok(Json(server.doctors.get(&auth.email).await?))
}

/// Register a doctor and their login
#[utoipa::path(
    post,
    path = "/api/doctors",
    request_body = RegisterDoctorRequest,
    responses(
        (status = 201, description = "Doctor registered", body = Doctor),
        (status = 400, description = "Invalid input", body = crate::error::ApiErrorResponse),
        (status = 409, description = "Email already in use", body = crate::error::ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "doctors"
)]
pub async fn register_doctor(
    auth: AuthContext,
    State(server): State<HospitalServer>,
    ApiJson(request): ApiJson<RegisterDoctorRequest>,
) -> ApiResult<(StatusCode, Json<Doctor>)> {
    auth.require(Permission::ManageDoctors)?;
    request.validate()?;

    let doctor = server
        .doctors
        .register(DoctorRegistration {
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            specialization: request.specialization,
            password: request.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(doctor)))
}

/// Update a doctor's profile
#[utoipa::path(
    put,
    path = "/api/doctors/{email}",
    params(("email" = String, Path, description = "Doctor email")),
    request_body = UpdateDoctorRequest,
    responses(
        (status = 200, description = "Updated doctor", body = Doctor),
        (status = 400, description = "Invalid input", body = crate::error::ApiErrorResponse),
        (status = 404, description = "No such doctor", body = crate::error::ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "doctors"
)]
pub async fn update_doctor(
    auth: AuthContext,
    State(server): State<HospitalServer>,
    ApiPath(email): ApiPath<String>,
    ApiJson(request): ApiJson<UpdateDoctorRequest>,
) -> ApiResult<Json<Doctor>> {
    auth.require(Permission::ManageDoctors)?;
    request.validate()?;

    let doctor = server
        .doctors
        .update(
            &email,
            DoctorUpdate {
                first_name: request.first_name.trim().to_string(),
                last_name: request.last_name.trim().to_string(),
                specialization: request.specialization.trim().to_string(),
            },
        )
        .await?;

    Ok(Json(doctor))
}

/// Remove a doctor and their login
#[utoipa::path(
    delete,
    path = "/api/doctors/{email}",
    params(("email" = String, Path, description = "Doctor email")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "No such doctor", body = crate::error::ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "doctors"
)]
pub async fn delete_doctor(
    auth: AuthContext,
    State(server): State<HospitalServer>,
    ApiPath(email): ApiPath<String>,
) -> ApiResult<StatusCode> {
    auth.require(Permission::ManageDoctors)?;

    if server.doctors.delete(&email).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("doctor"))
    }
}
