use crate::error::{ApiError, ApiResult};
use crate::middleware::{ApiJson, ApiPath, AuthContext};
use crate::server::HospitalServer;
use crate::validation::RequestValidation;
use crate::{validate_email, validate_field, validate_required};
use auth_identity::Permission;
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::Utc;
use database_layer::{NewPrescription, Prescription};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
#[schema(example = json!({
    "patientName": "Jane",
    "patientEmail": "jane@x.com",
    "medicines": ["Amoxicillin 500mg", "Paracetamol"],
    "instructions": "Three times a day after meals"
}))]
pub struct IssuePrescriptionRequest {
    pub patient_name: String,
    pub patient_email: String,
    pub medicines: Vec<String>,
    pub instructions: String,
}

impl RequestValidation for IssuePrescriptionRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate_required!(self.patient_name, "patientName is required");
        validate_required!(self.patient_email, "patientEmail is required");
        validate_email!(self.patient_email, "patientEmail is not a valid email");
        validate_field!(
            self.medicines,
            !self.medicines.is_empty(),
            "At least one medicine is required"
        );
        validate_field!(
            self.medicines,
            self.medicines.iter().all(|m| !m.trim().is_empty()),
            "Medicine names must not be blank"
        );
        Ok(())
    }
}

/// Issue a prescription as the calling doctor
#[utoipa::path(
    post,
    path = "/api/prescriptions/issue",
    request_body = IssuePrescriptionRequest,
    responses(
        (status = 201, description = "Prescription stored", body = Prescription),
        (status = 400, description = "Invalid input", body = crate::error::ApiErrorResponse),
        (status = 403, description = "Caller is not a doctor", body = crate::error::ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "prescriptions"
)]
pub async fn issue_prescription(
    auth: AuthContext,
    State(server): State<HospitalServer>,
    ApiJson(request): ApiJson<IssuePrescriptionRequest>,
) -> ApiResult<(StatusCode, Json<Prescription>)> {
    auth.require(Permission::IssuePrescription)?;
    request.validate()?;

    let prescription = server
        .prescriptions
        .issue(NewPrescription {
            patient_name: request.patient_name.trim().to_string(),
            patient_email: request.patient_email.trim().to_string(),
            doctor_name: auth.email,
            medicines: request
                .medicines
                .iter()
                .map(|m| m.trim().to_string())
                .collect(),
            instructions: request.instructions.trim().to_string(),
            date: Utc::now().date_naive(),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(prescription)))
}

/// Fetch a prescription by id
#[utoipa::path(
    get,
    path = "/api/prescriptions/{id}",
    params(("id" = i64, Path, description = "Prescription id")),
    responses(
        (status = 200, description = "Prescription", body = Prescription),
        (status = 404, description = "Not found (or not the caller's)", body = crate::error::ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "prescriptions"
)]
pub async fn get_prescription(
    auth: AuthContext,
    State(server): State<HospitalServer>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Prescription>> {
    auth.require(Permission::ViewPrescription)?;
    Ok(Json(server.prescriptions.get(&auth, id).await?))
}

/// List every prescription
#[utoipa::path(
    get,
    path = "/api/prescriptions",
    responses(
        (status = 200, description = "All prescriptions", body = Vec<Prescription>),
        (status = 403, description = "Caller is not an admin", body = crate::error::ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "prescriptions"
)]
pub async fn list_prescriptions(
    auth: AuthContext,
    State(server): State<HospitalServer>,
) -> ApiResult<Json<Vec<Prescription>>> {
    auth.require(Permission::ViewAllPrescriptions)?;
    Ok(Json(server.prescriptions.list_all().await?))
}

/// Prescriptions written for the calling patient
#[utoipa::path(
    get,
    path = "/api/prescriptions/my-prescriptions",
    responses(
        (status = 200, description = "Caller's prescriptions", body = Vec<Prescription>)
    ),
    security(("bearer_auth" = [])),
    tag = "prescriptions"
)]
pub async fn my_prescriptions(
    auth: AuthContext,
    State(server): State<HospitalServer>,
) -> ApiResult<Json<Vec<Prescription>>> {
    auth.require(Permission::ViewOwnPrescriptions)?;
    Ok(Json(server.prescriptions.list_for_patient(&auth.email).await?))
}

/// Delete a prescription
#[utoipa::path(
    delete,
    path = "/api/prescriptions/{id}",
    params(("id" = i64, Path, description = "Prescription id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 403, description = "Not the issuing doctor", body = crate::error::ApiErrorResponse),
        (status = 404, description = "No such prescription", body = crate::error::ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "prescriptions"
)]
pub async fn delete_prescription(
    auth: AuthContext,
    State(server): State<HospitalServer>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    auth.require(Permission::DeletePrescription)?;

    if server.prescriptions.delete(&auth, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("prescription"))
    }
}
