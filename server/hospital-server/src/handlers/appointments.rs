use crate::error::{ApiError, ApiResult};
use crate::middleware::{ApiJson, ApiPath, ApiQuery, AuthContext};
use crate::server::HospitalServer;
use crate::validation::RequestValidation;
use crate::{validate_date, validate_required, validate_time};
use auth_identity::Permission;
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use database_layer::{
    Appointment, AppointmentFilter, AppointmentStatus, AppointmentWithDoctor, NewAppointment,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Booking request; the patient email comes from the caller's token
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
#[schema(example = json!({
    "patientName": "Jane",
    "doctorName": "dr@x.com",
    "date": "2024-05-01",
    "time": "10:00"
}))]
pub struct CreateAppointmentRequest {
    pub patient_name: String,
    /// Email of the doctor to book
    pub doctor_name: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM` or `HH:MM:SS`
    pub time: String,
}

impl RequestValidation for CreateAppointmentRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate_required!(self.patient_name, "patientName is required");
        validate_required!(self.doctor_name, "doctorName is required");
        validate_required!(self.date, "date is required");
        validate_required!(self.time, "time is required");
        validate_date!(self.date, "date must be formatted as YYYY-MM-DD");
        validate_time!(self.time, "time must be formatted as HH:MM or HH:MM:SS");
        Ok(())
    }
}

/// Status filter / target status
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatusQuery {
    /// PENDING, APPROVED, REJECTED or COMPLETED (case-insensitive)
    pub status: Option<String>,
}

/// Filters for the admin listing
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AppointmentListQuery {
    /// PENDING, APPROVED, REJECTED or COMPLETED (case-insensitive)
    pub status: Option<String>,
    /// `YYYY-MM-DD`
    pub date: Option<String>,
}

fn parse_status(raw: Option<&str>) -> ApiResult<Option<AppointmentStatus>> {
    raw.filter(|s| !s.trim().is_empty())
        .map(str::parse::<AppointmentStatus>)
        .transpose()
        .map_err(|e| ApiError::validation(e.to_string()))
}

/// List every appointment
#[utoipa::path(
    get,
    path = "/api/appointments/all",
    params(AppointmentListQuery),
    responses(
        (status = 200, description = "Appointments", body = Vec<Appointment>),
        (status = 400, description = "Invalid filter", body = crate::error::ApiErrorResponse),
        (status = 403, description = "Caller is not an admin", body = crate::error::ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "appointments"
)]
pub async fn list_all_appointments(
    auth: AuthContext,
    State(server): State<HospitalServer>,
    ApiQuery(query): ApiQuery<AppointmentListQuery>,
) -> ApiResult<Json<Vec<Appointment>>> {
    auth.require(Permission::ViewAllAppointments)?;

    let date = query.date.filter(|d| !d.trim().is_empty());
    if let Some(date) = &date {
        validate_date!(date, "date must be formatted as YYYY-MM-DD");
    }
    let filter = AppointmentFilter {
        status: parse_status(query.status.as_deref())?,
        date: date.map(|d| d.trim().to_string()),
    };

    Ok(Json(server.appointments.list_all(&filter).await?))
}

/// Caller's own appointments
#[utoipa::path(
    get,
    path = "/api/appointments/my-appointments",
    params(StatusQuery),
    responses(
        (status = 200, description = "Appointments of the calling patient", body = Vec<Appointment>),
        (status = 401, description = "Not authenticated", body = crate::error::ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "appointments"
)]
pub async fn my_appointments(
    auth: AuthContext,
    State(server): State<HospitalServer>,
    ApiQuery(query): ApiQuery<StatusQuery>,
) -> ApiResult<Json<Vec<Appointment>>> {
    auth.require(Permission::ViewOwnAppointments)?;
    let status = parse_status(query.status.as_deref())?;
    Ok(Json(
        server
            .appointments
            .list_for_patient(&auth.email, status)
            .await?,
    ))
}

/// Caller's own appointments with doctor details
#[utoipa::path(
    get,
    path = "/api/appointments/my-appointments/details",
    responses(
        (status = 200, description = "Appointments joined with their doctor", body = Vec<AppointmentWithDoctor>)
    ),
    security(("bearer_auth" = [])),
    tag = "appointments"
)]
pub async fn my_appointment_details(
    auth: AuthContext,
    State(server): State<HospitalServer>,
) -> ApiResult<Json<Vec<AppointmentWithDoctor>>> {
    auth.require(Permission::ViewOwnAppointments)?;
    Ok(Json(
        server
            .appointments
            .list_with_doctor_for_patient(&auth.email)
            .await?,
    ))
}

/// Appointments assigned to the calling doctor
#[utoipa::path(
    get,
    path = "/api/appointments/doctor-appointments",
    responses(
        (status = 200, description = "Appointments booked with the calling doctor", body = Vec<Appointment>)
    ),
    security(("bearer_auth" = [])),
    tag = "appointments"
)]
pub async fn doctor_appointments(
    auth: AuthContext,
    State(server): State<HospitalServer>,
) -> ApiResult<Json<Vec<Appointment>>> {
    auth.require(Permission::ViewAssignedAppointments)?;
    Ok(Json(server.appointments.list_for_doctor(&auth.email).await?))
}

/// Dashboard listing of every appointment with doctor details
#[utoipa::path(
    get,
    path = "/api/appointments/with-doctor",
    responses(
        (status = 200, description = "Appointments joined with their doctor", body = Vec<AppointmentWithDoctor>)
    ),
    security(("bearer_auth" = [])),
    tag = "appointments"
)]
pub async fn appointments_with_doctor(
    auth: AuthContext,
    State(server): State<HospitalServer>,
) -> ApiResult<Json<Vec<AppointmentWithDoctor>>> {
    auth.require(Permission::ViewAppointmentDashboard)?;
    Ok(Json(server.appointments.list_all_with_doctor().await?))
}

/// Request an appointment
#[utoipa::path(
    post,
    path = "/api/appointments",
    request_body = CreateAppointmentRequest,
    responses(
        (status = 201, description = "Appointment created with status PENDING", body = Appointment),
        (status = 400, description = "Missing or malformed field", body = crate::error::ApiErrorResponse),
        (status = 403, description = "Caller is not a patient", body = crate::error::ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "appointments"
)]
pub async fn create_appointment(
    auth: AuthContext,
    State(server): State<HospitalServer>,
    ApiJson(request): ApiJson<CreateAppointmentRequest>,
) -> ApiResult<(StatusCode, Json<Appointment>)> {
    auth.require(Permission::RequestAppointment)?;
    request.validate()?;

    let appointment = server
        .appointments
        .request(NewAppointment {
            patient_name: request.patient_name.trim().to_string(),
            patient_email: auth.email,
            doctor_name: request.doctor_name.trim().to_string(),
            date: request.date.trim().to_string(),
            time: request.time.trim().to_string(),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(appointment)))
}

/// Change an appointment's status
#[utoipa::path(
    put,
    path = "/api/appointments/{id}/status",
    params(
        ("id" = i64, Path, description = "Appointment id"),
        StatusQuery
    ),
    responses(
        (status = 200, description = "Updated appointment", body = Appointment),
        (status = 400, description = "Missing or unknown status", body = crate::error::ApiErrorResponse),
        (status = 403, description = "Not permitted for this appointment", body = crate::error::ApiErrorResponse),
        (status = 404, description = "No such appointment", body = crate::error::ApiErrorResponse),
        (status = 409, description = "Transition not allowed", body = crate::error::ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "appointments"
)]
pub async fn update_appointment_status(
    auth: AuthContext,
    State(server): State<HospitalServer>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<StatusQuery>,
) -> ApiResult<Json<Appointment>> {
    auth.require(Permission::UpdateAppointmentStatus)?;

    let status = parse_status(query.status.as_deref())?
        .ok_or_else(|| ApiError::validation("status query parameter is required"))?;

    Ok(Json(
        server
            .appointments
            .update_status(&auth, id, status)
            .await?,
    ))
}
