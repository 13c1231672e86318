use crate::error::{ApiError, ApiResult};
use crate::middleware::{ApiJson, AuthContext};
use crate::server::HospitalServer;
use crate::validation::RequestValidation;
use crate::{validate_email, validate_field, validate_length, validate_required};
use auth_identity::{NewAccount, Permission, Role};
use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Login request
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
#[schema(example = json!({"email": "dr.house@hospital.dev", "password": "s3cret"}))]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl RequestValidation for LoginRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate_required!(self.email, "Email is required");
        validate_field!(
            @reject missing_field,
            self.password,
            !self.password.is_empty(),
            "Password is required"
        );
        Ok(())
    }
}

/// Successful login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[schema(example = "dr.house@hospital.dev")]
    pub email: String,
    pub role: Role,
    /// Bearer token for the Authorization header
    pub token: String,
    /// When the token stops being accepted
    pub expires_at: DateTime<Utc>,
}

/// Self-service patient registration
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct RegisterPatientRequest {
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[schema(example = "jane@example.com")]
    pub email: String,
    pub password: String,
}

impl RequestValidation for RegisterPatientRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate_required!(self.name, "Name is required");
        validate_required!(self.email, "Email is required");
        validate_email!(self.email, "Invalid email format");
        validate_length!(self.password, 6, 128, "Password must be between 6 and 128 characters");
        Ok(())
    }
}

/// Account creation by an administrator
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    /// `ROLE_NURSE`, `nurse`, ...
    #[schema(example = "ROLE_NURSE")]
    pub role: String,
}

impl RequestValidation for CreateUserRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate_required!(self.email, "Email is required");
        validate_email!(self.email, "Invalid email format");
        validate_length!(self.password, 6, 128, "Password must be between 6 and 128 characters");
        validate_required!(self.role, "Role is required");
        Ok(())
    }
}

/// A newly created account
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AccountCreated {
    pub email: String,
    pub role: Role,
}

/// Exchange credentials for a token
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 400, description = "Email or password missing", body = crate::error::ApiErrorResponse),
        (status = 401, description = "Invalid credentials", body = crate::error::ApiErrorResponse)
    ),
    tag = "authentication"
)]
pub async fn login(
    State(server): State<HospitalServer>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    request.validate()?;

    let outcome = server
        .identity
        .authenticate(&request.email, &request.password)
        .await?;

    Ok(Json(LoginResponse {
        email: outcome.email,
        role: outcome.role,
        token: outcome.token,
        expires_at: outcome.expires_at,
    }))
}

/// Register a patient account
#[utoipa::path(
    post,
    path = "/api/patients/register",
    request_body = RegisterPatientRequest,
    responses(
        (status = 201, description = "Account created", body = AccountCreated),
        (status = 400, description = "Invalid input", body = crate::error::ApiErrorResponse),
        (status = 409, description = "Email already registered", body = crate::error::ApiErrorResponse)
    ),
    tag = "authentication"
)]
pub async fn register_patient(
    State(server): State<HospitalServer>,
    ApiJson(request): ApiJson<RegisterPatientRequest>,
) -> ApiResult<(StatusCode, Json<AccountCreated>)> {
    request.validate()?;

    let account = server
        .identity
        .register_user(NewAccount {
            email: request.email,
            password: request.password,
            role: Role::Patient,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AccountCreated {
            email: account.email,
            role: account.role,
        }),
    ))
}

/// Create an account with any role
#[utoipa::path(
    post,
    path = "/api/admin/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Account created", body = AccountCreated),
        (status = 400, description = "Invalid input or unknown role", body = crate::error::ApiErrorResponse),
        (status = 403, description = "Caller is not an admin", body = crate::error::ApiErrorResponse),
        (status = 409, description = "Email already registered", body = crate::error::ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "authentication"
)]
pub async fn create_user(
    auth: AuthContext,
    State(server): State<HospitalServer>,
    ApiJson(request): ApiJson<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<AccountCreated>)> {
    auth.require(Permission::ManageUsers)?;
    request.validate()?;

    let role: Role = request.role.parse()?;
    let account = server
        .identity
        .register_user(NewAccount {
            email: request.email,
            password: request.password,
            role,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AccountCreated {
            email: account.email,
            role: account.role,
        }),
    ))
}
