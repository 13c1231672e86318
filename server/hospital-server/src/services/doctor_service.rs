use auth_identity::{IdentityService, NewAccount, Role};
use database_layer::{Doctor, DoctorRepository, DoctorUpdate, NewDoctor};
use logger_redacted::redact;
use std::sync::Arc;
use tracing::{error, info};

use crate::error::{ApiError, ApiResult};

/// Everything needed to onboard a doctor
#[derive(Debug, Clone)]
pub struct DoctorRegistration {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub specialization: String,
    pub password: String,
}

pub struct DoctorService {
    repo: Arc<dyn DoctorRepository>,
    identity: Arc<IdentityService>,
}

impl DoctorService {
    pub fn new(repo: Arc<dyn DoctorRepository>, identity: Arc<IdentityService>) -> Self {
        Self { repo, identity }
    }

    /// Create the doctor profile together with a doctor login
    ///
    /// The login is removed again when the profile cannot be stored.
    pub async fn register(&self, registration: DoctorRegistration) -> ApiResult<Doctor> {
        let email = registration.email.trim().to_string();
        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(ApiError::conflict("A doctor with this email already exists"));
        }

        self.identity
            .register_user(NewAccount {
                email: email.clone(),
                password: registration.password,
                role: Role::Doctor,
            })
            .await?;

        let created = self
            .repo
            .create(NewDoctor {
                email: email.clone(),
                first_name: registration.first_name.trim().to_string(),
                last_name: registration.last_name.trim().to_string(),
                specialization: registration.specialization.trim().to_string(),
            })
            .await;
        let doctor = match created {
            Ok(doctor) => doctor,
            Err(e) => {
                if let Err(rollback) = self.identity.remove_account(&email, Role::Doctor).await {
                    error!(
                        email = %redact(&email),
                        error = %rollback,
                        "Failed to remove doctor login after profile insert failed"
                    );
                }
                return Err(e.into());
            }
        };

        info!(doctor_id = doctor.id, email = %redact(&doctor.email), "Doctor registered");
        Ok(doctor)
    }

    pub async fn get(&self, email: &str) -> ApiResult<Doctor> {
        self.repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| ApiError::not_found("doctor"))
    }

    pub async fn list(&self) -> ApiResult<Vec<Doctor>> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn update(&self, email: &str, update: DoctorUpdate) -> ApiResult<Doctor> {
        let doctor = self
            .repo
            .update_by_email(email, &update)
            .await?
            .ok_or_else(|| ApiError::not_found("doctor"))?;
        info!(doctor_id = doctor.id, email = %redact(email), "Doctor profile updated");
        Ok(doctor)
    }

    /// Remove the doctor profile and the doctor login with the same email
    ///
    /// Returns whether a profile existed. Tokens already issued stay valid
    /// until they expire.
    pub async fn delete(&self, email: &str) -> ApiResult<bool> {
        let deleted = self.repo.delete_by_email(email).await?;
        if deleted {
            self.identity.remove_account(email, Role::Doctor).await?;
            info!(email = %redact(email), "Doctor deleted");
        }
        Ok(deleted)
    }
}
