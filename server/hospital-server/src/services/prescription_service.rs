use auth_identity::Role;
use database_layer::{NewPrescription, Prescription, PrescriptionRepository};
use logger_redacted::redact;
use std::sync::Arc;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthContext;

pub struct PrescriptionService {
    repo: Arc<dyn PrescriptionRepository>,
}

impl PrescriptionService {
    pub fn new(repo: Arc<dyn PrescriptionRepository>) -> Self {
        Self { repo }
    }

    /// Persist a new prescription; it starts out with `issued = false`
    pub async fn issue(&self, prescription: NewPrescription) -> ApiResult<Prescription> {
        let created = self.repo.create(prescription).await?;
        info!(
            prescription_id = created.id,
            doctor = %redact(&created.doctor_name),
            medicines = created.medicines.len(),
            "Prescription issued"
        );
        Ok(created)
    }

    /// Fetch one prescription; patients get not-found for anyone else's
    pub async fn get(&self, caller: &AuthContext, id: i64) -> ApiResult<Prescription> {
        self.repo
            .find_by_id(id)
            .await?
            .filter(|p| !caller.is(Role::Patient) || p.patient_email == caller.email)
            .ok_or_else(|| ApiError::not_found("prescription"))
    }

    pub async fn list_all(&self) -> ApiResult<Vec<Prescription>> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn list_for_patient(&self, patient_email: &str) -> ApiResult<Vec<Prescription>> {
        Ok(self.repo.find_by_patient_email(patient_email).await?)
    }

    /// Delete by id. Returns `false` when there was nothing to delete.
    ///
    /// A doctor may only delete prescriptions they issued.
    pub async fn delete(&self, caller: &AuthContext, id: i64) -> ApiResult<bool> {
        let Some(existing) = self.repo.find_by_id(id).await? else {
            return Ok(false);
        };

        if caller.is(Role::Doctor) && existing.doctor_name != caller.email {
            return Err(ApiError::authorization(
                "Doctors may only delete prescriptions they issued",
            ));
        }

        let deleted = self.repo.delete(id).await?;
        if deleted {
            info!(prescription_id = id, by = %redact(&caller.email), "Prescription deleted");
        }
        Ok(deleted)
    }
}
