use auth_identity::Role;
use database_layer::{
    Appointment, AppointmentFilter, AppointmentRepository, AppointmentStatus,
    AppointmentWithDoctor, NewAppointment,
};
use logger_redacted::redact;
use std::sync::Arc;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthContext;

pub struct AppointmentService {
    repo: Arc<dyn AppointmentRepository>,
}

impl AppointmentService {
    pub fn new(repo: Arc<dyn AppointmentRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_all(&self, filter: &AppointmentFilter) -> ApiResult<Vec<Appointment>> {
        Ok(self.repo.find_all(filter).await?)
    }

    pub async fn list_for_patient(
        &self,
        patient_email: &str,
        status: Option<AppointmentStatus>,
    ) -> ApiResult<Vec<Appointment>> {
        Ok(self.repo.find_by_patient_email(patient_email, status).await?)
    }

    pub async fn list_for_doctor(&self, doctor_email: &str) -> ApiResult<Vec<Appointment>> {
        Ok(self.repo.find_by_doctor_name(doctor_email).await?)
    }

    pub async fn list_with_doctor_for_patient(
        &self,
        patient_email: &str,
    ) -> ApiResult<Vec<AppointmentWithDoctor>> {
        Ok(self.repo.find_with_doctor_by_patient_email(patient_email).await?)
    }

    pub async fn list_all_with_doctor(&self) -> ApiResult<Vec<AppointmentWithDoctor>> {
        Ok(self.repo.find_all_with_doctor().await?)
    }

    /// Store a booking; the repository always assigns PENDING
    pub async fn request(&self, booking: NewAppointment) -> ApiResult<Appointment> {
        let appointment = self.repo.create(booking).await?;
        info!(
            appointment_id = appointment.id,
            patient = %redact(&appointment.patient_email),
            "Appointment requested"
        );
        Ok(appointment)
    }

    /// Move an appointment to `status`
    ///
    /// Doctors may only touch their own appointments. Re-applying the current
    /// status succeeds without a write. Losing a race against another status
    /// change is a conflict.
    pub async fn update_status(
        &self,
        caller: &AuthContext,
        id: i64,
        status: AppointmentStatus,
    ) -> ApiResult<Appointment> {
        let current = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("appointment"))?;

        if caller.is(Role::Doctor) && current.doctor_name != caller.email {
            return Err(ApiError::authorization(
                "Doctors may only update their own appointments",
            ));
        }

        if !current.status.can_transition_to(status) {
            return Err(ApiError::InvalidTransition {
                from: current.status.to_string(),
                to: status.to_string(),
            });
        }

        if current.status == status {
            return Ok(current);
        }

        // Written only if nobody changed the status since it was read
        let updated = self
            .repo
            .update_status(id, current.status, status)
            .await?
            .ok_or_else(|| ApiError::conflict("Appointment status changed concurrently; reload and retry"))?;

        info!(
            appointment_id = id,
            from = %current.status,
            to = %updated.status,
            by = %redact(&caller.email),
            "Appointment status updated"
        );
        Ok(updated)
    }
}
