use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::error::{DatabaseError, DatabaseResult};
use crate::models::{
    Appointment, AppointmentFilter, AppointmentRow, AppointmentStatus, AppointmentWithDoctor,
    AppointmentWithDoctorRow, NewAppointment,
};

/// Storage operations over appointments
///
/// Listings are ordered by id ascending.
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Insert a new appointment with status PENDING
    async fn create(&self, appointment: NewAppointment) -> DatabaseResult<Appointment>;

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Appointment>>;

    async fn find_all(&self, filter: &AppointmentFilter) -> DatabaseResult<Vec<Appointment>>;

    async fn find_by_patient_email(
        &self,
        email: &str,
        status: Option<AppointmentStatus>,
    ) -> DatabaseResult<Vec<Appointment>>;

    async fn find_by_doctor_name(&self, doctor_name: &str) -> DatabaseResult<Vec<Appointment>>;

    /// Patient appointments joined with their doctor; unresolved doctors are skipped
    async fn find_with_doctor_by_patient_email(
        &self,
        email: &str,
    ) -> DatabaseResult<Vec<AppointmentWithDoctor>>;

    async fn find_all_with_doctor(&self) -> DatabaseResult<Vec<AppointmentWithDoctor>>;

    /// Move the status from `expected` to `status` in one step
    ///
    /// `None` when no appointment has this id or its status is no longer `expected`.
    async fn update_status(
        &self,
        id: i64,
        expected: AppointmentStatus,
        status: AppointmentStatus,
    ) -> DatabaseResult<Option<Appointment>>;
}

const APPOINTMENT_COLUMNS: &str =
    "a.id, a.patient_name, a.patient_email, a.doctor_name, a.date, a.time, a.status";

const WITH_DOCTOR_COLUMNS: &str = "a.id, a.patient_name, a.patient_email, a.doctor_name, a.date, a.time, a.status, \
     d.first_name AS doctor_first_name, d.last_name AS doctor_last_name, \
     d.email AS doctor_email, d.specialization";

fn into_appointments(rows: Vec<AppointmentRow>) -> DatabaseResult<Vec<Appointment>> {
    rows.into_iter().map(Appointment::try_from).collect()
}

fn into_joined(rows: Vec<AppointmentWithDoctorRow>) -> DatabaseResult<Vec<AppointmentWithDoctor>> {
    rows.into_iter().map(AppointmentWithDoctor::try_from).collect()
}

/// PostgreSQL-backed appointment repository
#[derive(Debug, Clone)]
pub struct PgAppointmentRepository {
    pool: Pool<Postgres>,
}

impl PgAppointmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppointmentRepository for PgAppointmentRepository {
    async fn create(&self, appointment: NewAppointment) -> DatabaseResult<Appointment> {
        let row = sqlx::query_as::<_, AppointmentRow>(
            r"
            INSERT INTO appointments (patient_name, patient_email, doctor_name, date, time, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, patient_name, patient_email, doctor_name, date, time, status
            ",
        )
        .bind(&appointment.patient_name)
        .bind(&appointment.patient_email)
        .bind(&appointment.doctor_name)
        .bind(&appointment.date)
        .bind(&appointment.time)
        .bind(AppointmentStatus::Pending.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_write(e, "appointment"))?;

        Appointment::try_from(row)
    }

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Appointment>> {
        let row = sqlx::query_as::<_, AppointmentRow>(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments a WHERE a.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Appointment::try_from).transpose()
    }

    async fn find_all(&self, filter: &AppointmentFilter) -> DatabaseResult<Vec<Appointment>> {
        let rows = sqlx::query_as::<_, AppointmentRow>(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments a \
             WHERE ($1::TEXT IS NULL OR a.status = $1) \
               AND ($2::TEXT IS NULL OR a.date = $2) \
             ORDER BY a.id ASC"
        ))
        .bind(filter.status.map(AppointmentStatus::as_str))
        .bind(filter.date.as_deref())
        .fetch_all(&self.pool)
        .await?;

        into_appointments(rows)
    }

    async fn find_by_patient_email(
        &self,
        email: &str,
        status: Option<AppointmentStatus>,
    ) -> DatabaseResult<Vec<Appointment>> {
        let rows = sqlx::query_as::<_, AppointmentRow>(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments a \
             WHERE a.patient_email = $1 AND ($2::TEXT IS NULL OR a.status = $2) \
             ORDER BY a.id ASC"
        ))
        .bind(email)
        .bind(status.map(AppointmentStatus::as_str))
        .fetch_all(&self.pool)
        .await?;

        into_appointments(rows)
    }

    async fn find_by_doctor_name(&self, doctor_name: &str) -> DatabaseResult<Vec<Appointment>> {
        let rows = sqlx::query_as::<_, AppointmentRow>(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments a \
             WHERE a.doctor_name = $1 ORDER BY a.id ASC"
        ))
        .bind(doctor_name)
        .fetch_all(&self.pool)
        .await?;

        into_appointments(rows)
    }

    async fn find_with_doctor_by_patient_email(
        &self,
        email: &str,
    ) -> DatabaseResult<Vec<AppointmentWithDoctor>> {
        let rows = sqlx::query_as::<_, AppointmentWithDoctorRow>(&format!(
            "SELECT {WITH_DOCTOR_COLUMNS} FROM appointments a \
             JOIN doctors d ON a.doctor_name = d.email \
             WHERE a.patient_email = $1 ORDER BY a.id ASC"
        ))
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        into_joined(rows)
    }

    async fn find_all_with_doctor(&self) -> DatabaseResult<Vec<AppointmentWithDoctor>> {
        let rows = sqlx::query_as::<_, AppointmentWithDoctorRow>(&format!(
            "SELECT {WITH_DOCTOR_COLUMNS} FROM appointments a \
             JOIN doctors d ON a.doctor_name = d.email ORDER BY a.id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        into_joined(rows)
    }

    async fn update_status(
        &self,
        id: i64,
        expected: AppointmentStatus,
        status: AppointmentStatus,
    ) -> DatabaseResult<Option<Appointment>> {
        let row = sqlx::query_as::<_, AppointmentRow>(
            r"
            UPDATE appointments SET status = $2 WHERE id = $1 AND status = $3
            RETURNING id, patient_name, patient_email, doctor_name, date, time, status
            ",
        )
        .bind(id)
        .bind(status.as_str())
        .bind(expected.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Appointment::try_from).transpose()
    }
}
