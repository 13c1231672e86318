use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::error::{DatabaseError, DatabaseResult};
use crate::models::{NewPrescription, Prescription};

#[async_trait]
pub trait PrescriptionRepository: Send + Sync {
    /// Insert a new prescription with `issued = false`
    async fn create(&self, prescription: NewPrescription) -> DatabaseResult<Prescription>;

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Prescription>>;

    async fn find_all(&self) -> DatabaseResult<Vec<Prescription>>;

    async fn find_by_patient_email(&self, email: &str) -> DatabaseResult<Vec<Prescription>>;

    /// Returns whether a row existed and was removed
    async fn delete(&self, id: i64) -> DatabaseResult<bool>;
}

const PRESCRIPTION_COLUMNS: &str =
    "id, patient_name, patient_email, doctor_name, medicines, instructions, date, issued";

/// PostgreSQL-backed prescription repository
#[derive(Debug, Clone)]
pub struct PgPrescriptionRepository {
    pool: Pool<Postgres>,
}

impl PgPrescriptionRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PrescriptionRepository for PgPrescriptionRepository {
    async fn create(&self, prescription: NewPrescription) -> DatabaseResult<Prescription> {
        sqlx::query_as::<_, Prescription>(&format!(
            "INSERT INTO prescriptions \
               (patient_name, patient_email, doctor_name, medicines, instructions, date, issued) \
             VALUES ($1, $2, $3, $4, $5, $6, FALSE) \
             RETURNING {PRESCRIPTION_COLUMNS}"
        ))
        .bind(&prescription.patient_name)
        .bind(&prescription.patient_email)
        .bind(&prescription.doctor_name)
        .bind(&prescription.medicines)
        .bind(&prescription.instructions)
        .bind(prescription.date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_write(e, "prescription"))
    }

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Prescription>> {
        let prescription = sqlx::query_as::<_, Prescription>(&format!(
            "SELECT {PRESCRIPTION_COLUMNS} FROM prescriptions WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(prescription)
    }

    async fn find_all(&self) -> DatabaseResult<Vec<Prescription>> {
        let prescriptions = sqlx::query_as::<_, Prescription>(&format!(
            "SELECT {PRESCRIPTION_COLUMNS} FROM prescriptions ORDER BY id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(prescriptions)
    }

    async fn find_by_patient_email(&self, email: &str) -> DatabaseResult<Vec<Prescription>> {
        let prescriptions = sqlx::query_as::<_, Prescription>(&format!(
            "SELECT {PRESCRIPTION_COLUMNS} FROM prescriptions \
             WHERE patient_email = $1 ORDER BY id ASC"
        ))
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        Ok(prescriptions)
    }

    async fn delete(&self, id: i64) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM prescriptions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
