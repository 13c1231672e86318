use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::error::{DatabaseError, DatabaseResult};
use crate::models::{Doctor, DoctorUpdate, NewDoctor};

#[async_trait]
pub trait DoctorRepository: Send + Sync {
    /// Insert a doctor profile; a duplicate email yields [`DatabaseError::Conflict`]
    async fn create(&self, doctor: NewDoctor) -> DatabaseResult<Doctor>;

    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<Doctor>>;

    async fn find_all(&self) -> DatabaseResult<Vec<Doctor>>;

    /// Replace the profile fields of the doctor with this email; `None` when absent
    async fn update_by_email(
        &self,
        email: &str,
        update: &DoctorUpdate,
    ) -> DatabaseResult<Option<Doctor>>;

    async fn delete_by_email(&self, email: &str) -> DatabaseResult<bool>;
}

/// PostgreSQL-backed doctor repository
#[derive(Debug, Clone)]
pub struct PgDoctorRepository {
    pool: Pool<Postgres>,
}

impl PgDoctorRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DoctorRepository for PgDoctorRepository {
    async fn create(&self, doctor: NewDoctor) -> DatabaseResult<Doctor> {
        sqlx::query_as::<_, Doctor>(
            r"
            INSERT INTO doctors (email, first_name, last_name, specialization)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, first_name, last_name, specialization
            ",
        )
        .bind(&doctor.email)
        .bind(&doctor.first_name)
        .bind(&doctor.last_name)
        .bind(&doctor.specialization)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_write(e, "doctor"))
    }

    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<Doctor>> {
        let doctor = sqlx::query_as::<_, Doctor>(
            "SELECT id, email, first_name, last_name, specialization FROM doctors WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(doctor)
    }

    async fn find_all(&self) -> DatabaseResult<Vec<Doctor>> {
        let doctors = sqlx::query_as::<_, Doctor>(
            "SELECT id, email, first_name, last_name, specialization FROM doctors ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(doctors)
    }

    async fn update_by_email(
        &self,
        email: &str,
        update: &DoctorUpdate,
    ) -> DatabaseResult<Option<Doctor>> {
        let doctor = sqlx::query_as::<_, Doctor>(
            r"
            UPDATE doctors SET first_name = $2, last_name = $3, specialization = $4
            WHERE email = $1
            RETURNING id, email, first_name, last_name, specialization
            ",
        )
        .bind(email)
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(&update.specialization)
        .fetch_optional(&self.pool)
        .await?;

        Ok(doctor)
    }

    async fn delete_by_email(&self, email: &str) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM doctors WHERE email = $1")
            .bind(email)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
