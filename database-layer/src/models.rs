// Database models
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::error::DatabaseError;

/// Lifecycle status of an appointment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum AppointmentStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 4] = [
        AppointmentStatus::Pending,
        AppointmentStatus::Approved,
        AppointmentStatus::Rejected,
        AppointmentStatus::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "PENDING",
            AppointmentStatus::Approved => "APPROVED",
            AppointmentStatus::Rejected => "REJECTED",
            AppointmentStatus::Completed => "COMPLETED",
        }
    }

    /// Whether an appointment in this status may move to `next`.
    ///
    /// Re-applying the current status is always accepted.
    pub fn can_transition_to(self, next: AppointmentStatus) -> bool {
        use AppointmentStatus::{Approved, Completed, Pending, Rejected};

        self == next
            || matches!(
                (self, next),
                (Pending, Approved | Rejected) | (Approved | Rejected, Completed)
            )
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a status string is outside the closed set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown appointment status '{}' (expected PENDING, APPROVED, REJECTED or COMPLETED)",
            self.0
        )
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for AppointmentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        AppointmentStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: i64,
    pub patient_name: String,
    pub patient_email: String,
    /// Email of the assigned doctor
    pub doctor_name: String,
    #[schema(example = "2024-05-01")]
    pub date: String,
    #[schema(example = "10:00")]
    pub time: String,
    pub status: AppointmentStatus,
}

/// Insert payload; new appointments are always stored as PENDING
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
    pub patient_name: String,
    pub patient_email: String,
    pub doctor_name: String,
    pub date: String,
    pub time: String,
}

impl NewAppointment {
    pub(crate) fn into_appointment(self, id: i64) -> Appointment {
        Appointment {
            id,
            patient_name: self.patient_name,
            patient_email: self.patient_email,
            doctor_name: self.doctor_name,
            date: self.date,
            time: self.time,
            status: AppointmentStatus::Pending,
        }
    }
}

/// Optional filters for listing every appointment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentFilter {
    pub status: Option<AppointmentStatus>,
    pub date: Option<String>,
}

impl AppointmentFilter {
    pub fn matches(&self, appointment: &Appointment) -> bool {
        self.status.map_or(true, |s| appointment.status == s)
            && self.date.as_deref().map_or(true, |d| appointment.date == d)
    }
}

/// Appointment joined with the doctor resolved from `doctor_name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentWithDoctor {
    pub id: i64,
    pub patient_name: String,
    pub patient_email: String,
    pub doctor_name: String,
    pub date: String,
    pub time: String,
    pub status: AppointmentStatus,
    pub doctor_first_name: String,
    pub doctor_last_name: String,
    pub doctor_email: String,
    pub specialization: String,
}

impl AppointmentWithDoctor {
    pub fn join(appointment: Appointment, doctor: &Doctor) -> Self {
        Self {
            id: appointment.id,
            patient_name: appointment.patient_name,
            patient_email: appointment.patient_email,
            doctor_name: appointment.doctor_name,
            date: appointment.date,
            time: appointment.time,
            status: appointment.status,
            doctor_first_name: doctor.first_name.clone(),
            doctor_last_name: doctor.last_name.clone(),
            doctor_email: doctor.email.clone(),
            specialization: doctor.specialization.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    pub id: i64,
    pub patient_name: String,
    pub patient_email: String,
    /// Email of the issuing doctor
    pub doctor_name: String,
    pub medicines: Vec<String>,
    pub instructions: String,
    pub date: NaiveDate,
    pub issued: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPrescription {
    pub patient_name: String,
    pub patient_email: String,
    pub doctor_name: String,
    pub medicines: Vec<String>,
    pub instructions: String,
    pub date: NaiveDate,
}

impl NewPrescription {
    pub(crate) fn into_prescription(self, id: i64) -> Prescription {
        Prescription {
            id,
            patient_name: self.patient_name,
            patient_email: self.patient_email,
            doctor_name: self.doctor_name,
            medicines: self.medicines,
            instructions: self.instructions,
            date: self.date,
            issued: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub specialization: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDoctor {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub specialization: String,
}

/// Editable profile fields; the email is the doctor's key and never changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorUpdate {
    pub first_name: String,
    pub last_name: String,
    pub specialization: String,
}

impl DoctorUpdate {
    pub(crate) fn apply(&self, doctor: &mut Doctor) {
        doctor.first_name.clone_from(&self.first_name);
        doctor.last_name.clone_from(&self.last_name);
        doctor.specialization.clone_from(&self.specialization);
    }
}

impl NewDoctor {
    pub(crate) fn into_doctor(self, id: i64) -> Doctor {
        Doctor {
            id,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            specialization: self.specialization,
        }
    }
}

// Raw rows; status is stored as TEXT and parsed on the way out

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct AppointmentRow {
    pub id: i64,
    pub patient_name: String,
    pub patient_email: String,
    pub doctor_name: String,
    pub date: String,
    pub time: String,
    pub status: String,
}

impl TryFrom<AppointmentRow> for Appointment {
    type Error = DatabaseError;

    fn try_from(row: AppointmentRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse()
            .map_err(|e: UnknownStatus| DatabaseError::CorruptRow(e.to_string()))?;
        Ok(Appointment {
            id: row.id,
            patient_name: row.patient_name,
            patient_email: row.patient_email,
            doctor_name: row.doctor_name,
            date: row.date,
            time: row.time,
            status,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct AppointmentWithDoctorRow {
    #[sqlx(flatten)]
    pub appointment: AppointmentRow,
    pub doctor_first_name: String,
    pub doctor_last_name: String,
    pub doctor_email: String,
    pub specialization: String,
}

impl TryFrom<AppointmentWithDoctorRow> for AppointmentWithDoctor {
    type Error = DatabaseError;

    fn try_from(row: AppointmentWithDoctorRow) -> Result<Self, Self::Error> {
        let appointment = Appointment::try_from(row.appointment)?;
        Ok(AppointmentWithDoctor {
            id: appointment.id,
            patient_name: appointment.patient_name,
            patient_email: appointment.patient_email,
            doctor_name: appointment.doctor_name,
            date: appointment.date,
            time: appointment.time,
            status: appointment.status,
            doctor_first_name: row.doctor_first_name,
            doctor_last_name: row.doctor_last_name,
            doctor_email: row.doctor_email,
            specialization: row.specialization,
        })
    }
}
