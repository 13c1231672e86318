//! In-memory store used in development mode and by tests.
//!
//! One [`InMemoryStore`] implements every repository trait so that joined
//! reads see the same doctor table as the doctor repository.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::appointment_repository::AppointmentRepository;
use crate::doctor_repository::DoctorRepository;
use crate::error::{DatabaseError, DatabaseResult};
use crate::models::{
    Appointment, AppointmentFilter, AppointmentStatus, AppointmentWithDoctor, Doctor,
    DoctorUpdate, NewAppointment, NewDoctor, NewPrescription, Prescription,
};
use crate::prescription_repository::PrescriptionRepository;

#[derive(Debug, Default)]
struct Tables {
    appointments: BTreeMap<i64, Appointment>,
    prescriptions: BTreeMap<i64, Prescription>,
    doctors: BTreeMap<i64, Doctor>,
    next_appointment_id: i64,
    next_prescription_id: i64,
    next_doctor_id: i64,
}

impl Tables {
    fn doctor_by_email(&self, email: &str) -> Option<&Doctor> {
        self.doctors.values().find(|d| d.email == email)
    }

    fn join(&self, appointments: impl Iterator<Item = Appointment>) -> Vec<AppointmentWithDoctor> {
        appointments
            .filter_map(|a| {
                let doctor = self.doctor_by_email(&a.doctor_name)?;
                Some(AppointmentWithDoctor::join(a, doctor))
            })
            .collect()
    }
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AppointmentRepository for InMemoryStore {
    async fn create(&self, appointment: NewAppointment) -> DatabaseResult<Appointment> {
        let mut tables = self.tables.write();
        let id = next_id(&mut tables.next_appointment_id);
        let appointment = appointment.into_appointment(id);
        tables.appointments.insert(id, appointment.clone());
        Ok(appointment)
    }

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Appointment>> {
        Ok(self.tables.read().appointments.get(&id).cloned())
    }

    async fn find_all(&self, filter: &AppointmentFilter) -> DatabaseResult<Vec<Appointment>> {
        Ok(self
            .tables
            .read()
            .appointments
            .values()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect())
    }

    async fn find_by_patient_email(
        &self,
        email: &str,
        status: Option<AppointmentStatus>,
    ) -> DatabaseResult<Vec<Appointment>> {
        let filter = AppointmentFilter { status, date: None };
        Ok(self
            .tables
            .read()
            .appointments
            .values()
            .filter(|a| a.patient_email == email && filter.matches(a))
            .cloned()
            .collect())
    }

    async fn find_by_doctor_name(&self, doctor_name: &str) -> DatabaseResult<Vec<Appointment>> {
        Ok(self
            .tables
            .read()
            .appointments
            .values()
            .filter(|a| a.doctor_name == doctor_name)
            .cloned()
            .collect())
    }

    async fn find_with_doctor_by_patient_email(
        &self,
        email: &str,
    ) -> DatabaseResult<Vec<AppointmentWithDoctor>> {
        let tables = self.tables.read();
        let own = tables
            .appointments
            .values()
            .filter(|a| a.patient_email == email)
            .cloned();
        Ok(tables.join(own))
    }

    async fn find_all_with_doctor(&self) -> DatabaseResult<Vec<AppointmentWithDoctor>> {
        let tables = self.tables.read();
        Ok(tables.join(tables.appointments.values().cloned()))
    }

    async fn update_status(
        &self,
        id: i64,
        expected: AppointmentStatus,
        status: AppointmentStatus,
    ) -> DatabaseResult<Option<Appointment>> {
        let mut tables = self.tables.write();
        Ok(tables
            .appointments
            .get_mut(&id)
            .filter(|a| a.status == expected)
            .map(|a| {
                a.status = status;
                a.clone()
            }))
    }
}

#[async_trait]
impl PrescriptionRepository for InMemoryStore {
    async fn create(&self, prescription: NewPrescription) -> DatabaseResult<Prescription> {
        let mut tables = self.tables.write();
        let id = next_id(&mut tables.next_prescription_id);
        let prescription = prescription.into_prescription(id);
        tables.prescriptions.insert(id, prescription.clone());
        Ok(prescription)
    }

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Prescription>> {
        Ok(self.tables.read().prescriptions.get(&id).cloned())
    }

    async fn find_all(&self) -> DatabaseResult<Vec<Prescription>> {
        Ok(self.tables.read().prescriptions.values().cloned().collect())
    }

    async fn find_by_patient_email(&self, email: &str) -> DatabaseResult<Vec<Prescription>> {
        Ok(self
            .tables
            .read()
            .prescriptions
            .values()
            .filter(|p| p.patient_email == email)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: i64) -> DatabaseResult<bool> {
        Ok(self.tables.write().prescriptions.remove(&id).is_some())
    }
}

#[async_trait]
impl DoctorRepository for InMemoryStore {
    async fn create(&self, doctor: NewDoctor) -> DatabaseResult<Doctor> {
        let mut tables = self.tables.write();
        if tables.doctor_by_email(&doctor.email).is_some() {
            return Err(DatabaseError::Conflict("doctor already exists".to_string()));
        }
        let id = next_id(&mut tables.next_doctor_id);
        let doctor = doctor.into_doctor(id);
        tables.doctors.insert(id, doctor.clone());
        Ok(doctor)
    }

    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<Doctor>> {
        Ok(self.tables.read().doctor_by_email(email).cloned())
    }

    async fn find_all(&self) -> DatabaseResult<Vec<Doctor>> {
        Ok(self.tables.read().doctors.values().cloned().collect())
    }

    async fn update_by_email(
        &self,
        email: &str,
        update: &DoctorUpdate,
    ) -> DatabaseResult<Option<Doctor>> {
        let mut tables = self.tables.write();
        Ok(tables
            .doctors
            .values_mut()
            .find(|d| d.email == email)
            .map(|d| {
                update.apply(d);
                d.clone()
            }))
    }

    async fn delete_by_email(&self, email: &str) -> DatabaseResult<bool> {
        let mut tables = self.tables.write();
        let id = tables.doctor_by_email(email).map(|d| d.id);
        Ok(id.and_then(|id| tables.doctors.remove(&id)).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn booking(patient: &str, doctor: &str, date: &str) -> NewAppointment {
        NewAppointment {
            patient_name: "Jane".into(),
            patient_email: patient.into(),
            doctor_name: doctor.into(),
            date: date.into(),
            time: "10:00".into(),
        }
    }

    fn doctor(email: &str) -> NewDoctor {
        NewDoctor {
            email: email.into(),
            first_name: "Gregory".into(),
            last_name: "House".into(),
            specialization: "Diagnostics".into(),
        }
    }

    fn script(patient: &str) -> NewPrescription {
        NewPrescription {
            patient_name: "Jane".into(),
            patient_email: patient.into(),
            doctor_name: "dr@x.com".into(),
            medicines: vec!["Ibuprofen".into(), "Vitamin D".into()],
            instructions: "After meals".into(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        }
    }

    #[tokio::test]
    async fn created_appointments_are_pending_with_increasing_ids() {
        let store = InMemoryStore::new();
        let first = AppointmentRepository::create(&store, booking("jane@x.com", "dr@x.com", "2024-05-01"))
            .await
            .unwrap();
        let second = AppointmentRepository::create(&store, booking("bob@x.com", "dr@x.com", "2024-05-02"))
            .await
            .unwrap();

        assert_eq!(first.status, AppointmentStatus::Pending);
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn filters_by_patient_status_and_date() {
        let store = InMemoryStore::new();
        let jane = AppointmentRepository::create(&store, booking("jane@x.com", "dr@x.com", "2024-05-01"))
            .await
            .unwrap();
        AppointmentRepository::create(&store, booking("bob@x.com", "dr@x.com", "2024-05-02"))
            .await
            .unwrap();
        store
            .update_status(jane.id, AppointmentStatus::Pending, AppointmentStatus::Approved)
            .await
            .unwrap()
            .unwrap();

        let own = AppointmentRepository::find_by_patient_email(&store, "jane@x.com", None)
            .await
            .unwrap();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].patient_email, "jane@x.com");

        let pending = AppointmentRepository::find_by_patient_email(
            &store,
            "jane@x.com",
            Some(AppointmentStatus::Pending),
        )
        .await
        .unwrap();
        assert!(pending.is_empty());

        let on_second = AppointmentRepository::find_all(
            &store,
            &AppointmentFilter {
                status: None,
                date: Some("2024-05-02".into()),
            },
        )
        .await
        .unwrap();
        assert_eq!(on_second.len(), 1);
        assert_eq!(on_second[0].patient_email, "bob@x.com");
    }

    #[tokio::test]
    async fn update_status_of_missing_appointment_changes_nothing() {
        let store = InMemoryStore::new();
        let updated = store
            .update_status(42, AppointmentStatus::Pending, AppointmentStatus::Approved)
            .await
            .unwrap();

        assert!(updated.is_none());
        assert!(AppointmentRepository::find_all(&store, &AppointmentFilter::default())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn joined_reads_skip_unknown_doctors() {
        let store = InMemoryStore::new();
        DoctorRepository::create(&store, doctor("dr@x.com")).await.unwrap();
        AppointmentRepository::create(&store, booking("jane@x.com", "dr@x.com", "2024-05-01"))
            .await
            .unwrap();
        AppointmentRepository::create(&store, booking("jane@x.com", "ghost@x.com", "2024-05-01"))
            .await
            .unwrap();

        let joined = store
            .find_with_doctor_by_patient_email("jane@x.com")
            .await
            .unwrap();
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].doctor_last_name, "House");
        assert_eq!(joined[0].doctor_email, "dr@x.com");

        assert_eq!(store.find_all_with_doctor().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn prescription_delete_reports_existence() {
        let store = InMemoryStore::new();
        let created = PrescriptionRepository::create(&store, script("jane@x.com"))
            .await
            .unwrap();
        assert!(!created.issued);
        assert_eq!(created.medicines, vec!["Ibuprofen", "Vitamin D"]);

        assert!(PrescriptionRepository::delete(&store, created.id).await.unwrap());
        assert!(!PrescriptionRepository::delete(&store, created.id).await.unwrap());
        assert!(PrescriptionRepository::find_by_id(&store, created.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn duplicate_doctor_email_conflicts() {
        let store = InMemoryStore::new();
        DoctorRepository::create(&store, doctor("dr@x.com")).await.unwrap();
        let err = DoctorRepository::create(&store, doctor("dr@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Conflict(_)));

        assert!(store.delete_by_email("dr@x.com").await.unwrap());
        assert!(!store.delete_by_email("dr@x.com").await.unwrap());
    }

    #[tokio::test]
    async fn status_write_requires_the_expected_status() {
        let store = InMemoryStore::new();
        let booked = AppointmentRepository::create(&store, booking("jane@x.com", "dr@x.com", "2024-05-01"))
            .await
            .unwrap();

        let approved = store
            .update_status(booked.id, AppointmentStatus::Pending, AppointmentStatus::Approved)
            .await
            .unwrap();
        assert_eq!(approved.map(|a| a.status), Some(AppointmentStatus::Approved));

        // A second writer that still believes the appointment is pending loses
        let rejected = store
            .update_status(booked.id, AppointmentStatus::Pending, AppointmentStatus::Rejected)
            .await
            .unwrap();
        assert!(rejected.is_none());
        assert_eq!(
            AppointmentRepository::find_by_id(&store, booked.id)
                .await
                .unwrap()
                .map(|a| a.status),
            Some(AppointmentStatus::Approved)
        );
    }

    #[tokio::test]
    async fn doctor_profile_update() {
        let store = InMemoryStore::new();
        let created = DoctorRepository::create(&store, doctor("dr@x.com")).await.unwrap();
        let update = DoctorUpdate {
            first_name: "Lisa".into(),
            last_name: "Cuddy".into(),
            specialization: "Endocrinology".into(),
        };

        let updated = store.update_by_email("dr@x.com", &update).await.unwrap().unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.email, "dr@x.com");
        assert_eq!(updated.last_name, "Cuddy");
        assert_eq!(
            DoctorRepository::find_by_email(&store, "dr@x.com").await.unwrap(),
            Some(updated)
        );

        assert!(store.update_by_email("ghost@x.com", &update).await.unwrap().is_none());
    }
}
