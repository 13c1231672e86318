//! Persistence layer for the hospital backend.
//!
//! Each entity has a repository trait with two implementations: a PostgreSQL
//! one built on `sqlx` and [`InMemoryStore`], used when no database URL is
//! configured and throughout the test suites.
//!
//! ```rust
//! use database_layer::{AppointmentRepository, InMemoryStore, NewAppointment, AppointmentStatus};
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! rt.block_on(async {
//!     let store = InMemoryStore::new();
//!     let created = store
//!         .create(NewAppointment {
//!             patient_name: "Jane".into(),
//!             patient_email: "jane@x.com".into(),
//!             doctor_name: "dr@x.com".into(),
//!             date: "2024-05-01".into(),
//!             time: "10:00".into(),
//!         })
//!         .await
//!         .unwrap();
//!     assert_eq!(created.status, AppointmentStatus::Pending);
//! });
//! ```

pub mod appointment_repository;
pub mod connection;
pub mod doctor_repository;
pub mod error;
pub mod memory;
pub mod models;
pub mod prescription_repository;

pub use appointment_repository::{AppointmentRepository, PgAppointmentRepository};
pub use connection::{DatabasePool, MIGRATOR};
pub use doctor_repository::{DoctorRepository, PgDoctorRepository};
pub use error::{DatabaseError, DatabaseResult};
pub use memory::InMemoryStore;
pub use models::*;
pub use prescription_repository::{PgPrescriptionRepository, PrescriptionRepository};
