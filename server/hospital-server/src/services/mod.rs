//! Business operations sitting between handlers and repositories.

pub mod appointment_service;
pub mod doctor_service;
pub mod prescription_service;

pub use appointment_service::AppointmentService;
pub use doctor_service::{DoctorRegistration, DoctorService};
pub use prescription_service::PrescriptionService;
