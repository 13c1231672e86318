//! Roles and the permissions they grant.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::error::IdentityError;

/// Closed set of account roles, serialized as authority strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Role {
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
    #[serde(rename = "ROLE_DOCTOR")]
    Doctor,
    #[serde(rename = "ROLE_NURSE")]
    Nurse,
    #[serde(rename = "ROLE_STAFF")]
    Staff,
    #[serde(rename = "ROLE_PATIENT")]
    Patient,
}

/// Guarded operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    ViewOwnAppointments,
    ViewAssignedAppointments,
    RequestAppointment,
    UpdateAppointmentStatus,
    ViewAllAppointments,
    ViewAppointmentDashboard,
    IssuePrescription,
    ViewOwnPrescriptions,
    ViewPrescription,
    ViewAllPrescriptions,
    DeletePrescription,
    ViewDoctors,
    ViewOwnDoctorProfile,
    ManageDoctors,
    ManageUsers,
}

impl Role {
    pub const ALL: [Role; 5] = [Role::Admin, Role::Doctor, Role::Nurse, Role::Staff, Role::Patient];

    /// Authority string, e.g. `ROLE_DOCTOR`
    pub fn authority(self) -> &'static str {
        match self {
            Role::Admin => "ROLE_ADMIN",
            Role::Doctor => "ROLE_DOCTOR",
            Role::Nurse => "ROLE_NURSE",
            Role::Staff => "ROLE_STAFF",
            Role::Patient => "ROLE_PATIENT",
        }
    }

    /// The single source of truth for route access.
    pub fn allows(self, permission: Permission) -> bool {
        use Permission as P;
        use Role::{Admin, Doctor, Nurse, Patient};

        match permission {
            P::ViewOwnAppointments | P::RequestAppointment | P::ViewOwnPrescriptions => {
                self == Patient
            }
            P::ViewAssignedAppointments | P::IssuePrescription | P::ViewOwnDoctorProfile => {
                self == Doctor
            }
            P::UpdateAppointmentStatus | P::ViewAppointmentDashboard | P::DeletePrescription => {
                matches!(self, Admin | Doctor)
            }
            P::ViewAllAppointments | P::ViewAllPrescriptions | P::ManageDoctors | P::ManageUsers => {
                self == Admin
            }
            P::ViewPrescription => matches!(self, Admin | Doctor | Nurse | Patient),
            P::ViewDoctors => true,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.authority())
    }
}

impl FromStr for Role {
    type Err = IdentityError;

    /// Accepts `ROLE_DOCTOR` as well as the bare `doctor`, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let bare = trimmed
            .get(..5)
            .filter(|prefix| prefix.eq_ignore_ascii_case("ROLE_"))
            .and_then(|_| trimmed.get(5..))
            .unwrap_or(trimmed);

        Role::ALL
            .into_iter()
            .find(|role| role.authority().get(5..).is_some_and(|name| name.eq_ignore_ascii_case(bare)))
            .ok_or_else(|| IdentityError::UnknownRole(s.to_string()))
    }
}
