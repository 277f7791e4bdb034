//! Staff screen gating based on the employee list.

use crate::backend::EmployeeReader;
use crate::domain::employee::{Employee, EmployeeRole, find_by_email};
use crate::models::auth::AuthenticatedUser;
use crate::services::{ServiceError, ServiceResult};

/// Staff screens that require an employee record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StaffScreen {
    Cashier,
    Manager,
}

impl StaffScreen {
    /// Managers may open every screen, cashiers only the cashier screen.
    pub fn allows(self, role: EmployeeRole) -> bool {
        match (self, role) {
            (_, EmployeeRole::Manager) => true,
            (StaffScreen::Cashier, EmployeeRole::Cashier) => true,
            (StaffScreen::Manager, EmployeeRole::Cashier) => false,
        }
    }
}

/// Looks up the employee record matching the signed-in user's email.
pub async fn resolve_staff<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Option<Employee>>
where
    R: EmployeeReader + ?Sized,
{
    let employees = repo.list_employees().await.map_err(|err| {
        log::error!("Failed to load employees for {}: {err}", user.email);
        err
    })?;

    Ok(find_by_email(&employees, &user.email).cloned())
}

/// Returns the employee record when the user may open `screen`.
pub async fn ensure_staff_access<R>(
    repo: &R,
    user: &AuthenticatedUser,
    screen: StaffScreen,
) -> ServiceResult<Employee>
where
    R: EmployeeReader + ?Sized,
{
    match resolve_staff(repo, user).await? {
        Some(employee) if screen.allows(employee.role) => Ok(employee),
        Some(employee) => {
            log::warn!(
                "{} ({}) denied access to the {screen:?} screen",
                user.email,
                employee.role
            );
            Err(ServiceError::Unauthorized)
        }
        None => {
            log::warn!("{} is not an employee", user.email);
            Err(ServiceError::Unauthorized)
        }
    }
}
