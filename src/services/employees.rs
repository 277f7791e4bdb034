//! Services of the employee management screen.

use crate::backend::{EmployeeReader, EmployeeWriter};
use crate::domain::employee::{Employee, NewEmployee};
use crate::dto::manager::EmployeesPageData;
use crate::forms::employees::{EmployeeForm, EmployeeIdForm};
use crate::models::auth::AuthenticatedUser;
use crate::services::access::{StaffScreen, ensure_staff_access};
use crate::services::{ServiceError, ServiceResult};

pub async fn list_employees<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<EmployeesPageData>
where
    R: EmployeeReader + ?Sized,
{
    ensure_staff_access(repo, user, StaffScreen::Manager).await?;

    // the access check already proved the list loads; a failure here is transient
    let (employees, error) = match repo.list_employees().await {
        Ok(employees) => (employees, None),
        Err(err) => {
            log::error!("Failed to load employees: {err}");
            (Vec::new(), Some(err.user_message()))
        }
    };

    Ok(EmployeesPageData { employees, error })
}

/// Validates the form and hires a new employee.
pub async fn hire_employee<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: EmployeeForm,
) -> ServiceResult<Employee>
where
    R: EmployeeReader + EmployeeWriter + ?Sized,
{
    ensure_staff_access(repo, user, StaffScreen::Manager).await?;

    let new_employee = NewEmployee::try_from(form)?;

    let employee = repo.create_employee(&new_employee).await.map_err(|err| {
        log::error!("Failed to create employee {}: {err}", new_employee.name);
        err
    })?;

    log::info!("{} hired employee {}", user.email, employee.employee_id);
    Ok(employee)
}

pub async fn update_employee<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id_form: EmployeeIdForm,
    form: EmployeeForm,
) -> ServiceResult<()>
where
    R: EmployeeReader + EmployeeWriter + ?Sized,
{
    ensure_staff_access(repo, user, StaffScreen::Manager).await?;

    let employee_id = id_form.employee_id()?;
    let changes = NewEmployee::try_from(form)?;

    repo.update_employee(employee_id, &changes)
        .await
        .map_err(|err| {
            log::error!("Failed to update employee {employee_id}: {err}");
            err
        })?;

    Ok(())
}

/// Dismisses an employee. Managers cannot dismiss themselves.
pub async fn dismiss_employee<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id_form: EmployeeIdForm,
) -> ServiceResult<()>
where
    R: EmployeeReader + EmployeeWriter + ?Sized,
{
    let manager = ensure_staff_access(repo, user, StaffScreen::Manager).await?;

    let employee_id = id_form.employee_id()?;
    if employee_id == manager.employee_id {
        return Err(ServiceError::Form(
            "You cannot dismiss yourself.".to_string(),
        ));
    }

    repo.delete_employee(employee_id).await.map_err(|err| {
        log::error!("Failed to delete employee {employee_id}: {err}");
        err
    })?;

    log::info!("{} dismissed employee {employee_id}", user.email);
    Ok(())
}
