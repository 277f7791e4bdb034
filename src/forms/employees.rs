use serde::Deserialize;
use validator::Validate;

use crate::domain::employee::{EmployeeRole, NewEmployee};
use crate::domain::types::{EmployeeEmail, EmployeeId, EmployeeName};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Hire / update form of the employees screen.
pub struct EmployeeForm {
    pub name: String,
    pub role: String,
    #[serde(default)]
    #[validate(email)]
    pub email: String,
}

impl TryFrom<EmployeeForm> for NewEmployee {
    type Error = FormError;

    fn try_from(mut form: EmployeeForm) -> Result<Self, Self::Error> {
        form.email = form.email.trim().to_string();

        let name =
            EmployeeName::new(form.name.as_str()).map_err(|_| FormError::MissingNameOrRole)?;
        let role = form
            .role
            .parse::<EmployeeRole>()
            .map_err(|_| FormError::MissingNameOrRole)?;

        form.validate().map_err(|err| {
            log::debug!("Rejected employee email: {err}");
            FormError::InvalidEmail
        })?;
        let email = EmployeeEmail::new(form.email).map_err(|_| FormError::InvalidEmail)?;

        Ok(NewEmployee { name, role, email })
    }
}

#[derive(Debug, Deserialize)]
/// Selects the employee an update or dismissal applies to.
pub struct EmployeeIdForm {
    pub employee_id: i32,
}

impl EmployeeIdForm {
    pub fn employee_id(&self) -> Result<EmployeeId, FormError> {
        EmployeeId::new(self.employee_id).map_err(|_| FormError::InvalidEmployeeId)
    }
}
