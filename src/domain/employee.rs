use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::types::{EmployeeEmail, EmployeeId, EmployeeName, TypeConstraintError};

/// Staff role, written title-case and read in any casing.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash)]
pub enum EmployeeRole {
    Cashier,
    Manager,
}

impl EmployeeRole {
    pub const ALL: [EmployeeRole; 2] = [EmployeeRole::Cashier, EmployeeRole::Manager];

    pub fn as_str(self) -> &'static str {
        match self {
            EmployeeRole::Cashier => "Cashier",
            EmployeeRole::Manager => "Manager",
        }
    }
}

impl Display for EmployeeRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmployeeRole {
    type Err = TypeConstraintError;

    /// Accepts any casing, e.g. `manager` or ` MANAGER `.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cashier" => Ok(EmployeeRole::Cashier),
            "manager" => Ok(EmployeeRole::Manager),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown role '{other}'"
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for EmployeeRole {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Employee row returned by `/api/employees`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Employee {
    pub employee_id: EmployeeId,
    pub name: String,
    pub role: EmployeeRole,
    #[serde(default)]
    pub email: Option<String>,
}

impl Employee {
    /// Case-insensitive comparison against a signed-in user's email.
    pub fn has_email(&self, email: &str) -> bool {
        self.email
            .as_deref()
            .is_some_and(|own| own.trim().eq_ignore_ascii_case(email.trim()))
    }
}

/// Payload of `POST /api/employees` and `PUT /api/employees/{id}`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewEmployee {
    pub name: EmployeeName,
    pub role: EmployeeRole,
    pub email: EmployeeEmail,
}

/// Finds the staff record of the signed-in user.
pub fn find_by_email<'a>(employees: &'a [Employee], email: &str) -> Option<&'a Employee> {
    employees.iter().find(|e| e.has_email(email))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(id: i32, role: EmployeeRole, email: Option<&str>) -> Employee {
        Employee {
            employee_id: EmployeeId::new(id).unwrap(),
            name: format!("Employee {id}"),
            role,
            email: email.map(str::to_string),
        }
    }

    #[test]
    fn role_parsing_ignores_case() {
        assert_eq!("manager".parse::<EmployeeRole>(), Ok(EmployeeRole::Manager));
        assert_eq!(" CASHIER ".parse::<EmployeeRole>(), Ok(EmployeeRole::Cashier));
        assert!("owner".parse::<EmployeeRole>().is_err());
    }

    #[test]
    fn rows_decode_roles_in_any_casing() {
        let row: Employee = serde_json::from_value(serde_json::json!({
            "employee_id": 3,
            "name": "Mei",
            "role": "manager",
            "email": "mei@teashop.com"
        }))
        .unwrap();
        assert_eq!(row.role, EmployeeRole::Manager);

        let unknown = serde_json::from_value::<Employee>(serde_json::json!({
            "employee_id": 4,
            "name": "Sam",
            "role": "Shift Lead"
        }));
        assert!(unknown.is_err());
    }

    #[test]
    fn staff_lookup_matches_email_case_insensitively() {
        let staff = vec![
            employee(1, EmployeeRole::Cashier, None),
            employee(2, EmployeeRole::Manager, Some("Boss@TeaShop.com")),
        ];

        let found = find_by_email(&staff, "boss@teashop.com").unwrap();

        assert_eq!(found.employee_id.get(), 2);
        assert!(find_by_email(&staff, "guest@example.com").is_none());
    }
}
