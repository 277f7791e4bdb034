use crate::domain::employee::EmployeeRole;

/// Data required to render the landing page.
pub struct LandingPageData {
    /// Staff role of the signed-in user, if any.
    pub role: Option<EmployeeRole>,
}
