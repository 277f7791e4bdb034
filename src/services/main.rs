use crate::backend::EmployeeReader;
use crate::dto::main::LandingPageData;
use crate::models::auth::AuthenticatedUser;
use crate::services::ServiceResult;
use crate::services::access::resolve_staff;

/// Loads the landing page. Staff links are only shown when the signed-in
/// user is on the employee list; a failed lookup hides them.
pub async fn load_landing_page<R>(
    repo: &R,
    user: Option<&AuthenticatedUser>,
) -> ServiceResult<LandingPageData>
where
    R: EmployeeReader + ?Sized,
{
    let role = match user {
        Some(user) => resolve_staff(repo, user)
            .await
            .unwrap_or_default()
            .map(|employee| employee.role),
        None => None,
    };

    Ok(LandingPageData { role })
}
