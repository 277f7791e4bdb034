//! Services of the reports screen.

use chrono::NaiveDate;

use crate::backend::errors::BackendResult;
use crate::backend::{EmployeeReader, ReportReader};
use crate::domain::report::{ZReport, total_revenue};
use crate::dto::manager::{ReportSection, ReportsPageData};
use crate::forms::reports::{DateRangeForm, ZReportForm};
use crate::models::auth::AuthenticatedUser;
use crate::services::access::{StaffScreen, ensure_staff_access};
use crate::services::{ServiceError, ServiceResult};

pub const Z_REPORT_CONFIRMATION: &str =
    "A Z report can only be generated once per day. This report cannot be updated once created.";
pub const Z_REPORT_DUPLICATE: &str = "Z Report has already been generated today.";

fn section<T>(name: &str, result: BackendResult<Vec<T>>) -> ReportSection<T> {
    match result {
        Ok(rows) => ReportSection::from(rows),
        Err(err) => {
            log::error!("Failed to load {name} report: {err}");
            ReportSection::failed(err.user_message())
        }
    }
}

/// Loads the sales, hourly and usage reports. Each section fails on its own.
pub async fn load_reports<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &DateRangeForm,
    today: NaiveDate,
    last_z_report: Option<NaiveDate>,
) -> ServiceResult<ReportsPageData>
where
    R: EmployeeReader + ReportReader + ?Sized,
{
    ensure_staff_access(repo, user, StaffScreen::Manager).await?;

    let range = form.resolve(today)?;

    let sales = section("sales", repo.sales_report(&range).await);
    let x_report = section("X", repo.x_report().await);
    let usage = section("usage", repo.usage_report(&range).await);

    Ok(ReportsPageData {
        range,
        sales_total: total_revenue(&sales.rows),
        sales,
        x_report,
        usage,
        z_generated_today: last_z_report == Some(today),
    })
}

/// Generates the end-of-day report. Allowed once per day, after explicit
/// confirmation.
pub async fn generate_z_report<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &ZReportForm,
    today: NaiveDate,
    last_z_report: Option<NaiveDate>,
) -> ServiceResult<ZReport>
where
    R: EmployeeReader + ReportReader + ?Sized,
{
    ensure_staff_access(repo, user, StaffScreen::Manager).await?;

    if last_z_report == Some(today) {
        return Err(ServiceError::Form(Z_REPORT_DUPLICATE.to_string()));
    }
    if form.confirm.is_none() {
        return Err(ServiceError::Form(Z_REPORT_CONFIRMATION.to_string()));
    }

    let report = repo.z_report().await.map_err(|err| {
        log::error!("Failed to generate Z report: {err}");
        err
    })?;

    log::info!("Z report for {} generated by {}", report.date, user.email);
    Ok(report)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::backend::errors::BackendError;
    use crate::domain::report::{DateRange, SalesRow, ZReportItem};
    use crate::domain::types::ProductId;
    use crate::services::access::tests::{staffed_backend, user};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 5).unwrap()
    }

    fn z_report() -> ZReport {
        ZReport {
            total_revenue: 412.5,
            items: vec![ZReportItem {
                product_id: ProductId::new(1).unwrap(),
                product_name: "Classic Tea".to_string(),
                qty_sold: 30.0,
            }],
            date: "2025-12-05".to_string(),
        }
    }

    #[actix_web::test]
    async fn default_range_is_last_thirty_days() {
        let mut backend = staffed_backend();
        let expected = DateRange::last_thirty_days(today());
        backend
            .expect_sales_report()
            .withf(move |range| *range == expected)
            .times(1)
            .returning(|_| {
                Ok(vec![
                    SalesRow {
                        product_id: ProductId::new(1).unwrap(),
                        product_name: "Classic Tea".to_string(),
                        qty: 10.0,
                        revenue: 35.0,
                    },
                    SalesRow {
                        product_id: ProductId::new(2).unwrap(),
                        product_name: "Taro Milk Tea".to_string(),
                        qty: 2.0,
                        revenue: 10.5,
                    },
                ])
            });
        backend.expect_x_report().returning(|| Ok(Vec::new()));
        backend
            .expect_usage_report()
            .returning(|_| Err(BackendError::Config("offline".to_string())));

        let data = load_reports(
            &backend,
            &user("morgan@teashop.com"),
            &DateRangeForm::default(),
            today(),
            None,
        )
        .await
        .unwrap();

        assert_eq!(data.sales_total, 45.5);
        assert!(data.usage.error.is_some());
        assert!(data.x_report.error.is_none());
        assert!(!data.z_generated_today);
    }

    #[actix_web::test]
    async fn reversed_range_is_rejected_before_fetching() {
        let mut backend = staffed_backend();
        backend.expect_sales_report().times(0);
        let form = DateRangeForm {
            start_date: Some("2025-12-05".to_string()),
            end_date: Some("2025-12-01".to_string()),
        };

        let result = load_reports(&backend, &user("morgan@teashop.com"), &form, today(), None).await;

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[actix_web::test]
    async fn z_report_requires_confirmation() {
        let mut backend = staffed_backend();
        backend.expect_z_report().times(0);

        let result = generate_z_report(
            &backend,
            &user("morgan@teashop.com"),
            &ZReportForm { confirm: None },
            today(),
            None,
        )
        .await;

        assert!(matches!(result, Err(ServiceError::Form(ref msg)) if msg == Z_REPORT_CONFIRMATION));
    }

    #[actix_web::test]
    async fn z_report_runs_once_per_day() {
        let mut backend = staffed_backend();
        backend.expect_z_report().times(1).returning(|| Ok(z_report()));
        let user = user("morgan@teashop.com");
        let confirmed = ZReportForm {
            confirm: Some("yes".to_string()),
        };

        let report = generate_z_report(&backend, &user, &confirmed, today(), None)
            .await
            .unwrap();
        assert_eq!(report.total_revenue, 412.5);

        let again = generate_z_report(&backend, &user, &confirmed, today(), Some(today())).await;
        assert!(matches!(again, Err(ServiceError::Form(ref msg)) if msg == Z_REPORT_DUPLICATE));

        let yesterday = today().pred_opt().unwrap();
        let mut next_day = staffed_backend();
        next_day.expect_z_report().times(1).returning(|| Ok(z_report()));
        assert!(
            generate_z_report(&next_day, &user, &confirmed, today(), Some(yesterday))
                .await
                .is_ok()
        );
    }
}
