//! Employee-facing endpoints

use log::info;
use reqwest::Method;
use trackboard_core::PanelResult;

use super::types::*;
use super::{PanelApiClient, RequestOptions};

impl PanelApiClient {
    /// Fetch the employee dashboard: quota plus assigned accounts
    pub async fn dashboard(&self) -> PanelResult<DashboardData> {
        self.get_json("/employee/dashboard").await
    }

    /// List the accounts assigned to the current employee
    pub async fn my_accounts(&self) -> PanelResult<Vec<AccountSummary>> {
        self.get_json("/employee/accounts").await
    }

    /// Update credentials of an assigned account
    pub async fn update_account(
        &self,
        id: i64,
        req: &UpdateAccountRequest,
    ) -> PanelResult<StatusMessage> {
        self.send_json(
            Method::PUT,
            &format!("/employee/accounts/{}", id),
            RequestOptions::with_json(req)?,
        )
        .await
    }

    /// Add several accounts at once, subject to the employee's quota
    pub async fn bulk_add_accounts(&self, req: &BulkAccountsRequest) -> PanelResult<StatusMessage> {
        info!("Submitting {} accounts in bulk", req.accounts.len());
        self.send_json(
            Method::POST,
            "/employee/accounts/bulk",
            RequestOptions::with_json(req)?,
        )
        .await
    }

    /// Submit today's follower count for an assigned account
    ///
    /// The server answers `success` for a fresh report and `updated` for a
    /// same-day overwrite; a locked report is rejected with a 4xx status.
    pub async fn submit_report(&self, req: &SubmitReportRequest) -> PanelResult<ReportOutcome> {
        self.send_json(
            Method::POST,
            "/employee/reports",
            RequestOptions::with_json(req)?,
        )
        .await
    }

    /// List today's reports for the current employee
    pub async fn today_reports(&self) -> PanelResult<Vec<ReportStatus>> {
        self.get_json("/employee/reports/today").await
    }

    /// Fetch the employee's download totals and recent activity
    pub async fn my_downloads(&self) -> PanelResult<DownloadOverview> {
        self.get_json("/employee/downloads").await
    }

    /// Fetch the employee's download chart series
    pub async fn my_chart_data(&self) -> PanelResult<ChartData> {
        self.get_json("/employee/chart-data").await
    }
}
