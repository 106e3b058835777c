//! Admin endpoints

use chrono::NaiveDate;
use log::info;
use reqwest::Method;
use trackboard_core::PanelResult;

use super::types::*;
use super::{PanelApiClient, RequestOptions};

impl PanelApiClient {
    /// List all employees with quota and assignment counts
    pub async fn list_employees(&self) -> PanelResult<Vec<EmployeeSummary>> {
        self.get_json("/admin/employees").await
    }

    /// Fetch one employee including the accounts assigned to them
    pub async fn employee_detail(&self, id: i64) -> PanelResult<EmployeeDetail> {
        self.get_json(&format!("/admin/employees/{}", id)).await
    }

    /// Create a panel user, and an employee record when the role is `employee`
    pub async fn create_employee(&self, req: &CreateEmployeeRequest) -> PanelResult<StatusMessage> {
        info!("Creating employee {}", req.username);
        self.send_json(
            Method::POST,
            "/admin/employees",
            RequestOptions::with_json(req)?,
        )
        .await
    }

    /// Delete an employee; their assigned accounts become unassigned
    pub async fn delete_employee(&self, id: i64) -> PanelResult<StatusMessage> {
        self.send_json(
            Method::DELETE,
            &format!("/admin/employees/{}", id),
            RequestOptions::new(),
        )
        .await
    }

    /// Reset an employee's login password
    pub async fn reset_password(&self, req: &ResetPasswordRequest) -> PanelResult<StatusMessage> {
        self.send_json(
            Method::POST,
            "/admin/reset-password",
            RequestOptions::with_json(req)?,
        )
        .await
    }

    /// Raise an employee's quota by `amount`
    pub async fn add_quota(&self, req: &QuotaRequest) -> PanelResult<QuotaUpdated> {
        self.send_json(
            Method::POST,
            "/admin/add-quota",
            RequestOptions::with_json(req)?,
        )
        .await
    }

    /// Set an employee's quota to `amount`
    pub async fn update_quota(&self, req: &QuotaRequest) -> PanelResult<QuotaUpdated> {
        self.send_json(
            Method::POST,
            "/admin/update-quota",
            RequestOptions::with_json(req)?,
        )
        .await
    }

    /// Register a new unassigned account
    pub async fn create_account(&self, req: &CreateAccountRequest) -> PanelResult<StatusMessage> {
        self.send_json(
            Method::POST,
            "/admin/accounts",
            RequestOptions::with_json(req)?,
        )
        .await
    }

    /// Delete an account
    pub async fn delete_account(&self, id: i64) -> PanelResult<StatusMessage> {
        self.send_json(
            Method::DELETE,
            &format!("/admin/accounts/{}", id),
            RequestOptions::new(),
        )
        .await
    }

    /// Assign up to `limit` unassigned accounts to an employee
    pub async fn assign_accounts(&self, req: &AssignAccountsRequest) -> PanelResult<AssignOutcome> {
        self.send_json(
            Method::POST,
            "/admin/assign-accounts",
            RequestOptions::with_json(req)?,
        )
        .await
    }

    /// Fetch today's summary: follower totals, report lines, recent downloads
    pub async fn daily_summary(&self) -> PanelResult<DailySummary> {
        self.get_json("/admin/daily-summary").await
    }

    /// List reports, optionally limited to a date range
    pub async fn all_reports(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> PanelResult<Vec<ReportRow>> {
        let mut options = RequestOptions::new();
        if let Some(start) = start {
            options = options.with_query("start_date", start.to_string());
        }
        if let Some(end) = end {
            options = options.with_query("end_date", end.to_string());
        }
        self.send_json(Method::GET, "/admin/reports", options).await
    }

    /// Fetch the most recent audit log entries
    pub async fn audit_logs(&self, limit: Option<usize>) -> PanelResult<Vec<AuditLogEntry>> {
        let mut options = RequestOptions::new();
        if let Some(limit) = limit {
            options = options.with_query("limit", limit.to_string());
        }
        self.send_json(Method::GET, "/admin/logs", options).await
    }

    /// Fetch download statistics, optionally scoped to a date range
    pub async fn download_stats(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> PanelResult<DownloadStats> {
        let mut options = RequestOptions::new();
        if let Some(start) = start {
            options = options.with_query("start_date", start.to_string());
        }
        if let Some(end) = end {
            options = options.with_query("end_date", end.to_string());
        }
        self.send_json(Method::GET, "/admin/download-stats", options)
            .await
    }

    /// Record a delivery for an employee
    pub async fn add_download_record(
        &self,
        req: &AddDownloadRecordRequest,
    ) -> PanelResult<DownloadRecordAdded> {
        self.send_json(
            Method::POST,
            "/admin/download-records",
            RequestOptions::with_json(req)?,
        )
        .await
    }

    /// Fetch the panel-wide download chart series
    pub async fn admin_chart_data(&self) -> PanelResult<ChartData> {
        self.get_json("/admin/chart-data").await
    }

    /// Fetch the shared panel note
    pub async fn note(&self) -> PanelResult<PanelNote> {
        self.get_json("/general/note").await
    }

    /// Replace the shared panel note
    pub async fn set_note(&self, req: &NoteRequest) -> PanelResult<StatusMessage> {
        self.send_json(Method::POST, "/admin/note", RequestOptions::with_json(req)?)
            .await
    }
}
