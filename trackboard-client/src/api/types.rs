//! Wire types for the panel API

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Body returned by `POST /login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub role: String,
}

/// Social account without credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSummary {
    pub id: i64,
    pub username: String,
}

/// Social account including its stored password
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountCredentials {
    pub id: i64,
    pub username: String,
    pub password: String,
}

/// Employee row in the admin listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeSummary {
    pub id: i64,
    pub full_name: String,
    pub user_name: String,
    pub visible_password: Option<String>,
    #[serde(default)]
    pub account_quota: i64,
    #[serde(default)]
    pub assigned_count: i64,
}

/// Employee detail including assigned accounts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeDetail {
    pub id: i64,
    pub full_name: String,
    pub user_name: String,
    pub assigned_accounts: Vec<AccountCredentials>,
}

/// Employee dashboard payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardData {
    pub quota: i64,
    pub assigned_accounts: Vec<AccountCredentials>,
}

/// Today's report state for one account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportStatus {
    pub account_id: i64,
    pub count: i64,
    pub locked: bool,
}

/// Report row in the admin report listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRow {
    pub id: i64,
    pub date: NaiveDate,
    pub employee_name: String,
    pub account_username: String,
    pub count: i64,
    pub locked: bool,
}

/// One report line in the daily summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryReport {
    pub employee_name: String,
    pub account: String,
    pub count: i64,
    pub locked: bool,
}

/// Download totals for one day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadsByDate {
    pub date: NaiveDate,
    pub count: i64,
}

/// Admin daily summary payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub total_followers: i64,
    pub reports: Vec<SummaryReport>,
    pub downloads_by_date: Vec<DownloadsByDate>,
}

/// One delivery window in an employee's recent activity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadActivity {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub count: i64,
}

/// Employee-facing download overview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadOverview {
    pub total_downloads: i64,
    pub recent_activity: Vec<DownloadActivity>,
}

/// Per-employee download totals in the admin stats
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeDownloads {
    pub id: i64,
    pub full_name: String,
    pub user_name: String,
    pub total_downloads: i64,
    pub range_downloads: i64,
}

/// Admin download statistics payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadStats {
    pub total_downloads: i64,
    pub total_accounts: i64,
    pub range_total: i64,
    pub best_employee: String,
    pub employees: Vec<EmployeeDownloads>,
}

/// Chart series keyed by date labels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub data: Vec<i64>,
}

/// Audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: i64,
    pub username: String,
    pub action: String,
    pub details: String,
    pub ip_address: Option<String>,
    /// Server-formatted timestamp, not guaranteed to be RFC 3339
    pub timestamp: String,
}

/// Shared panel note
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelNote {
    pub content: String,
    pub author: String,
    pub updated_at: Option<NaiveDateTime>,
}

// --- Request bodies ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEmployeeRequest {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub employee_id: i64,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotaRequest {
    pub employee_id: i64,
    pub amount: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccountRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkAccountsRequest {
    pub accounts: Vec<CreateAccountRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignAccountsRequest {
    pub employee_id: i64,
    /// Maximum number of unassigned accounts to hand out
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAccountRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitReportRequest {
    pub account_id: i64,
    pub follower_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddDownloadRecordRequest {
    pub employee_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteRequest {
    pub content: String,
}

// --- Generic response envelopes ---

/// Generic status response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusMessage {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

/// Response to quota changes, carrying the resulting quota
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotaUpdated {
    pub status: String,
    pub new_quota: i64,
}

/// Response to bulk account assignment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignOutcome {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

/// Response to a report submission
///
/// The server answers `success` for a fresh report and `updated` when a
/// same-day report was overwritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOutcome {
    pub status: String,
}

impl ReportOutcome {
    /// Whether an existing same-day report was overwritten
    pub fn is_updated(&self) -> bool {
        self.status == "updated"
    }
}

/// Response to adding a download record, carrying the employee's new total
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadRecordAdded {
    pub status: String,
    pub new_total: i64,
}
