//! Wire types for the attendance backend.
//!
//! Field names follow the backend's JSON bodies; optional fields default so
//! that the directory listing (a projected row) and the detail endpoint (a
//! full row) both deserialize into [`Employee`].

use serde::{Deserialize, Serialize};

/// The authenticated user's profile as issued at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Link to the domain employee record; admin accounts may not have one.
    #[serde(default)]
    pub employee_id: Option<i64>,
    pub email: String,
    #[serde(default)]
    pub name: String,
    pub role: String,
}

impl Identity {
    /// Role comparison is case-insensitive: "Admin" and "admin" both pass.
    pub fn is_admin(&self) -> bool {
        self.role.eq_ignore_ascii_case("admin")
    }
}

/// Successful `POST /login` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: Identity,
}

/// An employee directory entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub employee_id: i64,
    #[serde(default, alias = "full_name")]
    pub name: String,
    pub email: String,
    /// Job title; the listing projects it as `designation`.
    #[serde(default, alias = "job_title")]
    pub designation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gross_monthly_salary: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_joining: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<i64>,
}

/// Body for `POST /employees`.
#[derive(Debug, Clone, Serialize)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    /// Job title, stored as the employee's designation.
    pub role: String,
    /// Gross monthly salary.
    pub salary: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Partial body for `PUT /employees/:id`; only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmployeeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gross_monthly_salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<i64>,
}

/// Response of `POST /employees`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedEmployee {
    pub message: String,
    pub employee_id: i64,
}

/// Generic `{ "message": ... }` acknowledgement.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// One day of attendance for an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub attendance_date: String,
    #[serde(default)]
    pub clock_in_time: Option<String>,
    #[serde(default)]
    pub clock_out_time: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Filters for `GET /attendance/:employeeId`.
///
/// Query keys mirror the backend's parameter names (`from_` included).
#[derive(Debug, Clone, Default)]
pub struct AttendanceQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Current user's profile (`GET /me`).
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub employee_id: i64,
    pub full_name: String,
    pub email: String,
    pub role: String,
}

/// Partial body for `PATCH /me`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Dashboard counters (`GET /admin/summary`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSummary {
    pub employee_count: i64,
    pub active_employee_count: i64,
    pub today_attendance_count: i64,
    pub late_count: i64,
}

/// One payslip row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payslip {
    pub payslip_id: i64,
    pub employee_id: i64,
    pub pay_period_start: String,
    pub pay_period_end: String,
    #[serde(default)]
    pub days_present: Option<i64>,
    #[serde(default)]
    pub total_days_in_month: Option<i64>,
    #[serde(default)]
    pub gross_salary_at_time: Option<f64>,
    #[serde(default)]
    pub payable_salary: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub generated_at: Option<String>,
}

/// Filters for `GET /payslips`.
#[derive(Debug, Clone, Default)]
pub struct PayslipQuery {
    /// `YYYY-MM` pay period.
    pub month: Option<String>,
    pub employee_id: Option<i64>,
    pub status: Option<String>,
}

/// Response of the payslip generation call.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedPayslips {
    pub message: String,
    pub month: String,
    #[serde(default)]
    pub payslip_ids: Vec<i64>,
}

/// `GET /healthz` probe result.
#[derive(Debug, Clone, Deserialize)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub database: Option<String>,
}

/// `GET /time` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerTime {
    pub iso: String,
    #[serde(rename = "epochMs")]
    pub epoch_ms: i64,
    pub timezone: String,
    #[serde(rename = "offsetMinutes")]
    pub offset_minutes: i64,
}
