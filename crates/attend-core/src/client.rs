//! Typed domain API client over the gateway and session store.
//!
//! One method per backend capability, all resolving to the uniform result
//! envelope. Admin-only methods are gated client-side before any network
//! traffic; mutating employee calls invalidate the roster cache.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::Result;
use reqwest::Method;
use serde_json::{Value, json};
use tracing::debug;

use crate::config::{self, Config};
use crate::gateway::{ApiError, ApiResult, Gateway, decode};
use crate::session::events::SessionEvents;
use crate::session::store::SessionStore;
use crate::session::{Phase, SessionManager};
use crate::types::{
    AdminSummary, AttendanceQuery, AttendanceRecord, CreatedEmployee, Employee, EmployeeUpdate,
    GeneratedPayslips, Health, MessageResponse, NewEmployee, Payslip, PayslipQuery, Profile,
    ProfileUpdate, ServerTime,
};

type EmployeeCache = Arc<Mutex<Option<Vec<Employee>>>>;

struct ClientInner {
    gateway: Gateway,
    store: Arc<SessionStore>,
    session: Arc<SessionManager>,
    employees: EmployeeCache,
}

/// Entry point for the attend client stack.
///
/// Cheap to clone; all clones share one session and one roster cache.
/// Construction is explicit (no static singleton), so tests create
/// isolated instances against their own home directory and mock backend.
#[derive(Clone)]
pub struct HrClient {
    inner: Arc<ClientInner>,
}

impl HrClient {
    /// Wires the client from configuration and the default home directory.
    pub fn connect(config: &Config) -> Result<Self> {
        Self::open(config.resolved_base_url()?, config::paths::attend_home())
    }

    /// Wires the client against an explicit backend and home directory.
    pub fn open(base_url: String, home: PathBuf) -> Result<Self> {
        let events = Arc::new(SessionEvents::default());
        let store = Arc::new(SessionStore::open(home)?);
        let gateway = Gateway::new(base_url, Arc::clone(&events));
        let session = SessionManager::new(Arc::clone(&store), gateway.clone(), Arc::clone(&events));

        // The roster cache must drop whenever the session ends, on every
        // path: explicit logout and expiry teardown.
        let employees: EmployeeCache = Arc::default();
        let cache = Arc::clone(&employees);
        events.on_logged_out(move || {
            *lock(&cache) = None;
        });
        let cache = Arc::clone(&employees);
        events.on_session_expired(move |_| {
            *lock(&cache) = None;
        });

        Ok(Self {
            inner: Arc::new(ClientInner {
                gateway,
                store,
                session,
                employees,
            }),
        })
    }

    /// The lifecycle controller (login/logout/expiry, event subscriptions).
    pub fn session(&self) -> &Arc<SessionManager> {
        &self.inner.session
    }

    /// Shorthand for `session().login(...)`.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<()> {
        self.inner.session.login(email, password).await
    }

    /// Shorthand for `session().logout()`.
    pub fn logout(&self) {
        self.inner.session.logout();
    }

    // --- Credential gates -------------------------------------------------

    /// Credential for an authenticated call, failing fast without network
    /// traffic when the session is expired or absent.
    fn auth_token(&self) -> ApiResult<String> {
        if self.inner.session.phase() == Phase::Expired {
            return Err(ApiError::session_expired());
        }
        self.inner
            .store
            .credential()
            .ok_or_else(ApiError::not_authenticated)
    }

    /// Credential for an admin-only call; the role check never touches the
    /// network on mismatch.
    fn admin_token(&self) -> ApiResult<String> {
        let token = self.auth_token()?;
        let is_admin = self
            .inner
            .store
            .identity()
            .is_some_and(|identity| identity.is_admin());
        if !is_admin {
            return Err(ApiError::not_authorized());
        }
        Ok(token)
    }

    async fn authed(&self, method: Method, path: &str, body: Option<&Value>) -> ApiResult<Value> {
        let token = self.auth_token()?;
        self.inner
            .gateway
            .request_with_auth(method, path, &token, body)
            .await
    }

    async fn admin(&self, method: Method, path: &str, body: Option<&Value>) -> ApiResult<Value> {
        let token = self.admin_token()?;
        self.inner
            .gateway
            .request_with_auth(method, path, &token, body)
            .await
    }

    // --- Employees --------------------------------------------------------

    /// Employee directory, served read-through: a cached roster answers
    /// without a network call; a fetch populates the cache.
    pub async fn employees(&self) -> ApiResult<Vec<Employee>> {
        if let Some(cached) = lock(&self.inner.employees).clone() {
            debug!("serving employee roster from cache");
            return Ok(cached);
        }

        let payload = self.authed(Method::GET, "/employees", None).await?;
        let roster: Vec<Employee> = decode(payload)?;
        *lock(&self.inner.employees) = Some(roster.clone());
        Ok(roster)
    }

    pub async fn employee(&self, id: i64) -> ApiResult<Employee> {
        let payload = self
            .authed(Method::GET, &format!("/employees/{id}"), None)
            .await?;
        decode(payload)
    }

    /// Admin-only. Invalidates the roster cache on success.
    pub async fn create_employee(&self, employee: &NewEmployee) -> ApiResult<CreatedEmployee> {
        let body = json!(employee);
        let payload = self.admin(Method::POST, "/employees", Some(&body)).await?;
        self.invalidate_employee_cache();
        decode(payload)
    }

    /// Admin-only. Invalidates the roster cache on success.
    pub async fn update_employee(
        &self,
        id: i64,
        update: &EmployeeUpdate,
    ) -> ApiResult<MessageResponse> {
        let body = json!(update);
        let payload = self
            .admin(Method::PUT, &format!("/employees/{id}"), Some(&body))
            .await?;
        self.invalidate_employee_cache();
        decode(payload)
    }

    /// Admin-only. Invalidates the roster cache on success.
    pub async fn delete_employee(&self, id: i64) -> ApiResult<MessageResponse> {
        let payload = self
            .admin(Method::DELETE, &format!("/employees/{id}"), None)
            .await?;
        self.invalidate_employee_cache();
        decode(payload)
    }

    /// Drops the memoized roster. Happens automatically after employee
    /// mutations and when the session ends.
    pub fn invalidate_employee_cache(&self) {
        *lock(&self.inner.employees) = None;
    }

    /// True while a fetched roster is memoized (diagnostics and tests).
    pub fn employee_cache_primed(&self) -> bool {
        lock(&self.inner.employees).is_some()
    }

    // --- Attendance -------------------------------------------------------

    pub async fn check_in(&self, employee_id: i64) -> ApiResult<MessageResponse> {
        let body = json!({ "employee_id": employee_id });
        let payload = self
            .authed(Method::POST, "/attendance/checkin", Some(&body))
            .await?;
        decode(payload)
    }

    pub async fn check_out(&self, employee_id: i64) -> ApiResult<MessageResponse> {
        let body = json!({ "employee_id": employee_id });
        let payload = self
            .authed(Method::POST, "/attendance/checkout", Some(&body))
            .await?;
        decode(payload)
    }

    pub async fn attendance(
        &self,
        employee_id: i64,
        query: &AttendanceQuery,
    ) -> ApiResult<Vec<AttendanceRecord>> {
        // query keys mirror the backend's parameter names, `from_` included
        let path = with_query(
            &format!("/attendance/{employee_id}"),
            &[
                ("from_", query.from.clone()),
                ("to", query.to.clone()),
                ("limit", query.limit.map(|v| v.to_string())),
                ("offset", query.offset.map(|v| v.to_string())),
            ],
        );
        let payload = self.authed(Method::GET, &path, None).await?;
        decode(payload)
    }

    // --- Profile ----------------------------------------------------------

    pub async fn profile(&self) -> ApiResult<Profile> {
        let payload = self.authed(Method::GET, "/me", None).await?;
        decode(payload)
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> ApiResult<MessageResponse> {
        let body = json!(update);
        let payload = self.authed(Method::PATCH, "/me", Some(&body)).await?;
        decode(payload)
    }

    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> ApiResult<MessageResponse> {
        let body = json!({
            "current_password": current_password,
            "new_password": new_password,
        });
        let payload = self
            .authed(Method::POST, "/me/change-password", Some(&body))
            .await?;
        decode(payload)
    }

    // --- Admin ------------------------------------------------------------

    /// Admin-only dashboard counters.
    pub async fn admin_summary(&self) -> ApiResult<AdminSummary> {
        let payload = self.admin(Method::GET, "/admin/summary", None).await?;
        decode(payload)
    }

    /// Admin-only password reset for another account.
    pub async fn reset_password(
        &self,
        email: &str,
        new_password: &str,
    ) -> ApiResult<MessageResponse> {
        let body = json!({
            "email": email.trim().to_lowercase(),
            "new_password": new_password,
        });
        let payload = self
            .admin(Method::POST, "/admin/reset-password", Some(&body))
            .await?;
        decode(payload)
    }

    // --- Payslips ---------------------------------------------------------

    pub async fn payslips(&self, query: &PayslipQuery) -> ApiResult<Vec<Payslip>> {
        let path = with_query(
            "/payslips",
            &[
                ("month", query.month.clone()),
                ("employee_id", query.employee_id.map(|v| v.to_string())),
                ("status_q", query.status.clone()),
            ],
        );
        let payload = self.authed(Method::GET, &path, None).await?;
        decode(payload)
    }

    /// Admin-only. Generates (or regenerates) payslips for a month,
    /// optionally restricted to one employee.
    pub async fn generate_payslips(
        &self,
        month: &str,
        employee_id: Option<i64>,
    ) -> ApiResult<GeneratedPayslips> {
        let mut body = json!({ "month": month });
        if let Some(id) = employee_id {
            body["employee_id"] = json!(id);
        }
        let payload = self.admin(Method::POST, "/payslips", Some(&body)).await?;
        decode(payload)
    }

    /// Admin-only. `status` must be "Draft" or "Finalized" server-side.
    pub async fn set_payslip_status(&self, id: i64, status: &str) -> ApiResult<MessageResponse> {
        let body = json!({ "status": status });
        let payload = self
            .admin(Method::PATCH, &format!("/payslips/{id}"), Some(&body))
            .await?;
        decode(payload)
    }

    /// Builds the CSV export address for a payslip; no network call. The
    /// credential rides along as a query parameter because downloads go
    /// through the browser/OS, not this client.
    pub fn payslip_export_url(&self, id: i64, format: &str) -> ApiResult<String> {
        let token = self.auth_token()?;
        Ok(format!(
            "{}/payslips/{id}/export?{}",
            self.inner.gateway.base_url(),
            url::form_urlencoded::Serializer::new(String::new())
                .append_pair("format", format)
                .append_pair("token", &token)
                .finish()
        ))
    }

    // --- Unauthenticated --------------------------------------------------

    /// Backend liveness probe.
    pub async fn health(&self) -> ApiResult<Health> {
        let payload = self.inner.gateway.request(Method::GET, "/healthz", None).await?;
        decode(payload)
    }

    /// Backend clock, for drift display in attendance screens.
    pub async fn server_time(&self) -> ApiResult<ServerTime> {
        let payload = self.inner.gateway.request(Method::GET, "/time", None).await?;
        decode(payload)
    }
}

fn lock(cache: &Mutex<Option<Vec<Employee>>>) -> MutexGuard<'_, Option<Vec<Employee>>> {
    cache.lock().unwrap_or_else(PoisonError::into_inner)
}

fn with_query(path: &str, params: &[(&str, Option<String>)]) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    let mut any = false;
    for (key, value) in params {
        if let Some(value) = value {
            serializer.append_pair(key, value);
            any = true;
        }
    }
    if any {
        format!("{path}?{}", serializer.finish())
    } else {
        path.to_string()
    }
}
