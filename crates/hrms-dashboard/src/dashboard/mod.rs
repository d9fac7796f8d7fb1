//! Dashboard state: the active section, its filters, and the cached record
//! lists kept in step with the backend.
//!
//! Every mutation goes to the backend first. The local cache only changes
//! once the backend acknowledges it, and each outcome is reported through the
//! [`Notifier`].

pub mod calendar;
pub mod filters;
mod notify;

use std::fmt;

use chrono::Utc;
use tracing::{info, warn};

use crate::api::{ClientError, HrmsClient};
use crate::auth::{AuthError, Session, SessionStore};
use crate::forms::{
    leave_eligible_employees, CandidateForm, EmployeeForm, LeaveForm, LoginForm,
    ValidationErrors,
};
use crate::records::{
    AttendanceRecord, AttendanceStatus, Candidate, CandidateStatus, Employee, LeaveRecord,
    LeaveStatus, RecordId, POSITION_OPTIONS, WIRE_DATE_FORMAT,
};

use calendar::LeaveCalendar;
use filters::{FilterCriteria, WILDCARD};
use notify::Action;

pub use notify::{MemoryNotifier, Notification, NotificationLevel, Notifier};

/// Top-level dashboard views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Section {
    #[default]
    Candidates,
    Employees,
    Attendance,
    Leaves,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Candidates,
        Section::Employees,
        Section::Attendance,
        Section::Leaves,
    ];

    /// Resolve a `?section=` value. Anything unrecognised shows candidates.
    pub fn from_query(raw: &str) -> Self {
        let wanted = raw.trim();
        Self::ALL
            .into_iter()
            .find(|section| section.slug().eq_ignore_ascii_case(wanted))
            .unwrap_or_default()
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Section::Candidates => "candidates",
            Section::Employees => "employees",
            Section::Attendance => "attendance",
            Section::Leaves => "leaves",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Section::Candidates => "Candidates",
            Section::Employees => "Employees",
            Section::Attendance => "Attendance",
            Section::Leaves => "Leaves",
        }
    }

    /// Status dropdown entries, wildcard first. Empty when the section has no
    /// status filter.
    pub fn status_options(self) -> Vec<&'static str> {
        let labels: Vec<&'static str> = match self {
            Section::Candidates => CandidateStatus::ordered().map(CandidateStatus::label).to_vec(),
            Section::Employees => return Vec::new(),
            Section::Attendance => AttendanceStatus::ordered()
                .map(AttendanceStatus::label)
                .to_vec(),
            Section::Leaves => LeaveStatus::ordered().map(LeaveStatus::label).to_vec(),
        };
        std::iter::once(WILDCARD).chain(labels).collect()
    }

    /// Position dropdown entries, wildcard first. Empty when the section has
    /// no position filter.
    pub fn position_options(self) -> Vec<&'static str> {
        match self {
            Section::Candidates | Section::Employees => std::iter::once(WILDCARD)
                .chain(POSITION_OPTIONS)
                .collect(),
            Section::Attendance | Section::Leaves => Vec::new(),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Client-side copy of every record list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardCache {
    pub candidates: Vec<Candidate>,
    pub employees: Vec<Employee>,
    pub attendance: Vec<AttendanceRecord>,
    pub leaves: Vec<LeaveRecord>,
}

impl DashboardCache {
    /// Build a cache from freshly fetched lists; attendance rows are derived
    /// from the employees.
    pub fn from_lists(
        candidates: Vec<Candidate>,
        employees: Vec<Employee>,
        leaves: Vec<LeaveRecord>,
    ) -> Self {
        let attendance = employees.iter().map(AttendanceRecord::from_employee).collect();
        Self {
            candidates,
            employees,
            attendance,
            leaves,
        }
    }

    pub fn candidate(&self, id: &RecordId) -> Option<&Candidate> {
        self.candidates.iter().find(|candidate| &candidate.id == id)
    }

    pub fn employee(&self, id: &RecordId) -> Option<&Employee> {
        self.employees.iter().find(|employee| &employee.id == id)
    }

    pub fn leave(&self, id: &RecordId) -> Option<&LeaveRecord> {
        self.leaves.iter().find(|leave| &leave.id == id)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("no {kind} with id {id} is loaded")]
    UnknownRecord { kind: &'static str, id: RecordId },
}

pub struct Dashboard<S, N> {
    client: HrmsClient<S>,
    notifier: N,
    section: Section,
    filters: FilterCriteria,
    cache: DashboardCache,
}

impl<S, N> Dashboard<S, N>
where
    S: SessionStore + 'static,
    N: Notifier,
{
    pub fn new(client: HrmsClient<S>, notifier: N) -> Self {
        Self {
            client,
            notifier,
            section: Section::default(),
            filters: FilterCriteria::default(),
            cache: DashboardCache::default(),
        }
    }

    pub fn client(&self) -> &HrmsClient<S> {
        &self.client
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn filters(&self) -> &FilterCriteria {
        &self.filters
    }

    pub fn cache(&self) -> &DashboardCache {
        &self.cache
    }

    /// Switch sections; filters never carry over between tables.
    pub fn navigate(&mut self, section: Section) {
        self.section = section;
        self.filters = FilterCriteria::default();
    }

    pub fn navigate_to(&mut self, raw: &str) {
        self.navigate(Section::from_query(raw));
    }

    pub fn set_status_filter(&mut self, status: &str) {
        self.filters.set_status(status);
    }

    pub fn set_position_filter(&mut self, position: &str) {
        self.filters.set_position(position);
    }

    pub fn set_search(&mut self, query: &str) {
        self.filters.set_query(query);
    }

    pub fn visible_candidates(&self) -> Vec<&Candidate> {
        self.filters.apply(&self.cache.candidates)
    }

    pub fn visible_employees(&self) -> Vec<&Employee> {
        self.filters.apply(&self.cache.employees)
    }

    pub fn visible_attendance(&self) -> Vec<&AttendanceRecord> {
        self.filters.apply(&self.cache.attendance)
    }

    pub fn visible_leaves(&self) -> Vec<&LeaveRecord> {
        self.filters.apply(&self.cache.leaves)
    }

    pub fn leave_calendar(&self) -> LeaveCalendar<'_> {
        LeaveCalendar::from_records(&self.cache.leaves)
    }

    /// Employees the leave form may file for.
    pub fn leave_candidates(&self, query: &str) -> Vec<&Employee> {
        leave_eligible_employees(&self.cache.employees, query)
    }

    pub fn require_session(&self) -> Result<Session, DashboardError> {
        Ok(self.client.auth().require_active(Utc::now())?)
    }

    pub async fn login(&mut self, form: &LoginForm) -> Result<Session, DashboardError> {
        let credentials = form.validate()?;
        let result = self.client.login(&credentials).await;
        let session = self.report(Action::Login, result)?;
        self.notifier
            .notify(Notification::success("User Logged in Successfully"));
        Ok(session)
    }

    /// Drop the session and everything cached under it.
    pub fn logout(&mut self) -> Result<(), DashboardError> {
        self.client
            .auth()
            .sign_out()
            .map_err(|err| DashboardError::Auth(AuthError::Store(err)))?;
        self.cache = DashboardCache::default();
        self.navigate(Section::default());
        self.notifier
            .notify(Notification::success("User Logged Out Successfully"));
        Ok(())
    }

    /// Fetch every list concurrently and replace the cache in one step.
    pub async fn refresh(&mut self) -> Result<(), DashboardError> {
        let result = tokio::try_join!(
            self.client.list_candidates(),
            self.client.list_employees(),
            self.client.list_leaves(),
        );
        let (candidates, employees, leaves) = self.report(Action::Refresh, result)?;
        info!(
            candidates = candidates.len(),
            employees = employees.len(),
            leaves = leaves.len(),
            "dashboard refreshed"
        );
        self.cache = DashboardCache::from_lists(candidates, employees, leaves);
        Ok(())
    }

    pub async fn add_candidate(&mut self, form: &CandidateForm) -> Result<Candidate, DashboardError> {
        let candidate = form.validate()?;
        let result = self.client.add_candidate(&candidate).await;
        let created = self.report(Action::AddCandidate, result)?;
        self.cache.candidates.push(created.clone());
        self.notifier
            .notify(Notification::success("Candidate added successfully!"));
        Ok(created)
    }

    pub async fn change_candidate_status(
        &mut self,
        id: &RecordId,
        status: CandidateStatus,
    ) -> Result<(), DashboardError> {
        if self.cache.candidate(id).is_none() {
            return Err(unknown("candidate", id));
        }
        let result = self.client.set_candidate_status(id, status).await;
        self.report(Action::CandidateStatus, result)?;

        if let Some(candidate) = self.cache.candidates.iter_mut().find(|c| &c.id == id) {
            candidate.status = status;
        }
        self.notifier.notify(Notification::success(format!(
            "Candidate status updated to {status}"
        )));
        Ok(())
    }

    pub async fn delete_candidate(&mut self, id: &RecordId) -> Result<(), DashboardError> {
        let name = self
            .cache
            .candidate(id)
            .map(|candidate| candidate.full_name.clone())
            .ok_or_else(|| unknown("candidate", id))?;
        let result = self.client.delete_candidate(id).await;
        self.report(Action::DeleteCandidate, result)?;

        self.cache.candidates.retain(|candidate| &candidate.id != id);
        self.notifier.notify(Notification::success(format!(
            "{name} has been deleted successfully"
        )));
        Ok(())
    }

    pub async fn update_employee(
        &mut self,
        id: &RecordId,
        form: &EmployeeForm,
    ) -> Result<(), DashboardError> {
        if self.cache.employee(id).is_none() {
            return Err(unknown("employee", id));
        }
        let update = form.validate()?;
        let result = self.client.update_employee(id, &update).await;
        self.report(Action::UpdateEmployee, result)?;

        if let Some(employee) = self.cache.employees.iter_mut().find(|e| &e.id == id) {
            employee.full_name = update.full_name;
            employee.email = update.email;
            employee.phone = update.phone;
            employee.position = update.position;
            employee.department = update.department;
            employee.date_of_joining = update.date_of_joining.format(WIRE_DATE_FORMAT).to_string();

            if let Some(row) = self
                .cache
                .attendance
                .iter_mut()
                .find(|row| &row.employee_id == id)
            {
                *row = AttendanceRecord::from_employee(employee);
            }
        }
        self.notifier
            .notify(Notification::success("Employee updated successfully!"));
        Ok(())
    }

    pub async fn mark_attendance(
        &mut self,
        id: &RecordId,
        status: AttendanceStatus,
    ) -> Result<(), DashboardError> {
        let name = self
            .cache
            .employee(id)
            .map(|employee| employee.full_name.clone())
            .ok_or_else(|| unknown("employee", id))?;
        let result = self.client.set_attendance(id, status).await;
        self.report(Action::MarkAttendance, result)?;

        if let Some(employee) = self.cache.employees.iter_mut().find(|e| &e.id == id) {
            employee.attendance = Some(status);
        }
        if let Some(row) = self
            .cache
            .attendance
            .iter_mut()
            .find(|row| &row.employee_id == id)
        {
            row.status = Some(status);
        }
        self.notifier.notify(Notification::success(format!(
            "{name}'s attendance updated to {status}"
        )));
        Ok(())
    }

    pub async fn delete_employee(&mut self, id: &RecordId) -> Result<(), DashboardError> {
        let name = self
            .cache
            .employee(id)
            .map(|employee| employee.full_name.clone())
            .ok_or_else(|| unknown("employee", id))?;
        let result = self.client.delete_employee(id).await;
        self.report(Action::DeleteEmployee, result)?;

        self.cache.employees.retain(|employee| &employee.id != id);
        self.cache.attendance.retain(|row| &row.employee_id != id);
        self.notifier.notify(Notification::success(format!(
            "{name} has been deleted successfully"
        )));
        Ok(())
    }

    pub async fn add_leave(&mut self, form: &LeaveForm) -> Result<LeaveRecord, DashboardError> {
        let leave = form.validate(&self.cache.employees)?;
        let result = self.client.add_leave(&leave).await;
        let created = self.report(Action::AddLeave, result)?;
        self.cache.leaves.push(created.clone());
        self.notifier
            .notify(Notification::success("Leave added successfully!"));
        Ok(created)
    }

    pub async fn change_leave_status(
        &mut self,
        id: &RecordId,
        status: LeaveStatus,
    ) -> Result<(), DashboardError> {
        let name = self
            .cache
            .leave(id)
            .map(|leave| leave.employee_name.clone())
            .ok_or_else(|| unknown("leave", id))?;
        let result = self.client.set_leave_status(id, status).await;
        self.report(Action::LeaveStatus, result)?;

        if let Some(leave) = self.cache.leaves.iter_mut().find(|leave| &leave.id == id) {
            leave.status = status;
        }
        self.notifier.notify(Notification::success(format!(
            "{name}'s leave status updated to {status}"
        )));
        Ok(())
    }

    fn report<T>(
        &mut self,
        action: Action,
        result: Result<T, ClientError>,
    ) -> Result<T, DashboardError> {
        let err = match result {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        warn!(?action, error = %err, "dashboard action failed");
        if err.ends_session() {
            self.cache = DashboardCache::default();
            self.navigate(Section::default());
        }
        self.notifier.notify(Notification::error(action.describe(&err)));
        Err(DashboardError::Client(err))
    }
}

fn unknown(kind: &'static str, id: &RecordId) -> DashboardError {
    DashboardError::UnknownRecord {
        kind,
        id: id.clone(),
    }
}
