use std::sync::Arc;

use chrono::Utc;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::wire::{
    AddCandidateAck, AddLeaveAck, AttendancePatch, CandidateDto, EmployeeDto, EmployeePut,
    ErrorBody, LeaveDto, LoginResponse, MutationAck, StatusPatch, SUCCESS_MSG,
};
use super::ClientError;
use crate::auth::{AuthContext, Session, SessionStore};
use crate::config::BackendConfig;
use crate::forms::{Attachment, EmployeeUpdate, LoginCredentials, NewCandidate, NewLeave};
use crate::records::{
    AttendanceStatus, Candidate, CandidateStatus, Employee, LeaveRecord, LeaveStatus, RecordId,
    WIRE_DATE_FORMAT,
};

/// REST client for the HRMS backend. Every protected call checks the session
/// first and attaches it as a bearer token.
pub struct HrmsClient<S> {
    http: reqwest::Client,
    backend: BackendConfig,
    auth: Arc<AuthContext<S>>,
}

impl<S> HrmsClient<S>
where
    S: SessionStore + 'static,
{
    pub fn new(backend: BackendConfig, auth: Arc<AuthContext<S>>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(backend.request_timeout)
            .build()
            .map_err(ClientError::Setup)?;

        Ok(Self {
            http,
            backend,
            auth,
        })
    }

    pub fn auth(&self) -> &Arc<AuthContext<S>> {
        &self.auth
    }

    pub fn backend(&self) -> &BackendConfig {
        &self.backend
    }

    /// Exchange credentials for a token and persist the resulting session.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<Session, ClientError> {
        let request = self
            .http
            .post(self.backend.endpoint("auth/login"))
            .json(credentials);
        let response: LoginResponse = self.execute(request, false).await?;

        if response.msg.as_deref() != Some(SUCCESS_MSG) {
            return Err(ClientError::Rejected {
                msg: response.msg.unwrap_or_default(),
            });
        }

        let token = response
            .token
            .filter(|token| !token.trim().is_empty())
            .ok_or(ClientError::MissingField("token"))?;
        let session = match response.user {
            Some(user) => Session::new(token, Some(user)),
            None => Session::from_token(token),
        };

        self.auth.sign_in(session.clone())?;
        Ok(session)
    }

    pub async fn list_candidates(&self) -> Result<Vec<Candidate>, ClientError> {
        let request = self.http.get(self.backend.endpoint("candidates"));
        let rows: Vec<Value> = self.execute(request, true).await?;
        let records = decode_rows::<CandidateDto, Candidate>("candidates", rows);
        debug!(count = records.len(), "fetched candidates");
        Ok(records)
    }

    pub async fn list_employees(&self) -> Result<Vec<Employee>, ClientError> {
        let request = self.http.get(self.backend.endpoint("employees"));
        let rows: Vec<Value> = self.execute(request, true).await?;
        let records = decode_rows::<EmployeeDto, Employee>("employees", rows);
        debug!(count = records.len(), "fetched employees");
        Ok(records)
    }

    pub async fn list_leaves(&self) -> Result<Vec<LeaveRecord>, ClientError> {
        let request = self.http.get(self.backend.endpoint("leaves"));
        let rows: Vec<Value> = self.execute(request, true).await?;
        let records = decode_rows::<LeaveDto, LeaveRecord>("leaves", rows);
        debug!(count = records.len(), "fetched leaves");
        Ok(records)
    }

    /// Upload a new candidate with their resume. New candidates always start
    /// in the `New` status.
    pub async fn add_candidate(&self, candidate: &NewCandidate) -> Result<Candidate, ClientError> {
        let form = Form::new()
            .text("fullName", candidate.full_name.clone())
            .text("emailAddress", candidate.email.clone())
            .text("phoneNumber", candidate.phone.clone())
            .text("position", candidate.position.clone())
            .text("department", candidate.department.clone())
            .text("experience", candidate.experience.clone())
            .text("status", CandidateStatus::New.label())
            .part("resume", file_part(&candidate.resume)?);

        let request = self
            .http
            .post(self.backend.endpoint("candidates/addCandidate"))
            .multipart(form);
        let ack: AddCandidateAck = self.execute(request, true).await?;

        if ack.msg.as_deref() != Some(SUCCESS_MSG) {
            return Err(ClientError::Rejected {
                msg: ack.msg.unwrap_or_default(),
            });
        }

        let id = ack.id.ok_or(ClientError::MissingField("id"))?;
        info!(candidate_id = %id, "candidate added");

        Ok(Candidate {
            id: RecordId(id),
            full_name: ack.full_name.unwrap_or_else(|| candidate.full_name.clone()),
            email: ack.email_address.unwrap_or_else(|| candidate.email.clone()),
            phone: ack.phone_number.unwrap_or_else(|| candidate.phone.clone()),
            department: ack.department.unwrap_or_else(|| candidate.department.clone()),
            position: ack.position.unwrap_or_else(|| candidate.position.clone()),
            status: ack.status.unwrap_or(CandidateStatus::New),
            experience: ack.experience.unwrap_or_else(|| candidate.experience.clone()),
            resume_url: ack.resume_url.filter(|url| !url.is_empty()),
        })
    }

    pub async fn set_candidate_status(
        &self,
        id: &RecordId,
        status: CandidateStatus,
    ) -> Result<(), ClientError> {
        let request = self
            .http
            .patch(self.backend.endpoint(&format!("candidates/{id}")))
            .json(&StatusPatch {
                status: status.label(),
            });
        self.mutate(request).await?;
        info!(candidate_id = %id, status = status.label(), "candidate status updated");
        Ok(())
    }

    pub async fn delete_candidate(&self, id: &RecordId) -> Result<(), ClientError> {
        let request = self
            .http
            .delete(self.backend.endpoint(&format!("candidates/{id}")));
        self.mutate(request).await?;
        info!(candidate_id = %id, "candidate deleted");
        Ok(())
    }

    pub async fn update_employee(
        &self,
        id: &RecordId,
        update: &EmployeeUpdate,
    ) -> Result<(), ClientError> {
        let body = EmployeePut {
            employee_name: &update.full_name,
            email_address: &update.email,
            phone_number: &update.phone,
            position: &update.position,
            department: &update.department,
            date_of_joining: update.date_of_joining.format(WIRE_DATE_FORMAT).to_string(),
        };
        let request = self
            .http
            .put(self.backend.endpoint(&format!("employees/{id}")))
            .json(&body);
        self.mutate(request).await?;
        info!(employee_id = %id, "employee updated");
        Ok(())
    }

    pub async fn set_attendance(
        &self,
        id: &RecordId,
        status: AttendanceStatus,
    ) -> Result<(), ClientError> {
        let request = self
            .http
            .patch(self.backend.endpoint(&format!("employees/{id}")))
            .json(&AttendancePatch {
                attendance_status: status.label(),
            });
        self.mutate(request).await?;
        info!(employee_id = %id, status = status.label(), "attendance updated");
        Ok(())
    }

    pub async fn delete_employee(&self, id: &RecordId) -> Result<(), ClientError> {
        let request = self
            .http
            .delete(self.backend.endpoint(&format!("employees/{id}")));
        self.mutate(request).await?;
        info!(employee_id = %id, "employee deleted");
        Ok(())
    }

    /// File a leave request. New requests always start `Pending`.
    pub async fn add_leave(&self, leave: &NewLeave) -> Result<LeaveRecord, ClientError> {
        let leave_date = leave.span.to_wire();
        let mut form = Form::new()
            .text("employeeName", leave.employee_name.clone())
            .text("leaveDate", leave_date.clone())
            .text("reason", leave.reason.clone())
            .text("status", LeaveStatus::Pending.label())
            .text("designation", leave.designation.clone())
            .text("employeeId", leave.employee_id.0.clone());
        if let Some(document) = &leave.document {
            form = form.part("documents", file_part(document)?);
        }

        let request = self
            .http
            .post(self.backend.endpoint("leaves/addLeave"))
            .multipart(form);
        let ack: AddLeaveAck = self.execute(request, true).await?;

        if ack.msg.as_deref() != Some(SUCCESS_MSG) {
            return Err(ClientError::Rejected {
                msg: ack.msg.unwrap_or_default(),
            });
        }

        let stored = ack.new_leave.ok_or(ClientError::MissingField("newLeave"))?;
        let id = stored
            .id
            .or(ack.id)
            .ok_or(ClientError::MissingField("_id"))?;
        info!(leave_id = %id, employee = %leave.employee_name, "leave filed");

        Ok(LeaveRecord {
            id: RecordId(id),
            employee_name: stored
                .employee_name
                .unwrap_or_else(|| leave.employee_name.clone()),
            date: stored.leave_date.unwrap_or(leave_date),
            reason: stored.reason.unwrap_or_else(|| leave.reason.clone()),
            status: stored.status.unwrap_or(LeaveStatus::Pending),
            document: stored.documents.filter(|doc| !doc.is_empty()),
        })
    }

    pub async fn set_leave_status(
        &self,
        id: &RecordId,
        status: LeaveStatus,
    ) -> Result<(), ClientError> {
        let request = self
            .http
            .patch(self.backend.endpoint(&format!("leaves/{id}")))
            .json(&StatusPatch {
                status: status.label(),
            });
        self.mutate(request).await?;
        info!(leave_id = %id, status = status.label(), "leave status updated");
        Ok(())
    }

    /// Absolute link to a candidate's uploaded resume.
    pub fn resume_url(&self, candidate: &Candidate) -> Option<String> {
        candidate
            .resume_url
            .as_deref()
            .map(|reference| self.backend.asset_url(reference))
    }

    async fn mutate(&self, request: RequestBuilder) -> Result<(), ClientError> {
        let ack: MutationAck = self.execute(request, true).await?;
        if ack.accepted() {
            Ok(())
        } else {
            Err(ClientError::Rejected {
                msg: ack.msg.unwrap_or_default(),
            })
        }
    }

    async fn execute<T>(&self, request: RequestBuilder, protected: bool) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        let request = if protected {
            let session = self.auth.require_active(Utc::now())?;
            request.bearer_auth(session.token)
        } else {
            request
        };

        let response = request.send().await.map_err(ClientError::Transport)?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "backend responded");

        if protected && status == StatusCode::UNAUTHORIZED {
            warn!("backend rejected the session, signing out");
            if let Err(err) = self.auth.sign_out() {
                warn!(error = %err, "failed to clear rejected session");
            }
            return Err(ClientError::Unauthorized);
        }

        if !status.is_success() {
            let message = match response.bytes().await {
                Ok(body) => serde_json::from_slice::<ErrorBody>(&body)
                    .ok()
                    .and_then(ErrorBody::into_message),
                Err(_) => None,
            };
            return Err(ClientError::Server {
                status: status.as_u16(),
                message,
            });
        }

        response.json::<T>().await.map_err(ClientError::Decode)
    }
}

// One unreadable row must not hide the rest of the list.
fn decode_rows<D, R>(kind: &'static str, rows: Vec<Value>) -> Vec<R>
where
    D: DeserializeOwned,
    R: From<D>,
{
    rows.into_iter()
        .filter_map(|row| {
            let id = row.get("_id").and_then(Value::as_str).map(str::to_string);
            match serde_json::from_value::<D>(row) {
                Ok(dto) => Some(R::from(dto)),
                Err(err) => {
                    warn!(kind, id = id.as_deref().unwrap_or("?"), error = %err, "skipping unreadable row");
                    None
                }
            }
        })
        .collect()
}

fn file_part(attachment: &Attachment) -> Result<Part, ClientError> {
    Part::bytes(attachment.bytes().to_vec())
        .file_name(attachment.file_name().to_string())
        .mime_str(attachment.content_type().as_ref())
        .map_err(ClientError::Setup)
}
