use crate::cli::{
    AddCandidateArgs, AddLeaveArgs, AttendanceCommand, CalendarArgs, CandidateCommand,
    DeleteArgs, EmployeeCommand, LeaveCommand, ListArgs, LoginArgs, UpdateEmployeeArgs,
};
use crate::infra::{confirm, prompt_password, ConsoleNotifier};
use crate::render::{print_calendar, print_table, Table};
use chrono::{DateTime, Local};
use hrms_dashboard::api::HrmsClient;
use hrms_dashboard::auth::{decode_claims, AuthContext, FileSessionStore, SessionError};
use hrms_dashboard::config::AppConfig;
use hrms_dashboard::dashboard::{Dashboard, DashboardError, Section};
use hrms_dashboard::error::AppError;
use hrms_dashboard::forms::{Attachment, CandidateForm, EmployeeForm, LeaveForm, LoginForm};
use hrms_dashboard::records::RecordId;
use std::sync::Arc;
use tracing::{debug, warn};

pub(crate) struct Console {
    dashboard: Dashboard<FileSessionStore, ConsoleNotifier>,
}

impl Console {
    pub(crate) fn connect(config: &AppConfig) -> Result<Self, AppError> {
        let store = Arc::new(FileSessionStore::new(config.session.session_file.clone()));
        let auth = match AuthContext::restore(store.clone()) {
            Ok(auth) => auth,
            Err(SessionError::Format(err)) => {
                warn!(path = %store.path().display(), error = %err, "ignoring unreadable session file");
                AuthContext::signed_out(store)
            }
            Err(err) => return Err(err.into()),
        };

        let client = HrmsClient::new(config.backend.clone(), Arc::new(auth))?;
        debug!(
            environment = ?config.environment,
            api = %config.backend.api_base_url,
            "console connected"
        );

        Ok(Self {
            dashboard: Dashboard::new(client, ConsoleNotifier),
        })
    }

    /// Load every list and show `section` with the requested filters.
    async fn open(&mut self, section: Section, args: &ListArgs) -> Result<(), AppError> {
        self.dashboard.refresh().await?;
        self.dashboard.navigate(section);
        if let Some(status) = &args.status {
            self.dashboard.set_status_filter(status);
        }
        if let Some(position) = &args.position {
            self.dashboard.set_position_filter(position);
        }
        if let Some(search) = &args.search {
            self.dashboard.set_search(search);
        }
        Ok(())
    }
}

pub(crate) async fn login(console: &mut Console, args: LoginArgs) -> Result<(), AppError> {
    let password = match args.password {
        Some(password) => password,
        None => prompt_password()?,
    };
    let form = LoginForm {
        email: args.email,
        password,
    };
    console.dashboard.login(&form).await?;
    Ok(())
}

pub(crate) fn logout(console: &mut Console) -> Result<(), AppError> {
    console.dashboard.logout()?;
    Ok(())
}

pub(crate) fn whoami(console: &Console) -> Result<(), AppError> {
    let session = console.dashboard.require_session()?;
    println!("Signed in as {}", session.display_name());
    if let Some(email) = session.user.as_ref().and_then(|user| user.email.as_deref()) {
        println!("Email: {email}");
    }

    let expires = decode_claims(&session.token)
        .ok()
        .and_then(|claims| claims.exp)
        .and_then(|exp| DateTime::from_timestamp(exp, 0));
    match expires {
        Some(at) => println!("Session expires {}", at.with_timezone(&Local).format("%d-%m-%Y %H:%M")),
        None => println!("Session has no expiry"),
    }
    Ok(())
}

pub(crate) async fn candidates(
    console: &mut Console,
    command: CandidateCommand,
) -> Result<(), AppError> {
    match command {
        CandidateCommand::List(args) => {
            console.open(Section::Candidates, &args).await?;
            print_table(
                &Table::candidates(&console.dashboard.visible_candidates()),
                args.format,
            )
        }
        CandidateCommand::Add(args) => add_candidate(console, args).await,
        CandidateCommand::Status { id, status } => {
            console.dashboard.refresh().await?;
            console
                .dashboard
                .change_candidate_status(&RecordId(id), status)
                .await?;
            Ok(())
        }
        CandidateCommand::Delete(DeleteArgs { id, yes }) => {
            console.dashboard.refresh().await?;
            let id = RecordId(id);
            let name = console
                .dashboard
                .cache()
                .candidate(&id)
                .map(|candidate| candidate.full_name.clone())
                .ok_or_else(|| unknown("candidate", &id))?;
            if !confirm(
                &format!("Are you sure you want to delete {name}? This action cannot be undone."),
                yes,
            )? {
                println!("Cancelled");
                return Ok(());
            }
            console.dashboard.delete_candidate(&id).await?;
            Ok(())
        }
        CandidateCommand::Resume { id } => {
            console.dashboard.refresh().await?;
            let id = RecordId(id);
            let candidate = console
                .dashboard
                .cache()
                .candidate(&id)
                .ok_or_else(|| unknown("candidate", &id))?;
            match console.dashboard.client().resume_url(candidate) {
                Some(url) => println!("{url}"),
                None => eprintln!("No resume available for this candidate"),
            }
            Ok(())
        }
    }
}

async fn add_candidate(console: &mut Console, args: AddCandidateArgs) -> Result<(), AppError> {
    let resume = Attachment::read(&args.resume)?;
    let form = CandidateForm {
        full_name: args.name,
        email: args.email,
        phone: args.phone,
        department: args.department,
        position: args.position,
        experience: args.experience,
        resume: Some(resume),
        declaration: args.accept_declaration,
    };
    let created = console.dashboard.add_candidate(&form).await?;
    println!("id: {}", created.id);
    Ok(())
}

pub(crate) async fn employees(
    console: &mut Console,
    command: EmployeeCommand,
) -> Result<(), AppError> {
    match command {
        EmployeeCommand::List(args) => {
            console.open(Section::Employees, &args).await?;
            print_table(
                &Table::employees(&console.dashboard.visible_employees()),
                args.format,
            )
        }
        EmployeeCommand::Update(args) => update_employee(console, args).await,
        EmployeeCommand::Delete(DeleteArgs { id, yes }) => {
            console.dashboard.refresh().await?;
            let id = RecordId(id);
            let name = console
                .dashboard
                .cache()
                .employee(&id)
                .map(|employee| employee.full_name.clone())
                .ok_or_else(|| unknown("employee", &id))?;
            if !confirm(
                &format!("Are you sure you want to delete {name}? This action cannot be undone."),
                yes,
            )? {
                println!("Cancelled");
                return Ok(());
            }
            console.dashboard.delete_employee(&id).await?;
            Ok(())
        }
    }
}

async fn update_employee(console: &mut Console, args: UpdateEmployeeArgs) -> Result<(), AppError> {
    console.dashboard.refresh().await?;
    let id = RecordId(args.id);
    let current = console
        .dashboard
        .cache()
        .employee(&id)
        .ok_or_else(|| unknown("employee", &id))?;

    let mut form = EmployeeForm::from_employee(current);
    if let Some(name) = args.name {
        form.full_name = name;
    }
    if let Some(email) = args.email {
        form.email = email;
    }
    if let Some(phone) = args.phone {
        form.phone = phone;
    }
    if let Some(position) = args.position {
        form.position = position;
    }
    if let Some(department) = args.department {
        form.department = department;
    }
    if args.joined.is_some() {
        form.date_of_joining = args.joined;
    }

    console.dashboard.update_employee(&id, &form).await?;
    Ok(())
}

pub(crate) async fn attendance(
    console: &mut Console,
    command: AttendanceCommand,
) -> Result<(), AppError> {
    match command {
        AttendanceCommand::List(args) => {
            console.open(Section::Attendance, &args).await?;
            print_table(
                &Table::attendance(&console.dashboard.visible_attendance()),
                args.format,
            )
        }
        AttendanceCommand::Mark { id, status } => {
            console.dashboard.refresh().await?;
            console
                .dashboard
                .mark_attendance(&RecordId(id), status)
                .await?;
            Ok(())
        }
    }
}

pub(crate) async fn leaves(console: &mut Console, command: LeaveCommand) -> Result<(), AppError> {
    match command {
        LeaveCommand::List(args) => {
            console.open(Section::Leaves, &args).await?;
            print_table(&Table::leaves(&console.dashboard.visible_leaves()), args.format)
        }
        LeaveCommand::Add(args) => add_leave(console, args).await,
        LeaveCommand::Status { id, status } => {
            console.dashboard.refresh().await?;
            console
                .dashboard
                .change_leave_status(&RecordId(id), status)
                .await?;
            Ok(())
        }
        LeaveCommand::Calendar(args) => calendar(console, args).await,
    }
}

async fn add_leave(console: &mut Console, args: AddLeaveArgs) -> Result<(), AppError> {
    let document = args.document.map(Attachment::read).transpose()?;
    console.dashboard.refresh().await?;

    let form = LeaveForm {
        employee_id: Some(RecordId(args.employee)),
        designation: args.designation.unwrap_or_default(),
        start: Some(args.start),
        end: args.end,
        reason: args.reason,
        document,
    };
    let created = console.dashboard.add_leave(&form).await?;
    println!("id: {} ({})", created.id, created.date);
    Ok(())
}

async fn calendar(console: &mut Console, args: CalendarArgs) -> Result<(), AppError> {
    console.dashboard.refresh().await?;
    console.dashboard.navigate(Section::Leaves);

    let today = Local::now().date_naive();
    let month = args.month.or(args.date).unwrap_or(today);
    let calendar = console.dashboard.leave_calendar();
    let days = calendar.month_overview(month);
    let selected = args.date.map(|date| (date, calendar.approved_on(date)));

    print_calendar(&days, selected, calendar.skipped());
    Ok(())
}

fn unknown(kind: &'static str, id: &RecordId) -> DashboardError {
    DashboardError::UnknownRecord {
        kind,
        id: id.clone(),
    }
}
