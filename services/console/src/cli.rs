use crate::commands::{self, Console};
use crate::infra::{parse_date, parse_month};
use crate::render::OutputFormat;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use hrms_dashboard::config::AppConfig;
use hrms_dashboard::error::AppError;
use hrms_dashboard::records::{AttendanceStatus, CandidateStatus, LeaveStatus};
use hrms_dashboard::telemetry;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "hrms",
    about = "Manage candidates, employees, attendance and leave from the terminal",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the session token
    Login(LoginArgs),
    /// Forget the stored session
    Logout,
    /// Show who is signed in and when the session expires
    Whoami,
    /// Hiring pipeline
    Candidates {
        #[command(subcommand)]
        command: CandidateCommand,
    },
    /// Staff directory
    Employees {
        #[command(subcommand)]
        command: EmployeeCommand,
    },
    /// Daily attendance marks
    Attendance {
        #[command(subcommand)]
        command: AttendanceCommand,
    },
    /// Leave requests and the approved-leave calendar
    Leaves {
        #[command(subcommand)]
        command: LeaveCommand,
    },
}

#[derive(Subcommand, Debug)]
pub(crate) enum CandidateCommand {
    /// List candidates
    List(ListArgs),
    /// Add a candidate with their resume
    Add(AddCandidateArgs),
    /// Move a candidate to another pipeline status
    Status {
        id: String,
        status: CandidateStatus,
    },
    /// Delete a candidate
    Delete(DeleteArgs),
    /// Print the link to a candidate's resume
    Resume { id: String },
}

#[derive(Subcommand, Debug)]
pub(crate) enum EmployeeCommand {
    /// List employees
    List(ListArgs),
    /// Edit an employee; omitted fields keep their current value
    Update(UpdateEmployeeArgs),
    /// Delete an employee
    Delete(DeleteArgs),
}

#[derive(Subcommand, Debug)]
pub(crate) enum AttendanceCommand {
    /// List today's attendance
    List(ListArgs),
    /// Record an attendance mark for an employee
    Mark {
        id: String,
        status: AttendanceStatus,
    },
}

#[derive(Subcommand, Debug)]
pub(crate) enum LeaveCommand {
    /// List leave requests
    List(ListArgs),
    /// File a leave request for an employee marked present
    Add(AddLeaveArgs),
    /// Approve or reject a leave request
    Status { id: String, status: LeaveStatus },
    /// Show approved leave for a month
    Calendar(CalendarArgs),
}

#[derive(Args, Debug)]
pub(crate) struct LoginArgs {
    #[arg(long)]
    pub(crate) email: String,
    /// Prompted for when omitted
    #[arg(long)]
    pub(crate) password: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ListArgs {
    /// Status filter ("all" disables it)
    #[arg(long)]
    pub(crate) status: Option<String>,
    /// Position filter ("all" disables it)
    #[arg(long)]
    pub(crate) position: Option<String>,
    /// Case-insensitive free-text search
    #[arg(long)]
    pub(crate) search: Option<String>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub(crate) format: OutputFormat,
}

#[derive(Args, Debug)]
pub(crate) struct DeleteArgs {
    pub(crate) id: String,
    /// Skip the confirmation prompt
    #[arg(long, short)]
    pub(crate) yes: bool,
}

#[derive(Args, Debug)]
pub(crate) struct AddCandidateArgs {
    #[arg(long)]
    pub(crate) name: String,
    #[arg(long)]
    pub(crate) email: String,
    #[arg(long)]
    pub(crate) phone: String,
    #[arg(long)]
    pub(crate) department: String,
    /// One of Intern, Full Time, Junior, Senior, Team Lead
    #[arg(long)]
    pub(crate) position: String,
    #[arg(long)]
    pub(crate) experience: String,
    /// PDF, DOC or DOCX, at most 2MB
    #[arg(long)]
    pub(crate) resume: PathBuf,
    /// Confirm the information provided is accurate
    #[arg(long)]
    pub(crate) accept_declaration: bool,
}

#[derive(Args, Debug)]
pub(crate) struct UpdateEmployeeArgs {
    pub(crate) id: String,
    #[arg(long)]
    pub(crate) name: Option<String>,
    #[arg(long)]
    pub(crate) email: Option<String>,
    #[arg(long)]
    pub(crate) phone: Option<String>,
    #[arg(long)]
    pub(crate) position: Option<String>,
    #[arg(long)]
    pub(crate) department: Option<String>,
    /// Date of joining (YYYY-MM-DD or DD-MM-YYYY)
    #[arg(long, value_parser = parse_date)]
    pub(crate) joined: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct AddLeaveArgs {
    /// Employee id
    #[arg(long)]
    pub(crate) employee: String,
    /// Defaults to the employee's position
    #[arg(long)]
    pub(crate) designation: Option<String>,
    /// First day of leave (YYYY-MM-DD or DD-MM-YYYY)
    #[arg(long, value_parser = parse_date)]
    pub(crate) start: NaiveDate,
    /// Last day of leave for multi-day requests
    #[arg(long, value_parser = parse_date)]
    pub(crate) end: Option<NaiveDate>,
    #[arg(long)]
    pub(crate) reason: String,
    /// Supporting document (PDF, DOC or DOCX, at most 2MB)
    #[arg(long)]
    pub(crate) document: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct CalendarArgs {
    /// Month to show (YYYY-MM). Defaults to the current month.
    #[arg(long, value_parser = parse_month)]
    pub(crate) month: Option<NaiveDate>,
    /// List who is on approved leave on this day
    #[arg(long, value_parser = parse_date)]
    pub(crate) date: Option<NaiveDate>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let mut console = Console::connect(&config)?;
    match cli.command {
        Command::Login(args) => commands::login(&mut console, args).await,
        Command::Logout => commands::logout(&mut console),
        Command::Whoami => commands::whoami(&console),
        Command::Candidates { command } => commands::candidates(&mut console, command).await,
        Command::Employees { command } => commands::employees(&mut console, command).await,
        Command::Attendance { command } => commands::attendance(&mut console, command).await,
        Command::Leaves { command } => commands::leaves(&mut console, command).await,
    }
}
