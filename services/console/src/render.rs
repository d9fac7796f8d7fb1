use chrono::{Datelike, NaiveDate};
use clap::ValueEnum;
use hrms_dashboard::dashboard::calendar::CalendarDay;
use hrms_dashboard::error::AppError;
use hrms_dashboard::records::{
    serial_number, AttendanceRecord, Candidate, Employee, LeaveRecord,
};
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Csv,
}

/// Header plus rows, ready for either output format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub(crate) fn candidates(candidates: &[&Candidate]) -> Self {
        let rows = candidates
            .iter()
            .enumerate()
            .map(|(idx, candidate)| {
                vec![
                    serial_number(idx),
                    candidate.id.to_string(),
                    candidate.full_name.clone(),
                    candidate.email.clone(),
                    candidate.phone.clone(),
                    candidate.display_position(),
                    candidate.status.to_string(),
                    candidate.experience.clone(),
                ]
            })
            .collect();
        Self {
            headers: vec![
                "Sr no.",
                "Id",
                "Candidates Name",
                "Email Address",
                "Phone Number",
                "Position",
                "Status",
                "Experience",
            ],
            rows,
        }
    }

    pub(crate) fn employees(employees: &[&Employee]) -> Self {
        let rows = employees
            .iter()
            .enumerate()
            .map(|(idx, employee)| {
                vec![
                    serial_number(idx),
                    employee.id.to_string(),
                    employee.full_name.clone(),
                    employee.email.clone(),
                    employee.phone.clone(),
                    employee.position.clone(),
                    employee.department.clone(),
                    employee.date_of_joining.clone(),
                ]
            })
            .collect();
        Self {
            headers: vec![
                "Sr no.",
                "Id",
                "Employee Name",
                "Email Address",
                "Phone Number",
                "Position",
                "Department",
                "Date of Joining",
            ],
            rows,
        }
    }

    pub(crate) fn attendance(rows: &[&AttendanceRecord]) -> Self {
        let rows = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                vec![
                    serial_number(idx),
                    row.employee_id.to_string(),
                    row.employee_name.clone(),
                    row.position.clone(),
                    row.department.clone(),
                    row.task.clone(),
                    row.status
                        .map(|status| status.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                ]
            })
            .collect();
        Self {
            headers: vec![
                "Sr no.",
                "Id",
                "Employee Name",
                "Position",
                "Department",
                "Task",
                "Status",
            ],
            rows,
        }
    }

    pub(crate) fn leaves(leaves: &[&LeaveRecord]) -> Self {
        let rows = leaves
            .iter()
            .enumerate()
            .map(|(idx, leave)| {
                vec![
                    serial_number(idx),
                    leave.id.to_string(),
                    leave.employee_name.clone(),
                    leave.date.clone(),
                    leave.reason.clone(),
                    leave.status.to_string(),
                    leave.document.clone().unwrap_or_else(|| "-".to_string()),
                ]
            })
            .collect();
        Self {
            headers: vec!["Sr no.", "Id", "Name", "Date", "Reason", "Status", "Docs"],
            rows,
        }
    }

    pub(crate) fn write<W: Write>(&self, format: OutputFormat, out: W) -> Result<(), AppError> {
        match format {
            OutputFormat::Table => self.write_aligned(out),
            OutputFormat::Csv => self.write_csv(out),
        }
    }

    fn write_aligned<W: Write>(&self, mut out: W) -> Result<(), AppError> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let header: Vec<String> = self.headers.iter().map(|h| h.to_string()).collect();
        writeln!(out, "{}", aligned_line(&header, &widths))?;
        let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
        writeln!(out, "{}", aligned_line(&rule, &widths))?;
        for row in &self.rows {
            writeln!(out, "{}", aligned_line(row, &widths))?;
        }
        if self.rows.is_empty() {
            writeln!(out, "No records match the current filters.")?;
        }
        Ok(())
    }

    fn write_csv<W: Write>(&self, out: W) -> Result<(), AppError> {
        let mut writer = csv::Writer::from_writer(out);
        writer.write_record(&self.headers).map_err(csv_error)?;
        for row in &self.rows {
            writer.write_record(row).map_err(csv_error)?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn aligned_line(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn csv_error(err: csv::Error) -> AppError {
    AppError::Output(format!("failed to write CSV: {err}"))
}

pub(crate) fn print_table(table: &Table, format: OutputFormat) -> Result<(), AppError> {
    let stdout = io::stdout();
    table.write(format, stdout.lock())
}

/// Monday-first month grid; days with approved leave show their count.
pub(crate) fn calendar_grid(days: &[CalendarDay]) -> Vec<String> {
    let Some(first) = days.first() else {
        return Vec::new();
    };

    let mut lines = vec![
        first.date.format("%B %Y").to_string(),
        "  Mo    Tu    We    Th    Fr    Sa    Su".to_string(),
    ];
    let mut cells: Vec<String> = (0..first.date.weekday().num_days_from_monday())
        .map(|_| "      ".to_string())
        .collect();

    for day in days {
        let marker = if day.has_absentees {
            format!("({})", day.approved_leaves.min(9))
        } else {
            "   ".to_string()
        };
        cells.push(format!(" {:>2}{marker}", day.date.day()));
        if cells.len() == 7 {
            lines.push(cells.concat().trim_end().to_string());
            cells.clear();
        }
    }
    if !cells.is_empty() {
        lines.push(cells.concat().trim_end().to_string());
    }
    lines
}

pub(crate) fn print_calendar(
    days: &[CalendarDay],
    selected: Option<(NaiveDate, Vec<&LeaveRecord>)>,
    skipped: usize,
) {
    for line in calendar_grid(days) {
        println!("{line}");
    }

    if let Some((date, leaves)) = selected {
        println!("\nApproved leave on {}", date.format("%d-%m-%Y"));
        if leaves.is_empty() {
            println!("- nobody");
        }
        for leave in leaves {
            println!("- {} ({}): {}", leave.employee_name, leave.date, leave.reason);
        }
    }

    if skipped > 0 {
        println!("\n{skipped} approved leave(s) have unreadable dates and are not shown");
    }
}
