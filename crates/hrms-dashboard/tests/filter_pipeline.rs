use hrms_dashboard::dashboard::filters::{
    filter_by_position, filter_by_query, filter_by_status, FilterCriteria,
};
use hrms_dashboard::records::{
    AttendanceRecord, AttendanceStatus, Candidate, CandidateStatus, Employee, LeaveRecord,
    LeaveStatus, RecordId,
};

fn candidate(id: &str, name: &str, department: &str, position: &str, status: CandidateStatus) -> Candidate {
    Candidate {
        id: RecordId::from(id),
        full_name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        phone: "15550142".to_string(),
        department: department.to_string(),
        position: position.to_string(),
        status,
        experience: "2".to_string(),
        resume_url: None,
    }
}

fn candidates() -> Vec<Candidate> {
    vec![
        candidate("c1", "Jacob William", "Design", "Senior", CandidateStatus::New),
        candidate("c2", "Guy Hawkins", "Engineering", "Junior", CandidateStatus::Selected),
        candidate("c3", "Arlene McCoy", "Design", "Intern", CandidateStatus::New),
        candidate("c4", "Kristin Watson", "Engineering", "Senior", CandidateStatus::Rejected),
        candidate("c5", "Jenny Wilson", "Design", "Senior", CandidateStatus::Scheduled),
    ]
}

fn ids<T>(records: &[&T], id: impl Fn(&T) -> &str) -> Vec<String> {
    records.iter().map(|record| id(*record).to_string()).collect()
}

fn candidate_ids(records: &[&Candidate]) -> Vec<String> {
    ids(records, |candidate| candidate.id.0.as_str())
}

#[test]
fn filter_dimensions_commute() {
    let records = candidates();
    let status = Some("new");
    let position = Some("design");
    let query = Some("w");

    let status_first =
        filter_by_query(filter_by_position(filter_by_status(&records, status), position), query);
    let query_first =
        filter_by_status(filter_by_position(filter_by_query(&records, query), position), status);
    let position_first =
        filter_by_status(filter_by_query(filter_by_position(&records, position), query), status);

    assert_eq!(candidate_ids(&status_first), vec!["c1"]);
    assert_eq!(candidate_ids(&status_first), candidate_ids(&query_first));
    assert_eq!(candidate_ids(&status_first), candidate_ids(&position_first));

    let combined = FilterCriteria::new()
        .with_status("New")
        .with_position("Design")
        .with_query("W");
    assert_eq!(candidate_ids(&combined.apply(&records)), vec!["c1"]);
}

#[test]
fn search_ignores_input_casing() {
    let records = candidates();
    for query in ["jacob", "JACOB", "JaCoB", "  jacob  "] {
        let criteria = FilterCriteria::new().with_query(query);
        assert_eq!(
            candidate_ids(&criteria.apply(&records)),
            vec!["c1"],
            "query {query:?} should match"
        );
    }
}

#[test]
fn wildcards_keep_every_record_in_order() {
    let records = candidates();
    let criteria = FilterCriteria::new()
        .with_status("all")
        .with_position("ALL")
        .with_query("   ");
    assert!(criteria.is_wildcard());
    assert_eq!(
        candidate_ids(&criteria.apply(&records)),
        vec!["c1", "c2", "c3", "c4", "c5"]
    );
}

#[test]
fn filtered_output_preserves_input_order() {
    let records = candidates();
    let seniors = FilterCriteria::new().with_position("senior").apply(&records);
    assert_eq!(candidate_ids(&seniors), vec!["c1", "c4", "c5"]);
}

#[test]
fn candidate_position_filter_matches_department_too() {
    let records = candidates();
    let design_senior = FilterCriteria::new()
        .with_position("design senior")
        .apply(&records);
    assert_eq!(candidate_ids(&design_senior), vec!["c1", "c5"]);
}

fn employee(id: &str, name: &str, position: &str, attendance: Option<AttendanceStatus>) -> Employee {
    Employee {
        id: RecordId::from(id),
        full_name: name.to_string(),
        email: format!("{id}@example.com"),
        phone: "555-123-4567".to_string(),
        department: "Operations".to_string(),
        position: position.to_string(),
        date_of_joining: "01-02-2024".to_string(),
        attendance,
        is_employee: true,
    }
}

#[test]
fn employee_table_ignores_status_filter() {
    let staff = vec![
        employee("e1", "Jane Cooper", "Junior", Some(AttendanceStatus::Present)),
        employee("e2", "Cody Fisher", "Team Lead", None),
    ];
    let visible = FilterCriteria::new()
        .with_status("Absent")
        .with_position("lead")
        .apply(&staff);
    assert_eq!(ids(&visible, |e| e.id.0.as_str()), vec!["e2"]);
}

#[test]
fn unmarked_attendance_never_matches_a_status() {
    let rows: Vec<AttendanceRecord> = [
        employee("e1", "Jane Cooper", "Junior", Some(AttendanceStatus::MedicalLeave)),
        employee("e2", "Cody Fisher", "Senior", None),
    ]
    .iter()
    .map(AttendanceRecord::from_employee)
    .collect();

    let medical = FilterCriteria::new().with_status("medical leave").apply(&rows);
    assert_eq!(ids(&medical, |row| row.employee_id.0.as_str()), vec!["e1"]);

    let by_task = FilterCriteria::new().with_query("hrms development").apply(&rows);
    assert_eq!(by_task.len(), 2);
}

#[test]
fn leave_search_covers_name_and_reason_only() {
    let leaves = vec![
        LeaveRecord {
            id: RecordId::from("l1"),
            employee_name: "Jane Cooper".to_string(),
            date: "10-06-2025".to_string(),
            reason: "Visiting family".to_string(),
            status: LeaveStatus::Approved,
            document: None,
        },
        LeaveRecord {
            id: RecordId::from("l2"),
            employee_name: "Cody Fisher".to_string(),
            date: "11-06-2025".to_string(),
            reason: "Dentist".to_string(),
            status: LeaveStatus::Pending,
            document: None,
        },
    ];

    let family = FilterCriteria::new().with_query("FAMILY").apply(&leaves);
    assert_eq!(ids(&family, |leave| leave.id.0.as_str()), vec!["l1"]);

    let by_date = FilterCriteria::new().with_query("06-2025").apply(&leaves);
    assert!(by_date.is_empty());

    let pending = FilterCriteria::new()
        .with_status("pending")
        .with_position("ignored for leaves")
        .apply(&leaves);
    assert_eq!(ids(&pending, |leave| leave.id.0.as_str()), vec!["l2"]);
}
