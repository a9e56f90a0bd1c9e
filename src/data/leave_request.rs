use crate::calc::validator::Accepted;
use crate::data::persistence::Persistable;
use chrono::NaiveDate;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum LeaveType {
    #[default]
    Annual,
    Sick,
    Compassionate,
    BankHoliday,
}

/// Display and statistics attributes of a leave type.
#[derive(Debug)]
pub struct LeaveTypeInfo {
    pub label: &'static str,
    pub color: Color,
    /// Slot in per-type statistics arrays.
    pub bucket: usize,
}

static LEAVE_TYPE_TABLE: [LeaveTypeInfo; 4] = [
    LeaveTypeInfo { label: "Annual", color: Color::Blue, bucket: 0 },
    LeaveTypeInfo { label: "Sick", color: Color::Red, bucket: 1 },
    LeaveTypeInfo { label: "Compassionate", color: Color::Magenta, bucket: 2 },
    LeaveTypeInfo { label: "Bank Holiday", color: Color::Green, bucket: 3 },
];

impl LeaveType {
    pub const ALL: [LeaveType; 4] = [
        LeaveType::Annual,
        LeaveType::Sick,
        LeaveType::Compassionate,
        LeaveType::BankHoliday,
    ];

    pub fn info(self) -> &'static LeaveTypeInfo {
        match self {
            LeaveType::Annual => &LEAVE_TYPE_TABLE[0],
            LeaveType::Sick => &LEAVE_TYPE_TABLE[1],
            LeaveType::Compassionate => &LEAVE_TYPE_TABLE[2],
            LeaveType::BankHoliday => &LEAVE_TYPE_TABLE[3],
        }
    }

    pub fn next(self) -> LeaveType {
        LeaveType::ALL[(self.info().bucket + 1) % LeaveType::ALL.len()]
    }
}

impl fmt::Display for LeaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.info().label)
    }
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum LeaveCategory {
    #[default]
    Vacation,
    Medical,
    Personal,
}

impl LeaveCategory {
    pub fn next(self) -> LeaveCategory {
        match self {
            LeaveCategory::Vacation => LeaveCategory::Medical,
            LeaveCategory::Medical => LeaveCategory::Personal,
            LeaveCategory::Personal => LeaveCategory::Vacation,
        }
    }
}

impl fmt::Display for LeaveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaveCategory::Vacation => write!(f, "Vacation"),
            LeaveCategory::Medical => write!(f, "Medical"),
            LeaveCategory::Personal => write!(f, "Personal"),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestStatus::Pending => write!(f, "Pending"),
            RequestStatus::Approved => write!(f, "Approved"),
            RequestStatus::Rejected => write!(f, "Rejected"),
        }
    }
}

/// A proposed request as entered by the user, before validation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LeaveRequestDraft {
    pub leave_type: LeaveType,
    pub category: LeaveCategory,
    pub department: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl LeaveRequestDraft {
    pub fn new(start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) -> Self {
        LeaveRequestDraft {
            start_date,
            end_date,
            ..Default::default()
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LeaveRequest {
    pub id: String,
    #[serde(rename = "type")]
    pub leave_type: LeaveType,
    pub category: LeaveCategory,
    pub department: String,
    pub start_date: NaiveDate,
    /// Inclusive.
    pub end_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: RequestStatus,
    /// Units taken from the balance when the request was accepted.
    #[serde(default)]
    pub working_days: u32,
}

impl LeaveRequest {
    /// Builds a pending request with a fresh id from an accepted draft.
    pub fn from_accepted(draft: &LeaveRequestDraft, accepted: &Accepted) -> Self {
        LeaveRequest {
            id: uuid::Uuid::new_v4().to_string(),
            leave_type: draft.leave_type,
            category: draft.category,
            department: draft.department.clone(),
            start_date: accepted.start_date,
            end_date: accepted.end_date,
            notes: draft
                .notes
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
            status: RequestStatus::Pending,
            working_days: accepted.working_days,
        }
    }

    /// Inclusive-boundary range overlap.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && start <= self.end_date
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct LeaveRequestData {
    pub requests: Vec<LeaveRequest>,
}

impl Persistable for LeaveRequestData {
    fn filename() -> &'static str {
        "requests.json"
    }
    fn is_json() -> bool {
        true
    }
}

impl LeaveRequestData {
    pub fn add(&mut self, request: LeaveRequest) {
        self.requests.push(request);
        self.requests.sort_by_key(|r| r.start_date);
    }

    /// Removes the request with `id`, returning it.
    pub fn remove(&mut self, id: &str) -> Option<LeaveRequest> {
        let idx = self.requests.iter().position(|r| r.id == id)?;
        Some(self.requests.remove(idx))
    }

    pub fn on_date(&self, date: NaiveDate) -> Vec<&LeaveRequest> {
        self.requests.iter().filter(|r| r.contains(date)).collect()
    }
}
