use crate::calc::workday::{is_workday, working_days};
use crate::data::balance::LeaveBalance;
use crate::data::leave_request::{LeaveRequest, LeaveRequestDraft, RequestStatus};
use chrono::{Months, NaiveDate};
use std::collections::HashSet;
use thiserror::Error;

/// Limits applied by [`validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRules {
    /// Maximum working days in a single request.
    pub max_consecutive_days: u32,
    /// How many calendar months past today a request may end.
    pub max_months_ahead: u32,
    /// A request is refused once this many existing requests overlap it.
    pub max_concurrent_requests: u32,
}

/// A request that passed every rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accepted {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub working_days: u32,
}

/// Why a request was refused. Variants are listed in evaluation order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("both a start date and an end date are required")]
    MissingDates,
    #[error("end date {end} is before start date {start}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },
    #[error("start date {start} is in the past (today is {today})")]
    PastDate { start: NaiveDate, today: NaiveDate },
    #[error("{date} falls on a weekend")]
    WeekendBoundary { date: NaiveDate },
    #[error("{date} is a holiday")]
    HolidayBoundary { date: NaiveDate },
    #[error("{days} working days exceeds the limit of {limit} consecutive days")]
    ExceedsConsecutiveLimit { days: u32, limit: u32 },
    #[error("{requested} working days plus {used} already planned exceeds the allowance of {total}")]
    ExceedsBalance { requested: u32, used: u32, total: u32 },
    #[error("end date {end} is later than {latest}")]
    TooFarAhead { end: NaiveDate, latest: NaiveDate },
    #[error("{overlapping} existing request(s) already overlap this range (limit {limit})")]
    TooManyConcurrent { overlapping: usize, limit: u32 },
}

impl Rejection {
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::MissingDates => "MissingDates",
            Rejection::InvertedRange { .. } => "InvertedRange",
            Rejection::PastDate { .. } => "PastDate",
            Rejection::WeekendBoundary { .. } => "WeekendBoundary",
            Rejection::HolidayBoundary { .. } => "HolidayBoundary",
            Rejection::ExceedsConsecutiveLimit { .. } => "ExceedsConsecutiveLimit",
            Rejection::ExceedsBalance { .. } => "ExceedsBalance",
            Rejection::TooFarAhead { .. } => "TooFarAhead",
            Rejection::TooManyConcurrent { .. } => "TooManyConcurrent",
        }
    }
}

/// Decides whether `draft` can be booked. Rules run in a fixed order and the
/// first failure is returned. Nothing is mutated: the caller stores the
/// request and applies the balance on acceptance.
///
/// Date ranges are inclusive at both ends. Rejected requests in `existing`
/// do not count towards the concurrency limit.
pub fn validate(
    draft: &LeaveRequestDraft,
    existing: &[LeaveRequest],
    balance: &LeaveBalance,
    holidays: &HashSet<NaiveDate>,
    rules: &ValidationRules,
    today: NaiveDate,
) -> Result<Accepted, Rejection> {
    let (start, end) = match (draft.start_date, draft.end_date) {
        (Some(start), Some(end)) => (start, end),
        _ => return Err(Rejection::MissingDates),
    };

    if end < start {
        return Err(Rejection::InvertedRange { start, end });
    }

    if start < today {
        return Err(Rejection::PastDate { start, today });
    }

    for date in [start, end] {
        if !is_workday(date) {
            return Err(Rejection::WeekendBoundary { date });
        }
    }

    for date in [start, end] {
        if holidays.contains(&date) {
            return Err(Rejection::HolidayBoundary { date });
        }
    }

    let days = working_days(start, end, holidays);
    if days > rules.max_consecutive_days {
        return Err(Rejection::ExceedsConsecutiveLimit {
            days,
            limit: rules.max_consecutive_days,
        });
    }

    if days.saturating_add(balance.used) > balance.total {
        return Err(Rejection::ExceedsBalance {
            requested: days,
            used: balance.used,
            total: balance.total,
        });
    }

    if let Some(latest) = today.checked_add_months(Months::new(rules.max_months_ahead)) {
        if end > latest {
            return Err(Rejection::TooFarAhead { end, latest });
        }
    }

    let overlapping = existing
        .iter()
        .filter(|r| r.status != RequestStatus::Rejected)
        .filter(|r| r.overlaps(start, end))
        .count();
    if overlapping >= rules.max_concurrent_requests as usize {
        return Err(Rejection::TooManyConcurrent {
            overlapping,
            limit: rules.max_concurrent_requests,
        });
    }

    Ok(Accepted {
        start_date: start,
        end_date: end,
        working_days: days,
    })
}
