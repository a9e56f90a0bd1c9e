use crate::data::leave_request::{LeaveRequest, LeaveType, RequestStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeTotals {
    pub requests: u32,
    pub working_days: u32,
}

/// Per-type totals over a set of requests. Rejected requests are left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaveStats {
    by_type: [TypeTotals; LeaveType::ALL.len()],
    pub pending_days: u32,
    pub approved_days: u32,
}

impl LeaveStats {
    pub fn from_requests(requests: &[LeaveRequest]) -> Self {
        let mut stats = LeaveStats::default();
        for r in requests {
            match r.status {
                RequestStatus::Rejected => continue,
                RequestStatus::Pending => {
                    stats.pending_days = stats.pending_days.saturating_add(r.working_days)
                }
                RequestStatus::Approved => {
                    stats.approved_days = stats.approved_days.saturating_add(r.working_days)
                }
            }
            let totals = &mut stats.by_type[r.leave_type.info().bucket];
            totals.requests = totals.requests.saturating_add(1);
            totals.working_days = totals.working_days.saturating_add(r.working_days);
        }
        stats
    }

    pub fn for_type(&self, leave_type: LeaveType) -> TypeTotals {
        self.by_type[leave_type.info().bucket]
    }

    pub fn total_days(&self) -> u32 {
        self.pending_days.saturating_add(self.approved_days)
    }
}
