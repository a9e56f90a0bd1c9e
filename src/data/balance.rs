use crate::calc::validator::Accepted;
use crate::data::persistence::{get_data_dir, Persistable};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Annual leave balance. `remaining` is derived on every read.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct LeaveBalance {
    pub total: u32,
    pub used: u32,
}

pub const DEFAULT_ANNUAL_ALLOWANCE: u32 = 25;

impl Default for LeaveBalance {
    fn default() -> Self {
        LeaveBalance::new(DEFAULT_ANNUAL_ALLOWANCE)
    }
}

impl Persistable for LeaveBalance {
    fn filename() -> &'static str {
        "balance.json"
    }
    fn is_json() -> bool {
        true
    }
}

impl LeaveBalance {
    pub fn new(total: u32) -> Self {
        LeaveBalance { total, used: 0 }
    }

    pub fn remaining(&self) -> u32 {
        self.total.saturating_sub(self.used)
    }

    /// Loads the stored balance, or starts a fresh one at `allowance` when
    /// nothing has been saved yet.
    pub fn load_or_new(allowance: u32) -> Result<Self> {
        let dir = get_data_dir()?;
        if dir.join(Self::filename()).exists() {
            Self::load_from(&dir)
        } else {
            Ok(LeaveBalance::new(allowance))
        }
    }

    /// Consumes the working days of an accepted request.
    pub fn apply(&mut self, accepted: &Accepted) {
        self.used = self.used.saturating_add(accepted.working_days);
    }

    /// Returns days to the balance, e.g. when a request is cancelled.
    pub fn release(&mut self, days: u32) {
        self.used = self.used.saturating_sub(days);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn accepted(days: u32) -> Accepted {
        let d = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        Accepted {
            start_date: d,
            end_date: d,
            working_days: days,
        }
    }

    #[test]
    fn test_default_balance_uses_annual_allowance() {
        let b = LeaveBalance::default();
        assert_eq!(b.total, 25);
        assert_eq!(b.used, 0);
        assert_eq!(b.remaining(), 25);
    }

    #[test]
    fn test_apply_and_release_recompute_remaining() {
        let mut b = LeaveBalance::new(25);
        b.apply(&accepted(5));
        assert_eq!(b.remaining(), 20);
        b.release(2);
        assert_eq!(b.used, 3);
        assert_eq!(b.remaining(), 22);
    }

    #[test]
    fn test_remaining_never_underflows() {
        let b = LeaveBalance { total: 3, used: 10 };
        assert_eq!(b.remaining(), 0);
        let mut b = LeaveBalance::new(3);
        b.release(4);
        assert_eq!(b.used, 0);
    }

    #[test]
    fn test_json_has_no_remaining_field() {
        let json = serde_json::to_string(&LeaveBalance { total: 25, used: 4 }).unwrap();
        assert!(!json.contains("remaining"));
        let parsed: LeaveBalance = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.remaining(), 21);
    }
}
