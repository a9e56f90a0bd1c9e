use crate::calc::LeaveStats;
use crate::data::{AppSettings, LeaveBalance, LeaveRequestData, LeaveType, Persistable};
use anyhow::Result;

pub fn run() -> Result<()> {
    let settings = AppSettings::load()?;
    let data = LeaveRequestData::load()?;
    let balance = LeaveBalance::load_or_new(settings.annual_allowance)?;
    let stats = LeaveStats::from_requests(&data.requests);
    write_stats(&stats, &balance, &mut std::io::stdout())
}

pub(crate) fn write_stats<W: std::io::Write>(
    stats: &LeaveStats,
    balance: &LeaveBalance,
    out: &mut W,
) -> Result<()> {
    let used_pct = if balance.total > 0 {
        100.0 * balance.used as f64 / balance.total as f64
    } else {
        0.0
    };

    writeln!(out, "Leave Stats")?;
    writeln!(out, "---")?;
    writeln!(out, "  {:<16} {:>8} {:>6}", "Type", "Requests", "Days")?;
    for leave_type in LeaveType::ALL {
        let totals = stats.for_type(leave_type);
        writeln!(
            out,
            "  {:<16} {:>8} {:>6}",
            leave_type.to_string(),
            totals.requests,
            totals.working_days
        )?;
    }
    writeln!(out, "---")?;
    writeln!(out, "{:<20} {}", "Total Days:", stats.total_days())?;
    writeln!(out, "{:<20} {}", "Pending Days:", stats.pending_days)?;
    writeln!(out, "{:<20} {}", "Approved Days:", stats.approved_days)?;
    writeln!(
        out,
        "{:<20} ({} / {})  = {:.2}%",
        "Allowance Used:", balance.used, balance.total, used_pct
    )?;
    writeln!(out, "{:<20} {}", "Remaining:", balance.remaining())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{LeaveCategory, LeaveRequest, RequestStatus};
    use chrono::NaiveDate;

    fn req(leave_type: LeaveType, days: u32) -> LeaveRequest {
        let d = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        LeaveRequest {
            id: format!("{leave_type:?}"),
            leave_type,
            category: LeaveCategory::Vacation,
            department: String::new(),
            start_date: d,
            end_date: d,
            notes: None,
            status: RequestStatus::Pending,
            working_days: days,
        }
    }

    #[test]
    fn test_write_stats_lists_every_type() {
        let stats = LeaveStats::from_requests(&[req(LeaveType::Sick, 2)]);
        let mut buf = Vec::new();
        write_stats(&stats, &LeaveBalance { total: 25, used: 2 }, &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        for t in LeaveType::ALL {
            assert!(out.contains(&t.to_string()), "missing {t}");
        }
        assert!(out.contains("Pending Days:        2"));
        assert!(out.contains("= 8.00%"));
    }

    #[test]
    fn test_write_stats_zero_allowance() {
        let stats = LeaveStats::default();
        let mut buf = Vec::new();
        write_stats(&stats, &LeaveBalance { total: 0, used: 0 }, &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("= 0.00%"));
    }
}
