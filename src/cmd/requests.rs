use crate::data::{AppSettings, LeaveBalance, LeaveRequest, LeaveRequestData, Persistable};
use anyhow::{Context, Result};

pub fn run() -> Result<()> {
    let data = LeaveRequestData::load()?;
    write_requests(&data, &mut std::io::stdout())
}

/// Removes a request and returns its working days to the balance.
pub fn cancel(id: &str) -> Result<()> {
    let settings = AppSettings::load()?;
    let mut data = LeaveRequestData::load()?;
    let mut balance = LeaveBalance::load_or_new(settings.annual_allowance)?;
    let removed = cancel_request(&mut data, &mut balance, id)?;
    data.save()?;
    balance.save()?;
    tracing::info!(id = %removed.id, days = removed.working_days, "request cancelled");
    println!(
        "Cancelled {} ({} to {}), {} day(s) returned. Remaining: {}",
        removed.id,
        removed.start_date,
        removed.end_date,
        removed.working_days,
        balance.remaining()
    );
    Ok(())
}

pub(crate) fn cancel_request(
    data: &mut LeaveRequestData,
    balance: &mut LeaveBalance,
    id: &str,
) -> Result<LeaveRequest> {
    let removed = data
        .remove(id)
        .with_context(|| format!("no request with id '{}'", id))?;
    balance.release(removed.working_days);
    Ok(removed)
}

pub(crate) fn write_requests<W: std::io::Write>(data: &LeaveRequestData, out: &mut W) -> Result<()> {
    writeln!(out, "Leave Requests")?;
    writeln!(out, "---")?;
    writeln!(
        out,
        "  {:<4} {:<14} {:<10} {:<12} {:<12} {:<5} {:<9} {}",
        "#", "Type", "Category", "Start", "End", "Days", "Status", "Id"
    )?;
    for (i, r) in data.requests.iter().enumerate() {
        writeln!(
            out,
            "  {:<4} {:<14} {:<10} {:<12} {:<12} {:<5} {:<9} {}",
            i + 1,
            r.leave_type.to_string(),
            r.category.to_string(),
            r.start_date.to_string(),
            r.end_date.to_string(),
            r.working_days,
            r.status.to_string(),
            r.id
        )?;
        if let Some(notes) = &r.notes {
            writeln!(out, "       {}", notes)?;
        }
    }
    writeln!(out, "---")?;
    writeln!(out, "Total: {} request(s)", data.requests.len())?;
    Ok(())
}
