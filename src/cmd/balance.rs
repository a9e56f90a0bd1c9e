use crate::data::{AppSettings, LeaveBalance};
use anyhow::Result;

pub fn run() -> Result<()> {
    let settings = AppSettings::load()?;
    let balance = LeaveBalance::load_or_new(settings.annual_allowance)?;
    write_balance(&balance, &mut std::io::stdout())
}

pub(crate) fn write_balance<W: std::io::Write>(balance: &LeaveBalance, out: &mut W) -> Result<()> {
    writeln!(out, "Leave Balance")?;
    writeln!(out, "---")?;
    writeln!(out, "{:<12} {}", "Allowance:", balance.total)?;
    writeln!(out, "{:<12} {}", "Used:", balance.used)?;
    writeln!(out, "{:<12} {}", "Remaining:", balance.remaining())?;
    Ok(())
}
