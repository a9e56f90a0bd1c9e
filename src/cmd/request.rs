use crate::calc::{validate, Accepted, Rejection, ValidationRules};
use crate::data::{
    AppSettings, LeaveBalance, LeaveCategory, LeaveRequest, LeaveRequestData, LeaveRequestDraft,
    LeaveType, Persistable,
};
use anyhow::{bail, Result};
use chrono::NaiveDate;
use std::collections::HashSet;

#[derive(clap::Args, Debug, Clone)]
pub struct RequestArgs {
    /// First day of leave (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,
    /// Last day of leave, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<NaiveDate>,
    #[arg(long = "type", value_enum, default_value_t = LeaveType::Annual)]
    pub leave_type: LeaveType,
    #[arg(long, value_enum, default_value_t = LeaveCategory::Vacation)]
    pub category: LeaveCategory,
    /// Defaults to settings.default_department
    #[arg(long)]
    pub department: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

impl RequestArgs {
    fn into_draft(self, settings: &AppSettings) -> LeaveRequestDraft {
        LeaveRequestDraft {
            leave_type: self.leave_type,
            category: self.category,
            department: self
                .department
                .unwrap_or_else(|| settings.default_department.clone()),
            notes: self.notes,
            ..LeaveRequestDraft::new(self.start, self.end)
        }
    }
}

/// Validates `draft`; on acceptance stores the new request and consumes the
/// balance. On rejection nothing changes.
pub(crate) fn submit(
    draft: &LeaveRequestDraft,
    requests: &mut LeaveRequestData,
    balance: &mut LeaveBalance,
    holidays: &HashSet<NaiveDate>,
    rules: &ValidationRules,
    today: NaiveDate,
) -> Result<LeaveRequest, Rejection> {
    let accepted = validate(draft, &requests.requests, balance, holidays, rules, today)
        .inspect_err(|r| tracing::debug!(code = r.code(), reason = %r, "request rejected"))?;
    let request = LeaveRequest::from_accepted(draft, &accepted);
    requests.add(request.clone());
    balance.apply(&accepted);
    tracing::info!(
        id = %request.id,
        start = %request.start_date,
        end = %request.end_date,
        days = request.working_days,
        "request accepted"
    );
    Ok(request)
}

struct Snapshot {
    settings: AppSettings,
    rules: ValidationRules,
    requests: LeaveRequestData,
    balance: LeaveBalance,
    holidays: HashSet<NaiveDate>,
}

fn load_snapshot(
    draft_start: Option<NaiveDate>,
    draft_end: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<Snapshot> {
    let settings = AppSettings::load()?;
    let rules = settings.rules()?;
    let requests = LeaveRequestData::load()?;
    let balance = LeaveBalance::load_or_new(settings.annual_allowance)?;
    let start = draft_start.unwrap_or(today);
    let end = draft_end.unwrap_or(start);
    let holidays =
        super::load_calendar(&settings, start.min(end), start.max(end))?.day_off_dates();
    Ok(Snapshot {
        settings,
        rules,
        requests,
        balance,
        holidays,
    })
}

/// Dry run: reports the decision without saving anything.
pub fn check(args: RequestArgs, today: NaiveDate) -> Result<()> {
    let snap = load_snapshot(args.start, args.end, today)?;
    let draft = args.into_draft(&snap.settings);
    let result = validate(
        &draft,
        &snap.requests.requests,
        &snap.balance,
        &snap.holidays,
        &snap.rules,
        today,
    );
    write_decision(&result, &snap.balance, &mut std::io::stdout())
}

pub fn run(args: RequestArgs, today: NaiveDate) -> Result<()> {
    let mut snap = load_snapshot(args.start, args.end, today)?;
    let draft = args.into_draft(&snap.settings);
    match submit(
        &draft,
        &mut snap.requests,
        &mut snap.balance,
        &snap.holidays,
        &snap.rules,
        today,
    ) {
        Ok(request) => {
            snap.requests.save()?;
            snap.balance.save()?;
            write_saved(&request, &snap.balance, &mut std::io::stdout())
        }
        Err(rejection) => bail!("request rejected ({}): {}", rejection.code(), rejection),
    }
}

pub(crate) fn write_decision<W: std::io::Write>(
    result: &Result<Accepted, Rejection>,
    balance: &LeaveBalance,
    out: &mut W,
) -> Result<()> {
    match result {
        Ok(accepted) => {
            writeln!(
                out,
                "Accepted: {} to {} uses {} working day(s)",
                accepted.start_date, accepted.end_date, accepted.working_days
            )?;
            writeln!(
                out,
                "Remaining after booking: {}",
                balance.remaining().saturating_sub(accepted.working_days)
            )?;
        }
        Err(rejection) => {
            writeln!(out, "Rejected ({}): {}", rejection.code(), rejection)?;
        }
    }
    Ok(())
}

pub(crate) fn write_saved<W: std::io::Write>(
    request: &LeaveRequest,
    balance: &LeaveBalance,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Saved request {}", request.id)?;
    writeln!(
        out,
        "  {} / {}: {} to {} ({} working day(s))",
        request.leave_type,
        request.category,
        request.start_date,
        request.end_date,
        request.working_days
    )?;
    writeln!(out, "Balance: {} of {} remaining", balance.remaining(), balance.total)?;
    Ok(())
}
