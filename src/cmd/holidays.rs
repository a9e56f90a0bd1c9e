use crate::calc::HolidayCalendar;
use crate::data::{AppSettings, Holiday, RegionSelector};
use anyhow::Result;
use chrono::Datelike;

pub fn run(year: i32, region: Option<RegionSelector>) -> Result<()> {
    let mut settings = AppSettings::load()?;
    if let Some(region) = region {
        settings.region = region;
    }
    let external = super::load_external_holidays(&settings)?;
    let holidays = holidays_in_year(year, settings.region, external);
    write_holidays(&holidays, year, settings.region, &mut std::io::stdout())
}

/// Every record dated inside `year`. The following year is computed too,
/// since its New Year's Day may be observed on 31 December.
pub(crate) fn holidays_in_year(
    year: i32,
    region: RegionSelector,
    external: Vec<Holiday>,
) -> Vec<Holiday> {
    HolidayCalendar::for_years(year, year + 1, region)
        .with_external(external)
        .holidays()
        .iter()
        .filter(|h| h.date.year() == year)
        .cloned()
        .collect()
}

pub(crate) fn write_holidays<W: std::io::Write>(
    holidays: &[Holiday],
    year: i32,
    region: RegionSelector,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Holidays {} ({})", year, region)?;
    writeln!(out, "---")?;
    writeln!(out, "  {:<14} {:<6} {:<5} {}", "Date", "Region", "Day", "Name")?;
    for h in holidays {
        let name = if h.observed {
            format!("{} (observed)", h.name)
        } else {
            h.name.clone()
        };
        writeln!(
            out,
            "  {:<14} {:<6} {:<5} {}",
            h.date.format("%Y-%m-%d").to_string(),
            h.region.to_string(),
            h.date.format("%a").to_string(),
            name
        )?;
    }
    writeln!(out, "---")?;
    writeln!(out, "Total: {} holiday(s)", holidays.len())?;
    Ok(())
}
