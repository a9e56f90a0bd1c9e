use crate::data::feed::{FeedEntry, HolidayFeedConfig};
use crate::data::{
    AppSettings, Holiday, HolidayData, LeaveBalance, LeaveRequestData, Persistable, Region,
    RegionSelector,
};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

const FEED_FILE: &str = "holiday_feed.json";

pub fn run() -> Result<()> {
    let dir = crate::data::persistence::get_data_dir()?;
    fs::create_dir_all(&dir)?;
    run_in_dir(&dir)?;
    println!("Data files initialized successfully in {}.", dir.display());
    Ok(())
}

/// Writes all default data files into `dir`. Exposed for unit testing.
pub(crate) fn run_in_dir(dir: &Path) -> Result<()> {
    let settings = default_settings();
    settings.save_to(dir)?;
    LeaveRequestData::default().save_to(dir)?;
    LeaveBalance::new(settings.annual_allowance).save_to(dir)?;
    write_holidays(dir)?;
    write_feed(dir)?;
    tracing::info!(dir = %dir.display(), "data directory initialized");
    Ok(())
}

fn default_settings() -> AppSettings {
    AppSettings {
        region: RegionSelector::Both,
        max_months_ahead: Some(12),
        max_concurrent_requests: Some(3),
        default_department: "Engineering".to_string(),
        holiday_feed: Some(HolidayFeedConfig {
            path: FEED_FILE.to_string(),
            region: Region::Uk,
        }),
        ..AppSettings::default()
    }
}

fn write_holidays(dir: &Path) -> Result<()> {
    let mut data = HolidayData::default();
    for (m, day) in [(3, 27), (9, 4)] {
        let date = NaiveDate::from_ymd_opt(2026, m, day).context("invalid sample holiday date")?;
        data.add(Holiday::new("Company Day", date, Region::Us));
    }
    data.save_to(dir)
}

fn write_feed(dir: &Path) -> Result<()> {
    let entries = vec![FeedEntry {
        date: "2026-05-08".to_string(),
        title: "Additional Bank Holiday".to_string(),
    }];
    let json = serde_json::to_string_pretty(&entries)?;
    let path = dir.join(FEED_FILE);
    fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
