pub mod balance;
pub mod holidays;
pub mod init;
pub mod request;
pub mod requests;
pub mod root;
pub mod stats;

use crate::calc::HolidayCalendar;
use crate::data::feed::load_feed;
use crate::data::persistence::get_data_dir;
use crate::data::{AppSettings, Holiday, HolidayData, Persistable};
use anyhow::Result;
use chrono::NaiveDate;

/// Custom holidays and feed entries that apply to the active region.
pub(crate) fn external_holidays(
    settings: &AppSettings,
    custom: &HolidayData,
    feed: Vec<Holiday>,
) -> Vec<Holiday> {
    let selector = settings.region;
    custom
        .for_selector(selector)
        .into_iter()
        .chain(feed.into_iter().filter(|h| selector.includes(h.region)))
        .collect()
}

/// Loads the custom holidays file and the configured feed.
pub(crate) fn load_external_holidays(settings: &AppSettings) -> Result<Vec<Holiday>> {
    let custom = HolidayData::load()?;
    let feed = match &settings.holiday_feed {
        Some(config) => load_feed(&get_data_dir()?, config),
        None => Vec::new(),
    };
    Ok(external_holidays(settings, &custom, feed))
}

/// Holiday calendar for the years touched by `[start, end]`, merged with
/// the external entries from the data directory.
pub(crate) fn load_calendar(
    settings: &AppSettings,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<HolidayCalendar> {
    let external = load_external_holidays(settings)?;
    Ok(HolidayCalendar::covering(start, end, settings.region).with_external(external))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Region, RegionSelector};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_external_holidays_filters_external_by_region() {
        let settings = AppSettings {
            region: RegionSelector::Us,
            ..AppSettings::default()
        };
        let mut custom = HolidayData::default();
        custom.add(Holiday::new("US offsite", d(2025, 3, 14), Region::Us));
        custom.add(Holiday::new("UK offsite", d(2025, 3, 17), Region::Uk));
        let feed = vec![Holiday::new("VE Day", d(2025, 5, 8), Region::Uk)];

        let external = external_holidays(&settings, &custom, feed);
        let cal = HolidayCalendar::covering(d(2025, 1, 1), d(2025, 12, 31), settings.region)
            .with_external(external);
        assert!(cal.is_holiday(d(2025, 3, 14)));
        assert!(!cal.is_holiday(d(2025, 3, 17)));
        assert!(!cal.is_holiday(d(2025, 5, 8)));
        assert!(cal.is_holiday(d(2025, 7, 4)));
    }

    #[test]
    fn test_external_holidays_both_regions_take_all_entries() {
        let settings = AppSettings::default();
        let feed = vec![Holiday::new("VE Day", d(2025, 5, 8), Region::Uk)];
        let external = external_holidays(&settings, &HolidayData::default(), feed);
        let cal = HolidayCalendar::covering(d(2025, 5, 1), d(2025, 5, 31), settings.region)
            .with_external(external);
        assert!(cal.is_holiday(d(2025, 5, 8)));
        assert!(cal.is_holiday(d(2025, 5, 26))); // Memorial Day and Spring Bank Holiday
        assert_eq!(cal.on(d(2025, 5, 26)).len(), 2);
    }
}
