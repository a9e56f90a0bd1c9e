use crate::data::persistence::Persistable;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Us,
    Uk,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Us => write!(f, "US"),
            Region::Uk => write!(f, "UK"),
        }
    }
}

/// Which regional calendars apply to a query.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum RegionSelector {
    Us,
    Uk,
    #[default]
    Both,
}

impl RegionSelector {
    pub fn regions(self) -> &'static [Region] {
        match self {
            RegionSelector::Us => &[Region::Us],
            RegionSelector::Uk => &[Region::Uk],
            RegionSelector::Both => &[Region::Us, Region::Uk],
        }
    }

    pub fn includes(self, region: Region) -> bool {
        self.regions().contains(&region)
    }
}

impl fmt::Display for RegionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionSelector::Us => write!(f, "US"),
            RegionSelector::Uk => write!(f, "UK"),
            RegionSelector::Both => write!(f, "US+UK"),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: String,
    pub region: Region,
    /// True for the weekday record produced when the nominal date falls on a weekend.
    #[serde(default)]
    pub observed: bool,
}

impl Holiday {
    pub fn new(name: &str, date: NaiveDate, region: Region) -> Self {
        Holiday {
            date,
            name: name.to_string(),
            region,
            observed: false,
        }
    }

    pub fn observed(name: &str, date: NaiveDate, region: Region) -> Self {
        Holiday {
            observed: true,
            ..Holiday::new(name, date, region)
        }
    }
}

/// Company-specific holidays kept alongside the computed calendars.
#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct HolidayData {
    pub holidays: Vec<Holiday>,
}

impl Persistable for HolidayData {
    fn filename() -> &'static str {
        "holidays.yaml"
    }
    fn is_json() -> bool {
        false
    }
}

impl HolidayData {
    pub fn add(&mut self, holiday: Holiday) {
        self.holidays.push(holiday);
        self.holidays.sort_by_key(|h| h.date);
    }

    /// Entries that apply to `selector`.
    pub fn for_selector(&self, selector: RegionSelector) -> Vec<Holiday> {
        self.holidays
            .iter()
            .filter(|h| selector.includes(h.region))
            .cloned()
            .collect()
    }
}
