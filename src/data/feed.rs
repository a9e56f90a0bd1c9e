//! Reader for holiday feeds dropped into the data directory by an external
//! fetcher (for example a government bank-holiday export).
//!
//! The feed never breaks validation: any problem with the file yields no
//! extra holidays and a warning.

use crate::data::holiday::{Holiday, Region};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FeedEntry {
    pub date: String,
    pub title: String,
}

/// Where the feed lives and which region its entries belong to.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HolidayFeedConfig {
    pub path: String,
    pub region: Region,
}

/// Loads the feed at `path`, relative paths resolved against `data_dir`.
pub fn load_feed(data_dir: &Path, config: &HolidayFeedConfig) -> Vec<Holiday> {
    let path = data_dir.join(&config.path);
    let contents = match fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "holiday feed unavailable");
            return Vec::new();
        }
    };
    parse_feed(&contents, config.region)
}

/// Parses a JSON array of `{date, title}` pairs.
pub fn parse_feed(contents: &str, region: Region) -> Vec<Holiday> {
    let entries: Vec<FeedEntry> = match serde_json::from_str(contents) {
        Ok(e) => e,
        Err(e) => {
            tracing::warn!(error = %e, "holiday feed is malformed, ignoring it");
            return Vec::new();
        }
    };

    entries
        .into_iter()
        .filter_map(|entry| match NaiveDate::parse_from_str(&entry.date, "%Y-%m-%d") {
            Ok(date) => Some(Holiday::new(entry.title.trim(), date, region)),
            Err(_) => {
                tracing::warn!(date = %entry.date, title = %entry.title, "skipping feed entry");
                None
            }
        })
        .collect()
}
