use crate::calc::workday::is_workday;
use crate::data::holiday::{Holiday, Region, RegionSelector};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::HashSet;

/// How a holiday's date is derived from the year.
enum Rule {
    /// Fixed month/day; shifted to a weekday when it lands on a weekend.
    Fixed { month: u32, day: u32 },
    /// The nth weekday of a month (1-based).
    Nth { month: u32, weekday: Weekday, n: u8 },
    /// The last weekday of a month.
    Last { month: u32, weekday: Weekday },
    /// Days relative to Easter Sunday.
    Easter { offset: i64 },
}

struct HolidayRule {
    name: &'static str,
    rule: Rule,
}

const fn fixed(name: &'static str, month: u32, day: u32) -> HolidayRule {
    HolidayRule { name, rule: Rule::Fixed { month, day } }
}

const fn nth(name: &'static str, month: u32, weekday: Weekday, n: u8) -> HolidayRule {
    HolidayRule { name, rule: Rule::Nth { month, weekday, n } }
}

const fn last(name: &'static str, month: u32, weekday: Weekday) -> HolidayRule {
    HolidayRule { name, rule: Rule::Last { month, weekday } }
}

const fn easter(name: &'static str, offset: i64) -> HolidayRule {
    HolidayRule { name, rule: Rule::Easter { offset } }
}

const US_RULES: &[HolidayRule] = &[
    fixed("New Year's Day", 1, 1),
    nth("Martin Luther King Jr. Day", 1, Weekday::Mon, 3),
    nth("Presidents' Day", 2, Weekday::Mon, 3),
    last("Memorial Day", 5, Weekday::Mon),
    fixed("Juneteenth", 6, 19),
    fixed("Independence Day", 7, 4),
    nth("Labor Day", 9, Weekday::Mon, 1),
    nth("Columbus Day", 10, Weekday::Mon, 2),
    fixed("Veterans Day", 11, 11),
    nth("Thanksgiving Day", 11, Weekday::Thu, 4),
    fixed("Christmas Day", 12, 25),
];

const UK_RULES: &[HolidayRule] = &[
    fixed("New Year's Day", 1, 1),
    easter("Good Friday", -2),
    easter("Easter Monday", 1),
    nth("Early May Bank Holiday", 5, Weekday::Mon, 1),
    last("Spring Bank Holiday", 5, Weekday::Mon),
    last("Summer Bank Holiday", 8, Weekday::Mon),
    fixed("Christmas Day", 12, 25),
    fixed("Boxing Day", 12, 26),
];

fn rules_for(region: Region) -> &'static [HolidayRule] {
    match region {
        Region::Us => US_RULES,
        Region::Uk => UK_RULES,
    }
}

/// Easter Sunday in the Gregorian calendar (anonymous Gregorian algorithm).
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

/// The weekday a weekend holiday is taken on: Saturday moves back to Friday,
/// Sunday forward to Monday. Weekdays are returned unchanged.
pub fn observed_date(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date - Duration::days(1),
        Weekday::Sun => date + Duration::days(1),
        _ => date,
    }
}

fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    let mut date = NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()?;
    while date.weekday() != weekday {
        date = date.pred_opt()?;
    }
    Some(date)
}

fn resolve(rule: &Rule, year: i32) -> Option<NaiveDate> {
    match *rule {
        Rule::Fixed { month, day } => NaiveDate::from_ymd_opt(year, month, day),
        Rule::Nth { month, weekday, n } => {
            NaiveDate::from_weekday_of_month_opt(year, month, weekday, n)
        }
        Rule::Last { month, weekday } => last_weekday_of_month(year, month, weekday),
        Rule::Easter { offset } => {
            easter_sunday(year).and_then(|e| e.checked_add_signed(Duration::days(offset)))
        }
    }
}

fn region_holidays(year: i32, region: Region, out: &mut Vec<Holiday>) {
    for entry in rules_for(region) {
        let Some(date) = resolve(&entry.rule, year) else {
            continue;
        };
        out.push(Holiday::new(entry.name, date, region));
        if matches!(entry.rule, Rule::Fixed { .. }) {
            let observed = observed_date(date);
            if observed != date {
                out.push(Holiday::observed(entry.name, observed, region));
            }
        }
    }
}

/// All holidays of `year` for the selected regions, sorted by date.
///
/// A weekend fixed-date holiday yields two records: the nominal one and an
/// `observed` one on the adjacent weekday. `Both` keeps same-named holidays
/// of each region as separate records.
pub fn get_holidays(year: i32, selector: RegionSelector) -> Vec<Holiday> {
    let mut holidays = Vec::new();
    for &region in selector.regions() {
        region_holidays(year, region, &mut holidays);
    }
    holidays.sort_by_key(|h| h.date);
    holidays
}

/// Adds externally sourced entries (feed, custom file) and restores date order.
pub fn merge_external<I>(holidays: &mut Vec<Holiday>, entries: I)
where
    I: IntoIterator<Item = Holiday>,
{
    holidays.extend(entries);
    holidays.sort_by_key(|h| h.date);
}

/// True when the holiday actually blocks its date. A nominal record whose
/// date was shifted to an observed weekday does not.
fn is_day_off(holiday: &Holiday) -> bool {
    holiday.observed || is_workday(holiday.date)
}

/// Holidays for a span of years, with lookups by observed date.
#[derive(Debug, Clone, Default)]
pub struct HolidayCalendar {
    holidays: Vec<Holiday>,
}

impl HolidayCalendar {
    pub fn for_years(first_year: i32, last_year: i32, selector: RegionSelector) -> Self {
        let mut holidays = Vec::new();
        for year in first_year..=last_year {
            holidays.extend(get_holidays(year, selector));
        }
        holidays.sort_by_key(|h| h.date);
        HolidayCalendar { holidays }
    }

    /// Covers every date in `[start, end]`, including observed days that
    /// spill over from the following year (1 January on a Saturday).
    pub fn covering(start: NaiveDate, end: NaiveDate, selector: RegionSelector) -> Self {
        let first = start.year().min(end.year());
        let last = start.year().max(end.year()) + 1;
        Self::for_years(first, last, selector)
    }

    pub fn with_external<I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = Holiday>,
    {
        merge_external(&mut self.holidays, entries);
        self
    }

    pub fn holidays(&self) -> &[Holiday] {
        &self.holidays
    }

    /// The date set consumed by the working-day counter and the validator.
    pub fn day_off_dates(&self) -> HashSet<NaiveDate> {
        self.holidays
            .iter()
            .filter(|h| is_day_off(h))
            .map(|h| h.date)
            .collect()
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.iter().any(|h| h.date == date && is_day_off(h))
    }

    /// Holidays observed on `date`.
    pub fn on(&self, date: NaiveDate) -> Vec<&Holiday> {
        self.holidays
            .iter()
            .filter(|h| h.date == date && is_day_off(h))
            .collect()
    }
}
