use crate::dates;
use crate::models::ActivityRecord;
use crate::streaks::{StreakResult, calculate_streaks_at};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

const WINDOW_DAYS: usize = 7;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeTotal {
    #[serde(rename = "type")]
    pub activity_type: String,
    pub minutes: u64,
    pub distance: f64,
}

impl TypeTotal {
    pub fn tracked_distance(&self) -> Option<f64> {
        (self.distance > 0.0).then_some(self.distance)
    }
}

impl fmt::Display for TypeTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} Min", self.activity_type, self.minutes)?;
        if let Some(km) = self.tracked_distance() {
            write!(f, " - {km:.2} Km")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSummary {
    #[serde(flatten)]
    pub streaks: StreakResult,
    pub total_minutes: u64,
    pub total_moving: String,
    pub types: Vec<TypeTotal>,
    pub top_day_minutes: u64,
    pub top_week_minutes: u64,
    pub minutes_today: u64,
}

pub fn build_stats(records: &[ActivityRecord]) -> StatsSummary {
    build_stats_at(dates::today_date(), records)
}

pub fn build_stats_at(today: NaiveDate, records: &[ActivityRecord]) -> StatsSummary {
    let total_minutes = records.iter().map(|r| r.duration).fold(0u64, u64::saturating_add);
    let daily = minutes_by_day(records);

    StatsSummary {
        streaks: calculate_streaks_at(today, records),
        total_minutes,
        total_moving: format_duration(total_minutes),
        types: type_totals(records),
        top_day_minutes: top_day_minutes(&daily),
        top_week_minutes: top_week_minutes(&daily),
        minutes_today: minutes_on(today, records),
    }
}

/// Largest minutes first; ties keep the order in which types were first seen.
pub fn type_totals(records: &[ActivityRecord]) -> Vec<TypeTotal> {
    let mut rows: Vec<TypeTotal> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let activity_type = record.activity_type.trim();
        if activity_type.is_empty() {
            continue;
        }

        let slot = *index.entry(activity_type.to_string()).or_insert_with(|| {
            rows.push(TypeTotal {
                activity_type: activity_type.to_string(),
                minutes: 0,
                distance: 0.0,
            });
            rows.len() - 1
        });

        let row = &mut rows[slot];
        row.minutes = row.minutes.saturating_add(record.duration);
        row.distance += record.distance.unwrap_or(0.0);
    }

    rows.sort_by(|a, b| b.minutes.cmp(&a.minutes));
    rows
}

pub fn minutes_by_day(records: &[ActivityRecord]) -> BTreeMap<i64, u64> {
    let mut daily = BTreeMap::new();
    for record in records {
        if let Some(day) = record.day_index() {
            let minutes = daily.entry(day).or_insert(0u64);
            *minutes = minutes.saturating_add(record.duration);
        }
    }
    daily
}

pub fn minutes_on(day: NaiveDate, records: &[ActivityRecord]) -> u64 {
    let target = dates::day_number(day);
    records
        .iter()
        .filter(|r| r.day_index() == Some(target))
        .map(|r| r.duration)
        .fold(0, u64::saturating_add)
}

pub fn top_day_minutes(daily: &BTreeMap<i64, u64>) -> u64 {
    daily.values().copied().max().unwrap_or(0)
}

/// Best sum over any run of seven consecutive calendar days between the
/// first and last active day. Zero when that range is shorter than a week.
pub fn top_week_minutes(daily: &BTreeMap<i64, u64>) -> u64 {
    let (Some((&first, _)), Some((&last, _))) = (daily.first_key_value(), daily.last_key_value()) else {
        return 0;
    };

    let span = (last - first + 1) as usize;
    if span < WINDOW_DAYS {
        return 0;
    }

    let mut filled = vec![0u64; span];
    for (&day, &minutes) in daily {
        filled[(day - first) as usize] = minutes;
    }

    // u128 so a window of saturated days cannot overflow
    let mut window: u128 = filled[..WINDOW_DAYS].iter().map(|&m| u128::from(m)).sum();
    let mut best = window;
    for i in WINDOW_DAYS..span {
        window = window + u128::from(filled[i]) - u128::from(filled[i - WINDOW_DAYS]);
        best = best.max(window);
    }
    u64::try_from(best).unwrap_or(u64::MAX)
}

/// `2 hr 5 min`, `1 hr` or `45 min`.
pub fn format_duration(minutes: u64) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;
    match (hours, rest) {
        (0, rest) => format!("{rest} min"),
        (hours, 0) => format!("{hours} hr"),
        (hours, rest) => format!("{hours} hr {rest} min"),
    }
}
