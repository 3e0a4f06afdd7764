use crate::dates::{self, DateError};
use crate::health::SocialCounts;
use crate::stats::StatsSummary;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ActivityRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(rename = "type", default)]
    pub activity_type: String,
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub duration: u64,
    #[serde(default, deserialize_with = "lenient_distance")]
    pub distance: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl ActivityRecord {
    /// Records without a date, or whose date does not parse, are undated:
    /// they are left out of streaks, history buckets and per-day totals.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        let raw = self.date.as_deref()?;
        match dates::parse_date(dates::normalize_date(raw)) {
            Ok(date) => Some(date),
            Err(err) => {
                tracing::debug!(id = ?self.id, error = %err, "treating activity as undated");
                None
            }
        }
    }

    pub fn day_index(&self) -> Option<i64> {
        self.calendar_date().map(dates::day_number)
    }
}

/// Missing, non-numeric or negative durations count as zero minutes.
fn lenient_minutes<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number_from_value(&value)
        .filter(|minutes| *minutes > 0.0)
        .map(|minutes| minutes.trunc() as u64)
        .unwrap_or(0))
}

/// Empty or non-numeric distances are treated as not tracked.
fn lenient_distance<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number_from_value(&value).map(|km| km.max(0.0)))
}

fn number_from_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActivityInput {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(rename = "type", default)]
    pub activity_type: String,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityFields {
    pub date: String,
    pub activity_type: String,
    pub duration: u64,
    pub distance: Option<f64>,
    pub notes: Option<String>,
}

pub const MAX_DURATION_MINUTES: f64 = 10_080.0;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("fill activity and minutes")]
    Incomplete,
    #[error("duration must be a whole number of minutes, at most 10080")]
    Duration,
    #[error("distance must be a non-negative number")]
    Distance,
    #[error(transparent)]
    Date(#[from] DateError),
}

impl ActivityInput {
    /// Dates after `today` are clamped to it.
    pub fn validate(self, today: NaiveDate) -> Result<ActivityFields, InputError> {
        let activity_type = self.activity_type.trim().to_string();
        let Some(duration) = self.duration else {
            return Err(InputError::Incomplete);
        };
        if activity_type.is_empty() {
            return Err(InputError::Incomplete);
        }
        if !duration.is_finite()
            || duration < 0.0
            || duration > MAX_DURATION_MINUTES
            || duration.fract() != 0.0
        {
            return Err(InputError::Duration);
        }

        let distance = match self.distance {
            Some(km) if !km.is_finite() || km < 0.0 => return Err(InputError::Distance),
            other => other,
        };

        let date = match self.date.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => dates::parse_date(raw)?.min(today),
            _ => today,
        };

        let notes = self
            .notes
            .map(|notes| notes.trim().to_string())
            .filter(|notes| !notes.is_empty());

        Ok(ActivityFields {
            date: dates::date_key(date),
            activity_type,
            duration: duration as u64,
            distance,
            notes,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserData {
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub activities: Vec<ActivityRecord>,
    #[serde(default)]
    pub next_activity_id: u64,
}

impl UserData {
    pub fn new(created_at: DateTime<Utc>) -> Self {
        Self {
            created_at,
            activities: Vec::new(),
            next_activity_id: 1,
        }
    }

    pub fn activities_newest_first(&self) -> Vec<ActivityRecord> {
        let mut list = self.activities.clone();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        list
    }

    pub fn add_activity(&mut self, fields: ActivityFields, now: DateTime<Utc>) -> ActivityRecord {
        let id = self.next_activity_id.max(1);
        self.next_activity_id = id + 1;

        let record = ActivityRecord {
            id: Some(id),
            date: Some(fields.date),
            activity_type: fields.activity_type,
            duration: fields.duration,
            distance: fields.distance,
            notes: fields.notes,
            created_at: Some(now),
        };
        self.activities.push(record.clone());
        record
    }

    /// Replaces every field except `id` and `createdAt`.
    pub fn update_activity(&mut self, id: u64, fields: ActivityFields) -> Option<ActivityRecord> {
        let record = self.activities.iter_mut().find(|a| a.id == Some(id))?;
        record.date = Some(fields.date);
        record.activity_type = fields.activity_type;
        record.duration = fields.duration;
        record.distance = fields.distance;
        record.notes = fields.notes;
        Some(record.clone())
    }

    pub fn remove_activity(&mut self, id: u64) -> bool {
        let before = self.activities.len();
        self.activities.retain(|a| a.id != Some(id));
        self.activities.len() != before
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Follow {
    pub follower: String,
    pub followee: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    #[serde(default)]
    pub users: BTreeMap<String, UserData>,
    #[serde(default)]
    pub follows: BTreeSet<Follow>,
}

impl AppData {
    pub fn social_counts(&self, username: &str) -> SocialCounts {
        let follower_count = self.follows.iter().filter(|f| f.followee == username).count();
        let following_count = self.follows.iter().filter(|f| f.follower == username).count();
        SocialCounts {
            follower_count: follower_count as u64,
            following_count: following_count as u64,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub username: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub record: ActivityRecord,
    pub day_label: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub today: String,
    pub today_label: String,
    pub yesterday_label: String,
    pub today_entries: Vec<HistoryEntry>,
    pub yesterday_entries: Vec<HistoryEntry>,
    pub last_7_days: Vec<HistoryEntry>,
    pub older: Vec<HistoryEntry>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub summary: StatsSummary,
    pub type_lines: Vec<String>,
    pub social: SocialCounts,
    pub health: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn input(date: Option<&str>, activity_type: &str, duration: Option<f64>) -> ActivityInput {
        ActivityInput {
            date: date.map(str::to_string),
            activity_type: activity_type.to_string(),
            duration,
            distance: None,
            notes: None,
        }
    }

    #[test]
    fn record_uses_contract_field_names() {
        let record: ActivityRecord = serde_json::from_value(serde_json::json!({
            "id": 7,
            "date": "2024-01-03",
            "type": "Run",
            "duration": 30,
            "distance": 5.2,
            "notes": "easy",
            "createdAt": "2024-01-03T08:00:00Z"
        }))
        .unwrap();

        assert_eq!(record.id, Some(7));
        assert_eq!(record.activity_type, "Run");
        assert_eq!(record.duration, 30);
        assert_eq!(record.distance, Some(5.2));
        assert!(record.created_at.is_some());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "Run");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn non_numeric_numbers_are_coerced() {
        let record: ActivityRecord = serde_json::from_value(serde_json::json!({
            "date": "2024-01-03",
            "type": "Walk",
            "duration": "abc",
            "distance": ""
        }))
        .unwrap();
        assert_eq!(record.duration, 0);
        assert_eq!(record.distance, None);

        let record: ActivityRecord = serde_json::from_value(serde_json::json!({
            "type": "Walk",
            "duration": "45",
            "distance": "3.5"
        }))
        .unwrap();
        assert_eq!(record.duration, 45);
        assert_eq!(record.distance, Some(3.5));
        assert_eq!(record.date, None);

        let record: ActivityRecord =
            serde_json::from_value(serde_json::json!({ "type": "Swim", "duration": -5, "distance": null }))
                .unwrap();
        assert_eq!(record.duration, 0);
        assert_eq!(record.distance, None);
    }

    #[test]
    fn malformed_date_is_undated() {
        let record = ActivityRecord {
            date: Some("yesterday".into()),
            ..Default::default()
        };
        assert_eq!(record.day_index(), None);

        let record = ActivityRecord {
            date: Some("2024-01-03T23:59:00".into()),
            ..Default::default()
        };
        assert_eq!(record.calendar_date(), Some(day(2024, 1, 3)));
    }

    #[test]
    fn validate_requires_type_and_duration() {
        let today = day(2024, 1, 3);
        assert_eq!(
            input(None, "  ", Some(10.0)).validate(today),
            Err(InputError::Incomplete)
        );
        assert_eq!(input(None, "Run", None).validate(today), Err(InputError::Incomplete));
        assert_eq!(
            input(None, "Run", Some(-1.0)).validate(today),
            Err(InputError::Duration)
        );
        assert_eq!(
            input(None, "Run", Some(12.5)).validate(today),
            Err(InputError::Duration)
        );
        assert_eq!(
            input(None, "Run", Some(1e19)).validate(today),
            Err(InputError::Duration)
        );
        assert!(input(None, "Run", Some(MAX_DURATION_MINUTES)).validate(today).is_ok());
    }

    #[test]
    fn validate_defaults_and_clamps_date() {
        let today = day(2024, 1, 3);
        let fields = input(None, " Run ", Some(20.0)).validate(today).unwrap();
        assert_eq!(fields.date, "2024-01-03");
        assert_eq!(fields.activity_type, "Run");

        let fields = input(Some("2024-02-01"), "Run", Some(20.0)).validate(today).unwrap();
        assert_eq!(fields.date, "2024-01-03");

        let fields = input(Some("2023-12-30"), "Run", Some(20.0)).validate(today).unwrap();
        assert_eq!(fields.date, "2023-12-30");

        assert!(matches!(
            input(Some("03/01/2024"), "Run", Some(20.0)).validate(today),
            Err(InputError::Date(_))
        ));
    }

    #[test]
    fn validate_drops_blank_notes_and_rejects_negative_distance() {
        let today = day(2024, 1, 3);
        let mut raw = input(None, "Run", Some(20.0));
        raw.notes = Some("   ".into());
        raw.distance = Some(4.0);
        let fields = raw.validate(today).unwrap();
        assert_eq!(fields.notes, None);
        assert_eq!(fields.distance, Some(4.0));

        let mut raw = input(None, "Run", Some(20.0));
        raw.distance = Some(-1.0);
        assert_eq!(raw.validate(today), Err(InputError::Distance));
    }

    #[test]
    fn update_keeps_id_and_created_at() {
        let now = Utc::now();
        let mut user = UserData::new(now);
        let today = day(2024, 1, 3);
        let added = user.add_activity(input(None, "Run", Some(20.0)).validate(today).unwrap(), now);
        let updated = user
            .update_activity(added.id.unwrap(), input(None, "Bike", Some(40.0)).validate(today).unwrap())
            .unwrap();

        assert_eq!(updated.id, added.id);
        assert_eq!(updated.created_at, added.created_at);
        assert_eq!(updated.activity_type, "Bike");
        assert_eq!(updated.duration, 40);

        assert!(user.remove_activity(added.id.unwrap()));
        assert!(!user.remove_activity(added.id.unwrap()));
        assert!(user.activities.is_empty());
    }

    #[test]
    fn social_counts_follow_both_directions() {
        let mut data = AppData::default();
        for (follower, followee) in [("ann", "bob"), ("cat", "bob"), ("bob", "ann")] {
            data.follows.insert(Follow {
                follower: follower.into(),
                followee: followee.into(),
            });
        }
        let counts = data.social_counts("bob");
        assert_eq!(counts.follower_count, 2);
        assert_eq!(counts.following_count, 1);
    }
}
