use crate::dates;
use crate::models::ActivityRecord;
use chrono::NaiveDate;

// each bucket keeps the input order
#[derive(Debug, Default, PartialEq)]
pub struct HistoryBuckets<'a> {
    pub today: Vec<&'a ActivityRecord>,
    pub yesterday: Vec<&'a ActivityRecord>,
    /// Two to seven days ago.
    pub last_7_days: Vec<&'a ActivityRecord>,
    pub older: Vec<&'a ActivityRecord>,
}

impl HistoryBuckets<'_> {
    pub fn len(&self) -> usize {
        self.today.len() + self.yesterday.len() + self.last_7_days.len() + self.older.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn bucket_history(records: &[ActivityRecord]) -> HistoryBuckets<'_> {
    bucket_history_at(dates::today_date(), records)
}

/// Undated records and records dated after today are not placed anywhere.
pub fn bucket_history_at(today: NaiveDate, records: &[ActivityRecord]) -> HistoryBuckets<'_> {
    let today_index = dates::day_number(today);
    let mut buckets = HistoryBuckets::default();

    for record in records {
        let Some(day) = record.day_index() else {
            continue;
        };
        match today_index - day {
            0 => buckets.today.push(record),
            1 => buckets.yesterday.push(record),
            2..=7 => buckets.last_7_days.push(record),
            diff if diff > 7 => buckets.older.push(record),
            _ => {}
        }
    }

    buckets
}
