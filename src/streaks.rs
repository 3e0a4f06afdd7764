use crate::dates;
use crate::models::ActivityRecord;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StreakResult {
    pub current_streak: u32,
    pub best_streak: u32,
}

pub fn calculate_streaks(records: &[ActivityRecord]) -> StreakResult {
    calculate_streaks_at(dates::today_date(), records)
}

/// The current streak resets to zero once the latest active day is older than yesterday.
pub fn calculate_streaks_at(today: NaiveDate, records: &[ActivityRecord]) -> StreakResult {
    let days = distinct_days(records);
    let Some(&latest) = days.last() else {
        return StreakResult::default();
    };

    let mut current_streak = 1;
    let mut expected = latest;
    for &day in days.iter().rev().skip(1) {
        if day != expected - 1 {
            break;
        }
        current_streak += 1;
        expected = day;
    }
    if dates::day_number(today) - latest > 1 {
        current_streak = 0;
    }

    StreakResult {
        current_streak,
        best_streak: longest_run(&days),
    }
}

pub(crate) fn distinct_days(records: &[ActivityRecord]) -> Vec<i64> {
    let mut days: Vec<i64> = records.iter().filter_map(ActivityRecord::day_index).collect();
    days.sort_unstable();
    days.dedup();
    days
}

fn longest_run(days: &[i64]) -> u32 {
    let mut best = 0;
    let mut run = 0;
    let mut prev: Option<i64> = None;

    for &day in days {
        run = match prev {
            Some(p) if day == p + 1 => run + 1,
            _ => 1,
        };
        best = best.max(run);
        prev = Some(day);
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn on(dates: &[&str]) -> Vec<ActivityRecord> {
        dates
            .iter()
            .map(|date| ActivityRecord {
                date: Some(date.to_string()),
                activity_type: "Run".into(),
                duration: 10,
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn empty_history_has_no_streaks() {
        assert_eq!(calculate_streaks_at(day(2024, 1, 3), &[]), StreakResult::default());
    }

    #[test]
    fn three_consecutive_days_ending_today() {
        let result = calculate_streaks_at(day(2024, 1, 3), &on(&["2024-01-01", "2024-01-02", "2024-01-03"]));
        assert_eq!(result.current_streak, 3);
        assert_eq!(result.best_streak, 3);
    }

    #[test]
    fn gap_breaks_both_streaks() {
        let result = calculate_streaks_at(day(2024, 1, 3), &on(&["2024-01-01", "2024-01-03"]));
        assert_eq!(result.current_streak, 1);
        assert_eq!(result.best_streak, 1);
    }

    #[test]
    fn single_activity_today() {
        let result = calculate_streaks_at(day(2024, 1, 3), &on(&["2024-01-03"]));
        assert_eq!(result, StreakResult { current_streak: 1, best_streak: 1 });
    }

    #[test]
    fn single_activity_ten_days_ago() {
        let result = calculate_streaks_at(day(2024, 1, 13), &on(&["2024-01-03"]));
        assert_eq!(result, StreakResult { current_streak: 0, best_streak: 1 });
    }

    #[test]
    fn streak_ending_yesterday_is_still_current() {
        let result = calculate_streaks_at(day(2024, 1, 4), &on(&["2024-01-02", "2024-01-03"]));
        assert_eq!(result.current_streak, 2);
    }

    #[test]
    fn stale_history_zeroes_current_but_keeps_best() {
        let history = on(&["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-04", "2024-01-05"]);
        let result = calculate_streaks_at(day(2024, 1, 7), &history);
        assert_eq!(result.current_streak, 0);
        assert_eq!(result.best_streak, 5);
    }

    #[test]
    fn duplicates_and_time_suffixes_collapse() {
        let history = on(&["2024-01-02", "2024-01-02", "2024-01-03T07:30:00", " 2024-01-03 "]);
        let result = calculate_streaks_at(day(2024, 1, 3), &history);
        assert_eq!(result, StreakResult { current_streak: 2, best_streak: 2 });
    }

    #[test]
    fn undated_and_malformed_records_are_skipped() {
        let mut history = on(&["2024-01-03", "not-a-date"]);
        history.push(ActivityRecord::default());
        let result = calculate_streaks_at(day(2024, 1, 3), &history);
        assert_eq!(result, StreakResult { current_streak: 1, best_streak: 1 });
    }

    #[test]
    fn best_streak_found_in_the_past() {
        let history = on(&["2023-12-01", "2023-12-02", "2023-12-03", "2023-12-04", "2024-01-02", "2024-01-03"]);
        let result = calculate_streaks_at(day(2024, 1, 3), &history);
        assert_eq!(result.current_streak, 2);
        assert_eq!(result.best_streak, 4);
    }

    #[test]
    fn consecutive_run_ending_today_matches_distinct_days() {
        let today = day(2024, 3, 12);
        for len in 1..=20 {
            let history: Vec<String> = (0..len)
                .map(|offset| dates::date_key(today - chrono::Duration::days(offset)))
                .collect();
            let refs: Vec<&str> = history.iter().map(String::as_str).collect();
            let result = calculate_streaks_at(today, &on(&refs));
            assert_eq!(result.current_streak, len as u32);
            assert_eq!(result.best_streak, len as u32);
        }
    }

    #[test]
    fn best_streak_never_shrinks_when_dates_are_added() {
        let today = day(2024, 1, 31);
        let all = ["2024-01-10", "2024-01-02", "2024-01-11", "2024-01-03", "2024-01-12", "2024-01-20", "2024-01-04", "2024-01-13"];
        let mut best = 0;
        for n in 1..=all.len() {
            let result = calculate_streaks_at(today, &on(&all[..n]));
            assert!(result.best_streak >= best);
            best = result.best_streak;
        }
        assert_eq!(best, 4);
    }
}
