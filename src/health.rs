use serde::{Deserialize, Serialize};

const BASE: u64 = 1;
const SOCIAL_CAP: u64 = 9;
const TIME_CAP: u64 = 30;
const POINTS_PER_STREAK_DAY: u64 = 10;
const STREAK_CAP: u64 = 60;
const MAX_SCORE: u64 = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialCounts {
    pub follower_count: u64,
    pub following_count: u64,
}

/// Gamified 0-100 score: one base point, a point per follower or followed
/// user up to 9, a point per minute active today up to 30 and ten points
/// per streak day up to 60.
pub fn health_score(streak: u32, minutes_today: u64, social: SocialCounts) -> u8 {
    let social_points = social
        .follower_count
        .saturating_add(social.following_count)
        .min(SOCIAL_CAP);
    let time_points = minutes_today.min(TIME_CAP);
    let streak_points = u64::from(streak)
        .saturating_mul(POINTS_PER_STREAK_DAY)
        .min(STREAK_CAP);

    (BASE + social_points + time_points + streak_points).min(MAX_SCORE) as u8
}
