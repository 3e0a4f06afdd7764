use crate::dates;
use crate::errors::AppError;
use crate::health::{SocialCounts, health_score};
use crate::history::bucket_history_at;
use crate::models::{
    ActivityInput, ActivityRecord, AppData, CreateUserRequest, Follow, HistoryEntry,
    HistoryResponse, StatsResponse, UserData, UserResponse,
};
use crate::state::AppState;
use crate::stats::build_stats_at;
use crate::ui::render_index;
use crate::users::{normalize_username, parse_username};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use chrono::Utc;
use tracing::info;

pub async fn index() -> Html<String> {
    Html(render_index(&dates::today()))
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let username = parse_username(&payload.username)?;

    let mut data = state.data.lock().await;
    if data.users.contains_key(&username) {
        return Err(AppError::conflict("username taken"));
    }

    let user = UserData::new(Utc::now());
    let created_at = user.created_at;
    data.users.insert(username.clone(), user);
    state.persist(&data).await?;

    info!(%username, "created user");
    Ok((StatusCode::CREATED, Json(UserResponse { username, created_at })))
}

pub async fn list_activities(
    State(state): State<AppState>,
    Path(raw_username): Path<String>,
) -> Result<Json<Vec<ActivityRecord>>, AppError> {
    let username = normalize_username(&raw_username);
    let data = state.data.lock().await;
    let user = find_user(&data, &username)?;
    Ok(Json(user.activities_newest_first()))
}

pub async fn add_activity(
    State(state): State<AppState>,
    Path(raw_username): Path<String>,
    Json(payload): Json<ActivityInput>,
) -> Result<(StatusCode, Json<ActivityRecord>), AppError> {
    let username = normalize_username(&raw_username);
    let fields = payload.validate(dates::today_date())?;

    let mut data = state.data.lock().await;
    let record = find_user_mut(&mut data, &username)?.add_activity(fields, Utc::now());
    state.persist(&data).await?;

    info!(%username, id = ?record.id, activity_type = %record.activity_type, minutes = record.duration, "logged activity");
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update_activity(
    State(state): State<AppState>,
    Path((raw_username, id)): Path<(String, u64)>,
    Json(payload): Json<ActivityInput>,
) -> Result<Json<ActivityRecord>, AppError> {
    let username = normalize_username(&raw_username);
    let fields = payload.validate(dates::today_date())?;

    let mut data = state.data.lock().await;
    let record = find_user_mut(&mut data, &username)?
        .update_activity(id, fields)
        .ok_or_else(|| AppError::not_found(format!("activity {id} not found")))?;
    state.persist(&data).await?;

    info!(%username, id, "updated activity");
    Ok(Json(record))
}

pub async fn delete_activity(
    State(state): State<AppState>,
    Path((raw_username, id)): Path<(String, u64)>,
) -> Result<StatusCode, AppError> {
    let username = normalize_username(&raw_username);
    let mut data = state.data.lock().await;
    if !find_user_mut(&mut data, &username)?.remove_activity(id) {
        return Err(AppError::not_found(format!("activity {id} not found")));
    }
    state.persist(&data).await?;

    info!(%username, id, "deleted activity");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_history(
    State(state): State<AppState>,
    Path(raw_username): Path<String>,
) -> Result<Json<HistoryResponse>, AppError> {
    let username = normalize_username(&raw_username);
    let today = dates::today_date();
    let list = {
        let data = state.data.lock().await;
        find_user(&data, &username)?.activities_newest_first()
    };

    let buckets = bucket_history_at(today, &list);
    Ok(Json(HistoryResponse {
        today: dates::date_key(today),
        today_label: dates::day_label(today),
        yesterday_label: dates::day_label(today.pred_opt().unwrap_or(today)),
        today_entries: to_entries(&buckets.today),
        yesterday_entries: to_entries(&buckets.yesterday),
        last_7_days: to_entries(&buckets.last_7_days),
        older: to_entries(&buckets.older),
    }))
}

pub async fn get_stats(
    State(state): State<AppState>,
    Path(raw_username): Path<String>,
) -> Result<Json<StatsResponse>, AppError> {
    let username = normalize_username(&raw_username);
    let today = dates::today_date();
    let (list, social) = {
        let data = state.data.lock().await;
        let user = find_user(&data, &username)?;
        (user.activities_newest_first(), data.social_counts(&username))
    };

    let summary = build_stats_at(today, &list);
    let health = health_score(summary.streaks.current_streak, summary.minutes_today, social);
    let type_lines = summary.types.iter().map(ToString::to_string).collect();

    Ok(Json(StatsResponse {
        summary,
        type_lines,
        social,
        health,
    }))
}

pub async fn get_social(
    State(state): State<AppState>,
    Path(raw_username): Path<String>,
) -> Result<Json<SocialCounts>, AppError> {
    let username = normalize_username(&raw_username);
    let data = state.data.lock().await;
    find_user(&data, &username)?;
    Ok(Json(data.social_counts(&username)))
}

pub async fn follow(
    State(state): State<AppState>,
    Path((raw_username, raw_target)): Path<(String, String)>,
) -> Result<Json<SocialCounts>, AppError> {
    let username = normalize_username(&raw_username);
    let target = normalize_username(&raw_target);
    if username == target {
        return Err(AppError::bad_request("cannot follow yourself"));
    }

    let mut data = state.data.lock().await;
    find_user(&data, &username)?;
    find_user(&data, &target)?;

    let inserted = data.follows.insert(Follow {
        follower: username.clone(),
        followee: target.clone(),
    });
    if inserted {
        state.persist(&data).await?;
        info!(%username, %target, "followed");
    }

    Ok(Json(data.social_counts(&username)))
}

pub async fn unfollow(
    State(state): State<AppState>,
    Path((raw_username, raw_target)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let username = normalize_username(&raw_username);
    let target = normalize_username(&raw_target);
    let mut data = state.data.lock().await;
    find_user(&data, &username)?;

    let removed = data.follows.remove(&Follow {
        follower: username.clone(),
        followee: target.clone(),
    });
    if removed {
        state.persist(&data).await?;
        info!(%username, %target, "unfollowed");
    }

    Ok(StatusCode::NO_CONTENT)
}

fn find_user<'a>(data: &'a AppData, username: &str) -> Result<&'a UserData, AppError> {
    data.users
        .get(username)
        .ok_or_else(|| AppError::not_found(format!("user {username} not found")))
}

fn find_user_mut<'a>(data: &'a mut AppData, username: &str) -> Result<&'a mut UserData, AppError> {
    data.users
        .get_mut(username)
        .ok_or_else(|| AppError::not_found(format!("user {username} not found")))
}

fn to_entries(records: &[&ActivityRecord]) -> Vec<HistoryEntry> {
    records
        .iter()
        .map(|record| HistoryEntry {
            record: (*record).clone(),
            day_label: record.calendar_date().map(dates::day_label),
        })
        .collect()
}
