use chrono::{DateTime, Utc};
use http::header::{CONTENT_TYPE, LOCATION};
use http::StatusCode;
use serde::Serialize;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;
use crate::Response;

pub fn now_iso() -> String {
    Utc::now().to_rfc3339()
}

/// Time-ordered identifier for locally created records.
pub fn new_local_id() -> String {
    Uuid::now_v7().to_string()
}

pub fn lock<'a, T>(mutex: &'a Mutex<T>, name: &str) -> anyhow::Result<MutexGuard<'a, T>> {
    mutex
        .lock()
        .map_err(|_| anyhow::anyhow!("{} state lock poisoned", name))
}

pub fn html_response(status: StatusCode, html: String) -> anyhow::Result<Response> {
    Ok(http::Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "text/html; charset=utf-8")
        .body(html.into_bytes())?)
}

pub fn json_response<T: Serialize>(value: &T) -> anyhow::Result<Response> {
    Ok(http::Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "application/json")
        .body(serde_json::to_vec(value)?)?)
}

/// 303 back to a page after a form post.
pub fn see_other(location: &str) -> anyhow::Result<Response> {
    Ok(http::Response::builder()
        .status(StatusCode::SEE_OTHER)
        .header(LOCATION, location)
        .body(Vec::new())?)
}

/// Relative distance from `created_at` to `now`, e.g. "about 3 hours ago".
///
/// Buckets follow the ones people expect from feed timestamps: minutes under
/// 45, hours under a day, days under a month, then months and years.
/// Unparsable timestamps are shown verbatim.
pub fn time_ago(created_at: &str, now: DateTime<Utc>) -> String {
    let Ok(then) = DateTime::parse_from_rfc3339(created_at) else {
        return created_at.to_string();
    };
    let seconds = (now - then.with_timezone(&Utc)).num_seconds();
    let distance = distance_in_words(seconds.unsigned_abs());
    if seconds < 0 {
        format!("in {}", distance)
    } else {
        format!("{} ago", distance)
    }
}

fn distance_in_words(seconds: u64) -> String {
    const HOUR: u64 = 60;
    const DAY: u64 = 1440;
    const MONTH: u64 = 43200;

    let minutes = (seconds + 30) / 60;
    match minutes {
        0 => "less than a minute".to_string(),
        1 => "1 minute".to_string(),
        2..=44 => format!("{} minutes", minutes),
        45..=89 => "about 1 hour".to_string(),
        90..=1439 => format!("about {} hours", (minutes + HOUR / 2) / HOUR),
        1440..=2519 => "1 day".to_string(),
        2520..=43199 => format!("{} days", (minutes + DAY / 2) / DAY),
        43200..=86399 => plural("about", (minutes + MONTH / 2) / MONTH, "month"),
        _ => {
            let months = (minutes + MONTH / 2) / MONTH;
            if months < 12 {
                format!("{} months", months)
            } else {
                let years = months / 12;
                match months % 12 {
                    0..=2 => plural("about", years, "year"),
                    3..=8 => plural("over", years, "year"),
                    _ => plural("almost", years + 1, "year"),
                }
            }
        }
    }
}

fn plural(qualifier: &str, n: u64, unit: &str) -> String {
    if n == 1 {
        format!("{} 1 {}", qualifier, unit)
    } else {
        format!("{} {} {}s", qualifier, n, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn time_ago_buckets() {
        let created = "2024-01-15T10:30:00Z";
        assert_eq!(time_ago(created, at(2024, 1, 15, 10, 30)), "less than a minute ago");
        assert_eq!(time_ago(created, at(2024, 1, 15, 10, 31)), "1 minute ago");
        assert_eq!(time_ago(created, at(2024, 1, 15, 10, 50)), "20 minutes ago");
        assert_eq!(time_ago(created, at(2024, 1, 15, 11, 30)), "about 1 hour ago");
        assert_eq!(time_ago(created, at(2024, 1, 15, 13, 30)), "about 3 hours ago");
        assert_eq!(time_ago(created, at(2024, 1, 16, 10, 30)), "1 day ago");
        assert_eq!(time_ago(created, at(2024, 1, 20, 10, 30)), "5 days ago");
        assert_eq!(time_ago(created, at(2024, 2, 20, 10, 30)), "about 1 month ago");
        assert_eq!(time_ago(created, at(2024, 6, 15, 10, 30)), "5 months ago");
        assert_eq!(time_ago(created, at(2025, 2, 1, 10, 30)), "about 1 year ago");
        assert_eq!(time_ago(created, at(2026, 7, 15, 10, 30)), "over 2 years ago");
    }

    #[test]
    fn future_and_garbage_timestamps() {
        assert_eq!(
            time_ago("2024-01-15T12:30:00Z", at(2024, 1, 15, 10, 30)),
            "in about 2 hours"
        );
        assert_eq!(time_ago("yesterday", at(2024, 1, 15, 10, 30)), "yesterday");
    }

    #[test]
    fn local_ids_are_unique() {
        assert_ne!(new_local_id(), new_local_id());
    }

    #[test]
    fn see_other_sets_location() {
        let response = see_other("/explore").unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/explore");
    }
}
