use chrono::Utc;

/// Current Unix timestamp in milliseconds (UTC)
pub fn now_timestamp() -> i64 {
    Utc::now().timestamp_millis()
}
