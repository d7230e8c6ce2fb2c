//! Decides whether an alert opens a new chat thread or replies to the last one

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Returns true when a new top-level thread should be started.
///
/// `last_thread_id` is the root message timestamp of the previous thread in
/// epoch seconds (e.g. `"1700000000.123456"`). An empty or unparsable id
/// always starts a new thread; otherwise the last thread is reused until it
/// is older than `min_interval`.
pub fn should_start_new_thread(
    last_thread_id: &str,
    now: SystemTime,
    min_interval: Duration,
) -> bool {
    if last_thread_id.is_empty() {
        return true;
    }

    let Some(created_at) = parse_thread_time(last_thread_id) else {
        tracing::warn!(
            "Could not parse last thread timestamp '{}', starting a new thread",
            last_thread_id
        );
        return true;
    };

    match now.duration_since(created_at) {
        Ok(elapsed) => elapsed > min_interval,
        // Thread stamped in the future relative to our clock
        Err(_) => false,
    }
}

fn parse_thread_time(thread_id: &str) -> Option<SystemTime> {
    let secs: f64 = thread_id.trim().parse().ok()?;
    if !secs.is_finite() {
        return None;
    }
    // Sub-second precision is dropped
    let whole = secs.trunc();
    let offset = Duration::from_secs(whole.abs() as u64);
    if whole >= 0.0 {
        UNIX_EPOCH.checked_add(offset)
    } else {
        UNIX_EPOCH.checked_sub(offset)
    }
}
