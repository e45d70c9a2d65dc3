//! crates/logging/src/timestamp.rs
//! Wall-clock prefix written at the start of each line.

use time::OffsetDateTime;
use time::macros::format_description;

/// Appends `"[HH:MM:SS] "` for the current local time to `out`.
///
/// Falls back to UTC when the local offset cannot be determined, which the
/// `time` crate reports on some platforms once several threads are running.
pub(crate) fn push_clock_prefix(out: &mut String) {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    push_prefix_for(now, out);
}

fn push_prefix_for(moment: OffsetDateTime, out: &mut String) {
    // Formatting a fixed description into a String cannot fail.
    let clock = moment
        .format(format_description!("[hour]:[minute]:[second]"))
        .unwrap_or_default();
    out.push('[');
    out.push_str(&clock);
    out.push_str("] ");
}
