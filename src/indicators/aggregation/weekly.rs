//! Daily → weekly bar aggregation

use chrono::{Datelike, IsoWeek};

use crate::models::bar::Bar;

/// Collapse ascending daily bars into ISO-week buckets.
///
/// Each bucket opens at its first bar's open, closes at its last bar's close,
/// spans the extreme high/low, sums volume and is dated on its last trading
/// day. A trailing partial week is kept.
pub fn aggregate_weekly(daily: &[Bar]) -> Vec<Bar> {
    let mut weeks: Vec<Bar> = Vec::new();
    let mut current: Option<(IsoWeek, Bar)> = None;

    for bar in daily {
        let week = bar.date.iso_week();
        match current.as_mut() {
            Some((open_week, bucket)) if *open_week == week => {
                bucket.high = bucket.high.max(bar.high);
                bucket.low = bucket.low.min(bar.low);
                bucket.close = bar.close;
                bucket.volume += bar.volume;
                bucket.date = bar.date;
            }
            _ => {
                if let Some((_, finished)) = current.take() {
                    weeks.push(finished);
                }
                current = Some((week, bar.clone()));
            }
        }
    }

    if let Some((_, finished)) = current {
        weeks.push(finished);
    }

    weeks
}
