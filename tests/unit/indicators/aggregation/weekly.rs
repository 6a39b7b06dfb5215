//! Unit tests for weekly aggregation

use crate::fixtures::{daily_bars, date};
use macd_screener::indicators::aggregation::aggregate_weekly;
use macd_screener::models::Bar;

#[test]
fn test_weekly_empty_input() {
    assert!(aggregate_weekly(&[]).is_empty());
}

#[test]
fn test_weekly_bucket_ohlcv() {
    let daily = vec![
        Bar::new(date(2024, 3, 4), 10.0, 11.0, 9.5, 10.5, 100.0),
        Bar::new(date(2024, 3, 5), 10.5, 12.0, 10.0, 11.5, 200.0),
        Bar::new(date(2024, 3, 6), 11.5, 11.8, 9.0, 9.8, 300.0),
        Bar::new(date(2024, 3, 8), 9.8, 10.2, 9.6, 10.1, 400.0),
    ];

    let weekly = aggregate_weekly(&daily);
    assert_eq!(weekly.len(), 1);

    let week = &weekly[0];
    assert_eq!(week.date, date(2024, 3, 8));
    assert_eq!(week.open, 10.0);
    assert_eq!(week.high, 12.0);
    assert_eq!(week.low, 9.0);
    assert_eq!(week.close, 10.1);
    assert_eq!(week.volume, 1_000.0);
}

#[test]
fn test_weekly_keeps_partial_trailing_week() {
    // 2024-01-01 is a Monday; 7 business days span two ISO weeks
    let weekly = aggregate_weekly(&daily_bars(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]));
    assert_eq!(weekly.len(), 2);
    assert_eq!(weekly[0].date, date(2024, 1, 5));
    assert_eq!(weekly[0].close, 5.0);
    assert_eq!(weekly[1].date, date(2024, 1, 9));
    assert_eq!(weekly[1].open, 6.0);
    assert_eq!(weekly[1].close, 7.0);
    assert_eq!(weekly[1].volume, 2_000.0);
}

#[test]
fn test_weekly_year_boundary_follows_iso_week() {
    let daily = vec![
        Bar::new(date(2024, 12, 27), 1.0, 1.0, 1.0, 1.0, 1.0),
        Bar::new(date(2024, 12, 30), 2.0, 2.0, 2.0, 2.0, 1.0),
        Bar::new(date(2024, 12, 31), 3.0, 3.0, 3.0, 3.0, 1.0),
        Bar::new(date(2025, 1, 2), 4.0, 4.0, 4.0, 4.0, 1.0),
    ];

    let weekly = aggregate_weekly(&daily);
    assert_eq!(weekly.len(), 2);
    assert_eq!(weekly[0].date, date(2024, 12, 27));
    assert_eq!(weekly[1].date, date(2025, 1, 2));
    assert_eq!(weekly[1].open, 2.0);
    assert_eq!(weekly[1].close, 4.0);
    assert_eq!(weekly[1].volume, 3.0);
}

#[test]
fn test_weekly_dates_strictly_increase() {
    let closes: Vec<f64> = (0..61).map(|i| 50.0 + i as f64).collect();
    let weekly = aggregate_weekly(&daily_bars(&closes));
    assert_eq!(weekly.len(), 13);
    assert!(weekly.windows(2).all(|w| w[0].date < w[1].date));
    assert_eq!(weekly.last().unwrap().date, date(2024, 3, 25));
}
