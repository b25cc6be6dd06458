//! Calendar dates on a linear axis.
//!
//! Dates are plotted as days since 1970-01-01, so a time axis is an
//! ordinary [`LinearScale`](crate::LinearScale) whose ticks land on
//! the first of January.

use crate::scale::tick_spec;
use chrono::{Datelike, NaiveDate};

/// `NaiveDate::num_days_from_ce` of 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Returns `date` as days since 1970-01-01.
pub fn date_to_x(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE)
}

/// Returns the calendar day containing axis position `x`.
pub fn x_to_date(x: f64) -> Option<NaiveDate> {
    if !x.is_finite() || x.abs() > 1e8 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    let days = x.floor() as i32;
    NaiveDate::from_num_days_from_ce_opt(days + UNIX_EPOCH_DAYS_FROM_CE)
}

/// Returns axis positions of every `step`th new year inside
/// `domain`, `step` chosen for roughly `count` ticks.
pub fn year_ticks(domain: (f64, f64), count: f64) -> Vec<f64> {
    let (lo, hi) = if domain.1 < domain.0 {
        (domain.1, domain.0)
    } else {
        domain
    };
    let (Some(first), Some(last)) = (x_to_date(lo), x_to_date(hi)) else {
        return Vec::new();
    };
    let step = year_step(first.year(), last.year(), count);
    let mut year = first.year().div_euclid(step) * step;
    let mut ticks = Vec::new();
    while year <= last.year() {
        if let Some(x) = new_year(year).map(date_to_x) {
            if (lo..=hi).contains(&x) {
                ticks.push(x);
            }
        }
        year += step;
    }
    if domain.1 < domain.0 {
        ticks.reverse();
    }
    ticks
}

/// Extends `domain` outwards to new years that are multiples of the
/// tick step for `count` ticks.
pub fn nice_years(domain: (f64, f64), count: f64) -> (f64, f64) {
    let (Some(first), Some(last)) = (x_to_date(domain.0), x_to_date(domain.1)) else {
        return domain;
    };
    let step = year_step(first.year(), last.year(), count);
    let start = first.year().div_euclid(step) * step;
    let mut stop = last.year().div_euclid(step) * step;
    if new_year(stop).map_or(false, |d| d < last) {
        stop += step;
    }
    match (new_year(start), new_year(stop)) {
        (Some(start), Some(stop)) => (date_to_x(start), date_to_x(stop)),
        _ => domain,
    }
}

/// Returns the year label for axis position `x`.
pub(crate) fn year_label(x: f64) -> String {
    x_to_date(x).map_or_else(String::new, |d| d.year().to_string())
}

#[allow(clippy::cast_possible_truncation)]
fn year_step(first: i32, last: i32, count: f64) -> i32 {
    match tick_spec(f64::from(first), f64::from(last), count) {
        Some((_, _, inc)) if inc >= 1.0 => inc as i32,
        _ => 1,
    }
}

fn new_year(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
}

#[cfg(test)]
mod tests {
    use super::{date_to_x, nice_years, x_to_date, year_label, year_ticks};
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_round_trip() {
        assert_eq!(date_to_x(ymd(1970, 1, 1)), 0.0);
        assert_eq!(date_to_x(ymd(1970, 1, 11)), 10.0);
        assert_eq!(date_to_x(ymd(1969, 12, 31)), -1.0);
        let date = ymd(2017, 6, 23);
        assert_eq!(x_to_date(date_to_x(date)), Some(date));
        assert_eq!(x_to_date(date_to_x(date) + 0.7), Some(date));
        assert_eq!(x_to_date(f64::NAN), None);
    }

    #[test]
    fn test_nice_years() {
        let domain = (date_to_x(ymd(2001, 1, 1)), date_to_x(ymd(2024, 1, 31)));
        let (start, stop) = nice_years(domain, 10.0);
        assert_eq!(x_to_date(start), Some(ymd(2000, 1, 1)));
        assert_eq!(x_to_date(stop), Some(ymd(2026, 1, 1)));
    }

    #[test]
    fn test_year_ticks() {
        let domain = (date_to_x(ymd(2000, 1, 1)), date_to_x(ymd(2026, 1, 1)));
        let labels: Vec<String> = year_ticks(domain, 6.5).into_iter().map(year_label).collect();
        assert_eq!(labels, ["2000", "2005", "2010", "2015", "2020", "2025"]);
    }
}
