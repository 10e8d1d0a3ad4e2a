//! Calendar facts, validated configuration, and the shift-kind enumeration.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// One of the four shift kinds a calendar day can be assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftKind {
    Day,
    Night,
    PostOff,
    Rest,
}

impl ShiftKind {
    pub const ALL: [ShiftKind; 4] = [
        ShiftKind::Day,
        ShiftKind::Night,
        ShiftKind::PostOff,
        ShiftKind::Rest,
    ];

    /// Wire-format numeric code: `0=Day, 1=Night, 2=PostOff, 3=Rest`.
    pub fn code(self) -> u8 {
        match self {
            ShiftKind::Day => 0,
            ShiftKind::Night => 1,
            ShiftKind::PostOff => 2,
            ShiftKind::Rest => 3,
        }
    }

    pub fn from_code(code: u8) -> Result<Self, ScheduleError> {
        match code {
            0 => Ok(ShiftKind::Day),
            1 => Ok(ShiftKind::Night),
            2 => Ok(ShiftKind::PostOff),
            3 => Ok(ShiftKind::Rest),
            other => Err(ScheduleError::InvalidInput(format!(
                "unknown shift_type {other}, expected 0..=3"
            ))),
        }
    }

    /// Single-letter symbol used in rendered output.
    pub fn symbol(self) -> &'static str {
        match self {
            ShiftKind::Day => "D",
            ShiftKind::Night => "N",
            ShiftKind::PostOff => "B",
            ShiftKind::Rest => "R",
        }
    }
}

/// Days-in-month and per-day weekday, computed without any lookup table.
#[derive(Debug, Clone)]
pub struct Calendar {
    pub num_days: usize,
    /// Monday=0 .. Sunday=6, one entry per day of the month.
    pub weekdays: Vec<u8>,
}

impl Calendar {
    pub fn new(year: i32, month: u32) -> Result<Self, ScheduleError> {
        if !(2000..=2100).contains(&year) {
            return Err(ScheduleError::InvalidInput(format!(
                "year {year} is outside the supported range 2000..=2100"
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(ScheduleError::InvalidInput(format!(
                "month {month} is outside the valid range 1..=12"
            )));
        }
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| ScheduleError::InvalidInput(format!("invalid date {year}-{month}-01")))?;
        let next_month_first = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .expect("year+1 and month+1 are always valid calendar dates");
        let num_days = (next_month_first - first).num_days() as usize;
        let weekdays = (0..num_days as u64)
            .map(|offset| {
                (first + Days::new(offset)).weekday().num_days_from_monday() as u8
            })
            .collect();
        Ok(Self { num_days, weekdays })
    }
}

/// A caller-supplied forced assignment.
#[derive(Debug, Clone, Copy)]
pub struct PinnedShift {
    pub employee_index: usize,
    pub day_index: usize,
    pub kind: ShiftKind,
}

/// Validated, immutable request to the scheduling core.
#[derive(Debug, Clone)]
pub struct Config {
    pub year: i32,
    pub month: u32,
    pub calendar: Calendar,
    pub employees: Vec<String>,
    pub work_days: usize,
    pub rest_days: usize,
    pub pinned: Vec<PinnedShift>,
}

impl Config {
    pub fn new(
        year: i32,
        month: u32,
        employees: Vec<String>,
        work_days: usize,
        pinned: Vec<PinnedShift>,
    ) -> Result<Self, ScheduleError> {
        let calendar = Calendar::new(year, month)?;

        if employees.len() < 2 {
            return Err(ScheduleError::InvalidInput(format!(
                "need at least 2 employees, got {}",
                employees.len()
            )));
        }
        if employees.iter().any(|name| name.trim().is_empty()) {
            return Err(ScheduleError::InvalidInput(
                "employee names must be non-empty".into(),
            ));
        }
        if work_days > calendar.num_days {
            return Err(ScheduleError::InvalidInput(format!(
                "work_days ({work_days}) exceeds the {} days in this month",
                calendar.num_days
            )));
        }
        for pin in &pinned {
            if pin.employee_index >= employees.len() {
                return Err(ScheduleError::InvalidInput(format!(
                    "pinned employee_index {} is out of range (have {} employees)",
                    pin.employee_index,
                    employees.len()
                )));
            }
            if pin.day_index >= calendar.num_days {
                return Err(ScheduleError::InvalidInput(format!(
                    "pinned day_index {} is out of range (month has {} days)",
                    pin.day_index, calendar.num_days
                )));
            }
        }

        let rest_days = calendar.num_days - work_days;
        Ok(Self {
            year,
            month,
            calendar,
            employees,
            work_days,
            rest_days,
            pinned,
        })
    }

    pub fn num_employees(&self) -> usize {
        self.employees.len()
    }

    pub fn num_days(&self) -> usize {
        self.calendar.num_days
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn january_has_31_days() {
        let cal = Calendar::new(2025, 1).unwrap();
        assert_eq!(cal.num_days, 31);
    }

    #[test]
    fn february_2025_is_not_a_leap_year() {
        let cal = Calendar::new(2025, 2).unwrap();
        assert_eq!(cal.num_days, 28);
    }

    #[test]
    fn february_2024_is_a_leap_year() {
        let cal = Calendar::new(2024, 2).unwrap();
        assert_eq!(cal.num_days, 29);
    }

    #[test]
    fn april_has_30_days() {
        let cal = Calendar::new(2025, 4).unwrap();
        assert_eq!(cal.num_days, 30);
    }

    #[test]
    fn month_out_of_range_is_invalid_input() {
        assert!(matches!(
            Calendar::new(2025, 13),
            Err(ScheduleError::InvalidInput(_))
        ));
        assert!(matches!(
            Calendar::new(2025, 0),
            Err(ScheduleError::InvalidInput(_))
        ));
    }

    #[test]
    fn year_out_of_range_is_invalid_input() {
        assert!(matches!(
            Calendar::new(1999, 1),
            Err(ScheduleError::InvalidInput(_))
        ));
        assert!(matches!(
            Calendar::new(2101, 1),
            Err(ScheduleError::InvalidInput(_))
        ));
    }

    fn employees(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("Employee {i}")).collect()
    }

    #[test]
    fn rejects_too_few_employees() {
        let err = Config::new(2025, 1, employees(1), 20, vec![]).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidInput(_)));
    }

    #[test]
    fn rejects_work_days_over_days_in_month() {
        let err = Config::new(2025, 1, employees(5), 40, vec![]).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidInput(_)));
    }

    #[test]
    fn rejects_blank_employee_name() {
        let err = Config::new(2025, 1, vec!["A".into(), "  ".into()], 20, vec![]).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidInput(_)));
    }

    #[test]
    fn rejects_pin_out_of_range() {
        let pins = vec![PinnedShift {
            employee_index: 9,
            day_index: 0,
            kind: ShiftKind::Day,
        }];
        let err = Config::new(2025, 1, employees(5), 20, pins).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidInput(_)));
    }

    #[test]
    fn derives_rest_days() {
        let config = Config::new(2025, 1, employees(5), 20, vec![]).unwrap();
        assert_eq!(config.rest_days, 11);
    }
}
