//! Solver driver (C6): builds the model once, drives the CSP backend under
//! a wall-clock deadline, and classifies the terminal status.
//!
//! The backend's own `minimize_and_iterate` can silently give up partway
//! through a long search; to keep the OPTIMAL/FEASIBLE distinction the
//! driver iterates that stream itself on a worker thread and times the
//! collection out from the caller's side, rather than trusting a single
//! internal timeout error to carry that information.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use selen::prelude::*;
use serde::Serialize;

use crate::constraints::{post_hard_constraints, post_soft_objective};
use crate::domain::Config;
use crate::error::ScheduleError;
use crate::extract::{extract_schedule, EmployeeSchedule, Statistics};
use crate::model::VariableModel;

pub const DEFAULT_MAX_TIME_SECONDS: u64 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SolveStatus {
    #[serde(rename = "OPTIMAL")]
    Optimal,
    #[serde(rename = "FEASIBLE")]
    Feasible,
}

/// Echo of the derived calendar/config facts, returned alongside a schedule.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigSummary {
    pub year: i32,
    pub month: u32,
    pub num_days: usize,
    pub num_employees: usize,
    pub work_days: usize,
    pub rest_days: usize,
}

impl From<&Config> for ConfigSummary {
    fn from(config: &Config) -> Self {
        Self {
            year: config.year,
            month: config.month,
            num_days: config.num_days(),
            num_employees: config.num_employees(),
            work_days: config.work_days,
            rest_days: config.rest_days,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScheduleResponse {
    pub status: SolveStatus,
    pub schedule: Vec<EmployeeSchedule>,
    pub statistics: Statistics,
    pub config: ConfigSummary,
}

/// The core's single programmatic entry point.
pub fn generate_schedule(
    config: Config,
    max_time_seconds: u64,
) -> Result<ScheduleResponse, ScheduleError> {
    let span = tracing::info_span!(
        "generate_schedule",
        year = config.year,
        month = config.month,
        num_employees = config.num_employees(),
    );
    let _enter = span.enter();

    // No internal timeout: `drive` below is the sole deadline. Iterator
    // exhaustion must mean the search space was actually proven exhausted,
    // not that the backend's own clock happened to fire first.
    let mut vm = VariableModel::new(&config, Model::default());
    let fairness = post_hard_constraints(&mut vm, &config)?;
    let objective = post_soft_objective(&mut vm, &fairness)?;
    let (model, index) = vm.into_parts();

    tracing::debug!("solve starting");
    let start = Instant::now();
    let (status, solution) = drive(model, objective, max_time_seconds)?;
    tracing::info!(?status, elapsed_ms = start.elapsed().as_millis() as u64, "solve finished");

    let (schedule, statistics) = extract_schedule(&index, &config, &solution);
    Ok(ScheduleResponse {
        status,
        schedule,
        statistics,
        config: ConfigSummary::from(&config),
    })
}

/// Iterates the backend's ranked-solution stream on a worker thread under
/// our own deadline, keeping the best (most recent) incumbent.
fn drive(
    model: Model,
    objective: VarId,
    max_time_seconds: u64,
) -> Result<(SolveStatus, Solution), ScheduleError> {
    let deadline = Duration::from_secs(max_time_seconds.max(1));
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        for solution in model.minimize_and_iterate(objective) {
            if tx.send(solution).is_err() {
                break;
            }
        }
    });

    let start = Instant::now();
    let mut best: Option<Solution> = None;
    let mut exhausted = false;

    loop {
        let remaining = deadline.checked_sub(start.elapsed());
        let Some(remaining) = remaining else { break };
        match rx.recv_timeout(remaining) {
            Ok(solution) => best = Some(solution),
            Err(RecvTimeoutError::Timeout) => break,
            Err(RecvTimeoutError::Disconnected) => {
                exhausted = true;
                break;
            }
        }
    }

    match (best, exhausted) {
        (Some(solution), true) => Ok((SolveStatus::Optimal, solution)),
        (Some(solution), false) => Ok((SolveStatus::Feasible, solution)),
        (None, true) => Err(ScheduleError::Infeasible(
            "no assignment satisfies the hard constraints".into(),
        )),
        (None, false) => Err(ScheduleError::Timeout(
            "deadline reached before any feasible schedule was found".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PinnedShift, ShiftKind};

    const TEST_TIMEOUT: u64 = 30;

    fn employees(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    /// Checks universal invariants 1-8 against a produced schedule.
    fn assert_invariants(config: &Config, response: &ScheduleResponse) {
        assert_eq!(response.schedule.len(), config.num_employees());

        for employee in &response.schedule {
            assert_eq!(employee.shifts.len(), config.num_days());
            let work = employee.day_count + employee.night_count + employee.offb_count;
            assert_eq!(work as usize, config.work_days);
            assert_eq!(employee.offr_count as usize, config.rest_days);
        }

        // Every Night is immediately followed by PostOff, and PostOff never
        // appears except right after a Night.
        for employee in &response.schedule {
            for window in employee.shifts.windows(2) {
                let (today, tomorrow) = (&window[0], &window[1]);
                if today.symbol == "N" {
                    assert_eq!(tomorrow.symbol, "B");
                }
                if tomorrow.symbol == "B" {
                    assert_eq!(today.symbol, "N");
                }
            }
            assert_ne!(employee.shifts[0].symbol, "B");
        }

        // No run of 7 consecutive days has more than 6 working days.
        for employee in &response.schedule {
            for window in employee.shifts.windows(7) {
                let working = window.iter().filter(|s| s.symbol != "R").count();
                assert!(working <= 6);
            }
        }

        // Daily coverage floor of at least one Day and one Night worker.
        for day in &response.statistics.daily_coverage {
            assert!(day.day_workers >= 1);
            assert!(day.night_workers >= 1);
        }

        // Hard fairness bound: spread of Day/Night totals across employees <= 2.
        let day_counts: Vec<u32> = response.schedule.iter().map(|e| e.day_count).collect();
        let night_counts: Vec<u32> = response.schedule.iter().map(|e| e.night_count).collect();
        assert!(day_counts.iter().max().unwrap() - day_counts.iter().min().unwrap() <= 2);
        assert!(night_counts.iter().max().unwrap() - night_counts.iter().min().unwrap() <= 2);

        for pin in &config.pinned {
            let assigned = &response.schedule[pin.employee_index].shifts[pin.day_index];
            assert_eq!(assigned.shift_type, pin.kind.code());
        }
    }

    #[test]
    fn happy_path_five_employees_january() {
        let config = Config::new(
            2025,
            1,
            employees(&["Ada", "Ben", "Cho", "Dae", "Eun"]),
            20,
            vec![],
        )
        .unwrap();
        let response = generate_schedule(config.clone(), TEST_TIMEOUT).unwrap();
        assert!(matches!(
            response.status,
            SolveStatus::Optimal | SolveStatus::Feasible
        ));
        assert_invariants(&config, &response);
        for employee in &response.schedule {
            assert_eq!(employee.offr_count, 11);
        }
    }

    #[test]
    fn pinned_assignment_is_honored() {
        let pins = vec![PinnedShift {
            employee_index: 0,
            day_index: 0,
            kind: ShiftKind::Day,
        }];
        let config = Config::new(2025, 1, employees(&["Ada", "Ben", "Cho"]), 20, pins).unwrap();
        let response = generate_schedule(config.clone(), TEST_TIMEOUT).unwrap();
        assert_invariants(&config, &response);
    }

    #[test]
    fn too_few_employees_is_invalid_input_before_solving() {
        let err = Config::new(2025, 1, employees(&["Ada"]), 20, vec![]).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidInput(_)));
    }

    #[test]
    fn impossible_ratio_is_infeasible() {
        // Two employees cannot simultaneously cover a daily floor of >=1 Day
        // and >=1 Night worker every day while both work all 28 days: the
        // unique-assignment constraint caps each day at one kind per person.
        let config = Config::new(2025, 1, employees(&["Ada", "Ben"]), 28, vec![]).unwrap();
        let err = generate_schedule(config, TEST_TIMEOUT).unwrap_err();
        assert!(matches!(err, ScheduleError::Infeasible(_)));
        assert!(err.advisory().is_some());
    }

    #[test]
    fn conflicting_pins_are_infeasible() {
        // Two pins on the same (employee, day) cell force both `x[i,d,Day]`
        // and `x[i,d,Night]` to 1, which breaks the unique-assignment
        // constraint and has no solution.
        let pins = vec![
            PinnedShift {
                employee_index: 0,
                day_index: 0,
                kind: ShiftKind::Day,
            },
            PinnedShift {
                employee_index: 0,
                day_index: 0,
                kind: ShiftKind::Night,
            },
        ];
        let config = Config::new(2025, 1, employees(&["Ada", "Ben", "Cho"]), 20, pins).unwrap();
        let err = generate_schedule(config, TEST_TIMEOUT).unwrap_err();
        assert!(matches!(err, ScheduleError::Infeasible(_)));
    }

    #[test]
    fn february_short_month_succeeds() {
        let config = Config::new(2025, 2, employees(&["Ada", "Ben", "Cho"]), 20, vec![]).unwrap();
        let response = generate_schedule(config.clone(), TEST_TIMEOUT).unwrap();
        assert_invariants(&config, &response);
        for employee in &response.schedule {
            assert_eq!(employee.offr_count, 8);
        }
    }

    #[test]
    fn schedule_round_trips_through_json() {
        let config = Config::new(2025, 1, employees(&["Ada", "Ben", "Cho"]), 20, vec![]).unwrap();
        let response = generate_schedule(config, TEST_TIMEOUT).unwrap();
        let encoded = serde_json::to_string(&response).unwrap();
        let decoded: serde_json::Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded["schedule"].as_array().unwrap().len(), 3);
        assert!(decoded["status"].is_string());
    }
}
