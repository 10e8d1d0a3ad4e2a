//! Solution extractor (C7): turns a feasible CSP assignment into the
//! wire-shaped schedule, per-employee totals, and daily coverage counts.

use serde::Serialize;

use crate::domain::{Config, ShiftKind};
use crate::model::VarIndex;
use selen::prelude::{Solution, VarId};

/// One assigned day in an employee's schedule.
#[derive(Debug, Clone, Serialize)]
pub struct ShiftAssignment {
    /// 1-based day of month.
    pub day: u32,
    #[serde(rename = "type")]
    pub shift_type: u8,
    pub symbol: &'static str,
    pub name: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmployeeSchedule {
    pub name: String,
    pub shifts: Vec<ShiftAssignment>,
    pub day_count: u32,
    pub night_count: u32,
    pub offb_count: u32,
    pub offr_count: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyCoverage {
    /// 1-based day of month.
    pub day: u32,
    pub day_workers: u32,
    pub night_workers: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Statistics {
    pub daily_coverage: Vec<DailyCoverage>,
}

/// Reads `x[i,d,s]` out of a feasible solution. By precondition (§7) this is
/// only ever called once the driver has classified the run as OPTIMAL or
/// FEASIBLE, so every `(i,d)` cell has exactly one assigned kind.
pub fn extract_schedule(
    index: &VarIndex,
    config: &Config,
    solution: &Solution,
) -> (Vec<EmployeeSchedule>, Statistics) {
    let kind_of = |i: usize, d: usize| -> ShiftKind {
        ShiftKind::ALL
            .into_iter()
            .find(|&kind| is_set(solution, index.var(i, d, kind)))
            .expect("invariant 1: exactly one shift kind is set per (employee, day)")
    };

    let schedules = (0..config.num_employees())
        .map(|i| {
            let mut shifts = Vec::with_capacity(config.num_days());
            let (mut day_count, mut night_count, mut offb_count, mut offr_count) = (0, 0, 0, 0);
            for d in 0..config.num_days() {
                let kind = kind_of(i, d);
                match kind {
                    ShiftKind::Day => day_count += 1,
                    ShiftKind::Night => night_count += 1,
                    ShiftKind::PostOff => offb_count += 1,
                    ShiftKind::Rest => offr_count += 1,
                }
                shifts.push(ShiftAssignment {
                    day: d as u32 + 1,
                    shift_type: kind.code(),
                    symbol: kind.symbol(),
                    name: kind_name(kind),
                });
            }
            EmployeeSchedule {
                name: config.employees[i].clone(),
                shifts,
                day_count,
                night_count,
                offb_count,
                offr_count,
            }
        })
        .collect();

    let daily_coverage = (0..config.num_days())
        .map(|d| {
            let day_workers = (0..config.num_employees())
                .filter(|&i| kind_of(i, d) == ShiftKind::Day)
                .count() as u32;
            let night_workers = (0..config.num_employees())
                .filter(|&i| kind_of(i, d) == ShiftKind::Night)
                .count() as u32;
            DailyCoverage {
                day: d as u32 + 1,
                day_workers,
                night_workers,
            }
        })
        .collect();

    (schedules, Statistics { daily_coverage })
}

fn is_set(solution: &Solution, var: VarId) -> bool {
    solution[var].as_int().unwrap_or(0) != 0
}

fn kind_name(kind: ShiftKind) -> &'static str {
    match kind {
        ShiftKind::Day => "Day",
        ShiftKind::Night => "Night",
        ShiftKind::PostOff => "PostOff",
        ShiftKind::Rest => "Rest",
    }
}
