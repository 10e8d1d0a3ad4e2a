//! Hard constraints (assignment feasibility) and the soft fairness objective.
//!
//! Hard constraints are posted unconditionally; a model that violates any of
//! them has no solution. The soft terms are summed into a single objective
//! variable handed to [`crate::solver`] for minimization.

use selen::prelude::*;

use crate::domain::{Config, ShiftKind};
use crate::error::ScheduleError;
use crate::model::VariableModel;

/// Cross-employee max/min of Day and Night totals, shared between the hard
/// balance bound (§4.4-8) and the soft imbalance terms (T2).
pub struct FairnessVars {
    pub max_day: VarId,
    pub min_day: VarId,
    pub max_night: VarId,
    pub min_night: VarId,
}

fn internal(context: &'static str) -> impl FnOnce(SolverError) -> ScheduleError {
    move |e| ScheduleError::Internal(format!("{context}: {e}"))
}

/// Posts every hard constraint in §4.4 and returns the fairness summaries
/// needed again by [`post_soft_objective`].
pub fn post_hard_constraints(
    vm: &mut VariableModel,
    config: &Config,
) -> Result<FairnessVars, ScheduleError> {
    let n = vm.num_employees();
    let d_count = vm.num_days();

    // 1. Unique assignment per (employee, day).
    for i in 0..n {
        for d in 0..d_count {
            let vars = vm.day_vars(i, d);
            let total = vm.model.sum(&vars);
            vm.model.new(total.eq(1));
        }
    }

    // 2. Work/rest totals per employee.
    let mut day_counts = Vec::with_capacity(n);
    let mut night_counts = Vec::with_capacity(n);
    for i in 0..n {
        let working: Vec<VarId> = (0..d_count)
            .flat_map(|d| {
                [
                    vm.var(i, d, ShiftKind::Day),
                    vm.var(i, d, ShiftKind::Night),
                    vm.var(i, d, ShiftKind::PostOff),
                ]
            })
            .collect();
        let resting: Vec<VarId> = (0..d_count).map(|d| vm.var(i, d, ShiftKind::Rest)).collect();
        let work_total = vm.model.sum(&working);
        let rest_total = vm.model.sum(&resting);
        vm.model.new(work_total.eq(config.work_days as i32));
        vm.model.new(rest_total.eq(config.rest_days as i32));

        let days: Vec<VarId> = (0..d_count).map(|d| vm.var(i, d, ShiftKind::Day)).collect();
        let nights: Vec<VarId> = (0..d_count).map(|d| vm.var(i, d, ShiftKind::Night)).collect();
        day_counts.push(vm.model.sum(&days));
        night_counts.push(vm.model.sum(&nights));
    }

    // 3. Night on day d forces PostOff on day d+1 (every d, including d=0).
    for i in 0..n {
        for d in 0..d_count.saturating_sub(1) {
            let n_cur = vm.var(i, d, ShiftKind::Night);
            let b_next = vm.var(i, d + 1, ShiftKind::PostOff);
            vm.model.new(b_next.ge(n_cur));
        }
    }

    // 4. PostOff only ever follows a Night; day 0 can never be a PostOff.
    for i in 0..n {
        let b0 = vm.var(i, 0, ShiftKind::PostOff);
        vm.model.new(b0.eq(0));
        for d in 1..d_count {
            let b = vm.var(i, d, ShiftKind::PostOff);
            let n_prev = vm.var(i, d - 1, ShiftKind::Night);
            vm.model.new(b.le(n_prev));
        }
    }

    // 5. Six-day work cap: every 7-day window has at most 6 working days.
    if d_count >= 7 {
        for i in 0..n {
            for start in 0..=(d_count - 7) {
                let window: Vec<VarId> = (start..start + 7)
                    .flat_map(|d| {
                        [
                            vm.var(i, d, ShiftKind::Day),
                            vm.var(i, d, ShiftKind::Night),
                            vm.var(i, d, ShiftKind::PostOff),
                        ]
                    })
                    .collect();
                let total = vm.model.sum(&window);
                vm.model.new(total.le(6));
            }
        }
    }

    // 6. Daily coverage floor.
    for d in 0..d_count {
        let day_workers: Vec<VarId> = (0..n).map(|i| vm.var(i, d, ShiftKind::Day)).collect();
        let night_workers: Vec<VarId> = (0..n).map(|i| vm.var(i, d, ShiftKind::Night)).collect();
        let day_total = vm.model.sum(&day_workers);
        let night_total = vm.model.sum(&night_workers);
        vm.model.new(day_total.ge(1));
        vm.model.new(night_total.ge(1));
    }

    // 7. Pinned assignments.
    for pin in &config.pinned {
        let var = vm.var(pin.employee_index, pin.day_index, pin.kind);
        vm.model.new(var.eq(1));
    }

    // 8. Fairness bounds (hard): spread of Day/Night totals across employees is <= 2.
    let max_day = vm
        .model
        .max(&day_counts)
        .map_err(internal("computing max day count"))?;
    let min_day = vm
        .model
        .min(&day_counts)
        .map_err(internal("computing min day count"))?;
    let max_night = vm
        .model
        .max(&night_counts)
        .map_err(internal("computing max night count"))?;
    let min_night = vm
        .model
        .min(&night_counts)
        .map_err(internal("computing min night count"))?;
    vm.model.new(max_day.sub(min_day).le(2));
    vm.model.new(max_night.sub(min_night).le(2));

    Ok(FairnessVars {
        max_day,
        min_day,
        max_night,
        min_night,
    })
}

/// Builds the weighted soft objective (§4.5) and returns the variable to minimize.
pub fn post_soft_objective(
    vm: &mut VariableModel,
    fairness: &FairnessVars,
) -> Result<VarId, ScheduleError> {
    let n = vm.num_employees();
    let d_count = vm.num_days();

    // T1: night_deficit[d] = max(0, day_cnt_day - night_cnt_day).
    let zero = vm.model.int(0, 0);
    let mut deficits = Vec::with_capacity(d_count);
    for d in 0..d_count {
        let day_workers: Vec<VarId> = (0..n).map(|i| vm.var(i, d, ShiftKind::Day)).collect();
        let night_workers: Vec<VarId> = (0..n).map(|i| vm.var(i, d, ShiftKind::Night)).collect();
        let day_total = vm.model.sum(&day_workers);
        let night_total = vm.model.sum(&night_workers);
        let diff = vm.model.sub(day_total, night_total);
        let deficit = vm
            .model
            .max(&[diff, zero])
            .map_err(internal("computing night deficit"))?;
        deficits.push(deficit);
    }
    let t1 = vm.model.sum(&deficits);

    // T2: day_imbalance + night_imbalance.
    let day_imbalance = vm.model.sub(fairness.max_day, fairness.min_day);
    let night_imbalance = vm.model.sub(fairness.max_night, fairness.min_night);
    let t2 = vm.model.sum(&[day_imbalance, night_imbalance]);

    // T3: consec5[i,d], reified indicator that a 5-day window is all working days.
    let mut consec5_vars = Vec::new();
    if d_count >= 5 {
        let five = vm.model.int(5, 5);
        for i in 0..n {
            for start in 0..=(d_count - 5) {
                let window: Vec<VarId> = (start..start + 5)
                    .flat_map(|d| {
                        [
                            vm.var(i, d, ShiftKind::Day),
                            vm.var(i, d, ShiftKind::Night),
                            vm.var(i, d, ShiftKind::PostOff),
                        ]
                    })
                    .collect();
                let total = vm.model.sum(&window);
                let consec5 = vm.model.bool();
                vm.model.int_eq_reif(total, five, consec5);
                consec5_vars.push(consec5);
            }
        }
    }
    let t3 = vm.model.sum(&consec5_vars);

    // T4: b_then_r[i,d], rewarded when a PostOff chains into a true rest day.
    let mut b_then_r_vars = Vec::new();
    for i in 0..n {
        for d in 0..d_count.saturating_sub(1) {
            let b = vm.var(i, d, ShiftKind::PostOff);
            let r_next = vm.var(i, d + 1, ShiftKind::Rest);
            b_then_r_vars.push(vm.model.bool_and(&[b, r_next]));
        }
    }
    let t4 = vm.model.sum(&b_then_r_vars);

    let w1 = vm.model.int(500, 500);
    let w2 = vm.model.int(200, 200);
    let w3 = vm.model.int(100, 100);
    let w4 = vm.model.int(50, 50);

    let term1 = vm.model.mul(t1, w1);
    let term2 = vm.model.mul(t2, w2);
    let term3 = vm.model.mul(t3, w3);
    let term4 = vm.model.mul(t4, w4);

    let rewards_subtracted = vm.model.sub(term1, term4);
    Ok(vm.model.sum(&[rewards_subtracted, term2, term3]))
}
