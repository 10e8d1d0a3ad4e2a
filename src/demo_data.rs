//! Deterministic synthetic rosters (C9) for manual exploration, the demo-data
//! HTTP endpoints, and benchmarking. Seeded so repeated calls are reproducible.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::api::{FixedShiftDto, ScheduleRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoData {
    Small,
    Large,
}

impl std::str::FromStr for DemoData {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SMALL" => Ok(DemoData::Small),
            "LARGE" => Ok(DemoData::Large),
            _ => Err(()),
        }
    }
}

impl DemoData {
    pub fn as_str(&self) -> &'static str {
        match self {
            DemoData::Small => "SMALL",
            DemoData::Large => "LARGE",
        }
    }
}

pub fn list_demo_data() -> Vec<&'static str> {
    vec![DemoData::Small.as_str(), DemoData::Large.as_str()]
}

const NAME_POOL: &[&str] = &[
    "Min-jun", "Seo-yeon", "Do-yoon", "Ha-eun", "Ji-ho", "Yu-na", "Tae-yang", "Soo-bin",
    "Eun-woo", "Chae-won", "Joon-ho", "Na-eun",
];

/// Generates a ready-made `ScheduleRequest` for the given preset, seeded so
/// repeated calls in tests and examples are reproducible.
pub fn generate(demo: DemoData) -> ScheduleRequest {
    match demo {
        DemoData::Small => {
            let mut rng = StdRng::seed_from_u64(1);
            let mut names: Vec<String> = NAME_POOL.iter().map(|s| s.to_string()).collect();
            names.shuffle(&mut rng);
            names.truncate(5);

            ScheduleRequest {
                year: 2025,
                month: 1,
                employees: names,
                work_days: Some(20),
                fixed_shifts: vec![],
            }
        }
        DemoData::Large => {
            let mut rng = StdRng::seed_from_u64(2);
            let mut names: Vec<String> = NAME_POOL.iter().map(|s| s.to_string()).collect();
            names.shuffle(&mut rng);
            names.truncate(10);

            ScheduleRequest {
                year: 2025,
                month: 3,
                employees: names,
                work_days: Some(22),
                fixed_shifts: vec![
                    FixedShiftDto {
                        employee_idx: 0,
                        day: 0,
                        shift_type: 0,
                    },
                    FixedShiftDto {
                        employee_idx: 1,
                        day: 4,
                        shift_type: 1,
                    },
                ],
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_preset_is_deterministic() {
        let a = generate(DemoData::Small);
        let b = generate(DemoData::Small);
        assert_eq!(a.employees, b.employees);
        assert_eq!(a.year, b.year);
        assert_eq!(a.month, b.month);
    }

    #[test]
    fn large_preset_is_deterministic() {
        let a = generate(DemoData::Large);
        let b = generate(DemoData::Large);
        assert_eq!(a.employees, b.employees);
    }

    #[test]
    fn small_preset_satisfies_config_validation() {
        let request = generate(DemoData::Small);
        assert!(request.into_config().is_ok());
    }

    #[test]
    fn large_preset_satisfies_config_validation() {
        let request = generate(DemoData::Large);
        assert!(request.into_config().is_ok());
    }

    #[test]
    fn large_preset_has_ten_employees() {
        let request = generate(DemoData::Large);
        assert_eq!(request.employees.len(), 10);
    }

    #[test]
    fn demo_data_from_str() {
        assert_eq!("SMALL".parse::<DemoData>(), Ok(DemoData::Small));
        assert_eq!("small".parse::<DemoData>(), Ok(DemoData::Small));
        assert_eq!("LARGE".parse::<DemoData>(), Ok(DemoData::Large));
        assert!("invalid".parse::<DemoData>().is_err());
    }
}
