//! Typed error hierarchy shared by the solver core and the HTTP surface.
//!
//! The core never touches HTTP status codes; only the `IntoResponse` impl
//! at the bottom of this file knows about them.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Advisory shown to a caller when the hard constraint set has no solution.
/// Matches the tone of the collaborating system this core was extracted from.
pub const INFEASIBLE_ADVISORY: &str = "⚠️ 경고: 설정된 제약 조건이 너무 강력하여 모든 필수 조건을 만족하는 근무표를 생성할 수 없습니다. 최소한의 필수 조건을 제외한 일부 제약 조건(예: 4일 초과 근무 피하기, 휴무 균등 분포 등)을 완화하거나 인원수와 근무-휴일 비율을 조정해야 합니다.";

/// Error taxonomy for the scheduling core.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no schedule satisfies the hard constraints: {0}")]
    Infeasible(String),

    #[error("solver deadline reached before a feasible schedule was found: {0}")]
    Timeout(String),

    #[error("internal solver error: {0}")]
    Internal(String),
}

impl ScheduleError {
    /// User-facing advisory text, present only for the two "no usable answer" kinds.
    pub fn advisory(&self) -> Option<&'static str> {
        match self {
            ScheduleError::Infeasible(_) | ScheduleError::Timeout(_) => Some(INFEASIBLE_ADVISORY),
            ScheduleError::InvalidInput(_) | ScheduleError::Internal(_) => None,
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ScheduleError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ScheduleError::Infeasible(_) | ScheduleError::Timeout(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ScheduleError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    advisory: Option<&'static str>,
}

impl IntoResponse for ScheduleError {
    fn into_response(self) -> Response {
        match &self {
            ScheduleError::Infeasible(_) | ScheduleError::Timeout(_) => {
                tracing::warn!(error = %self, "request could not be satisfied");
            }
            ScheduleError::Internal(_) => {
                tracing::error!(error = %self, "internal solver failure");
            }
            ScheduleError::InvalidInput(_) => {}
        }
        let status = self.status();
        let body = ErrorBody {
            error: self.to_string(),
            advisory: self.advisory(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_maps_to_bad_request() {
        assert_eq!(
            ScheduleError::InvalidInput("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn infeasible_and_timeout_map_to_unprocessable() {
        assert_eq!(
            ScheduleError::Infeasible("x".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ScheduleError::Timeout("x".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn internal_maps_to_500() {
        assert_eq!(
            ScheduleError::Internal("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn only_infeasible_kinds_carry_an_advisory() {
        assert!(ScheduleError::Infeasible("x".into()).advisory().is_some());
        assert!(ScheduleError::Timeout("x".into()).advisory().is_some());
        assert!(ScheduleError::InvalidInput("x".into()).advisory().is_none());
        assert!(ScheduleError::Internal("x".into()).advisory().is_none());
    }
}
