use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TrendError;

/// Malen en øvelse logges etter. Styrer både feltbetydning og reduksjon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateType {
    Strength,
    Cardio,
    CardioMachine,
    Timed,
    Bodyweight,
}

impl TemplateType {
    pub const ALL: [TemplateType; 5] = [
        TemplateType::Strength,
        TemplateType::Cardio,
        TemplateType::CardioMachine,
        TemplateType::Timed,
        TemplateType::Bodyweight,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateType::Strength => "strength",
            TemplateType::Cardio => "cardio",
            TemplateType::CardioMachine => "cardio_machine",
            TemplateType::Timed => "timed",
            TemplateType::Bodyweight => "bodyweight",
        }
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateType {
    type Err = TrendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| TrendError::UnknownTemplate(s.to_string()))
    }
}

/// Rå måling for én økt. Betydningen av feltene avhenger av malen
/// (strength: vekt, reps, sett).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MeasurementTuple {
    #[serde(default)]
    pub metric_1: Option<f64>,
    #[serde(default)]
    pub metric_2: Option<f64>,
    #[serde(default)]
    pub metric_3: Option<f64>,
    #[serde(default)]
    pub metric_4: Option<f64>,
}

impl MeasurementTuple {
    pub fn new(
        metric_1: Option<f64>,
        metric_2: Option<f64>,
        metric_3: Option<f64>,
        metric_4: Option<f64>,
    ) -> Self {
        Self { metric_1, metric_2, metric_3, metric_4 }
    }

    /// Felt som mangler teller som 0 i reduksjonen.
    pub(crate) fn m1(&self) -> f64 { self.metric_1.unwrap_or(0.0) }
    pub(crate) fn m2(&self) -> f64 { self.metric_2.unwrap_or(0.0) }
    pub(crate) fn m3(&self) -> f64 { self.metric_3.unwrap_or(0.0) }
    pub(crate) fn m4(&self) -> f64 { self.metric_4.unwrap_or(0.0) }
}

/// En lagret logg-rad slik lagringslaget holder den.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub exercise_id: u64,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub metrics: MeasurementTuple,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Improving,
    Maintaining,
    Declining,
}

/// De tre observerbare tilstandene til en trend-vurdering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendState {
    InsufficientData,
    DegenerateBaseline,
    Classified,
}

impl TrendState {
    pub fn as_str(self) -> &'static str {
        match self {
            TrendState::InsufficientData => "insufficient_data",
            TrendState::DegenerateBaseline => "degenerate_baseline",
            TrendState::Classified => "classified",
        }
    }
}

/// Resultatet av trend-klassifiseringen.
///
/// `direction` er `Some` kun når `state == Classified`, og da er begge
/// snittene og `percent_change` satt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendVerdict {
    pub direction: Option<TrendDirection>,
    pub recent_avg: Option<f64>,
    pub previous_avg: Option<f64>,
    pub percent_change: Option<f64>,
    pub session_count: usize,
    pub state: TrendState,
}

impl TrendVerdict {
    pub(crate) fn unclassified(state: TrendState, session_count: usize) -> Self {
        Self {
            direction: None,
            recent_avg: None,
            previous_avg: None,
            percent_change: None,
            session_count,
            state,
        }
    }

    pub fn is_classified(&self) -> bool {
        self.state == TrendState::Classified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_type_roundtrips_wire_names() {
        for t in TemplateType::ALL {
            assert_eq!(t.as_str().parse::<TemplateType>().unwrap(), t);
            let js = serde_json::to_string(&t).unwrap();
            assert_eq!(js, format!("\"{}\"", t.as_str()));
        }
        assert!("yoga".parse::<TemplateType>().is_err());
    }

    #[test]
    fn verdict_serializes_null_direction() {
        let v = TrendVerdict::unclassified(TrendState::InsufficientData, 3);
        let js = serde_json::to_value(&v).unwrap();
        assert!(js["direction"].is_null());
        assert!(js["recent_avg"].is_null());
        assert_eq!(js["session_count"], 3);
        assert_eq!(js["state"], "insufficient_data");
    }

    #[test]
    fn measurement_tuple_accepts_missing_fields() {
        let t: MeasurementTuple = serde_json::from_str(r#"{"metric_1": 5.0}"#).unwrap();
        assert_eq!(t.metric_1, Some(5.0));
        assert_eq!(t.metric_4, None);
        assert_eq!(t.m4(), 0.0);
    }
}
