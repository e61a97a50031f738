use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::TrendError;
use crate::template::reduce;
use crate::types::{MeasurementTuple, TemplateType, TrendDirection, TrendState, TrendVerdict};

pub const WINDOW: usize = 8;          // økter per vindu (siste 8 vs forrige 8)
pub const MIN_SESSIONS: usize = 16;   // min. gyldige økter før klassifisering
pub const IMPROVING_PCT: f64 = 10.0;  // > +10 % => improving
pub const DECLINING_PCT: f64 = -10.0; // < -10 % => declining
pub const DECIMALS: u32 = 1;
pub const MAX_DECIMALS: u32 = 15;     // 10^dp må holde seg endelig og eksakt
pub const FETCH_LIMIT: usize = 20;    // logger hentet fra lagring per forespørsel

// --- RoundTo trait (half-up, som Math.round) ---
pub trait RoundTo {
    fn round_to(self, dp: u32) -> f64;
}

impl RoundTo for f64 {
    #[inline]
    fn round_to(self, dp: u32) -> f64 {
        let factor = 10_f64.powi(dp as i32);
        let y = self * factor;
        // y - floor(y) er eksakt; `y + 0.5` ville runde 0.49999999999999994 opp
        let f = y.floor();
        let r = if y - f >= 0.5 { f + 1.0 } else { f };
        r / factor
    }
}

/// Terskler og vindusstørrelser for klassifiseringen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    pub window: usize,
    pub min_sessions: usize,
    pub improving_pct: f64,
    pub declining_pct: f64,
    pub decimals: u32,
    pub fetch_limit: usize,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            window: WINDOW,
            min_sessions: MIN_SESSIONS,
            improving_pct: IMPROVING_PCT,
            declining_pct: DECLINING_PCT,
            decimals: DECIMALS,
            fetch_limit: FETCH_LIMIT,
        }
    }
}

impl TrendConfig {
    pub fn validate(&self) -> Result<(), TrendError> {
        if self.window == 0 {
            return Err(TrendError::InvalidConfig("window must be > 0".into()));
        }
        if self.min_sessions < 2 * self.window {
            return Err(TrendError::InvalidConfig(format!(
                "min_sessions ({}) must cover two windows of {}",
                self.min_sessions, self.window
            )));
        }
        if !(self.improving_pct.is_finite() && self.declining_pct.is_finite())
            || self.declining_pct > self.improving_pct
        {
            return Err(TrendError::InvalidConfig(format!(
                "thresholds out of order: declining {} > improving {}",
                self.declining_pct, self.improving_pct
            )));
        }
        if self.decimals > MAX_DECIMALS {
            return Err(TrendError::InvalidConfig(format!(
                "decimals ({}) must be <= {}",
                self.decimals, MAX_DECIMALS
            )));
        }
        Ok(())
    }
}

fn mean(xs: &[f64]) -> f64 {
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Klassifiserer trend fra rå logger (nyeste først) med standard terskler.
pub fn classify(logs: &[MeasurementTuple], template: TemplateType) -> TrendVerdict {
    classify_with(logs, template, &TrendConfig::default())
}

pub fn classify_with(
    logs: &[MeasurementTuple],
    template: TemplateType,
    cfg: &TrendConfig,
) -> TrendVerdict {
    let derived: Vec<f64> = logs.iter().map(|m| reduce(template, m)).collect();
    classify_metrics(&derived, cfg)
}

/// Samme algoritme over allerede reduserte verdier (nyeste først).
///
/// Verdier `<= 0` (og NaN) regnes som manglende og filtreres bort før
/// vinduene bygges. Kun de `2 * window` nyeste gyldige verdiene brukes,
/// men `session_count` er alltid hele det gyldige antallet.
pub fn classify_metrics(derived: &[f64], cfg: &TrendConfig) -> TrendVerdict {
    let valid: Vec<f64> = derived.iter().copied().filter(|v| *v > 0.0).collect();
    let n = valid.len();

    if n < cfg.min_sessions || n < 2 * cfg.window {
        debug!("trend: insufficient data ({} of {} valid sessions)", n, cfg.min_sessions);
        return TrendVerdict::unclassified(TrendState::InsufficientData, n);
    }

    let (recent, rest) = valid.split_at(cfg.window);
    let previous = &rest[..cfg.window];
    verdict_from_windows(recent, previous, n, cfg)
}

fn verdict_from_windows(
    recent: &[f64],
    previous: &[f64],
    session_count: usize,
    cfg: &TrendConfig,
) -> TrendVerdict {
    let recent_avg = mean(recent);
    let previous_avg = mean(previous);

    // Baseline som vises som 0 (eller overløp) gir ingen meningsfull prosent
    if previous_avg == 0.0
        || previous_avg.round_to(cfg.decimals) == 0.0
        || !previous_avg.is_finite()
        || !recent_avg.is_finite()
    {
        debug!(
            "trend: degenerate baseline (recent={}, previous={})",
            recent_avg, previous_avg
        );
        return TrendVerdict::unclassified(TrendState::DegenerateBaseline, session_count);
    }

    let pct = (recent_avg - previous_avg) / previous_avg * 100.0;
    if !pct.is_finite() {
        return TrendVerdict::unclassified(TrendState::DegenerateBaseline, session_count);
    }

    let direction = if pct > cfg.improving_pct {
        TrendDirection::Improving
    } else if pct < cfg.declining_pct {
        TrendDirection::Declining
    } else {
        TrendDirection::Maintaining
    };

    TrendVerdict {
        direction: Some(direction),
        recent_avg: Some(recent_avg.round_to(cfg.decimals)),
        previous_avg: Some(previous_avg.round_to(cfg.decimals)),
        percent_change: Some(pct.round_to(cfg.decimals)),
        session_count,
        state: TrendState::Classified,
    }
}

/// Hvor mange flere gyldige økter som trengs før trenden kan vises.
pub fn remaining_sessions(verdict: &TrendVerdict, cfg: &TrendConfig) -> usize {
    cfg.min_sessions.saturating_sub(verdict.session_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(recent: f64, previous: f64) -> Vec<f64> {
        let mut v = vec![recent; WINDOW];
        v.extend(vec![previous; WINDOW]);
        v
    }

    #[test]
    fn round_to_is_half_up() {
        assert_eq!(123.456_f64.round_to(1), 123.5);
        assert_eq!(123.44_f64.round_to(1), 123.4);
        assert_eq!(2.25_f64.round_to(1), 2.3);
        assert_eq!((-2.25_f64).round_to(1), -2.2);
        assert_eq!(7.0_f64.round_to(0), 7.0);
        assert_eq!((-2.5_f64).round_to(0), -2.0);
        // største verdi under 0.5 skal ned, som Math.round
        assert_eq!(0.49999999999999994_f64.round_to(0), 0.0);
        assert_eq!(0.5_f64.round_to(0), 1.0);
    }

    #[test]
    fn zero_baseline_is_degenerate_not_insufficient() {
        let cfg = TrendConfig::default();
        let v = verdict_from_windows(&[5.0; WINDOW], &[0.0; WINDOW], 16, &cfg);
        assert_eq!(v.state, TrendState::DegenerateBaseline);
        assert_eq!(v.direction, None);
        assert_eq!(v.recent_avg, None);
        assert_eq!(v.previous_avg, None);
        assert_eq!(v.percent_change, None);
        assert_eq!(v.session_count, 16);
    }

    #[test]
    fn baseline_rounding_to_zero_is_degenerate() {
        let cfg = TrendConfig::default();
        let v = classify_metrics(&series(1.0, 0.04), &cfg);
        assert_eq!(v.state, TrendState::DegenerateBaseline);
        assert_eq!(v.previous_avg, None);

        // to desimaler: 0.04 vises som 0.04 og er en gyldig baseline
        let fine = TrendConfig { decimals: 2, ..TrendConfig::default() };
        let v = classify_metrics(&series(1.0, 0.04), &fine);
        assert_eq!(v.state, TrendState::Classified);
        assert_eq!(v.previous_avg, Some(0.04));
    }

    #[test]
    fn overflowing_windows_are_degenerate() {
        let v = classify_metrics(&series(f64::MAX, f64::MAX), &TrendConfig::default());
        assert_eq!(v.state, TrendState::DegenerateBaseline);
        assert_eq!(v.session_count, 16);
        assert!(v.direction.is_none());
    }

    #[test]
    fn thresholds_are_exclusive() {
        let cfg = TrendConfig::default();
        let up = classify_metrics(&series(110.0, 100.0), &cfg);
        assert_eq!(up.direction, Some(TrendDirection::Maintaining));
        assert_eq!(up.percent_change, Some(10.0));

        let down = classify_metrics(&series(90.0, 100.0), &cfg);
        assert_eq!(down.direction, Some(TrendDirection::Maintaining));
        assert_eq!(down.percent_change, Some(-10.0));

        let drop = classify_metrics(&series(89.0, 100.0), &cfg);
        assert_eq!(drop.direction, Some(TrendDirection::Declining));
        assert_eq!(drop.percent_change, Some(-11.0));
    }

    #[test]
    fn custom_config_moves_the_gate() {
        let cfg = TrendConfig {
            window: 2,
            min_sessions: 4,
            improving_pct: 5.0,
            declining_pct: -5.0,
            ..TrendConfig::default()
        };
        cfg.validate().unwrap();
        let v = classify_metrics(&[106.0, 106.0, 100.0, 100.0], &cfg);
        assert_eq!(v.direction, Some(TrendDirection::Improving));
        assert_eq!(v.percent_change, Some(6.0));
        assert_eq!(remaining_sessions(&v, &cfg), 0);
    }

    #[test]
    fn config_validation() {
        assert!(TrendConfig::default().validate().is_ok());
        let bad_window = TrendConfig { window: 0, ..TrendConfig::default() };
        assert!(bad_window.validate().is_err());
        let short_gate = TrendConfig { min_sessions: 10, ..TrendConfig::default() };
        assert!(short_gate.validate().is_err());
        let swapped = TrendConfig {
            improving_pct: -5.0,
            declining_pct: 5.0,
            ..TrendConfig::default()
        };
        assert!(swapped.validate().is_err());
        let too_precise = TrendConfig { decimals: 400, ..TrendConfig::default() };
        assert!(matches!(too_precise.validate(), Err(TrendError::InvalidConfig(_))));
        let max_precise = TrendConfig { decimals: MAX_DECIMALS, ..TrendConfig::default() };
        assert!(max_precise.validate().is_ok());
    }

    #[test]
    fn remaining_counts_down_to_zero() {
        let cfg = TrendConfig::default();
        let v = classify_metrics(&[1.0; 11], &cfg);
        assert_eq!(remaining_sessions(&v, &cfg), 5);
        let v = classify_metrics(&[1.0; 20], &cfg);
        assert_eq!(remaining_sessions(&v, &cfg), 0);
    }
}
