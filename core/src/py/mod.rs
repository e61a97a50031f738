use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use crate::json_api::{classify_trend_json, reduce_metric_json};
use crate::template::reduce_raw;
use crate::types::MeasurementTuple;

// ──────────────────────────────────────────────────────────────────────────────
// PyO3-FUNKSJONER: JSON inn, JSON ut
// ──────────────────────────────────────────────────────────────────────────────

#[pyfunction]
fn classify_trend(json_in: &str) -> PyResult<String> {
    classify_trend_json(json_in).map_err(|e| PyValueError::new_err(e.to_string()))
}

#[pyfunction]
fn reduce_metric_from_json(json_in: &str) -> PyResult<String> {
    reduce_metric_json(json_in).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Direkte variant uten JSON: (mal, m1, m2, m3, m4) -> verdi
#[pyfunction]
#[pyo3(signature = (template_type, metric_1=None, metric_2=None, metric_3=None, metric_4=None))]
fn reduce_metric(
    template_type: &str,
    metric_1: Option<f64>,
    metric_2: Option<f64>,
    metric_3: Option<f64>,
    metric_4: Option<f64>,
) -> f64 {
    reduce_raw(
        template_type,
        &MeasurementTuple::new(metric_1, metric_2, metric_3, metric_4),
    )
}

// ──────────────────────────────────────────────────────────────────────────────
// PyO3-MODUL
// ──────────────────────────────────────────────────────────────────────────────

#[pymodule]
fn gymtrend_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(classify_trend, m)?)?;
    m.add_function(wrap_pyfunction!(reduce_metric_from_json, m)?)?;
    m.add_function(wrap_pyfunction!(reduce_metric, m)?)?;
    Ok(())
}
