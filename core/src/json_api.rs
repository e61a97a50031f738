use serde::Deserialize;
use serde_json::json;
use serde_path_to_error as spte;

use crate::error::TrendError;
use crate::template::reduce_raw;
use crate::trend::{classify_metrics, TrendConfig};
use crate::types::MeasurementTuple;

#[derive(Debug, Deserialize)]
pub struct TrendRequest {
    // Holdes som streng: ukjent mal skal degradere til 0, ikke feile
    pub template_type: String,
    #[serde(default)]
    pub logs: Vec<MeasurementTuple>,
    #[serde(default)]
    pub config: Option<TrendConfig>,
}

#[derive(Debug, Deserialize)]
struct ReduceRequest {
    template_type: String,
    #[serde(flatten)]
    metrics: MeasurementTuple,
}

fn parse<'de, T: Deserialize<'de>>(json_in: &'de str, context: &'static str) -> Result<T, TrendError> {
    let mut de = serde_json::Deserializer::from_str(json_in);
    spte::deserialize(&mut de).map_err(|e| TrendError::Parse {
        context,
        path: e.path().to_string(),
        message: e.inner().to_string(),
    })
}

pub fn parse_trend_request(json_in: &str) -> Result<TrendRequest, TrendError> {
    parse(json_in, "TrendRequest")
}

/// JSON inn → TrendVerdict som JSON ut.
pub fn classify_trend_json(json_in: &str) -> Result<String, TrendError> {
    let req = parse_trend_request(json_in)?;
    let cfg = req.config.unwrap_or_default();
    cfg.validate()?;

    let derived: Vec<f64> = req
        .logs
        .iter()
        .map(|m| reduce_raw(&req.template_type, m))
        .collect();
    let verdict = classify_metrics(&derived, &cfg);
    Ok(serde_json::to_string(&verdict)?)
}

/// `{ "template_type": ..., "metric_1": ... }` → `{ "template_type": ..., "value": ... }`
pub fn reduce_metric_json(json_in: &str) -> Result<String, TrendError> {
    let req: ReduceRequest = parse(json_in, "ReduceRequest")?;
    let value = reduce_raw(&req.template_type, &req.metrics);
    Ok(json!({ "template_type": req.template_type, "value": value }).to_string())
}
