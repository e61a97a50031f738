use gymtrend_core::json_api::classify_trend_json;
use serde_json::json;

#[test]
fn smoke_cardio_machine_calories() {
    // 16 økter, nyeste først: 8 × 330 kcal, så 8 × 300 kcal
    let logs: Vec<_> = (0..16).map(|i| json!({
        "metric_1": 8, "metric_2": 2, "metric_3": 1800,
        "metric_4": if i < 8 { 330.0 } else { 300.0 }
    })).collect();

    let body = json!({ "template_type": "cardio_machine", "logs": logs });
    let out = classify_trend_json(&body.to_string()).unwrap();

    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["direction"], "maintaining");
    assert_eq!(v["recent_avg"], 330.0);
    assert_eq!(v["previous_avg"], 300.0);
    assert_eq!(v["percent_change"], 10.0);
    assert_eq!(v["session_count"], 16);
    assert_eq!(v["state"], "classified");
}

#[test]
fn smoke_null_metrics_are_missing() {
    let logs: Vec<_> = (0..16).map(|_| json!({
        "metric_1": null, "metric_2": 10, "metric_3": 3, "metric_4": null
    })).collect();

    let body = json!({ "template_type": "strength", "logs": logs });
    let v: serde_json::Value =
        serde_json::from_str(&classify_trend_json(&body.to_string()).unwrap()).unwrap();
    assert!(v["direction"].is_null());
    assert!(v["percent_change"].is_null());
    assert_eq!(v["session_count"], 0);
}
