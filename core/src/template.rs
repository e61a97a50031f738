use crate::types::{MeasurementTuple, TemplateType};

/// Reduserer en rå måling til én sammenlignbar verdi for økten.
///
/// Fast policy-tabell (felt som mangler teller som 0):
/// - strength: vekt × reps × sett (totalvolum)
/// - bodyweight: reps × sett (totale reps)
/// - cardio: distanse (metric_1)
/// - cardio_machine: kalorier (metric_4, ikke nivå/stigning/varighet)
/// - timed: varighet (metric_1)
pub fn reduce(template: TemplateType, m: &MeasurementTuple) -> f64 {
    match template {
        TemplateType::Strength => m.m1() * m.m2() * m.m3(),
        TemplateType::Bodyweight => m.m1() * m.m2(),
        TemplateType::Cardio => m.m1(),
        TemplateType::CardioMachine => m.m4(),
        TemplateType::Timed => m.m1(),
    }
}

/// Streng-basert inngang. Ukjent mal gir 0, aldri feil.
pub fn reduce_raw(template: &str, m: &MeasurementTuple) -> f64 {
    match template.parse::<TemplateType>() {
        Ok(t) => reduce(t, m),
        Err(_) => 0.0,
    }
}

/// Feltetiketter per mal (None = feltet brukes ikke).
pub fn field_labels(template: TemplateType) -> [Option<&'static str>; 4] {
    match template {
        TemplateType::Strength => [Some("Weight (lbs)"), Some("Reps"), Some("Sets"), None],
        TemplateType::Cardio => [Some("Distance (mi)"), Some("Duration (min)"), None, None],
        TemplateType::CardioMachine => [
            Some("Level"),
            Some("Incline"),
            Some("Duration (min)"),
            Some("Calories"),
        ],
        TemplateType::Timed => [Some("Duration (sec)"), None, None, None],
        TemplateType::Bodyweight => [Some("Reps"), Some("Sets"), None, None],
    }
}

/// Navnet på verdien trenden følger for malen.
pub fn trend_metric_name(template: TemplateType) -> &'static str {
    match template {
        TemplateType::Strength => "total volume",
        TemplateType::Bodyweight => "total reps",
        TemplateType::Cardio => "distance",
        TemplateType::CardioMachine => "calories",
        TemplateType::Timed => "duration",
    }
}

/// Sekunder → "M:SS". Manglende/0 gir "0:00".
pub fn format_duration(seconds: Option<f64>) -> String {
    let secs = match seconds {
        Some(s) if s > 0.0 && s.is_finite() => s.floor() as u64,
        _ => return "0:00".to_string(),
    };
    format!("{}:{:02}", secs / 60, secs % 60)
}

fn num(x: Option<f64>) -> String {
    // 100.0 -> "100", 2.5 -> "2.5"
    let v = x.unwrap_or(0.0);
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

fn present(x: Option<f64>) -> Option<f64> {
    x.filter(|v| *v != 0.0)
}

/// Visningstekst for én logg.
pub fn format_metrics(template: TemplateType, m: &MeasurementTuple) -> String {
    match template {
        TemplateType::Strength => format!(
            "{} lbs × {} reps × {} sets",
            num(m.metric_1),
            num(m.metric_2),
            num(m.metric_3)
        ),
        TemplateType::Cardio => {
            format!("{} miles in {}", num(m.metric_1), format_duration(m.metric_2))
        }
        TemplateType::CardioMachine => {
            let mut parts = Vec::new();
            if let Some(v) = present(m.metric_1) {
                parts.push(format!("Level {}", num(Some(v))));
            }
            if let Some(v) = present(m.metric_2) {
                parts.push(format!("Incline {}", num(Some(v))));
            }
            if let Some(v) = present(m.metric_3) {
                parts.push(format_duration(Some(v)));
            }
            if let Some(v) = present(m.metric_4) {
                parts.push(format!("{} cal", num(Some(v))));
            }
            parts.join(", ")
        }
        TemplateType::Timed => format_duration(m.metric_1),
        TemplateType::Bodyweight => {
            format!("{} reps × {} sets", num(m.metric_1), num(m.metric_2))
        }
    }
}

/// Formatterer et trend-snitt med enhet for malen.
pub fn format_trend_metric(template: TemplateType, value: Option<f64>) -> String {
    let Some(v) = value else {
        return "n/a".to_string();
    };
    match template {
        TemplateType::Strength => format!("{} lbs", num(Some(v))),
        TemplateType::Bodyweight => format!("{} reps", num(Some(v))),
        TemplateType::Cardio => format!("{} mi", num(Some(v))),
        TemplateType::CardioMachine => format!("{} cal", num(Some(v))),
        TemplateType::Timed => format_duration(Some(v)),
    }
}
