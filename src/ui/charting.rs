use crate::time_series::TimeSeriesPoint;

/// Compute X (seconds) and Y (WPM) bounds for the results chart
pub fn compute_chart_params(points: &[TimeSeriesPoint]) -> (f64, f64) {
    let mut highest_wpm = 0.0;
    for p in points {
        if p.wpm > highest_wpm {
            highest_wpm = p.wpm;
        }
    }

    let mut overall_duration = match points.last() {
        Some(p) => p.t,
        None => 1.0,
    };
    if overall_duration < 1.0 {
        overall_duration = 1.0;
    }

    (overall_duration, highest_wpm.round())
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}
