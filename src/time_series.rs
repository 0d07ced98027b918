#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSeriesPoint {
    pub t: f64,
    pub wpm: f64,
}

impl TimeSeriesPoint {
    pub fn new(t: f64, wpm: f64) -> Self {
        Self { t, wpm }
    }
}

impl From<(f64, f64)> for TimeSeriesPoint {
    fn from(v: (f64, f64)) -> Self {
        TimeSeriesPoint { t: v.0, wpm: v.1 }
    }
}

impl From<TimeSeriesPoint> for (f64, f64) {
    fn from(p: TimeSeriesPoint) -> Self {
        (p.t, p.wpm)
    }
}

/// Wpm-over-time samples collected by the view layer once per tick while
/// a session runs. Display-only; the session itself keeps counters.
#[derive(Debug, Clone, Default)]
pub struct WpmSeries {
    points: Vec<TimeSeriesPoint>,
}

impl WpmSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a sample; a repeated timestamp overwrites the previous
    /// sample so the series stays strictly increasing in `t`.
    pub fn record(&mut self, t: f64, wpm: f64) {
        if let Some(last) = self.points.last_mut() {
            if last.t == t {
                last.wpm = wpm;
                return;
            }
        }
        self.points.push(TimeSeriesPoint::new(t, wpm));
    }

    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.points
    }

    pub fn as_tuples(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.t, p.wpm)).collect()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
