// Power curve domain model - plot-ready projection of a sample series
use super::sample::PowerSample;

pub const CHART_TITLE: &str = "Power Curve";
pub const SERIES_NAME: &str = "Power over Wind Speed";
pub const X_AXIS_LABEL: &str = "Wind Speed (m/s)";
pub const Y_AXIS_LABEL: &str = "Power (kW)";

/// A plot specification: the sample sequence unchanged, wrapped in
/// presentation metadata. No aggregation, binning, sorting, or curve
/// fitting happens here.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerCurve {
    pub title: &'static str,
    pub series_name: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub points: Vec<(f64, f64)>,
}

impl PowerCurve {
    pub fn project(samples: &[PowerSample]) -> Self {
        Self {
            title: CHART_TITLE,
            series_name: SERIES_NAME,
            x_label: X_AXIS_LABEL,
            y_label: Y_AXIS_LABEL,
            points: samples.iter().map(|s| (s.wind_speed, s.power)).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Axis bounds covering the data extents, padded so edge points do
    /// not sit on the frame.
    pub fn x_bounds(&self) -> [f64; 2] {
        Self::padded_bounds(self.points.iter().map(|p| p.0))
    }

    pub fn y_bounds(&self) -> [f64; 2] {
        Self::padded_bounds(self.points.iter().map(|p| p.1))
    }

    fn padded_bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
        let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        if min > max {
            return [0.0, 1.0];
        }
        let padding = ((max - min) * 0.05).max(0.5);
        [min - padding, max + padding]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(wind_speed: f64, power: f64) -> PowerSample {
        PowerSample { wind_speed, power }
    }

    #[test]
    fn test_project_preserves_order_and_values() {
        let curve = PowerCurve::project(&[sample(0.0, 0.0), sample(10.5, 2500.0)]);
        assert_eq!(curve.points, vec![(0.0, 0.0), (10.5, 2500.0)]);
    }

    #[test]
    fn test_project_carries_presentation_metadata() {
        let curve = PowerCurve::project(&[]);
        assert!(curve.is_empty());
        assert_eq!(curve.title, "Power Curve");
        assert_eq!(curve.series_name, "Power over Wind Speed");
        assert_eq!(curve.x_label, "Wind Speed (m/s)");
        assert_eq!(curve.y_label, "Power (kW)");
    }

    #[test]
    fn test_bounds_cover_data_extents() {
        let curve = PowerCurve::project(&[sample(3.0, 100.0), sample(12.0, 1800.0)]);
        let [x_min, x_max] = curve.x_bounds();
        assert!(x_min < 3.0 && x_max > 12.0);
        let [y_min, y_max] = curve.y_bounds();
        assert!(y_min < 100.0 && y_max > 1800.0);
    }
}
