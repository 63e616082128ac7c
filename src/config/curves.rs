//! 0-100 scoring curves for the composite index.
//!
//! Breakpoints are business rules, so they live here as data rather than
//! as branches in the scorer. Every curve output is clamped to [0, 100].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoreCurve {
    /// `score_at_pivot + slope * (value - pivot)`.
    Linear {
        pivot: f64,
        score_at_pivot: f64,
        slope: f64,
    },
    /// `100 - |value - target| * penalty`.
    TargetDistance { target: f64, penalty: f64 },
    /// Linear interpolation between `(value, score)` breakpoints, flat
    /// beyond the first and last point.
    Piecewise { points: Vec<(f64, f64)> },
}

impl ScoreCurve {
    pub fn evaluate(&self, value: f64) -> f64 {
        let raw = match self {
            ScoreCurve::Linear {
                pivot,
                score_at_pivot,
                slope,
            } => score_at_pivot + slope * (value - pivot),
            ScoreCurve::TargetDistance { target, penalty } => {
                100.0 - (value - target).abs() * penalty
            }
            ScoreCurve::Piecewise { points } => interpolate(points, value),
        };
        raw.clamp(0.0, 100.0)
    }

    pub fn validate(&self) -> Result<(), String> {
        match self {
            ScoreCurve::Linear {
                pivot,
                score_at_pivot,
                slope,
            } => {
                if [pivot, score_at_pivot, slope].iter().any(|v| !v.is_finite()) {
                    return Err("linear curve parameters must be finite".to_string());
                }
            }
            ScoreCurve::TargetDistance { target, penalty } => {
                if !target.is_finite() || !penalty.is_finite() || *penalty < 0.0 {
                    return Err("target curve needs a finite target and non-negative penalty".to_string());
                }
            }
            ScoreCurve::Piecewise { points } => {
                if points.len() < 2 {
                    return Err("piecewise curve needs at least two breakpoints".to_string());
                }
                if points
                    .iter()
                    .any(|(x, y)| !x.is_finite() || !(0.0..=100.0).contains(y))
                {
                    return Err("breakpoints must be finite with scores in [0, 100]".to_string());
                }
                if points.windows(2).any(|w| w[1].0 <= w[0].0) {
                    return Err("breakpoints must be strictly increasing".to_string());
                }
            }
        }
        Ok(())
    }
}

fn interpolate(points: &[(f64, f64)], value: f64) -> f64 {
    let (first_x, first_y) = match points.first() {
        Some(p) => *p,
        None => return 0.0,
    };
    if value <= first_x {
        return first_y;
    }
    for w in points.windows(2) {
        let (x0, y0) = w[0];
        let (x1, y1) = w[1];
        if value <= x1 {
            return y0 + (value - x0) / (x1 - x0) * (y1 - y0);
        }
    }
    points.last().map(|p| p.1).unwrap_or(first_y)
}

/// Built-in curve for each indicator.
pub fn standard_curve(key: &str) -> Option<ScoreCurve> {
    let curve = match key {
        // GDP YoY x10
        "gdp" => ScoreCurve::Linear {
            pivot: 0.0,
            score_at_pivot: 0.0,
            slope: 10.0,
        },
        "pce" => ScoreCurve::Piecewise {
            points: vec![(-3.0, 0.0), (-2.0, 10.0), (1.0, 30.0), (3.0, 60.0), (6.0, 100.0)],
        },
        // inverted around the 4.0% natural rate
        "unemployment" => ScoreCurve::Linear {
            pivot: 4.0,
            score_at_pivot: 100.0,
            slope: -25.0,
        },
        // distance from the 2% inflation target
        "cpi" | "pcepi" => ScoreCurve::TargetDistance {
            target: 2.0,
            penalty: 15.0,
        },
        "nasdaq" => ScoreCurve::Piecewise {
            points: vec![
                (-5.0, 0.0),
                (-2.0, 20.0),
                (-0.5, 40.0),
                (0.5, 60.0),
                (2.0, 80.0),
                (5.0, 100.0),
            ],
        },
        "data_ppi" | "software_ppi" => ScoreCurve::Piecewise {
            points: vec![
                (-10.0, 0.0),
                (-5.0, 10.0),
                (-2.0, 40.0),
                (0.0, 60.0),
                (2.0, 80.0),
                (5.0, 100.0),
                (8.0, 50.0),
                (12.0, 20.0),
                (16.0, 0.0),
            ],
        },
        "interest_rate" => ScoreCurve::Piecewise {
            points: vec![
                (0.0, 30.0),
                (1.0, 50.0),
                (2.0, 100.0),
                (4.0, 70.0),
                (5.5, 40.0),
                (7.0, 10.0),
                (9.0, 0.0),
            ],
        },
        "treasury_yield" => ScoreCurve::Piecewise {
            points: vec![
                (0.0, 0.0),
                (0.5, 20.0),
                (1.5, 40.0),
                (2.5, 100.0),
                (4.5, 60.0),
                (6.0, 20.0),
                (8.0, 0.0),
            ],
        },
        // <=20 calm, 20-30 elevated, >30 stressed
        "vix" => ScoreCurve::Piecewise {
            points: vec![(10.0, 100.0), (20.0, 70.0), (30.0, 40.0), (50.0, 0.0)],
        },
        "consumer_sentiment" => ScoreCurve::Piecewise {
            points: vec![
                (50.0, 0.0),
                (60.0, 20.0),
                (70.0, 40.0),
                (80.0, 60.0),
                (90.0, 80.0),
                (100.0, 100.0),
            ],
        },
        "job_postings" => ScoreCurve::Piecewise {
            points: vec![
                (-40.0, 0.0),
                (-20.0, 10.0),
                (-5.0, 30.0),
                (0.0, 50.0),
                (5.0, 70.0),
                (20.0, 90.0),
                (40.0, 100.0),
            ],
        },
        _ => return None,
    };
    Some(curve)
}
