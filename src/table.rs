use std::collections::HashMap;

use crate::error::{GfResult, GroundForgeError};

/// Period key of a PGV row in tables that carry one.
pub const PGV_SENTINEL: f64 = -1.0;

/// A single row of model coefficients, keyed by spectral period.
/// Period 0.0 is the PGA row; -1.0 marks a PGV row.
pub trait CoefficientRecord {
    fn period(&self) -> f64;
}

/// An ordered, read-only coefficient table. Built once per model instance;
/// evaluation passes individual records around by reference.
#[derive(Debug, Clone)]
pub struct CoefficientTable<R: CoefficientRecord> {
    model: &'static str,
    rows: Vec<R>,
}

impl<R: CoefficientRecord> CoefficientTable<R> {
    pub fn new(model: &'static str, rows: Vec<R>) -> Self {
        CoefficientTable { model, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, idx: usize) -> &R {
        &self.rows[idx]
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Exact-match SA lookup; there is no interpolation between rows.
    pub fn find_sa(&self, period: f64) -> GfResult<&R> {
        self.rows
            .iter()
            .find(|r| r.period() == period)
            .ok_or_else(|| GroundForgeError::UnknownPeriod {
                model: self.model,
                imt: format!("SA ({period} s)"),
            })
    }

    pub fn find_pga(&self) -> GfResult<&R> {
        self.rows
            .iter()
            .find(|r| r.period() == 0.0)
            .ok_or(GroundForgeError::UnknownPeriod {
                model: self.model,
                imt: "PGA".into(),
            })
    }

    pub fn find_pgv(&self) -> GfResult<&R> {
        self.rows
            .iter()
            .find(|r| r.period() == PGV_SENTINEL)
            .ok_or(GroundForgeError::UnknownPeriod {
                model: self.model,
                imt: "PGV".into(),
            })
    }

    /// SA periods this table defines, ascending; sentinel rows excluded.
    pub fn supported_periods(&self) -> Vec<f64> {
        let mut periods: Vec<f64> = self
            .rows
            .iter()
            .map(|r| r.period())
            .filter(|p| *p >= 0.0)
            .collect();
        periods.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        periods
    }

    /// Index of the row whose period brackets `target` from below, scanning
    /// the strictly-positive-period rows in table order. Targets outside the
    /// table fall back to the last bracket, so `idx + 1` is always a row.
    pub fn bracketing_index(&self, target: f64) -> usize {
        let last = self.rows.len() - 1;
        let first_sa = self
            .rows
            .iter()
            .position(|r| r.period() > 0.0)
            .unwrap_or(last);
        for i in first_sa..last {
            if target >= self.rows[i].period() && target < self.rows[i + 1].period() {
                return i;
            }
        }
        last.saturating_sub(1)
    }
}

/// Parses a labeled-line coefficient resource: every non-blank line is a
/// coefficient name followed by whitespace-separated values, one value per
/// period column. Lines starting with '#' are ignored.
pub fn parse_labeled_resource(text: &str) -> GfResult<HashMap<String, Vec<f64>>> {
    let mut out = HashMap::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut parts = line.split_whitespace();
        let name = match parts.next() {
            Some(n) => n.to_string(),
            None => continue,
        };
        let mut values = Vec::new();
        for v in parts {
            let parsed = v.parse::<f64>().map_err(|_| {
                GroundForgeError::Config(format!(
                    "bad value {v:?} for coefficient {name} (line {})",
                    lineno + 1
                ))
            })?;
            values.push(parsed);
        }
        out.insert(name, values);
    }
    Ok(out)
}

/// Pulls a named coefficient line out of a parsed resource, checking that it
/// carries one value per expected period column.
pub fn labeled_line<'a>(
    map: &'a HashMap<String, Vec<f64>>,
    name: &str,
    expected: usize,
) -> GfResult<&'a [f64]> {
    let line = map
        .get(name)
        .ok_or_else(|| GroundForgeError::Config(format!("coefficient line {name} is missing")))?;
    if line.len() != expected {
        return Err(GroundForgeError::Config(format!(
            "coefficient line {name} has {} values, expected {expected}",
            line.len()
        )));
    }
    Ok(line)
}
