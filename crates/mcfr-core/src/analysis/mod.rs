//! Post-hoc analysis of depletion results: isotope ranking and elemental
//! fractions over time.
//!
//! Depletion output enters this crate as a JSON table exported by the
//! external result-file reader, keyed by material name. The core never
//! parses the solver's own output format.

pub mod resistivity;

use crate::domain::{DeckError, DeckResult};
use crate::materials::nuclide::{NuclideDensity, Zai};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Identifier of the bookkeeping row holding the total atom density.
pub const TOTAL_NAME: &str = "total";
/// Identifier of the bookkeeping row holding lost (untracked) nuclides.
pub const LOST_NAME: &str = "lost";

/// Time history of one depleting material.
///
/// `adens` is row-per-isotope, column-per-day, matching `names` and `zai`
/// ordering. Days are strictly increasing; burnup is optional external
/// metadata cross-referenced by index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialHistory {
    pub days: Vec<f64>,
    pub names: Vec<String>,
    pub zai: Vec<Zai>,
    pub adens: Vec<Vec<f64>>,
    #[serde(default)]
    pub burnup: Vec<f64>,
}

impl MaterialHistory {
    pub fn validate(&self) -> DeckResult<()> {
        if self.days.windows(2).any(|pair| pair[1] <= pair[0]) {
            return Err(DeckError::input_validation(
                "INPUT.HISTORY_DAYS",
                "material history days are not strictly increasing",
            ));
        }
        if self.names.len() != self.adens.len() || self.zai.len() != self.adens.len() {
            return Err(DeckError::input_validation(
                "INPUT.HISTORY_SHAPE",
                format!(
                    "isotope row mismatch: {} names, {} zai, {} density rows",
                    self.names.len(),
                    self.zai.len(),
                    self.adens.len()
                ),
            ));
        }
        if self
            .adens
            .iter()
            .any(|row| row.len() != self.days.len())
        {
            return Err(DeckError::input_validation(
                "INPUT.HISTORY_SHAPE",
                "density rows do not span every time point",
            ));
        }
        Ok(())
    }

    pub fn step_count(&self) -> usize {
        self.days.len()
    }

    fn last_day_index(&self) -> DeckResult<usize> {
        self.days.len().checked_sub(1).ok_or_else(|| {
            DeckError::input_validation("INPUT.HISTORY_DAYS", "material history has no time points")
        })
    }

    fn check_day_index(&self, day_index: usize) -> DeckResult<()> {
        if day_index >= self.days.len() {
            return Err(DeckError::input_validation(
                "INPUT.HISTORY_DAY_INDEX",
                format!(
                    "day index {day_index} out of range for a history of {} time points",
                    self.days.len()
                ),
            ));
        }
        Ok(())
    }

    /// Atom density of one isotope row at one time point.
    pub fn density(&self, iso_index: usize, day_index: usize) -> DeckResult<f64> {
        self.check_day_index(day_index)?;
        let row = self.adens.get(iso_index).ok_or_else(|| {
            DeckError::input_validation(
                "INPUT.HISTORY_ISOTOPE_INDEX",
                format!(
                    "isotope index {iso_index} out of range for {} rows",
                    self.adens.len()
                ),
            )
        })?;
        Ok(row[day_index])
    }

    /// Total atom density at one time point, from the `total` row.
    pub fn total_density(&self, day_index: usize) -> DeckResult<f64> {
        self.check_day_index(day_index)?;
        let row = self
            .names
            .iter()
            .position(|name| name == TOTAL_NAME)
            .ok_or_else(|| {
                DeckError::input_validation(
                    "INPUT.HISTORY_TOTAL",
                    "material history carries no 'total' row",
                )
            })?;
        Ok(self.adens[row][day_index])
    }

    /// Composition snapshot at one time point, for source-material emission.
    pub fn snapshot(&self, day_index: usize) -> Vec<NuclideDensity> {
        self.zai
            .iter()
            .zip(&self.adens)
            .map(|(&zai, row)| NuclideDensity {
                zai,
                atom_density: row[day_index],
            })
            .collect()
    }

    /// Identifiers of the `n` most abundant isotopes at end of cycle.
    ///
    /// Sentinel rows are excluded; ties keep the original enumeration
    /// order (the sort is stable), so repeated runs return the same list.
    pub fn top_isotopes(&self, n: usize) -> DeckResult<Vec<String>> {
        let eoc = self.last_day_index()?;
        let mut ranked: Vec<(usize, &String, f64)> = self
            .names
            .iter()
            .enumerate()
            .filter(|(_, name)| name.as_str() != TOTAL_NAME && name.as_str() != LOST_NAME)
            .map(|(row, name)| (row, name, self.adens[row][eoc]))
            .collect();
        ranked.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));
        Ok(ranked
            .into_iter()
            .take(n)
            .map(|(_, name, _)| name.clone())
            .collect())
    }

    /// Fraction of the total atom density carried by isotopes of `symbol`
    /// at one time point.
    ///
    /// Matching is a substring test over the isotope identifier ("Ag"
    /// matches "Ag107" and "Ag109"). This is the exact upstream rule; see
    /// [`substring_collisions`] for the guard against ambiguous symbol
    /// sets.
    pub fn element_fraction(&self, symbol: &str, day_index: usize) -> DeckResult<f64> {
        let total = self.total_density(day_index)?;
        if total == 0.0 {
            return Err(DeckError::zero_density(
                "FRAC.TOTAL_DENSITY",
                format!("total atom density is zero at day index {day_index}"),
            ));
        }
        let sum: f64 = self
            .names
            .iter()
            .enumerate()
            .filter(|(_, name)| {
                name.as_str() != TOTAL_NAME
                    && name.as_str() != LOST_NAME
                    && name.contains(symbol)
            })
            .map(|(row, _)| self.adens[row][day_index])
            .sum();
        Ok(sum / total)
    }

    /// Elemental fraction at the final time point.
    pub fn eoc_fraction(&self, symbol: &str) -> DeckResult<f64> {
        let eoc = self.last_day_index()?;
        self.element_fraction(symbol, eoc)
    }
}

/// Flags symbol pairs whose substring relationship would make the
/// element-fraction match ambiguous. The rule itself is preserved as-is;
/// callers decide whether a collision is acceptable.
pub fn substring_collisions(symbols: &[&str]) -> Vec<(String, String)> {
    let mut collisions = Vec::new();
    for (i, a) in symbols.iter().enumerate() {
        for b in &symbols[i + 1..] {
            if a.contains(*b) || b.contains(*a) {
                collisions.push((a.to_string(), b.to_string()));
            }
        }
    }
    collisions
}

/// Depletion results for all burned materials of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepletionTable {
    pub materials: BTreeMap<String, MaterialHistory>,
}

impl DepletionTable {
    pub fn load(path: &Path) -> DeckResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| {
            DeckError::io_system(
                "IO.DEPLETION_TABLE",
                format!("failed to read depletion table '{}': {}", path.display(), source),
            )
        })?;
        let table: Self = serde_json::from_str(&content).map_err(|source| {
            DeckError::input_validation(
                "INPUT.DEPLETION_TABLE",
                format!("failed to parse depletion table '{}': {}", path.display(), source),
            )
        })?;
        for history in table.materials.values() {
            history.validate()?;
        }
        Ok(table)
    }

    pub fn material(&self, name: &str) -> DeckResult<&MaterialHistory> {
        self.materials.get(name).ok_or_else(|| {
            DeckError::input_validation(
                "INPUT.MATERIAL_NAME",
                format!("depletion table has no material '{name}'"),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{substring_collisions, MaterialHistory};
    use crate::domain::DeckErrorCategory;
    use crate::materials::nuclide::Zai;

    fn silver_history() -> MaterialHistory {
        MaterialHistory {
            days: vec![0.0, 10.0, 20.0],
            names: vec![
                "total".to_string(),
                "Ag107".to_string(),
                "Ag109".to_string(),
                "Pd108".to_string(),
                "Cd111".to_string(),
                "lost".to_string(),
            ],
            zai: vec![Zai(0), Zai(471070), Zai(471090), Zai(461080), Zai(481110), Zai(666)],
            adens: vec![
                vec![1.0, 1.0, 1.0],
                vec![0.52, 0.50, 0.45],
                vec![0.48, 0.44, 0.40],
                vec![0.0, 0.04, 0.09],
                vec![0.0, 0.02, 0.06],
                vec![0.0, 0.0, 0.0],
            ],
            burnup: vec![],
        }
    }

    #[test]
    fn top_isotopes_rank_by_eoc_density_without_sentinels() {
        let history = silver_history();
        let top = history.top_isotopes(3).expect("history has time points");
        assert_eq!(top, vec!["Ag107", "Ag109", "Pd108"]);
        // stable across re-runs on identical input
        assert_eq!(top, history.top_isotopes(3).expect("same input"));
    }

    #[test]
    fn element_fraction_uses_substring_matching() {
        let history = silver_history();
        let ag = history.eoc_fraction("Ag").expect("total is nonzero");
        assert!((ag - 0.85).abs() < 1.0e-12);
        let pd = history.eoc_fraction("Pd").expect("total is nonzero");
        assert!((pd - 0.09).abs() < 1.0e-12);
    }

    #[test]
    fn out_of_range_day_index_is_an_input_error_not_a_panic() {
        let history = silver_history();
        let error = history.element_fraction("Ag", 3).expect_err("only 3 time points");
        assert_eq!(error.category(), DeckErrorCategory::InputValidation);

        let error = history.total_density(7).expect_err("out of range");
        assert_eq!(error.category(), DeckErrorCategory::InputValidation);

        let error = history.density(99, 0).expect_err("no such isotope row");
        assert_eq!(error.category(), DeckErrorCategory::InputValidation);
        assert!((history.density(1, 2).expect("in range") - 0.45).abs() < 1.0e-12);
    }

    #[test]
    fn zero_total_density_is_reported_not_recovered() {
        let mut history = silver_history();
        history.adens[0] = vec![0.0, 0.0, 0.0];
        let error = history.eoc_fraction("Ag").expect_err("zero total");
        assert_eq!(error.category(), DeckErrorCategory::ZeroDensity);
    }

    #[test]
    fn shape_validation_rejects_ragged_tables() {
        let mut history = silver_history();
        history.adens[2] = vec![0.48];
        assert!(history.validate().is_err());

        let mut history = silver_history();
        history.days = vec![0.0, 10.0, 10.0];
        assert!(history.validate().is_err());
    }

    #[test]
    fn substring_collisions_flag_ambiguous_symbol_sets() {
        assert!(substring_collisions(&["Ag", "Pd", "Cd"]).is_empty());
        let found = substring_collisions(&["S", "Si"]);
        assert_eq!(found, vec![("S".to_string(), "Si".to_string())]);
    }
}
