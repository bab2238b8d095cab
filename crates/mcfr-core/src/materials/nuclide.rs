//! Nuclide identifier handling for depletion-output compositions.
//!
//! Depletion output lists nuclides as ZAI codes (Z*10000 + A*10 + isomer
//! flag). Nuclides with tabulated cross sections are written to material
//! cards as `ZA.suffix` where the isomer flag becomes a +400 offset on the
//! ZA; nuclides without tables are written as the bare ZAI code. Whether a
//! table exists is positional: the upstream format lists tabulated nuclides
//! first in increasing ZAI order, so the first decrease marks the boundary.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Isomer offset applied to the ZA portion of a tabulated identifier.
pub const ISOMER_ZA_OFFSET: u32 = 400;

/// ZAI code of the `total` pseudo-nuclide row.
pub const SENTINEL_TOTAL: u32 = 0;
/// ZAI code of the `lost` pseudo-nuclide row.
pub const SENTINEL_LOST: u32 = 666;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Zai(pub u32);

impl Zai {
    pub const fn atomic_number(self) -> u32 {
        self.0 / 10000
    }

    pub const fn mass_number(self) -> u32 {
        (self.0 / 10) % 1000
    }

    pub const fn isomer(self) -> u32 {
        self.0 % 10
    }

    /// `total` and `lost` bookkeeping rows are never real nuclides.
    pub const fn is_sentinel(self) -> bool {
        matches!(self.0, SENTINEL_TOTAL | SENTINEL_LOST)
    }

    /// Identifier used when cross-section tables exist for this nuclide.
    pub fn tabulated_id(self, xs_suffix: &str) -> String {
        format!("{}.{}", self.0 / 10 + ISOMER_ZA_OFFSET * self.isomer(), xs_suffix)
    }

    /// Identifier used when no cross-section table exists: the raw code.
    pub fn raw_id(self) -> String {
        self.0.to_string()
    }
}

impl Display for Zai {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One nuclide row of a composition snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NuclideDensity {
    pub zai: Zai,
    pub atom_density: f64,
}

/// Emits material-card nuclide lines for a composition snapshot.
///
/// The scan is a single left-to-right pass: once a ZAI value is observed
/// that is numerically smaller than its predecessor, that nuclide and every
/// one after it is written with the raw identifier. Re-deriving this from a
/// per-nuclide lookup would silently mislabel nuclides; the rule is a
/// structural invariant of the upstream ordering, so the pass must stay
/// sequential.
pub fn material_lines(entries: &[NuclideDensity], xs_suffix: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut has_xs = true;
    let mut prev_zai = 0_u32;
    for entry in entries {
        if entry.zai.is_sentinel() {
            continue;
        }
        if entry.zai.0 < prev_zai {
            has_xs = false;
        }
        prev_zai = entry.zai.0;
        if entry.atom_density == 0.0 {
            continue;
        }
        let id = if has_xs {
            entry.zai.tabulated_id(xs_suffix)
        } else {
            entry.zai.raw_id()
        };
        lines.push(format!("{}    {}", id, entry.atom_density));
    }
    lines
}
