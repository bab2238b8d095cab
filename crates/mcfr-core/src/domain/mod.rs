pub mod errors;

pub use errors::{DeckError, DeckErrorCategory, DeckResult};

use std::fmt::{Display, Formatter};

/// Continuous-energy cross-section library suffix, e.g. "09c" for 900 K data.
pub type XsSuffix = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DataLibrary {
    Endf7,
    #[default]
    Jeff33,
    Endf8,
}

impl DataLibrary {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Endf7 => "endf7",
            Self::Jeff33 => "jeff33",
            Self::Endf8 => "endf8",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "endf7" => Some(Self::Endf7),
            "jeff33" => Some(Self::Jeff33),
            "endf8" => Some(Self::Endf8),
            _ => None,
        }
    }

    /// acelib/declib/nfylib path cards for the selected evaluation.
    pub fn path_cards(self) -> &'static str {
        match self {
            Self::Jeff33 => {
                "\n% Data Libraries\n\
                 set acelib \"/opt/JEFF-3.3/sss_jeff33.xsdir\"\n\
                 set declib \"/opt/JEFF-3.3/jeff33.dec\"\n\
                 set nfylib \"/opt/JEFF-3.3/jeff33.nfy\"\n"
            }
            Self::Endf7 => {
                "\n% Data Libraries\n\
                 set acelib \"sss_endfb7u.sssdir\"\n\
                 set declib \"sss_endfb7.dec\"\n\
                 set nfylib \"sss_endfb7.nfy\"\n"
            }
            Self::Endf8 => {
                "\n% Data Libraries\n\
                 set acelib \"/opt/ENDFB-8.0/endfb80.xsdir\"\n\
                 set declib \"/opt/ENDFB-8.0/sss_endfb80.dec\"\n\
                 set nfylib \"/opt/ENDFB-8.0/sss_endfb80.nfy\"\n"
            }
        }
    }
}

impl Display for DataLibrary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shared run parameters consumed by every deck builder.
///
/// The original tooling kept these as mutable defaults on a common base
/// object; here they are one immutable value passed explicitly so deck
/// generation stays deterministic and testable in isolation.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactorDefaults {
    /// Salt temperature [K].
    pub temp_k: f64,
    /// Silver component temperature [K]; the wire runs hotter than the salt
    /// that cools it.
    pub silver_temp_k: f64,
    /// Core thermal power [W].
    pub power_w: f64,
    /// Cross-section temperature suffix for the fuel salt.
    pub xs_suffix: XsSuffix,
    /// Cross-section temperature suffix for silver.
    pub xs_suffix_silver: XsSuffix,
    /// Energy group structure for group-constant generation, if any.
    pub group_structure: Option<String>,
    /// Neutron histories per criticality cycle.
    pub histories: u64,
    /// Scheduler queue for the submission script.
    pub queue: String,
    /// OMP core count for the submission script.
    pub omp_cores: u32,
    /// Base name of the emitted input deck.
    pub deck_name: String,
    /// Nuclear data evaluation.
    pub nuc_libs: DataLibrary,
    /// Emit geometry plot cards.
    pub plots: bool,
}

impl Default for ReactorDefaults {
    fn default() -> Self {
        Self {
            temp_k: 900.0,
            silver_temp_k: 910.0,
            power_w: 3.0e9,
            xs_suffix: "09c".to_string(),
            xs_suffix_silver: "09c".to_string(),
            group_structure: None,
            histories: 50_000,
            queue: "gen6".to_string(),
            omp_cores: 16,
            deck_name: "mcfr_input".to_string(),
            nuc_libs: DataLibrary::Jeff33,
            plots: true,
        }
    }
}

impl ReactorDefaults {
    /// Group-constant cards: either the requested group structure or the
    /// explicit off switch that hastens the calculation.
    pub fn group_constant_cards(&self) -> String {
        match &self.group_structure {
            Some(nfg) => format!(
                "\n% Use group structure for group constant generation\nset micro {nfg}\nset nfg {nfg}\n"
            ),
            None => "\n% Turning off group constant generation hastens the calculation\nset gcu -1\n"
                .to_string(),
        }
    }
}
