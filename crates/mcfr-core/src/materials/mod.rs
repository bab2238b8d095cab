//! Material-card composition: fuel salt, reflectors, and the depleting
//! silver alloy.

pub mod nuclide;

pub use nuclide::{material_lines, NuclideDensity, Zai};

use crate::domain::{DeckError, DeckResult};

/// Silver density from the linear correlation rho(T) = 10.465 - 9.967e-4*T
/// [g/cm^3, T in K].
pub fn silver_density(temp_k: f64) -> f64 {
    10.465 - 9.967e-4 * temp_k
}

/// Natural-silver weight fractions of the two stable isotopes.
pub const AG107_WEIGHT_FRACTION: f64 = 0.51839;
pub const AG109_WEIGHT_FRACTION: f64 = 0.48161;

/// Material card for the silver alloy. `burn` selects depletion and the
/// display color used to tell depleting from inert silver in geometry plots.
pub fn silver_card(mat_name: &str, temp_k: f64, xs_suffix: &str, burn: bool) -> String {
    let rgb = if burn { "210 210 210" } else { "110 110 110" };
    let burn_flag = if burn { 1 } else { 0 };
    format!(
        "\n% Silver\n\
         mat {mat_name} -{rho} tmp {temp_k} rgb {rgb} burn {burn_flag}\n\
         47107.{xs_suffix}  -{AG107_WEIGHT_FRACTION}    % Ag\n\
         47109.{xs_suffix}  -{AG109_WEIGHT_FRACTION}    % Ag\n",
        rho = silver_density(temp_k),
    )
}

/// Cast iron reflector used by the spherical core.
pub fn cast_iron_card(temp_k: f64, xs_suffix: &str) -> String {
    format!(
        "\n% Cast iron reflector\n\
         mat refl   -7.034 tmp {temp_k} rgb 128 128 178\n\
          6000.{s} -0.034000\n\
         14028.{s}  -2.38853E-02\n\
         14029.{s}  -1.25674E-03\n\
         14030.{s}  -8.57970E-04\n\
         15031.{s} -0.003000\n\
         16032.{s}  -9.47153E-04\n\
         16033.{s}  -7.71207E-06\n\
         16034.{s}  -4.50224E-05\n\
         16036.{s}  -1.12170E-07\n\
         25055.{s} -0.006500\n\
         26054.{s}  -5.24755E-02\n\
         26056.{s}  -8.54225E-01\n\
         26057.{s}  -2.00806E-02\n\
         26058.{s}  -2.71920E-03\n",
        s = xs_suffix,
    )
}

/// MgO reflector of the experiment-scale cylindrical design.
pub fn mgo_card() -> String {
    "\n% MgO reflector\n\
     mat refl -3.5 tmp 873.0 rgb 75 75 75\n\
     12024.06c 1.0\n\
     8016.06c 1.0\n"
        .to_string()
}

/// Lead reflector of the power-scale cylindrical design.
pub fn lead_card(xs_suffix: &str) -> String {
    format!(
        "\n% Lead reflector\n\
         mat refl -10.4 tmp 873.0 rgb 75 75 75\n\
         82204.{s} 0.014\n\
         82206.{s} 0.241\n\
         82207.{s} 0.221\n\
         82208.{s} 0.524\n",
        s = xs_suffix,
    )
}

/// Fuel-salt composition provider.
///
/// Salt thermophysics and isotopics live outside this crate; the deck
/// builders only need solver-ready card text at a given temperature. The
/// first card line is expected to carry a negative mass-density literal.
pub trait SaltSource {
    /// Solver material card for the salt at `temp_k`, named `fuelsalt`.
    fn material_card(&self, temp_k: f64) -> String;

    /// Salt formula, for deck titles and diagnostics.
    fn formula(&self) -> &str;
}

/// Salt card text prepared by an external composition service.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedSalt {
    formula: String,
    enrichment: f64,
    card: String,
}

impl PreparedSalt {
    /// Wraps prepared card text. The enrichment fraction is retained for
    /// diagnostics and validated to [0, 1].
    pub fn new(
        formula: impl Into<String>,
        enrichment: f64,
        card: impl Into<String>,
    ) -> DeckResult<Self> {
        if !(0.0..=1.0).contains(&enrichment) {
            return Err(DeckError::input_validation(
                "INPUT.ENRICHMENT",
                format!("enrichment fraction {enrichment} outside [0, 1]"),
            ));
        }
        Ok(Self {
            formula: formula.into(),
            enrichment,
            card: card.into(),
        })
    }

    pub fn enrichment(&self) -> f64 {
        self.enrichment
    }
}

impl SaltSource for PreparedSalt {
    fn material_card(&self, _temp_k: f64) -> String {
        self.card.clone()
    }

    fn formula(&self) -> &str {
        &self.formula
    }
}
