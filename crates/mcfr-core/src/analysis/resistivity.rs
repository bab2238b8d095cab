//! Electrical resistivity of the transmuting silver component.
//!
//! Transmutation turns silver into palladium and cadmium; the mixture
//! resistivity is estimated with a series mixing rule over the metals and
//! a two-phase combination against the non-metallic remainder. Units are
//! micro-ohm centimeters throughout.

use crate::domain::{DeckError, DeckResult};

/// Reference temperature of the base resistivities [degC].
pub const REFERENCE_TEMP_C: f64 = 20.0;

/// Resistivity of the quasi-insulating non-metal phase used by the
/// combined end-of-cycle estimate [uOhm cm].
pub const NON_METAL_RESISTIVITY: f64 = 1.0e7;

/// (element, rho_0 at 20 degC [uOhm cm], linear temperature coefficient).
pub const RESISTIVITY_TABLE: [(&str, f64, f64); 3] = [
    ("Ag", 1.59, 3.80e-3),
    ("Pd", 10.54, 3.77e-3),
    ("Cd", 7.27, 4.20e-3),
];

/// Linear-in-temperature elemental resistivity.
pub fn elemental_resistivity(element: &str, temp_c: f64) -> DeckResult<f64> {
    let (_, rho_0, alpha) = RESISTIVITY_TABLE
        .iter()
        .find(|(symbol, _, _)| *symbol == element)
        .ok_or_else(|| {
            DeckError::input_validation(
                "RES.ELEMENT",
                format!("no resistivity entry for element '{element}'"),
            )
        })?;
    Ok(rho_0 * (1.0 + alpha * (temp_c - REFERENCE_TEMP_C)))
}

/// Series-weighted resistivity of the Ag/Pd/Cd metal mix.
///
/// The series rule only applies when the constituent resistivities are
/// comparable; a spread beyond one order of magnitude fails rather than
/// silently switching rules.
pub fn ternary_mix(f_ag: f64, f_pd: f64, f_cd: f64, temp_c: f64) -> DeckResult<f64> {
    let rho_ag = elemental_resistivity("Ag", temp_c)?;
    let rho_pd = elemental_resistivity("Pd", temp_c)?;
    let rho_cd = elemental_resistivity("Cd", temp_c)?;

    let max = rho_ag.max(rho_pd).max(rho_cd);
    let min = rho_ag.min(rho_pd).min(rho_cd);
    if max > 10.0 * min {
        return Err(DeckError::mixture_inapplicable(
            "RES.SERIES_SPREAD",
            format!(
                "elemental resistivities spread beyond one order of magnitude \
                 (Ag {rho_ag}, Pd {rho_pd}, Cd {rho_cd} uOhm cm)"
            ),
        ));
    }
    Ok(f_ag * rho_ag + f_pd * rho_pd + f_cd * rho_cd)
}

/// Two-phase mixture resistivity of a dispersed phase in a continuous one.
///
/// Three closed-form regimes from the mixing-rule literature, selected by
/// magnitude ratio. The 10x / 0.1x boundaries are hard discontinuities;
/// values exactly on a boundary take the linear blend.
pub fn combine_two_phase(rho_continuous: f64, rho_dispersed: f64, f_dispersed: f64) -> f64 {
    if rho_dispersed > 10.0 * rho_continuous {
        rho_continuous * (1.0 + 0.5 * f_dispersed) / (1.0 - f_dispersed)
    } else if rho_dispersed < 0.1 * rho_continuous {
        rho_continuous * (1.0 - f_dispersed) / (1.0 + 2.0 * f_dispersed)
    } else {
        rho_dispersed * f_dispersed + rho_continuous * (1.0 - f_dispersed)
    }
}

/// End-of-cycle elemental fractions of one silver component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EocFractions {
    pub ag: f64,
    pub pd: f64,
    pub cd: f64,
}

/// Combined wire-plus-shell resistivity estimate at end of cycle.
///
/// Wire and shell exposures compose multiplicatively for the depleting
/// element (silver remaining is the product of the two survival fractions)
/// and additively for the build-up elements. The metal mix is then
/// combined against the non-metal remainder as a dispersed second phase.
pub fn combined_eoc_resistivity(
    wire: EocFractions,
    shell: EocFractions,
    temp_c: f64,
) -> DeckResult<f64> {
    let f_ag = shell.ag * wire.ag;
    let f_pd = shell.pd + wire.pd;
    let f_cd = shell.cd + wire.cd;
    let f_metals = f_ag + f_pd + f_cd;
    if f_metals >= 1.0 {
        return Err(DeckError::input_validation(
            "RES.METAL_FRACTION",
            format!("combined metal fraction {f_metals} is not below one"),
        ));
    }
    let rho_metals = ternary_mix(f_ag, f_pd, f_cd, temp_c)?;
    Ok(combine_two_phase(
        rho_metals,
        NON_METAL_RESISTIVITY,
        1.0 - f_metals,
    ))
}

#[cfg(test)]
mod tests {
    use super::{
        combine_two_phase, combined_eoc_resistivity, elemental_resistivity, ternary_mix,
        EocFractions,
    };

    #[test]
    fn elemental_resistivity_is_linear_in_temperature() {
        let at_20 = elemental_resistivity("Ag", 20.0).expect("Ag is tabulated");
        assert!((at_20 - 1.59).abs() < 1.0e-12);
        let at_700 = elemental_resistivity("Ag", 700.0).expect("Ag is tabulated");
        assert!((at_700 - 1.59 * (1.0 + 3.80e-3 * 680.0)).abs() < 1.0e-12);
        assert!(elemental_resistivity("Au", 20.0).is_err());
    }

    #[test]
    fn ternary_mix_is_series_weighted() {
        // pure silver recovers the elemental value
        let pure = ternary_mix(1.0, 0.0, 0.0, 700.0).expect("applicable");
        let ag = elemental_resistivity("Ag", 700.0).expect("tabulated");
        assert!((pure - ag).abs() < 1.0e-12);

        let mixed = ternary_mix(0.8, 0.15, 0.05, 700.0).expect("applicable");
        assert!(mixed > pure);
    }

    #[test]
    fn dispersed_dominant_branch() {
        let rho = combine_two_phase(1.0, 100.0, 0.1);
        assert!((rho - 1.0 * (1.0 + 0.05) / 0.9).abs() < 1.0e-12);
    }

    #[test]
    fn dispersed_negligible_branch() {
        let rho = combine_two_phase(1.0, 0.01, 0.1);
        assert!((rho - 1.0 * 0.9 / 1.2).abs() < 1.0e-12);
    }

    #[test]
    fn comparable_phases_blend_linearly() {
        let rho = combine_two_phase(1.0, 5.0, 0.1);
        assert!((rho - (5.0 * 0.1 + 1.0 * 0.9)).abs() < 1.0e-12);
    }

    #[test]
    fn regime_boundaries_fall_into_the_linear_blend() {
        let upper = combine_two_phase(1.0, 10.0, 0.2);
        assert!((upper - (10.0 * 0.2 + 1.0 * 0.8)).abs() < 1.0e-12);
        let lower = combine_two_phase(1.0, 0.1, 0.2);
        assert!((lower - (0.1 * 0.2 + 1.0 * 0.8)).abs() < 1.0e-12);
    }

    #[test]
    fn combined_estimate_slightly_exceeds_the_metal_mix() {
        let wire = EocFractions {
            ag: 0.97,
            pd: 0.02,
            cd: 0.005,
        };
        let shell = EocFractions {
            ag: 0.90,
            pd: 0.06,
            cd: 0.03,
        };
        let combined = combined_eoc_resistivity(wire, shell, 700.0).expect("applicable");
        let rho_metals = ternary_mix(
            0.90 * 0.97,
            0.06 + 0.02,
            0.03 + 0.005,
            700.0,
        )
        .expect("applicable");
        assert!(combined > rho_metals);
        assert!(combined < rho_metals * 1.2);
    }

    #[test]
    fn saturated_metal_fraction_is_rejected() {
        let wire = EocFractions {
            ag: 1.0,
            pd: 0.0,
            cd: 0.0,
        };
        let shell = EocFractions {
            ag: 1.0,
            pd: 0.0,
            cd: 0.0,
        };
        assert!(combined_eoc_resistivity(wire, shell, 700.0).is_err());
    }
}
