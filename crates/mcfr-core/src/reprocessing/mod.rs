//! Continuous-reprocessing cards: refuel stockpile, offgas extraction,
//! overflow tank, and the mass-flow routing between them.

use crate::domain::{DeckError, DeckResult};

/// Per-noble-gas removal rate of the offgas stream [1/s].
pub const OFFGAS_RATE: f64 = 1.0e-2;

/// Extracts the mass-density literal from the `mat` line of a salt card.
fn salt_density(salt_card: &str) -> DeckResult<f64> {
    let mat_line = salt_card
        .lines()
        .find(|line| line.trim_start().starts_with("mat "))
        .ok_or_else(|| {
            DeckError::input_validation(
                "INPUT.SALT_CARD",
                "salt card has no 'mat' line to take the density from",
            )
        })?;
    mat_line
        .split_whitespace()
        .find_map(|token| {
            token
                .starts_with('-')
                .then(|| token.parse::<f64>().ok())
                .flatten()
        })
        .ok_or_else(|| {
            DeckError::input_validation(
                "INPUT.SALT_CARD",
                format!("no negative density literal on salt mat line '{mat_line}'"),
            )
        })
}

/// Isotopic density lines of a salt card: everything after the `mat` line.
fn salt_isotope_lines(salt_card: &str) -> String {
    salt_card
        .lines()
        .skip_while(|line| !line.trim_start().starts_with("mat "))
        .skip(1)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full reprocessing block for a depleting fuel salt.
///
/// The refuel stockpile is fresh fuel at operating temperature; its density
/// literal must be negative with magnitude of at least one, anything else
/// indicates a malformed salt card. `set pcc 0` is always part of the
/// block: the external solver's depletion-with-removal algorithm is only
/// correct with the predictor-corrector disabled.
pub fn reprocessing_cards(
    salt_card: &str,
    refuel_flow: f64,
    stockpile_volume: f64,
    temp_k: f64,
    xs_suffix: &str,
) -> DeckResult<String> {
    let rho = salt_density(salt_card)?;
    if rho > -1.0 {
        return Err(DeckError::density_sanity(
            "REPR.REFUEL_DENSITY",
            format!("refuel stockpile density {rho} outside the expected range (<= -1.0)"),
        ));
    }
    let isotopes = salt_isotope_lines(salt_card);

    Ok(format!(
        "\n%___________Reprocessing___________\n\
         % First we need some extra materials to do depletion with reprocessing correctly.\n\
         \n\
         % stockpile of extra refuel\n\
         mat U_stock {rho} burn 1 vol {stockpile_volume} tmp {temp_k}\n\
         {isotopes}\n\
         \n\
         % tanks for offgases\n\
         mat offgastankcore 0.0007 burn 1 vol 1e6 tmp {temp_k}\n\
         2004.{xs_suffix} 1\n\
         \n\
         % overflow tank\n\
         mat overflow 0.0007 burn 1 vol 1e8 tmp {temp_k}\n\
         2004.{xs_suffix} 1\n\
         \n\
         % mass flow definitions\n\
         mflow U_in\n\
         all {refuel_flow}\n\
         \n\
         mflow offgasratecore\n\
         Ne {OFFGAS_RATE}\n\
         Ar {OFFGAS_RATE}\n\
         He {OFFGAS_RATE}\n\
         Kr {OFFGAS_RATE}\n\
         Xe {OFFGAS_RATE}\n\
         Rn {OFFGAS_RATE}\n\
         \n\
         % need to account for the increase in volume with refueling\n\
         mflow over\n\
         all {refuel_flow}\n\
         \n\
         % predictor-corrector must be turned off to use depletion\n\
         set pcc 0\n\
         \n\
         %syntax:\n\
         % rc <from_mat> <to_mat> <mflow> <setting> where setting is either 0, 1 or 2.\n\
         \n\
         rep source_rep\n\
         rc U_stock fuelsalt U_in 0\n\
         rc fuelsalt offgastankcore offgasratecore 1\n\
         rc fuelsalt overflow over 1\n"
    ))
}
