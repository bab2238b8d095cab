//! Complete input-deck assembly.
//!
//! A deck is positional, line-oriented text. The assembly order is fixed
//! and must not be reordered: title, surfaces, cells, salt, other
//! materials, data cards, then reprocessing and depletion when requested.

pub mod serialization;

pub use serialization::{normalize_deck_text, write_deck_file};

use crate::domain::{DeckResult, ReactorDefaults};
use crate::geometry::{ConeDesign, CylindricalGeometry, SphericalGeometry};
use crate::materials::{cast_iron_card, lead_card, mgo_card, silver_card, SaltSource};
use crate::reprocessing::reprocessing_cards;
use crate::schedule::{schedule_cards, DEPLETION_HEADER};
use std::path::{Path, PathBuf};

/// Reflector temperature shared by the full-core decks [K].
pub const REFLECTOR_TEMP_K: f64 = 873.0;
/// Cross-section suffix of the (cooler) reflector materials.
pub const REFLECTOR_XS_SUFFIX: &str = "06c";

/// Spherical-core scenario: geometry plus run and depletion parameters.
pub struct SphericalDeck<'a> {
    pub geometry: SphericalGeometry,
    pub salt: &'a dyn SaltSource,
    pub defaults: &'a ReactorDefaults,
    /// Requested depletion duration in years; zero means a static deck.
    pub deplete_years: f64,
    /// Refuel mass-flow rate [fraction of inventory per second].
    pub refuel_flow: f64,
}

impl SphericalDeck<'_> {
    pub fn title(&self) -> String {
        format!(
            "set title \"sphMCFR radius {}, reflector {}\"\n",
            self.geometry.core_radius(),
            self.geometry.reflector_radius()
        )
    }

    fn materials(&self) -> String {
        let mut materials = cast_iron_card(REFLECTOR_TEMP_K, REFLECTOR_XS_SUFFIX);
        if self.geometry.has_shell() {
            materials.push_str(&silver_card(
                "silver",
                self.defaults.silver_temp_k,
                &self.defaults.xs_suffix_silver,
                true,
            ));
        }
        materials
    }

    fn data_cards(&self) -> String {
        let mut cards = format!(
            "\n% Fuel salt volume\n\
             set mvol fuelsalt 0 {volume}\n\
             \n\
             % Power in thermal W\n\
             set power {power}\n\
             \n\
             % Boundary condition\n\
             set bc 1\n\
             \n\
             % Neutron population and criticality cycles\n\
             set pop {histories} 240 40\n",
            volume = self.geometry.salt_volume(),
            power = self.defaults.power_w,
            histories = self.defaults.histories,
        );
        if self.geometry.has_shell() {
            cards.push_str(
                "\n% Flux in silver shell\n\
                 det silverflux de fluxgrid dm silver\n\
                 ene fluxgrid 3 500 1e-11 2e1\n",
            );
        }
        cards.push_str(&self.defaults.group_constant_cards());
        cards.push_str(self.defaults.nuc_libs.path_cards());
        if self.defaults.plots {
            cards.push_str("\n% Plots\nplot 3 1500 1500\n");
        }
        cards
    }

    /// The complete deck, constructed in memory before anything touches
    /// the filesystem.
    pub fn deck_text(&self) -> DeckResult<String> {
        let salt_card = self.salt.material_card(self.defaults.temp_k);
        let mut deck = self.title();
        deck.push_str(&self.geometry.surfaces());
        deck.push_str(&self.geometry.cells());
        deck.push('\n');
        deck.push_str(&salt_card);
        deck.push_str(&self.materials());
        deck.push_str(&self.data_cards());
        if self.deplete_years > 0.0 {
            deck.push_str(&reprocessing_cards(
                &salt_card,
                self.refuel_flow,
                self.geometry.salt_volume(),
                self.defaults.temp_k,
                &self.defaults.xs_suffix,
            )?);
            deck.push_str(DEPLETION_HEADER);
            deck.push_str(&schedule_cards(self.deplete_years));
        }
        Ok(deck)
    }

    pub fn write(&self, dir: &Path) -> DeckResult<PathBuf> {
        let text = self.deck_text()?;
        write_deck_file(dir, &self.defaults.deck_name, &text)
    }

    pub fn run_script(&self) -> String {
        run_script(self.defaults)
    }
}

/// Cylindrical-core scenario.
pub struct CylindricalDeck<'a> {
    pub geometry: CylindricalGeometry,
    pub salt: &'a dyn SaltSource,
    pub defaults: &'a ReactorDefaults,
    pub deplete_years: f64,
    pub refuel_flow: f64,
}

impl CylindricalDeck<'_> {
    pub fn title(&self) -> String {
        format!(
            "set title \"cylMCFR radius {}, height {}, reflector {}\"\n",
            self.geometry.core_radius(),
            self.geometry.height(),
            self.geometry.reflector_outer_radius()
        )
    }

    fn materials(&self) -> String {
        match self.geometry.design() {
            ConeDesign::Mcre => mgo_card(),
            ConeDesign::Mcfr => lead_card(REFLECTOR_XS_SUFFIX),
        }
    }

    fn data_cards(&self) -> String {
        let mut cards = format!(
            "\nset mvol fuelsalt 0 {volume}  % Fuel salt volume\n\
             \n\
             set bc 1  % Boundary condition, vacuum\n\
             \n\
             set pop {histories} 240 40  % N pop and criticality cycles\n\
             \n\
             set power {power}  % Power in thermal W\n",
            volume = self.geometry.salt_volume(),
            histories = self.defaults.histories,
            power = self.defaults.power_w,
        );
        cards.push_str(&self.defaults.group_constant_cards());
        cards.push_str(self.defaults.nuc_libs.path_cards());
        if self.defaults.plots {
            cards.push_str("\n% Plots\nplot 3 1500 1500\nplot 2 1500 1500\n");
        }
        cards
    }

    pub fn deck_text(&self) -> DeckResult<String> {
        let salt_card = self.salt.material_card(self.defaults.temp_k);
        let mut deck = self.title();
        deck.push_str(&self.geometry.surfaces());
        deck.push_str(&self.geometry.cells());
        deck.push('\n');
        deck.push_str(&salt_card);
        deck.push_str(&self.materials());
        deck.push_str(&self.data_cards());
        if self.deplete_years > 0.0 {
            deck.push_str(&reprocessing_cards(
                &salt_card,
                self.refuel_flow,
                1.0e8,
                self.defaults.temp_k,
                &self.defaults.xs_suffix,
            )?);
            deck.push_str(DEPLETION_HEADER);
            deck.push_str(&schedule_cards(self.deplete_years));
        }
        Ok(deck)
    }

    pub fn write(&self, dir: &Path) -> DeckResult<PathBuf> {
        let text = self.deck_text()?;
        write_deck_file(dir, &self.defaults.deck_name, &text)
    }

    pub fn run_script(&self) -> String {
        run_script(self.defaults)
    }
}

/// Batch-style job submission script for one full-core deck: PBS header,
/// one solver invocation, and a k-eff summary extraction line.
pub fn run_script(defaults: &ReactorDefaults) -> String {
    format!(
        "#!/bin/bash\n\
         #PBS -V\n\
         #PBS -N MCFR_S2\n\
         #PBS -q {queue}\n\
         #PBS -l nodes=1:ppn={cores}\n\
         \n\
         hostname\n\
         rm -f done.dat\n\
         cd ${{PBS_O_WORKDIR}}\n\
         module load mpi\n\
         module load serpent\n\
         \n\
         sss2 -omp {cores} {deck} > myout.out\n\
         awk 'BEGIN{{ORS=\"\\t\"}} /ANA_KEFF/ || /CONVERSION/ {{print $7\" \"$8;}}' {deck}_res.m > done.out\n",
        queue = defaults.queue,
        cores = defaults.omp_cores,
        deck = defaults.deck_name,
    )
}

/// Writes a batch of independent scenario decks. One scenario's write
/// failure does not prevent the remaining scenarios from being attempted;
/// each outcome is reported alongside its deck name.
pub fn write_scenarios(
    scenarios: &[(String, String)],
    dir: &Path,
) -> Vec<(String, DeckResult<PathBuf>)> {
    scenarios
        .iter()
        .map(|(name, text)| (name.clone(), write_deck_file(dir, name, text)))
        .collect()
}
