//! Core library for generating Monte Carlo burnup decks of molten
//! chloride fast reactors with silver transmutation instrumentation.
//!
//! The crate produces complete solver input decks (geometry, materials,
//! reprocessing, depletion schedule) for spherical and cylindrical salt
//! cores, chains per-interval decks for an immersed silver wire, and
//! post-processes depletion results into isotope rankings and resistivity
//! estimates. Running the solver itself is out of scope; the outputs are
//! text decks and batch submission scripts.

pub mod analysis;
pub mod deck;
pub mod domain;
pub mod geometry;
pub mod materials;
pub mod reprocessing;
pub mod schedule;
pub mod wire;

pub use domain::{DataLibrary, DeckError, DeckErrorCategory, DeckResult, ReactorDefaults};
