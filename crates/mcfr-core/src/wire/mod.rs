//! Deck chain for a silver wire depleted by a decaying fuel salt.
//!
//! The irradiating salt is not a critical core here; it is a decay source
//! whose composition changes between burnup samples. One deck is built per
//! fuel burnup interval, carrying that interval's fuel snapshot as the
//! radioactive source and restarting the wire's depletion state from the
//! previous step's binary work file. Steps must therefore be run strictly
//! in index order; a broken step poisons every step after it.

use crate::analysis::MaterialHistory;
use crate::deck::write_deck_file;
use crate::domain::{DeckError, DeckResult, ReactorDefaults};
use crate::geometry::{WireGeometry, WireImmersion};
use crate::materials::{material_lines, silver_card};
use std::path::{Path, PathBuf};

/// Default base name of the per-step deck files.
pub const WIRE_DECK_BASE: &str = "wire_step";

/// Restart reference into the previous step's persisted solver state.
///
/// The day offset is the negative of the previous step's cumulative day;
/// the solver uses the signed value to seek back into the work file, so it
/// must be emitted exactly as computed.
#[derive(Debug, Clone, PartialEq)]
pub struct RestartRef {
    pub offset_days: f64,
    pub file: String,
}

/// One interval of the wire-exposure chain.
#[derive(Debug, Clone, PartialEq)]
pub struct WireStep {
    /// 1-based step index.
    pub index: usize,
    /// Cumulative day at the end of this interval.
    pub day: f64,
    /// Length of this interval [days].
    pub interval_days: f64,
    /// Restart into the previous step's state; `None` for step 1.
    pub restart: Option<RestartRef>,
}

/// Builds the per-step deck sequence from a fuel depletion history.
#[derive(Debug)]
pub struct WireStepChain<'a> {
    geometry: WireGeometry,
    fuel: &'a MaterialHistory,
    defaults: &'a ReactorDefaults,
    deck_base: String,
}

impl<'a> WireStepChain<'a> {
    pub fn new(
        geometry: WireGeometry,
        fuel: &'a MaterialHistory,
        defaults: &'a ReactorDefaults,
    ) -> DeckResult<Self> {
        fuel.validate()?;
        if fuel.step_count() < 2 {
            return Err(DeckError::chain_break(
                "CHAIN.FUEL_SAMPLES",
                format!(
                    "fuel history has {} sample(s); at least two are needed to form an interval",
                    fuel.step_count()
                ),
            ));
        }
        Ok(Self {
            geometry,
            fuel,
            defaults,
            deck_base: WIRE_DECK_BASE.to_string(),
        })
    }

    pub fn with_deck_base(mut self, deck_base: impl Into<String>) -> Self {
        self.deck_base = deck_base.into();
        self
    }

    pub fn deck_file_name(&self, index: usize) -> String {
        format!("{}-{:03}", self.deck_base, index)
    }

    fn work_file_name(&self, index: usize) -> String {
        format!("{}-{:03}.wrk", self.deck_base, index)
    }

    /// The ordered step sequence: one step per burnup interval, N-1 steps
    /// for N fuel samples.
    pub fn steps(&self) -> Vec<WireStep> {
        (1..self.fuel.step_count())
            .map(|s| {
                let day = self.fuel.days[s];
                let prev_day = self.fuel.days[s - 1];
                let restart = (s > 1).then(|| RestartRef {
                    offset_days: -prev_day,
                    file: self.work_file_name(s - 1),
                });
                WireStep {
                    index: s,
                    day,
                    interval_days: day - prev_day,
                    restart,
                }
            })
            .collect()
    }

    fn volume_cards(&self) -> String {
        match self.geometry.immersion() {
            WireImmersion::FullySubmerged => format!(
                "\n% Volumes\n\
                 set mvol fuel   0  {fuel}\n\
                 set mvol silver 0  {wire}\n",
                fuel = self.geometry.fuel_volume(),
                wire = self.geometry.wire_volume(),
            ),
            WireImmersion::HalfSubmerged => format!(
                "\n% Volumes\n\
                 set mvol fuel     0  {fuel}\n\
                 set mvol silver   0  {wire}\n\
                 set mvol r-silver 0  {fuel}\n",
                fuel = self.geometry.fuel_volume(),
                wire = self.geometry.wire_volume(),
            ),
        }
    }

    /// Complete deck text for one step. Step indices produced by
    /// [`WireStepChain::steps`] always have a fuel snapshot, so assembly
    /// cannot fail.
    pub fn deck_for(&self, step: &WireStep) -> String {
        let mut deck = "set title \"Activated wire in decaying fuel\"\n".to_string();
        deck.push_str(&self.geometry.surfaces_and_cells());
        deck.push_str(&silver_card(
            "silver",
            self.defaults.silver_temp_k,
            &self.defaults.xs_suffix_silver,
            true,
        ));
        if self.geometry.immersion() == WireImmersion::HalfSubmerged {
            deck.push_str(&silver_card(
                "r-silver",
                self.defaults.silver_temp_k,
                &self.defaults.xs_suffix_silver,
                false,
            ));
        }
        deck.push_str(&self.volume_cards());
        deck.push_str(self.defaults.nuc_libs.path_cards());
        deck.push_str(&self.defaults.group_constant_cards());

        deck.push_str(&format!(
            "\n% Depletion\n\
             set inventory all\n\
             dep daytot {day}\n\
             \n\
             % Flux spectrum\n\
             det flux de fluxgrid dm silver\n\
             ene fluxgrid 3 500 1e-11 2e1\n\
             \n\
             % Write binary restart file\n\
             set rfw 1\n",
            day = step.day,
        ));
        if let Some(restart) = &step.restart {
            deck.push_str(&format!(
                "\n% Resume depletion state of the previous step\n\
                 set rfr {offset} \"{file}\"\n",
                offset = restart.offset_days,
                file = restart.file,
            ));
        }

        deck.push_str(&format!(
            "\n% Radioactive decay source:\n\
             src 1 n sg fuel 1\n\
             \n\
             % Options:\n\
             set nps 100000000\n\
             \n\
             % --- materials ---\n\
             mat fuel sum fix \"{lib}\" {temp} rgb 50 210 50\n",
            lib = self.defaults.xs_suffix,
            temp = self.defaults.temp_k,
        ));
        let snapshot = self.fuel.snapshot(step.index);
        for line in material_lines(&snapshot, &self.defaults.xs_suffix) {
            deck.push_str(&line);
            deck.push('\n');
        }
        deck
    }

    /// Writes every step deck in index order. The first failure is a
    /// chain break: later steps would restart from state that will never
    /// exist, so nothing after the failure is attempted. Decks already
    /// written stay on disk.
    pub fn write_all(&self, dir: &Path) -> DeckResult<Vec<PathBuf>> {
        let mut written = Vec::new();
        for step in self.steps() {
            let text = self.deck_for(&step);
            let path = write_deck_file(dir, &self.deck_file_name(step.index), &text).map_err(
                |error| {
                    DeckError::chain_break(
                        "CHAIN.DECK_WRITE",
                        format!("chain stopped at step {}: {}", step.index, error),
                    )
                },
            )?;
            written.push(path);
        }
        Ok(written)
    }

    /// Submission script running every step consecutively; the restart
    /// files force this ordering.
    pub fn job_script(&self) -> String {
        let mut script = format!(
            "#!/bin/bash\n\
             #PBS -V\n\
             #PBS -N S2-wire\n\
             #PBS -q {queue}\n\
             #PBS -l nodes=1:ppn={cores}\n\
             \n\
             hostname\n\
             rm -f donewire.dat\n\
             cd ${{PBS_O_WORKDIR}}\n\
             module load mpi\n\
             module load serpent\n",
            queue = self.defaults.queue,
            cores = self.defaults.omp_cores,
        );
        for step in self.steps() {
            script.push_str(&format!(
                "\nsss2 -omp {cores} {deck} > myout_{index:03}.out",
                cores = self.defaults.omp_cores,
                deck = self.deck_file_name(step.index),
                index = step.index,
            ));
        }
        script.push('\n');
        script
    }
}

#[cfg(test)]
mod tests {
    use super::{WireStepChain, WIRE_DECK_BASE};
    use crate::analysis::MaterialHistory;
    use crate::domain::{DeckErrorCategory, ReactorDefaults};
    use crate::geometry::{WireGeometry, WireImmersion};
    use crate::materials::nuclide::Zai;
    use std::fs;
    use tempfile::TempDir;

    fn fuel_history() -> MaterialHistory {
        MaterialHistory {
            days: vec![0.0, 7.0, 21.0, 49.0],
            names: vec![
                "total".to_string(),
                "Na23".to_string(),
                "Cl37".to_string(),
                "U235".to_string(),
            ],
            zai: vec![Zai(0), Zai(110230), Zai(170370), Zai(922350)],
            adens: vec![
                vec![1.0, 1.0, 1.0, 1.0],
                vec![0.3, 0.3, 0.3, 0.3],
                vec![0.3, 0.3, 0.3, 0.3],
                vec![0.1, 0.09, 0.08, 0.07],
            ],
            burnup: vec![],
        }
    }

    fn wire() -> WireGeometry {
        WireGeometry::new(0.2, 2.0, 100.0, WireImmersion::FullySubmerged)
    }

    #[test]
    fn four_samples_make_three_chained_steps() {
        let fuel = fuel_history();
        let defaults = ReactorDefaults::default();
        let chain = WireStepChain::new(wire(), &fuel, &defaults).expect("valid history");
        let steps = chain.steps();

        assert_eq!(steps.len(), 3);
        assert!(steps[0].restart.is_none());
        assert_eq!(steps[0].interval_days, 7.0);

        let restart = steps[1].restart.as_ref().expect("step 2 restarts");
        assert_eq!(restart.offset_days, -7.0);
        assert_eq!(restart.file, format!("{WIRE_DECK_BASE}-001.wrk"));

        let restart = steps[2].restart.as_ref().expect("step 3 restarts");
        assert_eq!(restart.offset_days, -21.0);
        assert_eq!(restart.file, format!("{WIRE_DECK_BASE}-002.wrk"));
    }

    #[test]
    fn step_one_deck_has_no_restart_card_but_writes_state() {
        let fuel = fuel_history();
        let defaults = ReactorDefaults::default();
        let chain = WireStepChain::new(wire(), &fuel, &defaults).expect("valid history");
        let steps = chain.steps();

        let first = chain.deck_for(&steps[0]);
        assert!(first.contains("set rfw 1"));
        assert!(!first.contains("set rfr"));
        assert!(first.contains("dep daytot 7"));
        assert!(first.contains("src 1 n sg fuel 1"));

        let second = chain.deck_for(&steps[1]);
        assert!(second.contains("set rfr -7 \"wire_step-001.wrk\""));
        assert!(second.contains("dep daytot 21"));
    }

    #[test]
    fn step_decks_carry_the_interval_fuel_snapshot() {
        let fuel = fuel_history();
        let defaults = ReactorDefaults::default();
        let chain = WireStepChain::new(wire(), &fuel, &defaults).expect("valid history");
        let steps = chain.steps();

        let second = chain.deck_for(&steps[1]);
        // U235 density at day index 2
        assert!(second.contains("92235.09c    0.08"));
        assert!(second.contains("mat fuel sum fix \"09c\" 900"));
    }

    #[test]
    fn decks_are_written_in_index_order() {
        let temp = TempDir::new().expect("tempdir should be created");
        let fuel = fuel_history();
        let defaults = ReactorDefaults::default();
        let chain = WireStepChain::new(wire(), &fuel, &defaults).expect("valid history");

        let written = chain.write_all(temp.path()).expect("all steps written");
        assert_eq!(written.len(), 3);
        for (i, path) in written.iter().enumerate() {
            assert!(path.ends_with(format!("wire_step-{:03}", i + 1)));
            assert!(!fs::read_to_string(path).expect("readable").is_empty());
        }
    }

    #[test]
    fn single_sample_history_breaks_the_chain_up_front() {
        let mut fuel = fuel_history();
        fuel.days = vec![0.0];
        for row in &mut fuel.adens {
            row.truncate(1);
        }
        let defaults = ReactorDefaults::default();
        let error = WireStepChain::new(wire(), &fuel, &defaults).expect_err("too short");
        assert_eq!(error.category(), DeckErrorCategory::ChainBreak);
    }

    #[test]
    fn job_script_runs_steps_consecutively() {
        let fuel = fuel_history();
        let defaults = ReactorDefaults::default();
        let chain = WireStepChain::new(wire(), &fuel, &defaults).expect("valid history");
        let script = chain.job_script();

        assert!(script.contains("#PBS -N S2-wire"));
        let first = script.find("wire_step-001").expect("step 1");
        let second = script.find("wire_step-002").expect("step 2");
        let third = script.find("wire_step-003").expect("step 3");
        assert!(first < second && second < third);
    }
}
