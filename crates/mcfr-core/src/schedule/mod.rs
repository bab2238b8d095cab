//! Burnup-step schedules.
//!
//! The day-step tables are literal constants carried over from the original
//! experiment campaign; they refine beginning-of-life steps and land on
//! exact 365/366-day year boundaries. They are deliberately not derived
//! from a formula: restart chaining requires bit-identical step lengths for
//! a given duration tier, so the tables are reproduced verbatim.

/// First year of depletion: sub-day steps for the first day, then weekly
/// steps, then the 14/28/42/44-day pattern. Sums to 366 days.
pub const FIRST_YEAR_STEPS: [f64; 22] = [
    0.05, 0.15, 0.3, 0.5, // 1 day
    1.0, 2.0, 3.0, // 1 week
    7.0, 7.0, 7.0, 14.0, 14.0, 14.0, 14.0, 28.0, 28.0, 28.0, 28.0, 42.0, 42.0, 42.0,
    44.0, // 1 year, 366 days
];

/// Nine further years at a 52-week cadence with +1/+2 day corrections.
/// Sums to 3287 days (seven 365-day years, two 366-day years).
pub const NINE_YEAR_STEPS: [f64; 63] = [
    52.0, 52.0, 52.0, 52.0, 52.0, 52.0, 53.0, // 365
    52.0, 52.0, 52.0, 52.0, 52.0, 52.0, 53.0, // 365
    52.0, 52.0, 52.0, 52.0, 52.0, 52.0, 54.0, // 366
    52.0, 52.0, 52.0, 52.0, 52.0, 52.0, 53.0, // 365
    52.0, 52.0, 52.0, 52.0, 52.0, 52.0, 53.0, // 365
    52.0, 52.0, 52.0, 52.0, 52.0, 52.0, 54.0, // 366
    52.0, 52.0, 52.0, 52.0, 52.0, 52.0, 53.0, // 365
    52.0, 52.0, 52.0, 52.0, 52.0, 52.0, 53.0, // 365
    52.0, 52.0, 52.0, 52.0, 52.0, 52.0, 53.0, // 365
];

/// One additional decade of coarse ~four-month steps. Sums to 3653 days.
pub const TEN_YEAR_STEPS: [f64; 30] = [
    120.0, 120.0, 126.0, 120.0, 120.0, 125.0, 120.0, 120.0, 125.0, 120.0, 120.0, 125.0,
    120.0, 120.0, 126.0, 120.0, 120.0, 125.0, 120.0, 120.0, 125.0, 120.0, 120.0, 125.0,
    120.0, 120.0, 126.0, 120.0, 120.0, 125.0,
];

/// Annotated `daystep` card text of the first-year block.
pub const FIRST_YEAR_CARD: &str = "\
0.05 0.15 0.3 0.5   % 1 day
1 2 3               % 1 week
7 7 7 14 14 14 14 28 28 28 28 42 42 42 44  % 1 year, 366 days
";

/// Annotated `daystep` card text of the nine-year block.
pub const NINE_YEAR_CARD: &str = "\
52 52 52 52 52 52 53    % 365
52 52 52 52 52 52 53    % 365
52 52 52 52 52 52 54    % 366
52 52 52 52 52 52 53    % 365
52 52 52 52 52 52 53    % 365
52 52 52 52 52 52 54    % 366
52 52 52 52 52 52 53    % 365
52 52 52 52 52 52 53    % 365
52 52 52 52 52 52 53    % 365
";

/// Annotated `daystep` card text of the ten-year block.
pub const TEN_YEAR_CARD: &str = "\
120 120 126 120 120 125 120 120 125 120 120 125
120 120 126 120 120 125 120 120 125 120 120 125
120 120 126 120 120 125
";

/// Header cards that precede the step list when depleting with
/// reprocessing.
pub const DEPLETION_HEADER: &str = "
% Depletion cards
set inventory all
dep
pro source_rep
daystep
";

/// Ordered day-step lengths for a requested total duration.
///
/// Selection is tiered and cumulative: more than half a year emits the
/// first-year block, more than nine years appends the nine-year block, and
/// each complete decade beyond the first ten years appends one ten-year
/// block. Nothing is interpolated from `total_years`; only block selection
/// depends on it.
pub fn schedule(total_years: f64) -> Vec<f64> {
    let mut steps = Vec::new();
    if total_years > 0.5 {
        steps.extend_from_slice(&FIRST_YEAR_STEPS);
    }
    if total_years > 9.0 {
        steps.extend_from_slice(&NINE_YEAR_STEPS);
    }
    if total_years > 19.0 {
        for _ in 0..extra_decades(total_years) {
            steps.extend_from_slice(&TEN_YEAR_STEPS);
        }
    }
    steps
}

/// Annotated card text matching [`schedule`] block for block.
pub fn schedule_cards(total_years: f64) -> String {
    let mut cards = String::new();
    if total_years > 0.5 {
        cards.push_str(FIRST_YEAR_CARD);
    }
    if total_years > 9.0 {
        cards.push_str(NINE_YEAR_CARD);
    }
    if total_years > 19.0 {
        for _ in 0..extra_decades(total_years) {
            cards.push_str(TEN_YEAR_CARD);
        }
    }
    cards
}

fn extra_decades(total_years: f64) -> usize {
    ((total_years - 10.0) / 10.0).floor() as usize
}
