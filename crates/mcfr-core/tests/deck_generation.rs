use mcfr_core::deck::SphericalDeck;
use mcfr_core::domain::ReactorDefaults;
use mcfr_core::geometry::SphericalGeometry;
use mcfr_core::materials::PreparedSalt;
use mcfr_core::schedule::schedule;
use std::fs;
use tempfile::TempDir;

const SALT_CARD: &str = "% NaCl-UCl3 fuel salt\n\
                         mat fuelsalt -3.4856 burn 1 tmp 900.0\n\
                         11023.09c 0.0123\n\
                         17037.09c 0.0456\n";

fn salt() -> PreparedSalt {
    PreparedSalt::new("66.66%NaCl+33.34%UCl3", 0.1975, SALT_CARD).expect("valid salt")
}

fn sphere_deck<'a>(
    salt: &'a PreparedSalt,
    defaults: &'a ReactorDefaults,
    shell_radius: f64,
) -> SphericalDeck<'a> {
    SphericalDeck {
        geometry: SphericalGeometry::from_shell_request(300.0, 500.0, shell_radius)
            .expect("valid geometry"),
        salt,
        defaults,
        deplete_years: 10.0,
        refuel_flow: 2.824e-10,
    }
}

#[test]
fn shell_adds_exactly_one_silver_surface_cell_and_material() {
    let salt = salt();
    let defaults = ReactorDefaults::default();

    let bare = sphere_deck(&salt, &defaults, -1.0).deck_text().expect("assembles");
    let shelled = sphere_deck(&salt, &defaults, 400.0).deck_text().expect("assembles");

    assert_eq!(bare.matches("mat silver").count(), 0);
    assert_eq!(shelled.matches("mat silver").count(), 1);
    assert_eq!(shelled.matches("cell 20  0  silver").count(), 1);
    // inner and outer shell surface replace the single reflector boundary
    assert_eq!(
        shelled.matches("surf ").count(),
        bare.matches("surf ").count() + 2
    );
    assert_eq!(shelled.matches("det silverflux").count(), 1);
    assert_eq!(bare.matches("det silverflux").count(), 0);
}

#[test]
fn deck_writes_are_deterministic_and_byte_identical() {
    let temp = TempDir::new().expect("tempdir should be created");
    let salt = salt();
    let defaults = ReactorDefaults::default();
    let deck = sphere_deck(&salt, &defaults, 400.0);

    let first_path = deck.write(&temp.path().join("a")).expect("first write");
    let second_path = deck.write(&temp.path().join("b")).expect("second write");

    let first = fs::read(&first_path).expect("readable");
    let second = fs::read(&second_path).expect("readable");
    assert_eq!(first, second);
    assert!(first.ends_with(b"\n"));
}

#[test]
fn schedule_totals_follow_the_tiered_calendar() {
    let close = |value: f64, target: f64| (value - target).abs() < 1.0e-9;

    assert!(close(schedule(1.0).iter().sum(), 366.0));
    assert!(close(schedule(10.0).iter().sum(), 3653.0));
    // one more decade block per additional ten years
    assert!(close(schedule(20.0).iter().sum(), 7306.0));
    assert!(close(schedule(30.0).iter().sum(), 10959.0));
}

#[test]
fn short_campaign_uses_only_the_first_year_table() {
    let steps = schedule(1.0);
    assert_eq!(steps.len(), 22);
    let decade = schedule(10.0);
    assert_eq!(decade.len(), 22 + 63);
}
