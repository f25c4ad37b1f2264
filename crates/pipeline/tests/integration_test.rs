//! Integration tests for the pipeline.
//!
//! These tests verify that filtering, scoring, diversity, and the
//! recommendation modes work together in a realistic scenario.

use catalog::Item;
use pipeline::{recommend, RecommendOptions};
use profile::UserProfile;

fn create_test_setup() -> (UserProfile, Vec<Item>) {
    let mut profile = UserProfile::new();

    // A history leaning heavily towards Action, with one Drama detour.
    let heat = Item::new("heat", "Heat")
        .with_genres(&["Action", "Crime"])
        .with_actors(&["Al Pacino", "Robert De Niro"])
        .with_director("Michael Mann")
        .with_source("alpha")
        .with_year(1995)
        .with_rating(8.3);
    let ronin = Item::new("ronin", "Ronin")
        .with_genres(&["Action", "Thriller"])
        .with_actors(&["Robert De Niro"])
        .with_director("John Frankenheimer")
        .with_source("alpha")
        .with_year(1998)
        .with_rating(7.2);
    let marriage = Item::new("marriage", "Marriage Story")
        .with_genres(&["Drama"])
        .with_director("Noah Baumbach")
        .with_source("beta")
        .with_year(2019)
        .with_rating(7.9);

    profile.record_view(&heat, Some(10_200), true, 1_000);
    profile.record_view(&ronin, Some(7_300), true, 2_000);
    profile.record_view(&marriage, Some(1_500), false, 3_000);
    profile.rate_item("heat", 9.0, 4_000);

    let candidates = vec![
        heat, // already watched, should never surface by default
        Item::new("collateral", "Collateral")
            .with_genres(&["Action", "Thriller"])
            .with_actors(&["Tom Cruise"])
            .with_director("Michael Mann")
            .with_source("alpha")
            .with_year(2004)
            .with_rating(7.5),
        Item::new("sicario", "Sicario")
            .with_genres(&["Action", "Crime"])
            .with_actors(&["Emily Blunt"])
            .with_director("Denis Villeneuve")
            .with_source("beta")
            .with_year(2015)
            .with_rating(7.6),
        Item::new("paddington", "Paddington")
            .with_genres(&["Comedy", "Family"])
            .with_source("beta")
            .with_year(2014)
            .with_rating(7.2),
        Item::new("barry", "Barry Lyndon")
            .with_genres(&["Drama"])
            .with_director("Stanley Kubrick")
            .with_source("alpha")
            .with_year(1975)
            .with_rating(8.1),
    ];

    (profile, candidates)
}

#[test]
fn test_full_run_ranks_preferred_genres_first() {
    let (profile, candidates) = create_test_setup();

    let results = recommend(&profile, &candidates, 5, &RecommendOptions::default());

    assert!(!results.is_empty(), "should produce recommendations");
    assert!(
        results.iter().all(|c| c.item.id != "heat"),
        "watched items must never surface"
    );
    assert!(
        results[0].item.genres.contains(&"Action".to_string()),
        "top pick should come from the dominant genre"
    );
}

#[test]
fn test_breakdown_values_stay_normalized() {
    let (profile, candidates) = create_test_setup();

    let results = recommend(
        &profile,
        &candidates,
        5,
        &RecommendOptions {
            diversity_factor: 0.0,
            ..Default::default()
        },
    );

    for candidate in &results {
        let b = &candidate.breakdown;
        for (name, value) in [
            ("genre", b.genre),
            ("actor", b.actor),
            ("director", b.director),
            ("theme", b.theme),
            ("source", b.source),
            ("decade", b.decade),
            ("rating_boost", b.rating_boost),
        ] {
            assert!(
                (0.0..=1.0).contains(&value),
                "{} sub-score out of range: {}",
                name,
                value
            );
        }
        assert!((0.0..=1.0).contains(&candidate.score));
    }
}

#[test]
fn test_diversity_pass_spreads_genres() {
    let (profile, _) = create_test_setup();

    // Many same-genre, same-source candidates with one outlier.
    let mut candidates: Vec<Item> = (0..8)
        .map(|i| {
            Item::new(format!("a{i}"), format!("Action {i}"))
                .with_genres(&["Action"])
                .with_source("alpha")
                .with_rating(8.0)
        })
        .collect();
    candidates.push(
        Item::new("outlier", "Quiet Drama")
            .with_genres(&["Drama"])
            .with_actors(&["Robert De Niro"])
            .with_source("beta")
            .with_rating(7.9),
    );

    let diverse = recommend(
        &profile,
        &candidates,
        6,
        &RecommendOptions {
            diversity_factor: 0.4,
            ..Default::default()
        },
    );
    let flat = recommend(
        &profile,
        &candidates,
        6,
        &RecommendOptions {
            diversity_factor: 0.0,
            ..Default::default()
        },
    );

    assert!(
        diverse.iter().any(|c| c.item.id == "outlier"),
        "diversity pass should pull the off-genre item in"
    );
    assert!(
        diverse.len() <= flat.len(),
        "diversity never returns more than plain truncation"
    );
}
