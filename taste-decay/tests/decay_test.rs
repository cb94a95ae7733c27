use chrono::{Duration, Utc};
use taste_core::config::DecayConfig;
use taste_core::models::{ActivityScore, Persona};
use taste_core::EmbeddingVector;
use taste_decay::{formula, DecayEngine};

fn make_persona(activity: f64, days_since_activity: i64) -> Persona {
    Persona {
        user_id: "u1".to_string(),
        persona_index: 0,
        centroid: EmbeddingVector::new(vec![1.0, 0.0, 0.0]),
        activity_score: ActivityScore::new(activity),
        last_activity_timestamp: Utc::now() - Duration::days(days_since_activity),
        member_count: 20,
        sample_item_ids: vec!["v1".to_string()],
        label: None,
    }
}

// ── Monotonically non-increasing over time ───────────────────────────────

#[test]
fn monotonically_non_increasing_over_time() {
    let engine = DecayEngine::default();
    let now = Utc::now();
    let p = make_persona(1.0, 0);

    let mut prev = 1.0;
    for days in [0, 1, 7, 14, 30, 90, 180, 365] {
        let d = engine.decayed_activity(&p, now + Duration::days(days));
        assert!(
            d <= prev + f64::EPSILON,
            "Not monotonic at day {}: {} > {}",
            days,
            d,
            prev
        );
        prev = d;
    }
}

// ── Identity at zero elapsed time ────────────────────────────────────────

#[test]
fn decay_at_zero_elapsed_is_identity() {
    for activity in [0.1, 0.25, 0.5, 0.75, 1.0] {
        let d = formula::decay(activity, 0.0, 14.0, 0.1);
        assert!(
            (d - activity).abs() < 1e-12,
            "decay({}, 0) should be identity, got {}",
            activity,
            d
        );
    }
}

// ── Bounded by [floor, activity] ─────────────────────────────────────────

#[test]
fn result_stays_within_floor_and_activity() {
    for days in [0, 1, 10, 100, 10_000] {
        let d = formula::decay(0.8, days as f64, 14.0, 0.1);
        assert!(d <= 0.8 + f64::EPSILON, "day {}: {} above start", days, d);
        assert!(d >= 0.1, "day {}: {} below floor", days, d);
    }
}

// ── Half-life override via config ────────────────────────────────────────

#[test]
fn shorter_half_life_decays_faster() {
    let fast = DecayEngine::new(DecayConfig {
        half_life_days: 7.0,
        ..DecayConfig::default()
    });
    let slow = DecayEngine::new(DecayConfig {
        half_life_days: 28.0,
        ..DecayConfig::default()
    });
    let now = Utc::now();
    let p = make_persona(1.0, 14);

    let d_fast = fast.decayed_activity(&p, now);
    let d_slow = slow.decayed_activity(&p, now);
    assert!(
        d_fast < d_slow,
        "7-day half-life should decay faster: {} vs {}",
        d_fast,
        d_slow
    );
}

// ── 30-day reference scenario ────────────────────────────────────────────

#[test]
fn thirty_days_dormant_matches_expected_value() {
    // floor + (1 − floor)·e^(−30/14) ≈ 0.1 + 0.9·0.1172 ≈ 0.2055
    let engine = DecayEngine::default();
    let now = Utc::now();
    let p = make_persona(1.0, 30);

    let d = engine.decayed_activity(&p, now);
    let expected = 0.1 + 0.9 * (-30.0f64 / 14.0).exp();
    assert!(
        (d - expected).abs() < 1e-6,
        "expected ≈{}, got {}",
        expected,
        d
    );
}

// ── Dormant interests survive ────────────────────────────────────────────

#[test]
fn year_dormant_persona_retains_floor_weight() {
    let engine = DecayEngine::default();
    let now = Utc::now();
    let p = make_persona(1.0, 365);

    let d = engine.decayed_activity(&p, now);
    assert!(d > 0.1 - f64::EPSILON, "must never fall below the floor");
    assert!(d < 0.101, "a year dormant should sit at the floor, got {}", d);
}
