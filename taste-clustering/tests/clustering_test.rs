use chrono::{DateTime, Duration, Utc};
use taste_clustering::{CancelToken, PersonaManager, TrainingSample};
use taste_core::config::ClusteringConfig;
use taste_core::errors::ClusteringError;
use taste_core::models::PersonaSet;
use taste_core::EmbeddingVector;
use taste_decay::DecayEngine;

const DIM: usize = 8;

/// A vector close to the `axis`-th basis vector, with deterministic jitter.
fn near_axis(axis: usize, jitter_step: usize) -> EmbeddingVector {
    let mut v = vec![0.01 * (jitter_step % 7) as f32; DIM];
    v[axis] = 1.0 + 0.02 * (jitter_step % 5) as f32;
    EmbeddingVector::new(v)
}

fn axis_samples(axis: usize, count: usize, prefix: &str, now: DateTime<Utc>) -> Vec<TrainingSample> {
    (0..count)
        .map(|i| {
            TrainingSample::new(
                format!("{}{}", prefix, i),
                near_axis(axis, i),
                now - Duration::days((i % 30) as i64),
            )
        })
        .collect()
}

fn manager() -> PersonaManager {
    PersonaManager::new(ClusteringConfig::default(), DecayEngine::default())
}

// ── Scenario: 40 liked items in two well-separated clusters ──────────────

#[test]
fn two_well_separated_clusters_yield_two_personas() {
    let now = Utc::now();
    let mut samples = axis_samples(0, 20, "a", now);
    samples.extend(axis_samples(1, 20, "b", now));

    let set = manager()
        .refresh("u1", &samples, None, Some(2), now, &CancelToken::new())
        .unwrap();

    assert_eq!(set.personas.len(), 2);
    assert_eq!(set.k, 2);
    for p in &set.personas {
        assert_eq!(p.member_count, 20, "clusters should split evenly");
    }
    assert!(
        set.silhouette_score > 0.5,
        "well-separated input should clear the quality threshold, got {}",
        set.silhouette_score
    );
    assert!(!set.quality_low);
    assert_eq!(set.training_sample_count, 40);
    assert_eq!(set.version, 1);
}

// ── Minimum-size guard ───────────────────────────────────────────────────

#[test]
fn below_minimum_items_fails_with_insufficient_data() {
    let now = Utc::now();
    let samples = axis_samples(0, 10, "a", now);

    let err = manager()
        .refresh("u1", &samples, None, None, now, &CancelToken::new())
        .unwrap_err();
    match err {
        ClusteringError::InsufficientData { required, actual } => {
            assert_eq!(required, 30);
            assert_eq!(actual, 10);
        }
        other => panic!("expected InsufficientData, got {:?}", other),
    }
}

#[test]
fn zero_items_fails_with_insufficient_data() {
    let err = manager()
        .refresh("u1", &[], None, None, Utc::now(), &CancelToken::new())
        .unwrap_err();
    assert!(matches!(err, ClusteringError::InsufficientData { actual: 0, .. }));
}

// ── Degenerate input ─────────────────────────────────────────────────────

#[test]
fn identical_embeddings_are_degenerate() {
    let now = Utc::now();
    let samples: Vec<TrainingSample> = (0..40)
        .map(|i| {
            TrainingSample::new(
                format!("v{}", i),
                EmbeddingVector::new(vec![0.5; DIM]),
                now,
            )
        })
        .collect();

    let err = manager()
        .refresh("u1", &samples, None, None, now, &CancelToken::new())
        .unwrap_err();
    assert!(matches!(err, ClusteringError::Degenerate { .. }), "got {:?}", err);
}

#[test]
fn degenerate_collapse_builds_a_single_full_activity_persona() {
    let now = Utc::now();
    let samples: Vec<TrainingSample> = (0..40)
        .map(|i| {
            TrainingSample::new(
                format!("v{}", i),
                EmbeddingVector::new(vec![0.5; DIM]),
                now - Duration::days(1),
            )
        })
        .collect();

    let set = manager().single_persona_set("u1", &samples, None, now);
    assert_eq!(set.personas.len(), 1);
    assert_eq!(set.k, 1);
    assert_eq!(set.personas[0].activity_score.value(), 1.0);
    assert_eq!(set.personas[0].member_count, 40);
    assert!(set.quality_low);
}

// ── k search ─────────────────────────────────────────────────────────────

#[test]
fn k_search_finds_a_k_in_the_configured_range() {
    let now = Utc::now();
    // Five separated blobs of 12 items each.
    let mut samples = Vec::new();
    for axis in 0..5 {
        samples.extend(axis_samples(axis, 12, &format!("c{}-", axis), now));
    }

    let set = manager()
        .refresh("u1", &samples, None, None, now, &CancelToken::new())
        .unwrap();
    assert!((5..=8).contains(&set.k), "k={} outside 5..=8", set.k);
    assert_eq!(
        set.personas.iter().map(|p| p.member_count).sum::<usize>(),
        60
    );
    // Persona indices are contiguous from 0.
    for (i, p) in set.personas.iter().enumerate() {
        assert_eq!(p.persona_index, i);
    }
}

// ── Label carry-over ─────────────────────────────────────────────────────

#[test]
fn labels_carry_to_the_nearest_new_cluster() {
    let now = Utc::now();
    let mut samples = axis_samples(0, 20, "a", now);
    samples.extend(axis_samples(1, 20, "b", now));
    let m = manager();

    let first = m
        .refresh("u1", &samples, None, Some(2), now, &CancelToken::new())
        .unwrap();
    // Label the persona sitting near axis 0.
    let axis0_index = first
        .nearest_persona(&near_axis(0, 0))
        .map(|(i, _)| i)
        .unwrap();
    let labeled = first.with_label(axis0_index, Some("cooking".into())).unwrap();

    let second = m
        .refresh("u1", &samples, Some(&labeled), Some(2), now, &CancelToken::new())
        .unwrap();
    assert_eq!(second.version, labeled.version + 1);

    let carried: Vec<&taste_core::models::Persona> = second
        .personas
        .iter()
        .filter(|p| p.label.as_deref() == Some("cooking"))
        .collect();
    assert_eq!(carried.len(), 1, "label must carry to exactly one cluster");
    // And it carried to the axis-0 cluster, not the axis-1 one.
    let sim = carried[0].centroid.cosine_similarity(&near_axis(0, 0));
    assert!(sim > 0.9, "label landed on the wrong cluster (sim {})", sim);
}

#[test]
fn label_is_cleared_when_no_cluster_matches() {
    let now = Utc::now();
    let m = manager();

    let mut samples = axis_samples(0, 20, "a", now);
    samples.extend(axis_samples(1, 20, "b", now));
    let first = m
        .refresh("u1", &samples, None, Some(2), now, &CancelToken::new())
        .unwrap();
    let labeled = first.with_label(0, Some("old interest".into())).unwrap();

    // Retrain on completely different axes: nothing matches the old centroid.
    let mut shifted = axis_samples(4, 20, "x", now);
    shifted.extend(axis_samples(5, 20, "y", now));
    let second = m
        .refresh("u1", &shifted, Some(&labeled), Some(2), now, &CancelToken::new())
        .unwrap();

    assert!(
        second.personas.iter().all(|p| p.label.is_none()),
        "no label should survive a full interest shift"
    );
}

// ── Activity initialization ──────────────────────────────────────────────

#[test]
fn stale_cluster_starts_at_decayed_activity() {
    let now = Utc::now();
    // One fresh blob, one blob untouched for 60 days.
    let fresh = axis_samples(0, 20, "f", now);
    let stale: Vec<TrainingSample> = (0..20)
        .map(|i| {
            TrainingSample::new(
                format!("s{}", i),
                near_axis(1, i),
                now - Duration::days(60),
            )
        })
        .collect();
    let mut samples = fresh;
    samples.extend(stale);

    let set = manager()
        .refresh("u1", &samples, None, Some(2), now, &CancelToken::new())
        .unwrap();

    let fresh_p = set.nearest_persona(&near_axis(0, 0)).map(|(i, _)| i).unwrap();
    let stale_p = 1 - fresh_p;
    assert_eq!(set.personas[fresh_p].activity_score.value(), 1.0);
    let stale_activity = set.personas[stale_p].activity_score.value();
    let expected = 0.1 + 0.9 * (-60.0f64 / 14.0).exp();
    assert!(
        (stale_activity - expected).abs() < 1e-6,
        "expected decayed start ≈{}, got {}",
        expected,
        stale_activity
    );
}

// ── update_activity ──────────────────────────────────────────────────────

#[test]
fn update_activity_boosts_only_the_nearest_persona() {
    let now = Utc::now();
    let mut samples = axis_samples(0, 20, "a", now);
    // Make the axis-1 blob stale so its activity sits below 1.0.
    samples.extend((0..20).map(|i| {
        TrainingSample::new(format!("b{}", i), near_axis(1, i), now - Duration::days(45))
    }));
    let m = manager();
    let set = m
        .refresh("u1", &samples, None, Some(2), now, &CancelToken::new())
        .unwrap();

    let stale_index = set.nearest_persona(&near_axis(1, 0)).map(|(i, _)| i).unwrap();
    let before = set.personas[stale_index].activity_score.value();

    let boosted = m
        .update_activity(&set, &near_axis(1, 3), now)
        .expect("non-empty set must boost");
    let after = boosted.personas[stale_index].activity_score.value();
    assert!(
        (after - (before + 0.3).min(1.0)).abs() < 1e-9,
        "expected boost by 0.3: {} -> {}",
        before,
        after
    );
    // The other persona is untouched.
    let other = 1 - stale_index;
    assert_eq!(boosted.personas[other], set.personas[other]);
    assert_eq!(boosted.revision, set.revision + 1);
    assert_eq!(boosted.version, set.version);
}

#[test]
fn update_activity_on_empty_set_is_none() {
    let set = PersonaSet::empty("u1", Utc::now());
    assert!(manager()
        .update_activity(&set, &near_axis(0, 0), Utc::now())
        .is_none());
}

// ── Cancellation ─────────────────────────────────────────────────────────

#[test]
fn cancelled_refresh_returns_cancelled() {
    let now = Utc::now();
    let mut samples = axis_samples(0, 20, "a", now);
    samples.extend(axis_samples(1, 20, "b", now));

    let token = CancelToken::new();
    token.cancel();
    let err = manager()
        .refresh("u1", &samples, None, None, now, &token)
        .unwrap_err();
    assert!(matches!(err, ClusteringError::Cancelled));
}

// ── Determinism ──────────────────────────────────────────────────────────

#[test]
fn refresh_is_deterministic_for_a_fixed_seed_and_input() {
    let now = Utc::now();
    let mut samples = axis_samples(0, 20, "a", now);
    samples.extend(axis_samples(1, 20, "b", now));
    let m = manager();

    let a = m
        .refresh("u1", &samples, None, None, now, &CancelToken::new())
        .unwrap();
    let b = m
        .refresh("u1", &samples, None, None, now, &CancelToken::new())
        .unwrap();
    assert_eq!(a, b);
}
