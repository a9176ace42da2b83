use anyhow::Result;
use proptest::prelude::*;
use sibyl::{RecommendationEngine, SibylError};

const EPSILON: f64 = 1e-12;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {}, got {}",
        expected,
        actual
    );
}

/// A mix of likes and dislikes across four users.
fn populated_engine() -> Result<RecommendationEngine> {
    let mut engine = RecommendationEngine::new();
    let rows = [
        ("olivier", "dune", true),
        ("olivier", "solaris", true),
        ("olivier", "stalker", false),
        ("audrey", "dune", true),
        ("audrey", "stalker", true),
        ("audrey", "brazil", false),
        ("marc", "solaris", false),
        ("marc", "brazil", false),
        ("lea", "akira", true),
    ];
    for (user, item, liked) in rows {
        if liked {
            engine.record_like(user, item)?;
        } else {
            engine.record_dislike(user, item)?;
        }
    }
    Ok(engine)
}

const USERS: [&str; 4] = ["olivier", "audrey", "marc", "lea"];

#[test]
fn test_similarity_is_symmetric_and_bounded() -> Result<()> {
    let engine = populated_engine()?;

    for a in USERS {
        for b in USERS {
            let ab = engine.similarity(a, b)?;
            let ba = engine.similarity(b, a)?;
            assert_close(ab, ba);
            assert!((-1.0..=1.0).contains(&ab), "{} vs {} = {}", a, b, ab);
        }
    }
    Ok(())
}

#[test]
fn test_self_similarity_is_one() -> Result<()> {
    let engine = populated_engine()?;
    for user in USERS {
        assert_close(engine.similarity(user, user)?, 1.0);
    }
    Ok(())
}

#[test]
fn test_disjoint_users_have_zero_similarity() -> Result<()> {
    let engine = populated_engine()?;
    assert_close(engine.similarity("olivier", "lea")?, 0.0);
    Ok(())
}

#[test]
fn test_mutual_exclusion_after_flips() -> Result<()> {
    let mut engine = populated_engine()?;
    engine.record_dislike("olivier", "dune")?;
    engine.record_like("olivier", "stalker")?;

    let olivier = engine.user("olivier").expect("olivier is recorded");
    assert!(olivier.dislikes().has(&"dune".to_string()));
    assert!(!olivier.likes().has(&"dune".to_string()));
    assert!(olivier.likes().has(&"stalker".to_string()));
    assert!(!olivier.dislikes().has(&"stalker".to_string()));

    for (item_id, item) in engine.items() {
        for user in item.liked_by() {
            assert!(
                !item.disliked_by().has(user),
                "{} both likes and dislikes {}",
                user,
                item_id
            );
        }
    }
    Ok(())
}

#[test]
fn test_similarity_worked_scenario() -> Result<()> {
    let mut s: RecommendationEngine<String, i32> = RecommendationEngine::new();

    s.record_like("olivier", 1)?.record_like("audrey", 1)?;
    assert_close(s.similarity("olivier", "audrey")?, 1.0);

    s.record_like("audrey", 2)?;
    assert_close(s.similarity("olivier", "audrey")?, 0.5);

    s.record_like("audrey", 3)?;
    assert_close(s.similarity("olivier", "audrey")?, 1.0 / 3.0);

    s.record_dislike("audrey", 1)?;
    assert_close(s.similarity("olivier", "audrey")?, -1.0 / 3.0);
    Ok(())
}

#[test]
fn test_prediction_worked_scenario() -> Result<()> {
    let mut s: RecommendationEngine<String, i32> = RecommendationEngine::new();

    s.record_like("olivier", 1)?
        .record_like("audrey", 1)?
        .record_like("audrey", 2)?;
    assert_close(s.prediction("olivier", &2)?, 0.5);

    s.record_like("olivier", 3)?.record_like("audrey", 3)?;
    assert_close(s.prediction("olivier", &2)?, 2.0 / 3.0);
    Ok(())
}

#[test]
fn test_suggestion_scenario() -> Result<()> {
    let mut s: RecommendationEngine = RecommendationEngine::new();
    for item in ["A", "B", "C"] {
        s.record_like("someone", item)?;
        s.record_dislike("someoneelse", item)?;
    }
    s.record_like("me", "A")?;

    let suggestions: Vec<String> = s.suggestion("me")?;
    assert_eq!(suggestions, vec!["B", "C"]);
    assert!(!suggestions.contains(&"A".to_string()));
    Ok(())
}

#[test]
fn test_errors_are_typed_not_nan() -> Result<()> {
    let engine = populated_engine()?;

    assert!(matches!(
        engine.similarity("olivier", "nobody"),
        Err(SibylError::UnknownEntity { .. })
    ));
    assert!(matches!(
        engine.prediction("nobody", "dune"),
        Err(SibylError::UnknownEntity { .. })
    ));
    assert!(matches!(
        engine.prediction("olivier", "metropolis"),
        Err(SibylError::UnknownEntity { .. })
    ));
    assert!(matches!(
        engine.prediction("olivier", ""),
        Err(SibylError::InvalidArgument { .. })
    ));
    assert!(matches!(
        engine.suggestion("nobody"),
        Err(SibylError::UnknownEntity { .. })
    ));

    let mut engine = RecommendationEngine::<String, String>::new();
    assert!(matches!(
        engine.record_like("olivier", "  "),
        Err(SibylError::InvalidArgument { .. })
    ));
    assert_eq!(engine.user_count(), 0);
    Ok(())
}

/// `(user, item, liked)` rows over a small id space, so ratings overlap.
fn feedback() -> impl Strategy<Value = Vec<(u8, u8, bool)>> {
    prop::collection::vec((0u8..6, 0u8..10, any::<bool>()), 1..60)
}

fn engine_from(rows: &[(u8, u8, bool)]) -> RecommendationEngine<u8, u8> {
    let mut engine = RecommendationEngine::new();
    for &(user, item, liked) in rows {
        let recorded = if liked {
            engine.record_like(user, item)
        } else {
            engine.record_dislike(user, item)
        };
        recorded.unwrap();
    }
    engine
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_generated_similarity_is_symmetric_and_bounded(rows in feedback()) {
        let engine = engine_from(&rows);
        let users: Vec<u8> = engine.users().map(|(id, _)| *id).collect();

        for a in &users {
            prop_assert!((engine.similarity(a, a).unwrap() - 1.0).abs() < EPSILON);
            for b in &users {
                let ab = engine.similarity(a, b).unwrap();
                let ba = engine.similarity(b, a).unwrap();
                prop_assert!((ab - ba).abs() < EPSILON, "{} vs {}: {} != {}", a, b, ab, ba);
                prop_assert!((-1.0..=1.0).contains(&ab), "{} vs {} = {}", a, b, ab);
            }
        }
    }

    #[test]
    fn test_generated_predictions_are_bounded(rows in feedback()) {
        let engine = engine_from(&rows);
        let items: Vec<u8> = engine.items().map(|(id, _)| *id).collect();

        for (user, _) in engine.users() {
            for item in &items {
                let score = engine.prediction(user, item).unwrap();
                prop_assert!((-1.0..=1.0).contains(&score), "{} on {} = {}", user, item, score);
            }
        }
    }
}
