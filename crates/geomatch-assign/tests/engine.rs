use geomatch_assign::{AssignEngine, AssignError};
use geomatch_model::{
    DegreeThreshold, GeoPoint, LateralRecord, MatchOutcome, MatchPolicy, RawRecord,
};

fn pool(points: &[(f64, f64)]) -> Vec<RawRecord> {
    points
        .iter()
        .enumerate()
        .map(|(row, &(lat, lon))| {
            RawRecord::new(row, GeoPoint::new(lat, lon), format!("img{row}.jpg"))
        })
        .collect()
}

fn queries(points: &[(f64, f64)]) -> Vec<LateralRecord> {
    points
        .iter()
        .enumerate()
        .map(|(row, &(lat, lon))| LateralRecord::new(row, GeoPoint::new(lat, lon)))
        .collect()
}

fn matched_names(run: &geomatch_assign::AssignmentRun) -> Vec<Option<String>> {
    run.assignments
        .iter()
        .map(|a| a.outcome.filename().map(str::to_string))
        .collect()
}

#[test]
fn exact_coincidence_wins_with_zero_score() {
    let engine = AssignEngine::new(
        pool(&[(52.0, 4.0), (52.5, 4.5), (53.0, 5.0)]),
        MatchPolicy::WithRemoval,
    );
    let run = engine.assign(&queries(&[(52.5, 4.5)])).unwrap();

    match &run.assignments[0].outcome {
        MatchOutcome::Matched { filename, score } => {
            assert_eq!(filename, "img1.jpg");
            assert_eq!(*score, 0.0);
        }
        other => panic!("expected match, got {other:?}"),
    }
}

#[test]
fn nearest_candidate_wins_and_score_sums_both_axes() {
    let candidates = vec![
        RawRecord::new(0, GeoPoint::new(0.0, 0.0), "f1.jpg"),
        RawRecord::new(1, GeoPoint::new(1.0, 1.0), "f2.jpg"),
    ];
    let engine = AssignEngine::new(candidates, MatchPolicy::WithoutRemoval);
    let run = engine.assign(&queries(&[(0.1, 0.1)])).unwrap();

    match &run.assignments[0].outcome {
        MatchOutcome::Matched { filename, score } => {
            assert_eq!(filename, "f1.jpg");
            assert!((*score - 0.2).abs() < 1e-12);
        }
        other => panic!("expected match, got {other:?}"),
    }
}

#[test]
fn identical_queries_drain_the_pool_in_order() {
    let candidates = vec![
        RawRecord::new(0, GeoPoint::new(0.0, 0.0), "f1.jpg"),
        RawRecord::new(1, GeoPoint::new(1.0, 1.0), "f2.jpg"),
    ];
    let engine = AssignEngine::new(candidates, MatchPolicy::WithRemoval);
    let run = engine.assign(&queries(&[(0.0, 0.0), (0.0, 0.0)])).unwrap();

    assert_eq!(
        matched_names(&run),
        vec![Some("f1.jpg".to_string()), Some("f2.jpg".to_string())]
    );
}

#[test]
fn with_removal_assigns_each_candidate_once() {
    let engine = AssignEngine::new(
        pool(&[(10.0, 10.0), (20.0, 20.0), (30.0, 30.0)]),
        MatchPolicy::WithRemoval,
    );
    // Every query sits nearest the same corner of the pool; removal forces
    // later queries onto farther candidates.
    let run = engine
        .assign(&queries(&[(10.0, 10.0), (10.1, 10.1), (10.2, 10.2)]))
        .unwrap();

    let names = matched_names(&run);
    assert_eq!(
        names,
        vec![
            Some("img0.jpg".to_string()),
            Some("img1.jpg".to_string()),
            Some("img2.jpg".to_string()),
        ]
    );
    assert_eq!(run.matched_count(), 3);
    assert_eq!(run.unmatched_count(), 0);
}

#[test]
fn with_removal_fails_exactly_when_pool_runs_dry() {
    let engine = AssignEngine::new(pool(&[(1.0, 1.0), (2.0, 2.0)]), MatchPolicy::WithRemoval);
    let err = engine
        .assign(&queries(&[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]))
        .unwrap_err();

    // Two candidates serve rows 0 and 1; row 2 is the first starved query.
    match err {
        AssignError::ExhaustedPool { query_row, pool_size } => {
            assert_eq!(query_row, 2);
            assert_eq!(pool_size, 2);
        }
        other => panic!("expected pool exhaustion, got {other:?}"),
    }
}

#[test]
fn with_removal_succeeds_when_queries_equal_pool() {
    let engine = AssignEngine::new(pool(&[(1.0, 1.0), (2.0, 2.0)]), MatchPolicy::WithRemoval);
    let run = engine.assign(&queries(&[(5.0, 5.0), (5.0, 5.0)])).unwrap();
    assert_eq!(run.matched_count(), 2);
}

#[test]
fn without_removal_lets_one_candidate_win_repeatedly() {
    let engine = AssignEngine::new(
        pool(&[(10.0, 10.0), (50.0, 50.0)]),
        MatchPolicy::WithoutRemoval,
    );
    let run = engine
        .assign(&queries(&[(10.0, 10.0), (10.1, 10.0), (9.9, 10.0), (10.0, 10.1)]))
        .unwrap();

    let names = matched_names(&run);
    assert!(names.iter().all(|n| n.as_deref() == Some("img0.jpg")));
}

#[test]
fn without_removal_handles_more_queries_than_candidates() {
    let engine = AssignEngine::new(pool(&[(1.0, 1.0)]), MatchPolicy::WithoutRemoval);
    let run = engine
        .assign(&queries(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]))
        .unwrap();
    assert_eq!(run.matched_count(), 3);
}

#[test]
fn tie_breaks_to_first_candidate_in_pool_order() {
    // Two candidates equidistant from the query; the earlier row wins.
    let engine = AssignEngine::new(pool(&[(52.0, 4.1), (52.1, 4.0)]), MatchPolicy::WithRemoval);
    let run = engine.assign(&queries(&[(52.0, 4.0)])).unwrap();
    assert_eq!(matched_names(&run)[0].as_deref(), Some("img0.jpg"));
}

#[test]
fn assignment_depends_on_query_order_under_removal() {
    let candidates = [(0.0, 0.0), (0.0, 1.0)];
    // Both queries prefer candidate 0; whoever goes first takes it.
    let forward = AssignEngine::new(pool(&candidates), MatchPolicy::WithRemoval)
        .assign(&queries(&[(0.0, 0.1), (0.0, 0.2)]))
        .unwrap();
    let reversed = AssignEngine::new(pool(&candidates), MatchPolicy::WithRemoval)
        .assign(&queries(&[(0.0, 0.2), (0.0, 0.1)]))
        .unwrap();

    assert_eq!(
        matched_names(&forward),
        vec![Some("img0.jpg".to_string()), Some("img1.jpg".to_string())]
    );
    assert_eq!(
        matched_names(&reversed),
        vec![Some("img0.jpg".to_string()), Some("img1.jpg".to_string())]
    );
    // Same name sequence, but attached to different queries: row 0 got the
    // close candidate in one run and the far one in the other.
    let forward_first = forward.assignments[0].outcome.score().unwrap();
    let reversed_first = reversed.assignments[0].outcome.score().unwrap();
    assert!((forward_first - 0.1).abs() < 1e-12);
    assert!((reversed_first - 0.2).abs() < 1e-12);
}

#[test]
fn empty_pool_without_removal_yields_no_candidates() {
    let engine = AssignEngine::new(Vec::new(), MatchPolicy::WithoutRemoval);
    let run = engine.assign(&queries(&[(1.0, 1.0), (2.0, 2.0)])).unwrap();
    assert_eq!(run.matched_count(), 0);
    assert_eq!(run.no_candidates_count(), 2);
    assert!(
        run.assignments
            .iter()
            .all(|a| a.outcome == MatchOutcome::NoCandidates)
    );
}

#[test]
fn empty_pool_with_removal_fails_on_first_query() {
    let engine = AssignEngine::new(Vec::new(), MatchPolicy::WithRemoval);
    let err = engine.assign(&queries(&[(1.0, 1.0)])).unwrap_err();
    assert!(matches!(
        err,
        AssignError::ExhaustedPool { query_row: 0, pool_size: 0 }
    ));
}

#[test]
fn empty_query_list_is_an_empty_run() {
    let engine = AssignEngine::new(pool(&[(1.0, 1.0)]), MatchPolicy::WithRemoval);
    let run = engine.assign(&[]).unwrap();
    assert!(run.assignments.is_empty());
    assert_eq!(run.mean_score(), None);
    assert_eq!(run.max_score(), None);
}

#[test]
fn non_finite_query_coordinate_is_rejected() {
    let engine = AssignEngine::new(pool(&[(1.0, 1.0)]), MatchPolicy::WithRemoval);
    let bad = vec![LateralRecord::new(4, GeoPoint::new(f64::NAN, 0.0))];
    let err = engine.assign(&bad).unwrap_err();
    assert!(matches!(err, AssignError::InvalidCoordinate { row: 4, .. }));
}

#[test]
fn non_finite_candidate_coordinate_is_rejected() {
    let mut candidates = pool(&[(1.0, 1.0)]);
    candidates.push(RawRecord::new(1, GeoPoint::new(0.0, f64::INFINITY), "bad.jpg"));
    let engine = AssignEngine::new(candidates, MatchPolicy::WithoutRemoval);
    let err = engine.assign(&queries(&[(1.0, 1.0)])).unwrap_err();
    assert!(matches!(err, AssignError::InvalidCoordinate { row: 1, .. }));
}

#[test]
fn threshold_rejects_far_matches_without_consuming() {
    let engine = AssignEngine::new(pool(&[(0.0, 0.0)]), MatchPolicy::WithRemoval)
        .with_threshold(Some(DegreeThreshold::new(0.05, 0.05)));
    // First query is far outside the gate, second is inside. The lone
    // candidate must survive the rejection and serve the second query.
    let run = engine.assign(&queries(&[(1.0, 1.0), (0.01, 0.01)])).unwrap();

    match &run.assignments[0].outcome {
        MatchOutcome::OutsideThreshold { nearest, score } => {
            assert_eq!(nearest, "img0.jpg");
            assert!((*score - 2.0).abs() < 1e-12);
        }
        other => panic!("expected gated outcome, got {other:?}"),
    }
    assert_eq!(matched_names(&run)[1].as_deref(), Some("img0.jpg"));
    assert_eq!(run.outside_threshold_count(), 1);
    assert_eq!(run.matched_count(), 1);
}

#[test]
fn threshold_boundary_score_is_accepted() {
    let engine = AssignEngine::new(pool(&[(0.0, 0.0)]), MatchPolicy::WithRemoval)
        .with_threshold(Some(DegreeThreshold::new(0.1, 0.1)));
    let run = engine.assign(&queries(&[(0.1, 0.1)])).unwrap();
    assert_eq!(run.matched_count(), 1);
}

#[test]
fn results_keep_query_order() {
    let engine = AssignEngine::new(
        pool(&[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]),
        MatchPolicy::WithoutRemoval,
    );
    let run = engine
        .assign(&queries(&[(3.0, 3.0), (1.0, 1.0), (2.0, 2.0)]))
        .unwrap();
    let rows: Vec<usize> = run.assignments.iter().map(|a| a.query_row).collect();
    assert_eq!(rows, vec![0, 1, 2]);
    let names = matched_names(&run);
    assert_eq!(names[0].as_deref(), Some("img2.jpg"));
    assert_eq!(names[1].as_deref(), Some("img0.jpg"));
    assert_eq!(names[2].as_deref(), Some("img1.jpg"));
}
