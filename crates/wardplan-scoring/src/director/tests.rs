//! Tests for the score director and trial scope.

use wardplan_core::{Allocation, Assignment};
use wardplan_test::scenarios;

use crate::director::ScoreDirector;
use crate::evaluator::Evaluator;
use crate::objective::ObjectiveWeights;

const EPS: f64 = 1e-9;

fn at(pairs: &[(usize, usize)]) -> Allocation {
    Allocation::new(pairs.iter().map(|&(w, d)| Assignment::new(w, d)).collect())
}

#[test]
fn test_new_rejects_wrong_size() {
    let instance = scenarios::tiny();

    let result = ScoreDirector::new(&instance, ObjectiveWeights::default(), at(&[(0, 0)]));

    assert!(result.is_err());
}

#[test]
fn test_incremental_score_matches_full_evaluation() {
    let instance = scenarios::five_patients();
    let weights = ObjectiveWeights::default();
    let evaluator = Evaluator::new(&instance);
    let mut director = ScoreDirector::new(
        &instance,
        weights,
        at(&[(0, 0), (0, 1), (1, 0), (0, 1), (1, 2)]),
    )
    .unwrap();

    let moves = [
        (0, Assignment::new(0, 2)),
        (3, Assignment::new(1, 0)),
        (4, Assignment::new(0, 4)),
        (1, Assignment::new(0, 1)),
        (2, Assignment::new(1, 3)),
        (3, Assignment::new(1, 1)),
    ];
    for (patient, assignment) in moves {
        director.assign(patient, assignment);
        let full = evaluator.evaluate(director.allocation()).unwrap();
        assert!((director.score() - weights.scalarize(full.objective)).abs() < EPS);
        assert_eq!(director.bed_violations(), full.bed_violations);
        assert_eq!(director.is_feasible(), full.is_feasible());
    }
}

#[test]
fn test_assign_returns_previous() {
    let instance = scenarios::tiny();
    let mut director =
        ScoreDirector::new(&instance, ObjectiveWeights::default(), at(&[(0, 0), (0, 0), (0, 1)]))
            .unwrap();

    let old = director.assign(2, Assignment::new(0, 2));

    assert_eq!(old, Assignment::new(0, 1));
    assert_eq!(director.assignment(2), Assignment::new(0, 2));
}

#[test]
fn test_trial_rolls_back_on_drop() {
    let instance = scenarios::tiny();
    let start = at(&[(0, 0), (0, 0), (0, 1)]);
    let mut director =
        ScoreDirector::new(&instance, ObjectiveWeights::default(), start.clone()).unwrap();
    let before = director.penalized_score();

    {
        let mut trial = director.trial();
        trial.assign(0, Assignment::new(0, 1));
        trial.assign(1, Assignment::new(0, 1));
        trial.assign(0, Assignment::new(0, 2));
        assert_eq!(trial.change_count(), 3);
        assert_eq!(trial.bed_violations(), 0);
    }

    assert_eq!(director.allocation(), &start);
    assert!((director.penalized_score() - before).abs() < EPS);
}

#[test]
fn test_trial_commit_keeps_moves() {
    let instance = scenarios::tiny();
    let mut director =
        ScoreDirector::new(&instance, ObjectiveWeights::default(), at(&[(0, 0), (0, 0), (0, 1)]))
            .unwrap();

    let mut trial = director.trial();
    trial.assign(2, Assignment::new(0, 3));
    trial.commit();

    assert_eq!(director.assignment(2), Assignment::new(0, 3));
}

#[test]
fn test_trial_explicit_rollback_allows_reuse() {
    let instance = scenarios::tiny();
    let start = at(&[(0, 0), (0, 0), (0, 1)]);
    let mut director =
        ScoreDirector::new(&instance, ObjectiveWeights::default(), start.clone()).unwrap();

    let mut trial = director.trial();
    trial.assign(1, Assignment::new(0, 1));
    trial.rollback();
    assert!(trial.is_empty());
    trial.assign(2, Assignment::new(0, 2));
    trial.commit();

    assert_eq!(director.assignment(1), Assignment::new(0, 0));
    assert_eq!(director.assignment(2), Assignment::new(0, 2));
}

#[test]
fn test_penalized_score_charges_overbooking() {
    let instance = scenarios::saturated();
    let weights = ObjectiveWeights::new(0.5, 0.5, 1000.0);
    let mut director = ScoreDirector::new(&instance, weights, at(&[(0, 0), (0, 0), (0, 1)])).unwrap();

    assert!((director.penalized_score() - director.score()).abs() < EPS);
    assert!(director.fits(2, Assignment::new(0, 1)));
    assert!(!director.fits(2, Assignment::new(0, 0)));

    director.assign(2, Assignment::new(0, 0));

    assert_eq!(director.bed_violations(), 1);
    assert!((director.penalized_score() - director.score() - 1000.0).abs() < EPS);
}

#[test]
fn test_reset_replaces_tallies() {
    let instance = scenarios::saturated();
    let mut director = ScoreDirector::new(
        &instance,
        ObjectiveWeights::default(),
        at(&[(0, 0), (0, 0), (0, 0)]),
    )
    .unwrap();
    assert!(!director.is_capacity_feasible());

    director.reset(at(&[(0, 0), (0, 0), (0, 1)])).unwrap();

    assert!(director.is_capacity_feasible());
    assert!(director.reset(at(&[(0, 0)])).is_err());
}
