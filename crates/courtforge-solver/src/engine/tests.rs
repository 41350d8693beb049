//! Tests for the engine adapter.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use pumpkin_core::branching::Brancher;

use super::*;

fn default_brancher(solver: &Solver) -> DynamicBrancher {
    let branchers: Vec<Box<dyn Brancher>> = vec![Box::new(solver.default_brancher())];
    DynamicBrancher::new(branchers)
}

fn unlimited() -> RequestTermination {
    request_termination(None, &Arc::new(AtomicBool::new(false)))
}

/// Every solution of `search`, as the values of its recorded variables.
fn enumerate(search: &mut Search, vars: &[Var]) -> Vec<Vec<i32>> {
    let mut solutions = Vec::new();
    while search.next_solution(&mut unlimited()) == SearchOutcome::Solution {
        solutions.push(vars.iter().map(|&v| search.value(v).unwrap()).collect());
    }
    solutions
}

#[test]
fn test_enumerates_each_solution_once() {
    let mut model = Model::new();
    let vars: Vec<Var> = (0..3).map(|_| model.new_bool(true)).collect();
    model.sum(&vars, SumTarget::Exactly(1));

    let mut search = model.into_search(vars.clone(), default_brancher);
    let solutions = enumerate(&mut search, &vars);

    assert_eq!(solutions.len(), 3);
    let distinct: BTreeSet<_> = solutions.iter().cloned().collect();
    assert_eq!(distinct.len(), 3);
    assert!(solutions.iter().all(|s| s.iter().sum::<i32>() == 1));
    assert!(search.is_exhausted());
    assert_eq!(search.solutions(), 3);
    assert_eq!(search.next_solution(&mut unlimited()), SearchOutcome::Exhausted);
    assert_eq!(search.value(vars[0]), None);
}

#[test]
fn test_minimum_and_equality() {
    let mut model = Model::new();
    let a = model.new_bool(true);
    let b = model.new_bool(true);
    let both = model.new_bool(true);
    let copy = model.new_bool(true);
    model.minimum(both, &[a, b]);
    model.equal(copy, a);

    let recorded = vec![a, b, both, copy];
    let mut search = model.into_search(recorded.clone(), default_brancher);
    let solutions = enumerate(&mut search, &recorded);

    assert_eq!(solutions.len(), 4);
    for s in &solutions {
        assert_eq!(s[2], s[0].min(s[1]));
        assert_eq!(s[3], s[0]);
    }
}

#[test]
fn test_closed_variables_stay_zero() {
    let mut model = Model::new();
    let closed = model.new_bool(false);
    let open = model.new_bool(true);
    model.sum(&[closed, open], SumTarget::Exactly(1));

    let recorded = vec![closed, open];
    let mut search = model.into_search(recorded.clone(), default_brancher);
    assert_eq!(enumerate(&mut search, &recorded), vec![vec![0, 1]]);
}

#[test]
fn test_between_and_weighted_sums() {
    let mut model = Model::new();
    let vars: Vec<Var> = (0..4).map(|_| model.new_bool(true)).collect();
    let used = model.new_bool(true);
    model.sum(&vars, SumTarget::Between(1, 2));
    // Σ vars = 2 · used
    let mut terms: Vec<(i32, Var)> = vars.iter().map(|&v| (1, v)).collect();
    terms.push((-2, used));
    model.linear(&terms, SumTarget::Exactly(0));

    let mut search = model.into_search(vars.clone(), default_brancher);
    let solutions = enumerate(&mut search, &vars);
    // Only pairs remain: C(4, 2).
    assert_eq!(solutions.len(), 6);
    assert!(solutions.iter().all(|s| s.iter().sum::<i32>() == 2));
}

#[test]
fn test_empty_sum_with_positive_target_is_inconsistent() {
    let mut model = Model::new();
    let var = model.new_bool(true);
    model.sum(&[], SumTarget::AtMost(0));
    assert!(model.is_consistent());
    model.sum(&[], SumTarget::Exactly(1));
    assert!(!model.is_consistent());

    let mut search = model.into_search(vec![var], default_brancher);
    assert_eq!(search.next_solution(&mut unlimited()), SearchOutcome::Exhausted);
    assert_eq!(search.solutions(), 0);
}

#[test]
fn test_root_conflict_is_recorded() {
    let mut model = Model::new();
    let var = model.new_bool(false);
    model.fix(var, 1);
    assert_eq!(model.num_constraints(), 1);
    assert_eq!(model.num_variables(), 1);

    let mut search = model.into_search(vec![var], default_brancher);
    assert_eq!(search.next_solution(&mut unlimited()), SearchOutcome::Exhausted);
    assert!(search.is_exhausted());
}

#[test]
fn test_stopped_request_can_be_resumed() {
    let mut model = Model::new();
    let vars: Vec<Var> = (0..2).map(|_| model.new_bool(true)).collect();
    model.sum(&vars, SumTarget::Exactly(1));
    let mut search = model.into_search(vars.clone(), default_brancher);

    let flag = Arc::new(AtomicBool::new(true));
    assert_eq!(
        search.next_solution(&mut request_termination(None, &flag)),
        SearchOutcome::Stopped
    );
    assert_eq!(search.solutions(), 0);

    flag.store(false, Ordering::SeqCst);
    assert_eq!(
        search.next_solution(&mut request_termination(None, &flag)),
        SearchOutcome::Solution
    );
    assert_eq!(
        search.next_solution(&mut request_termination(Some(Duration::ZERO), &flag)),
        SearchOutcome::Stopped
    );
    assert_eq!(
        search.next_solution(&mut request_termination(None, &flag)),
        SearchOutcome::Solution
    );
    assert_eq!(
        search.next_solution(&mut request_termination(None, &flag)),
        SearchOutcome::Exhausted
    );
    assert_eq!(search.solutions(), 2);
}
