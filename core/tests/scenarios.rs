//! End-to-end saturation runs over the fixture problems

use geoprover_core::*;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/problems")
        .join(name)
}

fn prover_for(name: &str) -> Prover {
    let problem = load_problem(fixture(name)).expect("fixture loads");
    problem
        .to_prover(Arc::new(default_ruleset().unwrap()))
        .expect("fixture is ground")
}

fn fact(pred: &str, args: &[&str]) -> Fact {
    Fact::from_tokens(pred, args).unwrap()
}

/// Statement, status and provenance of every hypothesis, in order
fn snapshot(prover: &Prover) -> Vec<(String, bool, Vec<FactId>)> {
    prover
        .hyps()
        .iter()
        .map(|(_, f)| (f.to_string(), f.is_shadowed(), f.cond.clone()))
        .collect()
}

fn shadowed(prover: &Prover) -> BTreeSet<FactId> {
    prover
        .hyps()
        .iter()
        .filter(|(_, f)| f.is_shadowed())
        .map(|(id, _)| id)
        .collect()
}

#[test]
fn test_perpendicular_bisector_gives_parallel() {
    let mut prover = prover_for("perpendicular_bisector.json");
    let result = prover.solve();

    assert!(result.solved, "outcome: {:?}", result.outcome);
    assert_eq!(prover.state(), SearchState::Proved);

    let id = result.outcome.proved_fact().unwrap();
    let goal = fact("para", &["A", "C", "G", "F"]);
    assert!(prover.incidence().check_imply(&prover.hyps()[id], &goal));

    let proof = result.proof.expect("proved goals carry a proof");
    proof.validate_order().expect("premises precede their steps");
    let rules = rule_steps(&proof);
    assert!(rules.contains(&"D56"), "perp from the two equal pairs: {rules:?}");
    assert!(rules.contains(&"D9"), "two perps give para: {rules:?}");
    assert_eq!(proof.get_metadata("goal"), Some("para(A,C,G,F)"));
}

#[test]
fn test_rhombus_diagonal_angles() {
    let mut prover = prover_for("rhombus_diagonal.json");
    let result = prover.solve();

    assert!(result.solved, "outcome: {:?}", result.outcome);
    assert_eq!(result.rounds, 1, "base angles of ABD follow in the first round");

    let proof = result.proof.unwrap();
    let last = proof.steps.last().unwrap();
    assert_eq!(last.rule_id, "D46");
    assert_eq!(last.premise_ids.len(), 1);
    assert!(
        !prover.hyps()[last.premise_ids[0]].is_combined(),
        "premise is the given fact itself"
    );
}

/// Rule ids of the non-merge steps, in replay order
fn rule_steps(proof: &ProofTrace) -> Vec<&str> {
    proof
        .steps
        .iter()
        .filter(|s| !s.is_combine())
        .map(|s| s.rule_id.as_str())
        .collect()
}

#[test]
fn test_equal_inscribed_angles_give_equal_chords() {
    let mut prover = prover_for("equal_chords.json");
    let result = prover.solve();

    assert!(result.solved, "outcome: {:?}", result.outcome);
    let proof = result.proof.unwrap();
    assert_eq!(rule_steps(&proof), vec!["D43"]);
    let step = proof.get_step(ProofStepId(0)).unwrap();
    assert_eq!(step.num_premises(), 2);
    assert_eq!(step.conclusion.to_string(), "cong(F,G,D,B)");
}

#[test]
fn test_orthocenter_third_altitude() {
    let mut prover = prover_for("orthocenter.json");
    let result = prover.solve();

    assert!(result.solved, "outcome: {:?}", result.outcome);
    let proof = result.proof.unwrap();
    proof.validate_order().unwrap();
    let rules = rule_steps(&proof);
    assert!(rules.contains(&"D76"), "right angles at E and F: {rules:?}");
    assert_eq!(
        rules.iter().filter(|&&r| r == "D42").count(),
        2,
        "two cyclic quadrilaterals: {rules:?}"
    );
    assert_eq!(rules.last(), Some(&"eqangle_perp"));
    let id = result.outcome.proved_fact().unwrap();
    assert_eq!(prover.hyps()[id].rule_name(), Some("eqangle_perp"));
}

#[test]
fn test_parallelogram_diagonals() {
    let mut prover = prover_for("parallelogram.json");
    let result = prover.solve();

    assert!(result.solved, "outcome: {:?}", result.outcome);
    assert_eq!(result.rounds, 2);
    let proof = result.proof.unwrap();
    assert_eq!(rule_steps(&proof), vec!["D40", "D40", "asa"]);
    let last = proof.steps.last().unwrap();
    assert_eq!(last.num_premises(), 3);
    assert_eq!(last.conclusion.to_string(), "cong(M,B,M,C)");
}

#[test]
fn test_isosceles_median_is_altitude() {
    let mut prover = prover_for("isosceles_midpoint.json");
    let result = prover.solve();

    assert!(result.solved, "outcome: {:?}", result.outcome);
    let proof = result.proof.unwrap();
    assert_eq!(rule_steps(&proof), vec!["midp_cong", "D56"]);
}

#[test]
fn test_every_fixture_solves() {
    let dir = fixture("");
    let problems = load_problems(&dir).unwrap();
    assert_eq!(problems.len(), 7);

    let ruleset = Arc::new(default_ruleset().unwrap());
    for problem in &problems {
        let mut prover = problem.to_prover(Arc::clone(&ruleset)).unwrap();
        let result = prover.solve();
        assert!(result.solved, "{} not proved: {:?}", problem.id, result.outcome);
        assert!(result.rounds <= SearchConfig::default().max_rounds + 1);
    }
}

#[test]
fn test_runs_are_deterministic() {
    let mut first = prover_for("perpendicular_bisector.json");
    let mut second = prover_for("perpendicular_bisector.json");
    let a = first.solve();
    let b = second.solve();

    assert_eq!(a.outcome, b.outcome);
    assert_eq!(snapshot(&first), snapshot(&second));
    assert_eq!(
        a.proof.map(|p| p.to_json().unwrap()),
        b.proof.map(|p| p.to_json().unwrap())
    );
}

#[test]
fn test_hypotheses_only_grow() {
    let mut prover = prover_for("perpendicular_bisector.json").with_config(SearchConfig {
        max_rounds: 3,
        incremental: true,
    });

    let mut len = prover.hyps().len();
    let mut hidden = shadowed(&prover);
    let mut only_updated = false;
    for _ in 0..4 {
        let added = prover.step(only_updated);
        only_updated = true;

        assert_eq!(prover.hyps().len(), len + added);
        let now = shadowed(&prover);
        assert!(hidden.is_subset(&now), "a shadowed fact came back");
        for (id, f) in prover.hyps().iter() {
            assert!(f.cond.iter().all(|&c| c < id), "{id} cites a later fact");
        }
        len = prover.hyps().len();
        hidden = now;
        if added == 0 {
            break;
        }
    }
}

#[test]
fn test_not_proved_without_rules() {
    let problem = load_problem(fixture("perpendicular_bisector.json")).unwrap();
    let mut prover = problem.to_prover(Arc::new(Ruleset::new())).unwrap();
    let result = prover.solve();

    assert!(!result.solved);
    assert_eq!(result.outcome, SearchOutcome::Exhausted { rounds: 1 });
    assert!(result.proof.is_none());
    assert_eq!(result.facts_total, 7);
}

#[test]
fn test_rule_subset_still_proves() {
    let problem = load_problem(fixture("perpendicular_bisector.json")).unwrap();
    let ruleset = default_ruleset().unwrap().subset(&["D56", "D9"]).unwrap();
    let mut prover = problem.to_prover(Arc::new(ruleset)).unwrap();

    let outcome = prover.search_fixpoint();
    assert_eq!(outcome.state(), SearchState::Proved);
    assert_eq!(outcome.rounds(), 2, "D56 in the first round, D9 in the second");
}
