use super::*;
use sounding_qc::{CheckOrchestrator, CheckRegistry, Profile, ProfileOutcome};

fn run_case(case: &TestCase, profile: &mut Profile) -> ProfileOutcome {
    let registry = CheckRegistry::with_builtin_checks().unwrap();
    let orchestrator = CheckOrchestrator::new(&registry, case.options.clone()).unwrap();

    orchestrator.run(0, profile).unwrap()
}

#[allow(dead_code)] // False alarm - lint is done before macro expansion.
pub fn test_check_results(case: &TestCase) {
    let mut profile = Profile::new(case.data.clone());
    let outcome = run_case(case, &mut profile);

    for (name, passed) in outcome.report.iter() {
        assert_eq!(Some(&passed), case.results.get(name), "{}", name);
    }
    assert_eq!(outcome.report.iter().count(), case.results.len());
    assert_eq!(
        outcome.report.all_passed(),
        case.results.values().all(|&passed| passed)
    );
}

#[allow(dead_code)] // False alarm - lint is done before macro expansion.
pub fn test_flags_and_counters(case: &TestCase) {
    let mut profile = Profile::new(case.data.clone());
    let outcome = run_case(case, &mut profile);

    let mismatches = outcome.validator.compare(&case.reference);
    assert!(
        mismatches.is_empty(),
        "{}",
        mismatches
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    );

    // The validator reports the final state of the flags.
    for var in all_variables() {
        assert_eq!(outcome.validator.flags(var), profile.flags().flags(var));
    }
}

#[allow(dead_code)] // False alarm - lint is done before macro expansion.
pub fn test_rerun_is_stable(case: &TestCase) {
    let mut profile = Profile::new(case.data.clone());
    run_case(case, &mut profile);
    let first = profile.flags().clone();

    run_case(case, &mut profile);

    // Flags only accumulate and every check sets the same bits again.
    for var in all_variables() {
        assert_eq!(first.flags(var), profile.flags().flags(var), "{}", var);
    }
    assert_eq!(
        first.basic_check_result(),
        profile.flags().basic_check_result()
    );
}

#[allow(dead_code)] // False alarm - lint is done before macro expansion.
pub fn test_basic_result_recorded(case: &TestCase) {
    let mut profile = Profile::new(case.data.clone());
    run_case(case, &mut profile);

    let expected = case.results.get("Basic").copied().unwrap_or(true);
    assert_eq!(profile.flags().basic_check_result(), expected);
}
