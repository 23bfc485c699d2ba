#[macro_use]
mod utils;

use sounding_qc::FlagVariable;

#[test]
fn test_load_test_csv_profile() {
    let case = utils::load_test_file("standard.csv");

    assert_eq!(case.data.num_levels(), 11);
    assert_eq!(case.data.station_id(), Some("standard"));
    assert!(case.data.u_wind_profile()[3].is_none());
    assert_eq!(
        case.options.checks,
        vec!["Basic", "SamePDiffT", "UnstableLayer", "WindConsistency"]
    );
    assert_eq!(case.results.get("Basic"), Some(&true));
    assert_eq!(case.reference.counter("NumAnyErrors"), Some(0));
    assert_eq!(
        case.reference.flags(FlagVariable::Wind).map(|flags| flags.len()),
        Some(11)
    );

    let case = utils::load_test_file("max_levels.csv");
    assert_eq!(case.options.max_levels, Some(3));
    assert!(case.data.temperature_profile()[2].is_some());
}

check_file_complete!(standard_file_complete, "standard.csv");
check_file_complete!(out_of_order_file_complete, "out_of_order.csv");
check_file_complete!(same_p_diff_t_file_complete, "same_p_diff_t.csv");
check_file_complete!(superadiabatic_file_complete, "superadiabatic.csv");
check_file_complete!(max_levels_file_complete, "max_levels.csv");
