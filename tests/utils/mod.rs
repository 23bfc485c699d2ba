use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use metfor::{Celsius, HectoPascal, Meters, MetersPSec};
use optional::Optioned;
use serde_json::{Map, Value};
use sounding_qc::{FlagVariable, ProfileCheckOptions, ProfileCheckValidator, ProfileData};

pub mod check_tests;

#[allow(unused_macros)] // False alarm
macro_rules! check_file_complete {
    ($test_name:ident, $fname:expr) => {
        #[test]
        fn $test_name() {
            let case = utils::load_test_file($fname);

            assert!(case.data.validate().is_ok(), "Failed validation.");
            assert!(case.options.validate().is_ok(), "Bad options.");
            assert!(case.data.num_levels() > 0, "No levels.");

            // Every configured check has an expected result and nothing else does.
            assert_eq!(case.options.checks.len(), case.results.len());
            for name in &case.options.checks {
                assert!(case.results.contains_key(name), "{}", name);
            }

            // Every expected flag vector covers the whole profile.
            for var in utils::all_variables() {
                if let Some(flags) = case.reference.flags(var) {
                    assert_eq!(flags.len(), case.data.num_levels(), "{}", var);
                }
            }
        }
    };
}

#[allow(unused_macros)] // False alarm
macro_rules! test_file {
    ($test_mod_name:ident, $fname:expr) => {
        mod $test_mod_name {
            use crate::utils::{self, check_tests, TestCase};

            fn load_data() -> TestCase {
                utils::load_test_file($fname)
            }

            #[test]
            fn check_results() {
                check_tests::test_check_results(&load_data());
            }

            #[test]
            fn flags_and_counters() {
                check_tests::test_flags_and_counters(&load_data());
            }

            #[test]
            fn rerun_is_stable() {
                check_tests::test_rerun_is_stable(&load_data());
            }

            #[test]
            fn basic_result_recorded() {
                check_tests::test_basic_result_recorded(&load_data());
            }
        }
    };
}

/// A profile with its configuration and the expected outcome of running it.
#[derive(Debug, Clone)]
pub struct TestCase {
    pub data: ProfileData,
    pub options: ProfileCheckOptions,
    pub results: HashMap<String, bool>,
    pub reference: ProfileCheckValidator,
}

pub fn load_test_file(fname: &str) -> TestCase {
    let mut test_path = PathBuf::new();
    test_path.push("test_data");
    test_path.push(fname);
    load_test_csv_profile(&test_path)
}

#[allow(dead_code)] // False alarm - lint is done before macro expansion.
pub fn all_variables() -> Vec<FlagVariable> {
    vec![
        FlagVariable::Temperature,
        FlagVariable::Height,
        FlagVariable::Wind,
    ]
}

fn parse_variable(token: &str) -> FlagVariable {
    serde_json::from_value(Value::String(token.to_owned()))
        .unwrap_or_else(|_| panic!("Unknown flag variable: {}", token))
}

// Numbers become JSON numbers, true/false become booleans, anything else is a string.
fn option_value(token: &str) -> Value {
    if let Ok(val) = i64::from_str(token) {
        Value::from(val)
    } else if let Ok(val) = f64::from_str(token) {
        Value::from(val)
    } else if let Ok(val) = bool::from_str(token) {
        Value::from(val)
    } else {
        Value::from(token)
    }
}

fn split_tokens(line: &str) -> Vec<&str> {
    line.split(',')
        .map(str::trim)
        .filter(|val| !val.is_empty())
        .collect()
}

fn load_test_csv_profile(location: &Path) -> TestCase {
    let mut f = File::open(location).unwrap_or_else(|_| panic!("Error opening file: {:#?}", location));

    let mut contents = String::new();
    f.read_to_string(&mut contents)
        .unwrap_or_else(|_| panic!("Error reading file: {:#?}", location));

    let lines: Vec<&str> = contents.lines().collect();
    let mut line_iter = lines.iter();

    //
    // Parse profile data
    //
    let mut press: Vec<Optioned<HectoPascal>> = Vec::with_capacity(lines.len());
    let mut temp: Vec<Optioned<Celsius>> = Vec::with_capacity(lines.len());
    let mut height: Vec<Optioned<Meters>> = Vec::with_capacity(lines.len());
    let mut u_wind: Vec<Optioned<MetersPSec>> = Vec::with_capacity(lines.len());
    let mut v_wind: Vec<Optioned<MetersPSec>> = Vec::with_capacity(lines.len());

    for line in line_iter.by_ref() {
        if line.starts_with("### Options ###") {
            break;
        }
        if line.starts_with('#') {
            continue;
        }

        // Empty tokens are missing values, so don't filter them out.
        let tokens: Vec<&str> = line.split(',').map(str::trim).collect();
        if tokens.len() < 5 {
            continue;
        }

        press.push(f64::from_str(tokens[0]).ok().map(HectoPascal).into());
        temp.push(f64::from_str(tokens[1]).ok().map(Celsius).into());
        height.push(f64::from_str(tokens[2]).ok().map(Meters).into());
        u_wind.push(f64::from_str(tokens[3]).ok().map(MetersPSec).into());
        v_wind.push(f64::from_str(tokens[4]).ok().map(MetersPSec).into());
    }

    let data = ProfileData::new()
        .with_station_id(fname_of(location))
        .with_pressure_profile(press)
        .with_temperature_profile(temp)
        .with_height_profile(height)
        .with_u_wind_profile(u_wind)
        .with_v_wind_profile(v_wind);

    //
    // Options, as JSON so they go through the same deserialization as a real configuration.
    //
    let mut options = Map::new();
    for line in line_iter.by_ref() {
        if line.starts_with("### Check Results ###") {
            break;
        }

        let tokens = split_tokens(line);
        if tokens.len() < 2 {
            continue;
        }

        let value = if tokens[0] == "Checks" {
            Value::from(tokens[1..].to_vec())
        } else {
            option_value(tokens[1])
        };
        options.insert(tokens[0].to_owned(), value);
    }
    let options: ProfileCheckOptions =
        serde_json::from_value(Value::Object(options)).expect("Bad options section.");

    //
    // Check results
    //
    let mut results = HashMap::new();
    for line in line_iter.by_ref() {
        if line.starts_with("### Counters ###") {
            break;
        }

        let tokens = split_tokens(line);
        if tokens.len() < 2 {
            continue;
        }

        let passed = u8::from_str(tokens[1]).unwrap() != 0;
        results.insert(tokens[0].to_owned(), passed);
    }

    //
    // Expected counters and flags.
    //
    let mut reference = ProfileCheckValidator::new();
    for line in line_iter.by_ref() {
        if line.starts_with("### Flags ###") {
            break;
        }

        let tokens = split_tokens(line);
        if tokens.len() < 2 {
            continue;
        }

        reference.set_counter(tokens[0], u32::from_str(tokens[1]).unwrap());
    }

    for line in line_iter.by_ref() {
        let tokens = split_tokens(line);
        if tokens.is_empty() {
            continue;
        }

        let var = parse_variable(tokens[0]);
        let flags: Vec<u32> = tokens[1..]
            .iter()
            .map(|token| u32::from_str(token).unwrap())
            .collect();
        reference.set_flags(var, &flags);
    }

    TestCase {
        data,
        options,
        results,
        reference,
    }
}

fn fname_of(location: &Path) -> String {
    location
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("unknown")
        .to_owned()
}
