use metfor::{Celsius, HectoPascal, Meters, MetersPSec};
use optional::Optioned;
use sounding_qc::ProfileData;
use std::{fs::File, io::Read, path::Path, str::FromStr};

pub fn load_all_test_files() -> [ProfileData; 4] {
    let prof1 = load_test_file("standard.csv");
    let prof2 = load_test_file("out_of_order.csv");
    let prof3 = load_test_file("same_p_diff_t.csv");
    let prof4 = load_test_file("superadiabatic.csv");

    [prof1, prof2, prof3, prof4]
}

fn load_test_file(fname: &str) -> ProfileData {
    let test_path = Path::new("test_data").join(fname);
    load_test_csv_profile(&test_path)
}

// Only the profile data, the expected results are for the tests.
fn load_test_csv_profile(location: &Path) -> ProfileData {
    let mut f = File::open(location).unwrap_or_else(|_| panic!("Error opening file: {:#?}", location));

    let mut contents = String::new();
    f.read_to_string(&mut contents)
        .unwrap_or_else(|_| panic!("Error reading file: {:#?}", location));

    let mut press: Vec<Optioned<HectoPascal>> = vec![];
    let mut temp: Vec<Optioned<Celsius>> = vec![];
    let mut height: Vec<Optioned<Meters>> = vec![];
    let mut u_wind: Vec<Optioned<MetersPSec>> = vec![];
    let mut v_wind: Vec<Optioned<MetersPSec>> = vec![];

    for line in contents.lines() {
        if line.starts_with("### Options ###") {
            break;
        }
        if line.starts_with('#') {
            continue;
        }

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

    ProfileData::new()
        .with_pressure_profile(press)
        .with_temperature_profile(temp)
        .with_height_profile(height)
        .with_u_wind_profile(u_wind)
        .with_v_wind_profile(v_wind)
}
