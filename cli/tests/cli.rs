// Copyright 2023 Viktor Reusch
//
// This file is part of sct2_convert.
//
// sct2_convert is free software: you can redistribute it and/or modify it
// under the terms of the GNU Affero General Public License as published by the
// Free Software Foundation, either version 3 of the License, or (at your
// option) any later version.
//
// sct2_convert is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more
// details.
//
// You should have received a copy of the GNU Affero General Public License
// along with sct2_convert. If not, see <https://www.gnu.org/licenses/>.

use assert_fs::prelude::*;
use predicates::prelude::*;
use assert_cmd::Command;

const XML: &str = r#"<?xml version="1.0"?>
<GeoMap xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <GeoMapObject Description="SLC_33">
    <Element xsi:type="Line" StartLat="43.536" StartLon="-112.0" EndLat="43.5" EndLon="-112.25" />
  </GeoMapObject>
</GeoMap>
"#;

const GEOJSON: &str = r#"{"type":"FeatureCollection","features":[
  {"type":"Feature","properties":{"id":"SLC","prefix":"TRACON"},
   "geometry":{"type":"MultiPolygon","coordinates":[[[[0,0],[1,0],[1,1]]]]}}]}"#;

#[test]
fn xml_command() {
    let dir = assert_fs::TempDir::new().unwrap();
    let input = dir.child("lines.xml");
    input.write_str(XML).unwrap();
    let output = dir.child("out.sct2");

    Command::cargo_bin("sct2")
        .unwrap()
        .args(["xml", input.path().to_str().unwrap(), "-o"])
        .arg(output.path())
        .assert()
        .success();

    output.assert(predicate::path::exists());
    let sct2 = std::fs::read_to_string(output.path()).unwrap();
    assert!(sct2.starts_with("#define RestrictedRed 128\n"));
    assert!(sct2.contains(
        "N043.32.09.600 W112.00.00.000 N043.30.00.000 W112.15.00.000 RestrictedRed"
    ));
}

#[test]
fn geojson_command_default_output() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("boundaries.geojson").write_str(GEOJSON).unwrap();

    Command::cargo_bin("sct2")
        .unwrap()
        .current_dir(dir.path())
        .args(["geojson", "boundaries.geojson", "--tag", "Tracon"])
        .assert()
        .success();

    let sct2 = std::fs::read_to_string(dir.child("output.sct2").path()).unwrap();
    assert!(sct2.starts_with("#define Tracon 128\n"));
    assert!(sct2.contains("\nSLCT1 "));
    assert!(sct2.contains("\nALL "));
    assert!(sct2.trim_end().ends_with("Tracon"));
}

#[test]
fn custom_header() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("lines.xml").write_str(XML).unwrap();
    dir.child("header.txt").write_str("[SID]\n").unwrap();

    Command::cargo_bin("sct2")
        .unwrap()
        .current_dir(dir.path())
        .args(["xml", "lines.xml", "--header", "header.txt"])
        .assert()
        .success();

    let sct2 = std::fs::read_to_string(dir.child("xml_converted_output.sct2").path()).unwrap();
    assert!(sct2.starts_with("[SID]\nSLC_33 "));
}

#[test]
fn failed_conversion_leaves_no_output() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("broken.geojson")
        .write_str(r#"{"type":"FeatureCollection","features":[{"type":"Feature","properties":{},"geometry":null}]}"#)
        .unwrap();

    Command::cargo_bin("sct2")
        .unwrap()
        .current_dir(dir.path())
        .args(["geojson", "broken.geojson"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with(
            "sct2 failed with: feature 1 is missing properties.id",
        ));

    dir.child("output.sct2").assert(predicate::path::missing());
}

#[test]
fn lookup_command() {
    Command::cargo_bin("sct2")
        .unwrap()
        .arg("lookup")
        .write_stdin("W112.03.50.103\nN43.5\nN043.30.00.000 E001.00.00.000\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Input error: malformed DMS value"))
        .stdout(predicate::str::contains("43.5 1\n"));
}
