//! Configuration regression test
//!
//! Loads shell configurations and filter documents from JSON files and
//! runs them against an in-memory store.
//!
//! Run with:
//! ```
//! cargo test -p voxbridge-filter --test config_reg
//! ```

use std::fs;
use std::path::PathBuf;

use voxbridge_core::{DataKind, ImageGeometry};
use voxbridge_filter::{
    BinaryThreshold, ErrorCategory, FilterDocument, FilterShell, ShellConfig, ThresholdParams,
};
use voxbridge_store::{DataArray, DataArrayPath, DataContainerArray};
use voxbridge_test::RegParams;

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("voxbridge_config_reg");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn config_shell_from_file() {
    let mut rp = RegParams::new("config_shell");

    let path = write_temp(
        "shell.json",
        r#"{
            "input": { "container": "Volume", "matrix": "CellData", "array": "Input" },
            "save_as_new_array": false,
            "temp_suffix": "_scratch"
        }"#,
    );
    match ShellConfig::load(&path) {
        Ok(cfg) => {
            rp.check(!cfg.save_as_new_array, "overwrite mode");
            rp.check(
                cfg.working_path() == DataArrayPath::new("Volume", "CellData", "Input_scratch"),
                "temporary path",
            );
            rp.check(cfg.result_path() == cfg.input, "result replaces input");
        }
        Err(e) => {
            eprintln!("  load failed: {}", e);
            rp.check(false, "load shell config");
        }
    }

    // Missing input and unreadable files are configuration errors
    let bad = write_temp("bad.json", r#"{ "save_as_new_array": true }"#);
    let err = ShellConfig::load(&bad).err();
    rp.check(
        err.as_ref().map(|e| e.category()) == Some(ErrorCategory::Configuration),
        "missing input",
    );
    let err = ShellConfig::load(&bad.with_file_name("absent.json")).err();
    rp.compare_values(-3040.0, err.map_or(0, |e| e.code()) as f64, 0.0);

    assert!(rp.cleanup(), "config_shell regression test failed");
}

#[test]
fn config_threshold_document() {
    let mut rp = RegParams::new("config_threshold");

    let path = write_temp(
        "threshold.json",
        r#"{
            "input": { "container": "Volume", "matrix": "CellData", "array": "Density" },
            "new_array_name": "Pores",
            "params": { "lower": 0.0, "upper": 0.25, "inside_value": 1 }
        }"#,
    );
    let doc = match FilterDocument::<ThresholdParams>::load(&path) {
        Ok(doc) => doc,
        Err(e) => panic!("failed to load filter document: {e}"),
    };
    rp.check(doc.shell.save_as_new_array, "save-as-new default");
    rp.compare_values(0.25, doc.params.upper, 0.0);
    rp.compare_values(1.0, doc.params.inside_value as f64, 0.0);
    rp.compare_values(0.0, doc.params.outside_value as f64, 0.0);

    // Run the document against a small volume
    let mut dca = DataContainerArray::new();
    dca.add_container("Volume", Some(ImageGeometry::new([3, 2, 1]).unwrap()))
        .unwrap();
    dca.add_matrix("Volume", "CellData", 6).unwrap();
    let density = vec![0.1f64, 0.3, 0.25, 0.9, 0.0, -0.5];
    dca.insert_array(
        &doc.shell.input,
        Box::new(DataArray::from_vec("Density", 1, density).unwrap()),
    )
    .unwrap();

    let output = doc.shell.result_path();
    let mut shell = FilterShell::new(doc.shell);
    let mut alg = BinaryThreshold::from_params(doc.params);
    let result = shell.execute(&mut dca, &mut alg);
    rp.check(result.is_ok(), "execute");
    rp.check(dca.array_kind(&output) == Ok(Some(DataKind::UInt8)), "u8 mask");
    rp.compare_buffers(
        &[1u8, 0, 1, 0, 1, 0],
        dca.values::<u8>(&output).unwrap_or(&[]),
    );

    assert!(rp.cleanup(), "config_threshold regression test failed");
}
