//! Host data store regression test
//!
//! Checks that:
//! 1. Lookups report which level of the hierarchy is missing
//! 2. `create_array` creates once and refuses a differently shaped array
//! 3. Input and output arrays can be borrowed together
//! 4. Remove and rename never silently do nothing
//! 5. Array paths read from JSON
//!
//! Run with:
//! ```
//! cargo test -p voxbridge-store --test store_reg
//! ```

use voxbridge_core::{ArrayHandle, DataKind, KindSet, resolve, resolve_as_mut};
use voxbridge_store::{
    DataArray, DataArrayPath, DataContainerArray, DataStore, StoreError, StringDataArray,
};
use voxbridge_test::{RegParams, fixture_geometry, ramp_volume};

/// 10x10x10 volume with a u8 "Input" array, as used by the filter tests
fn volume_store() -> (DataContainerArray, DataArrayPath) {
    let geom = fixture_geometry([10, 10, 10]).unwrap();
    let mut dca = DataContainerArray::new();
    dca.add_container("Volume", Some(geom)).unwrap();
    dca.add_matrix("Volume", "CellData", 1000).unwrap();
    dca.add_container("Bare", None).unwrap();

    let input = DataArrayPath::new("Volume", "CellData", "Input");
    let data: Vec<u8> = ramp_volume(&geom, 1, 1, 256);
    dca.insert_array(&input, Box::new(DataArray::from_vec("Input", 1, data).unwrap()))
        .unwrap();
    (dca, input)
}

#[test]
fn store_lookup_errors() {
    let mut rp = RegParams::new("store_lookup");
    let (dca, input) = volume_store();

    rp.check(dca.geometry("Volume").ok().flatten().is_some(), "volume geometry");
    rp.check(dca.geometry("Bare") == Ok(None), "bare container has no geometry");
    rp.check(
        dca.geometry("Nope") == Err(StoreError::ContainerNotFound("Nope".to_string())),
        "missing container",
    );

    let missing_matrix = DataArrayPath::new("Volume", "FeatureData", "Input");
    rp.check(
        matches!(
            dca.array(&missing_matrix),
            Err(StoreError::MatrixNotFound { .. })
        ),
        "missing matrix",
    );
    let missing_array = input.with_array("Nope");
    rp.check(
        matches!(dca.array(&missing_array), Err(StoreError::ArrayNotFound(_))),
        "missing array",
    );

    match dca.array(&input) {
        Ok(handle) => {
            rp.compare_values(1000.0, handle.tuple_count() as f64, 0.0);
            rp.compare_values(1.0, handle.component_count() as f64, 0.0);
            rp.check(handle.type_name() == "uint8", "type name");
        }
        Err(e) => {
            eprintln!("  lookup failed: {}", e);
            rp.check(false, "input lookup");
        }
    }
    rp.compare_values(
        1000.0,
        dca.matrix_tuple_count(&input).unwrap_or(0) as f64,
        0.0,
    );

    assert!(rp.cleanup(), "store_lookup regression test failed");
}

#[test]
fn store_create_array() {
    let mut rp = RegParams::new("store_create");
    let (mut dca, input) = volume_store();
    let output = input.with_array("Output");

    rp.check(
        dca.create_array(&output, DataKind::Float32, 1, 1000).is_ok(),
        "create f32 output",
    );
    // Same request again is a no-op
    rp.check(
        dca.create_array(&output, DataKind::Float32, 1, 1000).is_ok(),
        "identical create succeeds",
    );
    // Different kind or shape at the same path is refused
    rp.check(
        dca.create_array(&output, DataKind::UInt8, 1, 1000)
            == Err(StoreError::ArrayExists(output.clone())),
        "kind mismatch refused",
    );
    rp.check(
        dca.create_array(&output, DataKind::Float32, 3, 1000).is_err(),
        "component mismatch refused",
    );
    rp.check(
        matches!(
            dca.create_array(&input.with_array("Short"), DataKind::UInt8, 1, 999),
            Err(StoreError::TupleCountMismatch {
                expected: 1000,
                actual: 999,
                ..
            })
        ),
        "tuple count must match matrix",
    );

    rp.check(dca.array_kind(&output) == Ok(Some(DataKind::Float32)), "f32 kind");
    let zeros = dca.values::<f32>(&output).map(|v| v.iter().all(|x| *x == 0.0));
    rp.check(zeros == Ok(true), "created zero-filled");

    assert!(rp.cleanup(), "store_create regression test failed");
}

#[test]
fn store_pair_borrow() {
    let mut rp = RegParams::new("store_pair");
    let (mut dca, input) = volume_store();
    let output = input.with_array("Output");
    dca.create_array(&output, DataKind::UInt16, 1, 1000).unwrap();

    {
        let (src, dst) = dca.array_pair_mut(&input, &output).unwrap();
        let src = resolve(src, KindSet::NUMERIC).unwrap();
        let dst = resolve_as_mut::<u16>(dst).unwrap();
        if let Some(src) = src.downcast::<u8>() {
            for (d, s) in dst.iter_mut().zip(src) {
                *d = u16::from(*s) * 2;
            }
        }
    }

    let expected: Vec<u16> = (0..1000u16).map(|i| (i % 256) * 2).collect();
    rp.compare_buffers(&expected, dca.values::<u16>(&output).unwrap_or(&[]));
    rp.check(
        dca.array_pair_mut(&input, &input).err() == Some(StoreError::SameArray(input.clone())),
        "same array refused",
    );
    rp.check(
        dca.array_pair_mut(&input, &input.with_array("Nope")).is_err(),
        "missing destination",
    );

    assert!(rp.cleanup(), "store_pair regression test failed");
}

#[test]
fn store_remove_and_rename() {
    let mut rp = RegParams::new("store_remove_rename");
    let (mut dca, input) = volume_store();
    let temp = input.with_array("Input_tmp");
    dca.create_array(&temp, DataKind::Int32, 1, 1000).unwrap();

    // Rename onto an existing name is refused
    rp.check(
        dca.rename_array(&temp, "Input") == Err(StoreError::ArrayExists(input.clone())),
        "rename onto existing",
    );

    // The overwrite sequence: remove original, rename temporary
    rp.check(dca.remove_array(&input).is_ok(), "remove input");
    rp.check(dca.rename_array(&temp, "Input").is_ok(), "rename temporary");
    rp.check(dca.array_kind(&input) == Ok(Some(DataKind::Int32)), "renamed kind");
    rp.check(!dca.contains_array(&temp), "temporary gone");

    // Neither operation is a silent no-op on a missing array
    rp.check(
        matches!(dca.remove_array(&temp), Err(StoreError::ArrayNotFound(_))),
        "remove missing",
    );
    rp.check(
        matches!(dca.rename_array(&temp, "X"), Err(StoreError::ArrayNotFound(_))),
        "rename missing",
    );
    rp.check(dca.rename_array(&input, "").is_err(), "empty name refused");

    let names = dca
        .matrix(&input)
        .map(|m| m.array_names().join(","))
        .unwrap_or_default();
    rp.check(names == "Input", "one array left");

    assert!(rp.cleanup(), "store_remove_rename regression test failed");
}

#[test]
fn store_unsupported_arrays() {
    let mut rp = RegParams::new("store_unsupported");
    let (mut dca, input) = volume_store();
    let labels = input.with_array("Labels");
    let names: Vec<String> = (0..1000).map(|i| format!("grain{i}")).collect();
    dca.insert_array(&labels, Box::new(StringDataArray::new("whatever", names)))
        .unwrap();

    rp.check(dca.array_kind(&labels) == Ok(None), "string array has no kind");
    let handle = dca.array(&labels).unwrap();
    rp.check(handle.name() == "Labels", "inserted under path name");
    rp.check(resolve(handle, KindSet::ALL).is_err(), "string array unresolvable");

    assert!(rp.cleanup(), "store_unsupported regression test failed");
}

#[test]
fn store_path_from_json() {
    let mut rp = RegParams::new("store_path_json");

    let path: Result<DataArrayPath, _> = serde_json::from_str(
        r#"{ "container": "Volume", "matrix": "CellData", "array": "Phases" }"#,
    );
    match path {
        Ok(path) => {
            rp.check(path.to_string() == "Volume/CellData/Phases", "display");
            rp.check(path.is_valid(), "valid");
            rp.check(
                DataArrayPath::parse("Volume/CellData/Phases").as_ref() == Ok(&path),
                "parse matches json",
            );
        }
        Err(e) => {
            eprintln!("  parse failed: {}", e);
            rp.check(false, "path from json");
        }
    }
    rp.check(!DataArrayPath::default().is_valid(), "empty path invalid");

    assert!(rp.cleanup(), "store_path_json regression test failed");
}
