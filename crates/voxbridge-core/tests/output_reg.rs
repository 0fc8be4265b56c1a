//! Output binding regression test
//!
//! Checks that:
//! 1. Binding fails when the destination is smaller than the output
//! 2. Binding succeeds when capacity >= expected and writes exactly the
//!    expected number of elements from offset 0
//! 3. Stage errors are passed through unchanged
//!
//! Run with:
//! ```
//! cargo test -p voxbridge-core --test output_reg
//! ```

use voxbridge_core::{Error, ImageGeometry, ImageView, ImageViewMut, OutputBinder, OutputStage};
use voxbridge_test::{RegParams, fixture_geometry, ramp_volume};

/// Inverts an 8-bit volume into the bound buffer
struct Invert<'a> {
    input: ImageView<'a, u8>,
}

impl OutputStage<u8> for Invert<'_> {
    type Error = Error;

    fn expected_len(&self) -> usize {
        self.input.as_slice().len()
    }

    fn write_into(&mut self, dst: &mut [u8]) -> Result<(), Error> {
        let geometry: ImageGeometry = *self.input.geometry();
        let mut out = ImageViewMut::new(dst, geometry, self.input.components())?;
        for (o, i) in out.as_mut_slice().iter_mut().zip(self.input.as_slice()) {
            *o = 255 - *i;
        }
        Ok(())
    }
}

#[test]
fn output_capacity() {
    let mut rp = RegParams::new("output_capacity");
    let geom = fixture_geometry([4, 4, 4]).unwrap();
    let data: Vec<u8> = ramp_volume(&geom, 1, 3, 256);
    let input = ImageView::new(&data, geom, 1).unwrap();

    for capacity in [0usize, 1, 63] {
        let mut dst = vec![0u8; capacity];
        let result = OutputBinder::bind(Invert { input }, &mut dst);
        rp.check(
            matches!(
                result,
                Err(Error::CapacityTooSmall { expected: 64, capacity: c }) if c == capacity
            ),
            &format!("capacity {capacity} rejected"),
        );
    }

    for capacity in [64usize, 65, 100] {
        let mut dst = vec![7u8; capacity];
        let written = OutputBinder::bind(Invert { input }, &mut dst)
            .map_err(|e| e.to_string())
            .and_then(|bound| bound.execute().map_err(|e| e.to_string()));
        rp.check(written == Ok(64), &format!("capacity {capacity} writes 64"));

        let expected: Vec<u8> = data.iter().map(|v| 255 - v).collect();
        rp.compare_buffers(&expected, &dst[..64]);
        // Tail past the expected length is untouched
        rp.check(dst[64..].iter().all(|v| *v == 7), "tail untouched");
    }

    assert!(rp.cleanup(), "output_capacity regression test failed");
}

#[test]
fn output_stage_error_passes_through() {
    let mut rp = RegParams::new("output_error");
    let geom = fixture_geometry([2, 2, 2]).unwrap();
    let data = vec![0u8; 8];
    let input = ImageView::new(&data, geom, 1).unwrap();

    // A stage that claims fewer elements than its geometry needs fails
    // while building its output view
    struct Truncated<'a>(Invert<'a>);

    impl OutputStage<u8> for Truncated<'_> {
        type Error = Error;

        fn expected_len(&self) -> usize {
            4
        }

        fn write_into(&mut self, dst: &mut [u8]) -> Result<(), Error> {
            self.0.write_into(dst)
        }
    }

    let mut dst = vec![0u8; 8];
    let result = OutputBinder::bind(Truncated(Invert { input }), &mut dst)
        .map(|bound| bound.execute());
    rp.check(
        matches!(result, Ok(Err(Error::ShapeMismatch { actual: 4, .. }))),
        "shape error from stage",
    );

    assert!(rp.cleanup(), "output_error regression test failed");
}
