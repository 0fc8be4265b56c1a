//! Binary threshold
//!
//! Maps every voxel inside the closed range `[lower, upper]` to
//! `inside_value` and everything else to `outside_value`. The output is
//! always a single-component `u8` mask whatever the input kind.
//!
//! Voxel values are compared against the bounds exactly, so 64-bit
//! integers above 2^53 are not rounded before the test.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use voxbridge_core::{Element, ImageView, ImageViewMut, KindSet};

use crate::algorithm::{ComponentRule, VolumeAlgorithm};
use crate::error::AlgorithmError;

/// Parameters for [`BinaryThreshold`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdParams {
    pub lower: f64,
    pub upper: f64,
    pub inside_value: u8,
    pub outside_value: u8,
}

impl Default for ThresholdParams {
    fn default() -> Self {
        ThresholdParams {
            lower: f64::MIN,
            upper: f64::MAX,
            inside_value: 255,
            outside_value: 0,
        }
    }
}

/// Per-voxel binary threshold
#[derive(Debug, Clone, Default)]
pub struct BinaryThreshold {
    params: ThresholdParams,
}

impl BinaryThreshold {
    pub fn new(lower: f64, upper: f64) -> Self {
        BinaryThreshold {
            params: ThresholdParams {
                lower,
                upper,
                ..ThresholdParams::default()
            },
        }
    }

    pub fn from_params(params: ThresholdParams) -> Self {
        BinaryThreshold { params }
    }

    pub fn with_values(mut self, inside: u8, outside: u8) -> Self {
        self.params.inside_value = inside;
        self.params.outside_value = outside;
        self
    }

    pub fn params(&self) -> &ThresholdParams {
        &self.params
    }
}

impl VolumeAlgorithm for BinaryThreshold {
    type Output<T: Element> = u8;

    fn name(&self) -> &str {
        "BinaryThreshold"
    }

    fn accepted_kinds(&self) -> KindSet {
        KindSet::ALL
    }

    fn component_rule(&self) -> ComponentRule {
        ComponentRule::Scalar
    }

    fn validate(&self) -> Result<(), AlgorithmError> {
        let ThresholdParams { lower, upper, .. } = self.params;
        if lower.is_nan() || upper.is_nan() {
            return Err(AlgorithmError::new(self.name(), "threshold bounds must not be NaN"));
        }
        if lower > upper {
            return Err(AlgorithmError::new(
                self.name(),
                format!("lower threshold {lower} is greater than upper threshold {upper}"),
            ));
        }
        Ok(())
    }

    fn run<T: Element>(
        &mut self,
        input: &ImageView<'_, T>,
        output: &mut ImageViewMut<'_, u8>,
    ) -> Result<(), AlgorithmError> {
        let p = self.params;
        for (dst, src) in output.as_mut_slice().iter_mut().zip(input.as_slice()) {
            let v = src.to_scalar();
            let above = matches!(v.compare(p.lower), Some(Ordering::Greater | Ordering::Equal));
            let below = matches!(v.compare(p.upper), Some(Ordering::Less | Ordering::Equal));
            *dst = if above && below {
                p.inside_value
            } else {
                p.outside_value
            };
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxbridge_core::ImageGeometry;

    #[test]
    fn test_threshold_is_inclusive() {
        let geom = ImageGeometry::new([5, 1, 1]).unwrap();
        let input = [-1.0f32, 0.0, 0.5, 1.0, 1.5];
        let mut out = [9u8; 5];
        let view = ImageView::new(&input, geom, 1).unwrap();
        let mut out_view = ImageViewMut::new(&mut out, geom, 1).unwrap();

        let mut alg = BinaryThreshold::new(0.0, 1.0).with_values(1, 0);
        alg.run(&view, &mut out_view).unwrap();
        assert_eq!(out, [0, 1, 1, 1, 0]);
    }

    #[test]
    fn test_bool_input() {
        let geom = ImageGeometry::new([2, 2, 1]).unwrap();
        let input = [true, false, false, true];
        let mut out = [0u8; 4];
        let view = ImageView::new(&input, geom, 1).unwrap();
        let mut out_view = ImageViewMut::new(&mut out, geom, 1).unwrap();

        BinaryThreshold::new(1.0, 1.0)
            .run(&view, &mut out_view)
            .unwrap();
        assert_eq!(out, [255, 0, 0, 255]);
    }

    #[test]
    fn test_64_bit_values_compared_exactly() {
        let geom = ImageGeometry::new([3, 1, 1]).unwrap();
        let limit = 1u64 << 53;
        let input = [limit - 1, limit, limit + 1];
        let mut out = [9u8; 3];
        let view = ImageView::new(&input, geom, 1).unwrap();
        let mut out_view = ImageViewMut::new(&mut out, geom, 1).unwrap();

        // limit + 1 rounds to limit as f64 but lies outside [0, limit]
        BinaryThreshold::new(0.0, limit as f64)
            .with_values(1, 0)
            .run(&view, &mut out_view)
            .unwrap();
        assert_eq!(out, [1, 1, 0]);
    }

    #[test]
    fn test_validate_bounds() {
        assert!(BinaryThreshold::new(2.0, 1.0).validate().is_err());
        assert!(BinaryThreshold::new(f64::NAN, 1.0).validate().is_err());
        assert!(BinaryThreshold::new(1.0, 1.0).validate().is_ok());
        assert!(BinaryThreshold::default().validate().is_ok());
    }

    #[test]
    fn test_params_from_json_use_defaults() {
        let p: ThresholdParams = serde_json::from_str(r#"{ "lower": 10, "upper": 20 }"#).unwrap();
        assert_eq!(p.lower, 10.0);
        assert_eq!(p.upper, 20.0);
        assert_eq!(p.inside_value, 255);
        assert_eq!(p.outside_value, 0);
    }
}
