//! Element kind conversion

use std::marker::PhantomData;

use voxbridge_core::{Element, ImageView, ImageViewMut, KindSet};

use crate::algorithm::{ComponentRule, VolumeAlgorithm};
use crate::error::AlgorithmError;

/// Converts any numeric volume to element type `O`
///
/// Values convert exactly when they fit, including 64-bit integers.
/// Out-of-range values saturate and NaN becomes zero. Component count is
/// preserved.
#[derive(Debug)]
pub struct CastImage<O: Element> {
    _out: PhantomData<fn() -> O>,
}

impl<O: Element> CastImage<O> {
    pub fn new() -> Self {
        CastImage { _out: PhantomData }
    }
}

impl<O: Element> Default for CastImage<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: Element> Clone for CastImage<O> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<O: Element> VolumeAlgorithm for CastImage<O> {
    type Output<T: Element> = O;

    fn name(&self) -> &str {
        "CastImage"
    }

    fn component_rule(&self) -> ComponentRule {
        ComponentRule::Any
    }

    fn run<T: Element>(
        &mut self,
        input: &ImageView<'_, T>,
        output: &mut ImageViewMut<'_, O>,
    ) -> Result<(), AlgorithmError> {
        for (dst, src) in output.as_mut_slice().iter_mut().zip(input.as_slice()) {
            *dst = O::cast_from(*src);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxbridge_core::{DataKind, ImageGeometry};

    #[test]
    fn test_saturating_cast() {
        let geom = ImageGeometry::new([4, 1, 1]).unwrap();
        let input = [-5.0f64, 12.7, 300.0, f64::NAN];
        let mut out = [1u8; 4];
        let view = ImageView::new(&input, geom, 1).unwrap();
        let mut out_view = ImageViewMut::new(&mut out, geom, 1).unwrap();

        CastImage::<u8>::new().run(&view, &mut out_view).unwrap();
        assert_eq!(out, [0, 12, 255, 0]);
    }

    #[test]
    fn test_keeps_components_and_rejects_bool() {
        let alg = CastImage::<f32>::new();
        assert_eq!(alg.output_components(3), 3);
        assert!(alg.component_rule().accepts(3));
        assert!(!alg.accepted_kinds().contains(DataKind::Bool));
    }

    #[test]
    fn test_identity_cast_is_exact_for_64_bit() {
        let geom = ImageGeometry::new([2, 1, 1]).unwrap();
        let input = [(1i64 << 53) + 1, i64::MAX - 1];
        let mut out = [0i64; 2];
        let view = ImageView::new(&input, geom, 1).unwrap();
        let mut out_view = ImageViewMut::new(&mut out, geom, 1).unwrap();
        CastImage::<i64>::new().run(&view, &mut out_view).unwrap();
        assert_eq!(out, input);

        let input = [u64::MAX, (1u64 << 63) + 3];
        let mut out = [0u64; 2];
        let view = ImageView::new(&input, geom, 1).unwrap();
        let mut out_view = ImageViewMut::new(&mut out, geom, 1).unwrap();
        CastImage::<u64>::new().run(&view, &mut out_view).unwrap();
        assert_eq!(out, input);

        // Narrowing across signedness saturates
        let mut out = [0i64; 2];
        let mut out_view = ImageViewMut::new(&mut out, geom, 1).unwrap();
        CastImage::<i64>::new().run(&view, &mut out_view).unwrap();
        assert_eq!(out, [i64::MAX, i64::MAX]);
    }
}
