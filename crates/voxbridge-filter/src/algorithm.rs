//! Delegated algorithm interfaces
//!
//! The shell never knows what an algorithm computes. It only needs:
//!
//! - which element kinds the algorithm accepts ([`VolumeAlgorithm::accepted_kinds`])
//! - which component counts it accepts ([`ComponentRule`])
//! - the output element type for a given input type (the `Output<T>` GAT)
//! - a `run` that reads one borrowed view and fills another
//!
//! [`SliceAlgorithm`] is the 2D counterpart; [`SliceWise`] runs one over
//! every cross-section of a volume along an axis.

use std::fmt;

use voxbridge_core::{Axis, Element, ImageView, ImageViewMut, KindSet, Slice2, SliceView};

use crate::error::AlgorithmError;

/// Component counts an algorithm accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentRule {
    /// Exactly one component
    Scalar,
    /// Exactly `n` components
    Exactly(usize),
    /// Any of the listed counts
    OneOf(&'static [usize]),
    /// Any count
    Any,
}

impl ComponentRule {
    pub fn accepts(&self, components: usize) -> bool {
        match self {
            ComponentRule::Scalar => components == 1,
            ComponentRule::Exactly(n) => components == *n,
            ComponentRule::OneOf(list) => list.contains(&components),
            ComponentRule::Any => components > 0,
        }
    }
}

impl fmt::Display for ComponentRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentRule::Scalar => write!(f, "1"),
            ComponentRule::Exactly(n) => write!(f, "{n}"),
            ComponentRule::OneOf(list) => {
                let names: Vec<String> = list.iter().map(|n| n.to_string()).collect();
                write!(f, "one of {}", names.join(", "))
            }
            ComponentRule::Any => write!(f, "any"),
        }
    }
}

/// Volumetric algorithm generic over the input element type
pub trait VolumeAlgorithm {
    /// Output element type produced for input element type `T`
    type Output<T: Element>: Element;

    fn name(&self) -> &str;

    /// Element kinds the algorithm can be instantiated for
    fn accepted_kinds(&self) -> KindSet {
        KindSet::NUMERIC
    }

    fn component_rule(&self) -> ComponentRule {
        ComponentRule::Scalar
    }

    /// Component count of the output for a given input component count
    fn output_components(&self, input_components: usize) -> usize {
        input_components
    }

    /// Check parameters before anything is allocated.
    fn validate(&self) -> Result<(), AlgorithmError> {
        Ok(())
    }

    /// Read `input` and fill `output`, which has the same geometry.
    fn run<T: Element>(
        &mut self,
        input: &ImageView<'_, T>,
        output: &mut ImageViewMut<'_, Self::Output<T>>,
    ) -> Result<(), AlgorithmError>;
}

/// 2D algorithm applied to one cross-section at a time
pub trait SliceAlgorithm {
    type Output<T: Element>: Element;

    fn name(&self) -> &str;

    fn accepted_kinds(&self) -> KindSet {
        KindSet::NUMERIC
    }

    fn component_rule(&self) -> ComponentRule {
        ComponentRule::Scalar
    }

    fn output_components(&self, input_components: usize) -> usize {
        input_components
    }

    fn validate(&self) -> Result<(), AlgorithmError> {
        Ok(())
    }

    /// Read `input` and fill `output`, which is pre-sized to the same
    /// cross-section.
    fn run_slice<T: Element>(
        &mut self,
        input: &SliceView<'_, T>,
        output: &mut Slice2<Self::Output<T>>,
    ) -> Result<(), AlgorithmError>;
}

/// Runs a [`SliceAlgorithm`] over every cross-section along an axis
#[derive(Debug, Clone)]
pub struct SliceWise<A> {
    inner: A,
    axis: Axis,
}

impl<A: SliceAlgorithm> SliceWise<A> {
    /// Slice along Z (the host's default slicing direction).
    pub fn new(inner: A) -> Self {
        SliceWise {
            inner,
            axis: Axis::Z,
        }
    }

    pub fn along(inner: A, axis: Axis) -> Self {
        SliceWise { inner, axis }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }

    pub fn into_inner(self) -> A {
        self.inner
    }
}

impl<A: SliceAlgorithm> VolumeAlgorithm for SliceWise<A> {
    type Output<T: Element> = A::Output<T>;

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn accepted_kinds(&self) -> KindSet {
        self.inner.accepted_kinds()
    }

    fn component_rule(&self) -> ComponentRule {
        self.inner.component_rule()
    }

    fn output_components(&self, input_components: usize) -> usize {
        self.inner.output_components(input_components)
    }

    fn validate(&self) -> Result<(), AlgorithmError> {
        self.inner.validate()
    }

    fn run<T: Element>(
        &mut self,
        input: &ImageView<'_, T>,
        output: &mut ImageViewMut<'_, Self::Output<T>>,
    ) -> Result<(), AlgorithmError> {
        let name = self.inner.name().to_string();
        let bridge = |e: voxbridge_core::Error| AlgorithmError::new(name.as_str(), e.to_string());
        let geometry = *input.geometry();
        let components = output.components();

        for index in 0..geometry.extent(self.axis) {
            let src = input.slice(self.axis, index).map_err(bridge)?;
            let mut dst =
                Slice2::new(geometry.slice_geometry(self.axis), components).map_err(bridge)?;
            self.inner.run_slice(&src, &mut dst)?;
            output.write_slice(self.axis, index, &dst).map_err(bridge)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxbridge_core::ImageGeometry;

    /// Writes the slice index into every pixel, so the axis is visible
    struct StampIndex {
        calls: usize,
    }

    impl SliceAlgorithm for StampIndex {
        type Output<T: Element> = u16;

        fn name(&self) -> &str {
            "StampIndex"
        }

        fn run_slice<T: Element>(
            &mut self,
            _input: &SliceView<'_, T>,
            output: &mut Slice2<u16>,
        ) -> Result<(), AlgorithmError> {
            output.as_mut_slice().fill(self.calls as u16);
            self.calls += 1;
            Ok(())
        }
    }

    #[test]
    fn test_component_rule() {
        assert!(ComponentRule::Scalar.accepts(1));
        assert!(!ComponentRule::Scalar.accepts(3));
        assert!(ComponentRule::Exactly(3).accepts(3));
        assert!(ComponentRule::OneOf(&[1, 3, 4]).accepts(4));
        assert!(!ComponentRule::OneOf(&[1, 3, 4]).accepts(2));
        assert!(ComponentRule::Any.accepts(7));
        assert!(!ComponentRule::Any.accepts(0));
        assert_eq!(ComponentRule::OneOf(&[1, 3]).to_string(), "one of 1, 3");
    }

    #[test]
    fn test_slicewise_visits_every_index_along_axis() {
        let geom = ImageGeometry::new([2, 3, 4]).unwrap();
        let input = vec![0u8; 24];
        let mut out = vec![0u16; 24];
        let view = ImageView::new(&input, geom, 1).unwrap();
        let mut out_view = ImageViewMut::new(&mut out, geom, 1).unwrap();

        let mut alg = SliceWise::along(StampIndex { calls: 0 }, Axis::Y);
        alg.run(&view, &mut out_view).unwrap();
        assert_eq!(alg.inner().calls, 3);
        for z in 0..4 {
            for y in 0..3 {
                for x in 0..2 {
                    assert_eq!(out_view.get(x, y, z), Some(&[y as u16][..]));
                }
            }
        }
    }
}
