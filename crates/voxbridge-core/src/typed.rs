//! Tagged unions of concretely typed borrows
//!
//! [`TypedSlice`] and [`TypedSliceMut`] are what the resolver hands back.
//! Code that needs the element type as a generic parameter implements
//! [`SliceVisitor`] (or [`SliceVisitorMut`]) once and calls `visit`; the
//! per-kind match lives only here.

use crate::kind::{DataKind, Element};

/// Generic callback over an immutably borrowed typed slice
pub trait SliceVisitor<'a> {
    type Output;

    fn visit<T: Element>(self, data: &'a [T]) -> Self::Output;
}

/// Generic callback over a mutably borrowed typed slice
pub trait SliceVisitorMut<'a> {
    type Output;

    fn visit<T: Element>(self, data: &'a mut [T]) -> Self::Output;
}

macro_rules! typed_unions {
    ($($kind:ident($t:ty)),* $(,)?) => {
        /// Borrowed contiguous elements of one concrete kind
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub enum TypedSlice<'a> {
            $($kind(&'a [$t]),)*
        }

        /// Mutably borrowed contiguous elements of one concrete kind
        #[derive(Debug, PartialEq)]
        pub enum TypedSliceMut<'a> {
            $($kind(&'a mut [$t]),)*
        }

        impl<'a> TypedSlice<'a> {
            /// Element kind of the borrowed data
            pub fn kind(&self) -> DataKind {
                match self {
                    $(TypedSlice::$kind(_) => DataKind::$kind,)*
                }
            }

            /// Number of elements
            pub fn len(&self) -> usize {
                match self {
                    $(TypedSlice::$kind(d) => d.len(),)*
                }
            }

            pub fn is_empty(&self) -> bool {
                self.len() == 0
            }

            /// Dispatch to a generic visitor with the concrete element type.
            pub fn visit<V: SliceVisitor<'a>>(self, visitor: V) -> V::Output {
                match self {
                    $(TypedSlice::$kind(d) => visitor.visit(d),)*
                }
            }
        }

        impl<'a> TypedSliceMut<'a> {
            /// Element kind of the borrowed data
            pub fn kind(&self) -> DataKind {
                match self {
                    $(TypedSliceMut::$kind(_) => DataKind::$kind,)*
                }
            }

            /// Number of elements
            pub fn len(&self) -> usize {
                match self {
                    $(TypedSliceMut::$kind(d) => d.len(),)*
                }
            }

            pub fn is_empty(&self) -> bool {
                self.len() == 0
            }

            /// Dispatch to a generic visitor with the concrete element type.
            pub fn visit<V: SliceVisitorMut<'a>>(self, visitor: V) -> V::Output {
                match self {
                    $(TypedSliceMut::$kind(d) => visitor.visit(d),)*
                }
            }

            /// Reborrow as an immutable typed slice.
            pub fn as_typed_slice(&self) -> TypedSlice<'_> {
                match self {
                    $(TypedSliceMut::$kind(d) => TypedSlice::$kind(d),)*
                }
            }
        }
    };
}

typed_unions! {
    Int8(i8),
    UInt8(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    Bool(bool),
}

impl<'a> TypedSlice<'a> {
    /// Borrow as `&[T]` if the kind matches `T`.
    pub fn downcast<T: Element>(self) -> Option<&'a [T]> {
        T::from_typed_slice(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sum;

    impl<'a> SliceVisitor<'a> for Sum {
        type Output = f64;

        fn visit<T: Element>(self, data: &'a [T]) -> f64 {
            data.iter().map(|v| v.to_f64()).sum()
        }
    }

    struct Fill(f64);

    impl<'a> SliceVisitorMut<'a> for Fill {
        type Output = ();

        fn visit<T: Element>(self, data: &'a mut [T]) {
            data.fill(T::from_f64(self.0));
        }
    }

    #[test]
    fn test_visit_dispatches_concrete_type() {
        let data = [1u16, 2, 3];
        let slice = TypedSlice::UInt16(&data);
        assert_eq!(slice.kind(), DataKind::UInt16);
        assert_eq!(slice.len(), 3);
        assert_eq!(slice.visit(Sum), 6.0);
    }

    #[test]
    fn test_visit_mut_writes_through() {
        let mut data = [0.0f32; 4];
        TypedSliceMut::Float32(&mut data).visit(Fill(2.5));
        assert_eq!(data, [2.5; 4]);
    }

    #[test]
    fn test_element_wraps_into_matching_variant() {
        let data = [true, false];
        assert_eq!(bool::typed_slice(&data).kind(), DataKind::Bool);
        let mut ints = [0i64; 2];
        assert_eq!(i64::typed_slice_mut(&mut ints).kind(), DataKind::Int64);
    }

    #[test]
    fn test_downcast() {
        let data = [5u8, 6];
        let slice = TypedSlice::UInt8(&data);
        assert_eq!(slice.downcast::<u8>(), Some(&data[..]));
        assert_eq!(slice.downcast::<i8>(), None);
    }
}
