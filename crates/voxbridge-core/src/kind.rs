//! Element kinds
//!
//! The closed set of element types a host array may hold, and the
//! [`Element`] trait that ties each Rust primitive to its [`DataKind`].
//!
//! The numeric kinds are kept in one authoritative order
//! ([`NUMERIC_KINDS`]). `bool` is deliberately not part of that list and is
//! only ever reached through its own resolution path.

use std::cmp::Ordering;
use std::fmt;

use crate::typed::{TypedSlice, TypedSliceMut};

/// Element kind of a host array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float32,
    Float64,
    Bool,
}

/// Numeric kinds in resolution order.
pub const NUMERIC_KINDS: [DataKind; 10] = [
    DataKind::Int8,
    DataKind::UInt8,
    DataKind::Int16,
    DataKind::UInt16,
    DataKind::Int32,
    DataKind::UInt32,
    DataKind::Int64,
    DataKind::UInt64,
    DataKind::Float32,
    DataKind::Float64,
];

impl DataKind {
    /// Host-facing type name (`"uint8"`, `"float32"`, ...)
    pub const fn name(self) -> &'static str {
        match self {
            DataKind::Int8 => "int8",
            DataKind::UInt8 => "uint8",
            DataKind::Int16 => "int16",
            DataKind::UInt16 => "uint16",
            DataKind::Int32 => "int32",
            DataKind::UInt32 => "uint32",
            DataKind::Int64 => "int64",
            DataKind::UInt64 => "uint64",
            DataKind::Float32 => "float32",
            DataKind::Float64 => "float64",
            DataKind::Bool => "bool",
        }
    }

    /// Size of one element in bytes
    pub const fn byte_size(self) -> usize {
        match self {
            DataKind::Int8 | DataKind::UInt8 | DataKind::Bool => 1,
            DataKind::Int16 | DataKind::UInt16 => 2,
            DataKind::Int32 | DataKind::UInt32 | DataKind::Float32 => 4,
            DataKind::Int64 | DataKind::UInt64 | DataKind::Float64 => 8,
        }
    }

    pub const fn is_numeric(self) -> bool {
        !matches!(self, DataKind::Bool)
    }

    pub const fn is_float(self) -> bool {
        matches!(self, DataKind::Float32 | DataKind::Float64)
    }

    pub const fn is_integer(self) -> bool {
        self.is_numeric() && !self.is_float()
    }

    /// Parse a host type name.
    pub fn from_name(name: &str) -> Option<Self> {
        NUMERIC_KINDS
            .iter()
            .copied()
            .chain(std::iter::once(DataKind::Bool))
            .find(|k| k.name() == name)
    }

    const fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of element kinds an operation accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KindSet(u16);

impl KindSet {
    pub const EMPTY: KindSet = KindSet(0);
    /// All ten numeric kinds
    pub const NUMERIC: KindSet = KindSet(0x03ff);
    /// Numeric kinds plus `bool`
    pub const ALL: KindSet = KindSet(0x07ff);
    /// Signed and unsigned integers
    pub const INTEGER: KindSet = KindSet(0x00ff);
    /// `float32` and `float64`
    pub const FLOAT: KindSet = KindSet(0x0300);

    pub const fn with(self, kind: DataKind) -> Self {
        KindSet(self.0 | kind.bit())
    }

    pub const fn without(self, kind: DataKind) -> Self {
        KindSet(self.0 & !kind.bit())
    }

    pub const fn contains(self, kind: DataKind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<DataKind> for KindSet {
    fn from_iter<I: IntoIterator<Item = DataKind>>(iter: I) -> Self {
        iter.into_iter().fold(KindSet::EMPTY, KindSet::with)
    }
}

/// Exact value of one element
///
/// Every integer kind (including `u64` and `i64`) fits in `Int` without
/// loss, which `f64` cannot promise above 2^53. `bool` is `Int(0)` or
/// `Int(1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Int(i128),
    Float(f64),
}

impl Scalar {
    /// Order this value against an `f64` without rounding the value.
    ///
    /// Returns `None` when either side is NaN.
    pub fn compare(self, other: f64) -> Option<Ordering> {
        match self {
            Scalar::Float(v) => v.partial_cmp(&other),
            Scalar::Int(i) => {
                if other.is_nan() {
                    None
                } else if other >= i128::MAX as f64 {
                    Some(Ordering::Less)
                } else if other < i128::MIN as f64 {
                    Some(Ordering::Greater)
                } else {
                    // floor(other) is an integer inside i128 range, so the cast is exact
                    let floor = other.floor();
                    match i.cmp(&(floor as i128)) {
                        Ordering::Equal if other > floor => Some(Ordering::Less),
                        ord => Some(ord),
                    }
                }
            }
        }
    }

    /// Nearest `f64`; integers beyond 2^53 are rounded.
    pub fn to_f64(self) -> f64 {
        match self {
            Scalar::Int(i) => i as f64,
            Scalar::Float(v) => v,
        }
    }
}

mod sealed {
    pub trait Sealed {}
}

/// A primitive element type belonging to the closed kind set
///
/// Conversions through `f64` use Rust `as` semantics: float to integer
/// saturates at the type bounds and maps NaN to zero. `f64` cannot hold
/// every 64-bit integer; use [`Element::cast_from`] when values must
/// survive exactly.
pub trait Element:
    Copy + Default + PartialEq + PartialOrd + fmt::Debug + Send + Sync + 'static + sealed::Sealed
{
    /// Kind tag of this element type
    const KIND: DataKind;

    fn to_f64(self) -> f64;

    fn from_f64(value: f64) -> Self;

    /// Exact value of this element.
    fn to_scalar(self) -> Scalar;

    /// Convert a scalar, saturating at the type bounds. NaN becomes zero
    /// for integer types.
    fn from_scalar(value: Scalar) -> Self;

    /// Convert from another element type without going through `f64`.
    ///
    /// Integer to integer is exact when the value fits and saturates when
    /// it does not.
    #[inline]
    fn cast_from<S: Element>(value: S) -> Self {
        Self::from_scalar(value.to_scalar())
    }

    /// Wrap a borrowed slice in the tagged union.
    fn typed_slice(data: &[Self]) -> TypedSlice<'_>;

    /// Wrap a mutably borrowed slice in the tagged union.
    fn typed_slice_mut(data: &mut [Self]) -> TypedSliceMut<'_>;

    /// Unwrap the tagged union if it holds this element type.
    fn from_typed_slice(slice: TypedSlice<'_>) -> Option<&[Self]>;
}

macro_rules! scalar_conversion {
    (int, $t:ty) => {
        #[inline]
        fn to_scalar(self) -> Scalar {
            Scalar::Int(self as i128)
        }

        #[inline]
        fn from_scalar(value: Scalar) -> Self {
            match value {
                Scalar::Int(i) => i.clamp(<$t>::MIN as i128, <$t>::MAX as i128) as $t,
                Scalar::Float(v) => v as $t,
            }
        }
    };
    (float, $t:ty) => {
        #[inline]
        fn to_scalar(self) -> Scalar {
            Scalar::Float(self as f64)
        }

        #[inline]
        fn from_scalar(value: Scalar) -> Self {
            match value {
                Scalar::Int(i) => i as $t,
                Scalar::Float(v) => v as $t,
            }
        }
    };
}

macro_rules! numeric_element {
    ($($t:ty => $kind:ident, $class:ident);* $(;)?) => {
        $(
            impl sealed::Sealed for $t {}

            impl Element for $t {
                const KIND: DataKind = DataKind::$kind;

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn from_f64(value: f64) -> Self {
                    value as $t
                }

                scalar_conversion!($class, $t);

                fn typed_slice(data: &[Self]) -> TypedSlice<'_> {
                    TypedSlice::$kind(data)
                }

                fn typed_slice_mut(data: &mut [Self]) -> TypedSliceMut<'_> {
                    TypedSliceMut::$kind(data)
                }

                fn from_typed_slice(slice: TypedSlice<'_>) -> Option<&[Self]> {
                    match slice {
                        TypedSlice::$kind(data) => Some(data),
                        _ => None,
                    }
                }
            }
        )*
    };
}

numeric_element! {
    i8 => Int8, int;
    u8 => UInt8, int;
    i16 => Int16, int;
    u16 => UInt16, int;
    i32 => Int32, int;
    u32 => UInt32, int;
    i64 => Int64, int;
    u64 => UInt64, int;
    f32 => Float32, float;
    f64 => Float64, float;
}

impl sealed::Sealed for bool {}

impl Element for bool {
    const KIND: DataKind = DataKind::Bool;

    #[inline]
    fn to_f64(self) -> f64 {
        if self { 1.0 } else { 0.0 }
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value != 0.0
    }

    #[inline]
    fn to_scalar(self) -> Scalar {
        Scalar::Int(i128::from(self))
    }

    #[inline]
    fn from_scalar(value: Scalar) -> Self {
        match value {
            Scalar::Int(i) => i != 0,
            Scalar::Float(v) => v != 0.0,
        }
    }

    fn typed_slice(data: &[Self]) -> TypedSlice<'_> {
        TypedSlice::Bool(data)
    }

    fn typed_slice_mut(data: &mut [Self]) -> TypedSliceMut<'_> {
        TypedSliceMut::Bool(data)
    }

    fn from_typed_slice(slice: TypedSlice<'_>) -> Option<&[Self]> {
        match slice {
            TypedSlice::Bool(data) => Some(data),
            _ => None,
        }
    }
}
