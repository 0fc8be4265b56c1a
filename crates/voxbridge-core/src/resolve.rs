//! Runtime element-kind resolution
//!
//! A host array reaches the bridging layer as an opaque [`ArrayHandle`].
//! Resolution classifies it against an ordered list of kinds and hands back
//! a [`TypedSlice`] (or [`TypedSliceMut`]) for the first match.
//!
//! # Order
//!
//! Numeric kinds are tried in [`NUMERIC_KINDS`] order. `bool` is never part
//! of that list: it is checked by [`resolve_bool`], and [`resolve`] consults
//! it only after every numeric kind, and only when the requested
//! [`KindSet`] contains [`DataKind::Bool`].
//!
//! # Storage contract
//!
//! [`ArrayHandle::storage`] must return the backing `Vec<T>` of the array.
//! Any other storage type (strings, neighbour lists, ...) resolves to
//! [`Error::UnsupportedType`].

use std::any::Any;

use crate::error::{Error, Result};
use crate::kind::{DataKind, Element, KindSet, NUMERIC_KINDS};
use crate::typed::{TypedSlice, TypedSliceMut};

/// Opaque, runtime-typed host array
pub trait ArrayHandle {
    /// Array name within its attribute matrix
    fn name(&self) -> &str;

    /// Host-facing element type name, used in diagnostics
    fn type_name(&self) -> &str;

    /// Components per tuple
    fn component_count(&self) -> usize;

    /// Number of tuples
    fn tuple_count(&self) -> usize;

    /// Backing storage, a `Vec<T>` for every resolvable kind
    fn storage(&self) -> &dyn Any;

    /// Backing storage, mutably
    fn storage_mut(&mut self) -> &mut dyn Any;
}

fn holds<T: Element>(handle: &dyn ArrayHandle) -> bool {
    handle.storage().is::<Vec<T>>()
}

fn holds_kind(handle: &dyn ArrayHandle, kind: DataKind) -> bool {
    match kind {
        DataKind::Int8 => holds::<i8>(handle),
        DataKind::UInt8 => holds::<u8>(handle),
        DataKind::Int16 => holds::<i16>(handle),
        DataKind::UInt16 => holds::<u16>(handle),
        DataKind::Int32 => holds::<i32>(handle),
        DataKind::UInt32 => holds::<u32>(handle),
        DataKind::Int64 => holds::<i64>(handle),
        DataKind::UInt64 => holds::<u64>(handle),
        DataKind::Float32 => holds::<f32>(handle),
        DataKind::Float64 => holds::<f64>(handle),
        DataKind::Bool => holds::<bool>(handle),
    }
}

fn unsupported(handle: &dyn ArrayHandle) -> Error {
    Error::UnsupportedType {
        name: handle.name().to_string(),
        type_name: handle.type_name().to_string(),
    }
}

/// Classify a handle against `kinds` without borrowing its data.
///
/// Numeric kinds are tried in [`NUMERIC_KINDS`] order, then `bool`.
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] if no kind in `kinds` matches.
pub fn classify(handle: &dyn ArrayHandle, kinds: KindSet) -> Result<DataKind> {
    for kind in NUMERIC_KINDS {
        if kinds.contains(kind) && holds_kind(handle, kind) {
            return Ok(kind);
        }
    }
    if kinds.contains(DataKind::Bool) && holds::<bool>(handle) {
        return Ok(DataKind::Bool);
    }
    Err(unsupported(handle))
}

fn typed<T: Element>(handle: &dyn ArrayHandle) -> Option<TypedSlice<'_>> {
    handle
        .storage()
        .downcast_ref::<Vec<T>>()
        .map(|v| T::typed_slice(v))
}

fn typed_mut<T: Element>(handle: &mut dyn ArrayHandle) -> Option<TypedSliceMut<'_>> {
    handle
        .storage_mut()
        .downcast_mut::<Vec<T>>()
        .map(|v| T::typed_slice_mut(v))
}

fn borrow_kind(handle: &dyn ArrayHandle, kind: DataKind) -> Option<TypedSlice<'_>> {
    match kind {
        DataKind::Int8 => typed::<i8>(handle),
        DataKind::UInt8 => typed::<u8>(handle),
        DataKind::Int16 => typed::<i16>(handle),
        DataKind::UInt16 => typed::<u16>(handle),
        DataKind::Int32 => typed::<i32>(handle),
        DataKind::UInt32 => typed::<u32>(handle),
        DataKind::Int64 => typed::<i64>(handle),
        DataKind::UInt64 => typed::<u64>(handle),
        DataKind::Float32 => typed::<f32>(handle),
        DataKind::Float64 => typed::<f64>(handle),
        DataKind::Bool => typed::<bool>(handle),
    }
}

fn borrow_kind_mut(handle: &mut dyn ArrayHandle, kind: DataKind) -> Option<TypedSliceMut<'_>> {
    match kind {
        DataKind::Int8 => typed_mut::<i8>(handle),
        DataKind::UInt8 => typed_mut::<u8>(handle),
        DataKind::Int16 => typed_mut::<i16>(handle),
        DataKind::UInt16 => typed_mut::<u16>(handle),
        DataKind::Int32 => typed_mut::<i32>(handle),
        DataKind::UInt32 => typed_mut::<u32>(handle),
        DataKind::Int64 => typed_mut::<i64>(handle),
        DataKind::UInt64 => typed_mut::<u64>(handle),
        DataKind::Float32 => typed_mut::<f32>(handle),
        DataKind::Float64 => typed_mut::<f64>(handle),
        DataKind::Bool => typed_mut::<bool>(handle),
    }
}

/// Resolve a handle to the first matching kind in `kinds`.
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] if no kind in `kinds` matches.
pub fn resolve(handle: &dyn ArrayHandle, kinds: KindSet) -> Result<TypedSlice<'_>> {
    let kind = classify(handle, kinds)?;
    borrow_kind(handle, kind).ok_or_else(|| unsupported(handle))
}

/// Mutable counterpart of [`resolve`].
pub fn resolve_mut(handle: &mut dyn ArrayHandle, kinds: KindSet) -> Result<TypedSliceMut<'_>> {
    let kind = classify(handle, kinds)?;
    borrow_kind_mut(handle, kind)
        .ok_or_else(|| Error::InvalidParameter(format!("storage is not a Vec<{kind}>")))
}

/// Resolve against the ten numeric kinds only.
pub fn resolve_numeric(handle: &dyn ArrayHandle) -> Result<TypedSlice<'_>> {
    resolve(handle, KindSet::NUMERIC)
}

/// Mutable counterpart of [`resolve_numeric`].
pub fn resolve_numeric_mut(handle: &mut dyn ArrayHandle) -> Result<TypedSliceMut<'_>> {
    resolve_mut(handle, KindSet::NUMERIC)
}

/// Resolve a boolean array.
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] unless the handle stores `bool`.
pub fn resolve_bool(handle: &dyn ArrayHandle) -> Result<&[bool]> {
    handle
        .storage()
        .downcast_ref::<Vec<bool>>()
        .map(Vec::as_slice)
        .ok_or_else(|| unsupported(handle))
}

/// Mutable counterpart of [`resolve_bool`].
pub fn resolve_bool_mut(handle: &mut dyn ArrayHandle) -> Result<&mut [bool]> {
    if !holds::<bool>(handle) {
        return Err(unsupported(handle));
    }
    handle
        .storage_mut()
        .downcast_mut::<Vec<bool>>()
        .map(Vec::as_mut_slice)
        .ok_or_else(|| Error::InvalidParameter("storage is not a Vec<bool>".to_string()))
}

/// Resolve as a concrete `T`.
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] if the handle does not store `T`.
pub fn resolve_as<T: Element>(handle: &dyn ArrayHandle) -> Result<&[T]> {
    handle
        .storage()
        .downcast_ref::<Vec<T>>()
        .map(Vec::as_slice)
        .ok_or_else(|| unsupported(handle))
}

/// Mutable counterpart of [`resolve_as`].
pub fn resolve_as_mut<T: Element>(handle: &mut dyn ArrayHandle) -> Result<&mut [T]> {
    if !holds::<T>(handle) {
        return Err(unsupported(handle));
    }
    handle
        .storage_mut()
        .downcast_mut::<Vec<T>>()
        .map(Vec::as_mut_slice)
        .ok_or_else(|| Error::InvalidParameter(format!("storage is not a Vec<{}>", T::KIND)))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Raw<S: 'static> {
        data: S,
    }

    impl<S: 'static> ArrayHandle for Raw<S> {
        fn name(&self) -> &str {
            "raw"
        }
        fn type_name(&self) -> &str {
            std::any::type_name::<S>()
        }
        fn component_count(&self) -> usize {
            1
        }
        fn tuple_count(&self) -> usize {
            0
        }
        fn storage(&self) -> &dyn Any {
            &self.data
        }
        fn storage_mut(&mut self) -> &mut dyn Any {
            &mut self.data
        }
    }

    #[test]
    fn test_classify_each_numeric_kind() {
        let cases: Vec<(Box<dyn ArrayHandle>, DataKind)> = vec![
            (Box::new(Raw { data: vec![0i8] }), DataKind::Int8),
            (Box::new(Raw { data: vec![0u8] }), DataKind::UInt8),
            (Box::new(Raw { data: vec![0i16] }), DataKind::Int16),
            (Box::new(Raw { data: vec![0u16] }), DataKind::UInt16),
            (Box::new(Raw { data: vec![0i32] }), DataKind::Int32),
            (Box::new(Raw { data: vec![0u32] }), DataKind::UInt32),
            (Box::new(Raw { data: vec![0i64] }), DataKind::Int64),
            (Box::new(Raw { data: vec![0u64] }), DataKind::UInt64),
            (Box::new(Raw { data: vec![0f32] }), DataKind::Float32),
            (Box::new(Raw { data: vec![0f64] }), DataKind::Float64),
        ];
        for (handle, kind) in &cases {
            assert_eq!(classify(handle.as_ref(), KindSet::ALL).unwrap(), *kind);
            assert_eq!(resolve_numeric(handle.as_ref()).unwrap().kind(), *kind);
        }
    }

    #[test]
    fn test_bool_only_through_bool_path() {
        let handle = Raw {
            data: vec![true, false],
        };
        assert!(matches!(
            resolve_numeric(&handle),
            Err(Error::UnsupportedType { .. })
        ));
        assert_eq!(resolve_bool(&handle).unwrap(), &[true, false]);
        assert_eq!(resolve(&handle, KindSet::ALL).unwrap().kind(), DataKind::Bool);
    }

    #[test]
    fn test_uint8_is_not_bool() {
        let handle = Raw { data: vec![1u8] };
        assert!(resolve_bool(&handle).is_err());
        assert_eq!(resolve(&handle, KindSet::ALL).unwrap().kind(), DataKind::UInt8);
    }

    #[test]
    fn test_kind_outside_set_rejected() {
        let handle = Raw {
            data: vec![1.0f32],
        };
        let err = resolve(&handle, KindSet::INTEGER).unwrap_err();
        assert!(matches!(err, Error::UnsupportedType { .. }));
    }

    #[test]
    fn test_foreign_storage_rejected() {
        let handle = Raw {
            data: vec!["a".to_string()],
        };
        assert!(classify(&handle, KindSet::ALL).is_err());
    }

    #[test]
    fn test_resolve_mut_writes_through() {
        let mut handle = Raw {
            data: vec![0u16; 3],
        };
        match resolve_numeric_mut(&mut handle).unwrap() {
            TypedSliceMut::UInt16(d) => d[1] = 7,
            other => panic!("unexpected kind {:?}", other.kind()),
        }
        assert_eq!(handle.data, vec![0, 7, 0]);

        resolve_as_mut::<u16>(&mut handle).unwrap()[2] = 9;
        assert_eq!(resolve_as::<u16>(&handle).unwrap(), &[0, 7, 9]);
        assert!(resolve_as::<i16>(&handle).is_err());
    }
}
