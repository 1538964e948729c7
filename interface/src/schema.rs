//! Declarative wire layouts for the program's account records.
//!
//! A [`Schema`] is an ordered field list; field order is exactly the byte
//! order on the wire. Schemas are `const`-constructed and never mutated,
//! so a record type's layout is fixed at compile time. Reordering fields
//! breaks compatibility with accounts that are already persisted.

use std::collections::BTreeMap;

use crate::error::{CodecError, CodecResult};

/// Width of a fixed little-endian unsigned integer on the wire.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IntWidth {
    U8,
    U32,
    U64,
}

impl IntWidth {
    #[inline(always)]
    pub const fn byte_len(&self) -> usize {
        match self {
            IntWidth::U8 => 1,
            IntWidth::U32 => 4,
            IntWidth::U64 => 8,
        }
    }

    pub const fn max_value(&self) -> u64 {
        match self {
            IntWidth::U8 => u8::MAX as u64,
            IntWidth::U32 => u32::MAX as u64,
            IntWidth::U64 => u64::MAX,
        }
    }
}

/// Wire type of a single schema field.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WireType {
    /// Fixed-width little-endian unsigned integer.
    Uint(IntWidth),
    /// Associative container of UTF-8 string keys to fixed-width values.
    ///
    /// The container emits no count prefix of its own; its entry count is
    /// carried by the nearest preceding `Uint(U32)` field. Each entry is a
    /// u32-length-prefixed key followed by the value at `value` width.
    Map { value: IntWidth },
}

#[derive(Clone, Copy, Debug)]
pub struct Field {
    pub name: &'static str,
    pub ty: WireType,
}

impl Field {
    pub const fn uint(name: &'static str, width: IntWidth) -> Self {
        Field {
            name,
            ty: WireType::Uint(width),
        }
    }

    pub const fn map(name: &'static str, value: IntWidth) -> Self {
        Field {
            name,
            ty: WireType::Map { value },
        }
    }
}

/// Ordered wire layout of one record type. Write-once.
#[derive(Clone, Copy, Debug)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [Field],
}

impl Schema {
    pub const fn new(name: &'static str, fields: &'static [Field]) -> Self {
        Schema { name, fields }
    }

    /// Checks the map framing rule: every map field must be immediately
    /// preceded by a u32 field carrying its entry count.
    ///
    /// A schema that fails this check is a programming error, not a
    /// recoverable condition; the codec asserts it in debug builds and the
    /// record types exercise it in their tests.
    pub fn is_well_formed(&self) -> bool {
        self.fields.iter().enumerate().all(|(i, field)| {
            match field.ty {
                WireType::Uint(_) => true,
                WireType::Map { .. } => {
                    i > 0
                        && matches!(
                            self.fields[i - 1].ty,
                            WireType::Uint(IntWidth::U32)
                        )
                }
            }
        })
    }
}

/// A decoded (or to-be-encoded) value for one schema field.
///
/// Integers are held at full width; the declared [`IntWidth`] is enforced
/// at encode time rather than by the value's type.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FieldValue {
    Uint(u64),
    Map(BTreeMap<String, u64>),
}

impl FieldValue {
    /// Extracts the integer value. Calling this on a map field is a
    /// schema/record mismatch, which is a programming error.
    pub fn into_uint(self) -> CodecResult<u64> {
        match self {
            FieldValue::Uint(v) => Ok(v),
            FieldValue::Map(_) => Err(CodecError::MalformedContainer),
        }
    }

    /// Extracts the map value. See [`FieldValue::into_uint`].
    pub fn into_map(self) -> CodecResult<BTreeMap<String, u64>> {
        match self {
            FieldValue::Map(m) => Ok(m),
            FieldValue::Uint(_) => Err(CodecError::MalformedContainer),
        }
    }
}

/// Ties a concrete record type to its registered wire schema.
///
/// Implementing this trait is what registers a type with the codec; a type
/// without an implementation cannot be encoded or decoded at all, which
/// makes "lookup of an unregistered type" unrepresentable.
pub trait Record: Sized {
    const SCHEMA: &'static Schema;

    /// Field values in schema order.
    fn to_fields(&self) -> Vec<FieldValue>;

    /// Rebuilds the record from field values in schema order.
    fn from_fields(fields: Vec<FieldValue>) -> CodecResult<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uint_only_schema_is_well_formed() {
        const S: Schema = Schema::new(
            "counter",
            &[Field::uint("counter", IntWidth::U32)],
        );
        assert!(S.is_well_formed());
    }

    #[test]
    fn map_without_count_field_is_rejected() {
        const S: Schema = Schema::new("bad", &[Field::map("map", IntWidth::U64)]);
        assert!(!S.is_well_formed());
    }

    #[test]
    fn map_preceded_by_u8_is_rejected() {
        const S: Schema = Schema::new(
            "bad",
            &[
                Field::uint("flag", IntWidth::U8),
                Field::map("map", IntWidth::U64),
            ],
        );
        assert!(!S.is_well_formed());
    }

    #[test]
    fn map_preceded_by_u32_is_accepted() {
        const S: Schema = Schema::new(
            "ok",
            &[
                Field::uint("len", IntWidth::U32),
                Field::map("map", IntWidth::U64),
            ],
        );
        assert!(S.is_well_formed());
    }
}
