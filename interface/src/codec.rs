//! Schema-driven encoder/decoder for account records.
//!
//! The engine knows nothing about any concrete record type: it walks a
//! [`Schema`]'s field list in order and moves [`FieldValue`]s in or out of
//! little-endian bytes. Two decode modes exist: strict decoding requires
//! the input length to match the schema-implied length exactly, while
//! lenient decoding tolerates trailing bytes so records can live in
//! over-allocated on-chain buffers.

use std::collections::BTreeMap;

use crate::{
    error::{CodecError, CodecResult},
    schema::{FieldValue, IntWidth, Record, WireType},
};

/// Encodes a record's logical content. The output length is a pure
/// function of the schema and, for map fields, of the entry data.
pub fn encode<R: Record>(record: &R) -> CodecResult<Vec<u8>> {
    debug_assert!(R::SCHEMA.is_well_formed());
    let fields = record.to_fields();
    debug_assert_eq!(fields.len(), R::SCHEMA.fields.len());

    let mut out = Vec::new();
    // Entry count carried by the u32 field preceding a map field.
    let mut pending_count: u64 = 0;

    for (field, value) in R::SCHEMA.fields.iter().zip(fields) {
        match (field.ty, value) {
            (WireType::Uint(width), FieldValue::Uint(v)) => {
                if v > width.max_value() {
                    return Err(CodecError::WidthOverflow {
                        field: field.name,
                        value: v,
                        width,
                    });
                }
                out.extend_from_slice(&v.to_le_bytes()[..width.byte_len()]);
                pending_count = v;
            }
            (WireType::Map { value: width }, FieldValue::Map(map)) => {
                if pending_count != map.len() as u64 {
                    return Err(CodecError::ContainerCountMismatch {
                        declared: pending_count,
                        actual: map.len(),
                    });
                }
                for (key, v) in &map {
                    if *v > width.max_value() {
                        return Err(CodecError::WidthOverflow {
                            field: field.name,
                            value: *v,
                            width,
                        });
                    }
                    out.extend_from_slice(&(key.len() as u32).to_le_bytes());
                    out.extend_from_slice(key.as_bytes());
                    out.extend_from_slice(&v.to_le_bytes()[..width.byte_len()]);
                }
            }
            // to_fields produced a value kind the schema doesn't declare.
            _ => return Err(CodecError::MalformedContainer),
        }
    }
    Ok(out)
}

/// Encodes a record and zero-pads the result to `space` bytes, the full
/// size of the allocated on-chain buffer.
///
/// An encoding that does not fit is a capacity error; the buffer is never
/// grown to accommodate it.
pub fn encode_padded<R: Record>(record: &R, space: usize) -> CodecResult<Vec<u8>> {
    let mut out = encode(record)?;
    if out.len() > space {
        return Err(CodecError::CapacityExceeded {
            space,
            required: out.len(),
        });
    }
    out.resize(space, 0);
    Ok(out)
}

/// Strict decode: the input must hold exactly the bytes the schema
/// implies, with nothing trailing.
pub fn decode<R: Record>(bytes: &[u8]) -> CodecResult<R> {
    decode_inner(bytes, true)
}

/// Lenient decode: trailing bytes beyond the schema-implied length are
/// ignored. This is the mode for records whose on-chain buffer is
/// over-allocated relative to their current logical content.
pub fn decode_lenient<R: Record>(bytes: &[u8]) -> CodecResult<R> {
    decode_inner(bytes, false)
}

fn decode_inner<R: Record>(bytes: &[u8], strict: bool) -> CodecResult<R> {
    debug_assert!(R::SCHEMA.is_well_formed());

    let mut cursor = Cursor { bytes, pos: 0 };
    let mut fields = Vec::with_capacity(R::SCHEMA.fields.len());
    let mut pending_count: u64 = 0;

    for field in R::SCHEMA.fields {
        let value = match field.ty {
            WireType::Uint(width) => {
                let v = cursor.read_uint(width)?;
                pending_count = v;
                FieldValue::Uint(v)
            }
            WireType::Map { value: width } => {
                FieldValue::Map(cursor.read_map(pending_count, width)?)
            }
        };
        fields.push(value);
    }

    if strict && cursor.pos != bytes.len() {
        return Err(CodecError::LengthMismatch {
            expected: cursor.pos,
            actual: bytes.len(),
        });
    }

    R::from_fields(fields)
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Cursor<'_> {
    /// Consumes the bytes of one fixed-width field. Running out of input
    /// here means the buffer is shorter than the fixed layout requires.
    fn read_uint(&mut self, width: IntWidth) -> CodecResult<u64> {
        let n = width.byte_len();
        let end = self.pos + n;
        if end > self.bytes.len() {
            return Err(CodecError::LengthMismatch {
                expected: end,
                actual: self.bytes.len(),
            });
        }
        let mut le = [0u8; 8];
        le[..n].copy_from_slice(&self.bytes[self.pos..end]);
        self.pos = end;
        Ok(u64::from_le_bytes(le))
    }

    /// Consumes `count` (key, value) pairs. A pair sequence that runs out
    /// of input, or a key that is not valid UTF-8, is a malformed
    /// container regardless of decode mode.
    fn read_map(&mut self, count: u64, width: IntWidth) -> CodecResult<BTreeMap<String, u64>> {
        let mut map = BTreeMap::new();
        for _ in 0..count {
            let key_len = self
                .read_uint(IntWidth::U32)
                .map_err(|_| CodecError::MalformedContainer)? as usize;
            let end = self.pos + key_len;
            if end > self.bytes.len() {
                return Err(CodecError::MalformedContainer);
            }
            let key = std::str::from_utf8(&self.bytes[self.pos..end])
                .map_err(|_| CodecError::MalformedContainer)?
                .to_owned();
            self.pos = end;
            let value = self
                .read_uint(width)
                .map_err(|_| CodecError::MalformedContainer)?;
            map.insert(key, value);
        }
        Ok(map)
    }
}
