//! Account sizing for freshly provisioned storage.

use crate::{codec::encode, error::CodecResult, schema::Record};

/// Byte length a record's canonical (default) instance occupies on the
/// wire, measured by actually encoding it.
///
/// Measurement rather than a closed-form formula is deliberate: map
/// fields make a record's size data-dependent, and the measured default
/// is exactly what a new account must be allocated with.
pub fn expected_size<R: Record + Default>() -> CodecResult<usize> {
    Ok(encode(&R::default())?.len())
}
