use crate::{
    error::{CodecError, CodecResult},
    schema::{Field, FieldValue, IntWidth, Record, Schema},
};

/// State of a greeting account: the number of times it has been greeted.
///
/// Created with a zero counter when the backing account is first
/// allocated; the remote program increments it, this client only reads it
/// back. Wire layout is exactly 4 bytes, one little-endian u32, so the
/// strict decode mode applies.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GreetingAccount {
    pub counter: u32,
}

impl GreetingAccount {
    pub const fn new(counter: u32) -> Self {
        GreetingAccount { counter }
    }
}

impl Record for GreetingAccount {
    const SCHEMA: &'static Schema =
        &Schema::new("greeting", &[Field::uint("counter", IntWidth::U32)]);

    fn to_fields(&self) -> Vec<FieldValue> {
        vec![FieldValue::Uint(self.counter as u64)]
    }

    fn from_fields(fields: Vec<FieldValue>) -> CodecResult<Self> {
        let mut fields = fields.into_iter();
        let counter = fields
            .next()
            .ok_or(CodecError::MalformedContainer)?
            .into_uint()?;
        Ok(GreetingAccount {
            counter: counter as u32,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode, encode};

    #[test]
    fn schema_is_well_formed() {
        assert!(GreetingAccount::SCHEMA.is_well_formed());
    }

    #[test]
    fn default_encodes_to_four_zero_bytes() {
        let bytes = encode(&GreetingAccount::default()).unwrap();
        assert_eq!(bytes, [0, 0, 0, 0]);
        assert_eq!(
            decode::<GreetingAccount>(&bytes).unwrap(),
            GreetingAccount::default()
        );
    }

    #[test]
    fn counter_round_trips() {
        let record = GreetingAccount::new(0xdead_beef);
        let bytes = encode(&record).unwrap();
        assert_eq!(bytes, 0xdead_beef_u32.to_le_bytes());
        assert_eq!(decode::<GreetingAccount>(&bytes).unwrap(), record);
    }

    #[test]
    fn strict_decode_rejects_any_length_but_four() {
        for len in [0usize, 1, 2, 3, 5, 8, 205] {
            let bytes = vec![0u8; len];
            assert!(matches!(
                decode::<GreetingAccount>(&bytes),
                Err(CodecError::LengthMismatch { .. })
            ));
        }
    }
}
