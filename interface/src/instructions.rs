//! Byte payloads for the remote program's instructions.
//!
//! Two wire conventions coexist and are deliberately kept apart. Deposit
//! and withdraw use a single leading discriminant byte with no operand
//! bytes after it. The legacy greet path predates the discriminant scheme
//! and sends a bare 8-byte little-endian lamport amount instead; the
//! remote program tells the two apart on its own terms, so they must not
//! be unified into one tag space here.
//!
//! Payloads are only ever built by this client, never unpacked; decoding
//! applies to account state alone.

/// Discriminant byte for the tagged instruction convention.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(test, derive(strum_macros::FromRepr, strum_macros::EnumIter))]
pub enum InstructionTag {
    Deposit,
    Withdraw,
}

impl TryFrom<u8> for InstructionTag {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(InstructionTag::Deposit),
            1 => Ok(InstructionTag::Withdraw),
            _ => Err(value),
        }
    }
}

/// A logical operation on the remote program, with its operands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LedgerInstruction {
    /// Credit the calling identity's balance in the vault account.
    Deposit,
    /// Debit the calling identity's balance from the vault account.
    Withdraw,
    /// Legacy greeting transfer of `lamports`, on the pre-discriminant
    /// wire convention.
    Greet { lamports: u64 },
}

impl LedgerInstruction {
    /// Packs the exact byte payload the remote program expects.
    pub fn pack(&self) -> Vec<u8> {
        match self {
            LedgerInstruction::Deposit => vec![InstructionTag::Deposit as u8],
            LedgerInstruction::Withdraw => vec![InstructionTag::Withdraw as u8],
            LedgerInstruction::Greet { lamports } => lamports.to_le_bytes().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_instruction_tag_from_u8_exhaustive() {
        for variant in InstructionTag::iter() {
            let variant_u8 = variant as u8;
            assert_eq!(
                InstructionTag::from_repr(variant_u8).unwrap(),
                InstructionTag::try_from(variant_u8).unwrap(),
            );
            assert_eq!(InstructionTag::try_from(variant_u8).unwrap(), variant);
        }
        assert_eq!(InstructionTag::try_from(2), Err(2));
    }

    #[test]
    fn tagged_instructions_pack_to_one_byte() {
        assert_eq!(LedgerInstruction::Deposit.pack(), [0x00]);
        assert_eq!(LedgerInstruction::Withdraw.pack(), [0x01]);
    }

    #[test]
    fn greet_packs_to_bare_little_endian_amount() {
        let lamports = 300_000_000;
        let packed = LedgerInstruction::Greet { lamports }.pack();
        assert_eq!(packed, lamports.to_le_bytes());
        // No discriminant byte precedes the amount.
        assert_eq!(packed.len(), 8);
    }
}
