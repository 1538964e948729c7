use std::collections::BTreeMap;

use crate::{
    error::{CodecError, CodecResult},
    schema::{Field, FieldValue, IntWidth, Record, Schema},
};

/// Fixed byte budget allocated for a ledger account's data, independent of
/// how many balance entries it currently holds. The remote program packs
/// into this full buffer, so decoding must always be lenient against it.
pub const LEDGER_ACCOUNT_SPACE: usize = 205;

/// Per-identity balances held by the program's vault account.
///
/// Wire layout: a 1-byte initialized flag, a 4-byte little-endian entry
/// count (`tree_length`), then that many entries of u32-length-prefixed
/// UTF-8 key followed by an 8-byte little-endian balance. `tree_length`
/// doubles as the container's count framing, so it must always equal the
/// number of entries; the constructors below maintain that, and the codec
/// rejects an encode where it doesn't hold.
///
/// This client decodes ledger state on demand but never writes it back;
/// only the remote program mutates the persisted buffer.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LedgerAccount {
    pub initialized: bool,
    pub tree_length: u32,
    pub balances: BTreeMap<String, u64>,
}

impl LedgerAccount {
    /// An initialized ledger holding the given balances, with
    /// `tree_length` derived from the entry count.
    pub fn with_balances(balances: BTreeMap<String, u64>) -> Self {
        LedgerAccount {
            initialized: true,
            tree_length: balances.len() as u32,
            balances,
        }
    }

    pub fn balance_of(&self, key: &str) -> Option<u64> {
        self.balances.get(key).copied()
    }

    /// Adds `amount` to `key`'s balance, creating the entry if absent.
    /// Mirrors the remote program's deposit semantics for local reasoning.
    pub fn credit(&mut self, key: impl Into<String>, amount: u64) {
        *self.balances.entry(key.into()).or_insert(0) += amount;
        self.tree_length = self.balances.len() as u32;
        self.initialized = true;
    }

    /// Subtracts `amount` from `key`'s balance, returning the new balance,
    /// or `None` when the key is absent or the balance insufficient.
    pub fn debit(&mut self, key: &str, amount: u64) -> Option<u64> {
        let balance = self.balances.get_mut(key)?;
        *balance = balance.checked_sub(amount)?;
        Some(*balance)
    }
}

impl Record for LedgerAccount {
    const SCHEMA: &'static Schema = &Schema::new(
        "ledger",
        &[
            Field::uint("initialized", IntWidth::U8),
            Field::uint("tree_length", IntWidth::U32),
            Field::map("balances", IntWidth::U64),
        ],
    );

    fn to_fields(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Uint(self.initialized as u64),
            FieldValue::Uint(self.tree_length as u64),
            FieldValue::Map(self.balances.clone()),
        ]
    }

    fn from_fields(fields: Vec<FieldValue>) -> CodecResult<Self> {
        let mut fields = fields.into_iter();
        let initialized = fields
            .next()
            .ok_or(CodecError::MalformedContainer)?
            .into_uint()?;
        let tree_length = fields
            .next()
            .ok_or(CodecError::MalformedContainer)?
            .into_uint()?;
        let balances = fields
            .next()
            .ok_or(CodecError::MalformedContainer)?
            .into_map()?;
        Ok(LedgerAccount {
            initialized: initialized != 0,
            tree_length: tree_length as u32,
            balances,
        })
    }
}
