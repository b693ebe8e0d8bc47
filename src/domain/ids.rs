use uuid::Uuid;

pub type ExpenseId = Uuid;

/// Hands out identifiers for new expense records.
///
/// Implementations must not return the same value forever; the ledger
/// draws again when an identifier is already in use.
pub trait IdGenerator {
    fn next_id(&mut self) -> ExpenseId;
}

/// Random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> ExpenseId {
        Uuid::new_v4()
    }
}

/// Deterministic ids: 00000000-0000-0000-0000-000000000001, ...002, ...
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    last: u128,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> ExpenseId {
        self.last += 1;
        Uuid::from_u128(self.last)
    }
}
