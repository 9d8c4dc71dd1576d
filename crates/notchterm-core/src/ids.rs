use uuid::Uuid;

/// Source of ids for workspaces and tabs.
///
/// Stores take a generator at construction so tests can substitute
/// [`SequentialIds`] and assert against known ids.
pub trait IdGenerator: Send {
    fn next_id(&mut self) -> Uuid;
}

/// Production generator: random v4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Deterministic generator yielding 00000000-...-0001, -0002, and so on.
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: u128,
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> Uuid {
        self.next += 1;
        Uuid::from_u128(self.next)
    }
}
