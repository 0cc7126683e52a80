use uuid::Uuid;

use crate::task::TaskId;

/// Source of fresh task ids. Implementations must never hand out the same
/// id twice within a session; ordering is not required.
pub trait IdGenerator {
    fn next_id(&mut self) -> TaskId;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> TaskId {
        TaskId::random()
    }
}

/// Counter-backed ids (`00000000-0000-0000-0000-000000000001`, ...).
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
    fn next_id(&mut self) -> TaskId {
        self.last += 1;
        TaskId::from_uuid(Uuid::from_u128(self.last))
    }
}

impl<F> IdGenerator for F
where
    F: FnMut() -> TaskId,
{
    fn next_id(&mut self) -> TaskId {
        self()
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::{IdGenerator, RandomIds, SequentialIds};
    use crate::task::TaskId;

    #[test]
    fn sequential_ids_count_up_from_one() {
        let mut ids = SequentialIds::new();
        assert_eq!(ids.next_id(), TaskId::from_uuid(Uuid::from_u128(1)));
        assert_eq!(ids.next_id(), TaskId::from_uuid(Uuid::from_u128(2)));
    }

    #[test]
    fn random_ids_do_not_repeat() {
        let mut ids = RandomIds;
        let first = ids.next_id();
        let second = ids.next_id();
        assert_ne!(first, second);
    }

    #[test]
    fn closures_are_generators() {
        let mut n = 40_u128;
        let mut ids = move || {
            n += 2;
            TaskId::from_uuid(Uuid::from_u128(n))
        };
        assert_eq!(ids.next_id(), TaskId::from_uuid(Uuid::from_u128(42)));
    }
}
