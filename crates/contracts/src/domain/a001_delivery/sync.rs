/// Ticket handed out when a list fetch is issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Orders list fetches against local mutations.
///
/// A fetch result is applied only if nothing happened locally since it was
/// issued: no newer fetch and no optimistic mutation (append, delete).
/// This keeps a slow refetch from resurrecting a record deleted meanwhile.
#[derive(Debug, Clone, Default)]
pub struct RevisionGuard {
    revision: u64,
}

impl RevisionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> FetchTicket {
        self.revision += 1;
        FetchTicket(self.revision)
    }

    pub fn record_mutation(&mut self) {
        self.revision += 1;
    }

    pub fn accepts(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_fetch_is_accepted() {
        let mut guard = RevisionGuard::new();
        let ticket = guard.issue();
        assert!(guard.accepts(ticket));
    }

    #[test]
    fn test_older_fetch_is_discarded() {
        let mut guard = RevisionGuard::new();
        let first = guard.issue();
        let second = guard.issue();
        assert!(!guard.accepts(first));
        assert!(guard.accepts(second));
    }

    #[test]
    fn test_mutation_invalidates_in_flight_fetch() {
        let mut guard = RevisionGuard::new();
        let refetch_after_update = guard.issue();
        guard.record_mutation(); // a delete lands first
        assert!(!guard.accepts(refetch_after_update));

        let refetch_after_delete = guard.issue();
        assert!(guard.accepts(refetch_after_delete));
    }
}
