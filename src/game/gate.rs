//! One-fetch-at-a-time guard for form submits.

/// Proof that the holder owns the in-flight slot. Not `Clone`, so a fetch can
/// only release the gate once.
#[derive(Debug, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
pub struct SessionGate {
    generation: u64,
    in_flight: bool,
}

impl SessionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` while another fetch is outstanding.
    pub fn try_begin(&mut self) -> Option<Ticket> {
        if self.in_flight {
            return None;
        }
        self.in_flight = true;
        self.generation += 1;
        Some(Ticket { generation: self.generation })
    }

    pub fn finish(&mut self, ticket: Ticket) {
        if ticket.generation == self.generation {
            self.in_flight = false;
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_submit_is_blocked_until_finish() {
        let mut gate = SessionGate::new();
        let t = gate.try_begin().unwrap();
        assert_eq!(t.generation(), 1);
        assert!(gate.is_busy());
        assert!(gate.try_begin().is_none());
        gate.finish(t);
        assert!(!gate.is_busy());
        assert_eq!(gate.try_begin().map(|t| t.generation()), Some(2));
    }
}
