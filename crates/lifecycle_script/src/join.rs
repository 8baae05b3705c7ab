//! Completion join
//!
//! Counts arrivals of independent completions and reports the one arrival
//! that reaches the threshold. Arrival order does not matter.

use std::cell::Cell;

#[derive(Debug)]
pub struct Join {
    parties: usize,
    arrived: Cell<usize>,
}

impl Join {
    pub fn new(parties: usize) -> Self {
        Self {
            parties,
            arrived: Cell::new(0),
        }
    }

    /// Record one arrival. True exactly once, on the arrival that completes the join.
    pub fn arrive(&self) -> bool {
        let arrived = self.arrived.get() + 1;
        self.arrived.set(arrived);
        arrived == self.parties
    }

    pub fn arrived(&self) -> usize {
        self.arrived.get()
    }

    pub fn is_complete(&self) -> bool {
        self.arrived.get() >= self.parties
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_of_two() {
        let join = Join::new(2);
        assert!(!join.arrive());
        assert!(!join.is_complete());
        assert!(join.arrive());
        assert!(join.is_complete());
    }

    #[test]
    fn test_fires_once() {
        let join = Join::new(2);
        let fired = (0..4).filter(|_| join.arrive()).count();
        assert_eq!(fired, 1);
        assert_eq!(join.arrived(), 4);
    }
}
