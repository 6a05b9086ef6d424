//! Single-shot delayed transitions.
//!
//! Puzzles often show a result for a moment before moving on ("wrong PIN"
//! then clear, "corrupted" then reset). Those follow-ups are queued here
//! with a [`Ticket`] naming the state generation they were scheduled for.
//! Nothing is ever cancelled: when a ticket comes due the session compares
//! it against the live generation and drops it if the state it belonged to
//! has since been replaced.

/// Identity of the state a deferred event targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket {
    /// Session generation; bumped on every restart.
    pub session: u64,
    /// Puzzle engine identity, when the event targets one.
    pub engine: Option<u64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Deferred<E> {
    pub due: u64,
    pub ticket: Ticket,
    pub event: E,
    seq: u64,
}

pub struct Scheduler<E> {
    pending: Vec<Deferred<E>>,
    next_seq: u64,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_seq: 0,
        }
    }

    /// Queue `event` to fire at tick `due`.
    pub fn schedule(&mut self, due: u64, ticket: Ticket, event: E) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Deferred {
            due,
            ticket,
            event,
            seq,
        });
    }

    /// Remove and return the earliest event due at or before `now`. Events
    /// due on the same tick come out in the order they were scheduled.
    pub fn pop_due(&mut self, now: u64) -> Option<Deferred<E>> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, d)| d.due <= now)
            .min_by_key(|(_, d)| (d.due, d.seq))
            .map(|(i, _)| i)?;
        Some(self.pending.swap_remove(idx))
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }
}
