use serde::Serialize;
use tambola_core::ticket::{NUMBERS_PER_TICKET, ROWS};
use tambola_core::{RosterEntry, Ticket};

/// A player holding one ticket.
///
/// Serializes to the `{ id, name, ticket, markedNumbers }` payload; the cached
/// completion flags stay engine-side.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    id: u32,
    name: String,
    ticket: Ticket,
    marked_numbers: Vec<u8>,
    #[serde(skip)]
    rows_completed: [bool; ROWS],
    #[serde(skip)]
    corners_completed: bool,
}

impl Participant {
    pub fn new(id: u32, name: impl Into<String>, ticket: Ticket) -> Self {
        Self {
            id,
            name: name.into(),
            ticket,
            marked_numbers: Vec::new(),
            rows_completed: [false; ROWS],
            corners_completed: false,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ticket(&self) -> &Ticket {
        &self.ticket
    }

    /// Marked numbers in the order they were called
    pub fn marked_numbers(&self) -> &[u8] {
        &self.marked_numbers
    }

    pub fn marked_count(&self) -> usize {
        self.marked_numbers.len()
    }

    pub fn is_marked(&self, number: u8) -> bool {
        self.marked_numbers.contains(&number)
    }

    /// (marked, total) as shown next to a participant's name
    pub fn progress(&self) -> (usize, usize) {
        (self.marked_count(), NUMBERS_PER_TICKET)
    }

    pub fn is_row_complete(&self, row: usize) -> bool {
        self.rows_completed.get(row).copied().unwrap_or(false)
    }

    pub fn are_corners_complete(&self) -> bool {
        self.corners_completed
    }

    pub fn is_full_house(&self) -> bool {
        self.marked_count() >= NUMBERS_PER_TICKET
    }

    /// Marks a called number; false when it is not on the ticket or already marked
    pub(crate) fn mark(&mut self, number: u8) -> bool {
        if !self.ticket.contains(number) || self.is_marked(number) {
            return false;
        }
        self.marked_numbers.push(number);
        true
    }

    /// True exactly once: on the mark that completes `row`
    pub(crate) fn complete_row(&mut self, row: usize) -> bool {
        if row >= ROWS || self.rows_completed[row] {
            return false;
        }

        let complete = self.ticket.row(row).all(|n| self.marked_numbers.contains(&n));
        if complete {
            self.rows_completed[row] = true;
        }
        complete
    }

    /// True exactly once: on the mark that completes all four corners
    pub(crate) fn complete_corners(&mut self) -> bool {
        if self.corners_completed {
            return false;
        }

        let complete = self
            .ticket
            .corners()
            .iter()
            .all(|n| self.marked_numbers.contains(n));
        if complete {
            self.corners_completed = true;
        }
        complete
    }

    pub(crate) fn clear_marks(&mut self) {
        self.marked_numbers.clear();
        self.rows_completed = [false; ROWS];
        self.corners_completed = false;
    }
}

impl From<RosterEntry> for Participant {
    fn from(entry: RosterEntry) -> Self {
        Self::new(entry.id, entry.name, entry.ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ticket_b;

    #[test]
    fn test_mark_only_ticket_numbers_once() {
        let mut participant = Participant::new(1, "Neha", ticket_b());

        assert!(participant.mark(46));
        assert!(!participant.mark(46));
        assert!(!participant.mark(47));
        assert_eq!(participant.marked_numbers(), &[46]);
        assert_eq!(participant.progress(), (1, 15));
    }

    #[test]
    fn test_row_completion_is_reported_once() {
        let mut participant = Participant::new(1, "Neha", ticket_b());
        for n in [3, 15, 27, 46] {
            participant.mark(n);
            assert!(!participant.complete_row(0));
        }

        participant.mark(82);
        assert!(participant.complete_row(0));
        assert!(participant.is_row_complete(0));
        assert!(!participant.complete_row(0));
        assert!(!participant.complete_row(1));
    }

    #[test]
    fn test_corner_completion() {
        let mut participant = Participant::new(2, "Karan", ticket_b());
        for n in [3, 82, 7] {
            participant.mark(n);
        }
        assert!(!participant.complete_corners());

        participant.mark(88);
        assert!(participant.complete_corners());
        assert!(!participant.complete_corners());
    }

    #[test]
    fn test_clear_marks_keeps_ticket() {
        let mut participant = Participant::new(3, "Ritu", ticket_b());
        let before = participant.ticket().clone();
        for n in participant.ticket().clone().numbers() {
            participant.mark(n);
        }
        participant.complete_row(2);
        assert!(participant.is_full_house());

        participant.clear_marks();
        assert_eq!(participant.marked_count(), 0);
        assert!(!participant.is_row_complete(2));
        assert_eq!(participant.ticket(), &before);
    }

    #[test]
    fn test_payload_shape() {
        let mut participant = Participant::new(5, "Arun", ticket_b());
        participant.mark(7);
        participant.complete_row(0);

        let json = serde_json::to_value(&participant).unwrap();
        assert_eq!(json["id"], 5);
        assert_eq!(json["name"], "Arun");
        assert_eq!(json["markedNumbers"], serde_json::json!([7]));
        assert_eq!(json["ticket"][0][8], 82);
        assert!(json.get("rowsCompleted").is_none());
    }
}
