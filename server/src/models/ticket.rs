use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TicketStatus {
    Valid,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    #[serde(default)]
    pub id: Option<i64>,
    pub event_id: i64,
    pub status: TicketStatus,
}

impl Ticket {
    pub fn admits(&self, event_id: i64) -> bool {
        self.event_id == event_id && self.status == TicketStatus::Valid
    }
}

/// Only holders of a valid ticket for the event may review it.
pub fn holds_valid_ticket(tickets: &[Ticket], event_id: i64) -> bool {
    tickets.iter().any(|ticket| ticket.admits(event_id))
}
