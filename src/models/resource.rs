//! Dolibarr resources exposed as tools.

use std::fmt;

/// A Dolibarr REST resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Contact,
    /// Dolibarr calls companies "third parties"
    Company,
    Proposal,
    AgendaEvent,
    Ticket,
}

impl Resource {
    /// Endpoint path relative to the API base URL.
    pub fn endpoint(self) -> &'static str {
        match self {
            Resource::Contact => "contacts",
            Resource::Company => "thirdparties",
            Resource::Proposal => "proposals",
            Resource::AgendaEvent => "agendaevents",
            Resource::Ticket => "tickets",
        }
    }

    /// Sort column used when a sorted list call names none.
    pub fn fallback_sort_field(self) -> Option<&'static str> {
        match self {
            Resource::AgendaEvent => Some("t.datep"),
            _ => None,
        }
    }

    /// Human-readable name used in tool results.
    pub fn label(self) -> &'static str {
        match self {
            Resource::Contact => "Contact",
            Resource::Company => "Company",
            Resource::Proposal => "Proposal",
            Resource::AgendaEvent => "Agenda event",
            Resource::Ticket => "Ticket",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint())
    }
}
