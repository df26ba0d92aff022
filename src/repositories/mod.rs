//! Repository layer for Dolibarr resources.
//!
//! One repository per resource, each exposing one method per operation. All
//! of them issue their single request through [`AsyncDolibarrClient`], which
//! is the seam tests replace.

mod agenda;
mod companies;
mod contacts;
mod endpoint;
mod proposals;
mod tickets;

pub use agenda::{local_now, AgendaEventRepository, Clock};
pub use companies::CompanyRepository;
pub use contacts::ContactRepository;
pub use endpoint::ResourceEndpoint;
pub use proposals::ProposalRepository;
pub use tickets::TicketRepository;

use crate::client::AsyncDolibarrClient;
use crate::config::Config;
use crate::query::QueryBuilder;
use std::sync::Arc;

/// Every repository, wired to one client and the configured defaults.
#[derive(Clone)]
pub struct Repositories {
    pub contacts: ContactRepository,
    pub companies: CompanyRepository,
    pub proposals: ProposalRepository,
    pub agenda: AgendaEventRepository,
    pub tickets: TicketRepository,
}

impl Repositories {
    pub fn new(client: Arc<dyn AsyncDolibarrClient>, config: &Config) -> Self {
        let query = Arc::new(QueryBuilder::from_config(config));

        Self {
            contacts: ContactRepository::new(client.clone(), query.clone()),
            companies: CompanyRepository::new(client.clone(), query.clone()),
            proposals: ProposalRepository::new(client.clone(), query.clone()),
            agenda: AgendaEventRepository::new(
                client.clone(),
                query.clone(),
                config.default_agenda_limit,
                config.default_event_owner_id,
            ),
            tickets: TicketRepository::new(client, query),
        }
    }
}
