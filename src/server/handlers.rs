//! MCP tool handlers for the Dolibarr server.
//!
//! This module registers every tool with the rmcp SDK's tool_router pattern.
//! Dispatch is implemented by hand so that unknown tools and undecodable
//! arguments come back as failed tool results instead of protocol errors.

use crate::config::Config;
use crate::error::DolibarrApiResult;
use crate::repositories::Repositories;
use crate::tools::agenda::{default_days_ahead, default_upcoming_limit};
use crate::tools::{
    AddTicketMessageParams, AgendaEventIdParams, AgendaEventTools, AgendaListParams,
    CompanyIdParams, CompanyTools, ContactIdParams, ContactTools, CreateAgendaEventParams,
    CreateCompanyParams, CreateContactParams, CreateProposalParams, CreateTicketParams,
    ListParams, ProposalIdParams, ProposalTools, SearchParams, TicketIdParams, TicketRefParams,
    TicketTools, TicketTrackIdParams, UpcomingEventsParams, UpdateAgendaEventParams,
    UpdateCompanyParams, UpdateContactParams, UpdateProposalParams, UpdateTicketParams,
};
use rmcp::handler::server::tool::{ToolCallContext, ToolRouter};
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::service::RequestContext;
use rmcp::{tool, tool_router, ErrorData as McpError, RoleServer, ServerHandler};
use serde_json::{json, Value};
use std::sync::Arc;

/// Values the server substitutes for omitted list arguments.
///
/// They come from the configuration, so they are written into the advertised
/// schemas when the tool list is requested rather than at compile time.
#[derive(Debug, Clone)]
struct ArgumentDefaults {
    limit: u32,
    agenda_limit: u32,
    sort_order: String,
}

impl ArgumentDefaults {
    fn from_config(config: &Config) -> Self {
        Self {
            limit: config.default_limit,
            agenda_limit: config.default_agenda_limit,
            sort_order: config.default_sort_order.to_uppercase(),
        }
    }

    fn declare(&self, mut tool: Tool) -> Tool {
        let defaults = match &*tool.name {
            "search_contacts" | "get_companies" | "get_proposals" | "get_tickets" => vec![
                ("limit", json!(self.limit)),
                ("sort_order", json!(self.sort_order)),
            ],
            "get_agenda_events" => vec![
                ("limit", json!(self.agenda_limit)),
                ("sort_order", json!(self.sort_order)),
            ],
            "get_upcoming_events" => vec![
                ("limit", json!(default_upcoming_limit())),
                ("days_ahead", json!(default_days_ahead())),
            ],
            _ => return tool,
        };

        let schema = Arc::make_mut(&mut tool.input_schema);
        if let Some(Value::Object(properties)) = schema.get_mut("properties") {
            for (field, value) in defaults {
                if let Some(Value::Object(property)) = properties.get_mut(field) {
                    property.insert("default".to_string(), value);
                }
            }
        }
        tool
    }
}

/// The Dolibarr MCP server that exposes CRM resources as tools.
#[derive(Clone)]
pub struct DolibarrMcpServer {
    contacts: ContactTools,
    companies: CompanyTools,
    proposals: ProposalTools,
    agenda: AgendaEventTools,
    tickets: TicketTools,
    defaults: ArgumentDefaults,
    tool_router: ToolRouter<Self>,
}

impl ServerHandler for DolibarrMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "dolibarr-mcp-server".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("MCP server for Dolibarr ERP/CRM - search and manage contacts, companies, commercial proposals, agenda events and support tickets.".into()),
        }
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        if !self.has_tool(&request.name) {
            tracing::warn!("Unknown tool requested: {}", request.name);
            return Ok(unknown_tool(&request.name));
        }

        let name = request.name.clone();
        let context = ToolCallContext::new(self, request, context);
        match self.tool_router.call(context).await {
            Ok(result) => Ok(result),
            Err(e) => {
                tracing::error!("Tool {} rejected: {}", name, e.message);
                Ok(CallToolResult::error(vec![Content::text(format!(
                    "Error: {}",
                    e.message
                ))]))
            }
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.advertised_tools()))
    }
}

/// Turn a tool outcome into a tool result; failures stay in-band.
fn respond(tool: &str, outcome: DolibarrApiResult<String>) -> Result<CallToolResult, McpError> {
    match outcome {
        Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
        Err(e) => {
            tracing::error!("Error calling tool {}: {}", tool, e);
            Ok(CallToolResult::error(vec![Content::text(format!(
                "Error: {}",
                e
            ))]))
        }
    }
}

fn unknown_tool(name: &str) -> CallToolResult {
    CallToolResult::error(vec![Content::text(format!("Error: Unknown tool: {}", name))])
}

// Tool router implementation
#[tool_router]
impl DolibarrMcpServer {
    /// Create a new Dolibarr MCP server over the given repositories.
    ///
    /// `config` supplies the list defaults advertised in the tool schemas; it
    /// should be the one the repositories were built from.
    pub fn new(repos: Repositories, config: &Config) -> Self {
        Self {
            contacts: ContactTools::new(repos.contacts),
            companies: CompanyTools::new(repos.companies),
            proposals: ProposalTools::new(repos.proposals),
            agenda: AgendaEventTools::new(repos.agenda),
            tickets: TicketTools::new(repos.tickets),
            defaults: ArgumentDefaults::from_config(config),
            tool_router: Self::tool_router(),
        }
    }

    /// Names of all registered tools, sorted.
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();
        names
    }

    /// Tool catalog as advertised to clients, with list defaults declared.
    pub fn advertised_tools(&self) -> Vec<Tool> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|tool| self.defaults.declare(tool))
            .collect()
    }

    fn has_tool(&self, name: &str) -> bool {
        self.tool_router
            .list_all()
            .iter()
            .any(|tool| tool.name == name)
    }

    // Contacts

    #[tool(
        description = "Search contacts by last name, first name or email. Results are sorted by last name."
    )]
    async fn search_contacts(
        &self,
        params: Parameters<SearchParams>,
    ) -> Result<CallToolResult, McpError> {
        respond("search_contacts", self.contacts.search(params.0).await)
    }

    #[tool(description = "Create a new contact. Fields not listed are forwarded to Dolibarr as-is.")]
    async fn create_contact(
        &self,
        params: Parameters<CreateContactParams>,
    ) -> Result<CallToolResult, McpError> {
        respond("create_contact", self.contacts.create(params.0).await)
    }

    #[tool(description = "Retrieve a contact by ID")]
    async fn get_contact(
        &self,
        params: Parameters<ContactIdParams>,
    ) -> Result<CallToolResult, McpError> {
        respond("get_contact", self.contacts.get(params.0).await)
    }

    #[tool(description = "Update fields of an existing contact")]
    async fn update_contact(
        &self,
        params: Parameters<UpdateContactParams>,
    ) -> Result<CallToolResult, McpError> {
        respond("update_contact", self.contacts.update(params.0).await)
    }

    #[tool(description = "Delete a contact")]
    async fn delete_contact(
        &self,
        params: Parameters<ContactIdParams>,
    ) -> Result<CallToolResult, McpError> {
        respond("delete_contact", self.contacts.delete(params.0).await)
    }

    // Companies

    #[tool(description = "List companies (third parties), optionally filtered by name. Results are sorted by name.")]
    async fn get_companies(
        &self,
        params: Parameters<SearchParams>,
    ) -> Result<CallToolResult, McpError> {
        respond("get_companies", self.companies.search(params.0).await)
    }

    #[tool(description = "Create a new company (third party)")]
    async fn create_company(
        &self,
        params: Parameters<CreateCompanyParams>,
    ) -> Result<CallToolResult, McpError> {
        respond("create_company", self.companies.create(params.0).await)
    }

    #[tool(description = "Retrieve a company by ID")]
    async fn get_company(
        &self,
        params: Parameters<CompanyIdParams>,
    ) -> Result<CallToolResult, McpError> {
        respond("get_company", self.companies.get(params.0).await)
    }

    #[tool(description = "Update fields of an existing company")]
    async fn update_company(
        &self,
        params: Parameters<UpdateCompanyParams>,
    ) -> Result<CallToolResult, McpError> {
        respond("update_company", self.companies.update(params.0).await)
    }

    #[tool(description = "Delete a company")]
    async fn delete_company(
        &self,
        params: Parameters<CompanyIdParams>,
    ) -> Result<CallToolResult, McpError> {
        respond("delete_company", self.companies.delete(params.0).await)
    }

    // Proposals

    #[tool(description = "List commercial proposals sorted by creation date (newest first by default)")]
    async fn get_proposals(
        &self,
        params: Parameters<ListParams>,
    ) -> Result<CallToolResult, McpError> {
        respond("get_proposals", self.proposals.list(params.0).await)
    }

    #[tool(description = "Create a commercial proposal for a company")]
    async fn create_proposal(
        &self,
        params: Parameters<CreateProposalParams>,
    ) -> Result<CallToolResult, McpError> {
        respond("create_proposal", self.proposals.create(params.0).await)
    }

    #[tool(description = "Retrieve a commercial proposal by ID")]
    async fn get_proposal(
        &self,
        params: Parameters<ProposalIdParams>,
    ) -> Result<CallToolResult, McpError> {
        respond("get_proposal", self.proposals.get(params.0).await)
    }

    #[tool(description = "Update fields of a commercial proposal")]
    async fn update_proposal(
        &self,
        params: Parameters<UpdateProposalParams>,
    ) -> Result<CallToolResult, McpError> {
        respond("update_proposal", self.proposals.update(params.0).await)
    }

    #[tool(description = "Delete a commercial proposal")]
    async fn delete_proposal(
        &self,
        params: Parameters<ProposalIdParams>,
    ) -> Result<CallToolResult, McpError> {
        respond("delete_proposal", self.proposals.delete(params.0).await)
    }

    // Agenda

    #[tool(
        description = "List agenda events sorted by date, optionally restricted to future, past, today, this_week or this_month"
    )]
    async fn get_agenda_events(
        &self,
        params: Parameters<AgendaListParams>,
    ) -> Result<CallToolResult, McpError> {
        respond("get_agenda_events", self.agenda.list(params.0).await)
    }

    #[tool(description = "List agenda events starting within the next days, soonest first")]
    async fn get_upcoming_events(
        &self,
        params: Parameters<UpcomingEventsParams>,
    ) -> Result<CallToolResult, McpError> {
        respond("get_upcoming_events", self.agenda.upcoming(params.0).await)
    }

    #[tool(
        description = "Create an agenda event. Owner and attendee default to the configured user when absent."
    )]
    async fn create_agenda_event(
        &self,
        params: Parameters<CreateAgendaEventParams>,
    ) -> Result<CallToolResult, McpError> {
        respond("create_agenda_event", self.agenda.create(params.0).await)
    }

    #[tool(description = "Retrieve an agenda event by ID")]
    async fn get_agenda_event(
        &self,
        params: Parameters<AgendaEventIdParams>,
    ) -> Result<CallToolResult, McpError> {
        respond("get_agenda_event", self.agenda.get(params.0).await)
    }

    #[tool(description = "Update fields of an agenda event")]
    async fn update_agenda_event(
        &self,
        params: Parameters<UpdateAgendaEventParams>,
    ) -> Result<CallToolResult, McpError> {
        respond("update_agenda_event", self.agenda.update(params.0).await)
    }

    #[tool(description = "Delete an agenda event")]
    async fn delete_agenda_event(
        &self,
        params: Parameters<AgendaEventIdParams>,
    ) -> Result<CallToolResult, McpError> {
        respond("delete_agenda_event", self.agenda.delete(params.0).await)
    }

    // Tickets

    #[tool(description = "List support tickets sorted by creation date (newest first by default)")]
    async fn get_tickets(
        &self,
        params: Parameters<ListParams>,
    ) -> Result<CallToolResult, McpError> {
        respond("get_tickets", self.tickets.list(params.0).await)
    }

    #[tool(description = "Create a support ticket")]
    async fn create_ticket(
        &self,
        params: Parameters<CreateTicketParams>,
    ) -> Result<CallToolResult, McpError> {
        respond("create_ticket", self.tickets.create(params.0).await)
    }

    #[tool(description = "Retrieve a support ticket by ID")]
    async fn get_ticket(
        &self,
        params: Parameters<TicketIdParams>,
    ) -> Result<CallToolResult, McpError> {
        respond("get_ticket", self.tickets.get(params.0).await)
    }

    #[tool(description = "Retrieve a support ticket by its reference")]
    async fn get_ticket_by_ref(
        &self,
        params: Parameters<TicketRefParams>,
    ) -> Result<CallToolResult, McpError> {
        respond("get_ticket_by_ref", self.tickets.get_by_ref(params.0).await)
    }

    #[tool(description = "Retrieve a support ticket by its tracking code")]
    async fn get_ticket_by_track_id(
        &self,
        params: Parameters<TicketTrackIdParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            "get_ticket_by_track_id",
            self.tickets.get_by_track_id(params.0).await,
        )
    }

    #[tool(description = "Update a support ticket (subject, assignee, priority, progress, status)")]
    async fn update_ticket(
        &self,
        params: Parameters<UpdateTicketParams>,
    ) -> Result<CallToolResult, McpError> {
        respond("update_ticket", self.tickets.update(params.0).await)
    }

    #[tool(description = "Add a message to an existing ticket, identified by its tracking code")]
    async fn add_ticket_message(
        &self,
        params: Parameters<AddTicketMessageParams>,
    ) -> Result<CallToolResult, McpError> {
        respond("add_ticket_message", self.tickets.add_message(params.0).await)
    }

    #[tool(description = "Delete a support ticket")]
    async fn delete_ticket(
        &self,
        params: Parameters<TicketIdParams>,
    ) -> Result<CallToolResult, McpError> {
        respond("delete_ticket", self.tickets.delete(params.0).await)
    }
}
