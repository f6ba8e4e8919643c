//! MCP tool handler exposing the notebook procedures to MCP clients.

pub mod params;

use params::{AddNoteParams, GetNotesByTopicParams, LookupWikipediaParams};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{tool, tool_handler, tool_router, ServerHandler};

use crate::service::NotebookService;

/// The notebook MCP tool handler. Every tool delegates to the shared
/// [`NotebookService`], so MCP and JSON-RPC callers see the same document.
#[derive(Clone)]
pub struct NotebookTools {
    tool_router: ToolRouter<Self>,
    service: NotebookService,
}

#[tool_router]
impl NotebookTools {
    pub fn new(service: NotebookService) -> Self {
        Self {
            tool_router: Self::tool_router(),
            service,
        }
    }

    /// Append a note to a topic.
    #[tool(description = "Add a note under a topic. Returns true on success, false if the note could not be stored.")]
    pub async fn add_note(
        &self,
        Parameters(params): Parameters<AddNoteParams>,
    ) -> Result<String, String> {
        let added = self
            .service
            .add_note(params.topic, params.text, params.timestamp)
            .await;
        Ok(added.to_string())
    }

    /// List the notes of a topic in the order they were added.
    #[tool(description = "Get all notes for a topic, oldest first, as a JSON list of {text, timestamp}. Unknown topics return an empty list.")]
    pub async fn get_notes_by_topic(
        &self,
        Parameters(params): Parameters<GetNotesByTopicParams>,
    ) -> Result<String, String> {
        let notes = self.service.get_notes_by_topic(params.topic).await;
        serde_json::to_string(&notes).map_err(|e| format!("serialization failed: {e}"))
    }

    /// Attach the first Wikipedia hit to a topic.
    #[tool(description = "Look a term up on Wikipedia and attach the first result's title and URL to the topic of the same name. Returns false if the topic does not exist or already has a link.")]
    pub async fn lookup_wikipedia(
        &self,
        Parameters(params): Parameters<LookupWikipediaParams>,
    ) -> Result<String, String> {
        self.service
            .lookup_wikipedia(params.term)
            .await
            .map(|attached| attached.to_string())
            .map_err(|e| format!("lookup failed: {e}"))
    }
}

#[tool_handler]
impl ServerHandler for NotebookTools {
    fn get_info(&self) -> rmcp::model::ServerInfo {
        rmcp::model::ServerInfo {
            instructions: Some(
                "Notebook keeps free-text notes grouped by topic. Use add_note to write, \
                 get_notes_by_topic to read, and lookup_wikipedia to link a topic to its \
                 Wikipedia article."
                    .into(),
            ),
            capabilities: rmcp::model::ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}
