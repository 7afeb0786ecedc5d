//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use crate::tools::cache::{QueryCacheGetParams, QueryCachePurgeParams, get_impl, purge_impl};
use crate::tools::video_get::{VideoGetParams, video_get_impl};
use crate::tools::video_search::{VideoSearchParams, search_impl};

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};
use std::sync::Arc;
use vidscout_client::{HttpFetcher, SearchService};
use vidscout_core::DetailCache;

/// The main MCP server handler for vidscout.
#[derive(Clone)]
pub struct VidscoutServer {
    tool_router: ToolRouter<Self>,
    service: Arc<SearchService<HttpFetcher>>,
    details: DetailCache,
}

#[tool_router]
impl VidscoutServer {
    pub fn new(service: SearchService<HttpFetcher>, details: DetailCache) -> Self {
        Self { tool_router: Self::tool_router(), service: Arc::new(service), details }
    }

    /// Search the video platform and return discovered videos.
    ///
    /// Always scrapes; the first result is remembered in the query cache.
    #[tool(
        description = "Search for videos by free-text query. Returns up to max_results (1-20, default 15) videos with id, title, thumbnail, channel and duration."
    )]
    async fn video_search(&self, params: Parameters<VideoSearchParams>) -> Result<CallToolResult, McpError> {
        search_impl(&self.service, &self.details, params.0).await
    }

    /// Look up a recently discovered video by id.
    #[tool(description = "Get a recently discovered video by its id. Entries expire 15 minutes after discovery.")]
    async fn video_get(&self, params: Parameters<VideoGetParams>) -> Result<CallToolResult, McpError> {
        video_get_impl(&self.details, params.0).await
    }

    /// Read the remembered first result for a query.
    #[tool(description = "Get the cached first search result for a query (case and surrounding whitespace ignored).")]
    async fn query_cache_get(&self, params: Parameters<QueryCacheGetParams>) -> Result<CallToolResult, McpError> {
        get_impl(self.service.cache(), params.0).await
    }

    #[tool(description = "Delete cached query results older than the given number of days.")]
    async fn query_cache_purge(&self, params: Parameters<QueryCachePurgeParams>) -> Result<CallToolResult, McpError> {
        purge_impl(self.service.cache(), params.0).await
    }
}

impl ServerHandler for VidscoutServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "vidscout-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
