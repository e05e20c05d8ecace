use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use bloom_graphql::introspection::list_operations;
use bloom_graphql::{GraphQLTransport, OperationKind};
use bon::bon;
use rmcp::ServiceExt as _;
use rmcp::transport::StreamableHttpService;
use rmcp::transport::stdio;
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::errors::ServerError;
use crate::server_handler::BloomMcpServerHandler;

/// A Bloom MCP Server
pub struct Server {
    transport: Transport,
    client: Arc<dyn GraphQLTransport>,
    root_types: RootTypes,
}

/// How MCP clients reach the server
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transport {
    /// Serve a single client over stdin and stdout
    #[default]
    Stdio,

    /// Serve clients over Streamable HTTP at `/mcp`
    StreamableHttp {
        #[serde(default = "defaults::address")]
        address: IpAddr,

        #[serde(default = "defaults::port")]
        port: u16,
    },
}

/// Names of the root operation types in the remote schema
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RootTypes {
    pub query: String,
    pub mutation: String,
}

impl Default for RootTypes {
    fn default() -> Self {
        Self {
            query: "QueryType".to_string(),
            mutation: "MutationType".to_string(),
        }
    }
}

mod defaults {
    use std::net::{IpAddr, Ipv4Addr};

    pub(super) const fn address() -> IpAddr {
        IpAddr::V4(Ipv4Addr::LOCALHOST)
    }

    pub(super) const fn port() -> u16 {
        5000
    }
}

#[bon]
impl Server {
    #[builder]
    pub fn new(
        #[builder(default)] transport: Transport,
        client: Arc<dyn GraphQLTransport>,
        #[builder(default)] root_types: RootTypes,
    ) -> Self {
        Self {
            transport,
            client,
            root_types,
        }
    }
}

impl Server {
    pub async fn start(self) -> Result<(), ServerError> {
        tokio::spawn(discover(self.client.clone()));

        let handler = BloomMcpServerHandler::new(self.client, &self.root_types);

        match self.transport {
            Transport::StreamableHttp { address, port } => {
                info!(port = ?port, address = ?address, "Starting MCP server in Streamable HTTP mode");
                let listen_address = SocketAddr::new(address, port);
                let service = StreamableHttpService::new(
                    move || Ok(handler.clone()),
                    LocalSessionManager::default().into(),
                    Default::default(),
                );
                let router = axum::Router::new().nest_service("/mcp", service);

                let tcp_listener = tokio::net::TcpListener::bind(listen_address).await?;
                axum::serve(tcp_listener, router)
                    .with_graceful_shutdown(shutdown_signal())
                    .await?;
            }
            Transport::Stdio => {
                info!("Starting MCP server in stdio mode");
                let service = handler
                    .serve(stdio())
                    .await
                    .inspect_err(|e| {
                        error!("serving error: {:?}", e);
                    })
                    .map_err(Box::new)?;
                service.waiting().await?;
            }
        }

        info!("MCP server stopped");
        Ok(())
    }
}

/// Probe the schema once so configuration problems show up in the log at startup
async fn discover(client: Arc<dyn GraphQLTransport>) {
    for kind in [OperationKind::Query, OperationKind::Mutation] {
        match list_operations(client.as_ref(), kind).await {
            Ok(names) => info!("Found {} {kind} operations", names.len()),
            Err(error) => {
                warn!(%error, "Could not list {kind} operations - check the endpoint and token");
            }
        }
    }
}

#[allow(clippy::expect_used)]
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use serde_json::json;
    use tracing_test::traced_test;

    use super::*;
    use crate::testing::FakeTransport;

    #[test]
    fn stdio_is_the_default_transport() {
        assert_eq!(Transport::default(), Transport::Stdio);
    }

    #[test]
    fn streamable_http_fills_in_defaults() {
        let transport: Transport =
            serde_yaml::from_str("type: streamable_http\nport: 8000").unwrap();

        assert_eq!(
            transport,
            Transport::StreamableHttp {
                address: IpAddr::V4(Ipv4Addr::LOCALHOST),
                port: 8000,
            }
        );
    }

    #[test]
    fn root_types_default_to_bloom_names() {
        let root_types: RootTypes = serde_json::from_value(json!({ "query": "Query" })).unwrap();

        assert_eq!(root_types.query, "Query");
        assert_eq!(root_types.mutation, "MutationType");
    }

    #[tokio::test]
    #[traced_test]
    async fn discovery_logs_operation_counts() {
        let transport = Arc::new(FakeTransport::with_responses(vec![
            Ok(json!({
                "data": { "__schema": { "queryType": { "fields": [{ "name": "me" }, { "name": "todos" }] } } }
            })),
            Err("connection refused".to_string()),
        ]));

        discover(transport.clone()).await;

        assert_eq!(transport.request_count(), 2);
        assert!(logs_contain("Found 2 query operations"));
        assert!(logs_contain("Could not list mutation operations"));
    }
}
