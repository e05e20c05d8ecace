//! MCP tools to allow an AI agent to explore the Bloom schema and execute operations.

pub(crate) mod details;
pub(crate) mod execute;
pub(crate) mod user;
