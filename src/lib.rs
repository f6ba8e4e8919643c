//! Topic notebook: free-text notes grouped by topic, served over the network.
//!
//! Notes live in a single XML document on local disk. A server exposes three
//! remote procedures over a loopback HTTP port, both as JSON-RPC 2.0 and as
//! [MCP](https://modelcontextprotocol.io/) tools:
//!
//! | Procedure | Effect |
//! |-----------|--------|
//! | `add_note(topic, text, timestamp?)` | Append a note, creating the topic on first use |
//! | `get_notes_by_topic(topic)` | Notes of a topic in insertion order |
//! | `lookup_wikipedia(term)` | Attach the first Wikipedia hit to the topic `term` (once) |
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`store`] — The XML document store behind one lock
//! - [`lookup`] — Wikipedia OpenSearch client
//! - [`service`] — Procedure semantics shared by every transport
//! - [`rpc`] — JSON-RPC envelope, server dispatch and typed client
//! - [`tools`] — MCP tool handler
//! - [`server`] — HTTP router and serve loop
//! - [`menu`] — Interactive text-menu client

pub mod config;
pub mod lookup;
pub mod menu;
pub mod rpc;
pub mod server;
pub mod service;
pub mod store;
pub mod tools;
