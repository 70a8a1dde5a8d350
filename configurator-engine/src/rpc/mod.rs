//! Host page interop.

/// JSON-RPC bridge to the embedding page: navigation commands in,
/// progress/card notifications out.
pub mod web_rpc;
