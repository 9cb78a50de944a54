//! Adapters: the HTTP endpoint (inbound) and the in-memory store (outbound).

pub mod inbound;
pub mod outbound;
