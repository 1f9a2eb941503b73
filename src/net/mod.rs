//! Network layer: wire types, the shared transport, and one thin wrapper
//! function per remote endpoint.

pub mod auth;
pub mod games;
pub mod transport;
pub mod types;
