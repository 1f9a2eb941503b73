//! Client-side stores, split by domain so consumers can depend on small
//! focused models. Stores own all mutation of their state; the transport
//! layer is the only other writer of the durable session.

pub mod auth;
pub mod game;
