//! # weiqi-client
//!
//! Client-side session and game-state synchronization layer for the weiqi
//! (Go) service. Owns three concerns: authentication token lifecycle and
//! identity caching, synchronization of one active game's authoritative
//! snapshot through interactive and passive refreshes, and credential-based
//! gating of navigable views.
//!
//! The game rules engine (legality, captures, scoring, AI move selection)
//! lives server-side; this crate treats each successful response as the
//! current authoritative snapshot and overwrites local state wholesale.
//!
//! ARCHITECTURE
//! ============
//! UI actions call [`state::auth::AuthStore`] / [`state::game::GameStore`]
//! operations, which go through [`net::transport::Transport`]. Transport
//! attaches the bearer credential from [`storage::SessionStorage`] and
//! handles 401 teardown globally. [`routes::RouteGuard`] runs on every
//! navigation attempt and reads only credential presence.

pub mod config;
pub mod net;
pub mod routes;
pub mod state;
pub mod storage;
