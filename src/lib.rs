//! Turn-based engine for a railway-building board game.
//!
//! The crate models one game instance: the shared [`board::Board`] (card
//! deck and side row, railway graph, objective-route stack), the per-player
//! state ([`player::Player`] with its [`network::Network`] connectivity
//! tracker), and the [`game::Game`] turn controller that validates and
//! applies moves.
//!
//! The engine renders nothing and owns no wire format; a front-end drives it
//! through the [`game::Game`] API and observes it through
//! [`game::GameListener`] notifications.

pub mod board;
pub mod color;
pub mod deck;
pub mod game;
pub mod graph;
pub mod network;
pub mod player;
pub mod railway;
pub mod route;
