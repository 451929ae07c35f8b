//! Live Comment Viewer (lcv)
//!
//! TUI application for watching live chat comments. The core is a
//! virtualized list layout engine ([`layout`]) that decides which rows of an
//! unbounded, growing comment stream are realized on screen and reconciles
//! measured row heights without visible jumps.
//!
//! Pure core: [`layout`], [`model`], [`store`], [`parser`], [`integration`].
//! Impure shell: [`source`], [`view`], [`config`], [`logging`].

pub mod config;
pub mod integration;
pub mod layout;
pub mod logging;
pub mod model;
pub mod parser;
pub mod source;
pub mod store;
pub mod view;
