//! # votemap-core
//!
//! Framework independent front-end logic of votemap:
//! cached resource stores, the location selection flow
//! and the state behind the presentational components.
//!
//! Everything in here is single-threaded (`Rc`/`RefCell`)
//! because it is meant to run inside the browser's event loop.

pub mod cache;
pub mod config;
pub mod debounce;
pub mod error;
pub mod flow;
pub mod gateways;
pub mod geocode;
pub mod map;
pub mod observe;
pub mod store;
pub mod ui;
pub mod util;
pub mod vote_form;

pub use votemap_entities as entities;

pub use self::error::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests;
