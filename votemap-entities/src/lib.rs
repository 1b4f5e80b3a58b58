//#![deny(missing_docs)] // TODO: Complete missing documentation and enable this option
#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(test, deny(warnings))]

//! # votemap-entities
//!
//! Reusable, agnostic domain entities for votemap.
//!
//! The entities only contain generic functionality that does not reveal any application-specific business logic.

pub mod category;
pub mod email;
pub mod geo;
pub mod id;
pub mod invitation;
pub mod vote;
pub mod votee;

#[cfg(any(test, feature = "builders"))]
pub mod builders;
