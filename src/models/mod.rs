//! Typed request models for the CRM operations.
//!
//! The catalog speaks loosely-typed JSON; these types give programmatic callers
//! a checked way to build the same arguments.

pub mod contact;
pub mod interaction;

pub use contact::{ContactStatus, ContactUpdate, NewContact, SearchContactsParams};
pub use interaction::{Interaction, InteractionType, TimeRange};
