//! Core domain entities representing the business data model.
//!
//! This module contains the fundamental data structures of the allocation and
//! resolution engine. Entities are plain data structures without business
//! logic beyond trivial projections and predicates.
//!
//! # Entity Types
//!
//! - [`Link`] - A shortened URL mapping and its access state
//! - [`ResolvedSnapshot`] - The immutable projection cached for redirects
//! - [`ClickEvent`] - A recorded redirect attempt, admitted or denied
//!
//! # Design Pattern
//!
//! Creation and mutation use dedicated input structs:
//! - [`NewLink`] - Boundary input for link creation (plain password, optional code)
//! - [`LinkDraft`] - Resolved row handed to a repository's conditional insert
//! - [`LinkPatch`] - Partial update; `Some(None)` clears an optional field

pub mod click;
pub mod link;
pub mod snapshot;

pub use click::{ClickEvent, ClickOutcome, ClientMetadata};
pub use link::{Link, LinkDraft, LinkPatch, NewLink};
pub use snapshot::ResolvedSnapshot;
