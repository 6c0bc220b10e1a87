//! CLI operation handlers.
//!
//! - [`contributor_stats`]: Gather and report per-author pull request stats
//!
//! Output formatting utilities are in [`output`].

pub mod contributor_stats;
pub mod output;
