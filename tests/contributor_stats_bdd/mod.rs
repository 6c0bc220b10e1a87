//! Support modules for the contributor statistics BDD tests.

pub(crate) mod harness;
pub(crate) mod state;

pub(crate) use harness::{detail_body, mount, parse_numbers, search_body, search_query};
pub(crate) use state::{StatsState, gather_statistics};
