//! Unit tests for configuration loading and precedence.
//!
//! Tests are organised into modules by functional area:
//! - `helpers`: Shared test utilities
//! - `precedence`: Layer precedence tests
//! - `field_resolution`: Token, repository, author and date resolution tests
//! - `loading`: Loading from the environment and command line
//! - `pipeline_tuning`: Worker, queue and page size validation tests

mod helpers;
mod loading;
mod pipeline_tuning;
