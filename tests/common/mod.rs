#![allow(dead_code)]

pub mod mock_services;
pub mod test_helpers;

pub use mock_services::*;
pub use test_helpers::*;
