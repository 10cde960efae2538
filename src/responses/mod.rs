pub mod relay_response;

pub use relay_response::*;
