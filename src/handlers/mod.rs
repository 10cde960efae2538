pub mod discord;
pub mod poll;
pub mod report;

pub use discord::*;
pub use poll::*;
pub use report::*;
