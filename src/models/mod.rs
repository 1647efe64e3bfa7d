//! Data models for the Ask Big Sister application.
//!
//! These models match the frontend TypeScript interfaces exactly for seamless interoperability.

mod profile;
mod question;
mod report;
mod role;

pub use profile::*;
pub use question::*;
pub use report::*;
pub use role::*;
