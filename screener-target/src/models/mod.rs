//! Screen records and the collaborator records they embed.

pub mod entitlements;
pub mod filters;
pub mod screen;
