//! screener-target -- saved credit-bond screens and their wire codec.
//!
//! Records keep snake_case field names internally and travel as camelCase
//! JSON objects. The mapping is driven by explicit per-field descriptor
//! tables rather than derive attributes.
//!
//! ## Modules
//!
//! - [`codec`] -- Field descriptors, the `Record` trait, generic encode/decode
//! - [`models`] -- `Screen`, `ScreenerQueryBuilder`, filters, entitlements
//! - [`errors`] -- Error types for the library

pub mod codec;
pub mod errors;
pub mod models;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use codec::{camel_case, decode, encode, from_json, to_json, to_json_pretty, to_value, Field, Record};
pub use errors::{CodecError, Result};

pub use models::entitlements::Entitlements;
pub use models::filters::{
    AssetScreenerCreditRequestFilters, FilterDateLimits, FilterLimits, FilterRatingLimits,
    FilterStringOptions,
};
pub use models::screen::{Screen, ScreenerQueryBuilder};
