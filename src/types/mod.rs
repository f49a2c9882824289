//! Shared Pipedrive types
//!
//! - [`Envelope`] - `{success, data, additional_data}` response wrapper
//! - [`Timestamp`] - date and date-time formatting for outgoing parameters
//! - [`LooseValue`] - fields whose JSON type varies between records
//! - [`ApiToken`] - validated credential newtype

pub mod envelope;
pub mod enums;
pub mod ids;
pub mod loose;
pub mod timestamp;

pub use envelope::{AdditionalData, Envelope, Pagination};
pub use enums::{
    DealStatus, EventAction, EventObject, FieldType, FilterType, ItemType, VisibleTo,
};
pub use ids::ApiToken;
pub use loose::LooseValue;
pub use timestamp::Timestamp;
