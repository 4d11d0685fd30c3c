//! Core types shared across taskdelta facilities
//!
//! This crate provides foundational types used by the change detection,
//! error handling and logging facilities:
//!
//! - **Property tags**: PropertyTag, the opaque label carried on change events
//! - **Schema constants**: Canonical field keys and event names

pub mod property;
pub mod schema;

pub use property::PropertyTag;
