//! Typed capability-rendering engine for platform/device reports.
//!
//! The crate enumerates a compute-capability provider's platforms and
//! devices and renders every queryable attribute as text. Static descriptor
//! tables declare what to query and how each raw result decodes (plain
//! string, sorted token list, grouped integer, hex bitfield, named-flag
//! bitmask, bounds-checked enum, fixed vector); the composer drives the
//! tables in a fixed merged order, reports truncation and per-property
//! failures without aborting, and the walker strings entity sections
//! together with separators. Providers plug in through the
//! [`provider::CapabilityProvider`] trait; the `opencl` feature adds the
//! real runtime backend.

pub mod descriptor;
pub mod provider;
pub mod render;
pub mod report;
pub mod walker;

#[cfg(feature = "opencl")]
pub mod opencl;

pub use descriptor::{FlagSpec, PropertyDescriptor, ValueKind};
pub use provider::{
    CapabilityProvider, ImageFormat, PropertyKey, ProviderError, QueryReply, keys,
};
pub use report::{EntityReport, PropertyQuery, Sink};
pub use walker::{WalkOptions, walk};
