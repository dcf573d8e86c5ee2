//! Umbrella crate re-exporting the immunoprobs libraries behind features.
//!
//! ```toml
//! immunoprobs = { version = "0.3", features = ["anchors", "extract"] }
//! ```

#[cfg(feature = "core")]
#[doc(inline)]
pub use immunoprobs_core as core;

#[cfg(feature = "anchors")]
#[doc(inline)]
pub use immunoprobs_anchors as anchors;

#[cfg(feature = "extract")]
#[doc(inline)]
pub use immunoprobs_extract as extract;
