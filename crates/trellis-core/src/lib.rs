//! Core systems for Trellis.
//!
//! This crate provides the foundational pieces shared by every other Trellis
//! crate:
//!
//! - **Widget handles**: [`WidgetId`], the stable generational handle the
//!   widget arena hands out for every inserted widget
//! - **Opaque keys**: [`ItemKey`] (style/render item keys) and
//!   [`InstanceKey`] (per-widget renderer state), allocated from a
//!   process-wide monotonically increasing counter
//! - **Logging**: target and span names used with the `tracing` crate
//!
//! # Key Example
//!
//! ```
//! use trellis_core::ItemKey;
//!
//! // Named keys are interned: the same name always yields the same key.
//! let border = ItemKey::named("frame.border");
//! assert_eq!(border, ItemKey::named("frame.border"));
//!
//! // Unique keys never collide with anything else.
//! assert_ne!(ItemKey::unique(), ItemKey::unique());
//! ```

mod id;
pub mod logging;

pub use id::{InstanceKey, ItemKey, WidgetId};
