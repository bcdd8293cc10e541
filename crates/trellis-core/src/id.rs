//! Stable handles and opaque keys.
//!
//! # Key Types
//!
//! - [`WidgetId`] - Generational handle into the widget arena
//! - [`ItemKey`] - Opaque key naming a styled/rendered item
//! - [`InstanceKey`] - Opaque key identifying one widget instance to a renderer

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use slotmap::new_key_type;

new_key_type! {
    /// A stable handle to a widget stored in the widget arena.
    ///
    /// `WidgetId`s stay valid while the widget is stored and become stale
    /// once it is removed. A stale handle is never reused for another widget
    /// (slot versions are bumped on removal), so a frame holding a handle to
    /// a removed widget observes "not found" rather than a different widget.
    pub struct WidgetId;
}

impl WidgetId {
    /// Convert the handle to a raw u64 value.
    ///
    /// Useful for interop with systems that need a numeric identifier.
    #[inline]
    pub fn as_raw(self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }

    /// Create a handle from a raw u64 value.
    ///
    /// This does not check whether the handle refers to a stored widget.
    #[inline]
    pub fn from_raw(raw: u64) -> Self {
        Self::from(slotmap::KeyData::from_ffi(raw))
    }
}

/// Process-wide counter shared by every key kind.
///
/// Starting at 1 keeps 0 free as an "unset" value for renderers that store
/// keys in plain integers.
static NEXT_KEY: AtomicU64 = AtomicU64::new(1);

fn next_key() -> u64 {
    NEXT_KEY.fetch_add(1, Ordering::Relaxed)
}

/// Interning table for named item keys.
struct KeyRegistry {
    by_name: Mutex<HashMap<String, ItemKey>>,
    names: Mutex<HashMap<ItemKey, String>>,
}

fn registry() -> &'static KeyRegistry {
    static REGISTRY: OnceLock<KeyRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| KeyRegistry {
        by_name: Mutex::new(HashMap::new()),
        names: Mutex::new(HashMap::new()),
    })
}

/// An opaque key naming an item a widget asks the renderer to draw.
///
/// The layout engine never interprets item keys; it only forwards them from
/// the style map to the renderer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey(u64);

impl ItemKey {
    /// Allocate a key that is distinct from every other key in the process.
    pub fn unique() -> Self {
        Self(next_key())
    }

    /// Get the key registered under `name`, allocating it on first use.
    pub fn named(name: &str) -> Self {
        let registry = registry();
        let mut by_name = registry.by_name.lock();
        if let Some(key) = by_name.get(name) {
            return *key;
        }
        let key = Self::unique();
        by_name.insert(name.to_owned(), key);
        registry.names.lock().insert(key, name.to_owned());
        tracing::trace!(target: crate::logging::targets::STYLE, name, key = key.0, "interned item key");
        key
    }

    /// The name this key was registered under, if it was created by [`named`](Self::named).
    pub fn name(&self) -> Option<String> {
        registry().names.lock().get(self).cloned()
    }

    /// The raw numeric value of this key.
    #[inline]
    pub fn as_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "ItemKey({}: {name})", self.0),
            None => write!(f, "ItemKey({})", self.0),
        }
    }
}

/// An opaque key identifying one widget instance to the renderer.
///
/// Renderers that keep per-instance state (caches, animations of their own)
/// look it up by this key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceKey(u64);

impl InstanceKey {
    /// Allocate a fresh instance key.
    pub fn next() -> Self {
        Self(next_key())
    }

    /// The raw numeric value of this key.
    #[inline]
    pub fn as_raw(self) -> u64 {
        self.0
    }
}

static_assertions::assert_impl_all!(WidgetId: Send, Sync, Copy);
static_assertions::assert_impl_all!(ItemKey: Send, Sync, Copy);
