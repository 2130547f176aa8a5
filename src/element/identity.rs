//! Element identity keys and state fingerprints.
//!
//! A [`Key`] names one logical widget across tree rebuilds. A [`Fingerprint`]
//! summarizes only what the widget looks like (text, colors, toggles), never
//! where it is or how big it is. Together they key the render cache.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Stable identity of a widget. Cheap to clone.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(Rc<str>);

impl Key {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Rc::from(name.as_ref()))
    }

    /// A derived key for something wrapped around or owned by this widget.
    pub fn child(&self, suffix: &str) -> Key {
        Key::new(format!("{}:{suffix}", self.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({:?})", &*self.0)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::new(value)
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::new(value)
    }
}

impl From<&String> for Key {
    fn from(value: &String) -> Self {
        Key::new(value)
    }
}

// ---------------------------------------------------------------------------
// Fingerprint
// ---------------------------------------------------------------------------

/// Hash of a widget's visual state.
///
/// Built with the std SipHash hasher using fixed keys, so the same state gives
/// the same fingerprint for the life of the process.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Fingerprint(pub u64);

impl Fingerprint {
    /// Fingerprint of an empty state.
    pub const EMPTY: Fingerprint = Fingerprint(0);

    /// Fingerprint of any hashable state.
    pub fn of<T: Hash + ?Sized>(state: &T) -> Self {
        let mut hasher = DefaultHasher::new();
        state.hash(&mut hasher);
        Fingerprint(hasher.finish())
    }

    /// Mix more state into this fingerprint. Order matters.
    pub fn with<T: Hash + ?Sized>(self, state: &T) -> Self {
        let mut hasher = DefaultHasher::new();
        self.0.hash(&mut hasher);
        state.hash(&mut hasher);
        Fingerprint(hasher.finish())
    }

    /// Combine a sequence of fingerprints, or `None` if any is missing.
    pub fn all<I>(parts: I) -> Option<Fingerprint>
    where
        I: IntoIterator<Item = Option<Fingerprint>>,
    {
        let mut hasher = DefaultHasher::new();
        let mut count = 0usize;
        for part in parts {
            part?.0.hash(&mut hasher);
            count += 1;
        }
        count.hash(&mut hasher);
        Some(Fingerprint(hasher.finish()))
    }
}
