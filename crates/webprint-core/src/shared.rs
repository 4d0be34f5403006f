use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// Sentinel used wherever a string property could not be obtained.
pub const UNKNOWN: &str = "unknown";

/// Font name → availability, ordered by name.
pub type FontCheck = BTreeMap<String, bool>;

/// A numeric capability the host may decline to report.
///
/// Serializes as the bare number when known and as the string `"unknown"`
/// otherwise. Any JSON value that is not a valid `T` (a marker string,
/// `null`, a bool, an object, a fraction or negative number for an integer
/// count) deserializes to `Unavailable`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reported<T> {
    /// The host reported a value.
    Known(T),
    /// The host has no such property.
    Unavailable,
}

impl<T> Default for Reported<T> {
    fn default() -> Self {
        Reported::Unavailable
    }
}

impl<T> Reported<T> {
    /// Returns the reported value, if any.
    pub fn known(self) -> Option<T> {
        match self {
            Reported::Known(v) => Some(v),
            Reported::Unavailable => None,
        }
    }

    /// True when the host reported nothing.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Reported::Unavailable)
    }
}

impl<T> From<Option<T>> for Reported<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Reported::Unavailable, Reported::Known)
    }
}

impl<T: Serialize> Serialize for Reported<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Reported::Known(v) => v.serialize(serializer),
            Reported::Unavailable => serializer.serialize_str(UNKNOWN),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Reported<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr<T> {
            Known(T),
            Other(IgnoredAny),
        }

        Ok(match Repr::<T>::deserialize(deserializer)? {
            Repr::Known(v) => Reported::Known(v),
            Repr::Other(_) => Reported::Unavailable,
        })
    }
}

/// Screen geometry as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScreenInfo {
    /// Screen width in CSS pixels.
    pub width: u32,
    /// Screen height in CSS pixels.
    pub height: u32,
    /// Width minus OS chrome.
    pub avail_width: u32,
    /// Height minus OS chrome.
    pub avail_height: u32,
    /// Color depth in bits.
    pub color_depth: u32,
    /// Pixel depth in bits.
    pub pixel_depth: u32,
    /// Device pixels per CSS pixel; `1` when the host does not say.
    pub device_pixel_ratio: f64,
}

impl Default for ScreenInfo {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            avail_width: 0,
            avail_height: 0,
            color_depth: 0,
            pixel_depth: 0,
            device_pixel_ratio: 1.0,
        }
    }
}

/// Touch capability triple.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TouchSupport {
    /// Maximum simultaneous touch points.
    pub max_touch_points: u32,
    /// Touch events are supported.
    pub touch_event: bool,
    /// Pointer events are supported.
    pub pointer_event: bool,
}

/// Quirk name → flag.
///
/// The member set is open: rule sets and host probes may add names freely.
/// Ordered by name so iteration and serialization are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quirks(BTreeMap<String, bool>);

impl Quirks {
    /// Creates an empty quirk set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a flag, returning its previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: bool) -> Option<bool> {
        self.0.insert(name.into(), value)
    }

    /// Looks a flag up by name.
    pub fn get(&self, name: &str) -> Option<bool> {
        self.0.get(name).copied()
    }

    /// True when the flag exists and is set.
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).unwrap_or(false)
    }

    /// Overlays `other`; its flags win on conflicts.
    pub fn merge(&mut self, other: Quirks) {
        self.0.extend(other.0);
    }

    /// Iterates flags in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of flags.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no flags are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, bool)> for Quirks {
    fn from_iter<I: IntoIterator<Item = (K, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
