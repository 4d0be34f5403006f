use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::FingerprintError;
use crate::shared::{FontCheck, Quirks, Reported, ScreenInfo, TouchSupport, UNKNOWN};

/// GPU identity strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct WebGlInfo {
    /// Unmasked vendor string.
    pub vendor: String,
    /// Unmasked renderer string.
    pub renderer: String,
}

impl Default for WebGlInfo {
    fn default() -> Self {
        Self {
            vendor: UNKNOWN.to_string(),
            renderer: UNKNOWN.to_string(),
        }
    }
}

/// Installed plugin descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginInfo {
    /// Plugin name.
    pub name: String,
    /// Backing file name.
    pub filename: String,
    /// Free-form description.
    pub description: String,
}

/// Supported MIME type descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct MimeTypeInfo {
    /// MIME type, e.g. `application/pdf`.
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Free-form description.
    pub description: String,
}

/// Network quality hints; every member is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkInfo {
    /// Effective connection type, e.g. `4g`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_type: Option<String>,
    /// Downlink estimate in Mbit/s.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downlink: Option<f64>,
    /// Round-trip time estimate in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rtt: Option<f64>,
}

/// Storage capability flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageInfo {
    /// `localStorage` is usable.
    pub local_storage: bool,
    /// `sessionStorage` is usable.
    pub session_storage: bool,
    /// IndexedDB is usable.
    #[serde(rename = "indexedDB")]
    pub indexed_db: bool,
    /// Cookies are enabled.
    pub cookies: bool,
}

/// Timing, randomness and trigonometry samples.
///
/// Never part of an identity. The default is the frozen stand-in: zero
/// timing, zero randomness and `sin(1)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PerformanceBenchmark {
    /// High-resolution timer sample.
    pub timing: f64,
    /// Random number sample.
    pub math_random: f64,
    /// `sin(1)` as computed by the host.
    pub math_sin: f64,
}

impl Default for PerformanceBenchmark {
    fn default() -> Self {
        Self {
            timing: 0.0,
            math_random: 0.0,
            math_sin: 1f64.sin(),
        }
    }
}

/// Do-not-track preference: hosts report a string, a boolean, or nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum DoNotTrack {
    /// No preference reported.
    #[default]
    Absent,
    /// Textual preference such as `"1"` or `"unspecified"`.
    Text(String),
    /// Boolean preference.
    Flag(bool),
}

impl DoNotTrack {
    /// True when nothing was reported.
    pub fn is_absent(&self) -> bool {
        matches!(self, DoNotTrack::Absent)
    }
}

impl Serialize for DoNotTrack {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DoNotTrack::Absent => serializer.serialize_none(),
            DoNotTrack::Text(s) => serializer.serialize_str(s),
            DoNotTrack::Flag(b) => serializer.serialize_bool(*b),
        }
    }
}

impl<'de> Deserialize<'de> for DoNotTrack {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Flag(bool),
            Text(String),
        }

        Ok(match Option::<Repr>::deserialize(deserializer)? {
            None => DoNotTrack::Absent,
            Some(Repr::Flag(b)) => DoNotTrack::Flag(b),
            Some(Repr::Text(s)) => DoNotTrack::Text(s),
        })
    }
}

/// The full, unfiltered property bag collected from a client.
///
/// Every field carries an explicit default when the host could not supply
/// it: `"unknown"` for opaque strings, empty lists, zeros, and
/// [`Reported::Unavailable`] for numeric capabilities. The serde shape uses
/// the camelCase keys browser-side collectors emit, so a posted JSON document
/// deserializes directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawFingerprint {
    /// User-agent string.
    pub user_agent: String,
    /// Platform string, e.g. `Win32`.
    pub platform: String,
    /// Vendor string.
    pub vendor: String,
    /// Screen geometry.
    pub screen: ScreenInfo,
    /// IANA timezone name.
    pub timezone: String,
    /// Primary language tag.
    pub language: String,
    /// Accepted language tags in preference order.
    pub languages: Vec<String>,
    /// Logical core count.
    pub hardware_concurrency: Reported<u32>,
    /// Device memory in GB.
    pub device_memory: Reported<f64>,
    /// GPU identity.
    pub webgl: WebGlInfo,
    /// Opaque canvas rendering signature.
    pub canvas_fingerprint: String,
    /// Opaque audio signature or capability summary.
    pub audio_fingerprint: String,
    /// Font availability from the probe list.
    pub font_check: FontCheck,
    /// Installed plugins, in host enumeration order.
    pub plugins: Vec<PluginInfo>,
    /// Supported MIME types, in host enumeration order.
    pub mime_types: Vec<MimeTypeInfo>,
    /// Touch capability.
    pub touch_support: TouchSupport,
    /// Network quality hints.
    pub network_info: NetworkInfo,
    /// Storage capability flags.
    pub storage: StorageInfo,
    /// Benchmark samples.
    pub performance_benchmark: PerformanceBenchmark,
    /// Locally observed IP addresses.
    #[serde(rename = "localIPs")]
    pub local_ips: Vec<String>,
    /// Do-not-track preference.
    #[serde(skip_serializing_if = "DoNotTrack::is_absent")]
    pub do_not_track: DoNotTrack,
    /// Browser, OS and device-class flags.
    pub quirks: Quirks,
    /// Capture time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_timestamp: Option<DateTime<Utc>>,
}

impl Default for RawFingerprint {
    fn default() -> Self {
        Self {
            user_agent: String::new(),
            platform: String::new(),
            vendor: String::new(),
            screen: ScreenInfo::default(),
            timezone: UNKNOWN.to_string(),
            language: UNKNOWN.to_string(),
            languages: Vec::new(),
            hardware_concurrency: Reported::Unavailable,
            device_memory: Reported::Unavailable,
            webgl: WebGlInfo::default(),
            canvas_fingerprint: UNKNOWN.to_string(),
            audio_fingerprint: UNKNOWN.to_string(),
            font_check: FontCheck::new(),
            plugins: Vec::new(),
            mime_types: Vec::new(),
            touch_support: TouchSupport::default(),
            network_info: NetworkInfo::default(),
            storage: StorageInfo::default(),
            performance_benchmark: PerformanceBenchmark::default(),
            local_ips: Vec::new(),
            do_not_track: DoNotTrack::Absent,
            quirks: Quirks::new(),
            current_timestamp: None,
        }
    }
}

impl RawFingerprint {
    /// Parses a raw fingerprint from a JSON document.
    ///
    /// Missing members take their documented defaults.
    pub fn from_json(json: &str) -> Result<Self, FingerprintError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Converts an already-parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, FingerprintError> {
        Ok(serde_json::from_value(value)?)
    }
}
