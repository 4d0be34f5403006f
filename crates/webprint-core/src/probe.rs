//! Capability probes: one source per slice of the raw fingerprint.
//!
//! A probe reads one category of host properties and owns its failure
//! policy through [`Probe::fallback`]. Hosts implement the probes for their
//! platform and hand them to a [`Collector`](crate::collector::Collector).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::ProbeError;
use crate::raw::{
    DoNotTrack, MimeTypeInfo, NetworkInfo, PerformanceBenchmark, PluginInfo, StorageInfo,
    WebGlInfo,
};
use crate::shared::{FontCheck, Quirks, Reported, ScreenInfo, TouchSupport, UNKNOWN};

/// Synchronous probe for one slice of the raw fingerprint.
pub trait Probe: Send + Sync {
    /// Slice this probe produces.
    type Output: Default;

    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Reads the slice from the host.
    fn probe(&self) -> Result<Self::Output, ProbeError>;

    /// Value used when [`Probe::probe`] fails.
    fn fallback(&self) -> Self::Output {
        Self::Output::default()
    }
}

/// Probe whose host interface only completes asynchronously.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait AsyncProbe: Send + Sync {
    /// Slice this probe produces.
    type Output: Default + Send;

    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Samples the host.
    async fn sample(&self) -> Result<Self::Output, ProbeError>;

    /// Value used when [`AsyncProbe::sample`] fails.
    fn fallback(&self) -> Self::Output {
        Self::Output::default()
    }

    /// Best-effort value for synchronous collection, if the probe has one.
    fn last_known(&self) -> Option<Self::Output> {
        None
    }
}

/// Identity strings and hardware limits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavigatorInfo {
    /// User-agent string.
    pub user_agent: String,
    /// Platform string.
    pub platform: String,
    /// Vendor string.
    pub vendor: String,
    /// Logical core count.
    pub hardware_concurrency: Reported<u32>,
    /// Device memory in GB.
    pub device_memory: Reported<f64>,
    /// Do-not-track preference.
    pub do_not_track: DoNotTrack,
}

/// Timezone and language preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleInfo {
    /// IANA timezone name.
    pub timezone: String,
    /// Primary language tag.
    pub language: String,
    /// Accepted language tags in preference order.
    pub languages: Vec<String>,
}

impl Default for LocaleInfo {
    fn default() -> Self {
        Self {
            timezone: UNKNOWN.to_string(),
            language: UNKNOWN.to_string(),
            languages: Vec::new(),
        }
    }
}

/// GPU identity plus the canvas rendering signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderInfo {
    /// GPU identity.
    pub webgl: WebGlInfo,
    /// Opaque canvas signature.
    pub canvas: String,
}

impl Default for RenderInfo {
    fn default() -> Self {
        Self {
            webgl: WebGlInfo::default(),
            canvas: UNKNOWN.to_string(),
        }
    }
}

/// Installed plugins and MIME types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginInventory {
    /// Installed plugins.
    pub plugins: Vec<PluginInfo>,
    /// Supported MIME types.
    pub mime_types: Vec<MimeTypeInfo>,
}

/// Audio-derived signature or capability summary.
///
/// Defaults to the `"unknown"` sentinel, which normalizes to "no audio".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AudioSample(pub String);

impl Default for AudioSample {
    fn default() -> Self {
        Self(UNKNOWN.to_string())
    }
}

/// Locally observed IP addresses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalAddresses(pub Vec<String>);

/// Navigator slice source.
pub type NavigatorProbe = dyn Probe<Output = NavigatorInfo>;
/// Locale slice source.
pub type LocaleProbe = dyn Probe<Output = LocaleInfo>;
/// Screen slice source.
pub type ScreenProbe = dyn Probe<Output = ScreenInfo>;
/// WebGL and canvas slice source.
pub type RenderProbe = dyn Probe<Output = RenderInfo>;
/// Font availability source.
pub type FontProbe = dyn Probe<Output = FontCheck>;
/// Plugin and MIME inventory source.
pub type PluginProbe = dyn Probe<Output = PluginInventory>;
/// Touch capability source.
pub type TouchProbe = dyn Probe<Output = TouchSupport>;
/// Network hint source.
pub type NetworkProbe = dyn Probe<Output = NetworkInfo>;
/// Storage capability source.
pub type StorageProbe = dyn Probe<Output = StorageInfo>;
/// Benchmark sample source.
pub type BenchmarkProbe = dyn Probe<Output = PerformanceBenchmark>;
/// Host-property quirks (flags not derivable from identity strings).
pub type HostQuirkProbe = dyn Probe<Output = Quirks>;
/// Audio signature source.
pub type AudioProbe = dyn AsyncProbe<Output = AudioSample>;
/// Local address source.
pub type AddressProbe = dyn AsyncProbe<Output = LocalAddresses>;

/// Probe returning a value the host already has.
///
/// Useful when a slice arrives out of band, and in tests.
#[derive(Debug, Clone)]
pub struct StaticProbe<T> {
    name: &'static str,
    value: T,
}

impl<T> StaticProbe<T> {
    /// Wraps `value` under `name`.
    pub fn new(name: &'static str, value: T) -> Self {
        Self { name, value }
    }
}

impl<T: Clone + Default + Send + Sync> Probe for StaticProbe<T> {
    type Output = T;

    fn name(&self) -> &'static str {
        self.name
    }

    fn probe(&self) -> Result<T, ProbeError> {
        Ok(self.value.clone())
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl<T: Clone + Default + Send + Sync> AsyncProbe for StaticProbe<T> {
    type Output = T;

    fn name(&self) -> &'static str {
        self.name
    }

    async fn sample(&self) -> Result<T, ProbeError> {
        Ok(self.value.clone())
    }

    fn last_known(&self) -> Option<T> {
        Some(self.value.clone())
    }
}

/// Which optional probes run.
///
/// Disabled probes contribute their slice's default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapabilityFlags {
    /// Run the audio probe.
    pub audio: bool,
    /// Run the local address probe.
    pub local_ips: bool,
    /// Sample the benchmark live; otherwise use the frozen stand-in.
    pub live_benchmark: bool,
    /// Stamp the capture time.
    pub timestamp: bool,
}

impl Default for CapabilityFlags {
    fn default() -> Self {
        Self {
            audio: true,
            local_ips: true,
            live_benchmark: false,
            timestamp: true,
        }
    }
}

impl CapabilityFlags {
    /// No optional probes: fully reproducible output.
    pub fn minimal() -> Self {
        Self {
            audio: false,
            local_ips: false,
            live_benchmark: false,
            timestamp: false,
        }
    }
}
