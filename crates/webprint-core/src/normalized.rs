//! Reduction of a raw fingerprint to its canonical identity subset.

use serde::{Deserialize, Serialize};

use crate::raw::RawFingerprint;
use crate::shared::{FontCheck, Reported, TouchSupport, UNKNOWN};

/// Screen fields that survive normalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedScreen {
    /// Screen width in CSS pixels.
    pub width: u32,
    /// Screen height in CSS pixels.
    pub height: u32,
    /// Device pixels per CSS pixel; always finite and positive.
    pub device_pixel_ratio: f64,
}

/// Canonical, reduced, deterministically ordered fingerprint.
///
/// Built by [`normalize`], or deserialized from its JSON form, which goes
/// through the same list sorting and numeric sanitizing. Fields are
/// read-only; two captures of the same client yield equal values even when
/// the host enumerates plugins in a different order, samples a new
/// timestamp, or renders a slightly different canvas.
///
/// The JSON form read back is the plain `serde_json` one. The canonical
/// serialization renders numbers as strings and is not meant to be parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Fields")]
pub struct NormalizedFingerprint {
    user_agent: String,
    platform: String,
    screen: NormalizedScreen,
    timezone: String,
    language: String,
    hardware_concurrency: Reported<u32>,
    device_memory: Reported<f64>,
    webgl_vendor: String,
    webgl_renderer: String,
    fonts: FontCheck,
    audio: bool,
    touch_support: TouchSupport,
    plugins: Vec<String>,
    mime_types: Vec<String>,
}

/// Unchecked field set; every path into [`NormalizedFingerprint`] passes
/// through its `From` impl.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Fields {
    user_agent: String,
    platform: String,
    screen: NormalizedScreen,
    timezone: String,
    language: String,
    hardware_concurrency: Reported<u32>,
    device_memory: Reported<f64>,
    webgl_vendor: String,
    webgl_renderer: String,
    fonts: FontCheck,
    audio: bool,
    touch_support: TouchSupport,
    plugins: Vec<String>,
    mime_types: Vec<String>,
}

impl From<Fields> for NormalizedFingerprint {
    fn from(fields: Fields) -> Self {
        let Fields {
            user_agent,
            platform,
            screen,
            timezone,
            language,
            hardware_concurrency,
            device_memory: memory,
            webgl_vendor,
            webgl_renderer,
            fonts,
            audio,
            touch_support,
            mut plugins,
            mut mime_types,
        } = fields;
        plugins.sort();
        mime_types.sort();

        Self {
            user_agent,
            platform,
            screen: NormalizedScreen {
                device_pixel_ratio: pixel_ratio(screen.device_pixel_ratio),
                ..screen
            },
            timezone,
            language,
            hardware_concurrency,
            device_memory: device_memory(memory),
            webgl_vendor,
            webgl_renderer,
            fonts,
            audio,
            touch_support,
            plugins,
            mime_types,
        }
    }
}

impl NormalizedFingerprint {
    /// User-agent string.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Platform string.
    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// Screen subset.
    pub fn screen(&self) -> NormalizedScreen {
        self.screen
    }

    /// IANA timezone name.
    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    /// Primary language tag.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Logical core count.
    pub fn hardware_concurrency(&self) -> Reported<u32> {
        self.hardware_concurrency
    }

    /// Device memory in GB.
    pub fn device_memory(&self) -> Reported<f64> {
        self.device_memory
    }

    /// GPU vendor.
    pub fn webgl_vendor(&self) -> &str {
        &self.webgl_vendor
    }

    /// GPU renderer.
    pub fn webgl_renderer(&self) -> &str {
        &self.webgl_renderer
    }

    /// Font availability map.
    pub fn fonts(&self) -> &FontCheck {
        &self.fonts
    }

    /// Whether the client produced a usable audio signal.
    pub fn audio(&self) -> bool {
        self.audio
    }

    /// Touch capability.
    pub fn touch_support(&self) -> TouchSupport {
        self.touch_support
    }

    /// Plugin names, ascending.
    pub fn plugins(&self) -> &[String] {
        &self.plugins
    }

    /// MIME types, ascending.
    pub fn mime_types(&self) -> &[String] {
        &self.mime_types
    }
}

/// Normalizes a raw fingerprint. Pure, total and deterministic.
///
/// Keeps user agent, platform, screen width/height/pixel ratio, timezone,
/// language, core count, device memory, WebGL vendor/renderer, fonts and
/// touch support. The audio signature collapses to a single flag (`true`
/// unless it is the `"unknown"` sentinel). Plugin names and MIME types are
/// sorted. Everything else (canvas, benchmark, local IPs, do-not-track,
/// quirks, storage, network, languages, vendor, timestamp) is dropped.
pub fn normalize(raw: &RawFingerprint) -> NormalizedFingerprint {
    Fields {
        user_agent: raw.user_agent.clone(),
        platform: raw.platform.clone(),
        screen: NormalizedScreen {
            width: raw.screen.width,
            height: raw.screen.height,
            device_pixel_ratio: raw.screen.device_pixel_ratio,
        },
        timezone: raw.timezone.clone(),
        language: raw.language.clone(),
        hardware_concurrency: raw.hardware_concurrency,
        device_memory: raw.device_memory,
        webgl_vendor: raw.webgl.vendor.clone(),
        webgl_renderer: raw.webgl.renderer.clone(),
        fonts: raw.font_check.clone(),
        audio: raw.audio_fingerprint != UNKNOWN,
        touch_support: raw.touch_support,
        plugins: raw.plugins.iter().map(|p| p.name.clone()).collect(),
        mime_types: raw.mime_types.iter().map(|mt| mt.mime_type.clone()).collect(),
    }
    .into()
}

impl From<&RawFingerprint> for NormalizedFingerprint {
    fn from(raw: &RawFingerprint) -> Self {
        normalize(raw)
    }
}

/// Same default the collector applies: `1` when the ratio is unusable.
fn pixel_ratio(ratio: f64) -> f64 {
    if ratio.is_finite() && ratio > 0.0 {
        ratio
    } else {
        1.0
    }
}

fn device_memory(memory: Reported<f64>) -> Reported<f64> {
    match memory {
        // -0.0 would serialize differently from 0.0
        Reported::Known(gb) if gb == 0.0 => Reported::Known(0.0),
        Reported::Known(gb) if gb.is_finite() && gb > 0.0 => Reported::Known(gb),
        _ => Reported::Unavailable,
    }
}
