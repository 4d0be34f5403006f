//! Fan-out over probes, merged into one raw fingerprint.

use chrono::Utc;
use tracing::{debug, warn};

use crate::probe::{
    AddressProbe, AsyncProbe, AudioProbe, AudioSample, BenchmarkProbe, CapabilityFlags, FontProbe,
    HostQuirkProbe, LocalAddresses, LocaleInfo, LocaleProbe, NavigatorInfo, NavigatorProbe,
    NetworkProbe, PluginInventory, PluginProbe, Probe, RenderInfo, RenderProbe, ScreenProbe,
    StorageProbe, TouchProbe,
};
use crate::quirks::QuirkRules;
use crate::raw::{NetworkInfo, PerformanceBenchmark, RawFingerprint, StorageInfo};
use crate::shared::{FontCheck, Quirks, ScreenInfo, TouchSupport};

/// Collects a [`RawFingerprint`] from a set of probes.
///
/// Collection never fails: a probe error is logged and replaced by that
/// probe's fallback, and a missing probe contributes its slice's default.
pub struct Collector {
    flags: CapabilityFlags,
    quirk_rules: QuirkRules,
    navigator: Option<Box<NavigatorProbe>>,
    locale: Option<Box<LocaleProbe>>,
    screen: Option<Box<ScreenProbe>>,
    render: Option<Box<RenderProbe>>,
    fonts: Option<Box<FontProbe>>,
    plugins: Option<Box<PluginProbe>>,
    touch: Option<Box<TouchProbe>>,
    network: Option<Box<NetworkProbe>>,
    storage: Option<Box<StorageProbe>>,
    benchmark: Option<Box<BenchmarkProbe>>,
    host_quirks: Option<Box<HostQuirkProbe>>,
    audio: Option<Box<AudioProbe>>,
    addresses: Option<Box<AddressProbe>>,
}

fn run<P: Probe + ?Sized>(probe: Option<&P>) -> P::Output {
    let Some(probe) = probe else {
        return P::Output::default();
    };
    match probe.probe() {
        Ok(value) => value,
        Err(err) => {
            warn!(probe = probe.name(), error = %err, "probe failed; using fallback");
            probe.fallback()
        }
    }
}

async fn sample<P: AsyncProbe + ?Sized>(probe: Option<&P>, enabled: bool) -> P::Output {
    match probe {
        Some(probe) if enabled => match probe.sample().await {
            Ok(value) => value,
            Err(err) => {
                warn!(probe = probe.name(), error = %err, "probe failed; using fallback");
                probe.fallback()
            }
        },
        _ => P::Output::default(),
    }
}

fn last_known<P: AsyncProbe + ?Sized>(probe: Option<&P>, enabled: bool) -> P::Output {
    match probe {
        Some(probe) if enabled => probe.last_known().unwrap_or_else(|| {
            debug!(probe = probe.name(), "no last-known value; using fallback");
            probe.fallback()
        }),
        _ => P::Output::default(),
    }
}

impl Collector {
    /// Starts building a collector.
    pub fn builder() -> CollectorBuilder {
        CollectorBuilder::default()
    }

    /// Flags this collector runs with.
    pub fn flags(&self) -> CapabilityFlags {
        self.flags
    }

    /// Runs every enabled probe, awaiting the asynchronous ones concurrently.
    pub async fn collect(&self) -> RawFingerprint {
        let (audio, addresses) = futures::join!(
            sample(self.audio.as_deref(), self.flags.audio),
            sample(self.addresses.as_deref(), self.flags.local_ips),
        );
        self.assemble(audio, addresses)
    }

    /// Runs the synchronous probes only; asynchronous probes contribute their
    /// last known value or their fallback.
    pub fn collect_sync(&self) -> RawFingerprint {
        let audio = last_known(self.audio.as_deref(), self.flags.audio);
        let addresses = last_known(self.addresses.as_deref(), self.flags.local_ips);
        self.assemble(audio, addresses)
    }

    fn assemble(&self, audio: AudioSample, addresses: LocalAddresses) -> RawFingerprint {
        let navigator = run(self.navigator.as_deref());
        let locale = run(self.locale.as_deref());
        let render = run(self.render.as_deref());
        let inventory = run(self.plugins.as_deref());

        let mut quirks = self
            .quirk_rules
            .evaluate(&navigator.user_agent, &navigator.platform);
        quirks.merge(run(self.host_quirks.as_deref()));

        let performance_benchmark = if self.flags.live_benchmark {
            run(self.benchmark.as_deref())
        } else {
            PerformanceBenchmark::default()
        };

        let raw = RawFingerprint {
            user_agent: navigator.user_agent,
            platform: navigator.platform,
            vendor: navigator.vendor,
            screen: run(self.screen.as_deref()),
            timezone: locale.timezone,
            language: locale.language,
            languages: locale.languages,
            hardware_concurrency: navigator.hardware_concurrency,
            device_memory: navigator.device_memory,
            webgl: render.webgl,
            canvas_fingerprint: render.canvas,
            audio_fingerprint: audio.0,
            font_check: run(self.fonts.as_deref()),
            plugins: inventory.plugins,
            mime_types: inventory.mime_types,
            touch_support: run(self.touch.as_deref()),
            network_info: run(self.network.as_deref()),
            storage: run(self.storage.as_deref()),
            performance_benchmark,
            local_ips: addresses.0,
            do_not_track: navigator.do_not_track,
            quirks,
            current_timestamp: self.flags.timestamp.then(Utc::now),
        };
        debug!(
            plugins = raw.plugins.len(),
            fonts = raw.font_check.len(),
            quirks = raw.quirks.len(),
            "collected raw fingerprint"
        );
        raw
    }
}

impl Default for Collector {
    fn default() -> Self {
        Self {
            flags: CapabilityFlags::default(),
            quirk_rules: QuirkRules::default(),
            navigator: None,
            locale: None,
            screen: None,
            render: None,
            fonts: None,
            plugins: None,
            touch: None,
            network: None,
            storage: None,
            benchmark: None,
            host_quirks: None,
            audio: None,
            addresses: None,
        }
    }
}

/// Builder for [`Collector`]. Every probe is optional.
#[derive(Default)]
pub struct CollectorBuilder {
    collector: Collector,
}

macro_rules! probe_setter {
    ($field:ident, $probe:ident, $output:ty, $doc:expr) => {
        #[doc = $doc]
        pub fn $field(mut self, probe: impl $probe<Output = $output> + 'static) -> Self {
            self.collector.$field = Some(Box::new(probe));
            self
        }
    };
}

impl CollectorBuilder {
    /// Sets which optional probes run.
    pub fn flags(mut self, flags: CapabilityFlags) -> Self {
        self.collector.flags = flags;
        self
    }

    /// Replaces the quirk rule set.
    pub fn quirk_rules(mut self, rules: QuirkRules) -> Self {
        self.collector.quirk_rules = rules;
        self
    }

    probe_setter!(navigator, Probe, NavigatorInfo, "Sets the navigator probe.");
    probe_setter!(locale, Probe, LocaleInfo, "Sets the locale probe.");
    probe_setter!(screen, Probe, ScreenInfo, "Sets the screen probe.");
    probe_setter!(render, Probe, RenderInfo, "Sets the WebGL/canvas probe.");
    probe_setter!(fonts, Probe, FontCheck, "Sets the font probe.");
    probe_setter!(plugins, Probe, PluginInventory, "Sets the plugin probe.");
    probe_setter!(touch, Probe, TouchSupport, "Sets the touch probe.");
    probe_setter!(network, Probe, NetworkInfo, "Sets the network probe.");
    probe_setter!(storage, Probe, StorageInfo, "Sets the storage probe.");
    probe_setter!(benchmark, Probe, PerformanceBenchmark, "Sets the benchmark probe.");
    probe_setter!(host_quirks, Probe, Quirks, "Sets the host-quirk probe.");
    probe_setter!(audio, AsyncProbe, AudioSample, "Sets the audio probe.");
    probe_setter!(addresses, AsyncProbe, LocalAddresses, "Sets the local address probe.");

    /// Finishes the collector.
    pub fn build(self) -> Collector {
        self.collector
    }
}
