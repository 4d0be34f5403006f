use chrono::{TimeZone, Utc};
use serde_json::json;
use webprint_core::{
    normalize, serialize, DoNotTrack, FontCheck, MimeTypeInfo, NormalizedFingerprint,
    PerformanceBenchmark, PluginInfo, Quirks, RawFingerprint, Reported, ScreenInfo, TouchSupport,
    WebGlInfo,
};

fn plugin(name: &str) -> PluginInfo {
    PluginInfo {
        name: name.to_string(),
        filename: format!("{}.so", name.to_lowercase()),
        description: format!("{} plugin", name),
    }
}

fn mime(mime_type: &str) -> MimeTypeInfo {
    MimeTypeInfo {
        mime_type: mime_type.to_string(),
        description: String::new(),
    }
}

fn scenario_raw() -> RawFingerprint {
    let mut fonts = FontCheck::new();
    fonts.insert("Arial".to_string(), true);
    RawFingerprint {
        user_agent: "UA1".to_string(),
        platform: "Win32".to_string(),
        screen: ScreenInfo {
            width: 1920,
            height: 1080,
            device_pixel_ratio: 1.0,
            ..ScreenInfo::default()
        },
        timezone: "UTC".to_string(),
        language: "en-US".to_string(),
        hardware_concurrency: Reported::Known(8),
        device_memory: Reported::Known(8.0),
        webgl: WebGlInfo {
            vendor: "NVIDIA".to_string(),
            renderer: "GTX".to_string(),
        },
        font_check: fonts,
        touch_support: TouchSupport {
            max_touch_points: 0,
            touch_event: false,
            pointer_event: true,
        },
        audio_fingerprint: "unknown".to_string(),
        ..RawFingerprint::default()
    }
}

#[test]
fn scenario_collapses_unknown_audio_and_is_reproducible() {
    let raw = scenario_raw();
    let first = normalize(&raw);
    let second = normalize(&raw);
    assert!(!first.audio());
    assert_eq!(first, second);
    assert_eq!(serialize(&first), serialize(&second));
}

#[test]
fn scenario_serializes_to_golden_text() {
    let serialized = serialize(&normalize(&scenario_raw()));
    assert_eq!(
        serialized,
        concat!(
            r#"{"audio":false,"deviceMemory":"8.0","fonts":{"Arial":true},"#,
            r#""hardwareConcurrency":"8","language":"en-US","mimeTypes":[],"#,
            r#""platform":"Win32","plugins":[],"#,
            r#""screen":{"devicePixelRatio":"1.0","height":"1080","width":"1920"},"#,
            r#""timezone":"UTC","#,
            r#""touchSupport":{"maxTouchPoints":"0","pointerEvent":true,"touchEvent":false},"#,
            r#""userAgent":"UA1","webglRenderer":"GTX","webglVendor":"NVIDIA"}"#
        )
    );
}

#[test]
fn volatile_fields_do_not_reach_normalized_form() {
    let base = scenario_raw();
    let mut noisy = base.clone();
    noisy.current_timestamp = Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    noisy.performance_benchmark = PerformanceBenchmark {
        timing: 1234.5,
        math_random: 0.42,
        math_sin: 0.8414709848078965,
    };
    noisy.local_ips = vec!["192.168.1.7".to_string()];
    noisy.canvas_fingerprint = "data:image/png;base64,AAAA".to_string();
    noisy.do_not_track = DoNotTrack::Text("1".to_string());
    noisy.quirks = [("chrome", true), ("brave", true)].into_iter().collect::<Quirks>();

    assert_eq!(normalize(&base), normalize(&noisy));
    assert_eq!(serialize(&normalize(&base)), serialize(&normalize(&noisy)));
}

#[test]
fn dropped_screen_and_identity_fields_are_ignored() {
    let base = scenario_raw();
    let mut other = base.clone();
    other.screen.avail_width = 1900;
    other.screen.avail_height = 1040;
    other.screen.color_depth = 24;
    other.screen.pixel_depth = 24;
    other.vendor = "Google Inc.".to_string();
    other.languages = vec!["en-US".to_string(), "en".to_string()];
    other.storage.cookies = true;
    other.network_info.effective_type = Some("4g".to_string());
    assert_eq!(normalize(&base), normalize(&other));
}

#[test]
fn plugin_and_mime_order_is_canonical() {
    let mut ab = scenario_raw();
    ab.plugins = vec![plugin("A"), plugin("B")];
    ab.mime_types = vec![mime("application/pdf"), mime("text/pdf")];
    let mut ba = scenario_raw();
    ba.plugins = vec![plugin("B"), plugin("A")];
    ba.mime_types = vec![mime("text/pdf"), mime("application/pdf")];

    let n_ab = normalize(&ab);
    let n_ba = normalize(&ba);
    assert_eq!(n_ab.plugins(), ["A".to_string(), "B".to_string()]);
    assert_eq!(n_ab.mime_types(), n_ba.mime_types());
    assert_eq!(serialize(&n_ab), serialize(&n_ba));
}

#[test]
fn plugin_descriptions_do_not_matter() {
    let mut a = scenario_raw();
    a.plugins = vec![plugin("PDF Viewer")];
    let mut b = scenario_raw();
    b.plugins = vec![PluginInfo {
        name: "PDF Viewer".to_string(),
        filename: "internal-pdf-viewer".to_string(),
        description: "Portable Document Format".to_string(),
    }];
    assert_eq!(normalize(&a), normalize(&b));
}

#[test]
fn any_audio_signature_other_than_unknown_is_true() {
    for signature in ["0.1,0.2,0.3", "no-audio-context", "", "Unknown", "audio-capabilities-unknown"] {
        let mut raw = scenario_raw();
        raw.audio_fingerprint = signature.to_string();
        assert!(normalize(&raw).audio(), "signature {:?}", signature);
    }
    let mut raw = scenario_raw();
    raw.audio_fingerprint = "unknown".to_string();
    assert!(!normalize(&raw).audio());
}

#[test]
fn identity_fields_change_the_serialization() {
    let base = serialize(&normalize(&scenario_raw()));
    let mut other = scenario_raw();
    other.webgl.renderer = "GTX 1080".to_string();
    assert_ne!(base, serialize(&normalize(&other)));

    let mut other = scenario_raw();
    other.hardware_concurrency = Reported::Unavailable;
    assert_ne!(base, serialize(&normalize(&other)));

    let mut other = scenario_raw();
    other.font_check.insert("Verdana".to_string(), false);
    assert_ne!(base, serialize(&normalize(&other)));
}

#[test]
fn unavailable_numbers_serialize_as_unknown() {
    let mut raw = scenario_raw();
    raw.hardware_concurrency = Reported::Unavailable;
    raw.device_memory = Reported::Unavailable;
    let serialized = serialize(&normalize(&raw));
    assert!(serialized.contains(r#""hardwareConcurrency":"unknown""#));
    assert!(serialized.contains(r#""deviceMemory":"unknown""#));
}

#[test]
fn malformed_pixel_ratio_still_serializes() {
    let mut raw = scenario_raw();
    raw.screen.device_pixel_ratio = f64::NAN;
    let normalized = normalize(&raw);
    assert_eq!(normalized.screen().device_pixel_ratio, 1.0);
    assert_eq!(serialize(&normalized), serialize(&normalize(&scenario_raw())));
}

#[test]
fn raw_document_parses_with_defaults() {
    let raw = RawFingerprint::from_value(json!({
        "userAgent": "UA1",
        "platform": "Win32",
        "hardwareConcurrency": "unknown",
        "deviceMemory": 4,
        "mimeTypes": [{"type": "application/pdf", "description": "PDF"}],
        "localIPs": ["10.0.0.2"],
        "doNotTrack": null,
        "storage": {"indexedDB": true},
        "currentTimestamp": "2024-05-01T12:00:00.000Z"
    }))
    .unwrap();

    assert_eq!(raw.user_agent, "UA1");
    assert!(raw.hardware_concurrency.is_unavailable());
    assert_eq!(raw.device_memory, Reported::Known(4.0));
    assert_eq!(raw.mime_types[0].mime_type, "application/pdf");
    assert_eq!(raw.local_ips, vec!["10.0.0.2".to_string()]);
    assert!(raw.do_not_track.is_absent());
    assert!(raw.storage.indexed_db);
    assert_eq!(raw.timezone, "unknown");
    assert_eq!(raw.audio_fingerprint, "unknown");
    assert_eq!(raw.webgl.vendor, "unknown");
    assert_eq!(raw.screen.device_pixel_ratio, 1.0);
    assert!(raw.current_timestamp.is_some());
}

#[test]
fn raw_document_round_trips_through_json() {
    let mut raw = scenario_raw();
    raw.do_not_track = DoNotTrack::Flag(true);
    raw.plugins = vec![plugin("A")];
    raw.performance_benchmark.math_sin = 0.5;
    let text = serde_json::to_string(&raw).unwrap();
    assert!(text.contains(r#""localIPs":[]"#));
    assert!(text.contains(r#""doNotTrack":true"#));
    let back = RawFingerprint::from_json(&text).unwrap();
    assert_eq!(back, raw);
}

#[test]
fn malformed_document_is_rejected() {
    assert!(RawFingerprint::from_json("{not json").is_err());
    assert!(RawFingerprint::from_json(r#"{"plugins": 3}"#).is_err());
}

#[test]
fn normalized_json_round_trips() {
    let mut raw = scenario_raw();
    raw.plugins = vec![plugin("B"), plugin("A")];
    let normalized = normalize(&raw);
    let text = serde_json::to_string(&normalized).unwrap();
    let back: NormalizedFingerprint = serde_json::from_str(&text).unwrap();
    assert_eq!(back, normalized);
    assert_eq!(serialize(&back), serialize(&normalized));
}

#[test]
fn deserialized_normalized_form_is_canonicalized() {
    let back: NormalizedFingerprint = serde_json::from_value(json!({
        "userAgent": "UA1",
        "platform": "Win32",
        "screen": {"width": 1920, "height": 1080, "devicePixelRatio": -3.0},
        "timezone": "UTC",
        "language": "en-US",
        "hardwareConcurrency": 8,
        "deviceMemory": -0.0,
        "webglVendor": "NVIDIA",
        "webglRenderer": "GTX",
        "fonts": {"Arial": true},
        "audio": false,
        "touchSupport": {"maxTouchPoints": 0, "touchEvent": false, "pointerEvent": true},
        "plugins": ["B", "A"],
        "mimeTypes": ["text/pdf", "application/pdf"]
    }))
    .unwrap();

    assert_eq!(back.plugins(), ["A".to_string(), "B".to_string()]);
    assert_eq!(
        back.mime_types(),
        ["application/pdf".to_string(), "text/pdf".to_string()]
    );
    assert_eq!(back.screen().device_pixel_ratio, 1.0);
    assert!(back.device_memory().known().unwrap().is_sign_positive());

    let serialized = serialize(&back);
    assert!(serialized.contains(r#""plugins":["A","B"]"#));
    assert!(serialized.contains(r#""devicePixelRatio":"1.0""#));
    assert!(serialized.contains(r#""deviceMemory":"0.0""#));
}

#[test]
fn unusable_numeric_capabilities_fall_back_to_unknown() {
    for value in [json!(true), json!({}), json!(8.5), json!(-1), json!([4])] {
        let raw = RawFingerprint::from_value(json!({
            "userAgent": "UA1",
            "hardwareConcurrency": value.clone(),
            "deviceMemory": value.clone(),
        }))
        .unwrap_or_else(|err| panic!("{} rejected: {}", value, err));
        assert!(raw.hardware_concurrency.is_unavailable(), "{}", value);
        if value.is_number() {
            continue;
        }
        assert!(raw.device_memory.is_unavailable(), "{}", value);
    }
}
