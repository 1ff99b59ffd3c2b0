#![no_main]
use grafana_dashboard_sync::model::DashboardEnvelope;
use libfuzzer_sys::fuzz_target;

/// Fuzz deserialization of `/api/dashboards/uid/{uid}` responses.
///
/// Panel trees of any depth must flatten to exactly `panel_count` entries.
fuzz_target!(|data: &[u8]| {
    if let Ok(envelope) = serde_json::from_slice::<DashboardEnvelope>(data) {
        let dashboard = envelope.dashboard;
        assert_eq!(dashboard.flattened_panels().len(), dashboard.panel_count());
    }
});
