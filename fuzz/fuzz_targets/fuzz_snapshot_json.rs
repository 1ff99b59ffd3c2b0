#![no_main]
use grafana_dashboard_sync::model::ConfigSnapshot;
use grafana_dashboard_sync::DiffEngine;
use libfuzzer_sys::fuzz_target;

/// Fuzz snapshot parsing and the diff engine.
///
/// Any snapshot that parses must compare identical to itself.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(snapshot) = ConfigSnapshot::from_json_str(s) {
        let result = DiffEngine::new().diff(&snapshot, &snapshot);
        assert!(result.is_identical());
    }
});
