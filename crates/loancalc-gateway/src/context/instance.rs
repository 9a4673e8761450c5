use serde::Deserialize;

use crate::config::InstanceSection;

/// Platform-assigned instance index (Cloud Foundry style).
pub const INSTANCE_INDEX_ENV: &str = "CF_INSTANCE_INDEX";
/// Application metadata JSON carrying `instance_index`.
pub const VCAP_APPLICATION_ENV: &str = "VCAP_APPLICATION";
/// Reported when nothing names this instance.
pub const UNKNOWN_INSTANCE: &str = "-1";

#[derive(Debug, Deserialize)]
struct VcapApplication {
    #[serde(default)]
    instance_index: Option<i64>,
}

/// Resolve which instance this process is.
///
/// Order: `CF_INSTANCE_INDEX`, `VCAP_APPLICATION.instance_index`,
/// `instance.id` from config, then `"-1"`.
pub fn resolve_instance_id(cfg: &InstanceSection) -> String {
    resolve_from(
        std::env::var(INSTANCE_INDEX_ENV).ok(),
        std::env::var(VCAP_APPLICATION_ENV).ok(),
        cfg,
    )
}

fn resolve_from(index: Option<String>, vcap: Option<String>, cfg: &InstanceSection) -> String {
    if let Some(idx) = index.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()) {
        return idx;
    }

    if let Some(raw) = vcap {
        match serde_json::from_str::<VcapApplication>(&raw) {
            Ok(VcapApplication { instance_index: Some(i) }) => return i.to_string(),
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "ignoring unparsable VCAP_APPLICATION"),
        }
    }

    cfg.id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(UNKNOWN_INSTANCE)
        .to_string()
}
