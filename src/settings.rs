//! Page cache settings cacheward keeps in their expected state
//!
//! Order matters. The rewrite rules are generated from the values of the
//! rows above them, so that row stays last: applying it before the others
//! would certify rules built from stale values.

use anyhow::Result;
use declarative::{Setting, Value, VariableStore};

use crate::host::{Host, RuleStatus};

pub const CACHING: &str = "Caching";
pub const KNOWN_USERS: &str = "Don't cache pages for known users";
pub const REWRITE_RULES: &str = "Rewrite rules";

/// The canonical descriptor table, in evaluation order
pub fn table<H: Host>() -> Vec<Setting<H>> {
    vec![
        Setting::custom(CACHING, true, caching_enabled::<H>, Some(enable_caching::<H>)),
        Setting::variable("Cache delivery method (expert)", "wp_cache_mod_rewrite", 1),
        Setting::variable(KNOWN_USERS, "wp_cache_not_logged_in", 1),
        Setting::variable("Cache rebuild", "cache_rebuild_files", 1),
        Setting::variable("304 browser caching", "wp_supercache_304", 1),
        Setting::variable("Mobile device support", "wp_cache_mobile_enabled", 1),
        Setting::variable("Compress pages", "cache_compression", 0),
        Setting::variable("Make known users anonymous", "wp_cache_make_known_anon", 0),
        Setting::custom(
            REWRITE_RULES,
            RuleStatus::Configured.as_str(),
            rewrite_status::<H>,
            Some(regenerate_rewrite_rules::<H>),
        ),
    ]
}

// Caching is on only when both the plugin switch and the static-file switch are on
fn caching_enabled<H: Host>(host: &H) -> Value {
    let on = host.get_variable("cache_enabled").is_truthy()
        && host.get_variable("super_cache_enabled").is_truthy();
    Value::Bool(on)
}

fn enable_caching<H: Host>(host: &mut H) -> Result<()> {
    host.set_variable("cache_enabled", Value::Bool(true))?;
    host.set_variable("super_cache_enabled", Value::Bool(true))
}

fn rewrite_status<H: Host>(host: &H) -> Value {
    Value::from(host.rewrite_status().as_str())
}

fn regenerate_rewrite_rules<H: Host>(host: &mut H) -> Result<()> {
    host.regenerate_rewrite_rules()
}
