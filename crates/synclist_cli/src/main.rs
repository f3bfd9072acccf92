//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `synclist_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("synclist_core version={}", synclist_core::core_version());
    println!(
        "synclist_core default_log_level={}",
        synclist_core::default_log_level()
    );
}
