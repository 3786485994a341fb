//! # Observability & Tracing
//!
//! Every actor logs through `tracing` with an `entity_type` field:
//!
//! ```text
//! INFO Actor started entity_type="Room"
//! DEBUG Action entity_type="Room" id=room_1 action=Reserve
//! INFO Action ok entity_type="Room" id=room_1
//! WARN Action failed entity_type="Room" id=room_1 error=Room unavailable: room_1
//! INFO Shutdown entity_type="Room" size=3
//! ```
//!
//! Payloads are only logged at `debug`, so `RUST_LOG=info` stays compact while
//! `RUST_LOG=debug` shows the full request flow.

/// Installs the compact `fmt` subscriber filtered by `RUST_LOG`.
///
/// Call once at process start. Module paths are hidden because every event
/// already carries `entity_type`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}

/// Like [`setup_tracing`] but writes through the test harness and tolerates
/// being called from several tests in one process.
pub fn setup_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_test_writer()
        .try_init();
}
