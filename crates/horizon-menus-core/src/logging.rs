//! Logging facilities for Horizon Menus.
//!
//! Horizon Menus uses the `tracing` crate for instrumentation and never
//! installs a subscriber itself. To see logs, install one in the application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_menus=debug")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_menus_core::signal";
    /// Platform convention loading target.
    pub const PLATFORM: &str = "horizon_menus_core::platform";
    /// Descriptor builder target.
    pub const BUILDER: &str = "horizon_menus::builder";
    /// Widget realization target.
    pub const REALIZE: &str = "horizon_menus::realize";
    /// Popup trigger detection target.
    pub const TRIGGER: &str = "horizon_menus::trigger";
    /// System tray binding target.
    pub const TRAY: &str = "horizon_menus::tray";
}
