//! Engine configuration

/// Refresh engine settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EngineConfig {
    /// Zero the new back buffer on every swap, so each frame is drawn
    /// from a blank slate
    pub blank_on_draw: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            blank_on_draw: true,
        }
    }
}
