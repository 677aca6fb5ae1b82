use std::time::Duration;

/// Per-battle driver settings
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Log every applied event at debug level, tagged with the room
    pub log_events: bool,
    /// Emit `/leave ROOM` once the battle has a result
    pub leave_on_finish: bool,
    /// Give up on the agent after this long; `None` waits indefinitely
    pub decision_timeout: Option<Duration>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            log_events: false,
            leave_on_finish: true,
            decision_timeout: None,
        }
    }
}
