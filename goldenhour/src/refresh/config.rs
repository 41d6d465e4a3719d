//! Configuration for the dependent data refreshers.

use std::time::Duration;

/// Default cadence for ambulance position refreshes.
pub const DEFAULT_AMBULANCE_INTERVAL: Duration = Duration::from_secs(5);

/// Default cadence for hospital list refreshes (bed availability changes
/// slowly compared to ambulance position).
pub const DEFAULT_HOSPITAL_LIST_INTERVAL: Duration = Duration::from_secs(30);

/// Cadences for the two refresher loops.
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// How often to re-fetch the ambulance position.
    pub ambulance_interval: Duration,

    /// How often to re-fetch the hospital list.
    pub hospital_list_interval: Duration,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            ambulance_interval: DEFAULT_AMBULANCE_INTERVAL,
            hospital_list_interval: DEFAULT_HOSPITAL_LIST_INTERVAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RefreshConfig::default();
        assert_eq!(config.ambulance_interval, Duration::from_secs(5));
        assert_eq!(config.hospital_list_interval, Duration::from_secs(30));
    }
}
