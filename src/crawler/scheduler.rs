//! Request pacing for the crawler and the link checker
//!
//! This module handles:
//! - The fixed politeness delay issued after every page fetch and link check
//! - The cap on link checks in flight at once

use crate::config::CrawlerConfig;
use std::time::Duration;

/// Fixed-delay pacing with a concurrency cap for link checks
#[derive(Debug, Clone)]
pub struct Throttle {
    /// Pause issued after each network operation
    delay: Duration,

    /// Maximum number of link checks running at once
    max_in_flight: usize,
}

impl Throttle {
    /// Creates a sequential throttle with the given delay
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            max_in_flight: 1,
        }
    }

    /// Creates a throttle from crawler configuration
    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self::new(config.delay()).with_max_in_flight(config.check_concurrency)
    }

    /// Sets the concurrency cap; values below 1 are raised to 1
    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight.max(1);
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }

    /// Waits out the politeness delay
    pub async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::from_config(&CrawlerConfig::default())
    }
}
