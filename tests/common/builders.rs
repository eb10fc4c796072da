//! Test data builders for creating run configurations

use fourier_props::RunConfig;

/// Builder for creating test RunConfigs
pub struct RunConfigBuilder {
    config: RunConfig,
}

impl RunConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: RunConfig::default(),
        }
    }

    /// 256 Hz for one second, every frequency on an exact bin
    pub fn small() -> Self {
        Self::new()
            .sampling_rate(256.0)
            .sine_freq(8.0)
            .time_shift(4.0 / 256.0)
    }

    pub fn sampling_rate(mut self, hz: f64) -> Self {
        self.config.sampling_rate_hz = hz;
        self
    }

    pub fn duration(mut self, seconds: f64) -> Self {
        self.config.duration_s = seconds;
        self
    }

    pub fn sine_freq(mut self, hz: f64) -> Self {
        self.config.sine_freq_hz = hz;
        self
    }

    pub fn rect_width(mut self, seconds: f64) -> Self {
        self.config.rect_width_s = seconds;
        self
    }

    pub fn time_shift(mut self, seconds: f64) -> Self {
        self.config.time_shift_s = seconds;
        self
    }

    pub fn time_scale(mut self, factor: f64) -> Self {
        self.config.time_scale = factor;
        self
    }

    pub fn build(self) -> RunConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_config_builder() {
        let config = RunConfigBuilder::new()
            .sampling_rate(1000.0)
            .duration(0.5)
            .build();

        assert_eq!(config.sampling_rate_hz, 1000.0);
        assert_eq!(config.duration_s, 0.5);
        assert_eq!(config.sample_count(), 500);
    }
}
