//! Per-frame effect counters
//!
//! All counters advance once per `begin_frame` and wrap modulo their period.

use rand::Rng;
use super::config::CrtConfig;

/// Rows the sweep band travels below the canvas before re-entering at the top
pub const SCANLINE_OVERSCAN: i32 = 20;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectTimers {
    /// Top row of the bright sweep band, in [0, height + overscan)
    pub scanline_y: i32,
    /// Horizontal offset applied to every ghosted draw this frame
    pub jitter_offset: i32,
    jitter_timer: u32,
    noise_timer: u32,
    flicker_timer: u32,
}

impl EffectTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance every counter by one frame
    pub fn advance<R: Rng>(&mut self, config: &CrtConfig, rng: &mut R) {
        self.jitter_timer += 1;
        if self.jitter_timer >= config.jitter_interval.max(1) {
            self.jitter_timer = 0;
            let amp = config.jitter_amplitude.max(0);
            self.jitter_offset = rng.random_range(-amp..=amp);
        }

        let period = config.height as i32 + SCANLINE_OVERSCAN;
        self.scanline_y = (self.scanline_y + config.scanline_speed).rem_euclid(period);

        self.noise_timer = (self.noise_timer + 1) % config.noise_refresh_interval.max(1);
        self.flicker_timer = (self.flicker_timer + 1) % config.flicker_period.max(1);
    }

    /// True on frames where the noise sample is redrawn
    pub fn noise_due(&self) -> bool {
        self.noise_timer == 0
    }

    /// True on frames where the flicker overlay is applied
    pub fn flicker_due(&self) -> bool {
        self.flicker_timer == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_jitter_stays_in_range() {
        let config = CrtConfig {
            jitter_amplitude: 3,
            jitter_interval: 1,
            ..CrtConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(11);
        let mut timers = EffectTimers::new();
        let mut seen_nonzero = false;
        for _ in 0..500 {
            timers.advance(&config, &mut rng);
            assert!((-3..=3).contains(&timers.jitter_offset));
            seen_nonzero |= timers.jitter_offset != 0;
        }
        assert!(seen_nonzero);
    }

    #[test]
    fn test_jitter_only_rerolls_on_interval() {
        let config = CrtConfig {
            jitter_amplitude: 50,
            jitter_interval: 8,
            ..CrtConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        let mut timers = EffectTimers::new();
        for _ in 0..7 {
            timers.advance(&config, &mut rng);
            assert_eq!(timers.jitter_offset, 0);
        }
        timers.advance(&config, &mut rng);
        let rolled = timers.jitter_offset;
        for _ in 0..7 {
            timers.advance(&config, &mut rng);
            assert_eq!(timers.jitter_offset, rolled);
        }
    }

    #[test]
    fn test_scanline_wraps_with_overscan() {
        let config = CrtConfig {
            height: 100,
            scanline_speed: 7,
            ..CrtConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        let mut timers = EffectTimers::new();
        let mut prev = 0;
        let mut wrapped = false;
        for _ in 0..40 {
            timers.advance(&config, &mut rng);
            assert!(timers.scanline_y >= 0 && timers.scanline_y < 120);
            if timers.scanline_y < prev {
                wrapped = true;
            }
            prev = timers.scanline_y;
        }
        assert!(wrapped);
    }

    #[test]
    fn test_flicker_and_noise_cadence() {
        let config = CrtConfig::default();
        let mut rng = StdRng::seed_from_u64(0);
        let mut timers = EffectTimers::new();
        let mut flickers = Vec::new();
        let mut noise_frames = 0;
        for frame in 1..=240 {
            timers.advance(&config, &mut rng);
            if timers.flicker_due() {
                flickers.push(frame);
            }
            if timers.noise_due() {
                noise_frames += 1;
            }
        }
        assert_eq!(flickers, vec![120, 240]);
        assert_eq!(noise_frames, 80);
    }
}
