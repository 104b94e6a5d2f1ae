//! Frame cycling for animated sprites

/// Default ticks between frame flips
pub const DEFAULT_FRAME_SPEED: u32 = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteAnimator {
    frame_index: usize,
    frame_timer: u32,
    frame_speed: u32,
    frame_count: usize,
}

impl SpriteAnimator {
    pub fn new(frame_count: usize, frame_speed: u32) -> Self {
        Self {
            frame_index: 0,
            frame_timer: 0,
            frame_speed: frame_speed.max(1),
            frame_count,
        }
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn frame_speed(&self) -> u32 {
        self.frame_speed
    }

    /// Restart from the first frame (sprite changed)
    pub fn reset(&mut self, frame_count: usize) {
        self.frame_index = 0;
        self.frame_timer = 0;
        self.frame_count = frame_count;
    }

    /// Advance one tick; single-frame sprites never move
    pub fn update(&mut self) {
        self.frame_timer += 1;
        if self.frame_timer >= self.frame_speed {
            self.frame_timer = 0;
            if self.frame_count > 1 {
                self.frame_index = (self.frame_index + 1) % self.frame_count;
            }
        }
    }
}

impl Default for SpriteAnimator {
    fn default() -> Self {
        Self::new(1, DEFAULT_FRAME_SPEED)
    }
}
