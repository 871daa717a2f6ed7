//! Host-side frame clock.
//!
//! The scene never reads the wall clock; the host decides what `dt` each
//! tick gets. [`FrameClock`] is the host's helper for that: a fixed step by
//! default (deterministic), or measured frame time when no fixed step is set.
//!
//! # Example
//!
//! ```ignore
//! use moonlattice::time::FrameClock;
//!
//! let mut clock = FrameClock::fixed(1.0 / 60.0);
//!
//! // In the host loop:
//! let dt = clock.update();
//! scene.tick(dt);
//!
//! println!("Frame: {}", clock.frame());
//! println!("FPS: {:.1}", clock.fps());
//! ```

use std::time::{Duration, Instant};

/// Default tick length: 60 frames per second.
pub const DEFAULT_DELTA: f32 = 1.0 / 60.0;

/// Produces per-tick `dt` values for a scene.
#[derive(Debug)]
pub struct FrameClock {
    /// When the last frame occurred.
    last_frame: Instant,
    /// Sum of all deltas handed out, in seconds.
    elapsed_secs: f32,
    /// Delta handed out by the last update.
    delta_secs: f32,
    /// Total frames since start.
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    /// Frame count at last FPS update.
    fps_frame_count: u64,
    /// Time of last FPS calculation.
    fps_update_time: Instant,
    /// How often to update FPS calculation.
    fps_update_interval: Duration,
    /// Whether time is paused.
    paused: bool,
    /// Fixed delta; `None` means measured wall-clock time.
    fixed_delta: Option<f32>,
    /// Time scale multiplier (1.0 = normal speed).
    time_scale: f32,
}

impl FrameClock {
    /// Clock handing out a fixed `delta` every frame.
    pub fn fixed(delta: f32) -> Self {
        let mut clock = Self::measured();
        clock.set_fixed_delta(Some(delta));
        clock
    }

    /// Clock measuring real time between frames.
    pub fn measured() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
            paused: false,
            fixed_delta: None,
            time_scale: 1.0,
        }
    }

    /// Advance one frame and return the `dt` to tick the scene with.
    ///
    /// Returns 0 while paused.
    pub fn update(&mut self) -> f32 {
        let now = Instant::now();

        if self.paused {
            self.delta_secs = 0.0;
            self.last_frame = now;
            return 0.0;
        }

        let raw_delta = now.duration_since(self.last_frame).as_secs_f32();
        self.delta_secs = self.fixed_delta.unwrap_or(raw_delta) * self.time_scale;
        self.last_frame = now;
        self.elapsed_secs += self.delta_secs;
        self.frame_count += 1;

        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        self.delta_secs
    }

    /// Simulated seconds handed out so far.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// `dt` of the last update.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Measured frames per wall-clock second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.last_frame = Instant::now();
            self.paused = false;
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Set a fixed delta, or `None` to measure real frame time.
    ///
    /// Non-finite or negative deltas are ignored.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        match delta {
            Some(d) if !(d.is_finite() && d >= 0.0) => {}
            _ => self.fixed_delta = delta,
        }
    }

    /// Set time scale multiplier. Negative values clamp to 0.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::fixed(DEFAULT_DELTA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clock_new() {
        let clock = FrameClock::default();
        assert_eq!(clock.frame(), 0);
        assert!(!clock.is_paused());
        assert_eq!(clock.time_scale(), 1.0);
    }

    #[test]
    fn test_fixed_delta_ignores_wall_clock() {
        let mut clock = FrameClock::fixed(1.0 / 30.0);
        thread::sleep(Duration::from_millis(20));
        let dt = clock.update();
        assert!((dt - 1.0 / 30.0).abs() < 1e-6);
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn test_measured_delta() {
        let mut clock = FrameClock::measured();
        thread::sleep(Duration::from_millis(10));
        assert!(clock.update() > 0.0);
    }

    #[test]
    fn test_pause() {
        let mut clock = FrameClock::default();
        clock.update();
        clock.pause();
        let elapsed_before = clock.elapsed();
        assert_eq!(clock.update(), 0.0);
        assert_eq!(clock.elapsed(), elapsed_before);
        assert_eq!(clock.frame(), 1);
        clock.toggle_pause();
        assert!(clock.update() > 0.0);
    }

    #[test]
    fn test_time_scale() {
        let mut clock = FrameClock::fixed(0.1);
        clock.set_time_scale(2.0);
        assert!((clock.update() - 0.2).abs() < 1e-6);

        clock.set_time_scale(-1.0);
        assert_eq!(clock.time_scale(), 0.0);
    }

    #[test]
    fn test_invalid_fixed_delta_ignored() {
        let mut clock = FrameClock::fixed(0.5);
        clock.set_fixed_delta(Some(f32::NAN));
        clock.set_fixed_delta(Some(-1.0));
        assert_eq!(clock.update(), 0.5);
    }
}
