//! Frame pacing.
//!
//! The simulation advances by a fixed nominal tick per frame, so wall-clock
//! time is used only to cap how often frames start and to measure the
//! achieved frame rate.
//!
//! # Example
//!
//! ```ignore
//! use halvorsen::time::FramePacer;
//!
//! let mut pacer = FramePacer::new(60);
//!
//! // About to wait:
//! if pacer.poll(Instant::now()) {
//!     window.request_redraw();
//! }
//! match pacer.wake_time(Instant::now()) {
//!     Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
//!     None => event_loop.set_control_flow(ControlFlow::Wait),
//! }
//!
//! // On RedrawRequested:
//! pacer.redraw_delivered();
//! if pacer.is_due(Instant::now()) {
//!     pacer.begin_frame(Instant::now());
//!     // update + draw
//! }
//! ```

use std::time::{Duration, Instant};

/// Caps the frame rate and tracks frame statistics.
#[derive(Debug)]
pub struct FramePacer {
    /// Minimum spacing between frame starts.
    frame_duration: Duration,
    /// Earliest instant the next frame may start.
    next_frame: Instant,
    /// A redraw was requested and has not arrived yet.
    redraw_pending: bool,
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
}

impl FramePacer {
    /// Pacer for `target_fps` frames per second, starting now.
    pub fn new(target_fps: u32) -> Self {
        Self::starting_at(target_fps, Instant::now())
    }

    /// Pacer whose first frame is due at `start`.
    pub fn starting_at(target_fps: u32, start: Instant) -> Self {
        let target_fps = target_fps.max(1);
        Self {
            frame_duration: Duration::from_secs(1) / target_fps,
            next_frame: start,
            redraw_pending: false,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: start,
            fps_update_interval: Duration::from_secs(1),
        }
    }

    /// Whether the next frame may start at `now`.
    #[inline]
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_frame
    }

    /// When the next frame may start.
    #[inline]
    pub fn deadline(&self) -> Instant {
        self.next_frame
    }

    /// Whether the caller should request a redraw at `now`.
    ///
    /// Returns `true` at most once per due frame; further calls return
    /// `false` until [`redraw_delivered`](Self::redraw_delivered) is called.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.is_due(now) && !self.redraw_pending {
            self.redraw_pending = true;
            true
        } else {
            false
        }
    }

    /// Record that the platform delivered a redraw.
    #[inline]
    pub fn redraw_delivered(&mut self) {
        self.redraw_pending = false;
    }

    /// When the event loop should wake up next.
    ///
    /// `None` means a due frame is waiting on a redraw the platform has not
    /// delivered yet (minimised or occluded window); sleep until the next
    /// event instead of waking on a deadline that has already passed.
    pub fn wake_time(&self, now: Instant) -> Option<Instant> {
        if self.redraw_pending && self.is_due(now) {
            None
        } else {
            Some(self.next_frame)
        }
    }

    /// Record that a frame started at `now` and schedule the next one.
    ///
    /// The schedule advances by one frame duration from the previous
    /// deadline so wake-up latency does not accumulate. A frame that starts
    /// late pushes the deadline to `now` instead of queueing catch-up frames.
    ///
    /// Returns `true` when the FPS estimate was refreshed.
    pub fn begin_frame(&mut self, now: Instant) -> bool {
        self.frame_count += 1;
        self.redraw_pending = false;

        let next = self.next_frame + self.frame_duration;
        self.next_frame = if next < now { now } else { next };

        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
            true
        } else {
            false
        }
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Measured frames per second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Minimum spacing between frames.
    #[inline]
    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }
}
