//! The per-frame loop that drives a field.
//!
//! A [`Driver`] turns host signals into field calls: every display refresh
//! becomes one [`Driver::tick`] (clear, step, draw), pointer moves become
//! [`Driver::set_pointer`], size changes become [`Driver::resize`]. How ticks
//! get scheduled is the host's business, expressed through
//! [`FrameScheduler`].

use crate::field::Field;
use crate::prng::{RandomSource, Xorshift64};
use crate::render::{self, RasterSurface};

/// Host capability: run a callback before the next repaint.
///
/// Browsers implement this with `requestAnimationFrame`. The handle lets a
/// stopped driver cancel the frame it already asked for.
pub trait FrameScheduler {
    type Handle;

    fn request_frame(&mut self) -> Self::Handle;

    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// Owns a field and decides whether frames still run.
#[derive(Debug, Clone)]
pub struct Driver<R = Xorshift64> {
    field: Field<R>,
    running: bool,
    frames: u64,
}

impl<R: RandomSource> Driver<R> {
    /// Wraps `field`; the driver starts in the running state.
    pub fn new(field: Field<R>) -> Self {
        Self {
            field,
            running: true,
            frames: 0,
        }
    }

    /// Runs one frame: clear the surface, step the field, draw it.
    ///
    /// Returns `false` without touching anything once stopped.
    pub fn tick<S: RasterSurface + ?Sized>(&mut self, surface: &mut S) -> bool {
        if !self.running {
            return false;
        }
        surface.clear();
        self.field.step();
        render::draw(&self.field, surface);
        self.frames += 1;
        log::trace!("frame {} drew {} particles", self.frames, self.field.len());
        true
    }

    /// Forwards a pointer sample. Applies even while stopped.
    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.field.set_pointer(x, y);
    }

    /// Forwards a drawable-area change, reseeding the field.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.field.resize(width, height);
    }

    /// Cancels future ticks. Field state is left as it is.
    pub fn stop(&mut self) {
        if self.running {
            log::debug!("driver stopped after {} frames", self.frames);
        }
        self.running = false;
    }

    /// Asks `scheduler` for the next frame, unless stopped.
    pub fn schedule<F: FrameScheduler>(&self, scheduler: &mut F) -> Option<F::Handle> {
        self.running.then(|| scheduler.request_frame())
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn field(&self) -> &Field<R> {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut Field<R> {
        &mut self.field
    }

    pub fn into_field(self) -> Field<R> {
        self.field
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Palette;
    use crate::render::RecordingSurface;
    use glam::DVec2;

    #[derive(Default)]
    struct CountingScheduler {
        next: u32,
        cancelled: Vec<u32>,
    }

    impl FrameScheduler for CountingScheduler {
        type Handle = u32;

        fn request_frame(&mut self) -> u32 {
            self.next += 1;
            self.next
        }

        fn cancel_frame(&mut self, handle: u32) {
            self.cancelled.push(handle);
        }
    }

    fn driver() -> Driver {
        Driver::new(Field::new(1000.0, 1000.0, Palette::hero()))
    }

    #[test]
    fn tick_clears_steps_and_draws() {
        let mut d = driver();
        let mut surface = RecordingSurface::new();
        let before = d.field().particles().to_vec();
        assert!(d.tick(&mut surface));
        assert_eq!(surface.clears(), 1);
        assert_eq!(surface.commands().len(), 67);
        assert_ne!(d.field().particles(), before.as_slice());
        // Commands reflect post-step positions.
        assert_eq!(surface.commands()[0].center, d.field().particles()[0].position());
        assert_eq!(d.frames(), 1);
    }

    #[test]
    fn each_tick_replaces_the_previous_frame() {
        let mut d = driver();
        let mut surface = RecordingSurface::new();
        for _ in 0..5 {
            d.tick(&mut surface);
        }
        assert_eq!(surface.commands().len(), 67);
        assert_eq!(surface.clears(), 5);
    }

    #[test]
    fn stop_cancels_ticks_but_keeps_field_state() {
        let mut d = driver();
        let mut surface = RecordingSurface::new();
        d.tick(&mut surface);
        d.stop();
        let frozen = d.field().particles().to_vec();
        assert!(!d.tick(&mut surface));
        assert!(!d.is_running());
        assert_eq!(d.frames(), 1);
        assert_eq!(d.field().particles(), frozen.as_slice());
        assert_eq!(surface.clears(), 1);
    }

    #[test]
    fn pointer_written_between_ticks_is_seen_by_next_step() {
        let mut d = driver();
        d.set_pointer(100.0, 100.0);
        d.set_pointer(500.0, 500.0);
        d.tick(&mut RecordingSurface::new());
        assert_eq!(d.field().pointer(), DVec2::new(500.0, 500.0));
    }

    #[test]
    fn resize_reseeds_field() {
        let mut d = driver();
        d.resize(300.0, 300.0);
        assert_eq!(d.field().len(), 6);
    }

    #[test]
    fn schedule_requests_frames_only_while_running() {
        let mut d = driver();
        let mut scheduler = CountingScheduler::default();
        assert_eq!(d.schedule(&mut scheduler), Some(1));
        d.stop();
        assert_eq!(d.schedule(&mut scheduler), None);
        scheduler.cancel_frame(1);
        assert_eq!(scheduler.cancelled, vec![1]);
    }

    #[test]
    fn tick_works_through_trait_object_surface() {
        let mut d = driver();
        let mut recording = RecordingSurface::new();
        let surface: &mut dyn RasterSurface = &mut recording;
        assert!(d.tick(surface));
        assert_eq!(recording.commands().len(), 67);
    }
}
