//! Refresh task
//!
//! Waits for a swap, then transmits the front buffer while holding the
//! engine mutex. The mutex is held for exactly one bus transfer.

use embassy_sync::blocking_mutex::raw::RawMutex;
use pageflip_display::FrameSink;
use portable_atomic::Ordering;

use super::engine::Engine;

/// Background task pushing front buffers to a [`FrameSink`]
pub struct Refresher<'a, M: RawMutex, S: FrameSink> {
    engine: &'a Engine<M>,
    sink: S,
    flushes: u32,
}

impl<'a, M: RawMutex, S: FrameSink> Refresher<'a, M, S> {
    pub(crate) fn new(engine: &'a Engine<M>, sink: S) -> Self {
        Self {
            engine,
            sink,
            flushes: 0,
        }
    }

    /// Wait for one wake and flush the front buffer
    ///
    /// While the engine is stopped the wake is held and the task parks
    /// until [`Engine::start`].
    pub async fn refresh_once(&mut self) {
        self.engine.wake.wait().await;
        while !self.engine.running.load(Ordering::Acquire) {
            self.engine.resume.wait().await;
        }

        let front = self.engine.front.lock().await;
        self.sink.flush(front.buffer.as_bytes());
        self.flushes = self.flushes.wrapping_add(1);

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "Refresher: flushed slot {} ({} total)",
            front.role.front(),
            self.flushes
        );
    }

    /// Refresh loop, never returns
    pub async fn run(&mut self) -> ! {
        loop {
            self.refresh_once().await;
        }
    }

    /// The sink frames are pushed into
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the sink
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Frames transmitted so far
    pub fn flushes(&self) -> u32 {
        self.flushes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::font::DIGITS_3X5;
    use crate::framebuffer::Surface;
    use core::pin::pin;
    use embassy_futures::{block_on, poll_once};
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

    #[derive(Default)]
    struct Recorder {
        frames: Vec<Vec<u8>>,
    }

    impl FrameSink for Recorder {
        fn flush(&mut self, frame: &[u8]) {
            self.frames.push(frame.to_vec());
        }
    }

    fn engine() -> Engine<CriticalSectionRawMutex> {
        Engine::new(Surface::new(16, 8).unwrap(), EngineConfig::default())
    }

    #[test]
    fn test_flush_sends_front_buffer() {
        let engine = engine();
        let mut canvas = engine.canvas(&DIGITS_3X5).unwrap();
        let mut refresher = engine.refresher(Recorder::default());

        canvas.set_pixel(0, 0, true);
        block_on(canvas.swap_and_signal());
        block_on(refresher.refresh_once());

        let frames = &refresher.sink().frames;
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].len(), 17);
        assert_eq!(frames[0][0], 0x40);
        assert_eq!(frames[0][1], 0x01);
        assert_eq!(refresher.flushes(), 1);
    }

    #[test]
    fn test_swaps_coalesce() {
        let engine = engine();
        let mut canvas = engine.canvas(&DIGITS_3X5).unwrap();
        let mut refresher = engine.refresher(Recorder::default());

        for frame in 1..=3u8 {
            canvas.draw_image(&[frame; 16]).unwrap();
            block_on(canvas.swap_and_signal());
        }
        block_on(refresher.refresh_once());

        assert!(!engine.flush_pending());
        assert_eq!(refresher.sink().frames.len(), 1);
        assert_eq!(refresher.sink().frames[0][1..], [3u8; 16]);

        let mut idle = pin!(refresher.refresh_once());
        assert!(poll_once(idle.as_mut()).is_pending());
    }

    #[test]
    fn test_frames_flush_in_order() {
        let engine = engine();
        let mut canvas = engine.canvas(&DIGITS_3X5).unwrap();
        let mut refresher = engine.refresher(Recorder::default());

        for frame in 1..=2u8 {
            canvas.draw_image(&[frame; 16]).unwrap();
            block_on(canvas.swap_and_signal());
            block_on(refresher.refresh_once());
        }

        let firsts: Vec<u8> = refresher.sink().frames.iter().map(|f| f[1]).collect();
        assert_eq!(firsts, vec![1, 2]);
    }

    #[test]
    fn test_stop_holds_wake_until_start() {
        let engine = engine();
        let mut canvas = engine.canvas(&DIGITS_3X5).unwrap();
        let mut refresher = engine.refresher(Recorder::default());

        engine.stop();
        canvas.draw_image(&[7; 16]).unwrap();
        block_on(canvas.swap_and_signal());

        {
            let mut pending = pin!(refresher.refresh_once());
            assert!(poll_once(pending.as_mut()).is_pending());
            assert!(poll_once(pending.as_mut()).is_pending());

            canvas.start();
            block_on(pending);
        }

        assert_eq!(refresher.sink().frames.len(), 1);
        assert_eq!(refresher.sink().frames[0][1..], [7u8; 16]);
    }

    #[test]
    fn test_stop_after_wake_parks_task() {
        let engine = engine();
        let mut canvas = engine.canvas(&DIGITS_3X5).unwrap();
        let mut refresher = engine.refresher(Recorder::default());

        block_on(canvas.swap_and_signal());
        canvas.stop();
        {
            let mut pending = pin!(refresher.refresh_once());
            assert!(poll_once(pending.as_mut()).is_pending());
        }
        assert!(refresher.sink().frames.is_empty());
    }

    #[test]
    fn test_concurrent_frames_never_tear() {
        const FRAMES: u8 = 200;

        let engine = engine();
        let mut canvas = engine.canvas(&DIGITS_3X5).unwrap();
        let mut refresher = engine.refresher(Recorder::default());

        std::thread::scope(|scope| {
            scope.spawn(|| {
                block_on(async {
                    loop {
                        refresher.refresh_once().await;
                        let last = refresher.sink().frames.last().map(|f| f[1]);
                        if last == Some(FRAMES) {
                            break;
                        }
                    }
                })
            });

            scope.spawn(move || {
                for frame in 1..=FRAMES {
                    for x in 0..16 {
                        canvas.draw_rect(x, 0, 1, 8, true);
                        if frame % 2 == 0 {
                            std::thread::yield_now();
                        }
                    }
                    canvas.draw_image(&[frame; 16]).unwrap();
                    block_on(canvas.swap_and_signal());
                }
            });
        });

        let frames = &refresher.sink().frames;
        assert!(!frames.is_empty());
        let mut previous = 0;
        for frame in frames {
            let value = frame[1];
            assert!(frame[1..].iter().all(|&b| b == value), "torn frame");
            assert!(value >= previous);
            previous = value;
        }
        assert_eq!(previous, FRAMES);
    }
}
