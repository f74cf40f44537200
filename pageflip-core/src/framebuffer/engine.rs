//! Shared engine state
//!
//! The engine owns what both sides of the pipeline touch: the front
//! buffer with the role index, the wake signal, and the running gate.
//! The back buffer is parked here only while no canvas holds it.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex as BlockingMutex;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;
use pageflip_display::FrameSink;
use portable_atomic::{AtomicBool, Ordering};

use super::buffer::{RoleIndex, TxBuffer};
use super::canvas::Canvas;
use super::refresh::Refresher;
use super::surface::Surface;
use super::EngineError;
use crate::config::EngineConfig;
use crate::font::Font;

/// Front buffer and the index naming its slot, guarded together
pub(crate) struct Front {
    pub(crate) buffer: TxBuffer,
    pub(crate) role: RoleIndex,
}

/// Double-buffered frame engine
pub struct Engine<M: RawMutex> {
    surface: Surface,
    config: EngineConfig,
    pub(crate) front: Mutex<M, Front>,
    spare: BlockingMutex<M, RefCell<Option<TxBuffer>>>,
    pub(crate) wake: Signal<M, ()>,
    pub(crate) resume: Signal<M, ()>,
    pub(crate) running: AtomicBool,
}

impl<M: RawMutex> Engine<M> {
    /// Allocate both transmission buffers for `surface`
    ///
    /// Buffer 0 starts in the front role. The refresh task starts out
    /// running.
    pub fn new(surface: Surface, config: EngineConfig) -> Self {
        let role = RoleIndex::new();
        let front = TxBuffer::new(surface.pixel_bytes(), role.front());
        let back = TxBuffer::new(surface.pixel_bytes(), role.back());

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "Engine: {}x{} surface, {} bytes per frame",
            surface.width(),
            surface.height(),
            surface.tx_bytes()
        );

        Self {
            surface,
            config,
            front: Mutex::new(Front {
                buffer: front,
                role,
            }),
            spare: BlockingMutex::new(RefCell::new(Some(back))),
            wake: Signal::new(),
            resume: Signal::new(),
            running: AtomicBool::new(true),
        }
    }

    /// Surface dimensions
    pub fn surface(&self) -> Surface {
        self.surface
    }

    /// Engine settings
    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// Hand out the drawing handle, which owns the back buffer
    ///
    /// Only one canvas exists at a time; dropping it returns the back
    /// buffer so another can be created.
    pub fn canvas<'a>(&'a self, font: &'a Font<'a>) -> Result<Canvas<'a, M>, EngineError> {
        let back = self
            .spare
            .lock(|spare| spare.borrow_mut().take())
            .ok_or(EngineError::CanvasInUse)?;
        Ok(Canvas::new(self, back, font))
    }

    pub(crate) fn park(&self, back: TxBuffer) {
        self.spare.lock(|spare| *spare.borrow_mut() = Some(back));
    }

    /// Build the refresh task pushing front buffers into `sink`
    pub fn refresher<S: FrameSink>(&self, sink: S) -> Refresher<'_, M, S> {
        Refresher::new(self, sink)
    }

    /// Resume the refresh task
    ///
    /// A wake that arrived while stopped is processed right away.
    pub fn start(&self) {
        self.running.store(true, Ordering::Release);
        self.resume.signal(());

        #[cfg(feature = "defmt")]
        defmt::debug!("Engine: refresh started");
    }

    /// Suspend the refresh task
    ///
    /// A flush already on the bus completes; later wakes are held until
    /// [`start`](Self::start).
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
        self.resume.reset();

        #[cfg(feature = "defmt")]
        defmt::debug!("Engine: refresh stopped");
    }

    /// Whether the refresh task processes wakes
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Current role index
    pub async fn role(&self) -> RoleIndex {
        self.front.lock().await.role
    }

    /// Whether a swap is waiting for the refresh task
    pub fn flush_pending(&self) -> bool {
        self.wake.signaled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::DIGITS_3X5;
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

    fn engine() -> Engine<CriticalSectionRawMutex> {
        Engine::new(Surface::new(128, 32).unwrap(), EngineConfig::default())
    }

    #[test]
    fn test_initial_roles() {
        let engine = engine();
        let role = block_on(engine.role());
        assert_eq!((role.front(), role.back()), (0, 1));
        assert!(engine.is_running());
        assert!(!engine.flush_pending());
    }

    #[test]
    fn test_single_canvas() {
        let engine = engine();
        let canvas = engine.canvas(&DIGITS_3X5).unwrap();
        assert_eq!(
            engine.canvas(&DIGITS_3X5).err(),
            Some(EngineError::CanvasInUse)
        );

        drop(canvas);
        assert!(engine.canvas(&DIGITS_3X5).is_ok());
    }

    #[test]
    fn test_canvas_returns_drawn_buffer() {
        let engine = engine();
        let mut canvas = engine.canvas(&DIGITS_3X5).unwrap();
        canvas.set_pixel(3, 4, true);
        drop(canvas);

        let canvas = engine.canvas(&DIGITS_3X5).unwrap();
        assert!(canvas.get_pixel(3, 4));
    }

    #[test]
    fn test_start_stop() {
        let engine = engine();
        engine.stop();
        assert!(!engine.is_running());
        engine.start();
        assert!(engine.is_running());
    }
}
