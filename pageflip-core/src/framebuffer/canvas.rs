//! Drawing handle
//!
//! A [`Canvas`] owns the back transmission buffer. Every drawing
//! operation writes into it without locking; only
//! [`Canvas::swap_and_signal`] touches shared state.

use core::convert::Infallible;
use core::ops::Range;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::{DrawTarget, OriginDimensions, Pixel, Point, Size};

use super::buffer::TxBuffer;
use super::engine::Engine;
use super::surface::Surface;
use super::EngineError;
use crate::font::Font;

/// Drawing API over the back buffer
pub struct Canvas<'a, M: RawMutex> {
    engine: &'a Engine<M>,
    back: TxBuffer,
    font: &'a Font<'a>,
    cursor: Point,
    blank_on_draw: bool,
}

impl<'a, M: RawMutex> Canvas<'a, M> {
    pub(crate) fn new(engine: &'a Engine<M>, back: TxBuffer, font: &'a Font<'a>) -> Self {
        Self {
            engine,
            back,
            font,
            cursor: Point::zero(),
            blank_on_draw: engine.config().blank_on_draw,
        }
    }

    /// Surface dimensions
    pub fn surface(&self) -> Surface {
        self.engine.surface()
    }

    /// Set or clear one pixel; off-surface coordinates are ignored
    pub fn set_pixel(&mut self, x: i32, y: i32, lit: bool) {
        if let Some((index, mask)) = self.engine.surface().locate(x, y) {
            let pixels = self.back.pixels_mut();
            if lit {
                pixels[index] |= mask;
            } else {
                pixels[index] &= !mask;
            }
        }
    }

    /// Read one pixel; off-surface coordinates read as unlit
    pub fn get_pixel(&self, x: i32, y: i32) -> bool {
        match self.engine.surface().locate(x, y) {
            Some((index, mask)) => self.back.pixels()[index] & mask != 0,
            None => false,
        }
    }

    /// Fill the `w` by `h` rectangle at (x, y), clipped to the surface
    pub fn draw_rect(&mut self, x: i32, y: i32, w: u32, h: u32, lit: bool) {
        let surface = self.engine.surface();
        let columns = clip(x, w, surface.width());
        for row in clip(y, h, surface.height()) {
            for column in columns.clone() {
                self.set_pixel(column, row, lit);
            }
        }
    }

    /// Overwrite the whole back buffer with a packed image
    pub fn draw_image(&mut self, image: &[u8]) -> Result<(), EngineError> {
        let pixels = self.back.pixels_mut();
        if image.len() != pixels.len() {
            return Err(EngineError::ImageSize {
                expected: pixels.len(),
                actual: image.len(),
            });
        }
        pixels.copy_from_slice(image);
        Ok(())
    }

    /// Rasterize one glyph with its origin at (x, y)
    ///
    /// Only sets pixels. Codes outside the font draw nothing.
    pub fn draw_char(&mut self, x: i32, y: i32, code: u8) {
        let font = self.font;
        let Some(glyph) = font.glyph(code) else {
            return;
        };
        let left = x as i64 + glyph.x_offset as i64;
        let top = y as i64 + glyph.y_offset as i64;
        for (dx, dy) in font.pixels(glyph) {
            // Pixels beyond the i32 range are off-surface anyway
            let (Ok(px), Ok(py)) = (
                i32::try_from(left + dx as i64),
                i32::try_from(top + dy as i64),
            ) else {
                continue;
            };
            self.set_pixel(px, py, true);
        }
    }

    /// Lay out `text` at the cursor, returning the number of bytes consumed
    ///
    /// `\n` moves to the start of the next line and `\r` is ignored.
    /// Codes outside the font are skipped without moving the cursor.
    pub fn write(&mut self, text: &[u8]) -> usize {
        for &code in text {
            self.write_byte(code);
        }
        text.len()
    }

    fn write_byte(&mut self, code: u8) {
        match code {
            b'\n' => {
                self.cursor.x = 0;
                self.cursor.y = self.cursor.y.saturating_add(self.font.y_advance as i32);
            }
            b'\r' => {}
            _ => {
                if let Some(glyph) = self.font.glyph(code) {
                    if glyph.width > 0 && glyph.height > 0 {
                        self.draw_char(self.cursor.x, self.cursor.y, code);
                    }
                    self.cursor.x = self.cursor.x.saturating_add(glyph.x_advance as i32);
                }
            }
        }
    }

    /// Move the text cursor
    pub fn set_cursor(&mut self, x: i32, y: i32) {
        self.cursor = Point::new(x, y);
    }

    /// Text cursor
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Replace the font used by text operations
    pub fn set_font(&mut self, font: &'a Font<'a>) {
        self.font = font;
    }

    /// Zero the back buffer
    pub fn clear(&mut self) {
        self.back.clear();
    }

    /// Whether each swap blanks the new back buffer
    pub fn set_blank_on_draw(&mut self, blank: bool) {
        self.blank_on_draw = blank;
    }

    /// The buffer currently in the back role
    pub fn back_buffer(&self) -> &TxBuffer {
        &self.back
    }

    /// Publish the drawn frame and wake the refresh task
    ///
    /// Under the engine mutex the back buffer is exchanged with the front
    /// buffer and the role index toggled; with blank-on-draw the new back
    /// buffer is zeroed before the mutex is released. Wakes coalesce: a
    /// burst of swaps before the task runs yields a single flush of the
    /// latest frame.
    pub async fn swap_and_signal(&mut self) {
        {
            let mut front = self.engine.front.lock().await;
            let front = &mut *front;
            core::mem::swap(&mut front.buffer, &mut self.back);
            front.role.toggle();
            if self.blank_on_draw {
                self.back.clear();
            }

            #[cfg(feature = "defmt")]
            defmt::trace!("Canvas: slot {} is front", front.role.front());
        }
        self.engine.wake.signal(());
    }

    /// Resume the refresh task
    pub fn start(&self) {
        self.engine.start();
    }

    /// Suspend the refresh task
    pub fn stop(&self) {
        self.engine.stop();
    }
}

impl<M: RawMutex> Drop for Canvas<'_, M> {
    fn drop(&mut self) {
        let back = core::mem::replace(&mut self.back, TxBuffer::placeholder());
        self.engine.park(back);
    }
}

impl<M: RawMutex> core::fmt::Write for Canvas<'_, M> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.write(s.as_bytes());
        Ok(())
    }
}

impl<M: RawMutex> OriginDimensions for Canvas<'_, M> {
    fn size(&self) -> Size {
        let surface = self.engine.surface();
        Size::new(surface.width() as u32, surface.height() as u32)
    }
}

impl<M: RawMutex> DrawTarget for Canvas<'_, M> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.is_on());
        }
        Ok(())
    }
}

/// On-surface part of `start..start + extent`
fn clip(start: i32, extent: u32, limit: u16) -> Range<i32> {
    let end = (start as i64 + extent as i64).min(limit as i64);
    start.max(0)..end as i32
}
