//! Frame sink trait
//!
//! Defines the interface a refresh task uses to push frames out.

/// Consumer of complete frames
///
/// Implementations transmit the frame and block until it has left the
/// device. There is no error path: transports that can fail treat failure
/// as fatal.
pub trait FrameSink {
    /// Transmit one complete frame
    ///
    /// `frame` is a full transmission buffer: the data-stream control byte
    /// followed by every pixel byte of the surface.
    fn flush(&mut self, frame: &[u8]);
}

impl<T: FrameSink + ?Sized> FrameSink for &mut T {
    fn flush(&mut self, frame: &[u8]) {
        (**self).flush(frame)
    }
}
