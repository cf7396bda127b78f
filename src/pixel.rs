//! Pixel element traits.
//!
//! [`Channel`] describes a single sample (byte width, numeric class, and a
//! native-endian byte codec); [`Pixel`] describes an interleaved pixel
//! element built from one or more channels. The codec layer queries these
//! to pick an output container type; [`crate::Image`] uses them for row and
//! pixel addressing.

use rgb::alt::{BGRA, GrayAlpha};
use rgb::{Gray, Rgb, Rgba};

/// A single channel sample within a pixel.
pub trait Channel: Copy + PartialEq {
    /// Byte size of one sample.
    const BYTES: usize;
    /// Whether the sample is a floating-point value.
    const IS_FLOAT: bool;
    /// Whether the sample is an integer value.
    const IS_INTEGRAL: bool;
    /// Whether the sample is an unsigned integer value.
    const IS_UNSIGNED: bool;

    /// Write the sample into `out[..Self::BYTES]` in native byte order.
    fn write_ne(self, out: &mut [u8]);

    /// Read a sample from `bytes[..Self::BYTES]` in native byte order.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is shorter than `Self::BYTES`.
    fn read_ne(bytes: &[u8]) -> Self;
}

macro_rules! impl_channel {
    ($t:ty, float: $f:literal, unsigned: $u:literal) => {
        impl Channel for $t {
            const BYTES: usize = core::mem::size_of::<$t>();
            const IS_FLOAT: bool = $f;
            const IS_INTEGRAL: bool = !$f;
            const IS_UNSIGNED: bool = $u;

            #[inline]
            fn write_ne(self, out: &mut [u8]) {
                out[..Self::BYTES].copy_from_slice(&self.to_ne_bytes());
            }

            #[inline]
            fn read_ne(bytes: &[u8]) -> Self {
                let mut raw = [0u8; core::mem::size_of::<$t>()];
                raw.copy_from_slice(&bytes[..Self::BYTES]);
                Self::from_ne_bytes(raw)
            }
        }
    };
}

impl_channel!(u8, float: false, unsigned: true);
impl_channel!(i8, float: false, unsigned: false);
impl_channel!(u16, float: false, unsigned: true);
impl_channel!(i16, float: false, unsigned: false);
impl_channel!(u32, float: false, unsigned: true);
impl_channel!(i32, float: false, unsigned: false);
impl_channel!(f32, float: true, unsigned: false);
impl_channel!(f64, float: true, unsigned: false);

/// A fixed-size interleaved pixel element.
///
/// Channel count and byte width are compile-time constants of the type, so
/// the container's stride arithmetic never depends on runtime metadata.
pub trait Pixel: Copy {
    /// The channel sample type.
    type Channel: Channel;
    /// Number of channels.
    const CHANNELS: usize;
    /// Total byte size of one pixel.
    const BYTES: usize;

    /// Write the pixel into `out[..Self::BYTES]`.
    fn write_bytes(self, out: &mut [u8]);

    /// Read a pixel from `bytes[..Self::BYTES]`.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is shorter than `Self::BYTES`.
    fn read_bytes(bytes: &[u8]) -> Self;
}

impl<C: Channel> Pixel for Gray<C> {
    type Channel = C;
    const CHANNELS: usize = 1;
    const BYTES: usize = C::BYTES;

    #[inline]
    fn write_bytes(self, out: &mut [u8]) {
        self.0.write_ne(out);
    }

    #[inline]
    fn read_bytes(bytes: &[u8]) -> Self {
        Gray(C::read_ne(bytes))
    }
}

impl<C: Channel> Pixel for GrayAlpha<C> {
    type Channel = C;
    const CHANNELS: usize = 2;
    const BYTES: usize = 2 * C::BYTES;

    #[inline]
    fn write_bytes(self, out: &mut [u8]) {
        self.0.write_ne(out);
        self.1.write_ne(&mut out[C::BYTES..]);
    }

    #[inline]
    fn read_bytes(bytes: &[u8]) -> Self {
        GrayAlpha(C::read_ne(bytes), C::read_ne(&bytes[C::BYTES..]))
    }
}

impl<C: Channel> Pixel for Rgb<C> {
    type Channel = C;
    const CHANNELS: usize = 3;
    const BYTES: usize = 3 * C::BYTES;

    #[inline]
    fn write_bytes(self, out: &mut [u8]) {
        self.r.write_ne(out);
        self.g.write_ne(&mut out[C::BYTES..]);
        self.b.write_ne(&mut out[2 * C::BYTES..]);
    }

    #[inline]
    fn read_bytes(bytes: &[u8]) -> Self {
        Rgb {
            r: C::read_ne(bytes),
            g: C::read_ne(&bytes[C::BYTES..]),
            b: C::read_ne(&bytes[2 * C::BYTES..]),
        }
    }
}

impl<C: Channel> Pixel for Rgba<C> {
    type Channel = C;
    const CHANNELS: usize = 4;
    const BYTES: usize = 4 * C::BYTES;

    #[inline]
    fn write_bytes(self, out: &mut [u8]) {
        self.r.write_ne(out);
        self.g.write_ne(&mut out[C::BYTES..]);
        self.b.write_ne(&mut out[2 * C::BYTES..]);
        self.a.write_ne(&mut out[3 * C::BYTES..]);
    }

    #[inline]
    fn read_bytes(bytes: &[u8]) -> Self {
        Rgba {
            r: C::read_ne(bytes),
            g: C::read_ne(&bytes[C::BYTES..]),
            b: C::read_ne(&bytes[2 * C::BYTES..]),
            a: C::read_ne(&bytes[3 * C::BYTES..]),
        }
    }
}

impl<C: Channel> Pixel for BGRA<C> {
    type Channel = C;
    const CHANNELS: usize = 4;
    const BYTES: usize = 4 * C::BYTES;

    #[inline]
    fn write_bytes(self, out: &mut [u8]) {
        self.b.write_ne(out);
        self.g.write_ne(&mut out[C::BYTES..]);
        self.r.write_ne(&mut out[2 * C::BYTES..]);
        self.a.write_ne(&mut out[3 * C::BYTES..]);
    }

    #[inline]
    fn read_bytes(bytes: &[u8]) -> Self {
        BGRA {
            b: C::read_ne(bytes),
            g: C::read_ne(&bytes[C::BYTES..]),
            r: C::read_ne(&bytes[2 * C::BYTES..]),
            a: C::read_ne(&bytes[3 * C::BYTES..]),
        }
    }
}
