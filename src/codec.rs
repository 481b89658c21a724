//! Fixed-width, big-endian encoding of primitive numbers.
//!
//! Every value is written most-significant byte first with a width that never
//! depends on the host. Doubles travel as the raw bits of their IEEE-754
//! binary64 representation.

use thiserror::Error;

/// Errors that can occur while decoding a byte buffer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("read of {width} bytes at offset {index} exceeds buffer of {len} bytes")]
    OutOfRange { index: usize, width: usize, len: usize },
}

/// Result type for decode operations
pub type CodecResult<T> = Result<T, CodecError>;

// The level format stores doubles as exactly eight bytes.
const _: () = assert!(std::mem::size_of::<f64>() == 8);

/// A primitive that can be appended to and read back from a byte buffer.
pub trait Codec: Sized + Copy {
    /// Number of bytes occupied on the wire
    const WIDTH: usize;

    /// Append `WIDTH` bytes to `buffer`, most-significant first.
    fn serialize(self, buffer: &mut Vec<u8>);

    /// Read `WIDTH` bytes at `*index` and advance the index past them.
    ///
    /// The index is left untouched when the buffer is too short.
    fn deserialize(buffer: &[u8], index: &mut usize) -> CodecResult<Self>;
}

fn take<'a>(buffer: &'a [u8], index: &mut usize, width: usize) -> CodecResult<&'a [u8]> {
    let start = *index;
    let end = start
        .checked_add(width)
        .filter(|end| *end <= buffer.len())
        .ok_or(CodecError::OutOfRange {
            index: start,
            width,
            len: buffer.len(),
        })?;
    *index = end;
    Ok(&buffer[start..end])
}

macro_rules! impl_codec_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Codec for $ty {
                const WIDTH: usize = std::mem::size_of::<$ty>();

                fn serialize(self, buffer: &mut Vec<u8>) {
                    buffer.extend_from_slice(&self.to_be_bytes());
                }

                fn deserialize(buffer: &[u8], index: &mut usize) -> CodecResult<Self> {
                    let bytes = take(buffer, index, Self::WIDTH)?;
                    let mut raw = [0u8; std::mem::size_of::<$ty>()];
                    raw.copy_from_slice(bytes);
                    Ok(<$ty>::from_be_bytes(raw))
                }
            }
        )*
    };
}

impl_codec_int!(u16, i16, u32, i32, u64, i64);

impl Codec for f64 {
    const WIDTH: usize = 8;

    fn serialize(self, buffer: &mut Vec<u8>) {
        self.to_bits().serialize(buffer);
    }

    fn deserialize(buffer: &[u8], index: &mut usize) -> CodecResult<Self> {
        u64::deserialize(buffer, index).map(f64::from_bits)
    }
}

/// Append `value` to `buffer`
pub fn serialize<T: Codec>(value: T, buffer: &mut Vec<u8>) {
    value.serialize(buffer);
}

/// Read a `T` at `*index`, advancing the index on success
pub fn deserialize<T: Codec>(buffer: &[u8], index: &mut usize) -> CodecResult<T> {
    T::deserialize(buffer, index)
}

/// Returns true if the host double behaves as IEEE-754 binary64 with
/// infinity and quiet NaN support.
pub fn float_layout_supported() -> bool {
    std::mem::size_of::<f64>() == 8
        && f64::INFINITY.is_infinite()
        && f64::NAN.is_nan()
        && f64::from_bits(1.0f64.to_bits()) == 1.0
        && 1.0f64.to_bits() == 0x3FF0_0000_0000_0000
        && f64::MANTISSA_DIGITS == 53
}
