use crate::error::BitmapError;

/// Channel layout of a raw camera frame.
///
/// Discriminants match the numeric color codes used by camera frame
/// descriptors (see [`ChannelLayout::from_code`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelLayout {
    /// Single channel, 8-bit grayscale.
    Mono8,
    /// Single channel, 16-bit grayscale. Accepted as a frame layout but
    /// not encodable as BMP.
    Mono16,
    /// 3 channels, 8-bit, B,G,R byte order.
    Bgr24,
    /// 3 channels, 8-bit, R,G,B byte order.
    Rgb24,
}

impl ChannelLayout {
    /// Map a legacy color code (1, 2, 4, 8) to a layout.
    pub fn from_code(code: u32) -> Result<Self, BitmapError> {
        match code {
            1 => Ok(Self::Mono8),
            2 => Ok(Self::Mono16),
            4 => Ok(Self::Bgr24),
            8 => Ok(Self::Rgb24),
            other => Err(BitmapError::UnknownLayoutCode(other)),
        }
    }

    /// The legacy color code for this layout.
    pub fn code(&self) -> u32 {
        match self {
            Self::Mono8 => 1,
            Self::Mono16 => 2,
            Self::Bgr24 => 4,
            Self::Rgb24 => 8,
        }
    }

    /// Number of channels.
    pub fn channels(&self) -> usize {
        match self {
            Self::Mono8 | Self::Mono16 => 1,
            Self::Bgr24 | Self::Rgb24 => 3,
        }
    }

    /// Bytes per pixel in the source buffer.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Mono8 => 1,
            Self::Mono16 => 2,
            Self::Bgr24 | Self::Rgb24 => 3,
        }
    }

    /// Channel count used for BMP storage, or `None` if the layout has no
    /// 8-bit-per-channel BMP representation.
    pub fn bmp_channels(&self) -> Option<usize> {
        match self {
            Self::Mono8 => Some(1),
            Self::Bgr24 | Self::Rgb24 => Some(3),
            Self::Mono16 => None,
        }
    }
}

impl TryFrom<u32> for ChannelLayout {
    type Error = BitmapError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}
