//! RGB sample with a fixed position and a per-pixel maximum channel value.
//!
//! Channel writes never fail: values are clamped into `[0, max_val]`. Signed
//! inputs are accepted so that filter and transform results can be passed in
//! directly and clamped at the boundary.
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// One of the three color channels of a pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

impl TryFrom<usize> for Channel {
    type Error = Error;

    fn try_from(index: usize) -> Result<Self> {
        Channel::ALL
            .get(index)
            .copied()
            .ok_or_else(|| Error::invalid_argument(format!("unknown channel index {index}")))
    }
}

impl FromStr for Channel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "r" | "red" => Ok(Channel::Red),
            "g" | "green" => Ok(Channel::Green),
            "b" | "blue" => Ok(Channel::Blue),
            other => Err(Error::invalid_argument(format!(
                "unknown color channel {other:?}"
            ))),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        };
        f.write_str(name)
    }
}

/// Column (`x`) and row (`y`) of a pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance; exact for every grid position.
    #[inline]
    pub fn distance_sq(self, other: Position) -> u64 {
        let dx = self.x.abs_diff(other.x) as u64;
        let dy = self.y.abs_diff(other.y) as u64;
        dx * dx + dy * dy
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pixel {
    position: Position,
    max_val: u32,
    channels: [u32; 3],
}

impl Pixel {
    /// Build a pixel, clamping each channel into `[0, max_val]`.
    pub fn new(position: Position, max_val: u32, red: i64, green: i64, blue: i64) -> Self {
        let mut px = Self {
            position,
            max_val,
            channels: [0; 3],
        };
        px.set_rgb([red, green, blue]);
        px
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    #[inline]
    pub fn max_val(&self) -> u32 {
        self.max_val
    }

    #[inline]
    pub fn channel(&self, channel: Channel) -> u32 {
        self.channels[channel.index()]
    }

    /// Channel values in red, green, blue order.
    #[inline]
    pub fn rgb(&self) -> [u32; 3] {
        self.channels
    }

    pub fn set_channel(&mut self, channel: Channel, value: i64) {
        self.channels[channel.index()] = self.clamp(value);
    }

    pub fn set_rgb(&mut self, rgb: [i64; 3]) {
        for channel in Channel::ALL {
            self.set_channel(channel, rgb[channel.index()]);
        }
    }

    /// Same color, different position.
    pub(crate) fn moved_to(self, position: Position) -> Self {
        Self { position, ..self }
    }

    #[inline]
    fn clamp(&self, value: i64) -> u32 {
        value.clamp(0, i64::from(self.max_val)) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_are_clamped_into_range() {
        let mut px = Pixel::new(Position::new(0, 0), 255, 10, 20, 30);
        px.set_channel(Channel::Red, -1);
        px.set_channel(Channel::Green, 256);
        px.set_channel(Channel::Blue, 128);
        assert_eq!(px.rgb(), [0, 255, 128]);
    }

    #[test]
    fn constructor_clamps_every_channel() {
        let px = Pixel::new(Position::new(3, 4), 16, -5, 17, 16);
        assert_eq!(px.rgb(), [0, 16, 16]);
        assert_eq!(px.position(), Position::new(3, 4));
    }

    #[test]
    fn zero_max_val_pins_channels_to_zero() {
        let px = Pixel::new(Position::default(), 0, 100, 1, 0);
        assert_eq!(px.rgb(), [0, 0, 0]);
    }

    #[test]
    fn channel_parsing_rejects_unknown_identifiers() {
        assert_eq!("Green".parse::<Channel>().unwrap(), Channel::Green);
        assert_eq!(Channel::try_from(2).unwrap(), Channel::Blue);
        assert!(matches!(
            "alpha".parse::<Channel>(),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(Channel::try_from(3), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn equality_includes_position() {
        let a = Pixel::new(Position::new(0, 0), 255, 1, 2, 3);
        let b = Pixel::new(Position::new(1, 0), 255, 1, 2, 3);
        assert_ne!(a, b);
        assert_eq!(a, a.moved_to(Position::new(0, 0)));
    }
}
