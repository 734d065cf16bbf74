//! Side, Align and Placement: where a floating panel attaches to its anchor.
//!
//! The compact string form follows the usual popover vocabulary: a side,
//! optionally followed by `-start` or `-end` (`"bottom"`, `"right-start"`).
//! A bare side means centred alignment.

use std::fmt;
use std::str::FromStr;

use crate::geometry::Axis;

/// Errors from parsing placement-related configuration strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown side '{0}' (expected top, bottom, left or right)")]
    UnknownSide(String),
    #[error("unknown alignment '{0}' (expected start, center or end)")]
    UnknownAlign(String),
    #[error("unknown positioning strategy '{0}' (expected fixed or absolute)")]
    UnknownStrategy(String),
    #[error("unknown scroll behavior '{0}' (expected reposition or close)")]
    UnknownScrollBehavior(String),
    #[error("invalid placement '{0}' (expected <side> or <side>-<start|end>)")]
    InvalidPlacement(String),
}

// ---------------------------------------------------------------------------
// Side
// ---------------------------------------------------------------------------

/// The edge of the reference element a floating panel is attached to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

impl Side {
    /// All four sides, in declaration order.
    pub const ALL: [Side; 4] = [Side::Top, Side::Bottom, Side::Left, Side::Right];

    /// The side across the reference element.
    #[inline]
    pub const fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// The main axis: the axis along which the panel moves away from its anchor.
    #[inline]
    pub const fn axis(self) -> Axis {
        match self {
            Side::Top | Side::Bottom => Axis::Vertical,
            Side::Left | Side::Right => Axis::Horizontal,
        }
    }

    /// The axis along which [`Align`] applies.
    #[inline]
    pub const fn cross_axis(self) -> Axis {
        self.axis().cross()
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Bottom => "bottom",
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(Side::Top),
            "bottom" => Ok(Side::Bottom),
            "left" => Ok(Side::Left),
            "right" => Ok(Side::Right),
            _ => Err(ParseError::UnknownSide(s.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// Align
// ---------------------------------------------------------------------------

/// Position of the panel along the cross axis of its side.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Align {
    /// Flush with the reference's start edge (left or top).
    Start,
    /// Centred on the reference's midpoint.
    #[default]
    Center,
    /// Flush with the reference's end edge (right or bottom).
    End,
}

impl Align {
    /// `Start <-> End`; `Center` is its own flip.
    #[inline]
    pub const fn flipped(self) -> Align {
        match self {
            Align::Start => Align::End,
            Align::Center => Align::Center,
            Align::End => Align::Start,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Align::Start => "start",
            Align::Center => "center",
            Align::End => "end",
        }
    }
}

impl fmt::Display for Align {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Align {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" => Ok(Align::Start),
            "center" | "centre" => Ok(Align::Center),
            "end" => Ok(Align::End),
            _ => Err(ParseError::UnknownAlign(s.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// Placement
// ---------------------------------------------------------------------------

/// A side and an alignment together.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Placement {
    pub side: Side,
    pub align: Align,
}

impl Placement {
    pub const fn new(side: Side, align: Align) -> Self {
        Self { side, align }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.align {
            Align::Center => write!(f, "{}", self.side),
            align => write!(f, "{}-{}", self.side, align),
        }
    }
}

impl FromStr for Placement {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (side, align) = match trimmed.split_once('-') {
            Some((side, align)) => (side, Some(align)),
            None => (trimmed, None),
        };
        let side = side
            .parse::<Side>()
            .map_err(|_| ParseError::InvalidPlacement(s.to_owned()))?;
        let align = match align {
            None => Align::Center,
            Some(a) => match a.parse::<Align>() {
                // "bottom-center" is accepted even though Display never emits it.
                Ok(align) => align,
                Err(_) => return Err(ParseError::InvalidPlacement(s.to_owned())),
            },
        };
        Ok(Placement { side, align })
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_opposite_is_involution() {
        for side in Side::ALL {
            assert_eq!(side.opposite().opposite(), side);
            assert_ne!(side.opposite(), side);
        }
    }

    #[test]
    fn side_axes() {
        assert_eq!(Side::Top.axis(), Axis::Vertical);
        assert_eq!(Side::Bottom.cross_axis(), Axis::Horizontal);
        assert_eq!(Side::Left.axis(), Axis::Horizontal);
        assert_eq!(Side::Right.cross_axis(), Axis::Vertical);
    }

    #[test]
    fn align_flip() {
        assert_eq!(Align::Start.flipped(), Align::End);
        assert_eq!(Align::End.flipped(), Align::Start);
        assert_eq!(Align::Center.flipped(), Align::Center);
    }

    #[test]
    fn parse_side_case_insensitive() {
        assert_eq!("TOP".parse::<Side>(), Ok(Side::Top));
        assert_eq!(" right ".parse::<Side>(), Ok(Side::Right));
        assert_eq!(
            "north".parse::<Side>(),
            Err(ParseError::UnknownSide("north".into()))
        );
    }

    #[test]
    fn parse_align() {
        assert_eq!("start".parse::<Align>(), Ok(Align::Start));
        assert_eq!("centre".parse::<Align>(), Ok(Align::Center));
        assert!("middle".parse::<Align>().is_err());
    }

    #[test]
    fn parse_placement_forms() {
        assert_eq!(
            "bottom".parse::<Placement>(),
            Ok(Placement::new(Side::Bottom, Align::Center))
        );
        assert_eq!(
            "left-end".parse::<Placement>(),
            Ok(Placement::new(Side::Left, Align::End))
        );
        assert_eq!(
            "top-center".parse::<Placement>(),
            Ok(Placement::new(Side::Top, Align::Center))
        );
    }

    #[test]
    fn parse_placement_rejects_garbage() {
        for bad in ["", "bottom-", "upward-start", "top-middle"] {
            assert_eq!(
                bad.parse::<Placement>(),
                Err(ParseError::InvalidPlacement(bad.into())),
                "input {bad:?}"
            );
        }
    }

    #[test]
    fn placement_display_roundtrips_common_values() {
        for text in ["top", "bottom-start", "left-end", "right"] {
            let p: Placement = text.parse().unwrap();
            assert_eq!(p.to_string(), text);
        }
    }

    #[test]
    fn parse_error_messages() {
        let err = "up".parse::<Side>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown side 'up' (expected top, bottom, left or right)"
        );
    }
}
