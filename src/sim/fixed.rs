//! Fixed-point math for the simulation
//!
//! Positions and speeds are Q19.12: an `i32` holding 12 fractional bits, the
//! precision a GBA-class handheld works in. All arithmetic is integer so a
//! seeded run replays bit-for-bit on any machine.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of fractional bits
pub const FRACTION_BITS: u32 = 12;

const ONE_RAW: i32 = 1 << FRACTION_BITS;
const HALF_RAW: i32 = ONE_RAW >> 1;

/// A signed Q19.12 fixed-point number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Fixed(i32);

impl Fixed {
    pub const ZERO: Fixed = Fixed(0);
    pub const ONE: Fixed = Fixed(ONE_RAW);

    #[inline]
    pub const fn from_int(value: i32) -> Self {
        Self(value << FRACTION_BITS)
    }

    /// `num / den` truncated to the nearest representable value toward zero
    #[inline]
    pub const fn from_ratio(num: i32, den: i32) -> Self {
        Self((((num as i64) << FRACTION_BITS) / den as i64) as i32)
    }

    /// Nearest representable value (used when reading config files)
    pub fn from_f64(value: f64) -> Self {
        Self((value * ONE_RAW as f64).round() as i32)
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / ONE_RAW as f64
    }

    /// Round to the nearest integer, halves toward positive infinity
    #[inline]
    pub const fn round_integer(self) -> i32 {
        (self.0 + HALF_RAW) >> FRACTION_BITS
    }

    /// -1, 0 or 1
    #[inline]
    pub const fn signum(self) -> i32 {
        self.0.signum()
    }

    /// Square root; zero for non-positive inputs
    pub fn sqrt(self) -> Self {
        Self::sqrt_wide(self.0 as i64)
    }

    /// `self * self` as a widened raw value (12 fractional bits, `i64`)
    #[inline]
    pub const fn squared_wide(self) -> i64 {
        (self.0 as i64 * self.0 as i64) >> FRACTION_BITS
    }

    /// Square root of a widened raw value; zero for non-positive inputs
    pub fn sqrt_wide(raw: i64) -> Self {
        if raw <= 0 {
            return Self::ZERO;
        }
        // sqrt(raw / 2^12) * 2^12 == sqrt(raw * 2^12)
        let wide = (raw as u64) << FRACTION_BITS;
        Self(wide.isqrt() as i32)
    }
}

impl Add for Fixed {
    type Output = Fixed;

    #[inline]
    fn add(self, rhs: Fixed) -> Fixed {
        Fixed(self.0 + rhs.0)
    }
}

impl AddAssign for Fixed {
    #[inline]
    fn add_assign(&mut self, rhs: Fixed) {
        self.0 += rhs.0;
    }
}

impl Sub for Fixed {
    type Output = Fixed;

    #[inline]
    fn sub(self, rhs: Fixed) -> Fixed {
        Fixed(self.0 - rhs.0)
    }
}

impl SubAssign for Fixed {
    #[inline]
    fn sub_assign(&mut self, rhs: Fixed) {
        self.0 -= rhs.0;
    }
}

impl Neg for Fixed {
    type Output = Fixed;

    #[inline]
    fn neg(self) -> Fixed {
        Fixed(-self.0)
    }
}

impl Mul for Fixed {
    type Output = Fixed;

    #[inline]
    fn mul(self, rhs: Fixed) -> Fixed {
        Fixed(((self.0 as i64 * rhs.0 as i64) >> FRACTION_BITS) as i32)
    }
}

impl Mul<i32> for Fixed {
    type Output = Fixed;

    #[inline]
    fn mul(self, rhs: i32) -> Fixed {
        Fixed(self.0 * rhs)
    }
}

/// Panics if `rhs` is zero, like integer division
impl Div for Fixed {
    type Output = Fixed;

    #[inline]
    fn div(self, rhs: Fixed) -> Fixed {
        Fixed((((self.0 as i64) << FRACTION_BITS) / rhs.0 as i64) as i32)
    }
}

impl Div<i32> for Fixed {
    type Output = Fixed;

    #[inline]
    fn div(self, rhs: i32) -> Fixed {
        Fixed(self.0 / rhs)
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_f64())
    }
}

// Config files carry plain decimal numbers
impl Serialize for Fixed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

impl<'de> Deserialize<'de> for Fixed {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Fixed::from_f64)
    }
}

/// A point in screen space (origin at the screen center, +y down)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: Fixed,
    pub y: Fixed,
}

impl Position {
    pub const ORIGIN: Position = Position {
        x: Fixed::ZERO,
        y: Fixed::ZERO,
    };

    pub const fn new(x: Fixed, y: Fixed) -> Self {
        Self { x, y }
    }

    pub const fn from_ints(x: i32, y: i32) -> Self {
        Self {
            x: Fixed::from_int(x),
            y: Fixed::from_int(y),
        }
    }

    /// Squared distance, widened like `Fixed::squared_wide`
    pub fn distance_squared(self, other: Position) -> i64 {
        (other.x - self.x).squared_wide() + (other.y - self.y).squared_wide()
    }

    pub fn distance(self, other: Position) -> Fixed {
        Fixed::sqrt_wide(self.distance_squared(other))
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
