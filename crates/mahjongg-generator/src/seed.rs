use std::{
    fmt::{self, Display},
    str::FromStr,
};

use chrono::{Datelike as _, NaiveDate};
use rand::SeedableRng as _;
use rand_pcg::Pcg64;
use sha2::{Digest as _, Sha256};

/// A 256-bit seed that fully determines a generated layout.
///
/// Seeds display as 64 lowercase hex digits and parse from the same form.
/// Numeric seeds (such as the daily-puzzle number) are widened through
/// SHA-256 so that nearby numbers still yield unrelated layouts.
///
/// # Examples
///
/// ```
/// use mahjongg_generator::LayoutSeed;
///
/// let seed = LayoutSeed::from(20_240_101_u64);
/// let text = seed.to_string();
/// assert_eq!(text.len(), 64);
/// assert_eq!(text.parse::<LayoutSeed>(), Ok(seed));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutSeed([u8; 32]);

impl LayoutSeed {
    /// Draws a seed from the thread-local random generator.
    #[must_use]
    pub fn random() -> Self {
        Self(rand::random())
    }

    /// Returns a fresh random stream seeded with this seed.
    #[must_use]
    pub fn rng(self) -> Pcg64 {
        Pcg64::from_seed(self.0)
    }
}

impl From<[u8; 32]> for LayoutSeed {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl From<u64> for LayoutSeed {
    fn from(value: u64) -> Self {
        Self(Sha256::digest(value.to_le_bytes()).into())
    }
}

impl Display for LayoutSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Error returned when parsing a [`LayoutSeed`] from text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseSeedError {
    /// The input is not exactly 64 hex digits long.
    #[display("seed must be 64 hex digits, got {len}")]
    InvalidLength {
        /// Number of digits found.
        len: usize,
    },
    /// The input contains a non-hex character.
    #[display("invalid hex digit {ch:?} in seed")]
    InvalidDigit {
        /// The offending character.
        ch: char,
    },
}

impl FromStr for LayoutSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .trim()
            .chars()
            .map(|ch| {
                ch.to_digit(16)
                    .and_then(|d| u8::try_from(d).ok())
                    .ok_or(ParseSeedError::InvalidDigit { ch })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if digits.len() != 64 {
            return Err(ParseSeedError::InvalidLength { len: digits.len() });
        }
        let mut bytes = [0; 32];
        for (byte, pair) in bytes.iter_mut().zip(digits.chunks_exact(2)) {
            *byte = (pair[0] << 4) | pair[1];
        }
        Ok(Self(bytes))
    }
}

const FIRST_PUZZLE: NaiveDate = match NaiveDate::from_ymd_opt(2024, 1, 1) {
    Some(date) => date,
    None => panic!("invalid first puzzle date"),
};

/// A calendar day identifying a daily puzzle.
///
/// Every player asking for the same date gets the same layout. The date
/// maps to the number `year * 10000 + month * 100 + day` (so 2024-03-15 is
/// `20240315`), which is then widened into a [`LayoutSeed`].
///
/// # Examples
///
/// ```
/// use mahjongg_generator::{LayoutSeed, PuzzleDate};
///
/// let date: PuzzleDate = "2024-03-15".parse().unwrap();
/// assert_eq!(date.number(), 20_240_315);
/// assert_eq!(date.seed(), LayoutSeed::from(20_240_315_u64));
/// assert_eq!(date.puzzle_number(), 75);
/// assert!("2023-02-29".parse::<PuzzleDate>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PuzzleDate(NaiveDate);

/// Error returned for malformed or impossible puzzle dates.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseDateError {
    /// The input is not a `YYYY-MM-DD` date of the calendar.
    #[display("expected a date formatted as YYYY-MM-DD, got {input:?}: {source}")]
    InvalidFormat {
        /// The rejected input.
        input: String,
        /// Why the input was rejected.
        source: chrono::ParseError,
    },
    /// The fields do not name a real calendar day from year 1 onward.
    #[display("{year:04}-{month:02}-{day:02} is not a valid date")]
    InvalidDate {
        /// Year field.
        year: i32,
        /// Month field.
        month: u32,
        /// Day field.
        day: u32,
    },
}

impl PuzzleDate {
    const FORMAT: &str = "%Y-%m-%d";

    /// Creates a date after checking that the day exists.
    ///
    /// # Errors
    ///
    /// Returns [`ParseDateError::InvalidDate`] for years before 1, months
    /// outside 1-12 and days past the end of the month.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, ParseDateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| Self::from_naive(date).ok())
            .ok_or(ParseDateError::InvalidDate { year, month, day })
    }

    fn from_naive(date: NaiveDate) -> Result<Self, ParseDateError> {
        if date.year() < 1 {
            return Err(ParseDateError::InvalidDate {
                year: date.year(),
                month: date.month(),
                day: date.day(),
            });
        }
        Ok(Self(date))
    }

    /// Returns the year.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day of the month.
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns the numeric daily seed `year * 10000 + month * 100 + day`.
    #[must_use]
    pub fn number(&self) -> u64 {
        // Years start at 1, so the sum is positive.
        let number =
            i64::from(self.year()) * 10_000 + i64::from(self.month()) * 100 + i64::from(self.day());
        number.unsigned_abs()
    }

    /// Returns the layout seed for this day.
    #[must_use]
    pub fn seed(&self) -> LayoutSeed {
        LayoutSeed::from(self.number())
    }

    /// Returns the running puzzle number, counting 2024-01-01 as puzzle 1.
    ///
    /// Dates before the first puzzle yield zero or negative numbers.
    #[must_use]
    pub fn puzzle_number(&self) -> i64 {
        self.0.signed_duration_since(FIRST_PUZZLE).num_days() + 1
    }
}

impl Display for PuzzleDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl FromStr for PuzzleDate {
    type Err = ParseDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = NaiveDate::parse_from_str(s.trim(), Self::FORMAT).map_err(|source| {
            ParseDateError::InvalidFormat {
                input: s.to_owned(),
                source,
            }
        })?;
        Self::from_naive(date)
    }
}
