//! Tile symbols and matching-equivalence groups.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

/// One of the three numbered suits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    /// Characters.
    Man,
    /// Circles.
    Pin,
    /// Bamboos.
    Sou,
}

impl Suit {
    /// All suits in symbol order.
    pub const ALL: [Self; 3] = [Self::Man, Self::Pin, Self::Sou];
}

/// One of the four wind honors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Wind {
    /// North wind.
    North,
    /// South wind.
    South,
    /// East wind.
    East,
    /// West wind.
    West,
}

impl Wind {
    /// All winds in symbol order.
    pub const ALL: [Self; 4] = [Self::North, Self::South, Self::East, Self::West];
}

/// One of the three dragon honors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dragon {
    /// Red dragon.
    Chun,
    /// White dragon.
    Haku,
    /// Green dragon.
    Hatsu,
}

impl Dragon {
    /// All dragons in symbol order.
    pub const ALL: [Self; 3] = [Self::Chun, Self::Haku, Self::Hatsu];
}

/// The category a [`Symbol`] belongs to.
///
/// [`Season`](Category::Season) and [`Flower`](Category::Flower) are bonus
/// categories: any two tiles of the same bonus category match each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Category {
    /// A numbered suit tile.
    Suit(Suit),
    /// A wind honor.
    Wind,
    /// A dragon honor.
    Dragon,
    /// A season bonus tile.
    Season,
    /// A flower bonus tile.
    Flower,
}

impl Category {
    /// Returns `true` for the season and flower categories.
    #[must_use]
    pub fn is_bonus(self) -> bool {
        matches!(self, Self::Season | Self::Flower)
    }
}

const SUIT_START: u8 = 0;
const WIND_START: u8 = 27;
const DRAGON_START: u8 = 31;
const SEASON_START: u8 = 34;
const FLOWER_START: u8 = 38;
const SYMBOL_COUNT: u8 = 42;

const NAMES: [&str; SYMBOL_COUNT as usize] = [
    "Man1", "Man2", "Man3", "Man4", "Man5", "Man6", "Man7", "Man8", "Man9", //
    "Pin1", "Pin2", "Pin3", "Pin4", "Pin5", "Pin6", "Pin7", "Pin8", "Pin9", //
    "Sou1", "Sou2", "Sou3", "Sou4", "Sou5", "Sou6", "Sou7", "Sou8", "Sou9", //
    "North", "South", "East", "West", //
    "Chun", "Haku", "Hatsu", //
    "Season1", "Season2", "Season3", "Season4", //
    "Bamboo1", "Bamboo2", "Bamboo3", "Bamboo4",
];

/// A tile face drawn from the closed 42-symbol universe.
///
/// The universe is three suits × nine ranks, four winds, three dragons, four
/// seasons and four flowers. Symbols display as their tile names (`Man1`,
/// `North`, `Chun`, `Season3`, `Bamboo2`, ...) and parse from the same names.
///
/// # Examples
///
/// ```
/// use mahjongg_core::{Category, Suit, Symbol};
///
/// let symbol = Symbol::suited(Suit::Pin, 7);
/// assert_eq!(symbol.to_string(), "Pin7");
/// assert_eq!(symbol.category(), Category::Suit(Suit::Pin));
///
/// let season: Symbol = "Season2".parse().unwrap();
/// assert!(season.category().is_bonus());
/// assert_eq!(Symbol::ALL.len(), 42);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(u8);

impl Symbol {
    /// Number of distinct symbols.
    pub const COUNT: usize = SYMBOL_COUNT as usize;

    /// All symbols: suits, winds, dragons, seasons, flowers.
    pub const ALL: [Self; Self::COUNT] = {
        let mut all = [Self(0); Self::COUNT];
        let mut i = 0;
        while i < SYMBOL_COUNT {
            all[i as usize] = Self(i);
            i += 1;
        }
        all
    };

    /// Creates a suit tile.
    ///
    /// # Panics
    ///
    /// Panics if `rank` is not in the range 1-9.
    #[must_use]
    pub fn suited(suit: Suit, rank: u8) -> Self {
        assert!((1..=9).contains(&rank), "Invalid suit rank: {rank}");
        let base = match suit {
            Suit::Man => SUIT_START,
            Suit::Pin => SUIT_START + 9,
            Suit::Sou => SUIT_START + 18,
        };
        Self(base + rank - 1)
    }

    /// Creates a wind tile.
    #[must_use]
    pub fn wind(wind: Wind) -> Self {
        Self(WIND_START + wind as u8)
    }

    /// Creates a dragon tile.
    #[must_use]
    pub fn dragon(dragon: Dragon) -> Self {
        Self(DRAGON_START + dragon as u8)
    }

    /// Creates a season tile.
    ///
    /// # Panics
    ///
    /// Panics if `number` is not in the range 1-4.
    #[must_use]
    pub fn season(number: u8) -> Self {
        assert!((1..=4).contains(&number), "Invalid season: {number}");
        Self(SEASON_START + number - 1)
    }

    /// Creates a flower tile.
    ///
    /// # Panics
    ///
    /// Panics if `number` is not in the range 1-4.
    #[must_use]
    pub fn flower(number: u8) -> Self {
        assert!((1..=4).contains(&number), "Invalid flower: {number}");
        Self(FLOWER_START + number - 1)
    }

    /// Returns the position of this symbol in [`Symbol::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    /// Returns the tile name.
    #[must_use]
    pub fn name(self) -> &'static str {
        NAMES[self.index()]
    }

    /// Returns the category of this symbol.
    #[must_use]
    pub fn category(self) -> Category {
        match self.0 {
            n if n < WIND_START => Category::Suit(Suit::ALL[usize::from((n - SUIT_START) / 9)]),
            n if n < DRAGON_START => Category::Wind,
            n if n < SEASON_START => Category::Dragon,
            n if n < FLOWER_START => Category::Season,
            _ => Category::Flower,
        }
    }

    /// Returns the matching-equivalence group of this symbol.
    #[must_use]
    pub fn match_group(self) -> MatchGroup {
        match self.category() {
            Category::Season => MatchGroup::Seasons,
            Category::Flower => MatchGroup::Flowers,
            _ => MatchGroup::Exact(self),
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown symbol name.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown tile symbol: {name:?}")]
pub struct ParseSymbolError {
    name: String,
}

impl FromStr for Symbol {
    type Err = ParseSymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|symbol| symbol.name() == s)
            .ok_or_else(|| ParseSymbolError { name: s.to_owned() })
    }
}

impl TryFrom<String> for Symbol {
    type Error = ParseSymbolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.name().to_owned()
    }
}

/// Matching-equivalence key of a symbol.
///
/// Non-bonus symbols only match themselves. All seasons share one group and
/// all flowers share another, so a season matches any other season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum MatchGroup {
    /// A symbol that only matches itself.
    #[display("{_0}")]
    Exact(Symbol),
    /// Any season tile.
    #[display("seasons")]
    Seasons,
    /// Any flower tile.
    #[display("flowers")]
    Flowers,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip_through_from_str() {
        for symbol in Symbol::ALL {
            assert_eq!(symbol.name().parse::<Symbol>(), Ok(symbol));
        }
        assert!("Man0".parse::<Symbol>().is_err());
        assert!("".parse::<Symbol>().is_err());
    }

    #[test]
    fn test_category_boundaries() {
        assert_eq!(Symbol::suited(Suit::Man, 1).category(), Category::Suit(Suit::Man));
        assert_eq!(Symbol::suited(Suit::Man, 9).category(), Category::Suit(Suit::Man));
        assert_eq!(Symbol::suited(Suit::Pin, 1).category(), Category::Suit(Suit::Pin));
        assert_eq!(Symbol::suited(Suit::Sou, 9).category(), Category::Suit(Suit::Sou));
        assert_eq!(Symbol::wind(Wind::North).category(), Category::Wind);
        assert_eq!(Symbol::wind(Wind::West).category(), Category::Wind);
        assert_eq!(Symbol::dragon(Dragon::Chun).category(), Category::Dragon);
        assert_eq!(Symbol::dragon(Dragon::Hatsu).category(), Category::Dragon);
        assert_eq!(Symbol::season(1).category(), Category::Season);
        assert_eq!(Symbol::season(4).category(), Category::Season);
        assert_eq!(Symbol::flower(1).category(), Category::Flower);
        assert_eq!(Symbol::flower(4).category(), Category::Flower);
    }

    #[test]
    fn test_constructor_names() {
        assert_eq!(Symbol::suited(Suit::Sou, 5).name(), "Sou5");
        assert_eq!(Symbol::wind(Wind::East).name(), "East");
        assert_eq!(Symbol::dragon(Dragon::Haku).name(), "Haku");
        assert_eq!(Symbol::season(3).name(), "Season3");
        assert_eq!(Symbol::flower(2).name(), "Bamboo2");
    }

    #[test]
    fn test_universe_composition() {
        let count = |pred: fn(&Category) -> bool| {
            Symbol::ALL
                .iter()
                .filter(|symbol| pred(&symbol.category()))
                .count()
        };
        assert_eq!(count(|c| matches!(c, Category::Suit(_))), 27);
        assert_eq!(count(Category::is_wind), 4);
        assert_eq!(count(Category::is_dragon), 3);
        assert_eq!(count(Category::is_season), 4);
        assert_eq!(count(Category::is_flower), 4);
    }

    #[test]
    fn test_bonus_symbols_share_a_group() {
        assert_eq!(Symbol::season(1).match_group(), MatchGroup::Seasons);
        assert_eq!(Symbol::season(4).match_group(), MatchGroup::Seasons);
        assert_eq!(Symbol::flower(2).match_group(), MatchGroup::Flowers);
        let chun = Symbol::dragon(Dragon::Chun);
        assert_eq!(chun.match_group(), MatchGroup::Exact(chun));
    }

    #[test]
    #[should_panic(expected = "Invalid suit rank")]
    fn test_suited_rejects_rank_zero() {
        let _ = Symbol::suited(Suit::Man, 0);
    }
}
