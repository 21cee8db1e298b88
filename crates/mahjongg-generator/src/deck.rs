use mahjongg_core::Symbol;
use rand::{Rng, seq::SliceRandom as _};

/// Error returned when a deck cannot be paired off.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum DeckError {
    /// The requested deck size is odd.
    #[display("cannot build a paired deck of {count} tiles")]
    OddTileCount {
        /// Requested number of tiles.
        count: usize,
    },
}

/// Builds shuffled decks in which every symbol appears an even number of times.
///
/// The symbol universe is shuffled once, then whole pairs are dealt by
/// cycling through it until the deck is full, and the deck is shuffled
/// again. Small decks therefore use a random subset of symbols, while the
/// 144-tile classic deck uses every symbol at least twice.
///
/// # Examples
///
/// ```
/// use mahjongg_generator::{DeckBuilder, LayoutSeed};
///
/// let mut rng = LayoutSeed::from(1_u64).rng();
/// let deck = DeckBuilder::build(144, &mut rng)?;
/// assert_eq!(deck.len(), 144);
/// # Ok::<(), mahjongg_generator::DeckError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DeckBuilder;

impl DeckBuilder {
    /// Builds a deck of `total` symbols.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::OddTileCount`] if `total` is odd.
    pub fn build<R>(total: usize, rng: &mut R) -> Result<Vec<Symbol>, DeckError>
    where
        R: Rng + ?Sized,
    {
        if total % 2 != 0 {
            return Err(DeckError::OddTileCount { count: total });
        }
        let mut symbols = Symbol::ALL;
        symbols.shuffle(rng);

        let mut deck = Vec::with_capacity(total);
        for &symbol in symbols.iter().cycle().take(total / 2) {
            deck.extend([symbol, symbol]);
        }
        deck.shuffle(rng);
        Ok(deck)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use proptest::prelude::*;

    use super::*;
    use crate::LayoutSeed;

    fn counts<T>(items: impl IntoIterator<Item = T>) -> HashMap<T, usize>
    where
        T: std::hash::Hash + Eq,
    {
        let mut counts = HashMap::new();
        for item in items {
            *counts.entry(item).or_default() += 1;
        }
        counts
    }

    #[test]
    fn test_rejects_odd_totals() {
        let mut rng = LayoutSeed::from(0_u64).rng();
        assert_eq!(
            DeckBuilder::build(143, &mut rng),
            Err(DeckError::OddTileCount { count: 143 })
        );
        assert_eq!(DeckBuilder::build(0, &mut rng), Ok(vec![]));
    }

    #[test]
    fn test_classic_deck_uses_every_symbol() {
        let mut rng = LayoutSeed::from(3_u64).rng();
        let deck = DeckBuilder::build(144, &mut rng).unwrap();
        let counts = counts(deck);
        assert_eq!(counts.len(), Symbol::COUNT);
        assert!(counts.values().all(|&n| n == 2 || n == 4));
        assert_eq!(counts.values().filter(|&&n| n == 4).count(), 30);
    }

    #[test]
    fn test_same_seed_same_deck() {
        let a = DeckBuilder::build(144, &mut LayoutSeed::from(9_u64).rng()).unwrap();
        let b = DeckBuilder::build(144, &mut LayoutSeed::from(9_u64).rng()).unwrap();
        let c = DeckBuilder::build(144, &mut LayoutSeed::from(10_u64).rng()).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    proptest! {
        #[test]
        fn prop_every_group_is_even(pairs in 0usize..200, bytes in any::<[u8; 32]>()) {
            let mut rng = LayoutSeed::from(bytes).rng();
            let deck = DeckBuilder::build(pairs * 2, &mut rng).unwrap();
            prop_assert_eq!(deck.len(), pairs * 2);
            for (_, n) in counts(deck.iter().copied()) {
                prop_assert_eq!(n % 2, 0);
            }
            let groups = counts(deck.iter().map(|symbol| symbol.match_group()));
            for (group, n) in groups {
                prop_assert_eq!(n % 2, 0, "{}", group);
            }
        }
    }
}
