use std::collections::HashMap;

use mahjongg_core::{MatchGroup, Tile};

/// Error returned when a tile set cannot be cleared in pairs.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PairingError {
    /// A match group has an odd number of live tiles.
    #[display("match group {group} has an odd number of tiles ({count})")]
    UnpairedGroup {
        /// The offending group.
        group: MatchGroup,
        /// Number of live tiles in the group.
        count: usize,
    },
}

/// Checks that every match group among the live tiles has an even count.
///
/// An odd group can never be fully removed, whatever the layout. Groups are
/// reported in the order they first appear in `tiles`.
///
/// # Errors
///
/// Returns [`PairingError::UnpairedGroup`] for the first odd group.
///
/// # Examples
///
/// ```
/// use mahjongg_core::{BoardTemplate, Symbol};
/// use mahjongg_solver::{PairingError, validate_pairing};
///
/// let template: BoardTemplate = "111".parse().unwrap();
/// let tiles = template
///     .instantiate([Symbol::season(1), Symbol::season(2), Symbol::flower(1)])
///     .unwrap();
/// assert!(matches!(
///     validate_pairing(&tiles),
///     Err(PairingError::UnpairedGroup { count: 1, .. })
/// ));
/// ```
pub fn validate_pairing(tiles: &[Tile]) -> Result<(), PairingError> {
    let mut order = vec![];
    let mut counts = HashMap::<MatchGroup, usize>::new();
    for tile in tiles.iter().filter(|tile| !tile.is_removed()) {
        let group = tile.symbol().match_group();
        let count = counts.entry(group).or_insert_with(|| {
            order.push(group);
            0
        });
        *count += 1;
    }
    for group in order {
        let count = counts[&group];
        if count % 2 != 0 {
            return Err(PairingError::UnpairedGroup { group, count });
        }
    }
    Ok(())
}
