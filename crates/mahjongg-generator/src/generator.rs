use std::num::NonZero;

use mahjongg_core::{BoardTemplate, TemplateError, Tile};
use mahjongg_solver::GreedySolver;
use rand::Rng;

use crate::{DeckBuilder, DeckError, LayoutSeed};

/// How a [`GeneratedLayout`] was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::IsVariant)]
pub enum GenerationOutcome {
    /// The greedy solver cleared the layout.
    #[display("solvable")]
    Solvable,
    /// No attempt was verified; the layout is the last candidate built.
    #[display("fallback")]
    Fallback,
}

/// Error raised while building a single candidate layout.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum GenerateError {
    /// The deck could not be built.
    #[display("deck: {_0}")]
    Deck(DeckError),
    /// The template rejected the deck.
    #[display("template: {_0}")]
    Template(TemplateError),
}

/// A generated layout together with the data needed to reproduce it.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedLayout {
    /// The tiles, with every play flag cleared.
    pub tiles: Vec<Tile>,
    /// The seed that reproduces this layout with the same template and attempt cap.
    pub seed: LayoutSeed,
    /// Number of attempts made, counting the successful one.
    pub attempts: usize,
    /// Whether the layout was verified solvable.
    pub outcome: GenerationOutcome,
}

/// Generates layouts that the greedy solver can clear.
///
/// Each attempt deals a fresh deck into the template and plays it through
/// with the solver. The first layout the solver clears is returned. When
/// every attempt fails the last candidate is returned anyway, marked
/// [`GenerationOutcome::Fallback`], so a game can always start.
///
/// All attempts draw from one random stream seeded by the [`LayoutSeed`],
/// so the same seed always reproduces the same layout.
///
/// # Examples
///
/// ```
/// use mahjongg_core::BoardTemplate;
/// use mahjongg_generator::{LayoutGenerator, LayoutSeed};
/// use mahjongg_solver::GreedySolver;
///
/// let template = BoardTemplate::classic();
/// let solver = GreedySolver::new();
/// let generator = LayoutGenerator::new(&template, &solver);
///
/// let seed = LayoutSeed::from(42_u64);
/// let layout = generator.generate_with_seed(seed);
/// assert_eq!(layout.tiles.len(), 144);
/// assert_eq!(layout, generator.generate_with_seed(seed));
/// ```
#[derive(Debug, Clone)]
pub struct LayoutGenerator<'a> {
    template: &'a BoardTemplate,
    solver: &'a GreedySolver,
    max_attempts: NonZero<usize>,
}

impl<'a> LayoutGenerator<'a> {
    /// Default number of attempts before falling back.
    pub const DEFAULT_MAX_ATTEMPTS: NonZero<usize> = NonZero::new(20).unwrap();

    /// Creates a generator for `template`, vetting layouts with `solver`.
    #[must_use]
    pub fn new(template: &'a BoardTemplate, solver: &'a GreedySolver) -> Self {
        Self {
            template,
            solver,
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Sets the number of attempts before falling back.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: NonZero<usize>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Returns the number of attempts before falling back.
    #[must_use]
    pub fn max_attempts(&self) -> NonZero<usize> {
        self.max_attempts
    }

    /// Generates a layout from a freshly drawn random seed.
    #[must_use]
    pub fn generate(&self) -> GeneratedLayout {
        self.generate_with_seed(LayoutSeed::random())
    }

    /// Generates the layout determined by `seed`.
    ///
    /// If the template has an odd number of slots no deck can be dealt; the
    /// result is then an empty [`Fallback`](GenerationOutcome::Fallback) layout.
    #[must_use]
    pub fn generate_with_seed(&self, seed: LayoutSeed) -> GeneratedLayout {
        let mut rng = seed.rng();
        let max_attempts = self.max_attempts.get();
        let mut last = None;

        for attempt in 1..=max_attempts {
            let tiles = match self.candidate(&mut rng) {
                Ok(tiles) => tiles,
                Err(err) => {
                    log::warn!("Generation attempt {attempt} failed: {err}");
                    continue;
                }
            };
            let (solved, stats) = self.solver.solve(&tiles);
            if solved {
                log::info!("Generated a solvable layout in {attempt} attempt(s) from seed {seed}");
                return GeneratedLayout {
                    tiles,
                    seed,
                    attempts: attempt,
                    outcome: GenerationOutcome::Solvable,
                };
            }
            log::debug!(
                "Attempt {attempt}: stuck after {} pairs with {} tiles left",
                stats.pairs_removed(),
                stats.remaining_tiles()
            );
            last = Some(tiles);
        }

        log::warn!(
            "Could not generate a solvable layout in {max_attempts} attempts, using fallback (seed {seed})"
        );
        GeneratedLayout {
            tiles: last.unwrap_or_default(),
            seed,
            attempts: max_attempts,
            outcome: GenerationOutcome::Fallback,
        }
    }

    /// Deals one unvetted candidate layout from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Deck`] if the template has an odd number of
    /// slots.
    pub fn candidate<R>(&self, rng: &mut R) -> Result<Vec<Tile>, GenerateError>
    where
        R: Rng + ?Sized,
    {
        let deck = DeckBuilder::build(self.template.slot_count(), rng)?;
        Ok(self.template.instantiate(deck)?)
    }
}

/// Generates a layout on the classic template.
///
/// With `None` a random seed is drawn; pass a seed (for example
/// [`PuzzleDate::seed`](crate::PuzzleDate::seed)) to get a reproducible board.
#[must_use]
pub fn generate_initial_layout(seed: Option<LayoutSeed>) -> GeneratedLayout {
    let template = BoardTemplate::classic();
    let solver = GreedySolver::new();
    let generator = LayoutGenerator::new(&template, &solver);
    generator.generate_with_seed(seed.unwrap_or_else(LayoutSeed::random))
}
