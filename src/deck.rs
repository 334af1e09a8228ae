use crate::color::Color;
use crate::route::Route;

use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};
use smallvec::SmallVec;

/// How many cards of each concrete color the deck holds.
pub const NUM_CARDS_PER_CONCRETE_COLOR: usize = 12;
/// How many wildcards the deck holds.
pub const NUM_WILD_CARDS: usize = 14;
/// The side row holds five visible cards on the standard map.
pub const STANDARD_SIDE_ROW_SLOTS: usize = 5;
/// How many objective routes one draw takes from the stack.
pub const ROUTES_PER_DRAW: usize = 3;

/// Owns the shuffled draw pile, the visible side row, and the stack of
/// objective routes.
///
/// The full card multiset (eight concrete colors times
/// [`NUM_CARDS_PER_CONCRETE_COLOR`], plus [`NUM_WILD_CARDS`] wildcards) is
/// built and shuffled at construction; afterwards cards only move between
/// the pile, the side row, and player hands. None are created or
/// destroyed.
#[derive(Debug)]
pub struct Deck {
    /// The face-down pile. The top of the pile is the end of the vector.
    draw_pile: Vec<Color>,
    /// The visible cards. An empty slot (`None`) means the pile ran dry
    /// while replacing a picked card.
    side_row: SmallVec<[Option<Color>; STANDARD_SIDE_ROW_SLOTS]>,
    /// The face-down stack of objective routes. The top is the end.
    route_stack: Vec<Route>,
}

impl Deck {
    /// Builds the full card multiset, shuffles it, and flips the requested
    /// number of side-row cards (four or five, map-dependent) off the top.
    /// The objective routes are shuffled into their own stack.
    ///
    /// # Example
    /// ```
    /// use trunkline::deck::{Deck, STANDARD_SIDE_ROW_SLOTS};
    ///
    /// let deck = Deck::new(Vec::new(), STANDARD_SIDE_ROW_SLOTS);
    /// assert_eq!(deck.side_row().len(), 5);
    /// assert_eq!(deck.draw_pile_size(), 105);
    /// ```
    pub fn new(routes: Vec<Route>, num_side_slots: usize) -> Self {
        assert!(
            num_side_slots == 4 || num_side_slots == 5,
            "the side row holds four or five cards, not {}",
            num_side_slots
        );

        let mut draw_pile =
            Vec::with_capacity(8 * NUM_CARDS_PER_CONCRETE_COLOR + NUM_WILD_CARDS);
        for color in Color::concrete_colors() {
            draw_pile.extend(std::iter::repeat(color).take(NUM_CARDS_PER_CONCRETE_COLOR));
        }
        draw_pile.extend(std::iter::repeat(Color::Wild).take(NUM_WILD_CARDS));
        draw_pile.shuffle(&mut thread_rng());

        let mut side_row = SmallVec::new();
        for _ in 0..num_side_slots {
            side_row.push(draw_pile.pop());
        }

        let mut route_stack = routes;
        route_stack.shuffle(&mut thread_rng());

        Self {
            draw_pile,
            side_row,
            route_stack,
        }
    }

    /// Pops and returns the top card of the draw pile.
    ///
    /// Returns an `Err` if the pile is empty.
    ///
    /// # Example
    /// ```
    /// use trunkline::deck::{Deck, STANDARD_SIDE_ROW_SLOTS};
    ///
    /// let mut deck = Deck::new(Vec::new(), STANDARD_SIDE_ROW_SLOTS);
    /// assert!(deck.draw_top().is_ok());
    /// ```
    pub fn draw_top(&mut self) -> Result<Color, String> {
        match self.draw_pile.pop() {
            Some(card) => Ok(card),
            None => Err(String::from("There are no cards left in the draw pile.")),
        }
    }

    /// Takes the visible card at `index`, given how much draw power the
    /// current player has left.
    ///
    /// A wildcard costs the whole turn, so it may only be taken with a full
    /// draw power of 2; a concrete color needs at least 1. An out-of-bounds
    /// index, an empty slot, or insufficient draw power rejects the pick
    /// (`None`) without mutating anything.
    ///
    /// On success, the slot is refilled from the top of the draw pile; if
    /// the pile is empty, the slot is left empty.
    pub fn pick_visible(&mut self, index: usize, draw_power: u8) -> Option<Color> {
        if index >= self.side_row.len() {
            return None;
        }

        let card = self.side_row[index]?;
        let allowed = if card.is_wild() {
            draw_power == 2
        } else {
            draw_power >= 1
        };
        if !allowed {
            return None;
        }

        self.side_row[index] = self.draw_pile.pop();

        Some(card)
    }

    /// Pops up to `num` objective routes off the top of the stack.
    ///
    /// Returns fewer (possibly zero) if the stack runs out; that is not an
    /// error.
    pub fn draw_routes(&mut self, num: usize) -> SmallVec<[Route; ROUTES_PER_DRAW]> {
        let mut drawn = SmallVec::new();
        for _ in 0..num {
            match self.route_stack.pop() {
                Some(route) => drawn.push(route),
                None => break,
            }
        }

        drawn
    }

    /// Reinserts a returned objective route at a uniformly random position
    /// in the stack. This is not a full reshuffle: the other routes keep
    /// their relative order.
    pub fn return_route(&mut self, route: Route) {
        let index = if self.route_stack.is_empty() {
            0
        } else {
            thread_rng().gen_range(0..self.route_stack.len())
        };
        self.route_stack.insert(index, route);
    }

    /// Shuffles spent cards back into the draw pile, each at a random
    /// position. Claim payments come back through here, which keeps the
    /// total card count constant for the life of a game.
    pub fn discard_cards(&mut self, cards: impl IntoIterator<Item = Color>) {
        let mut rng = thread_rng();
        for card in cards {
            assert!(card.is_not_gray(), "a gray card cannot enter the deck");

            let index = rng.gen_range(0..=self.draw_pile.len());
            self.draw_pile.insert(index, card);
        }
    }

    /// The visible side row. Empty slots are `None`.
    #[inline]
    pub fn side_row(&self) -> &[Option<Color>] {
        &self.side_row
    }

    /// How many cards are left in the draw pile.
    #[inline]
    pub fn draw_pile_size(&self) -> usize {
        self.draw_pile.len()
    }

    /// How many objective routes are left in the stack.
    #[inline]
    pub fn route_stack_size(&self) -> usize {
        self.route_stack.len()
    }

    /// Mutable accessor to the draw pile.
    ///
    /// Should only be used for testing!
    pub fn draw_pile_mut(&mut self) -> &mut Vec<Color> {
        &mut self.draw_pile
    }

    /// Mutable accessor to the side row.
    ///
    /// Should only be used for testing!
    pub fn side_row_mut(&mut self) -> &mut SmallVec<[Option<Color>; STANDARD_SIDE_ROW_SLOTS]> {
        &mut self.side_row
    }

    /// Accessor to the route stack.
    ///
    /// Should only be used for testing!
    pub fn route_stack(&self) -> &Vec<Route> {
        &self.route_stack
    }

    /// Mutable accessor to the route stack.
    ///
    /// Should only be used for testing!
    pub fn route_stack_mut(&mut self) -> &mut Vec<Route> {
        &mut self.route_stack
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    fn some_routes() -> Vec<Route> {
        vec![
            Route::new("Denver", "El Paso", 4),
            Route::new("Boston", "Miami", 12),
            Route::new("Seattle", "New York", 22),
            Route::new("Calgary", "Phoenix", 13),
        ]
    }

    fn count_cards(deck: &Deck) -> HashMap<Color, usize> {
        let mut counts = HashMap::new();

        for card in &deck.draw_pile {
            *counts.entry(*card).or_insert(0) += 1;
        }
        for card in deck.side_row.iter().flatten() {
            *counts.entry(*card).or_insert(0) += 1;
        }

        counts
    }

    #[test]
    fn new_deck() {
        let deck = Deck::new(some_routes(), STANDARD_SIDE_ROW_SLOTS);

        assert_eq!(deck.side_row.len(), STANDARD_SIDE_ROW_SLOTS);
        assert!(deck.side_row.iter().all(Option::is_some));
        // 110 cards total, minus the five flipped into the side row.
        assert_eq!(deck.draw_pile_size(), 105);
        assert_eq!(deck.route_stack_size(), 4);

        let counts = count_cards(&deck);
        for color in Color::concrete_colors() {
            assert_eq!(counts[&color], NUM_CARDS_PER_CONCRETE_COLOR);
        }
        assert_eq!(counts[&Color::Wild], NUM_WILD_CARDS);
    }

    #[test]
    fn new_deck_with_four_slots() {
        let deck = Deck::new(Vec::new(), 4);

        assert_eq!(deck.side_row.len(), 4);
        assert_eq!(deck.draw_pile_size(), 106);
    }

    #[test]
    #[should_panic(expected = "four or five")]
    fn new_deck_with_bad_slot_count_panics() {
        Deck::new(Vec::new(), 3);
    }

    #[test]
    fn new_deck_different_every_time() {
        // With 110 cards there is a vanishing chance of two shuffles
        // producing the same pile.
        let first = Deck::new(Vec::new(), STANDARD_SIDE_ROW_SLOTS);
        let second = Deck::new(Vec::new(), STANDARD_SIDE_ROW_SLOTS);

        assert_ne!(first.draw_pile, second.draw_pile);
    }

    #[test]
    fn draw_top_pops_the_pile() {
        let mut deck = Deck::new(Vec::new(), STANDARD_SIDE_ROW_SLOTS);
        let expected = deck.draw_pile.last().copied();

        assert_eq!(deck.draw_top().ok(), expected);
        assert_eq!(deck.draw_pile_size(), 104);
    }

    #[test]
    fn draw_top_on_empty_pile_errs() {
        let mut deck = Deck::new(Vec::new(), STANDARD_SIDE_ROW_SLOTS);
        deck.draw_pile.clear();

        assert!(deck.draw_top().is_err());
    }

    #[test]
    fn pick_visible_out_of_bounds() {
        let mut deck = Deck::new(Vec::new(), STANDARD_SIDE_ROW_SLOTS);

        assert_eq!(deck.pick_visible(5, 2), None);
        assert_eq!(deck.draw_pile_size(), 105);
    }

    #[test]
    fn pick_visible_empty_slot() {
        let mut deck = Deck::new(Vec::new(), STANDARD_SIDE_ROW_SLOTS);
        deck.side_row[2] = None;

        assert_eq!(deck.pick_visible(2, 2), None);
    }

    #[test]
    fn pick_visible_concrete_color() {
        let mut deck = Deck::new(Vec::new(), STANDARD_SIDE_ROW_SLOTS);
        deck.side_row[0] = Some(Color::Green);
        let replacement = deck.draw_pile.last().copied();

        assert_eq!(deck.pick_visible(0, 2), Some(Color::Green));
        assert_eq!(deck.side_row[0], replacement);

        deck.side_row[1] = Some(Color::Red);
        assert_eq!(deck.pick_visible(1, 1), Some(Color::Red));
    }

    #[test]
    fn pick_visible_concrete_color_without_draw_power() {
        let mut deck = Deck::new(Vec::new(), STANDARD_SIDE_ROW_SLOTS);
        deck.side_row[0] = Some(Color::Green);

        assert_eq!(deck.pick_visible(0, 0), None);
        assert_eq!(deck.side_row[0], Some(Color::Green));
    }

    // Regression test: the wildcard is legal exactly when the player still
    // has their full draw power, never on the second draw.
    #[test]
    fn pick_visible_wildcard_needs_full_draw_power() {
        let mut deck = Deck::new(Vec::new(), STANDARD_SIDE_ROW_SLOTS);
        deck.side_row[3] = Some(Color::Wild);

        assert_eq!(deck.pick_visible(3, 1), None);
        assert_eq!(deck.side_row[3], Some(Color::Wild));
        assert_eq!(deck.pick_visible(3, 0), None);

        assert_eq!(deck.pick_visible(3, 2), Some(Color::Wild));
        assert!(deck.side_row[3].is_some());
    }

    #[test]
    fn pick_visible_with_empty_pile_leaves_slot_empty() {
        let mut deck = Deck::new(Vec::new(), STANDARD_SIDE_ROW_SLOTS);
        deck.side_row[1] = Some(Color::Blue);
        deck.draw_pile.clear();

        assert_eq!(deck.pick_visible(1, 2), Some(Color::Blue));
        assert_eq!(deck.side_row[1], None);
    }

    #[test]
    fn draw_routes_pops_the_top() {
        let mut deck = Deck::new(some_routes(), STANDARD_SIDE_ROW_SLOTS);
        let expected: Vec<Route> = deck.route_stack.iter().rev().take(3).cloned().collect();

        let drawn = deck.draw_routes(3);
        assert_eq!(drawn.to_vec(), expected);
        assert_eq!(deck.route_stack_size(), 1);
    }

    #[test]
    fn draw_routes_when_stack_runs_out() {
        let mut deck = Deck::new(some_routes(), STANDARD_SIDE_ROW_SLOTS);

        assert_eq!(deck.draw_routes(3).len(), 3);
        assert_eq!(deck.draw_routes(3).len(), 1);
        assert!(deck.draw_routes(3).is_empty());
    }

    #[test]
    fn return_route_reinserts() {
        let mut deck = Deck::new(some_routes(), STANDARD_SIDE_ROW_SLOTS);
        let returned = Route::new("Toronto", "Miami", 10);

        deck.return_route(returned.clone());
        assert_eq!(deck.route_stack_size(), 5);
        assert!(deck.route_stack.contains(&returned));
    }

    #[test]
    fn return_route_into_empty_stack() {
        let mut deck = Deck::new(Vec::new(), STANDARD_SIDE_ROW_SLOTS);
        let returned = Route::new("Toronto", "Miami", 10);

        deck.return_route(returned.clone());
        assert_eq!(deck.route_stack, vec![returned]);
    }

    #[test]
    fn discard_cards_conserves_the_multiset() {
        let mut deck = Deck::new(Vec::new(), STANDARD_SIDE_ROW_SLOTS);
        let drawn = [
            deck.draw_top().unwrap(),
            deck.draw_top().unwrap(),
            deck.draw_top().unwrap(),
        ];
        assert_eq!(deck.draw_pile_size(), 102);

        deck.discard_cards(drawn);
        assert_eq!(deck.draw_pile_size(), 105);

        let counts = count_cards(&deck);
        for color in Color::concrete_colors() {
            assert_eq!(counts[&color], NUM_CARDS_PER_CONCRETE_COLOR);
        }
        assert_eq!(counts[&Color::Wild], NUM_WILD_CARDS);
    }

    #[test]
    #[should_panic(expected = "gray card")]
    fn discard_gray_card_panics() {
        let mut deck = Deck::new(Vec::new(), STANDARD_SIDE_ROW_SLOTS);
        deck.discard_cards([Color::Gray]);
    }
}
