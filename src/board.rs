use crate::color::Color;
use crate::color::Color::*;
use crate::deck::{Deck, ROUTES_PER_DRAW, STANDARD_SIDE_ROW_SLOTS};
use crate::graph::RailwayGraph;
use crate::railway::Railway;
use crate::route::Route;

use serde::Serialize;
use smallvec::SmallVec;

/// Public information about the shared board, returned by [`Board::state`].
#[derive(Debug, PartialEq, Serialize)]
pub struct BoardState<'a> {
    pub side_row: &'a [Option<Color>],
    pub draw_pile_size: usize,
    pub route_stack_size: usize,
}

/// The shared board of one game: the card [`Deck`] (draw pile, side row,
/// objective-route stack) and the [`RailwayGraph`].
///
/// The board enforces no turn order; the [`crate::game::Game`] does.
#[derive(Debug)]
pub struct Board {
    deck: Deck,
    graph: RailwayGraph,
}

impl Board {
    /// Builds a board from map data, with the standard five-slot side row.
    ///
    /// # Example
    /// ```
    /// use trunkline::board::Board;
    /// use trunkline::color::Color;
    /// use trunkline::railway::Railway;
    /// use trunkline::route::Route;
    ///
    /// let board = Board::new(
    ///     vec![Railway::new(1, Color::Gray, "Vancouver", "Seattle")],
    ///     vec![Route::new("Vancouver", "Seattle", 2)],
    /// );
    /// assert_eq!(board.cities(), vec!["Seattle", "Vancouver"]);
    /// ```
    pub fn new(railways: Vec<Railway>, routes: Vec<Route>) -> Self {
        Self::with_side_row(railways, routes, STANDARD_SIDE_ROW_SLOTS)
    }

    /// Builds a board with an explicit side-row size (four or five slots,
    /// map-dependent).
    pub fn with_side_row(
        railways: Vec<Railway>,
        routes: Vec<Route>,
        num_side_slots: usize,
    ) -> Self {
        Self {
            deck: Deck::new(routes, num_side_slots),
            graph: RailwayGraph::new(railways),
        }
    }

    /// The standard map: 100 railway edges and 30 objective routes over 36
    /// North-American cities, reproduced verbatim for interoperability.
    pub fn standard_map() -> Self {
        Self::new(Self::standard_railways(), Self::standard_routes())
    }

    fn standard_railways() -> Vec<Railway> {
        vec![
            Railway::new(1, Gray, "Vancouver", "Seattle"),
            Railway::new(1, Gray, "Vancouver", "Seattle"),
            Railway::new(1, Gray, "Portland", "Seattle"),
            Railway::new(1, Gray, "Portland", "Seattle"),
            Railway::new(3, Gray, "Vancouver", "Calgary"),
            Railway::new(4, Gray, "Seattle", "Calgary"),
            Railway::new(6, Yellow, "Seattle", "Helena"),
            Railway::new(4, Gray, "Calgary", "Helena"),
            Railway::new(6, White, "Calgary", "Winnipeg"),
            Railway::new(4, Blue, "Helena", "Winnipeg"),
            Railway::new(6, Blue, "Portland", "Salt Lake City"),
            Railway::new(5, Green, "Portland", "San Francisco"),
            Railway::new(5, Pink, "Portland", "San Francisco"),
            Railway::new(5, Orange, "Salt Lake City", "San Francisco"),
            Railway::new(5, White, "Salt Lake City", "San Francisco"),
            Railway::new(3, Pink, "Salt Lake City", "Helena"),
            Railway::new(3, Orange, "Salt Lake City", "Las Vegas"),
            Railway::new(2, Gray, "Los Angeles", "Las Vegas"),
            Railway::new(3, Pink, "Los Angeles", "San Francisco"),
            Railway::new(3, Yellow, "Los Angeles", "San Francisco"),
            Railway::new(3, Gray, "Los Angeles", "Phoenix"),
            Railway::new(6, Black, "Los Angeles", "El Paso"),
            Railway::new(3, Gray, "Phoenix", "El Paso"),
            Railway::new(5, White, "Phoenix", "Denver"),
            Railway::new(3, Red, "Salt Lake City", "Denver"),
            Railway::new(3, Yellow, "Salt Lake City", "Denver"),
            Railway::new(3, Green, "Helena", "Denver"),
            Railway::new(2, Gray, "Santa Fe", "Denver"),
            Railway::new(3, Gray, "Santa Fe", "Phoenix"),
            Railway::new(2, Gray, "Santa Fe", "El Paso"),
            Railway::new(6, Green, "Houston", "El Paso"),
            Railway::new(4, Red, "Dallas", "El Paso"),
            Railway::new(5, Yellow, "Oklahoma City", "El Paso"),
            Railway::new(3, Blue, "Oklahoma City", "Santa Fe"),
            Railway::new(4, Red, "Oklahoma City", "Denver"),
            Railway::new(4, Black, "Kansas City", "Denver"),
            Railway::new(4, Orange, "Kansas City", "Denver"),
            Railway::new(4, Pink, "Omaha", "Denver"),
            Railway::new(5, Red, "Omaha", "Helena"),
            Railway::new(6, Orange, "Duluth", "Helena"),
            Railway::new(4, Black, "Duluth", "Winnipeg"),
            Railway::new(6, Gray, "Winnipeg", "Sault St. Marie"),
            Railway::new(3, Gray, "Duluth", "Sault St. Marie"),
            Railway::new(2, Gray, "Duluth", "Omaha"),
            Railway::new(2, Gray, "Duluth", "Omaha"),
            Railway::new(1, Gray, "Kansas City", "Omaha"),
            Railway::new(1, Gray, "Kansas City", "Omaha"),
            Railway::new(2, Gray, "Kansas City", "Oklahoma City"),
            Railway::new(2, Gray, "Kansas City", "Oklahoma City"),
            Railway::new(2, Gray, "Dallas", "Oklahoma City"),
            Railway::new(2, Gray, "Dallas", "Oklahoma City"),
            Railway::new(1, Gray, "Dallas", "Houston"),
            Railway::new(1, Gray, "Dallas", "Houston"),
            Railway::new(2, Gray, "New Orleans", "Houston"),
            Railway::new(3, Green, "New Orleans", "Little Rock"),
            Railway::new(2, Gray, "Dallas", "Little Rock"),
            Railway::new(2, Gray, "Oklahoma City", "Little Rock"),
            Railway::new(2, Gray, "Saint Louis", "Little Rock"),
            Railway::new(2, Blue, "Saint Louis", "Kansas City"),
            Railway::new(2, Pink, "Saint Louis", "Kansas City"),
            Railway::new(2, White, "Saint Louis", "Chicago"),
            Railway::new(2, Green, "Saint Louis", "Chicago"),
            Railway::new(4, Blue, "Omaha", "Chicago"),
            Railway::new(3, Red, "Duluth", "Chicago"),
            Railway::new(6, Pink, "Duluth", "Toronto"),
            Railway::new(2, Gray, "Sault St. Marie", "Toronto"),
            Railway::new(5, Black, "Sault St. Marie", "Montreal"),
            Railway::new(2, Gray, "Boston", "Montreal"),
            Railway::new(2, Gray, "Boston", "Montreal"),
            Railway::new(3, Blue, "New York", "Montreal"),
            Railway::new(3, Gray, "Toronto", "Montreal"),
            Railway::new(4, White, "Toronto", "Chicago"),
            Railway::new(2, Gray, "Toronto", "Pittsburgh"),
            Railway::new(3, Black, "Chicago", "Pittsburgh"),
            Railway::new(3, Orange, "Chicago", "Pittsburgh"),
            Railway::new(5, Green, "Saint Louis", "Pittsburgh"),
            Railway::new(4, Yellow, "Nashville", "Pittsburgh"),
            Railway::new(2, Gray, "Nashville", "Saint Louis"),
            Railway::new(3, White, "Nashville", "Little Rock"),
            Railway::new(1, Gray, "Nashville", "Atlanta"),
            Railway::new(4, Yellow, "New Orleans", "Atlanta"),
            Railway::new(4, Orange, "New Orleans", "Atlanta"),
            Railway::new(5, Red, "New Orleans", "Miami"),
            Railway::new(5, Blue, "Atlanta", "Miami"),
            Railway::new(4, Pink, "Charleston", "Miami"),
            Railway::new(2, Gray, "Charleston", "Atlanta"),
            Railway::new(2, Gray, "Charleston", "Raleigh"),
            Railway::new(2, Gray, "Atlanta", "Raleigh"),
            Railway::new(2, Gray, "Atlanta", "Raleigh"),
            Railway::new(3, Black, "Nashville", "Raleigh"),
            Railway::new(2, Gray, "Pittsburgh", "Raleigh"),
            Railway::new(2, Gray, "Washington", "Raleigh"),
            Railway::new(2, Gray, "Washington", "Raleigh"),
            Railway::new(2, Gray, "Washington", "Pittsburgh"),
            Railway::new(2, Orange, "Washington", "New York"),
            Railway::new(2, Black, "Washington", "New York"),
            Railway::new(2, White, "Pittsburgh", "New York"),
            Railway::new(2, Green, "Pittsburgh", "New York"),
            Railway::new(2, Yellow, "Boston", "New York"),
            Railway::new(2, Red, "Boston", "New York"),
        ]
    }

    fn standard_routes() -> Vec<Route> {
        vec![
            Route::new("Denver", "El Paso", 4),
            Route::new("Kansas City", "Houston", 5),
            Route::new("New York", "Atlanta", 6),
            Route::new("Chicago", "New Orleans", 7),
            Route::new("Calgary", "Salt Lake City", 7),
            Route::new("Helena", "Los Angeles", 8),
            Route::new("Duluth", "Houston", 8),
            Route::new("Sault St. Marie", "Nashville", 8),
            Route::new("Montreal", "Atlanta", 9),
            Route::new("Sault St. Marie", "Oklahoma City", 9),
            Route::new("Seattle", "Los Angeles", 9),
            Route::new("Chicago", "Santa Fe", 9),
            Route::new("Duluth", "El Paso", 10),
            Route::new("Toronto", "Miami", 10),
            Route::new("Portland", "Phoenix", 11),
            Route::new("Dallas", "New York City", 11),
            Route::new("Denver", "Pittsburgh", 11),
            Route::new("Winnipeg", "Little Rock", 11),
            Route::new("Winnipeg", "Houston", 12),
            Route::new("Boston", "Miami", 12),
            Route::new("Vancouver", "Santa Fe", 13),
            Route::new("Calgary", "Phoenix", 13),
            Route::new("Montreal", "New Orleans", 13),
            Route::new("Los Angeles", "Chicago", 16),
            Route::new("San Francisco", "Atlanta", 17),
            Route::new("Portland", "Nashville", 17),
            Route::new("Vancouver", "Montreal", 20),
            Route::new("Los Angeles", "Miami", 20),
            Route::new("Los Angeles", "New York City", 21),
            Route::new("Seattle", "New York", 22),
        ]
    }

    /// Pops the top card of the draw pile; `Err` if the pile is empty.
    #[inline]
    pub fn draw_top(&mut self) -> Result<Color, String> {
        self.deck.draw_top()
    }

    /// Takes a visible card, subject to the draw-power rules.
    /// See [`Deck::pick_visible`].
    #[inline]
    pub fn pick_visible(&mut self, index: usize, draw_power: u8) -> Option<Color> {
        self.deck.pick_visible(index, draw_power)
    }

    /// Pops up to `num` objective routes off the stack.
    #[inline]
    pub fn draw_routes(&mut self, num: usize) -> SmallVec<[Route; ROUTES_PER_DRAW]> {
        self.deck.draw_routes(num)
    }

    /// Reinserts a returned objective route at a random stack position.
    #[inline]
    pub fn return_route(&mut self, route: Route) {
        self.deck.return_route(route);
    }

    /// Shuffles spent cards back into the draw pile.
    #[inline]
    pub fn discard_cards(&mut self, cards: impl IntoIterator<Item = Color>) {
        self.deck.discard_cards(cards);
    }

    /// Every city on the map.
    #[inline]
    pub fn cities(&self) -> Vec<&str> {
        self.graph.cities()
    }

    /// Every railway incident to the given city.
    #[inline]
    pub fn incident(&self, city: &str) -> Vec<Railway> {
        self.graph.incident(city)
    }

    /// The cities adjacent to the given one.
    #[inline]
    pub fn adjacent_cities(&self, city: &str) -> Vec<String> {
        self.graph.adjacent_cities(city)
    }

    /// The unclaimed railways incident to the given city.
    #[inline]
    pub fn unclaimed(&self, city: &str) -> Vec<Railway> {
        self.graph.unclaimed(city)
    }

    /// Locates the stored railway matching the given one by value.
    #[inline]
    pub fn find_matching(&self, candidate: &Railway) -> Option<Railway> {
        self.graph.find_matching(candidate)
    }

    /// Claims the stored railway matching `candidate`.
    /// See [`RailwayGraph::claim`].
    #[inline]
    pub fn claim(&self, candidate: &Railway, owner: usize, remove_parallels: bool) -> bool {
        self.graph.claim(candidate, owner, remove_parallels)
    }

    /// The visible side row.
    #[inline]
    pub fn side_row(&self) -> &[Option<Color>] {
        self.deck.side_row()
    }

    /// The board's public state.
    pub fn state(&self) -> BoardState {
        BoardState {
            side_row: self.deck.side_row(),
            draw_pile_size: self.deck.draw_pile_size(),
            route_stack_size: self.deck.route_stack_size(),
        }
    }

    /// Accessor to the deck.
    #[inline]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Mutable accessor to the deck.
    ///
    /// Should only be used for testing!
    pub fn deck_mut(&mut self) -> &mut Deck {
        &mut self.deck
    }

    /// Accessor to the railway graph.
    #[inline]
    pub fn graph(&self) -> &RailwayGraph {
        &self.graph
    }
}
