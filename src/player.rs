use crate::color::Color;
use crate::network::Network;
use crate::railway::Railway;
use crate::route::Route;

use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Every player starts the game with 45 trains.
pub const STARTING_TRAINS: u8 = 45;

/// Public information about a player, returned by [`Player::state`].
///
/// The hand itself is private; only its size is reported here.
#[derive(Debug, PartialEq, Serialize)]
pub struct PlayerState<'a> {
    pub name: &'a str,
    pub points: i32,
    pub trains: u8,
    pub num_cards: u32,
    pub num_railways: usize,
    pub num_routes: usize,
}

/// One participant: a hand of cards by color, the owned railways, the held
/// objective routes, the score, the remaining train stock, and the
/// connectivity [`Network`] derived from the owned railways.
///
/// A `Player` is not aware of the other players or of whose turn it is;
/// move legality across players is the [`crate::game::Game`]'s business.
#[derive(Debug)]
pub struct Player {
    name: String,
    hand: HashMap<Color, u32>,
    owned_railways: HashSet<Railway>,
    routes: HashSet<Route>,
    network: Network,
    points: i32,
    trains: u8,
}

impl Player {
    /// Creates a player with an empty hand (every card color mapped to
    /// zero), no railways, no routes, and a full train stock.
    pub fn new(name: impl Into<String>) -> Self {
        let hand = HashMap::from_iter(Color::card_colors().map(|color| (color, 0)));

        Self {
            name: name.into(),
            hand,
            owned_railways: HashSet::new(),
            routes: HashSet::new(),
            network: Network::new(),
            points: 0,
            trains: STARTING_TRAINS,
        }
    }

    /// Access the player's name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a card to the hand. Gray is not a card; adding one is a
    /// programming error and panics.
    pub fn add_card(&mut self, color: Color) {
        assert!(
            color.is_not_gray(),
            "a gray card cannot enter a player's hand"
        );

        self.hand.entry(color).and_modify(|count| *count += 1);
    }

    /// How many cards of the given color the player holds.
    #[inline]
    pub fn card_count(&self, color: Color) -> u32 {
        self.hand.get(&color).copied().unwrap_or(0)
    }

    /// How many cards the player holds in total.
    pub fn num_cards(&self) -> u32 {
        self.hand.values().sum()
    }

    /// The hand, as a count per card color.
    #[inline]
    pub fn hand(&self) -> &HashMap<Color, u32> {
        &self.hand
    }

    /// Whether the hand covers every count in the given offer.
    pub fn has_cards(&self, offer: &HashMap<Color, u32>) -> bool {
        offer
            .iter()
            .all(|(color, count)| self.card_count(*color) >= *count)
    }

    /// Removes the offered cards from the hand. The caller must have
    /// checked [`Player::has_cards`] first; an uncovered offer panics.
    pub fn remove_cards(&mut self, offer: &HashMap<Color, u32>) {
        assert!(
            self.has_cards(offer),
            "cannot remove cards that are not in the hand"
        );

        for (color, count) in offer {
            self.hand.entry(*color).and_modify(|held| *held -= count);
        }
    }

    /// Records a claimed railway and folds its endpoints into the
    /// connectivity network.
    pub fn add_railway(&mut self, railway: Railway) {
        self.network.add_railway(&railway);
        self.owned_railways.insert(railway);
    }

    /// Gives up an owned railway. Returns whether it was owned; when it
    /// was, the connectivity network is rebuilt from the remaining
    /// railways.
    pub fn remove_railway(&mut self, railway: &Railway) -> bool {
        if !self.owned_railways.remove(railway) {
            return false;
        }

        self.network.rebuild(self.owned_railways.iter());
        true
    }

    /// Whether the player owns the given railway.
    #[inline]
    pub fn owns_railway(&self, railway: &Railway) -> bool {
        self.owned_railways.contains(railway)
    }

    /// The railways the player owns.
    #[inline]
    pub fn owned_railways(&self) -> &HashSet<Railway> {
        &self.owned_railways
    }

    /// Takes an objective route into the held set.
    #[inline]
    pub fn add_route(&mut self, route: Route) {
        self.routes.insert(route);
    }

    /// Gives up a held objective route. Returns whether it was held.
    #[inline]
    pub fn remove_route(&mut self, route: &Route) -> bool {
        self.routes.remove(route)
    }

    /// Whether the player holds the given objective route.
    #[inline]
    pub fn has_route(&self, route: &Route) -> bool {
        self.routes.contains(route)
    }

    /// The objective routes the player holds.
    #[inline]
    pub fn routes(&self) -> &HashSet<Route> {
        &self.routes
    }

    /// Adds to (or, with a negative delta, subtracts from) the score.
    #[inline]
    pub fn add_points(&mut self, delta: i32) {
        self.points += delta;
    }

    /// The player's score.
    #[inline]
    pub fn points(&self) -> i32 {
        self.points
    }

    /// Spends trains from the stock. Spending more than the stock holds is
    /// a programming error and panics; the claim validation checks first.
    pub fn remove_trains(&mut self, num: u8) {
        assert!(
            num <= self.trains,
            "cannot spend {} trains with only {} left",
            num,
            self.trains
        );

        self.trains -= num;
    }

    /// How many trains the player has left.
    #[inline]
    pub fn trains(&self) -> u8 {
        self.trains
    }

    /// Whether the player's railways connect the two cities.
    #[inline]
    pub fn connected(&self, city_a: &str, city_b: &str) -> bool {
        self.network.connected(city_a, city_b)
    }

    /// The player's connectivity partition.
    #[inline]
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// The total length of the player's largest connected group of
    /// railways, or `None` if they own none.
    pub fn longest_aggregate(&self) -> Option<u32> {
        Network::longest_aggregate(&self.owned_railways)
    }

    /// The player's public state.
    pub fn state(&self) -> PlayerState {
        PlayerState {
            name: &self.name,
            points: self.points,
            trains: self.trains,
            num_cards: self.num_cards(),
            num_railways: self.owned_railways.len(),
            num_routes: self.routes.len(),
        }
    }
}
