use crate::board::{Board, BoardState};
use crate::color::Color;
use crate::deck::ROUTES_PER_DRAW;
use crate::player::{Player, PlayerState};
use crate::railway::Railway;
use crate::route::Route;

use serde::Serialize;
use smallvec::SmallVec;
use std::collections::HashMap;

/// Every turn starts with this much draw power.
pub const FULL_DRAW_POWER: u8 = 2;
/// Taking a visible wildcard costs the whole turn's draw power.
const WILD_DRAW_COST: u8 = 2;
/// Each player is dealt this many cards when the game starts.
const INITIAL_HAND_SIZE: usize = 4;
/// How many of the just-drawn objective routes may be returned per draw.
const ROUTE_RETURN_ALLOWANCE: u8 = 1;
/// The endgame countdown arms once any player's train stock drops below
/// this.
const LOW_TRAIN_THRESHOLD: u8 = 3;

/// Phases of the game, which act as states in the game's finite-state
/// machine.
///
/// Within [`GamePhase::Playing`] and [`GamePhase::LastTurns`], the current
/// player's remaining draw power distinguishes a fresh turn
/// ([`FULL_DRAW_POWER`]) from a half-spent one.
///
/// # JSON
/// Phases are serialized in snake_case.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Before [`Game::start_game`]: no move is legal yet.
    NotStarted,
    /// The main turn-based phase.
    Playing,
    /// A player dropped below the low-train threshold: the endgame
    /// countdown is running and every player gets one more turn.
    LastTurns,
    /// Final scoring has run. No move is legal anymore.
    Done,
}

/// Receives the game's notifications.
///
/// Listeners are invoked synchronously, in registration order, on the
/// calling thread, before the triggering call returns. A listener must not
/// call back into the [`Game`] that is notifying it; reentrancy is
/// unsupported.
pub trait GameListener {
    /// A new turn has begun (final scoring, if any, has already run).
    fn turn_changed(&mut self, _new_turn: usize) {}

    /// A move was applied; `description` is a human-readable sentence with
    /// no private information in it.
    fn action(&mut self, _description: &str) {}
}

/// All the information about a game's current state, returned by
/// [`Game::state`]. Only public information is included: hands are reported
/// by size.
#[derive(Serialize)]
pub struct GameState<'a> {
    pub phase: GamePhase,
    pub turn: usize,
    pub draw_power: u8,
    pub endgame_countdown: Option<usize>,
    pub board: BoardState<'a>,
    pub players: Vec<PlayerState<'a>>,
}

/// The window in which the player who just drew objective routes may return
/// one of them. Any other successful move closes the window.
struct PendingRouteReturn {
    player_index: usize,
    remaining: u8,
    drawn: SmallVec<[Route; ROUTES_PER_DRAW]>,
}

/// The turn controller: owns the board and the ordered players, validates
/// and applies every move, advances turns, arms and runs the end-of-game
/// countdown, and fires notifications.
///
/// Illegal moves (bad indices, insufficient draw power, wrong payment
/// totals, already-claimed targets) return `false` and leave every piece
/// of state untouched. Running out of cards or routes is likewise reported
/// through the return value, never by panicking.
///
/// The engine is single-threaded and synchronous: every operation runs to
/// completion before the next call is accepted, and a `Game` must be driven
/// by one logical caller at a time.
pub struct Game {
    board: Board,
    players: Vec<Player>,
    turn: usize,
    draw_power: u8,
    phase: GamePhase,
    /// `None` until the countdown arms; then the number of turns left.
    countdown: Option<usize>,
    pending_route_return: Option<PendingRouteReturn>,
    listeners: Vec<(usize, Box<dyn GameListener>)>,
    next_listener_id: usize,
}

impl Game {
    /// Creates a game over the given board for a fixed number of players,
    /// named "Player 0", "Player 1", and so on.
    ///
    /// Fails if there are no players.
    ///
    /// # Example
    /// ```
    /// use trunkline::board::Board;
    /// use trunkline::game::Game;
    ///
    /// let game = Game::new(Board::standard_map(), 2);
    /// assert!(game.is_ok());
    ///
    /// let game = Game::new(Board::standard_map(), 0);
    /// assert!(game.is_err());
    /// ```
    pub fn new(board: Board, num_players: usize) -> Result<Self, String> {
        let names = (0..num_players)
            .map(|index| format!("Player {}", index))
            .collect();

        Self::with_player_names(board, names)
    }

    /// Creates a game with custom player names, seated in the given order.
    pub fn with_player_names(board: Board, names: Vec<String>) -> Result<Self, String> {
        if names.is_empty() {
            return Err(String::from("Cannot create a game without any players."));
        }

        Ok(Self {
            board,
            players: names.into_iter().map(Player::new).collect(),
            turn: 0,
            draw_power: FULL_DRAW_POWER,
            phase: GamePhase::NotStarted,
            countdown: None,
            pending_route_return: None,
            listeners: Vec::new(),
            next_listener_id: 0,
        })
    }

    /// Deals every player, in seating order, four cards and three objective
    /// routes, then opens the turn-based game with player 0.
    ///
    /// Must be called exactly once before any move; a second call (or a
    /// call after the game ended) returns `false` and deals nothing.
    pub fn start_game(&mut self) -> bool {
        if self.phase != GamePhase::NotStarted {
            return false;
        }

        for index in 0..self.players.len() {
            for _ in 0..INITIAL_HAND_SIZE {
                // A standard deck cannot run dry during the deal; a smaller
                // custom deck simply deals short.
                match self.board.draw_top() {
                    Ok(card) => self.players[index].add_card(card),
                    Err(_) => break,
                }
            }

            for route in self.board.draw_routes(ROUTES_PER_DRAW) {
                self.players[index].add_route(route);
            }
        }

        self.phase = GamePhase::Playing;
        self.turn = 0;
        self.draw_power = FULL_DRAW_POWER;

        let description = format!("The game has started with {} players.", self.players.len());
        self.emit_action(&description);

        true
    }

    /// The current player draws the top card of the pile into their hand,
    /// spending one draw power; the turn advances once the power is spent.
    ///
    /// Returns `false`, without drawing, if the pile is empty or the game
    /// is not in play.
    pub fn pick_random(&mut self) -> bool {
        if !self.in_play() {
            return false;
        }

        let card = match self.board.draw_top() {
            Ok(card) => card,
            Err(_) => return false,
        };

        self.pending_route_return = None;
        self.players[self.turn].add_card(card);
        self.draw_power -= 1;

        let description = format!(
            "{} drew a card from the draw pile.",
            self.players[self.turn].name()
        );
        self.emit_action(&description);

        if self.draw_power == 0 {
            self.advance_turn();
        }

        true
    }

    /// The current player takes the visible card at `index` into their
    /// hand. A concrete color costs one draw power; a wildcard costs two
    /// and is therefore only legal as the turn's sole draw. The turn
    /// advances once the power is spent.
    ///
    /// Returns `false`, mutating nothing, on a bad index, an empty slot, or
    /// insufficient draw power.
    pub fn pick_card(&mut self, index: usize) -> bool {
        if !self.in_play() {
            return false;
        }

        let card = match self.board.pick_visible(index, self.draw_power) {
            Some(card) => card,
            None => return false,
        };

        self.pending_route_return = None;
        self.players[self.turn].add_card(card);
        self.draw_power -= if card.is_wild() { WILD_DRAW_COST } else { 1 };

        let description = format!(
            "{} took the visible {} card.",
            self.players[self.turn].name(),
            card
        );
        self.emit_action(&description);

        if self.draw_power == 0 {
            self.advance_turn();
        }

        true
    }

    /// The current player draws up to three objective routes off the stack,
    /// consuming the entire turn regardless of how many came off.
    ///
    /// Returns `false` if the stack yielded nothing (the turn is still
    /// consumed, so the caller can report the empty stack), or if the
    /// player has already spent draw power this turn.
    ///
    /// Until the next successful move by anyone, the drawing player may
    /// give one of the just-drawn routes back via [`Game::return_route`].
    pub fn draw_routes(&mut self) -> bool {
        if !self.in_play() || self.draw_power != FULL_DRAW_POWER {
            return false;
        }

        let drawn = self.board.draw_routes(ROUTES_PER_DRAW);
        let player_index = self.turn;
        for route in drawn.iter().cloned() {
            self.players[player_index].add_route(route);
        }

        let description = format!(
            "{} drew {} objective routes.",
            self.players[player_index].name(),
            drawn.len()
        );
        self.emit_action(&description);

        let success = !drawn.is_empty();
        self.pending_route_return = Some(PendingRouteReturn {
            player_index,
            remaining: ROUTE_RETURN_ALLOWANCE,
            drawn,
        });
        self.advance_turn();

        success
    }

    /// Gives one just-drawn objective route back to the stack, reinserting
    /// it at a random position.
    ///
    /// This is only permitted for the player whose [`Game::draw_routes`]
    /// call was the last successful move, at most once per draw, and only
    /// for a route of that draw. Returns `false`, mutating nothing,
    /// otherwise.
    pub fn return_route(&mut self, player: usize, route: &Route) -> bool {
        if self.phase == GamePhase::NotStarted || self.phase == GamePhase::Done {
            return false;
        }

        let eligible = match &self.pending_route_return {
            Some(pending) => {
                pending.player_index == player
                    && pending.remaining > 0
                    && pending.drawn.contains(route)
            }
            None => false,
        };
        if !eligible {
            return false;
        }

        if !self.players[player].remove_route(route) {
            return false;
        }

        if let Some(pending) = self.pending_route_return.as_mut() {
            pending.remaining -= 1;
            if let Some(index) = pending.drawn.iter().position(|drawn| drawn == route) {
                pending.drawn.remove(index);
            }
        }

        self.board.return_route(route.clone());

        let description = format!(
            "{} returned an objective route to the stack.",
            self.players[player].name()
        );
        self.emit_action(&description);

        true
    }

    /// The current player claims a railway, paying with the offered cards.
    ///
    /// Claiming is an all-or-nothing action consuming the entire turn, so
    /// it requires full draw power. The offer must be covered by the hand,
    /// must only contain cards the target edge accepts (a gray edge takes
    /// any *one* concrete color plus wildcards; a colored edge takes its
    /// own color plus wildcards), and must total exactly the railway's
    /// length. The player must also have that many trains left.
    ///
    /// On success the railway is claimed (removing its parallels from play
    /// in games of more than three players), the cards and trains are
    /// spent, the railway joins the player's network, points are awarded by
    /// the length table, and the turn advances. Any failed precondition
    /// returns `false` with every piece of state untouched.
    pub fn claim_railway(&mut self, railway: &Railway, cards_offered: &HashMap<Color, u32>) -> bool {
        if !self.in_play() || self.draw_power != FULL_DRAW_POWER {
            return false;
        }

        let target = match self.board.find_matching(railway) {
            Some(target) => target,
            None => return false,
        };
        if target.is_claimed() {
            return false;
        }

        let player = &self.players[self.turn];
        if !player.has_cards(cards_offered) {
            return false;
        }
        if !payment_matches(&target, cards_offered) {
            return false;
        }
        if player.trains() < target.length() {
            return false;
        }

        let remove_parallels = self.players.len() > 3;
        if !self.board.claim(&target, self.turn, remove_parallels) {
            // The checks above make this unreachable, but a claim that did
            // not happen must not be paid for.
            return false;
        }

        self.pending_route_return = None;

        let length = target.length();
        let points = Self::points_for_length(length);
        let player = &mut self.players[self.turn];
        player.remove_cards(cards_offered);
        player.remove_trains(length);
        player.add_points(points);
        player.add_railway(target.clone());

        let spent = cards_offered
            .iter()
            .flat_map(|(color, count)| std::iter::repeat(*color).take(*count as usize))
            .collect::<Vec<Color>>();
        self.board.discard_cards(spent);

        let description = format!(
            "{} claimed the {} for {} points.",
            self.players[self.turn].name(),
            target,
            points
        );
        self.emit_action(&description);
        self.advance_turn();

        true
    }

    /// The fixed length-to-score table for claimed railways.
    ///
    /// Supported map data only contains lengths one through six; asking for
    /// anything longer is a programming error and panics.
    pub fn points_for_length(length: u8) -> i32 {
        match length {
            1 => 1,
            2 => 2,
            3 => 4,
            4 => 7,
            5 => 10,
            6 => 15,
            _ => panic!("no score is defined for a railway of length {}", length),
        }
    }

    /// Resets the draw power, passes the turn to the next player, and runs
    /// the endgame bookkeeping: the countdown arms (once) when any player
    /// is low on trains, then decrements per turn, and final scoring runs
    /// when it strikes zero, before the turn-change notification fires.
    fn advance_turn(&mut self) {
        self.draw_power = FULL_DRAW_POWER;
        self.turn = (self.turn + 1) % self.players.len();

        match self.countdown {
            None => {
                if self
                    .players
                    .iter()
                    .any(|player| player.trains() < LOW_TRAIN_THRESHOLD)
                {
                    self.countdown = Some(self.players.len());
                    self.phase = GamePhase::LastTurns;
                    self.emit_action(
                        "A player is almost out of trains: every player has one turn left.",
                    );
                }
            }
            Some(remaining) => {
                let remaining = remaining - 1;
                self.countdown = Some(remaining);
                if remaining == 0 {
                    self.end_game();
                }
            }
        }

        let turn = self.turn;
        self.emit_turn_changed(turn);
    }

    /// Scores every held objective route (`+value` if its endpoints are
    /// connected for the holder, `-value` otherwise) and closes the game.
    fn end_game(&mut self) {
        for player in &mut self.players {
            let delta: i32 = player
                .routes()
                .iter()
                .map(|route| {
                    let (city_a, city_b) = route.endpoints();
                    let value = route.value() as i32;
                    if player.connected(city_a, city_b) {
                        value
                    } else {
                        -value
                    }
                })
                .sum();
            player.add_points(delta);
        }

        self.phase = GamePhase::Done;

        let scores = self
            .players
            .iter()
            .map(|player| format!("{}: {}", player.name(), player.points()))
            .collect::<Vec<String>>()
            .join(", ");
        let description = format!("The game has ended. Final scores: {}.", scores);
        self.emit_action(&description);
    }

    #[inline]
    fn in_play(&self) -> bool {
        self.phase == GamePhase::Playing || self.phase == GamePhase::LastTurns
    }

    /// Registers a listener and returns the id to unsubscribe it with.
    pub fn subscribe(&mut self, listener: Box<dyn GameListener>) -> usize {
        let id = self.next_listener_id;
        self.next_listener_id += 1;
        self.listeners.push((id, listener));

        id
    }

    /// Unregisters a previously subscribed listener. Returns whether the id
    /// was known.
    pub fn unsubscribe(&mut self, id: usize) -> bool {
        match self
            .listeners
            .iter()
            .position(|(listener_id, _)| *listener_id == id)
        {
            Some(index) => {
                self.listeners.remove(index);
                true
            }
            None => false,
        }
    }

    fn emit_action(&mut self, description: &str) {
        for (_, listener) in &mut self.listeners {
            listener.action(description);
        }
    }

    fn emit_turn_changed(&mut self, new_turn: usize) {
        for (_, listener) in &mut self.listeners {
            listener.turn_changed(new_turn);
        }
    }

    /// The shared board.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable accessor to the board.
    ///
    /// Should only be used for testing!
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// The players, in seating order.
    #[inline]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// One player, by seating index.
    #[inline]
    pub fn player(&self, index: usize) -> &Player {
        &self.players[index]
    }

    /// Mutable accessor to one player.
    ///
    /// Should only be used for testing!
    pub fn player_mut(&mut self, index: usize) -> &mut Player {
        &mut self.players[index]
    }

    /// The number of players.
    #[inline]
    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    /// Whose turn it is.
    #[inline]
    pub fn current_turn(&self) -> usize {
        self.turn
    }

    /// How much draw power the current player has left this turn.
    #[inline]
    pub fn draw_power(&self) -> u8 {
        self.draw_power
    }

    /// The game's phase.
    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// The endgame countdown: `None` while inactive, otherwise the number
    /// of turns left before final scoring.
    #[inline]
    pub fn endgame_countdown(&self) -> Option<usize> {
        self.countdown
    }

    /// The game's public state.
    pub fn state(&self) -> GameState {
        GameState {
            phase: self.phase,
            turn: self.turn,
            draw_power: self.draw_power,
            endgame_countdown: self.countdown,
            board: self.board.state(),
            players: self.players.iter().map(Player::state).collect(),
        }
    }
}

/// Whether the offered cards are a legal, exact payment for the railway:
/// every offered card must be accepted by the edge, concrete colors must
/// not mix, and the total must equal the length.
fn payment_matches(railway: &Railway, cards_offered: &HashMap<Color, u32>) -> bool {
    let mut total = 0u32;
    let mut concrete_color = None;

    for (color, count) in cards_offered {
        if *count == 0 {
            continue;
        }
        if color.is_gray() || !railway.color().accepts(*color) {
            return false;
        }
        if color.is_concrete() {
            match concrete_color {
                Some(existing) if existing != *color => return false,
                _ => concrete_color = Some(*color),
            }
        }

        total += count;
    }

    total == u32::from(railway.length())
}
