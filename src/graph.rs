use crate::railway::Railway;

use smallvec::SmallVec;
use std::collections::BTreeMap;

/// All railways directly connecting two adjacent cities.
/// Most city pairs have one railway; a few have two parallel ones.
pub type ParallelRailways = SmallVec<[Railway; 2]>;

/// The adjacency structure over cities, built from a railway list.
///
/// Every railway is stored under both of its endpoints; the two entries are
/// clones sharing one claim cell, so claiming through either is observed by
/// both (and by any player-held clone). Claimed railways stay in the graph;
/// they are only excluded from the [`RailwayGraph::unclaimed`] query.
///
/// Not thread-safe.
#[derive(Debug)]
pub struct RailwayGraph {
    adjacency: BTreeMap<String, BTreeMap<String, ParallelRailways>>,
}

impl RailwayGraph {
    /// Builds the symmetric adjacency map from an edge list. Parallel
    /// railways between the same two cities are preserved as distinct
    /// entries, whether or not their colors differ.
    pub fn new(railways: Vec<Railway>) -> Self {
        let mut adjacency: BTreeMap<String, BTreeMap<String, ParallelRailways>> = BTreeMap::new();

        for railway in railways {
            let city_a = railway.endpoint_a().to_owned();
            let city_b = railway.endpoint_b().to_owned();

            adjacency
                .entry(city_a.clone())
                .or_default()
                .entry(city_b.clone())
                .or_default()
                .push(railway.clone());
            adjacency
                .entry(city_b)
                .or_default()
                .entry(city_a)
                .or_default()
                .push(railway);
        }

        Self { adjacency }
    }

    /// Every city on the map, in lexicographic order.
    pub fn cities(&self) -> Vec<&str> {
        self.adjacency.keys().map(String::as_str).collect()
    }

    /// Whether the given city appears on the map.
    pub fn contains_city(&self, city: &str) -> bool {
        self.adjacency.contains_key(city)
    }

    /// Every railway incident to the given city, claimed or not.
    /// Unknown cities have no incident railways.
    pub fn incident(&self, city: &str) -> Vec<Railway> {
        match self.adjacency.get(city) {
            Some(neighbors) => neighbors.values().flatten().cloned().collect(),
            None => Vec::new(),
        }
    }

    /// The deduplicated list of cities adjacent to the given one.
    pub fn adjacent_cities(&self, city: &str) -> Vec<String> {
        match self.adjacency.get(city) {
            Some(neighbors) => neighbors.keys().cloned().collect(),
            None => Vec::new(),
        }
    }

    /// Every unclaimed railway incident to the given city.
    pub fn unclaimed(&self, city: &str) -> Vec<Railway> {
        match self.adjacency.get(city) {
            Some(neighbors) => neighbors
                .values()
                .flatten()
                .filter(|railway| !railway.is_claimed())
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    /// Locates a stored railway equal to `candidate` (same unordered
    /// endpoints, color, and length). Callers reconstruct railways by value,
    /// so the lookup cannot rely on shared identity.
    ///
    /// When parallel railways are value-equal, an unclaimed one is preferred,
    /// so that a claimable instance is found as long as one exists.
    pub fn find_matching(&self, candidate: &Railway) -> Option<Railway> {
        let parallels = self
            .adjacency
            .get(candidate.endpoint_a())?
            .get(candidate.endpoint_b())?;

        let mut fallback = None;
        for railway in parallels {
            if railway != candidate {
                continue;
            }

            if !railway.is_claimed() {
                return Some(railway.clone());
            }
            fallback = Some(railway.clone());
        }

        fallback
    }

    /// Claims the stored, unclaimed railway matching `candidate` for the
    /// given player. Returns `false` (without mutating anything) if no such
    /// railway exists.
    ///
    /// With `remove_parallels` (the house rule for games of four or more
    /// players), every other railway sharing the same unordered endpoint
    /// pair is also marked claimed, ownerless: once any player takes a city
    /// pair, its duplicates vanish from play.
    pub fn claim(&self, candidate: &Railway, owner: usize, remove_parallels: bool) -> bool {
        let parallels = match self
            .adjacency
            .get(candidate.endpoint_a())
            .and_then(|neighbors| neighbors.get(candidate.endpoint_b()))
        {
            Some(parallels) => parallels,
            None => return false,
        };

        let target = parallels
            .iter()
            .find(|railway| *railway == candidate && !railway.is_claimed());
        match target {
            Some(railway) => railway.claim_for(Some(owner)),
            None => return false,
        }

        if remove_parallels {
            for railway in parallels {
                if !railway.is_claimed() {
                    railway.claim_for(None);
                }
            }
        }

        true
    }
}
