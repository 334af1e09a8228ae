use crate::railway::Railway;

use std::collections::HashSet;

/// One player's view of which cities their railways connect: a partition of
/// the touched cities into disjoint connected components.
///
/// Adding a railway merges the (at most two) components its endpoints touch.
/// Removing one can split a component, which a merge structure cannot undo,
/// so removal rebuilds the partition from the remaining railways.
#[derive(Clone, Debug, Default)]
pub struct Network {
    components: Vec<HashSet<String>>,
}

impl Network {
    /// Creates an empty network: no railways, no cities, no components.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a newly owned railway: every existing component touching one
    /// of its endpoints is folded, together with both endpoints, into a
    /// single new component.
    pub fn add_railway(&mut self, railway: &Railway) {
        let mut merged = HashSet::from([
            railway.endpoint_a().to_owned(),
            railway.endpoint_b().to_owned(),
        ]);

        // Scan backwards so removals do not shift unvisited entries.
        for index in (0..self.components.len()).rev() {
            if railway.touches(&self.components[index]) {
                merged.extend(self.components.swap_remove(index));
            }
        }

        self.components.push(merged);
    }

    /// Rebuilds the partition from scratch by replaying `add_railway` over
    /// the given railways. Called after a railway is removed, since an
    /// incremental removal is not well-defined on a merge structure.
    pub fn rebuild<'a>(&mut self, railways: impl IntoIterator<Item = &'a Railway>) {
        self.components.clear();

        for railway in railways {
            self.add_railway(railway);
        }
    }

    /// Whether the two cities lie in the same connected component.
    pub fn connected(&self, city_a: &str, city_b: &str) -> bool {
        self.components
            .iter()
            .any(|component| component.contains(city_a) && component.contains(city_b))
    }

    /// The current partition. Every city in it is touched by at least one
    /// owned railway.
    pub fn components(&self) -> &[HashSet<String>] {
        &self.components
    }

    /// Groups the given railways into connected components and sums each
    /// component's total railway length; returns the largest total, or
    /// `None` if there are no railways.
    ///
    /// # Example
    /// ```
    /// use std::collections::HashSet;
    /// use trunkline::color::Color;
    /// use trunkline::network::Network;
    /// use trunkline::railway::Railway;
    ///
    /// let owned = HashSet::from([
    ///     Railway::new(3, Color::Gray, "El Paso", "Phoenix"),
    ///     Railway::new(5, Color::White, "Phoenix", "Denver"),
    ///     Railway::new(2, Color::Gray, "Boston", "Montreal"),
    /// ]);
    ///
    /// // El Paso - Phoenix - Denver totals 8; Boston - Montreal totals 2.
    /// assert_eq!(Network::longest_aggregate(&owned), Some(8));
    /// ```
    pub fn longest_aggregate(railways: &HashSet<Railway>) -> Option<u32> {
        let mut groups: Vec<(HashSet<String>, u32)> = Vec::new();

        for railway in railways {
            let mut cities = HashSet::from([
                railway.endpoint_a().to_owned(),
                railway.endpoint_b().to_owned(),
            ]);
            let mut total = u32::from(railway.length());

            for index in (0..groups.len()).rev() {
                if railway.touches(&groups[index].0) {
                    let (component, length) = groups.swap_remove(index);
                    cities.extend(component);
                    total += length;
                }
            }

            groups.push((cities, total));
        }

        groups.into_iter().map(|(_, total)| total).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::color::Color;

    fn cities(names: &[&str]) -> HashSet<String> {
        names.iter().map(|name| String::from(*name)).collect()
    }

    #[test]
    fn new_network_is_empty() {
        let network = Network::new();

        assert!(network.components().is_empty());
        assert!(!network.connected("Seattle", "Portland"));
    }

    #[test]
    fn add_railway_connects_its_endpoints() {
        let mut network = Network::new();
        network.add_railway(&Railway::new(1, Color::Gray, "Seattle", "Portland"));

        assert!(network.connected("Seattle", "Portland"));
        assert!(network.connected("Portland", "Seattle"));
        assert!(!network.connected("Seattle", "Calgary"));
        assert_eq!(network.components(), &[cities(&["Seattle", "Portland"])]);
    }

    #[test]
    fn disjoint_railways_form_separate_components() {
        let mut network = Network::new();
        network.add_railway(&Railway::new(1, Color::Gray, "Seattle", "Portland"));
        network.add_railway(&Railway::new(5, Color::Blue, "Atlanta", "Miami"));

        assert_eq!(network.components().len(), 2);
        assert!(!network.connected("Seattle", "Miami"));
    }

    #[test]
    fn bridging_railway_merges_components() {
        let mut network = Network::new();
        network.add_railway(&Railway::new(1, Color::Gray, "Seattle", "Portland"));
        network.add_railway(&Railway::new(4, Color::Gray, "Calgary", "Helena"));
        network.add_railway(&Railway::new(4, Color::Gray, "Seattle", "Calgary"));

        assert_eq!(network.components().len(), 1);
        assert_eq!(
            network.components(),
            &[cities(&["Seattle", "Portland", "Calgary", "Helena"])]
        );
        assert!(network.connected("Portland", "Helena"));
    }

    #[test]
    fn add_railway_preserves_existing_connections() {
        let mut network = Network::new();
        let railways = [
            Railway::new(1, Color::Gray, "Seattle", "Portland"),
            Railway::new(6, Color::Blue, "Portland", "Salt Lake City"),
            Railway::new(5, Color::Red, "Omaha", "Helena"),
        ];
        for railway in &railways {
            network.add_railway(railway);
        }

        let connected_before: Vec<(&str, &str)> = vec![
            ("Seattle", "Salt Lake City"),
            ("Omaha", "Helena"),
            ("Seattle", "Portland"),
        ];

        network.add_railway(&Railway::new(6, Color::Yellow, "Seattle", "Helena"));

        for (city_a, city_b) in connected_before {
            assert!(network.connected(city_a, city_b));
        }
        assert!(network.connected("Salt Lake City", "Omaha"));
    }

    #[test]
    fn rebuild_matches_a_replay_from_empty() {
        let retained = [
            Railway::new(1, Color::Gray, "Seattle", "Portland"),
            Railway::new(4, Color::Gray, "Seattle", "Calgary"),
            Railway::new(5, Color::Blue, "Atlanta", "Miami"),
        ];
        let removed = Railway::new(4, Color::Gray, "Calgary", "Helena");

        let mut network = Network::new();
        for railway in &retained {
            network.add_railway(railway);
        }
        network.add_railway(&removed);
        network.rebuild(retained.iter());

        let mut replayed = Network::new();
        for railway in &retained {
            replayed.add_railway(railway);
        }

        let mut actual: Vec<Vec<String>> = network
            .components()
            .iter()
            .map(|component| {
                let mut cities: Vec<String> = component.iter().cloned().collect();
                cities.sort();
                cities
            })
            .collect();
        actual.sort();
        let mut expected: Vec<Vec<String>> = replayed
            .components()
            .iter()
            .map(|component| {
                let mut cities: Vec<String> = component.iter().cloned().collect();
                cities.sort();
                cities
            })
            .collect();
        expected.sort();

        assert_eq!(actual, expected);
        assert!(!network.connected("Calgary", "Helena"));
    }

    #[test]
    fn rebuild_after_removal_can_split_a_component() {
        let bridge = Railway::new(3, Color::Pink, "Salt Lake City", "Helena");
        let remaining = [
            Railway::new(6, Color::Blue, "Portland", "Salt Lake City"),
            Railway::new(6, Color::Yellow, "Seattle", "Helena"),
        ];

        let mut network = Network::new();
        network.add_railway(&remaining[0]);
        network.add_railway(&remaining[1]);
        network.add_railway(&bridge);
        assert!(network.connected("Portland", "Seattle"));

        network.rebuild(remaining.iter());
        assert!(!network.connected("Portland", "Seattle"));
        assert_eq!(network.components().len(), 2);
    }

    #[test]
    fn longest_aggregate_of_nothing() {
        assert_eq!(Network::longest_aggregate(&HashSet::new()), None);
    }

    #[test]
    fn longest_aggregate_single_railway() {
        let owned = HashSet::from([Railway::new(4, Color::Red, "Dallas", "El Paso")]);

        assert_eq!(Network::longest_aggregate(&owned), Some(4));
    }

    #[test]
    fn longest_aggregate_picks_the_heaviest_component() {
        let owned = HashSet::from([
            Railway::new(3, Color::Gray, "El Paso", "Phoenix"),
            Railway::new(5, Color::White, "Phoenix", "Denver"),
            Railway::new(2, Color::Gray, "Santa Fe", "Denver"),
            Railway::new(2, Color::Gray, "Boston", "Montreal"),
            Railway::new(5, Color::Black, "Sault St. Marie", "Montreal"),
        ]);

        // 3 + 5 + 2 in the southwest against 2 + 5 in the northeast.
        assert_eq!(Network::longest_aggregate(&owned), Some(10));
    }
}
