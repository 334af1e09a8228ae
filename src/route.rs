use serde::Serialize;

/// An objective card: connect two cities for a reward.
///
/// At the end of the game, a player holding this card gains `value` points
/// if the two endpoints are connected through their railways, and loses
/// `value` points otherwise.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct Route {
    endpoint_a: String,
    endpoint_b: String,
    value: u32,
}

impl Route {
    /// Creates an objective route. The point value must be positive.
    pub fn new(endpoint_a: impl Into<String>, endpoint_b: impl Into<String>, value: u32) -> Self {
        assert!(value > 0, "an objective route must have a positive value");

        Self {
            endpoint_a: endpoint_a.into(),
            endpoint_b: endpoint_b.into(),
            value,
        }
    }

    /// The two cities to connect.
    #[inline]
    pub fn endpoints(&self) -> (&str, &str) {
        (&self.endpoint_a, &self.endpoint_b)
    }

    /// How many points this route awards when fulfilled, and costs when not.
    #[inline]
    pub fn value(&self) -> u32 {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;

    #[test]
    #[should_panic(expected = "positive value")]
    fn route_with_zero_value_panics() {
        Route::new("Boston", "Miami", 0);
    }

    #[test]
    fn route_equality_is_by_value() {
        let route = Route::new("Boston", "Miami", 12);

        assert_eq!(route, Route::new("Boston", "Miami", 12));
        assert_ne!(route, Route::new("Boston", "Miami", 11));
        assert_ne!(route, Route::new("Miami", "Boston", 12));
    }

    #[test]
    fn routes_can_be_held_in_a_set() {
        let mut held = HashSet::new();
        held.insert(Route::new("Denver", "El Paso", 4));
        held.insert(Route::new("Denver", "El Paso", 4));
        held.insert(Route::new("Seattle", "New York", 22));

        assert_eq!(held.len(), 2);
    }

    #[test]
    fn route_to_json() -> serde_json::Result<()> {
        assert_eq!(
            serde_json::to_string(&Route::new("Denver", "El Paso", 4))?,
            r#"{"endpoint_a":"Denver","endpoint_b":"El Paso","value":4}"#
        );

        Ok(())
    }
}
