//! Scripted randomness for tests

use std::collections::VecDeque;

use super::rng::RandomSource;

/// Replays a fixed list of draws and panics if the simulation asks for more
#[derive(Debug, Default)]
pub(crate) struct ScriptedRng {
    ints: VecDeque<i32>,
    indices: VecDeque<usize>,
}

impl ScriptedRng {
    pub(crate) fn new(
        ints: impl IntoIterator<Item = i32>,
        indices: impl IntoIterator<Item = usize>,
    ) -> Self {
        Self {
            ints: ints.into_iter().collect(),
            indices: indices.into_iter().collect(),
        }
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.ints.is_empty() && self.indices.is_empty()
    }
}

impl RandomSource for ScriptedRng {
    fn range_inclusive(&mut self, low: i32, high: i32) -> i32 {
        let v = self
            .ints
            .pop_front()
            .unwrap_or_else(|| panic!("unscripted draw in {low}..={high}"));
        assert!((low..=high).contains(&v), "scripted {v} outside {low}..={high}");
        v
    }

    fn index(&mut self, len: usize) -> usize {
        let v = self
            .indices
            .pop_front()
            .unwrap_or_else(|| panic!("unscripted index below {len}"));
        assert!(v < len, "scripted index {v} not below {len}");
        v
    }
}
