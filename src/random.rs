/*
 * Copyright (C) 2024 Clownvin <123clownvin@gmail.com>
 *
 * This file is part of Revisr.
 *
 * Revisr is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Revisr is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Revisr.  If not, see <http://www.gnu.org/licenses/>.
 */

use std::fmt::Display;

use hashbrown::HashSet;
use rand::Rng;

///Iterates over owned values in a uniformly random order.
///Taking the first `k` items is a partial Fisher-Yates shuffle.
pub trait IterShuffled<'rng, R: Rng>
where
    Self: IntoIterator,
{
    fn iter_shuffled(self, rng: &'rng mut R) -> ShuffleIter<'rng, Self::Item, R>;
}

pub struct ShuffleIter<'rng, T, R> {
    values: Vec<T>,
    rng: &'rng mut R,
}

impl<T, R: Rng> Iterator for ShuffleIter<'_, T, R> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        match self.values.len() {
            0 => None,
            1 => Some(self.values.swap_remove(0)),
            r => Some(self.values.swap_remove(self.rng.gen_range(0..r))),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.values.len(), Some(self.values.len()))
    }
}

impl<'rng, T, R: Rng> IterShuffled<'rng, R> for Vec<T> {
    fn iter_shuffled(self, rng: &'rng mut R) -> ShuffleIter<'rng, Self::Item, R> {
        ShuffleIter { values: self, rng }
    }
}

///Picks `count` distinct indices from `0..population`, uniformly at random.
///
///Asking for more indices than exist is an error rather than a clamp, since
///a shorter draw would silently change which items can be quizzed.
pub fn draw_distinct(
    count: usize,
    population: usize,
    rng: &mut impl Rng,
) -> Result<HashSet<usize>, RangeError> {
    if count > population {
        return Err(RangeError {
            requested: count,
            available: population,
        });
    }

    Ok((0..population)
        .collect::<Vec<_>>()
        .iter_shuffled(rng)
        .take(count)
        .collect())
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct RangeError {
    pub requested: usize,
    pub available: usize,
}

impl Display for RangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "RangeError: Requested {} distinct items, only {} available",
            self.requested, self.available
        ))
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::{draw_distinct, IterShuffled, RangeError};

    #[test]
    fn draws_exact_count_of_distinct_indices() {
        let rng = &mut StdRng::seed_from_u64(7);

        for population in 0..20 {
            for count in 0..=population {
                let drawn = draw_distinct(count, population, rng)
                    .expect("Draw within bounds should succeed");
                assert_eq!(drawn.len(), count);
                assert!(drawn.iter().all(|index| *index < population));
            }
        }
    }

    #[test]
    fn draw_zero_of_zero() {
        let rng = &mut StdRng::seed_from_u64(0);
        assert!(draw_distinct(0, 0, rng).is_ok_and(|drawn| drawn.is_empty()));
    }

    #[test]
    fn draw_more_than_available() {
        let rng = &mut StdRng::seed_from_u64(0);
        assert_eq!(
            draw_distinct(6, 5, rng),
            Err(RangeError {
                requested: 6,
                available: 5
            })
        );
        assert!(draw_distinct(1, 0, rng).is_err());
    }

    #[test]
    fn draw_whole_population() {
        let rng = &mut StdRng::seed_from_u64(3);
        let drawn = draw_distinct(10, 10, rng).expect("Unable to draw whole population");
        assert!((0..10).all(|index| drawn.contains(&index)));
    }

    #[test]
    fn draws_cover_every_index() {
        let rng = &mut StdRng::seed_from_u64(11);
        let mut seen = [0usize; 8];

        for _ in 0..2000 {
            for index in draw_distinct(2, 8, rng).expect("Unable to draw") {
                seen[index] += 1;
            }
        }

        //Expected 500 per index
        assert!(seen.iter().all(|count| (350..650).contains(count)), "{seen:?}");
    }

    #[test]
    fn shuffle_keeps_every_value() {
        let rng = &mut StdRng::seed_from_u64(5);
        let mut shuffled = vec!["a", "b", "c", "d"]
            .iter_shuffled(rng)
            .collect::<Vec<_>>();
        shuffled.sort();
        assert_eq!(shuffled, vec!["a", "b", "c", "d"]);
    }
}
