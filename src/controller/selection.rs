use std::collections::BTreeSet;

use rand::Rng;

/// Draws a question index uniformly from `0..question_count`, rejecting
/// finished indices and `previous`. Returns `None` once every index is
/// finished.
///
/// When the only unfinished index left is `previous`, the exclusion of
/// `previous` is dropped so the draw still terminates.
pub fn pick_question<R: Rng + ?Sized>(
    rng: &mut R,
    question_count: usize,
    finished: &BTreeSet<usize>,
    previous: Option<usize>,
) -> Option<usize> {
    let mut unfinished = (0..question_count).filter(|index| !finished.contains(index));
    let first = unfinished.next()?;
    let exclude_previous =
        Some(first) != previous || unfinished.any(|index| Some(index) != previous);

    loop {
        let candidate = rng.gen_range(0..question_count);
        if finished.contains(&candidate) {
            continue;
        }
        if exclude_previous && Some(candidate) == previous {
            continue;
        }
        return Some(candidate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn never_returns_finished_or_previous() {
        let mut rng = StdRng::seed_from_u64(7);
        let finished: BTreeSet<usize> = [0, 3].into_iter().collect();
        for _ in 0..200 {
            let index = pick_question(&mut rng, 5, &finished, Some(1)).unwrap();
            assert!(index == 2 || index == 4, "picked {}", index);
        }
    }

    #[test]
    fn previous_is_allowed_when_it_is_the_only_one_left() {
        let mut rng = StdRng::seed_from_u64(1);
        let finished: BTreeSet<usize> = [0, 2].into_iter().collect();
        assert_eq!(pick_question(&mut rng, 3, &finished, Some(1)), Some(1));
    }

    #[test]
    fn single_question_without_previous() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(pick_question(&mut rng, 1, &BTreeSet::new(), None), Some(0));
    }

    #[test]
    fn nothing_left_to_pick() {
        let mut rng = StdRng::seed_from_u64(3);
        let finished: BTreeSet<usize> = [0, 1].into_iter().collect();
        assert_eq!(pick_question(&mut rng, 2, &finished, Some(1)), None);
    }

    #[test]
    fn same_seed_same_order() {
        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut finished = BTreeSet::new();
            let mut previous = None;
            let mut order = Vec::new();
            while let Some(index) = pick_question(&mut rng, 6, &finished, previous) {
                finished.insert(index);
                previous = Some(index);
                order.push(index);
            }
            order
        };
        assert_eq!(draw(42), draw(42));
        assert_eq!(draw(42).len(), 6);
    }
}
