//! # Recombination Operators
//!
//! Pure functions over pairs of genomes. Every operator takes two parents and
//! returns two new genomes; the parents are never modified. Children keep the
//! length of their corresponding parent.
//!
//! Parents of unequal length are supported: the exchange logic only runs on
//! the overlapping prefix `min(len_a, len_b)`, and the tail of the longer
//! parent is carried into its own child unchanged.
//!
//! - [`one_point_crossover`]: `000000 + 111111` may give `000111 + 111000`
//! - [`two_point_crossover`]: `000000 + 111111` may give `001100 + 110011`
//! - [`uniform_crossover`]: `000000 + 111111` may give `101010 + 010101`
//! - [`mutate`]: `000000 + 111111` may give `001000 + 111111`

use crate::genome::Genome;
use crate::rng::RandomNumberGenerator;

/// Fresh, unscored copies of both parents.
fn fresh_pair(g1: &Genome, g2: &Genome) -> (Genome, Genome) {
    (Genome::from_bits_of(g1), Genome::from_bits_of(g2))
}

fn overlap(g1: &Genome, g2: &Genome) -> usize {
    g1.bits().len().min(g2.bits().len())
}

/// Swaps the cells in `range` between the two children.
fn exchange(child_a: &mut Genome, child_b: &mut Genome, range: std::ops::Range<usize>) {
    for i in range {
        child_a.bits_mut().swap_with(child_b.bits_mut(), i);
    }
}

/// One-point crossover.
///
/// A cut index is drawn uniformly from `[1, overlap - 1]`. Child A takes
/// parent A's prefix and parent B's suffix (within the overlap), child B the
/// inverse. With an overlap shorter than two cells no cut exists and both
/// children are plain copies.
pub fn one_point_crossover(
    g1: &Genome,
    g2: &Genome,
    rng: &mut RandomNumberGenerator,
) -> (Genome, Genome) {
    let (mut child_a, mut child_b) = fresh_pair(g1, g2);
    let min_len = overlap(g1, g2);
    if min_len < 2 {
        return (child_a, child_b);
    }

    let cut = rng.gen_index_in(1, min_len);
    exchange(&mut child_a, &mut child_b, cut..min_len);

    (child_a, child_b)
}

/// Two-point crossover.
///
/// Two distinct cut indices are drawn from `[1, overlap - 1]` and ordered;
/// the segment between them is swapped, the outer segments are kept. An
/// overlap shorter than three cells cannot hold two distinct cuts and falls
/// back to [`one_point_crossover`].
pub fn two_point_crossover(
    g1: &Genome,
    g2: &Genome,
    rng: &mut RandomNumberGenerator,
) -> (Genome, Genome) {
    let min_len = overlap(g1, g2);
    if min_len < 3 {
        return one_point_crossover(g1, g2, rng);
    }

    let first = rng.gen_index_in(1, min_len);
    let mut second = first;
    while second == first {
        second = rng.gen_index_in(1, min_len);
    }
    let (lo, hi) = if first < second {
        (first, second)
    } else {
        (second, first)
    };

    let (mut child_a, mut child_b) = fresh_pair(g1, g2);
    exchange(&mut child_a, &mut child_b, lo..hi);

    (child_a, child_b)
}

/// Uniform crossover: every overlapping position is independently swapped
/// between the children with probability one half.
pub fn uniform_crossover(
    g1: &Genome,
    g2: &Genome,
    rng: &mut RandomNumberGenerator,
) -> (Genome, Genome) {
    let (mut child_a, mut child_b) = fresh_pair(g1, g2);
    let min_len = overlap(g1, g2);

    for i in 0..min_len {
        if rng.gen_coin() {
            child_a.bits_mut().swap_with(child_b.bits_mut(), i);
        }
    }

    (child_a, child_b)
}

/// Flips exactly one uniformly chosen cell of a copy of parent A. Parent B is
/// returned as an identical copy.
///
/// A `0` cell becomes `1`; any other value becomes `0`. An empty parent A is
/// copied unchanged.
pub fn mutate(g1: &Genome, g2: &Genome, rng: &mut RandomNumberGenerator) -> (Genome, Genome) {
    let (mut child_a, child_b) = fresh_pair(g1, g2);
    let len = child_a.bits().len();
    if len == 0 {
        return (child_a, child_b);
    }

    let idx = rng.gen_index(len);
    let flipped = match child_a.bits().get(idx) {
        Some(0) => 1,
        _ => 0,
    };
    child_a.bits_mut().set(idx, flipped);

    (child_a, child_b)
}
