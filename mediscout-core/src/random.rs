//! Random helpers over an injected [`Rng`] so callers can seed generation.

use rand::distributions::uniform::SampleUniform;
use rand::Rng;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 9;

/// Uniform integer in `[min, max]`, both inclusive.
pub fn int_between<R, T>(rng: &mut R, min: T, max: T) -> T
where
    R: Rng + ?Sized,
    T: SampleUniform + PartialOrd,
{
    rng.gen_range(min..=max)
}

/// Uniform float in `[min, max)` rounded to `decimals` places.
pub fn float_between<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64, decimals: u32) -> f64 {
    let value = rng.gen::<f64>() * (max - min) + min;
    round_to(value, decimals)
}

pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Uniform pick from a non-empty fixed array.
pub fn pick<R: Rng + ?Sized, T: Copy, const N: usize>(rng: &mut R, items: &[T; N]) -> T {
    items[rng.gen_range(0..N)]
}

/// `true` with probability `p`.
pub fn chance<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    rng.gen::<f64>() < p
}

/// Short opaque base-36 identifier.
pub fn generate_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..ID_LEN)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn float_respects_bounds_and_decimals() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..500 {
            let value = float_between(&mut rng, 36.0, 37.5, 1);
            assert!((36.0..=37.5).contains(&value));
            assert_eq!(value, round_to(value, 1));
        }
    }

    #[test]
    fn ids_are_short_base36() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let id = generate_id(&mut rng);
        assert_eq!(id.len(), 9);
        assert!(id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        assert_ne!(id, generate_id(&mut rng));
    }

    #[test]
    fn int_range_is_inclusive() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let draws: Vec<u8> = (0..200).map(|_| int_between(&mut rng, 1u8, 2u8)).collect();
        assert!(draws.contains(&1));
        assert!(draws.contains(&2));
    }
}
