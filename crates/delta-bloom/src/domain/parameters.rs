//! Layer sizing and false positive math
//!
//! A layer has `m = 2^size_exponent` bits and exactly one hash function, so:
//! - expected FPR after n inserts: `1 - e^(-n/m)`
//! - observed FPR of a layer: `bits_set / m`
//! - FPR of the union of layers: `1 - Π(1 - p_i)`

/// Smallest accepted size exponent (one byte per layer)
pub const MIN_SIZE_EXPONENT: u32 = 3;

/// Largest accepted size exponent.
///
/// Every bit position must be addressable with a native signed integer.
pub const fn max_size_exponent() -> u32 {
    usize::BITS - 1
}

/// Number of bits in a layer of the given size exponent
pub fn layer_bits(size_exponent: u32) -> usize {
    1usize << size_exponent
}

/// Number of bytes in a layer of the given size exponent
pub fn layer_bytes(size_exponent: u32) -> usize {
    layer_bits(size_exponent) / 8
}

/// Mask applied to a 64-bit digest to select a bit position
pub fn position_mask(size_exponent: u32) -> u64 {
    (layer_bits(size_exponent) as u64).wrapping_sub(1)
}

/// Compute `floor(2^size_exponent * load_factor)`.
///
/// Returns `None` when the result does not fit a native signed integer.
/// The caller is expected to have validated `size_exponent` and
/// `load_factor` already.
pub fn calculate_capacity(size_exponent: u32, load_factor: f64) -> Option<usize> {
    if size_exponent > max_size_exponent() {
        return None;
    }
    let n = layer_bits(size_exponent) as f64 * load_factor;
    if !n.is_finite() || n < 0.0 || n >= isize::MAX as f64 {
        return None;
    }
    Some(n as usize)
}

/// Expected false positive rate of one layer after `n` distinct inserts
///
/// Formula: FPR = 1 - e^(-n/m)
pub fn expected_fpr(m: usize, n: usize) -> f64 {
    if m == 0 {
        return 1.0;
    }
    1.0 - (-(n as f64) / m as f64).exp()
}

/// Observed false positive rate of one layer: the fraction of bits set
pub fn layer_fpr(bits_set: usize, m: usize) -> f64 {
    if m == 0 {
        return 1.0;
    }
    bits_set as f64 / m as f64
}

/// False positive rate of the union of independent layers
pub fn union_fpr<I>(layer_rates: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let miss: f64 = layer_rates.into_iter().map(|p| 1.0 - p).product();
    1.0 - miss
}

/// Scaled entry count used by the expiry check.
///
/// With `L` layers retained the union saturates faster than the raw entry
/// count suggests; expiry fires once `entries * (L + 1) / L >= capacity`.
pub fn expiry_pressure(entries: usize, layer_count: usize) -> f64 {
    if layer_count == 0 {
        return entries as f64;
    }
    entries as f64 * (layer_count as f64 + 1.0) / layer_count as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_dimensions() {
        assert_eq!(layer_bits(15), 32_768);
        assert_eq!(layer_bytes(15), 4_096);
        assert_eq!(layer_bytes(MIN_SIZE_EXPONENT), 1);
        assert_eq!(position_mask(15), 0x7FFF);
    }

    #[test]
    fn test_max_size_exponent_matches_word_size() {
        assert_eq!(max_size_exponent(), usize::BITS - 1);
        assert_eq!(
            position_mask(max_size_exponent()),
            (1u64 << (usize::BITS - 1)) - 1
        );
    }

    #[test]
    fn test_capacity_is_truncated() {
        assert_eq!(calculate_capacity(15, 0.03125), Some(1024));
        assert_eq!(calculate_capacity(10, 0.3), Some(307)); // 307.2
        assert_eq!(calculate_capacity(3, 0.01), Some(0));
        assert_eq!(calculate_capacity(20, 1.0), Some(1 << 20));
    }

    #[test]
    fn test_capacity_overflow_at_word_limit() {
        assert_eq!(calculate_capacity(max_size_exponent(), 1.0), None);
        assert!(calculate_capacity(max_size_exponent(), 0.25).is_some());
    }

    #[test]
    fn test_expected_fpr() {
        assert_eq!(expected_fpr(1024, 0), 0.0);
        // n = m/32 → 1 - e^(-1/32) ≈ 0.0308
        let fpr = expected_fpr(32_768, 1024);
        assert!(fpr > 0.030 && fpr < 0.031, "Expected FPR≈0.0308, got {}", fpr);
    }

    #[test]
    fn test_union_fpr() {
        assert_eq!(union_fpr(std::iter::empty()), 0.0);
        assert_eq!(union_fpr([0.5]), 0.5);
        assert!((union_fpr([0.5, 0.5]) - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_layer_fpr_is_fill_ratio() {
        assert_eq!(layer_fpr(0, 64), 0.0);
        assert_eq!(layer_fpr(16, 64), 0.25);
    }

    #[test]
    fn test_expiry_pressure() {
        assert_eq!(expiry_pressure(100, 1), 200.0);
        assert_eq!(expiry_pressure(100, 2), 150.0);
        assert_eq!(expiry_pressure(100, 4), 125.0);
    }
}
