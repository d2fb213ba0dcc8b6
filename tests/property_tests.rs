//! Property-based checks of the codec using proptest.

use proptest::prelude::*;

use huffpack::engine::frequency::{count_frequencies, FrequencyMap};
use huffpack::engine::huffman::{assign_codes, build_tree, weighted_path_length};
use huffpack::{decode, encode, CodecError, EngineConfig};

/// Minimum weighted path length over every full binary tree, found by trying
/// every merge order.
fn brute_force_optimum(weights: &[u64]) -> u64 {
    if weights.len() <= 1 {
        return 0;
    }
    let mut best = u64::MAX;
    for i in 0..weights.len() {
        for j in (i + 1)..weights.len() {
            let merged = weights[i] + weights[j];
            let mut rest: Vec<u64> = weights
                .iter()
                .enumerate()
                .filter(|&(k, _)| k != i && k != j)
                .map(|(_, &w)| w)
                .collect();
            rest.push(merged);
            best = best.min(merged + brute_force_optimum(&rest));
        }
    }
    best
}

fn small_alphabet_strategy() -> impl Strategy<Value = FrequencyMap> {
    prop::collection::btree_map(any::<u8>(), 1u64..50, 2..=6)
}

/// Inputs drawn from a narrow alphabet so frequencies are skewed and repeated.
fn skewed_input_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop_oneof![8 => Just(b'e'), 4 => Just(b't'), 2 => 0u8..4, 1 => any::<u8>()], 0..4096)
}

proptest! {
    #[test]
    fn prop_round_trip(input in prop::collection::vec(any::<u8>(), 0..4096)) {
        let config = EngineConfig::default();
        let bytes = encode(&input, &config).unwrap();
        prop_assert_eq!(decode(&bytes, &config).unwrap(), input);
    }

    #[test]
    fn prop_round_trip_skewed(input in skewed_input_strategy()) {
        let config = EngineConfig::default();
        let bytes = encode(&input, &config).unwrap();
        prop_assert_eq!(decode(&bytes, &config).unwrap(), input);
    }

    #[test]
    fn prop_codes_are_prefix_free(input in prop::collection::vec(any::<u8>(), 1..1024)) {
        let codes = assign_codes(&build_tree(&count_frequencies(&input)).unwrap());
        for (a, code_a) in &codes {
            prop_assert!(!code_a.is_empty());
            for (b, code_b) in &codes {
                if a != b {
                    prop_assert!(!code_b.starts_with(code_a));
                }
            }
        }
    }

    #[test]
    fn prop_tree_is_optimal(freqs in small_alphabet_strategy()) {
        let codes = assign_codes(&build_tree(&freqs).unwrap());
        let weights: Vec<u64> = freqs.values().copied().collect();
        prop_assert_eq!(weighted_path_length(&freqs, &codes), brute_force_optimum(&weights));
    }

    #[test]
    fn prop_kraft_equality(input in prop::collection::vec(any::<u8>(), 2..1024)) {
        // a full binary tree satisfies the Kraft inequality with equality
        let codes = assign_codes(&build_tree(&count_frequencies(&input)).unwrap());
        prop_assume!(codes.len() > 1);
        let max_len = codes.values().map(|c| c.len()).max().unwrap();
        let sum: u128 = codes.values().map(|c| 1u128 << (max_len - c.len())).sum();
        prop_assert_eq!(sum, 1u128 << max_len);
    }

    #[test]
    fn prop_single_byte_corruption_is_rejected(
        input in prop::collection::vec(any::<u8>(), 1..512),
        index in any::<prop::sample::Index>(),
        mask in 1u8..=255,
    ) {
        let config = EngineConfig::default();
        let mut bytes = encode(&input, &config).unwrap();
        let i = index.index(bytes.len());
        bytes[i] ^= mask;
        prop_assert!(matches!(decode(&bytes, &config), Err(CodecError::CorruptStream(_))));
    }
}

#[test]
fn test_brute_force_reference() {
    assert_eq!(brute_force_optimum(&[3, 2, 1]), 9);
    assert_eq!(brute_force_optimum(&[1, 1, 1, 1]), 8);
    assert_eq!(brute_force_optimum(&[5]), 0);
}
