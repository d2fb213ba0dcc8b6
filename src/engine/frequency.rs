use std::collections::BTreeMap;

/// Occurrence count per byte value. Only bytes that occur are present.
pub type FrequencyMap = BTreeMap<u8, u64>;

pub fn count_frequencies(input: &[u8]) -> FrequencyMap {
    let mut counts = [0u64; 256];
    for &byte in input {
        counts[byte as usize] += 1;
    }

    counts
        .iter()
        .enumerate()
        .filter(|(_, &count)| count > 0)
        .map(|(byte, &count)| (byte as u8, count))
        .collect()
}

/// Shannon entropy of the distribution in bits per symbol.
pub fn entropy(freqs: &FrequencyMap) -> f64 {
    let total: u64 = freqs.values().sum();
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    freqs
        .values()
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let freqs = count_frequencies(&[]);
        assert!(freqs.is_empty());
        assert_eq!(entropy(&freqs), 0.0);
    }

    #[test]
    fn test_counts_each_distinct_byte() {
        let freqs = count_frequencies(b"aaabbc");
        assert_eq!(freqs.len(), 3);
        assert_eq!(freqs[&b'a'], 3);
        assert_eq!(freqs[&b'b'], 2);
        assert_eq!(freqs[&b'c'], 1);
        assert!(!freqs.contains_key(&b'd'));
    }

    #[test]
    fn test_full_alphabet() {
        let input: Vec<u8> = (0..=255).collect();
        let freqs = count_frequencies(&input);
        assert_eq!(freqs.len(), 256);
        assert!(freqs.values().all(|&c| c == 1));
        let h = entropy(&freqs);
        assert!((h - 8.0).abs() < 1e-9, "entropy was {}", h);
    }

    #[test]
    fn test_single_symbol_has_zero_entropy() {
        let freqs = count_frequencies(&[b'x'; 1000]);
        assert_eq!(freqs[&b'x'], 1000);
        assert_eq!(entropy(&freqs), 0.0);
    }
}
