#[cfg(test)]
mod buffer_tests {
    use compress_core::{
        compression::{compress_buffer, decompress_buffer, decompress_buffer_with_config, Algorithm, CompressionError},
        config::StreamConfig,
    };

    fn available() -> Vec<Algorithm> {
        Algorithm::ALL.into_iter().filter(|a| *a != Algorithm::Lzbitmap).collect()
    }

    fn text(len: usize) -> Vec<u8> {
        b"the quick brown fox jumps over the lazy dog; "
            .iter()
            .cycle()
            .take(len)
            .copied()
            .collect()
    }

    #[test]
    fn ab_pattern_zlib_scenario() {
        let input: Vec<u8> = b"AB".repeat(100_000);
        let compressed = compress_buffer(&input, Algorithm::Zlib).unwrap();
        assert!(compressed.len() < 200_000);

        let restored = decompress_buffer(&compressed, Algorithm::Zlib, Some(200_000)).unwrap();
        assert_eq!(restored, input);
    }

    #[test]
    fn round_trip_every_available_algorithm() {
        let input = text(150_000);
        for alg in available() {
            let compressed = compress_buffer(&input, alg).unwrap();
            assert!(compressed.len() < input.len(), "{alg} did not shrink text");
            let restored = decompress_buffer(&compressed, alg, Some(input.len())).unwrap();
            assert_eq!(restored, input, "{alg} round trip mismatch");
        }
    }

    #[test]
    fn default_capacity_is_enough_for_small_payloads() {
        let input = text(10_000);
        let compressed = compress_buffer(&input, Algorithm::Lzma).unwrap();
        assert_eq!(decompress_buffer(&compressed, Algorithm::Lzma, None).unwrap(), input);
    }

    #[test]
    fn capacity_overflow_fails_instead_of_truncating() {
        let input = text(100_000);
        for alg in available() {
            let compressed = compress_buffer(&input, alg).unwrap();
            let err = decompress_buffer(&compressed, alg, Some(input.len() - 1)).unwrap_err();
            assert!(
                matches!(err, CompressionError::DecompressionCapacityExceeded { capacity, .. } if capacity == input.len() - 1),
                "{alg}: unexpected {err:?}"
            );
        }
    }

    #[test]
    fn exact_capacity_is_accepted() {
        let input = text(4096);
        let compressed = compress_buffer(&input, Algorithm::Brotli).unwrap();
        let restored = decompress_buffer(&compressed, Algorithm::Brotli, Some(4096)).unwrap();
        assert_eq!(restored.len(), 4096);
    }

    #[test]
    fn configured_default_capacity_applies_without_expected_size() {
        let input = text(50_000);
        let compressed = compress_buffer(&input, Algorithm::Zlib).unwrap();

        let small = StreamConfig::new(None, Some(1000));
        let err = decompress_buffer_with_config(&compressed, Algorithm::Zlib, None, &small).unwrap_err();
        assert!(matches!(err, CompressionError::DecompressionCapacityExceeded { capacity: 1000, .. }));

        let large = StreamConfig::new(None, Some(50_000));
        let restored = decompress_buffer_with_config(&compressed, Algorithm::Zlib, None, &large).unwrap();
        assert_eq!(restored, input);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        for alg in available() {
            let compressed = compress_buffer(&[], alg).unwrap();
            assert!(compressed.is_empty());
            assert!(decompress_buffer(&compressed, alg, Some(0)).unwrap().is_empty());
        }
    }

    #[test]
    fn tiny_input_that_cannot_shrink_fails() {
        let err = compress_buffer(b"x", Algorithm::Zlib).unwrap_err();
        assert!(matches!(err, CompressionError::CompressionFailed { codec: "zlib", capacity: 1, .. }));
    }

    #[test]
    fn lzbitmap_is_unavailable_both_ways() {
        let input = text(1000);
        assert!(matches!(
            compress_buffer(&input, Algorithm::Lzbitmap),
            Err(CompressionError::CodecUnavailable { codec: "lzbitmap" })
        ));
        assert!(matches!(
            decompress_buffer(&input, Algorithm::Lzbitmap, None),
            Err(CompressionError::CodecUnavailable { .. })
        ));
    }

    /// Bytes each decoder rejects at the first header it reads.
    fn garbage_for(alg: Algorithm) -> Vec<u8> {
        match alg {
            // window-bits field set to its reserved value
            Algorithm::Brotli => vec![0x11u8; 64],
            // 0xFF opens a deflate block of the reserved type, and is not a
            // valid magic for the others
            _ => vec![0xFFu8; 64],
        }
    }

    #[test]
    fn corrupt_input_is_reported() {
        for alg in available() {
            assert!(decompress_buffer(&garbage_for(alg), alg, None).is_err(), "{alg} accepted garbage");
        }
    }

    #[test]
    fn truncated_input_is_reported() {
        let input = text(200_000);
        for alg in available() {
            let compressed = compress_buffer(&input, alg).unwrap();
            let cut = &compressed[..compressed.len() / 2];
            assert!(decompress_buffer(cut, alg, Some(input.len())).is_err(), "{alg} returned a short result");
        }
    }
}
