#[cfg(test)]
mod stream_tests {
    use bytes::Bytes;
    use proptest::prelude::*;

    use compress_core::{
        compression::{compress_buffer, decompress_buffer, Algorithm, CompressionError, Operation},
        config::StreamConfig,
        stream::{stream_buffer_to_buffer, PullFilter, PullState, PushFilter},
        types::{Driver, StreamError},
    };

    fn available() -> Vec<Algorithm> {
        Algorithm::ALL.into_iter().filter(|a| *a != Algorithm::Lzbitmap).collect()
    }

    /// Text with a noisy stretch in the middle, deterministic per `len`.
    fn sample(len: usize) -> Vec<u8> {
        let mut state: u32 = 0x2545_F491;
        (0..len)
            .map(|i| {
                if (len / 3..len / 2).contains(&i) {
                    state ^= state << 13;
                    state ^= state >> 17;
                    state ^= state << 5;
                    state as u8
                } else {
                    b"page oriented streams "[i % 22]
                }
            })
            .collect()
    }

    fn round_trip(data: &[u8], alg: Algorithm, driver: Driver, config: &StreamConfig) -> Vec<u8> {
        let compressed = stream_buffer_to_buffer(data, Operation::Compress, alg, driver, config).unwrap();
        stream_buffer_to_buffer(&compressed, Operation::Decompress, alg, driver, config).unwrap()
    }

    #[test]
    fn round_trip_both_drivers_every_algorithm() {
        let data = sample(200_000);
        let config = StreamConfig::default();
        for alg in available() {
            for driver in [Driver::Pull, Driver::Push] {
                assert_eq!(round_trip(&data, alg, driver, &config), data, "{alg} {driver}");
            }
        }
    }

    #[test]
    fn page_size_does_not_change_the_result() {
        let data = sample(20_000);
        for alg in available() {
            for page_size in [1, 17, 32_768, 1_000_000] {
                let config = StreamConfig::with_page_size(page_size);
                for driver in [Driver::Pull, Driver::Push] {
                    assert_eq!(
                        round_trip(&data, alg, driver, &config),
                        data,
                        "{alg} {driver} page_size={page_size}"
                    );
                }
            }
        }
    }

    #[test]
    fn drivers_read_each_others_output() {
        let data = sample(70_000);
        let config = StreamConfig::with_page_size(4096);
        for alg in available() {
            let pulled = stream_buffer_to_buffer(&data, Operation::Compress, alg, Driver::Pull, &config).unwrap();
            let pushed = stream_buffer_to_buffer(&data, Operation::Compress, alg, Driver::Push, &config).unwrap();

            let a = stream_buffer_to_buffer(&pulled, Operation::Decompress, alg, Driver::Push, &config).unwrap();
            let b = stream_buffer_to_buffer(&pushed, Operation::Decompress, alg, Driver::Pull, &config).unwrap();
            assert_eq!(a, data, "{alg}");
            assert_eq!(b, data, "{alg}");
        }
    }

    #[test]
    fn buffer_and_stream_paths_agree() {
        let data = sample(100_000);
        let config = StreamConfig::default();
        for alg in available() {
            let one_shot = compress_buffer(&data, alg).unwrap();
            let streamed = stream_buffer_to_buffer(&data, Operation::Compress, alg, Driver::Pull, &config).unwrap();

            let from_stream = decompress_buffer(&streamed, alg, Some(data.len())).unwrap();
            let from_buffer =
                stream_buffer_to_buffer(&one_shot, Operation::Decompress, alg, Driver::Push, &config).unwrap();
            assert_eq!(from_stream, data, "{alg}");
            assert_eq!(from_buffer, data, "{alg}");
        }
    }

    #[test]
    fn empty_stream_round_trips() {
        let config = StreamConfig::default();
        for alg in available() {
            for driver in [Driver::Pull, Driver::Push] {
                assert!(round_trip(&[], alg, driver, &config).is_empty(), "{alg} {driver}");
            }
        }
    }

    #[test]
    fn lzbitmap_stream_is_unavailable() {
        let err = stream_buffer_to_buffer(
            b"data",
            Operation::Compress,
            Algorithm::Lzbitmap,
            Driver::Pull,
            &StreamConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, StreamError::Compression(CompressionError::CodecUnavailable { .. })));
    }

    #[test]
    fn invalid_page_size_is_rejected() {
        let config = StreamConfig::with_page_size(0);
        let err = stream_buffer_to_buffer(b"data", Operation::Compress, Algorithm::Zlib, Driver::Push, &config)
            .unwrap_err();
        assert!(matches!(err, StreamError::Validation(_)));
    }

    #[test]
    fn truncated_stream_fails_to_decompress() {
        let data = sample(50_000);
        let config = StreamConfig::default();
        for alg in available() {
            let compressed = stream_buffer_to_buffer(&data, Operation::Compress, alg, Driver::Push, &config).unwrap();
            let cut = &compressed[..compressed.len() / 2];
            for driver in [Driver::Pull, Driver::Push] {
                assert!(
                    stream_buffer_to_buffer(cut, Operation::Decompress, alg, driver, &config).is_err(),
                    "{alg} {driver} accepted a truncated stream"
                );
            }
            assert!(decompress_buffer(cut, alg, Some(data.len())).is_err(), "{alg} buffer accepted a truncated stream");
        }
    }

    #[test]
    fn empty_buffer_output_stream_decodes_to_empty() {
        let config = StreamConfig::default();
        for alg in available() {
            let compressed = compress_buffer(&[], alg).unwrap();
            for driver in [Driver::Pull, Driver::Push] {
                let restored =
                    stream_buffer_to_buffer(&compressed, Operation::Decompress, alg, driver, &config).unwrap();
                assert!(restored.is_empty(), "{alg} {driver}");
            }
        }
    }

    // ---- Push filter discipline, with a collecting sink ----

    #[test]
    fn finalize_twice_is_an_error_and_keeps_output() {
        let mut out: Vec<Bytes> = Vec::new();
        let data = sample(10_000);
        {
            let sink = |page: Bytes| -> Result<(), StreamError> {
                out.push(page);
                Ok(())
            };
            let mut filter = PushFilter::new(Operation::Compress, Algorithm::Zlib, 1024, sink).unwrap();
            for chunk in data.chunks(1024) {
                filter.write(chunk).unwrap();
            }
            filter.finalize().unwrap();
            assert!(filter.is_finalized());

            assert!(matches!(filter.finalize(), Err(StreamError::AlreadyFinalized)));
            assert!(matches!(filter.write(b"more"), Err(StreamError::WriteAfterFinalize)));
            assert!(matches!(filter.write(&[]), Err(StreamError::WriteAfterFinalize)));
        }

        assert!(out.iter().all(|p| !p.is_empty() && p.len() <= 1024));
        let compressed: Vec<u8> = out.concat();
        assert_eq!(decompress_buffer(&compressed, Algorithm::Zlib, Some(data.len())).unwrap(), data);
    }

    #[test]
    fn oversized_write_is_rejected() {
        let mut filter =
            PushFilter::new(Operation::Compress, Algorithm::Lz4, 8, |_: Bytes| Ok::<(), StreamError>(())).unwrap();
        let err = filter.write(&[0u8; 9]).unwrap_err();
        assert!(matches!(err, StreamError::PageTooLarge { have: 9, max: 8 }));
        assert!(!filter.is_finalized());
    }

    #[test]
    fn sink_error_propagates() {
        let sink = |_: Bytes| -> Result<(), StreamError> { Err(StreamError::Validation("sink full".into())) };
        let mut filter = PushFilter::new(Operation::Compress, Algorithm::Lz4, 64, sink).unwrap();
        filter.write(&[1u8; 64]).unwrap();
        assert!(matches!(filter.finalize(), Err(StreamError::Validation(_))));
        assert!(filter.is_finalized());
    }

    #[test]
    fn push_counters_track_pages() {
        let data = sample(5000);
        let mut filter =
            PushFilter::new(Operation::Compress, Algorithm::Brotli, 1000, |_: Bytes| Ok::<(), StreamError>(()))
                .unwrap();
        for chunk in data.chunks(1000) {
            filter.write(chunk).unwrap();
        }
        filter.finalize().unwrap();
        assert_eq!(filter.counters().pages_in, 5);
        assert_eq!(filter.counters().bytes_in, 5000);
        assert!(filter.counters().bytes_out > 0);
    }

    // ---- Pull filter with a scripted source ----

    /// Source handing out a fixed script of pages, then empty pages forever.
    struct ScriptedSource {
        pages: Vec<Bytes>,
    }

    impl compress_core::stream::PullSource for ScriptedSource {
        fn next_page(&mut self, max_len: usize) -> Result<Bytes, StreamError> {
            if self.pages.is_empty() {
                return Ok(Bytes::new());
            }
            let page = self.pages.remove(0);
            assert!(page.len() <= max_len);
            Ok(page)
        }
    }

    #[test]
    fn pull_filter_drains_then_reports_exhausted() {
        let data = sample(9000);
        let pages = data.chunks(3000).map(Bytes::copy_from_slice).collect();
        let source = ScriptedSource { pages };

        let mut filter = PullFilter::new(Operation::Compress, Algorithm::Lzfse, 3000, source).unwrap();
        assert_eq!(filter.state(), PullState::Reading);

        let mut compressed = Vec::new();
        while let Some(page) = filter.read_page().unwrap() {
            assert!(!page.is_empty() && page.len() <= 3000);
            compressed.extend_from_slice(&page);
        }
        assert_eq!(filter.state(), PullState::Exhausted);
        assert!(filter.read_page().unwrap().is_none());
        assert_eq!(filter.counters().bytes_in, 9000);
        assert_eq!(filter.counters().bytes_out, compressed.len() as u64);

        assert_eq!(decompress_buffer(&compressed, Algorithm::Lzfse, Some(9000)).unwrap(), data);
    }

    #[test]
    fn pull_filter_as_iterator() {
        let data = sample(40_000);
        let compressed = compress_buffer(&data, Algorithm::Lz4).unwrap();
        let mut offset = 0;
        let source = move |max_len: usize| -> Result<Bytes, StreamError> {
            let end = (offset + max_len).min(compressed.len());
            let page = Bytes::copy_from_slice(&compressed[offset..end]);
            offset = end;
            Ok(page)
        };

        let filter = PullFilter::new(Operation::Decompress, Algorithm::Lz4, 512, source).unwrap();
        let pages: Vec<Bytes> = filter.collect::<Result<_, _>>().unwrap();
        assert!(pages.iter().all(|p| p.len() <= 512));
        assert_eq!(pages.concat(), data);
    }

    #[test]
    fn oversized_source_page_is_rejected() {
        let source = |_: usize| -> Result<Bytes, StreamError> { Ok(Bytes::from(vec![0u8; 100])) };
        let mut filter = PullFilter::new(Operation::Compress, Algorithm::Zlib, 10, source).unwrap();
        assert!(matches!(filter.read_page(), Err(StreamError::PageTooLarge { have: 100, max: 10 })));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_stream_round_trip(
            data in proptest::collection::vec(any::<u8>(), 0..4096),
            page_size in 1usize..600,
            alg_index in 0usize..5,
            push in any::<bool>(),
        ) {
            let alg = available()[alg_index];
            let driver = if push { Driver::Push } else { Driver::Pull };
            let config = StreamConfig::with_page_size(page_size);
            prop_assert_eq!(round_trip(&data, alg, driver, &config), data);
        }
    }
}
