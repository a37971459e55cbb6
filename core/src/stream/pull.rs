//! stream/pull.rs
//! Pull-driven filter: the engine asks its source for input as it needs it.
//!
//! The number of source calls per produced page is not fixed; compression
//! ratio decides it. Only byte conservation is part of the contract.
use bytes::{Bytes, BytesMut};
use log::trace;

use crate::compression::{create_codec, Algorithm, CodecState, Operation};
use crate::telemetry::{Stage, StageTimes, StreamCounters};
use crate::types::StreamError;
use crate::utils::validate_page_size;

/// Input capability for a pull filter.
pub trait PullSource {
    /// Return up to `max_len` bytes. An empty page ends the input for good;
    /// the source must not yield data afterwards.
    fn next_page(&mut self, max_len: usize) -> Result<Bytes, StreamError>;
}

impl<F> PullSource for F
where
    F: FnMut(usize) -> Result<Bytes, StreamError>,
{
    fn next_page(&mut self, max_len: usize) -> Result<Bytes, StreamError> {
        self(max_len)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullState {
    /// Source still has input.
    Reading,
    /// Source returned its empty page; codec finished, output left to hand out.
    Draining,
    /// Nothing left; every further read returns `None`.
    Exhausted,
}

pub struct PullFilter<S: PullSource> {
    operation: Operation,
    algorithm: Algorithm,
    page_size: usize,
    source: S,
    codec: CodecState,
    state: PullState,
    /// Codec output not yet handed out.
    staged: BytesMut,
    scratch: Vec<u8>,
    counters: StreamCounters,
    stage_times: StageTimes,
}

impl<S: PullSource> PullFilter<S> {
    pub fn new(
        operation: Operation,
        algorithm: Algorithm,
        page_size: usize,
        source: S,
    ) -> Result<Self, StreamError> {
        validate_page_size(page_size)?;
        let codec = create_codec(operation, algorithm)?;
        Ok(Self {
            operation,
            algorithm,
            page_size,
            source,
            codec,
            state: PullState::Reading,
            staged: BytesMut::new(),
            scratch: Vec::new(),
            counters: StreamCounters::default(),
            stage_times: StageTimes::default(),
        })
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn state(&self) -> PullState {
        self.state
    }

    pub fn counters(&self) -> &StreamCounters {
        &self.counters
    }

    pub fn stage_times(&self) -> &StageTimes {
        &self.stage_times
    }

    /// Next output page, or `None` once the source is exhausted and all
    /// codec output has been handed out. Returned pages are never empty
    /// and never longer than the page size.
    pub fn read_page(&mut self) -> Result<Option<Bytes>, StreamError> {
        loop {
            match self.state {
                PullState::Exhausted => return Ok(None),
                PullState::Draining if self.staged.is_empty() => {
                    self.state = PullState::Exhausted;
                    trace!("{} {} pull: exhausted", self.algorithm, self.operation);
                    return Ok(None);
                }
                PullState::Draining => return Ok(Some(self.take_page())),
                PullState::Reading if self.staged.len() >= self.page_size => {
                    return Ok(Some(self.take_page()));
                }
                PullState::Reading => self.pull_once()?,
            }
        }
    }

    /// One source call followed by one codec step.
    fn pull_once(&mut self) -> Result<(), StreamError> {
        let input = self.source.next_page(self.page_size)?;
        if input.len() > self.page_size {
            return Err(StreamError::PageTooLarge { have: input.len(), max: self.page_size });
        }

        let codec = &mut self.codec;
        let scratch = &mut self.scratch;
        if input.is_empty() {
            self.stage_times.time(Stage::Codec, || codec.finish(scratch))?;
            self.state = PullState::Draining;
        } else {
            self.counters.add_input(input.len());
            self.stage_times.time(Stage::Codec, || codec.process(&input, scratch))?;
        }

        self.staged.extend_from_slice(&self.scratch);
        self.scratch.clear();
        Ok(())
    }

    fn take_page(&mut self) -> Bytes {
        let n = self.staged.len().min(self.page_size);
        let page = self.staged.split_to(n).freeze();
        self.counters.add_output(page.len());
        trace!("{} {} pull: page of {} bytes", self.algorithm, self.operation, page.len());
        page
    }
}

impl<S: PullSource> Iterator for PullFilter<S> {
    type Item = Result<Bytes, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_page().transpose()
    }
}
