//! stream/push.rs
//! Push-driven filter: the caller hands in pages, produced output goes to
//! the sink before each call returns.
//!
//! The caller chunks input into pages and decides when input has ended;
//! `finalize` must follow the last `write`, exactly once.
use bytes::Bytes;
use log::trace;

use crate::compression::{create_codec, Algorithm, CodecState, Operation};
use crate::telemetry::{Stage, StageTimes, StreamCounters};
use crate::types::StreamError;
use crate::utils::validate_page_size;

/// Output capability for a push filter.
pub trait PushSink {
    /// Take one output page. Called synchronously, in production order.
    fn accept(&mut self, page: Bytes) -> Result<(), StreamError>;
}

impl<F> PushSink for F
where
    F: FnMut(Bytes) -> Result<(), StreamError>,
{
    fn accept(&mut self, page: Bytes) -> Result<(), StreamError> {
        self(page)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushState {
    Active,
    /// `finalize` started; entered before the codec is flushed so that a
    /// failing flush still leaves the filter closed.
    Finalizing,
    Finalized,
}

pub struct PushFilter<K: PushSink> {
    operation: Operation,
    algorithm: Algorithm,
    page_size: usize,
    sink: K,
    codec: CodecState,
    state: PushState,
    scratch: Vec<u8>,
    counters: StreamCounters,
    stage_times: StageTimes,
}

impl<K: PushSink> PushFilter<K> {
    pub fn new(
        operation: Operation,
        algorithm: Algorithm,
        page_size: usize,
        sink: K,
    ) -> Result<Self, StreamError> {
        validate_page_size(page_size)?;
        let codec = create_codec(operation, algorithm)?;
        Ok(Self {
            operation,
            algorithm,
            page_size,
            sink,
            codec,
            state: PushState::Active,
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

    pub fn state(&self) -> PushState {
        self.state
    }

    pub fn is_finalized(&self) -> bool {
        self.state != PushState::Active
    }

    pub fn counters(&self) -> &StreamCounters {
        &self.counters
    }

    pub fn stage_times(&self) -> &StageTimes {
        &self.stage_times
    }

    /// Give the sink back once the stream is done.
    pub fn into_sink(self) -> K {
        self.sink
    }

    /// Feed one page. Fails `WriteAfterFinalize` once `finalize` was called.
    pub fn write(&mut self, page: &[u8]) -> Result<(), StreamError> {
        if self.is_finalized() {
            return Err(StreamError::WriteAfterFinalize);
        }
        if page.len() > self.page_size {
            return Err(StreamError::PageTooLarge { have: page.len(), max: self.page_size });
        }
        if page.is_empty() {
            return Ok(());
        }

        self.counters.add_input(page.len());
        let codec = &mut self.codec;
        let scratch = &mut self.scratch;
        self.stage_times.time(Stage::Codec, || codec.process(page, scratch))?;
        self.deliver()
    }

    /// Flush the codec and deliver the remaining output. Exactly once.
    pub fn finalize(&mut self) -> Result<(), StreamError> {
        if self.is_finalized() {
            return Err(StreamError::AlreadyFinalized);
        }
        self.state = PushState::Finalizing;

        let codec = &mut self.codec;
        let scratch = &mut self.scratch;
        self.stage_times.time(Stage::Codec, || codec.finish(scratch))?;
        self.deliver()?;

        self.state = PushState::Finalized;
        trace!("{} {} push: finalized", self.algorithm, self.operation);
        Ok(())
    }

    /// Hand staged codec output to the sink in page-size pieces.
    fn deliver(&mut self) -> Result<(), StreamError> {
        if self.scratch.is_empty() {
            return Ok(());
        }
        let produced = Bytes::from(std::mem::take(&mut self.scratch));
        let mut offset = 0;
        while offset < produced.len() {
            let end = (offset + self.page_size).min(produced.len());
            let page = produced.slice(offset..end);
            trace!("{} {} push: page of {} bytes", self.algorithm, self.operation, page.len());
            self.counters.add_output(page.len());
            self.sink.accept(page)?;
            offset = end;
        }
        Ok(())
    }
}
