//! Adapter for providers whose streaming call blocks its thread.
//!
//! The call runs on a dedicated, detached worker thread. Output is relayed
//! through an unbounded channel of [`StreamToken`]s and consumed with
//! time-bounded receives, so the runtime keeps serving other work while the
//! provider is generating.
//!
//! Dropping the consumer closes the channel. The worker notices on its next
//! send, stops reading the provider response and exits.

use super::{Phase, Tracker};
use anyhow::Result;
use async_stream::stream;
use futures_core::Stream;
use futures_util::StreamExt;
use llm::{BlockingLLM, Request, SamplingParams, StreamToken, error_text};
use std::{
    io,
    sync::Arc,
    thread::{self, JoinHandle},
    time::Duration,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Default per-attempt wait of the consumer.
pub const DEFAULT_WAIT: Duration = Duration::from_secs(60);

/// Worker thread name.
const WORKER_NAME: &str = "genway-bridge";

/// Producer side of a bridge, handed to the worker.
pub struct Sender {
    tx: UnboundedSender<StreamToken>,
}

impl Sender {
    /// Enqueue a text delta. Returns `false` once the consumer is gone.
    pub fn send(&self, text: impl Into<String>) -> bool {
        self.tx.send(StreamToken::Text(text.into())).is_ok()
    }
}

/// A running worker thread and the receiving end of its queue.
pub struct Bridge {
    rx: UnboundedReceiver<StreamToken>,
    worker: JoinHandle<()>,
}

impl Bridge {
    /// Spawn `work` on a new detached thread.
    ///
    /// An error returned by `work` is enqueued as one error token. A
    /// terminal token always follows, whatever the outcome.
    pub fn spawn<F>(work: F) -> io::Result<Self>
    where
        F: FnOnce(&Sender) -> Result<()> + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = thread::Builder::new()
            .name(WORKER_NAME.into())
            .spawn(move || {
                let sender = Sender { tx };
                if let Err(e) = work(&sender) {
                    tracing::error!("generation failed: {e:#}");
                    let _ = sender.tx.send(StreamToken::error(format!("{e:#}")));
                }
                let _ = sender.tx.send(StreamToken::Done);
            })?;
        Ok(Self { rx, worker })
    }

    /// Consume the queue as a stream of text.
    ///
    /// Each receive waits at most `wait`. An elapsed wait ends the stream
    /// only if the worker has already exited; otherwise it is retried.
    pub fn into_stream(self, wait: Duration) -> impl Stream<Item = String> + Send + 'static {
        let Self { mut rx, worker } = self;
        stream! {
            loop {
                match tokio::time::timeout(wait, rx.recv()).await {
                    Ok(Some(token)) => match token.into_text() {
                        Some(text) => yield text,
                        None => break,
                    },
                    Ok(None) => {
                        tracing::debug!("bridge closed without a terminal token");
                        break;
                    }
                    Err(_) if worker.is_finished() => {
                        // The worker may have filled the queue after the wait elapsed.
                        while let Ok(token) = rx.try_recv() {
                            match token.into_text() {
                                Some(text) => yield text,
                                None => break,
                            }
                        }
                        tracing::debug!("bridge worker exited, queue drained");
                        break;
                    }
                    Err(_) => tracing::trace!("bridge wait elapsed, worker still running"),
                }
            }
        }
    }
}

/// Runs calls against a blocking provider on per-call worker threads.
#[derive(Clone)]
pub struct Bridged<P: BlockingLLM> {
    provider: P,
    sampling: Arc<SamplingParams>,
    wait: Duration,
}

impl<P: BlockingLLM> Bridged<P> {
    /// Wrap `provider`, applying `sampling` to every call.
    pub fn new(provider: P, sampling: SamplingParams) -> Self {
        Self {
            provider,
            sampling: Arc::new(sampling),
            wait: DEFAULT_WAIT,
        }
    }

    /// Set the consumer's per-attempt wait.
    pub fn with_wait(mut self, wait: Duration) -> Self {
        self.wait = wait;
        self
    }

    /// The sampling parameters applied to every call.
    pub fn sampling(&self) -> &SamplingParams {
        &self.sampling
    }

    /// The consumer's per-attempt wait.
    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Run one request on a worker thread and yield its text deltas.
    ///
    /// The worker starts when the stream is first polled.
    pub fn stream(&self, request: Request) -> impl Stream<Item = String> + Send + use<P> {
        let provider = self.provider.clone();
        let wait = self.wait;
        stream! {
            match Bridge::spawn(move |sender| drive(&provider, &request, sender)) {
                Ok(bridge) => {
                    let mut tokens = std::pin::pin!(bridge.into_stream(wait));
                    while let Some(token) = tokens.next().await {
                        yield token;
                    }
                }
                Err(e) => {
                    tracing::error!("failed to spawn generation worker: {e}");
                    yield error_text(e);
                }
            }
        }
    }
}

/// Worker body: run the blocking call and relay its deltas.
fn drive<P: BlockingLLM>(provider: &P, request: &Request, sender: &Sender) -> Result<()> {
    let mut phase = Tracker::new("bridged");
    phase.advance(Phase::Requesting);
    let result = relay(provider, request, sender, &mut phase);
    phase.advance(match result {
        Ok(()) => Phase::Completed,
        Err(_) => Phase::Failed,
    });
    result
}

fn relay<P: BlockingLLM>(
    provider: &P,
    request: &Request,
    sender: &Sender,
    phase: &mut Tracker,
) -> Result<()> {
    for chunk in provider.stream(request)? {
        let chunk = chunk?;
        let Some(text) = chunk.content() else {
            continue;
        };
        phase.advance(Phase::Streaming);
        if !sender.send(text) {
            tracing::debug!("consumer dropped, abandoning generation");
            break;
        }
    }
    Ok(())
}
