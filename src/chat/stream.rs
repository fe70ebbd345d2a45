//! Streaming chat calls.
//!
//! Each streaming call runs in its own tokio task that reads transport lines,
//! decodes frames, aggregates text and commits the final assistant message.
//! The caller consumes a [`ChatStream`] fed through a bounded channel.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::Stream;
use futures_util::StreamExt;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::phase::{CallPhase, PhaseTracker};
use crate::aggregate::StreamAggregator;
use crate::error::{ApiError, ApiResult, DecodeError, TransportError};
use crate::history::HistoryStore;
use crate::models::Message;
use crate::sse::{EnvelopeKind, FrameDecoder};
use crate::traits::{HttpRequest, Transport};

/// Event delivered to the consumer of a streaming call.
///
/// A call produces any number of `Partial` and `DecodeError` events followed
/// by at most one `Completed` or `Failed`. A cancelled call produces neither.
#[derive(Debug)]
pub enum StreamEvent {
    /// Next text fragment, in arrival order
    Partial(String),
    /// A line could not be decoded; the stream continues
    DecodeError(DecodeError),
    /// Final assistant message, already committed to history
    Completed(Message),
    /// The call was aborted; nothing was committed
    Failed(ApiError),
}

impl StreamEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Completed(_) | StreamEvent::Failed(_))
    }
}

/// Handle to a running streaming call.
///
/// Dropping the handle cancels the call.
#[derive(Debug)]
pub struct ChatStream {
    call_id: Uuid,
    rx: mpsc::Receiver<StreamEvent>,
    cancel: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl ChatStream {
    pub(crate) fn new(
        call_id: Uuid,
        rx: mpsc::Receiver<StreamEvent>,
        cancel: oneshot::Sender<()>,
        task: JoinHandle<()>,
    ) -> Self {
        Self {
            call_id,
            rx,
            cancel: Some(cancel),
            task: Some(task),
        }
    }

    /// Spawn a task that delivers `events` in order, `delay` apart,
    /// honouring cancellation.
    pub(crate) fn from_events(events: Vec<StreamEvent>, buffer: usize, delay: Duration) -> Self {
        let call_id = Uuid::new_v4();
        let (tx, rx) = mpsc::channel(buffer.max(1));
        let (cancel_tx, mut cancel_rx) = oneshot::channel();

        let task = tokio::spawn(async move {
            for event in events {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                if !emit(&tx, &mut cancel_rx, event).await {
                    return;
                }
            }
        });

        Self::new(call_id, rx, cancel_tx, task)
    }

    /// Identifier attached to this call's log records.
    pub fn call_id(&self) -> Uuid {
        self.call_id
    }

    /// Stop the call. No final message is committed afterwards.
    ///
    /// Events already buffered can still be read.
    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
    }

    /// Drain the stream and return the final message.
    pub async fn final_message(mut self) -> ApiResult<Message> {
        while let Some(event) = self.rx.recv().await {
            match event {
                StreamEvent::Completed(message) => return Ok(message),
                StreamEvent::Failed(err) => return Err(err),
                StreamEvent::Partial(_) | StreamEvent::DecodeError(_) => {}
            }
        }
        Err(TransportError::Cancelled.into())
    }

    /// Wait until the background task has exited.
    pub async fn join(mut self) {
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Stream for ChatStream {
    type Item = StreamEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

impl Drop for ChatStream {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Send an event unless the call is cancelled first.
///
/// Returns false when the consumer is gone or cancelled.
async fn emit(
    tx: &mpsc::Sender<StreamEvent>,
    cancel: &mut oneshot::Receiver<()>,
    event: StreamEvent,
) -> bool {
    tokio::select! {
        biased;
        _ = cancel => false,
        sent = tx.send(event) => sent.is_ok(),
    }
}

/// Start the background task for one streaming chat call.
pub(crate) fn spawn_chat_stream(
    phase: PhaseTracker,
    transport: Arc<dyn Transport>,
    request: HttpRequest,
    history: HistoryStore,
    buffer: usize,
) -> ChatStream {
    let call_id = phase.call_id();
    let (tx, rx) = mpsc::channel(buffer.max(1));
    let (cancel_tx, cancel_rx) = oneshot::channel();

    let task = tokio::spawn(run_chat_stream(
        phase, transport, request, history, tx, cancel_rx,
    ));

    ChatStream::new(call_id, rx, cancel_tx, task)
}

async fn run_chat_stream(
    mut phase: PhaseTracker,
    transport: Arc<dyn Transport>,
    request: HttpRequest,
    history: HistoryStore,
    tx: mpsc::Sender<StreamEvent>,
    mut cancel: oneshot::Receiver<()>,
) {
    let call_id = phase.call_id();
    phase.advance(CallPhase::InFlight);

    let opened = tokio::select! {
        biased;
        _ = &mut cancel => {
            phase.advance(CallPhase::Cancelled);
            return;
        }
        opened = transport.perform_stream_request(&request) => opened,
    };

    let mut lines = match opened {
        Ok(lines) => lines,
        Err(err) => {
            tracing::warn!(call_id = %call_id, "Stream request failed: {}", err);
            phase.advance(CallPhase::Failed);
            emit(&tx, &mut cancel, StreamEvent::Failed(err.into())).await;
            return;
        }
    };

    phase.advance(CallPhase::Streaming);
    let mut decoder = FrameDecoder::new(EnvelopeKind::Chat);
    let mut aggregator = StreamAggregator::new();

    loop {
        let next = tokio::select! {
            biased;
            _ = &mut cancel => {
                phase.advance(CallPhase::Cancelled);
                return;
            }
            next = lines.next() => next,
        };

        let line = match next {
            Some(Ok(line)) => line,
            Some(Err(err)) => {
                tracing::warn!(
                    call_id = %call_id,
                    fragments = aggregator.fragment_count(),
                    "Stream aborted: {}",
                    err
                );
                phase.advance(CallPhase::Failed);
                emit(&tx, &mut cancel, StreamEvent::Failed(err.into())).await;
                return;
            }
            None => break,
        };

        let event = match decoder.feed_line(&line) {
            None => None,
            Some(Ok(frame)) => aggregator.push(&frame).map(StreamEvent::Partial),
            Some(Err(err)) => {
                tracing::warn!(call_id = %call_id, "Skipping malformed frame: {}", err);
                Some(StreamEvent::DecodeError(err))
            }
        };

        if let Some(event) = event {
            if !emit(&tx, &mut cancel, event).await {
                phase.advance(CallPhase::Cancelled);
                return;
            }
        }

        if decoder.is_terminated() {
            break;
        }
    }

    // Release the connection before committing.
    drop(lines);
    phase.advance(CallPhase::Completing);

    if let Some(message) = aggregator.finish() {
        history.append(message.clone());
        tracing::info!(
            call_id = %call_id,
            fragments = aggregator.fragment_count(),
            chars = message.content.len(),
            terminal = aggregator.terminal_seen(),
            "Stream completed"
        );
        emit(&tx, &mut cancel, StreamEvent::Completed(message)).await;
    }
    phase.advance(CallPhase::Done);
}
