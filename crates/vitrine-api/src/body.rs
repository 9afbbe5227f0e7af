//! Response body for fetched objects.
//!
//! The object is handed to the connection in frames of [`FRAME_SIZE`] bytes.
//! If the body is dropped before the last frame was taken (the client went
//! away, or the write failed), the interruption is logged.

use std::convert::Infallible;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use http_body::{Frame, SizeHint};

pub const FRAME_SIZE: usize = 64 * 1024;

#[derive(Debug)]
pub struct ObjectBody {
    key: String,
    remaining: Bytes,
    total: usize,
}

impl ObjectBody {
    pub fn new(key: impl Into<String>, data: Bytes) -> Self {
        Self {
            key: key.into(),
            total: data.len(),
            remaining: data,
        }
    }

    fn sent_bytes(&self) -> usize {
        self.total - self.remaining.len()
    }
}

impl http_body::Body for ObjectBody {
    type Data = Bytes;
    type Error = Infallible;

    fn poll_frame(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let this = self.get_mut();
        if this.remaining.is_empty() {
            return Poll::Ready(None);
        }
        let len = this.remaining.len().min(FRAME_SIZE);
        Poll::Ready(Some(Ok(Frame::data(this.remaining.split_to(len)))))
    }

    fn is_end_stream(&self) -> bool {
        self.remaining.is_empty()
    }

    fn size_hint(&self) -> SizeHint {
        SizeHint::with_exact(self.remaining.len() as u64)
    }
}

impl Drop for ObjectBody {
    fn drop(&mut self) {
        if !self.remaining.is_empty() {
            tracing::warn!(
                key = %self.key,
                sent_bytes = self.sent_bytes() as u64,
                total_bytes = self.total as u64,
                "Response write interrupted before the object was fully sent"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Debug;
    use std::sync::{Arc, Mutex};

    use http_body::Body;
    use http_body_util::BodyExt;
    use tracing::field::{Field, Visit};
    use tracing::{Event, Subscriber};
    use tracing_subscriber::layer::{Context as LayerContext, SubscriberExt};
    use tracing_subscriber::Layer;

    use super::*;

    /// Collects the message of every event.
    #[derive(Clone, Default)]
    struct CapturedEvents(Arc<Mutex<Vec<String>>>);

    struct MessageVisitor(String);

    impl Visit for MessageVisitor {
        fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
            if field.name() == "message" {
                self.0 = format!("{:?}", value);
            }
        }
    }

    impl<S: Subscriber> Layer<S> for CapturedEvents {
        fn on_event(&self, event: &Event<'_>, _ctx: LayerContext<'_, S>) {
            let mut visitor = MessageVisitor(String::new());
            event.record(&mut visitor);
            self.0.lock().unwrap().push(visitor.0);
        }
    }

    impl CapturedEvents {
        fn interrupted(&self) -> usize {
            self.0
                .lock()
                .unwrap()
                .iter()
                .filter(|m| m.contains("Response write interrupted"))
                .count()
        }
    }

    fn object(len: usize) -> Bytes {
        Bytes::from(vec![7u8; len])
    }

    #[tokio::test]
    async fn test_should_split_into_frames() {
        let mut body = ObjectBody::new("big.bin", object(FRAME_SIZE * 2 + 10));
        assert_eq!(body.size_hint().exact(), Some((FRAME_SIZE * 2 + 10) as u64));

        let mut sizes = Vec::new();
        while let Some(frame) = body.frame().await {
            sizes.push(frame.unwrap().into_data().unwrap().len());
        }

        assert_eq!(sizes, vec![FRAME_SIZE, FRAME_SIZE, 10]);
        assert!(body.is_end_stream());
    }

    #[tokio::test]
    async fn test_should_log_when_dropped_early() {
        let events = CapturedEvents::default();
        let _guard =
            tracing::subscriber::set_default(tracing_subscriber::registry().with(events.clone()));

        let mut body = ObjectBody::new("big.bin", object(FRAME_SIZE * 3));
        let first = body.frame().await.unwrap().unwrap();
        assert_eq!(first.into_data().unwrap().len(), FRAME_SIZE);
        drop(body);

        assert_eq!(events.interrupted(), 1);
    }

    #[tokio::test]
    async fn test_should_not_log_when_fully_sent() {
        let events = CapturedEvents::default();
        let _guard =
            tracing::subscriber::set_default(tracing_subscriber::registry().with(events.clone()));

        let body = ObjectBody::new("small.png", object(100));
        let collected = body.collect().await.unwrap().to_bytes();
        assert_eq!(collected.len(), 100);

        assert_eq!(events.interrupted(), 0);
    }
}
