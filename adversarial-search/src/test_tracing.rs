use std::{
    fmt::Debug,
    sync::{Arc, Mutex},
};

use tracing::{
    field::{Field, Visit},
    Event, Level, Subscriber,
};
use tracing_subscriber::{
    layer::{Context, SubscriberExt},
    Layer,
};

/// An event that was emitted while capturing: its level and message
pub(crate) type CapturedEvent = (Level, String);

#[derive(Clone, Default)]
struct EventLog(Arc<Mutex<Vec<CapturedEvent>>>);

struct MessageVisitor<'a>(&'a mut String);

impl Visit for MessageVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        if field.name() == "message" {
            *self.0 = format!("{value:?}");
        }
    }
}

impl<S: Subscriber> Layer<S> for EventLog {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut message = String::new();
        event.record(&mut MessageVisitor(&mut message));

        self.0
            .lock()
            .unwrap()
            .push((*event.metadata().level(), message));
    }
}

/// Run `f` with a subscriber that keeps every event emitted on this thread
pub(crate) fn capture_events<T>(f: impl FnOnce() -> T) -> (T, Vec<CapturedEvent>) {
    let log = EventLog::default();
    let subscriber = tracing_subscriber::registry().with(log.clone());

    let output = tracing::subscriber::with_default(subscriber, f);
    let events = log.0.lock().unwrap().clone();

    (output, events)
}

/// How many of `events` carry `message`
pub(crate) fn count_messages(events: &[CapturedEvent], level: Level, message: &str) -> usize {
    events
        .iter()
        .filter(|(l, m)| *l == level && m == message)
        .count()
}
