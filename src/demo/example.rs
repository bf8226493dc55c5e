use std::{fmt, str::FromStr};

use tracing::debug;

use super::TextSink;
use crate::{
    errors::BridgeError,
    observable::{Event, Observable, ObservableExt},
    publisher::{Completion, Publisher, Receiver},
    relays::{BehaviorRelay, PublishRelay, Relay},
};

const HEADER_RULE: &str = "=====================";
const FOOTER_RULE: &str = "=========================\n";

/// One of the demonstration scenarios. The discriminant is the tag of the
/// button that plays it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Example {
    ObservableAsPublisher = 101,
    PublisherAsObservable = 102,
    RelaysZippedInCombine = 103,
}

impl Example {
    pub const ALL: [Example; 3] = [
        Example::ObservableAsPublisher,
        Example::PublisherAsObservable,
        Example::RelaysZippedInCombine,
    ];

    #[must_use]
    pub fn tag(self) -> i32 {
        self as i32
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Example::ObservableAsPublisher => "observable-as-publisher",
            Example::PublisherAsObservable => "publisher-as-observable",
            Example::RelaysZippedInCombine => "relays-zipped",
        }
    }

    /// Identifier prefixed to every line the scenario logs.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Example::ObservableAsPublisher => "Observable as Publisher",
            Example::PublisherAsObservable => "Publisher as Observable",
            Example::RelaysZippedInCombine => "Zipped Relays in Combine",
        }
    }

    /// Clears `sink` and runs the scenario, appending one line per event.
    pub fn play<S>(self, sink: &S)
    where
        S: TextSink + Clone + Send + Sync + 'static,
    {
        sink.clear();
        debug!(example = self.name(), tag = self.tag(), "playing example");

        match self {
            Example::ObservableAsPublisher => observable_as_publisher(sink, self.title()),
            Example::PublisherAsObservable => publisher_as_observable(sink, self.title()),
            Example::RelaysZippedInCombine => relays_zipped(sink, self.title()),
        }
    }
}

impl fmt::Display for Example {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<i32> for Example {
    type Error = BridgeError;

    fn try_from(tag: i32) -> Result<Self, Self::Error> {
        Example::ALL
            .into_iter()
            .find(|e| e.tag() == tag)
            .ok_or_else(|| BridgeError::UnknownExample(tag.to_string()))
    }
}

impl FromStr for Example {
    type Err = BridgeError;

    /// Accepts either the numeric tag or the kebab-case name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(tag) = s.parse::<i32>() {
            return Example::try_from(tag);
        }
        Example::ALL
            .into_iter()
            .find(|e| e.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| BridgeError::UnknownExample(s.to_owned()))
    }
}

fn completion_logger<S>(sink: &S, id: &'static str) -> impl FnMut(Completion) + Send + 'static
where
    S: TextSink + Clone + Send + 'static,
{
    let sink = sink.clone();
    move |completion| match completion {
        Completion::Finished => {
            sink.append(&format!("{id} -> receive finished"));
            sink.append(FOOTER_RULE);
        }
        Completion::Failure(e) => sink.append(&format!("{id} -> receive failure: {e}")),
    }
}

fn observable_as_publisher<S>(sink: &S, id: &'static str)
where
    S: TextSink + Clone + Send + Sync + 'static,
{
    let stream = Observable::from_values(0..=100);

    sink.append(&format!("🗞 {id}"));
    sink.append(HEADER_RULE);

    let value_sink = sink.clone();
    let _ = stream.as_publisher().sink(
        completion_logger(sink, id),
        move |value| value_sink.append(&format!("{id} -> receive value: {value}")),
    );
}

fn publisher_as_observable<S>(sink: &S, id: &'static str)
where
    S: TextSink + Clone + Send + Sync + 'static,
{
    let publisher = Publisher::new(|mut receiver: Receiver<i32>| {
        for v in 0..=100 {
            receiver.receive(v);
        }
        receiver.receive_completion(Completion::Finished);
    });

    sink.append(&format!("👀 {id}"));
    sink.append(HEADER_RULE);

    let dispose_sink = sink.clone();
    let event_sink = sink.clone();
    publisher
        .as_observable()
        .do_on_dispose(move || {
            dispose_sink.append(&format!("{id} -> disposed"));
            dispose_sink.append(FOOTER_RULE);
        })
        .subscribe_events(move |event| match event {
            Event::Next(element) => event_sink.append(&format!("{id} -> next({element})")),
            Event::Error(error) => event_sink.append(&format!("{id} -> error({error})")),
            Event::Completed => event_sink.append(&format!("{id} -> completed")),
        });
}

fn relays_zipped<S>(sink: &S, id: &'static str)
where
    S: TextSink + Clone + Send + Sync + 'static,
{
    let relay1 = PublishRelay::<i32>::new();
    let relay2 = BehaviorRelay::new(0);

    sink.append(&format!("🤐 {id}"));
    sink.append(HEADER_RULE);

    let value_sink = sink.clone();
    let subscription = relay1
        .as_observable()
        .as_publisher()
        .zip(relay2.as_observable().as_publisher())
        .drop_first(1)
        .sink(completion_logger(sink, id), move |(a, b)| {
            value_sink.append(&format!("{id} -> receive value: ({a}, {b})"));
        });

    let p1 = Publisher::from_values(0..=50);
    let p2 = Publisher::from_values((0..=50).rev());

    p1.as_observable().bind_to(&relay1);
    p2.as_observable().bind_to(&relay2);

    // Production above is synchronous, so this only detaches the zip from both
    // relays; every pair has already been delivered.
    subscription.cancel();
}
