#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use rxbridge::{publisher::Completion, Event};

/// Values and completions seen by a publisher subscription.
pub struct Received<T> {
    pub values: Arc<Mutex<Vec<T>>>,
    pub completions: Arc<Mutex<Vec<Completion>>>,
}

impl<T: Clone> Received<T> {
    pub fn values(&self) -> Vec<T> {
        self.values.lock().unwrap().clone()
    }

    pub fn completions(&self) -> Vec<Completion> {
        self.completions.lock().unwrap().clone()
    }
}

pub fn register_receptions<T: Send + 'static>() -> (
    Received<T>,
    impl FnMut(Completion) + Send + 'static,
    impl FnMut(T) + Send + 'static,
) {
    let values = Arc::new(Mutex::new(Vec::new()));
    let values_c = Arc::clone(&values);

    let completions = Arc::new(Mutex::new(Vec::new()));
    let completions_c = Arc::clone(&completions);

    (
        Received {
            values,
            completions,
        },
        move |c| {
            // Track receive_completion() calls.
            completions_c.lock().unwrap().push(c);
        },
        move |v| {
            // Track receive() calls.
            values_c.lock().unwrap().push(v);
        },
    )
}

pub fn register_events<T: Send + 'static>(
) -> (Arc<Mutex<Vec<Event<T>>>>, impl FnMut(Event<T>) + Send + 'static) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let events_c = Arc::clone(&events);

    (events, move |e| events_c.lock().unwrap().push(e))
}
