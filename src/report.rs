//! Progress notifications emitted while algorithms run.
//!
//! Reporters are plain callbacks invoked synchronously, in order, on the
//! thread doing the work. A panicking reporter aborts the running pass.

use serde::{Serialize, Serializer};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// The kinds of notification an algorithm can emit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Emitted by cost functions and derivatives while iterating examples.
    Computation,
    /// Emitted once a cost or derivative pass is complete.
    FinishedComputation,
    /// Emitted by the optimizer at every report boundary.
    Optimization,
    /// Emitted once the optimizer has stopped.
    FinishedOptimization,
}

impl Event {
    pub fn name(&self) -> &'static str {
        match *self {
            Event::Computation => "computation",
            Event::FinishedComputation => "finished-computation",
            Event::Optimization => "optimization",
            Event::FinishedOptimization => "finished-optimization",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which events a reporter wants to hear about.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Subscription {
    All,
    Event(Event),
}

impl From<Event> for Subscription {
    fn from(event: Event) -> Self {
        Subscription::Event(event)
    }
}

/// Whether the error went down since the previous report.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Development {
    Decreasing,
    Increasing,
}

impl Development {
    /// Classifies `error` against the error of the previous report.
    pub fn between(last_error: f64, error: f64) -> Self {
        if error <= last_error {
            Development::Decreasing
        } else {
            Development::Increasing
        }
    }
}

impl Serialize for Development {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i8(match *self {
            Development::Decreasing => -1,
            Development::Increasing => 1,
        })
    }
}

/// Progress of an optimizer at a report boundary.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct OptimizationReport {
    pub iterations: usize,
    pub error: f64,
    pub speed: f64,
    pub development: Development,
}

/// The payload passed to reporters.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Report {
    /// Number of examples processed so far.
    Computation { iterations: usize },
    Optimization(OptimizationReport),
}

/// A reporter callback.
pub type Reporter = Rc<RefCell<dyn FnMut(Event, &Report)>>;

/// A dispatch table of reporters keyed by subscription.
///
/// On every event the `All` subscribers run first, then the subscribers of
/// that exact event, each group in registration order.
#[derive(Clone, Default)]
pub struct Reporters {
    all: Vec<Reporter>,
    by_event: Vec<(Event, Reporter)>,
}

impl Reporters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `reporter` for `subscription`.
    pub fn subscribe<S, F>(&mut self, subscription: S, reporter: F) -> &mut Self
    where
        S: Into<Subscription>,
        F: FnMut(Event, &Report) + 'static,
    {
        self.add(subscription.into(), Rc::new(RefCell::new(reporter)));
        self
    }

    /// Registers an already shared reporter.
    pub fn add(&mut self, subscription: Subscription, reporter: Reporter) -> &mut Self {
        match subscription {
            Subscription::All => self.all.push(reporter),
            Subscription::Event(event) => self.by_event.push((event, reporter)),
        }
        self
    }

    /// Copies every subscription of `other` into this table.
    pub fn extend(&mut self, other: &Reporters) -> &mut Self {
        self.all.extend(other.all.iter().cloned());
        self.by_event.extend(other.by_event.iter().cloned());
        self
    }

    pub fn clear(&mut self) {
        self.all.clear();
        self.by_event.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty() && self.by_event.is_empty()
    }

    /// Delivers `report` to every reporter subscribed to `event`.
    ///
    /// A reporter registered under both `All` and `event` is only called
    /// once.
    pub fn report(&self, event: Event, report: &Report) {
        let exact = self
            .by_event
            .iter()
            .filter(|(e, _)| *e == event)
            .map(|(_, r)| r)
            .filter(|r| !self.all.iter().any(|a| Rc::ptr_eq(a, r)));
        for reporter in self.all.iter().chain(exact) {
            (&mut *reporter.borrow_mut())(event, report);
        }
    }
}

impl fmt::Debug for Reporters {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Reporters")
            .field("all", &self.all.len())
            .field("by_event", &self.by_event.len())
            .finish()
    }
}

/// A reporter that forwards every event to the `log` facade.
pub fn log_reporter() -> impl FnMut(Event, &Report) {
    |event: Event, report: &Report| match (event, report) {
        (Event::FinishedOptimization, Report::Optimization(r)) => log::info!(
            "{}: {} iterations, error={}, speed={}",
            event,
            r.iterations,
            r.error,
            r.speed
        ),
        (_, Report::Optimization(r)) => log::debug!(
            "{}: iteration {}, error={}, speed={}, {:?}",
            event,
            r.iterations,
            r.error,
            r.speed,
            r.development
        ),
        (_, Report::Computation { iterations }) => {
            log::debug!("{}: {} examples", event, iterations)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder(
        log: &Rc<RefCell<Vec<String>>>,
        tag: &'static str,
    ) -> impl FnMut(Event, &Report) + 'static {
        let log = log.clone();
        move |event: Event, _: &Report| log.borrow_mut().push(format!("{}:{}", tag, event))
    }

    #[test]
    fn wildcard_reporters_run_before_exact_ones() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut reporters = Reporters::new();
        reporters
            .subscribe(Event::Optimization, recorder(&log, "exact"))
            .subscribe(Subscription::All, recorder(&log, "all-1"))
            .subscribe(Subscription::All, recorder(&log, "all-2"));

        reporters.report(Event::Optimization, &Report::Computation { iterations: 1 });
        reporters.report(Event::Computation, &Report::Computation { iterations: 1 });

        assert_eq!(
            *log.borrow(),
            vec![
                "all-1:optimization",
                "all-2:optimization",
                "exact:optimization",
                "all-1:computation",
                "all-2:computation",
            ]
        );
    }

    #[test]
    fn shared_reporter_is_called_once() {
        let count = Rc::new(RefCell::new(0));
        let counter = count.clone();
        let reporter: Reporter = Rc::new(RefCell::new(move |_: Event, _: &Report| {
            *counter.borrow_mut() += 1
        }));
        let mut reporters = Reporters::new();
        reporters
            .add(Subscription::All, reporter.clone())
            .add(Event::Computation.into(), reporter);
        reporters.report(Event::Computation, &Report::Computation { iterations: 3 });
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn extend_copies_subscriptions() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut source = Reporters::new();
        source.subscribe(Event::FinishedComputation, recorder(&log, "r"));
        let mut target = Reporters::new();
        assert!(target.is_empty());
        target.extend(&source);
        target.report(Event::FinishedComputation, &Report::Computation { iterations: 2 });
        assert_eq!(*log.borrow(), vec!["r:finished-computation"]);
    }

    #[test]
    #[should_panic(expected = "reporter gave up")]
    fn panicking_reporter_aborts_the_pass() {
        use crate::algorithm::{Algorithm, Cost};
        use crate::algorithms::{CostPatch, LogisticCost};
        use crate::feed_forward::tests::{xnor_examples, XNOR};
        use crate::feed_forward::Network;

        let mut cost = LogisticCost::with_options(&CostPatch {
            report_frequency: Some(1),
            ..Default::default()
        });
        cost.set_network(&Network::from_json(XNOR).unwrap());
        cost.set_examples(xnor_examples().into());
        cost.reporters_mut()
            .subscribe(Event::Computation, |_: Event, _: &Report| panic!("reporter gave up"));
        let _ = cost.run();
    }

    #[test]
    fn development_classification() {
        assert_eq!(Development::between(1.0, 0.5), Development::Decreasing);
        assert_eq!(Development::between(1.0, 1.0), Development::Decreasing);
        assert_eq!(Development::between(0.5, 1.0), Development::Increasing);
        assert_eq!(Development::between(f64::INFINITY, 3.0), Development::Decreasing);
    }

    #[test]
    fn payloads_serialize_flat() {
        let report = Report::Optimization(OptimizationReport {
            iterations: 10,
            error: 0.5,
            speed: 0.25,
            development: Development::Decreasing,
        });
        assert_eq!(
            serde_json::to_string(&report).unwrap(),
            r#"{"iterations":10,"error":0.5,"speed":0.25,"development":-1}"#
        );
        assert_eq!(
            serde_json::to_string(&Report::Computation { iterations: 4 }).unwrap(),
            r#"{"iterations":4}"#
        );
    }
}
