use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("bayard.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("bayard.client.request_errors");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("bayard.client.request_duration_seconds");

pub(crate) static SESSION_SUBMISSIONS: Counter = Counter::new("bayard.session.submissions");
pub(crate) static SESSION_IGNORED: Counter = Counter::new("bayard.session.ignored");
pub(crate) static SESSION_BUSY: Counter = Counter::new("bayard.session.busy");
pub(crate) static SESSION_ANSWERS: Counter = Counter::new("bayard.session.answers");
pub(crate) static SESSION_FAILURES: Counter = Counter::new("bayard.session.failures");

pub(crate) static REVEAL_STEPS: Counter = Counter::new("bayard.reveal.steps");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_moments(&CLIENT_REQUEST_DURATION);

    collector.register_counter(&SESSION_SUBMISSIONS);
    collector.register_counter(&SESSION_IGNORED);
    collector.register_counter(&SESSION_BUSY);
    collector.register_counter(&SESSION_ANSWERS);
    collector.register_counter(&SESSION_FAILURES);

    collector.register_counter(&REVEAL_STEPS);
}
