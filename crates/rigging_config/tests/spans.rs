//! Span coverage of materialization and usage rendering.

use std::sync::Arc;

use parking_lot::Mutex;
use rigging_config::{ConfigurationDef, ObjectRegistry};
use rigging_options::Options;
use tracing::Subscriber;
use tracing::span::{Attributes, Id};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

#[derive(Default, Options)]
struct Timer {
    #[option(name = "period-ms")]
    period_ms: u64,
}

/// Records the name of every span opened.
#[derive(Clone, Default)]
struct SpanNames(Arc<Mutex<Vec<&'static str>>>);

impl<S: Subscriber> Layer<S> for SpanNames {
    fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
        self.0.lock().push(attrs.metadata().name());
    }
}

#[test]
fn consuming_a_definition_opens_spans() {
    let names = SpanNames::default();
    let subscriber = tracing_subscriber::registry().with(names.clone());

    let mut registry = ObjectRegistry::new();
    registry.register::<Timer>("sys.Timer");
    let mut def = ConfigurationDef::new("timers");
    def.add_object("timer", "sys.Timer").unwrap();
    def.add_option("period-ms", "100").unwrap();

    tracing::subscriber::with_default(subscriber, || {
        def.command_usage(&registry).unwrap();
        def.create_configuration(&registry).unwrap();
    });

    assert_eq!(*names.0.lock(), ["usage", "materialize"]);
}
