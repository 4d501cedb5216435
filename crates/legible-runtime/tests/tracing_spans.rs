#![forbid(unsafe_code)]

//! Tracing instrumentation of engine operations.
//!
//! Verify span names and fields around dispatch/undo/redo and the warning
//! events for skipped mutations.
//!
//! Run:
//!   cargo test -p legible-runtime --test tracing_spans

use std::collections::HashMap;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

use legible_runtime::{CommandName, Engine, EngineConfig};
use legible_style::{MemoryElement, StyleProperty};

// ============================================================================
// Test Infrastructure
// ============================================================================

#[derive(Debug, Clone)]
struct CapturedSpan {
    name: String,
    fields: HashMap<String, String>,
}

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    target: String,
    message: String,
    fields: HashMap<String, String>,
    parent_span_name: Option<String>,
}

#[derive(Clone, Default)]
struct Capture {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
    events: Arc<Mutex<Vec<CapturedEvent>>>,
    span_index: Arc<Mutex<HashMap<u64, usize>>>,
}

impl Capture {
    fn spans(&self) -> Vec<CapturedSpan> {
        self.spans.lock().unwrap().clone()
    }

    fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }

    fn span(&self, name: &str) -> CapturedSpan {
        self.spans()
            .into_iter()
            .find(|s| s.name == name)
            .unwrap_or_else(|| panic!("span {name} not captured"))
    }
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for Capture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        attrs.record(&mut visitor);
        let mut fields: HashMap<String, String> = visitor.0.into_iter().collect();
        for field in attrs.metadata().fields() {
            fields.entry(field.name().to_string()).or_default();
        }

        let mut spans = self.spans.lock().unwrap();
        self.span_index
            .lock()
            .unwrap()
            .insert(id.into_u64(), spans.len());
        spans.push(CapturedSpan {
            name: attrs.metadata().name().to_string(),
            fields,
        });
    }

    fn on_record(
        &self,
        id: &tracing::span::Id,
        values: &tracing::span::Record<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        values.record(&mut visitor);

        let idx = self.span_index.lock().unwrap().get(&id.into_u64()).copied();
        if let Some(idx) = idx
            && let Some(span) = self.spans.lock().unwrap().get_mut(idx)
        {
            span.fields.extend(visitor.0);
        }
    }

    fn on_event(&self, event: &tracing::Event<'_>, ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let fields: HashMap<String, String> = visitor.0.into_iter().collect();
        let message = fields.get("message").cloned().unwrap_or_default();

        let parent_span_name = ctx
            .current_span()
            .id()
            .and_then(|id| ctx.span(id))
            .map(|span_ref| span_ref.name().to_string());

        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            message,
            fields,
            parent_span_name,
        });
    }
}

fn with_captured<F: FnOnce()>(f: F) -> Capture {
    let capture = Capture::default();
    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::filter::LevelFilter::TRACE)
        .with(capture.clone());
    tracing::subscriber::with_default(subscriber, f);
    capture
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn dispatch_span_carries_command_element_and_result() {
    let capture = with_captured(|| {
        let mut engine = Engine::new(EngineConfig::default());
        let el = Rc::new(MemoryElement::new(7));
        engine.dispatch(&el, CommandName::Bold).unwrap();
    });

    let span = capture.span("enhance.dispatch");
    assert_eq!(span.fields["command"], "bold");
    assert_eq!(span.fields["element"], "#7");
    assert!(span.fields["result"].contains("Applied"), "{span:?}");

    let events = capture.events();
    assert!(events.iter().any(|e| e.target == "legible.engine"
        && e.message == "enhancement applied"
        && e.parent_span_name.as_deref() == Some("enhance.dispatch")));
}

#[test]
fn undo_and_redo_spans_record_the_entry() {
    let capture = with_captured(|| {
        let mut engine = Engine::new(EngineConfig::default());
        let el = Rc::new(MemoryElement::new(3));
        engine.dispatch(&el, CommandName::Spacing).unwrap();
        engine.undo().unwrap();
        engine.redo().unwrap();
        let _ = engine.redo();
    });

    let undo = capture.span("enhance.undo");
    assert_eq!(undo.fields["command"], "spacing");
    assert_eq!(undo.fields["element"], "#3");
    assert!(undo.fields["result"].contains("Undone"));

    let redos: Vec<_> = capture
        .spans()
        .into_iter()
        .filter(|s| s.name == "enhance.redo")
        .collect();
    assert_eq!(redos.len(), 2);
    assert!(redos[0].fields["result"].contains("Redone"));
    assert_eq!(redos[1].fields["result"], "nothing to redo");
}

#[test]
fn skipped_mutation_warns() {
    let capture = with_captured(|| {
        let mut engine = Engine::new(EngineConfig::default());
        let el = Rc::new(MemoryElement::new(1).with_inline(StyleProperty::FontSize, "50px"));
        let _ = engine.dispatch(&el, CommandName::SizeUp);
    });

    let warns: Vec<_> = capture
        .events()
        .into_iter()
        .filter(|e| e.level == tracing::Level::WARN)
        .collect();
    assert_eq!(warns.len(), 1, "{warns:?}");
    assert_eq!(warns[0].target, "legible.engine");
    assert_eq!(warns[0].message, "enhancement skipped");
}

#[test]
fn detached_dispatch_warns_without_history_events() {
    let capture = with_captured(|| {
        let mut engine = Engine::new(EngineConfig::default());
        let el = Rc::new(MemoryElement::new(1));
        el.detach();
        let _ = engine.dispatch(&el, CommandName::Bold);
    });

    let events = capture.events();
    assert!(events
        .iter()
        .any(|e| e.level == tracing::Level::WARN && e.message.contains("detached")));
    assert!(!events.iter().any(|e| e.target == "legible.history"));
}

#[test]
fn replay_on_dropped_element_logs_history_event() {
    let capture = with_captured(|| {
        let mut engine = Engine::new(EngineConfig::default());
        let el = Rc::new(MemoryElement::new(9));
        engine.dispatch(&el, CommandName::Bold).unwrap();
        drop(el);
        engine.undo().unwrap();
    });

    assert!(capture.events().iter().any(|e| e.target == "legible.history"
        && e.parent_span_name.as_deref() == Some("enhance.undo")));
}

#[test]
fn applied_event_lists_changed_properties() {
    let capture = with_captured(|| {
        let mut engine = Engine::new(EngineConfig::default());
        let el = Rc::new(MemoryElement::new(5));
        engine.dispatch(&el, CommandName::Spacing).unwrap();
        engine.undo().unwrap();
    });

    let events = capture.events();
    let applied = events
        .iter()
        .find(|e| e.message == "enhancement applied")
        .expect("applied event");
    assert_eq!(applied.fields["changed"], "[LetterSpacing, WordSpacing]");

    let undone = events
        .iter()
        .find(|e| e.message == "undone")
        .expect("undone event");
    assert_eq!(undone.fields["redo_depth"], "1");
    assert_eq!(undone.parent_span_name.as_deref(), Some("enhance.undo"));
}
