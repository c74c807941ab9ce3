use std::sync::Arc;

use chart_grid_sync::core::{ChartConfiguration, ChartId, ChartType, FieldMapping};
use chart_grid_sync::events::{RegistryEvent, RegistryListener};
use chart_grid_sync::registry::ChartRegistry;
use chart_grid_sync::SyncResult;
use parking_lot::Mutex;

#[derive(Default)]
struct RecordingListener {
    events: Mutex<Vec<RegistryEvent>>,
}

impl RegistryListener for RecordingListener {
    fn on_event(&self, event: &RegistryEvent) -> SyncResult<()> {
        self.events.lock().push(event.clone());
        Ok(())
    }
}

fn chart_id(raw: &str) -> ChartId {
    ChartId::new(raw).expect("valid chart id")
}

fn line_chart(raw: &str) -> ChartConfiguration {
    ChartConfiguration::new(chart_id(raw), ChartType::Line)
}

#[test]
fn re_registration_replaces_and_emits_once_per_call() {
    let registry: ChartRegistry = ChartRegistry::new();
    let recorder = Arc::new(RecordingListener::default());
    registry.add_listener(recorder.clone());

    registry.register_chart(chart_id("c1"), line_chart("c1").with_title("first"));
    registry.register_chart(
        chart_id("c1"),
        ChartConfiguration::new(chart_id("c1"), ChartType::Pie).with_title("second"),
    );

    let stored = registry.chart(&chart_id("c1")).expect("chart registered");
    assert_eq!(stored.chart_type, ChartType::Pie);
    assert_eq!(stored.title.as_deref(), Some("second"));
    assert_eq!(registry.chart_count(), 1);

    let events = recorder.events.lock();
    assert_eq!(events.len(), 2);
    match &events[1] {
        RegistryEvent::ChartRegistered {
            chart_id: id,
            configuration,
        } => {
            assert_eq!(id.as_str(), "c1");
            assert_eq!(configuration.title.as_deref(), Some("second"));
        }
        other => panic!("expected registration event, got {other:?}"),
    }
}

#[test]
fn unregister_is_presence_gated() {
    let registry: ChartRegistry = ChartRegistry::new();
    let recorder = Arc::new(RecordingListener::default());
    registry.add_listener(recorder.clone());

    assert!(!registry.unregister_chart(&chart_id("ghost")));
    assert!(recorder.events.lock().is_empty());

    registry.register_configuration(line_chart("c1"));
    assert!(registry.unregister_chart(&chart_id("c1")));
    assert!(registry.chart(&chart_id("c1")).is_none());
    assert!(!registry.contains_chart(&chart_id("c1")));

    let events = recorder.events.lock();
    assert_eq!(events.len(), 2);
    assert!(matches!(
        &events[1],
        RegistryEvent::ChartUnregistered { chart_id } if chart_id.as_str() == "c1"
    ));
}

#[test]
fn all_charts_is_a_snapshot() {
    let registry: ChartRegistry = ChartRegistry::new();
    registry.register_configuration(line_chart("c1"));

    let mut before = registry.all_charts();
    registry.register_configuration(line_chart("c2"));
    assert_eq!(before.len(), 1);
    assert_eq!(before[0].chart_id.as_str(), "c1");

    before.clear();
    assert_eq!(registry.all_charts().len(), 2);
}

#[test]
fn all_charts_follows_registration_order_and_keeps_position_on_replace() {
    let registry: ChartRegistry = ChartRegistry::new();
    for raw in ["a", "b", "c"] {
        registry.register_configuration(line_chart(raw));
    }
    registry.register_configuration(
        ChartConfiguration::new(chart_id("a"), ChartType::Area).with_toolbar(true),
    );
    registry.unregister_chart(&chart_id("b"));

    let ids: Vec<String> = registry
        .chart_ids()
        .into_iter()
        .map(ChartId::into_inner)
        .collect();
    assert_eq!(ids, vec!["a".to_owned(), "c".to_owned()]);
    let first = registry.chart(&chart_id("a")).expect("a registered");
    assert_eq!(first.chart_type, ChartType::Area);
    assert!(first.toolbar_enabled);
}

#[test]
fn returned_configuration_is_not_affected_by_later_replace() {
    let registry: ChartRegistry = ChartRegistry::new();
    let mapping = FieldMapping::new().with("region", "x");
    registry.register_configuration(line_chart("c1").with_field_mapping(mapping.clone()));

    let held = registry.chart(&chart_id("c1")).expect("registered");
    registry.register_configuration(line_chart("c1"));

    assert_eq!(held.field_mapping, mapping);
    assert!(
        registry
            .chart(&chart_id("c1"))
            .expect("still registered")
            .field_mapping
            .is_empty()
    );
}

#[test]
fn key_wins_over_configuration_id() {
    let registry: ChartRegistry = ChartRegistry::new();
    registry.register_chart(chart_id("outer"), line_chart("inner"));

    assert!(registry.chart(&chart_id("inner")).is_none());
    let stored = registry.chart(&chart_id("outer")).expect("stored under key");
    assert_eq!(stored.chart_id.as_str(), "inner");
}
