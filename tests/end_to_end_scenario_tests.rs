use std::sync::Arc;

use chart_grid_sync::bridge::{ChartInteractionListener, DataBridge, GridDataBridge};
use chart_grid_sync::core::{
    BridgeId, ChartConfiguration, ChartId, ChartType, DataPoint, FieldMapping, GridId, GridRow,
};
use chart_grid_sync::registry::ChartRegistry;
use chart_grid_sync::SyncResult;
use parking_lot::Mutex;
use serde_json::json;

#[derive(Default)]
struct InteractionRecorder {
    received: Mutex<Vec<(ChartId, Vec<DataPoint>)>>,
}

impl ChartInteractionListener for InteractionRecorder {
    fn on_chart_interaction(
        &self,
        chart_id: &ChartId,
        data_points: &[DataPoint],
    ) -> SyncResult<()> {
        self.received
            .lock()
            .push((chart_id.clone(), data_points.to_vec()));
        Ok(())
    }
}

fn sales_row(region: &str, sales: i64) -> GridRow {
    let mut row = GridRow::new();
    row.insert("region".to_owned(), json!(region));
    row.insert("sales".to_owned(), json!(sales));
    row
}

#[test]
fn chart_interaction_reaches_bridge_listener_exactly_once() {
    let registry: Arc<ChartRegistry> = Arc::new(ChartRegistry::new());
    let bridge_id = BridgeId::new("b1").expect("bridge id");
    let chart_id = ChartId::new("c1").expect("chart id");
    let grid_id = GridId::new("g1").expect("grid id");

    let mapping = FieldMapping::new().with("region", "x").with("sales", "y");
    let bridge = Arc::new(GridDataBridge::<GridRow>::new(mapping.clone()));
    registry.register_data_bridge(bridge_id.clone(), bridge.clone());
    registry.register_chart(
        chart_id.clone(),
        ChartConfiguration::new(chart_id.clone(), ChartType::Column)
            .with_data_bridge(bridge_id.clone())
            .with_linked_grid(grid_id.clone())
            .with_field_mapping(mapping)
            .with_cross_filtering(true),
    );
    registry.link_charts_to_grid(grid_id.clone(), std::slice::from_ref(&chart_id));

    let recorder = Arc::new(InteractionRecorder::default());
    bridge.add_interaction_listener(recorder.clone());
    bridge.on_grid_data_changed(vec![sales_row("North", 120), sales_row("South", 80)]);

    let looked_up = registry
        .data_bridge(&bridge_id)
        .expect("bridge registered");
    let points = vec![DataPoint::new().with("x", "North").with("y", 120)];
    looked_up.on_chart_interaction(&chart_id, &points);

    let received = recorder.received.lock();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].0, chart_id);
    assert_eq!(received[0].1, points);

    assert_eq!(bridge.grid_selection(), vec![sales_row("North", 120)]);
}

#[test]
fn grid_adapter_resolves_linked_charts_through_the_registry() {
    let registry: ChartRegistry = ChartRegistry::new();
    let bridge_id = BridgeId::new("orders-bridge").expect("bridge id");
    let grid_id = GridId::new("orders").expect("grid id");
    let bridge = Arc::new(GridDataBridge::<GridRow>::new(
        FieldMapping::new().with("region", "category"),
    ));
    registry.register_data_bridge(bridge_id.clone(), bridge);

    let chart_ids: Vec<ChartId> = ["by-region", "trend"]
        .into_iter()
        .map(|raw| ChartId::new(raw).expect("chart id"))
        .collect();
    for chart_id in &chart_ids {
        registry.register_configuration(
            ChartConfiguration::new(chart_id.clone(), ChartType::Bar)
                .with_data_bridge(bridge_id.clone()),
        );
    }
    registry.link_charts_to_grid(grid_id.clone(), &chart_ids);

    let linked = registry.charts_for_grid(&grid_id);
    assert_eq!(linked.len(), 2);
    for configuration in linked {
        let chart_bridge = registry
            .bridge_for_chart(&configuration.chart_id)
            .expect("bridge resolvable from chart");
        chart_bridge.on_grid_data_changed(vec![sales_row("West", 10)]);
        assert_eq!(chart_bridge.grid_row_data().len(), 1);
    }

    registry.unregister_data_bridge(&bridge_id);
    assert!(registry.bridge_for_chart(&chart_ids[0]).is_none());
    assert_eq!(registry.linked_charts(&grid_id), chart_ids);
}

#[test]
fn configured_chart_mapping_is_installed_on_its_bridge() {
    let registry: ChartRegistry = ChartRegistry::new();
    let bridge_id = BridgeId::new("b1").expect("bridge id");
    let chart_id = ChartId::new("by-sales").expect("chart id");
    let bridge = Arc::new(GridDataBridge::<GridRow>::new(
        FieldMapping::new().with("region", "x").with("sales", "y"),
    ));
    registry.register_data_bridge(bridge_id.clone(), bridge.clone());
    registry.register_configuration(
        ChartConfiguration::new(chart_id.clone(), ChartType::Bar)
            .with_data_bridge(bridge_id)
            .with_field_mapping(FieldMapping::new().with("sales", "x")),
    );

    assert!(registry.apply_chart_mapping(&chart_id));
    let effective = bridge.effective_mapping(&chart_id);
    assert_eq!(effective.grid_field("x"), Some("sales"));
    assert_eq!(effective.chart_property("region"), None);

    registry.register_configuration(
        ChartConfiguration::new(chart_id.clone(), ChartType::Bar)
            .with_data_bridge(BridgeId::new("b1").expect("bridge id")),
    );
    assert!(registry.apply_chart_mapping(&chart_id));
    assert!(bridge.chart_mapping(&chart_id).is_none());

    assert!(!registry.apply_chart_mapping(&ChartId::new("unknown").expect("chart id")));
}
