use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use chart_grid_sync::core::{ChartConfiguration, ChartId, ChartType, GridId};
use chart_grid_sync::events::RegistryTopic;
use chart_grid_sync::registry::ChartRegistry;

const THREADS: usize = 16;
const CHARTS_PER_THREAD: usize = 64;

fn chart_id(raw: &str) -> ChartId {
    ChartId::new(raw).expect("valid chart id")
}

#[test]
fn concurrent_distinct_registrations_lose_no_writes() {
    let registry: Arc<ChartRegistry> = Arc::new(ChartRegistry::new());
    let registrations = Arc::new(AtomicUsize::new(0));
    let counter = registrations.clone();
    registry.subscribe(RegistryTopic::ChartRegistered, move |_| {
        counter.fetch_add(1, Ordering::Relaxed);
        Ok(())
    });

    thread::scope(|scope| {
        for worker in 0..THREADS {
            let registry = &registry;
            scope.spawn(move || {
                for index in 0..CHARTS_PER_THREAD {
                    let id = chart_id(&format!("w{worker}-c{index}"));
                    registry.register_chart(id.clone(), ChartConfiguration::new(id, ChartType::Line));
                }
            });
        }
    });

    let charts = registry.all_charts();
    assert_eq!(charts.len(), THREADS * CHARTS_PER_THREAD);
    let unique: HashSet<&str> = charts.iter().map(|c| c.chart_id.as_str()).collect();
    assert_eq!(unique.len(), THREADS * CHARTS_PER_THREAD);
    assert_eq!(registrations.load(Ordering::Relaxed), THREADS * CHARTS_PER_THREAD);
}

#[test]
fn readers_never_observe_partial_configurations() {
    let registry: Arc<ChartRegistry> = Arc::new(ChartRegistry::new());
    let target = chart_id("shared");

    thread::scope(|scope| {
        let writer_registry = &registry;
        let writer_target = target.clone();
        scope.spawn(move || {
            for round in 0..500 {
                let config = ChartConfiguration::new(writer_target.clone(), ChartType::Bar)
                    .with_title(format!("round-{round}"))
                    .with_container(format!("round-{round}"));
                writer_registry.register_chart(writer_target.clone(), config);
            }
        });

        for _ in 0..4 {
            let reader_registry = &registry;
            let reader_target = target.clone();
            scope.spawn(move || {
                for _ in 0..500 {
                    if let Some(config) = reader_registry.chart(&reader_target) {
                        assert_eq!(config.title, config.container_id);
                    }
                }
            });
        }
    });

    let last = registry.chart(&target).expect("chart registered");
    assert_eq!(last.title.as_deref(), Some("round-499"));
}

#[test]
fn concurrent_links_on_distinct_grids_are_all_kept() {
    let registry: Arc<ChartRegistry> = Arc::new(ChartRegistry::new());

    thread::scope(|scope| {
        for worker in 0..THREADS {
            let registry = &registry;
            scope.spawn(move || {
                let grid = GridId::new(format!("grid-{worker}")).expect("grid id");
                let charts = vec![chart_id(&format!("chart-{worker}"))];
                registry.link_charts_to_grid(grid, &charts);
            });
        }
    });

    assert_eq!(registry.linked_grids().len(), THREADS);
    for worker in 0..THREADS {
        let grid = GridId::new(format!("grid-{worker}")).expect("grid id");
        assert_eq!(
            registry.linked_charts(&grid),
            vec![chart_id(&format!("chart-{worker}"))]
        );
    }
}
