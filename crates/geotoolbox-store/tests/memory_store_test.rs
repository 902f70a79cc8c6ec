//! Query entrypoints running against the in-memory store

use geotoolbox_core::models::PointQuery;
use geotoolbox_core::ports::{LineStore, PointStore};
use geotoolbox_core::{Extent, GeoPoint, LineId, OrderedLine, Property, Stratigraphy};
use geotoolbox_store::MemoryGeoStore;
use proptest::prelude::*;

fn flat(coords: &[(f64, f64)]) -> Vec<GeoPoint> {
    coords.iter().map(|&(e, n)| GeoPoint::new(e, n, None)).collect()
}

async fn seeded_store() -> MemoryGeoStore {
    let store = MemoryGeoStore::new();

    let mut fault = OrderedLine::new(
        false,
        Stratigraphy::new("mu", 240.0),
        flat(&[(1180000.0, 630000.0), (1181000.0, 631000.0)]),
    )
    .unwrap()
    .with_name("Fault_1");
    store.save_line(&mut fault).await.unwrap();

    let mut outline = OrderedLine::new(
        true,
        Stratigraphy::new("so", 250.0),
        flat(&[(1190000.0, 640000.0), (1191000.0, 640000.0), (1191000.0, 641000.0)]),
    )
    .unwrap();
    store.save_line(&mut outline).await.unwrap();

    for (name, e, n) in [("Well_1", 1185000.0, 635000.0), ("Well_2", 1200000.0, 650000.0)] {
        let mut point = GeoPoint::new(e, n, Some(120.0)).with_name(name);
        point.add_property(Property::new("thickness", 2.5, "m")).unwrap();
        store.save_point(&mut point).await.unwrap();
    }

    store
}

#[tokio::test]
async fn test_lines_in_extent() {
    let store = seeded_store().await;

    let extent = Extent::new(1179000, 1195000, 626000, 648000).unwrap();
    let lines = OrderedLine::load_in_extent(&store, &extent).await.unwrap();
    assert_eq!(lines.iter().map(|l| l.id()).collect::<Vec<_>>(), vec![Some(LineId(1)), Some(LineId(2))]);
    assert!(lines[1].is_closed());
    assert_eq!(lines[0].name(), "Fault_1");

    let partial = Extent::new(1180500.0, 1181500.0, 630500.0, 631500.0).unwrap();
    let lines = OrderedLine::load_in_extent(&store, &partial).await.unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].len(), 2);
}

#[tokio::test]
async fn test_empty_extent_returns_no_lines() {
    let store = seeded_store().await;
    let extent = Extent::new(0.0, 10.0, 0.0, 10.0).unwrap();
    assert!(OrderedLine::load_in_extent(&store, &extent).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unattached_points() {
    let store = seeded_store().await;

    let all = GeoPoint::load_unattached(&store).await.unwrap();
    assert_eq!(all.iter().map(|p| p.name()).collect::<Vec<_>>(), vec!["Well_1", "Well_2"]);
    assert!(all.iter().all(|p| !p.is_attached()));
    assert_eq!(all[0].property("thickness").unwrap().value(), 2.5);

    let named = GeoPoint::load_unattached_by_name(&store, "Well_2").await.unwrap();
    assert_eq!(named.len(), 1);
    assert!(GeoPoint::load_unattached_by_name(&store, "Well_9").await.unwrap().is_empty());

    let extent = Extent::new(1179000.0, 1195000.0, 626000.0, 648000.0).unwrap();
    let inside = GeoPoint::load_unattached_in_extent(&store, &extent).await.unwrap();
    assert_eq!(inside.len(), 1);
    assert_eq!(inside[0].name(), "Well_1");

    let members = store.query_points(&PointQuery::new().attached(true)).await.unwrap();
    assert_eq!(members.len(), 5);
}

#[tokio::test]
async fn test_stratigraphy_init_against_store() {
    let store = seeded_store().await;

    let existing = Stratigraphy::init(&store, "mu", Some(100.0), false).await.unwrap();
    assert_eq!(existing.age(), 240.0);

    let updated = Stratigraphy::init(&store, "mu", Some(-5.0), true).await.unwrap();
    assert_eq!(updated.age(), -1.0);
    assert_eq!(updated.id(), existing.id());

    let line = store.get_line(LineId(1)).await.unwrap().unwrap();
    assert_eq!(line.horizon().unwrap().age(), -1.0);
    assert!(line.points().iter().all(|p| p.horizon() == line.horizon()));
}

#[tokio::test]
async fn test_edit_and_resave_line() {
    let store = seeded_store().await;
    let mut line = store.get_line(LineId(2)).await.unwrap().unwrap();

    line.insert_point(GeoPoint::new(1190500.0, 640500.0, None), 1).unwrap();
    line.delete_by_coordinates(1191000.0, 641000.0, 0.0).unwrap();
    store.save_line(&mut line).await.unwrap();

    let reloaded = store.get_line(LineId(2)).await.unwrap().unwrap();
    assert_eq!(reloaded, line);
    assert_eq!(reloaded.len(), 3);
    assert_eq!(store.point_count(), 7);
}

proptest! {
    #[test]
    fn prop_saved_line_reloads_unchanged(
        coords in proptest::collection::vec((0i32..5, 0i32..5), 0..10),
        closed in any::<bool>(),
    ) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async {
            let store = MemoryGeoStore::new();
            let points: Vec<GeoPoint> =
                coords.iter().map(|&(e, n)| GeoPoint::new(e as f64, n as f64, None)).collect();
            let mut line = OrderedLine::new(closed, Stratigraphy::named("mu"), points).unwrap();

            let id = store.save_line(&mut line).await.unwrap();
            let reloaded = store.get_line(id).await.unwrap().unwrap();

            assert_eq!(reloaded, line);
            assert_eq!(store.point_count(), line.len());
        });
    }
}

#[tokio::test]
async fn test_lines_by_name_and_units_by_age() {
    let store = seeded_store().await;

    let faults = OrderedLine::load_by_name(&store, "Fault_1").await.unwrap();
    assert_eq!(faults.len(), 1);
    assert_eq!(faults[0].id(), Some(LineId(1)));
    assert_eq!(faults[0].len(), 2);
    assert!(OrderedLine::load_by_name(&store, "Fault_9").await.unwrap().is_empty());

    let units = Stratigraphy::load_by_age(&store, 245.0, 260.0).await.unwrap();
    assert_eq!(units.iter().map(|u| u.name()).collect::<Vec<_>>(), vec!["so"]);
    let units = Stratigraphy::load_by_age(&store, 0.0, 1000.0).await.unwrap();
    assert_eq!(units.len(), 2);
}
