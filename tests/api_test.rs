mod common;

use common::{corpus, known};
use keyscope::api::{analyze_cached, CacheKey, InMemoryReportStore, ReportStore};
use keyscope::config::LayoutRules;
use keyscope::effort::EffortModel;
use keyscope::geometry::GeometryTable;
use keyscope::layout::Layout;
use keyscope::layouts::KnownLayout;
use keyscope::scorer::{Analyzer, AnalyzerParams};

#[test]
fn test_cache_miss_then_hit() {
    let store = InMemoryReportStore::new();
    let analyzer = Analyzer::default();
    let layout = known(KnownLayout::Graphite);
    let c = corpus("graphite is a fine layout");

    let first = analyze_cached(&store, &analyzer, &layout, &c).unwrap();
    assert_eq!(store.len(), 1);

    let second = analyze_cached(&store, &analyzer, &layout, &c).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(first, second);
    assert_eq!(first, analyzer.analyze(&layout, &c).unwrap());
}

#[test]
fn test_hit_keeps_the_callers_layout_name() {
    let store = InMemoryReportStore::new();
    let analyzer = Analyzer::default();
    let c = corpus("same keys different name");
    let geom = GeometryTable::standard();

    let qwerty = known(KnownLayout::Qwerty);
    analyze_cached(&store, &analyzer, &qwerty, &c).unwrap();

    let mut spec = qwerty.to_spec();
    spec.name = "renamed".to_string();
    let renamed = Layout::validate(&spec, &geom, &LayoutRules::default()).unwrap();

    let report = analyze_cached(&store, &analyzer, &renamed, &c).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(report.layout_name, "renamed");
    assert_eq!(report.layout_hash, qwerty.layout_hash());
}

#[test]
fn test_key_components_separate_entries() {
    let store = InMemoryReportStore::new();
    let layout = known(KnownLayout::Canary);
    let c1 = corpus("first corpus");
    let c2 = corpus("second corpus");

    let analyzer = Analyzer::default();
    analyze_cached(&store, &analyzer, &layout, &c1).unwrap();
    analyze_cached(&store, &analyzer, &layout, &c2).unwrap();
    assert_eq!(store.len(), 2);

    let effort = EffortModel {
        version: "softer-v2".to_string(),
        center_column_penalty: 0.1,
        ..Default::default()
    };
    let softer = AnalyzerParams::builder()
        .effort(effort)
        .build()
        .build_analyzer()
        .unwrap();
    let report = analyze_cached(&store, &softer, &layout, &c1).unwrap();
    assert_eq!(store.len(), 3);
    assert_eq!(report.effort_model_version, "softer-v2");

    store.clear();
    assert!(store.is_empty());
}

#[test]
fn test_key_from_report_matches_inputs() {
    let analyzer = Analyzer::default();
    let layout = known(KnownLayout::Workman);
    let c = corpus("workman");
    let report = analyzer.analyze(&layout, &c).unwrap();

    let key = CacheKey::new(&layout, &c, analyzer.effort());
    assert_eq!(CacheKey::from_report(&report), key);

    let store = InMemoryReportStore::new();
    assert!(store.get(&key).is_none());
    store.put(key.clone(), report.clone());
    assert_eq!(store.get(&key), Some(report));
}
