use std::collections::{HashMap, HashSet};

use casvec_dataset::{Dataset, DatasetStore, MemoryStore, RedbStore, Vector};
use casvec_labeler::{AssignConfig, ErrorKind, LabelError, Labeler, RandomColor};

fn abcd() -> Dataset {
    let mut ds = Dataset::new("admin", "abcd");
    ds.vectors = vec![
        Vector::new("A", vec![0.0, 0.0]),
        Vector::new("B", vec![0.1, 0.1]),
        Vector::new("C", vec![10.0, 10.0]),
        Vector::new("D", vec![10.1, 10.1]),
    ];
    ds
}

fn labeler(store: Box<dyn DatasetStore>, clusters: usize) -> Labeler {
    Labeler::new(
        store,
        Box::new(RandomColor::new()),
        AssignConfig {
            clusters,
            ..AssignConfig::default()
        },
    )
}

#[test]
fn end_to_end_two_clusters() {
    let mut labeler = labeler(Box::new(MemoryStore::with_datasets([abcd()])), 2);
    let report = labeler
        .update_dataset_vector_categories("admin", "abcd")
        .unwrap();
    assert_eq!(report.labeled, 4);
    assert_eq!(report.clusters.len(), 2);

    let ds = labeler.store().get_dataset("admin", "abcd").unwrap().unwrap();
    let v = &ds.vectors;
    assert_eq!(v[0].category, v[1].category);
    assert_eq!(v[2].category, v[3].category);
    assert_ne!(v[0].category, v[2].category);

    let categories: HashSet<&str> = v.iter().map(|v| v.category.as_str()).collect();
    assert_eq!(categories, HashSet::from(["0", "1"]));

    assert!(!v[0].color.is_empty() && !v[2].color.is_empty());
    assert_eq!(v[0].color, v[1].color);
    assert_eq!(v[2].color, v[3].color);
    assert_ne!(v[0].color, v[2].color);
}

#[test]
fn ten_vectors_three_clusters() {
    let mut ds = Dataset::new("admin", "ten");
    ds.vectors = (0..10)
        .map(|i| Vector::new(format!("v{i}"), vec![i as f64, (i % 4) as f64 * 2.5, 1.0]))
        .collect();
    ds.vectors.push(Vector::new("no-data", vec![]));

    let mut labeler = labeler(Box::new(MemoryStore::with_datasets([ds])), 3);
    labeler
        .update_dataset_vector_categories("admin", "ten")
        .unwrap();

    let ds = labeler.store().get_dataset("admin", "ten").unwrap().unwrap();
    let (with_data, without): (Vec<&Vector>, Vec<&Vector>) =
        ds.vectors.iter().partition(|v| !v.data.is_empty());

    let categories: HashSet<&str> = with_data.iter().map(|v| v.category.as_str()).collect();
    assert_eq!(categories, HashSet::from(["0", "1", "2"]));

    let mut colors: HashMap<&str, &str> = HashMap::new();
    for v in &with_data {
        assert!(!v.color.is_empty());
        let c = colors.entry(v.category.as_str()).or_insert(v.color.as_str());
        assert_eq!(*c, v.color);
    }

    assert_eq!(without.len(), 1);
    assert!(without[0].category.is_empty() && without[0].color.is_empty());
}

#[test]
fn empty_dataset_is_rejected_and_untouched() {
    let mut ds = Dataset::new("admin", "blank");
    ds.vectors = vec![Vector::new("a", vec![]), Vector::new("b", vec![])];
    let store = MemoryStore::with_datasets([ds.clone()]);

    let mut labeler = labeler(Box::new(store), 2);
    let err = labeler
        .update_dataset_vector_categories("admin", "blank")
        .unwrap_err();
    assert!(matches!(err, LabelError::EmptyInput));
    assert_eq!(err.kind(), ErrorKind::Configuration);

    let stored = labeler.store().get_dataset("admin", "blank").unwrap().unwrap();
    assert_eq!(stored, ds);
}

#[test]
fn redb_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("datasets.redb");
    {
        let store = RedbStore::open(&path).unwrap();
        store.add_dataset(&abcd()).unwrap();
        let mut labeler = labeler(Box::new(store), 2);
        labeler
            .update_dataset_vector_categories("admin", "abcd")
            .unwrap();
    }

    let store = RedbStore::open(&path).unwrap();
    let ds = store.get_dataset("admin", "abcd").unwrap().unwrap();
    assert!(ds.vectors.iter().all(|v| v.is_labeled() && !v.color.is_empty()));
    assert_eq!(ds.vectors[0].category, ds.vectors[1].category);
}
