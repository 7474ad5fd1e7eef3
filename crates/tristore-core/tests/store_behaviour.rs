//! End-to-end behaviour of the triple store: membership, cursor removal,
//! fail-fast detection and local node ordering.

use tristore_core::{
    Error, Literal, LocalNode, NamedNode, Resource, Triple, TriplePattern, TripleStore,
};

fn iri(name: &str) -> Resource {
    Resource::iri(format!("http://example.org/{name}"))
}

fn triple(s: &str, p: &str, o: &str) -> Triple {
    let node = |name: &str| NamedNode::new(format!("http://example.org/{name}"));
    Triple::new(node(s), node(p), node(o))
}

fn collect(
    store: &TripleStore,
    s: Option<&Resource>,
    p: Option<&Resource>,
    o: Option<&Resource>,
) -> Vec<Triple> {
    let mut cursor = store.filter(s, p, o);
    let mut out = Vec::new();
    while let Some(t) = cursor.advance(store).unwrap() {
        out.push(t);
    }
    out
}

fn assert_invariants(store: &TripleStore) {
    let n = store.len();
    assert_eq!(store.index_sizes(), [n, n, n]);
    store.check_consistency().unwrap();
}

#[test]
fn five_triple_scenario() {
    let mut store = TripleStore::new();
    for (s, p, o) in [
        ("A", "p", "B"),
        ("B", "p", "A"),
        ("C", "q", "C"),
        ("A", "q", "B"),
        ("B", "q", "B"),
    ] {
        assert!(store.add(triple(s, p, o)));
    }
    assert_eq!(store.size(), 5);
    assert_invariants(&store);

    let a = iri("A");
    let mut found = collect(&store, Some(&a), None, None);
    assert_eq!(found.len(), 2);
    assert!(found.contains(&triple("A", "p", "B")));
    assert!(found.contains(&triple("A", "q", "B")));

    let mut cursor = store.filter(Some(&a), None, None);
    while cursor.advance(&store).unwrap().is_some() {
        cursor.remove_current(&mut store).unwrap();
    }
    assert_eq!(store.size(), 3);
    assert_invariants(&store);

    found = collect(&store, None, None, Some(&iri("B")));
    assert_eq!(found, vec![triple("B", "q", "B")]);
}

#[test]
fn exact_match_until_removed() {
    let mut store = TripleStore::new();
    let t = Triple::new(
        LocalNode::new(),
        NamedNode::new("http://example.org/p"),
        Literal::with_language("chat", "fr"),
    );
    store.add(t.clone());

    let (s, p, o) = (t.subject().clone(), t.predicate().clone(), t.object().clone());
    assert_eq!(collect(&store, Some(&s), Some(&p), Some(&o)), vec![t.clone()]);

    assert!(store.remove(&t));
    assert!(collect(&store, Some(&s), Some(&p), Some(&o)).is_empty());
    assert_invariants(&store);
}

#[test]
fn duplicate_add_changes_nothing() {
    let mut store = TripleStore::new();
    let t = triple("s", "p", "o");
    assert!(store.add(t.clone()));
    let generation = store.generation();
    assert!(!store.add(t));
    assert_eq!(store.size(), 1);
    assert_eq!(store.generation(), generation);
    assert_invariants(&store);
}

#[test]
fn iterator_remove_everything() {
    let mut store = TripleStore::from_collection(
        (0..50).map(|i| triple(&format!("s{i}"), "p", &format!("o{}", i % 7))),
    );
    assert_eq!(store.len(), 50);

    let mut cursor = store.filter(None, None, None);
    let mut removed = 0;
    while cursor.advance(&store).unwrap().is_some() {
        cursor.remove_current(&mut store).unwrap();
        removed += 1;
    }
    assert_eq!(removed, 50);
    assert!(store.is_empty());
    assert_eq!(store.iter().count(), 0);
    assert_invariants(&store);
}

#[test]
fn filtered_remove_only_touches_matches() {
    let mut store = TripleStore::new();
    for i in 0..20 {
        let object = if i % 2 == 0 { "even" } else { "odd" };
        store.add(triple(&format!("s{i}"), "p", object));
        store.add(triple(&format!("s{i}"), "q", object));
    }

    let (p, even) = (iri("p"), iri("even"));
    let mut cursor = store.filter(None, Some(&p), Some(&even));
    while cursor.advance(&store).unwrap().is_some() {
        cursor.remove_current(&mut store).unwrap();
    }

    assert_eq!(store.len(), 30);
    let pattern = TriplePattern::new(None, Some(p.clone()), Some(even.clone()));
    assert_eq!(store.count(&pattern), 0);
    assert_eq!(store.count(&TriplePattern::with_object(even)), 10);
    assert!(store.iter().all(|t| !(t.predicate() == &p && t.object() == &iri("even"))));
    assert_invariants(&store);
}

#[test]
fn direct_remove_during_filter_fails_fast() {
    let mut store = TripleStore::new();
    for i in 0..10 {
        store.add(triple("s", "p", &format!("o{i}")));
    }

    let s = iri("s");
    let mut cursor = store.filter(Some(&s), None, None);
    let first = cursor.advance(&store).unwrap().unwrap();
    assert!(store.remove(&first));

    match cursor.advance(&store) {
        Err(Error::ConcurrentModification { expected, found }) => assert!(found > expected),
        other => panic!("expected a concurrent modification error, got {other:?}"),
    }
}

#[test]
fn second_cursor_invalidates_first() {
    let mut store = TripleStore::from_collection([triple("a", "p", "b"), triple("c", "p", "d")]);
    let mut first = store.filter(None, None, None);
    let mut second = store.filter(None, None, None);
    first.advance(&store).unwrap();
    second.advance(&store).unwrap();
    second.remove_current(&mut store).unwrap();

    assert!(matches!(
        first.advance(&store),
        Err(Error::ConcurrentModification { .. })
    ));
    assert!(second.advance(&store).unwrap().is_some());
}

#[test]
fn clear_invalidates_cursors() {
    let mut store = TripleStore::from_collection([triple("a", "p", "b")]);
    let mut cursor = store.filter(None, None, None);
    store.clear();
    assert!(matches!(
        cursor.advance(&store),
        Err(Error::ConcurrentModification { .. })
    ));
}

#[test]
fn colliding_local_nodes_stay_distinct() {
    let mut store = TripleStore::new();
    let p = NamedNode::new("http://example.org/p");
    let o = Literal::plain("o");
    let nodes: Vec<LocalNode> = (0..10).map(|_| LocalNode::with_hash(u64::MAX, "x")).collect();

    for node in &nodes {
        assert!(store.add(Triple::new(node.clone(), p.clone(), o.clone())));
    }
    assert_eq!(store.len(), 10);
    assert_eq!(store.resource_order().collisions().bucket_len(u64::MAX), 10);

    for node in &nodes {
        let subject = Resource::from(node.clone());
        let found = collect(&store, Some(&subject), None, None);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].subject(), &subject);
    }

    // Removing one colliding node leaves the order of the others intact.
    assert!(store.remove(&Triple::new(nodes[3].clone(), p.clone(), o.clone())));
    for (i, node) in nodes.iter().enumerate() {
        let t = Triple::new(node.clone(), p.clone(), o.clone());
        assert_eq!(store.contains(&t), i != 3);
    }
    assert_invariants(&store);
}

#[test]
fn collision_order_is_stable() {
    let mut store = TripleStore::new();
    let p = NamedNode::new("http://example.org/p");
    let a = LocalNode::labeled("dup");
    let b = LocalNode::labeled("dup");
    store.add(Triple::new(b.clone(), p.clone(), a.clone()));
    store.add(Triple::new(a.clone(), p.clone(), b.clone()));

    let order: Vec<Triple> = store.iter().cloned().collect();
    for _ in 0..5 {
        assert!(store.iter().eq(order.iter()));
    }
    // `b` was seen first, so it sorts first.
    assert_eq!(order[0].subject(), &Resource::from(b));
}

#[test]
fn literal_subject_rejected() {
    let err = Triple::try_new(Literal::plain("x").into(), iri("p"), iri("o")).unwrap_err();
    assert!(matches!(err, Error::LiteralNotAllowed(_)));
    assert!(Triple::try_new(iri("s"), iri("p"), Literal::plain("x").into()).is_ok());
}

#[test]
fn from_collection_then_mutate() {
    let mut store: TripleStore = (0..100)
        .map(|i| triple(&format!("s{}", i % 10), "p", &format!("o{i}")))
        .collect();
    assert_eq!(store.len(), 100);
    assert_invariants(&store);

    store.extend((0..10).map(|i| triple(&format!("s{i}"), "q", "o")));
    assert_eq!(store.len(), 110);
    let pattern = TriplePattern::with_subject(iri("s0"));
    assert_eq!(store.remove_matching(&pattern).unwrap(), 11);
    assert_eq!(store.len(), 99);
    assert_invariants(&store);
}

#[test]
fn churning_local_nodes_keeps_collision_table_bounded() {
    let mut store = TripleStore::new();
    let p = NamedNode::new("http://example.org/p");
    let kept = Triple::new(LocalNode::labeled("kept"), p.clone(), Literal::plain("o"));
    store.add(kept.clone());

    for _ in 0..20_000 {
        let t = Triple::new(LocalNode::new(), p.clone(), Literal::plain("o"));
        assert!(store.add(t.clone()));
        assert!(store.remove(&t));
    }

    assert_eq!(store.len(), 1);
    assert!(
        store.resource_order().collisions().len() <= 128,
        "{} collision slots",
        store.resource_order().collisions().len()
    );
    assert!(store.contains(&kept));
    assert_invariants(&store);
}
