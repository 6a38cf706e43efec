use std::collections::HashSet;

use test_case::test_case;
use tessera_api::graph::{Graph, MutableGraph};
use tessera_api::ns::xsd;
use tessera_api::term::{BlankNode, Iri, Literal};
use tessera_api::triple::Triple;
use tessera_inmem::IndexedGraph;

use super::*;
use crate::backtrack::substitute;

fn iri(s: &str) -> Iri {
    Iri::new_unchecked(s)
}

fn rel() -> Iri {
    iri("tag:rel")
}

fn fresh_nodes(g: &IndexedGraph, n: usize) -> Vec<BlankNode> {
    (0..n).map(|_| g.fresh_blank_node()).collect()
}

fn make_chain(n: usize) -> IndexedGraph {
    let mut g = IndexedGraph::new();
    let nodes = fresh_nodes(&g, n);
    for w in nodes.windows(2) {
        g.insert(Triple::new(w[0], rel(), w[1]));
    }
    g
}

fn add_cycle(g: &mut IndexedGraph, n: usize) {
    let nodes = fresh_nodes(g, n);
    for i in 0..n {
        g.insert(Triple::new(nodes[i], rel(), nodes[(i + 1) % n]));
    }
}

fn make_cycle(n: usize) -> IndexedGraph {
    let mut g = IndexedGraph::new();
    add_cycle(&mut g, n);
    g
}

fn make_clique(n: usize) -> IndexedGraph {
    let mut g = IndexedGraph::new();
    let nodes = fresh_nodes(&g, n);
    for n1 in &nodes {
        for n2 in &nodes {
            g.insert(Triple::new(*n1, rel(), *n2));
        }
    }
    g
}

fn make_tree(n: usize) -> IndexedGraph {
    let mut g = IndexedGraph::new();
    let nodes = fresh_nodes(&g, n);
    let mut i = 0;
    while 2 * i < nodes.len() {
        g.insert(Triple::new(nodes[i], rel(), nodes[2 * i]));
        if 2 * i + 1 < nodes.len() {
            g.insert(Triple::new(nodes[i], rel(), nodes[2 * i + 1]));
        }
        i += 1;
    }
    g
}

fn apply(g: &IndexedGraph, mapping: &BnodeMapping) -> HashSet<Triple> {
    g.triples().map(|t| substitute(&t, mapping)).collect()
}

#[test]
fn empty_graphs_are_isomorphic() {
    let g1 = IndexedGraph::new();
    let g2 = IndexedGraph::new();
    assert_eq!(
        match_graphs(&g1, &g2),
        Isomorphism::Isomorphic(BnodeMapping::new())
    );
}

#[test]
fn ground_graphs_compare_by_equality() {
    let mut g1 = IndexedGraph::new();
    g1.insert(Triple::new(iri("tag:a"), rel(), iri("tag:b")));
    let g2 = g1.clone();
    assert_eq!(
        match_graphs(&g1, &g2),
        Isomorphism::Isomorphic(BnodeMapping::new())
    );

    let mut g3 = IndexedGraph::new();
    g3.insert(Triple::new(iri("tag:a"), rel(), iri("tag:c")));
    assert_eq!(match_graphs(&g1, &g3), Isomorphism::NotIsomorphic);
}

#[test]
fn blank_node_is_not_a_wildcard() {
    let mut g1 = IndexedGraph::new();
    g1.insert(Triple::new(g1.fresh_blank_node(), rel(), iri("tag:o")));
    let mut g2 = IndexedGraph::new();
    g2.insert(Triple::new(iri("tag:s"), rel(), iri("tag:o")));
    assert_eq!(match_graphs(&g1, &g2), Isomorphism::NotIsomorphic);
    assert_eq!(match_graphs(&g2, &g1), Isomorphism::NotIsomorphic);
}

#[test]
fn symmetric_two_cycle() {
    let g1 = make_cycle(2);
    let g2 = make_cycle(2);
    let mapping = match_graphs(&g1, &g2).into_mapping().expect("isomorphic");
    assert_eq!(mapping.len(), 2);
    // soundness: relabeling g1 yields exactly g2
    let g2_triples: HashSet<Triple> = g2.triples().collect();
    assert_eq!(apply(&g1, &mapping), g2_triples);
}

#[test]
fn self_loop_does_not_match_arc() {
    let mut g1 = IndexedGraph::new();
    let a = g1.fresh_blank_node();
    g1.insert(Triple::new(a, rel(), a));

    let mut g2 = IndexedGraph::new();
    let x = g2.fresh_blank_node();
    let y = g2.fresh_blank_node();
    g2.insert(Triple::new(x, rel(), y));

    assert_eq!(match_graphs(&g1, &g2), Isomorphism::NotIsomorphic);
    assert_eq!(match_graphs(&g2, &g1), Isomorphism::NotIsomorphic);
}

#[test_case(2)]
#[test_case(5)]
#[test_case(10)]
fn chains_are_reflexive(n: usize) {
    let g1 = make_chain(n);
    let g2 = make_chain(n);
    assert!(are_isomorphic(&g1, &g1));
    assert!(are_isomorphic(&g1, &g2));
    assert!(are_isomorphic(&g2, &g1));
}

#[test]
fn chains_of_different_length_differ() {
    assert!(!are_isomorphic(&make_chain(10), &make_chain(11)));
}

#[test_case(3)]
#[test_case(8)]
fn cycles_are_reflexive(n: usize) {
    assert!(are_isomorphic(&make_cycle(n), &make_cycle(n)));
}

#[test]
fn disjoint_cycles_do_not_match_one_long_cycle() {
    // all fourteen blank nodes have one incoming and one outgoing arc, so
    // signature refinement never separates them; only the backtracking
    // stage can tell a 3-cycle plus a 4-cycle from a single 7-cycle
    let mut g1 = IndexedGraph::new();
    add_cycle(&mut g1, 3);
    add_cycle(&mut g1, 4);
    let g2 = make_cycle(7);
    assert_eq!(match_graphs(&g1, &g2), Isomorphism::NotIsomorphic);
    assert_eq!(match_graphs(&g2, &g1), Isomorphism::NotIsomorphic);
}

#[test]
fn split_cycles_are_reflexive() {
    let mut g1 = IndexedGraph::new();
    add_cycle(&mut g1, 3);
    add_cycle(&mut g1, 4);
    let mut g2 = IndexedGraph::new();
    add_cycle(&mut g2, 4);
    add_cycle(&mut g2, 3);
    let mapping = match_graphs(&g1, &g2).into_mapping().expect("isomorphic");
    let g2_triples: HashSet<Triple> = g2.triples().collect();
    assert_eq!(apply(&g1, &mapping), g2_triples);
}

#[test]
fn cliques_are_reflexive() {
    let g1 = make_clique(5);
    let g2 = make_clique(5);
    assert!(are_isomorphic(&g1, &g2));
    assert!(!are_isomorphic(&g1, &make_clique(4)));
}

#[test]
fn trees_are_reflexive() {
    let g1 = make_tree(10);
    let g2 = make_tree(10);
    assert!(are_isomorphic(&g1, &g2));
    assert!(!are_isomorphic(&g1, &make_tree(11)));
}

fn make_person_graph(split_bob: bool) -> IndexedGraph {
    let foaf_knows = iri("http://xmlns.com/foaf/0.1/knows");
    let foaf_mbox = iri("http://xmlns.com/foaf/0.1/mbox");
    let foaf_name = iri("http://xmlns.com/foaf/0.1/name");

    let mut g = IndexedGraph::new();
    let alice = g.fresh_blank_node();
    let bob = g.fresh_blank_node();
    let named_bob = if split_bob { g.fresh_blank_node() } else { bob };
    g.insert(Triple::new(
        alice,
        foaf_name.clone(),
        Literal::typed("alice", xsd::string.clone()),
    ));
    g.insert(Triple::new(
        alice,
        foaf_mbox,
        iri("mailto:alice@work.example"),
    ));
    g.insert(Triple::new(alice, foaf_knows, bob));
    g.insert(Triple::new(
        named_bob,
        foaf_name,
        Literal::typed("bob", xsd::string.clone()),
    ));
    g
}

#[test]
fn mostly_grounded_graphs_match_and_map() {
    let g1 = make_person_graph(false);
    let g2 = make_person_graph(false);
    let mapping = match_graphs(&g1, &g2).into_mapping().expect("isomorphic");
    assert_eq!(mapping.len(), 2);
    let g2_triples: HashSet<Triple> = g2.triples().collect();
    assert_eq!(apply(&g1, &mapping), g2_triples);
}

#[test]
fn splitting_a_node_breaks_isomorphism() {
    let g1 = make_person_graph(false);
    let g4 = make_person_graph(true);
    assert_eq!(match_graphs(&g1, &g4), Isomorphism::NotIsomorphic);
    assert_eq!(match_graphs(&g4, &g1), Isomorphism::NotIsomorphic);
}

#[test]
fn inputs_are_not_mutated() {
    let g1 = make_chain(4);
    let g2 = make_chain(4);
    let before1: HashSet<Triple> = g1.triples().collect();
    let before2: HashSet<Triple> = g2.triples().collect();
    let _ = match_graphs(&g1, &g2);
    assert_eq!(g1.triples().collect::<HashSet<_>>(), before1);
    assert_eq!(g2.triples().collect::<HashSet<_>>(), before2);
}
