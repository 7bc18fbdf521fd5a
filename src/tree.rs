//! Notebook hierarchy reconstruction.
//!
//! Joplin returns notebooks as a flat list where each entry carries an
//! optional parent id. This module rebuilds the forest with an id index and
//! a children multimap rather than linked nodes, so malformed parent data
//! can never produce a reference cycle in memory.
//!
//! Recovery rules, all deterministic:
//! - a notebook whose parent id is unknown is promoted to a root, never
//!   dropped (orphan promotion);
//! - a notebook listing itself as its parent is promoted to a root;
//! - members of a parent cycle are unreachable from any root; the member
//!   with the smallest id is promoted and traversal continues until every
//!   notebook is placed. A warning is logged when that happens.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::error::{JoplinError, Result};
use crate::models::{Notebook, NotebookTreeNode};

/// Build the notebook forest from the flat collection.
///
/// Children at every level are ordered by case-insensitive title, then id.
/// Always terminates and places every input notebook exactly once, even
/// when the parent graph contains cycles. A collection carrying duplicate
/// ids cannot be reconstructed and is reported as a structural
/// inconsistency.
pub fn build_notebook_tree(notebooks: &[Notebook]) -> Result<Vec<NotebookTreeNode>> {
    let by_id: HashMap<&str, &Notebook> = notebooks.iter().map(|nb| (nb.id.as_str(), nb)).collect();
    if by_id.len() < notebooks.len() {
        return Err(JoplinError::StructuralInconsistency(
            "duplicate notebook ids in collection".to_string(),
        ));
    }

    let mut children: HashMap<&str, Vec<&Notebook>> = HashMap::new();
    let mut roots: Vec<&Notebook> = Vec::new();

    for nb in notebooks {
        let parent = nb
            .parent_id
            .as_deref()
            .filter(|p| *p != nb.id && by_id.contains_key(p));
        match parent {
            Some(parent_id) => children.entry(parent_id).or_default().push(nb),
            // Orphan promotion: missing or self-referencing parent.
            None => roots.push(nb),
        }
    }

    for list in children.values_mut() {
        sort_siblings(list);
    }

    let mut placed: HashSet<&str> = HashSet::new();
    let mut forest: Vec<NotebookTreeNode> = Vec::new();
    for &root in &roots {
        forest.push(build_node(root, &children, &mut placed));
    }

    // Anything still unplaced sits on a parent cycle. Promote the smallest
    // id so the result is stable across runs, then keep going; the placed
    // set guarantees termination.
    while placed.len() < notebooks.len() {
        let promoted = notebooks
            .iter()
            .filter(|nb| !placed.contains(nb.id.as_str()))
            .min_by(|a, b| a.id.cmp(&b.id));
        let Some(promoted) = promoted else { break };
        warn!(
            notebook = %promoted.id,
            "notebook parent references form a cycle; promoting to root"
        );
        forest.push(build_node(promoted, &children, &mut placed));
    }

    forest.sort_by(|a, b| {
        (a.title.to_lowercase(), a.id.as_str()).cmp(&(b.title.to_lowercase(), b.id.as_str()))
    });
    Ok(forest)
}

fn sort_siblings(list: &mut [&Notebook]) {
    list.sort_by(|a, b| {
        (a.title.to_lowercase(), a.id.as_str()).cmp(&(b.title.to_lowercase(), b.id.as_str()))
    });
}

fn build_node<'a>(
    nb: &'a Notebook,
    children: &HashMap<&str, Vec<&'a Notebook>>,
    placed: &mut HashSet<&'a str>,
) -> NotebookTreeNode {
    placed.insert(nb.id.as_str());
    let mut kids = Vec::new();
    if let Some(list) = children.get(nb.id.as_str()) {
        for &child in list {
            // A child already placed elsewhere sits on a cross-link from a
            // cycle; never build it twice.
            if !placed.contains(child.id.as_str()) {
                kids.push(build_node(child, children, placed));
            }
        }
    }
    NotebookTreeNode {
        id: nb.id.clone(),
        title: nb.title.clone(),
        children: kids,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn notebook(id: &str, title: &str, parent: Option<&str>) -> Notebook {
        Notebook {
            id: id.to_string(),
            title: title.to_string(),
            parent_id: parent.map(|p| p.to_string()),
            created_time: Utc::now(),
            updated_time: Utc::now(),
        }
    }

    /// Pre-order flatten, re-deriving each node's parent from tree position.
    fn flatten(
        forest: &[NotebookTreeNode],
        parent: Option<&str>,
        out: &mut Vec<(String, Option<String>)>,
    ) {
        for node in forest {
            out.push((node.id.clone(), parent.map(|p| p.to_string())));
            flatten(&node.children, Some(&node.id), out);
        }
    }

    #[test]
    fn test_orphan_promoted_to_root() {
        let notebooks = vec![
            notebook("A", "Work", None),
            notebook("B", "Projects", Some("A")),
            notebook("C", "Orphan", Some("Z")),
        ];
        let forest = build_notebook_tree(&notebooks).unwrap();

        // Sorted by title: Orphan before Work.
        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].id, "C");
        assert!(forest[0].children.is_empty());
        assert_eq!(forest[1].id, "A");
        assert_eq!(forest[1].children.len(), 1);
        assert_eq!(forest[1].children[0].id, "B");
        assert!(forest[1].children[0].children.is_empty());
    }

    #[test]
    fn test_children_sorted_case_insensitive_then_id() {
        let notebooks = vec![
            notebook("r", "Root", None),
            notebook("c3", "beta", Some("r")),
            notebook("c1", "Alpha", Some("r")),
            notebook("c2", "alpha", Some("r")),
        ];
        let forest = build_notebook_tree(&notebooks).unwrap();
        let ids: Vec<&str> = forest[0].children.iter().map(|c| c.id.as_str()).collect();
        // "Alpha" and "alpha" tie case-insensitively; the id breaks the tie.
        assert_eq!(ids, vec!["c1", "c2", "c3"]);
    }

    #[test]
    fn test_cycle_terminates_and_promotes_smallest_id() {
        let notebooks = vec![
            notebook("b", "Second", Some("a")),
            notebook("a", "First", Some("b")),
            notebook("r", "Normal", None),
        ];
        let forest = build_notebook_tree(&notebooks).unwrap();

        let mut flat = Vec::new();
        flatten(&forest, None, &mut flat);
        assert_eq!(flat.len(), 3, "every notebook is placed exactly once");

        // "a" is the smallest id on the cycle, so it becomes the root and
        // keeps "b" as its child.
        let cycle_root = forest.iter().find(|n| n.id == "a").expect("a promoted");
        assert_eq!(cycle_root.children.len(), 1);
        assert_eq!(cycle_root.children[0].id, "b");
    }

    #[test]
    fn test_self_parent_promoted() {
        let notebooks = vec![notebook("s", "Selfish", Some("s"))];
        let forest = build_notebook_tree(&notebooks).unwrap();
        assert_eq!(forest.len(), 1);
        assert!(forest[0].children.is_empty());
    }

    #[test]
    fn test_empty_collection() {
        assert!(build_notebook_tree(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let notebooks = vec![
            notebook("dup", "One", None),
            notebook("dup", "Two", None),
        ];
        assert!(matches!(
            build_notebook_tree(&notebooks),
            Err(JoplinError::StructuralInconsistency(_))
        ));
    }

    #[test]
    fn test_valid_forest_round_trips() {
        let notebooks = vec![
            notebook("1", "Inbox", None),
            notebook("2", "Work", None),
            notebook("3", "Clients", Some("2")),
            notebook("4", "Acme", Some("3")),
            notebook("5", "Personal", Some("2")),
        ];
        let forest = build_notebook_tree(&notebooks).unwrap();

        let mut flat = Vec::new();
        flatten(&forest, None, &mut flat);
        assert_eq!(flat.len(), notebooks.len());

        for nb in &notebooks {
            let (_, derived_parent) = flat
                .iter()
                .find(|(id, _)| id == &nb.id)
                .expect("notebook present in flattened tree");
            assert_eq!(derived_parent, &nb.parent_id, "parent of {}", nb.id);
        }
    }
}
