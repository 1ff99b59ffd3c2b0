//! Panel tree flattening.

use crate::model::Panel;

/// Flatten a panel tree into one depth-first, pre-order sequence.
///
/// Each panel is emitted before its children, and children keep their
/// document order. Rows therefore appear immediately before the panels they
/// group. The input must be a tree; cyclic structures cannot be built from
/// owned `Vec<Panel>` children.
#[must_use]
pub fn flatten(panels: &[Panel]) -> Vec<&Panel> {
    let mut flat = Vec::with_capacity(panels.len());
    for panel in panels {
        push_subtree(panel, &mut flat);
    }
    flat
}

fn push_subtree<'a>(panel: &'a Panel, out: &mut Vec<&'a Panel>) {
    out.push(panel);
    for child in &panel.children {
        push_subtree(child, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(id: i64) -> Panel {
        Panel::new(format!("p{id}")).with_id(id)
    }

    fn ids(panels: &[&Panel]) -> Vec<i64> {
        panels.iter().filter_map(|p| p.id).collect()
    }

    #[test]
    fn test_flat_list_keeps_order() {
        let panels: Vec<Panel> = (0..10).map(numbered).collect();
        assert_eq!(ids(&flatten(&panels)), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_tree_is_preorder() {
        let panels = vec![
            numbered(0),
            numbered(1).with_children(vec![numbered(2)]),
            numbered(3).with_children(vec![numbered(4), numbered(5)]),
            numbered(6).with_children(vec![
                numbered(7).with_children(vec![numbered(8)]),
                numbered(9),
            ]),
        ];
        assert_eq!(ids(&flatten(&panels)), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_input() {
        assert!(flatten(&[]).is_empty());
    }

    #[test]
    fn test_flatten_returns_references_into_tree() {
        let panels = vec![numbered(1).with_children(vec![numbered(2)])];
        let flat = flatten(&panels);
        assert!(std::ptr::eq(flat[1], &panels[0].children[0]));
    }
}
