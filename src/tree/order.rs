use super::node::{find_node, MenuNode};

/// Suggest a non-colliding sibling rank for a new or moved node under
/// `parent_id` (`None` for the root set): `0` for a childless parent,
/// otherwise one past the highest existing rank.
///
/// Advisory only - the caller may override it, and duplicate ranks stay
/// legal because sibling sequence falls back to input order.
pub fn get_max_order_for_parent(tree: &[MenuNode], parent_id: Option<&str>) -> i64 {
    let siblings: &[MenuNode] = match parent_id {
        None => tree,
        Some(id) => match find_node(tree, id) {
            Some(parent) => &parent.children,
            None => return 0,
        },
    };

    siblings.iter().map(|n| n.order).max().map(|max| max + 1).unwrap_or(0)
}
