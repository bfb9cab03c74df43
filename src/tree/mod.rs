pub mod builder;
pub mod expansion;
pub mod flatten;
pub mod node;
pub mod order;
pub mod validate;

pub use builder::{build_forest, build_menu_tree, build_menu_tree_with_report, BuildOutcome};
pub use expansion::{toggle_expansion, ExpansionState};
pub use flatten::{flatten_tree_for_display, get_breadcrumb};
pub use node::{find_node, DisplayRow, MenuNode};
pub use order::get_max_order_for_parent;
pub use validate::validate_hierarchy;
