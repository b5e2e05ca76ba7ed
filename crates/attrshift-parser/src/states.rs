//! Allowed-states translation
//!
//! `states="draft,sent"` showed an element only in the listed states. The
//! inline syntax has no such attribute, so it becomes the inverse membership
//! test on `invisible`.

use attrshift_core::ast::{Comparison, ConditionNode, Operator, Value};

/// Field holding the record state
pub const STATE_FIELD: &str = "state";

/// Build `state not in (...)` from a comma separated list of state names.
///
/// Returns `None` when the list holds no non-empty name.
pub fn states_condition(list: &str) -> Option<ConditionNode> {
    let states: Vec<String> = list
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if states.is_empty() {
        log::warn!("No state names in {:?}", list);
        return None;
    }

    let comparison = Comparison::new(STATE_FIELD, Operator::NotIn, Value::List(states)).ok()?;
    Some(ConditionNode::comparison(comparison))
}

/// Convert a state list into a complete `invisible="..."` attribute
pub fn convert_states(list: &str) -> Option<String> {
    states_condition(list).map(|node| format!("invisible=\"{}\"", node.render()))
}
