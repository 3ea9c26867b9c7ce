use proptest::prelude::*;
use trellis_core::{GroupScope, ItemId, Member};

/// Dense group of `n` members, ids `item-0..item-n`, positions `0..n`.
pub fn dense_members(n: usize) -> Vec<Member> {
    (0..n)
        .map(|i| Member::new(ItemId::new_unchecked(format!("item-{i}")), i))
        .collect()
}

pub fn arb_scope() -> impl Strategy<Value = GroupScope> + Clone {
    let id = |raw: String| ItemId::new_unchecked(raw);
    prop_oneof![
        "[a-z]{1,8}".prop_map(move |l| GroupScope::top_level_tasks(id(format!("list-{l}")))),
        ("[a-z]{1,8}", "[a-z]{1,8}").prop_map(move |(l, t)| {
            GroupScope::subtasks(id(format!("list-{l}")), id(format!("task-{t}")))
        }),
        "[a-z]{1,8}".prop_map(move |p| GroupScope::ProjectLists {
            project_id: id(format!("proj-{p}")),
        }),
        "[a-z]{1,8}".prop_map(move |c| GroupScope::ChecklistItems {
            checklist_id: id(format!("check-{c}")),
        }),
        "[a-z]{1,8}".prop_map(move |u| GroupScope::UserFavorites {
            user_id: id(format!("user-{u}")),
        }),
    ]
}

/// One step of a randomized reorder workload.
///
/// Raw indices and targets are reduced against the live group size when the
/// op is applied, so every generated op is meaningful at any group length.
#[derive(Debug, Clone)]
pub enum ReorderOp {
    Append,
    Insert { target: usize },
    Move { member: usize, target: usize },
    Remove { member: usize },
    /// Reindex to the current order rotated left by `by` slots.
    Rotate { by: usize },
}

pub fn arb_op() -> impl Strategy<Value = ReorderOp> + Clone {
    prop_oneof![
        1 => Just(ReorderOp::Append),
        3 => (0usize..64).prop_map(|target| ReorderOp::Insert { target }),
        4 => (0usize..64, 0usize..64)
            .prop_map(|(member, target)| ReorderOp::Move { member, target }),
        2 => (0usize..64).prop_map(|member| ReorderOp::Remove { member }),
        1 => (1usize..8).prop_map(|by| ReorderOp::Rotate { by }),
    ]
}

pub fn arb_ops(max_len: usize) -> impl Strategy<Value = Vec<ReorderOp>> {
    prop::collection::vec(arb_op(), 1..max_len)
}

/// Group size plus a shuffled target order for reindex properties.
pub fn arb_permutation(max_len: usize) -> impl Strategy<Value = Vec<usize>> {
    (1..max_len).prop_flat_map(|n| Just((0..n).collect::<Vec<usize>>()).prop_shuffle())
}
