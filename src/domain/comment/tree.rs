// src/domain/comment/tree.rs
//! Rebuilds threaded discussions from flat comment rows.
use crate::domain::comment::entity::Comment;
use crate::domain::comment::value_objects::CommentId;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentNode {
    pub comment: Comment,
    pub children: Vec<CommentNode>,
}

/// What to do with a comment whose parent is not part of the fetched rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrphanPolicy {
    #[default]
    Drop,
    PromoteToRoot,
}

/// Builds the reply tree for `comments`.
///
/// Siblings keep the relative order they have in the input. Every node gets
/// a fresh child list, so calling this twice on the same rows never shares
/// or duplicates children.
pub fn build_comment_tree(comments: Vec<Comment>, policy: OrphanPolicy) -> Vec<CommentNode> {
    let positions: HashMap<CommentId, usize> = comments
        .iter()
        .enumerate()
        .map(|(position, comment)| (comment.id(), position))
        .collect();

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); comments.len()];
    let mut roots = Vec::new();

    for (position, comment) in comments.iter().enumerate() {
        match comment.parent_id {
            None => roots.push(position),
            Some(parent_id) => match positions.get(&parent_id) {
                Some(&parent) if parent != position => children[parent].push(position),
                _ => {
                    if policy == OrphanPolicy::PromoteToRoot {
                        roots.push(position);
                    }
                }
            },
        }
    }

    let mut slots: Vec<Option<Comment>> = comments.into_iter().map(Some).collect();
    roots
        .into_iter()
        .filter_map(|root| assemble(root, &children, &mut slots))
        .collect()
}

// Each slot is taken once, so malformed parent cycles cannot recurse forever.
fn assemble(
    position: usize,
    children: &[Vec<usize>],
    slots: &mut [Option<Comment>],
) -> Option<CommentNode> {
    let comment = slots[position].take()?;
    let nested = children[position]
        .iter()
        .filter_map(|&child| assemble(child, children, slots))
        .collect();
    Some(CommentNode {
        comment,
        children: nested,
    })
}
