pub mod entity;
pub mod repository;
pub mod tree;
pub mod value_objects;

pub use entity::{Comment, CommentSort, NewComment};
pub use repository::CommentRepository;
pub use tree::{CommentNode, OrphanPolicy, build_comment_tree};
pub use value_objects::{COMMENT_MAX_CHARS, CommentContent, CommentId};
