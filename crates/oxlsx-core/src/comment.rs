//! Cell comment management: add, query, and remove comments on a sheet's
//! comments collection, with author deduplication.

use oxlsx_xml::comments::{Authors, Comment as CommentXml, CommentList, CommentRun, CommentText, Comments};
use oxlsx_xml::namespaces;

/// A plain-text comment attached to a single cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub cell: String,
    pub author: String,
    pub text: String,
}

/// Add a comment to a sheet's comments collection, creating the collection
/// if absent. A comment already present on the same cell is replaced.
pub fn add_comment(comments: &mut Option<Comments>, comment: &Comment) {
    let c = comments.get_or_insert_with(|| Comments {
        xmlns: namespaces::SPREADSHEET_ML.to_string(),
        authors: Authors { authors: Vec::new() },
        comment_list: CommentList { comments: Vec::new() },
    });

    let author_id = match c.authors.authors.iter().position(|a| a == &comment.author) {
        Some(idx) => idx as u32,
        None => {
            c.authors.authors.push(comment.author.clone());
            (c.authors.authors.len() - 1) as u32
        }
    };

    c.comment_list.comments.retain(|existing| existing.r#ref != comment.cell);
    c.comment_list.comments.push(CommentXml {
        r#ref: comment.cell.clone(),
        author_id,
        text: CommentText { runs: vec![CommentRun { t: comment.text.clone() }] },
    });
}

/// Look up the comment on a specific cell, if any.
pub fn get_comment(comments: &Option<Comments>, cell: &str) -> Option<Comment> {
    let c = comments.as_ref()?;
    let found = c.comment_list.comments.iter().find(|cm| cm.r#ref == cell)?;
    Some(comment_from_xml(c, found))
}

/// Remove the comment on a specific cell. Returns `true` if one was removed;
/// clears the whole collection back to `None` once it becomes empty.
pub fn remove_comment(comments: &mut Option<Comments>, cell: &str) -> bool {
    let Some(c) = comments else { return false };
    let before = c.comment_list.comments.len();
    c.comment_list.comments.retain(|comment| comment.r#ref != cell);
    let removed = c.comment_list.comments.len() < before;
    if c.comment_list.comments.is_empty() {
        *comments = None;
    }
    removed
}

/// List all comments on a sheet, in declaration order.
pub fn all_comments(comments: &Option<Comments>) -> Vec<Comment> {
    match comments.as_ref() {
        Some(c) => c.comment_list.comments.iter().map(|comment| comment_from_xml(c, comment)).collect(),
        None => Vec::new(),
    }
}

/// Cell references that carry a comment, in declaration order — used to
/// drive the legacy VML shape list when serializing.
pub fn comment_cells(comments: &Option<Comments>) -> Vec<String> {
    comments.as_ref().map(|c| c.comment_list.comments.iter().map(|cm| cm.r#ref.clone()).collect()).unwrap_or_default()
}

fn comment_from_xml(c: &Comments, comment: &CommentXml) -> Comment {
    let author = c.authors.authors.get(comment.author_id as usize).cloned().unwrap_or_default();
    let text = comment.text.runs.iter().map(|r| r.t.as_str()).collect::<Vec<_>>().join("");
    Comment { cell: comment.r#ref.clone(), author, text }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_comment_creates_collection_and_author() {
        let mut comments = None;
        add_comment(&mut comments, &Comment { cell: "A1".into(), author: "Alice".into(), text: "Hi".into() });
        let c = comments.as_ref().unwrap();
        assert_eq!(c.authors.authors, vec!["Alice".to_string()]);
        assert_eq!(c.comment_list.comments.len(), 1);
    }

    #[test]
    fn authors_are_deduplicated_across_comments() {
        let mut comments = None;
        add_comment(&mut comments, &Comment { cell: "A1".into(), author: "Alice".into(), text: "1".into() });
        add_comment(&mut comments, &Comment { cell: "B2".into(), author: "Bob".into(), text: "2".into() });
        add_comment(&mut comments, &Comment { cell: "C3".into(), author: "Alice".into(), text: "3".into() });
        assert_eq!(comments.as_ref().unwrap().authors.authors.len(), 2);
    }

    #[test]
    fn adding_twice_on_same_cell_overwrites() {
        let mut comments = None;
        add_comment(&mut comments, &Comment { cell: "A1".into(), author: "Alice".into(), text: "Original".into() });
        add_comment(&mut comments, &Comment { cell: "A1".into(), author: "Bob".into(), text: "Updated".into() });
        let all = all_comments(&comments);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].text, "Updated");
        assert_eq!(all[0].author, "Bob");
    }

    #[test]
    fn remove_comment_clears_empty_collection() {
        let mut comments = None;
        add_comment(&mut comments, &Comment { cell: "A1".into(), author: "Alice".into(), text: "x".into() });
        assert!(remove_comment(&mut comments, "A1"));
        assert!(comments.is_none());
    }

    #[test]
    fn remove_nonexistent_comment_returns_false() {
        let mut comments: Option<Comments> = None;
        assert!(!remove_comment(&mut comments, "A1"));
    }

    #[test]
    fn get_comment_on_wrong_cell_is_none() {
        let mut comments = None;
        add_comment(&mut comments, &Comment { cell: "A1".into(), author: "Alice".into(), text: "x".into() });
        assert!(get_comment(&comments, "B1").is_none());
    }

    #[test]
    fn comment_cells_lists_referenced_cells_in_order() {
        let mut comments = None;
        add_comment(&mut comments, &Comment { cell: "A1".into(), author: "Alice".into(), text: "x".into() });
        add_comment(&mut comments, &Comment { cell: "B2".into(), author: "Bob".into(), text: "y".into() });
        assert_eq!(comment_cells(&comments), vec!["A1".to_string(), "B2".to_string()]);
    }
}
