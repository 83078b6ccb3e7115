//! Comments XML schema structures (`xl/commentsN.xml`).

use serde::{Deserialize, Serialize};

use crate::namespaces;

/// Comments root element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "comments")]
pub struct Comments {
    #[serde(rename = "@xmlns")]
    pub xmlns: String,

    #[serde(rename = "authors")]
    pub authors: Authors,

    #[serde(rename = "commentList")]
    pub comment_list: CommentList,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Authors {
    #[serde(rename = "author", default)]
    pub authors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentList {
    #[serde(rename = "comment", default)]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "@ref")]
    pub r#ref: String,

    #[serde(rename = "@authorId")]
    pub author_id: u32,

    #[serde(rename = "text")]
    pub text: CommentText,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentText {
    #[serde(rename = "r", default)]
    pub runs: Vec<CommentRun>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentRun {
    #[serde(rename = "t")]
    pub t: String,
}

impl Default for Comments {
    fn default() -> Self {
        Self {
            xmlns: namespaces::SPREADSHEET_ML.to_string(),
            authors: Authors { authors: Vec::new() },
            comment_list: CommentList { comments: Vec::new() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty() {
        let comments = Comments::default();
        assert!(comments.authors.authors.is_empty());
        assert!(comments.comment_list.comments.is_empty());
    }

    #[test]
    fn roundtrip_with_one_comment() {
        let comments = Comments {
            xmlns: namespaces::SPREADSHEET_ML.to_string(),
            authors: Authors { authors: vec!["Alice".to_string()] },
            comment_list: CommentList {
                comments: vec![Comment {
                    r#ref: "A1".to_string(),
                    author_id: 0,
                    text: CommentText {
                        runs: vec![CommentRun { t: "A note".to_string() }],
                    },
                }],
            },
        };
        let xml = quick_xml::se::to_string(&comments).unwrap();
        let parsed: Comments = quick_xml::de::from_str(&xml).unwrap();
        assert_eq!(parsed.comment_list.comments[0].r#ref, "A1");
        assert_eq!(parsed.comment_list.comments[0].text.runs[0].t, "A note");
    }

    #[test]
    fn roundtrip_with_two_authors_two_comments() {
        let comments = Comments {
            xmlns: namespaces::SPREADSHEET_ML.to_string(),
            authors: Authors { authors: vec!["Alice".to_string(), "Bob".to_string()] },
            comment_list: CommentList {
                comments: vec![
                    Comment {
                        r#ref: "A1".to_string(),
                        author_id: 0,
                        text: CommentText { runs: vec![CommentRun { t: "First".to_string() }] },
                    },
                    Comment {
                        r#ref: "B2".to_string(),
                        author_id: 1,
                        text: CommentText { runs: vec![CommentRun { t: "Second".to_string() }] },
                    },
                ],
            },
        };
        let xml = quick_xml::se::to_string(&comments).unwrap();
        assert!(xml.contains("Alice"));
        assert!(xml.contains("Bob"));
        let parsed: Comments = quick_xml::de::from_str(&xml).unwrap();
        assert_eq!(parsed.authors.authors.len(), 2);
        assert_eq!(parsed.comment_list.comments.len(), 2);
    }
}
