use serde_json::Value;

/// A leaf of a rich-text document. Leaves without a `text` field carry `None`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextLeaf {
    pub text: Option<String>,
}

/// A block-level node (paragraph, list item, ...) holding text leaves.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContentNode {
    pub leaves: Vec<TextLeaf>,
}

/// Body of an issue comment as the tracker delivers it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CommentBody {
    PlainText(String),
    RichDocument(Vec<ContentNode>),
    #[default]
    Empty,
}

impl CommentBody {
    /// Build a body from raw tracker JSON.
    ///
    /// Strings become `PlainText`, objects become `RichDocument` (nodes that do
    /// not have the document → content → leaf shape are dropped), anything else
    /// is `Empty`.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(text) => CommentBody::PlainText(text.clone()),
            Value::Object(doc) => {
                let nodes = children(doc.get("content"))
                    .filter_map(Value::as_object)
                    .map(|node| ContentNode {
                        leaves: children(node.get("content"))
                            .filter_map(Value::as_object)
                            .map(|leaf| TextLeaf {
                                text: leaf.get("text").and_then(Value::as_str).map(str::to_string),
                            })
                            .collect(),
                    })
                    .collect();
                CommentBody::RichDocument(nodes)
            }
            _ => CommentBody::Empty,
        }
    }

    /// Flatten the body into plain text. Never fails.
    pub fn extract(&self) -> String {
        match self {
            CommentBody::PlainText(text) => text.clone(),
            CommentBody::RichDocument(nodes) => nodes
                .iter()
                .flat_map(|node| node.leaves.iter())
                .filter_map(|leaf| leaf.text.as_deref())
                .collect::<Vec<_>>()
                .join(" "),
            CommentBody::Empty => String::new(),
        }
    }
}

fn children(value: Option<&Value>) -> impl Iterator<Item = &Value> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter())
        .into_iter()
        .flatten()
}
