//! Emit FTML text from a commented AST.

use ftml_parse::{Comment, CommentKind, DocumentNode, KeyValueNode, ListNode, Node, ObjectNode};

use crate::scalar::{format_key, format_scalar};
use crate::{FormatOptions, FtmlWriter};

/// Format a document AST as FTML text.
///
/// Root pairs emit one per line with no commas; nested container items are
/// comma-separated, one per line, indented one level per depth. All comment
/// slots are emitted unless the options say otherwise.
pub fn format_document(doc: &DocumentNode, options: FormatOptions) -> String {
    let mut w = FtmlWriter::with_options(options);

    if w.include_comments() {
        for comment in &doc.inner_doc_comments {
            emit_comment_line(&mut w, comment);
        }
    }

    for kv in doc.items.values() {
        emit_key_value(&mut w, kv, false);
    }

    if w.include_comments() {
        for comment in &doc.end_leading_comments {
            emit_comment_line(&mut w, comment);
        }
    }

    w.finish()
}

fn comment_prefix(kind: CommentKind) -> &'static str {
    match kind {
        CommentKind::Regular => "//",
        CommentKind::OuterDoc => "///",
        CommentKind::InnerDoc => "//!",
    }
}

fn emit_comment_line(w: &mut FtmlWriter, comment: &Comment) {
    let prefix = comment_prefix(comment.kind);
    if comment.text.is_empty() {
        w.line(prefix);
    } else {
        w.line(&format!("{prefix} {}", comment.text));
    }
}

fn emit_inline(w: &mut FtmlWriter, inline: Option<&Comment>) {
    if !w.include_comments() {
        return;
    }
    if let Some(comment) = inline {
        w.write_str("  ");
        w.write_str(comment_prefix(comment.kind));
        if !comment.text.is_empty() {
            w.write_str(" ");
            w.write_str(&comment.text);
        }
    }
}

fn emit_key_value(w: &mut FtmlWriter, kv: &KeyValueNode, with_comma: bool) {
    if w.include_comments() {
        for comment in &kv.leading_comments {
            emit_comment_line(w, comment);
        }
        for comment in &kv.outer_doc_comments {
            emit_comment_line(w, comment);
        }
    }
    w.write_indent();
    w.write_str(&format_key(&kv.key));
    w.write_str(" = ");
    emit_value(w, &kv.value, kv.inline_comment.as_ref(), with_comma);
}

/// Emit a value in place. The caller has already written the indent and any
/// `key = ` prefix; this finishes the line (or lines, for containers).
fn emit_value(w: &mut FtmlWriter, node: &Node, inline: Option<&Comment>, with_comma: bool) {
    match node {
        Node::Scalar(scalar) => {
            w.write_str(&format_scalar(&scalar.value));
            if with_comma {
                w.write_str(",");
            }
            emit_inline(w, inline);
            w.newline();
        }
        Node::Object(obj) => emit_object(w, obj, inline, with_comma),
        Node::List(list) => emit_list(w, list, inline, with_comma),
    }
}

fn object_is_empty(w: &FtmlWriter, obj: &ObjectNode) -> bool {
    obj.items.is_empty()
        && (!w.include_comments()
            || (obj.inner_doc_comments.is_empty() && obj.end_leading_comments.is_empty()))
}

fn emit_object(w: &mut FtmlWriter, obj: &ObjectNode, inline: Option<&Comment>, with_comma: bool) {
    if object_is_empty(w, obj) {
        w.write_str("{}");
        if with_comma {
            w.write_str(",");
        }
        emit_inline(w, inline);
        w.newline();
        return;
    }

    w.write_str("{");
    emit_inline(w, inline);
    w.newline();
    w.begin();

    if w.include_comments() {
        for comment in &obj.inner_doc_comments {
            emit_comment_line(w, comment);
        }
    }

    let count = obj.items.len();
    for (i, kv) in obj.items.values().enumerate() {
        emit_key_value(w, kv, i + 1 < count);
    }

    if w.include_comments() {
        for comment in &obj.end_leading_comments {
            emit_comment_line(w, comment);
        }
    }

    w.end();
    w.write_indent();
    w.write_str("}");
    if with_comma {
        w.write_str(",");
    }
    w.newline();
}

fn list_is_empty(w: &FtmlWriter, list: &ListNode) -> bool {
    list.elements.is_empty()
        && (!w.include_comments()
            || (list.inner_doc_comments.is_empty() && list.end_leading_comments.is_empty()))
}

fn emit_list(w: &mut FtmlWriter, list: &ListNode, inline: Option<&Comment>, with_comma: bool) {
    if list_is_empty(w, list) {
        w.write_str("[]");
        if with_comma {
            w.write_str(",");
        }
        emit_inline(w, inline);
        w.newline();
        return;
    }

    w.write_str("[");
    emit_inline(w, inline);
    w.newline();
    w.begin();

    if w.include_comments() {
        for comment in &list.inner_doc_comments {
            emit_comment_line(w, comment);
        }
    }

    let count = list.elements.len();
    for (i, elem) in list.elements.iter().enumerate() {
        if w.include_comments() {
            for comment in elem.leading_comments() {
                emit_comment_line(w, comment);
            }
            for comment in elem.outer_doc_comments() {
                emit_comment_line(w, comment);
            }
        }
        w.write_indent();
        emit_value(w, elem, elem.inline_comment(), i + 1 < count);
    }

    if w.include_comments() {
        for comment in &list.end_leading_comments {
            emit_comment_line(w, comment);
        }
    }

    w.end();
    w.write_indent();
    w.write_str("]");
    if with_comma {
        w.write_str(",");
    }
    w.newline();
}
