// Thu Oct 15 2026 - Alex

use itertools::Itertools;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

use crate::modules::Payload;

/// Format-neutral view of a payload document. Every renderer walks these blocks.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Field { key: String, value: String },
    List { key: String, items: Vec<String> },
    Table { key: String, columns: Vec<String>, rows: Vec<Vec<String>> },
}

impl Block {
    pub fn key(&self) -> &str {
        match self {
            Block::Field { key, .. } | Block::List { key, .. } | Block::Table { key, .. } => key,
        }
    }
}

pub fn payload_blocks(payload: &Payload) -> Vec<Block> {
    document_blocks(payload.document())
}

pub fn document_blocks(document: &Value) -> Vec<Block> {
    let mut blocks = Vec::new();

    match document {
        Value::Null => {}
        Value::Object(map) => push_object(&mut blocks, "", map),
        Value::Array(_) => push_value(&mut blocks, "items".to_string(), document),
        other => blocks.push(Block::Field {
            key: "value".to_string(),
            value: scalar_text(other),
        }),
    }

    blocks
}

/// `key = value` pairs of the published counters, in key order.
pub fn counters_line(payload: &Payload) -> Option<String> {
    if payload.counts().is_empty() {
        return None;
    }

    Some(
        payload
            .counts()
            .iter()
            .map(|(field, value)| format!("{} = {}", field, value))
            .join(", "),
    )
}

fn push_object(blocks: &mut Vec<Block>, prefix: &str, map: &Map<String, Value>) {
    // sorted even if serde_json is built with preserve_order
    for key in map.keys().sorted() {
        let full_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        push_value(blocks, full_key, &map[key]);
    }
}

fn push_value(blocks: &mut Vec<Block>, key: String, value: &Value) {
    match value {
        Value::Object(map) if map.is_empty() => blocks.push(Block::Field { key, value: "-".to_string() }),
        Value::Object(map) => push_object(blocks, &key, map),
        Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_object) => {
            blocks.push(table_block(key, items));
        }
        Value::Array(items) => blocks.push(Block::List {
            key,
            items: items.iter().map(scalar_text).collect(),
        }),
        other => blocks.push(Block::Field { key, value: scalar_text(other) }),
    }
}

fn table_block(key: String, items: &[Value]) -> Block {
    let columns: Vec<String> = items
        .iter()
        .filter_map(Value::as_object)
        .flat_map(|row| row.keys().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|row| {
            columns
                .iter()
                .map(|column| row.get(column).map(scalar_text).unwrap_or_default())
                .collect()
        })
        .collect();

    Block::Table { key, columns, rows }
}

pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        compound => compound.to_string(),
    }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes characters that would otherwise change Markdown structure inline.
pub fn escape_markdown(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '<' | '>' | '#' | '|' => {
                out.push('\\');
                out.push(c);
            }
            '\r' | '\n' => out.push(' '),
            _ => out.push(c),
        }
    }
    out
}
