//! Template merge: a plain-text document model and the operations that
//! fill it from extracted fields.
//!
//! A template is read one paragraph per line. Lines written as
//! `| first | second |` are table rows, and consecutive rows form one table.

pub mod clauses;
pub mod kyc_table;

use crate::utils::{DocfillError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub use clauses::{
    apply_agreement_clauses, remove_technical_fee_clause, replace_promotional_budget,
    update_wallet_clause,
};
pub use kyc_table::{fill_kyc_document, kyc_template, normalize_kyc_template_label};

/// Placeholder name to replacement text.
pub type MergeMapping = BTreeMap<String, String>;

/// Read a JSON object of placeholder names to values.
pub fn mapping_from_json(raw: &str) -> Result<MergeMapping> {
    Ok(serde_json::from_str(raw)?)
}

/// Something that receives a field mapping and updates its own content.
pub trait MergeTarget {
    /// Substitute every placeholder known to `mapping`.
    fn apply(&mut self, mapping: &MergeMapping);
}

/// A paragraph made of text runs, the way a word processor splits
/// formatted text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    pub runs: Vec<String>,
}

impl Paragraph {
    pub fn new(text: &str) -> Self {
        Paragraph {
            runs: vec![text.to_string()],
        }
    }

    pub fn from_runs<I, S>(runs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Paragraph {
            runs: runs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn text(&self) -> String {
        self.runs.concat()
    }

    /// Put `text` in the first run and empty the others.
    pub fn set_text(&mut self, text: &str) {
        match self.runs.split_first_mut() {
            Some((first, rest)) => {
                *first = text.to_string();
                rest.iter_mut().for_each(String::clear);
            }
            None => self.runs.push(text.to_string()),
        }
    }

    /// Replace `{{key}}` placeholders, spaces inside the braces allowed on
    /// either side. Returns whether the paragraph changed.
    pub fn replace_placeholders(&mut self, mapping: &MergeMapping) -> bool {
        let text = self.text();
        if text.is_empty() {
            return false;
        }
        let mut replaced = text.clone();
        for (key, value) in mapping {
            for placeholder in [
                format!("{{{{{}}}}}", key),
                format!("{{{{ {} }}}}", key),
                format!("{{{{{} }}}}", key),
                format!("{{{{ {}}}}}", key),
            ] {
                replaced = replaced.replace(&placeholder, value);
            }
        }
        if replaced == text {
            return false;
        }
        self.set_text(&replaced);
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<Paragraph>,
}

impl Row {
    pub fn new(cells: &[&str]) -> Self {
        Row {
            cells: cells.iter().map(|cell| Paragraph::new(cell)).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

/// Ordered body of paragraphs and tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextDocument {
    pub blocks: Vec<Block>,
}

fn parse_row(line: &str) -> Option<Row> {
    let inner = line.strip_prefix('|')?.strip_suffix('|')?;
    Some(Row {
        cells: inner.split('|').map(|cell| Paragraph::new(cell.trim())).collect(),
    })
}

impl TextDocument {
    pub fn parse(text: &str) -> Self {
        let mut blocks: Vec<Block> = Vec::new();
        for line in text.lines() {
            match parse_row(line.trim()) {
                Some(row) => match blocks.last_mut() {
                    Some(Block::Table(table)) => table.rows.push(row),
                    _ => blocks.push(Block::Table(Table { rows: vec![row] })),
                },
                None => blocks.push(Block::Paragraph(Paragraph::new(line.trim_end()))),
            }
        }
        TextDocument { blocks }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| DocfillError::io(path, e))?;
        let doc = Self::parse(&raw);
        if doc.blocks.is_empty() {
            return Err(DocfillError::Template(format!(
                "{} has no content",
                path.display()
            )));
        }
        log::debug!("Loaded template {} ({} blocks)", path.display(), doc.blocks.len());
        Ok(doc)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.render()).map_err(|e| DocfillError::io(path, e))
    }

    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        for block in &self.blocks {
            match block {
                Block::Paragraph(paragraph) => lines.push(paragraph.text()),
                Block::Table(table) => {
                    for row in &table.rows {
                        let cells: Vec<String> = row.cells.iter().map(Paragraph::text).collect();
                        lines.push(format!("| {} |", cells.join(" | ")));
                    }
                }
            }
        }
        let mut rendered = lines.join("\n");
        rendered.push('\n');
        rendered
    }

    pub fn push_paragraph(&mut self, text: &str) {
        self.blocks.push(Block::Paragraph(Paragraph::new(text)));
    }

    /// Body paragraphs as `(block index, paragraph)`, tables skipped.
    pub fn paragraphs(&self) -> impl Iterator<Item = (usize, &Paragraph)> {
        self.blocks.iter().enumerate().filter_map(|(idx, block)| match block {
            Block::Paragraph(paragraph) => Some((idx, paragraph)),
            Block::Table(_) => None,
        })
    }

    pub fn paragraph_mut(&mut self, idx: usize) -> Option<&mut Paragraph> {
        match self.blocks.get_mut(idx) {
            Some(Block::Paragraph(paragraph)) => Some(paragraph),
            _ => None,
        }
    }

    pub fn tables_mut(&mut self) -> impl Iterator<Item = &mut Table> {
        self.blocks.iter_mut().filter_map(|block| match block {
            Block::Table(table) => Some(table),
            Block::Paragraph(_) => None,
        })
    }

    /// Every paragraph, table cells included.
    pub fn all_paragraphs_mut(&mut self) -> Vec<&mut Paragraph> {
        let mut all = Vec::new();
        for block in self.blocks.iter_mut() {
            match block {
                Block::Paragraph(paragraph) => all.push(paragraph),
                Block::Table(table) => {
                    for row in table.rows.iter_mut() {
                        all.extend(row.cells.iter_mut());
                    }
                }
            }
        }
        all
    }

    /// Drop the blocks at `indices`, which may be unsorted.
    pub fn remove_blocks(&mut self, indices: &[usize]) {
        let mut indices = indices.to_vec();
        indices.sort_unstable();
        indices.dedup();
        for idx in indices.into_iter().rev() {
            if idx < self.blocks.len() {
                self.blocks.remove(idx);
            }
        }
    }

    pub fn insert_paragraphs_after(&mut self, idx: usize, texts: &[String]) {
        let at = (idx + 1).min(self.blocks.len());
        for (offset, text) in texts.iter().enumerate() {
            self.blocks
                .insert(at + offset, Block::Paragraph(Paragraph::new(text)));
        }
    }
}

impl MergeTarget for TextDocument {
    fn apply(&mut self, mapping: &MergeMapping) {
        let changed = self
            .all_paragraphs_mut()
            .into_iter()
            .map(|paragraph| paragraph.replace_placeholders(mapping))
            .filter(|changed| *changed)
            .count();
        log::debug!("Placeholders replaced in {} paragraphs", changed);
    }
}
