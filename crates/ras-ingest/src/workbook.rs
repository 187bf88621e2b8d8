//! Spreadsheet sheet extraction.
//!
//! XLSX workbooks are OOXML zip containers. This module enumerates the
//! sheet names a workbook declares and serializes one selected sheet to
//! comma-separated text (RFC-4180 quoting, one line per row) so the
//! delimited-text path can parse it exactly like a CSV upload.

use std::collections::BTreeMap;
use std::io::{Cursor, Read};

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use zip::ZipArchive;

use crate::error::{IngestError, Result};

/// An opened workbook.
#[derive(Debug)]
pub struct Workbook {
    name: String,
    archive: ZipArchive<Cursor<Vec<u8>>>,
    sheets: Vec<SheetEntry>,
    shared_strings: Vec<String>,
}

#[derive(Debug, Clone)]
struct SheetEntry {
    name: String,
    path: String,
}

impl Workbook {
    /// Opens a workbook from raw upload bytes.
    ///
    /// `name` labels errors only. Legacy binary `.xls` containers are not
    /// zip archives and surface as [`IngestError::WorkbookInvalid`].
    pub fn open(name: &str, bytes: Vec<u8>) -> Result<Self> {
        let mut archive =
            ZipArchive::new(Cursor::new(bytes)).map_err(|e| IngestError::WorkbookInvalid {
                name: name.to_string(),
                message: e.to_string(),
            })?;

        let workbook_xml = read_entry(&mut archive, name, "xl/workbook.xml")?.ok_or_else(|| {
            IngestError::WorkbookInvalid {
                name: name.to_string(),
                message: "missing xl/workbook.xml".to_string(),
            }
        })?;
        let rels_xml = read_entry(&mut archive, name, "xl/_rels/workbook.xml.rels")?;
        let shared_xml = read_entry(&mut archive, name, "xl/sharedStrings.xml")?;

        let declared = parse_sheet_declarations(name, &workbook_xml)?;
        let rels = match rels_xml {
            Some(xml) => parse_relationships(name, &xml)?,
            None => BTreeMap::new(),
        };

        let mut sheets = Vec::with_capacity(declared.len());
        for (sheet_name, rel_id) in declared {
            let path = rels
                .get(&rel_id)
                .map(|target| resolve_target(target))
                .ok_or_else(|| IngestError::WorkbookInvalid {
                    name: name.to_string(),
                    message: format!("sheet '{sheet_name}' has no worksheet part"),
                })?;
            sheets.push(SheetEntry {
                name: sheet_name,
                path,
            });
        }

        let shared_strings = match shared_xml {
            Some(xml) => parse_shared_strings(name, &xml)?,
            None => Vec::new(),
        };

        tracing::debug!(name, sheets = sheets.len(), "opened workbook");
        Ok(Self {
            name: name.to_string(),
            archive,
            sheets,
            shared_strings,
        })
    }

    /// Sheet names in workbook order.
    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }

    /// Serializes the named sheet to comma-separated text.
    ///
    /// The serialization is deterministic: rows in sheet order, each cell
    /// rendered once, RFC-4180 quoting applied by the writer.
    pub fn sheet_to_csv(&mut self, sheet: &str) -> Result<String> {
        let entry = self
            .sheets
            .iter()
            .find(|s| s.name == sheet)
            .cloned()
            .ok_or_else(|| IngestError::SheetNotFound {
                sheet: sheet.to_string(),
            })?;

        let name = self.name.clone();
        let xml = read_entry(&mut self.archive, &name, &entry.path)?.ok_or_else(|| {
            IngestError::WorkbookInvalid {
                name: name.clone(),
                message: format!("missing worksheet part {}", entry.path),
            }
        })?;

        let rows = parse_worksheet(&name, &xml, &self.shared_strings)?;
        serialize_rows(&name, &rows)
    }
}

/// Reads one archive entry as UTF-8, `None` when absent.
fn read_entry(
    archive: &mut ZipArchive<Cursor<Vec<u8>>>,
    name: &str,
    path: &str,
) -> Result<Option<String>> {
    let mut file = match archive.by_name(path) {
        Ok(file) => file,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => {
            return Err(IngestError::WorkbookInvalid {
                name: name.to_string(),
                message: e.to_string(),
            });
        }
    };
    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| IngestError::WorkbookInvalid {
            name: name.to_string(),
            message: e.to_string(),
        })?;
    Ok(Some(content))
}

fn xml_error(name: &str, e: impl std::fmt::Display) -> IngestError {
    IngestError::WorkbookInvalid {
        name: name.to_string(),
        message: e.to_string(),
    }
}

fn attribute(name: &str, element: &BytesStart<'_>, key: &str) -> Result<Option<String>> {
    let attr = element
        .try_get_attribute(key)
        .map_err(|e| xml_error(name, e))?;
    match attr {
        Some(attr) => {
            let value = attr.unescape_value().map_err(|e| xml_error(name, e))?;
            Ok(Some(value.into_owned()))
        }
        None => Ok(None),
    }
}

/// `<sheet name=".." r:id="..">` declarations, in document order.
fn parse_sheet_declarations(name: &str, xml: &str) -> Result<Vec<(String, String)>> {
    let mut reader = Reader::from_str(xml);
    let mut sheets = Vec::new();
    loop {
        match reader.read_event().map_err(|e| xml_error(name, e))? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"sheet" => {
                let sheet_name = attribute(name, &e, "name")?.unwrap_or_default();
                let rel_id = attribute(name, &e, "r:id")?.unwrap_or_default();
                if !sheet_name.is_empty() {
                    sheets.push((sheet_name, rel_id));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(sheets)
}

/// Relationship id to target-part map from `workbook.xml.rels`.
fn parse_relationships(name: &str, xml: &str) -> Result<BTreeMap<String, String>> {
    let mut reader = Reader::from_str(xml);
    let mut rels = BTreeMap::new();
    loop {
        match reader.read_event().map_err(|e| xml_error(name, e))? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                let id = attribute(name, &e, "Id")?.unwrap_or_default();
                let target = attribute(name, &e, "Target")?.unwrap_or_default();
                if !id.is_empty() && !target.is_empty() {
                    rels.insert(id, target);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(rels)
}

/// Resolves a relationship target against the `xl/` part root.
fn resolve_target(target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        absolute.to_string()
    } else {
        format!("xl/{target}")
    }
}

/// Shared-string table; rich-text runs are concatenated per entry.
fn parse_shared_strings(name: &str, xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut strings = Vec::new();
    let mut current: Option<String> = None;
    loop {
        match reader.read_event().map_err(|e| xml_error(name, e))? {
            Event::Start(e) if e.local_name().as_ref() == b"si" => {
                current = Some(String::new());
            }
            Event::Start(e) if e.local_name().as_ref() == b"t" => {
                let text = reader
                    .read_text(e.name())
                    .map_err(|err| xml_error(name, err))?;
                if let Some(buffer) = current.as_mut() {
                    buffer.push_str(&text);
                }
            }
            Event::End(e) if e.local_name().as_ref() == b"si" => {
                strings.push(current.take().unwrap_or_default());
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(strings)
}

#[derive(Debug, Default)]
struct PendingCell {
    column: usize,
    cell_type: CellType,
    value: Option<String>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum CellType {
    #[default]
    Raw,
    Shared,
    Boolean,
    InlineString,
}

impl CellType {
    fn from_attr(value: Option<&str>) -> Self {
        match value {
            Some("s") => Self::Shared,
            Some("b") => Self::Boolean,
            Some("inlineStr") => Self::InlineString,
            _ => Self::Raw,
        }
    }
}

/// Parses one worksheet part into dense rows of rendered cells.
fn parse_worksheet(name: &str, xml: &str, shared: &[String]) -> Result<Vec<Vec<String>>> {
    let mut reader = Reader::from_str(xml);
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut in_row = false;
    let mut pending: Option<PendingCell> = None;

    loop {
        match reader.read_event().map_err(|e| xml_error(name, e))? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"row" => {
                in_row = true;
                row = Vec::new();
            }
            Event::Start(e) | Event::Empty(e) if in_row && e.local_name().as_ref() == b"c" => {
                // A self-closing cell gets no End event; flush it now.
                if let Some(cell) = pending.take() {
                    place_cell(&mut row, &cell, shared);
                }
                let column = match attribute(name, &e, "r")? {
                    Some(reference) => column_index(&reference).unwrap_or(row.len()),
                    None => row.len(),
                };
                let cell_type = CellType::from_attr(attribute(name, &e, "t")?.as_deref());
                pending = Some(PendingCell {
                    column,
                    cell_type,
                    value: None,
                });
            }
            Event::Start(e) if pending.is_some() && e.local_name().as_ref() == b"v" => {
                let text = reader
                    .read_text(e.name())
                    .map_err(|err| xml_error(name, err))?;
                if let Some(cell) = pending.as_mut() {
                    cell.value = Some(text.into_owned());
                }
            }
            Event::Start(e)
                if pending
                    .as_ref()
                    .is_some_and(|c| c.cell_type == CellType::InlineString)
                    && e.local_name().as_ref() == b"t" =>
            {
                let text = reader
                    .read_text(e.name())
                    .map_err(|err| xml_error(name, err))?;
                if let Some(cell) = pending.as_mut() {
                    cell.value = Some(text.into_owned());
                }
            }
            Event::End(e) if e.local_name().as_ref() == b"c" => {
                if let Some(cell) = pending.take() {
                    place_cell(&mut row, &cell, shared);
                }
            }
            Event::End(e) if e.local_name().as_ref() == b"row" => {
                // An Empty "c" never sees an End event; flush it here too.
                if let Some(cell) = pending.take() {
                    place_cell(&mut row, &cell, shared);
                }
                rows.push(std::mem::take(&mut row));
                in_row = false;
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(rows)
}

/// Renders and stores one cell at its column position, padding gaps.
fn place_cell(row: &mut Vec<String>, cell: &PendingCell, shared: &[String]) {
    let rendered = match (&cell.cell_type, &cell.value) {
        (CellType::Shared, Some(v)) => v
            .parse::<usize>()
            .ok()
            .and_then(|idx| shared.get(idx))
            .cloned()
            .unwrap_or_default(),
        (CellType::Boolean, Some(v)) => {
            if v == "0" {
                "false".to_string()
            } else {
                "true".to_string()
            }
        }
        (_, Some(v)) => v.clone(),
        (_, None) => String::new(),
    };
    while row.len() < cell.column {
        row.push(String::new());
    }
    if cell.column < row.len() {
        row[cell.column] = rendered;
    } else {
        row.push(rendered);
    }
}

/// A1-style reference to zero-based column index.
fn column_index(reference: &str) -> Option<usize> {
    let letters: String = reference
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();
    if letters.is_empty() {
        return None;
    }
    let mut index = 0usize;
    for c in letters.chars() {
        index = index * 26 + (c.to_ascii_uppercase() as usize - 'A' as usize + 1);
    }
    Some(index - 1)
}

/// Writes rows as RFC-4180 comma-separated text.
fn serialize_rows(name: &str, rows: &[Vec<String>]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());
    for row in rows {
        // Cell-less rows have no delimited representation; skip them.
        if row.is_empty() {
            continue;
        }
        writer
            .write_record(row)
            .map_err(|e| xml_error(name, e))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| xml_error(name, e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| xml_error(name, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_index_decodes_a1_references() {
        assert_eq!(column_index("A1"), Some(0));
        assert_eq!(column_index("C12"), Some(2));
        assert_eq!(column_index("Z3"), Some(25));
        assert_eq!(column_index("AA7"), Some(26));
        assert_eq!(column_index("7"), None);
    }

    #[test]
    fn shared_strings_concatenate_runs() {
        let xml = r#"<sst><si><t>plain</t></si><si><r><t>rich </t></r><r><t>text</t></r></si></sst>"#;
        let strings = parse_shared_strings("wb.xlsx", xml).unwrap();
        assert_eq!(strings, vec!["plain", "rich text"]);
    }

    #[test]
    fn worksheet_rows_render_values_and_gaps() {
        let shared = vec!["age".to_string()];
        let xml = r#"<worksheet><sheetData>
            <row r="1"><c r="A1" t="s"><v>0</v></c><c r="C1"><v>12</v></c></row>
            <row r="2"><c r="A2" t="b"><v>1</v></c><c r="B2" t="inlineStr"><is><t>note</t></is></c></row>
        </sheetData></worksheet>"#;
        let rows = parse_worksheet("wb.xlsx", xml, &shared).unwrap();
        assert_eq!(rows[0], vec!["age", "", "12"]);
        assert_eq!(rows[1], vec!["true", "note"]);
    }

    #[test]
    fn serialization_quotes_embedded_commas() {
        let rows = vec![vec!["a,b".to_string(), "plain".to_string()]];
        let text = serialize_rows("wb.xlsx", &rows).unwrap();
        assert_eq!(text, "\"a,b\",plain\n");
    }

    #[test]
    fn non_zip_bytes_are_invalid_workbooks() {
        let err = Workbook::open("legacy.xls", b"not a zip".to_vec()).unwrap_err();
        assert!(matches!(err, IngestError::WorkbookInvalid { .. }));
    }
}
