//! Picture anchors from drawing parts
//!
//! A drawing part (`xl/drawings/drawingN.xml`) holds one anchor element per picture:
//!
//! ```xml
//! <xdr:twoCellAnchor>
//!   <xdr:from><xdr:col>3</xdr:col><xdr:row>5</xdr:row>...</xdr:from>
//!   <xdr:pic>... <a:blip r:embed="rId2"/> ...</xdr:pic>
//! </xdr:twoCellAnchor>
//! ```
//!
//! The relationships part (`xl/drawings/_rels/drawingN.xml.rels`) resolves `rId2` to a media
//! part such as `../media/image2.png`.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde::Serialize;
use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::{Result, archive as archive_error, fs as fs_error};
use crate::ordering::digit_key;

const DRAWINGS_DIR: &str = "xl/drawings/";

/// A picture pinned to a sheet cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Anchor {
    /// 0-based sheet row of the top-left corner
    pub row: u32,
    /// 0-based sheet column of the top-left corner
    pub col: u32,
    /// File name of the media part the picture shows (e.g. `image3.png`)
    pub media_name: String,
}

/// Read picture anchors from every drawing part of a container, sorted by row then column.
///
/// Absolute anchors (not tied to a cell) are ignored.
pub fn read_anchors(container: &Path) -> Result<Vec<Anchor>> {
    let file = File::open(container).map_err(|e| fs_error::read_failed(container, e))?;
    let mut archive = ZipArchive::new(BufReader::new(file))
        .map_err(|e| archive_error::open_failed(container, e))?;

    let mut drawings: Vec<String> = archive
        .file_names()
        .filter(|name| is_drawing_part(name))
        .map(str::to_string)
        .collect();
    drawings.sort_by_key(|name| digit_key(name));

    let mut anchors = Vec::new();
    for part in drawings {
        let Some(xml) = read_part(&mut archive, &part)? else {
            continue;
        };
        let rels = match read_part(&mut archive, &rels_part_for(&part))? {
            Some(rels_xml) => parse_relationships(&rels_xml)
                .map_err(|e| archive_error::drawing_parse_failed(&part, e))?,
            None => HashMap::new(),
        };
        let found =
            parse_drawing(&xml, &rels).map_err(|e| archive_error::drawing_parse_failed(&part, e))?;
        anchors.extend(found);
    }

    anchors.sort_by_key(|a| (a.row, a.col));
    Ok(anchors)
}

fn is_drawing_part(name: &str) -> bool {
    name.strip_prefix(DRAWINGS_DIR).is_some_and(|rest| {
        !rest.contains('/') && rest.starts_with("drawing") && rest.ends_with(".xml")
    })
}

/// `xl/drawings/drawing1.xml` -> `xl/drawings/_rels/drawing1.xml.rels`
fn rels_part_for(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{dir}/_rels/{file}.rels"),
        None => format!("_rels/{part}.rels"),
    }
}

fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Option<String>> {
    let mut entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(archive_error::extract_failed(name, e)),
    };
    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .map_err(|e| archive_error::extract_failed(name, e))?;
    Ok(Some(xml))
}

/// Relationship id -> media file name
fn parse_relationships(xml: &str) -> std::result::Result<HashMap<String, String>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut targets = HashMap::new();
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                let mut id = None;
                let mut target = None;
                for attr in e.attributes().flatten() {
                    match attr.key.local_name().as_ref() {
                        b"Id" => id = Some(attr.unescape_value()?.into_owned()),
                        b"Target" => target = Some(attr.unescape_value()?.into_owned()),
                        _ => {}
                    }
                }
                if let (Some(id), Some(target)) = (id, target) {
                    let media_name = target.rsplit('/').next().unwrap_or(&target).to_string();
                    targets.insert(id, media_name);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(targets)
}

#[derive(Default)]
struct PendingAnchor {
    row: Option<u32>,
    col: Option<u32>,
    embed: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Field {
    Row,
    Col,
}

fn parse_drawing(
    xml: &str,
    rels: &HashMap<String, String>,
) -> std::result::Result<Vec<Anchor>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut anchors = Vec::new();
    let mut pending: Option<PendingAnchor> = None;
    let mut in_from = false;
    let mut field: Option<Field> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"twoCellAnchor" | b"oneCellAnchor" => pending = Some(PendingAnchor::default()),
                b"from" => in_from = pending.is_some(),
                b"row" if in_from => field = Some(Field::Row),
                b"col" if in_from => field = Some(Field::Col),
                b"blip" => {
                    if let Some(anchor) = pending.as_mut() {
                        anchor.embed = blip_embed(&e)?.or(anchor.embed.take());
                    }
                }
                _ => {}
            },
            Event::Empty(e) if e.local_name().as_ref() == b"blip" => {
                if let Some(anchor) = pending.as_mut() {
                    anchor.embed = blip_embed(&e)?.or(anchor.embed.take());
                }
            }
            Event::Text(t) => {
                if let (Some(f), Some(anchor)) = (field, pending.as_mut()) {
                    let value = t.unescape()?.trim().parse::<u32>().ok();
                    match f {
                        Field::Row => anchor.row = value,
                        Field::Col => anchor.col = value,
                    }
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"row" | b"col" => field = None,
                b"from" => in_from = false,
                b"twoCellAnchor" | b"oneCellAnchor" => {
                    if let Some(PendingAnchor {
                        row: Some(row),
                        col,
                        embed: Some(embed),
                    }) = pending.take()
                    {
                        if let Some(media_name) = rels.get(&embed) {
                            anchors.push(Anchor {
                                row,
                                col: col.unwrap_or(0),
                                media_name: media_name.clone(),
                            });
                        }
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(anchors)
}

/// `r:embed` of an `a:blip` element
fn blip_embed(e: &BytesStart<'_>) -> std::result::Result<Option<String>, quick_xml::Error> {
    for attr in e.attributes().flatten() {
        if attr.key.local_name().as_ref() == b"embed" {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}
