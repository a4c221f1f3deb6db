//! Common test utilities for prodimg integration tests

use std::fs::File;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgba, RgbaImage};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

/// One product row
pub struct Row {
    pub sku: Option<u64>,
    pub name: &'static str,
}

impl Row {
    pub fn new(sku: u64, name: &'static str) -> Self {
        Self {
            sku: Some(sku),
            name,
        }
    }
}

/// A picture stored as `xl/media/<media>` and anchored at a 0-based sheet row
pub struct Picture {
    pub media: String,
    pub row: u32,
    pub bytes: Vec<u8>,
}

/// A site directory for integration tests
#[allow(dead_code)]
pub struct TestWorkspace {
    /// Temporary directory
    pub temp: TempDir,
    /// Path to workspace root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestWorkspace {
    /// Create a new test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: &[u8]) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from workspace
    pub fn read_file(&self, path: &str) -> Vec<u8> {
        std::fs::read(self.path.join(path)).expect("Failed to read file")
    }

    /// Size of a file in workspace
    pub fn file_size(&self, path: &str) -> u64 {
        std::fs::metadata(self.path.join(path))
            .expect("Failed to stat file")
            .len()
    }

    /// Check if a file exists in workspace
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Number of files directly in a workspace directory
    pub fn count_files(&self, dir: &str) -> usize {
        std::fs::read_dir(self.path.join(dir))
            .expect("Failed to list directory")
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_ok_and(|t| t.is_file()))
            .count()
    }

    /// Write `Productos-1.xlsx` with a title row, a header row and `rows` below
    pub fn write_workbook(&self, rows: &[Row], pictures: &[Picture]) {
        write_workbook(&self.path.join("Productos-1.xlsx"), rows, pictures);
    }
}

/// A solid-colour PNG; distinct sizes or colours give distinct bytes
pub fn png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let image = RgbaImage::from_pixel(width, height, Rgba(rgba));
    let mut bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, ImageFormat::Png)
        .expect("Failed to encode PNG");
    bytes.into_inner()
}

/// One picture per row, `image1.png` on the first product row, and so on
pub fn pictures_in_row_order(count: u32) -> Vec<Picture> {
    (1..=count)
        .map(|i| Picture {
            media: format!("image{i}.png"),
            row: i + 1,
            bytes: png(4 + i, 4, [u8::try_from(i * 20).unwrap_or(255), 0, 0, 255]),
        })
        .collect()
}

/// Write a minimal workbook: one sheet, inline strings, one drawing part
pub fn write_workbook(path: &Path, rows: &[Row], pictures: &[Picture]) {
    let file = File::create(path).expect("Failed to create workbook");
    let mut zip = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    let mut part = |name: &str, data: &[u8]| {
        zip.start_file(name, options).expect("Failed to start entry");
        zip.write_all(data).expect("Failed to write entry");
    };

    part("[Content_Types].xml", CONTENT_TYPES.as_bytes());
    part("_rels/.rels", ROOT_RELS.as_bytes());
    part("xl/workbook.xml", WORKBOOK.as_bytes());
    part("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.as_bytes());
    part("xl/worksheets/sheet1.xml", sheet_xml(rows).as_bytes());
    part("xl/worksheets/_rels/sheet1.xml.rels", SHEET_RELS.as_bytes());
    part("xl/drawings/drawing1.xml", drawing_xml(pictures).as_bytes());
    part(
        "xl/drawings/_rels/drawing1.xml.rels",
        drawing_rels_xml(pictures).as_bytes(),
    );
    for picture in pictures {
        part(&format!("xl/media/{}", picture.media), &picture.bytes);
    }

    zip.finish().expect("Failed to finish workbook");
}

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Default Extension="png" ContentType="image/png"/>
  <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
  <Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
  <Override PartName="/xl/drawings/drawing1.xml" ContentType="application/vnd.openxmlformats-officedocument.drawing+xml"/>
</Types>
"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>
"#;

const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"
          xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <sheets>
    <sheet name="Productos" sheetId="1" r:id="rId1"/>
  </sheets>
</workbook>
"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>
"#;

const SHEET_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/drawing" Target="../drawings/drawing1.xml"/>
</Relationships>
"#;

fn inline(cell: &str, text: &str) -> String {
    format!(r#"<c r="{cell}" t="inlineStr"><is><t>{text}</t></is></c>"#)
}

fn sheet_xml(rows: &[Row]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"
           xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheetData>
"#,
    );
    xml.push_str(&format!(
        r#"<row r="1">{}</row>"#,
        inline("A1", "LISTA DE PRODUCTOS")
    ));
    xml.push_str(&format!(
        r#"<row r="2">{}{}</row>"#,
        inline("A2", "Sku"),
        inline("B2", "Nombre")
    ));
    for (i, row) in rows.iter().enumerate() {
        let r = i + 3;
        let sku = row
            .sku
            .map(|sku| format!(r#"<c r="A{r}"><v>{sku}</v></c>"#))
            .unwrap_or_default();
        xml.push_str(&format!(
            r#"<row r="{r}">{sku}{}</row>"#,
            inline(&format!("B{r}"), row.name)
        ));
    }
    xml.push_str("</sheetData>\n<drawing r:id=\"rId1\"/>\n</worksheet>\n");
    xml
}

fn drawing_xml(pictures: &[Picture]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<xdr:wsDr xmlns:xdr="http://schemas.openxmlformats.org/drawingml/2006/spreadsheetDrawing"
          xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"
          xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
"#,
    );
    for (i, picture) in pictures.iter().enumerate() {
        let id = i + 1;
        xml.push_str(&format!(
            r#"<xdr:oneCellAnchor>
  <xdr:from><xdr:col>2</xdr:col><xdr:colOff>0</xdr:colOff><xdr:row>{row}</xdr:row><xdr:rowOff>0</xdr:rowOff></xdr:from>
  <xdr:ext cx="952500" cy="952500"/>
  <xdr:pic>
    <xdr:nvPicPr><xdr:cNvPr id="{id}" name="Picture {id}"/><xdr:cNvPicPr/></xdr:nvPicPr>
    <xdr:blipFill><a:blip r:embed="rId{id}"/><a:stretch><a:fillRect/></a:stretch></xdr:blipFill>
    <xdr:spPr><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></xdr:spPr>
  </xdr:pic>
  <xdr:clientData/>
</xdr:oneCellAnchor>
"#,
            row = picture.row
        ));
    }
    xml.push_str("</xdr:wsDr>\n");
    xml
}

fn drawing_rels_xml(pictures: &[Picture]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
"#,
    );
    for (i, picture) in pictures.iter().enumerate() {
        xml.push_str(&format!(
            r#"  <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/{}"/>
"#,
            i + 1,
            picture.media
        ));
    }
    xml.push_str("</Relationships>\n");
    xml
}
