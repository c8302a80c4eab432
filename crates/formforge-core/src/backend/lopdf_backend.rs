//! lopdf implementation of [`DocumentBackend`]

use std::collections::{BTreeMap, HashMap, HashSet};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use tracing::debug;

use super::{DocumentBackend, FontPreset, Rgb, TextRun, WidgetStyle};
use crate::coords::{is_pdf_real, PdfRect};
use crate::error::FormForgeError;
use crate::inspect::{inheritable, page_size};
use crate::layout::PageSize;

/// Field flag bit 13: text field accepts multiple lines
const FF_MULTILINE: i64 = 1 << 12;

/// Annotation flag bit 3: print the widget
const ANNOT_PRINT: i64 = 4;

const MAX_TREE_DEPTH: usize = 32;

/// The two preset fonts, embedded once per document
struct FontSet {
    regular: ObjectId,
    bold: ObjectId,
}

impl FontSet {
    fn embed(doc: &mut Document) -> Self {
        Self {
            regular: embed_standard_font(doc, FontPreset::Regular),
            bold: embed_standard_font(doc, FontPreset::Bold),
        }
    }

    fn resource_dict(&self) -> Dictionary {
        let mut fonts = Dictionary::new();
        fonts.set(
            FontPreset::Regular.resource_name(),
            Object::Reference(self.regular),
        );
        fonts.set(FontPreset::Bold.resource_name(), Object::Reference(self.bold));
        fonts
    }
}

fn embed_standard_font(doc: &mut Document, preset: FontPreset) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => preset.base_font(),
        "Encoding" => "WinAnsiEncoding",
    })
}

/// A form field and the widget annotations that render it
struct FieldEntry {
    id: ObjectId,
    widgets: Vec<ObjectId>,
}

/// Document handle owned by a single build or augment call
pub struct LopdfBackend {
    doc: Document,
    catalog_id: ObjectId,
    pages_id: ObjectId,
    pages: Vec<ObjectId>,
    fonts: FontSet,
    acroform_id: Option<ObjectId>,
    fields: HashMap<String, FieldEntry>,
    pending_text: BTreeMap<ObjectId, Vec<Operation>>,
    font_ready: HashSet<ObjectId>,
    prune_on_save: bool,
}

impl LopdfBackend {
    /// Start an empty document with no pages
    pub fn create() -> Self {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        let fonts = FontSet::embed(&mut doc);
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => Vec::<Object>::new(),
                "Count" => 0,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id),
        });
        doc.trailer.set("Root", Object::Reference(catalog_id));

        Self {
            doc,
            catalog_id,
            pages_id,
            pages: Vec::new(),
            fonts,
            acroform_id: None,
            fields: HashMap::new(),
            pending_text: BTreeMap::new(),
            font_ready: HashSet::new(),
            prune_on_save: false,
        }
    }

    /// Load an existing document
    pub fn load(bytes: &[u8]) -> Result<Self, FormForgeError> {
        let mut doc =
            Document::load_mem(bytes).map_err(|e| FormForgeError::ParseError(e.to_string()))?;

        let catalog_id = doc
            .trailer
            .get(b"Root")
            .and_then(Object::as_reference)
            .map_err(|e| FormForgeError::ParseError(format!("Missing document catalog: {}", e)))?;
        let pages_id = doc
            .get_object(catalog_id)
            .and_then(Object::as_dict)
            .and_then(|catalog| catalog.get(b"Pages"))
            .and_then(Object::as_reference)
            .map_err(|e| FormForgeError::ParseError(format!("Missing page tree: {}", e)))?;

        let pages: Vec<ObjectId> = doc.get_pages().into_values().collect();
        let fields = index_existing_fields(&doc, catalog_id);
        let fonts = FontSet::embed(&mut doc);

        debug!(
            pages = pages.len(),
            existing_fields = fields.len(),
            "Loaded document"
        );

        Ok(Self {
            doc,
            catalog_id,
            pages_id,
            pages,
            fonts,
            acroform_id: None,
            fields,
            pending_text: BTreeMap::new(),
            font_ready: HashSet::new(),
            prune_on_save: false,
        })
    }

    /// Append a blank page, returning its 1-based number
    pub fn add_page(&mut self, size: PageSize) -> Result<u32, FormForgeError> {
        if !size.is_valid() {
            return Err(FormForgeError::InvalidGeometry(format!(
                "page size {}x{}",
                size.width, size.height
            )));
        }

        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(self.pages_id),
            "MediaBox" => vec![0.into(), 0.into(), real(size.width), real(size.height)],
            "Resources" => dictionary! {
                "Font" => self.fonts.resource_dict(),
            },
        });
        push_reference(&mut self.doc, self.pages_id, "Kids", page_id)?;

        let tree = self.doc.get_object_mut(self.pages_id)?.as_dict_mut()?;
        let count = tree.get(b"Count").and_then(Object::as_i64).unwrap_or(0);
        tree.set("Count", count + 1);

        self.font_ready.insert(page_id);
        self.pages.push(page_id);
        Ok(self.pages.len() as u32)
    }

    /// Whether a form field with this name exists
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    fn page_id(&self, page: u32) -> Result<ObjectId, FormForgeError> {
        page.checked_sub(1)
            .and_then(|index| self.pages.get(index as usize))
            .copied()
            .ok_or(FormForgeError::PageNotFound {
                page,
                page_count: self.pages.len() as u32,
            })
    }

    fn ensure_name_free(&self, name: &str) -> Result<(), FormForgeError> {
        if self.fields.contains_key(name) {
            return Err(FormForgeError::DuplicateName(name.to_string()));
        }
        Ok(())
    }

    /// Get or create the AcroForm, making sure it can render our fields
    fn ensure_acroform(&mut self) -> Result<ObjectId, FormForgeError> {
        if let Some(id) = self.acroform_id {
            return Ok(id);
        }

        let existing = self
            .doc
            .get_object(self.catalog_id)?
            .as_dict()?
            .get(b"AcroForm")
            .ok()
            .cloned();

        let form_id = match existing {
            Some(Object::Reference(id)) => id,
            Some(Object::Dictionary(inline)) => self.doc.add_object(inline),
            _ => self.doc.add_object(dictionary! {
                "Fields" => Vec::<Object>::new(),
            }),
        };
        self.doc
            .get_object_mut(self.catalog_id)?
            .as_dict_mut()?
            .set("AcroForm", Object::Reference(form_id));

        {
            let form = self.doc.get_object_mut(form_id)?.as_dict_mut()?;
            form.set("NeedAppearances", true);
            if !form.has(b"DA") {
                form.set(
                    "DA",
                    Object::string_literal(format!(
                        "/{} 0 Tf 0 g",
                        FontPreset::Regular.resource_name()
                    )),
                );
            }
            if !form.has(b"Fields") {
                form.set("Fields", Vec::<Object>::new());
            }
        }
        merge_fonts(&mut self.doc, form_id, "DR", &self.fonts.resource_dict())?;

        self.acroform_id = Some(form_id);
        Ok(form_id)
    }

    /// Attach a finished widget dictionary to its page and the AcroForm
    fn register_field(
        &mut self,
        page_id: ObjectId,
        name: &str,
        field: Dictionary,
    ) -> Result<(), FormForgeError> {
        let form_id = self.ensure_acroform()?;
        let field_id = self.doc.add_object(field);
        push_reference(&mut self.doc, page_id, "Annots", field_id)?;
        push_reference(&mut self.doc, form_id, "Fields", field_id)?;

        self.fields.insert(
            name.to_string(),
            FieldEntry {
                id: field_id,
                widgets: vec![field_id],
            },
        );
        debug!(name, ?field_id, "Registered form field");
        Ok(())
    }

    /// Make the preset fonts resolvable from a page's content
    fn ensure_page_fonts(&mut self, page_id: ObjectId) -> Result<(), FormForgeError> {
        if !self.font_ready.insert(page_id) {
            return Ok(());
        }

        let has_own = self.doc.get_object(page_id)?.as_dict()?.has(b"Resources");
        if !has_own {
            // Copy inherited resources down so existing content keeps its fonts
            if let Some(inherited) = inherited_resources(&self.doc, page_id) {
                self.doc
                    .get_object_mut(page_id)?
                    .as_dict_mut()?
                    .set("Resources", inherited);
            }
        }

        merge_fonts(
            &mut self.doc,
            page_id,
            "Resources",
            &self.fonts.resource_dict(),
        )
    }

    /// Write queued text into one content stream per page
    fn flush_text(&mut self) -> Result<(), FormForgeError> {
        let pending = std::mem::take(&mut self.pending_text);
        for (page_id, operations) in pending {
            self.ensure_page_fonts(page_id)?;

            let mut wrapped = Vec::with_capacity(operations.len() + 2);
            wrapped.push(Operation::new("q", vec![]));
            wrapped.extend(operations);
            wrapped.push(Operation::new("Q", vec![]));
            let bytes = Content {
                operations: wrapped,
            }
            .encode()?;

            self.append_content(page_id, bytes)?;
        }
        Ok(())
    }

    /// Append a content stream, isolating existing content in its own q/Q pair
    fn append_content(&mut self, page_id: ObjectId, bytes: Vec<u8>) -> Result<(), FormForgeError> {
        let new_id = self
            .doc
            .add_object(Stream::new(Dictionary::new(), bytes));

        let existing = self
            .doc
            .get_object(page_id)?
            .as_dict()?
            .get(b"Contents")
            .ok()
            .cloned();

        let existing: Vec<Object> = match existing {
            Some(Object::Reference(id)) => match self.doc.get_object(id) {
                Ok(Object::Array(items)) => items.clone(),
                _ => vec![Object::Reference(id)],
            },
            Some(Object::Array(items)) => items,
            _ => Vec::new(),
        };

        let contents = if existing.is_empty() {
            Object::Reference(new_id)
        } else {
            let save = self
                .doc
                .add_object(Stream::new(Dictionary::new(), b"q\n".to_vec()));
            let restore = self
                .doc
                .add_object(Stream::new(Dictionary::new(), b"\nQ\n".to_vec()));

            let mut items = Vec::with_capacity(existing.len() + 3);
            items.push(Object::Reference(save));
            items.extend(existing);
            items.push(Object::Reference(restore));
            items.push(Object::Reference(new_id));
            Object::Array(items)
        };

        self.doc
            .get_object_mut(page_id)?
            .as_dict_mut()?
            .set("Contents", contents);
        Ok(())
    }
}

impl DocumentBackend for LopdfBackend {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_size(&self, page: u32) -> Result<PageSize, FormForgeError> {
        let page_id = self.page_id(page)?;
        Ok(page_size(&self.doc, page_id))
    }

    fn add_text_field(
        &mut self,
        page: u32,
        name: &str,
        rect: PdfRect,
        multiline: bool,
        style: &WidgetStyle,
    ) -> Result<(), FormForgeError> {
        self.ensure_name_free(name)?;
        ensure_drawable(&rect)?;
        let page_id = self.page_id(page)?;

        let appearance = self
            .doc
            .add_object(box_appearance(rect.width, rect.height, style, false)?);

        let mut field = widget_dictionary(page_id, name, &rect, style);
        field.set("FT", Object::Name(b"Tx".to_vec()));
        field.set(
            "DA",
            Object::string_literal(format!(
                "/{} 0 Tf 0 g",
                FontPreset::Regular.resource_name()
            )),
        );
        field.set("V", Object::string_literal(""));
        if multiline {
            field.set("Ff", FF_MULTILINE);
        }
        field.set("AP", dictionary! { "N" => Object::Reference(appearance) });

        self.register_field(page_id, name, field)
    }

    fn add_checkbox(
        &mut self,
        page: u32,
        name: &str,
        rect: PdfRect,
        style: &WidgetStyle,
    ) -> Result<(), FormForgeError> {
        self.ensure_name_free(name)?;
        ensure_drawable(&rect)?;
        let page_id = self.page_id(page)?;

        let on = self
            .doc
            .add_object(box_appearance(rect.width, rect.height, style, true)?);
        let off = self
            .doc
            .add_object(box_appearance(rect.width, rect.height, style, false)?);

        let mut field = widget_dictionary(page_id, name, &rect, style);
        field.set("FT", Object::Name(b"Btn".to_vec()));
        field.set("V", Object::Name(b"Off".to_vec()));
        field.set("AS", Object::Name(b"Off".to_vec()));
        field.set(
            "AP",
            dictionary! {
                "N" => dictionary! {
                    "Yes" => Object::Reference(on),
                    "Off" => Object::Reference(off),
                },
            },
        );

        self.register_field(page_id, name, field)
    }

    fn remove_field(&mut self, name: &str) -> Result<(), FormForgeError> {
        let entry = self
            .fields
            .remove(name)
            .ok_or_else(|| FormForgeError::FieldNotFound(name.to_string()))?;

        let mut targets = entry.widgets;
        if !targets.contains(&entry.id) {
            targets.push(entry.id);
        }

        for page_id in self.pages.clone() {
            remove_references(&mut self.doc, page_id, "Annots", &targets)?;
        }
        let form_id = self.ensure_acroform()?;
        remove_references(&mut self.doc, form_id, "Fields", &[entry.id])?;

        for id in &targets {
            self.doc.objects.remove(id);
        }
        self.prune_on_save = true;

        debug!(name, "Removed form field");
        Ok(())
    }

    fn draw_text(&mut self, page: u32, run: &TextRun) -> Result<(), FormForgeError> {
        let page_id = self.page_id(page)?;
        if ![run.x, run.y, run.size].iter().all(|&v| is_pdf_real(v)) {
            return Err(FormForgeError::InvalidGeometry(format!(
                "text '{}' at ({}, {}) size {}",
                run.text, run.x, run.y, run.size
            )));
        }
        let Rgb { r, g, b } = run.color;

        let operations = self.pending_text.entry(page_id).or_default();
        operations.extend([
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![run.font.resource_name().into(), real(run.size)],
            ),
            Operation::new("rg", vec![real(r), real(g), real(b)]),
            Operation::new("Td", vec![real(run.x), real(run.y)]),
            Operation::new(
                "Tj",
                vec![Object::String(win_ansi(&run.text), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ]);
        Ok(())
    }

    fn save(&mut self) -> Result<Vec<u8>, FormForgeError> {
        self.flush_text()?;
        if self.prune_on_save {
            self.doc.prune_objects();
        }

        let mut output = Vec::new();
        self.doc
            .save_to(&mut output)
            .map_err(|e| FormForgeError::OperationError(e.to_string()))?;
        Ok(output)
    }
}

fn real(value: f64) -> Object {
    Object::Real(value as f32)
}

fn rgb_array(color: Rgb) -> Object {
    Object::Array(vec![real(color.r), real(color.g), real(color.b)])
}

fn ensure_drawable(rect: &PdfRect) -> Result<(), FormForgeError> {
    if rect.is_drawable() {
        Ok(())
    } else {
        Err(FormForgeError::InvalidGeometry(format!(
            "{}x{} at ({}, {})",
            rect.width, rect.height, rect.x, rect.y
        )))
    }
}

/// Widget annotation entries shared by every field type
fn widget_dictionary(
    page_id: ObjectId,
    name: &str,
    rect: &PdfRect,
    style: &WidgetStyle,
) -> Dictionary {
    let mut field = Dictionary::new();
    field.set("Type", Object::Name(b"Annot".to_vec()));
    field.set("Subtype", Object::Name(b"Widget".to_vec()));
    field.set("T", Object::String(text_string(name), StringFormat::Literal));
    field.set(
        "Rect",
        Object::Array(rect.corners().iter().map(|&v| real(v)).collect()),
    );
    field.set("F", ANNOT_PRINT);
    field.set("P", Object::Reference(page_id));

    let mut characteristics = Dictionary::new();
    characteristics.set("BC", rgb_array(style.border_color));
    if let Some(fill) = style.fill {
        characteristics.set("BG", rgb_array(fill));
    }
    field.set("MK", characteristics);
    field.set(
        "BS",
        dictionary! {
            "W" => real(style.border_width),
            "S" => "S",
        },
    );
    field
}

/// Form XObject drawing the widget's fill, border and optional check mark
fn box_appearance(
    width: f64,
    height: f64,
    style: &WidgetStyle,
    checked: bool,
) -> Result<Stream, FormForgeError> {
    let mut operations = vec![Operation::new("q", vec![])];

    if let Some(Rgb { r, g, b }) = style.fill {
        operations.extend([
            Operation::new("rg", vec![real(r), real(g), real(b)]),
            Operation::new("re", vec![0.into(), 0.into(), real(width), real(height)]),
            Operation::new("f", vec![]),
        ]);
    }

    if style.border_width > 0.0 {
        let Rgb { r, g, b } = style.border_color;
        let inset = style.border_width / 2.0;
        operations.extend([
            Operation::new("RG", vec![real(r), real(g), real(b)]),
            Operation::new("w", vec![real(style.border_width)]),
            Operation::new(
                "re",
                vec![
                    real(inset),
                    real(inset),
                    real(width - style.border_width),
                    real(height - style.border_width),
                ],
            ),
            Operation::new("S", vec![]),
        ]);
    }

    if checked {
        operations.extend([
            Operation::new("G", vec![0.into()]),
            Operation::new("w", vec![real((width * 0.1).max(1.0))]),
            Operation::new("m", vec![real(width * 0.2), real(height * 0.5)]),
            Operation::new("l", vec![real(width * 0.4), real(height * 0.3)]),
            Operation::new("l", vec![real(width * 0.8), real(height * 0.8)]),
            Operation::new("S", vec![]),
        ]);
    }

    operations.push(Operation::new("Q", vec![]));
    let content = Content { operations }.encode()?;

    let dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Form",
        "BBox" => vec![0.into(), 0.into(), real(width), real(height)],
    };
    Ok(Stream::new(dict, content))
}

/// Push a reference onto an array entry that may be missing, inline or indirect
fn push_reference(
    doc: &mut Document,
    holder_id: ObjectId,
    key: &str,
    target: ObjectId,
) -> Result<(), FormForgeError> {
    let array_id = doc
        .get_object(holder_id)?
        .as_dict()?
        .get(key.as_bytes())
        .ok()
        .and_then(|entry| entry.as_reference().ok());

    if let Some(array_id) = array_id {
        doc.get_object_mut(array_id)?
            .as_array_mut()?
            .push(Object::Reference(target));
        return Ok(());
    }

    let holder = doc.get_object_mut(holder_id)?.as_dict_mut()?;
    if let Ok(Object::Array(items)) = holder.get_mut(key.as_bytes()) {
        items.push(Object::Reference(target));
    } else {
        holder.set(key, vec![Object::Reference(target)]);
    }
    Ok(())
}

/// Drop references to any of `targets` from an array entry
fn remove_references(
    doc: &mut Document,
    holder_id: ObjectId,
    key: &str,
    targets: &[ObjectId],
) -> Result<(), FormForgeError> {
    let keep = |item: &Object| !matches!(item, Object::Reference(id) if targets.contains(id));

    let array_id = doc
        .get_object(holder_id)?
        .as_dict()?
        .get(key.as_bytes())
        .ok()
        .and_then(|entry| entry.as_reference().ok());

    if let Some(array_id) = array_id {
        if let Ok(items) = doc.get_object_mut(array_id)?.as_array_mut() {
            items.retain(keep);
        }
        return Ok(());
    }

    let holder = doc.get_object_mut(holder_id)?.as_dict_mut()?;
    if let Ok(Object::Array(items)) = holder.get_mut(key.as_bytes()) {
        items.retain(keep);
    }
    Ok(())
}

/// Add any font entries missing from the resources dictionary at `owner[key]`
fn merge_fonts(
    doc: &mut Document,
    owner_id: ObjectId,
    key: &str,
    fonts: &Dictionary,
) -> Result<(), FormForgeError> {
    let (resources_id, mut resources) = {
        let owner = doc.get_object(owner_id)?.as_dict()?;
        match owner.get(key.as_bytes()) {
            Ok(Object::Reference(id)) => (Some(*id), doc.get_object(*id)?.as_dict()?.clone()),
            Ok(Object::Dictionary(inline)) => (None, inline.clone()),
            _ => (None, Dictionary::new()),
        }
    };

    let font_dict_id = match resources.get(b"Font") {
        Ok(Object::Reference(id)) => Some(*id),
        _ => None,
    };

    if let Some(font_dict_id) = font_dict_id {
        let font_dict = doc.get_object_mut(font_dict_id)?.as_dict_mut()?;
        insert_missing(font_dict, fonts);
    } else if let Ok(Object::Dictionary(existing)) = resources.get_mut(b"Font") {
        insert_missing(existing, fonts);
    } else {
        resources.set("Font", fonts.clone());
    }

    match resources_id {
        Some(id) => {
            doc.objects.insert(id, Object::Dictionary(resources));
        }
        None => {
            doc.get_object_mut(owner_id)?
                .as_dict_mut()?
                .set(key, resources);
        }
    }
    Ok(())
}

fn insert_missing(target: &mut Dictionary, entries: &Dictionary) {
    for (name, value) in entries.iter() {
        if !target.has(name) {
            target.set(name.clone(), value.clone());
        }
    }
}

/// Resources a page inherits from its ancestors in the page tree
fn inherited_resources(doc: &Document, page_id: ObjectId) -> Option<Dictionary> {
    let mut current = doc.get_object(page_id).ok()?.as_dict().ok()?;
    for _ in 0..MAX_TREE_DEPTH {
        let parent_id = current.get(b"Parent").ok()?.as_reference().ok()?;
        current = doc.get_object(parent_id).ok()?.as_dict().ok()?;
        if let Some(Object::Dictionary(resources)) = inheritable(doc, current, b"Resources") {
            return Some(resources.clone());
        }
    }
    None
}

/// Index the top-level fields of an existing AcroForm by partial name
fn index_existing_fields(doc: &Document, catalog_id: ObjectId) -> HashMap<String, FieldEntry> {
    let mut fields = HashMap::new();

    let Some(catalog) = doc.get_object(catalog_id).ok().and_then(|o| o.as_dict().ok()) else {
        return fields;
    };
    let Some(Object::Dictionary(form)) = inheritable(doc, catalog, b"AcroForm") else {
        return fields;
    };
    let Some(Object::Array(entries)) = inheritable(doc, form, b"Fields") else {
        return fields;
    };

    for entry in entries {
        let Ok(id) = entry.as_reference() else {
            continue;
        };
        let Some(dict) = doc.get_object(id).ok().and_then(|o| o.as_dict().ok()) else {
            continue;
        };
        let Ok(Object::String(raw, _)) = dict.get(b"T") else {
            continue;
        };

        let mut widgets = vec![id];
        if let Some(Object::Array(kids)) = inheritable(doc, dict, b"Kids") {
            widgets.extend(kids.iter().filter_map(|kid| kid.as_reference().ok()));
        }
        fields.insert(decode_text_string(raw), FieldEntry { id, widgets });
    }

    fields
}

/// Encode a PDF text string: plain bytes for ASCII, UTF-16BE with BOM otherwise
fn text_string(text: &str) -> Vec<u8> {
    if text.is_ascii() {
        return text.as_bytes().to_vec();
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    bytes
}

fn decode_text_string(raw: &[u8]) -> String {
    if let Some(body) = raw.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = body
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    raw.iter().map(|&b| b as char).collect()
}

/// Encode text for a WinAnsiEncoding simple font; unmappable characters become '?'
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7E}' | '\u{A0}'..='\u{FF}' => c as u8,
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            _ => b'?',
        })
        .collect()
}
