//! Template streaming and patch application.
//!
//! Templates are read with `quick-xml`, so they must be well-formed markup.
//! HTML void elements (`<meta>`, `<img>`, `<br>`, …) may be written without a
//! closing slash; inline scripts containing `<` should live in external files.

use super::{Op, Patch, Target};
use anyhow::{Result, bail};
use quick_xml::{
    Reader, Writer,
    escape::escape,
    events::{BytesEnd, BytesStart, Event},
};
use rustc_hash::{FxHashMap, FxHashSet};
use std::io::{Cursor, Write};

type XmlWriter = Writer<Cursor<Vec<u8>>>;

/// HTML elements that never have a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

#[inline]
fn create_xml_reader(content: &[u8]) -> Reader<&[u8]> {
    let mut reader = Reader::from_reader(content);
    reader.config_mut().trim_text(false);
    reader.config_mut().enable_all_checks(false);
    reader
}

#[inline]
fn tag_name(elem: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(elem.name().as_ref()).to_ascii_lowercase()
}

#[inline]
fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

fn attr_value(elem: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    elem.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).into_owned())
}

/// An HTML template with the patches that will be applied on render.
#[derive(Debug, Clone)]
pub struct Document {
    source: String,
    ids: FxHashSet<String>,
    /// Class name to number of elements carrying it.
    classes: FxHashMap<String, usize>,
    tags: FxHashSet<String>,
    patches: Vec<Patch>,
}

impl Document {
    /// Index the template's ids, classes and tag names.
    pub fn parse(source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let mut ids = FxHashSet::default();
        let mut classes = FxHashMap::default();
        let mut tags = FxHashSet::default();

        {
            let mut reader = create_xml_reader(source.as_bytes());
            loop {
                match reader.read_event() {
                    Ok(Event::Start(elem) | Event::Empty(elem)) => {
                        tags.insert(tag_name(&elem));
                        for attr in elem.attributes().flatten() {
                            let value = String::from_utf8_lossy(&attr.value);
                            match attr.key.as_ref() {
                                b"id" => {
                                    ids.insert(value.into_owned());
                                }
                                b"class" => {
                                    for class in value.split_whitespace() {
                                        *classes.entry(class.to_owned()).or_default() += 1;
                                    }
                                }
                                _ => {}
                            }
                        }
                    }
                    Ok(Event::Eof) => break,
                    Ok(_) => {}
                    Err(e) => bail!(
                        "HTML parse error at position {}: {e}",
                        reader.error_position()
                    ),
                }
            }
        }

        Ok(Self {
            source,
            ids,
            classes,
            tags,
            patches: Vec::new(),
        })
    }

    /// Whether at least one element matches `target`.
    pub fn contains(&self, target: &Target) -> bool {
        match target {
            Target::Id(id) => self.ids.contains(id),
            Target::Class(class) => self.classes.contains_key(class),
            Target::Tag(tag) => self.tags.contains(tag),
            Target::Nth(class, index) => self.classes.get(class).is_some_and(|n| index < n),
        }
    }

    /// Queue a patch. Returns `false` (and drops it) if the target is absent.
    pub fn apply(&mut self, patch: Patch) -> bool {
        if !self.contains(&patch.target) {
            return false;
        }
        self.patches.push(patch);
        true
    }

    /// Queue many patches, returning how many found their target.
    pub fn apply_all(&mut self, patches: impl IntoIterator<Item = Patch>) -> usize {
        patches.into_iter().filter(|p| self.apply(p.clone())).count()
    }

    /// Patches queued so far, in application order.
    #[cfg(test)]
    pub fn patches(&self) -> &[Patch] {
        &self.patches
    }

    /// Stream the template, applying every queued patch.
    pub fn render(&self) -> Result<String> {
        let mut reader = create_xml_reader(self.source.as_bytes());
        let mut writer: XmlWriter = Writer::new(Cursor::new(Vec::with_capacity(self.source.len())));
        let mut stack: Vec<Frame> = Vec::new();
        let mut seen = Ordinals::default();

        loop {
            let skipping = stack.iter().any(|f| f.skip);
            match reader.read_event() {
                Ok(Event::Start(elem)) => {
                    let tag = tag_name(&elem);
                    let void = is_void(&tag);
                    let ordinals = seen.next(&elem);
                    if skipping {
                        if !void {
                            stack.push(Frame::default());
                        }
                        continue;
                    }

                    let edit = self.edit_for(&elem, &tag, &ordinals);
                    writer.write_event(Event::Start(edit.start_tag(&elem)))?;
                    if void {
                        continue;
                    }
                    if let Some(body) = &edit.body {
                        writer.get_mut().write_all(body.as_bytes())?;
                    }
                    stack.push(Frame {
                        skip: edit.body.is_some(),
                        tail: edit.tail,
                    });
                }
                Ok(Event::Empty(elem)) => {
                    let ordinals = seen.next(&elem);
                    if skipping {
                        continue;
                    }
                    let tag = tag_name(&elem);
                    let edit = self.edit_for(&elem, &tag, &ordinals);
                    let start = edit.start_tag(&elem);
                    if is_void(&tag) || (edit.body.is_none() && edit.tail.is_empty()) {
                        writer.write_event(Event::Empty(start))?;
                    } else {
                        writer.write_event(Event::Start(start))?;
                        let out = writer.get_mut();
                        out.write_all(edit.body.unwrap_or_default().as_bytes())?;
                        out.write_all(edit.tail.as_bytes())?;
                        writer.write_event(Event::End(BytesEnd::new(tag)))?;
                    }
                }
                Ok(Event::End(elem)) => {
                    let tag = String::from_utf8_lossy(elem.name().as_ref()).to_ascii_lowercase();
                    if is_void(&tag) {
                        if !skipping {
                            writer.write_event(Event::End(elem))?;
                        }
                        continue;
                    }
                    let frame = stack.pop().unwrap_or_default();
                    if stack.iter().any(|f| f.skip) {
                        continue;
                    }
                    writer.get_mut().write_all(frame.tail.as_bytes())?;
                    writer.write_event(Event::End(elem))?;
                }
                Ok(Event::Eof) => break,
                Ok(event) => {
                    if !skipping {
                        writer.write_event(event)?;
                    }
                }
                Err(e) => bail!(
                    "HTML parse error at position {}: {e}",
                    reader.error_position()
                ),
            }
        }

        Ok(String::from_utf8(writer.into_inner().into_inner())?)
    }

    /// Collect the patches matching one element.
    fn edit_for(&self, elem: &BytesStart<'_>, tag: &str, ordinals: &[(String, usize)]) -> Edit {
        let mut edit = Edit::default();
        if self.patches.is_empty() {
            return edit;
        }

        let id = attr_value(elem, b"id");
        let matches = |target: &Target| match target {
            Target::Id(want) => id.as_deref() == Some(want.as_str()),
            Target::Class(want) => ordinals.iter().any(|(c, _)| c == want),
            Target::Tag(want) => want == tag,
            Target::Nth(want, index) => ordinals.iter().any(|(c, n)| c == want && n == index),
        };

        for patch in self.patches.iter().filter(|p| matches(&p.target)) {
            match &patch.op {
                Op::Text(text) => {
                    edit.body = Some(escape(text.as_str()).into_owned());
                    edit.tail.clear();
                }
                Op::Html(html) => {
                    edit.body = Some(html.clone());
                    edit.tail.clear();
                }
                Op::Append(html) => edit.tail.push_str(html),
                Op::Attr(name, value) => edit.attrs.push((name.clone(), value.clone())),
                Op::AddClass(class) => edit.class_ops.push((true, class.clone())),
                Op::RemoveClass(class) => edit.class_ops.push((false, class.clone())),
                Op::Style(prop, value) => edit.styles.push((prop.clone(), value.clone())),
            }
        }
        edit
    }
}

/// Running per-class element counters, in document order.
#[derive(Debug, Default)]
struct Ordinals(FxHashMap<String, usize>);

impl Ordinals {
    /// The element's classes, each paired with its index among same-class elements.
    fn next(&mut self, elem: &BytesStart<'_>) -> Vec<(String, usize)> {
        let classes = attr_value(elem, b"class").unwrap_or_default();
        classes
            .split_whitespace()
            .map(|class| {
                let counter = self.0.entry(class.to_owned()).or_default();
                let index = *counter;
                *counter += 1;
                (class.to_owned(), index)
            })
            .collect()
    }
}

/// One open element while rendering.
#[derive(Debug, Default)]
struct Frame {
    /// Markup appended before the closing tag.
    tail: String,
    /// Original children are being replaced.
    skip: bool,
}

/// Accumulated changes for one element.
#[derive(Debug, Default)]
struct Edit {
    attrs: Vec<(String, String)>,
    class_ops: Vec<(bool, String)>,
    styles: Vec<(String, String)>,
    body: Option<String>,
    tail: String,
}

impl Edit {
    /// The start tag to write: the original when no attribute changes apply.
    fn start_tag<'a>(&self, elem: &BytesStart<'a>) -> BytesStart<'a> {
        if self.attrs.is_empty() && self.class_ops.is_empty() && self.styles.is_empty() {
            elem.clone()
        } else {
            self.rebuild(elem)
        }
    }

    /// Rebuild the start tag with attribute, class and style changes applied.
    fn rebuild(&self, elem: &BytesStart<'_>) -> BytesStart<'static> {
        let tag = String::from_utf8_lossy(elem.name().as_ref()).into_owned();
        let mut attrs: Vec<(Vec<u8>, Vec<u8>)> = elem
            .attributes()
            .flatten()
            .map(|attr| (attr.key.as_ref().to_vec(), attr.value.into_owned()))
            .collect();

        for (name, value) in &self.attrs {
            set_attr(&mut attrs, name.as_bytes(), escape(value.as_str()).as_bytes());
        }

        if !self.class_ops.is_empty() {
            let current = get_attr(&attrs, b"class");
            let mut list: Vec<String> = current.split_whitespace().map(str::to_owned).collect();
            for (add, class) in &self.class_ops {
                if *add {
                    if !list.contains(class) {
                        list.push(escape(class.as_str()).into_owned());
                    }
                } else {
                    list.retain(|c| c != class);
                }
            }
            if list.is_empty() {
                attrs.retain(|(k, _)| k != b"class");
            } else {
                set_attr(&mut attrs, b"class", list.join(" ").as_bytes());
            }
        }

        if !self.styles.is_empty() {
            let current = get_attr(&attrs, b"style");
            let mut decls: Vec<(String, String)> = current
                .split(';')
                .filter_map(|decl| decl.split_once(':'))
                .map(|(p, v)| (p.trim().to_owned(), v.trim().to_owned()))
                .filter(|(p, _)| !p.is_empty())
                .collect();
            for (prop, value) in &self.styles {
                let value = escape(value.as_str()).into_owned();
                match decls.iter_mut().find(|(p, _)| p == prop) {
                    Some(decl) => decl.1 = value,
                    None => decls.push((prop.clone(), value)),
                }
            }
            let style = decls
                .iter()
                .map(|(p, v)| format!("{p}: {v}"))
                .collect::<Vec<_>>()
                .join("; ");
            set_attr(&mut attrs, b"style", style.as_bytes());
        }

        let mut new_elem = BytesStart::new(tag);
        for (k, v) in &attrs {
            new_elem.push_attribute((k.as_slice(), v.as_slice()));
        }
        new_elem
    }
}

fn get_attr(attrs: &[(Vec<u8>, Vec<u8>)], key: &[u8]) -> String {
    attrs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| String::from_utf8_lossy(v).into_owned())
        .unwrap_or_default()
}

fn set_attr(attrs: &mut Vec<(Vec<u8>, Vec<u8>)>, key: &[u8], value: &[u8]) {
    match attrs.iter_mut().find(|(k, _)| k == key) {
        Some(attr) => attr.1 = value.to_vec(),
        None => attrs.push((key.to_vec(), value.to_vec())),
    }
}
