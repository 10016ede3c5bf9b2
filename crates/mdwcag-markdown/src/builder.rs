//! Event stream to element tree conversion
//!
//! Each `Start` event pushes exactly one frame and each `End` pops one, so
//! tags we do not model still keep the stack balanced. Inline text is
//! buffered until the next structural event, then appended ElementTree
//! style: to the container's `text` when it has no children yet, otherwise
//! to the `tail` of its last child.

use mdwcag_dom::{DomTree, Element, NodeId, Tag as ElementTag};
use pulldown_cmark::{Alignment, CodeBlockKind, Event, Tag, TagEnd};

use crate::ParseError;
use crate::deletion::{self, Segment};
use crate::parser::BlockHook;

/// Open container on the builder stack
#[derive(Debug, Clone, Copy)]
struct Frame {
    container: NodeId,
    /// Drop character data (raw HTML, metadata)
    skip: bool,
    /// Keep character data verbatim (code blocks)
    raw: bool,
}

#[derive(Debug)]
struct TableState {
    table: NodeId,
    tbody: Option<NodeId>,
    alignments: Vec<Alignment>,
    column: usize,
    in_head: bool,
}

#[derive(Debug)]
struct ImageState {
    node: NodeId,
    alt: String,
    depth: usize,
}

pub(crate) struct TreeBuilder<'h> {
    tree: DomTree,
    stack: Vec<Frame>,
    pending: String,
    table: Option<TableState>,
    image: Option<ImageState>,
    deletion: bool,
    hook: &'h mut dyn BlockHook,
}

impl<'h> TreeBuilder<'h> {
    pub(crate) fn new(deletion: bool, hook: &'h mut dyn BlockHook) -> Self {
        Self {
            tree: DomTree::new(),
            stack: Vec::new(),
            pending: String::new(),
            table: None,
            image: None,
            deletion,
            hook,
        }
    }

    fn frame(&self) -> Frame {
        self.stack.last().copied().unwrap_or(Frame {
            container: self.tree.root(),
            skip: false,
            raw: false,
        })
    }

    pub(crate) fn push(&mut self, event: Event<'_>) -> Result<(), ParseError> {
        if self.image.is_some() {
            self.push_image_alt(event);
            return Ok(());
        }

        match event {
            Event::Start(tag) => {
                self.flush()?;
                self.start(tag)?;
            }
            Event::End(tag) => {
                self.flush()?;
                self.end(tag)?;
            }
            Event::Text(text) => {
                if !self.frame().skip {
                    self.pending.push_str(&text);
                }
            }
            Event::Code(code) => {
                self.flush()?;
                self.append(Element::new("code").with_text(&*code))?;
            }
            Event::SoftBreak => {
                if !self.frame().skip {
                    self.pending.push('\n');
                }
            }
            Event::HardBreak => {
                self.flush()?;
                self.append(Element::new("br"))?;
            }
            Event::Rule => {
                self.flush()?;
                self.append(Element::new("hr"))?;
            }
            Event::FootnoteReference(label) => {
                self.flush()?;
                self.append(Element::new("sup").with_text(&*label))?;
            }
            Event::TaskListMarker(checked) => {
                self.flush()?;
                let mut input = Element::new("input").with_attr("type", "checkbox");
                if checked {
                    input.set("checked", "checked");
                }
                self.append(input)?;
            }
            // Raw HTML and math are not part of the element tree
            _ => {}
        }
        Ok(())
    }

    /// Events between an image's start and end form its alt text
    fn push_image_alt(&mut self, event: Event<'_>) {
        let Some(image) = self.image.as_mut() else {
            return;
        };
        match event {
            Event::Text(text) | Event::Code(text) => image.alt.push_str(&text),
            Event::SoftBreak | Event::HardBreak => image.alt.push(' '),
            Event::Start(Tag::Image { .. }) => image.depth += 1,
            Event::End(TagEnd::Image) if image.depth > 0 => image.depth -= 1,
            Event::End(TagEnd::Image) => self.finish_image(),
            _ => {}
        }
    }

    fn finish_image(&mut self) {
        if let Some(image) = self.image.take() {
            if let Some(img) = self.tree.element_mut(image.node) {
                img.set("alt", image.alt);
            }
        }
    }

    fn start(&mut self, tag: Tag<'_>) -> Result<(), ParseError> {
        match tag {
            Tag::Paragraph => {
                self.open(Element::new("p"))?;
            }
            Tag::Heading { level, .. } => {
                let tag = ElementTag::heading(level as u8).unwrap_or(ElementTag::H6);
                self.open(Element::new(tag))?;
            }
            Tag::BlockQuote(_) => {
                self.open(Element::new("blockquote"))?;
            }
            Tag::CodeBlock(kind) => {
                let pre = self.append(Element::new("pre"))?;
                let mut code = Element::new("code");
                if let CodeBlockKind::Fenced(lang) = kind {
                    if !lang.is_empty() {
                        code.set("class", format!("language-{lang}"));
                    }
                }
                let code = self.tree.append(pre, code)?;
                self.stack.push(Frame {
                    container: code,
                    skip: false,
                    raw: true,
                });
            }
            Tag::List(Some(start)) => {
                let mut ol = Element::new("ol");
                if start != 1 {
                    ol.set("start", start.to_string());
                }
                self.open(ol)?;
            }
            Tag::List(None) => {
                self.open(Element::new("ul"))?;
            }
            Tag::Item => {
                self.open(Element::new("li"))?;
            }
            Tag::FootnoteDefinition(label) => {
                self.open(Element::new("div").with_attr("id", format!("fn:{label}")))?;
            }
            Tag::Emphasis => {
                self.open(Element::new("em"))?;
            }
            Tag::Strong => {
                self.open(Element::new("strong"))?;
            }
            Tag::Strikethrough => {
                self.open(Element::new("del"))?;
            }
            Tag::Link {
                dest_url, title, ..
            } => {
                let mut a = Element::new("a").with_attr("href", &*dest_url);
                if !title.is_empty() {
                    a.set("title", &*title);
                }
                self.open(a)?;
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                let mut img = Element::new("img").with_attr("src", &*dest_url);
                if !title.is_empty() {
                    img.set("title", &*title);
                }
                let node = self.append(img)?;
                self.image = Some(ImageState {
                    node,
                    alt: String::new(),
                    depth: 0,
                });
            }
            Tag::Table(alignments) => {
                let table = self.open(Element::new("table"))?;
                self.table = Some(TableState {
                    table,
                    tbody: None,
                    alignments,
                    column: 0,
                    in_head: false,
                });
            }
            Tag::TableHead => {
                let thead = self.append(Element::new("thead"))?;
                let tr = self.tree.append(thead, Element::new("tr"))?;
                if let Some(table) = self.table.as_mut() {
                    table.in_head = true;
                    table.column = 0;
                }
                self.push_frame(tr);
            }
            Tag::TableRow => {
                let tbody = self.tbody()?;
                let tr = self.tree.append(tbody, Element::new("tr"))?;
                if let Some(table) = self.table.as_mut() {
                    table.column = 0;
                }
                self.push_frame(tr);
            }
            Tag::TableCell => {
                let (name, align) = match self.table.as_mut() {
                    Some(table) => {
                        let align = table.alignments.get(table.column).copied();
                        table.column += 1;
                        (if table.in_head { "th" } else { "td" }, align)
                    }
                    None => ("td", None),
                };
                let mut cell = Element::new(name);
                if let Some(side) = align.and_then(alignment_name) {
                    cell.set("style", format!("text-align: {side};"));
                }
                self.open(cell)?;
            }
            Tag::HtmlBlock | Tag::MetadataBlock(_) => {
                let container = self.frame().container;
                self.stack.push(Frame {
                    container,
                    skip: true,
                    raw: false,
                });
            }
            // Anything else is transparent: its content flows into the parent
            _ => {
                let frame = self.frame();
                self.stack.push(frame);
            }
        }
        Ok(())
    }

    fn end(&mut self, tag: TagEnd) -> Result<(), ParseError> {
        self.stack.pop();
        match tag {
            TagEnd::TableHead => {
                if let Some(table) = self.table.as_mut() {
                    table.in_head = false;
                }
            }
            TagEnd::Table => {
                if let Some(table) = self.table.take() {
                    if table.tbody.is_none() {
                        self.empty_body(&table)?;
                    }
                    let parent = self.tree.parent(table.table).unwrap_or(self.tree.root());
                    tracing::debug!("Table block complete, running block hooks");
                    self.hook.table_built(&mut self.tree, parent);
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// A header-only table still gets a body: one row of empty cells
    fn empty_body(&mut self, table: &TableState) -> Result<(), ParseError> {
        let tbody = self.tree.append(table.table, Element::new("tbody"))?;
        let tr = self.tree.append(tbody, Element::new("tr"))?;
        for _ in 0..table.alignments.len() {
            self.tree.append(tr, Element::new("td"))?;
        }
        Ok(())
    }

    /// Body row group, created on the first body row
    fn tbody(&mut self) -> Result<NodeId, ParseError> {
        let Some(table) = self.table.as_mut() else {
            return Ok(self.frame().container);
        };
        if let Some(tbody) = table.tbody {
            return Ok(tbody);
        }
        let tbody = self.tree.append(table.table, Element::new("tbody"))?;
        table.tbody = Some(tbody);
        Ok(tbody)
    }

    fn push_frame(&mut self, container: NodeId) {
        self.stack.push(Frame {
            container,
            skip: false,
            raw: false,
        });
    }

    /// Append `element` to the current container and make it current
    fn open(&mut self, element: Element) -> Result<NodeId, ParseError> {
        let id = self.append(element)?;
        self.push_frame(id);
        Ok(id)
    }

    /// Append `element` to the current container
    fn append(&mut self, element: Element) -> Result<NodeId, ParseError> {
        let parent = self.frame().container;
        Ok(self.tree.append(parent, element)?)
    }

    /// Move buffered text into the tree
    fn flush(&mut self) -> Result<(), ParseError> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let text = std::mem::take(&mut self.pending);
        let frame = self.frame();

        if !self.deletion || frame.raw {
            self.append_text(frame.container, &text);
            return Ok(());
        }
        for segment in deletion::split(&text) {
            match segment {
                Segment::Text(run) => self.append_text(frame.container, run),
                Segment::Deleted(run) => {
                    self.tree
                        .append(frame.container, Element::new("del").with_text(run))?;
                }
            }
        }
        Ok(())
    }

    fn append_text(&mut self, container: NodeId, run: &str) {
        let target = self
            .tree
            .get(container)
            .map(|n| n.last_child)
            .filter(|last| last.is_valid());
        let slot = match target {
            Some(last) => self.tree.element_mut(last).map(|e| &mut e.tail),
            None => self.tree.element_mut(container).map(|e| &mut e.text),
        };
        if let Some(slot) = slot {
            slot.get_or_insert_with(String::new).push_str(run);
        }
    }

    pub(crate) fn finish(mut self) -> Result<DomTree, ParseError> {
        self.flush()?;
        let root = self.tree.root();
        let leads_with_title = self
            .tree
            .children(root)
            .next()
            .and_then(|first| self.tree.element(first))
            .map(|first| first.tag == ElementTag::H1);
        // A blank root text marks a document whose first block is not a title
        if leads_with_title == Some(false) {
            if let Some(root) = self.tree.element_mut(root) {
                root.text.get_or_insert_with(|| "\n".to_string());
            }
        }
        Ok(self.tree)
    }
}

fn alignment_name(align: Alignment) -> Option<&'static str> {
    match align {
        Alignment::None => None,
        Alignment::Left => Some("left"),
        Alignment::Center => Some("center"),
        Alignment::Right => Some("right"),
    }
}
