use std::io::{self, Write};

use super::{SPEC, Style};
use crate::fields::quote;
use crate::map::RangeMap;
use crate::structure::StructuralEntry;
use crate::{entry, meta, structure};

const INDENT: &str = "  ";

/// Renders one block, tracking which declaration spans are open.
struct Printer<'a> {
	out: String,
	style: Style,
	depth: usize,
	open: Vec<&'a StructuralEntry>,
}

impl<'a> Printer<'a> {
	fn new(style: Style) -> Self {
		Self {
			out: String::new(),
			style,
			depth: 0,
			open: Vec::new(),
		}
	}

	fn indent(&mut self) {
		if self.style == Style::Pretty {
			for _ in 0..self.depth {
				self.out.push_str(INDENT);
			}
		}
	}

	fn record<S: AsRef<str>>(&mut self, head: &str, fields: impl IntoIterator<Item = S>) {
		self.indent();
		self.out.push_str(head);
		for field in fields {
			self.out.push(' ');
			self.out.push_str(&quote(field.as_ref()));
		}
		self.out.push('\n');
	}

	/// Line breaks in `text` are escaped so the comment stays on one line.
	fn comment(&mut self, text: &str) {
		if self.style == Style::Pretty {
			self.indent();
			self.out.push_str("# ");
			for ch in text.chars() {
				match ch {
					'\n' => self.out.push_str("\\n"),
					'\r' => self.out.push_str("\\r"),
					c => self.out.push(c),
				}
			}
			self.out.push('\n');
		}
	}

	fn open_span(&mut self, span: &'a StructuralEntry) {
		self.record(&span.kind.token(), structure::write(span));
		self.comment(&format!("Start {span}"));
		self.open.push(span);
		self.depth += 1;
	}

	/// Closes every open span that ends at or before `pos`.
	fn close_until(&mut self, pos: u32) {
		while let Some(&top) = self.open.last()
			&& top.end() <= pos
		{
			self.open.pop();
			self.depth -= 1;
			self.comment(&format!("End {}", top.kind.label()));
		}
	}

	fn close_all(&mut self) {
		while let Some(top) = self.open.pop() {
			self.depth -= 1;
			self.comment(&format!("End {}", top.kind.label()));
		}
	}

	fn map(&mut self, map: &'a RangeMap) {
		self.record("start", [SPEC.to_string().as_str(), map.filename(), map.hash()]);

		if !map.meta().is_empty() {
			self.comment("Start Meta");
			self.depth += 1;
			for entry in map.meta() {
				let ty: &'static str = entry.ty().into();
				self.record("meta", std::iter::once(ty.to_string()).chain(meta::write(entry)));
			}
			self.depth -= 1;
			self.comment("End Meta");
		}

		let mut spans = map.structures().iter().peekable();
		for entry in map.entries() {
			while let Some(span) = spans.next_if(|s| s.start <= entry.start) {
				self.close_until(span.start);
				self.open_span(span);
			}
			self.close_until(entry.start);
			self.record(&entry.ty().to_string(), entry::write(entry));
		}
		for span in spans {
			self.close_until(span.start);
			self.open_span(span);
		}
		self.close_all();

		self.record::<&str>("end", []);
	}
}

impl RangeMap {
	/// Renders this map as a single index block.
	pub fn to_text(&self, style: Style) -> String {
		let mut printer = Printer::new(style);
		printer.map(self);
		printer.out
	}

	/// Writes this map as a single index block.
	pub fn write(&self, mut out: impl Write, style: Style) -> io::Result<()> {
		out.write_all(self.to_text(style).as_bytes())
	}
}

/// Writes every map in order as consecutive blocks.
pub fn write_all<'a>(maps: impl IntoIterator<Item = &'a RangeMap>, mut out: impl Write, style: Style) -> io::Result<()> {
	for map in maps {
		map.write(&mut out, style)?;
	}
	out.flush()
}
