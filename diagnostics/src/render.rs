use crate::Diagnostic;
use crate::FileId;
use crate::Label;
use std::fmt::Write;

/// Provides access to source text for rendering diagnostics.
pub trait SourceProvider {
  fn file_name(&self, file: FileId) -> Option<&str>;
  fn file_text(&self, file: FileId) -> Option<&str>;
}

/// Render a diagnostic into a human-readable string with caret highlighting.
///
/// The primary span is rendered first (with `^` markers), followed by
/// secondary labels (with `-` markers) in insertion order, then notes.
pub fn render_diagnostic(provider: &dyn SourceProvider, diagnostic: &Diagnostic) -> String {
  let mut output = String::new();
  writeln!(
    output,
    "{}[{}]: {}",
    diagnostic.severity, diagnostic.code, diagnostic.message
  )
  .unwrap();

  let mut labels = Vec::with_capacity(diagnostic.labels.len() + 1);
  labels.push(Label::primary(diagnostic.primary, diagnostic.message.clone()));
  labels.extend(diagnostic.labels.iter().cloned());

  let gutter_width = labels
    .iter()
    .filter_map(|label| {
      let text = provider.file_text(label.span.file)?;
      let cache = LineCache::new(text);
      Some(cache.line_of(label.span.range.end as usize) + 1)
    })
    .max()
    .unwrap_or(1)
    .to_string()
    .len();

  let mut current_file: Option<FileId> = None;
  for label in &labels {
    let name = provider
      .file_name(label.span.file)
      .unwrap_or("<unknown file>");
    let Some(text) = provider.file_text(label.span.file) else {
      writeln!(output, " --> {}:?:?", name).unwrap();
      writeln!(output, "{:>w$} | (source unavailable)", "", w = gutter_width).unwrap();
      continue;
    };
    let cache = LineCache::new(text);
    if current_file != Some(label.span.file) {
      let (line, col) = cache.line_and_column(label.span.range.start as usize);
      let arrow = if current_file.is_none() { "-->" } else { ":::" };
      writeln!(output, " {} {}:{}:{}", arrow, name, line + 1, col + 1).unwrap();
      writeln!(output, "{:>w$} |", "", w = gutter_width).unwrap();
      current_file = Some(label.span.file);
    }
    render_label(&cache, label, gutter_width, &mut output);
  }

  for note in &diagnostic.notes {
    writeln!(output, "= note: {}", note).unwrap();
  }
  output
}

fn render_label(cache: &LineCache<'_>, label: &Label, gutter_width: usize, output: &mut String) {
  let (first_line, first_col) = cache.line_and_column(label.span.range.start as usize);
  let (last_line, last_col) = cache.line_and_column(label.span.range.end as usize);
  let marker = if label.is_primary { '^' } else { '-' };

  for line in first_line..=last_line.max(first_line) {
    let content = cache.line_text(line);
    let line_len = content.chars().count();
    let start = if line == first_line { first_col } else { 0 };
    let end = if line == last_line { last_col } else { line_len };
    let len = end.saturating_sub(start).max(1);

    writeln!(output, "{:>w$} | {}", line + 1, content, w = gutter_width).unwrap();
    write!(
      output,
      "{:>w$} | {}{}",
      "",
      " ".repeat(start),
      marker.to_string().repeat(len),
      w = gutter_width
    )
    .unwrap();
    if line == first_line && !label.message.is_empty() {
      write!(output, " {}", label.message).unwrap();
    }
    output.push('\n');
  }
}

struct LineCache<'a> {
  text: &'a str,
  starts: Vec<usize>,
}

impl<'a> LineCache<'a> {
  fn new(text: &'a str) -> Self {
    let mut starts = vec![0];
    starts.extend(
      text
        .bytes()
        .enumerate()
        .filter(|(_, b)| *b == b'\n')
        .map(|(i, _)| i + 1),
    );
    Self { text, starts }
  }

  fn clamp(&self, offset: usize) -> usize {
    let mut offset = offset.min(self.text.len());
    while !self.text.is_char_boundary(offset) {
      offset -= 1;
    }
    offset
  }

  fn line_of(&self, offset: usize) -> usize {
    let offset = self.clamp(offset);
    self.starts.partition_point(|&start| start <= offset) - 1
  }

  /// Zero-based line and character column.
  fn line_and_column(&self, offset: usize) -> (usize, usize) {
    let offset = self.clamp(offset);
    let line = self.line_of(offset);
    let col = self.text[self.starts[line]..offset].chars().count();
    (line, col)
  }

  fn line_text(&self, line: usize) -> &'a str {
    let start = self.starts[line];
    let end = self
      .starts
      .get(line + 1)
      .map(|next| next - 1)
      .unwrap_or(self.text.len());
    self.text[start..end].trim_end_matches('\r')
  }
}
