//! Document rendering via template substitution.
//!
//! The template is a TeX file using `{expname}`, `{listno}` and `{items}`
//! placeholders, with `{{`/`}}` escaping literal braces (the format the
//! existing experiment templates are written in). The per-stimulus markup
//! and the rating-scale line are fixed here; everything around them is the
//! template's concern.

use crate::assign::ListEntry;
use crate::error::{Error, Result};

/// Arabic-Indic numerals for the rating-scale line, points 1 through 9.
const SCALE_NUMERALS: [char; 9] = ['١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'];

/// Per-list values available to the template.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub ex_name: &'a str,
    pub list_no: u32,
}

/// Render one list's document from its presentation sequence.
pub fn render_document(
    template: &str,
    ctx: &RenderContext<'_>,
    sequence: &[ListEntry],
    scale_points: u32,
) -> Result<String> {
    let items = items_block(sequence, scale_points);
    let listno = ctx.list_no.to_string();
    let context = [
        ("expname", ctx.ex_name),
        ("listno", listno.as_str()),
        ("items", items.as_str()),
    ];
    substitute(template, &context)
}

/// Concatenated markup for every stimulus in presentation order.
fn items_block(sequence: &[ListEntry], scale_points: u32) -> String {
    let scale = scale_block(scale_points);
    let mut block = String::new();
    for entry in sequence {
        block.push_str(&stimulus_fragment(&entry.text));
        block.push_str(&scale);
    }
    block
}

/// Right-flushed Arabic text block for one stimulus.
fn stimulus_fragment(text: &str) -> String {
    format!("\\begin{{flushright}}\n\\textarabic{{{text}}}\n\\end{{flushright}}\n\n")
}

/// Centered rating-scale line, numerals descending (right-to-left reading
/// order).
fn scale_block(points: u32) -> String {
    let numerals: String = (1..=points)
        .rev()
        .map(|point| {
            // Config validation bounds scale_points to 1..=9.
            let numeral = SCALE_NUMERALS[(point - 1) as usize];
            format!("\\hfill\\textarabic{{{numeral}}}")
        })
        .collect();
    format!("\\begin{{center}}\n{numerals}\n\\end{{center}}\n\n\\vspace{{0.5\\baselineskip}}\n\n")
}

/// Substitute `{name}` placeholders from `context`, honoring `{{`/`}}`
/// escapes. Unknown placeholders and unbalanced braces are errors rather
/// than silent passthrough, so a typo in a template surfaces immediately.
pub fn substitute(template: &str, context: &[(&str, &str)]) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        match ch {
            '{' => {
                if matches!(chars.peek(), Some((_, '{'))) {
                    chars.next();
                    out.push('{');
                    continue;
                }
                let mut end = None;
                for (inner, inner_ch) in chars.by_ref() {
                    match inner_ch {
                        '}' => {
                            end = Some(inner);
                            break;
                        }
                        '{' => break,
                        _ => {}
                    }
                }
                let Some(end) = end else {
                    return Err(Error::StrayBrace { offset });
                };
                let name = &template[offset + ch.len_utf8()..end];
                let value = context
                    .iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| *value)
                    .ok_or_else(|| Error::UnknownPlaceholder {
                        name: name.to_string(),
                    })?;
                out.push_str(value);
            }
            '}' => {
                if matches!(chars.peek(), Some((_, '}'))) {
                    chars.next();
                    out.push('}');
                } else {
                    return Err(Error::StrayBrace { offset });
                }
            }
            _ => out.push(ch),
        }
    }
    Ok(out)
}
