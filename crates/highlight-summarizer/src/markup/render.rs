use super::inline::format_inline;
use super::{Block, ListKind};

/// Render blocks as markup, one block per line group, joined with `\n`.
pub fn render(blocks: &[Block]) -> String {
    blocks.iter().map(render_block).collect::<Vec<_>>().join("\n")
}

fn render_block(block: &Block) -> String {
    match block {
        Block::Heading { level, text } => {
            let tag = format!("h{}", (*level).clamp(1, 3) + 1);
            format!("<{tag}>{}</{tag}>", format_inline(text))
        }
        Block::Paragraph(lines) => {
            let body = lines
                .iter()
                .map(|line| format_inline(line))
                .collect::<Vec<_>>()
                .join("\n");
            format!("<p>{}</p>", body)
        }
        Block::List { kind, items } => {
            let tag = match kind {
                ListKind::Ordered => "ol",
                ListKind::Unordered => "ul",
            };
            let mut out = format!("<{}>\n", tag);
            for item in items {
                out.push_str(&format!("<li>{}</li>\n", format_inline(item)));
            }
            out.push_str(&format!("</{}>", tag));
            out
        }
        Block::Blockquote(text) => format!("<blockquote>{}</blockquote>", format_inline(text)),
    }
}
