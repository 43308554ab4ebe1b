//! Packing evidence rows into a size-bounded prompt context.

use menubot_core::types::EvidenceRow;

pub const DEFAULT_MAX_CHARS: usize = 4500;

/// Concatenate rows as tagged blocks in their given order, stopping at
/// a block boundary once the next block would exceed the budget. Every
/// included block is complete and attributable; the result never
/// exceeds `max_chars`.
pub fn assemble(rows: &[EvidenceRow], max_chars: usize) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut total = 0usize;
    for row in rows {
        let block = format!(
            "[Fonte: {} | chunk {}]\n{}\n",
            row.document_id,
            row.chunk_id,
            row.text.trim()
        );
        // Account for the joining newline too, so the budget holds.
        let cost = block.len() + usize::from(!parts.is_empty());
        if total + cost > max_chars {
            break;
        }
        total += cost;
        parts.push(block);
    }
    parts.join("\n")
}
