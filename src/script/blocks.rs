use log::{warn, debug};
use once_cell::sync::Lazy;
use regex::Regex;

// @module: Balanced-delimiter block extraction

// @const: Block introducer regex, label in capture group 1
static BLOCK_INTRODUCER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"it\(['"]([^'"]+)['"],\s*\(\)\s*=>\s*\{"#).unwrap()
});

// @struct: Named, balanced span of test source
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    // @field: Test case label
    pub label: String,

    // @field: Body text between the matching braces
    pub body: String,
}

/// Extract all test blocks from raw source.
///
/// For each introducer (`it('<label>', () => {`) the body runs to the brace
/// that balances the opener, not to the next `}` in the text. This keeps
/// helper calls, arrow functions and object literals inside a block from
/// terminating it early. The scan for the balancing brace stops at the next
/// introducer (or end of input): a block whose opener is never balanced
/// within that window is discarded with a diagnostic instead of swallowing
/// the following block, and the remaining blocks are still returned.
pub fn extract_blocks(source: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let introducers: Vec<_> = BLOCK_INTRODUCER_REGEX.captures_iter(source).collect();

    for (index, captures) in introducers.iter().enumerate() {
        let whole = captures.get(0).unwrap();
        let label = captures.get(1).map_or("", |m| m.as_str());
        let body_start = whole.end();

        // The body may not run past the next block's introducer
        let window_end = introducers.get(index + 1)
            .and_then(|next| next.get(0))
            .map_or(source.len(), |m| m.start());

        match balanced_body(&source[body_start..window_end]) {
            Some(body) => {
                debug!("Extracted block '{}' ({} chars)", label, body.len());
                blocks.push(Block {
                    label: label.to_string(),
                    body: body.to_string(),
                });
            }
            None => {
                warn!("Discarding block '{}': no matching closing brace found", label);
            }
        }
    }

    if blocks.is_empty() {
        warn!("No test blocks found in source");
    }

    blocks
}

/// Scan forward from just after an opening brace (depth 1) and return the
/// span up to the brace that returns the depth to zero.
fn balanced_body(rest: &str) -> Option<&str> {
    let mut depth: usize = 1;

    for (index, character) in rest.char_indices() {
        match character {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&rest[..index]);
                }
            }
            _ => {}
        }
    }

    None
}
