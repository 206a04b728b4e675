/*!
 * Tests for test-script block extraction
 */

use narravid::script::{extract_blocks};
use crate::common;

/// Test basic block extraction from a well-formed script
#[test]
fn test_extract_blocks_withTwoBlocks_shouldReturnBoth() {
    let blocks = extract_blocks(common::TEST_SCRIPT);

    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].label, "should log in");
    assert_eq!(blocks[1].label, "should add a patient");
    assert!(blocks[0].body.contains("cy.visit('/login')"));
    assert!(blocks[1].body.contains("cy.wait(500)"));
}

/// Test that nested braces inside a block do not terminate it early
#[test]
fn test_extract_blocks_withNestedBraces_shouldKeepFullBody() {
    let source = r#"it('nested', () => {
        const options = { retry: { count: 3 } };
        cy.visit('/home');
    });"#;

    let blocks = extract_blocks(source);

    assert_eq!(blocks.len(), 1);
    // The object literal and everything after it stays inside the body
    assert!(blocks[0].body.contains("{ retry: { count: 3 } }"));
    assert!(blocks[0].body.contains("cy.visit('/home')"));
}

/// Test that a block with no matching closing brace is discarded
#[test]
fn test_extract_blocks_withUnterminatedBlock_shouldDiscardIt() {
    let source = r#"it('first', () => {
        cy.visit('/a');
    });
    it('broken', () => {
        cy.visit('/b');
    "#;

    let blocks = extract_blocks(source);

    // The balanced block survives, the unterminated one is dropped
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].label, "first");
}

/// Test that an unterminated block followed by another block is discarded
/// instead of swallowing that block's text
#[test]
fn test_extract_blocks_withUnterminatedBlockBeforeAnother_shouldDiscardOnlyBrokenBlock() {
    let source = r#"it('broken', () => {
        // Fill in login form
        cy.visit('/a');
    it('second', () => {
        cy.visit('/b');
    });"#;

    let blocks = extract_blocks(source);

    // The broken block's scan stops at the next introducer, so only the
    // balanced block survives and keeps its own body
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].label, "second");
    assert!(blocks[0].body.contains("cy.visit('/b')"));
    assert!(!blocks[0].body.contains("cy.visit('/a')"));
}

/// Test that double-quoted labels are recognized as well
#[test]
fn test_extract_blocks_withDoubleQuotedLabel_shouldMatch() {
    let source = r#"it("double quoted", () => { cy.visit('/'); });"#;

    let blocks = extract_blocks(source);

    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].label, "double quoted");
}

/// Test extraction on a source with no test blocks at all
#[test]
fn test_extract_blocks_withNoBlocks_shouldReturnEmpty() {
    let source = "const x = 1;\nfunction helper() { return x; }\n";

    let blocks = extract_blocks(source);

    assert!(blocks.is_empty());
}

/// Test that an empty block body is still extracted
#[test]
fn test_extract_blocks_withEmptyBody_shouldReturnBlockWithEmptyBody() {
    let source = "it('empty', () => {});";

    let blocks = extract_blocks(source);

    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].label, "empty");
    assert!(blocks[0].body.trim().is_empty());
}
