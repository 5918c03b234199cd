//! Visibility predicate — is an element perceptible to a user?

use crate::engine::dom::ElementFacts;

/// Classify whether captured facts describe a perceptible element.
///
/// Rules, in order: unresolved style fails closed; `visibility: hidden`
/// and `display: none` are invisible; otherwise the rendered box must
/// have strictly positive width and height.
pub fn is_visible(facts: &ElementFacts) -> bool {
    let Some(style) = &facts.style else {
        return false;
    };
    if style.visibility == "hidden" {
        return false;
    }
    if style.display == "none" {
        return false;
    }
    facts.rect.width > 0.0 && facts.rect.height > 0.0
}
