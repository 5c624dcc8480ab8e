//! Tagged screenplay format.
//!
//! Prose converted by the text model comes back as a sequence of elements
//! wrapped in lightweight tags, one element per line:
//!
//! ```text
//! <heading>INT. VAN - DAY</heading>
//! <character>ADEJO</character>
//! <parenthesis>(voiceover)</parenthesis>
//! <dialogue>I still wasn't quite sure...</dialogue>
//! ```
//!
//! [`parse_tagged`] turns that text into typed [`ScreenplayElement`]s.
//! Unknown tags, mismatched open/close pairs and untagged text are skipped.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// The tag vocabulary understood by the converter and the critic prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScreenplayTag {
    Heading,
    SubHeading,
    Action,
    Character,
    Parenthesis,
    Dialogue,
    Shot,
}

impl ScreenplayTag {
    pub const ALL: [ScreenplayTag; 7] = [
        ScreenplayTag::Heading,
        ScreenplayTag::SubHeading,
        ScreenplayTag::Action,
        ScreenplayTag::Character,
        ScreenplayTag::Parenthesis,
        ScreenplayTag::Dialogue,
        ScreenplayTag::Shot,
    ];

    /// Tag name as it appears between angle brackets.
    pub fn as_str(self) -> &'static str {
        match self {
            ScreenplayTag::Heading => "heading",
            ScreenplayTag::SubHeading => "sub-heading",
            ScreenplayTag::Action => "action",
            ScreenplayTag::Character => "character",
            ScreenplayTag::Parenthesis => "parenthesis",
            ScreenplayTag::Dialogue => "dialogue",
            ScreenplayTag::Shot => "shot",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    /// Human-readable description used when prompting the model.
    pub fn description(self) -> &'static str {
        match self {
            ScreenplayTag::Heading => "scene heading",
            ScreenplayTag::SubHeading => "scene subheading",
            ScreenplayTag::Action => "action descriptions",
            ScreenplayTag::Character => "character names",
            ScreenplayTag::Parenthesis => "parentheticals (like voiceovers, actions)",
            ScreenplayTag::Dialogue => "dialogue",
            ScreenplayTag::Shot => "shot",
        }
    }
}

/// One tagged element of a screenplay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenplayElement {
    pub tag: ScreenplayTag,
    pub text: String,
}

// The body may span lines but never contains `<`, so an unclosed tag cannot
// pair with a later element's closing tag.
static ELEMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<([a-z][a-z-]*)>([^<]*)</([a-z][a-z-]*)>").expect("static regex is valid")
});

/// Parse tagged screenplay text into its elements, in document order.
///
/// Element text is trimmed; elements whose text is empty after trimming are
/// dropped.
pub fn parse_tagged(text: &str) -> Vec<ScreenplayElement> {
    ELEMENT_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let open = caps.get(1)?.as_str();
            let close = caps.get(3)?.as_str();
            if open != close {
                return None;
            }
            let tag = ScreenplayTag::from_name(open)?;
            let body = caps.get(2)?.as_str().trim();
            if body.is_empty() {
                return None;
            }
            Some(ScreenplayElement {
                tag,
                text: body.to_string(),
            })
        })
        .collect()
}

/// Names of the characters with at least one line of dialogue, in order of
/// first appearance.
pub fn speaking_characters(elements: &[ScreenplayElement]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let mut pending: Option<&str> = None;
    for element in elements {
        match element.tag {
            ScreenplayTag::Character => pending = Some(element.text.as_str()),
            ScreenplayTag::Dialogue => {
                if let Some(name) = pending.take() {
                    if !names.iter().any(|n| n == name) {
                        names.push(name.to_string());
                    }
                }
            }
            ScreenplayTag::Parenthesis => {}
            _ => pending = None,
        }
    }
    names
}
