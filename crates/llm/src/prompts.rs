//! Prompt builders for the three screenplay tasks.
//!
//! Each builder returns a ready-to-send [`GenerationRequest`]; callers
//! validate the input text before building.

use storyforge_core::rubric::{DEFAULT_CRITERIA, MAX_SCORE};
use storyforge_core::screenplay::ScreenplayTag;

use crate::provider::{ChatMessage, GenerationRequest};

/// Sampling temperature for conversion and scoring.
pub const PRECISE_TEMPERATURE: f32 = 0.1;
/// Sampling temperature for summaries.
pub const SUMMARY_TEMPERATURE: f32 = 0.3;
/// Completion cap for rubric scoring; five short lines fit comfortably.
pub const SCORE_MAX_TOKENS: u32 = 100;
/// Completion cap for prose conversion.
pub const CONVERT_MAX_TOKENS: u32 = 2048;
/// Completion cap for summaries.
pub const SUMMARY_MAX_TOKENS: u32 = 300;

const FEW_SHOT_PROSE: &str = "\
Adejo still wasn't quite sure how his uncle had got caught up with the two wedding guests in the first place.
He had never been to a wedding before and had been excited until his uncle made it clear that they weren't really going to the wedding.
'We're just going to the kitchen, to pick up the bags. We won't even see the wedding. I'm sorry Adejo. You'll hear it though. I can promise you that.'
For a while it seemed that they wouldn't even hear the wedding, let alone see it, because when his uncle parked the van and went to the steel door that led to the kitchen it wouldn't open, no matter how many times his uncle tried pressing different numbers into the pad on the wall.";

const FEW_SHOT_SCREENPLAY: &str = "\
<heading>INT. VAN - DAY</heading>
<sub-heading>INSIDE THE VAN</sub-heading>
<shot>Camera zooms in on Adejo's face.</shot>
<action>Adejo, a young boy, looks confused. His Uncle, a middle-aged man, is at the wheel.</action>
<character>ADEJO</character>
<parenthesis>(voiceover)</parenthesis>
<dialogue>I still wasn't quite sure how my uncle had got caught up with the two wedding guests in the first place.</dialogue>
<action>Adejo's Uncle turns to him, a serious look on his face.</action>
<character>UNCLE</character>
<dialogue>We're just going to the kitchen, to pick up the bags. We won't even see the wedding.</dialogue>
<action>The van pulls up to a steel door. His uncle starts pressing numbers into the keypad, but the door won't open.</action>";

fn convert_system_prompt() -> String {
    let mut prompt = String::from(
        "Format the following text into screenplay format.\n\nUse the following format:\n",
    );
    for tag in ScreenplayTag::ALL {
        prompt.push_str(&format!("- <{}> for {}\n", tag.as_str(), tag.description()));
    }
    prompt.push_str(
        "Ensure each tag has both an opening and a closing tag. \
         Put one element per line and output nothing but tagged elements.",
    );
    prompt
}

fn score_system_prompt() -> String {
    let mut prompt = format!(
        "You are a professional screenwriter and a screenplay critic. \
         Base your response on the following criteria: {}. \
         Rate each criterion out of {MAX_SCORE} in the format:\n",
        DEFAULT_CRITERIA.join(", ")
    );
    for criterion in DEFAULT_CRITERIA {
        prompt.push_str(&format!("{criterion}: [score]\n"));
    }
    prompt.push_str(
        "The screenplay uses custom tags for scene headings, action lines, \
         characters, dialogue and parentheticals. Understand each tag and rate accordingly.",
    );
    prompt
}

/// Prose to tagged screenplay, with one worked example.
pub fn convert_request(prose: &str) -> GenerationRequest {
    GenerationRequest {
        messages: vec![
            ChatMessage::system(convert_system_prompt()),
            ChatMessage::user(FEW_SHOT_PROSE),
            ChatMessage::assistant(FEW_SHOT_SCREENPLAY),
            ChatMessage::user(prose),
        ],
        temperature: PRECISE_TEMPERATURE,
        max_tokens: Some(CONVERT_MAX_TOKENS),
    }
}

/// Screenplay to `Criterion: score` lines.
pub fn score_request(screenplay: &str) -> GenerationRequest {
    GenerationRequest {
        messages: vec![
            ChatMessage::system(score_system_prompt()),
            ChatMessage::user(screenplay),
        ],
        temperature: PRECISE_TEMPERATURE,
        max_tokens: Some(SCORE_MAX_TOKENS),
    }
}

pub fn summarize_request(screenplay: &str) -> GenerationRequest {
    GenerationRequest {
        messages: vec![
            ChatMessage::system(
                "You are a script editor. Summarize the given screenplay in a short \
                 paragraph: who is in it, what happens, and how it ends. \
                 Do not use screenplay tags in the summary.",
            ),
            ChatMessage::user(screenplay),
        ],
        temperature: SUMMARY_TEMPERATURE,
        max_tokens: Some(SUMMARY_MAX_TOKENS),
    }
}

#[cfg(test)]
mod tests {
    use storyforge_core::screenplay::parse_tagged;

    use super::*;
    use crate::provider::Role;

    #[test]
    fn convert_prompt_lists_every_tag() {
        let req = convert_request("Liam stood on the edge of the cliff.");
        let system = &req.messages[0].content;
        for tag in ScreenplayTag::ALL {
            assert!(system.contains(&format!("<{}>", tag.as_str())), "missing {tag:?}");
        }
        assert_eq!(req.temperature, PRECISE_TEMPERATURE);
    }

    #[test]
    fn convert_has_few_shot_then_user_text() {
        let req = convert_request("Liam stood on the edge of the cliff.");
        let roles: Vec<Role> = req.messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, [Role::System, Role::User, Role::Assistant, Role::User]);
        assert_eq!(req.messages[3].content, "Liam stood on the edge of the cliff.");
    }

    #[test]
    fn few_shot_answer_is_well_formed() {
        let elements = parse_tagged(FEW_SHOT_SCREENPLAY);
        assert_eq!(elements.len(), 11);
        assert_eq!(elements[0].tag, ScreenplayTag::Heading);
    }

    #[test]
    fn score_prompt_requests_every_criterion() {
        let req = score_request("<action>x</action>");
        let system = &req.messages[0].content;
        for criterion in DEFAULT_CRITERIA {
            assert!(system.contains(&format!("{criterion}: [score]")));
        }
        assert_eq!(req.max_tokens, Some(SCORE_MAX_TOKENS));
        assert_eq!(req.messages.len(), 2);
    }

    #[test]
    fn summarize_is_warmer() {
        let req = summarize_request("<action>x</action>");
        assert_eq!(req.temperature, SUMMARY_TEMPERATURE);
        assert_eq!(req.messages[1].content, "<action>x</action>");
    }
}
