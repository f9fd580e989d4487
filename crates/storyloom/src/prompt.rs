//! Prompt Builder
//!
//! Fixed Handlebars templates, one per flow, rendered from the validated
//! request fields. The generation service is instructed, not programmed, so
//! every template spells out each output field it expects back.
//!
//! Rendering runs in strict mode (an unknown placeholder is an error) and
//! without HTML escaping, since the output is a plain-text instruction.

use handlebars::Handlebars;
use serde_json::Value;

use crate::domain::errors::GenerationError;
use crate::schema::Schema;

/// A named, versioned instruction template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    pub name: &'static str,
    pub source: &'static str,
}

impl PromptTemplate {
    pub const fn new(name: &'static str, source: &'static str) -> Self {
        Self { name, source }
    }

    /// Substitute `data` into the template
    pub fn render(&self, data: &Value) -> Result<String, GenerationError> {
        let mut engine = Handlebars::new();
        engine.set_strict_mode(true);
        engine.register_escape_fn(handlebars::no_escape);

        engine
            .render_template(self.source, data)
            .map_err(|e| GenerationError::Template {
                name: self.name.to_string(),
                message: e.to_string(),
            })
    }

    /// Placeholder names referenced by the template, in first-use order
    pub fn placeholders(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Vec::new();
        let mut rest = self.source;

        while let Some(start) = rest.find("{{") {
            let after = &rest[start + 2..];
            let Some(end) = after.find("}}") else {
                break;
            };
            let name = after[..end].trim_matches(|c: char| c == '{' || c == '}').trim();
            let is_helper = name.starts_with(['#', '/', '!', '>']) || name == "else";
            if !name.is_empty() && !is_helper && !names.contains(&name) {
                names.push(name);
            }
            rest = after[end + 2..].trim_start_matches('}');
        }

        names
    }

    /// Placeholders that `schema` has no field for (empty when satisfiable)
    pub fn unsatisfied_by(&self, schema: &Schema) -> Vec<&'static str> {
        self.placeholders()
            .into_iter()
            .filter(|name| schema.field(name).is_none())
            .collect()
    }
}

/// Idea generation: Chinese idea, English translation, outline in the requested language
pub const STORY_IDEAS: PromptTemplate = PromptTemplate::new(
    "story_ideas.v1",
    r#"You are an expert in children's stories, familiar with folk tales from around the world.
1. Generate a unique children's story idea in Traditional Chinese based on the provided themes and keywords. Return it as "storyIdeaChinese".
2. Translate the story idea you just wrote into English. Return it as "storyIdeaEnglish".
3. Based on the story idea you generated, summarize it into a structured outline in the requested language ({{language}}; "en" means English, "zh" means Traditional Chinese). Return it as "outline" and fill out all of its fields: "characters", "setting", "plot" and "moral".

Themes: {{{themes}}}
Keywords: {{{keywords}}}
"#,
);

/// Outline expansion: Chinese title and story, then English translation
pub const EXPAND_OUTLINE: PromptTemplate = PromptTemplate::new(
    "expand_outline.v1",
    r#"You are a children's story writer.
1. Read the Story Outline below.
2. Generate a creative title for the story in Traditional Chinese. Return it as "title".
3. Expand the outline into a full children's story in Traditional Chinese with vivid descriptions. Return it as "fullStoryChinese".
4. Translate the story you just wrote into English. Return it as "fullStoryEnglish".

Story Outline:
{{{outline}}}
"#,
);

/// Editorial feedback on a draft
pub const STORY_FEEDBACK: PromptTemplate = PromptTemplate::new(
    "story_feedback.v1",
    r#"You are an expert editor specializing in children's literature.
Review the following story draft and provide constructive feedback. Focus on:
1.  **Clarity and Simplicity**: Is the language easy for a child to understand?
2.  **Engagement**: Is the plot interesting? Is the pacing good?
3.  **Character**: Are the characters relatable and consistent?
4.  **Moral/Theme**: Is the message clear and positive?
5.  **Show, Don't Tell**: Does the author describe actions and feelings instead of just stating them?

Provide specific examples from the text to support your points and offer actionable suggestions for improvement.
Return the complete review as "feedback".

Story Draft:
{{{storyDraft}}}
"#,
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_placeholders_handle_triple_stash() {
        assert_eq!(STORY_IDEAS.placeholders(), vec!["language", "themes", "keywords"]);
        assert_eq!(EXPAND_OUTLINE.placeholders(), vec!["outline"]);
        assert_eq!(STORY_FEEDBACK.placeholders(), vec!["storyDraft"]);
    }

    #[test]
    fn test_render_substitutes_without_escaping() {
        let rendered = EXPAND_OUTLINE
            .render(&json!({"outline": "Characters: Leo & <Mia>\nSetting: forest"}))
            .unwrap();
        assert!(rendered.contains("Characters: Leo & <Mia>\nSetting: forest"));
        assert!(!rendered.contains("{{"));
    }

    #[test]
    fn test_render_fails_on_missing_field() {
        let err = STORY_IDEAS.render(&json!({"themes": "friendship"})).unwrap_err();
        assert!(matches!(err, GenerationError::Template { ref name, .. } if name == "story_ideas.v1"));
    }

    #[test]
    fn test_unsatisfied_placeholders() {
        let schema = Schema::new().text("themes", "Themes");
        assert_eq!(STORY_IDEAS.unsatisfied_by(&schema), vec!["language", "keywords"]);
    }

    #[test]
    fn test_templates_enumerate_output_fields() {
        for field in ["storyIdeaChinese", "storyIdeaEnglish", "characters", "setting", "plot", "moral"] {
            assert!(STORY_IDEAS.source.contains(field), "missing {}", field);
        }
        for field in ["title", "fullStoryChinese", "fullStoryEnglish"] {
            assert!(EXPAND_OUTLINE.source.contains(field), "missing {}", field);
        }
        assert!(STORY_FEEDBACK.source.contains("\"feedback\""));
    }
}
