//! StoryOutline - Structured summary of a story idea
//!
//! Produced by the idea flow, consumed by outline expansion and
//! stored as metadata next to saved stories.

use serde::{Deserialize, Serialize};

/// Outline of a children's story
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryOutline {
    /// Main characters
    pub characters: String,
    /// Where the story takes place
    pub setting: String,
    /// Main plot, problem or goal
    pub plot: String,
    /// Moral or ending
    pub moral: String,
}

impl StoryOutline {
    pub fn new(
        characters: impl Into<String>,
        setting: impl Into<String>,
        plot: impl Into<String>,
        moral: impl Into<String>,
    ) -> Self {
        Self {
            characters: characters.into(),
            setting: setting.into(),
            plot: plot.into(),
            moral: moral.into(),
        }
    }

    /// True when every field has non-blank text
    pub fn is_complete(&self) -> bool {
        [&self.characters, &self.setting, &self.plot, &self.moral]
            .iter()
            .all(|field| !field.trim().is_empty())
    }

    /// Render as the labelled block the expansion flow takes as input
    pub fn to_prompt_text(&self) -> String {
        format!(
            "Characters: {}\nSetting: {}\nPlot: {}\nMoral: {}",
            self.characters, self.setting, self.plot, self.moral
        )
    }
}
