//! Storyloom CLI - Children's story writing from the terminal
//!
//! Generate ideas, expand outlines into bilingual stories, get editorial
//! feedback, and manage saved stories without opening the web app.

mod api;
mod config;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::{Confirm, Editor, Input, Password};
use std::fs;
use std::path::Path;
use uuid::Uuid;

use api::{SaveFeedbackRequest, SaveStoryRequest, StoryloomClient};
use config::Config;
use storyloom::{Language, StoryOutline};

#[derive(Parser)]
#[command(name = "storyloom")]
#[command(about = "Storyloom CLI - Bilingual children's story writing assistant", long_about = None)]
#[command(version)]
struct Cli {
    /// Show debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Login and store API key
    Login {
        /// API key (will prompt if not provided)
        #[arg(short, long)]
        key: Option<String>,
        /// Server URL
        #[arg(long)]
        url: Option<String>,
    },

    /// Show current configuration
    Config,

    /// Show or set the preferred language (en, zh)
    Language {
        language: Option<String>,
    },

    /// Generate a story idea and outline from themes and keywords
    Idea {
        /// Themes, e.g. "friendship, courage"
        #[arg(short, long)]
        themes: Option<String>,
        /// Keywords, e.g. "dragon, castle"
        #[arg(short, long)]
        keywords: Option<String>,
        /// Outline language (defaults to the configured language)
        #[arg(short, long)]
        language: Option<String>,
        /// Expand the generated outline into a full story
        #[arg(long)]
        expand: bool,
        /// Save the expanded story (implies --expand)
        #[arg(long)]
        save: bool,
    },

    /// Expand an outline into a bilingual story
    Expand {
        /// Outline text
        #[arg(short, long)]
        outline: Option<String>,
        /// Read outline from file
        #[arg(short, long)]
        file: Option<String>,
        #[arg(long)]
        characters: Option<String>,
        #[arg(long)]
        setting: Option<String>,
        #[arg(long)]
        plot: Option<String>,
        #[arg(long)]
        moral: Option<String>,
        /// Save the story after generating
        #[arg(long)]
        save: bool,
    },

    /// Get editorial feedback on a story draft
    Feedback {
        /// Draft text (or use -f for file)
        draft: Option<String>,
        /// Read draft from file
        #[arg(short, long)]
        file: Option<String>,
        /// Save the feedback as a story, titled after this story
        #[arg(long)]
        save: bool,
        /// Title of the reviewed story (used with --save)
        #[arg(long)]
        title: Option<String>,
    },

    /// Saved stories
    Story {
        #[command(subcommand)]
        action: StoryAction,
    },

    /// Story collection
    Collection {
        #[command(subcommand)]
        action: CollectionAction,
    },

    /// Check the server's generation API key
    Check,
}

#[derive(Subcommand)]
enum StoryAction {
    /// List saved stories
    List {
        /// Language filter (defaults to the configured language)
        #[arg(short, long)]
        language: Option<String>,
        /// Show stories in every language
        #[arg(short, long)]
        all: bool,
    },
    /// Show a story
    Show { id: Uuid },
    /// Save a bilingual story from files
    Save {
        #[arg(long)]
        title_zh: String,
        #[arg(long)]
        title_en: String,
        /// File with the Traditional Chinese story
        #[arg(long)]
        zh_file: String,
        /// File with the English story
        #[arg(long)]
        en_file: String,
    },
    /// Delete a story
    Delete {
        id: Uuid,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Copy a story into the collection
    Collect { id: Uuid },
    /// Replace a story's cover image
    Image {
        id: Uuid,
        /// Image file (png, jpg, gif, webp)
        file: String,
    },
}

#[derive(Subcommand)]
enum CollectionAction {
    /// List collected stories
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "storyloom=debug,storyloom_cli=debug".into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Commands::Login { key, url } => cmd_login(key, url).await,
        Commands::Config => cmd_config(),
        Commands::Language { language } => cmd_language(language),
        Commands::Idea {
            themes,
            keywords,
            language,
            expand,
            save,
        } => cmd_idea(themes, keywords, language, expand || save, save).await,
        Commands::Expand {
            outline,
            file,
            characters,
            setting,
            plot,
            moral,
            save,
        } => {
            let parts = StoryOutline::new(
                characters.unwrap_or_default(),
                setting.unwrap_or_default(),
                plot.unwrap_or_default(),
                moral.unwrap_or_default(),
            );
            cmd_expand(outline, file, parts, save).await
        }
        Commands::Feedback {
            draft,
            file,
            save,
            title,
        } => cmd_feedback(draft, file, save, title).await,
        Commands::Story { action } => cmd_story(action).await,
        Commands::Collection { action } => cmd_collection(action).await,
        Commands::Check => cmd_check().await,
    }
}

fn client(config: &Config) -> StoryloomClient {
    StoryloomClient::new(&config.server_url(), config.api_key.as_deref())
}

fn parse_language(value: &str) -> Result<Language> {
    value.parse::<Language>().map_err(anyhow::Error::msg)
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_login(key: Option<String>, url: Option<String>) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(url) = url {
        config.base_url = url;
    }

    let api_key = match key {
        Some(k) => k,
        None => Password::new()
            .with_prompt("API Key")
            .interact()
            .context("Failed to read API key")?,
    };

    let client = StoryloomClient::new(&config.server_url(), Some(&api_key));
    print!("Testing connection... ");

    match client.health().await {
        Ok(true) => println!("{}", "OK".green()),
        _ => {
            println!("{}", "Failed".red());
            bail!("Could not connect to Storyloom API at {}", config.server_url());
        }
    }

    config.set_api_key(api_key);
    config.save()?;

    println!("{} API key saved to {:?}", "✓".green(), Config::config_path()?);

    Ok(())
}

fn cmd_config() -> Result<()> {
    let config = Config::load()?;

    println!("{}", "Configuration:".bold());
    println!("  Path: {:?}", Config::config_path()?);
    println!("  Server URL: {}", config.server_url());
    println!(
        "  API Key: {}",
        if config.api_key.is_some() {
            "Set".green()
        } else {
            "Not set".red()
        }
    );
    println!(
        "  Language: {} ({})",
        config.language.display_name().cyan(),
        config.language
    );

    Ok(())
}

fn cmd_language(language: Option<String>) -> Result<()> {
    let mut config = Config::load()?;

    match language {
        None => println!("{} ({})", config.language.display_name(), config.language),
        Some(value) => {
            config.language = parse_language(&value)?;
            config.save()?;
            println!(
                "{} Language set to {}",
                "✓".green(),
                config.language.display_name().cyan()
            );
        }
    }

    Ok(())
}

async fn cmd_idea(
    themes: Option<String>,
    keywords: Option<String>,
    language: Option<String>,
    expand: bool,
    save: bool,
) -> Result<()> {
    let config = Config::load()?;
    let client = client(&config);

    let language = match language {
        Some(value) => parse_language(&value)?,
        None => config.language,
    };
    let themes = prompt_if_missing(themes, "Themes (e.g. friendship, courage)")?;
    let keywords = prompt_if_missing(keywords, "Keywords (e.g. dragon, castle)")?;

    eprintln!("{}", "Generating story idea...".dimmed());
    let idea = client.story_ideas(&themes, &keywords, language).await?;

    for lang in [language, language.other()] {
        println!("{}", format!("Story Idea ({})", language_label(lang)).bold());
        println!("{}\n", idea.idea_in(lang));
    }
    print_outline(&idea.outline);

    if expand {
        println!();
        let text = idea.outline.to_prompt_text();
        expand_and_show(&client, &text, &idea.outline, language, save).await?;
    }

    Ok(())
}

async fn cmd_expand(
    outline: Option<String>,
    file: Option<String>,
    parts: StoryOutline,
    save: bool,
) -> Result<()> {
    let config = Config::load()?;
    let client = client(&config);

    let text = match (outline, file) {
        (Some(o), None) => Some(o),
        (None, Some(f)) => Some(
            fs::read_to_string(&f).with_context(|| format!("Failed to read file: {}", f))?,
        ),
        (Some(_), Some(_)) => bail!("Cannot specify both --outline and --file"),
        (None, None) => None,
    };

    let (text, outline) = match resolve_outline(text, parts) {
        Some(resolved) => resolved,
        None => free_text_outline(
            Input::new()
                .with_prompt("Story outline")
                .interact_text()
                .context("Failed to read input")?,
        ),
    };

    expand_and_show(&client, &text, &outline, config.language, save).await
}

/// Outline text to expand and the outline stored with the story.
///
/// Free text wins over the per-part flags. Returns `None` when neither was
/// given.
fn resolve_outline(text: Option<String>, parts: StoryOutline) -> Option<(String, StoryOutline)> {
    if let Some(text) = text {
        return Some(free_text_outline(text));
    }
    let has_parts = [&parts.characters, &parts.setting, &parts.plot, &parts.moral]
        .iter()
        .any(|p| !p.trim().is_empty());
    if !has_parts {
        return None;
    }
    if !parts.is_complete() {
        eprintln!(
            "{}",
            "Outline is missing some parts; the story will fill them in.".yellow()
        );
    }
    Some((parts.to_prompt_text(), parts))
}

/// Free text outlines are stored as the plot
fn free_text_outline(text: String) -> (String, StoryOutline) {
    let outline = StoryOutline {
        plot: text.clone(),
        ..Default::default()
    };
    (text, outline)
}

fn language_label(language: Language) -> &'static str {
    match language {
        Language::Zh => "中文",
        Language::En => "English",
    }
}

async fn expand_and_show(
    client: &StoryloomClient,
    outline_text: &str,
    outline: &StoryOutline,
    language: Language,
    save: bool,
) -> Result<()> {
    eprintln!("{}", "Writing story...".dimmed());
    let story = client.expand_outline(outline_text).await?;

    println!("{}\n", story.title.cyan().bold());
    for lang in [language, language.other()] {
        println!("{}", language_label(lang).bold());
        println!("{}\n", story.story_in(lang));
    }

    if save {
        // The expander produces one title; both language versions share it
        let saved = client
            .save_story(&SaveStoryRequest {
                title_zh: &story.title,
                title_en: &story.title,
                content_zh: &story.full_story_chinese,
                content_en: &story.full_story_english,
                outline,
            })
            .await?;
        println!(
            "\n{} Story saved (zh: {}, en: {})",
            "✓".green(),
            saved.zh_id,
            saved.en_id
        );
    }

    Ok(())
}

async fn cmd_feedback(
    draft: Option<String>,
    file: Option<String>,
    save: bool,
    title: Option<String>,
) -> Result<()> {
    let config = Config::load()?;
    let client = client(&config);

    let draft = match (draft, file) {
        (Some(d), None) => d,
        (None, Some(f)) => {
            fs::read_to_string(&f).with_context(|| format!("Failed to read file: {}", f))?
        }
        (Some(_), Some(_)) => bail!("Cannot specify both draft text and --file"),
        (None, None) => Editor::new()
            .edit("")
            .context("Failed to open editor")?
            .context("No draft entered")?,
    };

    eprintln!("{}", "Reviewing draft...".dimmed());
    let result = client.story_feedback(&draft).await?;

    println!("{}", "Feedback".bold());
    println!("{}", result.feedback);

    if save {
        let saved = client
            .save_feedback(&SaveFeedbackRequest {
                original_title: title.as_deref(),
                feedback: &result.feedback,
            })
            .await?;
        println!(
            "\n{} Feedback saved (zh: {}, en: {})",
            "✓".green(),
            saved.zh_id,
            saved.en_id
        );
    }

    Ok(())
}

async fn cmd_story(action: StoryAction) -> Result<()> {
    let config = Config::load()?;
    let client = client(&config);

    match action {
        StoryAction::List { language, all } => {
            let language = match (language, all) {
                (_, true) => None,
                (Some(value), false) => Some(parse_language(&value)?),
                (None, false) => Some(config.language),
            };

            let stories = client.list_stories(language).await?;
            if stories.is_empty() {
                println!("No stories found.");
                return Ok(());
            }

            println!("{}", "Stories:".bold());
            for story in stories {
                let image_marker = if story.image_url.is_some() { " 🖼" } else { "" };
                println!(
                    "  {} {} [{}] {}{}",
                    story.id.to_string().dimmed(),
                    story.title.cyan().bold(),
                    story.language,
                    story.created_at.format("%Y-%m-%d").to_string().dimmed(),
                    image_marker
                );
                println!("    {}", story.snippet.dimmed());
            }
        }

        StoryAction::Show { id } => {
            let story = client.get_story(id).await?;
            println!("{} [{}]\n", story.title.cyan().bold(), story.language);
            if !story.outline.plot.is_empty() {
                print_outline(&story.outline);
                println!();
            }
            println!("{}", story.content);
            if let Some(url) = story.image_url {
                println!("\n{} {}{}", "Cover:".dimmed(), config.server_url(), url);
            }
            println!(
                "\n{}",
                format!("Saved {} ({})", story.created_at.format("%Y-%m-%d %H:%M"), story.id).dimmed()
            );
        }

        StoryAction::Save {
            title_zh,
            title_en,
            zh_file,
            en_file,
        } => {
            let content_zh = fs::read_to_string(&zh_file)
                .with_context(|| format!("Failed to read file: {}", zh_file))?;
            let content_en = fs::read_to_string(&en_file)
                .with_context(|| format!("Failed to read file: {}", en_file))?;

            let saved = client
                .save_story(&SaveStoryRequest {
                    title_zh: &title_zh,
                    title_en: &title_en,
                    content_zh: &content_zh,
                    content_en: &content_en,
                    outline: &StoryOutline::default(),
                })
                .await?;
            println!(
                "{} Story saved (zh: {}, en: {})",
                "✓".green(),
                saved.zh_id,
                saved.en_id
            );
        }

        StoryAction::Delete { id, yes } => {
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Delete story {}?", id))
                    .default(false)
                    .interact()
                    .context("Failed to read confirmation")?;
                if !confirmed {
                    println!("Cancelled.");
                    return Ok(());
                }
            }
            client.delete_story(id).await?;
            println!("{} Story {} deleted", "✓".green(), id);
        }

        StoryAction::Collect { id } => {
            let copy = client.collect_story(id).await?;
            println!(
                "{} '{}' copied to the collection ({})",
                "✓".green(),
                copy.title.cyan(),
                copy.id
            );
        }

        StoryAction::Image { id, file } => {
            let path = Path::new(&file);
            let content_type = image_content_type(path)
                .with_context(|| format!("Not a supported image file: {}", file))?;
            let data = fs::read(path).with_context(|| format!("Failed to read file: {}", file))?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "cover".to_string());

            let uploaded = client
                .upload_image(id, file_name, content_type, data)
                .await?;
            println!(
                "{} Cover image updated: {}{}",
                "✓".green(),
                config.server_url(),
                uploaded.image_url
            );
        }
    }

    Ok(())
}

async fn cmd_collection(action: CollectionAction) -> Result<()> {
    let config = Config::load()?;
    let client = client(&config);

    match action {
        CollectionAction::List => {
            let copies = client.list_collection().await?;
            if copies.is_empty() {
                println!("The collection is empty.");
                return Ok(());
            }

            println!("{}", "Collection:".bold());
            for copy in copies {
                println!(
                    "  {} {} [{}] {}",
                    copy.id.to_string().dimmed(),
                    copy.title.cyan().bold(),
                    copy.language,
                    format!("copied {}", copy.copied_at.format("%Y-%m-%d")).dimmed()
                );
                if let Some(source) = copy.source_story_id {
                    println!("    {} {}", "from".dimmed(), source.to_string().dimmed());
                }
                println!("    {}", copy.snippet.dimmed());
            }
        }
    }

    Ok(())
}

async fn cmd_check() -> Result<()> {
    let config = Config::load()?;
    let client = client(&config);

    let result = client.check_generation().await?;
    if result.success {
        println!(
            "{} {}",
            "✓".green(),
            result.message.as_deref().unwrap_or("API Key is working!")
        );
    } else {
        println!(
            "{} {}",
            "✗".red(),
            result.error.as_deref().unwrap_or("Generation check failed")
        );
    }
    println!("  {}", result.diagnostic.dimmed());

    Ok(())
}

// ============================================
// Helpers
// ============================================

fn prompt_if_missing(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Input::new()
            .with_prompt(prompt)
            .interact_text()
            .context("Failed to read input"),
    }
}

fn print_outline(outline: &StoryOutline) {
    println!("{}", "Outline".bold());
    println!("  {} {}", "Characters:".dimmed(), outline.characters);
    println!("  {} {}", "Setting:".dimmed(), outline.setting);
    println!("  {} {}", "Plot:".dimmed(), outline.plot);
    println!("  {} {}", "Moral:".dimmed(), outline.moral);
}

/// Content type for an image path, by extension
fn image_content_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_content_type() {
        assert_eq!(image_content_type(Path::new("cover.PNG")), Some("image/png"));
        assert_eq!(image_content_type(Path::new("a/b/cover.jpeg")), Some("image/jpeg"));
        assert_eq!(image_content_type(Path::new("notes.txt")), None);
        assert_eq!(image_content_type(Path::new("cover")), None);
    }

    #[test]
    fn test_cli_parses_idea() {
        let cli = Cli::try_parse_from([
            "storyloom", "idea", "-t", "friendship", "-k", "dragon", "-l", "zh", "--save",
        ])
        .unwrap();
        match cli.command {
            Commands::Idea {
                themes,
                language,
                save,
                ..
            } => {
                assert_eq!(themes.as_deref(), Some("friendship"));
                assert_eq!(language.as_deref(), Some("zh"));
                assert!(save);
            }
            _ => panic!("expected idea command"),
        }
    }

    #[test]
    fn test_free_text_outline_is_kept_as_plot() {
        let text = "Characters: Leo\nSetting: forest".to_string();
        let (prompt, outline) =
            resolve_outline(Some(text.clone()), StoryOutline::new("ignored", "", "", "")).unwrap();

        assert_eq!(prompt, text);
        assert_eq!(outline.plot, text);
        assert!(outline.characters.is_empty());
        assert!(outline.moral.is_empty());
    }

    #[test]
    fn test_outline_parts_are_kept() {
        let parts = StoryOutline::new("Leo", "forest", "sun vanished", "friendship");
        let (prompt, outline) = resolve_outline(None, parts.clone()).unwrap();

        assert_eq!(prompt, parts.to_prompt_text());
        assert_eq!(outline, parts);
    }

    #[test]
    fn test_blank_parts_need_input() {
        let parts = StoryOutline::new("  ", "", "", "");
        assert!(resolve_outline(None, parts).is_none());
    }

    #[test]
    fn test_parse_language() {
        assert_eq!(parse_language("zh").unwrap(), Language::Zh);
        assert!(parse_language("fr").is_err());
    }
}
