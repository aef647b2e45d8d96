// Command layer: clap definitions for the `thoth` binary and the mapping
// from each subcommand to one API call.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;

use crate::{
    api::{ApiClient, CreatePost, Length, ListPosts, UpdatePost},
    config,
    format::{self, Shape},
    ui,
};

/// Thoth API CLI
#[derive(Parser, Debug)]
#[command(name = "thoth", version, about = "Create and optimize social media content with the Thoth API")]
pub struct Cli {
    /// Override API key from config file
    #[arg(long, global = true, env = "THOTH_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,
    /// Config file holding THOTH_API_KEY (default: ~/.config/thoth/config)
    #[arg(long, global = true, env = "THOTH_CONFIG")]
    pub config: Option<PathBuf>,
    /// API base URL
    #[arg(
        long,
        global = true,
        env = "THOTH_API_URL",
        default_value = config::DEFAULT_BASE_URL
    )]
    pub base_url: String,
    /// More logging on stderr (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create optimized post
    CreatePost {
        /// Post content
        content: String,
        /// Target platforms (twitter linkedin instagram)
        #[arg(long, num_args = 1.., required = true)]
        platforms: Vec<String>,
        /// Schedule time (ISO 8601)
        #[arg(long)]
        schedule: Option<String>,
        /// Generate AI images
        #[arg(long)]
        image: bool,
        /// Content length
        #[arg(long, value_enum, default_value_t = Length::Medium)]
        length: Length,
        /// Generate hashtags
        #[arg(long)]
        hashtags: bool,
        /// Post to connected social accounts
        #[arg(long)]
        post_now: bool,
    },
    /// Get post details
    GetPost {
        /// Post ID
        post_id: String,
    },
    /// List all posts
    ListPosts {
        /// Page number
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Posts per page
        #[arg(long, default_value_t = 10)]
        limit: u32,
        /// Filter by status (draft/published)
        #[arg(long)]
        status: Option<String>,
    },
    /// Update existing post
    UpdatePost {
        /// Post ID
        post_id: String,
        /// Updated title
        #[arg(long)]
        title: Option<String>,
        /// Updated content
        #[arg(long)]
        content: Option<String>,
        /// Updated status
        #[arg(long)]
        status: Option<String>,
        /// Updated per-platform content, as a JSON array
        // full path keeps clap from treating this as a repeated argument
        #[arg(long, value_parser = parse_json_array)]
        platform_contents: Option<::std::vec::Vec<Value>>,
    },
    /// Fetch all brand styles
    GetBrandStyles,
    /// Get specific brand style
    GetBrandStyle {
        /// Brand style ID
        style_id: String,
    },
    /// Store the API key in the config file
    Configure,
}

fn parse_json_array(raw: &str) -> Result<Vec<Value>, String> {
    serde_json::from_str(raw).map_err(|e| format!("expected a JSON array: {e}"))
}

/// Runs one parsed command: resolves the key, performs the request and
/// prints the result on stdout.
pub fn run(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        anyhow::bail!("no command given");
    };

    if let Commands::Configure = command {
        let config_path = match cli.config {
            Some(path) => path,
            None => config::default_config_path()?,
        };
        return run_configure(cli.api_key.as_deref(), &config_path);
    }

    let api_key = config::resolve_api_key(cli.api_key.as_deref(), cli.config.as_deref())?;
    let api = ApiClient::new(&cli.base_url, &api_key)?;
    tracing::info!(base_url = %api.base_url(), "thoth client ready");

    let (body, shape) = ui::with_spinner("Contacting Thoth...", || dispatch(&api, command))?;
    println!("{}", format::render(&body, shape, cli.json)?);
    Ok(())
}

/// Maps a command to its client call and the shape its answer has.
fn dispatch(api: &ApiClient, command: Commands) -> Result<(Value, Shape)> {
    let reply = match command {
        Commands::CreatePost {
            content,
            platforms,
            schedule,
            image,
            length,
            hashtags,
            post_now,
        } => {
            let post = CreatePost {
                schedule_time: schedule,
                create_image: image,
                length,
                create_hashtags: hashtags,
                post_to_social_networks: post_now,
                ..CreatePost::new(content, platforms)
            };
            (api.create_post(&post)?, Shape::Post)
        }
        Commands::GetPost { post_id } => (api.get_post(&post_id)?, Shape::Post),
        Commands::ListPosts {
            page,
            limit,
            status,
        } => {
            let query = ListPosts {
                page,
                limit,
                status,
            };
            (api.list_posts(&query)?, Shape::PostList)
        }
        Commands::UpdatePost {
            post_id,
            title,
            content,
            status,
            platform_contents,
        } => {
            let update = UpdatePost {
                title,
                original_content: content,
                platform_contents,
                status,
            };
            (api.update_post(&post_id, &update)?, Shape::Post)
        }
        Commands::GetBrandStyles => (api.get_brand_styles()?, Shape::BrandStyles),
        Commands::GetBrandStyle { style_id } => {
            (api.get_brand_style(&style_id)?, Shape::BrandStyle)
        }
        Commands::Configure => anyhow::bail!("configure does not call the API"),
    };
    Ok(reply)
}

/// Runs the configure command
fn run_configure(api_key: Option<&str>, path: &std::path::Path) -> Result<()> {
    let key = match api_key.map(str::trim).filter(|k| !k.is_empty()) {
        Some(key) => key.to_string(),
        None => {
            let existing = config::load_api_key(path)?.is_some();
            match ui::prompt_api_key(existing)? {
                Some(key) => key,
                None => {
                    eprintln!("API key left unchanged.");
                    return Ok(());
                }
            }
        }
    };
    config::save_api_key(path, &key)
        .with_context(|| format!("could not save API key to {}", path.display()))?;
    println!("API key saved to {}", path.display());
    Ok(())
}
