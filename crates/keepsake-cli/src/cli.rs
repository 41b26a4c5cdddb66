use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use keepsake_core::VERSION;

/// Keepsake - browse Drive photo folders and keep an encrypted file vault
#[derive(Parser)]
#[command(name = "keepsake")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// OAuth bearer token for the object store
    #[arg(long, global = true, env = "KEEPSAKE_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Path to the config file
    #[arg(short, long, global = true, env = "KEEPSAKE_CONFIG")]
    pub config: Option<String>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List folders in the drive
    Folders(FoldersArgs),
    /// List the images in a folder
    Images(ImagesArgs),
    /// Download an image to a local file
    Fetch(FetchArgs),
    /// Delete an image from a folder
    Delete(DeleteArgs),
    /// Copy an image into the favorites folder
    Favorite(FavoriteArgs),
    /// Encrypt a local file and upload it to the vault
    Put(PutArgs),
    /// Download a vault file and decrypt it
    Get(GetArgs),
    /// List the files stored in the vault
    Files(FilesArgs),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `folders` command
#[derive(Args)]
pub struct FoldersArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `images` command
#[derive(Args)]
pub struct ImagesArgs {
    /// Folder name or id
    #[arg(value_name = "FOLDER")]
    pub folder: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `fetch` command
#[derive(Args)]
pub struct FetchArgs {
    /// Folder name or id
    #[arg(value_name = "FOLDER")]
    pub folder: String,

    /// Image name or id
    #[arg(value_name = "IMAGE")]
    pub image: String,

    /// Destination path (defaults to the image name)
    #[arg(short, long)]
    pub out: Option<String>,

    /// Also warm the cache for the neighboring images
    #[arg(long)]
    pub prefetch: bool,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Folder name or id
    #[arg(value_name = "FOLDER")]
    pub folder: String,

    /// Image name or id
    #[arg(value_name = "IMAGE")]
    pub image: String,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Arguments for the `favorite` command
#[derive(Args)]
pub struct FavoriteArgs {
    /// Folder name or id
    #[arg(value_name = "FOLDER")]
    pub folder: String,

    /// Image name or id
    #[arg(value_name = "IMAGE")]
    pub image: String,
}

/// Arguments for the `put` command
#[derive(Args)]
pub struct PutArgs {
    /// Local file to encrypt and upload
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Stored name (defaults to the local file name)
    #[arg(long)]
    pub name: Option<String>,

    /// Content type recorded in the payload (defaults to a guess from
    /// the file extension)
    #[arg(long)]
    pub content_type: Option<String>,
}

/// Arguments for the `get` command
#[derive(Args)]
pub struct GetArgs {
    /// Stored file name or id
    #[arg(value_name = "FILE")]
    pub file: String,

    /// Destination path (defaults to the stored name)
    #[arg(short, long)]
    pub out: Option<String>,
}

/// Arguments for the `files` command
#[derive(Args)]
pub struct FilesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_fetch() {
        let cli = Cli::parse_from(["keepsake", "fetch", "Trip", "cat.jpg", "--prefetch"]);
        match cli.command {
            Some(Commands::Fetch(args)) => {
                assert_eq!(args.folder, "Trip");
                assert_eq!(args.image, "cat.jpg");
                assert!(args.prefetch);
                assert!(args.out.is_none());
            }
            _ => panic!("expected fetch command"),
        }
    }

    #[test]
    fn test_global_token_flag() {
        let cli = Cli::parse_from(["keepsake", "--token", "tok-123", "folders"]);
        assert_eq!(cli.token.as_deref(), Some("tok-123"));
    }
}
