use app_state::AppSettings;
use clap::Subcommand;
use color_eyre::Result;
use common_services::api::album::error::AlbumError;
use common_services::api::album::interfaces::CreateAlbumRequest;
use common_services::api::album::service;
use common_services::database::album::NewAlbumSettings;
use common_services::database::get_db_pool;
use common_services::store_api::{AuthGateway, StoreApiClient};
use serde_json::{Value, json, to_value};
use sqlx::SqlitePool;

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(flatten)]
    Album(AlbumCommand),
    /// Log in to StoreApi and print the raw response.
    Login {
        shopware_id: String,
        #[clap(long)]
        password: String,
    },
    /// Ask StoreApi whether a token is still valid and print the raw response.
    CheckToken {
        shopware_id: String,
        #[clap(long)]
        token: String,
    },
}

/// Subcommands that work on the album database.
#[derive(Subcommand, Debug)]
pub enum AlbumCommand {
    /// Create an album.
    Create {
        name: String,
        #[clap(long)]
        parent: Option<i64>,
        /// Defaults to after the last sibling.
        #[clap(long)]
        position: Option<i64>,
    },
    /// Move an album below another one, or to the root without --parent.
    Move {
        id: i64,
        #[clap(long)]
        parent: Option<i64>,
    },
    Rename {
        id: i64,
        name: String,
    },
    Position {
        id: i64,
        position: i64,
    },
    /// Remove an album and everything below it. Its media goes to the unsorted album.
    Remove {
        id: i64,
    },
    /// List the direct children of an album, or the root albums.
    Children {
        #[clap(long)]
        id: Option<i64>,
    },
    /// Print the album tree with settings and media counts.
    Tree {
        #[clap(long)]
        id: Option<i64>,
    },
    /// List the media of an album.
    Media {
        id: i64,
    },
    AddMedia {
        album: i64,
        name: String,
        path: String,
    },
    MoveMedia {
        media: i64,
        album: i64,
    },
    /// Show album settings, or change them when any option is given.
    Settings {
        id: i64,
        #[clap(long)]
        icon: Option<String>,
        #[clap(long)]
        create_thumbnails: Option<bool>,
        /// e.g. "200x200;600x600"
        #[clap(long)]
        thumbnail_size: Option<String>,
        #[clap(long)]
        high_dpi: Option<bool>,
        #[clap(long)]
        quality: Option<i64>,
        #[clap(long)]
        high_dpi_quality: Option<i64>,
    },
}

impl Command {
    /// Subcommand name, safe to log (no arguments, so no secrets).
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Album(command) => command.name(),
            Self::Login { .. } => "login",
            Self::CheckToken { .. } => "check-token",
        }
    }
}

impl AlbumCommand {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Move { .. } => "move",
            Self::Rename { .. } => "rename",
            Self::Position { .. } => "position",
            Self::Remove { .. } => "remove",
            Self::Children { .. } => "children",
            Self::Tree { .. } => "tree",
            Self::Media { .. } => "media",
            Self::AddMedia { .. } => "add-media",
            Self::MoveMedia { .. } => "move-media",
            Self::Settings { .. } => "settings",
        }
    }
}

pub async fn run(command: Command, settings: &AppSettings) -> Result<Value> {
    match command {
        Command::Login {
            shopware_id,
            password,
        } => {
            let auth = AuthGateway::new(StoreApiClient::from_settings(&settings.store_api)?);
            Ok(to_value(auth.login(&shopware_id, &password).await?)?)
        }
        Command::CheckToken { shopware_id, token } => {
            let auth = AuthGateway::new(StoreApiClient::from_settings(&settings.store_api)?);
            Ok(to_value(auth.is_token_valid(&shopware_id, &token).await?)?)
        }
        Command::Album(command) => {
            let pool = get_db_pool(&settings.database).await?;
            let output = run_album_command(command, &pool)
                .await
                .inspect_err(AlbumError::log);
            pool.close().await;
            Ok(output?)
        }
    }
}

async fn run_album_command(command: AlbumCommand, pool: &SqlitePool) -> Result<Value, AlbumError> {
    let output = match command {
        AlbumCommand::Create {
            name,
            parent,
            position,
        } => {
            let request = CreateAlbumRequest {
                name,
                position,
                parent_id: parent,
            };
            json!(service::create_album(pool, &request).await?)
        }
        AlbumCommand::Move { id, parent } => {
            json!(service::set_parent(pool, id, parent).await?)
        }
        AlbumCommand::Rename { id, name } => {
            json!(service::rename_album(pool, id, &name).await?)
        }
        AlbumCommand::Position { id, position } => {
            json!(service::set_position(pool, id, position).await?)
        }
        AlbumCommand::Remove { id } => {
            let reassigned = service::remove_album(pool, id).await?;
            json!({ "removed": id, "reassignedMedia": reassigned })
        }
        AlbumCommand::Children { id } => json!(service::get_children(pool, id).await?),
        AlbumCommand::Tree { id } => json!(service::get_tree(pool, id).await?),
        AlbumCommand::Media { id } => json!(service::get_media(pool, id).await?),
        AlbumCommand::AddMedia { album, name, path } => {
            json!(service::add_media(pool, album, &name, &path).await?)
        }
        AlbumCommand::MoveMedia { media, album } => {
            json!(service::move_media(pool, media, album).await?)
        }
        AlbumCommand::Settings {
            id,
            icon,
            create_thumbnails,
            thumbnail_size,
            high_dpi,
            quality,
            high_dpi_quality,
        } => {
            let current = service::get_settings(pool, id).await?;
            let unchanged = icon.is_none()
                && create_thumbnails.is_none()
                && thumbnail_size.is_none()
                && high_dpi.is_none()
                && quality.is_none()
                && high_dpi_quality.is_none();
            if unchanged {
                return Ok(json!(current));
            }

            let mut settings =
                current.map_or_else(|| NewAlbumSettings::builder().build(), Into::into);
            settings.icon = icon.unwrap_or(settings.icon);
            settings.create_thumbnails = create_thumbnails.unwrap_or(settings.create_thumbnails);
            settings.thumbnail_size = thumbnail_size.unwrap_or(settings.thumbnail_size);
            settings.thumbnail_high_dpi = high_dpi.unwrap_or(settings.thumbnail_high_dpi);
            settings.thumbnail_quality = quality.unwrap_or(settings.thumbnail_quality);
            settings.thumbnail_high_dpi_quality =
                high_dpi_quality.unwrap_or(settings.thumbnail_high_dpi_quality);
            json!(service::set_settings(pool, id, &settings).await?)
        }
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[derive(Parser, Debug)]
    struct Cli {
        #[command(subcommand)]
        command: Command,
    }

    #[test]
    fn album_and_auth_subcommands_share_one_level() -> color_eyre::Result<()> {
        Cli::command().debug_assert();

        let remove = Cli::try_parse_from(["album-cli", "remove", "5"])?;
        assert!(matches!(
            remove.command,
            Command::Album(AlbumCommand::Remove { id: 5 })
        ));
        assert_eq!(remove.command.name(), "remove");

        let login = Cli::try_parse_from(["album-cli", "login", "user1", "--password", "pw"])?;
        assert!(matches!(login.command, Command::Login { .. }));
        assert_eq!(login.command.name(), "login");
        Ok(())
    }
}
