//! Subcommand handlers

use crate::format;
use crate::{AdminCommand, Commands, FavoritesCommand, SongsCommand};
use anyhow::{bail, Context, Result};
use melodia_client::{SessionStore, UploadMetadata};
use melodia_core::{Track, TrackId, UserId};
use melodia_playback::{NullOutput, PlaybackConfig, PlaybackSnapshot, Player};
use serde::Serialize;
use std::fmt::Debug;

/// Print `value` either as JSON or through `render`.
fn emit<T: Serialize + Debug>(json: bool, value: &T, render: impl FnOnce(&T) -> String) {
    if json {
        println!("{}", format::json(value));
    } else {
        println!("{}", render(value));
    }
}

/// Commands that work without a stored session
fn is_anonymous(command: &Commands) -> bool {
    matches!(
        command,
        Commands::Login { .. } | Commands::Register { .. } | Commands::Health
    )
}

fn require_login(session: &SessionStore) -> Result<()> {
    if !session.is_authenticated() {
        bail!("Not logged in. Run `melodia login <identifier>` first");
    }
    Ok(())
}

fn require_admin(session: &SessionStore) -> Result<()> {
    require_login(session)?;
    if !session.is_admin() {
        bail!("This command requires an administrator account");
    }
    Ok(())
}

pub async fn run(command: Commands, session: &SessionStore, json: bool) -> Result<()> {
    if !is_anonymous(&command) {
        session.check_session().await;
    }

    match command {
        Commands::Login {
            identifier,
            password,
        } => {
            let user = session.login(&identifier, &password).await?;
            if json {
                println!("{}", format::json(&user));
            } else {
                println!("Logged in as {}", user.username);
            }
        }

        Commands::Register {
            username,
            email,
            password,
            admin,
        } => {
            if admin {
                session
                    .client()
                    .auth()
                    .create_admin(&username, &email, &password)
                    .await?;
                println!("Administrator {username} created");
            } else {
                session.register(&username, &email, &password).await?;
                println!("Account {username} created. You can now log in");
            }
        }

        Commands::Logout => {
            session.logout().await;
            println!("Logged out");
        }

        Commands::Whoami => match session.current_user() {
            Some(user) => emit(json, &user, |u| {
                format!(
                    "{} ({})",
                    u.username,
                    if u.is_admin() { "admin" } else { "user" }
                )
            }),
            None => println!("Not logged in"),
        },

        Commands::Profile => {
            require_login(session)?;
            let profile =
                session.handle_unauthorized(session.client().users().profile().await)?;
            match profile {
                Some(user) => emit(json, &user, format::profile),
                None => {
                    session.invalidate();
                    bail!("Session expired. Log in again");
                }
            }
        }

        Commands::Health => {
            let status = session
                .client()
                .health()
                .await
                .context("Backend unreachable")?;
            emit(json, &status, format::health);
            if !status.is_healthy() {
                bail!("Unhealthy components: {}", status.failing().join(", "));
            }
        }

        Commands::Queue {
            query,
            shuffle,
            start,
        } => queue(session, query, shuffle, start, json).await?,

        Commands::Songs(command) => songs(command, session, json).await?,
        Commands::Favorites(command) => favorites(command, session, json).await?,
        Commands::Admin(command) => admin(command, session, json).await?,
    }

    Ok(())
}

#[derive(Debug, Serialize)]
struct QueueReport<'a> {
    state: &'a PlaybackSnapshot,
    queue: &'a [Track],
}

/// Load catalogue tracks into a player with no audio output and report
/// what it would play.
async fn queue(
    session: &SessionStore,
    query: Option<String>,
    shuffle: bool,
    start: Option<String>,
    json: bool,
) -> Result<()> {
    let songs = session.client().songs();
    let tracks = match query {
        Some(query) => session.handle_unauthorized(songs.search(&query).await)?,
        None => session.handle_unauthorized(songs.list().await)?,
    };
    if tracks.is_empty() {
        bail!("Nothing to queue");
    }

    let start = match start {
        Some(id) => {
            let id = TrackId::new(id);
            tracks
                .iter()
                .position(|t| t.id == id)
                .with_context(|| format!("Song {id} is not in the queue"))?
        }
        None => 0,
    };

    let config = PlaybackConfig {
        shuffle,
        ..PlaybackConfig::default()
    };
    let player = Player::new(config, Box::new(NullOutput));
    player.play_queue(tracks, start)?;

    let snapshot = player.snapshot();
    let order = player.queue();
    if json {
        println!(
            "{}",
            format::json(&QueueReport {
                state: &snapshot,
                queue: &order,
            })
        );
    } else {
        println!("{}", format::play_order(snapshot.current.as_ref(), &order));
    }
    Ok(())
}

async fn songs(command: SongsCommand, session: &SessionStore, json: bool) -> Result<()> {
    let songs = session.client().songs();

    match command {
        SongsCommand::List => {
            let tracks = session.handle_unauthorized(songs.list().await)?;
            emit(json, &tracks, |t| format::tracks(t));
        }
        SongsCommand::Search { query } => {
            let tracks = session.handle_unauthorized(songs.search(&query).await)?;
            emit(json, &tracks, |t| format::tracks(t));
        }
        SongsCommand::Recent => {
            let tracks = session.handle_unauthorized(songs.recent().await)?;
            emit(json, &tracks, |t| format::tracks(t));
        }
        SongsCommand::Popular => {
            let tracks = session.handle_unauthorized(songs.popular().await)?;
            emit(json, &tracks, |t| format::tracks(t));
        }
        SongsCommand::Create { track } => {
            require_login(session)?;
            let created = session.handle_unauthorized(songs.create(&track.into()).await)?;
            emit(json, &created, format::track_line);
        }
        SongsCommand::Delete { id } => {
            require_login(session)?;
            session.handle_unauthorized(songs.delete(&TrackId::new(id.clone())).await)?;
            println!("Song {id} deleted");
        }
        SongsCommand::Upload {
            path,
            title,
            artist,
        } => {
            require_login(session)?;
            let metadata = UploadMetadata { title, artist };
            let uploaded = session.handle_unauthorized(songs.upload(&path, &metadata).await)?;
            emit(json, &uploaded, format::track_line);
        }
    }

    Ok(())
}

async fn favorites(command: FavoritesCommand, session: &SessionStore, json: bool) -> Result<()> {
    require_login(session)?;
    let favorites = session.client().favorites();

    match command {
        FavoritesCommand::List => {
            let tracks = session.handle_unauthorized(favorites.list().await)?;
            emit(json, &tracks, |t| format::tracks(t));
        }
        FavoritesCommand::Add { id } => {
            session.handle_unauthorized(favorites.add(&TrackId::new(id.clone())).await)?;
            println!("Added {id} to favorites");
        }
        FavoritesCommand::Remove { id } => {
            session.handle_unauthorized(favorites.remove(&TrackId::new(id.clone())).await)?;
            println!("Removed {id} from favorites");
        }
        FavoritesCommand::Toggle { id } => {
            let now = session
                .handle_unauthorized(favorites.toggle_favorite(&TrackId::new(id.clone())).await)?;
            if now {
                println!("Added {id} to favorites");
            } else {
                println!("Removed {id} from favorites");
            }
        }
        FavoritesCommand::Check { id } => {
            let marked = favorites.is_favorite(&TrackId::new(id.clone())).await;
            if json {
                println!("{}", serde_json::json!({ "songId": id, "isFavorite": marked }));
            } else {
                println!("{id}: {}", if marked { "favorite" } else { "not a favorite" });
            }
        }
    }

    Ok(())
}

async fn admin(command: AdminCommand, session: &SessionStore, json: bool) -> Result<()> {
    require_admin(session)?;
    let admin = session.client().admin();

    match command {
        AdminCommand::Dashboard => {
            let stats = session.handle_unauthorized(admin.dashboard().await)?;
            emit(json, &stats, format::dashboard);
        }
        AdminCommand::Users => {
            let users = session.handle_unauthorized(admin.users().await)?;
            emit(json, &users, |u| format::users(u));
        }
        AdminCommand::SetStatus { id, active } => {
            session.handle_unauthorized(
                admin.set_user_status(&UserId::new(id.clone()), active).await,
            )?;
            println!(
                "User {id} {}",
                if active { "enabled" } else { "disabled" }
            );
        }
        AdminCommand::DeleteUser { id } => {
            session.handle_unauthorized(admin.delete_user(&UserId::new(id.clone())).await)?;
            println!("User {id} deleted");
        }
        AdminCommand::UpdateSong { id, track } => {
            let updated = session.handle_unauthorized(
                admin
                    .update_song(&TrackId::new(id), &track.into())
                    .await,
            )?;
            emit(json, &updated, format::track_line);
        }
        AdminCommand::CacheStats => {
            let stats = session.handle_unauthorized(admin.cache_stats().await)?;
            println!("{}", format::json(&stats));
        }
        AdminCommand::ResetRateLimit { identifier } => {
            session.handle_unauthorized(admin.reset_rate_limit(&identifier).await)?;
            println!("Rate limit cleared for {identifier}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use melodia_client::{ClientConfig, MemoryTokenStore, MusicClient};
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn session_for(server: &MockServer, token: Option<&str>) -> SessionStore {
        let tokens = match token {
            Some(t) => MemoryTokenStore::with_token(t),
            None => MemoryTokenStore::new(),
        };
        let client = MusicClient::new(&ClientConfig::new(server.uri()), Arc::new(tokens)).unwrap();
        SessionStore::new(client)
    }

    #[test]
    fn anonymous_commands() {
        assert!(is_anonymous(&Commands::Health));
        assert!(is_anonymous(&Commands::Login {
            identifier: "alice".into(),
            password: "pw".into(),
        }));
        assert!(!is_anonymous(&Commands::Whoami));
        assert!(!is_anonymous(&Commands::Admin(AdminCommand::Dashboard)));
    }

    #[tokio::test]
    async fn admin_commands_refuse_regular_users() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 1, "username": "alice", "email": "a@x.io", "role": "USER"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/admin/dashboard"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let session = session_for(&server, Some("token"));
        let err = run(Commands::Admin(AdminCommand::Dashboard), &session, false)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("administrator"));
    }

    #[tokio::test]
    async fn queue_starts_at_requested_song() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/songs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "title": "One", "artist": "A", "fileUrl": "/f/1.mp3"},
                {"id": 2, "title": "Two", "artist": "A", "fileUrl": "/f/2.mp3"},
                {"id": 3, "title": "Three", "artist": "A", "fileUrl": "/f/3.mp3"}
            ])))
            .mount(&server)
            .await;

        let session = session_for(&server, None);
        let command = Commands::Queue {
            query: None,
            shuffle: true,
            start: Some("2".into()),
        };
        run(command, &session, false).await.unwrap();

        let missing = Commands::Queue {
            query: None,
            shuffle: false,
            start: Some("9".into()),
        };
        let err = run(missing, &session, false).await.unwrap_err();
        assert!(err.to_string().contains("not in the queue"));
    }

    #[tokio::test]
    async fn favorites_need_a_session() {
        let server = MockServer::start().await;
        let session = session_for(&server, None);

        let err = run(Commands::Favorites(FavoritesCommand::List), &session, false)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Not logged in"));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn expired_session_is_cleared_on_profile() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 1, "username": "alice", "email": "a@x.io", "role": "USER"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/user/profile"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let session = session_for(&server, Some("token"));
        let result = run(Commands::Profile, &session, false).await;

        assert!(result.is_err());
        assert!(!session.is_authenticated());
        assert!(!session.client().has_token());
    }
}
