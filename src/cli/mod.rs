//! Command-line front end.
//!
//! Drives the client core the same way the browser UI does:
//! - `login`, `register`, `logout`, `whoami` - session management
//! - `list` - load places, optionally narrowed by a search term
//! - `show`, `reviews`, `review` - a single place and its ratings
//! - `add` - stage a position on the map and create a place there
//! - `update` - edit fields of an existing place
//! - `categories` - categories known to the backend

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use places_directory_core::core::config::{ApiConfig, Config};
use places_directory_core::features::auth::dtos::{LoginRequestDto, RegisterRequestDto};
use places_directory_core::features::auth::{AuthClient, AuthService};
use places_directory_core::features::map::{MapCoordinator, MapSignal};
use places_directory_core::features::places::dtos::{
    CreateReviewDto, PlaceFilters, PlaceFormDto, UpdatePlaceDto,
};
use places_directory_core::features::places::models::{Place, PlaceId, Review};
use places_directory_core::features::places::{
    PlaceRepository, PlaceService, PlacesApi, PlacesClient,
};
use places_directory_core::modules::http::ApiClient;
use places_directory_core::modules::session::{FileSessionStore, SessionStore};
use places_directory_core::shared::types::{Coordinates, PageOptions};

#[derive(Parser, Debug)]
#[command(name = "places-directory")]
#[command(author, version, about = "Browse and contribute to the places directory", long_about = None)]
pub struct Cli {
    /// Backend base URL
    #[arg(long, env = "API_BASE_URL")]
    pub api_url: Option<String>,

    /// File the session token is stored in
    #[arg(long, env = "SESSION_FILE")]
    pub session_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and remember the session
    Login {
        username: String,
        #[arg(short, long)]
        password: String,
    },

    /// Create an account
    Register {
        username: String,
        #[arg(short, long)]
        password: String,
        /// Repeat the password
        #[arg(long)]
        confirm_password: String,
        /// Avatar image URL
        #[arg(long)]
        avatar: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show the logged in user
    Whoami,

    /// List places
    List {
        /// Narrow the list client-side; an exact name focuses that place
        #[arg(short, long)]
        search: Option<String>,
        /// Send the search term to the backend instead
        #[arg(long)]
        remote: bool,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
    },

    /// Show a single place
    Show { id: PlaceId },

    /// Add a place at the given position
    Add {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        category: String,
    },

    /// Change fields of an existing place; omitted fields are left alone
    Update {
        id: PlaceId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        website: Option<String>,
    },

    /// List categories known to the backend
    Categories,

    /// List reviews of a place
    Reviews {
        id: PlaceId,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
    },

    /// Rate a place
    Review {
        id: PlaceId,
        #[arg(short, long)]
        rating: u8,
        #[arg(short, long)]
        comment: Option<String>,
    },
}

/// Wired services for one invocation
struct Services {
    auth: AuthService,
    places: PlaceService,
    map: MapCoordinator,
    repository: PlaceRepository,
}

impl Services {
    fn new(config: Config, cancel: CancellationToken) -> Self {
        let session: Arc<dyn SessionStore> =
            Arc::new(FileSessionStore::new(config.session.file_path.clone()));
        let api = Arc::new(ApiClient::new(&config.api, Arc::clone(&session)));

        let auth_client = AuthClient::new(Arc::clone(&api)).scoped(cancel.clone());
        let places_client = PlacesClient::new(api).scoped(cancel);

        Self {
            auth: AuthService::new(auth_client, session),
            places: PlaceService::new(Arc::new(places_client)),
            map: MapCoordinator::new(config.map),
            repository: PlaceRepository::new(),
        }
    }
}

/// Apply command-line overrides on top of the environment configuration
pub fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    if let Some(url) = &cli.api_url {
        config.api = ApiConfig::new(url.as_str()).map_err(|e| anyhow::anyhow!(e))?;
    }
    if let Some(path) = &cli.session_file {
        config.session.file_path = path.clone();
    }

    Ok(config)
}

pub async fn run_command(cli: Cli, config: Config, cancel: CancellationToken) -> Result<()> {
    let mut ctx = Services::new(config, cancel);

    match cli.command {
        Commands::Login { username, password } => {
            let dto = LoginRequestDto { username, password };
            let name = dto.username.clone();
            ctx.auth.login(dto).await?;
            println!("Logged in as {}", name);
        }
        Commands::Register {
            username,
            password,
            confirm_password,
            avatar,
        } => {
            let dto = RegisterRequestDto {
                username,
                password,
                confirm_password,
                avatar,
            };
            let response = ctx.auth.register(dto).await?;
            println!(
                "{}",
                response.msg.as_deref().unwrap_or("Registration complete")
            );
        }
        Commands::Logout => {
            ctx.auth.logout().await?;
            println!("Logged out");
        }
        Commands::Whoami => match ctx.auth.restore_session().await {
            Some(user) => {
                println!("Username: {}", user.username);
                if let Some(email) = user.email {
                    println!("Email:    {}", email);
                }
            }
            None => println!("Not logged in"),
        },
        Commands::List {
            search,
            remote,
            category,
            limit,
            offset,
        } => {
            let filters = PlaceFilters {
                category,
                search: if remote { search.clone() } else { None },
                page: PageOptions { limit, offset },
                ..Default::default()
            };
            list_places(&mut ctx, &filters, search.filter(|_| !remote)).await?;
        }
        Commands::Show { id } => {
            let place = ctx.places.api().get_place(id).await?;
            print_place_details(&place);
        }
        Commands::Add {
            lat,
            lng,
            name,
            description,
            category,
        } => {
            add_place(
                &mut ctx,
                Coordinates::new(lat, lng),
                PlaceFormDto {
                    name,
                    description,
                    category,
                },
            )
            .await?;
        }
        Commands::Update {
            id,
            name,
            description,
            category,
            address,
            phone,
            website,
        } => {
            let changes = UpdatePlaceDto {
                name,
                description,
                category,
                address,
                phone,
                website,
                ..Default::default()
            };
            let authenticated = ctx.auth.is_authenticated().await;
            let place = ctx
                .places
                .update_place(&mut ctx.repository, id, changes, authenticated)
                .await
                .context("Failed to update place")?;
            println!("Place updated:");
            print_place_details(&place);
        }
        Commands::Categories => {
            let categories = ctx.places.api().list_categories().await?;
            if categories.is_empty() {
                println!("No categories yet");
            }
            for category in categories {
                println!("{}", category);
            }
        }
        Commands::Reviews { id, limit, offset } => {
            let reviews = ctx
                .places
                .api()
                .list_reviews(id, &PageOptions { limit, offset })
                .await?;
            if reviews.is_empty() {
                println!("No reviews for place {}", id);
            }
            for review in &reviews {
                print_review(review);
            }
        }
        Commands::Review {
            id,
            rating,
            comment,
        } => {
            let authenticated = ctx.auth.is_authenticated().await;
            let review = ctx
                .places
                .add_review(id, CreateReviewDto { rating, comment }, authenticated)
                .await?;
            println!("Review saved:");
            print_review(&review);
        }
    }

    Ok(())
}

async fn list_places(ctx: &mut Services, filters: &PlaceFilters, term: Option<String>) -> Result<()> {
    let count = ctx.places.load(&mut ctx.repository, filters).await?;
    tracing::debug!("Fetched {} places", count);

    let signal = match term.as_deref() {
        Some(term) => ctx.map.apply_search_term(&ctx.repository, term),
        None => None,
    };

    let selected = ctx.map.selected_id();
    let filtered = ctx.map.filtered_places(&ctx.repository);
    if filtered.is_empty() {
        println!("No places found");
    }
    for place in filtered.iter() {
        let marker = if Some(place.id) == selected { "*" } else { " " };
        println!(
            "{} [{}] {} ({}) @ {:.4}, {:.4}",
            marker, place.id, place.name, place.category, place.latitude, place.longitude
        );
    }

    if signal == Some(MapSignal::ScrollIntoView) {
        let view = ctx.map.view();
        if let Some(place) = ctx.map.selected_place(&ctx.repository) {
            println!();
            println!(
                "Exact match: {} (map centered at {:.4}, {:.4}, zoom {})",
                place.name, view.center.lat, view.center.lng, view.zoom
            );
        }
    }

    let categories = ctx.repository.categories();
    if !categories.is_empty() {
        println!();
        println!("Categories: {}", categories.join(", "));
    }

    Ok(())
}

async fn add_place(ctx: &mut Services, position: Coordinates, form: PlaceFormDto) -> Result<()> {
    let authenticated = ctx.auth.is_authenticated().await;

    match ctx.map.map_clicked(position, authenticated) {
        MapSignal::PermissionDenied => bail!("You must log in to add places"),
        MapSignal::NewPlaceStaged(c) => tracing::debug!("Staged new place at {}, {}", c.lat, c.lng),
        MapSignal::ScrollIntoView => {}
    }

    let place = ctx
        .places
        .submit_new_place(
            &mut ctx.repository,
            form,
            ctx.map.pending_position(),
            authenticated,
        )
        .await
        .context("Failed to add place")?;
    ctx.map.place_created();

    println!("Place created:");
    print_place_details(&place);
    Ok(())
}

fn print_place_details(place: &Place) {
    println!("ID:          {}", place.id);
    println!("Name:        {}", place.name);
    println!("Category:    {}", place.category);
    println!("Description: {}", place.description);
    println!("Location:    {:.5}, {:.5}", place.latitude, place.longitude);
    if let Some(address) = &place.address {
        println!("Address:     {}", address);
    }
    if let Some(phone) = &place.phone {
        println!("Phone:       {}", phone);
    }
    if let Some(website) = &place.website {
        println!("Website:     {}", website);
    }
    if let Some(specialties) = place.specialties.as_ref().filter(|s| !s.is_empty()) {
        println!("Specialties: {}", specialties.join(", "));
    }
    match place.average_rating {
        Some(rating) => println!("Rating:      {:.1} ({} reviews)", rating, place.review_count),
        None => println!("Rating:      no reviews yet"),
    }
}

fn print_review(review: &Review) {
    println!(
        "  {} {}/5{}",
        review.username,
        review.rating,
        review
            .comment
            .as_deref()
            .map(|c| format!(" - {}", c))
            .unwrap_or_default()
    );
}
