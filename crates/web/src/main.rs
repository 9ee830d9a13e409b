use std::time::Duration;

use anyhow::Context;
use storage::{Database, services::access::AccessPolicy};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use weighin_api::{
    config::Config,
    features::{allowlist, competitions, leaderboard, users, weight},
    middleware::auth::ApiKeys,
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        weighin_api::health,
        competitions::handlers::list_competitions,
        competitions::handlers::available_competitions,
        competitions::handlers::get_competition,
        competitions::handlers::create_competition,
        competitions::handlers::update_competition,
        competitions::handlers::join_competition,
        allowlist::handlers::list_allowlist,
        allowlist::handlers::add_to_allowlist,
        allowlist::handlers::remove_from_allowlist,
        leaderboard::handlers::global_leaderboard,
        leaderboard::handlers::competition_leaderboard,
        users::handlers::signup,
        users::handlers::list_users,
        users::handlers::set_admin,
        users::handlers::admin_status,
        weight::handlers::log_weight,
        weight::handlers::weight_history,
    ),
    components(
        schemas(
            storage::dto::competition::CreateCompetitionRequest,
            storage::dto::competition::UpdateCompetitionRequest,
            storage::dto::competition::CompetitionDetailResponse,
            storage::dto::competition::ParticipantDetail,
            storage::dto::allowlist::AddAllowlistRequest,
            storage::dto::allowlist::RemoveAllowlistRequest,
            storage::dto::allowlist::BulkAllowlistResult,
            storage::dto::leaderboard::LeaderboardEntry,
            storage::dto::user::SignupRequest,
            storage::dto::user::UserResponse,
            storage::dto::user::RegistrationResponse,
            storage::dto::user::SetAdminRequest,
            storage::dto::user::AdminStatus,
            storage::dto::user::LogWeightRequest,
            storage::models::Band,
            storage::models::Competition,
            storage::models::CompetitionStatus,
            storage::models::CompetitionParticipant,
            storage::models::ParticipantStatus,
            storage::models::AllowlistEntry,
            storage::models::WeightEntry,
        )
    ),
    tags(
        (name = "competitions", description = "Competition lifecycle and joining"),
        (name = "allowlist", description = "Per-competition email allowlists"),
        (name = "leaderboard", description = "Improvement rankings"),
        (name = "users", description = "Signup and admin management"),
        (name = "weight", description = "Weigh-in logging"),
        (name = "health", description = "Liveness"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting weigh-in competition API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!("Connecting to database at: {}", config.database_host());
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let access = config.access();
    tracing::info!(
        admins = access.admin_emails.len(),
        super_admins = access.super_admin_emails.len(),
        "Access configuration loaded"
    );

    let state = AppState::new(db, AccessPolicy::new(access));
    let api_keys = ApiKeys::from_comma_separated(&config.api_keys);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    let app = weighin_api::router(state, api_keys)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors);

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
