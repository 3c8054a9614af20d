use utoipa::OpenApi;

#[derive(OpenApi)]
/// OpenAPI description of the health server that runs next to the bot.
#[openapi(
    paths(
        crate::routes::health::home,
        crate::routes::health::health,
        crate::routes::health::healthcheck,
    ),
    components(schemas(crate::dto::health::HealthResponse)),
    tags((name = "health", description = "Liveness and status endpoints"))
)]
pub struct ApiDoc;
