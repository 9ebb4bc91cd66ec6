use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
    /// Whether the database answered a ping within two seconds
    pub db: bool,
    /// RFC 3339
    pub time: String,
}

#[derive(ToSchema)]
pub struct CredentialsRequest {
    pub email: String,
    /// At least 8 characters
    pub password: String,
}

#[derive(ToSchema)]
pub struct UserDoc {
    pub id: i32,
    pub email: String,
    /// `customer` or `admin`
    pub role: String,
}

#[derive(ToSchema)]
pub struct SessionResponse {
    pub user: UserDoc,
    pub token: String,
}

#[derive(ToSchema)]
pub struct ServiceDoc {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub duration_minutes: i32,
    pub image_url: String,
}

#[derive(ToSchema)]
pub struct NewServiceDoc {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub duration_minutes: i32,
    pub image_url: Option<String>,
}

#[derive(ToSchema)]
pub struct OrderDoc {
    pub id: i32,
    pub user_id: i32,
    pub service_id: i32,
    /// `pending`, `confirmed`, `completed` or `cancelled`
    pub status: String,
    pub created_at: String,
}

#[derive(ToSchema)]
pub struct CreateOrderDoc {
    pub service_id: i32,
}

#[derive(ToSchema)]
pub struct StatusUpdateDoc {
    pub status: String,
}

#[derive(ToSchema)]
pub struct ReviewDoc {
    pub id: i32,
    pub order_id: i32,
    pub user_id: i32,
    pub rating: i32,
    pub comment: String,
    pub created_at: String,
}

#[derive(ToSchema)]
pub struct CreateReviewDoc {
    /// 1 to 5
    pub rating: i32,
    pub comment: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::catalog::list_services,
        crate::routes::catalog::create_service,
        crate::routes::catalog::list_reviews,
        crate::routes::orders::create_order,
        crate::routes::orders::my_orders,
        crate::routes::orders::delete_order,
        crate::routes::orders::cancel_order,
        crate::routes::orders::create_review,
        crate::routes::admin::list_orders,
        crate::routes::admin::update_order_status,
        crate::routes::admin::delete_order,
    ),
    components(
        schemas(
            HealthResponse,
            CredentialsRequest,
            UserDoc,
            SessionResponse,
            ServiceDoc,
            NewServiceDoc,
            OrderDoc,
            CreateOrderDoc,
            StatusUpdateDoc,
            ReviewDoc,
            CreateReviewDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "catalog"),
        (name = "orders"),
        (name = "admin")
    )
)]
pub struct ApiDoc;
