use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct CafeDoc {
    pub id: i32,
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: Option<String>,
}

#[derive(ToSchema)]
pub struct NewCafeDoc {
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    /// Defaults to `false`.
    pub has_sockets: Option<bool>,
    pub can_take_calls: bool,
    pub coffee_price: Option<String>,
}

/// Every field optional; omitted fields keep their value. `coffee_price: null` clears it.
#[derive(ToSchema)]
pub struct CafePatchDoc {
    pub name: Option<String>,
    pub map_url: Option<String>,
    pub img_url: Option<String>,
    pub location: Option<String>,
    pub seats: Option<String>,
    pub has_toilet: Option<bool>,
    pub has_wifi: Option<bool>,
    pub has_sockets: Option<bool>,
    pub can_take_calls: Option<bool>,
    pub coffee_price: Option<String>,
}

#[derive(ToSchema)]
pub struct HealthDoc {
    pub status: String,
    pub database: String,
    pub cafe_count: u64,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Cafe API", description = "API for managing cafe data"),
    paths(
        crate::routes::cafes::home,
        crate::routes::cafes::random,
        crate::routes::cafes::all,
        crate::routes::cafes::search,
        crate::routes::cafes::add,
        crate::routes::cafes::remove,
        crate::routes::cafes::update,
        crate::routes::cafes::health,
    ),
    components(
        schemas(
            CafeDoc,
            NewCafeDoc,
            CafePatchDoc,
            HealthDoc,
            crate::routes::cafes::AddCafeResponse,
            crate::routes::cafes::DeleteCafeResponse,
            crate::errors::ErrorBody,
        )
    ),
    tags(
        (name = "cafes"),
        (name = "health")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_cafe_route() {
        let doc = ApiDoc::openapi();
        for p in ["/", "/random", "/all", "/search", "/add", "/delete/{id}", "/update/{id}", "/health"] {
            assert!(doc.paths.paths.contains_key(p), "missing {p}");
        }
    }
}
