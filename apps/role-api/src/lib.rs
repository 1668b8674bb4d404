pub mod auth;
pub mod config;
pub mod constants;
pub mod error;
pub mod methods;
pub mod response;
pub mod shutdown;
pub mod state;

use axum::{
    routing::{get, post, put},
    Router,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::methods::entities::{
    CreateRoleRequest, MemberUserResponse, PermissionPayload, RoleMemberResponse,
    RoleProjectResponse, RoleResponse, UpdateRoleRequest,
};
use crate::methods::routes::{
    API_V1_PREFIX, OPENAPI_JSON_PATH, ROLES_BY_ID_PATH, ROLES_PATH, ROLE_MEMBERS_PATH,
    ROLE_MEMBER_PATH, ROLE_MEMBER_RELATION_PATH, ROLE_PROJECTS_PATH, ROLE_PROJECT_PATH,
    ROLE_PROJECT_RELATION_PATH, SERVICE_DOCS_PATH, SERVICE_HEALTH_PATH,
};
use crate::methods::{
    add_member::add_member, add_project::add_project, create_role::create_role,
    delete_member::delete_member, delete_project::delete_project, delete_role::delete_role,
    get_members::get_members, get_projects::get_projects, get_role::get_role,
    health_check::health_check, update_project::update_project, update_role::update_role,
};
use crate::response::{NoPayload, ResponseHeader, ResultMap};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        methods::create_role::create_role,
        methods::delete_role::delete_role,
        methods::update_role::update_role,
        methods::get_role::get_role,
        methods::add_member::add_member,
        methods::delete_member::delete_member,
        methods::get_members::get_members,
        methods::add_project::add_project,
        methods::delete_project::delete_project,
        methods::update_project::update_project,
        methods::get_projects::get_projects,
        methods::health_check::health_check
    ),
    components(schemas(
        CreateRoleRequest, UpdateRoleRequest, PermissionPayload,
        RoleResponse, MemberUserResponse, RoleMemberResponse, RoleProjectResponse,
        ResponseHeader, NoPayload,
        ResultMap<RoleResponse>, ResultMap<RoleMemberResponse>, ResultMap<RoleProjectResponse>,
        ResultMap<NoPayload>
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "roles", description = "Role management endpoints"),
        (name = "role members", description = "Users attached to a role"),
        (name = "role projects", description = "Projects a role grants access to"),
        (name = "health", description = "Service liveness")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Routes and docs, without the transport middleware `main` wraps around them.
pub fn build_router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route(ROLES_PATH, post(create_role))
        .route(
            ROLES_BY_ID_PATH,
            get(get_role).put(update_role).delete(delete_role),
        )
        // Member relations
        .route(ROLE_MEMBER_PATH, post(add_member))
        .route(ROLE_MEMBER_RELATION_PATH, axum::routing::delete(delete_member))
        .route(ROLE_MEMBERS_PATH, get(get_members))
        // Project relations
        .route(ROLE_PROJECT_PATH, post(add_project))
        .route(
            ROLE_PROJECT_RELATION_PATH,
            put(update_project).delete(delete_project),
        )
        .route(ROLE_PROJECTS_PATH, get(get_projects));

    let root_routes = Router::new()
        .route(SERVICE_HEALTH_PATH, get(health_check))
        .merge(SwaggerUi::new(SERVICE_DOCS_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi()));

    Router::new()
        .nest(API_V1_PREFIX, v1_routes)
        .merge(root_routes)
        .with_state(state)
}
