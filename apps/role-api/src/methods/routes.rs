// API v1 routes (nested under /v1)
pub const ROLES_PATH: &str = "/roles";
pub const ROLES_BY_ID_PATH: &str = "/roles/{id}";
pub const ROLE_MEMBER_PATH: &str = "/roles/{id}/member/{member_id}";
pub const ROLE_MEMBER_RELATION_PATH: &str = "/roles/member/{relation_id}";
pub const ROLE_MEMBERS_PATH: &str = "/roles/{id}/members";
pub const ROLE_PROJECT_PATH: &str = "/roles/{id}/project/{project_id}";
pub const ROLE_PROJECT_RELATION_PATH: &str = "/roles/project/{relation_id}";
pub const ROLE_PROJECTS_PATH: &str = "/roles/{id}/projects";

// Root-level service routes (not versioned)
pub const SERVICE_HEALTH_PATH: &str = "/health";
pub const SERVICE_DOCS_PATH: &str = "/docs";
pub const OPENAPI_JSON_PATH: &str = "/api-doc/openapi.json";

// API version prefix
pub const API_V1_PREFIX: &str = "/v1";
