use axum::{body::Body, http::{Request, StatusCode}};
use http_body_util::BodyExt;
use tower::ServiceExt;
use utoipa::OpenApi;

use role_api::auth::AuthConfig;
use role_api::state::AppState;
use role_api::{build_router, ApiDoc};
use role_lib::repository::MemoryStore;
use role_lib::role_service::RoleService;

#[test]
fn test_openapi_doc_has_all_endpoints() {
    let doc = ApiDoc::openapi();
    let json = doc.to_pretty_json().expect("Failed to generate OpenAPI JSON");

    let paths = doc.paths.paths;

    // Role endpoints
    let roles_path = paths.get("/roles").expect("Missing /roles path");
    assert!(roles_path.post.is_some(), "Missing POST /roles");

    let role_by_id_path = paths.get("/roles/{id}").expect("Missing /roles/{id} path");
    assert!(role_by_id_path.get.is_some(), "Missing GET /roles/{{id}}");
    assert!(role_by_id_path.put.is_some(), "Missing PUT /roles/{{id}}");
    assert!(role_by_id_path.delete.is_some(), "Missing DELETE /roles/{{id}}");

    // Member relation endpoints
    let member_path = paths.get("/roles/{id}/member/{member_id}").expect("Missing add member path");
    assert!(member_path.post.is_some(), "Missing POST /roles/{{id}}/member/{{member_id}}");
    let member_relation_path = paths.get("/roles/member/{relation_id}").expect("Missing member relation path");
    assert!(member_relation_path.delete.is_some(), "Missing DELETE /roles/member/{{relation_id}}");
    let members_path = paths.get("/roles/{id}/members").expect("Missing members path");
    assert!(members_path.get.is_some(), "Missing GET /roles/{{id}}/members");

    // Project relation endpoints
    let project_path = paths.get("/roles/{id}/project/{project_id}").expect("Missing add project path");
    assert!(project_path.post.is_some(), "Missing POST /roles/{{id}}/project/{{project_id}}");
    let project_relation_path = paths.get("/roles/project/{relation_id}").expect("Missing project relation path");
    assert!(project_relation_path.put.is_some(), "Missing PUT /roles/project/{{relation_id}}");
    assert!(project_relation_path.delete.is_some(), "Missing DELETE /roles/project/{{relation_id}}");
    let projects_path = paths.get("/roles/{id}/projects").expect("Missing projects path");
    assert!(projects_path.get.is_some(), "Missing GET /roles/{{id}}/projects");

    assert!(paths.contains_key("/health"), "Missing /health path");

    // Verify schemas exist
    let components = doc.components.as_ref().expect("Missing components");
    for schema in [
        "CreateRoleRequest",
        "UpdateRoleRequest",
        "PermissionPayload",
        "RoleResponse",
        "RoleMemberResponse",
        "RoleProjectResponse",
        "ResponseHeader",
    ] {
        assert!(components.schemas.contains_key(schema), "Missing {schema} schema");
    }
    assert!(components.security_schemes.contains_key("bearer_auth"), "Missing bearer_auth scheme");

    println!("OpenAPI document:\n{}", json);
}

#[test]
fn test_openapi_json_contains_tags() {
    let json = ApiDoc::openapi().to_pretty_json().expect("Failed to generate OpenAPI JSON");

    assert!(json.contains("\"roles\""), "Missing 'roles' tag in JSON");
    assert!(json.contains("\"role members\""), "Missing 'role members' tag in JSON");
    assert!(json.contains("\"role projects\""), "Missing 'role projects' tag in JSON");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let state = AppState::new(
        RoleService::in_memory(MemoryStore::new()),
        AuthConfig::new("openapi-test-secret", 60),
        "test",
    );
    let response = build_router(state)
        .oneshot(Request::builder().uri("/api-doc/openapi.json").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let doc: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert!(doc["paths"]["/roles/{id}/projects"].is_object());
}
