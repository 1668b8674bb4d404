pub mod add_member;
pub mod add_project;
pub mod create_role;
pub mod delete_member;
pub mod delete_project;
pub mod delete_role;
pub mod entities;
pub mod get_members;
pub mod get_projects;
pub mod get_role;
pub mod health_check;
pub mod routes;
pub mod update_project;
pub mod update_role;
