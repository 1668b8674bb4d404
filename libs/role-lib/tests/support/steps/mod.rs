pub mod given;
pub mod then;
pub mod when_member;
pub mod when_project;
pub mod when_role;
