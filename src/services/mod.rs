// Service layer
// Operations that span more than one store call or need more than CRUD.

pub mod billing;
pub mod dashboard;
pub mod tokens;
