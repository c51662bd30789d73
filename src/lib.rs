//! CRMDesk: collection views, role gating and mock server actions shared by
//! the admin console and the client CRM.

pub mod backend;
pub mod board;
pub mod entities;
pub mod error;
pub mod forms;
pub mod notification;
pub mod report_builder;
pub mod roles;
pub mod screen;
pub mod services;
pub mod state;
pub mod store;
pub mod types;
pub mod util;
pub mod view;
