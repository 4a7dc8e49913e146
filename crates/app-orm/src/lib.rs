//! SeaORM entities for the devconnector schema (`schema.sql`).

pub mod posts;
pub mod prelude;
pub mod profiles;
pub mod users;
