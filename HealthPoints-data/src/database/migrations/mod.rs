// Schema migrations, one module per backend.
// Every statement is idempotent so migrations run on each startup.

mod postgres;
mod sqlite;

pub use postgres::run_migrations as run_postgres_migrations;
pub use sqlite::run_migrations as run_sqlite_migrations;
