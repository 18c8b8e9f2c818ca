use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users_table;
mod m20240101_000002_create_roles_table;
mod m20240101_000003_create_permissions_table;
mod m20240101_000004_create_user_roles_table;
mod m20240101_000005_create_role_permissions_table;

/// Database migrator for SeaORM
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users_table::Migration),
            Box::new(m20240101_000002_create_roles_table::Migration),
            Box::new(m20240101_000003_create_permissions_table::Migration),
            Box::new(m20240101_000004_create_user_roles_table::Migration),
            Box::new(m20240101_000005_create_role_permissions_table::Migration),
        ]
    }
}
