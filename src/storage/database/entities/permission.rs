use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Permission database model
///
/// `(resource, action)` carries its own unique index, created by the migration.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "permissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub permission_name: String,

    pub resource: String,

    pub action: String,

    pub description: String,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::role_permission::Entity")]
    RolePermissions,
}

impl Related<super::role_permission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RolePermissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::core::models::Permission {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            permission_name: model.permission_name,
            resource: model.resource,
            action: model.action,
            description: model.description,
            created_at: model.created_at.naive_utc().and_utc(),
            updated_at: model.updated_at.naive_utc().and_utc(),
        }
    }
}
