use sea_orm::entity::prelude::*;

/// A registered reader. Created on registration and never deleted by the
/// application. `password_hash` holds the bcrypt digest; the raw password
/// is never persisted anywhere.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Stored case-sensitively; uniqueness is enforced by the database.
    #[sea_orm(unique)]
    pub email: String,
    pub username: String,
    pub password_hash: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    // A user owns the books on their shelf.
    #[sea_orm(has_many = "super::book::Entity")]
    Book,
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
