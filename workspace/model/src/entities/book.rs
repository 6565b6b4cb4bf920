use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use super::user;

/// A book on one user's shelf.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// The owning user. Dashboard queries must filter on this column.
    pub user_id: i32,
    pub title: String,
    pub author: String,
    /// When the user finished the book, if they recorded it.
    pub date_read: Option<NaiveDate>,
    pub isbn: String,
    /// Rating out of 5. Feeds the dashboard average and the sort order,
    /// so it is stored as a decimal rather than a float.
    #[sea_orm(column_type = "Decimal(Some((4, 1)))")]
    pub rating: Decimal,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "user::Entity",
        from = "Column::UserId",
        to = "user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
