//! This file serves as the root for all SeaORM entity modules.
//! The data models for the book-tracking application are defined here.

pub mod book;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::book::Entity as Book;
    pub use super::user::Entity as User;
}

#[cfg(test)]
mod test {
    use migration::{Migrator, MigratorTrait};
    use rust_decimal::Decimal;
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, ConnectionTrait, Database, DatabaseConnection, DbErr,
        EntityTrait, QueryFilter, Set,
    };

    use super::*;

    async fn setup_db() -> Result<DatabaseConnection, DbErr> {
        let db = Database::connect("sqlite::memory:").await?;

        // Enable foreign keys
        db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;

        Migrator::up(&db, None).await.expect("Migrations failed.");
        Ok(db)
    }

    fn sample_user(email: &str, username: &str) -> user::ActiveModel {
        user::ActiveModel {
            email: Set(email.to_string()),
            username: Set(username.to_string()),
            password_hash: Set("$2b$10$fakedigestfortestingonly".to_string()),
            ..Default::default()
        }
    }

    fn sample_book(owner_id: i32, title: &str, rating: Decimal) -> book::ActiveModel {
        book::ActiveModel {
            user_id: Set(owner_id),
            title: Set(title.to_string()),
            author: Set("Ursula K. Le Guin".to_string()),
            date_read: Set(None),
            isbn: Set("9780441007318".to_string()),
            rating: Set(rating),
            notes: Set(None),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_entity_integration() -> Result<(), DbErr> {
        let db = setup_db().await?;

        let alice = sample_user("alice@example.com", "alice").insert(&db).await?;
        let bob = sample_user("bob@example.com", "bob").insert(&db).await?;

        let dispossessed = sample_book(alice.id, "The Dispossessed", Decimal::new(50, 1))
            .insert(&db)
            .await?;
        sample_book(alice.id, "The Lathe of Heaven", Decimal::new(40, 1))
            .insert(&db)
            .await?;
        sample_book(bob.id, "The Dispossessed", Decimal::new(30, 1))
            .insert(&db)
            .await?;

        assert_eq!(dispossessed.user_id, alice.id);

        // Ownership filtering: each shelf only sees its own rows.
        let alice_books = book::Entity::find()
            .filter(book::Column::UserId.eq(alice.id))
            .all(&db)
            .await?;
        assert_eq!(alice_books.len(), 2);

        let bob_books = book::Entity::find()
            .filter(book::Column::UserId.eq(bob.id))
            .all(&db)
            .await?;
        assert_eq!(bob_books.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_email_unique_constraint() -> Result<(), DbErr> {
        let db = setup_db().await?;

        sample_user("alice@example.com", "alice").insert(&db).await?;
        let duplicate = sample_user("alice@example.com", "impostor").insert(&db).await;
        assert!(duplicate.is_err());

        let users = user::Entity::find().all(&db).await?;
        assert_eq!(users.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_title_unique_per_owner() -> Result<(), DbErr> {
        let db = setup_db().await?;

        let alice = sample_user("alice@example.com", "alice").insert(&db).await?;
        let bob = sample_user("bob@example.com", "bob").insert(&db).await?;

        sample_book(alice.id, "Piranesi", Decimal::new(45, 1))
            .insert(&db)
            .await?;

        // Same title on the same shelf violates the unique index.
        let duplicate = sample_book(alice.id, "Piranesi", Decimal::new(20, 1))
            .insert(&db)
            .await;
        assert!(duplicate.is_err());

        // Another user may shelve the same title.
        let other_shelf = sample_book(bob.id, "Piranesi", Decimal::new(35, 1))
            .insert(&db)
            .await;
        assert!(other_shelf.is_ok());
        Ok(())
    }
}
