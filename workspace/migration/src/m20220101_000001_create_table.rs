use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string(Users::Email).unique_key())
                    .col(string(Users::Username))
                    .col(string(Users::PasswordHash))
                    .to_owned(),
            )
            .await?;

        // Create books table
        manager
            .create_table(
                Table::create()
                    .table(Books::Table)
                    .if_not_exists()
                    .col(pk_auto(Books::Id))
                    .col(integer(Books::UserId))
                    .col(string(Books::Title))
                    .col(string(Books::Author))
                    .col(date_null(Books::DateRead))
                    .col(string(Books::Isbn))
                    .col(decimal_len(Books::Rating, 4, 1))
                    .col(text_null(Books::Notes))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_book_owner")
                            .from(Books::Table, Books::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // A title may appear once per shelf; duplicate submissions are
        // rejected by the database rather than by a check-then-insert.
        manager
            .create_index(
                Index::create()
                    .name("idx_books_owner_title")
                    .table(Books::Table)
                    .col(Books::UserId)
                    .col(Books::Title)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Books::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Email,
    Username,
    PasswordHash,
}

#[derive(DeriveIden)]
enum Books {
    Table,
    Id,
    UserId,
    Title,
    Author,
    DateRead,
    Isbn,
    Rating,
    Notes,
}
