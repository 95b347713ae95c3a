use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(QuizSessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QuizSessions::QuizTypeKey)
                            .text()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(QuizSessions::Data).blob().not_null())
                    .col(
                        ColumnDef::new(QuizSessions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_quiz_sessions_updated_at")
                    .table(QuizSessions::Table)
                    .col(QuizSessions::UpdatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(QuizSessions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum QuizSessions {
    Table,
    QuizTypeKey,
    Data,
    UpdatedAt,
}
