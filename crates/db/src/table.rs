use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum Ingredient {
    Table,
    Id,
    Name,
    Category,
    PurchaseUnit,
    PackSize,
    PackPrice,
    CostUnit,
    CostPerUnit,
    WastagePct,
    StockQty,
    ReorderLevel,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone)]
pub enum FormattingJob {
    Table,
    Id,
    Title,
    SourceUrl,
    RawBody,
    Status,
    Attempts,
    Error,
    FormattedBody,
    QueuedAt,
    StartedAt,
    FinishedAt,
}

#[derive(Iden, Clone)]
pub enum QueueControl {
    Table,
    Name,
    Paused,
    UpdatedAt,
}
