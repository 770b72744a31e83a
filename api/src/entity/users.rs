use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub bio: String,
    pub created_at: DateTimeWithTimeZone,
    pub last_seen: DateTimeWithTimeZone,
    /// JSON array of followed user ids
    #[sea_orm(column_type = "JsonBinary")]
    pub friends: Json,
    /// JSON array of follower user ids
    #[sea_orm(column_type = "JsonBinary")]
    pub followers: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
