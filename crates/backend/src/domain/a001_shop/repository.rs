use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, QuerySelect};
use serde::{Deserialize, Serialize};

/// Справочник магазинов
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tab_tab")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Уникальные имена магазинов, по алфавиту
pub async fn list_names(db: &DatabaseConnection) -> anyhow::Result<Vec<String>> {
    let names: Vec<String> = Entity::find()
        .select_only()
        .column(Column::Name)
        .distinct()
        .order_by_asc(Column::Name)
        .into_tuple()
        .all(db)
        .await?;
    Ok(names)
}
