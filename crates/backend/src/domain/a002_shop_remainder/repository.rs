use contracts::domain::a002_shop_remainder::aggregate::InventoryItem;
use sea_orm::entity::prelude::*;
use sea_orm::{FromQueryResult, Statement};
use serde::{Deserialize, Serialize};

/// Остатки, цены и продажи артикулов по магазинам
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tab_shop_rem")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Ссылка на `tab_tab.id`
    pub table_id: i32,
    pub art: i32,
    pub category: Option<String>,
    pub remainder: Option<f64>,
    /// Закупочная цена
    pub price: Option<f64>,
    pub priceretail: Option<f64>,
    /// Средние продажи в день
    pub avg: Option<f64>,
    pub nosaledays: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// Пустые числа становятся NaN и пропускаются при агрегации, как NULL в SQL.
// Категория NULL остаётся `None` и группируется отдельно от `''`.
impl From<Model> for InventoryItem {
    fn from(m: Model) -> Self {
        InventoryItem {
            shop_id: m.table_id,
            article_id: m.art,
            category: m.category,
            stock_level: m.remainder.unwrap_or(f64::NAN),
            cost_price: m.price.unwrap_or(f64::NAN),
            retail_price: m.priceretail.unwrap_or(f64::NAN),
            avg_daily_sales: m.avg.unwrap_or(f64::NAN),
            days_since_last_sale: m.nosaledays.unwrap_or(0),
        }
    }
}

/// Все строки остатков магазина с точно таким именем (с учётом регистра)
pub async fn find_by_shop_name(db: &DatabaseConnection, shop_name: &str) -> anyhow::Result<Vec<Model>> {
    let sql = r#"
        SELECT
            rem.id,
            rem.table_id,
            rem.art,
            rem.category,
            rem.remainder,
            rem.price,
            rem.priceretail,
            rem.avg,
            rem.nosaledays
        FROM tab_shop_rem rem
        JOIN tab_tab shop ON rem.table_id = shop.id
        WHERE shop.name = ?
    "#;

    let stmt = Statement::from_sql_and_values(
        sea_orm::DatabaseBackend::Sqlite,
        sql,
        [shop_name.into()],
    );

    let rows = Model::find_by_statement(stmt).all(db).await?;

    Ok(rows)
}
