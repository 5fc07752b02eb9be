//! Domain entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "domains")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub domain: String,

    /// Registrar module slug as configured on the platform
    pub registrar: String,

    /// Domain status: Active, Pending Transfer, Expired, ...
    pub status: String,

    #[sea_orm(nullable)]
    pub next_due_date: Option<Date>,

    #[sea_orm(nullable)]
    pub next_invoice_date: Option<Date>,

    #[sea_orm(column_type = "Text")]
    pub additional_notes: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
