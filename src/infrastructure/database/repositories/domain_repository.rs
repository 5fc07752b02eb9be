//! SeaORM implementation of DomainRecordStore

use async_trait::async_trait;
use log::debug;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::domain::domain_record::model::{append_note_text, normalize};
use crate::domain::{
    DomainError, DomainQuery, DomainRecord, DomainRecordStore, DomainResult, DomainStatus,
    DomainUpdate,
};
use crate::infrastructure::database::entities::domain;

pub struct SeaOrmDomainRepository {
    db: DatabaseConnection,
}

impl SeaOrmDomainRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, id: i32) -> DomainResult<domain::Model> {
        domain::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| not_found(id))
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: domain::Model) -> DomainRecord {
    DomainRecord {
        id: m.id,
        domain: m.domain,
        registrar: m.registrar,
        status: DomainStatus::from_str(&m.status),
        next_due_date: m.next_due_date,
        next_invoice_date: m.next_invoice_date,
        notes: m.additional_notes,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}

fn not_found(id: i32) -> DomainError {
    DomainError::NotFound {
        entity: "Domain",
        field: "id",
        value: id.to_string(),
    }
}

fn lowered(list: &[String]) -> Vec<String> {
    list.iter().map(|s| normalize(s)).collect()
}

// ── DomainRecordStore impl ──────────────────────────────────────

#[async_trait]
impl DomainRecordStore for SeaOrmDomainRepository {
    async fn insert(&self, r: DomainRecord) -> DomainResult<i32> {
        debug!("Inserting domain: {}", r.domain);

        let model = domain::ActiveModel {
            id: if r.id == 0 { NotSet } else { Set(r.id) },
            domain: Set(r.domain),
            registrar: Set(r.registrar),
            status: Set(r.status.as_str().to_string()),
            next_due_date: Set(r.next_due_date),
            next_invoice_date: Set(r.next_invoice_date),
            additional_notes: Set(r.notes),
        };
        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        Ok(inserted.id)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<DomainRecord>> {
        let model = domain::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn query(&self, q: &DomainQuery) -> DomainResult<Vec<DomainRecord>> {
        let mut select = domain::Entity::find()
            .filter(domain::Column::Status.eq(q.status.as_str()))
            .filter(domain::Column::NextDueDate.is_not_null())
            .filter(domain::Column::NextDueDate.gt(q.due_after))
            .filter(
                Expr::expr(Func::lower(Expr::col(domain::Column::Registrar)))
                    .eq(normalize(&q.registrar)),
            );

        if let Some(limit) = q.due_on_or_before {
            select = select.filter(domain::Column::NextDueDate.lte(limit));
        }
        if !q.allow_list.is_empty() {
            select = select.filter(
                Expr::expr(Func::lower(Expr::col(domain::Column::Domain)))
                    .is_in(lowered(&q.allow_list)),
            );
        }
        if !q.deny_list.is_empty() {
            select = select.filter(
                Expr::expr(Func::lower(Expr::col(domain::Column::Domain)))
                    .is_not_in(lowered(&q.deny_list)),
            );
        }

        let models = select
            .order_by_asc(domain::Column::NextDueDate)
            .order_by_asc(domain::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn update(&self, id: i32, update: DomainUpdate) -> DomainResult<()> {
        debug!("Updating domain {}: {:?}", id, update);

        let existing = self.find_model(id).await?;
        if update.is_empty() {
            return Ok(());
        }

        let mut active: domain::ActiveModel = existing.into();
        if let Some(registrar) = update.registrar {
            active.registrar = Set(registrar);
        }
        if let Some(status) = update.status {
            active.status = Set(status.as_str().to_string());
        }
        if let Some(due) = update.next_due_date {
            active.next_due_date = Set(Some(due));
        }
        if let Some(invoice) = update.next_invoice_date {
            active.next_invoice_date = Set(Some(invoice));
        }
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn append_note(&self, id: i32, note: &str) -> DomainResult<()> {
        let existing = self.find_model(id).await?;
        let notes = append_note_text(&existing.additional_notes, note);

        let mut active: domain::ActiveModel = existing.into();
        active.additional_notes = Set(notes);
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }
}
