//! SeaORM implementation of ActivityLogger

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, EntityTrait, QueryOrder,
    QuerySelect, Set,
};

use crate::domain::{ActivityEntry, ActivityLogger, DomainError, DomainResult};
use crate::infrastructure::database::entities::activity_log;

pub struct SeaOrmActivityLogRepository {
    db: DatabaseConnection,
}

impl SeaOrmActivityLogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: activity_log::Model) -> ActivityEntry {
    ActivityEntry {
        id: m.id,
        message: m.message,
        created_at: m.created_at,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}

#[async_trait]
impl ActivityLogger for SeaOrmActivityLogRepository {
    async fn append(&self, message: &str) -> DomainResult<()> {
        debug!("Activity: {}", message);

        let model = activity_log::ActiveModel {
            id: NotSet,
            message: Set(message.to_string()),
            created_at: Set(Utc::now()),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn recent(&self, limit: u64) -> DomainResult<Vec<ActivityEntry>> {
        let models = activity_log::Entity::find()
            .order_by_desc(activity_log::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
